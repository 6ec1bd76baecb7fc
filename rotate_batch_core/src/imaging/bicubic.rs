//! Same-canvas bicubic rotation
//!
//! # Algorithm Overview
//!
//! 1. **Inverse mapping**: every output pixel center is rotated back into
//!    source space around the canvas center, so the output has no holes.
//!
//! 2. **Clipping**: output pixels whose source position falls outside the
//!    source canvas keep the zero fill (black, or transparent with alpha).
//!
//! 3. **Bicubic interpolation**: Keys cubic weights (a = -0.5) over a 4x4
//!    neighborhood, with neighbor indices clamped to the image edge.
//!
//! Coordinates use y pointing down, so a positive angle turns the top of the
//! image toward the right.

use image::{ImageBuffer, Pixel};

/// Keys kernel parameter, the classic Catmull-Rom choice.
const CUBIC_A: f64 = -0.5;

/// Tolerance for source positions that land exactly on the canvas border.
const EDGE_EPSILON: f64 = 1e-6;

/// Channel sample types the kernel can interpolate.
pub trait Sample: Copy {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Sample for u8 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, f64::from(u8::MAX)) as u8
    }
}

impl Sample for u16 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

impl Sample for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

/// Keys cubic convolution kernel.
fn keys_kernel(distance: f64) -> f64 {
    let x = distance.abs();
    if x < 1.0 {
        ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((CUBIC_A * x - 5.0 * CUBIC_A) * x + 8.0 * CUBIC_A) * x - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

/// Weights for the samples at offsets -1, 0, +1, +2 from the integer
/// position, for a fractional offset `t` in [0, 1). They sum to 1.
pub fn cubic_weights(t: f64) -> [f64; 4] {
    [
        keys_kernel(1.0 + t),
        keys_kernel(t),
        keys_kernel(1.0 - t),
        keys_kernel(2.0 - t),
    ]
}

/// Rotate `src` clockwise by `degrees` onto a canvas of the same size.
pub fn rotate_clockwise<P>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    degrees: f32,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
    P::Subpixel: Sample,
{
    let (width, height) = src.dimensions();
    let mut out: ImageBuffer<P, Vec<P::Subpixel>> = ImageBuffer::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let channels = usize::from(P::CHANNEL_COUNT);
    let (sin_a, cos_a) = f64::from(degrees).to_radians().sin_cos();
    let w = f64::from(width);
    let h = f64::from(height);
    let cx = w * 0.5;
    let cy = h * 0.5;
    let max_x = i64::from(width) - 1;
    let max_y = i64::from(height) - 1;
    let row_stride = width as usize * channels;

    let data: &[P::Subpixel] = src.as_raw();
    let dst: &mut [P::Subpixel] = &mut out;
    let mut acc = vec![0.0_f64; channels];

    for y in 0..height {
        let dy = f64::from(y) + 0.5 - cy;
        for x in 0..width {
            let dx = f64::from(x) + 0.5 - cx;
            let src_x = cos_a * dx + sin_a * dy + cx;
            let src_y = -sin_a * dx + cos_a * dy + cy;

            if !src_x.is_finite()
                || !src_y.is_finite()
                || src_x < -EDGE_EPSILON
                || src_y < -EDGE_EPSILON
                || src_x > w + EDGE_EPSILON
                || src_y > h + EDGE_EPSILON
            {
                continue;
            }

            // Pixel centers sit at integer + 0.5.
            let fx = src_x - 0.5;
            let fy = src_y - 0.5;
            let base_x = fx.floor();
            let base_y = fy.floor();
            let wx = cubic_weights(fx - base_x);
            let wy = cubic_weights(fy - base_y);
            let base_x = base_x as i64;
            let base_y = base_y as i64;

            acc.iter_mut().for_each(|a| *a = 0.0);
            for (j, weight_y) in wy.iter().enumerate() {
                let sy = (base_y - 1 + j as i64).clamp(0, max_y) as usize;
                let row = &data[sy * row_stride..(sy + 1) * row_stride];
                for (i, weight_x) in wx.iter().enumerate() {
                    let sx = (base_x - 1 + i as i64).clamp(0, max_x) as usize;
                    let weight = weight_x * weight_y;
                    let pixel = &row[sx * channels..(sx + 1) * channels];
                    for (a, sample) in acc.iter_mut().zip(pixel) {
                        *a += sample.to_f64() * weight;
                    }
                }
            }

            let offset = y as usize * row_stride + x as usize * channels;
            for (d, a) in dst[offset..offset + channels].iter_mut().zip(&acc) {
                *d = P::Subpixel::from_f64(*a);
            }
        }
    }

    out
}
