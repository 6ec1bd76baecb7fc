//! The fixed rotation sweep and its output naming scheme

use std::path::{Path, PathBuf};

/// Degrees between two consecutive rotations
pub const SWEEP_STEP_DEGREES: u16 = 2;

/// Exclusive upper bound of the sweep
pub const FULL_TURN_DEGREES: u16 = 360;

/// Number of rotations written per source image
pub const ROTATIONS_PER_IMAGE: usize = (FULL_TURN_DEGREES / SWEEP_STEP_DEGREES) as usize;

/// Infix between the base name and the angle in output file names
pub const ROTATED_INFIX: &str = "_rotated_";

/// Extension of every output file, regardless of the source format
pub const OUTPUT_EXTENSION: &str = "png";

/// Angles of the sweep in processing order: 0, 2, 4, ..., 358
pub fn sweep_angles() -> impl ExactSizeIterator<Item = u16> + Clone {
    (0..ROTATIONS_PER_IMAGE).map(|step| step as u16 * SWEEP_STEP_DEGREES)
}

/// Output file name for one rotation, e.g. `cat_rotated_004.png`
///
/// The base name is used verbatim.
pub fn rotated_file_name(base_name: &str, angle: u16) -> String {
    format!("{base_name}{ROTATED_INFIX}{angle:03}.{OUTPUT_EXTENSION}")
}

/// Full output path for one rotation
pub fn rotated_file_path(output_dir: &Path, base_name: &str, angle: u16) -> PathBuf {
    output_dir.join(rotated_file_name(base_name, angle))
}
