//! Interactive folder selection
//!
//! Used when the input or output folder is not given on the command line
//! and a terminal is attached.

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input};
use rotate_batch_core::file_discovery::{FileDiscoveryOptions, discover_files};
use std::path::{Path, PathBuf};

/// Remove surrounding whitespace, then any quotes left at either end
///
/// Paths dragged into a terminal are often pasted as `"C:\My Photos"` or
/// `'/home/me/my photos'`. Each end is stripped on its own, so a stray
/// quote from a half-finished paste is dropped too.
pub fn clean_path_input(raw: &str) -> String {
    raw.trim().trim_matches(['"', '\'']).to_string()
}

/// Number of images directly inside `dir`
pub fn count_images(dir: &Path) -> Result<usize> {
    let files = discover_files(dir, FileDiscoveryOptions::new())
        .with_context(|| format!("Failed to list {}", dir.display()))?;
    Ok(files.len())
}

fn ask_path(prompt: &str) -> Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .context("Failed to read folder path")?;
    Ok(PathBuf::from(clean_path_input(&raw)))
}

/// Ask for the input folder until an existing one is given
///
/// A folder without images is reported and the user may pick another one.
pub fn prompt_input_dir() -> Result<PathBuf> {
    loop {
        let path = ask_path("Folder containing the images to rotate")?;

        if !path.is_dir() {
            eprintln!(
                "{} {} is not an existing folder, please try again",
                "✗".red(),
                path.display()
            );
            continue;
        }

        let images = count_images(&path)?;
        if images > 0 {
            eprintln!(
                "{} Found {} image(s) in {}",
                "✓".green(),
                images,
                path.display()
            );
            return Ok(path);
        }

        eprintln!(
            "{} No supported images found in {}",
            "!".yellow(),
            path.display()
        );
        let choose_again = Confirm::new()
            .with_prompt("Choose a different folder?")
            .default(true)
            .interact()
            .context("Failed to read input")?;
        if !choose_again {
            return Ok(path);
        }
    }
}

/// Ask for the output folder until it exists or could be created
pub fn prompt_output_dir() -> Result<PathBuf> {
    loop {
        let path = ask_path("Folder to save the rotated images to")?;

        match std::fs::create_dir_all(&path) {
            Ok(()) => return Ok(path),
            Err(e) => {
                eprintln!(
                    "{} Could not create {}: {}",
                    "✗".red(),
                    path.display(),
                    e
                );
            }
        }
    }
}
