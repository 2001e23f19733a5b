//! Font loading utilities for the report builder.
//!
//! The crate renders with the bundled Roboto family.  The font files are not
//! committed; `assets/fonts/README.md` describes where to fetch them, and the
//! directory can be overridden with the `RV_REPORT_FONTS_DIR` environment
//! variable.  Callers (and the test suite) can probe availability with
//! [`default_fonts_available`] before building.

use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable that overrides the bundled font directory.
pub const FONTS_DIR_ENV: &str = "RV_REPORT_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

fn font_directory() -> PathBuf {
    std::env::var_os(FONTS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"))
}

fn ensure_directory_exists(path: &Path) -> Result<(), Error> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::new(
            format!(
                "Font directory missing at {}. See assets/fonts/README.md for setup, or set {}.",
                path.display(),
                FONTS_DIR_ENV
            ),
            io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
        ))
    }
}

fn ensure_required_fonts_present(path: &Path) -> Result<(), Error> {
    let missing: Vec<_> = FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        let display_list = missing
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Err(Error::new(
            format!(
                "Missing font files: {}. See assets/fonts/README.md for instructions.",
                display_list
            ),
            io::Error::new(io::ErrorKind::NotFound, "bundled fonts missing"),
        ))
    }
}

/// Returns the Roboto font family as a `genpdf` font family definition.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = font_directory();
    ensure_directory_exists(&directory)?;
    ensure_required_fonts_present(&directory)?;

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Indicates whether all font files required for rendering are present.
pub fn default_fonts_available() -> bool {
    let directory = font_directory();
    directory.exists()
        && FONT_FILES
            .iter()
            .map(|name| directory.join(name))
            .all(|path| path.is_file())
}
