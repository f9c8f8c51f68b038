//! Command line input checks and image loading.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

/// No image arguments were supplied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Give (at least one) file name(s) of the image(s) to process")]
pub struct UsageError;

/// Image loading errors.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open image {path}: {reason}")]
    Open { path: PathBuf, reason: String },
}

/// Check that at least one image was given.
///
/// Runs before any window is created.
pub fn validate_inputs(files: &[PathBuf]) -> Result<&[PathBuf], UsageError> {
    if files.is_empty() {
        return Err(UsageError);
    }
    Ok(files)
}

/// Open and decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage, InputError> {
    let img = image::open(path).map_err(|e| InputError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_inputs_empty() {
        assert_eq!(validate_inputs(&[]), Err(UsageError));
    }

    #[test]
    fn test_validate_inputs_keeps_order() {
        let files = vec![PathBuf::from("b.png"), PathBuf::from("a.png")];
        assert_eq!(validate_inputs(&files).unwrap(), files.as_slice());
    }

    #[test]
    fn test_usage_message() {
        assert!(UsageError.to_string().contains("at least one"));
    }

    #[test]
    fn test_load_missing_image() {
        let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.png"));
    }
}
