//! ImageMagick-backed de-polar transform.

use std::ffi::OsString;
use std::process::Command;

use super::provider::{DepolarRequest, TransformError, TransformProvider};

/// Default ImageMagick binary.
pub const DEFAULT_MAGICK_PATH: &str = "convert";

/// Default resampling filter passed to `-filter`.
pub const DEFAULT_FILTER: &str = "Cubic";

/// Runs `convert <in> -filter <f> +distort DePolar '<geometry>' <out>`.
///
/// # Example
/// ```rust,no_run
/// use donut_depolar::transform::MagickTransform;
///
/// // ImageMagick 7 ships a single `magick` binary
/// let magick = MagickTransform::with_path("magick");
/// assert!(magick.is_available());
/// ```
#[derive(Debug, Clone)]
pub struct MagickTransform {
    magick_path: String,
    filter: String,
}

impl Default for MagickTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl MagickTransform {
    /// Create a transform using `convert` from `PATH`.
    pub fn new() -> Self {
        Self {
            magick_path: DEFAULT_MAGICK_PATH.to_string(),
            filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// Create a transform with a custom ImageMagick binary.
    pub fn with_path(magick_path: impl Into<String>) -> Self {
        Self {
            magick_path: magick_path.into(),
            ..Self::new()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Arguments passed to the binary for `request`.
    pub fn command_args(&self, request: &DepolarRequest) -> Vec<OsString> {
        vec![
            request.input.clone().into_os_string(),
            "-filter".into(),
            self.filter.clone().into(),
            "+distort".into(),
            "DePolar".into(),
            request.distort_arguments().into(),
            request.output.clone().into_os_string(),
        ]
    }

    /// Check that the binary can be launched.
    pub fn is_available(&self) -> bool {
        Command::new(&self.magick_path)
            .arg("-version")
            .output()
            .is_ok()
    }
}

impl TransformProvider for MagickTransform {
    fn name(&self) -> &str {
        &self.magick_path
    }

    fn depolarize(&self, request: &DepolarRequest) -> Result<(), TransformError> {
        tracing::debug!(
            "Running {} {:?}",
            self.magick_path,
            self.command_args(request)
        );

        let output = Command::new(&self.magick_path)
            .args(self.command_args(request))
            .output()
            .map_err(|e| TransformError::Spawn {
                program: self.magick_path.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TransformError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Calibration;

    fn request() -> DepolarRequest {
        let calibration = Calibration {
            center_x: 100,
            center_y: 100,
            inner_radius: 50,
            outer_radius: 100,
        };
        DepolarRequest::new("a.png", "out_a.png", &calibration)
    }

    #[test]
    fn test_magick_transform_new() {
        let magick = MagickTransform::new();
        assert_eq!(magick.magick_path, "convert");
        assert_eq!(magick.filter, "Cubic");
    }

    #[test]
    fn test_command_args() {
        let args = MagickTransform::new().command_args(&request());
        let expected: Vec<OsString> = ["a.png", "-filter", "Cubic", "+distort", "DePolar", "100 50 100 100", "out_a.png"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_custom_path_and_filter() {
        let magick = MagickTransform::with_path("magick").with_filter("Lanczos");
        assert_eq!(magick.name(), "magick");
        assert_eq!(magick.command_args(&request())[2], OsString::from("Lanczos"));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let magick = MagickTransform::with_path("definitely-not-an-imagemagick-binary");
        assert!(!magick.is_available());
        match magick.depolarize(&request()) {
            Err(TransformError::Spawn { program, .. }) => {
                assert_eq!(program, "definitely-not-an-imagemagick-binary")
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }
}
