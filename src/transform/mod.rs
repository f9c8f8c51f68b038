//! De-polar transform providers and the batch loop.

mod batch;
mod magick;
mod provider;

pub use batch::{
    output_path_for, BatchItem, BatchReport, BatchTransformer, ItemOutcome,
    DEFAULT_OUTPUT_PREFIX,
};
pub use magick::{MagickTransform, DEFAULT_FILTER, DEFAULT_MAGICK_PATH};
pub use provider::{DepolarRequest, DryRunTransform, TransformError, TransformProvider};
