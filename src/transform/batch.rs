//! Applies one calibration to every input file, in order.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::calibration::{Calibration, CalibrationError};
use crate::capture::PointSequence;

use super::provider::{DepolarRequest, TransformError, TransformProvider};

/// Prefix prepended to each input file name to form its output name.
pub const DEFAULT_OUTPUT_PREFIX: &str = "out_";

/// Output path for `input`: same directory, file name prefixed.
pub fn output_path_for(input: &Path, prefix: &str) -> PathBuf {
    let mut name = OsString::from(prefix);
    if let Some(file_name) = input.file_name() {
        name.push(file_name);
    }
    input.with_file_name(name)
}

/// An input path and the output path it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Result of one batch item.
#[derive(Debug)]
pub struct ItemOutcome {
    pub item: BatchItem,
    pub result: Result<(), TransformError>,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-item outcomes of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Outcomes whose transform failed.
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Runs a [`TransformProvider`] over a list of files.
///
/// Items are processed sequentially in argument order. A failed item is
/// logged and recorded in the report; the batch always continues.
pub struct BatchTransformer<P: TransformProvider> {
    provider: P,
    prefix: String,
}

impl<P: TransformProvider> BatchTransformer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Pair each input with its output path.
    pub fn items(&self, inputs: &[PathBuf]) -> Vec<BatchItem> {
        inputs
            .iter()
            .map(|input| BatchItem {
                input: input.clone(),
                output: output_path_for(input, &self.prefix),
            })
            .collect()
    }

    /// Transform every input with `calibration`.
    pub fn run(&self, inputs: &[PathBuf], calibration: &Calibration) -> BatchReport {
        let items = self.items(inputs);
        let total = items.len();
        let mut report = BatchReport::default();

        for (i, item) in items.into_iter().enumerate() {
            println!(
                "🔄 [{}/{}] {} -> {}",
                i + 1,
                total,
                item.input.display(),
                item.output.display()
            );

            let request = DepolarRequest::new(&item.input, &item.output, calibration);
            let result = self.provider.depolarize(&request);

            match &result {
                Ok(()) => tracing::info!("Wrote {}", item.output.display()),
                Err(e) => tracing::warn!(
                    "{} failed for {}: {}",
                    self.provider.name(),
                    item.input.display(),
                    e
                ),
            }

            report.outcomes.push(ItemOutcome { item, result });
        }

        report
    }

    /// Derive the calibration from captured `points`, then transform every input.
    ///
    /// With fewer than three points the error is returned and no file is
    /// transformed.
    pub fn run_calibrated(
        &self,
        inputs: &[PathBuf],
        points: &PointSequence,
    ) -> Result<(Calibration, BatchReport), CalibrationError> {
        let calibration = Calibration::from_points(points)?;
        println!("\n🎯 Calibration: {}\n", calibration);

        Ok((calibration, self.run(inputs, &calibration)))
    }
}
