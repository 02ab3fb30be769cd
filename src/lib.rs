pub mod config;
pub mod consensus;
pub mod models;
pub mod processing;
pub mod scanner;
pub mod utils;
pub mod validation;

pub use config::ScannerConfig;
pub use consensus::ConsensusEngine;
pub use models::{FrameOutcome, MrzRecord, RawFrameText, Rejection};
pub use scanner::MrzScanner;

/// Parse one frame's text blocks with the default configuration, without
/// any multi-frame voting.
pub fn parse_mrz<S: AsRef<str>>(blocks: &[S]) -> Result<MrzRecord, Rejection> {
    let config = ScannerConfig::default();
    let candidate = processing::CandidateDetector::new(&config).detect(blocks)?;
    processing::FieldExtractor::new(&config).extract(&candidate)
}
