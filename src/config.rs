use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::utils::ScanError;

pub const DEFAULT_CONSENSUS_THRESHOLD: usize = 3;
pub const DEFAULT_SENTINEL: char = '«';
pub const DEFAULT_EXPIRY_HORIZON_YEARS: i32 = 10;

/// Inclusive range of acceptable MRZ line lengths, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl LengthWindow {
    pub const fn new(min: usize, max: usize) -> Self {
        LengthWindow { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

/// Tunables for detection, extraction and consensus. The detection values are
/// heuristics fitted to one OCR engine's failure modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Consecutive identical observations each field needs before acceptance.
    pub consensus_threshold: usize,
    /// Line length windows for the 2-line layout. Both lines of a pair must
    /// fall in the same window.
    pub two_line_lengths: Vec<LengthWindow>,
    pub three_line_length: LengthWindow,
    /// Character the OCR engine emits on known-bad reads of `<<`.
    pub sentinel: char,
    /// Sex markers rewritten before they reach the record.
    pub gender_aliases: BTreeMap<char, char>,
    /// An expiry year further than this into the future belongs to the
    /// previous century.
    pub expiry_horizon_years: i32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let mut gender_aliases = BTreeMap::new();
        gender_aliases.insert('H', 'M');

        ScannerConfig {
            consensus_threshold: DEFAULT_CONSENSUS_THRESHOLD,
            two_line_lengths: vec![LengthWindow::new(43, 45), LengthWindow::new(36, 36)],
            three_line_length: LengthWindow::new(29, 31),
            sentinel: DEFAULT_SENTINEL,
            gender_aliases,
            expiry_horizon_years: DEFAULT_EXPIRY_HORIZON_YEARS,
        }
    }
}

impl ScannerConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();
        debug!("Loading scanner config from {}", path.display());

        let contents = fs::read_to_string(path)?;
        let config: ScannerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.consensus_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.consensus_threshold == 0 {
            return Err(ScanError::ConfigError(
                "consensus_threshold must be at least 1".to_string(),
            ));
        }
        if self.two_line_lengths.is_empty() {
            return Err(ScanError::ConfigError(
                "two_line_lengths must hold at least one window".to_string(),
            ));
        }
        let windows = self.two_line_lengths.iter().chain(std::iter::once(&self.three_line_length));
        for window in windows {
            if window.min == 0 || window.min > window.max {
                return Err(ScanError::ConfigError(format!(
                    "invalid line length window {}..={}",
                    window.min, window.max
                )));
            }
        }
        if self.sentinel == '<' {
            return Err(ScanError::ConfigError(
                "sentinel cannot be the MRZ filler character".to_string(),
            ));
        }
        if self.expiry_horizon_years < 0 {
            return Err(ScanError::ConfigError(
                "expiry_horizon_years cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
