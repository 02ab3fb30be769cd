use chrono::NaiveDate;
use log::debug;

use crate::config::ScannerConfig;
use crate::consensus::{ConsensusEngine, FieldProgress};
use crate::models::{FrameOutcome, MrzRecord, RawFrameText, Rejection};
use crate::processing::{CandidateDetector, FieldExtractor};
use crate::utils::ScanError;

/// One scanning session: frames go in, and a final record comes out once
/// enough consecutive frames agree.
pub struct MrzScanner {
    config: ScannerConfig,
    detector: CandidateDetector,
    extractor: FieldExtractor,
    consensus: ConsensusEngine,
}

impl MrzScanner {
    pub fn new(config: ScannerConfig) -> Result<Self, ScanError> {
        config.validate()?;

        Ok(MrzScanner {
            detector: CandidateDetector::new(&config),
            extractor: FieldExtractor::new(&config),
            consensus: ConsensusEngine::new(config.consensus_threshold),
            config,
        })
    }

    /// Pin the date used to resolve two-digit years.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.extractor = self.extractor.with_today(today);
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Parse a single frame without voting.
    pub fn parse_lines<S: AsRef<str>>(&self, blocks: &[S]) -> Result<MrzRecord, Rejection> {
        let candidate = self.detector.detect(blocks)?;
        self.extractor.extract(&candidate)
    }

    pub fn scan_frame(&mut self, frame: &RawFrameText) -> FrameOutcome {
        let blocks = frame.block_texts();
        self.scan_lines(blocks.as_slice())
    }

    pub fn scan_lines<S: AsRef<str>>(&mut self, blocks: &[S]) -> FrameOutcome {
        if self.consensus.is_complete() {
            return FrameOutcome::SessionComplete;
        }

        let record = match self.parse_lines(blocks) {
            Ok(record) => record,
            Err(rejection) => {
                debug!("Frame skipped: {}", rejection);
                return FrameOutcome::Rejected(rejection);
            }
        };

        match self.consensus.observe(&record) {
            Some(final_record) => FrameOutcome::Final(final_record),
            None => FrameOutcome::Observed(record),
        }
    }

    pub fn progress(&self) -> Vec<FieldProgress> {
        self.consensus.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.consensus.is_complete()
    }

    pub fn final_record(&self) -> Option<&MrzRecord> {
        self.consensus.final_record()
    }

    /// Abandon the current session and start over.
    pub fn reset(&mut self) {
        self.consensus.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TD3_LINE1: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
    const TD3_LINE2: &str = "L898902C36UTO6908061F9406236ZE184226B<<<<<10";

    fn scanner() -> MrzScanner {
        MrzScanner::new(ScannerConfig::default())
            .unwrap()
            .with_today(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_session_reaches_final_record() {
        let mut scanner = scanner();
        let frame = RawFrameText::from_blocks(&["UTOPIA", TD3_LINE1, TD3_LINE2]);

        assert!(matches!(scanner.scan_frame(&frame), FrameOutcome::Observed(_)));
        assert!(matches!(
            scanner.scan_lines(&["blurry text"]),
            FrameOutcome::Rejected(Rejection::NoCandidate)
        ));
        assert!(matches!(scanner.scan_frame(&frame), FrameOutcome::Observed(_)));

        match scanner.scan_frame(&frame) {
            FrameOutcome::Final(record) => {
                assert_eq!(record.id_number, "L898902C3");
                assert_eq!(record.given_names.as_deref(), Some("ANNA MARIA"));
            }
            other => panic!("expected final record, got {:?}", other),
        }

        assert!(scanner.is_complete());
        assert_eq!(scanner.scan_frame(&frame), FrameOutcome::SessionComplete);
    }

    #[test]
    fn test_rejected_frames_do_not_vote() {
        let mut scanner = scanner();
        let bad = format!("{}«", &TD3_LINE2[..43]);

        for _ in 0..5 {
            assert_eq!(
                scanner.scan_lines(&[TD3_LINE1, bad.as_str()]),
                FrameOutcome::Rejected(Rejection::SentinelRejected)
            );
        }
        assert!(scanner.progress().iter().all(|p| p.count == 0));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let config = ScannerConfig::default().with_threshold(0);
        assert!(matches!(MrzScanner::new(config), Err(ScanError::ConfigError(_))));
    }

    #[test]
    fn test_reset_session() {
        let mut scanner = MrzScanner::new(ScannerConfig::default().with_threshold(1)).unwrap();
        assert!(matches!(
            scanner.scan_lines(&[TD3_LINE1, TD3_LINE2]),
            FrameOutcome::Final(_)
        ));
        scanner.reset();
        assert!(scanner.final_record().is_none());
        assert!(matches!(
            scanner.scan_lines(&[TD3_LINE1, TD3_LINE2]),
            FrameOutcome::Final(_)
        ));
    }
}
