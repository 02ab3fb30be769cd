use log::debug;

use super::field_correction::FieldCorrection;
use crate::config::{LengthWindow, ScannerConfig};
use crate::models::{MrzLayout, Rejection};

/// Two or three adjacent lines shaped like an MRZ, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzCandidate {
    pub layout: MrzLayout,
    pub lines: Vec<String>,
}

/// Locates MRZ lines among the text blocks of one frame.
pub struct CandidateDetector {
    two_line_lengths: Vec<LengthWindow>,
    three_line_length: LengthWindow,
    sentinel: char,
}

impl CandidateDetector {
    pub fn new(config: &ScannerConfig) -> Self {
        CandidateDetector {
            two_line_lengths: config.two_line_lengths.clone(),
            three_line_length: config.three_line_length,
            sentinel: config.sentinel,
        }
    }

    /// Normalize the blocks and flatten them into lines. The OCR engine
    /// sometimes returns several physical lines in one block, separated by
    /// `\n`.
    pub fn normalize_lines<S: AsRef<str>>(blocks: &[S]) -> Vec<String> {
        blocks
            .iter()
            .flat_map(|block| {
                FieldCorrection::normalize_block(block.as_ref())
                    .split('\n')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn detect<S: AsRef<str>>(&self, blocks: &[S]) -> Result<MrzCandidate, Rejection> {
        let lines = Self::normalize_lines(blocks);

        if lines.iter().rev().take(2).any(|line| line.contains(self.sentinel)) {
            debug!("Sentinel found in the last two lines, skipping frame");
            return Err(Rejection::SentinelRejected);
        }

        if let Some(pair) = lines.windows(2).find(|pair| self.is_two_line_pair(pair)) {
            return Ok(MrzCandidate {
                layout: MrzLayout::TwoLine,
                lines: pair.to_vec(),
            });
        }

        if lines.len() >= 3 {
            if lines[lines.len() - 3].contains(self.sentinel) {
                debug!("Sentinel found in the third-from-last line, skipping frame");
                return Err(Rejection::SentinelRejected);
            }

            let window = self.three_line_length;
            if let Some(triple) = lines
                .windows(3)
                .find(|triple| triple.iter().all(|line| window.contains(char_len(line))))
            {
                return Ok(MrzCandidate {
                    layout: MrzLayout::ThreeLine,
                    lines: triple.to_vec(),
                });
            }
        }

        Err(Rejection::NoCandidate)
    }

    fn is_two_line_pair(&self, pair: &[String]) -> bool {
        let first = char_len(&pair[0]);
        let second = char_len(&pair[1]);
        self.two_line_lengths
            .iter()
            .any(|window| window.contains(first) && window.contains(second))
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}
