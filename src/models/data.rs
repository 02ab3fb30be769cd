use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rules::DocumentType;

// OCR engine output. Geometry is carried through untouched; only block text
// feeds MRZ detection.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoundingFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub bounding_center_x: f64,
    pub bounding_center_y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextElement {
    pub text: String,
    pub frame: BoundingFrame,
    pub corner_points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextLine {
    pub text: String,
    pub elements: Vec<TextElement>,
    pub frame: BoundingFrame,
    pub recognized_languages: Vec<String>,
    pub corner_points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBlock {
    pub text: String,
    pub lines: Vec<TextLine>,
    pub frame: BoundingFrame,
    pub recognized_languages: Vec<String>,
    pub corner_points: Vec<Point>,
}

/// Recognized text of one camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFrameText {
    pub text: String,
    pub blocks: Vec<TextBlock>,
}

impl RawFrameText {
    /// Build a frame from plain block strings, without geometry.
    pub fn from_blocks<S: AsRef<str>>(blocks: &[S]) -> Self {
        let blocks: Vec<TextBlock> = blocks
            .iter()
            .map(|text| TextBlock {
                text: text.as_ref().to_string(),
                ..TextBlock::default()
            })
            .collect();
        let text = blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        RawFrameText { text, blocks }
    }

    pub fn block_texts(&self) -> Vec<&str> {
        self.blocks.iter().map(|block| block.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    TD1,  // ID Card (85.6mm × 54.0mm)
    TD2,  // ID Card (105.0mm × 74.0mm)
    TD3,  // Passport (125.0mm × 88.0mm)
    MRVA, // Visa Format-A (80.0mm × 120.0mm)
    MRVB, // Visa Format-B (74.0mm × 105.0mm)
}

impl DocumentFormat {
    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 30,
            DocumentFormat::TD2 => 36,
            DocumentFormat::TD3 => 44,
            DocumentFormat::MRVA => 44,
            DocumentFormat::MRVB => 36,
        }
    }

    /// Best guess of the physical format from the MRZ shape and the leading
    /// document code. OCR often adds or drops a character, so the closest
    /// nominal line width wins.
    pub fn infer(layout: MrzLayout, line_len: usize, document_code: &str) -> DocumentFormat {
        if layout == MrzLayout::ThreeLine {
            return DocumentFormat::TD1;
        }

        let is_visa = document_code.starts_with('V');
        let long_line = line_len.abs_diff(DocumentFormat::TD3.mrz_chars_per_line())
            < line_len.abs_diff(DocumentFormat::TD2.mrz_chars_per_line());

        match (long_line, is_visa) {
            (true, true) => DocumentFormat::MRVA,
            (true, false) => DocumentFormat::TD3,
            (false, true) => DocumentFormat::MRVB,
            (false, false) => DocumentFormat::TD2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MrzLayout {
    TwoLine,
    ThreeLine,
}

impl MrzLayout {
    pub fn line_count(&self) -> usize {
        match self {
            MrzLayout::TwoLine => 2,
            MrzLayout::ThreeLine => 3,
        }
    }
}

/// Outcome of each embedded check digit. `None` means the digit position did
/// not hold a digit (or lay beyond the end of the line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDigitReport {
    pub id_number: Option<bool>,
    pub date_of_birth: Option<bool>,
    pub date_of_expiry: Option<bool>,
}

/// Fields extracted from one frame's MRZ. Unresolved fields are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MrzRecord {
    #[serde(rename = "docMRZ")]
    pub doc_mrz: String,
    pub layout: MrzLayout,
    pub document_format: DocumentFormat,
    pub doc_type: Option<DocumentType>,
    pub issuing_country: Option<String>,
    pub given_names: Option<String>,
    pub last_names: Option<String>,
    pub id_number: String,
    pub nationality: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<char>,
    pub doc_expiration_date: Option<NaiveDate>,
    pub additional_information: Option<String>,
    pub check_digits: CheckDigitReport,
}

/// Why a frame produced no record. None of these are fatal; the frame is
/// simply skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    /// No run of lines matched an MRZ layout.
    NoCandidate,
    /// The OCR sentinel character was found near the end of the frame.
    SentinelRejected,
    /// A candidate was found but the document number came out empty.
    RecordInvalid,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Rejection::NoCandidate => write!(f, "no MRZ candidate"),
            Rejection::SentinelRejected => write!(f, "sentinel character in MRZ lines"),
            Rejection::RecordInvalid => write!(f, "document number unresolved"),
        }
    }
}

/// Result of feeding one frame through a scanning session.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Rejected(Rejection),
    /// A record was parsed and voted on, but consensus is not reached yet.
    Observed(MrzRecord),
    /// Consensus reached; this is the session's final record.
    Final(MrzRecord),
    /// The session already emitted its final record and ignores frames.
    SessionComplete,
}
