//! Multi-frame agreement over per-frame MRZ records.
//!
//! Every tracked field keeps its own [`ConsensusWindow`]. A record is
//! accepted once each window has seen the same value for `threshold`
//! consecutive frames; a disagreement on one field only resets that field.
//! A field that has reached the threshold stops voting until [`reset`].
//!
//! [`reset`]: ConsensusEngine::reset

pub mod window;

use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;

use crate::models::MrzRecord;
pub use window::ConsensusWindow;

/// Raw MRZ text is remembered, not voted on.
pub const DOC_MRZ_THRESHOLD: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    DocType,
    IssuingCountry,
    GivenNames,
    LastNames,
    IdNumber,
    Nationality,
    Dob,
    Gender,
    DocExpirationDate,
    AdditionalInformation,
    DocMrz,
}

impl TrackedField {
    /// Update order within a frame.
    pub const ALL: [TrackedField; 11] = [
        TrackedField::DocType,
        TrackedField::IssuingCountry,
        TrackedField::GivenNames,
        TrackedField::LastNames,
        TrackedField::IdNumber,
        TrackedField::Nationality,
        TrackedField::Dob,
        TrackedField::Gender,
        TrackedField::DocExpirationDate,
        TrackedField::AdditionalInformation,
        TrackedField::DocMrz,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrackedField::DocType => "DocType",
            TrackedField::IssuingCountry => "Issuing Country",
            TrackedField::GivenNames => "Given name",
            TrackedField::LastNames => "Last name",
            TrackedField::IdNumber => "ID Number",
            TrackedField::Nationality => "Nationality",
            TrackedField::Dob => "DOB",
            TrackedField::Gender => "Gender",
            TrackedField::DocExpirationDate => "Expiration Date",
            TrackedField::AdditionalInformation => "Additional Info",
            TrackedField::DocMrz => "DocMRZ",
        }
    }

    /// The field's value in `record`, in a form that compares by equality.
    pub fn value_of(&self, record: &MrzRecord) -> Option<String> {
        match self {
            TrackedField::DocType => record.doc_type.map(|t| format!("{:?}", t)),
            TrackedField::IssuingCountry => record.issuing_country.clone(),
            TrackedField::GivenNames => record.given_names.clone(),
            TrackedField::LastNames => record.last_names.clone(),
            TrackedField::IdNumber => Some(record.id_number.clone()),
            TrackedField::Nationality => record.nationality.clone(),
            TrackedField::Dob => record.dob.map(|d| d.to_string()),
            TrackedField::Gender => record.gender.map(String::from),
            TrackedField::DocExpirationDate => record.doc_expiration_date.map(|d| d.to_string()),
            TrackedField::AdditionalInformation => record.additional_information.clone(),
            TrackedField::DocMrz => Some(record.doc_mrz.clone()),
        }
    }
}

/// How far one field is from acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProgress {
    pub field: TrackedField,
    pub count: usize,
    pub required: usize,
}

impl FieldProgress {
    pub fn is_satisfied(&self) -> bool {
        self.count >= self.required
    }
}

impl fmt::Display for FieldProgress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} / {}",
            self.field.label(),
            self.count.min(self.required),
            self.required
        )
    }
}

pub struct ConsensusEngine {
    threshold: usize,
    windows: Vec<(TrackedField, ConsensusWindow)>,
    final_record: Option<MrzRecord>,
}

impl ConsensusEngine {
    pub fn new(threshold: usize) -> Self {
        let threshold = if threshold == 0 {
            warn!("Consensus threshold 0 is meaningless, using 1");
            1
        } else {
            threshold
        };

        ConsensusEngine {
            threshold,
            windows: TrackedField::ALL
                .iter()
                .map(|field| (*field, ConsensusWindow::new()))
                .collect(),
            final_record: None,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn required(&self, field: TrackedField) -> usize {
        match field {
            TrackedField::DocMrz => DOC_MRZ_THRESHOLD,
            _ => self.threshold,
        }
    }

    /// Vote with one frame's record. Returns the final record on the frame
    /// that completes consensus, `None` otherwise. Once a final record has
    /// been emitted the session ignores further frames until [`reset`].
    ///
    /// [`reset`]: ConsensusEngine::reset
    pub fn observe(&mut self, record: &MrzRecord) -> Option<MrzRecord> {
        if self.final_record.is_some() {
            debug!("Consensus already reached, ignoring frame");
            return None;
        }

        let threshold = self.threshold;
        for (field, window) in self.windows.iter_mut() {
            let value = field.value_of(record);
            if *field == TrackedField::DocMrz {
                window.replace(value);
            } else if window.is_satisfied(threshold) {
                // Agreed fields are settled for the rest of the session
                continue;
            } else if window.observe(value) {
                debug!("{} disagreed with previous frames, window reset", field.label());
            }
        }

        if !self.all_satisfied() {
            debug!(
                "Consensus progress: {}",
                self.progress()
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return None;
        }

        info!("Consensus reached on document {}", record.id_number);
        self.final_record = Some(record.clone());
        Some(record.clone())
    }

    pub fn all_satisfied(&self) -> bool {
        self.windows
            .iter()
            .all(|(field, window)| window.is_satisfied(self.required(*field)))
    }

    pub fn progress(&self) -> Vec<FieldProgress> {
        self.windows
            .iter()
            .map(|(field, window)| FieldProgress {
                field: *field,
                count: window.len(),
                required: self.required(*field),
            })
            .collect()
    }

    pub fn window(&self, field: TrackedField) -> Option<&ConsensusWindow> {
        self.windows
            .iter()
            .find(|(tracked, _)| *tracked == field)
            .map(|(_, window)| window)
    }

    pub fn is_complete(&self) -> bool {
        self.final_record.is_some()
    }

    pub fn final_record(&self) -> Option<&MrzRecord> {
        self.final_record.as_ref()
    }

    /// Drop all agreement and start a new session.
    pub fn reset(&mut self) {
        for (_, window) in self.windows.iter_mut() {
            window.clear();
        }
        self.final_record = None;
    }
}
