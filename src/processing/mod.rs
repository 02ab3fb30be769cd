pub mod candidate;
pub mod extractors;
pub mod field_correction;

pub use candidate::{CandidateDetector, MrzCandidate};
pub use extractors::{FieldExtractor, NameTokens};
pub use field_correction::FieldCorrection;
