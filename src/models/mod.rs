pub mod data;
pub mod rules;

pub use data::*;
pub use rules::{gender_display_name, Country, CountryCodes, DocumentType};
