pub mod dates;
pub mod mrz;

pub use dates::DateValidator;
pub use mrz::MrzValidator;
