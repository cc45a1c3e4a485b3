//! Value objects for the speech domain

pub mod language;
pub mod speed;

pub use language::{Language, LanguageCode, LanguageTable};
pub use speed::SpeedTier;
