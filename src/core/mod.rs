//! Core types - pure abstractions shared across the codebase.

pub mod card;
pub mod classify;
pub mod url;

pub use card::{CardId, Rank, Suit};
pub use classify::Classifier;
