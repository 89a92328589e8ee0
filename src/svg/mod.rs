//! SVG processing.
//!
//! - `dom`: owned element tree (parse / serialize)
//! - `viewbox`: source bounding boxes
//! - `template`: target card scaffolds
//! - `compose`: fit foreign artwork into a template
//! - `joker`: synthetic DDL text jokers
//! - `brescia`: synthetic Brescia backs and jokers
//! - `sprite`: sprite-sheet extraction
//! - `variant`: DDL size-class splitting

pub mod brescia;
pub mod compose;
pub mod dom;
pub mod joker;
pub mod sprite;
pub mod template;
pub mod variant;
pub mod viewbox;

pub use dom::Element;
