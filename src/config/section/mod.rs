//! Configuration section definitions.
//!
//! Each module corresponds to a section in `cardforge.toml`:
//!
//! | Module     | TOML Section   | Purpose                             |
//! |------------|----------------|-------------------------------------|
//! | `fetch`    | `[fetch]`      | HTTP user agent, timeout, delay     |
//! | `output`   | `[output]`     | Root directory for produced decks   |
//! | `validate` | `[validate]`   | Validator timeout and optional checks |

mod fetch;
mod output;
mod validate;

pub use fetch::FetchConfig;
pub use output::OutputConfig;
pub use validate::ValidateConfig;
