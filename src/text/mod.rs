//! Text styling: override records, the cascade resolver, and the `Font`
//! accessor.
//!
//! A style read on a text run walks a fixed chain of override levels and
//! returns the first concrete value; see [`cascade::OverrideLevel`] for the
//! order. Writes target the run-level record with per-field contracts
//! documented on [`font::Font`].

pub mod cascade;
pub mod font;
pub mod font_data;

pub use cascade::{DEFAULT_FONT_SIZE, OverrideLevel, StyleField};
pub use font::{Font, RunRef};
pub use font_data::{FontData, LevelStyles};
