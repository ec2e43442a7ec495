//! Shapes and their text content.
//!
//! Shapes live in a single arena owned by the presentation; slides, layouts,
//! and masters hold shape ids rather than the shapes themselves, and every
//! back-reference (shape to container, placeholder to referenced shape) is
//! an id lookup, never a pointer.

pub mod placeholder;
pub mod reader;
pub mod shape;

pub use placeholder::{Placeholder, PlaceholderType};
pub use shape::{ContainerId, Paragraph, Run, ShapeData, ShapeId, TextBody};
