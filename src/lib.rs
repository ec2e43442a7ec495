//! Pitaya - a mutable object model for PowerPoint presentations
//!
//! This library exposes a structured, mutable object model over the text
//! styling and chart data of a presentation document. Styling properties
//! (font name, size, bold, italic) resolve through the format's override
//! hierarchy, and chart categories are rebuilt from the flat or multi-level
//! caches embedded in chart parts.
//!
//! # Features
//!
//! - **Cascading text styles**: a run's effective style walks run override →
//!   end-of-paragraph override → placeholder-referenced shape → slide layout
//!   → slide master → presentation default → built-in default, returning the
//!   first concrete value
//! - **Placeholder resolution**: placeholder shapes defer, recursively, to
//!   the layout/master shape sharing their index or type
//! - **Style mutation**: writes target the run-level override with per-field
//!   contracts and explicit cache invalidation
//! - **Chart categories**: flat cached series or a multi-level category tree
//!   reconstructed from index-keyed fragments, with optional lazy binding to
//!   backing workbook cells in editable mode
//!
//! The package/zip container, geometry, and rendering are out of scope;
//! parts are supplied to the builder as XML byte slices.
//!
//! # Example - Reading and changing run styles
//!
//! ```no_run
//! use pitaya::{Presentation, RunRef};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Presentation::builder();
//! builder.theme(&std::fs::read("theme1.xml")?)?;
//! let master = builder.master(&std::fs::read("slideMaster1.xml")?)?;
//! let layout = builder.layout(master, &std::fs::read("slideLayout1.xml")?)?;
//! let slide = builder.slide(layout, &std::fs::read("slide1.xml")?)?;
//! let mut pres = builder.build();
//!
//! let shape = pres.slide_shapes(slide)[0];
//! let run = RunRef { shape, paragraph: 0, run: 0 };
//!
//! println!("{} at {}pt", pres.font(run).name(), pres.font(run).size());
//! pres.font(run).set_bold(true);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Chart categories
//!
//! ```no_run
//! use pitaya::chart::Chart;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut chart = Chart::from_xml(&std::fs::read("chart1.xml")?, false)?;
//! for category in chart.categories().iter() {
//!     match category.parent() {
//!         Some(parent) => println!("{} / {}", parent.value(), category.value()),
//!         None => println!("{}", category.value()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Chart series, category trees, and backing-cell binding
pub mod chart;

/// Unified error types
pub mod error;

/// Deferred, resettable computed values
pub mod lazy;

/// The presentation arena and builder
pub mod presentation;

/// Shapes, placeholders, and text content
pub mod shapes;

/// Text styling: override records, cascade resolution, the font accessor
pub mod text;

/// Theme font schemes and alias substitution
pub mod theme;

// Re-export commonly used types for convenience
pub use chart::{Category, CategoryCollection, Chart, ChartKind, WorkbookPart};
pub use error::{Error, Result};
pub use lazy::ResettableLazy;
pub use presentation::{LayoutId, MasterId, Presentation, PresentationBuilder, SlideId};
pub use shapes::{Placeholder, PlaceholderType, ShapeData, ShapeId};
pub use text::{Font, OverrideLevel, RunRef, StyleField};
pub use theme::Theme;
