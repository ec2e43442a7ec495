/// Shape, text body, paragraph, and run records.
use crate::lazy::ResettableLazy;
use crate::shapes::placeholder::Placeholder;
use crate::text::font_data::{FontData, LevelStyles};

/// Index of a shape in the presentation's shape arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub(crate) usize);

/// The container a shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerId {
    /// A slide, by index
    Slide(usize),
    /// A slide layout, by index
    Layout(usize),
    /// A slide master, by index
    Master(usize),
}

/// A shape on a slide, layout, or master.
#[derive(Debug, Clone)]
pub struct ShapeData {
    pub(crate) name: String,
    pub(crate) container: ContainerId,
    pub(crate) placeholder: Option<Placeholder>,
    pub(crate) text_body: Option<TextBody>,
}

impl ShapeData {
    /// The shape name from `p:cNvPr`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The container this shape belongs to.
    #[inline]
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// The placeholder descriptor, when this shape is a placeholder
    /// instance. A shape is a placeholder if and only if this is `Some`.
    #[inline]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    /// Whether this shape is a placeholder instance.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// The text body, for shapes that carry text.
    #[inline]
    pub fn text_body(&self) -> Option<&TextBody> {
        self.text_body.as_ref()
    }
}

/// Text content of a shape: paragraphs plus the shape's own level defaults.
#[derive(Debug, Clone, Default)]
pub struct TextBody {
    pub(crate) list_styles: LevelStyles,
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl TextBody {
    /// The paragraphs of this body, in document order.
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// The per-level defaults from this body's `a:lstStyle`. Consulted by
    /// the cascade when this shape is the referenced end of a placeholder
    /// hop.
    #[inline]
    pub fn list_styles(&self) -> &LevelStyles {
        &self.list_styles
    }

    /// All run text, paragraphs separated by newlines.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for para in &self.paragraphs {
            if !out.is_empty() {
                out.push('\n');
            }
            for run in &para.runs {
                out.push_str(&run.text);
            }
        }
        out
    }
}

/// A paragraph in a text body.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// 0-based nesting level from `a:pPr lvl`
    pub(crate) level: u8,
    pub(crate) runs: Vec<Run>,
    /// End-of-paragraph run properties (`a:endParaRPr`)
    pub(crate) end_run_props: Option<FontData>,
}

impl Paragraph {
    /// The 0-based nesting level.
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The text runs of this paragraph.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// All run text concatenated.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A text run: a span of text sharing one set of run properties.
#[derive(Debug, Clone, Default)]
pub struct Run {
    pub(crate) text: String,
    pub(crate) props: Option<FontData>,
    pub(crate) cache: FontCache,
}

impl Run {
    /// The run text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The run-level override record, if one exists.
    #[inline]
    pub fn properties(&self) -> Option<&FontData> {
        self.props.as_ref()
    }
}

/// Per-run caches of resolved style values.
///
/// `latin` holds the typeface as resolved by the cascade, before theme-alias
/// substitution; `size` holds the resolved size in hundredths of a point.
/// Both are reset by the mutators that affect them.
#[derive(Debug, Clone, Default)]
pub(crate) struct FontCache {
    pub(crate) latin: ResettableLazy<String>,
    pub(crate) size: ResettableLazy<i32>,
}
