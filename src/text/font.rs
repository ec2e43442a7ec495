/// Font accessor for a text run.
///
/// Reads resolve through the override cascade and are cached per run behind
/// [`ResettableLazy`](crate::lazy::ResettableLazy) values; every mutator
/// resets the caches it affects, so a write followed by a read always
/// observes the written value.
use crate::error::{Error, Result};
use crate::presentation::Presentation;
use crate::shapes::shape::{Paragraph, Run, ShapeId};
use crate::text::cascade::{RunContext, StyleField};
use crate::text::font_data::FontData;

/// Reference to one text run inside a presentation.
///
/// Obtained by navigating the presentation's shapes; a `RunRef` that no
/// longer refers to an existing run reads as defaults and ignores writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRef {
    /// The owning shape
    pub shape: ShapeId,
    /// Paragraph index within the shape's text body
    pub paragraph: usize,
    /// Run index within the paragraph
    pub run: usize,
}

/// Style accessor for one text run.
pub struct Font<'a> {
    pres: &'a mut Presentation,
    target: RunRef,
}

impl<'a> Font<'a> {
    pub(crate) fn new(pres: &'a mut Presentation, target: RunRef) -> Self {
        Self { pres, target }
    }

    /// The effective typeface name.
    ///
    /// A resolved theme alias ("+mj-lt"/"+mn-lt") is substituted with the
    /// theme's concrete typeface; the substitution happens after cascade
    /// resolution, on every read, against the cached pre-substitution value.
    pub fn name(&mut self) -> String {
        let cached = self.run_data().and_then(|r| r.cache.latin.get()).cloned();
        let raw = match cached {
            Some(cached) => cached,
            None => {
                let resolved = self.context().typeface();
                if let Some(run) = self.run_data_mut() {
                    run.cache.latin.set(resolved.clone());
                }
                resolved
            },
        };
        self.pres.theme().resolve_typeface(&raw).to_string()
    }

    /// Set the typeface name.
    ///
    /// Placeholder-backed shapes are styled at their defining level, so this
    /// fails with [`Error::PlaceholderImmutable`] when the owning shape is a
    /// placeholder instance. Otherwise the run-level override record is
    /// written, synthesized first when absent.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if self.pres.shape(self.target.shape).is_placeholder() {
            return Err(Error::PlaceholderImmutable(
                StyleField::Typeface.property_name(),
            ));
        }
        if let Some(run) = self.run_data_mut() {
            run.props.get_or_insert_with(FontData::default).latin_typeface =
                Some(name.to_string());
            run.cache.latin.reset();
        }
        Ok(())
    }

    /// The effective font size in points.
    ///
    /// Sizes are stored in hundredths of a point; fractional hundredths are
    /// truncated, not rounded.
    pub fn size(&mut self) -> i32 {
        let cached = self.run_data().and_then(|r| r.cache.size.get()).copied();
        let hundredths = match cached {
            Some(cached) => cached,
            None => {
                let resolved = self.context().size_hundredths();
                if let Some(run) = self.run_data_mut() {
                    run.cache.size.set(resolved);
                }
                resolved
            },
        };
        hundredths / 100
    }

    /// Set the font size in points.
    ///
    /// Size writes never synthesize a run-level override: when no run-level
    /// record exists the value belongs to the slide master and the write
    /// fails with [`Error::LevelNotOverridable`]. Probe with
    /// [`Font::size_can_be_changed`] first. (Asymmetric with
    /// [`Font::set_bold`]/[`Font::set_italic`], which do synthesize.)
    pub fn set_size(&mut self, points: i32) -> Result<()> {
        match self.run_data_mut() {
            Some(run) if run.props.is_some() => {
                if let Some(props) = run.props.as_mut() {
                    props.size_hundredths = Some(points * 100);
                }
                run.cache.size.reset();
                Ok(())
            },
            _ => Err(Error::LevelNotOverridable(StyleField::Size.property_name())),
        }
    }

    /// Whether [`Font::set_size`] would succeed, i.e. whether a run-level
    /// override record exists.
    pub fn size_can_be_changed(&self) -> bool {
        self.run_data().is_some_and(|run| run.props.is_some())
    }

    /// The effective bold flag.
    pub fn is_bold(&self) -> bool {
        self.context().bold()
    }

    /// Set the bold flag.
    ///
    /// Writes to the run-level record when one exists, else to the
    /// end-of-paragraph record when one exists, else synthesizes a new
    /// run-level record.
    pub fn set_bold(&mut self, value: bool) {
        self.write_flag(|props| props.bold = Some(value));
    }

    /// The effective italic flag.
    pub fn is_italic(&self) -> bool {
        self.context().italic()
    }

    /// Set the italic flag. Same write targets as [`Font::set_bold`].
    pub fn set_italic(&mut self, value: bool) {
        self.write_flag(|props| props.italic = Some(value));
    }

    fn write_flag(&mut self, apply: impl Fn(&mut FontData)) {
        let index = self.target.run;
        let Some(para) = self.paragraph_mut() else {
            return;
        };
        let run_has_props = para.runs.get(index).is_some_and(|r| r.props.is_some());
        if run_has_props {
            if let Some(props) = para.runs[index].props.as_mut() {
                apply(props);
            }
        } else if let Some(end_props) = para.end_run_props.as_mut() {
            apply(end_props);
        } else if let Some(run) = para.runs.get_mut(index) {
            let mut props = FontData::default();
            apply(&mut props);
            run.props = Some(props);
        }
    }

    fn context(&self) -> RunContext<'_> {
        RunContext::new(
            self.pres,
            self.target.shape,
            self.target.paragraph,
            self.target.run,
        )
    }

    fn run_data(&self) -> Option<&Run> {
        self.pres
            .shape(self.target.shape)
            .text_body()
            .and_then(|body| body.paragraphs.get(self.target.paragraph))
            .and_then(|para| para.runs.get(self.target.run))
    }

    fn run_data_mut(&mut self) -> Option<&mut Run> {
        let target = self.target;
        self.pres
            .shape_mut(target.shape)
            .text_body
            .as_mut()
            .and_then(|body| body.paragraphs.get_mut(target.paragraph))
            .and_then(|para| para.runs.get_mut(target.run))
    }

    fn paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        let target = self.target;
        self.pres
            .shape_mut(target.shape)
            .text_body
            .as_mut()
            .and_then(|body| body.paragraphs.get_mut(target.paragraph))
    }
}
