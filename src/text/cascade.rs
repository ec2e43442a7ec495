/// The property-cascade resolution engine.
///
/// A style read on a text run walks a fixed chain of override levels and
/// short-circuits at the first level that supplies a concrete value. Absence
/// at a level is never an error; the chain always terminates because the
/// hard-default tier is never absent.
use crate::presentation::Presentation;
use crate::shapes::placeholder::referenced_shape;
use crate::shapes::shape::{ContainerId, Paragraph, Run, ShapeId};
use crate::text::font_data::FontData;
use crate::theme;
use smallvec::SmallVec;

/// Default font size in points, applied when no level of the cascade
/// defines one.
pub const DEFAULT_FONT_SIZE: i32 = 18;

/// The style fields resolved through the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleField {
    /// Latin typeface name
    Typeface,
    /// Font size, stored in hundredths of a point
    Size,
    /// Bold flag
    Bold,
    /// Italic flag
    Italic,
}

impl StyleField {
    /// Property name used in error messages.
    pub(crate) fn property_name(self) -> &'static str {
        match self {
            StyleField::Typeface => "font name",
            StyleField::Size => "font size",
            StyleField::Bold => "bold",
            StyleField::Italic => "italic",
        }
    }
}

/// The override levels, in the fixed order resolution consults them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OverrideLevel {
    /// Run-level override record (`a:rPr`)
    RunOverride,
    /// End-of-paragraph record (`a:endParaRPr`)
    EndOfParagraph,
    /// The recursive placeholder chain (layout and master shapes sharing
    /// this shape's placeholder index or type)
    PlaceholderReferenced,
    /// The owning layout's text styles
    LayoutDefault,
    /// The owning master's body, then other, text styles
    MasterDefault,
    /// The presentation-wide paragraph-level defaults
    PresentationDefault,
    /// Built-in defaults; always present
    HardDefault,
}

impl OverrideLevel {
    /// The levels a value can be read from, in resolution order. The hard
    /// default is applied by the typed getters when this walk yields
    /// nothing.
    const WALK: [OverrideLevel; 6] = [
        OverrideLevel::RunOverride,
        OverrideLevel::EndOfParagraph,
        OverrideLevel::PlaceholderReferenced,
        OverrideLevel::LayoutDefault,
        OverrideLevel::MasterDefault,
        OverrideLevel::PresentationDefault,
    ];
}

/// Resolution context for one text run: the run, its paragraph nesting
/// level, and its owning shape.
///
/// The context borrows the presentation read-only; ancestor shapes consulted
/// along the walk are never mutated by a read.
pub(crate) struct RunContext<'a> {
    pres: &'a Presentation,
    shape: ShapeId,
    paragraph: usize,
    run: usize,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(
        pres: &'a Presentation,
        shape: ShapeId,
        paragraph: usize,
        run: usize,
    ) -> Self {
        Self {
            pres,
            shape,
            paragraph,
            run,
        }
    }

    /// Resolved typeface before theme-alias substitution.
    ///
    /// Falls back to the theme's minor latin font, expressed as its alias
    /// token so that substitution stays a single post-resolution step.
    pub(crate) fn typeface(&self) -> String {
        self.resolve(|data| data.latin_typeface.clone())
            .unwrap_or_else(|| theme::MINOR_LATIN_ALIAS.to_string())
    }

    /// Resolved size in hundredths of a point.
    pub(crate) fn size_hundredths(&self) -> i32 {
        self.resolve(|data| data.size_hundredths)
            .unwrap_or(DEFAULT_FONT_SIZE * 100)
    }

    /// Resolved bold flag.
    pub(crate) fn bold(&self) -> bool {
        self.resolve(|data| data.bold).unwrap_or(false)
    }

    /// Resolved italic flag.
    pub(crate) fn italic(&self) -> bool {
        self.resolve(|data| data.italic).unwrap_or(false)
    }

    /// Walk the override chain for one field, returning the first present
    /// value. `None` means every overridable level was absent and the hard
    /// default applies.
    fn resolve<T>(&self, pick: impl Fn(&FontData) -> Option<T> + Copy) -> Option<T> {
        for level in OverrideLevel::WALK {
            let value = match level {
                OverrideLevel::RunOverride => {
                    self.run().and_then(|r| r.props.as_ref()).and_then(pick)
                },
                OverrideLevel::EndOfParagraph => self
                    .paragraph()
                    .and_then(|p| p.end_run_props.as_ref())
                    .and_then(pick),
                OverrideLevel::PlaceholderReferenced => self.placeholder_chain(pick),
                OverrideLevel::LayoutDefault => self
                    .layout_index()
                    .and_then(|l| self.pres.layouts[l].text_styles.get(self.level()))
                    .and_then(pick),
                OverrideLevel::MasterDefault => self.master_record(pick),
                OverrideLevel::PresentationDefault => self
                    .pres
                    .default_text_styles
                    .get(self.level())
                    .and_then(pick),
                OverrideLevel::HardDefault => None,
            };
            if value.is_some() {
                return value;
            }
        }
        None
    }

    /// Follow the placeholder chain hop by hop, consulting each referenced
    /// shape's level defaults. Recursive by construction: a layout
    /// placeholder that is itself a placeholder instance of a master shape
    /// contributes the master shape's record on the second hop.
    fn placeholder_chain<T>(&self, pick: impl Fn(&FontData) -> Option<T>) -> Option<T> {
        let level = self.level();
        let mut visited: SmallVec<[ShapeId; 4]> = SmallVec::new();
        let mut current = self.shape;

        while let Some(next) = referenced_shape(self.pres, current) {
            if visited.contains(&next) {
                // Malformed reference cycle; stop rather than spin.
                break;
            }
            let record = self
                .pres
                .shape(next)
                .text_body()
                .and_then(|body| body.list_styles().get(level))
                .and_then(&pick);
            if record.is_some() {
                return record;
            }
            visited.push(next);
            current = next;
        }
        None
    }

    /// The master tier: body styles first, then other styles.
    fn master_record<T>(&self, pick: impl Fn(&FontData) -> Option<T> + Copy) -> Option<T> {
        let master = &self.pres.masters[self.master_index()?];
        let level = self.level();
        master
            .body_styles
            .get(level)
            .and_then(pick)
            .or_else(|| master.other_styles.get(level).and_then(pick))
    }

    fn run(&self) -> Option<&Run> {
        self.paragraph().and_then(|p| p.runs.get(self.run))
    }

    fn paragraph(&self) -> Option<&Paragraph> {
        self.pres
            .shape(self.shape)
            .text_body()
            .and_then(|body| body.paragraphs.get(self.paragraph))
    }

    /// 0-based paragraph nesting level of the target run.
    fn level(&self) -> u8 {
        self.paragraph().map(|p| p.level).unwrap_or(0)
    }

    /// Index of the layout this run's shape resolves through, if any.
    fn layout_index(&self) -> Option<usize> {
        match self.pres.shape(self.shape).container() {
            ContainerId::Slide(slide) => Some(self.pres.slides[slide].layout),
            ContainerId::Layout(layout) => Some(layout),
            ContainerId::Master(_) => None,
        }
    }

    /// Index of the master this run's shape resolves through.
    fn master_index(&self) -> Option<usize> {
        match self.pres.shape(self.shape).container() {
            ContainerId::Slide(slide) => {
                Some(self.pres.layouts[self.pres.slides[slide].layout].master)
            },
            ContainerId::Layout(layout) => Some(self.pres.layouts[layout].master),
            ContainerId::Master(master) => Some(master),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Presentation;
    use crate::text::font::RunRef;

    const MASTER_XML: &[u8] = br#"<p:sldMaster>
      <p:cSld><p:spTree>
        <p:sp>
          <p:nvSpPr><p:cNvPr id="2" name="Title Placeholder"/>
            <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
          <p:txBody>
            <a:lstStyle>
              <a:lvl1pPr><a:defRPr sz="4400" b="1"/></a:lvl1pPr>
            </a:lstStyle>
            <a:p/>
          </p:txBody>
        </p:sp>
      </p:spTree></p:cSld>
      <p:txStyles>
        <p:bodyStyle><a:lvl1pPr><a:defRPr sz="3200"/></a:lvl1pPr></p:bodyStyle>
        <p:otherStyle><a:lvl1pPr><a:defRPr sz="1600"/></a:lvl1pPr></p:otherStyle>
      </p:txStyles>
    </p:sldMaster>"#;

    const LAYOUT_XML: &[u8] = br#"<p:sldLayout>
      <p:cSld><p:spTree>
        <p:sp>
          <p:nvSpPr><p:cNvPr id="2" name="Title Layout Placeholder"/>
            <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
          <p:txBody><a:p/></p:txBody>
        </p:sp>
      </p:spTree></p:cSld>
    </p:sldLayout>"#;

    const SLIDE_XML: &[u8] = br#"<p:sld>
      <p:cSld><p:spTree>
        <p:sp>
          <p:nvSpPr><p:cNvPr id="2" name="Title 1"/>
            <p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr>
          <p:txBody>
            <a:p><a:r><a:t>Title text</a:t></a:r></a:p>
          </p:txBody>
        </p:sp>
        <p:sp>
          <p:nvSpPr><p:cNvPr id="3" name="TextBox 2"/></p:nvSpPr>
          <p:txBody>
            <a:p><a:r><a:rPr sz="2550" i="1"/><a:t>sized</a:t></a:r>
                 <a:r><a:t>unsized</a:t></a:r></a:p>
          </p:txBody>
        </p:sp>
      </p:spTree></p:cSld>
    </p:sld>"#;

    fn build() -> (Presentation, RunRef, RunRef, RunRef) {
        let mut builder = Presentation::builder();
        let master = builder.master(MASTER_XML).unwrap();
        let layout = builder.layout(master, LAYOUT_XML).unwrap();
        let slide = builder.slide(layout, SLIDE_XML).unwrap();
        let pres = builder.build();

        let title_shape = pres.slide_shapes(slide)[0];
        let box_shape = pres.slide_shapes(slide)[1];
        let title_run = RunRef {
            shape: title_shape,
            paragraph: 0,
            run: 0,
        };
        let sized_run = RunRef {
            shape: box_shape,
            paragraph: 0,
            run: 0,
        };
        let unsized_run = RunRef {
            shape: box_shape,
            paragraph: 0,
            run: 1,
        };
        (pres, title_run, sized_run, unsized_run)
    }

    #[test]
    fn test_run_override_wins_over_all_ancestors() {
        let (pres, _, sized, _) = build();
        let ctx = RunContext::new(&pres, sized.shape, sized.paragraph, sized.run);
        assert_eq!(ctx.size_hundredths(), 2550);
        assert!(ctx.italic());
    }

    #[test]
    fn test_placeholder_resolves_through_two_hops() {
        // The slide title's size is defined only on the master placeholder:
        // slide -> layout placeholder (nothing) -> master placeholder (4400).
        let (pres, title, _, _) = build();
        let ctx = RunContext::new(&pres, title.shape, title.paragraph, title.run);
        assert_eq!(ctx.size_hundredths(), 4400);
        assert!(ctx.bold());
    }

    #[test]
    fn test_master_other_styles_back_body_styles() {
        // The plain text box is no placeholder, so it falls through to the
        // master tier: bodyStyle defines level 0 size 3200.
        let (pres, _, _, unsized_box) = build();
        let ctx = RunContext::new(&pres, unsized_box.shape, unsized_box.paragraph, unsized_box.run);
        assert_eq!(ctx.size_hundredths(), 3200);
    }

    #[test]
    fn test_hard_default_when_nothing_defined() {
        let mut builder = Presentation::builder();
        let master = builder.master(b"<p:sldMaster/>").unwrap();
        let layout = builder.layout(master, b"<p:sldLayout/>").unwrap();
        let slide = builder
            .slide(
                layout,
                br#"<p:sld><p:cSld><p:spTree><p:sp>
                  <p:nvSpPr><p:cNvPr id="2" name="Box"/></p:nvSpPr>
                  <p:txBody><a:p><a:r><a:t>bare</a:t></a:r></a:p></p:txBody>
                </p:sp></p:spTree></p:cSld></p:sld>"#,
            )
            .unwrap();
        let pres = builder.build();

        let shape = pres.slide_shapes(slide)[0];
        let ctx = RunContext::new(&pres, shape, 0, 0);
        assert_eq!(ctx.size_hundredths(), DEFAULT_FONT_SIZE * 100);
        assert!(!ctx.bold());
        assert!(!ctx.italic());
        assert_eq!(ctx.typeface(), theme::MINOR_LATIN_ALIAS);
    }

    #[test]
    fn test_end_of_paragraph_tier_read() {
        let mut builder = Presentation::builder();
        let master = builder.master(b"<p:sldMaster/>").unwrap();
        let layout = builder.layout(master, b"<p:sldLayout/>").unwrap();
        let slide = builder
            .slide(
                layout,
                br#"<p:sld><p:cSld><p:spTree><p:sp>
                  <p:nvSpPr><p:cNvPr id="2" name="Box"/></p:nvSpPr>
                  <p:txBody><a:p>
                    <a:r><a:t>text</a:t></a:r>
                    <a:endParaRPr sz="900" b="1"/>
                  </a:p></p:txBody>
                </p:sp></p:spTree></p:cSld></p:sld>"#,
            )
            .unwrap();
        let pres = builder.build();

        let shape = pres.slide_shapes(slide)[0];
        let ctx = RunContext::new(&pres, shape, 0, 0);
        assert_eq!(ctx.size_hundredths(), 900);
        assert!(ctx.bold());
    }
}
