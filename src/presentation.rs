/// The presentation object model: arena, containers, and builder.
///
/// A `Presentation` owns every slide, layout, master, and shape of one open
/// document. Containment is expressed through ids into the shape arena, and
/// every back-reference the style cascade follows (shape to container,
/// slide to layout, layout to master) is an id lookup; ownership flows
/// strictly from container to contained.
use crate::error::Result;
use crate::shapes::reader::parse_shape_tree;
use crate::shapes::shape::{ContainerId, ShapeData, ShapeId};
use crate::text::font::{Font, RunRef};
use crate::text::font_data::LevelStyles;
use crate::theme::Theme;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Index of a slide master within its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterId(pub(crate) usize);

/// Index of a slide layout within its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutId(pub(crate) usize);

/// Index of a slide within its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideId(pub(crate) usize);

/// A slide master: shapes plus the master-level text styles.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlideMaster {
    pub(crate) shapes: Vec<ShapeId>,
    /// `p:bodyStyle` levels, consulted first within the master tier
    pub(crate) body_styles: LevelStyles,
    /// `p:otherStyle` levels, consulted second within the master tier
    pub(crate) other_styles: LevelStyles,
}

/// A slide layout: shapes plus optional layout-level text styles.
#[derive(Debug, Clone)]
pub(crate) struct SlideLayout {
    pub(crate) master: usize,
    pub(crate) shapes: Vec<ShapeId>,
    pub(crate) text_styles: LevelStyles,
}

/// A slide: shapes wired to the layout they instantiate.
#[derive(Debug, Clone)]
pub(crate) struct Slide {
    pub(crate) layout: usize,
    pub(crate) shapes: Vec<ShapeId>,
}

/// One open presentation document.
///
/// # Examples
///
/// ```rust,ignore
/// let mut builder = Presentation::builder();
/// builder.theme(theme_xml)?;
/// let master = builder.master(master_xml)?;
/// let layout = builder.layout(master, layout_xml)?;
/// let slide = builder.slide(layout, slide_xml)?;
/// let mut pres = builder.build();
///
/// let shape = pres.slide_shapes(slide)[0];
/// let run = RunRef { shape, paragraph: 0, run: 0 };
/// println!("{} at {}pt", pres.font(run).name(), pres.font(run).size());
/// ```
#[derive(Debug)]
pub struct Presentation {
    pub(crate) theme: Theme,
    pub(crate) masters: Vec<SlideMaster>,
    pub(crate) layouts: Vec<SlideLayout>,
    pub(crate) slides: Vec<Slide>,
    pub(crate) shapes: Vec<ShapeData>,
    /// Presentation-wide paragraph-level defaults (`p:defaultTextStyle`),
    /// scoped to this document
    pub(crate) default_text_styles: LevelStyles,
    editable: bool,
}

impl Presentation {
    /// Start building a presentation from its XML parts.
    pub fn builder() -> PresentationBuilder {
        PresentationBuilder::default()
    }

    /// The active theme.
    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether the presentation was opened in an editable mode.
    ///
    /// Editable presentations bind chart categories to their backing cells;
    /// read-only presentations serve cached values only.
    #[inline]
    pub fn editable(&self) -> bool {
        self.editable
    }

    /// Number of slides.
    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Shape ids on a slide, in document order.
    #[inline]
    pub fn slide_shapes(&self, slide: SlideId) -> &[ShapeId] {
        &self.slides[slide.0].shapes
    }

    /// Shape ids on a layout, in document order.
    #[inline]
    pub fn layout_shapes(&self, layout: LayoutId) -> &[ShapeId] {
        &self.layouts[layout.0].shapes
    }

    /// Shape ids on a master, in document order.
    #[inline]
    pub fn master_shapes(&self, master: MasterId) -> &[ShapeId] {
        &self.masters[master.0].shapes
    }

    /// A shape by id.
    #[inline]
    pub fn shape(&self, id: ShapeId) -> &ShapeData {
        &self.shapes[id.0]
    }

    #[inline]
    pub(crate) fn shape_mut(&mut self, id: ShapeId) -> &mut ShapeData {
        &mut self.shapes[id.0]
    }

    /// Style accessor for one text run.
    ///
    /// `run` must refer into this presentation (obtained by navigating its
    /// shapes); indexes are not revalidated here.
    #[inline]
    pub fn font(&mut self, run: RunRef) -> Font<'_> {
        Font::new(self, run)
    }
}

/// Builder assembling a [`Presentation`] from XML parts.
///
/// Container relations (slide to layout, layout to master) come from package
/// relationships in the on-disk format; the package layer is an external
/// collaborator here, so the builder takes them as explicit handles instead.
#[derive(Debug, Default)]
pub struct PresentationBuilder {
    theme: Option<Theme>,
    default_text_styles: LevelStyles,
    masters: Vec<SlideMaster>,
    layouts: Vec<SlideLayout>,
    slides: Vec<Slide>,
    shapes: Vec<ShapeData>,
    editable: bool,
}

impl PresentationBuilder {
    /// Supply the theme part.
    pub fn theme(&mut self, xml: &[u8]) -> Result<&mut Self> {
        self.theme = Some(Theme::from_xml(xml)?);
        Ok(self)
    }

    /// Supply the presentation part, read for its `p:defaultTextStyle`.
    pub fn presentation(&mut self, xml: &[u8]) -> Result<&mut Self> {
        self.default_text_styles = parse_named_styles(xml, b"defaultTextStyle")?;
        Ok(self)
    }

    /// Open the document editable or read-only.
    pub fn editable(&mut self, editable: bool) -> &mut Self {
        self.editable = editable;
        self
    }

    /// Add a slide master part.
    pub fn master(&mut self, xml: &[u8]) -> Result<MasterId> {
        let index = self.masters.len();
        let shapes = self.adopt_shapes(xml, ContainerId::Master(index))?;
        self.masters.push(SlideMaster {
            shapes,
            body_styles: parse_named_styles(xml, b"bodyStyle")?,
            other_styles: parse_named_styles(xml, b"otherStyle")?,
        });
        Ok(MasterId(index))
    }

    /// Add a slide layout part under a master.
    pub fn layout(&mut self, master: MasterId, xml: &[u8]) -> Result<LayoutId> {
        let index = self.layouts.len();
        let shapes = self.adopt_shapes(xml, ContainerId::Layout(index))?;
        self.layouts.push(SlideLayout {
            master: master.0,
            shapes,
            text_styles: parse_named_styles(xml, b"txStyles")?,
        });
        Ok(LayoutId(index))
    }

    /// Add a slide part under a layout.
    pub fn slide(&mut self, layout: LayoutId, xml: &[u8]) -> Result<SlideId> {
        let index = self.slides.len();
        let shapes = self.adopt_shapes(xml, ContainerId::Slide(index))?;
        self.slides.push(Slide {
            layout: layout.0,
            shapes,
        });
        Ok(SlideId(index))
    }

    /// Finish building.
    pub fn build(self) -> Presentation {
        Presentation {
            theme: self.theme.unwrap_or_default(),
            masters: self.masters,
            layouts: self.layouts,
            slides: self.slides,
            shapes: self.shapes,
            default_text_styles: self.default_text_styles,
            editable: self.editable,
        }
    }

    /// Parse a part's shape tree into the arena, returning the new ids.
    fn adopt_shapes(&mut self, xml: &[u8], container: ContainerId) -> Result<Vec<ShapeId>> {
        let parsed = parse_shape_tree(xml, container)?;
        let mut ids = Vec::with_capacity(parsed.len());
        for shape in parsed {
            ids.push(ShapeId(self.shapes.len()));
            self.shapes.push(shape);
        }
        Ok(ids)
    }
}

/// Extract one named level-style list (`p:bodyStyle`, `p:otherStyle`,
/// `p:defaultTextStyle`, ...) from a part. Absent elements yield an empty
/// table.
fn parse_named_styles(xml: &[u8], element: &[u8]) -> Result<LevelStyles> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == element => {
                return LevelStyles::parse(&mut reader, element);
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(LevelStyles::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_styles_and_wiring() {
        let master_xml: &[u8] = br#"<p:sldMaster>
          <p:cSld><p:spTree>
            <p:sp>
              <p:nvSpPr><p:cNvPr id="2" name="Title Placeholder 1"/>
                <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p/></p:txBody>
            </p:sp>
          </p:spTree></p:cSld>
          <p:txStyles>
            <p:bodyStyle><a:lvl1pPr><a:defRPr sz="3200"/></a:lvl1pPr></p:bodyStyle>
            <p:otherStyle><a:lvl1pPr><a:defRPr sz="1800"/></a:lvl1pPr></p:otherStyle>
          </p:txStyles>
        </p:sldMaster>"#;

        let mut builder = Presentation::builder();
        let master = builder.master(master_xml).unwrap();
        let layout = builder.layout(master, b"<p:sldLayout/>").unwrap();
        let slide = builder.slide(layout, b"<p:sld/>").unwrap();
        let pres = builder.build();

        assert_eq!(pres.master_shapes(master).len(), 1);
        assert!(pres.slide_shapes(slide).is_empty());
        assert_eq!(
            pres.masters[0].body_styles.get(0).unwrap().size_hundredths,
            Some(3200)
        );
        assert_eq!(
            pres.masters[0].other_styles.get(0).unwrap().size_hundredths,
            Some(1800)
        );
        assert_eq!(pres.slides[0].layout, 0);
        assert_eq!(pres.layouts[0].master, 0);
    }

    #[test]
    fn test_presentation_defaults() {
        let pres_xml: &[u8] = br#"<p:presentation>
          <p:defaultTextStyle>
            <a:lvl1pPr><a:defRPr sz="2000"/></a:lvl1pPr>
          </p:defaultTextStyle>
        </p:presentation>"#;

        let mut builder = Presentation::builder();
        builder.presentation(pres_xml).unwrap();
        let pres = builder.build();
        assert_eq!(
            pres.default_text_styles.get(0).unwrap().size_hundredths,
            Some(2000)
        );
    }
}
