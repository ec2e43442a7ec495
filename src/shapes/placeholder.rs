/// Placeholder shapes and placeholder resolution.
///
/// Placeholders are shapes whose content and style are partly or fully
/// defined by a corresponding shape in an ancestor layout or master. Style
/// resolution follows that correspondence: a slide placeholder defers to the
/// layout shape sharing its index or type, which may itself defer to a
/// master shape.
use crate::presentation::Presentation;
use crate::shapes::shape::{ContainerId, ShapeId};

/// Semantic types of placeholders, from the `p:ph` `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderType {
    /// Title placeholder
    Title,
    /// Centered title placeholder
    CenterTitle,
    /// Subtitle placeholder
    SubTitle,
    /// Body placeholder
    Body,
    /// Chart placeholder
    Chart,
    /// Table placeholder
    Table,
    /// Clip art placeholder
    ClipArt,
    /// Diagram placeholder
    Diagram,
    /// Media clip placeholder
    Media,
    /// Object placeholder
    Object,
    /// Picture placeholder
    Picture,
    /// Slide image placeholder
    SlideImage,
    /// Slide number placeholder
    SlideNumber,
    /// Date and time placeholder
    DateAndTime,
    /// Footer placeholder
    Footer,
    /// Header placeholder
    Header,
}

/// `p:ph` `type` attribute values.
static PLACEHOLDER_TYPES: phf::Map<&'static str, PlaceholderType> = phf::phf_map! {
    "title" => PlaceholderType::Title,
    "ctrTitle" => PlaceholderType::CenterTitle,
    "subTitle" => PlaceholderType::SubTitle,
    "body" => PlaceholderType::Body,
    "chart" => PlaceholderType::Chart,
    "tbl" => PlaceholderType::Table,
    "clipArt" => PlaceholderType::ClipArt,
    "dgm" => PlaceholderType::Diagram,
    "media" => PlaceholderType::Media,
    "obj" => PlaceholderType::Object,
    "pic" => PlaceholderType::Picture,
    "sldImg" => PlaceholderType::SlideImage,
    "sldNum" => PlaceholderType::SlideNumber,
    "dt" => PlaceholderType::DateAndTime,
    "ftr" => PlaceholderType::Footer,
    "hdr" => PlaceholderType::Header,
};

impl PlaceholderType {
    /// Map a `p:ph` `type` attribute value to a placeholder type.
    pub(crate) fn from_attr(value: &str) -> Option<PlaceholderType> {
        PLACEHOLDER_TYPES.get(value).copied()
    }

    /// Whether two placeholder types refer to the same layout shape.
    ///
    /// A centered title on a slide matches a plain title on its layout and
    /// vice versa; all other types match only themselves.
    fn matches(self, other: PlaceholderType) -> bool {
        use PlaceholderType::{CenterTitle, Title};
        self == other
            || matches!((self, other), (Title, CenterTitle) | (CenterTitle, Title))
    }
}

/// Placeholder descriptor carried by a placeholder-instance shape.
///
/// `kind` is `None` exactly when the underlying `p:ph` element declares no
/// explicit `type` attribute: the type is then inherited structurally from
/// the referenced shape, never defaulted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Semantic type, when declared explicitly
    pub kind: Option<PlaceholderType>,
    /// Placeholder index (`idx` attribute), when declared
    pub index: Option<u32>,
}

/// Find the shape in the immediately enclosing layout or master that defines
/// this placeholder's style and semantic type.
///
/// Returns `None` for non-placeholder shapes, for master-level shapes (the
/// chain ends there), and when no matching ancestor shape exists (minimal or
/// malformed documents). Matching prefers an equal placeholder index, then
/// an equal type.
pub(crate) fn referenced_shape(pres: &Presentation, shape: ShapeId) -> Option<ShapeId> {
    let data = pres.shape(shape);
    let ph = data.placeholder()?;

    let candidates: &[ShapeId] = match data.container() {
        ContainerId::Slide(slide) => {
            let layout = pres.slides[slide].layout;
            &pres.layouts[layout].shapes
        },
        ContainerId::Layout(layout) => {
            let master = pres.layouts[layout].master;
            &pres.masters[master].shapes
        },
        ContainerId::Master(_) => return None,
    };

    if let Some(index) = ph.index {
        let by_index = candidates.iter().copied().find(|&id| {
            pres.shape(id)
                .placeholder()
                .is_some_and(|other| other.index == Some(index))
        });
        if by_index.is_some() {
            return by_index;
        }
    }

    let kind = ph.kind?;
    candidates.iter().copied().find(|&id| {
        pres.shape(id)
            .placeholder()
            .and_then(|other| other.kind)
            .is_some_and(|other| kind.matches(other))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Presentation;

    #[test]
    fn test_type_attr_mapping() {
        assert_eq!(PlaceholderType::from_attr("title"), Some(PlaceholderType::Title));
        assert_eq!(PlaceholderType::from_attr("ctrTitle"), Some(PlaceholderType::CenterTitle));
        assert_eq!(PlaceholderType::from_attr("sldNum"), Some(PlaceholderType::SlideNumber));
        assert_eq!(PlaceholderType::from_attr("bogus"), None);
    }

    #[test]
    fn test_title_matches_center_title() {
        assert!(PlaceholderType::Title.matches(PlaceholderType::CenterTitle));
        assert!(PlaceholderType::CenterTitle.matches(PlaceholderType::Title));
        assert!(PlaceholderType::Body.matches(PlaceholderType::Body));
        assert!(!PlaceholderType::Body.matches(PlaceholderType::Title));
    }

    fn placeholder_slide(ph: &str) -> Vec<u8> {
        format!(
            r#"<p:sld><p:cSld><p:spTree>
              <p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Shape"/>
                  <p:nvPr>{ph}</p:nvPr></p:nvSpPr>
                <p:txBody><a:p><a:r><a:t>x</a:t></a:r></a:p></p:txBody>
              </p:sp>
            </p:spTree></p:cSld></p:sld>"#
        )
        .into_bytes()
    }

    const LAYOUT_XML: &[u8] = br#"<p:sldLayout><p:cSld><p:spTree>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Title 1"/>
          <p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr>
        <p:txBody><a:p/></p:txBody>
      </p:sp>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="3" name="Content 2"/>
          <p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>
        <p:txBody><a:p/></p:txBody>
      </p:sp>
    </p:spTree></p:cSld></p:sldLayout>"#;

    fn build(slide_ph: &str) -> (Presentation, ShapeId) {
        let mut builder = Presentation::builder();
        let master = builder.master(b"<p:sldMaster/>").unwrap();
        let layout = builder.layout(master, LAYOUT_XML).unwrap();
        let slide = builder
            .slide(layout, &placeholder_slide(slide_ph))
            .unwrap();
        let pres = builder.build();
        let shape = pres.slide_shapes(slide)[0];
        (pres, shape)
    }

    #[test]
    fn test_index_match_wins_over_type() {
        // idx="1" picks the layout body even though the type also names it.
        let (pres, shape) = build(r#"<p:ph type="body" idx="1"/>"#);
        let referenced = referenced_shape(&pres, shape).unwrap();
        assert_eq!(pres.shape(referenced).name(), "Content 2");
    }

    #[test]
    fn test_title_resolves_to_center_title() {
        let (pres, shape) = build(r#"<p:ph type="title"/>"#);
        let referenced = referenced_shape(&pres, shape).unwrap();
        assert_eq!(pres.shape(referenced).name(), "Title 1");
    }

    #[test]
    fn test_unmatched_placeholder_resolves_to_none() {
        let (pres, shape) = build(r#"<p:ph type="ftr"/>"#);
        assert!(referenced_shape(&pres, shape).is_none());
    }

    #[test]
    fn test_plain_shape_resolves_to_none() {
        let (pres, shape) = build("");
        assert!(pres.shape(shape).placeholder().is_none());
        assert!(referenced_shape(&pres, shape).is_none());
    }
}
