/// Shape-tree XML parsing.
///
/// Slides, layouts, and masters share the same shape-tree schema
/// (`p:cSld` > `p:spTree` > `p:sp`), so one reader serves all three
/// container kinds. Only `p:sp` shapes are modeled; pictures, graphic
/// frames, and connectors carry no cascading text and are skipped.
use crate::error::Result;
use crate::shapes::placeholder::{Placeholder, PlaceholderType};
use crate::shapes::shape::{ContainerId, Paragraph, Run, ShapeData, TextBody};
use crate::text::font_data::{FontData, LevelStyles};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse every `p:sp` shape in a slide, layout, or master part.
pub(crate) fn parse_shape_tree(xml: &[u8], container: ContainerId) -> Result<Vec<ShapeData>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut shapes = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"sp" => {
                shapes.push(parse_shape(&mut reader, container)?);
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(shapes)
}

/// Parse one `p:sp` element up to its end tag.
fn parse_shape(reader: &mut Reader<&[u8]>, container: ContainerId) -> Result<ShapeData> {
    let mut shape = ShapeData {
        name: String::new(),
        container,
        placeholder: None,
        text_body: None,
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"cNvPr" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        shape.name = String::from_utf8_lossy(&attr.value).into_owned();
                    }
                }
            },
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"ph" =>
            {
                shape.placeholder = Some(parse_placeholder(e));
            },
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"txBody" => {
                shape.text_body = Some(parse_text_body(reader)?);
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"sp" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(shape)
}

/// Build a placeholder descriptor from a `p:ph` element.
///
/// An absent `type` attribute stays absent: the semantic type is inherited
/// through the referenced shape, not defaulted here.
fn parse_placeholder(e: &BytesStart) -> Placeholder {
    let mut placeholder = Placeholder {
        kind: None,
        index: None,
    };
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"type" => {
                placeholder.kind = std::str::from_utf8(&attr.value)
                    .ok()
                    .and_then(PlaceholderType::from_attr);
            },
            b"idx" => {
                placeholder.index = std::str::from_utf8(&attr.value)
                    .ok()
                    .and_then(|v| v.parse::<u32>().ok());
            },
            _ => {},
        }
    }
    placeholder
}

/// Parse a `p:txBody` element up to its end tag.
fn parse_text_body(reader: &mut Reader<&[u8]>) -> Result<TextBody> {
    let mut body = TextBody::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"lstStyle" => {
                    body.list_styles = LevelStyles::parse(reader, b"lstStyle")?;
                },
                b"p" => {
                    body.paragraphs.push(parse_paragraph(reader)?);
                },
                _ => {},
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"txBody" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(body)
}

/// Parse an `a:p` element up to its end tag.
fn parse_paragraph(reader: &mut Reader<&[u8]>) -> Result<Paragraph> {
    let mut para = Paragraph::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"pPr" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"lvl" {
                        para.level = std::str::from_utf8(&attr.value)
                            .ok()
                            .and_then(|v| v.parse::<u8>().ok())
                            .unwrap_or(0);
                    }
                }
            },
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"r" => {
                para.runs.push(parse_run(reader)?);
            },
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"endParaRPr" => {
                let mut props = FontData::from_attributes(e);
                props.collect_children(reader, b"endParaRPr")?;
                para.end_run_props = Some(props);
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"endParaRPr" => {
                para.end_run_props = Some(FontData::from_attributes(e));
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"p" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(para)
}

/// Parse an `a:r` element up to its end tag.
fn parse_run(reader: &mut Reader<&[u8]>) -> Result<Run> {
    let mut run = Run::default();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"rPr" => {
                    let mut props = FontData::from_attributes(e);
                    props.collect_children(reader, b"rPr")?;
                    run.props = Some(props);
                },
                b"t" => in_text = true,
                _ => {},
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"rPr" => {
                run.props = Some(FontData::from_attributes(e));
            },
            Ok(Event::Text(e)) if in_text => {
                run.text.push_str(std::str::from_utf8(e.as_ref())?);
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => break,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE_XML: &[u8] = br#"<?xml version="1.0"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree>
    <p:sp>
      <p:nvSpPr>
        <p:cNvPr id="2" name="Title 1"/>
        <p:nvPr><p:ph type="ctrTitle" idx="0"/></p:nvPr>
      </p:nvSpPr>
      <p:txBody>
        <a:p>
          <a:pPr lvl="1"/>
          <a:r><a:rPr sz="2400" b="1"><a:latin typeface="Arial"/></a:rPr><a:t>Hello</a:t></a:r>
          <a:r><a:t> world</a:t></a:r>
          <a:endParaRPr i="1"/>
        </a:p>
      </p:txBody>
    </p:sp>
    <p:sp>
      <p:nvSpPr><p:cNvPr id="3" name="TextBox 2"/></p:nvSpPr>
      <p:txBody>
        <a:lstStyle>
          <a:lvl1pPr><a:defRPr sz="1400"/></a:lvl1pPr>
        </a:lstStyle>
        <a:p><a:r><a:t>plain</a:t></a:r></a:p>
      </p:txBody>
    </p:sp>
  </p:spTree></p:cSld>
</p:sld>"#;

    #[test]
    fn test_parse_shapes_with_placeholder_and_runs() {
        let shapes = parse_shape_tree(SLIDE_XML, ContainerId::Slide(0)).unwrap();
        assert_eq!(shapes.len(), 2);

        let title = &shapes[0];
        assert_eq!(title.name(), "Title 1");
        let ph = title.placeholder().unwrap();
        assert_eq!(ph.kind, Some(PlaceholderType::CenterTitle));
        assert_eq!(ph.index, Some(0));

        let body = title.text_body().unwrap();
        assert_eq!(body.paragraphs().len(), 1);
        let para = &body.paragraphs()[0];
        assert_eq!(para.level(), 1);
        assert_eq!(para.text(), "Hello world");

        let first = &para.runs()[0];
        let props = first.properties().unwrap();
        assert_eq!(props.size_hundredths, Some(2400));
        assert_eq!(props.bold, Some(true));
        assert_eq!(props.latin_typeface.as_deref(), Some("Arial"));
        assert!(para.runs()[1].properties().is_none());

        let end = para.end_run_props.as_ref().unwrap();
        assert_eq!(end.italic, Some(true));
    }

    #[test]
    fn test_non_placeholder_shape_with_list_styles() {
        let shapes = parse_shape_tree(SLIDE_XML, ContainerId::Slide(0)).unwrap();
        let text_box = &shapes[1];
        assert!(!text_box.is_placeholder());
        let body = text_box.text_body().unwrap();
        assert_eq!(
            body.list_styles().get(0).unwrap().size_hundredths,
            Some(1400)
        );
        assert_eq!(body.text(), "plain");
    }
}
