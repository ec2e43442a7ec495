/// Font override records and level-keyed style tables.
use crate::error::Result;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// One level's worth of optional style fields.
///
/// Every field is independently present or absent; an absent field means
/// "ask the next level of the cascade". Records are harvested from run
/// properties (`a:rPr`), end-of-paragraph properties (`a:endParaRPr`), and
/// level defaults (`a:defRPr` inside `a:lvlNpPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontData {
    /// Latin typeface name; may be a theme alias token
    pub latin_typeface: Option<String>,
    /// Font size in hundredths of a point
    pub size_hundredths: Option<i32>,
    /// Bold flag
    pub bold: Option<bool>,
    /// Italic flag
    pub italic: Option<bool>,
}

impl FontData {
    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.latin_typeface.is_none()
            && self.size_hundredths.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
    }

    /// Harvest the attribute-borne fields (`sz`, `b`, `i`) from a
    /// properties element. The `a:latin` child is collected separately by
    /// [`FontData::collect_children`].
    pub(crate) fn from_attributes(e: &BytesStart) -> FontData {
        let mut data = FontData::default();
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"sz" => {
                    data.size_hundredths = std::str::from_utf8(&attr.value)
                        .ok()
                        .and_then(|v| v.parse::<i32>().ok());
                },
                b"b" => data.bold = parse_xml_bool(&attr.value),
                b"i" => data.italic = parse_xml_bool(&attr.value),
                _ => {},
            }
        }
        data
    }

    /// Consume the children of a non-empty properties element up to its end
    /// tag, collecting the `a:latin` typeface.
    pub(crate) fn collect_children(
        &mut self,
        reader: &mut Reader<&[u8]>,
        end: &[u8],
    ) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    if e.local_name().as_ref() == b"latin" {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"typeface" {
                                self.latin_typeface =
                                    Some(String::from_utf8_lossy(&attr.value).into_owned());
                            }
                        }
                    }
                },
                Ok(Event::End(ref e)) if e.local_name().as_ref() == end => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {},
            }
            buf.clear();
        }
        Ok(())
    }
}

/// OOXML boolean attribute: "1"/"true" and "0"/"false".
fn parse_xml_bool(value: &[u8]) -> Option<bool> {
    match value {
        b"1" | b"true" => Some(true),
        b"0" | b"false" => Some(false),
        _ => None,
    }
}

/// A mapping from 0-based paragraph nesting level to a [`FontData`] record.
///
/// Backs the level-keyed tiers of the cascade: per-shape list styles
/// (`a:lstStyle`), master text styles (`p:bodyStyle`, `p:otherStyle`), and
/// the presentation-wide defaults (`p:defaultTextStyle`). Scoped to one open
/// presentation, never process-global.
#[derive(Debug, Clone, Default)]
pub struct LevelStyles {
    levels: HashMap<u8, FontData>,
}

impl LevelStyles {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a paragraph nesting level, if one is defined.
    pub fn get(&self, level: u8) -> Option<&FontData> {
        self.levels.get(&level)
    }

    /// Define or replace the record for a level.
    pub fn insert(&mut self, level: u8, data: FontData) {
        self.levels.insert(level, data);
    }

    /// Whether no level defines a record.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Parse a level-style list (`a:lstStyle`, `p:bodyStyle`,
    /// `p:defaultTextStyle`, ...) up to the given end tag.
    ///
    /// Levels are carried by `a:lvl1pPr` through `a:lvl9pPr` elements, each
    /// holding an `a:defRPr` record; `lvlNpPr` maps to 0-based level N-1.
    pub(crate) fn parse(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<LevelStyles> {
        let mut styles = LevelStyles::new();
        let mut current_level: Option<u8> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    name if level_of(name).is_some() => {
                        current_level = level_of(name);
                    },
                    b"defRPr" => {
                        if let Some(level) = current_level {
                            let mut data = FontData::from_attributes(e);
                            data.collect_children(reader, b"defRPr")?;
                            styles.insert(level, data);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    name if level_of(name).is_some() => {
                        // An empty lvlNpPr defines nothing for its level.
                        current_level = None;
                    },
                    b"defRPr" => {
                        if let Some(level) = current_level {
                            styles.insert(level, FontData::from_attributes(e));
                        }
                    },
                    _ => {},
                },
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    if name.as_ref() == end {
                        break;
                    }
                    if level_of(name.as_ref()).is_some() {
                        current_level = None;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {},
            }
            buf.clear();
        }

        Ok(styles)
    }
}

/// 0-based nesting level of an `a:lvlNpPr` tag name, if it is one.
fn level_of(name: &[u8]) -> Option<u8> {
    if name.len() == 7 && name.starts_with(b"lvl") && name.ends_with(b"pPr") {
        match name[3] {
            digit @ b'1'..=b'9' => Some(digit - b'1'),
            _ => None,
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tag_mapping() {
        assert_eq!(level_of(b"lvl1pPr"), Some(0));
        assert_eq!(level_of(b"lvl9pPr"), Some(8));
        assert_eq!(level_of(b"lvl0pPr"), None);
        assert_eq!(level_of(b"defPPr"), None);
        assert_eq!(level_of(b"pPr"), None);
    }

    #[test]
    fn test_font_data_from_attributes() {
        let e = BytesStart::from_content(r#"rPr sz="2400" b="1" i="0""#, 3);
        let data = FontData::from_attributes(&e);
        assert_eq!(data.size_hundredths, Some(2400));
        assert_eq!(data.bold, Some(true));
        assert_eq!(data.italic, Some(false));
        assert_eq!(data.latin_typeface, None);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let e = BytesStart::from_content("rPr", 3);
        let data = FontData::from_attributes(&e);
        assert!(data.is_empty());
    }

    #[test]
    fn test_parse_level_style_list() {
        let xml: &[u8] = br#"<p:bodyStyle>
            <a:lvl1pPr><a:defRPr sz="3200" b="1"><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr>
            <a:lvl2pPr><a:defRPr sz="2800"/></a:lvl2pPr>
        </p:bodyStyle>"#;
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        // Consume the container start tag; parse() reads up to its end tag.
        let mut buf = Vec::new();
        assert!(matches!(reader.read_event_into(&mut buf), Ok(Event::Start(_))));

        let styles = LevelStyles::parse(&mut reader, b"bodyStyle").unwrap();
        let lvl0 = styles.get(0).unwrap();
        assert_eq!(lvl0.size_hundredths, Some(3200));
        assert_eq!(lvl0.bold, Some(true));
        assert_eq!(lvl0.latin_typeface.as_deref(), Some("+mj-lt"));
        let lvl1 = styles.get(1).unwrap();
        assert_eq!(lvl1.size_hundredths, Some(2800));
        assert!(lvl1.latin_typeface.is_none());
        assert!(styles.get(2).is_none());
    }
}
