/// Theme part of a presentation.
///
/// Only the font scheme is modeled here: the major/minor latin typefaces are
/// what text-style resolution needs to substitute theme aliases and to back
/// the hard-default typeface.
use crate::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Symbolic typeface token resolved against the theme's major latin font.
pub const MAJOR_LATIN_ALIAS: &str = "+mj-lt";
/// Symbolic typeface token resolved against the theme's minor latin font.
pub const MINOR_LATIN_ALIAS: &str = "+mn-lt";

/// Font scheme of a theme: the major (heading) and minor (body) latin
/// typefaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontScheme {
    /// Major (heading) latin typeface
    pub major_latin: String,
    /// Minor (body) latin typeface
    pub minor_latin: String,
}

impl Default for FontScheme {
    fn default() -> Self {
        // Office default theme fonts, used when no theme part is supplied.
        Self {
            major_latin: "Calibri Light".to_string(),
            minor_latin: "Calibri".to_string(),
        }
    }
}

/// Theme information extracted from a theme part.
///
/// Corresponds to `/ppt/theme/themeN.xml` in the package.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Font scheme (major/minor latin typefaces)
    pub font_scheme: FontScheme,
}

impl Theme {
    /// Parse a theme from its XML part.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let theme = Theme::from_xml(theme_xml)?;
    /// println!("Body font: {}", theme.font_scheme.minor_latin);
    /// ```
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut theme = Theme::default();
        let mut in_major_font = false;
        let mut in_minor_font = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"theme" => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"name" {
                                    theme.name =
                                        String::from_utf8_lossy(&attr.value).into_owned();
                                }
                            }
                        },
                        b"majorFont" => in_major_font = true,
                        b"minorFont" => in_minor_font = true,
                        b"latin" if in_major_font || in_minor_font => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"typeface" {
                                    let typeface =
                                        String::from_utf8_lossy(&attr.value).into_owned();
                                    if in_major_font {
                                        theme.font_scheme.major_latin = typeface;
                                    } else {
                                        theme.font_scheme.minor_latin = typeface;
                                    }
                                }
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"majorFont" => in_major_font = false,
                    b"minorFont" => in_minor_font = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {},
            }
            buf.clear();
        }

        Ok(theme)
    }

    /// Substitute a theme alias with the concrete typeface it refers to.
    ///
    /// Non-alias typefaces pass through unchanged. Substitution happens once,
    /// after cascade resolution, never mid-cascade.
    pub fn resolve_typeface<'a>(&'a self, typeface: &'a str) -> &'a str {
        match typeface {
            MAJOR_LATIN_ALIAS => &self.font_scheme.major_latin,
            MINOR_LATIN_ALIAS => &self.font_scheme.minor_latin,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME_XML: &[u8] = br#"<?xml version="1.0"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:fontScheme name="Office">
      <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/></a:minorFont>
    </a:fontScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_parse_font_scheme() {
        let theme = Theme::from_xml(THEME_XML).unwrap();
        assert_eq!(theme.name, "Office Theme");
        assert_eq!(theme.font_scheme.major_latin, "Calibri Light");
        assert_eq!(theme.font_scheme.minor_latin, "Calibri");
    }

    #[test]
    fn test_alias_substitution() {
        let theme = Theme::from_xml(THEME_XML).unwrap();
        assert_eq!(theme.resolve_typeface("+mj-lt"), "Calibri Light");
        assert_eq!(theme.resolve_typeface("+mn-lt"), "Calibri");
        assert_eq!(theme.resolve_typeface("Arial"), "Arial");
    }
}
