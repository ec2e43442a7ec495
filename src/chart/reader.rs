/// Chart XML reader.
///
/// Parses the chart part far enough for the object model: the plot-area
/// type groups, each group's series, and per series the name cache, the
/// category-axis data, and the cached numeric points.
use crate::chart::series::{CategoryLevel, CategorySource, ChartKind, Series};
use crate::error::Result;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse a chart part into its series.
///
/// Returns the kind of the first type group (the chart's kind) and every
/// series across all groups, in document order.
pub(crate) fn parse_chart(xml: &[u8]) -> Result<(Option<ChartKind>, Vec<Series>)> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut chart_kind = None;
    let mut series = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if let Some(kind) = ChartKind::from_tag(e.local_name().as_ref()) {
                    chart_kind.get_or_insert(kind);
                    parse_type_group(&mut reader, e, kind, &mut series)?;
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok((chart_kind, series))
}

/// Parse one plot-area type group (`c:barChart`, `c:lineChart`, ...) up to
/// its end tag, collecting its series.
fn parse_type_group(
    reader: &mut Reader<&[u8]>,
    group: &BytesStart,
    kind: ChartKind,
    series: &mut Vec<Series>,
) -> Result<()> {
    let end = group.local_name().as_ref().to_vec();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"ser" => {
                series.push(parse_series(reader, kind)?);
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == end.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(())
}

/// Parse one `c:ser` element up to its end tag.
fn parse_series(reader: &mut Reader<&[u8]>, kind: ChartKind) -> Result<Series> {
    let mut series = Series {
        kind,
        name: None,
        categories: CategorySource::None,
        values: Vec::new(),
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tx" => {
                    series.name = parse_series_name(reader)?;
                },
                b"cat" => {
                    series.categories = parse_category_source(reader)?;
                },
                b"val" => {
                    series.values = parse_numeric_cache(reader, b"val")?;
                },
                _ => {},
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"ser" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(series)
}

/// Parse a `c:tx` element; the name is the first cached point value.
fn parse_series_name(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut name = None;
    let mut in_value = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"v" => {
                in_value = true;
            },
            Ok(Event::Text(e)) if in_value && name.is_none() => {
                name = Some(std::str::from_utf8(e.as_ref())?.to_string());
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"tx" => break,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(name)
}

/// Parse a `c:cat` element up to its end tag.
///
/// The axis data is one of a multi-level string reference, a string
/// reference, or a numeric reference; anything else marks the axis
/// unreadable so the caller can apply its degradation policy.
fn parse_category_source(reader: &mut Reader<&[u8]>) -> Result<CategorySource> {
    let mut source = CategorySource::Unreadable;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"multiLvlStrRef" => {
                    source = CategorySource::MultiLevel(parse_levels(reader)?);
                },
                b"strRef" => {
                    source = parse_flat_reference(reader, b"strRef")?;
                },
                b"numRef" => {
                    source = parse_flat_reference(reader, b"numRef")?;
                },
                _ => {},
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"cat" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(source)
}

/// Parse the `c:lvl` children of a multi-level string reference. Levels are
/// kept in stored order (deepest first).
fn parse_levels(reader: &mut Reader<&[u8]>) -> Result<Vec<CategoryLevel>> {
    let mut levels = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"lvl" => {
                levels.push(parse_level(reader)?);
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"multiLvlStrRef" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(levels)
}

/// Parse one `c:lvl` element into its (index, value) points.
fn parse_level(reader: &mut Reader<&[u8]>) -> Result<CategoryLevel> {
    let mut level = CategoryLevel::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"pt" => {
                let index = parse_index_attr(e);
                if let Some(value) = parse_point_value(reader)? {
                    level.points.push((index, value));
                }
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"lvl" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(level)
}

/// Parse a `c:strRef` or `c:numRef` element into a flat category source:
/// the range formula from `c:f` plus the cached point values in order.
fn parse_flat_reference(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<CategorySource> {
    let mut formula = None;
    let mut cached = Vec::new();
    let mut in_formula = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"f" => in_formula = true,
                b"pt" => {
                    if let Some(value) = parse_point_value(reader)? {
                        cached.push(value);
                    }
                },
                _ => {},
            },
            Ok(Event::Text(e)) if in_formula => {
                formula = Some(std::str::from_utf8(e.as_ref())?.to_string());
            },
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                if name.as_ref() == b"f" {
                    in_formula = false;
                } else if name.as_ref() == end {
                    break;
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(CategorySource::Flat { formula, cached })
}

/// Parse the cached numeric points of a `c:val` element.
fn parse_numeric_cache(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"pt" => {
                if let Some(text) = parse_point_value(reader)? {
                    if let Ok(value) = text.parse::<f64>() {
                        values.push(value);
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

    Ok(values)
}

/// Parse the `idx` attribute of a `c:pt` element.
fn parse_index_attr(e: &BytesStart) -> u32 {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"idx" {
            return std::str::from_utf8(&attr.value)
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0);
        }
    }
    0
}

/// Parse the `c:v` value of a `c:pt` element, up to the point's end tag.
fn parse_point_value(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut value = None;
    let mut in_value = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"v" => {
                in_value = true;
            },
            Ok(Event::Text(e)) if in_value => {
                value = Some(std::str::from_utf8(e.as_ref())?.to_string());
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"pt" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(value)
}
