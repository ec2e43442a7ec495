//! Charts: series, categories, and backing-cell binding.
//!
//! Chart data lives twice in a presentation: cached inside the chart part
//! and authoritatively in an embedded workbook. The model reads the cache;
//! in editable mode flat category collections additionally bind to their
//! backing cells through a [`WorkbookPart`] collaborator.

pub mod category;
pub mod cells;
pub mod reader;
pub mod series;

pub use category::{Category, CategoryCollection};
pub use cells::{Cell, CellBinder, WorkbookPart};
pub use series::{ChartKind, Series};

use crate::error::Result;
use crate::lazy::ResettableLazy;

/// A chart, parsed from its chart part.
///
/// # Examples
///
/// ```rust,ignore
/// let mut chart = Chart::from_xml(chart_xml, pres.editable())?;
/// for category in chart.categories().iter() {
///     println!("{}", category.value());
/// }
/// ```
#[derive(Debug)]
pub struct Chart {
    kind: Option<ChartKind>,
    series: Vec<Series>,
    editable: bool,
    /// Categories are reconstructed once per chart and cached here.
    categories: ResettableLazy<CategoryCollection>,
}

impl Chart {
    /// Parse a chart part.
    ///
    /// `editable` selects whether category collections bind to backing
    /// cells; pass the owning presentation's mode.
    pub fn from_xml(xml: &[u8], editable: bool) -> Result<Chart> {
        let (kind, series) = reader::parse_chart(xml)?;
        Ok(Chart {
            kind,
            series,
            editable,
            categories: ResettableLazy::new(),
        })
    }

    /// The chart kind, from the first plot-area type group.
    #[inline]
    pub fn kind(&self) -> Option<ChartKind> {
        self.kind
    }

    /// Every series across all type groups, in document order.
    #[inline]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// The chart's categories, built on first access from the first series
    /// (all series of a chart share the same categories).
    pub fn categories(&mut self) -> &CategoryCollection {
        self.ensure_categories();
        match self.categories.get() {
            Some(categories) => categories,
            None => unreachable!("categories evaluated above"),
        }
    }

    /// Mutable access to the categories, for resolving or invalidating the
    /// cell binding.
    pub fn categories_mut(&mut self) -> &mut CategoryCollection {
        self.ensure_categories();
        match self.categories.get_mut() {
            Some(categories) => categories,
            None => unreachable!("categories evaluated above"),
        }
    }

    /// Drop the built categories after a structural edit to the chart; the
    /// next access rebuilds them.
    pub fn reset_categories(&mut self) {
        self.categories.reset();
    }

    fn ensure_categories(&mut self) {
        if !self.categories.is_evaluated() {
            let kind = match self.kind {
                Some(kind) => kind,
                // No type group at all: nothing to build categories from.
                None => {
                    self.categories.set(CategoryCollection::default());
                    return;
                },
            };
            let built = CategoryCollection::build(kind, self.series.first(), self.editable);
            self.categories.set(built);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_CHART_XML: &[u8] = br#"<c:chartSpace><c:plotArea><c:lineChart>
      <c:ser>
        <c:cat><c:strRef>
          <c:f>Sheet1!$A$2:$A$3</c:f>
          <c:strCache>
            <c:pt idx="0"><c:v>alpha</c:v></c:pt>
            <c:pt idx="1"><c:v>beta</c:v></c:pt>
          </c:strCache>
        </c:strRef></c:cat>
        <c:val><c:numRef><c:numCache>
          <c:pt idx="0"><c:v>1</c:v></c:pt>
          <c:pt idx="1"><c:v>2</c:v></c:pt>
        </c:numCache></c:numRef></c:val>
      </c:ser>
    </c:lineChart></c:plotArea></c:chartSpace>"#;

    const SCATTER_CHART_XML: &[u8] = br#"<c:chartSpace><c:plotArea><c:scatterChart>
      <c:ser>
        <c:xVal><c:numRef><c:numCache>
          <c:pt idx="0"><c:v>1</c:v></c:pt>
        </c:numCache></c:numRef></c:xVal>
      </c:ser>
    </c:scatterChart></c:plotArea></c:chartSpace>"#;

    #[test]
    fn test_categories_built_once_and_reset() {
        let mut chart = Chart::from_xml(LINE_CHART_XML, true).unwrap();
        assert_eq!(chart.kind(), Some(ChartKind::Line));

        let values: Vec<String> = chart
            .categories()
            .iter()
            .map(|c| c.value().to_string())
            .collect();
        assert_eq!(values, ["alpha", "beta"]);
        assert!(chart.categories().is_bound());

        chart.reset_categories();
        assert_eq!(chart.categories().len(), 2);
    }

    #[test]
    fn test_scatter_chart_has_no_categories() {
        let mut chart = Chart::from_xml(SCATTER_CHART_XML, true).unwrap();
        assert_eq!(chart.kind(), Some(ChartKind::Scatter));
        assert!(chart.categories().is_empty());
    }

    #[test]
    fn test_read_only_chart_not_bound() {
        let mut chart = Chart::from_xml(LINE_CHART_XML, false).unwrap();
        assert!(!chart.categories().is_bound());
    }
}
