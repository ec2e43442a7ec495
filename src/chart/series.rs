/// Chart kinds, series, and the raw category-axis data they carry.
use crate::error::{Error, Result};

/// Chart kinds, from the plot-area type-group element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Area chart (`c:areaChart`, `c:area3DChart`)
    Area,
    /// Bar or column chart (`c:barChart`, `c:bar3DChart`)
    Bar,
    /// Bubble chart (`c:bubbleChart`)
    Bubble,
    /// Doughnut chart (`c:doughnutChart`)
    Doughnut,
    /// Line chart (`c:lineChart`, `c:line3DChart`)
    Line,
    /// Pie chart (`c:pieChart`, `c:pie3DChart`, `c:ofPieChart`)
    Pie,
    /// Radar chart (`c:radarChart`)
    Radar,
    /// Scatter chart (`c:scatterChart`)
    Scatter,
    /// Stock chart (`c:stockChart`)
    Stock,
    /// Surface chart (`c:surfaceChart`, `c:surface3DChart`)
    Surface,
}

impl ChartKind {
    /// Map a plot-area type-group tag name to a chart kind.
    pub(crate) fn from_tag(name: &[u8]) -> Option<ChartKind> {
        match name {
            b"areaChart" | b"area3DChart" => Some(ChartKind::Area),
            b"barChart" | b"bar3DChart" => Some(ChartKind::Bar),
            b"bubbleChart" => Some(ChartKind::Bubble),
            b"doughnutChart" => Some(ChartKind::Doughnut),
            b"lineChart" | b"line3DChart" => Some(ChartKind::Line),
            b"pieChart" | b"pie3DChart" | b"ofPieChart" => Some(ChartKind::Pie),
            b"radarChart" => Some(ChartKind::Radar),
            b"scatterChart" => Some(ChartKind::Scatter),
            b"stockChart" => Some(ChartKind::Stock),
            b"surfaceChart" | b"surface3DChart" => Some(ChartKind::Surface),
            _ => None,
        }
    }

    /// Whether charts of this kind carry a category axis. Bubble and
    /// scatter charts never do; their series are coordinate pairs.
    #[inline]
    pub fn has_category_axis(self) -> bool {
        !matches!(self, ChartKind::Bubble | ChartKind::Scatter)
    }
}

/// One sparse level of a multi-level category cache: (point index, display
/// value) pairs in stored order. An index covers all data points from itself
/// up to the next index defined at the same level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CategoryLevel {
    pub(crate) points: Vec<(u32, String)>,
}

/// Category-axis data as stored in a series' `c:cat` element.
#[derive(Debug, Clone, Default)]
pub(crate) enum CategorySource {
    /// No category-axis element
    #[default]
    None,
    /// Multi-level string reference; levels stored deepest-first
    MultiLevel(Vec<CategoryLevel>),
    /// Flat string or numeric reference: range formula plus cached display
    /// values in point order
    Flat {
        formula: Option<String>,
        cached: Vec<String>,
    },
    /// A `c:cat` element carrying no recognizable reference
    Unreadable,
}

/// One chart series.
#[derive(Debug, Clone)]
pub struct Series {
    pub(crate) kind: ChartKind,
    pub(crate) name: Option<String>,
    pub(crate) categories: CategorySource,
    pub(crate) values: Vec<f64>,
}

impl Series {
    /// The chart kind of the type group this series belongs to.
    #[inline]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// The series name from `c:tx`, when cached.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The cached numeric points of this series, in point order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The raw category-axis data of this series.
    ///
    /// A category-axis element with no usable reference surfaces
    /// [`Error::MalformedCategoryAxis`]; the collection builder degrades
    /// that to an empty collection.
    pub(crate) fn category_source(&self) -> Result<&CategorySource> {
        match &self.categories {
            CategorySource::Unreadable => Err(Error::MalformedCategoryAxis),
            source => Ok(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(ChartKind::from_tag(b"barChart"), Some(ChartKind::Bar));
        assert_eq!(ChartKind::from_tag(b"pie3DChart"), Some(ChartKind::Pie));
        assert_eq!(ChartKind::from_tag(b"plotArea"), None);
    }

    #[test]
    fn test_bubble_and_scatter_have_no_category_axis() {
        assert!(!ChartKind::Bubble.has_category_axis());
        assert!(!ChartKind::Scatter.has_category_axis());
        assert!(ChartKind::Bar.has_category_axis());
        assert!(ChartKind::Line.has_category_axis());
    }
}
