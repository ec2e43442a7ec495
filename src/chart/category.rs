/// Chart categories and the hierarchical category tree builder.
use crate::chart::cells::{Cell, CellBinder, WorkbookPart};
use crate::chart::series::{CategoryLevel, CategorySource, ChartKind, Series};
use crate::error::{Error, Result};
use smallvec::SmallVec;

/// A node of the rebuilt category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryNode {
    /// Point index within the node's level
    index: u32,
    /// Cached display value (numeric caches keep their string form)
    value: String,
    /// Parent node, for nodes below the shallowest level
    parent: Option<usize>,
}

/// The categories of one chart.
///
/// Iteration yields the leaf categories in point-index order; for a
/// multi-level axis the leaves carry parents up to the shallowest level.
/// Flat collections built from an editable presentation additionally hold a
/// [`CellBinder`] shared by all leaves.
#[derive(Debug, Clone, Default)]
pub struct CategoryCollection {
    nodes: Vec<CategoryNode>,
    leaves: Vec<usize>,
    binder: Option<CellBinder>,
}

impl CategoryCollection {
    /// Build the categories for a chart from its first series.
    ///
    /// Any series works: all series of a chart share the same categories.
    /// Bubble and scatter charts short-circuit to an empty collection
    /// without inspecting category-axis data, and a malformed category axis
    /// degrades to an empty collection as well, since charts without
    /// categories are valid.
    pub(crate) fn build(
        kind: ChartKind,
        first_series: Option<&Series>,
        editable: bool,
    ) -> CategoryCollection {
        if !kind.has_category_axis() {
            return CategoryCollection::default();
        }
        let Some(series) = first_series else {
            return CategoryCollection::default();
        };
        match series.category_source() {
            Ok(CategorySource::MultiLevel(levels)) => Self::from_levels(levels),
            Ok(CategorySource::Flat { formula, cached }) => {
                Self::from_flat(formula.as_deref(), cached, editable)
            },
            Ok(CategorySource::None) | Ok(CategorySource::Unreadable) => {
                CategoryCollection::default()
            },
            Err(Error::MalformedCategoryAxis) => CategoryCollection::default(),
            Err(_) => CategoryCollection::default(),
        }
    }

    /// Rebuild the category tree from a multi-level cache.
    ///
    /// Levels are stored deepest-first, so they are processed in reverse:
    /// the shallowest level seeds the frontier with parentless nodes, and
    /// every deeper entry at index `i` parents to the frontier entry with
    /// the greatest index <= `i` (the nearest preceding broader bucket).
    /// After the deepest level the frontier is the leaf sequence in stored
    /// index order.
    fn from_levels(levels: &[CategoryLevel]) -> CategoryCollection {
        let mut nodes: Vec<CategoryNode> = Vec::new();
        let mut frontier: Vec<(u32, usize)> = Vec::new();

        for level in levels.iter().rev() {
            let mut next = Vec::with_capacity(level.points.len());
            if frontier.is_empty() {
                for (index, value) in &level.points {
                    nodes.push(CategoryNode {
                        index: *index,
                        value: value.clone(),
                        parent: None,
                    });
                    next.push((*index, nodes.len() - 1));
                }
            } else {
                let mut descending: SmallVec<[(u32, usize); 8]> =
                    SmallVec::from_slice(&frontier);
                descending.sort_by(|a, b| b.0.cmp(&a.0));
                for (index, value) in &level.points {
                    let parent = descending
                        .iter()
                        .find(|(key, _)| *key <= *index)
                        .map(|(_, node)| *node);
                    nodes.push(CategoryNode {
                        index: *index,
                        value: value.clone(),
                        parent,
                    });
                    next.push((*index, nodes.len() - 1));
                }
            }
            frontier = next;
        }

        let leaves = frontier.into_iter().map(|(_, node)| node).collect();
        CategoryCollection {
            nodes,
            leaves,
            binder: None,
        }
    }

    /// Build a flat (single-level) collection directly from the cached
    /// values. The binder is constructed only in editable mode; read-only
    /// presentations serve cached values alone.
    fn from_flat(formula: Option<&str>, cached: &[String], editable: bool) -> CategoryCollection {
        let mut nodes = Vec::with_capacity(cached.len());
        let mut leaves = Vec::with_capacity(cached.len());
        for (index, value) in cached.iter().enumerate() {
            nodes.push(CategoryNode {
                index: index as u32,
                value: value.clone(),
                parent: None,
            });
            leaves.push(index);
        }
        let binder = match (editable, formula) {
            (true, Some(formula)) => Some(CellBinder::new(formula.to_string())),
            _ => None,
        };
        CategoryCollection {
            nodes,
            leaves,
            binder,
        }
    }

    /// Number of leaf categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the chart has no categories.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// The leaf category at a position in point order.
    pub fn get(&self, position: usize) -> Option<Category<'_>> {
        self.leaves.get(position).map(|&node| Category {
            collection: self,
            node,
        })
    }

    /// Iterate the leaf categories in point order.
    pub fn iter(&self) -> impl Iterator<Item = Category<'_>> {
        self.leaves.iter().map(|&node| Category {
            collection: self,
            node,
        })
    }

    /// Whether the collection is bound to backing cells.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.binder.is_some()
    }

    /// The range formula behind a bound collection.
    pub fn formula(&self) -> Option<&str> {
        self.binder.as_ref().map(|b| b.formula())
    }

    /// The backing cells of a bound collection, in point order. Resolved
    /// through `workbook` on first call; unbound collections yield no cells.
    pub fn backing_cells(&mut self, workbook: &dyn WorkbookPart) -> Result<&[Cell]> {
        match self.binder.as_mut() {
            Some(binder) => binder.cells(workbook),
            None => Ok(&[]),
        }
    }

    /// Reset the cell binding after a structural edit to the referenced
    /// range; the next [`backing_cells`](Self::backing_cells) re-resolves.
    pub fn invalidate_binding(&mut self) {
        if let Some(binder) = self.binder.as_mut() {
            binder.invalidate();
        }
    }
}

/// One category: a leaf when obtained from the collection, or an ancestor
/// when obtained through [`Category::parent`].
#[derive(Debug, Clone, Copy)]
pub struct Category<'a> {
    collection: &'a CategoryCollection,
    node: usize,
}

impl<'a> Category<'a> {
    /// The cached display value.
    #[inline]
    pub fn value(&self) -> &'a str {
        &self.collection.nodes[self.node].value
    }

    /// The point index within this category's level.
    #[inline]
    pub fn point_index(&self) -> u32 {
        self.collection.nodes[self.node].index
    }

    /// The parent category, for levels below the shallowest.
    pub fn parent(&self) -> Option<Category<'a>> {
        self.collection.nodes[self.node]
            .parent
            .map(|node| Category {
                collection: self.collection,
                node,
            })
    }
}
