/// Lazy binding of chart categories to their backing spreadsheet cells.
use crate::error::Result;
use crate::lazy::ResettableLazy;

/// A backing cell in the embedded workbook: the source of truth for a
/// cached chart value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell reference within its sheet, e.g. "A2"
    pub reference: String,
    /// Cell value as stored
    pub value: String,
}

/// The spreadsheet-part collaborator: resolves a range formula
/// (sheet name plus cell-range expression, e.g. `Sheet1!$A$2:$A$5`) into the
/// cells it covers, in range order.
pub trait WorkbookPart {
    /// Cells covered by a range formula, in range order.
    fn cells_by_formula(&self, formula: &str) -> Result<Vec<Cell>>;
}

/// Lazily resolves a category range formula to its backing cells.
///
/// Constructed only when the presentation is open in an editable mode; in
/// read-only mode category display values come solely from the cached values
/// embedded in the chart part. Resolution happens once per binder; a
/// structural edit to the referenced range must [`invalidate`] the binder so
/// the next read re-resolves cell identities.
///
/// [`invalidate`]: CellBinder::invalidate
#[derive(Debug, Clone)]
pub struct CellBinder {
    formula: String,
    cells: ResettableLazy<Vec<Cell>>,
}

impl CellBinder {
    pub(crate) fn new(formula: String) -> Self {
        Self {
            formula,
            cells: ResettableLazy::new(),
        }
    }

    /// The range formula this binder resolves.
    #[inline]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// The backing cells, resolved through `workbook` on first call and
    /// cached thereafter.
    pub fn cells(&mut self, workbook: &dyn WorkbookPart) -> Result<&[Cell]> {
        if self.cells.get().is_none() {
            let resolved = workbook.cells_by_formula(&self.formula)?;
            self.cells.set(resolved);
        }
        match self.cells.get() {
            Some(cells) => Ok(cells),
            None => unreachable!("binder evaluated above"),
        }
    }

    /// Whether the binder currently holds resolved cells.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.cells.is_evaluated()
    }

    /// Drop the resolved cells; the next read re-resolves.
    pub fn invalidate(&mut self) {
        self.cells.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    struct CountingWorkbook {
        calls: StdCell<usize>,
    }

    impl WorkbookPart for CountingWorkbook {
        fn cells_by_formula(&self, formula: &str) -> Result<Vec<Cell>> {
            self.calls.set(self.calls.get() + 1);
            assert_eq!(formula, "Sheet1!$A$2:$A$3");
            Ok(vec![
                Cell {
                    reference: "A2".into(),
                    value: "Category 1".into(),
                },
                Cell {
                    reference: "A3".into(),
                    value: "Category 2".into(),
                },
            ])
        }
    }

    #[test]
    fn test_resolves_once_until_invalidated() {
        let workbook = CountingWorkbook {
            calls: StdCell::new(0),
        };
        let mut binder = CellBinder::new("Sheet1!$A$2:$A$3".into());
        assert!(!binder.is_resolved());

        assert_eq!(binder.cells(&workbook).unwrap().len(), 2);
        assert_eq!(binder.cells(&workbook).unwrap()[1].reference, "A3");
        assert_eq!(workbook.calls.get(), 1);

        binder.invalidate();
        assert!(!binder.is_resolved());
        binder.cells(&workbook).unwrap();
        assert_eq!(workbook.calls.get(), 2);
    }
}
