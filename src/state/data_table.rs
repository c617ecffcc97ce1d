/// Text grid shown under the chart: one row per sample point, one column for
/// the independent variable plus one per tracked curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    /// Row-major: `cells[row][col]`.
    pub cells: Vec<Vec<String>>,
}

impl DataTable {
    pub fn with_size(rows: usize, columns: usize) -> Self {
        let mut table = Self::default();
        table.set_size(rows, columns);
        table
    }

    /// Resize to `rows x columns`, blanking every cell and header.
    pub fn set_size(&mut self, rows: usize, columns: usize) {
        self.cells = vec![vec![String::new(); columns]; rows];
        self.headers = vec![String::new(); columns];
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.headers.clear();
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.headers.is_empty()
    }

    /// Set one cell's text. Cells outside the current size are ignored, the
    /// same way a table widget drops out-of-range items.
    pub fn add_table_item(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = text.into();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn item(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Replace the header labels; extra labels grow the column count.
    pub fn set_horizontal_header_labels(&mut self, labels: Vec<String>) {
        if labels.len() > self.headers.len() {
            let columns = labels.len();
            for row in &mut self.cells {
                row.resize(columns, String::new());
            }
        }
        let columns = self.headers.len().max(labels.len());
        self.headers = labels;
        self.headers.resize(columns, String::new());
    }
}
