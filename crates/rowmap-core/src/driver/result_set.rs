use crate::stmt;

/// The cursor over a query's result rows.
///
/// Column labels are reported in physical order. Rows are yielded in the
/// order the driver produced them; advancing the cursor is destructive, so a
/// `ResultSet` must not be shared across concurrent callers.
#[derive(Debug)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<stmt::Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<stmt::Value>>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }

    /// Column labels, in physical order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Iterator for ResultSet {
    type Item = Vec<stmt::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}
