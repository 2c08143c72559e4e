/// Rows of cell text read from one spreadsheet range.
///
/// Rows may be ragged: the remote side trims trailing empty cells, so a row
/// can be shorter than the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetGrid {
    rows: Vec<Vec<String>>,
}

impl SpreadsheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R, C> FromIterator<R> for SpreadsheetGrid
where
    R: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = R>>(rows: I) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// One chat line pulled out of a grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// Never empty.
    pub content: String,
    pub timestamp: Option<String>,
}
