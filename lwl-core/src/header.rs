//! Header detection for water level CSV exports.
//!
//! Exports from the gauge office put a few lines of station metadata above the
//! real header, and the column names vary between downloads ("Date" vs
//! "Date (EST)", "Value" vs "Value (m)"). The header is the first line that
//! names both a date column and a value column.

/// Built-in date column names.
pub const DATE_COLUMN_NAMES: &[&str] = &["date", "date (est)"];

/// Built-in value column names.
pub const VALUE_COLUMN_NAMES: &[&str] = &["value", "value (m)"];

/// Accepted (lowercase) names for the date and value columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    pub date: Vec<String>,
    pub value: Vec<String>,
    /// Take the left-most matching column instead of the right-most.
    pub first_match: bool,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        ColumnAliases {
            date: DATE_COLUMN_NAMES.iter().map(|s| s.to_string()).collect(),
            value: VALUE_COLUMN_NAMES.iter().map(|s| s.to_string()).collect(),
            first_match: false,
        }
    }
}

impl ColumnAliases {
    /// Aliases that only accept the exact names `date` and `value`, taking the
    /// first column of each.
    pub fn strict() -> Self {
        ColumnAliases {
            date: vec!["date".to_string()],
            value: vec!["value".to_string()],
            first_match: true,
        }
    }

    /// Add extra accepted names on top of the current ones.
    pub fn with_extra<I, J>(mut self, date: I, value: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        self.date.extend(date.into_iter().map(|s| normalize_cell(&s)));
        self.value.extend(value.into_iter().map(|s| normalize_cell(&s)));
        self
    }

    pub fn is_date(&self, cell: &str) -> bool {
        let cell = normalize_cell(cell);
        self.date.iter().any(|name| *name == cell)
    }

    pub fn is_value(&self, cell: &str) -> bool {
        let cell = normalize_cell(cell);
        self.value.iter().any(|name| *name == cell)
    }

    /// Column indices when `cells` is a header row, otherwise `None`.
    ///
    /// If a name appears more than once the right-most column wins, or the
    /// left-most with `first_match`.
    pub fn match_header<'a, I>(&self, cells: I) -> Option<HeaderColumns>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut date = None;
        let mut value = None;
        for (idx, cell) in cells.into_iter().enumerate() {
            let keep = |found: Option<usize>| self.first_match && found.is_some();
            if self.is_date(cell) && !keep(date) {
                date = Some(idx);
            }
            if self.is_value(cell) && !keep(value) {
                value = Some(idx);
            }
        }
        Some(HeaderColumns {
            date: date?,
            value: value?,
        })
    }
}

/// Positions of the date and value columns within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderColumns {
    pub date: usize,
    pub value: usize,
}

fn normalize_cell(cell: &str) -> String {
    cell.trim().to_lowercase()
}
