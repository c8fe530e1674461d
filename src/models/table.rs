/// A delimited file exactly as loaded: original headers and untyped cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, compared case-insensitively
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_ignores_case() {
        let table = RawTable::new(
            vec!["Units".to_string(), "Waste_Quantity".to_string()],
            vec![vec!["Tons".to_string(), "1".to_string()]],
        );

        assert_eq!(table.column_index("units"), Some(0));
        assert_eq!(table.column_index("WASTE_QUANTITY"), Some(1));
        assert_eq!(table.column_index("period_id"), None);
        assert_eq!(table.len(), 1);
    }
}
