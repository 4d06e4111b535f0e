use std::fmt;

use ustr::Ustr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub column: Ustr,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column: Ustr::from(column),
            direction,
        }
    }

    /// Parses `column` or `-column` (descending).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (column, direction) = match raw.strip_prefix('-') {
            Some(column) => (column.trim(), SortDirection::Descending),
            None => (raw, SortDirection::Ascending),
        };
        (!column.is_empty()).then(|| Self::new(column, direction))
    }
}

/// Ordered sort keys. An empty descriptor keeps fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortDescriptor {
    keys: Vec<SortKey>,
}

impl SortDescriptor {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(column: &str, direction: SortDirection) -> Self {
        Self {
            keys: vec![SortKey::new(column, direction)],
        }
    }

    pub fn then_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.keys.push(SortKey::new(column, direction));
        self
    }

    pub fn primary(&self) -> Option<&SortKey> {
        self.keys.first()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Header click on `column`.
    ///
    /// The same column cycles ascending, descending, unsorted. Any other
    /// column replaces the current keys and starts ascending.
    pub fn toggle(&mut self, column: &str) {
        let next = match self.primary() {
            Some(key) if key.column.as_str() == column => match key.direction {
                SortDirection::Ascending => Some(SortDirection::Descending),
                SortDirection::Descending => None,
            },
            _ => Some(SortDirection::Ascending),
        };

        self.keys = next
            .map(|direction| vec![SortKey::new(column, direction)])
            .unwrap_or_default();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_one_column() {
        let mut sort = SortDescriptor::none();

        sort.toggle("name");
        assert_eq!(sort, SortDescriptor::by("name", SortDirection::Ascending));
        sort.toggle("name");
        assert_eq!(sort, SortDescriptor::by("name", SortDirection::Descending));
        sort.toggle("name");
        assert!(sort.is_empty());
    }

    #[test]
    fn toggle_other_column_starts_ascending() {
        let mut sort = SortDescriptor::by("name", SortDirection::Descending);
        sort.toggle("date");
        assert_eq!(sort, SortDescriptor::by("date", SortDirection::Ascending));
    }

    #[test]
    fn parse_sort_keys() {
        assert_eq!(
            SortKey::parse("-date"),
            Some(SortKey::new("date", SortDirection::Descending))
        );
        assert_eq!(
            SortKey::parse("name"),
            Some(SortKey::new("name", SortDirection::Ascending))
        );
        assert_eq!(SortKey::parse("-"), None);
        assert_eq!(SortKey::parse(""), None);
    }
}
