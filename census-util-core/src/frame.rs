//! Minimal columnar data frame with categorical columns
//!
//! Only what the census builder needs to repair observation/variable
//! tables before they are handed to an Arrow-based writer: named columns,
//! and categorical columns whose `ordered` flag may have been stored as a
//! numpy-style boolean scalar rather than a native boolean.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

/// Storage of a categorical column's `ordered` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderedFlag {
    /// Native boolean
    Native(bool),
    /// Boolean stored as a one-byte numeric scalar; nonzero means true
    NonNative(u8),
}

impl OrderedFlag {
    /// Truth value regardless of storage
    pub fn value(&self) -> bool {
        match *self {
            OrderedFlag::Native(flag) => flag,
            OrderedFlag::NonNative(raw) => raw != 0,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, OrderedFlag::Native(_))
    }
}

/// Dictionary-encoded column
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalColumn {
    /// Distinct category labels
    pub categories: Vec<String>,
    /// Index into `categories` per row; -1 marks a missing value
    pub codes: Vec<i32>,
    /// Whether category order is meaningful
    pub ordered: OrderedFlag,
}

impl CategoricalColumn {
    pub fn new(categories: Vec<String>, codes: Vec<i32>, ordered: OrderedFlag) -> Self {
        Self {
            categories,
            codes,
            ordered,
        }
    }

    /// Same categories and codes with the given flag
    pub fn with_ordered(&self, ordered: bool) -> Self {
        Self {
            categories: self.categories.clone(),
            codes: self.codes.clone(),
            ordered: OrderedFlag::Native(ordered),
        }
    }

    /// Label at `row`, `None` for missing values
    pub fn label(&self, row: usize) -> Option<&str> {
        let code = usize::try_from(*self.codes.get(row)?).ok()?;
        self.categories.get(code).map(String::as_str)
    }
}

/// Column storage
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Column {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
    Utf8(Vec<String>),
    Categorical(CategoricalColumn),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::Utf8(v) => v.len(),
            Column::Categorical(c) => c.codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_categorical(&self) -> Option<&CategoricalColumn> {
        match self {
            Column::Categorical(c) => Some(c),
            _ => None,
        }
    }
}

/// Ordered collection of named columns
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, replacing any existing column with the same name
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name, column)),
        }
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Rewrite non-native `ordered` flags on categorical columns as native booleans
///
/// The frame is copied on the first column that needs rewriting; if no
/// column does, the input is returned borrowed.
pub fn normalize_ordered_flags(df: &DataFrame) -> Cow<'_, DataFrame> {
    let mut result = Cow::Borrowed(df);

    for (index, (_, column)) in df.columns.iter().enumerate() {
        let Column::Categorical(cat) = column else {
            continue;
        };
        if cat.ordered.is_native() {
            continue;
        }

        let fixed = Column::Categorical(cat.with_ordered(cat.ordered.value()));
        result.to_mut().columns[index].1 = fixed;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn cell_types(ordered: OrderedFlag) -> Column {
        Column::Categorical(CategoricalColumn::new(
            vec!["B cell".to_string(), "T cell".to_string()],
            vec![0, 1, 1, -1],
            ordered,
        ))
    }

    fn obs(ordered: OrderedFlag) -> DataFrame {
        DataFrame::new()
            .with_column("soma_joinid", Column::Int64(vec![0, 1, 2, 3]))
            .with_column("cell_type", cell_types(ordered))
            .with_column("is_primary_data", Column::Bool(vec![true, false, true, true]))
    }

    #[test]
    fn test_native_flags_are_borrowed() {
        let df = obs(OrderedFlag::Native(false));
        let normalized = normalize_ordered_flags(&df);
        assert!(matches!(normalized, Cow::Borrowed(_)));
        assert_eq!(*normalized, df);
    }

    #[test]
    fn test_non_native_flags_are_rewritten() {
        let df = obs(OrderedFlag::NonNative(1))
            .with_column("tissue", Column::Categorical(CategoricalColumn::new(
                vec!["lung".to_string()],
                vec![0, 0, 0, 0],
                OrderedFlag::NonNative(0),
            )));

        let normalized = normalize_ordered_flags(&df);
        assert!(matches!(normalized, Cow::Owned(_)));

        let cell_type = normalized.column("cell_type").unwrap().as_categorical().unwrap();
        assert_eq!(cell_type.ordered, OrderedFlag::Native(true));
        assert_eq!(cell_type.label(1), Some("T cell"));
        assert_eq!(cell_type.label(3), None);

        let tissue = normalized.column("tissue").unwrap().as_categorical().unwrap();
        assert_eq!(tissue.ordered, OrderedFlag::Native(false));

        // Non-categorical columns and the input frame are untouched
        assert_eq!(normalized.column("soma_joinid"), df.column("soma_joinid"));
        assert_eq!(
            df.column("cell_type").unwrap().as_categorical().unwrap().ordered,
            OrderedFlag::NonNative(1)
        );
        assert_eq!(
            normalized.column_names().collect::<Vec<_>>(),
            vec!["soma_joinid", "cell_type", "is_primary_data", "tissue"]
        );
    }

    #[test]
    fn test_with_column_replaces() {
        let df = DataFrame::new()
            .with_column("a", Column::Float64(vec![1.0]))
            .with_column("a", Column::Utf8(vec!["x".to_string()]));
        assert_eq!(df.num_columns(), 1);
        assert_eq!(df.column("a").unwrap().len(), 1);
        assert!(df.column("b").is_none());
    }
}
