/// A `(column, row)` position in the data area of a [`Document`](super::document::Document).
///
/// Both indices are zero-based and skip the header row and the label column
/// when those are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: usize,
    pub row: usize,
}

impl CellRef {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for CellRef {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

/// A column addressed either by position or by header name.
///
/// ```
/// use csvdoc::core::reference::ColumnRef;
///
/// assert_eq!(ColumnRef::from(2usize), ColumnRef::Index(2));
/// assert_eq!(ColumnRef::from("Close"), ColumnRef::Name("Close".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

/// A row addressed either by position or by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowRef {
    Index(usize),
    Name(String),
}

macro_rules! impl_ref_conversions {
    ($ty:ident) => {
        impl From<usize> for $ty {
            fn from(index: usize) -> Self {
                $ty::Index(index)
            }
        }

        impl From<&str> for $ty {
            fn from(name: &str) -> Self {
                $ty::Name(name.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(name: String) -> Self {
                $ty::Name(name)
            }
        }

        impl From<&String> for $ty {
            fn from(name: &String) -> Self {
                $ty::Name(name.clone())
            }
        }
    };
}

impl_ref_conversions!(ColumnRef);
impl_ref_conversions!(RowRef);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_ref_from_tuple() {
        assert_eq!(CellRef::from((1usize, 3usize)), CellRef::new(1, 3));
    }
}
