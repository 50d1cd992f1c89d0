/// The loaded table and its cell, column and row accessors.
pub mod document;

/// Keys used to address cells, columns and rows.
pub mod reference;
