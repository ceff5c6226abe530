// File: crates/bar-core/src/dataview.rs
// Summary: Host-supplied data model: table rows of loosely typed cells plus persisted display objects.

use std::collections::BTreeMap;

use crate::geometry::Viewport;

/// One table cell as handed over by the host; no type is guaranteed.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s.to_string()) }
}

impl From<String> for Cell {
    fn from(s: String) -> Self { Cell::Text(s) }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Number(v) }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self { Cell::Bool(v) }
}

pub type Row = Vec<Cell>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
}

/// Value of a persisted display property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Persisted display objects keyed by object name, then property name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub objects: BTreeMap<String, BTreeMap<String, PropertyValue>>,
}

/// Structured representation of the bound data for one render cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataView {
    pub metadata: Metadata,
    pub table: Table,
}

impl DataView {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { metadata: Metadata::default(), table: Table { rows } }
    }

    /// Convenience for `[["USA", "10"], ...]`-style text tables.
    pub fn from_text_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|s| Cell::Text(s.into())).collect())
            .collect();
        Self::from_rows(rows)
    }

    pub fn with_object_property(
        mut self,
        object: impl Into<String>,
        property: impl Into<String>,
        value: PropertyValue,
    ) -> Self {
        self.metadata
            .objects
            .entry(object.into())
            .or_default()
            .insert(property.into(), value);
        self
    }
}

/// Everything the host passes on a data or resize event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateOptions {
    pub viewport: Viewport,
    /// The first entry is the bound view; empty means no data is bound.
    pub data_views: Vec<DataView>,
}

impl UpdateOptions {
    pub fn new(viewport: Viewport, data_view: DataView) -> Self {
        Self { viewport, data_views: vec![data_view] }
    }

    pub fn without_data(viewport: Viewport) -> Self {
        Self { viewport, data_views: Vec::new() }
    }

    pub fn data_view(&self) -> Option<&DataView> {
        self.data_views.first()
    }
}
