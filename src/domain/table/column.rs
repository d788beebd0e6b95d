//! Column configuration with render strategies.

use std::fmt;
use std::sync::Arc;

use crate::domain::common::record::{display_value, Record};

/// Cell renderer: a pure function of the record, passed in as a value.
pub type RenderFn = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// One table column. A column without a `render` strategy shows the raw
/// field value.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub render: Option<RenderFn>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Cell text for one record: the render strategy when present, else the
    /// raw field with the missing-value placeholder.
    pub fn cell(&self, record: &Record) -> String {
        match &self.render {
            Some(render) => render(record),
            None => display_value(record.get(&self.key)),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
