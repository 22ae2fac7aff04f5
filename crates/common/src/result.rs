use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::types::Value;

/// One input row handed to the evaluator, addressed by column index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn column(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(Error::ColumnIndexOutOfRange {
            index,
            width: self.values.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn to_json(&self) -> Vec<JsonValue> {
        self.values.iter().map(|v| v.to_json()).collect()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
