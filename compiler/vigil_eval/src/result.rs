//! Per-group results and their computation trace.

use crate::value::{Float, Value};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use vigil_tsdb::{replace_tags, TagSet};

/// One step of how a number was derived: the expression text, with tag
/// placeholders filled in from the result's group, and its value.
#[derive(Clone, Debug, PartialEq)]
pub struct Computation {
    pub text: String,
    pub value: f64,
}

impl Serialize for Computation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Computation", 2)?;
        s.serialize_field("Text", &self.text)?;
        s.serialize_field("Value", &Float(self.value))?;
        s.end()
    }
}

pub type Computations = Vec<Computation>;

/// The value of a subexpression for one tag group.
///
/// A scalar result always has an empty group. `computations` only grows.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupResult {
    pub value: Value,
    pub group: TagSet,
    pub computations: Computations,
}

impl GroupResult {
    pub fn new(value: Value, group: TagSet) -> Self {
        GroupResult {
            value,
            group,
            computations: Vec::new(),
        }
    }

    /// Group-free scalar, as produced by a number literal.
    pub fn scalar(n: f64) -> Self {
        Self::new(Value::Scalar(n), TagSet::new())
    }

    /// Append a trace entry, substituting this result's group into `text`.
    pub fn add_computation(&mut self, text: &str, value: f64) {
        self.computations.push(Computation {
            text: replace_tags(text, &self.group),
            value,
        });
    }
}
