//! Runtime values.
//!
//! Every subexpression evaluates to one of three shapes: a context-free
//! `Scalar`, a per-group `Number`, or a per-group `Series`. The set is
//! closed, and every operation site matches it exhaustively.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use vigil_ir::ReturnType;
use vigil_tsdb::{Point, Timestamp};

/// A value produced by evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Tagless number, from literals and scalar-only arithmetic.
    Scalar(f64),
    /// Number tied to the group of the result holding it.
    Number(f64),
    /// Time series tied to the group of the result holding it.
    Series(Series),
}

impl Value {
    pub const fn type_name(&self) -> &'static str {
        self.return_type().as_str()
    }

    pub const fn return_type(&self) -> ReturnType {
        match self {
            Value::Scalar(_) => ReturnType::Scalar,
            Value::Number(_) => ReturnType::Number,
            Value::Series(_) => ReturnType::Series,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(n) | Value::Number(n) => Float(*n).serialize(serializer),
            Value::Series(series) => series.serialize(serializer),
        }
    }
}

/// Samples ordered by timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series(BTreeMap<Timestamp, Point>);

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timestamp: Timestamp, point: Point) -> Option<Point> {
        self.0.insert(timestamp, point)
    }

    pub fn get(&self, timestamp: Timestamp) -> Option<Point> {
        self.0.get(&timestamp).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, Point)> + '_ {
        self.0.iter().map(|(t, p)| (*t, *p))
    }

    /// Apply `f` to every sample, keeping the timestamps.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Series {
        Series(self.0.iter().map(|(t, p)| (*t, f(*p))).collect())
    }
}

impl FromIterator<(Timestamp, Point)> for Series {
    fn from_iter<I: IntoIterator<Item = (Timestamp, Point)>>(iter: I) -> Self {
        Series(iter.into_iter().collect())
    }
}

impl From<BTreeMap<Timestamp, Point>> for Series {
    fn from(points: BTreeMap<Timestamp, Point>) -> Self {
        Series(points)
    }
}

impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (timestamp, point) in &self.0 {
            map.serialize_entry(&timestamp.to_string(), &Float(*point))?;
        }
        map.end()
    }
}

/// JSON has no non-finite numbers, so NaN and the infinities are written
/// as the strings `"NaN"`, `"+Inf"` and `"-Inf"`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Float(pub f64);

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let n = self.0;
        if n.is_nan() {
            serializer.serialize_str("NaN")
        } else if n == f64::INFINITY {
            serializer.serialize_str("+Inf")
        } else if n == f64::NEG_INFINITY {
            serializer.serialize_str("-Inf")
        } else {
            serializer.serialize_f64(n)
        }
    }
}
