//! Attribute values and attribute bags attached to nodes and edges.

use std::{
    collections::{btree_map, BTreeMap},
    fmt,
};

/// Attribute key under which edge weights are stored.
pub const WEIGHT: &str = "weight";

/// A value of a single attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Equality used for attribute matching.
    ///
    /// Unlike `==`, integers and floats compare by their numeric value, so a
    /// weight stored as `5` matches a query for `5.0`.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(int), Value::Float(float)) | (Value::Float(float), Value::Int(int)) => {
                int_equals_float(*int, *float)
            }
            (lhs, rhs) => lhs == rhs,
        }
    }
}

// 2^63, the smallest float above `i64::MAX`.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

// Equal only if the float is a whole number within the `i64` range with the
// same value.
fn int_equals_float(int: i64, float: f64) -> bool {
    float.fract() == 0.0
        && float >= -I64_UPPER_BOUND
        && float < I64_UPPER_BOUND
        && float as i64 == int
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(int) => write!(f, "{int}"),
            Value::Float(float) => write!(f, "{float}"),
            Value::Bool(bool) => write!(f, "{bool}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_value {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_value!(Int: i64, i32, i16, i8, u32, u16, u8);
impl_from_value!(Float: f64, f32);
impl_from_value!(Bool: bool);
impl_from_value!(Str: String, &str);

/// Attribute bag: a mapping from attribute key to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(BTreeMap<String, Value>);

pub(crate) static EMPTY_ATTRS: Attrs = Attrs(BTreeMap::new());

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag holding only the `weight` attribute.
    pub fn weighted(weight: impl Into<Value>) -> Self {
        Self::new().with(WEIGHT, weight)
    }

    /// Builder-style insertion, as in `Attrs::new().with("color", "red")`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn weight(&self) -> Option<&Value> {
        self.get(WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Merges `other` into this bag. Existing keys are overwritten, new keys
    /// are added.
    pub fn merge(&mut self, other: Attrs) {
        self.0.extend(other.0);
    }

    /// Returns `true` if every entry of `self` is present in `other` with a
    /// matching value.
    pub fn is_submap_of(&self, other: &Attrs) -> bool {
        self.iter().all(|(key, value)| {
            other
                .get(key)
                .map(|actual| actual.matches(value))
                .unwrap_or(false)
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attrs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Attrs {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Attrs {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
