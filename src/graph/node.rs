//! Meta-informatie die per solve aan een component wordt meegegeven.

use std::collections::BTreeMap;

/// Scalair meta-item, bv. een tolerantie uit de solve-instellingen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetaValue {
    Number(f64),
    Integer(i64),
    Boolean(bool),
}

impl MetaValue {
    /// Numerieke waarde; integers worden als f64 teruggegeven.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(v) => Some(v),
            Self::Integer(v) => Some(v as f64),
            Self::Boolean(_) => None,
        }
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

pub type MetaMap = BTreeMap<String, MetaValue>;

/// Opzoeken van meta-sleutels zonder hoofdlettergevoeligheid.
pub trait MetaLookupExt {
    fn get_normalized(&self, key: &str) -> Option<&MetaValue>;
}

impl MetaLookupExt for MetaMap {
    fn get_normalized(&self, key: &str) -> Option<&MetaValue> {
        self.get(key).or_else(|| {
            let lower = key.to_ascii_lowercase();
            (lower != key).then(|| self.get(&lower)).flatten()
        })
    }
}
