use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Open value stored in a [`FormRecord`].
///
/// Serializes untagged, so a record round-trips through JSON/YAML as a plain
/// object and typed resume sections can be read back out of it with serde.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Scalar rendered as text, used when a widget needs a string to edit.
    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v.clone()),
            Self::Number(v) => Some(v.to_string()),
            Self::Bool(v) => Some(v.to_string()),
            Self::None => Some(String::new()),
            Self::List(_) | Self::Object(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

/// The cumulative record a wizard builds: every step's contributed keys.
///
/// Keys keep insertion order. Merging is shallow: a key in the partial
/// replaces the whole value stored under that key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRecord {
    fields: IndexMap<String, Value>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow merge. Returns `false` when every key in `partial` already held
    /// an equal value, so repeated identical reports leave the record untouched.
    pub fn merge(&mut self, partial: &FormRecord) -> bool {
        let mut changed = false;
        for (key, value) in &partial.fields {
            if self.fields.get(key) == Some(value) {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
            changed = true;
        }
        changed
    }

    /// `base` with `overlay` merged on top.
    pub fn layered(base: &FormRecord, overlay: &FormRecord) -> FormRecord {
        let mut out = base.clone();
        out.merge(overlay);
        out
    }

    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(value)?)
    }

    /// Reads the whole record as `T`; keys `T` does not know are ignored.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    /// Reads the value under `key` as `T`. `Ok(None)` when the key is absent or null.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.get(key) {
            None | Some(Value::None) => Ok(None),
            Some(value) => serde_json::from_value(serde_json::to_value(value)?).map(Some),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormRecord
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
