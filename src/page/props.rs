//! Property values.
//!
//! # Responsibilities
//! - Hold page props in insertion order
//! - Defer expensive values until the page is serialized
//! - Flatten record-like and collection-like values into JSON
//!
//! # Design Decisions
//! - `Prop` is a closed sum type; resolution is one recursive match
//! - Lazy producers run at most once, only for props that survive a
//!   partial-reload filter
//! - Values that cannot become JSON are carried to resolution time and
//!   surfaced there as `InertiaError::Serialization`

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::InertiaError;

/// A domain object that flattens to a single key/value mapping.
pub trait Record: Send {
    fn to_map(&self) -> Map<String, Value>;
}

/// Deferred producer for a lazy prop.
pub type Producer = Box<dyn FnOnce() -> Prop + Send>;

/// A single page property.
pub enum Prop {
    /// Plain JSON, passed through unchanged.
    Value(Value),
    /// Evaluated when the page is serialized.
    Lazy(Producer),
    /// Converted with `Record::to_map`.
    Record(Box<dyn Record>),
    /// Converted to an ordered array of record maps.
    Collection(Vec<Box<dyn Record>>),
    /// Nested props, resolved with the same rules.
    Map(Props),
    /// Nested list, resolved with the same rules.
    List(Vec<Prop>),
    /// A value that failed to serialize.
    Unrepresentable(serde_json::Error),
}

impl Prop {
    /// Wrap a deferred producer.
    pub fn lazy<F, P>(f: F) -> Self
    where
        F: FnOnce() -> P + Send + 'static,
        P: Into<Prop>,
    {
        Prop::Lazy(Box::new(move || f().into()))
    }

    /// Serialize any `Serialize` value now.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Prop::Value(v),
            Err(e) => Prop::Unrepresentable(e),
        }
    }

    pub fn record(record: impl Record + 'static) -> Self {
        Prop::Record(Box::new(record))
    }

    pub fn collection<R, I>(records: I) -> Self
    where
        R: Record + 'static,
        I: IntoIterator<Item = R>,
    {
        Prop::Collection(
            records
                .into_iter()
                .map(|r| Box::new(r) as Box<dyn Record>)
                .collect(),
        )
    }

    /// Resolve to plain JSON, running any deferred producers.
    pub fn resolve(self) -> Result<Value, InertiaError> {
        match self {
            Prop::Value(value) => Ok(value),
            Prop::Lazy(produce) => produce().resolve(),
            Prop::Record(record) => Ok(Value::Object(record.to_map())),
            Prop::Collection(records) => Ok(Value::Array(
                records.iter().map(|r| Value::Object(r.to_map())).collect(),
            )),
            Prop::Map(props) => props.resolve().map(Value::Object),
            Prop::List(items) => items
                .into_iter()
                .map(Prop::resolve)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Prop::Unrepresentable(e) => Err(InertiaError::Serialization(e)),
        }
    }
}

impl std::fmt::Debug for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prop::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Prop::Lazy(_) => f.write_str("Lazy(..)"),
            Prop::Record(_) => f.write_str("Record(..)"),
            Prop::Collection(rs) => write!(f, "Collection(len={})", rs.len()),
            Prop::Map(props) => f.debug_tuple("Map").field(props).finish(),
            Prop::List(items) => f.debug_tuple("List").field(items).finish(),
            Prop::Unrepresentable(e) => f.debug_tuple("Unrepresentable").field(e).finish(),
        }
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Value(value)
    }
}

impl From<Props> for Prop {
    fn from(props: Props) -> Self {
        Prop::Map(props)
    }
}

impl From<Vec<Prop>> for Prop {
    fn from(items: Vec<Prop>) -> Self {
        Prop::List(items)
    }
}

macro_rules! prop_from_json {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Prop {
                fn from(value: $t) -> Self {
                    Prop::Value(Value::from(value))
                }
            }
        )*
    };
}

prop_from_json!(&str, String, bool, i32, i64, u32, u64, f64);

/// Insertion-ordered property map.
#[derive(Debug, Default)]
pub struct Props {
    entries: Vec<(String, Prop)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, prop: impl Into<Prop>) {
        let key = key.into();
        let prop = prop.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = prop,
            None => self.entries.push((key, prop)),
        }
    }

    /// Right-biased merge: keys in `other` win.
    pub fn merge(&mut self, other: Props) {
        for (key, prop) in other.entries {
            self.insert(key, prop);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the listed keys; unknown keys are ignored.
    pub fn only(self, keys: &[String]) -> Props {
        Props {
            entries: self
                .entries
                .into_iter()
                .filter(|(k, _)| keys.iter().any(|wanted| wanted == k))
                .collect(),
        }
    }

    /// Resolve every prop in insertion order.
    pub fn resolve(self) -> Result<Map<String, Value>, InertiaError> {
        let mut resolved = Map::new();
        for (key, prop) in self.entries {
            let value = prop.resolve()?;
            resolved.insert(key, value);
        }
        Ok(resolved)
    }
}

impl<K: Into<String>, P: Into<Prop>> FromIterator<(K, P)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, prop) in iter {
            props.insert(key, prop);
        }
        props
    }
}

impl<K: Into<String>, P: Into<Prop>> Extend<(K, P)> for Props {
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (key, prop) in iter {
            self.insert(key, prop);
        }
    }
}
