//! Dynamically-typed provider state
//!
//! Cloud providers report resource attributes as a tree whose shape varies
//! by resource type and API version. [`StateValue`] models that tree as a
//! closed set of variants with explicit capability queries, so callers never
//! have to guess at the shape of a value before reading it.

use std::collections::BTreeMap;
use std::fmt;

/// Kind of a single state value, without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Unknown,
    Bool,
    Number,
    String,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Unknown => "unknown",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// One node of a resource's provider-reported state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StateValue {
    /// Explicitly empty value
    #[default]
    Null,
    /// Placeholder for a value not known yet (e.g., computed after apply)
    Unknown,
    Bool(bool),
    Number(f64),
    String(String),
    /// Ordered list of values
    List(Vec<StateValue>),
    /// String-keyed attributes
    Map(BTreeMap<String, StateValue>),
}

impl StateValue {
    /// Build a map value from key/value pairs
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, StateValue)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a map of string values, the shape tags normally have
    pub fn string_map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Self::String(v.into())))
                .collect(),
        )
    }

    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Unknown => ValueKind::Unknown,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Whether this value can be decomposed into named attributes
    ///
    /// Only a known map qualifies. Lists have no attribute names, and
    /// scalars, null and unknown values have no elements at all.
    pub fn can_iterate_elements(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// View this value as its attribute map, if it is one
    pub fn as_value_map(&self) -> Option<&BTreeMap<String, StateValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a single attribute by name
    pub fn attribute(&self, name: &str) -> Option<&StateValue> {
        self.as_value_map().and_then(|entries| entries.get(name))
    }

    /// View this value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Common kind of a collection's elements
    ///
    /// Returns `None` for scalars, null and unknown values, and also for
    /// collections that are empty or whose elements differ in kind.
    pub fn element_kind(&self) -> Option<ValueKind> {
        let mut kinds: Box<dyn Iterator<Item = ValueKind> + '_> = match self {
            Self::List(items) => Box::new(items.iter().map(StateValue::kind)),
            Self::Map(entries) => Box::new(entries.values().map(StateValue::kind)),
            _ => return None,
        };
        let first = kinds.next()?;
        kinds.all(|k| k == first).then_some(first)
    }

    /// Coerce a map whose every element is a string into an owned mapping
    ///
    /// No other representation is accepted: numbers, nulls and nested
    /// values inside the map make the whole coercion fail.
    pub fn as_string_map(&self) -> Option<BTreeMap<String, String>> {
        self.as_value_map()?
            .iter()
            .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect()
    }

    /// Friendly type name, e.g. `"map of string"` or `"list of dynamic"`
    pub fn type_name(&self) -> String {
        match self {
            Self::List(items) => format!("list of {}", common_type_name(items.iter())),
            Self::Map(entries) => format!("map of {}", common_type_name(entries.values())),
            other => other.kind().to_string(),
        }
    }
}

fn common_type_name<'a>(mut values: impl Iterator<Item = &'a StateValue>) -> String {
    let Some(first) = values.next().map(StateValue::type_name) else {
        return "dynamic".to_string();
    };
    if values.all(|v| v.type_name() == first) {
        first
    } else {
        "dynamic".to_string()
    }
}

impl From<serde_json::Value> for StateValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
