use crate::common::ValueSet;
use crate::common::bit::{self, Mask};
use crate::ports::provided::ConfigError;
use crate::{fn_log, warn_log};
use serde_json::Value;
use std::collections::HashMap;

/// One field declaration as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEntry {
    /// Bare bit, default false
    Bit(Mask),
    /// `(bit, default)`; a missing bit is a configuration error
    Pair(Option<Mask>, Option<bool>),
}

impl From<Mask> for FieldEntry {
    fn from(bit: Mask) -> Self {
        FieldEntry::Bit(bit)
    }
}

impl From<(Mask, bool)> for FieldEntry {
    fn from((bit, default): (Mask, bool)) -> Self {
        FieldEntry::Pair(Some(bit), Some(default))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub bit: Mask,
    pub default: bool,
}

/// Static name -> bit configuration of a bitmask attribute.
///
/// Fields keep declaration order. No two fields should share a set bit;
/// this is not enforced, but decoding and encoding only round-trip when it
/// holds.
///
/// # Examples
///
/// ```
/// use bitmask_fields::{FieldMap, FieldEntry};
///
/// let fields = FieldMap::new([
///     ("spam", FieldEntry::Bit(1 << 0)),
///     ("banned", FieldEntry::from((1 << 1, true))),
///     ("confidant", FieldEntry::Pair(Some(1 << 2), None)),
/// ]).unwrap();
///
/// assert_eq!(fields.bit("banned"), Some(2));
/// assert_eq!(fields.defaults().get("banned"), Some(true));
/// assert_eq!(fields.defaults().get("confidant"), Some(false));
/// assert_eq!(fields.union(), 0b111);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl FieldMap {
    pub fn new<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, FieldEntry)>,
        K: Into<String>,
    {
        fn_log!("FieldMap", "new");

        let mut fields: Vec<Field> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut claimed: Mask = bit::EMPTY;

        for (name, entry) in entries {
            let name: String = name.into();
            if index.contains_key(&name) {
                return Err(ConfigError::DuplicateField(name));
            }

            let (bit, default) = match entry {
                FieldEntry::Bit(bit) => (bit, false),
                FieldEntry::Pair(Some(bit), default) => (bit, default.unwrap_or(false)),
                FieldEntry::Pair(None, _) => return Err(ConfigError::MissingBit(name)),
            };
            if bit == 0 {
                return Err(ConfigError::InvalidBit(name));
            }

            if claimed & bit != 0 {
                warn_log!(
                    "FieldMap",
                    "new",
                    format!("'{}' shares bits {:#b} with another field", name, claimed & bit)
                );
            }
            claimed |= bit;

            index.insert(name.clone(), fields.len());
            fields.push(Field { name, bit, default });
        }

        if fields.is_empty() {
            return Err(ConfigError::MissingFields);
        }

        Ok(Self { fields, index })
    }

    /// Builds a field map from a JSON mapping.
    ///
    /// Each value is a bare integer, or an array `[bit]` / `[bit, default]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitmask_fields::FieldMap;
    /// use serde_json::json;
    ///
    /// let fields = FieldMap::from_value(&json!({
    ///     "banOption": [1, true],
    ///     "adminOption": [2, false],
    ///     "isConfidantOption": [4],
    ///     "emailNotVerifyOption": 8,
    /// })).unwrap();
    ///
    /// assert_eq!(fields.names().collect::<Vec<_>>(),
    ///     vec!["banOption", "adminOption", "isConfidantOption", "emailNotVerifyOption"]);
    /// assert_eq!(fields.defaults().get("banOption"), Some(true));
    /// ```
    pub fn from_value(config: &Value) -> Result<Self, ConfigError> {
        let map = match config {
            Value::Null => return Err(ConfigError::MissingFields),
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "fields must be a mapping, got {}",
                    other
                )));
            }
        };

        let mut entries: Vec<(String, FieldEntry)> = Vec::with_capacity(map.len());
        for (name, value) in map {
            entries.push((name.clone(), Self::parse_entry(name, value)?));
        }

        Self::new(entries)
    }

    /// Builds a field map from YAML.
    ///
    /// ```yaml
    /// spam: 1
    /// banned: [2, true]
    /// confidant: [4]
    /// ```
    #[cfg(feature = "builder")]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let root: serde_yaml_ng::Value = serde_yaml_ng::from_str(yaml)
            .map_err(|e| ConfigError::ParseError(format!("YAML parse error: {}", e)))?;
        Self::from_value(&yaml_to_json(&root))
    }

    fn parse_entry(name: &str, value: &Value) -> Result<FieldEntry, ConfigError> {
        match value {
            Value::Array(items) => {
                let bit = match items.first() {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(Self::parse_bit(name, v)?),
                };
                let default = match items.get(1) {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(bit::truthy(v)),
                };
                Ok(FieldEntry::Pair(bit, default))
            }
            other => Ok(FieldEntry::Bit(Self::parse_bit(name, other)?)),
        }
    }

    fn parse_bit(name: &str, value: &Value) -> Result<Mask, ConfigError> {
        value
            .as_u64()
            .ok_or_else(|| ConfigError::InvalidBit(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn bit(&self, name: &str) -> Option<Mask> {
        self.get(name).map(|f| f.bit)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Name -> bit, in declaration order
    pub fn bits(&self) -> impl Iterator<Item = (&str, Mask)> {
        self.fields.iter().map(|f| (f.name.as_str(), f.bit))
    }

    /// Name -> default; the values a record shows before anything is loaded
    pub fn defaults(&self) -> ValueSet {
        self.fields.iter().map(|f| (f.name.as_str(), f.default)).collect()
    }

    /// Every bit owned by some field
    pub fn union(&self) -> Mask {
        self.fields.iter().fold(bit::EMPTY, |acc, f| acc | f.bit)
    }

    /// OR of the bits of `names`; fails on the first undeclared name.
    pub fn allowed_mask<S: AsRef<str>>(&self, names: &[S]) -> Result<Mask, ConfigError> {
        names.iter().try_fold(bit::EMPTY, |acc, name| {
            let name = name.as_ref();
            self.bit(name)
                .map(|b| acc | b)
                .ok_or_else(|| ConfigError::UnknownField(name.to_string()))
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(feature = "builder")]
fn yaml_to_json(yaml: &serde_yaml_ng::Value) -> Value {
    match yaml {
        serde_yaml_ng::Value::Null => Value::Null,
        serde_yaml_ng::Value::Bool(b) => Value::Bool(*b),
        serde_yaml_ng::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::Number(serde_json::Number::from(u))
            } else if let Some(i) = n.as_i64() {
                Value::Number(serde_json::Number::from(i))
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml_ng::Value::String(s) => Value::String(s.clone()),
        serde_yaml_ng::Value::Sequence(seq) => {
            Value::Array(seq.iter().map(yaml_to_json).collect())
        }
        serde_yaml_ng::Value::Mapping(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml_ng::Value::String(s) => s.clone(),
                    serde_yaml_ng::Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                obj.insert(key, yaml_to_json(v));
            }
            Value::Object(obj)
        }
        serde_yaml_ng::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
