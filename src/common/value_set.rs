/// Ordered name -> boolean view of a mask.
///
/// Entries keep insertion order (the field declaration order when decoded).
/// Equality ignores order.
///
/// # Examples
///
/// ```
/// use bitmask_fields::common::ValueSet;
///
/// let mut values: ValueSet = [("spam", false), ("deleted", true)].into_iter().collect();
/// assert_eq!(values.get("deleted"), Some(true));
/// assert_eq!(values.get("unknown"), None);
///
/// values.insert("spam", true);
/// assert_eq!(values.get("spam"), Some(true));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValueSet {
    entries: Vec<(String, bool)>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Sets `name` to `value`, appending it when absent.
    /// Returns the previous value.
    pub fn insert(&mut self, name: &str, value: bool) -> Option<bool> {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.entries.push((name.to_string(), value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for ValueSet {}

impl<K: Into<String>> FromIterator<(K, bool)> for ValueSet {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for (name, value) in iter {
            let name: String = name.into();
            set.insert(&name, value);
        }
        set
    }
}
