//! Schema: field names mapped to validators

use crate::item::YayItem;

/// Ordered mapping of field name to [`YayItem`].
///
/// Fields are validated in declaration order. Declaring a field twice
/// replaces the earlier validator in place.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, YayItem)>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, item: YayItem) -> Self {
        self.insert(name, item);
        self
    }

    /// Declare a field in place
    pub fn insert(&mut self, name: impl Into<String>, item: YayItem) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = item;
        } else {
            self.fields.push((name, item));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&YayItem> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, item)| item)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &YayItem)> {
        self.fields.iter().map(|(name, item)| (name.as_str(), item))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, YayItem)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, YayItem)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, item) in iter {
            schema.insert(name, item);
        }
        schema
    }
}

impl<K: Into<String>, const N: usize> From<[(K, YayItem); N]> for Schema {
    fn from(fields: [(K, YayItem); N]) -> Self {
        fields.into_iter().collect()
    }
}
