//! Ordered control settings recovered from a guvcview export.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// One canonical control and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSetting {
    /// Canonical V4L2 control name (e.g. `brightness`)
    pub control: String,
    /// Value as passed to `v4l2-ctl -c` (integer text, booleans as 0/1)
    pub value: String,
}

/// Control name → value, keyed by control and kept in insertion order.
///
/// Inserting an existing control replaces its value but keeps its original
/// position, so the generated script reads in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSettings {
    entries: Vec<ControlSetting>,
}

impl ControlSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `control` to `value`; last write wins.
    pub fn insert(&mut self, control: impl Into<String>, value: impl Into<String>) {
        let control = control.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.control == control) {
            Some(existing) => existing.value = value,
            None => self.entries.push(ControlSetting { control, value }),
        }
    }

    pub fn get(&self, control: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.control == control)
            .map(|e| e.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ControlSetting> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ControlSettings {
    type Item = &'a ControlSetting;
    type IntoIter = std::slice::Iter<'a, ControlSetting>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ControlSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Self::new();
        for (control, value) in iter {
            settings.insert(control, value);
        }
        settings
    }
}

impl Serialize for ControlSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.control, &entry.value)?;
        }
        map.end()
    }
}
