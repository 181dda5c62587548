use crate::statics;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Settings of one category, in first-seen order.
pub type CategoryMap = IndexMap<String, String>;

/// A parsed profile: category -> key -> value.
///
/// Values are always kept as the literal source text so numbers are never reformatted.
/// Categories and keys keep first-seen order; a later duplicate only replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    categories: IndexMap<String, CategoryMap>,
}

/// Which part of the document a view covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// Every key across all categories, flattened.
    #[default]
    All,
    Named(String),
}

impl CategorySelection {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => statics::EN_CATEGORY_ALL,
            Self::Named(name) => name,
        }
    }
}

/// One row of a category view or search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingEntry {
    /// Category that owns the displayed value (edits go here).
    pub category: String,
    pub key: String,
    pub value: String,
}

impl SettingEntry {
    fn new(category: &str, key: &str, value: &str) -> Self {
        Self {
            category: category.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Dotted `Category.Key` form as written in the profile.
    pub fn full_key(&self) -> String {
        format!("{}.{}", self.category, self.key)
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.key.to_lowercase().contains(query_lower)
            || self.value.to_lowercase().contains(query_lower)
    }
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        crate::parser::parse(text)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of settings across categories (duplicates across categories counted).
    pub fn len(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category(&self, name: &str) -> Option<&CategoryMap> {
        self.categories.get(name)
    }

    pub fn get(&self, category: &str, key: &str) -> Option<&str> {
        self.categories.get(category)?.get(key).map(String::as_str)
    }

    /// Insert or overwrite a setting, creating the category on first use.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), value.into())
    }

    /// Update an existing setting. Returns the previous value, or `None` if the
    /// setting does not exist (nothing is inserted in that case).
    pub fn set_value(
        &mut self,
        category: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Option<String> {
        let slot = self.categories.get_mut(category)?.get_mut(key)?;
        Some(std::mem::replace(slot, value.into()))
    }

    /// Every setting flattened across categories. A key name that recurs in several
    /// categories appears once, at its first position, with the last value seen.
    pub fn all_entries(&self) -> Vec<SettingEntry> {
        let mut flat: IndexMap<&str, SettingEntry> = IndexMap::new();
        for (category, settings) in &self.categories {
            for (key, value) in settings {
                flat.insert(key, SettingEntry::new(category, key, value));
            }
        }
        flat.into_values().collect()
    }

    pub fn entries(&self, selection: &CategorySelection) -> Vec<SettingEntry> {
        match selection {
            CategorySelection::All => self.all_entries(),
            CategorySelection::Named(name) => self
                .categories
                .get(name)
                .map(|settings| {
                    settings
                        .iter()
                        .map(|(key, value)| SettingEntry::new(name, key, value))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Entries of `selection` whose key or value contains `query`, case-insensitively.
    /// An empty query returns the whole view.
    pub fn filter(&self, selection: &CategorySelection, query: &str) -> Vec<SettingEntry> {
        let entries = self.entries(selection);
        if query.is_empty() {
            return entries;
        }
        let query_lower = query.to_lowercase();
        entries
            .into_iter()
            .filter(|entry| entry.matches(&query_lower))
            .collect()
    }

    /// Export as `Category.Key "Value"` lines joined by `\n`.
    pub fn serialize(&self) -> String {
        self.serialize_with_newline(statics::NL_LF)
    }

    pub fn serialize_with_newline(&self, newline: &str) -> String {
        let mut out = String::new();
        for (category, settings) in &self.categories {
            for (key, value) in settings {
                if !out.is_empty() {
                    out.push_str(newline);
                }
                out.push_str(category);
                out.push('.');
                out.push_str(key);
                out.push_str(" \"");
                out.push_str(value);
                out.push('"');
            }
        }
        out
    }
}
