//! Reconciles the friendly and legacy parameter vocabularies into one
//! filter mapping.
//!
//! Every field follows the same precedence: the friendly value wins when it
//! is set, the legacy value is used otherwise, and the field is left out of
//! the mapping when neither is set. The provider treats an absent field and
//! an empty one differently, so unset fields are never forwarded as `""`.

use crate::types::{FilterMapping, FilterValue};

/// One (friendly, legacy, target) triple
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSource {
    pub target: &'static str,
    pub friendly: FilterValue,
    pub legacy: FilterValue,
}

impl FieldSource {
    pub fn new(
        target: &'static str,
        friendly: impl Into<FilterValue>,
        legacy: impl Into<FilterValue>,
    ) -> Self {
        Self {
            target,
            friendly: friendly.into(),
            legacy: legacy.into(),
        }
    }

    /// Apply the precedence rule
    pub fn resolve(&self) -> Option<&FilterValue> {
        resolve(&self.friendly, &self.legacy)
    }
}

/// Friendly value if set, otherwise legacy value if set
pub fn resolve<'a>(friendly: &'a FilterValue, legacy: &'a FilterValue) -> Option<&'a FilterValue> {
    if !friendly.is_unset() {
        Some(friendly)
    } else if !legacy.is_unset() {
        Some(legacy)
    } else {
        None
    }
}

/// Resolve two string parameters to the value that would be forwarded
pub fn resolve_text<'a>(friendly: &'a str, legacy: &'a str) -> &'a str {
    if !friendly.is_empty() {
        friendly
    } else {
        legacy
    }
}

/// Builds a filter mapping from ordered field sources
#[derive(Debug, Default)]
pub struct FilterBuilder {
    mapping: FilterMapping,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sources(sources: &[FieldSource]) -> Self {
        sources.iter().fold(Self::new(), |builder, source| {
            builder.field(source.target, source.friendly.clone(), source.legacy.clone())
        })
    }

    /// Friendly/legacy pair for `target`
    pub fn field(
        mut self,
        target: &str,
        friendly: impl Into<FilterValue>,
        legacy: impl Into<FilterValue>,
    ) -> Self {
        let friendly = friendly.into();
        let legacy = legacy.into();
        if let Some(value) = resolve(&friendly, &legacy) {
            self.mapping.insert(target, value.clone());
        }
        self
    }

    /// Single-source field, dropped when unset
    pub fn value(mut self, target: &str, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        if !value.is_unset() {
            self.mapping.insert(target, value);
        }
        self
    }

    /// Field forwarded even when it holds zero or an empty string
    pub fn always(mut self, target: &str, value: impl Into<FilterValue>) -> Self {
        self.mapping.insert(target, value.into());
        self
    }

    /// Rewrite a text field already in the mapping
    pub fn map_text(mut self, target: &str, f: impl FnOnce(&str) -> String) -> Self {
        if let Some(FilterValue::Text(text)) = self.mapping.get(target) {
            let mapped = f(text);
            self.mapping.insert(target, FilterValue::Text(mapped));
        }
        self
    }

    pub fn build(self) -> FilterMapping {
        self.mapping
    }
}
