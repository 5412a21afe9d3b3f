//! Structured scope produced by the two model passes.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label of the free-text summary field.
pub const DESCRIPTION: &str = "Description";
/// Label of the field whose list items arrive already numbered.
pub const SUB_TASKS: &str = "Sub-Tasks";

/// Canonical scope fields, in display order.
pub const SCOPE_FIELDS: [&str; 10] = [
    DESCRIPTION,
    "Acceptance Criteria",
    SUB_TASKS,
    "Assumptions",
    "Dependencies",
    "Resources Needed",
    "Estimated Effort",
    "Potential Risks/Challenges",
    "Points for the Task",
    "Recommended Number of Engineers",
];

/// Raw text returned by the generation pass, expected (not required) to be JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawScope(String);

impl RawScope {
    /// Wraps generated text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text as returned by the service.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text parses as a JSON document.
    #[must_use]
    pub fn is_json(&self) -> bool {
        serde_json::from_str::<Value>(&self.0).is_ok()
    }
}

/// Value of one scope field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScopeValue {
    /// A single piece of text.
    Text(String),
    /// A sequence of items.
    List(Vec<String>),
}

impl ScopeValue {
    /// Converts whatever JSON the model produced into a field value.
    ///
    /// Scalars become text, arrays become lists of text, objects are kept as
    /// compact JSON text. `null` yields `None`.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                Some(Self::List(items.into_iter().filter_map(json_to_text).collect()))
            }
            other => json_to_text(other).map(Self::Text),
        }
    }
}

fn json_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl<'de> Deserialize<'de> for ScopeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).ok_or_else(|| de::Error::custom("scope value is null"))
    }
}

/// Ordered scope fields.
///
/// Canonical fields (see [`SCOPE_FIELDS`]) come first in canonical order;
/// any other field follows in the order the model emitted it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeDetails {
    fields: Vec<(String, ScopeValue)>,
}

impl ScopeDetails {
    /// Sets a field, replacing an existing value with the same label.
    pub fn insert(&mut self, label: impl Into<String>, value: ScopeValue) {
        let label = label.into();
        if let Some(slot) = self.fields.iter_mut().find(|(l, _)| *l == label) {
            slot.1 = value;
        } else {
            self.fields.push((label, value));
        }
        self.fields.sort_by_key(|(label, _)| field_rank(label));
    }

    /// Looks up a field by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&ScopeValue> {
        self.fields.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    /// Fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopeValue)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn field_rank(label: &str) -> usize {
    SCOPE_FIELDS.iter().position(|f| *f == label).unwrap_or(SCOPE_FIELDS.len())
}

impl<L: Into<String>> FromIterator<(L, ScopeValue)> for ScopeDetails {
    fn from_iter<I: IntoIterator<Item = (L, ScopeValue)>>(iter: I) -> Self {
        let mut details = Self::default();
        for (label, value) in iter {
            details.insert(label, value);
        }
        details
    }
}

impl Serialize for ScopeDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct ScopeDetailsVisitor;

impl<'de> Visitor<'de> for ScopeDetailsVisitor {
    type Value = ScopeDetails;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of scope sections or a single message string")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut details = ScopeDetails::default();
        while let Some((label, value)) = access.next_entry::<String, Value>()? {
            if let Some(value) = ScopeValue::from_json(value) {
                details.insert(label, value);
            }
        }
        Ok(details)
    }

    // The model answers nonsensical titles with a bare error marker.
    fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
        Ok(std::iter::once((DESCRIPTION, ScopeValue::Text(text.to_string()))).collect())
    }
}

impl<'de> Deserialize<'de> for ScopeDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScopeDetailsVisitor)
    }
}

/// The model's verdict on a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeQuality {
    /// Detailed and coherent enough to act on.
    WellScoped,
    /// Vague, incoherent, or not an engineering task.
    PoorlyScoped,
}

impl ScopeQuality {
    /// Canonical label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WellScoped => "Well-scoped",
            Self::PoorlyScoped => "Poorly-scoped",
        }
    }
}

impl fmt::Display for ScopeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeQuality {
    type Err = String;

    /// Accepts the canonical labels regardless of case, surrounding
    /// whitespace, a trailing period, or a space instead of the hyphen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_end_matches('.').trim().to_ascii_lowercase().replace(' ', "-");
        match normalized.as_str() {
            "well-scoped" => Ok(Self::WellScoped),
            "poorly-scoped" => Ok(Self::PoorlyScoped),
            _ => Err(format!("unknown scope quality {s:?}")),
        }
    }
}

impl Serialize for ScopeQuality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScopeQuality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// A task with its scope and the model's verdict on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedTask {
    /// Ticket summary.
    #[serde(rename = "Task Title", alias = "task_title", default)]
    pub title: String,
    /// Structured breakdown.
    #[serde(rename = "Detailed Scope", alias = "detailed_scope")]
    pub scope: ScopeDetails,
    /// Verdict from the evaluation pass.
    #[serde(rename = "Scope Quality", alias = "scope_quality")]
    pub quality: ScopeQuality,
}

impl ScopedTask {
    /// Whether the task may be filed.
    #[must_use]
    pub fn is_well_scoped(&self) -> bool {
        self.quality == ScopeQuality::WellScoped
    }
}
