use serde_json::Value;
use tracing::warn;

use super::text::dedupe_preserving_order;

const SKILL_NAME_FIELDS: &[&str] = &["skill_name", "skillName", "name", "skill"];

/// Shapes the PDS skills sub-document is known to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillPayload {
    /// `[{"skill_name": "Excel"}, ...]`
    ObjectList(Vec<String>),
    /// `["Excel", "SQL"]`
    StringList(Vec<String>),
    /// A string holding JSON for one of the list shapes, or a single free-text skill.
    EncodedString(String),
    Unknown,
}

impl SkillPayload {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(raw) => Self::EncodedString(raw.clone()),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                Self::ObjectList(items.iter().filter_map(skill_from_item).collect())
            }
            Value::Array(items) => {
                Self::StringList(items.iter().filter_map(skill_from_item).collect())
            }
            _ => Self::Unknown,
        }
    }

    /// Decodes an `EncodedString` into the shape it carries. Other variants are returned as is.
    ///
    /// Malformed JSON is kept as one skill named after the raw text. An encoded object
    /// contributes its name field, and encoded scalars carry no skills.
    pub fn resolve(self) -> Self {
        let raw = match self {
            Self::EncodedString(raw) => raw,
            other => return other,
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unknown;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(decoded @ Value::Array(_)) => match Self::classify(&decoded) {
                Self::EncodedString(_) => Self::Unknown,
                shape => shape,
            },
            Ok(Value::String(inner)) => Self::StringList(vec![inner]),
            Ok(decoded @ Value::Object(_)) => match skill_from_item(&decoded) {
                Some(name) => Self::StringList(vec![name]),
                None => {
                    warn!("encoded skills object has no name field; ignoring it");
                    Self::Unknown
                }
            },
            Ok(Value::Null | Value::Bool(_) | Value::Number(_)) => Self::Unknown,
            Err(err) => {
                if looks_like_json(trimmed) {
                    warn!(error = %err, "skills payload is not valid JSON; keeping raw text");
                }
                Self::StringList(vec![trimmed.to_string()])
            }
        }
    }

    /// Flat, deduplicated list of non-empty trimmed skill names.
    pub fn into_skills(self) -> Vec<String> {
        match self.resolve() {
            Self::ObjectList(skills) | Self::StringList(skills) => dedupe_preserving_order(skills),
            Self::EncodedString(_) | Self::Unknown => Vec::new(),
        }
    }
}

fn skill_from_item(item: &Value) -> Option<String> {
    match item {
        Value::String(name) => Some(name.clone()),
        Value::Object(fields) => SKILL_NAME_FIELDS
            .iter()
            .filter_map(|field| fields.get(*field))
            .find_map(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn looks_like_json(value: &str) -> bool {
    value.starts_with('[') || value.starts_with('{') || value.starts_with('"')
}
