//! Opaque handle to the IFC entity a solid was built from.
//!
//! The handle never takes part in geometry; it only identifies elements in
//! log lines and in boundary descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub global_id: String,
    pub ifc_type: String,
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(global_id: impl Into<String>, ifc_type: impl Into<String>) -> Self {
        Self {
            global_id: global_id.into(),
            ifc_type: ifc_type.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `global_id` stripped of non-alphanumeric characters and lowercased.
    pub fn clean_global_id(&self) -> String {
        remove_non_alphanumeric(&self.global_id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.global_id,
            self.ifc_type,
            self.name.as_deref().unwrap_or("None")
        )
    }
}

/// Display adapter for an optional entity, printing `None` when absent.
pub struct MaybeEntity<'a>(pub Option<&'a EntityRef>);

impl fmt::Display for MaybeEntity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(entity) => entity.fmt(f),
            None => f.write_str("None"),
        }
    }
}

/// Keep ASCII letters and digits, lowercased. Used to build model identifiers.
pub fn remove_non_alphanumeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
