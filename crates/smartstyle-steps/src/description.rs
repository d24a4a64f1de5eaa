//! Self-describing step metadata.
//!
//! Hosts use this to discover a step's options and build UI for them.

use serde::{Deserialize, Serialize};
use smartstyle_core::ContentKind;

/// Type of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Free-form text
    Text,
}

/// One configurable option of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Key under which the host supplies the value
    pub id: String,
    /// Display name
    pub name: String,
    /// Help text
    pub description: String,
    /// Value type
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Suggested default, applied by the host
    pub default: String,
}

impl OptionSpec {
    /// Create a text option.
    pub fn text(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            option_type: OptionType::Text,
            default: default.into(),
        }
    }
}

/// Metadata a step exposes to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescription {
    /// Human-readable step name
    pub name: String,
    /// What the step does
    pub description: String,
    /// Unit kinds the step is applied to
    pub available_kinds: Vec<ContentKind>,
    /// Option schema
    pub options: Vec<OptionSpec>,
}

impl StepDescription {
    /// Whether the step applies to units of `kind`.
    pub fn applies_to(&self, kind: ContentKind) -> bool {
        self.available_kinds.contains(&kind)
    }

    /// Look up an option by id.
    pub fn option(&self, id: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.id == id)
    }
}
