//! Step option configuration.
//!
//! This module contains the `StyleOptions` struct which holds the two
//! user-supplied values the smart style step needs, and the
//! `ResolvedStyle` produced once they pass validation.

use serde::{Deserialize, Serialize};
use smartstyle_core::{OptionValues, Result, SmartStyleError};

/// Option id for the line marker.
pub const MARKER_OPTION: &str = "marker";

/// Option id for the style name.
pub const STYLE_NAME_OPTION: &str = "styleName";

/// Step options as supplied by the user.
///
/// Both values are free-form text. Nothing here enforces defaults;
/// the embedded default config is where the CLI gets them from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StyleOptions {
    /// Marker at the start of a line, e.g. `>r`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// Paragraph style / CSS class name, e.g. `RightAligned`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

impl StyleOptions {
    /// Create options from explicit values.
    pub fn new(marker: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self {
            marker: Some(marker.into()),
            style_name: Some(style_name.into()),
        }
    }

    /// Read the options out of a host-provided value map.
    pub fn from_values(values: &OptionValues) -> Self {
        Self {
            marker: values.get(MARKER_OPTION).map(str::to_string),
            style_name: values.get(STYLE_NAME_OPTION).map(str::to_string),
        }
    }

    /// Convert back into a host value map. Unset options are left out.
    pub fn to_values(&self) -> OptionValues {
        let mut values = OptionValues::new();
        if let Some(marker) = &self.marker {
            values.insert(MARKER_OPTION, marker.as_str());
        }
        if let Some(style_name) = &self.style_name {
            values.insert(STYLE_NAME_OPTION, style_name.as_str());
        }
        values
    }

    /// Merge another set of options into this one.
    ///
    /// Only values present in `other` replace values in `self`.
    pub fn merge(&mut self, other: &StyleOptions) {
        if other.marker.is_some() {
            self.marker.clone_from(&other.marker);
        }
        if other.style_name.is_some() {
            self.style_name.clone_from(&other.style_name);
        }
    }

    /// Trim both values and check that neither is blank.
    ///
    /// # Errors
    ///
    /// [`SmartStyleError::IncompleteConfig`] naming the first option that is
    /// missing or empty after trimming.
    pub fn resolve(&self) -> Result<ResolvedStyle> {
        let marker = trimmed(self.marker.as_deref())
            .ok_or(SmartStyleError::IncompleteConfig { option: MARKER_OPTION })?;
        let style_name = trimmed(self.style_name.as_deref()).ok_or(
            SmartStyleError::IncompleteConfig {
                option: STYLE_NAME_OPTION,
            },
        )?;

        Ok(ResolvedStyle {
            marker: marker.to_string(),
            style_name: style_name.to_string(),
        })
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value
        .map(|v| v.trim_matches(is_trim_char))
        .filter(|v| !v.is_empty())
}

/// Unicode whitespace plus the byte order mark, without NEL (U+0085).
fn is_trim_char(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Validated, trimmed step options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    marker: String,
    style_name: String,
}

impl ResolvedStyle {
    /// The trimmed, non-empty marker.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// The trimmed, non-empty style name.
    pub fn style_name(&self) -> &str {
        &self.style_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_trims() {
        let options = StyleOptions::new("  >r \t", "\tRightAligned  ");
        let resolved = options.resolve().unwrap();
        assert_eq!(resolved.marker(), ">r");
        assert_eq!(resolved.style_name(), "RightAligned");
    }

    #[test]
    fn test_resolve_strips_bom_and_unicode_spaces() {
        let resolved = StyleOptions::new("\u{feff}>r\u{a0}", "\u{3000}Poem\u{2028}")
            .resolve()
            .unwrap();
        assert_eq!(resolved.marker(), ">r");
        assert_eq!(resolved.style_name(), "Poem");

        let err = StyleOptions::new("\u{feff}", "Poem").resolve().unwrap_err();
        assert!(err.is_incomplete_config());
    }

    #[test]
    fn test_resolve_keeps_next_line_char() {
        let resolved = StyleOptions::new("\u{85}>r", "Poem").resolve().unwrap();
        assert_eq!(resolved.marker(), "\u{85}>r");
    }

    #[test]
    fn test_resolve_keeps_internal_whitespace() {
        let resolved = StyleOptions::new(" > r ", "Right Aligned").resolve().unwrap();
        assert_eq!(resolved.marker(), "> r");
        assert_eq!(resolved.style_name(), "Right Aligned");
    }

    #[test]
    fn test_resolve_missing_marker() {
        let options = StyleOptions {
            marker: None,
            style_name: Some("Note".into()),
        };
        let err = options.resolve().unwrap_err();
        assert!(matches!(
            err,
            SmartStyleError::IncompleteConfig { option: "marker" }
        ));
    }

    #[test]
    fn test_resolve_blank_style_name() {
        let err = StyleOptions::new(">r", "   ").resolve().unwrap_err();
        assert!(matches!(
            err,
            SmartStyleError::IncompleteConfig { option: "styleName" }
        ));
    }

    #[test]
    fn test_resolve_empty_both() {
        let err = StyleOptions::default().resolve().unwrap_err();
        assert!(err.is_incomplete_config());
    }

    #[test]
    fn test_values_roundtrip() {
        let values = OptionValues::new()
            .with("marker", ">l")
            .with("styleName", "LeftAligned")
            .with("unrelated", "x");
        let options = StyleOptions::from_values(&values);
        assert_eq!(options, StyleOptions::new(">l", "LeftAligned"));

        let back = options.to_values();
        assert_eq!(back.len(), 2);
        assert_eq!(back.get("styleName"), Some("LeftAligned"));
    }

    #[test]
    fn test_merge_only_present_values() {
        let mut base = StyleOptions::new(">r", "RightAligned");
        base.merge(&StyleOptions {
            marker: None,
            style_name: Some("Centered".into()),
        });
        assert_eq!(base, StyleOptions::new(">r", "Centered"));
    }

    #[test]
    fn test_serde_pascal_case() {
        let options: StyleOptions = toml::from_str(
            r#"
            Marker = "*"
            StyleName = "Note"
        "#,
        )
        .unwrap();
        assert_eq!(options, StyleOptions::new("*", "Note"));
    }
}
