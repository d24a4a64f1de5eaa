//! Smart style replacer.
//!
//! Wraps every line that starts with a user-defined marker into a Pandoc
//! fenced div carrying a custom style, e.g. with marker `>r` and style
//! `RightAligned`:
//!
//! ```text
//! >r Hello there
//! ```
//!
//! becomes
//!
//! ```text
//! ::: {custom-style="RightAligned" .RightAligned}
//! Hello there
//! :::
//! ```
//!
//! The `custom-style` attribute is picked up by the docx writer and the
//! class by the epub/html writers.

use crate::description::{OptionSpec, StepDescription};
use crate::escape::escape_pattern;
use crate::{Step, StepOutcome};
use log::{debug, trace, warn};
use regex::{Captures, Regex};
use smartstyle_config::{ResolvedStyle, StyleOptions, MARKER_OPTION, STYLE_NAME_OPTION};
use smartstyle_core::{ContentKind, OptionValues, Scene, SceneLike, SmartStyleError};

/// Registry name of the step.
pub const STEP_NAME: &str = "smart-style";

/// Rewrites marker lines into custom-style fenced divs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartStyleReplacer;

impl SmartStyleReplacer {
    /// Create a new replacer.
    pub fn new() -> Self {
        Self
    }

    /// Step metadata for option discovery.
    pub fn description() -> StepDescription {
        StepDescription {
            name: "Smart Style Replacer".into(),
            description: "Wraps text lines starting with a specific marker into a Pandoc \
                          custom-style block (Fenced Div). Ideal for chat logs, poetry, \
                          or special formatting."
                .into(),
            available_kinds: vec![ContentKind::Scene],
            options: vec![
                OptionSpec::text(
                    MARKER_OPTION,
                    "Line Marker",
                    "The short code at the start of the line (e.g. '>r' or '>l'). \
                     At least one space must follow the marker.",
                    ">r",
                ),
                OptionSpec::text(
                    STYLE_NAME_OPTION,
                    "Style Name (Word & CSS)",
                    "The name of the style to apply. Must match a style in your \
                     Reference Doc (for Word) and a class in your CSS (for EPUB). \
                     Example: 'RightAligned'.",
                    "RightAligned",
                ),
            ],
        }
    }

    /// Run the step over `scenes` with options taken from the host's values.
    ///
    /// Never fails: with incomplete options the scenes come back untouched
    /// and a warning is logged.
    pub async fn compile<S: SceneLike>(
        &self,
        mut scenes: Vec<S>,
        values: &OptionValues,
    ) -> Vec<S> {
        self.apply(&mut scenes, &StyleOptions::from_values(values));
        scenes
    }

    /// Rewrite marker lines in every scene that has contents.
    pub fn apply<S: SceneLike>(&self, scenes: &mut [S], options: &StyleOptions) -> StepOutcome {
        let rule = match options.resolve().and_then(|style| BlockRule::new(&style)) {
            Ok(rule) => rule,
            Err(reason) => {
                warn!("Smart Style Replacer: {}. Skipping step.", reason);
                return StepOutcome::Skipped { reason };
            }
        };

        let mut scenes_changed = 0;
        let mut replacements = 0;

        for scene in scenes.iter_mut() {
            let Some(contents) = scene.contents_mut().filter(|c| !c.is_empty()) else {
                continue;
            };
            if let Some((rewritten, count)) = rule.rewrite(contents) {
                *contents = rewritten;
                scenes_changed += 1;
                replacements += count;
            }
        }

        debug!(
            "Smart Style Replacer: {} line(s) rewritten in {} scene(s)",
            replacements, scenes_changed
        );

        StepOutcome::Applied {
            scenes_changed,
            replacements,
        }
    }
}

impl Step for SmartStyleReplacer {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn describe(&self) -> StepDescription {
        Self::description()
    }

    fn process(&self, units: &mut [&mut Scene], options: &OptionValues) -> StepOutcome {
        self.apply(units, &StyleOptions::from_values(options))
    }
}

/// Unicode line and paragraph separators, which also end a line.
const LINE_SEPARATORS: &str = r"\x{2028}\x{2029}";

/// Whitespace allowed between marker and text: `\s` and the byte order mark,
/// minus anything that ends a line.
const SEPARATOR_CLASS: &str = r"[[\s\x{FEFF}]&&[^\r\n\x{85}\x{2028}\x{2029}]]";

/// Compiled pattern plus opening fence for one invocation.
struct BlockRule {
    pattern: Regex,
    open: String,
}

impl BlockRule {
    fn new(style: &ResolvedStyle) -> Result<Self, SmartStyleError> {
        // A line starts after \n, a lone \r (R), U+2028 or U+2029. The
        // separator may not cross a line end, and the text runs to the next one.
        let source = format!(
            r"(?mR)(^|[{le}]){}{sep}+([^\r\n{le}]*)",
            escape_pattern(style.marker()),
            le = LINE_SEPARATORS,
            sep = SEPARATOR_CLASS,
        );
        trace!("Smart Style Replacer pattern: {}", source);

        let pattern = Regex::new(&source)
            .map_err(|e| SmartStyleError::Config(format!("invalid marker pattern: {}", e)))?;
        let name = style.style_name();

        Ok(Self {
            pattern,
            open: format!("::: {{custom-style=\"{}\" .{}}}", name, name),
        })
    }

    /// Returns the rewritten text and the number of lines replaced, or
    /// `None` when nothing matched.
    fn rewrite(&self, text: &str) -> Option<(String, usize)> {
        let mut count = 0;
        let out = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            count += 1;
            format!("{}{}\n{}\n:::", &caps[1], self.open, &caps[2])
        });
        (count > 0).then(|| (out.into_owned(), count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(marker: &str, style: &str) -> StyleOptions {
        StyleOptions::new(marker, style)
    }

    fn run(text: &str, marker: &str, style: &str) -> String {
        let mut scenes = vec![text.to_string()];
        SmartStyleReplacer::new().apply(&mut scenes, &options(marker, style));
        scenes.remove(0)
    }

    #[test]
    fn test_basic_marker() {
        assert_eq!(
            run(">r Hello there", ">r", "RightAligned"),
            "::: {custom-style=\"RightAligned\" .RightAligned}\nHello there\n:::"
        );
    }

    #[test]
    fn test_special_char_marker() {
        assert_eq!(
            run("* note text", "*", "Note"),
            "::: {custom-style=\"Note\" .Note}\nnote text\n:::"
        );
    }

    #[test]
    fn test_marker_needs_whitespace() {
        assert_eq!(run(">rSomething", ">r", "RightAligned"), ">rSomething");
    }

    #[test]
    fn test_marker_not_at_line_start() {
        let text = " >r indented\nsay >r here";
        assert_eq!(run(text, ">r", "RightAligned"), text);
    }

    #[test]
    fn test_multiple_lines_global() {
        let text = "intro\n>r one\nmiddle\n>r two\noutro";
        let expected = "intro\n\
                        ::: {custom-style=\"R\" .R}\none\n:::\n\
                        middle\n\
                        ::: {custom-style=\"R\" .R}\ntwo\n:::\n\
                        outro";
        assert_eq!(run(text, ">r", "R"), expected);
    }

    #[test]
    fn test_empty_remainder() {
        assert_eq!(run(">r   ", ">r", "R"), "::: {custom-style=\"R\" .R}\n\n:::");
    }

    #[test]
    fn test_bare_marker_does_not_swallow_next_line() {
        let text = ">r\nnext line";
        assert_eq!(run(text, ">r", "R"), text);
    }

    #[test]
    fn test_tab_separator_and_trailing_text() {
        assert_eq!(
            run(">r\tspaced  out  ", ">r", "R"),
            "::: {custom-style=\"R\" .R}\nspaced  out  \n:::"
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            run(">r left\r\nplain\r\n", ">r", "R"),
            "::: {custom-style=\"R\" .R}\nleft\n:::\r\nplain\r\n"
        );
    }

    #[test]
    fn test_unicode_line_separators_end_lines() {
        assert_eq!(
            run(">r a\u{2028}b\u{2029}>r c\u{2028}", ">r", "R"),
            "::: {custom-style=\"R\" .R}\na\n:::\u{2028}b\u{2029}\
             ::: {custom-style=\"R\" .R}\nc\n:::\u{2028}"
        );
    }

    #[test]
    fn test_line_separator_is_not_a_separator() {
        let text = ">r\u{2028}next";
        assert_eq!(run(text, ">r", "R"), text);
    }

    #[test]
    fn test_unicode_space_separators() {
        assert_eq!(
            run(">r\u{a0}nbsp\n>r\u{feff}bom\n>r\u{85}nel", ">r", "R"),
            "::: {custom-style=\"R\" .R}\nnbsp\n:::\n\
             ::: {custom-style=\"R\" .R}\nbom\n:::\n\
             >r\u{85}nel"
        );
    }

    #[test]
    fn test_lone_carriage_return_ends_line() {
        assert_eq!(
            run("x\r>r y\rz", ">r", "R"),
            "x\r::: {custom-style=\"R\" .R}\ny\n:::\rz"
        );
    }

    #[test]
    fn test_bom_around_marker_option_is_trimmed() {
        assert_eq!(
            run(">r x", "\u{feff}>r", "R"),
            "::: {custom-style=\"R\" .R}\nx\n:::"
        );
    }

    #[test]
    fn test_marker_with_internal_whitespace_is_literal() {
        assert_eq!(
            run("> r text\n>r other", "> r", "R"),
            "::: {custom-style=\"R\" .R}\ntext\n:::\n>r other"
        );
    }

    #[test]
    fn test_style_name_dollar_is_literal() {
        assert_eq!(
            run(">r x", ">r", "$1Style"),
            "::: {custom-style=\"$1Style\" .$1Style}\nx\n:::"
        );
    }

    #[test]
    fn test_options_are_trimmed() {
        assert_eq!(
            run(">r x", "  >r  ", " R "),
            "::: {custom-style=\"R\" .R}\nx\n:::"
        );
    }

    #[test]
    fn test_incomplete_options_skip() {
        let mut scenes = vec![">r keep".to_string()];
        let outcome = SmartStyleReplacer::new().apply(&mut scenes, &options(">r", "  "));
        assert!(matches!(
            outcome,
            StepOutcome::Skipped {
                reason: SmartStyleError::IncompleteConfig { option: "styleName" }
            }
        ));
        assert_eq!(scenes, vec![">r keep".to_string()]);
    }

    #[test]
    fn test_scenes_without_contents_skipped() {
        let mut scenes = vec![
            Scene::empty(ContentKind::Scene),
            Scene::new(""),
            Scene::new(">r hit"),
        ];
        let outcome = SmartStyleReplacer::new().apply(&mut scenes, &options(">r", "R"));
        assert_eq!(outcome.replacements(), 1);
        assert_eq!(scenes[0].contents, None);
        assert_eq!(scenes[1].contents.as_deref(), Some(""));
        assert_eq!(
            scenes[2].contents.as_deref(),
            Some("::: {custom-style=\"R\" .R}\nhit\n:::")
        );
    }

    #[test]
    fn test_outcome_counts() {
        let mut scenes = vec![
            ">r a\n>r b".to_string(),
            "nothing".to_string(),
            ">r c".to_string(),
        ];
        let outcome = SmartStyleReplacer::new().apply(&mut scenes, &options(">r", "R"));
        assert!(matches!(
            outcome,
            StepOutcome::Applied {
                scenes_changed: 2,
                replacements: 3
            }
        ));
        assert_eq!(scenes[1], "nothing");
    }

    #[test]
    fn test_description() {
        let desc = SmartStyleReplacer::description();
        assert_eq!(desc.name, "Smart Style Replacer");
        assert_eq!(desc.available_kinds, vec![ContentKind::Scene]);
        assert_eq!(desc.option("marker").unwrap().default, ">r");
        assert_eq!(desc.option("styleName").unwrap().default, "RightAligned");
        assert_eq!(desc.option("styleName").unwrap().name, "Style Name (Word & CSS)");
    }

    #[tokio::test]
    async fn test_compile_from_values() {
        let values = OptionValues::new()
            .with("marker", ">l")
            .with("styleName", "LeftAligned");
        let scenes = vec![Scene::new(">l hi"), Scene::new("plain")];

        let out = SmartStyleReplacer::new().compile(scenes, &values).await;
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0].contents.as_deref(),
            Some("::: {custom-style=\"LeftAligned\" .LeftAligned}\nhi\n:::")
        );
        assert_eq!(out[1].contents.as_deref(), Some("plain"));
    }

    #[tokio::test]
    async fn test_compile_missing_values_is_identity() {
        let scenes = vec![Scene::new(">r hi")];
        let out = SmartStyleReplacer::new()
            .compile(scenes.clone(), &OptionValues::new())
            .await;
        assert_eq!(out, scenes);
    }
}
