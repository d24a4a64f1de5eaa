//! Escaping of user text for use inside a regular expression.

/// Characters with special meaning in the pattern dialect.
const SPECIAL: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Prefix every pattern-special character in `input` with a backslash.
///
/// The result matches `input` literally when embedded in a pattern.
///
/// # Example
///
/// ```
/// use smartstyle_steps::escape::escape_pattern;
/// assert_eq!(escape_pattern(">r"), ">r");
/// assert_eq!(escape_pattern("*?"), r"\*\?");
/// ```
pub fn escape_pattern(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
