//! Literal-or-regex state patterns and positional capture extraction.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::ExtractionError;

/// A single pattern declared by a state handler.
///
/// The pattern matches a provider state name either literally or as a
/// regular expression anchored to the whole name; a partial match never
/// counts. Compilation is lazy and cached. Text that fails to compile as a
/// regular expression simply never matches that way and participates in
/// literal comparison only.
///
/// # Examples
///
/// ```
/// use veripact_patterns::StatePattern;
///
/// let literal = StatePattern::new("cart is empty");
/// assert!(literal.matches("cart is empty"));
///
/// let pattern = StatePattern::new(r"order (\d+) exists");
/// assert!(pattern.matches("order 42 exists"));
/// assert!(!pattern.matches("order 42 exists and more"));
/// ```
#[derive(Debug)]
pub struct StatePattern {
    text: String,
    regex: OnceLock<Option<Regex>>,
}

impl StatePattern {
    /// Create a pattern from its declared text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            regex: OnceLock::new(),
        }
    }

    /// Access the declared pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The compiled, anchored regular expression, or `None` when the text is
    /// not valid regex syntax.
    fn regex(&self) -> Option<&Regex> {
        self.regex
            .get_or_init(|| Regex::new(&format!("^(?:{})$", self.text)).ok())
            .as_ref()
    }

    /// Exact-or-regex applicability check.
    ///
    /// Returns `true` when `state` equals the pattern text literally, or when
    /// the whole of `state` matches the text interpreted as a regular
    /// expression.
    #[must_use]
    pub fn matches(&self, state: &str) -> bool {
        self.text == state || self.regex().is_some_and(|re| re.is_match(state))
    }

    /// Ordered capture-group values when the whole of `state` matches the
    /// pattern as a regular expression.
    ///
    /// Group 0 (the whole match) is excluded. Optional groups that did not
    /// participate yield empty strings to keep positional alignment.
    #[must_use]
    pub fn captures(&self, state: &str) -> Option<Vec<String>> {
        let caps = self.regex()?.captures(state)?;
        let mut values = Vec::with_capacity(caps.len().saturating_sub(1));
        for capture in caps.iter().skip(1) {
            values.push(capture.map_or_else(String::new, |m| m.as_str().to_string()));
        }
        Some(values)
    }
}

impl From<&str> for StatePattern {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StatePattern {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl PartialEq for StatePattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for StatePattern {}

/// Does any declared pattern apply to `state`?
///
/// Used to decide whether a handler participates in a provider state at all,
/// before any capture extraction is attempted.
#[must_use]
pub fn matches_any(patterns: &[StatePattern], state: &str) -> bool {
    patterns.iter().any(|pattern| pattern.matches(state))
}

/// First pattern, in declaration order, that fully matches `state` as a
/// regular expression, together with its ordered capture values.
#[must_use]
pub fn first_match<'p>(
    patterns: &'p [StatePattern],
    state: &str,
) -> Option<(&'p StatePattern, Vec<String>)> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(state).map(|values| (pattern, values)))
}

/// Extract exactly `expected` positional tokens for `state`.
///
/// Scans the pattern list in declaration order and takes the first pattern
/// that regex-fully-matches as authoritative.
///
/// # Errors
///
/// Returns [`ExtractionError::NoCapturingMatch`] when no declared pattern
/// matches `state` as a regular expression, and
/// [`ExtractionError::CaptureCountMismatch`] when the authoritative pattern
/// captures a different number of groups than `expected`.
pub fn extract_positional(
    patterns: &[StatePattern],
    state: &str,
    expected: usize,
) -> Result<Vec<String>, ExtractionError> {
    let Some((pattern, values)) = first_match(patterns, state) else {
        return Err(ExtractionError::NoCapturingMatch {
            state: state.to_string(),
        });
    };
    if values.len() != expected {
        return Err(ExtractionError::CaptureCountMismatch {
            state: state.to_string(),
            pattern: pattern.as_str().to_string(),
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}
