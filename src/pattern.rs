//! Prefix matching on top of the [`regex`] crate.
//!
//! The lexer only ever asks one question of a pattern: "does it match right here,
//! and how long is the match?". [`Pattern`] answers exactly that.

use regex::Regex;
use thiserror::Error;

/// A rule pattern that could not be compiled.
#[derive(Debug, Error)]
#[error("pattern `{pattern}` failed to compile: {source}")]
pub struct PatternError {
    /// The pattern text as written in the rule.
    pub pattern: String,
    /// Underlying error reported by the regex engine.
    #[source]
    pub source: regex::Error,
}

/// A compiled pattern anchored at the start of the text it is matched against.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern` once so it can be matched many times.
    ///
    /// The pattern is wrapped into `^(?:...)`, so a match never starts later
    /// in the text than its first byte.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Length in bytes of the match starting at the beginning of `text`.
    ///
    /// Empty matches are reported as `None`: a rule that consumes nothing
    /// would never move the lexer forward.
    pub fn match_prefix(&self, text: &str) -> Option<usize> {
        self.regex
            .find(text)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
