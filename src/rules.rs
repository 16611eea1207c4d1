//! The lexical rule table.
//!
//! Rules are tried in table order at every scan position and the first rule
//! that matches wins, so the order of [`DEFAULT_RULES`] is part of the grammar.

use crate::lexer::TokenKind;
use crate::pattern::{Pattern, PatternError};
use std::sync::OnceLock;

/// A single lexical rule: a pattern and the kind of token it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Pattern text understood by [`Pattern::compile`].
    pub pattern: &'static str,
    /// Token kind emitted when the pattern matches.
    pub kind: TokenKind,
}

impl Rule {
    pub const fn new(pattern: &'static str, kind: TokenKind) -> Self {
        Self { pattern, kind }
    }
}

/// Rules used by [`crate::evaluate_expression`].
pub const DEFAULT_RULES: &[Rule] = &[
    Rule::new(" +", TokenKind::Space),
    Rule::new("[0-9]+", TokenKind::Decimal),
    Rule::new(r"\+", TokenKind::Plus),
    Rule::new("-", TokenKind::Minus),
    Rule::new(r"\*", TokenKind::Star),
    Rule::new("/", TokenKind::Slash),
    Rule::new(r"\(", TokenKind::LParen),
    Rule::new(r"\)", TokenKind::RParen),
    Rule::new("==", TokenKind::Eq),
];

/// A rule whose pattern has already been compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub pattern: Pattern,
    pub kind: TokenKind,
}

/// An ordered, immutable set of compiled rules.
///
/// Compiling is done once; the table is then only read, so it can be shared
/// between threads freely.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// Compile every rule in order, stopping at the first malformed pattern.
    pub fn compile(rules: &[Rule]) -> Result<Self, PatternError> {
        let rules = rules
            .iter()
            .map(|rule| {
                Pattern::compile(rule.pattern).map(|pattern| CompiledRule {
                    pattern,
                    kind: rule.kind,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self { rules })
    }

    /// The process-wide table built from [`DEFAULT_RULES`].
    ///
    /// Compiled on first use. The built-in patterns are constants, so a
    /// compilation failure here is a bug in this crate and panics.
    pub fn global() -> &'static RuleTable {
        static TABLE: OnceLock<RuleTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            RuleTable::compile(DEFAULT_RULES)
                .unwrap_or_else(|e| panic!("built-in rule table is invalid: {}", e))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_table_keeps_rule_order() {
        let table = RuleTable::global();
        assert_eq!(table.iter().count(), DEFAULT_RULES.len());

        let kinds: Vec<TokenKind> = table.iter().map(|r| r.kind).collect();
        let expected: Vec<TokenKind> = DEFAULT_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, expected);
        // Whitespace must be tried before anything else.
        assert_eq!(kinds[0], TokenKind::Space);
    }

    #[test]
    fn test_global_table_is_shared() {
        assert!(std::ptr::eq(RuleTable::global(), RuleTable::global()));
    }

    #[test]
    fn test_compile_reports_bad_rule() {
        let rules = [
            Rule::new("[0-9]+", TokenKind::Decimal),
            Rule::new("[0-9", TokenKind::Decimal),
        ];
        let err = RuleTable::compile(&rules).unwrap_err();
        assert_eq!(err.pattern, "[0-9");
    }
}
