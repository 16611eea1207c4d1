/// Default prompt of the interactive monitor.
pub const DEFAULT_PROMPT: &str = "(sdb) ";

/// Mutable state of one monitor session, shared by all commands.
///
/// The session contains:
/// - `prompt`: text shown before each line read by the REPL.
/// - `should_exit`: set by the `q` command, checked by the REPL loop.
/// - `evaluated`: number of expressions successfully evaluated so far.
///
/// Expressions themselves keep no state here: every evaluation starts from
/// scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub prompt: String,
    pub should_exit: bool,
    pub evaluated: usize,
}

impl Session {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            should_exit: false,
            evaluated: 0,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_fresh() {
        let session = Session::new("> ");
        assert_eq!(session.prompt, "> ");
        assert!(!session.should_exit);
        assert_eq!(session.evaluated, 0);
    }

    #[test]
    fn test_default_prompt() {
        assert_eq!(Session::default().prompt, DEFAULT_PROMPT);
    }
}
