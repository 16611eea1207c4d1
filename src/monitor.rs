use crate::command::{CommandFactory, ExitCode};
use crate::session::Session;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtin commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// An interactive debugger monitor that reads commands and evaluates expressions.
///
/// The monitor owns a [`Session`] and a list of [`CommandFactory`] objects
/// that are queried to create commands by name. See [`Default`] for the
/// commands included out of the box.
///
/// Example
/// ```
/// use sdb_expr::Monitor;
/// let mut monitor = Monitor::default();
/// let mut out = Vec::new();
/// let code = monitor.execute_line("p (4 + 3) * (2 - 1)", &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(out).unwrap(), "7 (0x7)\n");
/// ```
pub struct Monitor {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Monitor {
    /// Create a monitor with a custom set of command factories.
    pub fn new(session: Session, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { session, commands }
    }

    /// Create a monitor with the builtin commands and the given session.
    pub fn with_session(session: Session) -> Self {
        use crate::builtin::*;
        Self::new(
            session,
            vec![
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Print>::default()),
                Box::new(Factory::<Quit>::default()),
            ],
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code, or an error if no factory knows the
    /// command or writing its output fails.
    pub fn run(&mut self, name: &str, args: &[&str], stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd.execute(stdout, &mut self.session);
            }
        }
        Err(anyhow::anyhow!("Unknown command '{}'", name))
    }

    /// Execute one line of input.
    ///
    /// The first word names the command; the rest of the line, trimmed, is
    /// passed to it as a single positional argument after `--`, so text such
    /// as `- 1` or `--help` reaches `p` verbatim instead of being read as a
    /// flag. Blank lines do nothing.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(0);
        }

        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = if rest.is_empty() { Vec::new() } else { vec!["--", rest] };
        debug!("command {:?} with args {:?}", name, args);

        self.run(name, &args, stdout)
    }

    /// Read-Eval-Print Loop over standard input and output.
    ///
    /// Ends on `q`, Ctrl-C or end of input.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.session.should_exit {
            let readline = rl.readline(&self.session.prompt);
            match readline {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if let Err(e) = self.execute_line(&line, &mut std::io::stdout()) {
                        println!("{:#}", e);
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

impl Default for Monitor {
    /// Create a monitor with a default session and the builtin commands:
    /// `help`, `p` and `q`.
    fn default() -> Self {
        Self::with_session(Session::default())
    }
}
