use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::error::Error;
use crate::evaluate_expression;
use crate::monitor::Factory;
use crate::session::Session;
use anyhow::{Result, anyhow};
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Commands built into the monitor.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly against the session.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "p" or "q".
    fn name() -> &'static str;

    /// One-line summary shown by `help`.
    fn description() -> &'static str;

    /// Executes the command against the session.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        match T::execute(*self, stdout, session) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stdout, "{:#}", e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Evaluate an integer expression and print its value.
pub struct Print {
    #[argh(positional, greedy)]
    /// the expression; its words are joined with spaces.
    pub expr: Vec<String>,
}

impl BuiltinCommand for Print {
    fn name() -> &'static str {
        "p"
    }

    fn description() -> &'static str {
        "Evaluate EXPR and print its value"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let expr = self.expr.join(" ");
        let value = evaluate_expression(&expr).map_err(|e| match e {
            Error::Lex(lex) => anyhow!(lex.render(&expr)),
            e => anyhow!(e).context(format!("can't evaluate `{}`", expr)),
        })?;
        session.evaluated += 1;
        writeln!(stdout, "{} ({:#x})", value, value)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List the monitor commands.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "Display information about all supported commands"
    }

    fn execute(self, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let commands = [
            (Help::name(), Help::description()),
            (Print::name(), Print::description()),
            (Quit::name(), Quit::description()),
        ];
        for (name, description) in commands {
            writeln!(stdout, "{:<6}- {}", name, description)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the monitor.
pub struct Quit {}

impl BuiltinCommand for Quit {
    fn name() -> &'static str {
        "q"
    }

    fn description() -> &'static str {
        "Exit the monitor"
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        session.should_exit = true;
        Ok(0)
    }
}
