use anyhow::Context;
use argh::FromArgs;
use sdb_expr::session::{DEFAULT_PROMPT, Session};
use sdb_expr::{Error, Monitor, evaluate_expression};
use std::io::Write;

#[derive(FromArgs)]
/// Evaluate integer expressions, or start the interactive monitor when no
/// expression is given.
struct Args {
    #[argh(option, short = 'e')]
    /// expression to evaluate and print; may be repeated.
    eval: Vec<String>,

    #[argh(option, short = 'p', default = "DEFAULT_PROMPT.to_string()")]
    /// prompt shown by the interactive monitor.
    prompt: String,

    #[argh(switch, short = 'v')]
    /// log every matched token and reduction step.
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let level = if args.verbose { "sdb_expr=trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.eval.is_empty() {
        let mut monitor = Monitor::with_session(Session::new(args.prompt));
        monitor.repl().context("monitor stopped on a terminal error")?;
        return Ok(());
    }

    let ok = run_batch(&args.eval, &mut std::io::stdout(), &mut std::io::stderr())?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Evaluate each expression in turn, printing one result per line to `out`.
///
/// Failures go to `err` and do not stop the remaining expressions. Returns
/// `false` if any expression failed.
fn run_batch(exprs: &[String], out: &mut dyn Write, err: &mut dyn Write) -> anyhow::Result<bool> {
    let mut ok = true;
    for expr in exprs {
        match evaluate_expression(expr) {
            Ok(value) => writeln!(out, "{}", value)?,
            Err(Error::Lex(e)) => {
                writeln!(err, "{}", e.render(expr))?;
                ok = false;
            }
            Err(e) => {
                writeln!(err, "{}: {}", expr, e)?;
                ok = false;
            }
        }
    }
    Ok(ok)
}
