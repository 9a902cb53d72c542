//! Interactive read-eval-print loop.
//!
//! Line parsing is a pure function ([`parse_command`]); the loop itself is
//! generic over its input and output so sessions can be scripted in tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use console::style;

use crate::calculator::Calculator;
use crate::history::StepOutcome;
use crate::operations::Arity;

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Calculate {
        operation: String,
        a: String,
        b: Option<String>,
    },
    History,
    Clear,
    Undo,
    Redo,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Operations,
    Help,
    Exit,
    Empty,
}

/// Parse a single input line.
///
/// Anything that is not a keyword is treated as `<op> <a> [b]`.
pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(ReplCommand::Empty);
    };
    let rest: Vec<&str> = parts.collect();
    let keyword = head.to_lowercase();

    let no_args = |command: ReplCommand| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(format!("'{keyword}' takes no arguments"))
        }
    };

    match keyword.as_str() {
        "history" => no_args(ReplCommand::History),
        "clear" => no_args(ReplCommand::Clear),
        "undo" => no_args(ReplCommand::Undo),
        "redo" => no_args(ReplCommand::Redo),
        "ops" | "operations" => no_args(ReplCommand::Operations),
        "help" | "?" => no_args(ReplCommand::Help),
        "exit" | "quit" => no_args(ReplCommand::Exit),
        "save" | "load" => {
            if rest.len() > 1 {
                return Err(format!("usage: {keyword} [path]"));
            }
            let path = rest.first().map(PathBuf::from);
            Ok(if keyword == "save" {
                ReplCommand::Save(path)
            } else {
                ReplCommand::Load(path)
            })
        }
        _ => match rest.as_slice() {
            [a] => Ok(ReplCommand::Calculate {
                operation: keyword,
                a: a.to_string(),
                b: None,
            }),
            [a, b] => Ok(ReplCommand::Calculate {
                operation: keyword,
                a: a.to_string(),
                b: Some(b.to_string()),
            }),
            _ => Err(format!(
                "usage: {keyword} <a> [b]  (type 'help' for commands)"
            )),
        },
    }
}

const HELP: &str = "\
Commands:
  <op> <a> [b]   Evaluate an operation, e.g. 'add 2 3' or 'ln 10'
  history        Show the calculation history
  clear          Clear the history
  undo           Undo the last change
  redo           Redo the last undone change
  save [path]    Save the history (default: configured history file)
  load [path]    Replace the history with a saved one
  ops            List available operations
  help           Show this message
  exit, quit     Leave the session";

/// Run the interactive loop until `exit` or end of input.
pub fn run<R: BufRead, W: Write>(
    calculator: &mut Calculator,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(
        output,
        "{} {}  (type 'help' for commands)",
        style("reckon").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    crate::log_event!("repl", "started");

    let mut lines = input.lines();
    loop {
        write!(output, "{} ", style(">").green().bold())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(ReplCommand::Exit) => break,
            Ok(command) => execute(calculator, command, &mut output)?,
            Err(message) => writeln!(output, "{} {message}", style("error:").red().bold())?,
        }
    }

    crate::log_event!("repl", "finished");
    Ok(())
}

/// Interactive session on stdin/stdout.
pub fn run_stdio(calculator: &mut Calculator) -> io::Result<()> {
    let stdin = io::stdin();
    run(calculator, stdin.lock(), io::stdout())
}

fn execute<W: Write>(
    calculator: &mut Calculator,
    command: ReplCommand,
    output: &mut W,
) -> io::Result<()> {
    match command {
        ReplCommand::Calculate { operation, a, b } => {
            let result = match b {
                Some(b) => calculator.calculate(&operation, a, b),
                None => calculator.calculate_unary(&operation, a),
            };
            match result {
                Ok(record) => writeln!(output, "{}", style(record.result()).bold())?,
                Err(e) => writeln!(output, "{} {e}", style("error:").red().bold())?,
            }
        }
        ReplCommand::History => {
            if calculator.history().is_empty() {
                writeln!(output, "{}", style("No calculations yet").dim())?;
            }
            for (i, record) in calculator.history().iter().enumerate() {
                writeln!(output, "{:>4}. {record}", i + 1)?;
            }
        }
        ReplCommand::Clear => {
            calculator.clear_history();
            writeln!(output, "History cleared")?;
        }
        ReplCommand::Undo => {
            let message = match calculator.undo() {
                StepOutcome::Nothing => "Nothing to undo",
                StepOutcome::Emptied => "Undone (history is now empty)",
                StepOutcome::Restored => "Undone",
            };
            writeln!(output, "{message}")?;
        }
        ReplCommand::Redo => {
            let message = match calculator.redo() {
                StepOutcome::Nothing => "Nothing to redo",
                StepOutcome::Emptied | StepOutcome::Restored => "Redone",
            };
            writeln!(output, "{message}")?;
        }
        ReplCommand::Save(path) => match calculator.save_history(path.as_deref()) {
            Ok(saved) => writeln!(
                output,
                "Saved {} records to {}",
                calculator.history().len(),
                saved.display()
            )?,
            Err(e) => writeln!(output, "{} {e}", style("error:").red().bold())?,
        },
        ReplCommand::Load(path) => match calculator.load_history(path.as_deref()) {
            Ok(report) if report.skipped > 0 => writeln!(
                output,
                "Loaded {} records ({} malformed skipped)",
                report.loaded(),
                report.skipped
            )?,
            Ok(report) => writeln!(output, "Loaded {} records", report.loaded())?,
            Err(e) => writeln!(output, "{} {e}", style("error:").red().bold())?,
        },
        ReplCommand::Operations => {
            for operation in calculator.operations().iter() {
                let usage = match operation.arity() {
                    Arity::Unary => "<a>",
                    Arity::Binary => "<a> <b>",
                };
                writeln!(
                    output,
                    "  {:<12} {:<8} {}",
                    style(operation.name()).green(),
                    usage,
                    operation.description()
                )?;
            }
        }
        ReplCommand::Help => writeln!(output, "{HELP}")?,
        ReplCommand::Empty | ReplCommand::Exit => {}
    }
    Ok(())
}
