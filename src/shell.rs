//! The read-dispatch-print loop driving a [`CommandInterpreter`].

use crate::command::Command;
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::CommandInterpreter;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

/// Abstraction over where the shell reads its input lines from.
///
/// Implementations decide how blocking reads happen; the shell only sees one
/// line at a time. See [`EditorSource`](crate::io_adapters::EditorSource) and
/// [`ReaderSource`](crate::io_adapters::ReaderSource).
pub trait LineSource {
    /// Blocks for the next input line, without its trailing newline.
    /// `Ok(None)` signals that the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// True when the source displays the prompt itself (as a line editor
    /// does); the shell then skips writing it to the output sink.
    fn renders_prompt(&self) -> bool {
        false
    }
}

/// Lifecycle of a shell: constructed, looping, stopped.
///
/// The `Idle` to `Running` transition is one-way; calling
/// [`Shell::run`] again on a terminated shell is caller responsibility and
/// not given a meaning here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    Running,
    Terminated,
}

/// Command interpreter user interface: reads lines from an input source,
/// dispatches them, and renders results and errors to its sinks.
///
/// The loop is single-threaded and cooperative; the line read is its only
/// blocking point. Every dispatch error is caught, rendered to the error
/// sink, and the loop continues — only the `exit` command or the end of the
/// input stops it.
pub struct Shell {
    /// Text written before each read.
    pub prompt: String,
    /// Text written after each iteration.
    pub separator: String,
    /// When true, errors render with their full causal chain; otherwise only
    /// the outermost message is shown.
    pub verbose_errors: bool,
    interpreter: CommandInterpreter,
    env: Environment,
    state: ShellState,
    input: Box<dyn LineSource>,
    output: Box<dyn Write>,
    errors: Box<dyn Write>,
}

impl Shell {
    /// Creates a shell over the given streams with the built-in `help` and
    /// `exit` commands registered.
    pub fn new(
        input: Box<dyn LineSource>,
        output: Box<dyn Write>,
        errors: Box<dyn Write>,
    ) -> Self {
        let mut interpreter = CommandInterpreter::new();
        // A fresh interpreter has no registrations; these cannot collide.
        interpreter
            .register("help", Command::new(Self::help))
            .expect("registering help on a fresh interpreter");
        interpreter
            .register(
                "exit",
                Command::new(|_, env, _, _| {
                    env.should_exit = true;
                    Ok(())
                }),
            )
            .expect("registering exit on a fresh interpreter");

        Self {
            prompt: "> ".to_string(),
            separator: "\n".to_string(),
            verbose_errors: true,
            interpreter,
            env: Environment::new(),
            state: ShellState::Idle,
            input,
            output,
            errors,
        }
    }

    /// The interpreter, for inspection.
    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    /// The interpreter, for registering commands and executors before `run`.
    pub fn interpreter_mut(&mut self) -> &mut CommandInterpreter {
        &mut self.interpreter
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Runs the loop until the `exit` command executes or the input source is
    /// exhausted (treated as an implicit exit).
    ///
    /// `args` is the argument line provided with the shell invocation in the
    /// hosting program; commands can read it from the environment.
    pub fn run(&mut self, args: &[String]) -> Result<()> {
        self.state = ShellState::Running;
        self.env.args = args.to_vec();

        while self.state == ShellState::Running {
            if !self.input.renders_prompt() {
                write!(self.output, "{}", self.prompt)?;
                self.output.flush()?;
            }

            let Some(line) = self.input.read_line(&self.prompt)? else {
                self.state = ShellState::Terminated;
                break;
            };

            if let Err(error) = self.interpreter.dispatch(&line, &mut self.env, &mut self.output)
            {
                let rendered = render_error(&error, self.verbose_errors);
                writeln!(self.errors, "{}", rendered.red())?;
            }

            if self.env.should_exit {
                self.state = ShellState::Terminated;
            }
            write!(self.output, "{}", self.separator)?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Handler for the `help` command.
    ///
    /// With no arguments, lists the registered command names sorted
    /// lexicographically; with an executor name, prints its operation
    /// signatures; with an executor and method name, prints the matching
    /// signatures only.
    fn help(
        interpreter: &CommandInterpreter,
        _env: &mut Environment,
        output: &mut dyn Write,
        args: &[String],
    ) -> Result<(), ShellError> {
        let write_failure = |e: std::io::Error| ShellError::Invocation(e.into());
        match args {
            [] => {
                let mut names: Vec<&str> = interpreter.command_names().collect();
                names.sort_unstable();
                writeln!(output, "{}", names.join(" ")).map_err(write_failure)
            }
            [executor] => {
                let description = interpreter.describe(executor, None)?;
                write!(output, "{}", description).map_err(write_failure)
            }
            [executor, method] => {
                let description = interpreter.describe(executor, Some(method.as_str()))?;
                write!(output, "{}", description).map_err(write_failure)
            }
            _ => Err(ShellError::InvalidArguments(
                "usage: help [executor [method]]".to_string(),
            )),
        }
    }
}

/// Renders a dispatch error for the error sink, unwrapping the invocation
/// wrapper down to its underlying cause.
///
/// Only `Invocation` carries a causal chain; `{:#}` prints the whole chain,
/// colon-separated, while the terse form keeps the outermost message.
fn render_error(error: &ShellError, verbose: bool) -> String {
    match error {
        ShellError::Invocation(cause) if verbose => format!("invocation failed: {:#}", cause),
        other => other.to_string(),
    }
}
