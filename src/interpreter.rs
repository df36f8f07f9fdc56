//! Parses and executes string based commands.
//!
//! An executor is a special command associated with a caller-owned object.
//! The interpreter maps the tokens passed to an executor command onto one of
//! the operations declared in the object's [`Capability`], coerces the
//! remaining tokens into typed arguments, and invokes the operation. This is
//! a quick way to expose any object's interface as commands.

use crate::command::Command;
use crate::env::Environment;
use crate::error::ShellError;
use crate::executor::{Capability, OperationSignature, ResultHandler, bind_arguments};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// Maps command names to executable actions and dispatches input lines.
///
/// Plain commands and executor-backed commands share one namespace; names are
/// unique per interpreter instance. The interpreter is single-threaded and
/// owned by the shell that drives it.
#[derive(Default)]
pub struct CommandInterpreter {
    commands: HashMap<String, Command>,
    executors: HashMap<String, Vec<OperationSignature>>,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plain command under a unique name.
    pub fn register(&mut self, name: &str, command: Command) -> Result<(), ShellError> {
        if self.commands.contains_key(name) {
            return Err(ShellError::DuplicateName(name.to_string()));
        }
        self.commands.insert(name.to_string(), command);
        Ok(())
    }

    /// Registers an executor: a shared, caller-owned object whose declared
    /// operations become invocable as `<name> <method> [arg ...]`.
    ///
    /// The interpreter only ever borrows the object to invoke operations on
    /// it; creating and destroying it stays the caller's responsibility. When
    /// a result handler is supplied it receives each operation's return
    /// value; otherwise results are discarded.
    pub fn register_executor<T: 'static>(
        &mut self,
        name: &str,
        executor: Rc<RefCell<T>>,
        capability: Capability<T>,
        result_handler: Option<ResultHandler>,
    ) -> Result<(), ShellError> {
        if self.commands.contains_key(name) {
            return Err(ShellError::DuplicateName(name.to_string()));
        }

        let signatures = capability.signatures();
        let command = Command::new(move |_, _, output, args| {
            let Some(method) = args.first() else {
                return Err(ShellError::InvalidArguments(
                    "missing executor method name".to_string(),
                ));
            };
            let supplied = args.len() - 1;
            let operation = capability.resolve(method, supplied)?;
            let values = bind_arguments(&operation.params, &args[1..])?;

            let result = {
                let mut target = executor.borrow_mut();
                (operation.invoke)(&mut target, values).map_err(ShellError::Invocation)?
            };
            if let Some(handler) = &result_handler {
                handler(output, &result).map_err(ShellError::Invocation)?;
            }
            Ok(())
        });

        self.commands.insert(name.to_string(), command);
        self.executors.insert(name.to_string(), signatures);
        Ok(())
    }

    /// Tokenizes one input line and runs the command it names.
    ///
    /// Empty and whitespace-only lines are no-ops. Tokens are split on runs
    /// of whitespace; quoting and escaping are not supported, so a token can
    /// never contain a space. The first token selects the command, the rest
    /// are passed to its guard and action.
    pub fn dispatch(
        &self,
        line: &str,
        env: &mut Environment,
        output: &mut dyn Write,
    ) -> Result<(), ShellError> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let Some(name) = tokens.first() else {
            return Ok(());
        };

        let command = self
            .commands
            .get(name)
            .ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;
        let args = &tokens[1..];
        if !(command.can_execute)(args) {
            return Err(ShellError::CannotExecute(name.clone()));
        }
        (command.execute)(self, env, output, args)
    }

    /// Registered command names, in no particular order; callers sort for
    /// display.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Renders the operation signatures of a registered executor, one line
    /// each, optionally narrowed to a method name (case-insensitive).
    pub fn describe(
        &self,
        executor_name: &str,
        method_filter: Option<&str>,
    ) -> Result<String, ShellError> {
        let signatures = self
            .executors
            .get(executor_name)
            .ok_or_else(|| ShellError::ExecutorNotFound(executor_name.to_string()))?;

        let mut description = String::new();
        for signature in signatures {
            if method_filter.is_some_and(|filter| !signature.name.eq_ignore_ascii_case(filter)) {
                continue;
            }
            description.push_str(&signature.render());
            description.push('\n');
        }
        Ok(description)
    }
}
