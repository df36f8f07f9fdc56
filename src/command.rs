//! The registered-command representation owned by the interpreter.

use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::CommandInterpreter;
use std::io::Write;

/// Action run when a command is dispatched.
///
/// The interpreter hands the action a view of itself (so built-ins like `help`
/// can enumerate and describe registrations), the mutable shell environment,
/// the output sink, and the tokens following the command name.
pub type ExecuteFn = Box<
    dyn Fn(
        &CommandInterpreter,
        &mut Environment,
        &mut dyn Write,
        &[String],
    ) -> Result<(), ShellError>,
>;

/// Guard predicate evaluated before execution; rejecting the arguments makes
/// dispatch fail with [`ShellError::CannotExecute`].
pub type GuardFn = Box<dyn Fn(&[String]) -> bool>;

/// A named, registered action plus guard predicate invocable by text.
///
/// Created at registration, immutable afterwards, owned exclusively by the
/// registering [`CommandInterpreter`].
pub struct Command {
    pub(crate) execute: ExecuteFn,
    pub(crate) can_execute: GuardFn,
}

impl Command {
    /// Command with an always-true guard.
    pub fn new<F>(execute: F) -> Self
    where
        F: Fn(
                &CommandInterpreter,
                &mut Environment,
                &mut dyn Write,
                &[String],
            ) -> Result<(), ShellError>
            + 'static,
    {
        Self {
            execute: Box::new(execute),
            can_execute: Box::new(|_| true),
        }
    }

    /// Command whose guard decides, per argument list, whether it may run.
    pub fn guarded<F, G>(execute: F, can_execute: G) -> Self
    where
        F: Fn(
                &CommandInterpreter,
                &mut Environment,
                &mut dyn Write,
                &[String],
            ) -> Result<(), ShellError>
            + 'static,
        G: Fn(&[String]) -> bool + 'static,
    {
        Self {
            execute: Box::new(execute),
            can_execute: Box::new(can_execute),
        }
    }
}
