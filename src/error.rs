use thiserror::Error;

/// Everything that can go wrong while registering or dispatching a command.
///
/// Registration failures (`DuplicateName`) are returned synchronously to the
/// registering caller and indicate a setup bug. Dispatch failures propagate out
/// of [`CommandInterpreter::dispatch`](crate::CommandInterpreter::dispatch) as
/// plain `Err` values; the shell loop is the single place that renders them,
/// so no dispatch error ever terminates the process.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A command with this name is already registered.
    #[error("duplicate command name: {0}")]
    DuplicateName(String),

    /// The first token of the input line names no registered command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command's guard predicate rejected the supplied arguments.
    #[error("cannot execute command: {0}")]
    CannotExecute(String),

    /// The invocation is malformed before any resolution took place,
    /// e.g. an executor command without a method-name token.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// No operation matches the method name and supplied argument count.
    #[error("no method named {method} taking {supplied} argument(s)")]
    MethodNotFound { method: String, supplied: usize },

    /// More than one operation matches; the capability provider must design
    /// overload sets so that name plus argument count is unambiguous.
    #[error("ambiguous method {method} for {supplied} argument(s)")]
    AmbiguousMethod { method: String, supplied: usize },

    /// A textual token could not be converted to the declared parameter type.
    #[error("cannot convert {token:?} to {expected}")]
    Coercion { token: String, expected: String },

    /// The name was never registered as an executor.
    #[error("unknown executor: {0}")]
    ExecutorNotFound(String),

    /// The invoked operation itself failed; the underlying cause is kept so
    /// the shell can unwrap it when rendering.
    #[error("invocation failed: {0}")]
    Invocation(anyhow::Error),
}
