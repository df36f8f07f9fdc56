//! An embeddable command shell built around textual dispatch.
//!
//! This crate provides a [`CommandInterpreter`] that binds command names to
//! executable actions, an executor mechanism that resolves invocations of the
//! form `executor method arg ...` against a statically declared capability
//! set — coercing string tokens into typed parameters along the way — and a
//! single-threaded [`Shell`] read-dispatch-print loop that drives it all.
//!
//! Any caller-owned object can be exposed as an executor by building a
//! [`Capability`] describing its operations; the interpreter shares the
//! object, never owns it. Input lines are split on whitespace only — quoting
//! and escaping are not supported, so tokens cannot contain spaces.

pub mod bytes;
pub mod command;
pub mod env;
mod error;
pub mod executor;
mod interpreter;
pub mod io_adapters;
pub mod logging;
pub mod render;
mod shell;
pub mod store;
pub mod value;

pub use command::Command;
pub use error::ShellError;
pub use executor::{Capability, OperationSignature, ResultHandler};
pub use interpreter::CommandInterpreter;
pub use shell::{LineSource, Shell, ShellState};
pub use value::{ParamType, ParameterSpec, Value};
