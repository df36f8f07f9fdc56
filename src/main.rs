//! Interactive console wiring a [`Shell`] to a file data store and a probe
//! executor exercising the argument coercion surface.

use anyhow::{Context, Result};
use argh::FromArgs;
use command_shell::io_adapters::EditorSource;
use command_shell::logging::{self, StderrLogger};
use command_shell::store::FileStore;
use command_shell::{Capability, ParamType, ParameterSpec, Shell, Value, bytes, render};
use regex::RegexBuilder;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

#[derive(FromArgs)]
/// Interactive command shell over a file data store and a probe executor.
struct Options {
    /// text shown before each read
    #[argh(option, default = "String::from(\"> \")")]
    prompt: String,

    /// text written after each iteration
    #[argh(option, default = "String::from(\"\\n\")")]
    separator: String,

    /// render only short error messages instead of full causal chains
    #[argh(switch)]
    terse: bool,

    /// base directory for the json data store
    #[argh(option, default = "String::from(\"DataStore\")")]
    store_dir: String,

    /// arguments forwarded to shell initialization
    #[argh(positional, greedy)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let options: Options = argh::from_env();

    logging::init(Box::new(StderrLogger))?;
    logging::log_info("starting command shell");

    let mut shell = Shell::new(
        Box::new(EditorSource::new()?),
        Box::new(io::stdout()),
        Box::new(io::stderr()),
    );
    shell.prompt = options.prompt;
    shell.separator = options.separator;
    shell.verbose_errors = !options.terse;

    let store = Rc::new(RefCell::new(FileStore::<String>::new(
        &options.store_dir,
        "entries",
    )));
    shell
        .interpreter_mut()
        .register_executor(
            "data",
            store,
            data_capability(),
            Some(render::default_result_handler()),
        )?;

    let probe = Rc::new(RefCell::new(Probe::default()));
    shell
        .interpreter_mut()
        .register_executor(
            "probe",
            probe,
            probe_capability(),
            Some(render::default_result_handler()),
        )?;

    shell.run(&options.args)?;
    logging::log_info("shell terminated");
    Ok(())
}

/// Operations exposed on the file data store: `get`, `getall`, `set`, and a
/// regex `find` over the stored values.
fn data_capability() -> Capability<FileStore<String>> {
    Capability::builder()
        .operation(
            "get",
            vec![ParameterSpec::required("key", ParamType::String)],
            |store: &mut FileStore<String>, args| {
                Ok(match store.get(args[0].as_str()?)? {
                    Some(value) => Value::Str(value),
                    None => Value::Unit,
                })
            },
        )
        .operation("getall", vec![], |store, _| {
            Ok(Value::List(store.get_all()?))
        })
        .operation(
            "set",
            vec![
                ParameterSpec::required("key", ParamType::String),
                ParameterSpec::required("value", ParamType::String),
            ],
            |store, args| {
                store.set(args[0].as_str()?, args[1].as_str()?.to_string())?;
                Ok(Value::Unit)
            },
        )
        .operation(
            "find",
            vec![
                ParameterSpec::required("pattern", ParamType::String),
                ParameterSpec::optional("ignorecase", ParamType::Bool, Value::Bool(false)),
            ],
            |store, args| {
                let pattern = args[0].as_str()?;
                let matcher = RegexBuilder::new(pattern)
                    .case_insensitive(args[1].as_bool()?)
                    .build()
                    .with_context(|| format!("invalid pattern: {}", pattern))?;
                let matches = store
                    .get_all()?
                    .into_iter()
                    .filter(|value| matcher.is_match(value))
                    .collect();
                Ok(Value::List(matches))
            },
        )
        .build()
}

/// Scratch object whose operations walk through every coercion path.
#[derive(Default)]
struct Probe {
    invocations: u64,
}

fn probe_capability() -> Capability<Probe> {
    Capability::builder()
        .operation("void", vec![], |probe: &mut Probe, _| {
            probe.invocations += 1;
            Ok(Value::Unit)
        })
        .operation(
            "integer",
            vec![ParameterSpec::required("argument", ParamType::Integer)],
            |probe, args| {
                probe.invocations += 1;
                Ok(Value::Str(format!(
                    "integer argument {}",
                    args[0].as_integer()?
                )))
            },
        )
        .operation(
            "optional",
            vec![ParameterSpec::optional(
                "argument",
                ParamType::String,
                Value::Unit,
            )],
            |probe, args| {
                probe.invocations += 1;
                Ok(Value::Str(match args[0].as_opt_str()? {
                    Some(value) => format!("optional argument \"{}\"", value),
                    None => "optional argument null".to_string(),
                }))
            },
        )
        .operation(
            "list",
            vec![ParameterSpec::variadic("argument")],
            |probe, args| {
                probe.invocations += 1;
                Ok(Value::List(args[0].as_list()?.to_vec()))
            },
        )
        .operation(
            "decode",
            vec![ParameterSpec::required("data", ParamType::Bytes)],
            |probe, args| {
                probe.invocations += 1;
                let data = args[0].as_bytes()?;
                Ok(Value::Str(format!(
                    "{} byte(s): {}",
                    data.len(),
                    bytes::to_hex_string(data)
                )))
            },
        )
        .operation(
            "mode",
            vec![ParameterSpec::required(
                "mode",
                ParamType::Enum(vec![
                    "on".to_string(),
                    "off".to_string(),
                    "auto".to_string(),
                ]),
            )],
            |probe, args| {
                probe.invocations += 1;
                Ok(Value::Str(format!("mode set to {}", args[0].as_str()?)))
            },
        )
        .operation("count", vec![], |probe, _| {
            Ok(Value::Integer(probe.invocations as i64))
        })
        .build()
}
