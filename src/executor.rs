//! Capability sets for executor objects and the method-resolution logic.
//!
//! An executor is an external, caller-owned object exposed to the command
//! layer as a named set of invocable operations. The integrating code builds
//! a [`Capability`] describing those operations up front — names, parameter
//! specs and invocation thunks — instead of discovering them at runtime, so
//! "any object can become an executor" without reflection.

use crate::error::ShellError;
use crate::value::{ParamType, ParameterSpec, Value, coerce};
use std::collections::HashMap;
use std::io::Write;

/// Invocation thunk: runs one operation against the bound object with an
/// already-coerced argument vector.
pub type InvokeFn<T> = Box<dyn Fn(&mut T, Vec<Value>) -> anyhow::Result<Value>>;

/// Callback receiving an operation's return value, typically to render it to
/// the shell output. Executors registered without one discard their results.
pub type ResultHandler = Box<dyn Fn(&mut dyn Write, &Value) -> anyhow::Result<()>>;

/// One invocable operation: a name, its parameter shape, and the thunk that
/// runs it.
pub struct OperationSpec<T> {
    pub name: String,
    pub params: Vec<ParameterSpec>,
    pub invoke: InvokeFn<T>,
}

impl<T> OperationSpec<T> {
    /// Number of tokens that must be supplied.
    pub fn min_arity(&self) -> usize {
        self.params.iter().filter(|param| param.required).count()
    }

    /// Number of tokens that can be consumed; `None` when a trailing
    /// `StringList` makes the operation variadic.
    pub fn max_arity(&self) -> Option<usize> {
        if self
            .params
            .last()
            .is_some_and(|param| param.ty == ParamType::StringList)
        {
            None
        } else {
            Some(self.params.len())
        }
    }

    fn accepts(&self, supplied: usize) -> bool {
        supplied >= self.min_arity() && self.max_arity().is_none_or(|max| supplied <= max)
    }

    /// Type-erased description of this operation for `describe` output.
    pub fn signature(&self) -> OperationSignature {
        OperationSignature {
            name: self.name.clone(),
            params: self.params.clone(),
        }
    }
}

/// The static description of an executor's invocable operations.
///
/// Built once when the executor is registered, read-only afterwards. The
/// case-insensitive name index is computed here, at construction time.
pub struct Capability<T> {
    operations: Vec<OperationSpec<T>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl<T> Capability<T> {
    pub fn builder() -> CapabilityBuilder<T> {
        CapabilityBuilder {
            operations: Vec::new(),
        }
    }

    pub fn operations(&self) -> &[OperationSpec<T>] {
        &self.operations
    }

    pub fn signatures(&self) -> Vec<OperationSignature> {
        self.operations.iter().map(OperationSpec::signature).collect()
    }

    /// Selects the unique operation matching the method name (case-insensitive)
    /// whose arity range admits `supplied` tokens.
    ///
    /// Zero matches fail with [`ShellError::MethodNotFound`], more than one
    /// with [`ShellError::AmbiguousMethod`]; a partial match is never invoked.
    pub fn resolve(&self, method: &str, supplied: usize) -> Result<&OperationSpec<T>, ShellError> {
        let candidates = self
            .by_name
            .get(&method.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut matches = candidates
            .iter()
            .map(|&index| &self.operations[index])
            .filter(|operation| operation.accepts(supplied));

        match (matches.next(), matches.next()) {
            (Some(operation), None) => Ok(operation),
            (None, _) => Err(ShellError::MethodNotFound {
                method: method.to_string(),
                supplied,
            }),
            (Some(_), Some(_)) => Err(ShellError::AmbiguousMethod {
                method: method.to_string(),
                supplied,
            }),
        }
    }
}

/// Builder listing an executor's operations.
pub struct CapabilityBuilder<T> {
    operations: Vec<OperationSpec<T>>,
}

impl<T> CapabilityBuilder<T> {
    /// Declares one operation.
    ///
    /// Parameter lists follow the trailing-optional convention: required
    /// parameters first, then optional ones, with an optional `StringList`
    /// only in last position. Violations are setup bugs and panic.
    pub fn operation<F>(mut self, name: &str, params: Vec<ParameterSpec>, invoke: F) -> Self
    where
        F: Fn(&mut T, Vec<Value>) -> anyhow::Result<Value> + 'static,
    {
        let mut seen_optional = false;
        for (index, param) in params.iter().enumerate() {
            assert!(
                !(param.required && seen_optional),
                "operation {}: required parameter {} after an optional one",
                name,
                param.name
            );
            seen_optional |= !param.required;
            assert!(
                param.ty != ParamType::StringList || index == params.len() - 1,
                "operation {}: StringList parameter {} must be last",
                name,
                param.name
            );
        }

        self.operations.push(OperationSpec {
            name: name.to_string(),
            params,
            invoke: Box::new(invoke),
        });
        self
    }

    pub fn build(self) -> Capability<T> {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, operation) in self.operations.iter().enumerate() {
            by_name
                .entry(operation.name.to_ascii_lowercase())
                .or_default()
                .push(index);
        }
        Capability {
            operations: self.operations,
            by_name,
        }
    }
}

/// Coerces the supplied tokens against the parameter list, left to right.
///
/// Positions beyond the supplied tokens take their declared default; a
/// trailing `StringList` swallows every remaining token and binds to an empty
/// list when none remain. The caller has already checked arity through
/// [`Capability::resolve`].
pub fn bind_arguments(
    params: &[ParameterSpec],
    tokens: &[String],
) -> Result<Vec<Value>, ShellError> {
    let mut values = Vec::with_capacity(params.len());
    let mut cursor = 0;

    for param in params {
        if param.ty == ParamType::StringList {
            values.push(Value::List(tokens[cursor..].to_vec()));
            cursor = tokens.len();
        } else if cursor < tokens.len() {
            values.push(coerce(&tokens[cursor], &param.ty)?);
            cursor += 1;
        } else {
            values.push(param.default.clone().unwrap_or(Value::Unit));
        }
    }
    Ok(values)
}

/// Human-readable shape of one operation, kept after the capability has been
/// type-erased into its registry command, so `describe` can print it.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSignature {
    pub name: String,
    pub params: Vec<ParameterSpec>,
}

impl OperationSignature {
    /// Formats the signature as `name(Type param, Type param = default)`.
    pub fn render(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|param| {
                let mut part = format!("{} {}", param.ty, param.name);
                if !param.required && param.ty != ParamType::StringList {
                    let default = param
                        .default
                        .as_ref()
                        .map(crate::render::to_full_string)
                        .unwrap_or_else(|| "null".to_string());
                    part.push_str(&format!(" = {}", default));
                }
                part
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, params)
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, bind_arguments};
    use crate::error::ShellError;
    use crate::value::{ParamType, ParameterSpec, Value};

    fn arithmetic() -> Capability<i64> {
        Capability::builder()
            .operation(
                "add",
                vec![
                    ParameterSpec::required("a", ParamType::Integer),
                    ParameterSpec::required("b", ParamType::Integer),
                ],
                |total, args| {
                    let sum = args[0].as_integer()? + args[1].as_integer()?;
                    *total += sum;
                    Ok(Value::Integer(sum))
                },
            )
            .operation(
                "scale",
                vec![
                    ParameterSpec::required("value", ParamType::Integer),
                    ParameterSpec::optional("factor", ParamType::Integer, Value::Integer(2)),
                ],
                |_, args| Ok(Value::Integer(args[0].as_integer()? * args[1].as_integer()?)),
            )
            .operation(
                "join",
                vec![ParameterSpec::variadic("parts")],
                |_, args| Ok(Value::Str(args[0].as_list()?.join("+"))),
            )
            .build()
    }

    #[test]
    fn test_resolve_matches_name_case_insensitively() {
        let capability = arithmetic();
        assert_eq!(capability.resolve("ADD", 2).unwrap().name, "add");
        assert_eq!(capability.resolve("Add", 2).unwrap().name, "add");
    }

    #[test]
    fn test_resolve_rejects_wrong_arity() {
        let capability = arithmetic();
        assert!(matches!(
            capability.resolve("add", 1),
            Err(ShellError::MethodNotFound { supplied: 1, .. })
        ));
        assert!(matches!(
            capability.resolve("add", 3),
            Err(ShellError::MethodNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_optional_widens_the_arity_range() {
        let capability = arithmetic();
        assert!(capability.resolve("scale", 1).is_ok());
        assert!(capability.resolve("scale", 2).is_ok());
        assert!(capability.resolve("scale", 0).is_err());
    }

    #[test]
    fn test_resolve_variadic_accepts_any_count() {
        let capability = arithmetic();
        for supplied in [0, 1, 5] {
            assert!(capability.resolve("join", supplied).is_ok());
        }
    }

    #[test]
    fn test_resolve_unknown_method() {
        assert!(matches!(
            arithmetic().resolve("subtract", 2),
            Err(ShellError::MethodNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_reports_overlapping_overloads_as_ambiguous() {
        let capability: Capability<()> = Capability::builder()
            .operation(
                "run",
                vec![ParameterSpec::optional(
                    "x",
                    ParamType::String,
                    Value::Unit,
                )],
                |_, _| Ok(Value::Unit),
            )
            .operation("run", vec![], |_, _| Ok(Value::Unit))
            .build();
        assert!(matches!(
            capability.resolve("run", 0),
            Err(ShellError::AmbiguousMethod { supplied: 0, .. })
        ));
        // only one overload takes a token
        assert!(capability.resolve("run", 1).is_ok());
    }

    #[test]
    fn test_bind_fills_omitted_optionals_with_defaults() {
        let params = vec![
            ParameterSpec::required("value", ParamType::Integer),
            ParameterSpec::optional("factor", ParamType::Integer, Value::Integer(2)),
        ];
        let bound = bind_arguments(&params, &["21".to_string()]).unwrap();
        assert_eq!(bound, vec![Value::Integer(21), Value::Integer(2)]);

        let bound = bind_arguments(&params, &["21".to_string(), "3".to_string()]).unwrap();
        assert_eq!(bound, vec![Value::Integer(21), Value::Integer(3)]);
    }

    #[test]
    fn test_bind_variadic_takes_all_remaining_tokens() {
        let params = vec![
            ParameterSpec::required("first", ParamType::Integer),
            ParameterSpec::variadic("rest"),
        ];
        let tokens: Vec<String> = ["1", "a", "b"].iter().map(|s| s.to_string()).collect();
        let bound = bind_arguments(&params, &tokens).unwrap();
        assert_eq!(
            bound,
            vec![
                Value::Integer(1),
                Value::List(vec!["a".to_string(), "b".to_string()]),
            ]
        );

        let bound = bind_arguments(&params, &["1".to_string()]).unwrap();
        assert_eq!(bound[1], Value::List(Vec::new()));
    }

    #[test]
    fn test_bind_surfaces_coercion_failures() {
        let params = vec![ParameterSpec::required("a", ParamType::Integer)];
        assert!(matches!(
            bind_arguments(&params, &["oops".to_string()]),
            Err(ShellError::Coercion { .. })
        ));
    }

    #[test]
    fn test_signature_render() {
        let capability = arithmetic();
        let signatures = capability.signatures();
        assert_eq!(signatures[0].render(), "add(Integer a, Integer b)");
        assert_eq!(
            signatures[1].render(),
            "scale(Integer value, Integer factor = 2)"
        );
        assert_eq!(signatures[2].render(), "join(StringList parts)");
    }

    #[test]
    #[should_panic(expected = "must be last")]
    fn test_builder_rejects_non_trailing_variadic() {
        let _ = Capability::<()>::builder().operation(
            "bad",
            vec![
                ParameterSpec::variadic("items"),
                ParameterSpec::required("after", ParamType::Integer),
            ],
            |_, _| Ok(Value::Unit),
        );
    }

    #[test]
    #[should_panic(expected = "after an optional one")]
    fn test_builder_rejects_required_after_optional() {
        let _ = Capability::<()>::builder().operation(
            "bad",
            vec![
                ParameterSpec::optional("x", ParamType::String, Value::Unit),
                ParameterSpec::required("y", ParamType::Integer),
            ],
            |_, _| Ok(Value::Unit),
        );
    }
}
