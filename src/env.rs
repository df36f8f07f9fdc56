/// Mutable shell state visible to command actions.
///
/// Holds the arguments the shell was invoked with and the flag the `exit`
/// command raises so the read-dispatch-print loop knows to stop after the
/// current iteration.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Argument line provided with the shell invocation in the hosting
    /// program, available to commands during and after initialization.
    pub args: Vec<String>,
    /// When set to true, the loop terminates after finishing this iteration.
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn test_new_environment_does_not_ask_to_exit() {
        let env = Environment::new();
        assert!(!env.should_exit);
        assert!(env.args.is_empty());
    }
}
