use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::error::{FunctionError, ResolveError};

use super::random;

/// A namespace function: takes the raw argument text, returns the substituted value.
pub type VariableFunction = Arc<dyn Fn(&str) -> Result<String, FunctionError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError {
    pub message: String,
}

/// Maps `(namespace, function)` pairs to their evaluators.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    namespaces: BTreeMap<String, BTreeMap<String, VariableFunction>>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (function, evaluator) in random::builtins() {
            if let Err(err) = registry.register(random::NAMESPACE, function, evaluator) {
                tracing::warn!("Skipping duplicate builtin function: {}", err.message);
            }
        }
        registry
    }

    /// Registers `namespace.function`.
    ///
    /// # Errors
    ///
    /// Returns an error when the pair is already registered.
    pub fn register<F>(
        &mut self,
        namespace: &str,
        function: &str,
        evaluator: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&str) -> Result<String, FunctionError> + Send + Sync + 'static,
    {
        let functions = self.namespaces.entry(namespace.to_owned()).or_default();
        if functions.contains_key(function) {
            return Err(RegistryError {
                message: format!("Function already registered: {}.{}", namespace, function),
            });
        }
        functions.insert(function.to_owned(), Arc::new(evaluator));
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, namespace: &str, function: &str) -> bool {
        self.namespaces
            .get(namespace)
            .is_some_and(|functions| functions.contains_key(function))
    }

    /// Looks up the evaluator for a placeholder found in `variable`.
    ///
    /// # Errors
    ///
    /// Returns an error when the namespace or the function is unknown.
    pub fn resolve(
        &self,
        variable: &str,
        namespace: &str,
        function: &str,
    ) -> Result<&VariableFunction, ResolveError> {
        let functions =
            self.namespaces
                .get(namespace)
                .ok_or_else(|| ResolveError::UnsupportedNamespace {
                    variable: variable.to_owned(),
                    namespace: namespace.to_owned(),
                })?;
        functions
            .get(function)
            .ok_or_else(|| ResolveError::UnsupportedFunction {
                variable: variable.to_owned(),
                namespace: namespace.to_owned(),
                function: function.to_owned(),
            })
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for (namespace, functions) in &self.namespaces {
            for function in functions.keys() {
                list.entry(&format_args!("{}.{}", namespace, function));
            }
        }
        list.finish()
    }
}

pub fn function_registry() -> &'static FunctionRegistry {
    static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FunctionRegistry::with_builtins)
}
