use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("error in variable '{variable}': unsupported namespace '{namespace}'")]
    UnsupportedNamespace { variable: String, namespace: String },
    #[error("error in variable '{variable}': unsupported {namespace} function: {function}")]
    UnsupportedFunction {
        variable: String,
        namespace: String,
        function: String,
    },
    #[error("error in variable '{variable}': {source}")]
    Function {
        variable: String,
        #[source]
        source: FunctionError,
    },
}

/// Failure raised by a single namespace function while producing its value.
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("invalid argument '{value}' for random.hexadecimal, must be integer")]
    InvalidLength { value: String },
    #[error("length must be > 0")]
    NonPositiveLength,
    #[error("length must be <= {max}")]
    LengthTooLarge { max: usize },
    #[error("failed to read random bytes: {message}")]
    Entropy { message: String },
}
