mod app;
mod config;
mod http;
mod inject;
mod parse;
mod resolve;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use inject::InjectError;
pub use parse::ParseError;
pub use resolve::{FunctionError, ResolveError};
pub use validation::ValidationError;
