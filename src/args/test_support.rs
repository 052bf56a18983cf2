use clap::Parser;

use crate::error::{AppError, AppResult};

use super::JetterArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<JetterArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    JetterArgs::try_parse_from(args).map_err(AppError::from)
}
