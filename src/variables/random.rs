use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::error::FunctionError;

pub(super) const NAMESPACE: &str = "random";

/// Largest accepted `random.hexadecimal` length.
const MAX_HEX_LENGTH: usize = 1 << 20;

type Builtin = fn(&str) -> Result<String, FunctionError>;

pub(super) fn builtins() -> [(&'static str, Builtin); 2] {
    [("hexadecimal", hexadecimal), ("uuid", uuid)]
}

/// `n` uppercase hex digits from the OS random source.
pub(super) fn hexadecimal(argument: &str) -> Result<String, FunctionError> {
    let length: i64 = argument
        .parse()
        .map_err(|_err| FunctionError::InvalidLength {
            value: argument.to_owned(),
        })?;
    if length <= 0 {
        return Err(FunctionError::NonPositiveLength);
    }
    let length = usize::try_from(length)
        .ok()
        .filter(|len| *len <= MAX_HEX_LENGTH)
        .ok_or(FunctionError::LengthTooLarge {
            max: MAX_HEX_LENGTH,
        })?;

    let mut bytes = vec![0u8; length.div_ceil(2)];
    fill_random(&mut bytes)?;

    let mut digits = hex::encode_upper(&bytes);
    digits.truncate(length);
    Ok(digits)
}

/// Version 4, variant 10 UUID in lowercase 8-4-4-4-12 form. The argument is ignored.
pub(super) fn uuid(_argument: &str) -> Result<String, FunctionError> {
    Ok(Uuid::new_v4().to_string())
}

fn fill_random(bytes: &mut [u8]) -> Result<(), FunctionError> {
    OsRng
        .try_fill_bytes(bytes)
        .map_err(|err| FunctionError::Entropy {
            message: err.to_string(),
        })
}
