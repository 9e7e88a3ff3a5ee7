use std::str::FromStr;

use crate::error::{RenderError, RenderResult};

pub mod render;
pub mod server;
pub mod workers;

/// Parses the variable `name` if `lookup` has it.
fn parse_var<T, F>(lookup: &F, name: &str) -> RenderResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| RenderError::InvalidConfiguration(format!("{name}={raw:?}: {e}"))),
    }
}
