//! `${VAR}` references in `markmap.toml` values.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Why a referenced variable could not be substituted.
#[derive(Debug, thiserror::Error)]
enum Unresolved {
    #[error("${{{0}}} is not set")]
    Unset(String),
    #[error("${{{0}}} is not valid unicode")]
    NotUnicode(String),
}

/// Expand `${VAR}` and `${VAR:-default}` from the process environment.
///
/// `field` is the config key reported on failure. Bare `$VAR` is left
/// alone, so script URLs containing `$` survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name))
}

fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match lookup(name) {
        Ok(found) => Ok(Some(found)),
        Err(VarError::NotPresent) => Err(Unresolved::Unset(name.to_owned())),
        Err(VarError::NotUnicode(_)) => Err(Unresolved::NotUnicode(name.to_owned())),
    })
    .map(Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: e.cause.to_string(),
    })
}
