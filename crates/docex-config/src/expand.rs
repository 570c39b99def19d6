//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand environment variable references in `value`, reporting failures
/// against the config `field` they came from.
///
/// Bare `$VAR` is left alone; only the braced form is expanded.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| std::env::var(name).map(Some);
    let expanded = shellexpand::env_with_context(value, lookup).map_err(|e| {
        let message = match e.cause {
            VarError::NotPresent => format!("${{{}}} not set", e.var_name),
            VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", e.var_name),
        };
        ConfigError::EnvVar {
            field: field.to_owned(),
            message,
        }
    })?;
    Ok(expanded.into_owned())
}
