//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// `${VAR}` references without a default.
static REQUIRED_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid env var regex"));

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(missing) = REQUIRED_VAR
        .captures_iter(value)
        .map(|caps| caps[1].to_owned())
        .find(|var| std::env::var(var).is_err())
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{missing}}} not set"),
        });
    }

    shellexpand::env_with_context(value, |var| {
        Ok::<_, std::env::VarError>(std::env::var(var).ok())
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}}: {}", e.var_name, e.cause),
    })
}
