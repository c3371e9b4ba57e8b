//! Options loader with TOML parsing and environment variable overrides

use super::schema::RepositoryOptions;
use crate::config::secret_string;
use crate::domain::{RepositoryError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads repository options from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`RepositoryOptions`]
/// 4. Applies environment variable overrides (`COSMOS_REPOSITORY_*` prefix)
/// 5. Validates the options
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read, a referenced
/// environment variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cosmos_repository::config::load_options;
///
/// let options = load_options("repository.toml").expect("failed to load options");
/// ```
pub fn load_options(path: impl AsRef<Path>) -> Result<RepositoryOptions> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RepositoryError::Configuration(format!(
            "options file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RepositoryError::Configuration(format!(
            "failed to read options file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut options: RepositoryOptions = toml::from_str(&contents)
        .map_err(|e| RepositoryError::Configuration(format!("failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut options);

    options
        .validate()
        .map_err(|e| RepositoryError::Configuration(format!("options validation failed: {e}")))?;

    Ok(options)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// # Errors
///
/// Returns a configuration error listing every referenced variable that is
/// not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RepositoryError::Configuration(format!(
            "missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `COSMOS_REPOSITORY_*` prefix
///
/// Container entries are addressed by key, for example
/// `COSMOS_REPOSITORY_CONTAINER_ORDERS_NAME` overrides the container name of
/// the `orders` entry.
fn apply_env_overrides(options: &mut RepositoryOptions) {
    if let Ok(val) = std::env::var("COSMOS_REPOSITORY_ENDPOINT_URI") {
        options.endpoint_uri = val;
    }
    if let Ok(val) = std::env::var("COSMOS_REPOSITORY_PRIMARY_KEY") {
        options.primary_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("COSMOS_REPOSITORY_DATABASE_ID") {
        options.database_id = val;
    }
    if let Ok(val) = std::env::var("COSMOS_REPOSITORY_CONNECTION_MODE") {
        if let Ok(mode) = serde_json::from_value(serde_json::Value::String(val)) {
            options.connection_mode = mode;
        }
    }

    let container_keys: Vec<String> = options.containers.keys().cloned().collect();
    for key in container_keys {
        let env_key = key.to_uppercase().replace('-', "_");

        if let Ok(val) = std::env::var(format!("COSMOS_REPOSITORY_CONTAINER_{env_key}_NAME")) {
            if let Some(container) = options.containers.get_mut(&key) {
                container.container_name = val;
            }
        }
        if let Ok(val) =
            std::env::var(format!("COSMOS_REPOSITORY_CONTAINER_{env_key}_PARTITION_KEY"))
        {
            if let Some(container) = options.containers.get_mut(&key) {
                container.partition_key = val;
            }
        }
    }
}
