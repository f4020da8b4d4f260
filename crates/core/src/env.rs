//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns
///   `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Parse an optional environment variable: unset means `None`, an
/// unparseable value logs a warning and also yields `None`.
pub fn env_parse_optional<T: std::str::FromStr>(var: &str) -> Option<T> {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(var, value = %v, "invalid env var value, ignoring");
                None
            },
        },
        Err(_) => None,
    }
}

/// Parse a comma-separated list of integer IDs from an environment
/// variable. Unparseable entries are skipped with a warning.
#[must_use]
pub fn env_id_list(var: &str) -> Vec<i64> {
    let Ok(raw) = std::env::var(var) else {
        return Vec::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(var, entry = s, "invalid ID in env var list, skipping");
                None
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_HERALD_PARSE_VALID_31847";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_HERALD_PARSE_INVALID_31848";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "TEST_HERALD_PARSE_MISSING_31849";
        unsafe { std::env::remove_var(var_name) };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_parse_optional_missing() {
        let var_name = "TEST_HERALD_OPT_MISSING_31850";
        unsafe { std::env::remove_var(var_name) };
        let result: Option<f64> = env_parse_optional(var_name);
        assert_eq!(result, None);
    }

    #[test]
    fn test_env_parse_optional_set() {
        let var_name = "TEST_HERALD_OPT_SET_31851";
        unsafe { std::env::set_var(var_name, "14.99") };
        let result: Option<f64> = env_parse_optional(var_name);
        assert_eq!(result, Some(14.99));
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_id_list() {
        let var_name = "TEST_HERALD_ID_LIST_31852";
        unsafe { std::env::set_var(var_name, "61, 35,x, 6") };
        assert_eq!(env_id_list(var_name), vec![61, 35, 6]);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_id_list_missing() {
        let var_name = "TEST_HERALD_ID_LIST_MISSING_31853";
        unsafe { std::env::remove_var(var_name) };
        assert!(env_id_list(var_name).is_empty());
    }
}
