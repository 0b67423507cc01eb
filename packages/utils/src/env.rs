//! Raw environment lookups, for values the host sets outside of our layered config

/// The variable's value if it is set (even if empty), otherwise the default
///
/// Non-UTF-8 bytes are replaced with U+FFFD, the value is still used
pub fn env_or_default(key: &str, default: &str) -> String {
    match std::env::var_os(key) {
        Some(value) => value.to_string_lossy().into_owned(),
        None => default.to_string(),
    }
}

/// Parses a boolean flag, falling back to the default when unset or unrecognized
pub fn env_as_bool(key: &str, default: bool) -> bool {
    let value = std::env::var_os(key).map(|value| value.to_string_lossy().into_owned());

    match value.as_deref() {
        Some("1" | "true" | "TRUE" | "True") => true,
        Some("0" | "false" | "FALSE" | "False") => false,
        _ => default,
    }
}
