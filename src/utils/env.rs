/// Get environment variable with SUBTRACK_ prefix, falling back to unprefixed version
///
/// This helper function checks for `SUBTRACK_{key}` first, then falls back to `{key}`
/// for compatibility with standard environment variable naming.
///
/// # Examples
///
/// ```rust
/// use subtrack::utils::get_env_with_prefix;
///
/// // Checks SUBTRACK_STORAGE_BACKEND first, then STORAGE_BACKEND
/// let backend = get_env_with_prefix("STORAGE_BACKEND");
///
/// // Checks SUBTRACK_LOG_LEVEL first, then LOG_LEVEL
/// let level = get_env_with_prefix("LOG_LEVEL");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("SUBTRACK_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}
