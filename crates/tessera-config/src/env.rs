use std::sync::LazyLock;

use regex::Regex;

/// `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#).expect("must be valid regex")
});

/// Failure to expand a placeholder
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    /// Variable unset and no default given
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),
    /// Placeholder not in the `env.` scope
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

/// Expand environment placeholders in raw TOML text
///
/// Runs before deserialization so config structs hold plain values.
/// Comment lines pass through untouched.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    input.split_inclusive('\n').map(expand_line).collect()
}

fn expand_line(line: &str) -> Result<String, ExpandError> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, ExpandError> {
    let Some(var) = key.strip_prefix("env.").filter(|v| !v.is_empty() && !v.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_owned()));
    };

    match (std::env::var(var), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(ExpandError::MissingVar(var.to_owned())),
    }
}
