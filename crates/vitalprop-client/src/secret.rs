//! Secret reference resolver.
//!
//! The Supabase service key in `config.toml` may point at a secret stored
//! elsewhere instead of holding it inline:
//!
//! - `pass::path/in/store` runs `pass show path/in/store` and keeps the first line
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - anything else is used verbatim

const PASS_PREFIX: &str = "pass::";
const ENV_PREFIX: &str = "env::";

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix(PASS_PREFIX) {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix(ENV_PREFIX) {
        resolve_env(var)
    } else {
        Ok(value.to_string())
    }
}

/// Returns true if `value` refers to a secret rather than holding it.
pub fn is_reference(value: &str) -> bool {
    value.starts_with(PASS_PREFIX) || value.starts_with(ENV_PREFIX)
}

fn resolve_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            stderr.trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

fn resolve_env(var: &str) -> Result<String, String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => Err(format!("environment variable `{}` is empty", var)),
        Err(_) => Err(format!("environment variable `{}` is not set", var)),
    }
}
