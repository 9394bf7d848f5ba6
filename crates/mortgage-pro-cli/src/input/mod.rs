pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve command input: `--input` file first, then piped stdin JSON.
///
/// Returns `None` when neither is present so the caller can fall back to
/// individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_structured(path)?));
    }
    match stdin::read_stdin_body()? {
        Some(body) => Ok(Some(serde_json::from_str(&body)?)),
        None => Ok(None),
    }
}

/// Raw request body from `--input` or stdin, for the request boundary.
pub fn read_body(path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let value: serde_json::Value = file::read_structured(path)?;
        return Ok(value.to_string());
    }
    stdin::read_stdin_body()?
        .ok_or_else(|| "--input <file> or a JSON body on stdin is required".into())
}
