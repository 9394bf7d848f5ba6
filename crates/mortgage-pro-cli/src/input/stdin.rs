use std::io::{self, Read};

/// Read the piped stdin body, if any.
///
/// Returns None when stdin is a TTY or the body is blank.
pub fn read_stdin_body() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    log::debug!("read {} bytes from stdin", trimmed.len());
    Ok(Some(trimmed.to_string()))
}
