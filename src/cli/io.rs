//! JSON line output for CLI
//!
//! - One JSON object per line on stdout
//! - UTF-8 only

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write each item as one JSON line
pub fn write_lines<W: Write, T: Serialize>(out: &mut W, items: &[T]) -> CliResult<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write each item as one JSON line to stdout
pub fn write_stdout<T: Serialize>(items: &[T]) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_lines(&mut lock, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_object_per_line() {
        let mut out = Vec::new();
        write_lines(&mut out, &[json!({"file": "a.json"}), json!({"file": "b.json"})]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"file\":\"a.json\"}\n{\"file\":\"b.json\"}\n");
    }
}
