//! Report output

use std::io::Write;
use std::path::Path;

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

/// Pretty-printed JSON for `value`
pub fn render<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` to `path`, or to stdout when no path is given
pub fn emit<T: Serialize>(value: &T, path: Option<&Path>) -> AppResult<()> {
    let json = render(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, format!("{json}\n")).map_err(|e| {
                AppError::internal(format!("Failed to write report to {}", path.display()))
                    .with_source(e)
            })?;
            tracing::info!(path = %path.display(), "Report saved");
            println!("Report saved to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent::CheckReport;

    #[test]
    fn test_emit_to_file() {
        let path = std::env::temp_dir().join(format!("vendor-check-{}.json", std::process::id()));
        let report = CheckReport::failed("Acme", "boom");

        emit(&report, Some(&path)).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written["vendor"], "Acme");
        assert_eq!(written["status"], "error");
        assert_eq!(written["error"], "boom");
        assert!(written.get("report").is_none());
    }

    #[test]
    fn test_render_is_pretty() {
        let json = render(&CheckReport::completed("Acme", "all clear")).unwrap();
        assert!(json.contains("\n  \"vendor\": \"Acme\""));
    }
}
