//! Spawning `npx playwright test --list --reporter=json`.
//!
//! Playwright reports configuration problems as a JSON body with an `errors`
//! array and a non-zero exit; when that happens the first message is
//! surfaced verbatim instead of the exit status.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use thiserror::Error;

/// What to ask Playwright to list. Every field is forwarded as the matching
/// CLI flag.
#[derive(Debug, Clone, Default)]
pub struct ListInvocation {
    pub projects: Vec<String>,
    pub only_changed: bool,
    pub last_failed: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("npx not found on PATH; a Node.js installation is required to run Playwright")]
    NpxMissing(#[from] which::Error),
    #[error("failed to launch Playwright: {0}")]
    Launch(#[from] std::io::Error),
    #[error("{0}")]
    Playwright(String),
    #[error("Playwright exited with {0}")]
    Failed(std::process::ExitStatus),
}

#[derive(Debug, Deserialize)]
struct ListingErrors {
    #[serde(default)]
    errors: Vec<ListingError>,
}

#[derive(Debug, Deserialize)]
struct ListingError {
    #[serde(default)]
    message: String,
}

/// Run the listing command and return its raw stdout. Stderr is inherited so
/// Playwright's own diagnostics reach the terminal unmodified.
pub fn run_playwright_list(invocation: &ListInvocation) -> Result<Vec<u8>, ListError> {
    let npx = which::which("npx")?;

    let mut args: Vec<String> = vec![
        "playwright".to_string(),
        "test".to_string(),
        "--list".to_string(),
        "--reporter=json".to_string(),
    ];
    if let Some(config) = &invocation.config {
        args.push("--config".to_string());
        args.push(config.display().to_string());
    }
    for project in &invocation.projects {
        args.push("--project".to_string());
        args.push(project.clone());
    }
    if invocation.only_changed {
        args.push("--only-changed".to_string());
    }
    if invocation.last_failed {
        args.push("--last-failed".to_string());
    }

    log::info!("running: npx {}", args.join(" "));
    let output = Command::new(npx)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()?;

    if !output.status.success() {
        if let Ok(parsed) = serde_json::from_slice::<ListingErrors>(&output.stdout) {
            if let Some(first) = parsed.errors.into_iter().next() {
                return Err(ListError::Playwright(first.message));
            }
        }
        return Err(ListError::Failed(output.status));
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_errors_deserialize() {
        let parsed: ListingErrors =
            serde_json::from_str(r#"{"errors": [{"message": "no tests found"}]}"#).unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].message, "no tests found");

        let empty: ListingErrors = serde_json::from_str("{}").unwrap();
        assert!(empty.errors.is_empty());
    }
}
