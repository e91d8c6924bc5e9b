//! services/api/src/bin/openapi.rs
//!
//! Dumps the OpenAPI document of the relay API as pretty JSON.
//!
//! The target is the first command-line argument, else `OPENAPI_OUT`, else
//! `openapi.json` in the working directory. Parent directories are created.

use api_lib::web::rest::ApiDoc;
use std::path::{Path, PathBuf};
use tracing::info;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn output_path(arg: Option<String>, env_value: Option<String>) -> PathBuf {
    arg.or(env_value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

fn write_document(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, ApiDoc::openapi().to_pretty_json()?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let path = output_path(std::env::args().nth(1), std::env::var("OPENAPI_OUT").ok());
    write_document(&path)?;
    info!("OpenAPI document written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_wins_over_environment_and_default() {
        assert_eq!(
            output_path(Some("cli.json".into()), Some("env.json".into())),
            PathBuf::from("cli.json")
        );
        assert_eq!(output_path(None, Some("env.json".into())), PathBuf::from("env.json"));
        assert_eq!(output_path(None, None), PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn written_document_describes_the_request_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/openapi.json");

        write_document(&path).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(doc["paths"]["/api/request"]["post"].is_object());
    }
}
