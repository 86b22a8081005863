//! Command dispatch and shared helpers.

use std::path::Path;

use kentik_core::DeviceSpec;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub mod apply;
pub mod validate;

pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Apply(args) => apply::handle(&args, global).await,
        Command::Validate(args) => validate::handle(&args, global),
    }
}

/// Load a device spec from a JSON or YAML file.
///
/// Files with a `.yaml`/`.yml` extension parse as YAML, everything else
/// as JSON.
pub(crate) fn load_spec(path: &Path) -> Result<DeviceSpec, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::SpecFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );

    let spec_error = |reason: String| CliError::SpecFile {
        path: path.display().to_string(),
        reason,
    };

    if is_yaml {
        serde_yaml::from_str(&raw).map_err(|e| spec_error(e.to_string()))
    } else {
        serde_json::from_str(&raw).map_err(|e| spec_error(e.to_string()))
    }
}
