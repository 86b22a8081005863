//! Output rendering: JSON (pretty or compact) and YAML.

use std::io::{self, Write};

use crate::cli::OutputFormat;

/// Render a serde-serializable value in the chosen format.
pub fn render<T: serde::Serialize>(format: &OutputFormat, data: &T) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(data).expect("serialization should not fail")
        }
        OutputFormat::Yaml => serde_yaml::to_string(data).expect("serialization should not fail"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
