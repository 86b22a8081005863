//! `kentik validate` — parse and normalize a spec without touching the API.

use crate::cli::{GlobalOpts, ValidateArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ValidateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let spec = super::load_spec(&args.file)?;

    // Echo the normalized spec back so callers can see applied defaults.
    output::print_output(&output::render(&global.output, &spec), global.quiet);
    Ok(())
}
