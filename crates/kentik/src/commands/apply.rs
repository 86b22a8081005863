//! `kentik apply` — reconcile one device spec against the platform.

use tracing::info;

use kentik_api::Client;
use kentik_core::Reconciler;

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::error::CliError;
use crate::{config, output};

pub async fn handle(args: &ApplyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let spec = super::load_spec(&args.file)?;

    let cfg = config::load_config()?;
    let settings = config::resolve(&cfg, global)?;

    info!(
        device = %spec.device_name,
        region = %settings.region,
        check = args.check,
        "reconciling device"
    );

    let client = Client::new(settings.region, &settings.credentials, &settings.transport)?;
    let outcome = Reconciler::new(&client)
        .with_check_mode(args.check)
        .reconcile(&spec)
        .await?;

    output::print_output(&output::render(&global.output, &outcome), global.quiet);
    Ok(())
}
