//! Purge command handler.

use netwatch_core::{Monitor, PurgeConfirmation};

use crate::cli::{GlobalOpts, PurgeArgs};
use crate::error::CliError;
use crate::output;

use super::{category, util};

pub async fn handle(monitor: &Monitor, args: PurgeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let category = category(args.category);

    if !util::confirm(
        &format!(
            "Delete ALL stored {} history on {}? This cannot be undone.",
            category.label(),
            monitor.config().url
        ),
        &format!("purge {category}"),
        global.yes,
    )? {
        if !global.quiet {
            eprintln!("Purge cancelled");
        }
        return Ok(());
    }

    let receipt = monitor
        .purge(category, PurgeConfirmation::confirm(category))
        .await?;

    if !global.quiet {
        let color = output::should_color(&global.color_mode());
        let message = receipt
            .message
            .unwrap_or_else(|| format!("{} history deleted", category.label()));
        eprintln!("{}", output::done(&message, color));
    }
    Ok(())
}
