use crate::Context;
use crate::cli::DiffArgs;
use crate::config;
use crate::differ;
use crate::ui;
use anyhow::{Context as _, Result};

pub fn run(ctx: &Context, args: DiffArgs) -> Result<()> {
    let left = config::load(&args.left)?;
    let right = config::load(&args.right)?;

    let diff = declarative::diff_configs(left, right, args.pretty)
        .context("Failed to diff configs")?;

    if args.json {
        let summary = diff.summary();
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    differ::display_diff(&diff);

    if args.pretty && !diff.pretty_diff.is_empty() {
        ui::header("Text diff (secrets masked)");
        for line in diff.pretty_diff.lines() {
            println!("{}", ui::diff_line(line));
        }
    }
    if ctx.verbose > 0 && !diff.unmodified_resources.is_empty() {
        ui::header("Unmodified resources");
        for config in &diff.unmodified_resources {
            ui::dim(&config.resource_name().to_string());
        }
    }
    Ok(())
}
