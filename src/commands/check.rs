use crate::Context;
use crate::config;
use crate::ui;
use anyhow::Result;
use std::path::Path;

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let config = config::load(path)?;
    if ctx.quiet {
        return Ok(());
    }

    ui::success(&format!("{} is valid", path.display()));
    ui::kv("remotes", &config.remotes.len().to_string());
    ui::kv("components", &config.components.len().to_string());
    ui::kv("services", &config.services.len().to_string());
    ui::kv("processes", &config.processes.len().to_string());
    ui::kv("packages", &config.packages.len().to_string());
    ui::kv("modules", &config.modules.len().to_string());
    if !config.revision.is_empty() {
        ui::kv("revision", &config.revision);
    }
    Ok(())
}
