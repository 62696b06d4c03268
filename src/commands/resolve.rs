use crate::Context;
use crate::cli::ResolveArgs;
use crate::config;
use crate::ui;
use anyhow::{Context as _, Result};
use resource::name::REMOTE_SEPARATOR;
use resource::{Name, ResourceIndex};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct Match {
    name: String,
    short_name: String,
    model: String,
}

pub fn run(ctx: &Context, args: ResolveArgs) -> Result<()> {
    let local = config::load(&args.config)?;
    let remotes = load_remotes(&local, &args.remotes)?;

    let index = build_index(&local, &remotes)?;
    log::debug!("Indexed {} resources", index.len());

    let matches: Vec<Match> = resolve(&index, &args.query)?
        .into_iter()
        .map(|(name, config)| Match {
            name: name.to_string(),
            short_name: name.short_name(),
            model: config.model.clone(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if ctx.quiet {
        for m in &matches {
            println!("{}", m.name);
        }
        return Ok(());
    }

    if matches.is_empty() {
        ui::warn(&format!("No resource matches '{}'", args.query));
        return Ok(());
    }

    ui::header(&format!("Matches for '{}'", args.query));
    for m in &matches {
        ui::kv(&m.name, &m.model);
    }
    Ok(())
}

fn load_remotes(
    local: &declarative::Config,
    remotes: &[(String, PathBuf)],
) -> Result<Vec<(String, declarative::Config)>> {
    remotes
        .iter()
        .map(|(name, path)| {
            if !local.remotes.iter().any(|r| &r.name == name) {
                log::warn!("Remote '{name}' is not declared in the local config");
            }
            Ok((name.clone(), config::load(path)?))
        })
        .collect()
}

/// Index local components and services, then everything each remote
/// exposes under that remote's name
fn build_index<'a>(
    local: &'a declarative::Config,
    remotes: &'a [(String, declarative::Config)],
) -> Result<ResourceIndex<&'a resource::Config>> {
    let mut index = ResourceIndex::new();
    for config in local.components.iter().chain(&local.services) {
        index.put_by_name(&config.resource_name(), config)?;
    }
    for (remote, remote_config) in remotes {
        for config in remote_config
            .components
            .iter()
            .chain(&remote_config.services)
        {
            let name = config.resource_name().prepend_remote(remote);
            index.put_by_name(&name, config)?;
        }
    }
    Ok(index)
}

/// A query containing `/` is a full name and matches exactly. Anything else
/// is a short name. When nothing has that exact short name, names seen
/// through further remotes are tried: `arm:cam1` also matches
/// `gw:arm:cam1`, but never `cam1` or `other:cam1`.
fn resolve<'a, H>(index: &'a ResourceIndex<H>, query: &str) -> Result<Vec<(Name, &'a H)>> {
    if query.contains('/') {
        let name: Name = query
            .parse()
            .with_context(|| format!("Invalid resource name '{query}'"))?;
        return Ok(index
            .get_by_name(&name)
            .map(|handle| vec![(name, handle)])
            .unwrap_or_default());
    }

    let matches = index.find_by_short_name(query);
    if !matches.is_empty() {
        return Ok(matches);
    }
    log::debug!("No short name match for '{query}', trying remote suffixes");
    Ok(index
        .find_by_suffix(query)
        .into_iter()
        .filter(|(name, _)| is_remote_suffix(&name.short_name(), query))
        .collect())
}

/// Check if `query` is `short` itself or a tail of it starting after a `:`
fn is_remote_suffix(short: &str, query: &str) -> bool {
    match short.strip_suffix(query) {
        Some("") => true,
        Some(head) => head.ends_with(REMOTE_SEPARATOR),
        None => false,
    }
}
