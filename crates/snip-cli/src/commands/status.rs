//! Status command implementation

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use snip_core::{IdentityKey, RecordStatus, RecordStore, record_status};

use super::load_config;
use crate::error::Result;

#[derive(Serialize)]
struct StatusOutput<'a> {
    index: String,
    sources: usize,
    records: &'a [RecordStatus],
}

/// Run the status command
pub fn run_status(cwd: &Path, config: &Path, json: bool) -> Result<()> {
    let loaded = load_config(cwd, config)?;
    let (settings, sources) = loaded
        .config
        .map(|c| (c.settings, c.sources.len()))
        .unwrap_or_default();

    let index_path = settings.index_path().resolve_against(&loaded.root);
    let records = RecordStore::load(&index_path);
    let statuses = record_status(&loaded.root, &records);

    if json {
        let output = StatusOutput {
            index: index_path.to_string(),
            sources,
            records: &statuses,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Snippet Status".bold());
    println!();
    println!("{}:    {}", "Index".dimmed(), index_path);
    println!("{}:  {}", "Sources".dimmed(), sources);
    println!("{}:  {}", "Records".dimmed(), statuses.len());

    if statuses.is_empty() {
        println!();
        println!(
            "  {} (run {} to collect snippets)",
            "None".dimmed(),
            "snip extract".cyan()
        );
        return Ok(());
    }

    for (document, entries) in group_by_document(&statuses) {
        println!();
        println!("{}:", document.bold());
        for status in entries {
            let state = if !status.valid_key {
                "INVALID KEY".red().bold()
            } else if status.exists {
                "OK".green().bold()
            } else {
                "MISSING".yellow().bold()
            };
            println!("  {} {} -> {}", state, status.key, status.location.cyan());
        }
    }

    Ok(())
}

/// Group records under their `{collection}_{file}` key prefix.
fn group_by_document(statuses: &[RecordStatus]) -> BTreeMap<String, Vec<&RecordStatus>> {
    let mut groups: BTreeMap<String, Vec<&RecordStatus>> = BTreeMap::new();
    for status in statuses {
        let document = IdentityKey::parse(&status.key)
            .map(|key| key.prefix().to_string())
            .unwrap_or_else(|| "(unrecognized)".to_string());
        groups.entry(document).or_default().push(status);
    }
    groups
}
