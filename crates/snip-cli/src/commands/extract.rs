//! Extract command implementation
//!
//! Loads the configuration, runs the extractor over every source and prints
//! a per-document summary.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use snip_core::{
    AutoDecider, BlockAction, BlockOutcome, Decider, DocumentReport, Extractor, FsOutput,
    MemoryOutput, RunOptions, RunReport, Settings, SourceConfig,
};
use snip_fs::NormalizedPath;

use super::{LoadedConfig, load_config};
use crate::cli::SourceArgs;
use crate::error::{CliError, Result};
use crate::interactive::PromptDecider;

/// Flags of one `snip extract` invocation.
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    pub yes: bool,
    pub accept_ambiguous: bool,
    pub prune: bool,
    pub dry_run: bool,
    pub json: bool,
    pub source: SourceArgs,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    dry_run: bool,
    #[serde(flatten)]
    report: &'a RunReport,
    /// Locations a dry run would have written.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pending_writes: Vec<String>,
}

/// Run the extract command
pub fn run_extract(cwd: &Path, config: &Path, args: &ExtractArgs) -> Result<()> {
    let loaded = load_config(cwd, config)?;
    let (settings, sources) = select_sources(cwd, &loaded, &args.source)?;

    if !args.json {
        println!(
            "{} Extracting snippets from {} source(s){}...",
            "=>".blue().bold(),
            sources.len(),
            if args.dry_run { " (dry run)" } else { "" }
        );
    }

    let mut decider: Box<dyn Decider> = if args.yes {
        Box::new(AutoDecider {
            accept_ambiguous: args.accept_ambiguous,
        })
    } else {
        Box::new(PromptDecider::new())
    };
    let options = RunOptions { prune: args.prune };
    let root = loaded.root;

    if args.dry_run {
        let output = MemoryOutput::over(FsOutput::new(root.clone()));
        let mut extractor = Extractor::open(root, settings, output)?;
        let report = extractor.run(&sources, decider.as_mut(), options);
        let pending: Vec<String> = extractor
            .output()
            .locations()
            .map(ToString::to_string)
            .collect();
        print_report(&report, &pending, args)?;
        return Ok(());
    }

    let mut extractor = Extractor::open(root.clone(), settings, FsOutput::new(root))?;
    let report = extractor.run(&sources, decider.as_mut(), options);
    let saved = extractor.save();
    print_report(&report, &[], args)?;
    saved?;
    Ok(())
}

/// Sources to process: the single `--source`, or the configured list.
fn select_sources(
    cwd: &Path,
    loaded: &LoadedConfig,
    args: &SourceArgs,
) -> Result<(Settings, Vec<SourceConfig>)> {
    let settings = loaded
        .config
        .as_ref()
        .map(|c| c.settings.clone())
        .unwrap_or_default();

    if let Some(path) = &args.path {
        let path = if Path::new(path).is_absolute() {
            NormalizedPath::new(path)
        } else {
            NormalizedPath::new(cwd.join(path))
        };
        let source = SourceConfig {
            path: Some(path.to_string()),
            name: args.name.clone(),
            author: args.author.clone(),
            license: args.license.clone(),
            repo_url: args.repo_url.clone(),
        };
        return Ok((settings, vec![source]));
    }

    let Some(config) = &loaded.config else {
        return Err(CliError::user(format!(
            "No configuration found at {}. Create it or pass --source <PATH>.",
            loaded.path
        )));
    };
    if config.sources.is_empty() {
        return Err(CliError::user(format!(
            "No sources configured in {}",
            loaded.path
        )));
    }

    Ok((settings, config.sources.clone()))
}

fn print_report(report: &RunReport, pending: &[String], args: &ExtractArgs) -> Result<()> {
    if args.json {
        let output = ExtractOutput {
            dry_run: args.dry_run,
            report,
            pending_writes: pending.to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for document in &report.documents {
        print_document(document);
    }

    for failure in &report.failures {
        println!(
            "{} Source {} ({}): {}",
            "FAILED".red().bold(),
            failure.name.cyan(),
            failure.path.as_deref().unwrap_or("no path"),
            failure.reason
        );
    }

    if args.dry_run && !pending.is_empty() {
        println!();
        println!("{}", "Would write:".bold());
        for location in pending {
            println!("   {} {}", "+".green(), location);
        }
    }

    let (created, updated) = report.documents.iter().fold((0, 0), |(c, u), d| {
        (c + d.created(), u + d.updated())
    });
    let failed: usize = report.documents.iter().map(DocumentReport::failed).sum();

    println!();
    if report.failures.is_empty() && failed == 0 {
        println!(
            "{} {} block(s): {} created, {} updated.",
            "OK".green().bold(),
            report.total_blocks(),
            created,
            updated
        );
    } else {
        println!(
            "{} {} block(s): {} created, {} updated, {} failed, {} source(s) skipped.",
            "DONE".yellow().bold(),
            report.total_blocks(),
            created,
            updated,
            failed,
            report.failures.len()
        );
    }

    Ok(())
}

fn print_document(document: &DocumentReport) {
    println!();
    println!(
        "{}/{}",
        document.collection.bold(),
        document.file.bold()
    );

    if document.blocks.is_empty() {
        println!("   {}", "No snippets found".dimmed());
    }
    for block in &document.blocks {
        print_block(block);
    }

    for key in &document.stale {
        let pruned = document.pruned.contains(key);
        println!(
            "   {} {} ({})",
            "x".dimmed(),
            key,
            (if pruned { "pruned" } else { "stale, use --prune to remove" }).dimmed()
        );
    }
}

fn print_block(block: &BlockOutcome) {
    let location = block.location.as_deref().unwrap_or("-");
    match &block.action {
        BlockAction::Created => {
            println!("   {} {} -> {}", "+".green(), block.key, location.cyan());
        }
        BlockAction::Updated { tier, previous_key } => {
            if previous_key == &block.key {
                println!("   {} {} -> {} ({})", "~".blue(), block.key, location.cyan(), tier);
            } else {
                println!(
                    "   {} {} -> {} ({}, was {})",
                    "~".blue(),
                    block.key,
                    location.cyan(),
                    tier,
                    previous_key.dimmed()
                );
            }
        }
        BlockAction::Abandoned { existing_key } => {
            println!(
                "   {} {} (left {} unchanged)",
                "?".yellow(),
                block.key,
                existing_key.dimmed()
            );
        }
        BlockAction::Skipped => {
            println!("   {} {} (skipped, no name)", "-".yellow(), block.key);
        }
        BlockAction::Failed { reason } => {
            println!("   {} {}: {}", "!".red(), block.key, reason);
        }
    }
    if let Some(error) = &block.write_error {
        println!("   {} {}: {}", "!".red(), location, error);
    }
}
