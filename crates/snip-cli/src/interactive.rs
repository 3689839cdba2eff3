//! Interactive prompts for extraction decisions
//!
//! Uses dialoguer for terminal-based confirmation and naming.

use colored::Colorize;
use dialoguer::{Confirm, Input};
use snip_core::{AmbiguousMatch, Decider, NewSnippet, SnippetDescription};

/// Lines of block content shown before a question.
const PREVIEW_LINES: usize = 8;

/// Asks the user about ambiguous matches and new snippets.
///
/// A prompt that fails (no terminal, interrupted input) counts as declining
/// the update or skipping the snippet.
#[derive(Debug, Default)]
pub struct PromptDecider;

impl PromptDecider {
    pub fn new() -> Self {
        Self
    }
}

impl Decider for PromptDecider {
    fn confirm_update(&mut self, candidate: &AmbiguousMatch<'_>) -> bool {
        println!();
        println!(
            "{} Possible match in {} ({} lines away):",
            "?".yellow().bold(),
            candidate.document.to_string().cyan(),
            candidate.distance
        );
        println!("   {}: {}", "Existing".dimmed(), candidate.location);
        println!("   {}: {}", "Was".dimmed(), candidate.existing);
        println!("   {}: {}", "Now".dimmed(), candidate.candidate);
        print_preview(candidate.content);

        match Confirm::new()
            .with_prompt("Update the existing snippet with this block?")
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Prompt failed, declining update");
                false
            }
        }
    }

    fn describe(&mut self, snippet: &NewSnippet<'_>) -> Option<SnippetDescription> {
        println!();
        println!(
            "{} New snippet in {} ({}):",
            "+".green().bold(),
            snippet.document.to_string().cyan(),
            snippet.key
        );
        print_preview(snippet.content);

        match prompt_description(snippet) {
            Ok(Some(description)) => Some(description),
            Ok(None) => {
                println!("   {} skipped", "-".yellow());
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %snippet.key, "Prompt failed, skipping snippet");
                None
            }
        }
    }
}

fn prompt_description(
    snippet: &NewSnippet<'_>,
) -> Result<Option<SnippetDescription>, dialoguer::Error> {
    let defaults = snippet.defaults.cloned().unwrap_or_default();

    let mut name_input = Input::<String>::new()
        .with_prompt("Snippet name (empty to skip)")
        .allow_empty(true);
    if let Some(declared) = snippet.declared_name {
        name_input = name_input.default(declared.to_string());
    }
    let name = name_input.interact_text()?;
    if name.trim().is_empty() {
        return Ok(None);
    }

    let group = Input::<String>::new()
        .with_prompt("Group (subdirectory, optional)")
        .default(defaults.group)
        .allow_empty(true)
        .interact_text()?;

    let description = Input::<String>::new()
        .with_prompt("Description")
        .default(defaults.description)
        .allow_empty(true)
        .interact_text()?;

    Ok(Some(SnippetDescription {
        name: name.trim().to_string(),
        group: group.trim().to_string(),
        description,
    }))
}

fn print_preview(content: &str) {
    let lines: Vec<&str> = content.lines().collect();
    for line in lines.iter().take(PREVIEW_LINES) {
        println!("   {} {}", "|".dimmed(), line);
    }
    if lines.len() > PREVIEW_LINES {
        println!(
            "   {} {}",
            "|".dimmed(),
            format!("... {} more lines", lines.len() - PREVIEW_LINES).dimmed()
        );
    }
}
