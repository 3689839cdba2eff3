//! A theme evolving over several releases.
//!
//! Each step rewrites the style sheet the way a theme author would and runs a
//! fresh extraction against the state left by the previous one.

use pretty_assertions::assert_eq;
use snip_core::{
    AutoDecider, BlockAction, DocumentReport, Extractor, FsOutput, MatchTier, RunOptions,
    Settings, SourceConfig,
};
use snip_test_utils::{TestWorkspace, css};

fn source() -> SourceConfig {
    SourceConfig {
        name: "minimal".into(),
        author: "Jane Doe".into(),
        repo_url: "https://example.com/minimal".into(),
        ..SourceConfig::with_path("theme.css")
    }
}

fn release(ws: &TestWorkspace, text: &str, prune: bool) -> DocumentReport {
    ws.write("theme.css", text);
    let mut extractor =
        Extractor::open(ws.root(), Settings::default(), FsOutput::new(ws.root())).unwrap();
    let mut report = extractor.run(&[source()], &mut AutoDecider::new(), RunOptions { prune });
    extractor.save().unwrap();
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    report.documents.remove(0)
}

fn tiers(report: &DocumentReport) -> Vec<(String, Option<MatchTier>)> {
    report
        .blocks
        .iter()
        .map(|b| {
            let tier = match b.action {
                BlockAction::Updated { tier, .. } => Some(tier),
                _ => None,
            };
            (b.key.clone(), tier)
        })
        .collect()
}

fn keys(ws: &TestWorkspace) -> Vec<String> {
    ws.index().into_keys().collect()
}

#[test]
fn test_theme_lifecycle() {
    let ws = TestWorkspace::new();
    let v1 = css::sample_theme();

    // 1.0: both blocks are new
    let report = release(&ws, &v1, false);
    assert_eq!(report.created(), 2);
    assert_eq!(keys(&ws), vec!["minimal_theme.css_3_6", "minimal_theme.css_7_10"]);

    // 1.1: a license header comment and blank lines do not move anything
    let v1_1 = format!("/* Minimal theme\n   by Jane Doe */\n\n\n{}", v1);
    let report = release(&ws, &v1_1, false);
    assert_eq!(
        tiers(&report),
        vec![
            ("minimal_theme.css_3_6".to_string(), Some(MatchTier::ExactKey)),
            ("minimal_theme.css_7_10".to_string(), Some(MatchTier::ExactKey)),
        ]
    );

    // 2.0: new rules on top, one block edited
    let v2 = format!(
        "{}\n{}",
        css::filler_rules(2),
        v1.replace("background: var(--accent);", "background: var(--interactive-accent);")
    );
    let report = release(&ws, &v2, false);
    assert_eq!(
        tiers(&report),
        vec![
            ("minimal_theme.css_5_8".to_string(), Some(MatchTier::Proximate)),
            ("minimal_theme.css_9_12".to_string(), Some(MatchTier::Content)),
        ]
    );
    assert_eq!(
        ws.read("snippets/minimal/dark-toggle.css"),
        ".theme-dark .toggle {\n  background: var(--interactive-accent);\n}"
    );
    assert_eq!(keys(&ws), vec!["minimal_theme.css_5_8", "minimal_theme.css_9_12"]);

    // 3.0: the file-title block is dropped
    let v3 = v2
        .split("/* obsi-snip-coll start file-title */")
        .next()
        .unwrap()
        .to_string();
    let report = release(&ws, &v3, false);
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.stale, vec!["minimal_theme.css_9_12".to_string()]);
    assert_eq!(ws.index().len(), 2);

    // 3.0.1: prune the leftover record
    let report = release(&ws, &v3, true);
    assert_eq!(report.pruned, vec!["minimal_theme.css_9_12".to_string()]);
    assert_eq!(keys(&ws), vec!["minimal_theme.css_5_8"]);
    ws.assert_file_exists("snippets/minimal/file-title.css");
}

#[test]
fn test_descriptions_are_written_once() {
    let ws = TestWorkspace::new();
    release(&ws, &css::sample_theme(), false);
    ws.write("snippets/minimal/dark-toggle.md", "hand-edited");

    release(
        &ws,
        &css::sample_theme().replace("font-weight: 600;", "font-weight: 700;"),
        false,
    );

    assert_eq!(ws.read("snippets/minimal/dark-toggle.md"), "hand-edited");
    ws.assert_file_contains("snippets/minimal/file-title.css", "font-weight: 700;");
}

#[test]
fn test_large_reorganisation_keeps_every_snippet() {
    let ws = TestWorkspace::new();
    let blocks: Vec<String> = (0..5)
        .map(|i| {
            let name = format!("part-{}", i);
            css::block(Some(name.as_str()), &format!(".part-{} {{ order: {}; }}", i, i))
        })
        .collect();
    release(&ws, &blocks.join("\n.gap {}\n"), false);
    assert_eq!(ws.index().len(), 5);

    let mut reordered = blocks.clone();
    reordered.reverse();
    let text = format!("{}\n{}", css::filler_rules(80), reordered.join("\n.gap {}\n"));
    let report = release(&ws, &text, false);

    assert_eq!(report.created(), 0);
    assert!(report.stale.is_empty());
    assert!(tiers(&report)
        .iter()
        .all(|(_, tier)| *tier == Some(MatchTier::Content)));
    assert_eq!(ws.index().len(), 5);
    for i in 0..5 {
        ws.assert_file_contains(
            &format!("snippets/minimal/part-{}.css", i),
            &format!("order: {};", i),
        );
    }
}
