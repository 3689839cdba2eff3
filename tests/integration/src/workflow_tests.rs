//! Configuration-driven runs across several themes.

use pretty_assertions::assert_eq;
use snip_core::{
    AutoDecider, BlockAction, Extractor, FsOutput, IdentityKey, MatchTier, MemoryOutput,
    RecordStore, RunOptions, RunReport, SnippetConfig, record_status,
};
use snip_fs::NormalizedPath;
use snip_test_utils::{TestWorkspace, css};

fn run_config(ws: &TestWorkspace, config: &str) -> RunReport {
    let config = SnippetConfig::load(&NormalizedPath::new(ws.path(config))).unwrap();
    let mut extractor =
        Extractor::open(ws.root(), config.settings, FsOutput::new(ws.root())).unwrap();
    let report = extractor.run(&config.sources, &mut AutoDecider::new(), RunOptions::default());
    extractor.save().unwrap();
    report
}

#[test]
fn test_themes_with_same_file_name_stay_apart() {
    let ws = TestWorkspace::new();
    ws.write("minimal/theme.css", &css::sample_theme());
    ws.write("things/theme.css", &css::sample_theme());
    ws.write_config(&[("minimal/theme.css", "minimal"), ("things/theme.css", "things")]);

    let report = run_config(&ws, "snippets.toml");

    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.total_blocks(), 4);
    let index = ws.index();
    assert_eq!(index.len(), 4);
    assert!(index.contains_key("minimal_theme.css_3_6"));
    assert!(index.contains_key("things_theme.css_3_6"));
    ws.assert_file_contains("snippets/things/dark-toggle.md", "`things` theme");

    let records = RecordStore::load(&NormalizedPath::new(ws.path("snippets/index.json")));
    let statuses = record_status(&NormalizedPath::new(ws.root()), &records);
    assert_eq!(statuses.len(), 4);
    assert!(statuses.iter().all(|s| s.exists && s.valid_key));
}

#[test]
fn test_custom_marker_and_output_dir() {
    let ws = TestWorkspace::new();
    ws.write(
        "theme.css",
        "/* my-snips START pill */\n.pill { border-radius: 99px; }\n/* MY-SNIPS end */\n\
         /* obsi-snip-coll start ignored */\n.x {}\n/* obsi-snip-coll end */\n",
    );
    ws.write(
        "collect.json",
        r#"{
  "settings": { "output_dir": "build/snips", "marker": "my-snips", "proximity": 5 },
  "sources": [{ "path": "theme.css", "name": "pills" }]
}"#,
    );

    let report = run_config(&ws, "collect.json");

    assert_eq!(report.total_blocks(), 1);
    ws.assert_file_contains("build/snips/pills/pill.css", ".pill { border-radius: 99px; }");
    ws.assert_file_contains("build/snips/pills/pill.md", "author: Unknown Author");
    ws.assert_file_exists("build/snips/index.json");
}

#[test]
fn test_broken_marker_in_config_is_rejected() {
    let ws = TestWorkspace::new();
    ws.write("snippets.toml", "[settings]\nmarker = \"two words\"\n");

    let config = SnippetConfig::load(&NormalizedPath::new(ws.path("snippets.toml"))).unwrap();
    let result = Extractor::open(ws.root(), config.settings, FsOutput::new(ws.root()));

    assert!(result.is_err());
}

#[test]
fn test_dry_run_reads_disk_but_writes_memory() {
    let ws = TestWorkspace::new();
    ws.write("theme.css", &css::sample_theme());
    ws.write_config(&[("theme.css", "minimal")]);
    run_config(&ws, "snippets.toml");
    let index_before = ws.read("snippets/index.json");

    let moved = format!("{}\n{}", css::filler_rules(40), css::sample_theme());
    ws.write("theme.css", &moved);
    let config = SnippetConfig::load(&NormalizedPath::new(ws.path("snippets.toml"))).unwrap();
    let output = MemoryOutput::over(FsOutput::new(ws.root()));
    let mut extractor = Extractor::open(ws.root(), config.settings, output).unwrap();
    let report = extractor.run(&config.sources, &mut AutoDecider::new(), RunOptions::default());

    let tiers: Vec<_> = report.documents[0]
        .blocks
        .iter()
        .map(|b| match b.action {
            BlockAction::Updated { tier, .. } => Some(tier),
            _ => None,
        })
        .collect();
    assert_eq!(tiers, vec![Some(MatchTier::Content); 2]);
    let moved_key = IdentityKey::parse("minimal_theme.css_43_46").unwrap();
    assert!(extractor.records().contains(&moved_key));
    assert_eq!(
        extractor.output().get("snippets/minimal/dark-toggle.css"),
        Some(".theme-dark .toggle {\n  background: var(--accent);\n}")
    );
    assert_eq!(ws.read("snippets/index.json"), index_before);
}
