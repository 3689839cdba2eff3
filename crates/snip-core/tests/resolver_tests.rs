//! Tier-by-tier tests for the identity resolver.

use pretty_assertions::assert_eq;
use rstest::rstest;
use snip_blocks::Block;
use snip_core::{
    Candidate, DocumentId, IdentityKey, IdentityResolver, MatchTier, MemoryOutput, MetadataEntry,
    MetadataStore, Record, Resolution, SnippetOutput,
};
use snip_fs::NormalizedPath;

fn doc() -> DocumentId {
    DocumentId::new("minimal", "theme.css")
}

fn block(content: &str, start: usize, end: usize, name: Option<&str>) -> Block {
    Block {
        content: content.to_string(),
        name: name.map(str::to_string),
        start_line: start,
        end_line: end,
        raw_start_line: start,
        raw_end_line: end,
    }
}

/// Records with stored content written to a memory output.
struct Fixture {
    records: Vec<Record>,
    output: MemoryOutput,
}

impl Fixture {
    fn new(entries: &[(usize, usize, &str, Option<&str>)]) -> Self {
        let mut output = MemoryOutput::new();
        let records = entries
            .iter()
            .map(|(start, end, location, content)| {
                let location = NormalizedPath::new(location);
                if let Some(content) = content {
                    output.write_snippet(&location, content).unwrap();
                }
                Record {
                    key: IdentityKey::new(&doc(), *start, *end),
                    location,
                }
            })
            .collect();
        Self { records, output }
    }

    fn resolve(&self, block: &Block) -> Resolution {
        self.resolve_with(block, &MetadataStore::new(), IdentityResolver::default())
    }

    fn resolve_with(&self, block: &Block, metadata: &MetadataStore, resolver: IdentityResolver) -> Resolution {
        let document = doc();
        let key = IdentityKey::new(&document, block.start_line, block.end_line);
        let candidate = Candidate {
            document: &document,
            key: &key,
            block,
        };
        resolver.resolve(&candidate, &self.records, &self.output, metadata)
    }
}

fn update(start: usize, end: usize, location: &str, tier: MatchTier) -> Resolution {
    Resolution::Update {
        key: IdentityKey::new(&doc(), start, end),
        location: NormalizedPath::new(location),
        tier,
    }
}

#[test]
fn test_content_match_survives_large_move() {
    let fixture = Fixture::new(&[(5, 8, "s/a.css", Some(".a {\n  color: red;\n}"))]);
    let moved = block(".a{color:red;}", 120, 123, None);

    assert_eq!(fixture.resolve(&moved), update(5, 8, "s/a.css", MatchTier::Content));
}

#[test]
fn test_content_match_ignores_comments() {
    let fixture = Fixture::new(&[(5, 8, "s/a.css", Some("/* accent */\n.a { color: red; }"))]);
    let moved = block(".a { color: red; } /* changed note */", 90, 95, None);

    assert_eq!(fixture.resolve(&moved), update(5, 8, "s/a.css", MatchTier::Content));
}

#[test]
fn test_same_content_and_key_reports_exact_match() {
    let fixture = Fixture::new(&[
        (1, 3, "s/other.css", Some(".b{}")),
        (4, 6, "s/a.css", Some(".a{}")),
    ]);
    let unchanged = block(".a{}", 4, 6, None);

    assert_eq!(fixture.resolve(&unchanged), update(4, 6, "s/a.css", MatchTier::ExactKey));
}

#[test]
fn test_content_match_wins_over_different_exact_key_record() {
    let fixture = Fixture::new(&[
        (4, 6, "s/holder.css", Some(".old{}")),
        (20, 22, "s/a.css", Some(".a{}")),
    ]);
    let candidate = block(".a{}", 4, 6, None);

    assert_eq!(fixture.resolve(&candidate), update(20, 22, "s/a.css", MatchTier::Content));
}

#[test]
fn test_exact_key_when_content_changed() {
    let fixture = Fixture::new(&[(4, 6, "s/a.css", Some(".a{color:red}"))]);
    let edited = block(".a{color:blue}", 4, 6, None);

    assert_eq!(fixture.resolve(&edited), update(4, 6, "s/a.css", MatchTier::ExactKey));
}

#[test]
fn test_unreadable_snippet_falls_through_to_exact_key() {
    let fixture = Fixture::new(&[(4, 6, "s/missing.css", None)]);
    let candidate = block(".a{}", 4, 6, None);

    assert_eq!(fixture.resolve(&candidate), update(4, 6, "s/missing.css", MatchTier::ExactKey));
}

#[rstest]
#[case(10, 40, true)]
#[case(10, 41, false)]
#[case(40, 10, true)]
#[case(41, 10, false)]
fn test_proximity_threshold(#[case] old_start: usize, #[case] new_start: usize, #[case] automatic: bool) {
    let fixture = Fixture::new(&[(old_start, old_start + 3, "s/a.css", Some(".a{color:red}"))]);
    let edited = block(".a{color:blue}", new_start, new_start + 3, None);

    let resolution = fixture.resolve(&edited);
    if automatic {
        assert_eq!(
            resolution,
            update(old_start, old_start + 3, "s/a.css", MatchTier::Proximate)
        );
    } else {
        assert_eq!(
            resolution,
            Resolution::Ambiguous {
                key: IdentityKey::new(&doc(), old_start, old_start + 3),
                location: NormalizedPath::new("s/a.css"),
                distance: 31,
            }
        );
    }
}

#[test]
fn test_custom_proximity_threshold() {
    let fixture = Fixture::new(&[(10, 13, "s/a.css", Some(".a{color:red}"))]);
    let edited = block(".a{color:blue}", 20, 23, None);

    let resolution = fixture.resolve_with(&edited, &MetadataStore::new(), IdentityResolver::new(5));
    assert!(matches!(resolution, Resolution::Ambiguous { distance: 10, .. }));
}

#[test]
fn test_span_mismatch_is_never_proximate() {
    let fixture = Fixture::new(&[(10, 13, "s/a.css", Some(".a{color:red}"))]);
    let edited = block(".a{color:blue}\n.b{}", 11, 15, None);

    assert_eq!(fixture.resolve(&edited), Resolution::Create { defaults: None });
}

#[test]
fn test_near_record_preferred_over_earlier_far_record() {
    let fixture = Fixture::new(&[
        (1, 4, "s/far.css", Some(".far{}")),
        (50, 53, "s/near.css", Some(".near{}")),
    ]);
    let edited = block(".changed{}", 60, 63, None);

    assert_eq!(fixture.resolve(&edited), update(50, 53, "s/near.css", MatchTier::Proximate));
}

#[test]
fn test_first_proximate_record_wins_tie() {
    let fixture = Fixture::new(&[
        (10, 12, "s/first.css", Some(".first{}")),
        (14, 16, "s/second.css", Some(".second{}")),
    ]);
    let edited = block(".changed{}", 12, 14, None);

    assert_eq!(fixture.resolve(&edited), update(10, 12, "s/first.css", MatchTier::Proximate));
}

#[test]
fn test_new_block_seeds_metadata_defaults() {
    let fixture = Fixture::new(&[]);
    let mut metadata = MetadataStore::new();
    let entry = MetadataEntry {
        group: "ui".into(),
        description: "Dark toggle".into(),
    };
    metadata.set("minimal", "toggle", entry.clone());

    let named = block(".t{}", 1, 2, Some("toggle"));
    let resolution = fixture.resolve_with(&named, &metadata, IdentityResolver::default());
    assert_eq!(resolution, Resolution::Create { defaults: Some(entry) });

    let anonymous = block(".t{}", 1, 2, None);
    let resolution = fixture.resolve_with(&anonymous, &metadata, IdentityResolver::default());
    assert_eq!(resolution, Resolution::Create { defaults: None });
}

#[test]
fn test_metadata_from_other_collection_is_ignored() {
    let fixture = Fixture::new(&[]);
    let mut metadata = MetadataStore::new();
    metadata.set("other-theme", "toggle", MetadataEntry::default());

    let named = block(".t{}", 1, 2, Some("toggle"));
    let resolution = fixture.resolve_with(&named, &metadata, IdentityResolver::default());
    assert_eq!(resolution, Resolution::Create { defaults: None });
}
