//! Property tests for significant-line numbering.

use proptest::prelude::*;
use snip_blocks::{LineMap, parse_blocks};

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("/* note */".to_string()),
        Just("/*".to_string()),
        Just("*/".to_string()),
        Just("  inside comment".to_string()),
        "[a-z.#-]{1,12} \\{ [a-z-]{1,8}: [a-z0-9]{1,6}; \\}",
    ]
}

fn filler_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("\t".to_string()),
        Just("/* filler */".to_string()),
        Just("  /* indented filler */  ".to_string()),
        Just("/*\n   multi-line filler\n*/".to_string()),
        Just("/* header comment\n   spanning lines */".to_string()),
    ]
}

const BLOCK: &str = "/* obsi-snip-coll start */\n.a {\n  color: red;\n}\n/* obsi-snip-coll end */";

proptest! {
    #[test]
    fn test_mapping_is_monotonic(lines in prop::collection::vec(line_strategy(), 0..40)) {
        let text = lines.join("\n");
        let map = LineMap::new(&text);
        let mut previous = 0;
        for raw in 1..=map.line_count() {
            let current = map.significant(raw);
            prop_assert!(current >= previous);
            prop_assert!(current - previous <= 1);
            previous = current;
        }
    }

    #[test]
    fn test_filler_above_block_keeps_positions(
        prefix in prop::collection::vec("[a-z]{1,6} \\{\\}", 0..10),
        filler in prop::collection::vec(filler_strategy(), 1..15),
        insert_at in 0usize..10,
    ) {
        let original = format!("{}\n{}", prefix.join("\n"), BLOCK);

        let mut edited_prefix = prefix.clone();
        let at = insert_at.min(edited_prefix.len());
        for (offset, line) in filler.iter().enumerate() {
            edited_prefix.insert(at + offset, line.clone());
        }
        let edited = format!("{}\n{}", edited_prefix.join("\n"), BLOCK);

        let before = parse_blocks(&original).next().unwrap();
        let after = parse_blocks(&edited).next().unwrap();
        prop_assert_eq!(before.start_line, after.start_line);
        prop_assert_eq!(before.end_line, after.end_line);
        prop_assert_eq!(before.content, after.content);
    }

    #[test]
    fn test_multi_line_comment_above_block_keeps_positions(
        prefix in prop::collection::vec("[a-z]{1,6} \\{\\}", 0..10),
        body in prop::collection::vec("[a-z ]{0,20}", 0..5),
    ) {
        let original = format!("{}\n{}", prefix.join("\n"), BLOCK);
        let edited = format!("{}\n/*\n{}\n*/\n{}", prefix.join("\n"), body.join("\n"), BLOCK);

        let before = parse_blocks(&original).next().unwrap();
        let after = parse_blocks(&edited).next().unwrap();
        prop_assert_eq!(before.start_line, after.start_line);
        prop_assert_eq!(before.end_line, after.end_line);
    }
}
