//! Style-sheet builders for block extraction scenarios.

/// A delimited block with an optional declared name.
pub fn block(name: Option<&str>, body: &str) -> String {
    let opener = match name {
        Some(name) => format!("/* obsi-snip-coll start {} */", name),
        None => "/* obsi-snip-coll start */".to_string(),
    };
    format!("{}\n{}\n/* obsi-snip-coll end */", opener, body)
}

/// `count` distinct significant filler rules.
pub fn filler_rules(count: usize) -> String {
    (0..count)
        .map(|i| format!(".filler-{} {{ margin: {}px; }}", i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A two-block theme used across engine and CLI tests.
pub fn sample_theme() -> String {
    format!(
        "body {{\n  --accent: #7f6df2;\n}}\n\n{}\n\n.workspace {{ padding: 0; }}\n\n{}\n",
        block(
            Some("dark-toggle"),
            ".theme-dark .toggle {\n  background: var(--accent);\n}"
        ),
        block(Some("file-title"), ".nav-file-title {\n  font-weight: 600;\n}"),
    )
}
