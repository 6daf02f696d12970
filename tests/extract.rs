use mdtoc::pipeline::{File, Processor};
use mdtoc::{Node, ParseOptions, TocEntry, extract_toc_headings, parse_markdown, remark_toc_headings};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const ARTICLE: &str = r#"# Getting Started

Intro paragraph with a [link](https://example.com).

## Install

### From `crates.io`

### From source

## Usage

> ## Usage
> Quoted heading with the same text.

```markdown
## Not a heading
```

## FAQ: *Why* **another** tool?

#### Deep dive
"#;

fn entry(value: &str, url: &str, depth: usize) -> TocEntry {
    TocEntry {
        value: value.to_string(),
        url: url.to_string(),
        depth,
    }
}

#[test]
fn article_toc() {
    let toc = extract_toc_headings(ARTICLE).unwrap();

    assert_eq!(
        toc.into_vec(),
        vec![
            entry("Getting Started", "#getting-started", 1),
            entry("Install", "#install", 2),
            entry("From crates.io", "#from-cratesio", 3),
            entry("From source", "#from-source", 3),
            entry("Usage", "#usage", 2),
            entry("Usage", "#usage-1", 2),
            entry("FAQ: Why another tool?", "#faq-why-another-tool", 2),
            entry("Deep dive", "#deep-dive", 4),
        ]
    );
}

#[test]
fn toc_length_matches_heading_nodes() {
    let tree = parse_markdown(ARTICLE, &ParseOptions::default());
    let mut headings = 0;
    tree.walk(&mut |node| {
        if let Node::Heading { .. } = node {
            headings += 1;
        }
    });

    assert_eq!(extract_toc_headings(ARTICLE).unwrap().len(), headings);
}

#[test]
fn urls_are_unique_for_repeated_text() {
    let md = "# Notes\n\n## Notes\n\n### Notes\n\n## notes\n\n# Notes 1\n\n## Notes-1";
    let toc = extract_toc_headings(md).unwrap();

    let urls: HashSet<&str> = toc.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls.len(), toc.len());
    assert!(toc.iter().all(|e| e.url.starts_with('#')));
}

#[test]
fn sequential_calls_do_not_drift() {
    let first = extract_toc_headings(ARTICLE).unwrap();
    let second = extract_toc_headings(ARTICLE).unwrap();
    assert_eq!(first, second);

    // An unrelated document starts from a clean slate.
    let other = extract_toc_headings("## Usage").unwrap();
    assert_eq!(other[0].url, "#usage");
}

#[test]
fn concurrent_extractions_share_a_processor() {
    let processor = Arc::new(Processor::new().plugin(remark_toc_headings()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let processor = Arc::clone(&processor);
            thread::spawn(move || {
                let md = format!("# Same\n\n# Same\n\n## Doc {i}");
                let file = processor.process(File::new(md)).unwrap();
                file.data.toc.unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let toc = handle.join().unwrap();
        let urls: Vec<&str> = toc.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["#same".to_string(), "#same-1".to_string(), format!("#doc-{i}")]);
    }
}

#[test]
fn plain_text_input_has_no_entries() {
    for md in ["", "plain text, no headings", "    # indented code", "#hashtag"] {
        assert!(extract_toc_headings(md).unwrap().is_empty(), "input: {md:?}");
    }
}

#[test]
fn deeply_nested_blockquotes() {
    let md = format!("{}# deep", "> ".repeat(100_000));
    let toc = extract_toc_headings(&md).unwrap();

    assert_eq!(toc.into_vec(), vec![entry("deep", "#deep", 1)]);
}
