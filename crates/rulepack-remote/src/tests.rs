use super::catalog::{listing_url, rules_from_entries, stacks_from_entries, ContentEntry};
use super::fetch::raw_file_url;

fn entries_json(raw: &str) -> Vec<ContentEntry> {
    serde_json::from_str(raw).expect("must decode listing entries")
}

#[test]
fn raw_file_url_joins_base_branch_and_path() {
    let url = raw_file_url(
        "https://raw.githubusercontent.com/acme/rules",
        "main",
        "core/tdd-workflow.md",
        12345,
    );
    assert_eq!(
        url,
        "https://raw.githubusercontent.com/acme/rules/main/core/tdd-workflow.md?t=12345"
    );
}

#[test]
fn listing_url_addresses_contents_api_with_ref() {
    let url = listing_url("https://api.github.com", "acme", "rules", "core", "main");
    assert_eq!(
        url,
        "https://api.github.com/repos/acme/rules/contents/core?ref=main"
    );
}

#[test]
fn rules_keep_markdown_files_and_drop_readme() {
    let entries = entries_json(
        r#"[
            {"name": "tdd-workflow.md", "path": "core/tdd-workflow.md", "type": "file"},
            {"name": "README.md", "path": "core/README.md", "type": "file"},
            {"name": "notes.txt", "path": "core/notes.txt", "type": "file"},
            {"name": "archive", "path": "core/archive", "type": "dir"}
        ]"#,
    );

    let rules = rules_from_entries(&entries);
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name, "tdd-workflow.md");
    assert_eq!(rules[0].path, "core/tdd-workflow.md");
}

#[test]
fn stacks_keep_directories_only() {
    let entries = entries_json(
        r#"[
            {"name": "python", "path": "stacks/python", "type": "dir"},
            {"name": "rust", "path": "stacks/rust", "type": "dir"},
            {"name": "README.md", "path": "stacks/README.md", "type": "file"}
        ]"#,
    );

    let stacks = stacks_from_entries(&entries);
    let names: Vec<&str> = stacks.iter().map(|stack| stack.name.as_str()).collect();
    assert_eq!(names, vec!["python", "rust"]);
}

#[test]
fn unknown_entry_kinds_decode_without_error_and_are_ignored() {
    let entries = entries_json(
        r#"[
            {"name": "link.md", "path": "core/link.md", "type": "symlink"},
            {"name": "style.md", "path": "core/style.md", "type": "file"}
        ]"#,
    );

    let rules = rules_from_entries(&entries);
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name, "style.md");
    assert!(stacks_from_entries(&entries).is_empty());
}

#[test]
fn github_source_builds_raw_base_url() {
    let source = super::HttpContentSource::github("acme", "rules", "main")
        .expect("must build content source");
    let url = source.file_url("core/style.md");
    assert!(url.starts_with("https://raw.githubusercontent.com/acme/rules/main/core/style.md?t="));
}
