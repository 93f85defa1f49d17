use clap::error::ErrorKind;
use clap::Parser;
use rulepack_installer::{FailedFile, SkippedFile, UpgradeReport};
use rulepack_remote::{RemoteRule, RemoteStack};

use super::config::{parse_repo_config, RepoConfig};
use super::select::{filter_rules_by_name, filter_stacks_by_name, parse_choice_line};
use super::summary::{
    format_add_summary_lines, format_installed_lines, format_scope_summary_lines,
};
use super::{Cli, CliScope, Commands};

#[test]
fn cli_parses_add_with_selection_flags() {
    let cli = Cli::try_parse_from([
        "rulepack", "add", "--scope", "global", "--core", "tdd.md", "--stack", "python",
        "--dry-run",
    ])
    .expect("must parse add command");

    match cli.command {
        Commands::Add {
            scope,
            core,
            stacks,
            all,
            dry_run,
            ..
        } => {
            assert_eq!(scope, CliScope::Global);
            assert_eq!(core, vec!["tdd.md"]);
            assert_eq!(stacks, vec!["python"]);
            assert!(!all);
            assert!(dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_parses_upgrade_flags() {
    let cli = Cli::try_parse_from(["rulepack", "upgrade", "--force", "--dry-run"])
        .expect("must parse upgrade command");

    match cli.command {
        Commands::Upgrade { force, dry_run, .. } => {
            assert!(force);
            assert!(dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_rejects_unknown_scope() {
    let err = Cli::try_parse_from(["rulepack", "add", "--scope", "system"])
        .expect_err("must reject unknown scope");
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn repo_config_defaults_match_upstream_repository() {
    let config = RepoConfig::default();
    assert_eq!(config.repo_owner, "elitwilson");
    assert_eq!(config.repo_name, "claude-workflows");
    assert_eq!(config.default_branch, "main");
}

#[test]
fn repo_config_parses_partial_file_with_defaults() {
    let config = parse_repo_config("repo_owner = \"acme\"\n").expect("must parse config");
    assert_eq!(config.repo_owner, "acme");
    assert_eq!(config.repo_name, "claude-workflows");
    assert_eq!(config.default_branch, "main");
}

#[test]
fn repo_config_rejects_malformed_toml() {
    assert!(parse_repo_config("repo_owner = [broken").is_err());
}

#[test]
fn choice_line_accepts_all_empty_and_numbers() {
    assert_eq!(
        parse_choice_line("all", 3).expect("must parse"),
        vec![0, 1, 2]
    );
    assert_eq!(parse_choice_line("A", 2).expect("must parse"), vec![0, 1]);
    assert!(parse_choice_line("  \n", 3).expect("must parse").is_empty());
    assert_eq!(
        parse_choice_line("1, 3", 3).expect("must parse"),
        vec![0, 2]
    );
    assert_eq!(parse_choice_line("2,2", 3).expect("must parse"), vec![1]);
}

#[test]
fn choice_line_rejects_out_of_range_and_garbage() {
    assert!(parse_choice_line("0", 3).is_err());
    assert!(parse_choice_line("4", 3).is_err());
    assert!(parse_choice_line("one", 3).is_err());
}

#[test]
fn rule_filter_keeps_requested_rules_and_names_unknowns() {
    let available = vec![
        RemoteRule {
            name: "tdd.md".to_string(),
            path: "core/tdd.md".to_string(),
        },
        RemoteRule {
            name: "style.md".to_string(),
            path: "core/style.md".to_string(),
        },
    ];

    let selected = filter_rules_by_name(&available, &["style.md".to_string()])
        .expect("must select known rule");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].path, "core/style.md");

    let err = filter_rules_by_name(&available, &["missing.md".to_string()])
        .expect_err("must reject unknown rule");
    assert!(err.to_string().contains("unknown rule 'missing.md'"));
    assert!(err.to_string().contains("tdd.md"));
}

#[test]
fn stack_filter_rejects_unknown_stack() {
    let available = vec![RemoteStack {
        name: "python".to_string(),
    }];

    let selected = filter_stacks_by_name(&available, &["python".to_string()])
        .expect("must select known stack");
    assert_eq!(selected, vec!["python"]);

    let err = filter_stacks_by_name(&available, &["go".to_string()])
        .expect_err("must reject unknown stack");
    assert!(err.to_string().contains("unknown stack 'go'"));
}

#[test]
fn scope_summary_lists_counts_then_details() {
    let report = UpgradeReport {
        upgraded: vec!["fresh.md".to_string()],
        skipped: vec![SkippedFile {
            file: "same.md".to_string(),
            reason: "Already up to date (v1.0.0)".to_string(),
        }],
        errors: vec![FailedFile {
            file: "gone.md".to_string(),
            error: "failed to fetch core/gone.md: HTTP 404 Not Found".to_string(),
        }],
    };

    let lines = format_scope_summary_lines("Project (.claude/)", &report);
    assert_eq!(lines[0], "Project (.claude/) summary:");
    assert_eq!(lines[1], "  Upgraded: 1");
    assert_eq!(lines[2], "  Skipped: 1");
    assert_eq!(lines[3], "  Errors: 1");
    assert!(lines.contains(&"  + fresh.md".to_string()));
    assert!(lines.contains(&"  - same.md: Already up to date (v1.0.0)".to_string()));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("  ! gone.md: failed to fetch")));
}

#[test]
fn add_summary_mentions_preview_on_dry_run() {
    let lines = format_add_summary_lines(3, 0, true);
    assert_eq!(lines[0], "Installation preview complete");
    assert_eq!(lines[1], "  Successfully processed: 3");
    assert_eq!(lines.len(), 2);

    let lines = format_add_summary_lines(2, 1, false);
    assert_eq!(lines[0], "Installation complete");
    assert!(lines.contains(&"  Errors: 1".to_string()));
}

#[test]
fn installed_lines_show_versions_and_empty_scopes() {
    let rules = vec![
        ("style.md".to_string(), Some("1.2.0".to_string())),
        ("legacy.md".to_string(), None),
    ];
    let lines = format_installed_lines("Project (.claude/)", &rules);
    assert_eq!(lines[0], "Project (.claude/):");
    assert!(lines.contains(&"  style.md (v1.2.0)".to_string()));
    assert!(lines.contains(&"  legacy.md (no version metadata)".to_string()));

    let empty = format_installed_lines("Global (~/.claude/)", &[]);
    assert_eq!(empty[1], "  (no rules installed)");
}
