use std::path::Path;

use anyhow::{Context, Result};
use rulepack_core::{parse_frontmatter, sha256_hex, OsFs, ContentSource};
use rulepack_installer::{
    discover_installed_rules, ensure_directory, load_metadata, save_metadata, upgrade_all_scopes,
    write_rule_file, Scope, ScopeLayout, UpgradeOptions,
};
use rulepack_remote::{HttpContentSource, RemoteCatalog, RemoteRule};

use crate::config::RepoConfig;
use crate::render::{current_output_style, download_progress, print_lines, render_status_line};
use crate::select;
use crate::summary::{
    format_add_summary_lines, format_installed_lines, format_scope_summary_lines,
};

pub(crate) struct AddSelection {
    pub core: Vec<String>,
    pub stacks: Vec<String>,
    pub all: bool,
}

impl AddSelection {
    fn is_explicit(&self) -> bool {
        self.all || !self.core.is_empty() || !self.stacks.is_empty()
    }
}

pub(crate) fn run_add_command(
    scope: Scope,
    project_root: &Path,
    home_dir: &Path,
    config: &RepoConfig,
    selection: AddSelection,
    dry_run: bool,
) -> Result<()> {
    let output_style = current_output_style();
    let layout = ScopeLayout::new(scope, project_root, home_dir);

    println!(
        "{}",
        render_status_line(
            output_style,
            "step",
            &format!("installing to {} scope: {}", scope.as_str(), layout.rules_dir().display()),
        )
    );

    let catalog = RemoteCatalog::new(
        config.repo_owner.clone(),
        config.repo_name.clone(),
        config.default_branch.clone(),
    )?;
    let selected = resolve_selection(&catalog, selection)?;
    if selected.is_empty() {
        println!("No rules selected");
        return Ok(());
    }

    if dry_run {
        println!(
            "{}",
            render_status_line(output_style, "step", "dry-run mode: no files will be created")
        );
    }

    ensure_directory(layout.claude_dir(), dry_run, &OsFs)?;
    ensure_directory(&layout.rules_dir(), dry_run, &OsFs)?;

    let source = HttpContentSource::github(
        &config.repo_owner,
        &config.repo_name,
        &config.default_branch,
    )?;
    let mut metadata = load_metadata(layout.claude_dir(), &OsFs);

    let progress = download_progress(output_style, "install", selected.len() as u64);
    let mut installed = 0_usize;
    let mut errors = 0_usize;

    for rule in &selected {
        match install_one_rule(&layout, rule, &source, dry_run) {
            Ok(content) => {
                if !dry_run {
                    metadata.track(&rule.name, &rule.path, Some(sha256_hex(&content)));
                }
                installed += 1;
            }
            Err(err) => {
                eprintln!(
                    "{}",
                    render_status_line(
                        output_style,
                        "error",
                        &format!("failed installing {}: {err:#}", rule.path)
                    )
                );
                errors += 1;
            }
        }
        if let Some(progress) = &progress {
            progress.inc(1);
        }
    }

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    if !dry_run && installed > 0 {
        save_metadata(layout.claude_dir(), &metadata, &OsFs)?;
    }

    print_lines(&format_add_summary_lines(installed, errors, dry_run));
    Ok(())
}

fn install_one_rule(
    layout: &ScopeLayout,
    rule: &RemoteRule,
    source: &dyn ContentSource,
    dry_run: bool,
) -> Result<String> {
    let content = source.fetch_file(&rule.path)?;
    let target = layout.rules_dir().join(&rule.name);
    write_rule_file(&target, &content, dry_run, &OsFs)?;
    Ok(content)
}

fn resolve_selection(catalog: &RemoteCatalog, selection: AddSelection) -> Result<Vec<RemoteRule>> {
    let core_rules = catalog.core_rules().context("failed to discover core rules")?;
    let stacks = catalog.stacks().context("failed to discover stacks")?;

    let (selected_core, selected_stacks) = if selection.all {
        (
            core_rules.clone(),
            stacks.iter().map(|stack| stack.name.clone()).collect(),
        )
    } else if selection.is_explicit() {
        (
            select::filter_rules_by_name(&core_rules, &selection.core)?,
            select::filter_stacks_by_name(&stacks, &selection.stacks)?,
        )
    } else {
        let core_names: Vec<String> = core_rules.iter().map(|rule| rule.name.clone()).collect();
        let core_indices = select::prompt_selection("Select core rules to install:", &core_names)?;
        let stack_names: Vec<String> = stacks.iter().map(|stack| stack.name.clone()).collect();
        let stack_indices =
            select::prompt_selection("Select language stacks to install:", &stack_names)?;

        (
            core_indices
                .into_iter()
                .map(|index| core_rules[index].clone())
                .collect(),
            stack_indices
                .into_iter()
                .map(|index| stack_names[index].clone())
                .collect::<Vec<String>>(),
        )
    };

    let mut selected = selected_core;
    for stack in &selected_stacks {
        let rules = catalog
            .stack_rules(stack)
            .with_context(|| format!("failed to discover rules for stack '{stack}'"))?;
        selected.extend(rules);
    }
    Ok(selected)
}

pub(crate) fn run_upgrade_command(
    project_root: &Path,
    home_dir: &Path,
    config: &RepoConfig,
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let output_style = current_output_style();

    if dry_run {
        println!(
            "{}",
            render_status_line(output_style, "step", "dry-run mode: no files will be modified")
        );
    }

    let source = HttpContentSource::github(
        &config.repo_owner,
        &config.repo_name,
        &config.default_branch,
    )?;
    let reports = upgrade_all_scopes(
        project_root,
        home_dir,
        &source,
        UpgradeOptions { force, dry_run },
        &OsFs,
    )?;

    print_lines(&format_scope_summary_lines("Global (~/.claude/)", &reports.global));
    println!();
    print_lines(&format_scope_summary_lines("Project (.claude/)", &reports.project));
    Ok(())
}

pub(crate) fn run_list_command(project_root: &Path, home_dir: &Path) -> Result<()> {
    for (label, scope) in [
        ("Global (~/.claude/)", Scope::Global),
        ("Project (.claude/)", Scope::Project),
    ] {
        let layout = ScopeLayout::new(scope, project_root, home_dir);
        let mut rules = Vec::new();
        for path in discover_installed_rules(&layout.rules_dir(), &OsFs)? {
            let Some(name) = path.file_name().map(|name| name.to_string_lossy().to_string())
            else {
                continue;
            };
            let version = std::fs::read_to_string(&path)
                .ok()
                .and_then(|content| parse_frontmatter(&content))
                .map(|meta| meta.version);
            rules.push((name, version));
        }
        rules.sort();
        print_lines(&format_installed_lines(label, &rules));
    }
    Ok(())
}

pub(crate) fn run_doctor_command(project_root: &Path, home_dir: &Path) {
    let output_style = current_output_style();

    for (label, scope) in [("project", Scope::Project), ("global", Scope::Global)] {
        let layout = ScopeLayout::new(scope, project_root, home_dir);
        println!(
            "{}",
            render_status_line(
                output_style,
                "step",
                &format!("{label} rules: {}", layout.rules_dir().display())
            )
        );

        let (status, message) = metadata_health(&layout);
        println!(
            "{}",
            render_status_line(
                output_style,
                status,
                &format!("{label} metadata: {message}")
            )
        );
    }
}

/// Health of one scope's metadata sidecar. The store itself tolerates a
/// corrupt sidecar by treating it as empty; doctor is where that loss of
/// provenance becomes visible.
fn metadata_health(layout: &ScopeLayout) -> (&'static str, String) {
    let path = layout.metadata_path();
    if !path.exists() {
        return ("step", "not present".to_string());
    }

    match std::fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str::<rulepack_installer::RulesMetadata>(&raw) {
            Ok(metadata) => ("ok", format!("{} tracked file(s)", metadata.files.len())),
            Err(_) => (
                "warn",
                "unreadable; upgrade will treat it as empty".to_string(),
            ),
        },
        Err(err) => ("warn", format!("{err}")),
    }
}
