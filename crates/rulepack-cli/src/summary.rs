use rulepack_installer::UpgradeReport;

/// Per-scope upgrade summary: counts first, then the itemized skip and
/// error lines so a user can see why each file was left alone.
pub(crate) fn format_scope_summary_lines(label: &str, report: &UpgradeReport) -> Vec<String> {
    let mut lines = vec![
        format!("{label} summary:"),
        format!("  Upgraded: {}", report.upgraded.len()),
        format!("  Skipped: {}", report.skipped.len()),
        format!("  Errors: {}", report.errors.len()),
    ];

    for name in &report.upgraded {
        lines.push(format!("  + {name}"));
    }
    for skipped in &report.skipped {
        lines.push(format!("  - {}: {}", skipped.file, skipped.reason));
    }
    for failed in &report.errors {
        lines.push(format!("  ! {}: {}", failed.file, failed.error));
    }

    lines
}

pub(crate) fn format_add_summary_lines(
    installed: usize,
    errors: usize,
    dry_run: bool,
) -> Vec<String> {
    let heading = if dry_run {
        "Installation preview complete"
    } else {
        "Installation complete"
    };
    let mut lines = vec![
        heading.to_string(),
        format!("  Successfully processed: {installed}"),
    ];
    if errors > 0 {
        lines.push(format!("  Errors: {errors}"));
    }
    lines
}

/// Installed rules for one scope as `name (vX.Y.Z)` lines; files without
/// version metadata are shown as untracked.
pub(crate) fn format_installed_lines(
    label: &str,
    rules: &[(String, Option<String>)],
) -> Vec<String> {
    let mut lines = vec![format!("{label}:")];
    if rules.is_empty() {
        lines.push("  (no rules installed)".to_string());
        return lines;
    }

    for (name, version) in rules {
        match version {
            Some(version) => lines.push(format!("  {name} (v{version})")),
            None => lines.push(format!("  {name} (no version metadata)")),
        }
    }
    lines
}
