use std::io::{self, IsTerminal, Write};

use anyhow::{anyhow, Result};
use rulepack_remote::{RemoteRule, RemoteStack};

/// Filters available rules down to the explicitly requested file names.
/// Unknown names are an error listing what the repository offers.
pub(crate) fn filter_rules_by_name(
    available: &[RemoteRule],
    requested: &[String],
) -> Result<Vec<RemoteRule>> {
    let mut selected = Vec::with_capacity(requested.len());
    for name in requested {
        let rule = available
            .iter()
            .find(|rule| &rule.name == name)
            .ok_or_else(|| {
                anyhow!(
                    "unknown rule '{}': available rules are {}",
                    name,
                    names_of(available.iter().map(|rule| rule.name.as_str()))
                )
            })?;
        selected.push(rule.clone());
    }
    Ok(selected)
}

pub(crate) fn filter_stacks_by_name(
    available: &[RemoteStack],
    requested: &[String],
) -> Result<Vec<String>> {
    let mut selected = Vec::with_capacity(requested.len());
    for name in requested {
        if !available.iter().any(|stack| &stack.name == name) {
            return Err(anyhow!(
                "unknown stack '{}': available stacks are {}",
                name,
                names_of(available.iter().map(|stack| stack.name.as_str()))
            ));
        }
        selected.push(name.clone());
    }
    Ok(selected)
}

/// Parses one line of interactive input into selected indices.
///
/// Accepts `a`/`all`, an empty line (select nothing), or a
/// comma-separated list of 1-based entry numbers.
pub(crate) fn parse_choice_line(input: &str, count: usize) -> Result<Vec<usize>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.eq_ignore_ascii_case("a") || trimmed.eq_ignore_ascii_case("all") {
        return Ok((0..count).collect());
    }

    let mut indices = Vec::new();
    for token in trimmed.split(',') {
        let token = token.trim();
        let number: usize = token
            .parse()
            .map_err(|_| anyhow!("invalid selection '{token}': expected entry numbers or 'all'"))?;
        if number == 0 || number > count {
            return Err(anyhow!(
                "selection {number} is out of range: choose between 1 and {count}"
            ));
        }
        let index = number - 1;
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    Ok(indices)
}

/// Prompts on stdin for a subset of `options`. Requires a terminal;
/// non-interactive callers must select with flags instead.
pub(crate) fn prompt_selection(message: &str, options: &[String]) -> Result<Vec<usize>> {
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "stdin is not a terminal: select rules with --all, --core, or --stack"
        ));
    }

    println!("{message}");
    for (index, option) in options.iter().enumerate() {
        println!("  {}. {option}", index + 1);
    }
    print!("Enter numbers separated by commas, 'all', or leave empty: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    parse_choice_line(&line, options.len())
}

fn names_of<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let collected: Vec<&str> = names.collect();
    if collected.is_empty() {
        return "none".to_string();
    }
    collected.join(", ")
}
