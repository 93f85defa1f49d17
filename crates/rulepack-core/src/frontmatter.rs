/// Version metadata embedded at the top of a rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub version: String,
    pub updated: String,
}

/// Parses the frontmatter block from rule file content.
///
/// The block must open with a line that is exactly `---` at the very
/// start of the content and close with the next such line. A `version:`
/// line inside the block is required; without one the whole parse
/// returns `None`, even if other fields are present. `updated:` is
/// optional and defaults to the empty string. Unknown fields are
/// ignored. Returns `None` for missing or unterminated blocks.
pub fn parse_frontmatter(content: &str) -> Option<Frontmatter> {
    let normalized = content.replace("\r\n", "\n");
    let mut lines = normalized.lines();

    if lines.next()? != "---" {
        return None;
    }

    let mut version = None;
    let mut updated = None;
    let mut terminated = false;

    for line in lines {
        if line == "---" {
            terminated = true;
            break;
        }

        if let Some(value) = field_value(line, "version:") {
            if version.is_none() {
                version = Some(value.to_string());
            }
        } else if let Some(value) = field_value(line, "updated:") {
            if updated.is_none() {
                updated = Some(value.to_string());
            }
        }
    }

    if !terminated {
        return None;
    }

    Some(Frontmatter {
        version: version?,
        updated: updated.unwrap_or_default(),
    })
}

fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let value = line.strip_prefix(key)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value)
}
