use std::fmt;

/// Three-field rule version parsed from frontmatter.
///
/// This is deliberately not semver: rule files carry plain
/// `major.minor.patch` strings, and a malformed or partial version must
/// never abort an upgrade pass. Missing and non-numeric segments degrade
/// to `0`, so `"1.2"` reads as `1.2.0` and garbage reads as `0.0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RuleVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl RuleVersion {
    pub fn parse(value: &str) -> Self {
        let mut segments = value.trim().split('.');
        let mut next = || {
            segments
                .next()
                .and_then(|segment| segment.trim().parse::<u64>().ok())
                .unwrap_or(0)
        };

        Self {
            major: next(),
            minor: next(),
            patch: next(),
        }
    }
}

impl fmt::Display for RuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returns true iff `remote` parses strictly greater than `local`,
/// compared field by field: major, then minor, then patch. Equal
/// versions are not newer.
pub fn is_newer(local: &str, remote: &str) -> bool {
    RuleVersion::parse(remote) > RuleVersion::parse(local)
}
