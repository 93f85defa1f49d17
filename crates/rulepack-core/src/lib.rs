mod checksum;
mod frontmatter;
mod fs;
mod source;
mod version;

pub use checksum::sha256_hex;
pub use frontmatter::{parse_frontmatter, Frontmatter};
pub use fs::{DirEntry, OsFs, WorkspaceFs};
pub use source::ContentSource;
pub use version::{is_newer, RuleVersion};
