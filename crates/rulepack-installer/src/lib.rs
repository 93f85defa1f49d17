mod discovery;
mod install;
mod layout;
mod metadata;
mod upgrade;

pub use discovery::discover_installed_rules;
pub use install::{ensure_directory, write_rule_file};
pub use layout::{default_home_dir, target_directory, Scope, ScopeLayout};
pub use metadata::{load_metadata, save_metadata, RulesMetadata, TrackedFile};
pub use upgrade::{
    upgrade_all_scopes, upgrade_scope, FailedFile, ScopedUpgradeReports, SkippedFile,
    UpgradeOptions, UpgradeReport,
};
