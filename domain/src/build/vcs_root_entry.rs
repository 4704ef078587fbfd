use serde::{Deserialize, Serialize};

pub type VcsRootEntries = Vec<VcsRootEntry>;

/// Attachment of an existing VCS root to a build configuration.
///
/// The server mirrors the VCS root id into `id` once the entry exists.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct VcsRootEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub vcs_root_id: String,
    #[serde(default)]
    pub checkout_rules: String,
}

impl VcsRootEntry {
    pub fn new(vcs_root_id: impl Into<String>, checkout_rules: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            vcs_root_id: vcs_root_id.into(),
            checkout_rules: checkout_rules.into(),
        }
    }

    /// Individual checkout rules, one per non-blank line.
    pub fn checkout_rules(&self) -> impl Iterator<Item = &str> {
        self.checkout_rules
            .lines()
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
    }
}
