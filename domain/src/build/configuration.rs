use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{property::Properties, step::BuildSteps, vcs_root_entry::VcsRootEntries};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildConfiguration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub template_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateId>,
    #[serde(default)]
    pub steps: BuildSteps,
    #[serde(default)]
    pub vcs_root_entries: VcsRootEntries,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub parameters: Properties,
}

/// Reference to a build configuration template.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TemplateId {
    pub id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("project id is required")]
    MissingProjectId,
    #[error("name is required")]
    MissingName,
}

impl BuildConfiguration {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_created(&self) -> bool {
        !self.id.is_empty()
    }

    /// Checks the fields the server requires before anything is sent.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.project_id.trim().is_empty() {
            return Err(InvalidConfiguration::MissingProjectId);
        }

        if self.name.trim().is_empty() {
            return Err(InvalidConfiguration::MissingName);
        }

        Ok(())
    }

    /// Takes over everything the server decided about this configuration.
    ///
    /// Step ids, renamed steps, template inherited steps and their order, as well as the
    /// VCS root entry ids, all come from `created`. The project, name and description
    /// are kept when the server does not echo them back.
    pub fn merge_from(&mut self, created: BuildConfiguration) {
        self.id = created.id;
        if !created.project_id.is_empty() {
            self.project_id = created.project_id;
        }
        if !created.name.is_empty() {
            self.name = created.name;
        }
        if created.description.is_some() {
            self.description = created.description;
        }
        self.template_flag = created.template_flag;
        self.template = created.template;
        self.steps = created.steps;
        self.vcs_root_entries = created.vcs_root_entries;
        self.parameters = created.parameters;
    }
}
