//! JSON shapes of the TeamCity REST API.
//!
//! Collections are wrapped in `{"count": n, "<item>": [..]}` objects and most keys are
//! camelCase, except the VCS root entry ones which are kebab-case.

use domain::{
    BuildConfiguration, BuildStep, Properties, Property, PropertyType, TemplateId, VcsRootEntry,
};
use serde::{Deserialize, Serialize};

use crate::{BuildConfigurationSummary, ServerVersion};

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BuildType {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub template_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Reference>,
    /// Servers since 2017.2 report the template this way, possibly alongside `template`.
    #[serde(default, skip_serializing)]
    pub templates: Option<BuildTypeReferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Steps>,
    #[serde(
        rename = "vcs-root-entries",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vcs_root_entries: Option<VcsRootEntries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<PropertyList>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reference {
    pub id: String,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct BuildTypeReferences {
    #[serde(default, rename = "buildType")]
    pub build_type: Vec<Reference>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct Steps {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub step: Vec<Step>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct Step {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyList>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct PropertyList {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub property: Vec<PropertyItem>,
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct PropertyItem {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<PropertyType>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct VcsRootEntries {
    #[serde(default)]
    pub count: usize,
    #[serde(default, rename = "vcs-root-entry")]
    pub vcs_root_entry: Vec<VcsRootEntryItem>,
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct VcsRootEntryItem {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "vcs-root")]
    pub vcs_root: Reference,
    #[serde(rename = "checkout-rules", default)]
    pub checkout_rules: String,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct BuildTypeList {
    #[serde(default, rename = "buildType")]
    pub build_type: Vec<BuildTypeSummary>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BuildTypeSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub template_flag: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Server {
    pub version_major: u32,
    pub version_minor: u32,
}

impl From<&BuildConfiguration> for BuildType {
    fn from(config: &BuildConfiguration) -> Self {
        let steps = (!config.steps.is_empty()).then(|| Steps {
            count: config.steps.len(),
            step: config.steps.iter().map(Step::from).collect(),
        });

        let vcs_root_entries = (!config.vcs_root_entries.is_empty()).then(|| VcsRootEntries {
            count: config.vcs_root_entries.len(),
            vcs_root_entry: config
                .vcs_root_entries
                .iter()
                .map(VcsRootEntryItem::from)
                .collect(),
        });

        let parameters = (!config.parameters.is_empty()).then(|| config.parameters.clone().into());

        BuildType {
            id: config.id.clone(),
            project_id: config.project_id.clone(),
            name: config.name.clone(),
            description: config.description.clone(),
            template_flag: config.template_flag,
            template: config.template.as_ref().map(|template| Reference {
                id: template.id.clone(),
            }),
            templates: None,
            steps,
            vcs_root_entries,
            parameters,
        }
    }
}

impl From<BuildType> for BuildConfiguration {
    fn from(build_type: BuildType) -> Self {
        let template = build_type
            .template
            .or_else(|| {
                build_type
                    .templates
                    .and_then(|templates| templates.build_type.into_iter().next())
            })
            .map(|reference| TemplateId { id: reference.id });

        BuildConfiguration {
            id: build_type.id,
            project_id: build_type.project_id,
            name: build_type.name,
            description: build_type.description,
            template_flag: build_type.template_flag,
            template,
            steps: build_type
                .steps
                .map(|steps| steps.step.into_iter().map(BuildStep::from).collect())
                .unwrap_or_default(),
            vcs_root_entries: build_type
                .vcs_root_entries
                .map(|entries| {
                    entries
                        .vcs_root_entry
                        .into_iter()
                        .map(VcsRootEntry::from)
                        .collect()
                })
                .unwrap_or_default(),
            parameters: build_type.parameters.map(Properties::from).unwrap_or_default(),
        }
    }
}

impl From<&BuildStep> for Step {
    fn from(step: &BuildStep) -> Self {
        Step {
            id: step.id.clone(),
            name: step.name.clone(),
            r#type: step.r#type.clone(),
            properties: Some(step.properties.clone().into()),
        }
    }
}

impl From<Step> for BuildStep {
    fn from(step: Step) -> Self {
        BuildStep {
            id: step.id,
            name: step.name,
            r#type: step.r#type,
            properties: step.properties.map(Properties::from).unwrap_or_default(),
        }
    }
}

impl From<Properties> for PropertyList {
    fn from(properties: Properties) -> Self {
        PropertyList {
            count: properties.len(),
            property: properties
                .into_iter()
                .map(|(name, property)| PropertyItem {
                    name,
                    value: property.value,
                    r#type: property.r#type,
                })
                .collect(),
        }
    }
}

impl From<PropertyList> for Properties {
    fn from(list: PropertyList) -> Self {
        list.property
            .into_iter()
            .map(|item| {
                (
                    item.name,
                    Property {
                        value: item.value,
                        r#type: item.r#type,
                    },
                )
            })
            .collect()
    }
}

impl From<&VcsRootEntry> for VcsRootEntryItem {
    fn from(entry: &VcsRootEntry) -> Self {
        VcsRootEntryItem {
            id: entry.id.clone(),
            vcs_root: Reference {
                id: entry.vcs_root_id.clone(),
            },
            checkout_rules: entry.checkout_rules.clone(),
        }
    }
}

impl From<VcsRootEntryItem> for VcsRootEntry {
    fn from(item: VcsRootEntryItem) -> Self {
        VcsRootEntry {
            id: item.id,
            vcs_root_id: item.vcs_root.id,
            checkout_rules: item.checkout_rules,
        }
    }
}

impl From<BuildTypeSummary> for BuildConfigurationSummary {
    fn from(summary: BuildTypeSummary) -> Self {
        BuildConfigurationSummary {
            id: summary.id,
            name: summary.name,
            project_id: summary.project_id,
            template_flag: summary.template_flag,
        }
    }
}

impl From<Server> for ServerVersion {
    fn from(server: Server) -> Self {
        ServerVersion {
            major: server.version_major,
            minor: server.version_minor,
        }
    }
}
