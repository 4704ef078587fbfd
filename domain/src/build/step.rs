use serde::{Deserialize, Serialize};

use super::property::Properties;

pub type BuildSteps = Vec<BuildStep>;

/// A single runner of a build configuration.
///
/// The `id` is assigned by the server (`RUNNER_<n>`) and left empty when creating new steps.
/// Supplying an id that already exists on the template pins the step to that inherited step.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStep {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub r#type: String,
    #[serde(default)]
    pub properties: Properties,
}

impl BuildStep {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            r#type: r#type.into(),
            properties,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Property;

    #[test]
    fn build_step_should_deserialize_without_id() {
        let json = r#"
            {
                "name": "Muh",
                "type": "simpleRunner",
                "properties": {
                    "script.content": "env",
                    "use.custom.script": "true"
                }
            }
        "#;

        let step: BuildStep = serde_json::from_str(json).unwrap();

        assert_eq!(
            step,
            BuildStep::new(
                "Muh",
                "simpleRunner",
                Properties::from([
                    ("script.content".to_owned(), Property::new("env")),
                    ("use.custom.script".to_owned(), Property::new("true")),
                ])
            )
        );
    }

    #[test]
    fn build_step_should_skip_empty_id_when_serializing() {
        let step = BuildStep::new("Env", "simpleRunner", Properties::new());

        let value = serde_json::to_value(&step).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "name": "Env", "type": "simpleRunner", "properties": {} })
        );
    }

    #[test]
    fn build_step_with_id_should_keep_id() {
        let step = BuildStep::new("Env", "simpleRunner", Properties::new()).with_id("RUNNER_3");

        assert_eq!(step.id, "RUNNER_3");
    }
}
