use std::collections::BTreeMap;

use serde::{
    Deserialize, Serialize,
    de::{MapAccess, Visitor},
    ser::SerializeStruct,
};

/// Properties of a build step or parameters of a build configuration, keyed by name.
pub type Properties = BTreeMap<String, Property>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub value: String,
    pub r#type: Option<PropertyType>,
}

/// Typed parameter specification as the server spells it, e.g. `password display='hidden'`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
    #[serde(rename = "rawValue")]
    pub raw_value: String,
}

impl Property {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            r#type: None,
        }
    }

    pub fn typed(value: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            r#type: Some(PropertyType {
                raw_value: raw_type.into(),
            }),
        }
    }
}

impl Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.r#type {
            None => serializer.serialize_str(&self.value),
            Some(r#type) => {
                let mut state = serializer.serialize_struct("Property", 2)?;
                state.serialize_field("value", &self.value)?;
                state.serialize_field("type", r#type)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(PropertyVisitor)
    }
}

struct PropertyVisitor;

impl<'de> Visitor<'de> for PropertyVisitor {
    type Value = Property;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(r#"a string or an object of form {"value": .., "type": {"rawValue": ..}}"#)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Property::new(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Property::new(v))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut value = None;
        let mut r#type = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "value" => value = Some(map.next_value::<String>()?),
                "type" => r#type = map.next_value::<Option<PropertyType>>()?,
                _ => {
                    map.next_value::<serde::de::IgnoredAny>()?;
                }
            }
        }

        let value = value.ok_or_else(|| serde::de::Error::missing_field("value"))?;

        Ok(Property { value, r#type })
    }
}
