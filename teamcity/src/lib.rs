use std::future::Future;

use domain::BuildConfiguration;

pub mod config;
pub mod rest;

pub use config::{ClientConfig, ConfigError};
pub use rest::{TeamCity, error::TeamCityError};

/// Build configuration resources of a CI server.
///
/// The server is the system of record; nothing is cached on this side.
pub trait BuildConfigurationApi {
    type Error: std::error::Error;

    /// Creates `config` on the server and merges the server's view of it back into `config`.
    ///
    /// `config` is left untouched when creation fails.
    fn create_build_configuration(
        &self,
        config: &mut BuildConfiguration,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
    fn get_build_configuration(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<BuildConfiguration, Self::Error>> + Send;
    /// Succeeds when there is nothing to delete.
    fn delete_build_configuration(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
    fn list_build_configurations(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Vec<BuildConfigurationSummary>, Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfigurationSummary {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub template_flag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
}

impl ServerVersion {
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}
