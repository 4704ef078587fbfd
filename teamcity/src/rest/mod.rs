pub mod error;
mod wire;

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use domain::BuildConfiguration;
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    BuildConfigurationApi, BuildConfigurationSummary, ClientConfig, ServerVersion,
    config::MAX_RETRY_DELAY,
};

use self::error::{Result, TeamCityError};

const REST_ROOT: [&str; 3] = ["httpAuth", "app", "rest"];

/// REST client of a TeamCity server.
///
/// Requests are authenticated with HTTP basic auth and retried on transport errors,
/// server errors and conflicts, up to `retries` attempts in total. A POST is not
/// retried after a transport error since the server may already have created it.
#[derive(Clone)]
pub struct TeamCity {
    client: Client,
    base_url: Url,
    retries: u32,
    retry_delay: Duration,
}

impl TeamCity {
    pub fn build(config: &ClientConfig) -> Result<Self> {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            config.username,
            config.password.expose_secret()
        ));
        let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|_| TeamCityError::Generic("credentials are not a valid header".to_owned()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            retries: config.retries,
            retry_delay: config.retry_delay,
        })
    }

    pub fn from_environment() -> Result<Self> {
        Self::build(&ClientConfig::from_environment()?)
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn set_retries(&mut self, retries: u32) {
        self.retries = retries;
    }

    pub async fn server_version(&self) -> Result<ServerVersion> {
        let server: wire::Server = self.request(Method::GET, &["server"], None::<&()>).await?;

        Ok(server.into())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TeamCityError::Generic(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(REST_ROOT)
            .extend(segments);

        Ok(url)
    }

    async fn request<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(method, segments, body).await?;

        Ok(serde_json::from_str(&text)?)
    }

    async fn send<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let body = body.map(|body| serde_json::to_vec(body)).transpose()?;

        let attempts = self.retries.max(1);
        let mut delay = self.retry_delay;
        let mut attempt = 1;

        loop {
            debug!(%method, path = url.path(), attempt, "sending request");

            match self.send_once(method.clone(), url.clone(), body.clone()).await {
                Ok(text) => return Ok(text),
                Err(err) if attempt < attempts && err.is_retryable(&method) => {
                    warn!(%method, path = url.path(), attempt, error = %err, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<String> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(TeamCityError::from_response(status, text))
        }
    }
}

fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(MAX_RETRY_DELAY)
}

impl BuildConfigurationApi for TeamCity {
    type Error = TeamCityError;

    async fn create_build_configuration(&self, config: &mut BuildConfiguration) -> Result<()> {
        config.validate()?;

        let build_type = wire::BuildType::from(&*config);
        let created: wire::BuildType = self
            .request(Method::POST, &["buildTypes"], Some(&build_type))
            .await?;

        config.merge_from(created.into());

        info!(
            id = %config.id,
            project = %config.project_id,
            steps = config.steps.len(),
            "created build configuration"
        );

        Ok(())
    }

    async fn get_build_configuration(&self, id: &str) -> Result<BuildConfiguration> {
        let locator = format!("id:{id}");
        let build_type: wire::BuildType = self
            .request(Method::GET, &["buildTypes", locator.as_str()], None::<&()>)
            .await?;

        Ok(build_type.into())
    }

    async fn delete_build_configuration(&self, id: &str) -> Result<()> {
        let locator = format!("id:{id}");

        match self
            .send(Method::DELETE, &["buildTypes", locator.as_str()], None::<&()>)
            .await
        {
            Ok(_) => {
                info!(id, "deleted build configuration");
                Ok(())
            }
            Err(TeamCityError::NotFound(_)) => {
                debug!(id, "build configuration did not exist");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn list_build_configurations(
        &self,
        project_id: &str,
    ) -> Result<Vec<BuildConfigurationSummary>> {
        let locator = format!("id:{project_id}");
        let list: wire::BuildTypeList = self
            .request(
                Method::GET,
                &["projects", locator.as_str(), "buildTypes"],
                None::<&()>,
            )
            .await?;

        Ok(list.build_type.into_iter().map(Into::into).collect())
    }
}
