use crate::config::Config;

use genpass_domain::error::{GpError, GpResult};
use genpass_domain::fixtures::repo::DelegateFixtureRepo;
use genpass_domain::fixtures::Resource;
use genpass_domain::password::PasswordSet;
use genpass_domain::profile::Profile;
use genpass_domain::view::DemoSource;
use genpass_domain::{GenerationSettings, GetConfig, System};
use genpass_store::{FsFixtureRepo, GetStore, Store};

use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Clone)]
pub struct App {
    pub config: Arc<Config>,
    pub store: Store,
    pub http: reqwest::Client,
}

impl App {
    pub fn new(config: Config, store: Store) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("genpass/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            store,
            http,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, resource: Resource) -> GpResult<T> {
        let base_url = self
            .config
            .base_url
            .as_ref()
            .ok_or_else(|| GpError::fetch_or_parse(resource, "no backend url configured"))?;
        let url = base_url
            .join(&resource.path())
            .map_err(|e| GpError::fetch_or_parse(resource, e))?;

        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| GpError::fetch_or_parse(resource, e))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GpError::fetch_or_parse(resource, e))?;

        serde_json::from_slice(&bytes).map_err(|e| GpError::fetch_or_parse(resource, e))
    }
}

impl System for App {
    fn get_current_time(&self) -> time::OffsetDateTime {
        time::OffsetDateTime::now_utc()
    }
}

impl GetConfig for App {
    fn get_generation_settings(&self) -> GenerationSettings {
        self.config.generation.clone()
    }
}

impl GetStore for App {
    fn get_store(&self) -> &Store {
        &self.store
    }
}

impl DelegateFixtureRepo<Self> for App {
    type Target = FsFixtureRepo;
}

impl DemoSource for App {
    async fn fetch_profiles(&self) -> GpResult<Vec<Profile>> {
        self.fetch_json(Resource::Profiles).await
    }

    async fn fetch_passwords(&self) -> GpResult<PasswordSet> {
        let delay = self.config.generation_delay;
        if !delay.is_zero() {
            tracing::debug!("simulating password generation for {delay:?}");
            tokio::time::sleep(delay).await;
        }

        self.fetch_json(Resource::Passwords).await
    }
}
