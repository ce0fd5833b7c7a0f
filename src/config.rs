// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client construction and the multi-object manifest

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::s3::client::{S3Client, S3ClientBuilder};
use crate::s3::creds::{self, CredentialProvider, StaticProvider};
use crate::s3::http::{BaseUrl, DEFAULT_REGION};
use crate::transfer::TransferSpec;

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Snapshot of the process environment, so region defaults can be tested
/// against an explicit set of variables.
#[derive(Clone, Debug, Default)]
pub struct Environment(HashMap<String, String>);

impl Environment {
    pub fn from_env() -> Self {
        Environment(std::env::vars().collect())
    }

    pub fn from_vars<K: Into<String>, V: Into<String>>(
        vars: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Environment(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Returns the variable if it is set and not blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }
}

/// Store connection settings. Every field is optional.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// PEM bundle of extra CA certificates, for endpoints behind a private
    /// certificate authority.
    #[serde(default)]
    pub ca_bundle: Option<PathBuf>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("ca_bundle", &self.ca_bundle)
            .finish()
    }
}

/// Where requests go and which region signs them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Custom endpoint, e.g. a self-hosted S3 compatible server.
    Custom { url: String, region: String },
    /// Regional Amazon S3 endpoint.
    Aws { region: String },
}

impl Endpoint {
    pub fn region(&self) -> &str {
        match self {
            Endpoint::Custom { region, .. } | Endpoint::Aws { region } => region,
        }
    }
}

impl ClientConfig {
    pub fn access_key(mut self, access_key: Option<String>) -> Self {
        self.access_key = non_blank(access_key);
        self
    }

    pub fn secret_key(mut self, secret_key: Option<String>) -> Self {
        self.secret_key = non_blank(secret_key);
        self
    }

    pub fn endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = non_blank(endpoint);
        self
    }

    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = non_blank(region);
        self
    }

    pub fn ca_bundle(mut self, ca_bundle: Option<PathBuf>) -> Self {
        self.ca_bundle = ca_bundle.filter(|p| !p.as_os_str().is_empty());
        self
    }

    /// Fills unset fields from `fallback`.
    pub fn or(self, fallback: ClientConfig) -> Self {
        ClientConfig {
            access_key: non_blank(self.access_key).or(non_blank(fallback.access_key)),
            secret_key: non_blank(self.secret_key).or(non_blank(fallback.secret_key)),
            endpoint: non_blank(self.endpoint).or(non_blank(fallback.endpoint)),
            region: non_blank(self.region).or(non_blank(fallback.region)),
            ca_bundle: self.ca_bundle.or(fallback.ca_bundle),
        }
    }

    /// Checks the settings without touching the network or the credential
    /// chain.
    pub fn validate(&self) -> Result<(), Error> {
        if self.endpoint.is_some() && self.region.is_none() {
            return Err(Error::Configuration(
                "Cannot specify endpoint without region".into(),
            ));
        }
        Ok(())
    }

    /// Picks the endpoint, defaulting the region from `AWS_REGION` or
    /// `AWS_DEFAULT_REGION` when neither endpoint nor region is set.
    pub fn resolve_endpoint(&self, env: &Environment) -> Result<Endpoint, Error> {
        self.validate()?;
        Ok(match (&self.endpoint, &self.region) {
            (Some(url), Some(region)) => Endpoint::Custom {
                url: url.clone(),
                region: region.clone(),
            },
            (None, Some(region)) => Endpoint::Aws {
                region: region.clone(),
            },
            _ => Endpoint::Aws {
                region: env
                    .get(ENV_REGION)
                    .or_else(|| env.get(ENV_DEFAULT_REGION))
                    .unwrap_or(DEFAULT_REGION)
                    .to_string(),
            },
        })
    }

    /// Static credentials, when both keys are set.
    pub fn static_credentials(&self) -> Option<CredentialProvider> {
        match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => Some(CredentialProvider::Static(
                StaticProvider::new(access_key, secret_key, None),
            )),
            _ => None,
        }
    }

    /// Builds a client from the process environment.
    ///
    /// Configuration is validated before the credential chain is consulted.
    pub async fn build_client(&self) -> Result<S3Client, Error> {
        let endpoint = self.resolve_endpoint(&Environment::from_env())?;
        let provider = match self.static_credentials() {
            Some(provider) => provider,
            None => creds::resolve(&creds::default_chain(endpoint.region()).await?).await?,
        };
        self.client_for(&endpoint, provider)
    }

    /// Builds a client for an already resolved endpoint and credentials.
    pub fn client_for(
        &self,
        endpoint: &Endpoint,
        provider: CredentialProvider,
    ) -> Result<S3Client, Error> {
        let base_url = match endpoint {
            Endpoint::Custom { url, region } => {
                let mut base_url: BaseUrl = url.parse().map_err(|e| {
                    Error::Configuration(format!("invalid endpoint '{url}': {e}"))
                })?;
                base_url.region = region.clone();
                base_url
            }
            Endpoint::Aws { region } => BaseUrl::aws(region),
        };
        log::debug!("using {} credentials for {endpoint:?}", provider.origin());

        S3ClientBuilder::new(base_url)
            .provider(Some(provider))
            .ca_bundle(self.ca_bundle.as_deref())
            .build()
            .map_err(|e| Error::Configuration(format!("unable to create client: {e}")))
    }
}

/// Input of the multi-object task: connection settings plus the ordered
/// list of transfers.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(flatten)]
    pub client: ClientConfig,
    pub objects: Vec<TransferSpec>,
}

impl Manifest {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(path, &json)
    }
}
