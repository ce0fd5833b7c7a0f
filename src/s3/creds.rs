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

//! Credential providers
//!
//! Requests are signed with [`Credentials`] obtained from a [`Provider`].
//! [`CredentialProvider`] is the provider used by the client: either static
//! keys handed in by the caller, or keys resolved once, up front, through
//! the AWS SDK default provider chain (environment, shared config and
//! credentials files, web identity, SSO, container and instance metadata).

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::error::CredentialsError as ChainError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use thiserror::Error;

#[derive(Clone, PartialEq, Eq)]
/// Credentials contain access key, secret key and session token optionally
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(access_key: &str, secret_key: &str, session_token: Option<&str>) -> Self {
        Credentials {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            session_token: session_token.map(|v| v.to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Provider trait to fetch credentials
pub trait Provider: std::fmt::Debug {
    fn fetch(&self) -> Credentials;
}

#[derive(Clone, Debug)]
/// Static credential provider
pub struct StaticProvider {
    creds: Credentials,
}

impl StaticProvider {
    /// Returns a static provider with given access key, secret key and optional session token
    ///
    /// # Examples
    ///
    /// ```
    /// use s3_fetch::s3::creds::StaticProvider;
    /// let provider = StaticProvider::new("build-user", "build-secret", None);
    /// ```
    pub fn new(access_key: &str, secret_key: &str, session_token: Option<&str>) -> StaticProvider {
        StaticProvider {
            creds: Credentials::new(access_key, secret_key, session_token),
        }
    }
}

impl Provider for StaticProvider {
    fn fetch(&self) -> Credentials {
        self.creds.clone()
    }
}

/// Credentials used by the client, independent of where they came from.
#[derive(Clone, Debug)]
pub enum CredentialProvider {
    /// Access and secret key given explicitly.
    Static(StaticProvider),
    /// Credentials handed out by the default provider chain.
    ChainResolved(Credentials),
}

impl CredentialProvider {
    /// Short description of the credential origin, for log lines.
    pub fn origin(&self) -> &'static str {
        match self {
            CredentialProvider::Static(_) => "static",
            CredentialProvider::ChainResolved(_) => "default-chain",
        }
    }
}

impl Provider for CredentialProvider {
    fn fetch(&self) -> Credentials {
        match self {
            CredentialProvider::Static(p) => p.fetch(),
            CredentialProvider::ChainResolved(creds) => creds.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("the default provider chain is not configured")]
    NoChain,

    #[error("no credentials found in the default provider chain")]
    Chain(#[source] ChainError),
}

/// Loads the AWS SDK default credential chain, scoped to `region`.
///
/// Nothing is resolved yet; the chain is walked by [`resolve`].
pub async fn default_chain(region: &str) -> Result<SharedCredentialsProvider, CredentialsError> {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
        .credentials_provider()
        .ok_or(CredentialsError::NoChain)
}

/// Asks `chain` for credentials once and keeps the answer for the rest of
/// the run.
pub async fn resolve(
    chain: &impl ProvideCredentials,
) -> Result<CredentialProvider, CredentialsError> {
    let creds = chain
        .provide_credentials()
        .await
        .map_err(CredentialsError::Chain)?;
    log::debug!("resolved credentials for access key {}", creds.access_key_id());
    Ok(CredentialProvider::ChainResolved(Credentials::new(
        creds.access_key_id(),
        creds.secret_access_key(),
        creds.session_token(),
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use aws_credential_types::provider::future;
    use std::io::Write;

    /// A chain with nothing to offer.
    #[derive(Debug)]
    pub(crate) struct EmptyChain;

    impl ProvideCredentials for EmptyChain {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            future::ProvideCredentials::ready(Err(ChainError::not_loaded(
                "no credential source configured",
            )))
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("AKID", "very-secret", Some("tok"));
        let out = format!("{creds:?}");
        assert!(out.contains("AKID"));
        assert!(!out.contains("very-secret"));
        assert!(!out.contains("tok\""));
    }

    #[tokio::test]
    async fn resolved_credentials_keep_the_session_token() {
        let chain = aws_credential_types::Credentials::new(
            "AKIDCHAIN",
            "secret-chain",
            Some("token-chain".to_string()),
            None,
            "test",
        );
        let provider = resolve(&chain).await.unwrap();
        assert_eq!(provider.origin(), "default-chain");
        assert_eq!(
            provider.fetch(),
            Credentials::new("AKIDCHAIN", "secret-chain", Some("token-chain"))
        );
    }

    #[tokio::test]
    async fn empty_chain_is_an_error() {
        let err = resolve(&EmptyChain).await.unwrap_err();
        assert!(matches!(err, CredentialsError::Chain(_)));
        assert_eq!(
            err.to_string(),
            "no credentials found in the default provider chain"
        );
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn named_profile_from_the_config_file() {
        use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"[default]\n\
              region = us-east-1\n\
              \n\
              [profile build]\n\
              aws_access_key_id = AKIDBUILD\n\
              aws_secret_access_key = secret-build\n",
        )
        .unwrap();

        let files = ProfileFiles::builder()
            .with_file(ProfileFileKind::Config, file.path())
            .build();
        let chain = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .profile_files(files)
            .profile_name("build")
            .load()
            .await
            .credentials_provider()
            .unwrap();

        let creds = resolve(&chain).await.unwrap().fetch();
        assert_eq!(creds.access_key, "AKIDBUILD");
        assert_eq!(creds.secret_key, "secret-build");
    }
}
