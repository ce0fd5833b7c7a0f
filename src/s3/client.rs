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

//! S3 client to perform the bucket and object operations needed for
//! downloading.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::s3::builders::{BucketExists, GetObject, ListObjects};
use crate::s3::creds::Provider;
use crate::s3::error::{Error, ErrorResponse, NetworkError, S3ServerError, ValidationErr};
use crate::s3::http::{BaseUrl, DEFAULT_REGION};
use crate::s3::signer::{SigV4, amz_date};
use crate::s3::utils::{EMPTY_SHA256, Multimap, MultimapExt, encode_query};

pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
pub const X_AMZ_BUCKET_REGION: &str = "x-amz-bucket-region";
pub const X_AMZ_REQUEST_ID: &str = "x-amz-request-id";

type SharedProvider = Arc<dyn Provider + Send + Sync + 'static>;

/// Client Builder manufactures an [`S3Client`] using given parameters.
#[derive(Debug)]
pub struct S3ClientBuilder {
    base_url: BaseUrl,
    provider: Option<SharedProvider>,
    ca_bundle: Option<PathBuf>,
}

impl S3ClientBuilder {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            provider: None,
            ca_bundle: None,
        }
    }

    /// Set the credential provider. If not, anonymous access is used.
    pub fn provider<P: Provider + Send + Sync + 'static>(mut self, provider: Option<P>) -> Self {
        self.provider = provider.map(|p| Arc::new(p) as SharedProvider);
        self
    }

    /// PEM file of CA certificates trusted in addition to the system store.
    pub fn ca_bundle(mut self, ca_bundle: Option<&Path>) -> Self {
        self.ca_bundle = ca_bundle.map(PathBuf::from);
        self
    }

    /// Build the Client.
    pub fn build(self) -> Result<S3Client, Error> {
        let user_agent = format!(
            "s3-fetch ({}; {}) s3-fetch/{}",
            std::env::consts::OS,
            std::env::consts::ARCH,
            env!("CARGO_PKG_VERSION")
        );
        let mut builder = reqwest::Client::builder().no_gzip().user_agent(user_agent);

        #[cfg(any(
            feature = "default-tls",
            feature = "native-tls",
            feature = "rustls-tls"
        ))]
        if let Some(path) = &self.ca_bundle {
            let pem = std::fs::read(path)?;
            for cert in reqwest::Certificate::from_pem_bundle(&pem).map_err(ValidationErr::from)? {
                builder = builder.add_root_certificate(cert);
            }
        }

        Ok(S3Client {
            http_client: builder.build().map_err(ValidationErr::from)?,
            shared: Arc::new(SharedClientItems {
                base_url: self.base_url,
                provider: self.provider,
            }),
        })
    }
}

#[derive(Debug)]
pub(crate) struct SharedClientItems {
    pub(crate) base_url: BaseUrl,
    provider: Option<SharedProvider>,
}

/// Simple Storage Service (aka S3) client.
///
/// If a credential provider is set, all requests are signed using AWS
/// Signature Version 4; else they are performed anonymously. Cloning is
/// cheap and shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct S3Client {
    http_client: reqwest::Client,
    pub(crate) shared: Arc<SharedClientItems>,
}

impl S3Client {
    /// Returns a S3 client with given base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3_fetch::s3::client::S3Client;
    /// use s3_fetch::s3::creds::StaticProvider;
    /// use s3_fetch::s3::http::BaseUrl;
    ///
    /// let base_url: BaseUrl = "http://127.0.0.1:9000".parse().unwrap();
    /// let static_provider = StaticProvider::new("build-user", "build-secret", None);
    /// let client = S3Client::new(base_url, Some(static_provider)).unwrap();
    /// ```
    pub fn new<P: Provider + Send + Sync + 'static>(
        base_url: BaseUrl,
        provider: Option<P>,
    ) -> Result<Self, Error> {
        S3ClientBuilder::new(base_url).provider(provider).build()
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.shared.base_url
    }

    /// Region used to sign requests.
    pub fn region(&self) -> &str {
        match self.shared.base_url.region.as_str() {
            "" => DEFAULT_REGION,
            v => v,
        }
    }

    /// Creates a [`BucketExists`] request builder.
    pub fn bucket_exists<S: Into<String>>(&self, bucket: S) -> BucketExists {
        BucketExists::new(self.clone(), bucket)
    }

    /// Creates a [`ListObjects`] request builder for one ListObjectsV2 page.
    pub fn list_objects<S: Into<String>>(&self, bucket: S) -> ListObjects {
        ListObjects::new(self.clone(), bucket)
    }

    /// Creates a [`GetObject`] request builder.
    pub fn get_object<S1: Into<String>, S2: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
    ) -> GetObject {
        GetObject::new(self.clone(), bucket, object)
    }

    /// Signs and sends one bodiless request. Non-2xx answers come back as
    /// errors.
    pub(crate) async fn execute(
        &self,
        method: &Method,
        query: &Multimap,
        bucket: &str,
        object: Option<&str>,
    ) -> Result<reqwest::Response, Error> {
        let target = self.shared.base_url.target(bucket, object)?;
        let query = encode_query(query);
        let now = chrono::Utc::now();

        let mut headers = Multimap::new();
        headers.add(http::header::HOST.as_str(), target.host.as_str());
        headers.add(X_AMZ_CONTENT_SHA256, EMPTY_SHA256);
        headers.add(X_AMZ_DATE, amz_date(now));

        if let Some(provider) = &self.shared.provider {
            let creds = provider.fetch();
            if let Some(token) = &creds.session_token {
                headers.add(X_AMZ_SECURITY_TOKEN, token.as_str());
            }
            let authorization = SigV4::new(&creds, self.region(), now).authorization(
                method,
                &target.path,
                &query,
                &headers,
                EMPTY_SHA256,
            );
            headers.add(http::header::AUTHORIZATION.as_str(), authorization);
        }

        let url = target.url(&query);
        log::trace!("{method} {url}");
        let mut req = self.http_client.request(method.clone(), url);
        for (name, values) in headers.iter_all() {
            for value in values {
                req = req.header(name, value);
            }
        }

        let resp = req.send().await.map_err(NetworkError::Request)?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let resp_headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(NetworkError::Request)?;
        Err(error_from_response(
            status,
            &resp_headers,
            body,
            &target.path,
            bucket,
            object,
        ))
    }
}

/// Turns a failed HTTP response into an [`Error`].
///
/// An XML body is the server's error document. Bodiless answers, as to
/// `HEAD`, are named after the status code the way S3 would have named
/// them.
pub(crate) fn error_from_response(
    status: StatusCode,
    headers: &HeaderMap,
    body: Bytes,
    resource: &str,
    bucket: &str,
    object: Option<&str>,
) -> Error {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    if !body.is_empty() {
        let content_type = header(http::header::CONTENT_TYPE.as_str());
        if !content_type.to_ascii_lowercase().contains("xml") {
            return S3ServerError::InvalidServerResponse {
                message: "expected an XML error document".into(),
                http_status_code: status.as_u16(),
                content_type,
            }
            .into();
        }
        return match ErrorResponse::parse(body) {
            Ok(er) => S3ServerError::S3Error(Box::new(er)).into(),
            Err(e) => e.into(),
        };
    }

    let (code, message) = match (status, object) {
        (StatusCode::NOT_FOUND, Some(_)) => ("NoSuchKey", "Object does not exist".to_string()),
        (StatusCode::NOT_FOUND, None) => ("NoSuchBucket", "Bucket does not exist".to_string()),
        (StatusCode::FORBIDDEN, _) => ("AccessDenied", "Access denied".to_string()),
        (StatusCode::MOVED_PERMANENTLY, _) => match header(X_AMZ_BUCKET_REGION).as_str() {
            "" => ("PermanentRedirect", "Moved Permanently".to_string()),
            region => (
                "PermanentRedirect",
                format!("Moved Permanently; use region {region}"),
            ),
        },
        _ => return NetworkError::ServerError(status.as_u16()).into(),
    };

    S3ServerError::S3Error(Box::new(ErrorResponse {
        code: code.to_string(),
        message,
        resource: resource.to_string(),
        request_id: header(X_AMZ_REQUEST_ID),
        bucket_name: bucket.to_string(),
        object_name: object.unwrap_or_default().to_string(),
        ..Default::default()
    }))
    .into()
}
