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

//! Endpoint parsing and request addressing

use crate::s3::error::ValidationErr;
use crate::s3::utils::urlencode_object_key;
use http::Uri;
use std::str::FromStr;

/// The default AWS region to be used if no other region is specified.
pub const DEFAULT_REGION: &str = "us-east-1";

fn is_amazon_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host.ends_with(".amazonaws.com") || host.ends_with(".amazonaws.com.cn")
}

/// Host and path a single request is sent to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTarget {
    pub https: bool,
    /// `host[:port]`, also the value of the `Host` header.
    pub host: String,
    /// Percent-encoded path, as signed.
    pub path: String,
}

impl RequestTarget {
    /// Full URL with the already encoded `query` appended.
    pub fn url(&self, query: &str) -> String {
        let scheme = if self.https { "https" } else { "http" };
        match query {
            "" => format!("{scheme}://{}{}", self.host, self.path),
            q => format!("{scheme}://{}{}?{q}", self.host, self.path),
        }
    }
}

#[derive(Clone, Debug)]
/// Represents Base URL of S3 endpoint
pub struct BaseUrl {
    pub https: bool,
    authority: String,
    pub region: String,
    virtual_host: bool,
}

impl Default for BaseUrl {
    fn default() -> Self {
        BaseUrl::aws(DEFAULT_REGION)
    }
}

impl FromStr for BaseUrl {
    type Err = ValidationErr;

    /// Parses an endpoint such as `https://s3.example.com` or
    /// `http://127.0.0.1:9000`. A missing scheme means HTTPS; paths, queries
    /// and user info are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3_fetch::s3::http::BaseUrl;
    ///
    /// let base_url: BaseUrl = "http://192.168.124.63:9000".parse().unwrap();
    /// assert_eq!(base_url.authority(), "192.168.124.63:9000");
    /// ```
    fn from_str(s: &str) -> Result<Self, ValidationErr> {
        let uri = s.parse::<Uri>()?;
        let invalid = |reason: &str| ValidationErr::InvalidBaseUrl(format!("'{s}': {reason}"));

        let https = match uri.scheme_str() {
            None | Some("https") => true,
            Some("http") => false,
            Some(_) => return Err(invalid("scheme must be http or https")),
        };
        if !matches!(uri.path(), "" | "/") {
            return Err(invalid("an endpoint has no path"));
        }
        if uri.query().is_some() {
            return Err(invalid("an endpoint has no query"));
        }

        let authority = uri.authority().ok_or_else(|| invalid("host is missing"))?;
        if authority.as_str().contains('@') {
            return Err(invalid("user info is not supported"));
        }
        let host = match authority.host() {
            "" => return Err(invalid("host is missing")),
            h if h.contains(':') && !h.starts_with('[') => format!("[{h}]"),
            h => h.to_string(),
        };
        let default_port = if https { 443 } else { 80 };
        let authority = match authority.port_u16() {
            Some(port) if port != default_port => format!("{host}:{port}"),
            _ => host.clone(),
        };

        Ok(BaseUrl {
            https,
            authority,
            region: String::new(),
            virtual_host: is_amazon_host(&host),
        })
    }
}

impl BaseUrl {
    /// Base URL of the regional Amazon S3 endpoint.
    pub fn aws(region: &str) -> Self {
        BaseUrl {
            https: true,
            authority: format!("s3.{region}.amazonaws.com"),
            region: region.to_string(),
            virtual_host: true,
        }
    }

    /// Checks base URL is AWS host
    pub fn is_aws_host(&self) -> bool {
        self.virtual_host
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Addresses `bucket`, or `key` within it.
    ///
    /// Amazon endpoints get virtual-hosted requests unless the bucket name
    /// contains a `.`; everything else is addressed path style. The key is
    /// appended verbatim after the `/` separator, so a key starting with `/`
    /// keeps its leading slash.
    pub fn target(&self, bucket: &str, key: Option<&str>) -> Result<RequestTarget, ValidationErr> {
        let (host, mut path) = if self.virtual_host && !bucket.contains('.') {
            (format!("{bucket}.{}", self.authority), String::from("/"))
        } else {
            (self.authority.clone(), format!("/{bucket}"))
        };

        if let Some(key) = key {
            if key.is_empty() {
                return Err(ValidationErr::InvalidObjectName(
                    "object name cannot be empty".into(),
                ));
            }
            if !path.ends_with('/') {
                path.push('/');
            }
            path.push_str(&urlencode_object_key(key));
        }

        Ok(RequestTarget {
            https: self.https,
            host,
            path,
        })
    }
}
