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

//! Signature V4 for S3 API

use crate::s3::creds::Credentials;
use crate::s3::utils::{Multimap, sha256_hash};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use http::Method;
use sha2::Sha256;
use std::collections::BTreeMap;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// `x-amz-date` value of `time`.
pub fn amz_date(time: DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

fn hmac(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Lower-cased names and whitespace-collapsed values of the headers that
/// take part in the signature. `Authorization` and `User-Agent` never do.
fn canonical_headers(headers: &Multimap) -> BTreeMap<String, String> {
    headers
        .iter_all()
        .map(|(name, values)| (name.to_ascii_lowercase(), values))
        .filter(|(name, _)| name != "authorization" && name != "user-agent")
        .map(|(name, values)| {
            let mut values: Vec<String> = values
                .iter()
                .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect();
            values.sort();
            (name, values.join(","))
        })
        .collect()
}

/// Signs S3 requests for one region at one point in time.
#[derive(Debug)]
pub struct SigV4<'a> {
    creds: &'a Credentials,
    region: &'a str,
    time: DateTime<Utc>,
}

impl<'a> SigV4<'a> {
    pub fn new(creds: &'a Credentials, region: &'a str, time: DateTime<Utc>) -> Self {
        SigV4 {
            creds,
            region,
            time,
        }
    }

    fn scope(&self) -> String {
        format!("{}/{}/s3/aws4_request", self.time.format("%Y%m%d"), self.region)
    }

    pub(crate) fn signing_key(&self) -> Vec<u8> {
        let secret = format!("AWS4{}", self.creds.secret_key);
        let date = hmac(secret.as_bytes(), &self.time.format("%Y%m%d").to_string());
        let region = hmac(&date, self.region);
        let service = hmac(&region, "s3");
        hmac(&service, "aws4_request")
    }

    /// `Authorization` header value for a request.
    ///
    /// `path` is the encoded request path and `query` the encoded query
    /// string exactly as sent. `headers` must already hold `Host`,
    /// `x-amz-date` and `x-amz-content-sha256`.
    pub fn authorization(
        &self,
        method: &Method,
        path: &str,
        query: &str,
        headers: &Multimap,
        payload_sha256: &str,
    ) -> String {
        let headers = canonical_headers(headers);
        let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");
        let header_block: String = headers
            .iter()
            .map(|(name, value)| format!("{name}:{value}\n"))
            .collect();

        let canonical_request =
            format!("{method}\n{path}\n{query}\n{header_block}\n{signed_headers}\n{payload_sha256}");
        let scope = self.scope();
        let string_to_sign = format!(
            "{ALGORITHM}\n{}\n{scope}\n{}",
            amz_date(self.time),
            sha256_hash(canonical_request.as_bytes())
        );
        let signature = hex::encode(hmac(&self.signing_key(), &string_to_sign));

        format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.creds.access_key
        )
    }
}
