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

use async_trait::async_trait;
use bytes::{Buf, Bytes};
use xmltree::Element;

use crate::s3::error::{Error, ValidationErr};
use crate::s3::types::{FromS3Response, S3Request};
use crate::s3::utils::{child_text, required_child_text, urldecode};

/// One page of ListObjectsV2.
#[derive(Clone, Debug, Default)]
pub struct ListObjectsResponse {
    pub keys: Vec<String>,
    pub is_truncated: bool,
    pub next_continuation_token: Option<String>,
}

impl ListObjectsResponse {
    /// Parses a `ListBucketResult` document. Keys are URL-decoded when the
    /// server reports `EncodingType` `url`.
    pub fn parse(body: Bytes) -> Result<Self, ValidationErr> {
        let root = Element::parse(body.reader())?;
        let url_encoded = child_text(&root, "EncodingType").as_deref() == Some("url");

        let keys = root
            .children
            .iter()
            .filter_map(|node| node.as_element())
            .filter(|element| element.name == "Contents")
            .map(|entry| {
                let key = required_child_text(entry, "Key")?;
                Ok(if url_encoded {
                    urldecode(&key)?.into_owned()
                } else {
                    key
                })
            })
            .collect::<Result<Vec<_>, ValidationErr>>()?;

        Ok(ListObjectsResponse {
            keys,
            is_truncated: child_text(&root, "IsTruncated")
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            next_continuation_token: child_text(&root, "NextContinuationToken")
                .filter(|v| !v.is_empty()),
        })
    }
}

#[async_trait]
impl FromS3Response for ListObjectsResponse {
    async fn from_s3response(
        _req: S3Request,
        resp: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let body = resp?.bytes().await.map_err(ValidationErr::from)?;
        Ok(Self::parse(body)?)
    }
}
