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

use crate::s3::client::S3Client;
use crate::s3::error::ValidationErr;
use crate::s3::response::GetObjectResponse;
use crate::s3::types::{S3Api, S3Request, ToS3Request};
use crate::s3::utils::check_bucket_name;
use http::Method;

/// Argument builder for the GetObject operation; the body is streamed.
#[derive(Clone, Debug)]
pub struct GetObject {
    client: S3Client,
    bucket: String,
    object: String,
}

impl GetObject {
    pub fn new<S1: Into<String>, S2: Into<String>>(client: S3Client, bucket: S1, object: S2) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            object: object.into(),
        }
    }
}

impl S3Api for GetObject {
    type S3Response = GetObjectResponse;
}

impl ToS3Request for GetObject {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket)?;
        if self.object.is_empty() {
            return Err(ValidationErr::InvalidObjectName(
                "object name cannot be empty".into(),
            ));
        }

        Ok(S3Request::new(self.client, Method::GET, self.bucket).object(Some(self.object)))
    }
}
