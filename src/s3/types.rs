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

//! Request plumbing shared by all supported S3 operations

use async_trait::async_trait;
use http::Method;

use crate::s3::client::S3Client;
use crate::s3::error::{Error, ValidationErr};
use crate::s3::utils::Multimap;

/// A fully described S3 request, ready to be signed and executed.
#[derive(Clone, Debug)]
pub struct S3Request {
    pub(crate) client: S3Client,
    method: Method,
    pub(crate) bucket: String,
    pub(crate) object: Option<String>,
    pub(crate) query_params: Multimap,
}

impl S3Request {
    pub fn new<S: Into<String>>(client: S3Client, method: Method, bucket: S) -> Self {
        S3Request {
            client,
            method,
            bucket: bucket.into(),
            object: None,
            query_params: Multimap::new(),
        }
    }

    pub fn object(mut self, object: Option<String>) -> Self {
        self.object = object;
        self
    }

    pub fn query_params(mut self, query_params: Multimap) -> Self {
        self.query_params = query_params;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) async fn execute(&self) -> Result<reqwest::Response, Error> {
        self.client
            .execute(
                &self.method,
                &self.query_params,
                &self.bucket,
                self.object.as_deref(),
            )
            .await
    }
}

/// Converts a request builder into an [`S3Request`], validating its
/// arguments.
pub trait ToS3Request: Sized {
    fn to_s3request(self) -> Result<S3Request, ValidationErr>;
}

/// Converts the HTTP response of an executed [`S3Request`] into a typed
/// response.
#[async_trait]
pub trait FromS3Response: Sized {
    async fn from_s3response(
        s3req: S3Request,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error>;
}

/// Common interface of all request builders: build, execute, decode.
#[async_trait]
pub trait S3Api: ToS3Request + Send {
    type S3Response: FromS3Response + Send;

    async fn send(self) -> Result<Self::S3Response, Error> {
        let req: S3Request = self.to_s3request()?;
        let resp: Result<reqwest::Response, Error> = req.execute().await;
        Self::S3Response::from_s3response(req, resp).await
    }
}
