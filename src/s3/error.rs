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

//! Error definitions for S3 operations

use crate::s3::utils::child_text;
use bytes::{Buf, Bytes};
use thiserror::Error;
use xmltree::Element;

/// Error response returned by the server in an XML `<Error>` body, or
/// synthesized from the HTTP status code when the body is empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub resource: String,
    pub request_id: String,
    pub host_id: String,
    pub bucket_name: String,
    pub object_name: String,
}

impl ErrorResponse {
    pub fn parse(body: Bytes) -> Result<ErrorResponse, ValidationErr> {
        let root = Element::parse(body.reader())?;
        let text = |tag: &str| child_text(&root, tag).unwrap_or_default();

        Ok(ErrorResponse {
            code: text("Code"),
            message: text("Message"),
            resource: text("Resource"),
            request_id: text("RequestId"),
            host_id: text("HostId"),
            bucket_name: text("BucketName"),
            object_name: text("Key"),
        })
    }

    pub fn is_no_such_bucket(&self) -> bool {
        self.code == "NoSuchBucket"
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "code: {}, message: {}, resource: {}, request_id: {}, host_id: {}, bucket_name: {}, object_name: {}",
            self.code,
            self.message,
            self.resource,
            self.request_id,
            self.host_id,
            self.bucket_name,
            self.object_name,
        )
    }
}

/// Errors detected before or while building a request, or while decoding a
/// response body.
#[derive(Debug, Error)]
pub enum ValidationErr {
    #[error("invalid bucket name: {0}")]
    InvalidBucketName(String),

    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    #[error("XML parse error: {0}")]
    XmlParseError(#[from] xmltree::ParseError),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("invalid UTF-8 in encoded value: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

/// Errors raised while talking to the server.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server failed with HTTP status code {0}")]
    ServerError(u16),
}

/// Errors reported by the server itself.
#[derive(Debug, Error)]
pub enum S3ServerError {
    #[error("s3 operation failed; {0}")]
    S3Error(Box<ErrorResponse>),

    #[error(
        "invalid server response received; {message}; status code: {http_status_code}; content-type: {content_type}"
    )]
    InvalidServerResponse {
        message: String,
        http_status_code: u16,
        content_type: String,
    },
}

/// Top level error of the S3 client layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErr),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("S3 server error: {0}")]
    S3Server(#[from] S3ServerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the parsed server error response, if this error carries one.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Error::S3Server(S3ServerError::S3Error(er)) => Some(er),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_response_body() {
        let body = Bytes::from_static(
            b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
            <Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message>\
            <Key>data/a.txt</Key><BucketName>my-bucket</BucketName>\
            <Resource>/my-bucket/data/a.txt</Resource><RequestId>17E0</RequestId>\
            <HostId>dd9025</HostId></Error>",
        );
        let er = ErrorResponse::parse(body).unwrap();
        assert_eq!(er.code, "NoSuchKey");
        assert_eq!(er.bucket_name, "my-bucket");
        assert_eq!(er.object_name, "data/a.txt");
        assert_eq!(er.request_id, "17E0");
        assert!(!er.is_no_such_bucket());
    }

    #[test]
    fn parse_error_response_rejects_garbage() {
        assert!(ErrorResponse::parse(Bytes::from_static(b"not xml")).is_err());
    }

    #[test]
    fn error_response_accessor() {
        let e = Error::S3Server(S3ServerError::S3Error(Box::new(ErrorResponse {
            code: "NoSuchBucket".into(),
            ..Default::default()
        })));
        assert!(e.error_response().unwrap().is_no_such_bucket());
        assert!(Error::Network(NetworkError::ServerError(503)).error_response().is_none());
    }
}
