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

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use s3_fetch::config::{ClientConfig, Manifest};
use s3_fetch::error::Error;
use s3_fetch::task::{ObjectsTask, PrefixTask};

/// Fetch objects from Amazon S3 compatible storage into local files.
///
/// Existing files are kept unless overwriting is requested. Set RUST_LOG to
/// change the log level (default: info).
#[derive(Parser, Debug)]
#[command(name = "s3-fetch")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the objects listed in a JSON manifest
    Objects {
        /// Manifest file: {"objects": [{"source", "destination", "overwrite"}], ...}
        #[arg(long)]
        manifest: PathBuf,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Download everything under a key prefix, or one object
    Download {
        /// Bucket name
        #[arg(long)]
        bucket: String,

        /// Key prefix, or the object key when the destination is a file
        #[arg(long)]
        source: Option<String>,

        /// Local directory (ending with '/') or file
        #[arg(long)]
        destination: String,

        /// Replace files that already exist
        #[arg(long)]
        overwrite_existing_files: bool,

        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Args, Debug, Default)]
struct ClientArgs {
    /// Access key; with --secret-key, disables the ambient credential chain
    #[arg(long, env = "S3_FETCH_ACCESS_KEY")]
    access_key: Option<String>,

    /// Secret key
    #[arg(long, env = "S3_FETCH_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Custom endpoint URL; requires --region
    #[arg(long, env = "S3_FETCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Region
    #[arg(long, env = "S3_FETCH_REGION")]
    region: Option<String>,

    /// PEM file of extra root certificates trusted for the endpoint
    #[arg(long, env = "S3_FETCH_CA_BUNDLE")]
    ca_bundle: Option<PathBuf>,
}

impl From<ClientArgs> for ClientConfig {
    fn from(args: ClientArgs) -> Self {
        ClientConfig::default()
            .access_key(args.access_key)
            .secret_key(args.secret_key)
            .endpoint(args.endpoint)
            .region(args.region)
            .ca_bundle(args.ca_bundle)
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Objects { manifest, client } => {
            let manifest = Manifest::load(&manifest)?;
            let config = ClientConfig::from(client).or(manifest.client);
            let store = config.build_client().await?;
            ObjectsTask::new(manifest.objects).run(&store).await?;
        }
        Command::Download {
            bucket,
            source,
            destination,
            overwrite_existing_files,
            client,
        } => {
            let store = ClientConfig::from(client).build_client().await?;
            PrefixTask::new(bucket, destination)
                .source(source)
                .overwrite(Some(overwrite_existing_files))
                .run(&store)
                .await?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("unable to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_download_command() {
        let cli = Cli::try_parse_from([
            "s3-fetch",
            "download",
            "--bucket",
            "my-bucket",
            "--source",
            "data/",
            "--destination",
            "out/",
            "--overwrite-existing-files",
            "--region",
            "eu-west-1",
        ])
        .unwrap();
        match cli.command {
            Command::Download {
                bucket,
                source,
                destination,
                overwrite_existing_files,
                client,
            } => {
                assert_eq!(bucket, "my-bucket");
                assert_eq!(source.as_deref(), Some("data/"));
                assert_eq!(destination, "out/");
                assert!(overwrite_existing_files);
                assert_eq!(client.region.as_deref(), Some("eu-west-1"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_objects_command() {
        let cli = Cli::try_parse_from([
            "s3-fetch",
            "objects",
            "--manifest",
            "objects.json",
            "--endpoint",
            "http://localhost:9000",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Objects { ref manifest, .. } if manifest == &PathBuf::from("objects.json")
        ));
    }

    #[test]
    fn ca_bundle_reaches_client_config() {
        let cli = Cli::try_parse_from([
            "s3-fetch",
            "download",
            "--bucket",
            "b",
            "--destination",
            "out/",
            "--ca-bundle",
            "certs/ca.pem",
        ])
        .unwrap();
        let Command::Download { client, .. } = cli.command else {
            panic!("expected download");
        };
        let config = ClientConfig::from(client);
        assert!(format!("{config:?}").contains("certs/ca.pem"));
    }

    #[test]
    fn download_requires_bucket_and_destination() {
        assert!(Cli::try_parse_from(["s3-fetch", "download", "--bucket", "b"]).is_err());
        assert!(Cli::try_parse_from(["s3-fetch", "download", "--destination", "out/"]).is_err());
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
