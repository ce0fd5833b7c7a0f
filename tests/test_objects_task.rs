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

use s3_fetch::config::Manifest;
use s3_fetch::download::{DownloadOutcome, Downloader};
use s3_fetch::error::Error;
use s3_fetch::task::{ObjectsTask, TransferSummary};
use s3_fetch::transfer::TransferSpec;
use s3_fetch_common::TestContext;

#[tokio::test]
async fn downloads_into_fresh_destination() {
    let ctx = TestContext::new();
    ctx.put("some/directory/file", b"hello, world");

    let task = ObjectsTask::new(vec![TransferSpec::new(
        ctx.source("some/directory/file"),
        ctx.dest("local/file"),
    )]);
    let summary = task.run(&ctx.store).await.unwrap();

    assert_eq!(
        summary,
        TransferSummary {
            downloaded: 1,
            bytes: 12,
            ..Default::default()
        }
    );
    assert_eq!(std::fs::read(ctx.path("local/file")).unwrap(), b"hello, world");
}

#[tokio::test]
async fn second_run_skips_without_store_calls() {
    let ctx = TestContext::new();
    ctx.put("a.txt", b"first");
    let task = ObjectsTask::new(vec![TransferSpec::new(
        ctx.source("a.txt"),
        ctx.dest("a.txt"),
    )]);

    task.run(&ctx.store).await.unwrap();
    assert_eq!(ctx.store.get_calls(), 1);

    ctx.put("a.txt", b"changed remotely");
    let summary = task.run(&ctx.store).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.bytes, 0);
    assert_eq!(ctx.store.get_calls(), 1);
    assert_eq!(std::fs::read(ctx.path("a.txt")).unwrap(), b"first");
}

#[tokio::test]
async fn overwrite_always_refetches() {
    let ctx = TestContext::new();
    ctx.put("a.txt", b"new content");
    std::fs::write(ctx.path("a.txt"), b"old").unwrap();

    let spec = TransferSpec::new(ctx.source("a.txt"), ctx.dest("a.txt")).overwrite(true);
    let task = ObjectsTask::new(vec![spec]);
    for _ in 0..2 {
        let summary = task.run(&ctx.store).await.unwrap();
        assert_eq!(summary.replaced, 1);
    }
    assert_eq!(ctx.store.get_calls(), 2);
    assert_eq!(std::fs::read(ctx.path("a.txt")).unwrap(), b"new content");
}

#[tokio::test]
async fn transfers_run_in_declaration_order_and_stop_at_first_error() {
    let ctx = TestContext::new();
    ctx.put("one", b"1");
    ctx.put("three", b"3");

    let task = ObjectsTask::new(vec![
        TransferSpec::new(ctx.source("one"), ctx.dest("one")),
        TransferSpec::new(ctx.source("two"), ctx.dest("two")),
        TransferSpec::new(ctx.source("three"), ctx.dest("three")),
    ]);
    let err = task.run(&ctx.store).await.unwrap_err();

    match err {
        Error::Download { key, cause, .. } => {
            assert_eq!(key, "two");
            assert_eq!(cause.error_response().unwrap().code, "NoSuchKey");
        }
        other => panic!("unexpected error: {other}"),
    }
    // Earlier downloads stay, later ones never start.
    assert!(ctx.path("one").is_file());
    assert!(!ctx.path("two").exists());
    assert!(!ctx.path("three").exists());
    assert_eq!(ctx.store.get_calls(), 2);
}

#[tokio::test]
async fn directory_transfers_are_rejected() {
    let ctx = TestContext::new();
    ctx.put("dir/a", b"a");

    for spec in [
        TransferSpec::new(ctx.source("dir/"), ctx.dest("out")),
        TransferSpec::new(ctx.source("dir/a"), ctx.dest("out/")),
    ] {
        let err = ObjectsTask::new(vec![spec]).run(&ctx.store).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedDirectoryTransfer { .. }));
    }
    assert_eq!(ctx.store.get_calls(), 0);
}

#[tokio::test]
async fn malformed_source_is_rejected() {
    let ctx = TestContext::new();
    let err = ObjectsTask::new(vec![TransferSpec::new("not-a-url", ctx.dest("x"))])
        .run(&ctx.store)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSource { .. }));
}

#[tokio::test]
async fn empty_task_succeeds() {
    let ctx = TestContext::new();
    let summary = ObjectsTask::new(Vec::new()).run(&ctx.store).await.unwrap();
    assert_eq!(summary, TransferSummary::default());
}

#[tokio::test]
async fn failed_transfer_keeps_existing_file() {
    let ctx = TestContext::new();
    ctx.put("a.txt", b"0123456789");
    ctx.store.truncate_object("a.txt");
    std::fs::write(ctx.path("a.txt"), b"previous").unwrap();

    let err = Downloader::new(&ctx.store)
        .copy(&ctx.bucket, "a.txt", &ctx.path("a.txt"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Download { .. }));
    assert_eq!(std::fs::read(ctx.path("a.txt")).unwrap(), b"previous");
    assert_eq!(std::fs::read_dir(ctx.root()).unwrap().count(), 1);
}

#[tokio::test]
async fn server_failure_is_a_download_error() {
    let ctx = TestContext::new();
    ctx.put("a.txt", b"data");
    ctx.store.fail_object("a.txt");

    let err = Downloader::new(&ctx.store)
        .copy(&ctx.bucket, "a.txt", &ctx.path("a.txt"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Download { .. }));
    assert!(!ctx.path("a.txt").exists());
}

#[tokio::test]
async fn destination_blocked_by_directory_is_a_filesystem_error() {
    let ctx = TestContext::new();
    ctx.put("a.txt", b"data");
    std::fs::create_dir(ctx.path("a.txt")).unwrap();

    let err = Downloader::new(&ctx.store)
        .copy(&ctx.bucket, "a.txt", &ctx.path("a.txt"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Filesystem { .. }));
}

#[tokio::test]
async fn directory_key_creates_directory() {
    let ctx = TestContext::new();
    let outcome = Downloader::new(&ctx.store)
        .copy(&ctx.bucket, "sub/", &ctx.path("sub"), false)
        .await
        .unwrap();
    assert_eq!(outcome, DownloadOutcome::DirectoryCreated);
    assert!(ctx.path("sub").is_dir());
    assert_eq!(ctx.store.get_calls(), 0);
}

#[tokio::test]
async fn manifest_drives_objects_task() {
    let ctx = TestContext::new();
    ctx.put("a.txt", b"alpha");
    ctx.put("nested/b.txt", b"beta");

    let manifest_path = ctx.path("objects.json");
    let json = format!(
        r#"{{
            "endpoint": "http://localhost:9000",
            "region": "us-east-1",
            "objects": [
                {{"source": "{}", "destination": "{}"}},
                {{"source": "{}", "destination": "{}", "overwrite": true}}
            ]
        }}"#,
        ctx.source("a.txt"),
        ctx.dest("out/a.txt"),
        ctx.source("nested/b.txt"),
        ctx.dest("out/b.txt"),
    );
    std::fs::write(&manifest_path, json).unwrap();

    let manifest = Manifest::load(&manifest_path).unwrap();
    assert_eq!(manifest.client.endpoint.as_deref(), Some("http://localhost:9000"));
    let summary = ObjectsTask::new(manifest.objects)
        .run(&ctx.store)
        .await
        .unwrap();
    assert_eq!(summary.downloaded, 2);
    assert_eq!(std::fs::read(ctx.path("out/b.txt")).unwrap(), b"beta");
}

#[test]
fn unreadable_manifest_is_reported() {
    let ctx = TestContext::new();
    let err = Manifest::load(&ctx.path("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Manifest { .. }));
}
