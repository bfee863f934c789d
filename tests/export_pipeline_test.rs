//! End-to-end tests for the export orchestrator over in-memory adapters

mod common;

use common::{
    group, group_with_regions, key_for, ArtifactLedger, BrokenHeaderFactory, FailingRowFactory,
    FakeArtifactStore, FakeParameters, FakeSource, Harness,
};
use gw_rdb::core::export::FanOutInvoker;
use gw_rdb::core::rdb::RDB_HEADER;
use gw_rdb::domain::{ExportErrorKind, ExportRequest};
use std::sync::Arc;

fn wisconsin_details() -> String {
    format!(
        "[RegionGroup 'Wisconsin', Regions: [Wisconsin], StorageKey={}]",
        key_for("WI")
    )
}

#[tokio::test]
async fn test_single_group_publishes_artifact() {
    let harness = Harness::new(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
    )
    .await;

    let result = harness
        .orchestrator
        .run(&ExportRequest::new("Wisconsin"))
        .await
        .unwrap();

    assert_eq!(result.row_count(), 6);
    assert_eq!(
        result.message(),
        format!("Count is rows written to file: {}", key_for("WI"))
    );

    assert_eq!(harness.ledger.opens(), 1);
    assert_eq!(harness.ledger.commits(), 1);
    assert_eq!(harness.ledger.releases(), 1);

    let published = harness.ledger.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, key_for("WI"));

    let lines: Vec<&str> = published[0].1.lines().collect();
    assert_eq!(lines.len(), RDB_HEADER.len() + 6);
    assert_eq!(&lines[..RDB_HEADER.len()], &RDB_HEADER[..]);
    assert_eq!(lines[4], "USGS\tWisconsin-001\t2024-06-01\t12.5");

    assert_eq!(
        harness.messages(),
        vec![format!(
            "INFO: RDB file created, 6 rows {}",
            wisconsin_details()
        )]
    );
}

#[tokio::test]
async fn test_multi_region_group_streams_regions_in_order() {
    let harness = Harness::new(
        vec![group_with_regions(
            "Pacific Islands",
            &["Hawaii", "Guam"],
            "PI",
        )],
        FakeSource::new().with_rows("Hawaii", 2).with_rows("Guam", 3),
    )
    .await;

    let result = harness.orchestrator.export("Pacific Islands").await.unwrap();
    assert_eq!(result.row_count(), 5);

    let published = harness.ledger.published();
    let rows: Vec<&str> = published[0].1.lines().skip(RDB_HEADER.len()).collect();
    assert_eq!(rows.len(), 5);
    assert!(rows[0].contains("Hawaii-001"));
    assert!(rows[1].contains("Hawaii-002"));
    assert!(rows[2].contains("Guam-001"));

    let messages = harness.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Regions: [Hawaii, Guam]"));
}

#[tokio::test]
async fn test_unknown_group_never_opens_artifact() {
    let harness = Harness::new(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
    )
    .await;

    let err = harness
        .orchestrator
        .run(&ExportRequest::new("Atlantis"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::UnknownRegionGroup);
    assert_eq!(harness.ledger.opens(), 0);
    assert_eq!(harness.ledger.commits(), 0);
    assert_eq!(harness.source.calls(), 0);
    assert_eq!(
        harness.messages(),
        vec!["ERROR: Given region group has no filename suffix: Atlantis".to_string()]
    );
}

#[tokio::test]
async fn test_group_without_suffix_is_unknown() {
    let harness = Harness::new(
        vec![group("Wisconsin", "WI"), group("Atlantis", "")],
        FakeSource::new().with_rows("Atlantis", 3),
    )
    .await;

    let err = harness.orchestrator.export("Atlantis").await.unwrap_err();
    assert_eq!(err.kind(), ExportErrorKind::UnknownRegionGroup);
    assert_eq!(harness.ledger.opens(), 0);
}

#[tokio::test]
async fn test_blank_group_is_rejected() {
    let harness = Harness::new(vec![group("Wisconsin", "WI")], FakeSource::new()).await;

    let err = harness.orchestrator.export("  ").await.unwrap_err();
    assert_eq!(err.kind(), ExportErrorKind::UnknownRegionGroup);
    assert_eq!(harness.messages().len(), 1);
}

#[tokio::test]
async fn test_empty_artifact_is_released_not_committed() {
    let harness = Harness::new(vec![group("Wisconsin", "WI")], FakeSource::new()).await;

    let err = harness.orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::EmptyArtifact);
    assert_eq!(err.details(), Some(wisconsin_details().as_str()));
    assert_eq!(harness.ledger.opens(), 1);
    assert_eq!(harness.ledger.commits(), 0);
    assert_eq!(harness.ledger.releases(), 1);
    assert!(harness.ledger.published().is_empty());
    assert_eq!(
        harness.messages(),
        vec![format!(
            "ERROR: Error writing RDB file: empty RDB file created. {}",
            wisconsin_details()
        )]
    );
}

#[tokio::test]
async fn test_header_failure_is_format_error() {
    let harness = Harness::new(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
    )
    .await;
    let orchestrator = harness
        .orchestrator
        .clone()
        .with_formatter_factory(Arc::new(BrokenHeaderFactory));

    let err = orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::Format);
    assert!(err.to_string().contains("header rejected"));
    assert_eq!(harness.source.calls(), 0);
    assert_eq!(harness.ledger.commits(), 0);
    assert_eq!(harness.ledger.releases(), 1);
}

#[tokio::test]
async fn test_row_write_failure_is_format_error() {
    let harness = Harness::new(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
    )
    .await;
    let orchestrator = harness
        .orchestrator
        .clone()
        .with_formatter_factory(Arc::new(FailingRowFactory { after: 3 }));

    let err = orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::Format);
    assert!(err.to_string().contains("row rejected"));
    assert_eq!(harness.source.calls(), 1);
    assert_eq!(harness.ledger.opens(), 1);
    assert_eq!(harness.ledger.commits(), 0);
    assert_eq!(harness.ledger.releases(), 1);
    assert!(harness.ledger.published().is_empty());

    let messages = harness.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("ERROR: Error writing RDB file: format failed:"));
}

#[tokio::test]
async fn test_stream_failure_is_fetch_error() {
    let harness = Harness::new(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().failing_for("Wisconsin"),
    )
    .await;

    let err = harness.orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::Fetch);
    assert_eq!(harness.ledger.commits(), 0);
    assert_eq!(harness.ledger.releases(), 1);

    let messages = harness.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("ERROR: Error writing RDB file: fetch failed:"));
    assert!(messages[0].contains("connection reset by peer"));
    assert!(messages[0].ends_with(&wisconsin_details()));
}

#[tokio::test]
async fn test_parameter_failure_is_fetch_error() {
    let ledger = Arc::new(ArtifactLedger::default());
    let harness = Harness::with_parts(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
        FakeParameters::failing(),
        FakeArtifactStore::new(Arc::clone(&ledger)),
        ledger,
    )
    .await;

    let err = harness.orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::Fetch);
    assert!(err.to_string().contains("parameter lookup timed out"));
    assert_eq!(harness.source.calls(), 0);
    assert_eq!(harness.ledger.releases(), 1);
}

#[tokio::test]
async fn test_open_failure_is_staging_error() {
    let ledger = Arc::new(ArtifactLedger::default());
    let harness = Harness::with_parts(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
        FakeParameters::ok(),
        FakeArtifactStore::new(Arc::clone(&ledger)).failing_open(),
        ledger,
    )
    .await;

    let err = harness.orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::Staging);
    assert_eq!(harness.ledger.releases(), 0);
    assert_eq!(harness.messages().len(), 1);
}

#[tokio::test]
async fn test_commit_failure_is_publish_error() {
    let ledger = Arc::new(ArtifactLedger::default());
    let harness = Harness::with_parts(
        vec![group("Wisconsin", "WI")],
        FakeSource::new().with_rows("Wisconsin", 6),
        FakeParameters::ok(),
        FakeArtifactStore::new(Arc::clone(&ledger)).failing_commit(),
        ledger,
    )
    .await;

    let err = harness.orchestrator.export("Wisconsin").await.unwrap_err();

    assert_eq!(err.kind(), ExportErrorKind::Publish);
    assert!(err.to_string().contains("bucket unavailable"));
    assert_eq!(harness.ledger.commits(), 1);
    assert_eq!(harness.ledger.releases(), 1);
    assert!(harness.ledger.published().is_empty());

    let messages = harness.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("ERROR: Error writing RDB file: publish failed:"));
}

#[tokio::test]
async fn test_all_isolates_group_failures() {
    let harness = Harness::new(
        vec![
            group("Alpha", "A"),
            group("Bravo", "B"),
            group("Charlie", ""),
        ],
        FakeSource::new().with_rows("Alpha", 6),
    )
    .await;

    let result = harness.orchestrator.run(&ExportRequest::all()).await.unwrap();

    assert_eq!(result.row_count(), 6);
    assert!(result
        .message()
        .starts_with("Exported 1 of 3 region groups, 6 rows written. Failures: "));
    assert!(result.message().contains("Bravo: empty RDB file created."));
    assert!(result
        .message()
        .contains("Charlie: Given region group has no filename suffix: Charlie"));

    assert_eq!(harness.ledger.opens(), 2);
    assert_eq!(harness.ledger.commits(), 1);
    assert_eq!(harness.ledger.releases(), 2);
    assert_eq!(harness.ledger.published()[0].0, key_for("A"));

    let messages = harness.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages.iter().filter(|m| m.starts_with("INFO:")).count(),
        1
    );
}

#[tokio::test]
async fn test_all_with_concurrency_cap() {
    let harness = Harness::new(
        vec![
            group("Alpha", "A"),
            group("Bravo", "B"),
            group("Delta", "D"),
        ],
        FakeSource::new()
            .with_rows("Alpha", 1)
            .with_rows("Bravo", 2)
            .with_rows("Delta", 3),
    )
    .await;
    let orchestrator = harness
        .orchestrator
        .clone()
        .with_fan_out(FanOutInvoker::new(1));

    let summary = orchestrator.export_all().await;

    assert!(summary.is_successful());
    assert_eq!(summary.total_groups(), 3);
    assert_eq!(summary.total_rows(), 6);
    let groups: Vec<&str> = summary.outcomes.iter().map(|o| o.group.as_str()).collect();
    assert_eq!(groups, vec!["Alpha", "Bravo", "Delta"]);
    assert_eq!(
        summary.message(),
        "Exported 3 of 3 region groups, 6 rows written"
    );
    assert_eq!(harness.ledger.commits(), 3);
    assert_eq!(harness.ledger.releases(), 3);
}

#[tokio::test]
async fn test_all_without_groups() {
    let harness = Harness::new(Vec::new(), FakeSource::new()).await;

    let result = harness.orchestrator.run(&ExportRequest::all()).await.unwrap();

    assert_eq!(result.row_count(), 0);
    assert_eq!(result.message(), "Exported 0 of 0 region groups, 0 rows written");
    assert!(harness.messages().is_empty());
    assert_eq!(harness.ledger.opens(), 0);
}
