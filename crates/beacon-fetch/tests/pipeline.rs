//! End-to-end tests for the fetch-and-decode pipeline against a mock beacon service.

use beacon_fetch::{BeaconError, BeaconFetcher, FetchConfig};
use beacon_types::{Record, TimeRange};
use chrono::DateTime;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record_xml(timestamp: i64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><record xmlns="http://beacon.nist.gov/record/0.1/"><version>Version 1.0</version><frequency>60</frequency><timeStamp>{timestamp}</timeStamp><outputValue>OUT{timestamp}</outputValue><statusCode>0</statusCode></record>"#
    )
}

async fn mount_record(server: &MockServer, timestamp: i64, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/record/{timestamp}")))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

fn fetcher(server: &MockServer, timeout: Duration, concurrency: usize) -> BeaconFetcher {
    let config = FetchConfig::default()
        .with_base_url(format!("{}/rest/record", server.uri()))
        .with_timeout(timeout)
        .with_concurrency(concurrency);
    BeaconFetcher::new(config).unwrap()
}

fn range(from: i64, to: i64) -> TimeRange {
    TimeRange::new(
        DateTime::from_timestamp(from, 0).unwrap(),
        DateTime::from_timestamp(to, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_get_beacons_decodes_every_minute() {
    let server = MockServer::start().await;
    for ts in [1_483_746_000, 1_483_746_060, 1_483_746_120] {
        mount_record(&server, ts, ResponseTemplate::new(200).set_body_string(record_xml(ts))).await;
    }

    let beacons = fetcher(&server, Duration::from_secs(5), 2)
        .get_beacons(range(1_483_746_001, 1_483_746_121))
        .await
        .unwrap();

    let mut records: Vec<Record> = beacons.collect::<Result<_, _>>().unwrap();
    records.sort_by_key(|r| r.timestamp());

    let timestamps: Vec<_> = records
        .iter()
        .map(|r| r.timestamp().unwrap().timestamp())
        .collect();
    assert_eq!(timestamps, vec![1_483_746_000, 1_483_746_060, 1_483_746_120]);
    assert_eq!(records[1].output_value(), Some("OUT1483746060"));
    assert_eq!(records[1].version(), Some("Version 1.0"));
}

#[tokio::test]
async fn test_decode_failure_surfaces_per_record() {
    let server = MockServer::start().await;
    mount_record(
        &server,
        1_483_746_000,
        ResponseTemplate::new(200).set_body_string(record_xml(1_483_746_000)),
    )
    .await;
    mount_record(
        &server,
        1_483_746_060,
        ResponseTemplate::new(200).set_body_string("This is not XML"),
    )
    .await;

    let beacons = fetcher(&server, Duration::from_secs(5), 2)
        .get_beacons(range(1_483_746_000, 1_483_746_060))
        .await
        .unwrap();

    let results: Vec<_> = beacons.collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

    let err = results.into_iter().find_map(Result::err).unwrap();
    let BeaconError::Decode(decode) = err else {
        panic!("expected decode failure, got {err:?}");
    };
    assert_eq!(decode.text(), "This is not XML");
}

#[tokio::test]
async fn test_fetch_failure_returns_no_records() {
    let server = MockServer::start().await;
    mount_record(
        &server,
        1_483_746_000,
        ResponseTemplate::new(200).set_body_string(record_xml(1_483_746_000)),
    )
    .await;
    mount_record(
        &server,
        1_483_746_060,
        ResponseTemplate::new(200)
            .set_body_string(record_xml(1_483_746_060))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let err = fetcher(&server, Duration::from_millis(200), 2)
        .get_beacons(range(1_483_746_000, 1_483_746_060))
        .await
        .unwrap_err();

    let BeaconError::Fetch(batch) = err else {
        panic!("expected fetch failure, got {err:?}");
    };
    assert_eq!(batch.total(), 2);
    assert!(batch.first().is_timeout());
    assert_eq!(
        batch.first().minute(),
        DateTime::from_timestamp(1_483_746_060, 0)
    );
}

#[tokio::test]
async fn test_empty_range_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let beacons = fetcher(&server, Duration::from_secs(5), 2)
        .get_beacons(range(1_483_746_121, 1_483_746_001))
        .await
        .unwrap();
    assert_eq!(beacons.len(), 0);
}
