// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YouTube caption source against a local stand-in of the public endpoints.

use relay_config::model::TranscriptConfig;
use relay_core::{CaptionFailure, CaptionSource, RelayError};
use relay_transcript::YoutubeCaptionSource;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WATCH_PAGE: &str = r#"<html><script>ytcfg.set({"INNERTUBE_API_KEY":"test-key_1","X":1});</script></html>"#;

fn source(server: &MockServer) -> YoutubeCaptionSource {
    YoutubeCaptionSource::new(&TranscriptConfig::default())
        .unwrap()
        .with_base_url(&server.uri())
}

async fn mount_watch_page(server: &MockServer, video_id: &str) {
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", video_id))
        .respond_with(ResponseTemplate::new(200).set_body_string(WATCH_PAGE))
        .mount(server)
        .await;
}

async fn mount_player(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .and(query_param("key", "test-key_1"))
        .and(body_partial_json(json!({"videoId": "vid123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn failure_of(err: &RelayError) -> Option<CaptionFailure> {
    match err {
        RelayError::Captions { failure, .. } => Some(*failure),
        _ => None,
    }
}

#[tokio::test]
async fn lists_and_fetches_tracks() {
    let server = MockServer::start().await;
    mount_watch_page(&server, "vid123").await;
    mount_player(
        &server,
        json!({
            "playabilityStatus": {"status": "OK"},
            "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
                {
                    "baseUrl": format!("{}/api/timedtext?v=vid123&lang=en&fmt=srv3", server.uri()),
                    "languageCode": "en",
                    "name": {"runs": [{"text": "English"}]}
                },
                {
                    "baseUrl": format!("{}/api/timedtext?v=vid123&lang=es&kind=asr", server.uri()),
                    "languageCode": "es",
                    "name": {"simpleText": "Spanish (auto-generated)"},
                    "kind": "asr"
                }
            ]}}
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<transcript><text start="0" dur="1.5">Hello</text><text start="1.5" dur="2">it&amp;#39;s me</text></transcript>"#,
        ))
        .mount(&server)
        .await;

    let source = source(&server);
    let tracks = source.list_tracks("vid123").await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].language_code, "en");
    assert_eq!(tracks[0].name, "English");
    assert!(!tracks[0].is_generated);
    assert!(!tracks[0].handle.contains("fmt=srv3"));
    assert_eq!(tracks[1].name, "Spanish (auto-generated)");
    assert!(tracks[1].is_generated);

    let cues = source.fetch_track(&tracks[0]).await.unwrap();
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[1].start, Some(1.5));
    assert_eq!(cues[1].text.as_deref(), Some("it's me"));
}

#[tokio::test]
async fn missing_tracklist_means_captions_disabled() {
    let server = MockServer::start().await;
    mount_watch_page(&server, "vid123").await;
    mount_player(&server, json!({"playabilityStatus": {"status": "OK"}})).await;

    let err = source(&server).list_tracks("vid123").await.unwrap_err();
    assert_eq!(failure_of(&err), Some(CaptionFailure::CaptionsDisabled));
}

#[tokio::test]
async fn unplayable_video_is_unavailable() {
    let server = MockServer::start().await;
    mount_watch_page(&server, "vid123").await;
    mount_player(
        &server,
        json!({"playabilityStatus": {"status": "ERROR", "reason": "This video is unavailable"}}),
    )
    .await;

    let err = source(&server).list_tracks("vid123").await.unwrap_err();
    assert_eq!(failure_of(&err), Some(CaptionFailure::VideoUnavailable));
}

#[tokio::test]
async fn age_restricted_video_is_retrieval_failure() {
    let server = MockServer::start().await;
    mount_watch_page(&server, "vid123").await;
    mount_player(
        &server,
        json!({"playabilityStatus": {
            "status": "LOGIN_REQUIRED",
            "reason": "Sign in to confirm your age"
        }}),
    )
    .await;

    let err = source(&server).list_tracks("vid123").await.unwrap_err();
    assert_eq!(failure_of(&err), Some(CaptionFailure::Retrieval));
}

#[tokio::test]
async fn watch_page_without_key_is_retrieval_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>consent</html>"))
        .mount(&server)
        .await;

    let err = source(&server).list_tracks("vid123").await.unwrap_err();
    assert_eq!(failure_of(&err), Some(CaptionFailure::Retrieval));
}

#[tokio::test]
async fn http_error_is_retrieval_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = source(&server).list_tracks("vid123").await.unwrap_err();
    assert_eq!(failure_of(&err), Some(CaptionFailure::Retrieval));
}
