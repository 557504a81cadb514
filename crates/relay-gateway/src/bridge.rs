// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes for the messaging bridge: `GET /updates` and `POST /send`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use relay_bridge::Bridge;
use serde_json::Value;
use tracing::{debug, warn};

use crate::envelope;

/// Query string of `GET /updates`. Numbers are parsed by hand so malformed
/// values get their own error codes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdatesQuery {
    pub peer: Option<String>,
    pub limit: Option<String>,
    pub after_id: Option<String>,
}

impl UpdatesQuery {
    /// Collect the known keys from decoded pairs. The first occurrence of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "peer" => &mut query.peer,
                "limit" => &mut query.limit,
                "after_id" => &mut query.after_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Build the bridge router. Unknown paths and wrong methods answer
/// `404 not_found` without reaching a handler.
pub fn bridge_router(bridge: Arc<Bridge>) -> Router {
    Router::new()
        .route("/updates", get(get_updates).fallback(not_found))
        .route("/send", post(post_send).fallback(not_found))
        .fallback(not_found)
        .with_state(bridge)
}

async fn not_found() -> Response {
    envelope::not_found()
}

/// Treat a blank query value like an absent one.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// GET /updates?peer=<id>&limit=<n>&after_id=<id>
pub async fn get_updates(
    State(bridge): State<Arc<Bridge>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => UpdatesQuery::from_pairs(pairs),
        Err(rejection) => {
            debug!(error = %rejection, "rejected updates query");
            return envelope::error(StatusCode::BAD_REQUEST, "invalid_query");
        }
    };

    let limit = match present(query.limit.as_deref()) {
        None => None,
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => return envelope::error(StatusCode::BAD_REQUEST, "invalid_limit"),
        },
    };
    let after_id = match present(query.after_id.as_deref()) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => return envelope::error(StatusCode::BAD_REQUEST, "invalid_after_id"),
        },
    };
    let peer = query.peer.unwrap_or_default();

    match bridge.poll(&peer, limit, after_id).await {
        Ok(items) => envelope::ok(items),
        Err(e) => {
            warn!(peer = %peer, error = %e, "poll failed");
            envelope::bridge_error(&e)
        }
    }
}

/// Fields of a `POST /send` body.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SendRequest {
    pub peer: Option<String>,
    pub text: Option<String>,
}

/// Parse a send body. Empty means `{}`; `peer` may be a string or a number.
pub fn parse_send_body(body: &[u8]) -> Option<SendRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(SendRequest::default());
    }
    let Value::Object(mut fields) = serde_json::from_slice::<Value>(body).ok()? else {
        return None;
    };
    let peer = match fields.remove("peer") {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let text = match fields.remove("text") {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };
    Some(SendRequest { peer, text })
}

/// POST /send with `{peer, text}`.
pub async fn post_send(State(bridge): State<Arc<Bridge>>, body: Bytes) -> Response {
    let Some(request) = parse_send_body(&body) else {
        return envelope::error(StatusCode::BAD_REQUEST, "invalid_json");
    };
    let peer = request.peer.unwrap_or_default();
    let text = request.text.unwrap_or_default();

    match bridge.send(&peer, &text).await {
        Ok(message) => envelope::ok(message),
        Err(e) => {
            warn!(peer = %peer, error = %e, "send failed");
            envelope::bridge_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_send_body(b""), Some(SendRequest::default()));
        assert_eq!(parse_send_body(b"  \n"), Some(SendRequest::default()));
    }

    #[test]
    fn numeric_peer_is_accepted() {
        let req = parse_send_body(br#"{"peer": 12345, "text": "hi"}"#).unwrap();
        assert_eq!(req.peer.as_deref(), Some("12345"));
        assert_eq!(req.text.as_deref(), Some("hi"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(parse_send_body(b"[1, 2]"), None);
        assert_eq!(parse_send_body(b"{not json"), None);
    }

    #[test]
    fn non_string_text_is_absent() {
        let req = parse_send_body(br#"{"peer": "alice", "text": 7}"#).unwrap();
        assert_eq!(req.text, None);
    }

    #[test]
    fn repeated_query_keys_keep_the_first_value() {
        let pairs = vec![
            ("peer".to_string(), "alice".to_string()),
            ("limit".to_string(), "5".to_string()),
            ("peer".to_string(), "bob".to_string()),
            ("other".to_string(), "x".to_string()),
        ];
        assert_eq!(
            UpdatesQuery::from_pairs(pairs),
            UpdatesQuery {
                peer: Some("alice".into()),
                limit: Some("5".into()),
                after_id: None,
            }
        );
    }

    #[test]
    fn blank_query_values_are_absent() {
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some(" 5 ")), Some("5"));
        assert_eq!(present(None), None);
    }
}
