//! Build event envelope decoding and outcome classification

use serde_json::Value;

use crate::error::{NotifyError, Result};

/// Status token that counts as a successful build. Everything else,
/// including statuses we have never seen, is treated as a failure.
pub const SUCCESS_TOKEN: &str = "SUCCEEDED";

/// Fields extracted from one build status event.
/// Constructed once per invocation, rendered into a card, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub succeeded: bool,
    pub project_name: String,
    pub build_id: String,
    pub start_time: String,
    pub logs_url: String,
}

/// Returns true only for the literal success token.
pub fn classify(status: &str) -> bool {
    status == SUCCESS_TOKEN
}

/// Decodes the SNS-style envelope: the first record carries a
/// JSON-encoded message string with the build detail inside.
/// All five detail fields are required; a missing one fails the
/// invocation rather than producing a half-filled card.
pub fn extract(event: &Value) -> Result<BuildOutcome> {
    let message = event
        .get("Records")
        .and_then(|r| r.get(0))
        .and_then(|rec| rec.get("Sns"))
        .and_then(|sns| sns.get("Message"))
        .and_then(|m| m.as_str())
        .ok_or_else(|| {
            NotifyError::MalformedEvent(
                "no Records[0].Sns.Message string in envelope".to_string(),
            )
        })?;

    let inner: Value = serde_json::from_str(message).map_err(|e| {
        NotifyError::MalformedEvent(format!("embedded message is not valid JSON: {}", e))
    })?;

    let detail = inner
        .get("detail")
        .ok_or_else(|| missing_key("detail"))?;
    let status = str_field(detail, "build-status", "detail.build-status")?;
    let project_name = str_field(detail, "project-name", "detail.project-name")?;
    let build_id = str_field(detail, "build-id", "detail.build-id")?;

    let info = detail
        .get("additional-information")
        .ok_or_else(|| missing_key("detail.additional-information"))?;
    let start_time = str_field(
        info,
        "build-start-time",
        "detail.additional-information.build-start-time",
    )?;
    let logs_url = info
        .get("logs")
        .and_then(|l| l.get("deep-link"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing_key("detail.additional-information.logs.deep-link"))?;

    Ok(BuildOutcome {
        succeeded: classify(status),
        project_name: project_name.to_string(),
        build_id: build_id.to_string(),
        start_time: start_time.to_string(),
        logs_url: logs_url.to_string(),
    })
}

fn missing_key(path: &str) -> NotifyError {
    NotifyError::MalformedEvent(format!("missing key '{}'", path))
}

fn str_field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing_key(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn detail_message() -> Value {
        json!({
            "detail": {
                "build-status": "SUCCEEDED",
                "project-name": "artifactory-test",
                "build-id": "arn:123",
                "additional-information": {
                    "build-start-time": "2024-01-01T00:00:00Z",
                    "logs": { "deep-link": "https://logs.example/1" }
                }
            }
        })
    }

    fn envelope_from(detail: Value) -> Value {
        json!({ "Records": [ { "Sns": { "Message": detail.to_string() } } ] })
    }

    #[rstest]
    #[case("SUCCEEDED", true)]
    #[case("FAILED", false)]
    #[case("STOPPED", false)]
    #[case("IN_PROGRESS", false)]
    #[case("succeeded", false)]
    #[case("", false)]
    fn classify_only_accepts_the_success_token(#[case] status: &str, #[case] expected: bool) {
        assert_eq!(classify(status), expected);
    }

    #[test]
    fn extract_reads_all_fields() {
        let outcome = extract(&envelope_from(detail_message())).unwrap();
        assert!(outcome.succeeded);
        assert_eq!(outcome.project_name, "artifactory-test");
        assert_eq!(outcome.build_id, "arn:123");
        assert_eq!(outcome.start_time, "2024-01-01T00:00:00Z");
        assert_eq!(outcome.logs_url, "https://logs.example/1");
    }

    #[test]
    fn extract_classifies_non_success_statuses_as_failure() {
        let mut detail = detail_message();
        detail["detail"]["build-status"] = json!("FAULT");
        let outcome = extract(&envelope_from(detail)).unwrap();
        assert!(!outcome.succeeded);
    }

    #[test]
    fn extract_rejects_envelope_without_records() {
        let err = extract(&json!({ "foo": "bar" })).unwrap_err();
        assert!(matches!(err, NotifyError::MalformedEvent(_)));
    }

    #[test]
    fn extract_rejects_unparsable_embedded_message() {
        let event = json!({ "Records": [ { "Sns": { "Message": "not json" } } ] });
        let err = extract(&event).unwrap_err();
        assert!(matches!(err, NotifyError::MalformedEvent(_)));
    }

    #[rstest]
    #[case(&["detail", "build-status"])]
    #[case(&["detail", "project-name"])]
    #[case(&["detail", "build-id"])]
    #[case(&["detail", "additional-information", "build-start-time"])]
    #[case(&["detail", "additional-information", "logs"])]
    fn extract_rejects_missing_required_key(#[case] path: &[&str]) {
        let mut detail = detail_message();
        let parent = path[..path.len() - 1]
            .iter()
            .fold(&mut detail, |v, key| &mut v[*key]);
        parent
            .as_object_mut()
            .unwrap()
            .remove(*path.last().unwrap());

        let err = extract(&envelope_from(detail)).unwrap_err();
        match err {
            NotifyError::MalformedEvent(msg) => {
                assert!(msg.contains(path.last().unwrap()), "unexpected message: {}", msg)
            }
            other => panic!("expected MalformedEvent, got {:?}", other),
        }
    }
}
