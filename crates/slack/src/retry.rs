use http::HeaderMap;

pub const RETRY_NUM_HEADER: &str = "x-slack-retry-num";
pub const RETRY_REASON_HEADER: &str = "x-slack-retry-reason";

/// True when Slack marked this delivery as a redelivery of an earlier attempt.
///
/// Best effort: a first delivery that timed out on our side is still processed
/// once by its original request. The raw bytes are inspected, so a header that
/// is not valid UTF-8 still counts as present.
pub fn should_skip(headers: &HeaderMap) -> bool {
    headers
        .get(RETRY_NUM_HEADER)
        .is_some_and(|value| value.as_bytes().iter().any(|byte| !byte.is_ascii_whitespace()))
}

pub fn retry_attempt(headers: &HeaderMap) -> Option<u32> {
    header_str(headers, RETRY_NUM_HEADER).and_then(|value| value.parse().ok())
}

pub fn retry_reason(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, RETRY_REASON_HEADER)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
