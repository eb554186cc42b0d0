use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::error::Error;

const RETRY_AFTER: &str = "retry-after";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Suggested wait in milliseconds from rate-limit headers.
///
/// `retry-after` (seconds) wins over `x-ratelimit-reset` (unix timestamp).
/// A reset time in the past yields zero.
pub fn retry_delay_ms(headers: &HeaderMap, now_secs: i64) -> Option<u64> {
    if let Some(secs) = header_value::<u64>(headers, RETRY_AFTER) {
        return Some(secs.saturating_mul(1000));
    }

    header_value::<i64>(headers, RATE_LIMIT_RESET)
        .map(|reset| (reset.saturating_sub(now_secs).max(0) as u64).saturating_mul(1000))
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Maps a failed response onto the error taxonomy. Pure given `now_secs`.
pub fn classify_status(
    status: StatusCode,
    headers: &HeaderMap,
    message: String,
    now_secs: i64,
) -> Error {
    match status.as_u16() {
        403 | 429 => {
            let retry_after_ms = retry_delay_ms(headers, now_secs);
            let message = if message.is_empty() {
                match retry_after_ms {
                    Some(ms) => format!(
                        "GitHub API rate limit exceeded. Please try again in {} seconds.",
                        ms.div_ceil(1000)
                    ),
                    None => "GitHub API rate limit exceeded. Please try again later.".to_string(),
                }
            } else {
                message
            };
            Error::RateLimited {
                message,
                retry_after_ms,
            }
        }
        404 => Error::NotFound(if message.is_empty() {
            "User or resource not found".to_string()
        } else {
            message
        }),
        code if code >= 500 => Error::ServerError {
            status: code,
            message: if message.is_empty() {
                "GitHub API server error".to_string()
            } else {
                message
            },
        },
        _ => Error::Unknown(message),
    }
}

pub fn classify_response(status: StatusCode, headers: &HeaderMap, message: String) -> Error {
    classify_status(status, headers, message, Utc::now().timestamp())
}
