//! HTTP GET with automatic retry for transient failures.
//!
//! Wraps requests in [`seatbelt`] retry and timeout middleware. Network
//! errors, timeouts, 5xx responses and 429 responses are retried with
//! exponential backoff. Everything else, including other 4xx responses, is
//! handed back to the caller on the first attempt.

use crate::Result;
use core::time::Duration;
use layered::{Execute, Service, Stack};
use ohno::app_err;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use seatbelt::retry::{Backoff, Retry};
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use tick::Clock;
use url::Url;

const LOG_TARGET: &str = "      http";

/// Maximum retry attempts (on top of the original request).
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between retries.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Delay used for 429 responses that carry no `Retry-After` header.
const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(5);

/// Longest `Retry-After` we are willing to honor.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

/// How often and how quickly failed requests are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retry_attempts: u32,

    /// Delay before the first retry; each further retry doubles it.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retry_attempts: MAX_RETRY_ATTEMPTS,
            base_delay: RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retry_attempts: 0,
            base_delay: Duration::ZERO,
        }
    }
}

/// Parse the `Retry-After` header value as seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let secs = headers.get(RETRY_AFTER)?.to_str().ok()?.parse::<u64>().ok()?;
    Some(Duration::from_secs(secs).min(MAX_RETRY_AFTER))
}

/// Classify an HTTP outcome for retry purposes.
fn should_retry_response(result: &Result<Response>) -> RecoveryInfo {
    match result {
        Err(_) => RecoveryInfo::retry(),

        Ok(resp) if resp.status().is_server_error() => {
            parse_retry_after(resp.headers()).map_or_else(RecoveryInfo::retry, |delay| RecoveryInfo::retry().delay(delay))
        }

        Ok(resp) if resp.status() == StatusCode::TOO_MANY_REQUESTS => {
            RecoveryInfo::retry().delay(parse_retry_after(resp.headers()).unwrap_or(DEFAULT_RATE_LIMIT_DELAY))
        }

        Ok(_) => RecoveryInfo::never(),
    }
}

/// Send an HTTP GET request, retrying transient failures according to `policy`.
///
/// Each attempt is bounded by `timeout`. The returned response may still carry
/// a non-success status; callers decide what that means.
pub async fn resilient_get(client: &Client, url: &Url, policy: &RetryPolicy, timeout: Duration) -> Result<Response> {
    let clock = Clock::new_tokio();
    let context = ResilienceContext::new(&clock).name("http_get");

    let client = client.clone();
    let service = (
        Retry::layer("retry", &context)
            .clone_input()
            .recovery_with(|result: &Result<Response>, _| should_retry_response(result))
            .max_retry_attempts(policy.max_retry_attempts)
            .base_delay(policy.base_delay)
            .backoff(Backoff::Exponential)
            .on_retry(|_output, args| {
                log::debug!(
                    target: LOG_TARGET,
                    "retrying GET (attempt {}, delay {}ms)",
                    args.attempt().index() + 1,
                    args.retry_delay().as_millis(),
                );
            }),
        Timeout::layer("timeout", &context)
            .timeout_error(|_| app_err!("HTTP request timed out"))
            .timeout(timeout),
        Execute::new(move |url: Url| {
            let client = client.clone();
            async move { client.get(url).send().await.map_err(ohno::AppError::from) }
        }),
    )
        .into_service();

    service.execute(url.clone()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FAST_RETRIES: RetryPolicy = RetryPolicy {
        max_retry_attempts: 2,
        base_delay: Duration::from_millis(1),
    };

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_parse_retry_after_is_capped() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("86400"));
        assert_eq!(parse_retry_after(&headers), Some(MAX_RETRY_AFTER));
    }

    #[test]
    fn test_parse_retry_after_http_date_is_ignored() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_none_policy_never_retries() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retry_attempts, 0);
        assert_eq!(policy.base_delay, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_server_error_is_retried_until_attempts_run_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(503)).mount(&server).await;

        let url = Url::parse(&server.uri()).unwrap();
        let resp = resilient_get(&Client::new(), &url, &FAST_RETRIES, Duration::from_secs(5)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_honors_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let url = Url::parse(&server.uri()).unwrap();
        let resp = resilient_get(&Client::new(), &url, &FAST_RETRIES, Duration::from_secs(5)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(404)).mount(&server).await;

        let url = Url::parse(&server.uri()).unwrap();
        let resp = resilient_get(&Client::new(), &url, &FAST_RETRIES, Duration::from_secs(5)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let err = resilient_get(&Client::new(), &url, &RetryPolicy::none(), Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"), "{err}");
    }
}
