//! Fixed-delay retry for rate-limited JSON POSTs.
//!
//! Each attempt is classified into an [`AttemptOutcome`]. Only
//! [`AttemptOutcome::RateLimited`] is ever retried, and the wait is the
//! server's `retry-after` hint or a fixed default. There is no exponential
//! growth and no jitter.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info_span, warn, Instrument};

use crate::error::{UpstreamError, UpstreamResult};
use crate::metrics;

// =============================================================================
// Policy
// =============================================================================

/// Result of a single POST attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// 2xx response, returned to the caller as-is
    Success(Response),
    /// HTTP 429; eligible for retry
    RateLimited {
        retry_after: Option<Duration>,
        payload: String,
    },
    /// Anything else; never retried
    Fatal(UpstreamError),
}

/// What to do after a rate-limited attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay, then try again
    Retry(Duration),
    /// Attempt budget is spent
    GiveUp,
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay used when the server gives no usable hint
    pub default_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            default_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, default_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            default_delay,
        }
    }

    /// Decide whether a rate-limited attempt should be retried.
    ///
    /// `attempt` is 1-based: the first POST is attempt 1.
    pub fn decide(&self, attempt: u32, retry_after: Option<Duration>) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Retry(retry_after.unwrap_or(self.default_delay))
    }
}

/// Parse a `retry-after` value given in seconds.
///
/// Fractional seconds are accepted. HTTP-date forms, negative or
/// out-of-range numbers and garbage yield `None` so the default delay applies.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    let seconds: f64 = value.parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

// =============================================================================
// Caller
// =============================================================================

/// HTTP client that POSTs JSON and retries on 429 per a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryingClient {
    client: Client,
    policy: RetryPolicy,
    timeout: Duration,
}

impl RetryingClient {
    pub fn new(client: Client, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client,
            policy,
            timeout,
        }
    }

    /// POST `body` as JSON to `url`, retrying on HTTP 429.
    ///
    /// Returns the first 2xx response. A non-429 failure is returned
    /// immediately. When every attempt is rate limited the error is
    /// [`UpstreamError::RetriesExhausted`] carrying the last 429 body.
    pub async fn post_json<B>(
        &self,
        url: &str,
        body: &B,
        headers: &HeaderMap,
    ) -> UpstreamResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut attempt = 1;

        loop {
            let span = info_span!("upstream_attempt", attempt);
            let outcome = self.attempt(url, body, headers).instrument(span).await;

            match outcome {
                AttemptOutcome::Success(response) => {
                    metrics::record_upstream_request("success");
                    return Ok(response);
                }
                AttemptOutcome::Fatal(e) => {
                    metrics::record_upstream_request("error");
                    return Err(e);
                }
                AttemptOutcome::RateLimited {
                    retry_after,
                    payload,
                } => {
                    metrics::record_upstream_request("rate_limited");

                    match self.policy.decide(attempt, retry_after) {
                        RetryDecision::Retry(delay) => {
                            warn!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                hinted = retry_after.is_some(),
                                "Rate limited. Retrying after {:.1} seconds...",
                                delay.as_secs_f64()
                            );
                            metrics::record_upstream_retry();
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        RetryDecision::GiveUp => {
                            warn!(attempts = attempt, "Rate limited on every attempt, giving up");
                            return Err(UpstreamError::RetriesExhausted {
                                attempts: attempt,
                                payload,
                            });
                        }
                    }
                }
            }
        }
    }

    async fn attempt<B>(&self, url: &str, body: &B, headers: &HeaderMap) -> AttemptOutcome
    where
        B: Serialize + ?Sized,
    {
        let response = match self
            .client
            .post(url)
            .headers(headers.clone())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            // The URL carries the API key; keep it out of logs and error bodies.
            Err(e) => return AttemptOutcome::Fatal(UpstreamError::Network(e.without_url())),
        };

        let status = response.status();
        debug!(status = status.as_u16(), "Upstream responded");

        if status.is_success() {
            return AttemptOutcome::Success(response);
        }

        let retry_after = parse_retry_after(response.headers());
        let payload = response.text().await.unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS {
            AttemptOutcome::RateLimited {
                retry_after,
                payload,
            }
        } else {
            AttemptOutcome::Fatal(UpstreamError::Status {
                status: status.as_u16(),
                payload,
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with_retry_after(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.default_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_policy_uses_hint_when_present() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.decide(1, Some(Duration::from_secs(2))),
            RetryDecision::Retry(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_policy_uses_default_without_hint() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.decide(1, None),
            RetryDecision::Retry(Duration::from_secs(5))
        );
        assert_eq!(
            policy.decide(2, None),
            RetryDecision::Retry(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_policy_delay_is_fixed_across_attempts() {
        let policy = RetryPolicy::new(10, Duration::from_secs(5));
        for attempt in 1..10 {
            assert_eq!(
                policy.decide(attempt, None),
                RetryDecision::Retry(Duration::from_secs(5))
            );
        }
    }

    #[test]
    fn test_policy_gives_up_on_last_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.decide(3, None), RetryDecision::GiveUp);
        assert_eq!(
            policy.decide(3, Some(Duration::from_secs(1))),
            RetryDecision::GiveUp
        );
    }

    #[test]
    fn test_single_attempt_policy_never_retries() {
        let policy = RetryPolicy::new(0, Duration::from_secs(5));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.decide(1, None), RetryDecision::GiveUp);
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(
            parse_retry_after(&headers_with_retry_after("7")),
            Some(Duration::from_secs(7))
        );
        assert_eq!(
            parse_retry_after(&headers_with_retry_after(" 0 ")),
            Some(Duration::ZERO)
        );
        assert_eq!(
            parse_retry_after(&headers_with_retry_after("1.5")),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_parse_retry_after_unusable() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
        assert_eq!(parse_retry_after(&headers_with_retry_after("-1")), None);
        assert_eq!(parse_retry_after(&headers_with_retry_after("1e20")), None);
        assert_eq!(parse_retry_after(&headers_with_retry_after("NaN")), None);
        assert_eq!(parse_retry_after(&headers_with_retry_after("inf")), None);
        assert_eq!(
            parse_retry_after(&headers_with_retry_after("Wed, 21 Oct 2015 07:28:00 GMT")),
            None
        );
    }
}
