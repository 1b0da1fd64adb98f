use crate::core::retry::RetryPolicy;
use crate::ScraperError;
use std::time::Duration;
use url::Url;

fn status_error(status: u16) -> ScraperError {
    ScraperError::StatusError {
        url: Url::parse("https://example.com/cover.jpg").unwrap(),
        status,
    }
}

#[test]
fn test_default_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay, Duration::from_secs(2));
}

#[test]
fn test_transient_errors_are_retried() {
    let policy = RetryPolicy::default();

    assert!(policy.should_retry(&ScraperError::ConnectionError("reset".to_string())));
    for status in [429, 500, 502, 503, 504] {
        assert!(policy.should_retry(&status_error(status)), "status {}", status);
    }
}

#[test]
fn test_permanent_errors_are_not_retried() {
    let policy = RetryPolicy::default();

    assert!(!policy.should_retry(&status_error(404)));
    assert!(!policy.should_retry(&status_error(403)));
    assert!(!policy.should_retry(&ScraperError::MissingField("image_url")));
    assert!(!policy.should_retry(&ScraperError::IoError(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "read-only"
    ))));
}

#[test]
fn test_custom_retry_statuses() {
    let policy = RetryPolicy::new(5, Duration::from_millis(10)).with_retry_statuses(vec![404]);

    assert_eq!(policy.max_attempts, 5);
    assert!(policy.should_retry(&status_error(404)));
    assert!(!policy.should_retry(&status_error(503)));
}
