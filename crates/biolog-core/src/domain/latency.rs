//! Latency rules
//!
//! Latencies are wall-clock milliseconds measured from the first qualifying
//! acquisition signal of an attempt. `-1` is the sentinel for "no origin was
//! observed" and is distinct from a measured zero.

use super::errors::DomainError;

/// Sentinel latency: no measurable duration
pub const NO_LATENCY: i64 = -1;

/// Milliseconds elapsed between `origin` and `now_ms`, or [`NO_LATENCY`]
/// when no origin was recorded.
///
/// The result is not sanitized: a clock that moved backwards yields a
/// negative value that [`check_latency`] rejects.
pub fn elapsed_since(origin: Option<i64>, now_ms: i64) -> i64 {
    match origin {
        Some(start) => now_ms.saturating_sub(start),
        None => NO_LATENCY,
    }
}

/// Validates a latency before it is placed in an outbound record.
///
/// The sentinel passes through unchanged and values `>= 0` are accepted.
/// Anything below the sentinel is an anomaly and is returned as
/// [`DomainError::NegativeLatency`]; callers replace it with [`NO_LATENCY`].
pub fn check_latency(latency_ms: i64) -> Result<i64, DomainError> {
    if latency_ms < NO_LATENCY {
        return Err(DomainError::NegativeLatency(latency_ms));
    }
    Ok(latency_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_without_origin_is_sentinel() {
        assert_eq!(elapsed_since(None, 1_000), NO_LATENCY);
        assert_eq!(elapsed_since(None, 0), NO_LATENCY);
    }

    #[test]
    fn test_elapsed_with_origin() {
        assert_eq!(elapsed_since(Some(1_000), 1_250), 250);
        assert_eq!(elapsed_since(Some(1_000), 1_000), 0);
        assert_eq!(elapsed_since(Some(1_000), 900), -100);
    }

    #[test]
    fn test_elapsed_does_not_overflow() {
        assert_eq!(elapsed_since(Some(i64::MAX), i64::MIN), i64::MIN);
    }

    #[test]
    fn test_check_sentinel_passes_silently() {
        assert_eq!(check_latency(NO_LATENCY), Ok(NO_LATENCY));
    }

    #[test]
    fn test_check_rejects_below_sentinel() {
        assert_eq!(check_latency(-2), Err(DomainError::NegativeLatency(-2)));
        assert_eq!(
            check_latency(i64::MIN),
            Err(DomainError::NegativeLatency(i64::MIN))
        );
    }

    #[test]
    fn test_check_accepts_non_negative() {
        assert_eq!(check_latency(0), Ok(0));
        assert_eq!(check_latency(250), Ok(250));
        assert_eq!(check_latency(i64::MAX), Ok(i64::MAX));
    }
}
