//! Result value returned by message senders.
//!
//! Sending a message is expected to fail routinely (unknown channel, revoked
//! token), so senders report the outcome as a value instead of a Rust `Err`.
//! Callers observe the outcome with [`PostMessageResult::on_success`] and
//! [`PostMessageResult::on_failure`].

/// Marker carried by a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Success;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome<S, F> {
    Successful(S),
    Failed(F),
}

/// Two-variant outcome of a send.
///
/// The variant is chosen by the constructor and cannot be changed afterwards;
/// the type exposes no mutating operation.
///
/// # Examples
/// ```
/// use timesheet_reminder::domain::{PostMessageResult, Success};
///
/// let result: PostMessageResult<Success, String> =
///     PostMessageResult::failed("channel_not_found".to_owned());
///
/// let mut seen = None;
/// result
///     .on_success(|_| panic!("not a success"))
///     .on_failure(|error| seen = Some(error.clone()));
/// assert_eq!(seen.as_deref(), Some("channel_not_found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PostMessageResult<S, F>(Outcome<S, F>);

impl<S, F> PostMessageResult<S, F> {
    /// Build a successful result.
    pub fn successful(success: S) -> Self {
        Self(Outcome::Successful(success))
    }

    /// Build a failed result.
    pub fn failed(failure: F) -> Self {
        Self(Outcome::Failed(failure))
    }

    /// Invoke `callback` with the success value, if this result is a success.
    ///
    /// The callback runs synchronously, at most once per call.
    pub fn on_success(&self, callback: impl FnOnce(&S)) -> &Self {
        if let Outcome::Successful(success) = &self.0 {
            callback(success);
        }
        self
    }

    /// Invoke `callback` with the failure value, if this result is a failure.
    ///
    /// The callback runs synchronously, at most once per call.
    pub fn on_failure(&self, callback: impl FnOnce(&F)) -> &Self {
        if let Outcome::Failed(failure) = &self.0 {
            callback(failure);
        }
        self
    }

    /// Return whether the send succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.0, Outcome::Successful(_))
    }

    /// Borrow the failure value, if any.
    pub fn failure(&self) -> Option<&F> {
        match &self.0 {
            Outcome::Successful(_) => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }

    /// Convert into a standard `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<S, F> {
        match self.0 {
            Outcome::Successful(success) => Ok(success),
            Outcome::Failed(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn success_fires_only_the_success_observer() {
        let result: PostMessageResult<Success, String> = PostMessageResult::successful(Success);
        let successes = Cell::new(0);
        let failures = Cell::new(0);

        result
            .on_success(|_| successes.set(successes.get() + 1))
            .on_failure(|_| failures.set(failures.get() + 1));

        assert_eq!(successes.get(), 1);
        assert_eq!(failures.get(), 0);
        assert!(result.is_success());
        assert!(result.failure().is_none());
    }

    #[rstest]
    fn failure_fires_only_the_failure_observer() {
        let result: PostMessageResult<Success, String> =
            PostMessageResult::failed("invalid_auth".to_owned());
        let successes = Cell::new(0);
        let mut received = None;

        result
            .on_success(|_| successes.set(successes.get() + 1))
            .on_failure(|error| received = Some(error.clone()));

        assert_eq!(successes.get(), 0);
        assert_eq!(received.as_deref(), Some("invalid_auth"));
        assert_eq!(result.failure().map(String::as_str), Some("invalid_auth"));
    }

    #[rstest]
    fn into_result_preserves_variant() {
        let ok: PostMessageResult<Success, String> = PostMessageResult::successful(Success);
        let failed: PostMessageResult<Success, String> = PostMessageResult::failed("x".to_owned());

        assert_eq!(ok.into_result(), Ok(Success));
        assert_eq!(failed.into_result(), Err("x".to_owned()));
    }
}
