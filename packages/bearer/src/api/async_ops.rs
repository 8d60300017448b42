//! Async verification entry points
//!
//! RSA verification is CPU-bound, so async callers get it on tokio's
//! blocking pool instead of on a reactor thread.

use super::pipeline::Verifier;
use crate::types::VerificationOutcome;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Pending verification; resolves to a [`VerificationOutcome`]
///
/// A lost worker (panicked task, missing runtime) resolves to the rejected
/// outcome.
#[must_use = "futures do nothing unless polled"]
pub struct AsyncVerification {
    receiver: oneshot::Receiver<VerificationOutcome>,
}

impl AsyncVerification {
    pub(crate) fn new(receiver: oneshot::Receiver<VerificationOutcome>) -> Self {
        Self { receiver }
    }
}

impl Future for AsyncVerification {
    type Output = VerificationOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => {
                tracing::warn!("verification worker dropped without a result");
                Poll::Ready(VerificationOutcome::rejected())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Verifier {
    /// Verify on the blocking pool against the wall clock
    pub fn verify_async(&self, raw: impl Into<String>) -> AsyncVerification {
        self.spawn_verification(raw.into(), None)
    }

    /// Verify on the blocking pool as of `now`
    pub fn verify_async_at(&self, raw: impl Into<String>, now: i64) -> AsyncVerification {
        self.spawn_verification(raw.into(), Some(now))
    }

    fn spawn_verification(&self, raw: String, now: Option<i64>) -> AsyncVerification {
        let (tx, rx) = oneshot::channel();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let verifier = self.clone();
                handle.spawn_blocking(move || {
                    let outcome = match now {
                        Some(now) => verifier.verify(&raw, now),
                        None => verifier.verify_now(&raw),
                    };
                    let _ = tx.send(outcome);
                });
            }
            // tx drops here and the future resolves rejected
            Err(_) => tracing::warn!("verify_async called outside a tokio runtime"),
        }

        AsyncVerification::new(rx)
    }
}
