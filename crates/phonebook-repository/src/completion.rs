//! [`Completion`] — the outcome of a queued mutation.

use std::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

use tokio::sync::oneshot;

use crate::{Error, Result};

/// Handle returned by every mutating [`crate::Repository`] call.
///
/// The mutation is queued as soon as the call returns. Dropping the handle
/// leaves it running; awaiting it resolves once the write is done and the
/// contact collections have been republished.
#[derive(Debug)]
pub struct Completion {
  rx: oneshot::Receiver<Result<()>>,
}

impl Completion {
  pub(crate) fn new(rx: oneshot::Receiver<Result<()>>) -> Self { Self { rx } }
}

impl Future for Completion {
  type Output = Result<()>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    Pin::new(&mut self.rx)
      .poll(cx)
      .map(|received| received.unwrap_or_else(|_| Err(Error::Closed)))
  }
}
