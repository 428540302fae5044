//! Observable snapshot collections.
//!
//! A [`Feed`] holds the most recently published snapshot of a collection and
//! pushes every new snapshot to its [`Subscription`]s. Snapshots are whole
//! lists; there are no incremental updates. Before the first publish the
//! snapshot is `None`, which lets subscribers tell "nothing published yet"
//! apart from "published and empty".

use std::sync::Arc;

use tokio::sync::watch;

/// The latest published list, if any.
pub type Snapshot<T> = Option<Arc<Vec<T>>>;

/// Publishing end of an observable collection.
#[derive(Debug)]
pub struct Feed<T> {
  tx: watch::Sender<Snapshot<T>>,
}

impl<T> Feed<T> {
  pub fn new() -> Self {
    let (tx, _) = watch::channel(None);
    Self { tx }
  }

  /// Replace the current snapshot and wake every subscriber. Publishing with
  /// no subscribers is fine; the snapshot is kept for later ones.
  pub fn publish(&self, items: Vec<T>) {
    self.tx.send_replace(Some(Arc::new(items)));
  }

  pub fn subscribe(&self) -> Subscription<T> {
    Subscription { rx: self.tx.subscribe() }
  }

  #[cfg(test)]
  fn subscriber_count(&self) -> usize { self.tx.receiver_count() }
}

impl<T> Default for Feed<T> {
  fn default() -> Self { Self::new() }
}

/// Receiving end of a [`Feed`]. Dropping it (or calling
/// [`Subscription::unsubscribe`]) detaches from the feed.
#[derive(Debug)]
pub struct Subscription<T> {
  rx: watch::Receiver<Snapshot<T>>,
}

impl<T> Subscription<T> {
  /// The snapshot as of now, without waiting.
  pub fn latest(&self) -> Snapshot<T> { self.rx.borrow().clone() }

  /// Wait for the first published snapshot. Resolves immediately if one has
  /// already been published. `None` if the feed was dropped before then.
  pub async fn first(&mut self) -> Snapshot<T> {
    let current = self.rx.wait_for(Option::is_some).await.ok()?;
    current.clone()
  }

  /// Wait for the next snapshot published after the last one this
  /// subscription observed. `None` once the feed is gone.
  pub async fn changed(&mut self) -> Snapshot<T> {
    self.rx.changed().await.ok()?;
    self.rx.borrow_and_update().clone()
  }

  /// Whether a snapshot newer than the last observed one is waiting.
  pub fn has_changed(&self) -> bool { self.rx.has_changed().unwrap_or(false) }

  pub fn unsubscribe(self) {}
}

impl<T> Clone for Subscription<T> {
  fn clone(&self) -> Self { Self { rx: self.rx.clone() } }
}
