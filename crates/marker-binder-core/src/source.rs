/// Token identifying an active change-notification subscription.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Errors a tracking source can raise on subscription.
#[derive(thiserror::Error, Debug)]
pub enum SubscribeError {
    /// The tracking runtime is not present in the host session.
    #[error("tracking runtime is not available")]
    Unavailable,
    /// The source already has a registered listener.
    #[error("a listener is already subscribed")]
    AlreadySubscribed,
}

/// Change-notification channel of the host tracking runtime.
///
/// A source accepts at most one listener at a time. After a successful
/// `subscribe`, the host delivers each change batch to that listener through
/// [`TrackingListener::on_changes`](crate::TrackingListener::on_changes);
/// delivery is serialized, so no two notifications overlap.
pub trait TrackingSource {
    fn subscribe(&mut self) -> Result<Subscription, SubscribeError>;

    /// Stop delivery for `subscription`. Unknown or already-released tokens
    /// are ignored.
    fn unsubscribe(&mut self, subscription: Subscription);
}
