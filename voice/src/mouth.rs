use async_trait::async_trait;
use std::sync::Arc;

/// Speaks text aloud.
///
/// Implementations must be `Send` and `Sync` so a single engine can be shared
/// by every component that talks to the operator.
#[async_trait]
pub trait Mouth: Send + Sync {
    /// Vocalize `text`. The returned future resolves once speech has finished.
    ///
    /// Failures are reported through logging rather than returned; a mouth
    /// that cannot speak should never stop the caller.
    async fn speak(&self, text: &str);
}

#[async_trait]
impl<M: Mouth + ?Sized> Mouth for Arc<M> {
    async fn speak(&self, text: &str) {
        (**self).speak(text).await
    }
}
