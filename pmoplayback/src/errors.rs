use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Outcome of an operation completed asynchronously by the underlying handle
/// (media element play, cast load, session requests).
pub type Deferred<T = ()> = BoxFuture<'static, Result<T>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("No media element attached")]
    NoMediaElement,
    #[error("Cast API not available")]
    CastApiUnavailable,
    #[error("Cast context not initialized")]
    ContextNotInitialized,
    #[error("Not connected to a cast device")]
    NotConnected,
    #[error("No URL provided")]
    MissingUrl,
    #[error("No cast session available")]
    NoSession,
    #[error("Media element error: {0}")]
    MediaElement(String),
    #[error("Chromecast Error: {0}")]
    Cast(String),
}

impl PlaybackError {
    pub fn cast_error(message: impl Into<String>) -> Self {
        PlaybackError::Cast(message.into())
    }

    /// True when the error only means "nothing to talk to yet".
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            PlaybackError::NoMediaElement
                | PlaybackError::ContextNotInitialized
                | PlaybackError::NotConnected
                | PlaybackError::NoSession
        )
    }
}

/// An already rejected [`Deferred`].
pub(crate) fn rejected<T: Send + 'static>(error: PlaybackError) -> Deferred<T> {
    future::ready(Err(error)).boxed()
}

/// An already resolved [`Deferred`].
pub(crate) fn resolved() -> Deferred {
    future::ready(Ok(())).boxed()
}
