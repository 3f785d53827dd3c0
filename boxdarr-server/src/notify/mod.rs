//! Outbound status announcements for Radarr events.

pub mod oauth;
pub mod radarr;
pub mod x;

use async_trait::async_trait;
use thiserror::Error;

use crate::infra::store::StoreError;

pub use radarr::{RadarrEventType, RadarrPayload};
pub use x::XPublisher;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no X credentials available")]
    MissingCredentials,

    #[error("request to X failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("X rejected the status ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Something that can post a short public status message.
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    async fn publish(&self, text: &str) -> Result<(), PublishError>;
}
