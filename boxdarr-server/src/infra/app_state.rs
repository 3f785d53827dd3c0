use std::{fmt, sync::Arc};

use boxdarr_core::Pipeline;

use crate::{
    infra::store::KeyValueStore,
    notify::{StatusPublisher, oauth::OAuthFlow},
};

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    publisher: Arc<dyn StatusPublisher>,
    store: Arc<dyn KeyValueStore>,
    oauth: Option<Arc<dyn OAuthFlow>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .field("oauth_enabled", &self.oauth.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        pipeline: Arc<Pipeline>,
        publisher: Arc<dyn StatusPublisher>,
        store: Arc<dyn KeyValueStore>,
        oauth: Option<Arc<dyn OAuthFlow>>,
    ) -> Self {
        Self {
            pipeline,
            publisher,
            store,
            oauth,
        }
    }

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    pub fn publisher(&self) -> &Arc<dyn StatusPublisher> {
        &self.publisher
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn oauth(&self) -> Option<&Arc<dyn OAuthFlow>> {
        self.oauth.as_ref()
    }
}
