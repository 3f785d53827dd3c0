use std::{fmt, sync::Arc};

use async_trait::async_trait;
use url::Url;

use super::traits::RatingsSource;
use crate::{
    domain::{RatingsRecord, service},
    error::ProviderError,
    infra::http::{HttpFetch, fetch_json},
};

/// Public OMDb endpoint.
pub const OMDB_API_BASE: &str = "http://www.omdbapi.com/";

/// [`RatingsSource`] backed by OMDb's title lookup.
pub struct OmdbClient {
    http: Arc<dyn HttpFetch>,
    base_url: Url,
    api_key: String,
}

impl fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key_set", &!self.api_key.is_empty())
            .finish()
    }
}

impl OmdbClient {
    /// Client for `base_url`, authenticating with `api_key`.
    pub fn new(http: Arc<dyn HttpFetch>, base_url: Url, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn lookup_url(&self, title: &str, year: Option<u16>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("t", title);
            if let Some(year) = year {
                pairs.append_pair("y", &year.to_string());
            }
            pairs.append_pair("apikey", &self.api_key);
        }
        url
    }
}

#[async_trait]
impl RatingsSource for OmdbClient {
    async fn lookup(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> Result<RatingsRecord, ProviderError> {
        let url = self.lookup_url(title, year);
        tracing::debug!(title, ?year, "OMDb lookup");
        fetch_json(self.http.as_ref(), &url).await
    }

    fn name(&self) -> &'static str {
        service::OMDB
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpFetch for Recording {
        async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(r#"{"Title":"Heat","Year":"1995","imdbID":"tt0113277","Type":"movie","Response":"True"}"#.to_string())
        }
    }

    #[tokio::test]
    async fn lookup_encodes_title_year_and_key() {
        let http = Arc::new(Recording::default());
        let client = OmdbClient::new(
            http.clone(),
            Url::parse(OMDB_API_BASE).unwrap(),
            "k3y".into(),
        );

        let record = client.lookup("Heat: Director's Cut", Some(1995)).await.unwrap();
        assert!(record.is_movie_match());
        assert_eq!(record.imdb_id.as_deref(), Some("tt0113277"));

        let seen = http.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            "http://www.omdbapi.com/?t=Heat%3A+Director%27s+Cut&y=1995&apikey=k3y"
        );
    }
}
