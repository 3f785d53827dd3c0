//! Radarr webhook payloads and the status text each event produces.

use boxdarr_core::UNKNOWN;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RadarrEventType {
    Grab,
    Download,
    Rename,
    Test,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarrMovie {
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarrRemoteMovie {
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarrRelease {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub size_readable: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarrPayload {
    pub event_type: RadarrEventType,
    #[serde(default)]
    pub movie: Option<RadarrMovie>,
    #[serde(default)]
    pub remote_movie: Option<RadarrRemoteMovie>,
    #[serde(default)]
    pub release: Option<RadarrRelease>,
}

impl RadarrPayload {
    /// `remoteMovie` first, then `movie`.
    pub fn title(&self) -> &str {
        self.remote_movie
            .as_ref()
            .map(|m| m.title.as_str())
            .or(self.movie.as_ref().map(|m| m.title.as_str()))
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(UNKNOWN)
    }

    pub fn year(&self) -> Option<u16> {
        self.remote_movie
            .as_ref()
            .and_then(|m| m.year)
            .or(self.movie.as_ref().and_then(|m| m.year))
    }

    fn title_with_year(&self) -> String {
        match self.year() {
            Some(year) => format!("{} ({year})", self.title()),
            None => self.title().to_string(),
        }
    }

    /// Status text for this event; `None` when nothing is announced.
    pub fn status_message(&self) -> Option<String> {
        match self.event_type {
            RadarrEventType::Grab => {
                Some(format!("🎬 Grabbed: {}", self.title_with_year()))
            }
            RadarrEventType::Download => {
                Some(format!("📥 Downloaded: {}", self.title_with_year()))
            }
            RadarrEventType::Rename => {
                Some(format!("✏️ Renamed: {}", self.title()))
            }
            RadarrEventType::Test | RadarrEventType::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(raw: &str) -> RadarrPayload {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn download_prefers_remote_movie() {
        let event = payload(
            r#"{
                "eventType": "Download",
                "movie": {"title": "Heat (local)", "year": 1994},
                "remoteMovie": {"title": "Heat", "year": 1995, "imdbId": "tt0113277"},
                "release": {"quality": "Bluray-1080p", "size": 1000}
            }"#,
        );

        assert_eq!(
            event.status_message().as_deref(),
            Some("📥 Downloaded: Heat (1995)")
        );
    }

    #[test]
    fn grab_and_rename_fall_back_to_movie() {
        let grab = payload(
            r#"{"eventType": "Grab", "movie": {"title": "Ronin", "year": 1998}}"#,
        );
        assert_eq!(grab.status_message().as_deref(), Some("🎬 Grabbed: Ronin (1998)"));

        let rename = payload(
            r#"{"eventType": "Rename", "movie": {"title": "Thief", "year": 1981}}"#,
        );
        assert_eq!(rename.status_message().as_deref(), Some("✏️ Renamed: Thief"));
    }

    #[test]
    fn test_and_unknown_events_are_silent() {
        assert!(payload(r#"{"eventType": "Test"}"#).status_message().is_none());
        assert!(
            payload(r#"{"eventType": "HealthIssue"}"#)
                .status_message()
                .is_none()
        );
    }

    #[test]
    fn missing_movie_reads_unknown_without_year() {
        let event = payload(r#"{"eventType": "Download"}"#);
        assert_eq!(
            event.status_message().as_deref(),
            Some("📥 Downloaded: Unknown")
        );
    }
}
