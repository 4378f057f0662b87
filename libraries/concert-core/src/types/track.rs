//! Track domain type

use super::{AlbumId, TrackId, UniqueId};
use serde::{Deserialize, Serialize};

/// Playable track record
///
/// Mirrors the remote catalog record and adds `unique_id`, the per-enqueue
/// identity used by the playback engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Per-enqueue identity (generated when missing from the payload)
    #[serde(default = "UniqueId::generate")]
    pub unique_id: UniqueId,

    /// Track title
    pub name: String,

    /// Streaming URL (HTTP range-capable)
    pub url: String,

    /// Catalog duration in seconds
    #[serde(default)]
    pub duration: f64,

    /// Performing artist
    #[serde(default)]
    pub artist: ArtistRef,

    /// Album the track belongs to
    #[serde(default)]
    pub album: AlbumRef,
}

/// Artist reference embedded in a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRef {
    /// Display name
    pub name: String,

    /// Artist page URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Album reference embedded in a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRef {
    /// Catalog identifier
    #[serde(default)]
    pub id: Option<AlbumId>,

    /// Display name
    pub name: String,

    /// Album page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Cover art URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AlbumRef {
    /// Album reference with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Track {
    /// Create a track with minimal metadata and a fresh unique id
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        duration: f64,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            unique_id: UniqueId::generate(),
            name: name.into(),
            url: url.into(),
            duration,
            artist: ArtistRef::default(),
            album: AlbumRef::default(),
        }
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, name: impl Into<String>, url: Option<String>) -> Self {
        self.artist = ArtistRef {
            name: name.into(),
            url,
        };
        self
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: AlbumRef) -> Self {
        self.album = album;
        self
    }

    /// Same catalog track with a fresh per-enqueue identity
    #[must_use]
    pub fn reissued(mut self) -> Self {
        self.unique_id = UniqueId::generate();
        self
    }

    /// Whether both values are the same enqueued instance
    pub fn is_same_instance(&self, other: &Track) -> bool {
        self.unique_id == other.unique_id
    }
}
