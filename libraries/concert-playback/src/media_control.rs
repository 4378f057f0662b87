//! Media-control surface
//!
//! What the OS media session (lock screen, hardware keys, notification
//! shade) shows and sends. Outbound is a [`NowPlaying`] projection of the
//! engine snapshot; inbound actions map one-to-one onto [`Command`]s.

use crate::command::Command;
use crate::events::PlaybackSnapshot;
use crate::types::PlaybackStatus;
use serde::{Deserialize, Serialize};

/// Now-playing metadata for the platform media session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: Option<String>,
    pub position: f64,
    pub duration: f64,
    pub status: PlaybackStatus,
}

impl NowPlaying {
    /// Project a snapshot; `None` when nothing is current
    pub fn from_snapshot(snapshot: &PlaybackSnapshot) -> Option<Self> {
        let track = snapshot.current_track.as_ref()?;
        Some(Self {
            title: track.name.clone(),
            artist: track.artist.name.clone(),
            album: track.album.name.clone(),
            artwork_url: track.album.image_url.clone(),
            position: snapshot.position,
            duration: snapshot.duration,
            status: snapshot.status,
        })
    }
}

/// Action received from the platform media session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum MediaControlCommand {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    SeekTo { position: f64 },
    SeekBy { delta: f64 },
}

impl From<MediaControlCommand> for Command {
    fn from(command: MediaControlCommand) -> Self {
        match command {
            MediaControlCommand::Play => Command::Play,
            MediaControlCommand::Pause => Command::Pause,
            MediaControlCommand::Toggle => Command::TogglePlayback,
            MediaControlCommand::Next => Command::NextTrack,
            MediaControlCommand::Previous => Command::PreviousTrack,
            MediaControlCommand::SeekTo { position } => Command::Seek { position },
            MediaControlCommand::SeekBy { delta } => Command::SeekBy { delta },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepeatMode;
    use concert_core::{AlbumRef, Track};

    fn snapshot(current: Option<Track>) -> PlaybackSnapshot {
        PlaybackSnapshot {
            volume: 80.0,
            is_muted: false,
            is_paused: false,
            status: PlaybackStatus::Playing,
            position: 12.5,
            duration: 200.0,
            repeat_mode: RepeatMode::Off,
            is_shuffled: false,
            current_track: current,
            priority_tracks: Vec::new(),
            next_tracks: Vec::new(),
            previous_tracks: Vec::new(),
        }
    }

    #[test]
    fn now_playing_from_snapshot() {
        let mut album = AlbumRef::new("Live at the Hall");
        album.image_url = Some("https://cdn.example/cover.jpg".to_string());
        let track = Track::new("t-1", "Overture", "https://cdn.example/t-1.mp3", 200.0)
            .with_artist("The Quartet", None)
            .with_album(album);

        let now = NowPlaying::from_snapshot(&snapshot(Some(track))).unwrap();
        assert_eq!(now.title, "Overture");
        assert_eq!(now.artist, "The Quartet");
        assert_eq!(now.album, "Live at the Hall");
        assert_eq!(now.artwork_url.as_deref(), Some("https://cdn.example/cover.jpg"));
        assert_eq!(now.position, 12.5);
        assert_eq!(now.status, PlaybackStatus::Playing);
    }

    #[test]
    fn nothing_playing() {
        assert!(NowPlaying::from_snapshot(&snapshot(None)).is_none());
    }

    #[test]
    fn commands_map_one_to_one() {
        assert_eq!(Command::from(MediaControlCommand::Play), Command::Play);
        assert_eq!(Command::from(MediaControlCommand::Next), Command::NextTrack);
        assert_eq!(
            Command::from(MediaControlCommand::SeekTo { position: 30.0 }),
            Command::Seek { position: 30.0 }
        );

        let action: MediaControlCommand =
            serde_json::from_str(r#"{"action":"seekBy","delta":10.0}"#).unwrap();
        assert_eq!(Command::from(action), Command::SeekBy { delta: 10.0 });
    }
}
