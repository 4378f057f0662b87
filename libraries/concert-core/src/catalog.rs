//! Catalog payload decoding
//!
//! The remote catalog hands out JSON track lists; this module turns them into
//! playable [`Track`]s and rejects records the engine could never load.

use crate::error::{CoreError, Result};
use crate::types::Track;

/// Decode a JSON array of catalog records
///
/// Every record must carry a non-empty URL and a finite, non-negative
/// duration. Records without a `uniqueId` get a fresh one.
pub fn parse_catalog(json: &str) -> Result<Vec<Track>> {
    let tracks: Vec<Track> = serde_json::from_str(json)?;

    for track in &tracks {
        validate(track)?;
    }

    Ok(tracks)
}

fn validate(track: &Track) -> Result<()> {
    if track.url.trim().is_empty() {
        return Err(CoreError::invalid_track(track.id.as_str(), "missing url"));
    }

    if !track.duration.is_finite() || track.duration < 0.0 {
        return Err(CoreError::invalid_track(
            track.id.as_str(),
            format!("bad duration {}", track.duration),
        ));
    }

    Ok(())
}
