//! Domain types for catalog tracks

mod ids;
mod track;

pub use ids::{AlbumId, TrackId, UniqueId};
pub use track::{AlbumRef, ArtistRef, Track};
