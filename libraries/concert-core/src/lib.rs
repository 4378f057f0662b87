//! Concert Core
//!
//! Platform-agnostic catalog types and collaborator traits for the Concert
//! playback stack.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `ArtistRef`, `AlbumRef` and their identifiers
//! - **Catalog parsing**: turning remote catalog records into playable tracks
//! - **Session gating**: the `SessionGate` trait consulted before playback
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use concert_core::{AlbumRef, Track};
//!
//! let track = Track::new("t-1", "Opening Night", "https://cdn.example/t-1.mp3", 241.0)
//!     .with_artist("The Quartet", None)
//!     .with_album(AlbumRef::new("Live at the Hall"));
//!
//! // Enqueueing the same catalog track twice yields two distinct instances
//! let again = track.clone().reissued();
//! assert_eq!(track.id, again.id);
//! assert_ne!(track.unique_id, again.unique_id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod session;
pub mod types;

pub use catalog::parse_catalog;
pub use error::{CoreError, Result};
pub use session::{AlwaysValid, SessionFlag, SessionGate};
pub use types::{AlbumId, AlbumRef, ArtistRef, Track, TrackId, UniqueId};
