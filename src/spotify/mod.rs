pub mod client;
pub mod types;

pub use client::SpotifyClient;
pub use types::{Artist, TimeRange, Track, TrackArtist};
