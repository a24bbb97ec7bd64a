//! Interactive search coordination
//!
//! Search boxes that fire while the user types need two guarantees: one
//! request per pause in typing, and no slow stale response overwriting a
//! newer one. [`autocomplete`] provides both for location lookup, [`feed`]
//! provides the second for video searches, and [`sequence`] is the shared
//! tagging primitive.

pub mod autocomplete;
pub mod feed;
pub mod sequence;

use crate::error::Result;
use crate::geo::{GeoBackend, Geocoder, Location};
use crate::video::{CustomSearch, VideoResult};
use std::future::Future;

pub use autocomplete::{AutocompleteController, AutocompleteState};
pub use feed::VideoFeed;
pub use sequence::RequestSequence;

/// Forward location lookup used by the autocomplete controller
pub trait LocationSearch: Send + Sync {
    /// Candidate locations for free text, best first
    fn search_locations(&self, query: &str) -> impl Future<Output = Result<Vec<Location>>> + Send;
}

/// Video lookups used by the feed
pub trait VideoSource: Send + Sync {
    /// Videos around a location, ranked for `language`
    fn videos_for_location(
        &self,
        location: &Location,
        language: &str,
    ) -> impl Future<Output = Result<Vec<VideoResult>>> + Send;

    /// Free-text search refined by location and category
    fn custom_videos(
        &self,
        search: &CustomSearch,
    ) -> impl Future<Output = Result<Vec<VideoResult>>> + Send;
}

impl LocationSearch for Geocoder {
    async fn search_locations(&self, query: &str) -> Result<Vec<Location>> {
        self.search(query).await
    }
}
