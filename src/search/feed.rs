//! Latest-only video results
//!
//! A user may start a new search before the previous one answers. Each
//! search takes a sequence number; when it completes, its videos replace
//! the feed only if no newer search has started since.

use super::sequence::RequestSequence;
use super::VideoSource;
use crate::error::Result;
use crate::geo::Location;
use crate::video::{CustomSearch, VideoResult};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct FeedState {
    videos: Vec<VideoResult>,
    loading: bool,
}

/// Current video results, replaced by each newer search
#[derive(Debug)]
pub struct VideoFeed<S> {
    source: S,
    sequence: RequestSequence,
    state: Mutex<FeedState>,
}

impl<S: VideoSource> VideoFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sequence: RequestSequence::new(),
            state: Mutex::new(FeedState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Search videos around `location`
    ///
    /// Returns whether this search's results were applied.
    pub async fn search_location(&self, location: &Location, language: &str) -> bool {
        let seq = self.begin();
        let outcome = self.source.videos_for_location(location, language).await;
        self.finish(seq, outcome)
    }

    /// Run a custom text search
    ///
    /// Returns whether this search's results were applied.
    pub async fn search_custom(&self, search: &CustomSearch) -> bool {
        let seq = self.begin();
        let outcome = self.source.custom_videos(search).await;
        self.finish(seq, outcome)
    }

    fn begin(&self) -> u64 {
        let seq = self.sequence.next();
        self.state().loading = true;
        seq
    }

    fn finish(&self, seq: u64, outcome: Result<Vec<VideoResult>>) -> bool {
        let mut state = self.state();
        if !self.sequence.is_latest(seq) {
            debug!("Discarding stale video search #{}", seq);
            return false;
        }

        state.loading = false;
        match outcome {
            Ok(videos) => state.videos = videos,
            Err(e) => {
                warn!("Video search failed: {}", e);
                state.videos.clear();
            }
        }
        true
    }

    pub fn videos(&self) -> Vec<VideoResult> {
        self.state().videos.clone()
    }

    /// Whether the latest search is still outstanding
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Drop the current results and ignore outstanding searches
    pub fn clear(&self) {
        self.sequence.next();
        let mut state = self.state();
        state.videos.clear();
        state.loading = false;
    }
}
