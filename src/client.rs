//! Client seam for lazy follow-up calls.
//!
//! Transport, authentication, rate limiting and paging live in whatever
//! implements [`Client`]. Models never hold a client; follow-up operations such
//! as [`Album::load_tracks`](crate::models::Album::load_tracks) borrow one for
//! the duration of the call.

use std::future::Future;

use serde_json::Value;

use crate::error::Result;

/// Source of raw Web API responses.
pub trait Client {
    /// First page of an album's tracks (`GET /albums/{id}/tracks`).
    fn album_tracks(&self, album_id: &str) -> impl Future<Output = Result<Value>> + Send;

    /// Audio features of a track (`GET /audio-features/{id}`).
    fn audio_features(&self, track_id: &str) -> impl Future<Output = Result<Value>> + Send;
}
