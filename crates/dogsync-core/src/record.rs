//! The canonical in-memory dog record produced from a form submission.

use serde::Serialize;

/// Canonical dog record, derived fresh for each webhook call and never stored.
///
/// `entry_id` is the only identity anchor. It is optional here so that
/// mapping stays total; the orchestrator rejects records without it before
/// any downstream call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DogRecord {
    pub entry_id: Option<String>,
    pub name: Option<String>,
    pub story: Option<String>,
    pub litter: Option<String>,
    pub birthday: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub size_when_grown: Option<String>,
    /// Always populated; see [`crate::normalize_availability`].
    pub availability: String,
    /// Absolute image URLs in display order.
    pub image_urls: Vec<String>,
}
