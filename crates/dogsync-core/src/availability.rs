//! Availability label normalization.

pub const AVAILABLE_NOW: &str = "Available: Now";
pub const AVAILABLE_SOON: &str = "Available Soon: Nursery";
pub const ADOPTED: &str = "Adopted";

/// Maps a free-text availability value onto one of the canonical labels.
///
/// Rules are checked in order with case-insensitive substring matching:
/// absent or empty is [`AVAILABLE_NOW`], "nursery" or "soon" is
/// [`AVAILABLE_SOON`], "adopted" is [`ADOPTED`], "available" together with
/// "now" is [`AVAILABLE_NOW`]. Anything else is returned unchanged so that
/// labels the form adds later still reach the storefront.
#[must_use]
pub fn normalize_availability(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return AVAILABLE_NOW.to_owned();
    };
    let lowered = raw.to_lowercase();

    if lowered.contains("nursery") || lowered.contains("soon") {
        return AVAILABLE_SOON.to_owned();
    }
    if lowered.contains("adopted") {
        return ADOPTED.to_owned();
    }
    if lowered.contains("available") && lowered.contains("now") {
        return AVAILABLE_NOW.to_owned();
    }

    raw.to_owned()
}
