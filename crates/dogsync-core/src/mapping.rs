//! Mapping from raw form-submission payloads to [`DogRecord`].
//!
//! The form has been renamed a few times, so each concept is looked up under
//! every key it has ever used. Keys are tried newest first; the first
//! non-empty value wins.

use serde_json::{Map, Value};

use crate::availability::normalize_availability;
use crate::record::DogRecord;

const ENTRY_ID_KEYS: &[&str] = &["Id"];
const NAME_KEYS: &[&str] = &["DogName", "Name", "Dog Name"];
const STORY_KEYS: &[&str] = &["MyStory", "My Story"];
const LITTER_KEYS: &[&str] = &["LitterName", "Litter"];
const BIRTHDAY_KEYS: &[&str] = &["PupBirthday", "Birthday"];
const BREED_KEYS: &[&str] = &["Breed"];
const GENDER_KEYS: &[&str] = &["Gender"];
const SIZE_KEYS: &[&str] = &["EstimatedSizeWhenGrown", "Size when Grown"];
const AVAILABILITY_KEYS: &[&str] = &["Code", "Availability"];

/// Attachment fields in display order.
const PHOTO_FIELDS: &[&str] = &[
    "MainPhoto",
    "AdditionalPhoto1",
    "AdditionalPhoto2",
    "AdditionalPhoto3",
    "AdditionalPhoto4",
];

/// Download endpoint used when an attachment carries no signed `File` URL.
pub const FILE_FALLBACK_BASE: &str = "https://www.cognitoforms.com/file/";

/// Maps a raw payload to a [`DogRecord`]. Never fails: missing or
/// non-object input simply yields absent fields.
#[must_use]
pub fn map_raw_record(raw: &Value) -> DogRecord {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let availability = first_text(fields, AVAILABILITY_KEYS);

    DogRecord {
        entry_id: first_text(fields, ENTRY_ID_KEYS),
        name: first_text(fields, NAME_KEYS),
        story: first_text(fields, STORY_KEYS),
        litter: first_text(fields, LITTER_KEYS),
        birthday: first_text(fields, BIRTHDAY_KEYS),
        breed: first_text(fields, BREED_KEYS),
        gender: first_text(fields, GENDER_KEYS),
        size_when_grown: first_text(fields, SIZE_KEYS),
        availability: normalize_availability(availability.as_deref()),
        image_urls: extract_image_urls(fields),
    }
}

/// Returns the first key in `keys` holding a usable scalar value.
fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| fields.get(*key).and_then(scalar_text))
}

/// Renders a string or number as text. Anything else, and the empty
/// string, counts as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn extract_image_urls(fields: &Map<String, Value>) -> Vec<String> {
    PHOTO_FIELDS
        .iter()
        .filter_map(|field| fields.get(*field).and_then(Value::as_array))
        .flatten()
        .filter_map(attachment_url)
        .collect()
}

/// Prefers the signed `File` URL; falls back to the download endpoint keyed
/// by the attachment `Id`.
fn attachment_url(descriptor: &Value) -> Option<String> {
    if let Some(file) = descriptor
        .get("File")
        .and_then(Value::as_str)
        .filter(|f| !f.is_empty())
    {
        return Some(file.to_owned());
    }
    descriptor
        .get("Id")
        .and_then(scalar_text)
        .map(|id| format!("{FILE_FALLBACK_BASE}{id}"))
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
