//! Shopify product payload construction.

use serde::Serialize;

use crate::record::DogRecord;

pub const PRODUCT_STATUS: &str = "active";
pub const PRODUCT_TYPE: &str = "Dog";
pub const EMPTY_BODY_HTML: &str = "<p>No information available.</p>";

/// Body of a product create or update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    /// Only set on updates, where it echoes the looked-up product id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub body_html: String,
    pub handle: String,
    /// Comma-separated, as the Admin API expects on write.
    pub tags: String,
    pub images: Vec<ImageRef>,
    pub status: String,
    pub product_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub src: String,
}

impl ProductPayload {
    /// Addresses the payload at an existing product and re-asserts the
    /// handle, so an update can never move the product to another handle.
    #[must_use]
    pub fn into_update(mut self, product_id: i64, handle: &str) -> Self {
        self.id = Some(product_id);
        handle.clone_into(&mut self.handle);
        self
    }
}

/// Builds the create/update payload for `record` under `handle`.
#[must_use]
pub fn build_product_payload(record: &DogRecord, handle: &str) -> ProductPayload {
    let title = record.name.clone().unwrap_or_else(|| {
        format!("Dog {}", record.entry_id.as_deref().unwrap_or_default())
    });

    ProductPayload {
        id: None,
        title,
        body_html: render_body_html(record),
        handle: handle.to_owned(),
        tags: build_tags(record).join(", "),
        images: record
            .image_urls
            .iter()
            .map(|src| ImageRef { src: src.clone() })
            .collect(),
        status: PRODUCT_STATUS.to_owned(),
        product_type: PRODUCT_TYPE.to_owned(),
    }
}

/// Labeled description fields, in display order.
fn description_fields(record: &DogRecord) -> [(&'static str, Option<&str>); 6] {
    [
        ("LITTER", record.litter.as_deref()),
        ("BIRTHDAY", record.birthday.as_deref()),
        ("BREED", record.breed.as_deref()),
        ("GENDER", record.gender.as_deref()),
        ("SIZE WHEN GROWN", record.size_when_grown.as_deref()),
        ("AVAILABILITY", Some(record.availability.as_str())),
    ]
}

/// Story paragraph first, then one bold-labeled block per present field.
fn render_body_html(record: &DogRecord) -> String {
    let story = record
        .story
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("<p>{s}</p>"));

    let blocks: Vec<String> = story
        .into_iter()
        .chain(
            description_fields(record)
                .into_iter()
                .filter_map(|(label, value)| {
                    value
                        .filter(|v| !v.is_empty())
                        .map(|v| render_labeled_field(label, v))
                }),
        )
        .collect();

    if blocks.is_empty() {
        return EMPTY_BODY_HTML.to_owned();
    }
    blocks.join("\n\n")
}

fn render_labeled_field(label: &str, value: &str) -> String {
    format!("<b>{label}:</b><br>\n{value}<br><br>")
}

fn build_tags(record: &DogRecord) -> Vec<String> {
    let availability = Some(record.availability.clone()).filter(|a| !a.is_empty());
    let labeled = [
        ("Litter", record.litter.as_deref()),
        ("Breed", record.breed.as_deref()),
        ("Gender", record.gender.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")));

    availability.into_iter().chain(labeled).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AVAILABLE_NOW;

    fn rex() -> DogRecord {
        DogRecord {
            entry_id: Some("1-1".to_owned()),
            name: Some("Rex".to_owned()),
            breed: Some("Lab".to_owned()),
            availability: AVAILABLE_NOW.to_owned(),
            ..DogRecord::default()
        }
    }

    #[test]
    fn minimal_record_payload() {
        let payload = build_product_payload(&rex(), "dog-1-1");
        assert_eq!(payload.title, "Rex");
        assert_eq!(payload.handle, "dog-1-1");
        assert_eq!(payload.tags, "Available: Now, Breed: Lab");
        assert!(payload.images.is_empty());
        assert_eq!(payload.status, "active");
        assert_eq!(payload.product_type, "Dog");
        assert_eq!(payload.id, None);
        assert_eq!(
            payload.body_html,
            "<b>BREED:</b><br>\nLab<br><br>\n\n<b>AVAILABILITY:</b><br>\nAvailable: Now<br><br>"
        );
    }

    #[test]
    fn title_falls_back_to_entry_id() {
        let record = DogRecord {
            name: None,
            ..rex()
        };
        assert_eq!(build_product_payload(&record, "dog-1-1").title, "Dog 1-1");
    }

    #[test]
    fn full_record_renders_story_then_fields_in_order() {
        let record = DogRecord {
            entry_id: Some("24-108".to_owned()),
            name: Some("Maple".to_owned()),
            story: Some("Maple loves the creek.".to_owned()),
            litter: Some("Trees".to_owned()),
            birthday: Some("2024-05-01".to_owned()),
            breed: Some("Shepherd mix".to_owned()),
            gender: Some("Female".to_owned()),
            size_when_grown: Some("Large".to_owned()),
            availability: "Available Soon: Nursery".to_owned(),
            image_urls: vec![],
        };
        let payload = build_product_payload(&record, "dog-24-108");

        let expected = [
            "<p>Maple loves the creek.</p>",
            "<b>LITTER:</b><br>\nTrees<br><br>",
            "<b>BIRTHDAY:</b><br>\n2024-05-01<br><br>",
            "<b>BREED:</b><br>\nShepherd mix<br><br>",
            "<b>GENDER:</b><br>\nFemale<br><br>",
            "<b>SIZE WHEN GROWN:</b><br>\nLarge<br><br>",
            "<b>AVAILABILITY:</b><br>\nAvailable Soon: Nursery<br><br>",
        ]
        .join("\n\n");
        assert_eq!(payload.body_html, expected);
        assert_eq!(
            payload.tags,
            "Available Soon: Nursery, Litter: Trees, Breed: Shepherd mix, Gender: Female"
        );
    }

    #[test]
    fn empty_record_uses_placeholder_body() {
        let record = DogRecord::default();
        let payload = build_product_payload(&record, "dog-");
        assert_eq!(payload.body_html, EMPTY_BODY_HTML);
        assert_eq!(payload.tags, "");
    }

    #[test]
    fn images_preserve_order() {
        let record = DogRecord {
            image_urls: vec![
                "https://files.example/2.jpg".to_owned(),
                "https://files.example/1.jpg".to_owned(),
            ],
            ..rex()
        };
        let payload = build_product_payload(&record, "dog-1-1");
        let srcs: Vec<&str> = payload.images.iter().map(|i| i.src.as_str()).collect();
        assert_eq!(
            srcs,
            ["https://files.example/2.jpg", "https://files.example/1.jpg"]
        );
    }

    #[test]
    fn into_update_sets_id_and_reasserts_handle() {
        let mut payload = build_product_payload(&rex(), "dog-1-1");
        payload.handle = "rex-renamed".to_owned();
        let update = payload.into_update(42, "dog-1-1");
        assert_eq!(update.id, Some(42));
        assert_eq!(update.handle, "dog-1-1");
    }

    #[test]
    fn create_payload_omits_id_when_serialized() {
        let json = serde_json::to_value(build_product_payload(&rex(), "dog-1-1")).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["images"], serde_json::json!([]));
    }
}
