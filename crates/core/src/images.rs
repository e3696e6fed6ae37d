//! Structured product image sets stored in the `images` JSONB column.
//!
//! Every product carries the full shape: three optional single-URL `main`
//! slots plus three bounded `details` galleries. Legacy rows that stored a
//! bare `{}` deserialize to the empty shape via serde defaults.

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::error::FieldErrors;

/// Maximum number of detail images per side.
pub const MAX_DETAIL_IMAGES: usize = 3;

/// One of the three photographed sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Left,
    Right,
    Back,
}

impl ImageSlot {
    /// Return the slot name as used in JSON keys and blob paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Back => "back",
        }
    }

    /// Parse a slot name. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "back" => Some(Self::Back),
            _ => None,
        }
    }

    /// All slots, in display order.
    pub const ALL: [ImageSlot; 3] = [Self::Left, Self::Right, Self::Back];
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single-URL display slots. Empty slots are omitted from JSON rather
/// than serialized as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}

impl MainImages {
    pub fn get(&self, slot: ImageSlot) -> Option<&str> {
        self.slot_ref(slot).as_deref()
    }

    /// Fill a slot, returning the URL it previously held.
    pub fn set(&mut self, slot: ImageSlot, url: String) -> Option<String> {
        self.slot_mut(slot).replace(url)
    }

    /// Clear a slot, returning the URL it held.
    pub fn take(&mut self, slot: ImageSlot) -> Option<String> {
        self.slot_mut(slot).take()
    }

    fn slot_ref(&self, slot: ImageSlot) -> &Option<String> {
        match slot {
            ImageSlot::Left => &self.left,
            ImageSlot::Right => &self.right,
            ImageSlot::Back => &self.back,
        }
    }

    fn slot_mut(&mut self, slot: ImageSlot) -> &mut Option<String> {
        match slot {
            ImageSlot::Left => &mut self.left,
            ImageSlot::Right => &mut self.right,
            ImageSlot::Back => &mut self.back,
        }
    }
}

/// Per-side galleries, each capped at [`MAX_DETAIL_IMAGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailImages {
    #[serde(default)]
    pub left: Vec<String>,
    #[serde(default)]
    pub right: Vec<String>,
    #[serde(default)]
    pub back: Vec<String>,
}

impl DetailImages {
    pub fn get(&self, slot: ImageSlot) -> &[String] {
        match slot {
            ImageSlot::Left => &self.left,
            ImageSlot::Right => &self.right,
            ImageSlot::Back => &self.back,
        }
    }

    pub fn get_mut(&mut self, slot: ImageSlot) -> &mut Vec<String> {
        match slot {
            ImageSlot::Left => &mut self.left,
            ImageSlot::Right => &mut self.right,
            ImageSlot::Back => &mut self.back,
        }
    }
}

/// Full image set for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImages {
    #[serde(default)]
    pub main: MainImages,
    #[serde(default)]
    pub details: DetailImages,
}

impl ProductImages {
    /// The shape stored for products that have no images yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every URL currently referenced by any slot, mains first.
    pub fn all_urls(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        for slot in ImageSlot::ALL {
            if let Some(url) = self.main.get(slot) {
                urls.push(url);
            }
        }
        for slot in ImageSlot::ALL {
            urls.extend(self.details.get(slot).iter().map(String::as_str));
        }
        urls
    }

    /// Remove a URL wherever it appears. Returns whether anything changed.
    pub fn remove_url(&mut self, url: &str) -> bool {
        let mut changed = false;
        for slot in ImageSlot::ALL {
            if self.main.get(slot) == Some(url) {
                self.main.take(slot);
                changed = true;
            }
            let gallery = self.details.get_mut(slot);
            let before = gallery.len();
            gallery.retain(|u| u != url);
            changed |= gallery.len() != before;
        }
        changed
    }

    /// Validate slot bounds and URL shape. Failures are keyed by JSON field
    /// path (`images.main.left`, `images.details.back`, ...).
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        self.validate_into(&mut errors);
        errors.into_result()
    }

    pub(crate) fn validate_into(&self, errors: &mut FieldErrors) {
        for slot in ImageSlot::ALL {
            if let Some(url) = self.main.get(slot) {
                if !url.validate_url() {
                    errors.push(format!("images.main.{slot}"), "Invalid url");
                }
            }

            let gallery = self.details.get(slot);
            if gallery.len() > MAX_DETAIL_IMAGES {
                errors.push(
                    format!("images.details.{slot}"),
                    format!("At most {MAX_DETAIL_IMAGES} images allowed"),
                );
            }
            for url in gallery {
                if !url.validate_url() {
                    errors.push(format!("images.details.{slot}"), "Invalid url");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(n: u32) -> String {
        format!("https://blobs.example.com/products/P1/details/left/{n}.webp")
    }

    // -- shape tests --------------------------------------------------------

    #[test]
    fn empty_set_serializes_with_full_shape() {
        let json = serde_json::to_value(ProductImages::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "main": {},
                "details": { "left": [], "right": [], "back": [] }
            })
        );
    }

    #[test]
    fn legacy_bare_object_deserializes_to_empty_shape() {
        let images: ProductImages = serde_json::from_str("{}").unwrap();
        assert_eq!(images, ProductImages::empty());
    }

    #[test]
    fn main_slots_omit_absent_entries() {
        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Left, url(1));
        let json = serde_json::to_value(&images).unwrap();
        assert_eq!(json["main"], serde_json::json!({ "left": url(1) }));
    }

    // -- slot access tests --------------------------------------------------

    #[test]
    fn set_returns_previous_url() {
        let mut images = ProductImages::empty();
        assert_eq!(images.main.set(ImageSlot::Back, url(1)), None);
        assert_eq!(images.main.set(ImageSlot::Back, url(2)), Some(url(1)));
        assert_eq!(images.main.get(ImageSlot::Back), Some(url(2).as_str()));
    }

    #[test]
    fn all_urls_covers_main_and_details() {
        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Left, url(1));
        images.details.get_mut(ImageSlot::Right).push(url(2));
        images.details.get_mut(ImageSlot::Right).push(url(3));

        let urls = images.all_urls();
        assert_eq!(urls.len(), 3);
        assert!(urls.contains(&url(1).as_str()));
        assert!(urls.contains(&url(3).as_str()));
    }

    #[test]
    fn remove_url_clears_every_occurrence() {
        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Left, url(1));
        images.details.get_mut(ImageSlot::Left).push(url(1));
        images.details.get_mut(ImageSlot::Left).push(url(2));

        assert!(images.remove_url(&url(1)));
        assert_eq!(images.main.get(ImageSlot::Left), None);
        assert_eq!(images.details.get(ImageSlot::Left), &[url(2)]);

        assert!(!images.remove_url(&url(1)));
    }

    // -- validation tests ---------------------------------------------------

    #[test]
    fn valid_set_passes() {
        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Left, url(1));
        for n in 0..MAX_DETAIL_IMAGES {
            images.details.get_mut(ImageSlot::Back).push(url(n as u32));
        }
        assert!(images.validate().is_ok());
    }

    #[test]
    fn overfull_gallery_is_rejected_with_field_path() {
        let mut images = ProductImages::empty();
        for n in 0..4 {
            images.details.get_mut(ImageSlot::Left).push(url(n));
        }

        let errors = images.validate().unwrap_err();
        let messages = errors.get("images.details.left").unwrap();
        assert_eq!(messages, &["At most 3 images allowed".to_string()][..]);
        assert_eq!(errors.get("images.details.right"), None);
    }

    #[test]
    fn malformed_urls_are_rejected_per_slot() {
        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Right, "not a url".to_string());
        images.details.get_mut(ImageSlot::Back).push("also bad".to_string());

        let errors = images.validate().unwrap_err();
        assert!(errors.get("images.main.right").is_some());
        assert!(errors.get("images.details.back").is_some());
    }
}
