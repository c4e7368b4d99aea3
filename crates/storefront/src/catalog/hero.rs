//! Hero slide assembly for the organization shape.
//!
//! Organization documents spread one slide across several consecutive
//! entries of the `hero` array. Only the title and image keys are plain;
//! description and button fields carry the entry's array position as a
//! suffix (`hero_description_4` only counts on the entry at index 4).
//! Entries are folded into a pending slide which is emitted as soon as it
//! has an image plus one other field.

use bandhan_core::HeroSlide;
use bandhan_core::lenient::truthy_text;
use serde_json::Value;

const DEFAULT_TITLE: &str = "Discover Fashion";
const DEFAULT_DESCRIPTION: &str = "Premium collections await you";
const DEFAULT_BUTTON_TEXT: &str = "Explore";
const DEFAULT_LINK: &str = "#categories";

/// Slide fields collected so far.
#[derive(Debug, Default)]
struct PendingSlide {
    title: Option<String>,
    image: Option<String>,
    description: Option<String>,
    button_text: Option<String>,
    link: Option<String>,
}

impl PendingSlide {
    fn field_count(&self) -> usize {
        [
            self.title.is_some(),
            self.image.is_some(),
            self.description.is_some(),
            self.button_text.is_some(),
            self.link.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    fn is_ready(&self) -> bool {
        self.image.is_some() && self.field_count() >= 2
    }

    /// Emit the slide and reset the accumulator.
    fn take_slide(&mut self) -> HeroSlide {
        let pending = std::mem::take(self);
        HeroSlide {
            title: pending.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: pending
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            image: pending.image.unwrap_or_default(),
            link: pending.link.unwrap_or_else(|| DEFAULT_LINK.to_string()),
            price: String::new(),
        }
    }
}

/// Fold the raw `hero` entries into slides.
///
/// A `hero_title` key that is present but empty (or null) yields the
/// fallback title `Slide {index / 3 + 1}`.
#[must_use]
pub fn build_hero_slides(entries: &[Value]) -> Vec<HeroSlide> {
    let mut slides = Vec::new();
    let mut pending = PendingSlide::default();

    for (index, entry) in entries.iter().enumerate() {
        if entry.get("hero_title").is_some() {
            pending.title = Some(
                truthy_text(entry.get("hero_title"))
                    .unwrap_or_else(|| format!("Slide {}", index / 3 + 1)),
            );
        }
        if let Some(image) = truthy_text(entry.get("hero_image")) {
            pending.image = Some(image);
        }

        if let Some(description) = truthy_text(entry.get(format!("hero_description_{index}"))) {
            pending.description = Some(description);
        }

        let button_text = truthy_text(entry.get(format!("hero_button_text_{index}")));
        let link = truthy_text(entry.get(format!("hero_button_link_{index}")));
        if button_text.is_some() || link.is_some() {
            pending.button_text =
                Some(button_text.unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()));
            pending.link = Some(link.unwrap_or_else(|| DEFAULT_LINK.to_string()));
        }

        if pending.is_ready() {
            slides.push(pending.take_slide());
        }
    }

    slides
}
