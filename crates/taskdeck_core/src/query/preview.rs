//! Description display projection.
//!
//! # Responsibility
//! - Detect an embedded image URL so renderers can show it inline.
//! - Produce the remaining text with whitespace collapsed.
//!
//! # Invariants
//! - Projection only: the stored description is never modified.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://\S+\.(?:png|jpe?g|gif|webp|svg)(?:\?\S*)?")
        .expect("valid image url regex")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// What a card or table row renders for one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionPreview {
    /// Description text with the image URL removed and runs of whitespace
    /// collapsed to single spaces.
    pub text: String,
    /// First image URL found in the description, if any.
    pub image_url: Option<String>,
}

/// Splits a description into display text and an optional inline image.
///
/// An image is any `http(s)` URL ending in a common raster/vector
/// extension, query string allowed. Descriptions without one project to
/// their collapsed text and `image_url: None`; an empty description
/// projects to empty text.
pub fn describe_preview(description: &str) -> DescriptionPreview {
    let image_url = IMAGE_URL_RE
        .find(description)
        .map(|found| found.as_str().to_string());

    let without_image = IMAGE_URL_RE.replace_all(description, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_image, " ");
    DescriptionPreview {
        text: collapsed.trim().to_string(),
        image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_image() {
        let preview = describe_preview("Mua sữa và trứng");
        assert_eq!(preview.text, "Mua sữa và trứng");
        assert_eq!(preview.image_url, None);
    }

    #[test]
    fn extracts_the_first_image_url() {
        let preview =
            describe_preview("Ảnh bìa: https://cdn.example.com/cover.png cần duyệt lại");
        assert_eq!(
            preview.image_url.as_deref(),
            Some("https://cdn.example.com/cover.png")
        );
        assert_eq!(preview.text, "Ảnh bìa: cần duyệt lại");
    }

    #[test]
    fn url_with_query_string_is_matched_whole() {
        let preview = describe_preview("xem http://img.example.com/a.jpg?w=640 nhé");
        assert_eq!(
            preview.image_url.as_deref(),
            Some("http://img.example.com/a.jpg?w=640")
        );
        assert_eq!(preview.text, "xem nhé");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let preview = describe_preview("HTTPS://CDN.EXAMPLE.COM/LOGO.PNG");
        assert!(preview.image_url.is_some());
        assert_eq!(preview.text, "");
    }

    #[test]
    fn non_image_url_is_left_in_the_text() {
        let preview = describe_preview("tài liệu ở https://example.com/doc");
        assert_eq!(preview.image_url, None);
        assert_eq!(preview.text, "tài liệu ở https://example.com/doc");
    }

    #[test]
    fn empty_description_projects_to_empty_text() {
        let preview = describe_preview("");
        assert_eq!(preview.text, "");
        assert_eq!(preview.image_url, None);
    }

    #[test]
    fn collapses_internal_whitespace() {
        let preview = describe_preview("trước   https://x.example/a.webp   sau");
        assert_eq!(preview.text, "trước sau");
    }
}
