//! Default annotation for texts that come without one
//!
//! The maximum length leaves room for translations that run longer than the source
//! text, more so for short texts:
//!
//! | source length | max length          |
//! |---------------|---------------------|
//! | below 8       | length * 5          |
//! | 8 to 30       | length * 3          |
//! | above 30      | ceil(length * 1.5)  |
//!
//! Anything up to 120 characters is a label (`XFLD`), longer texts are message texts
//! (`YMSG`). Lengths count characters, not bytes.

use crate::i18n::ast::{I18nAnnotation, SapTextType};

/// Longest max length that still counts as a short text.
pub const SHORT_TEXT_LIMIT: u32 = 120;

pub fn max_length(text: &str) -> u32 {
    let len = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    match len {
        0..=7 => len * 5,
        8..=30 => len * 3,
        _ => len.saturating_mul(3).div_ceil(2),
    }
}

pub fn text_type(max_length: u32) -> SapTextType {
    if max_length <= SHORT_TEXT_LIMIT {
        SapTextType::label()
    } else {
        SapTextType::message_text()
    }
}

/// Annotation guessed from the text alone.
pub fn default_annotation(text: &str) -> I18nAnnotation {
    let max_length = max_length(text);
    I18nAnnotation::new(text_type(max_length)).with_max_length(max_length)
}
