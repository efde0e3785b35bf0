//! Cosmetic text corruption.
//!
//! The bot's replies pick up stray box-drawing blocks and combining marks as
//! its weirdness rises. Nothing here is reversible: callers that keep the
//! result (the session history does) keep the corrupted text.

use std::borrow::Cow;

use rand::seq::SliceRandom;
use rand::Rng;

/// Glyphs that may be appended after a character. Duplicates are deliberate;
/// they weight the draw toward the combining marks.
pub const GLITCH_GLYPHS: [char; 20] = [
    '\u{00AF}', '\u{032E}', '\u{032E}', '\u{0301}', '\u{0301}', '\u{2550}', '\u{0336}',
    '\u{0336}', '\u{2591}', '\u{0334}', '\u{0334}', '\u{2588}', '\u{0337}', '\u{0337}',
    '\u{2592}', '\u{0338}', '\u{0338}', '\u{2593}', '\u{0321}', '\u{0321}',
];

/// Mangle `text` with the thread-local RNG.
///
/// With a non-positive intensity the input is handed back untouched.
pub fn mangle(text: &str, intensity: f64) -> Cow<'_, str> {
    mangle_with_rng(text, intensity, &mut rand::thread_rng())
}

/// For every character, with probability `intensity` (capped at 1.0), append
/// one glyph from [`GLITCH_GLYPHS`] right after it.
pub fn mangle_with_rng<'a, R>(text: &'a str, intensity: f64, rng: &mut R) -> Cow<'a, str>
where
    R: Rng + ?Sized,
{
    if intensity.is_nan() || intensity <= 0.0 {
        return Cow::Borrowed(text);
    }
    let probability = intensity.min(1.0);

    let mut out = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        out.push(ch);
        if rng.gen_bool(probability) {
            if let Some(glyph) = GLITCH_GLYPHS.choose(rng) {
                out.push(*glyph);
            }
        }
    }
    Cow::Owned(out)
}

/// Surround a reply with one of two decorative frames, picked at random.
pub fn frame_weird_reply<R>(text: &str, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    if rng.gen_bool(0.5) {
        format!("✨ {text} ✨")
    } else {
        format!("🌌 {text} 🌌")
    }
}
