//! Recoloring of `text-shadow` and `filter` strings.
//!
//! Every hex, `rgb()` or `rgba()` token is swapped for the new color while
//! its alpha (if it had one) is kept. Offsets, blur radii and effect names
//! come through byte for byte.

use crate::css::{ColorLiteral, RgbLiteral, color_literal};
use crate::model::Color;

/// Recolor every color token in a `text-shadow` value.
pub fn recolor_shadow(spec: &str, color: Color) -> String {
    recolor_tokens(spec, color)
}

/// Recolor every color token in a `filter` chain (e.g. `drop-shadow(...)`).
pub fn recolor_filter(spec: &str, color: Color) -> String {
    recolor_tokens(spec, color)
}

/// Like [`recolor_shadow`], but takes the color as text and leaves the
/// input alone when it isn't a hex color.
pub fn recolor_shadow_hex(spec: &str, new_color: &str) -> String {
    match Color::from_hex(new_color) {
        Some(c) => recolor_shadow(spec, c),
        None => spec.to_string(),
    }
}

fn recolor_tokens(spec: &str, color: Color) -> String {
    let trimmed = spec.trim();
    if trimmed.is_empty() || trimmed == "none" {
        return spec.to_string();
    }

    let mut out = String::with_capacity(spec.len());
    let mut rest = spec;
    while !rest.is_empty() {
        let mut ahead = rest;
        match color_literal(&mut ahead) {
            Ok(literal) if at_token_start(spec, rest) => {
                out.push_str(&replacement(&literal, color));
                rest = ahead;
            }
            _ => {
                let ch = rest.chars().next().map_or(1, char::len_utf8);
                out.push_str(&rest[..ch]);
                rest = &rest[ch..];
            }
        }
    }
    out
}

/// A color function only counts at a word boundary (`xrgb(` is not a color).
fn at_token_start(spec: &str, rest: &str) -> bool {
    let offset = spec.len() - rest.len();
    spec[..offset]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
}

fn replacement(literal: &ColorLiteral<'_>, color: Color) -> String {
    match literal {
        ColorLiteral::Hex(_) => {
            let hex = color.to_hex();
            match literal.hex_alpha() {
                Some(alpha) => format!("{hex}{alpha}"),
                None => hex,
            }
        }
        ColorLiteral::Rgb(RgbLiteral {
            func, sep, alpha, ..
        }) => {
            let Color { r, g, b, .. } = color;
            match alpha {
                Some((alpha_sep, a)) => format!("{func}({r}{sep}{g}{sep}{b}{alpha_sep}{a})"),
                None => format!("{func}({r}{sep}{g}{sep}{b})"),
            }
        }
    }
}
