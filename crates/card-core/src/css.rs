//! Tokenizer for the small slice of CSS color syntax the card editor
//! touches: hex literals and `rgb()`/`rgba()` functions.
//!
//! Built on `winnow` 0.7. Tokens borrow from the input so callers can
//! rebuild a string with every non-color byte left as written.

use crate::model::{Color, hex_val};
use winnow::ascii::multispace0;
use winnow::combinator::{alt, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// A color literal exactly as it appeared in the source text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColorLiteral<'a> {
    /// Hex digits without the leading `#` (3, 4, 6 or 8 of them).
    Hex(&'a str),
    Rgb(RgbLiteral<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RgbLiteral<'a> {
    /// `rgb` or `rgba`.
    pub func: &'a str,
    pub channels: [&'a str; 3],
    /// Separator between the color channels, as written (`,`, `, ` or ` `).
    pub sep: &'a str,
    /// Separator and value of the alpha channel, if any.
    pub alpha: Option<(&'a str, &'a str)>,
}

pub(crate) fn color_literal<'a>(input: &mut &'a str) -> ModalResult<ColorLiteral<'a>> {
    alt((
        hex_literal.map(ColorLiteral::Hex),
        rgb_literal.map(ColorLiteral::Rgb),
    ))
    .parse_next(input)
}

fn hex_literal<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    let _ = '#'.parse_next(input)?;
    let digits: &str = take_while(1..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    let glued = input.starts_with(|c: char| c.is_ascii_alphanumeric());
    if glued || !matches!(digits.len(), 3 | 4 | 6 | 8) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(digits)
}

fn rgb_literal<'a>(input: &mut &'a str) -> ModalResult<RgbLiteral<'a>> {
    let func = alt(("rgba", "rgb")).parse_next(input)?;
    let _ = '('.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let r = channel.parse_next(input)?;
    let sep = channel_separator.parse_next(input)?;
    let g = channel.parse_next(input)?;
    let _ = channel_separator.parse_next(input)?;
    let b = channel.parse_next(input)?;
    let alpha = opt((alpha_separator, channel)).parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let _ = ')'.parse_next(input)?;
    Ok(RgbLiteral {
        func,
        channels: [r, g, b],
        sep,
        alpha,
    })
}

fn channel<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_digit() || c == '.' || c == '%' || c == '-'
    })
    .parse_next(input)
}

fn channel_separator<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c == ',' || c == ' ').parse_next(input)
}

fn alpha_separator<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c == ',' || c == '/' || c == ' ').parse_next(input)
}

// ─── Conversion ──────────────────────────────────────────────────────────

impl ColorLiteral<'_> {
    pub(crate) fn to_color(&self) -> Option<Color> {
        match self {
            ColorLiteral::Hex(digits) => Color::from_hex(digits),
            ColorLiteral::Rgb(rgb) => {
                let [r, g, b] = rgb.channels;
                let a = match rgb.alpha {
                    Some((_, a)) => alpha_value(a)?,
                    None => 1.0,
                };
                Some(Color::rgba8(
                    channel_value(r)?,
                    channel_value(g)?,
                    channel_value(b)?,
                    a,
                ))
            }
        }
    }

    /// Alpha digits of a 4- or 8-digit hex literal, widened to two digits.
    pub(crate) fn hex_alpha(&self) -> Option<String> {
        match self {
            ColorLiteral::Hex(d) if d.len() == 8 => Some(d[6..].to_string()),
            ColorLiteral::Hex(d) if d.len() == 4 => Some(d[3..].repeat(2)),
            _ => None,
        }
    }
}

fn channel_value(raw: &str) -> Option<u8> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? * 2.55,
        None => raw.parse::<f32>().ok()?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn alpha_value(raw: &str) -> Option<f32> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? / 100.0,
        None => raw.parse::<f32>().ok()?,
    };
    Some(value.clamp(0.0, 1.0))
}

/// Parse a whole string as one color literal.
pub(crate) fn parse_color(input: &str) -> Option<Color> {
    let mut rest = input.trim();
    let literal = color_literal.parse_next(&mut rest).ok()?;
    if !rest.is_empty() {
        return None;
    }
    literal.to_color()
}

/// Hex nibble pair to byte, used by `Color::from_hex`.
pub(crate) fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_val(hi)? << 4 | hex_val(lo)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_lengths() {
        let mut s = "#0ff rest";
        assert_eq!(color_literal(&mut s).unwrap(), ColorLiteral::Hex("0ff"));
        assert_eq!(s, " rest");

        let mut s = "#12345";
        assert!(color_literal(&mut s).is_err());

        let mut s = "#abcdefgh";
        assert!(color_literal(&mut s).is_err());
    }

    #[test]
    fn rgba_keeps_separators() {
        let mut s = "rgba(0, 0, 0, 0.5) 2px";
        let ColorLiteral::Rgb(rgb) = color_literal(&mut s).unwrap() else {
            panic!("expected rgb literal");
        };
        assert_eq!(rgb.func, "rgba");
        assert_eq!(rgb.channels, ["0", "0", "0"]);
        assert_eq!(rgb.sep, ", ");
        assert_eq!(rgb.alpha, Some((", ", "0.5")));
        assert_eq!(s, " 2px");
    }

    #[test]
    fn slash_alpha() {
        let mut s = "rgb(10 20 30 / 40%)";
        let ColorLiteral::Rgb(rgb) = color_literal(&mut s).unwrap() else {
            panic!("expected rgb literal");
        };
        assert_eq!(rgb.sep, " ");
        assert_eq!(rgb.alpha, Some((" / ", "40%")));
        assert!(s.is_empty());
    }

    #[test]
    fn parse_whole_color() {
        let c = parse_color("rgba(0,255,255,0.8)").unwrap();
        assert_eq!((c.r, c.g, c.b), (0, 255, 255));
        assert!((c.a - 0.8).abs() < 1e-6);
        assert_eq!(parse_color("#FF0000").unwrap().to_hex(), "#FF0000");
        assert!(parse_color("#FF0000 trailing").is_none());
        assert!(parse_color("red").is_none());
    }
}
