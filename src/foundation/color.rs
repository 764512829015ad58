use serde::{Deserialize, Serialize};

use crate::foundation::error::{StayframeError, StayframeResult};

/// Straight-alpha sRGB color as accepted from style controls.
///
/// Parses the CSS forms the editor produces: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` and a handful of keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CssColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl CssColor {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color with a fractional CSS alpha in `[0, 1]`.
    pub fn with_alpha_f32(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse a CSS color string.
    pub fn parse(s: &str) -> StayframeResult<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            "transparent" => return Ok(Self::rgba(0, 0, 0, 0)),
            _ => {}
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args);
        }
        Err(StayframeError::validation(format!(
            "unsupported color \"{s}\""
        )))
    }

    /// Premultiplied RGBA8 bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Canonical CSS representation (`#rrggbb` when opaque, `#rrggbbaa` otherwise).
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl std::str::FromStr for CssColor {
    type Err = StayframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CssColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(hex: &str) -> StayframeResult<CssColor> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }
    fn byte(pair: &[u8]) -> Option<u8> {
        Some(nibble(pair[0])? * 16 + nibble(pair[1])?)
    }

    let b = hex.as_bytes();
    let parsed = match b.len() {
        3 | 4 => {
            let mut ch = [255u8; 4];
            for (i, &c) in b.iter().enumerate() {
                let n = nibble(c);
                ch[i] = match n {
                    Some(n) => n * 17,
                    None => return Err(invalid_hex(hex)),
                };
            }
            Some(CssColor::rgba(ch[0], ch[1], ch[2], ch[3]))
        }
        6 => Some(CssColor::rgb(
            byte(&b[0..2]).ok_or_else(|| invalid_hex(hex))?,
            byte(&b[2..4]).ok_or_else(|| invalid_hex(hex))?,
            byte(&b[4..6]).ok_or_else(|| invalid_hex(hex))?,
        )),
        8 => Some(CssColor::rgba(
            byte(&b[0..2]).ok_or_else(|| invalid_hex(hex))?,
            byte(&b[2..4]).ok_or_else(|| invalid_hex(hex))?,
            byte(&b[4..6]).ok_or_else(|| invalid_hex(hex))?,
            byte(&b[6..8]).ok_or_else(|| invalid_hex(hex))?,
        )),
        _ => None,
    };
    parsed.ok_or_else(|| invalid_hex(hex))
}

fn invalid_hex(hex: &str) -> StayframeError {
    StayframeError::validation(format!(
        "hex color must be #rgb, #rgba, #rrggbb or #rrggbbaa, got \"#{hex}\""
    ))
}

fn parse_rgb_args(args: &str) -> StayframeResult<CssColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| -> StayframeResult<u8> {
        let v: f64 = s
            .parse()
            .map_err(|_| StayframeError::validation(format!("invalid color channel \"{s}\"")))?;
        Ok(v.clamp(0.0, 255.0).round() as u8)
    };
    let (r, g, b) = match parts.as_slice() {
        [r, g, b] | [r, g, b, _] => (channel(r)?, channel(g)?, channel(b)?),
        _ => {
            return Err(StayframeError::validation(
                "rgb()/rgba() expects 3 or 4 components",
            ));
        }
    };
    let a = match parts.get(3) {
        Some(a) => {
            let v: f32 = a
                .parse()
                .map_err(|_| StayframeError::validation(format!("invalid alpha \"{a}\"")))?;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Ok(CssColor::rgba(r, g, b, a))
}
