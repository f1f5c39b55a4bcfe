//! Conversions between RGBA, HSL and packed HEX.
//!
//! RGBA is the source of truth everywhere in the crate; HEX and HSL are
//! always derived from it. All rounding is half-away-from-zero (`f64::round`).

use serde::{Deserialize, Serialize};

use crate::{Result, SwatchError};

/// Four 8-bit channels. Serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Decompose raw integer components the way a platform color would.
    ///
    /// 1 component: gray, 2: gray + alpha, 3: rgb, 4: rgba.
    /// Returns `None` for any other arity or a component outside `0..=255`.
    pub fn from_components(components: &[i64]) -> Option<Self> {
        let mut bytes = [0u8; 4];
        for (dst, &c) in bytes.iter_mut().zip(components) {
            *dst = u8::try_from(c).ok()?;
        }
        match components.len() {
            1 => Some(Self::opaque(bytes[0], bytes[0], bytes[0])),
            2 => Some(Self::new(bytes[0], bytes[0], bytes[0], bytes[1])),
            3 => Some(Self::opaque(bytes[0], bytes[1], bytes[2])),
            4 => Some(Self::new(bytes[0], bytes[1], bytes[2], bytes[3])),
            _ => None,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
/// Serialized as `[h, s, l]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u16; 3]", into = "[u16; 3]")]
pub struct Hsl {
    h: u16,
    s: u8,
    l: u8,
}

impl Hsl {
    pub const WHITE: Hsl = Hsl { h: 0, s: 0, l: 100 };

    pub fn new(h: u16, s: u8, l: u8) -> Result<Self> {
        if h >= 360 {
            return Err(SwatchError::rejected("hue", h.to_string()));
        }
        if s > 100 {
            return Err(SwatchError::rejected("saturation", s.to_string()));
        }
        if l > 100 {
            return Err(SwatchError::rejected("lightness", l.to_string()));
        }
        Ok(Self { h, s, l })
    }

    pub fn hue(&self) -> u16 {
        self.h
    }

    pub fn saturation(&self) -> u8 {
        self.s
    }

    pub fn lightness(&self) -> u8 {
        self.l
    }

    pub fn with_hue(self, h: u16) -> Result<Self> {
        Self::new(h, self.s, self.l)
    }

    pub fn with_saturation(self, s: u8) -> Result<Self> {
        Self::new(self.h, s, self.l)
    }

    pub fn with_lightness(self, l: u8) -> Result<Self> {
        Self::new(self.h, self.s, l)
    }
}

impl TryFrom<[u16; 3]> for Hsl {
    type Error = SwatchError;

    fn try_from([h, s, l]: [u16; 3]) -> Result<Self> {
        let s = u8::try_from(s).map_err(|_| SwatchError::rejected("saturation", s.to_string()))?;
        let l = u8::try_from(l).map_err(|_| SwatchError::rejected("lightness", l.to_string()))?;
        Self::new(h, s, l)
    }
}

impl From<Hsl> for [u16; 3] {
    fn from(c: Hsl) -> Self {
        [c.h, c.s as u16, c.l as u16]
    }
}

/// Every representation of one color, all consistent with `rgba`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorValues {
    pub hex: u32,
    pub rgba: Rgba,
    pub hsl: Hsl,
}

impl ColorValues {
    pub fn from_rgba(rgba: Rgba) -> Self {
        let (hex, hsl) = rgba_to_hsl_hex(rgba);
        Self { hex, rgba, hsl }
    }

    pub fn white() -> Self {
        Self {
            hex: 0xFFFFFF,
            rgba: Rgba::WHITE,
            hsl: Hsl::WHITE,
        }
    }
}

fn unit(channel: u8) -> f64 {
    channel as f64 / 255.0
}

fn unit_to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn unit_to_percent(v: f64) -> u8 {
    (v * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Pack channels big-endian; the alpha byte is only present when not opaque.
pub fn rgba_to_hex(rgba: Rgba) -> u32 {
    let rgb = ((rgba.r as u32) << 16) | ((rgba.g as u32) << 8) | rgba.b as u32;
    if rgba.is_opaque() {
        rgb
    } else {
        (rgb << 8) | rgba.a as u32
    }
}

/// Zero-padded hex digits: `RRGGBB` when opaque, `RRGGBBAA` otherwise.
pub fn rgba_to_hex_digits(rgba: Rgba) -> String {
    if rgba.is_opaque() {
        format!("{:06X}", rgba_to_hex(rgba))
    } else {
        format!("{:08X}", rgba_to_hex(rgba))
    }
}

pub fn rgba_to_hsl(rgba: Rgba) -> Hsl {
    let (r, g, b) = (unit(rgba.r), unit(rgba.g), unit(rgba.b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let l = unit_to_percent((max + min) / 2.0);

    if max == min {
        return Hsl { h: 0, s: 0, l };
    }

    let delta = max - min;
    let s = if l <= 50 {
        unit_to_percent(delta / (max + min))
    } else {
        unit_to_percent(delta / (2.0 - max - min))
    };

    let sector = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let h = ((sector * 60.0).round() as i32).rem_euclid(360) as u16;

    Hsl { h, s, l }
}

pub fn rgba_to_hsl_hex(rgba: Rgba) -> (u32, Hsl) {
    (rgba_to_hex(rgba), rgba_to_hsl(rgba))
}

/// Parse up to 8 hex digits (an optional leading `#` is ignored).
///
/// Eight digits carry alpha in the last byte. Any other length is read as the
/// six digit form, so shorter input is implicitly left-padded with zeros and a
/// seventh leading digit is dropped. Empty, overlong or non-hex input yields
/// opaque white.
pub fn hex_to_rgba(hex: &str) -> Rgba {
    let digits = hex.trim().trim_start_matches('#');
    if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Rgba::WHITE;
    }
    let Ok(value) = u32::from_str_radix(digits, 16) else {
        return Rgba::WHITE;
    };

    if digits.len() == 8 {
        let [r, g, b, a] = value.to_be_bytes();
        Rgba::new(r, g, b, a)
    } else {
        let [_, r, g, b] = value.to_be_bytes();
        Rgba::opaque(r, g, b)
    }
}

/// HSL to opaque RGBA. Alpha is not carried by HSL and always comes back 255.
pub fn hsl_to_rgba(hsl: Hsl) -> Rgba {
    let h = hsl.h as f64 / 360.0;
    let s = hsl.s as f64 / 100.0;
    let l = hsl.l as f64 / 100.0;

    if hsl.s == 0 {
        let v = unit_to_byte(l);
        return Rgba::opaque(v, v, v);
    }

    let temp1 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let temp2 = 2.0 * l - temp1;

    let channel = |phase: f64| -> u8 {
        let mut t = phase;
        if t > 1.0 {
            t -= 1.0;
        } else if t < 0.0 {
            t += 1.0;
        }

        let v = if 6.0 * t < 1.0 {
            temp2 + (temp1 - temp2) * 6.0 * t
        } else if 2.0 * t < 1.0 {
            temp1
        } else if 3.0 * t < 2.0 {
            temp2 + (temp1 - temp2) * (2.0 / 3.0 - t) * 6.0
        } else {
            temp2
        };
        unit_to_byte(v)
    };

    Rgba::opaque(
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    )
}

/// Decompose raw components into every representation.
///
/// `None` when the components cannot describe a color.
pub fn try_rgba_to_color_values(components: &[i64]) -> Option<ColorValues> {
    Rgba::from_components(components).map(ColorValues::from_rgba)
}

/// Like [`try_rgba_to_color_values`], substituting opaque white on failure.
pub fn rgba_to_color_values(components: &[i64]) -> ColorValues {
    try_rgba_to_color_values(components).unwrap_or_else(|| {
        tracing::warn!(?components, "color components unusable, falling back to white");
        ColorValues::white()
    })
}
