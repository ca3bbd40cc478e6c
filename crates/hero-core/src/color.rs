// Palette helpers. Hex and HSL inputs are sRGB; everything returned here is
// linear, ready for an sRGB render target to encode.

/// Decode one sRGB channel in [0, 1] to linear.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        srgb_to_linear(((hex >> 16) & 0xff) as f32 / 255.0),
        srgb_to_linear(((hex >> 8) & 0xff) as f32 / 255.0),
        srgb_to_linear((hex & 0xff) as f32 / 255.0),
    ]
}

#[inline]
pub fn hex_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = hex_rgb(hex);
    [r, g, b, alpha]
}

/// HSL (all components in [0, 1], sRGB) to linear RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        let v = srgb_to_linear(l);
        return [v, v, v];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        srgb_to_linear(hue_channel(p, q, h + 1.0 / 3.0)),
        srgb_to_linear(hue_channel(p, q, h)),
        srgb_to_linear(hue_channel(p, q, h - 1.0 / 3.0)),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
