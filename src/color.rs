use sdl2::pixels::Color;

/// Converts hue/saturation/brightness, each in `[0, 1]`, to RGB.
///
/// Only the fractional part of `hue` is used, so `1.0` lands on the same red as
/// `0.0`.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Color {
    let channel = |v: f32| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let grey = channel(brightness);
        return Color::RGB(grey, grey, grey);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u8 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    Color::RGB(channel(r), channel(g), channel(b))
}
