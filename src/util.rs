/// RGB triple used by the animation and rendering code.
pub type Rgb = (u8, u8, u8);

pub fn clamp01(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Linear interpolation between two colors, `t` clamped to [0, 1].
pub fn lerp_color(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = clamp01(t);
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    (
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Colors used for the per-letter states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub base: Rgb,
    pub success: Rgb,
    pub error: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: (220, 220, 220),
            success: (0, 200, 80),
            error: (220, 60, 60),
        }
    }
}
