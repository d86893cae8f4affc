use std::f64::consts::FRAC_PI_2;

/// Normalized view of a raw RGB triple.
///
/// Channel ratios are `channel / (r + g + b)` and are all zero for black.
/// `rgb_abs` rebuilds channels as `ratio * total` and can differ from the
/// input by rounding error; [`Color::raw`] returns the exact triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    raw: [u8; 3],
    norm_r: f64,
    norm_g: f64,
    norm_b: f64,
    total: f64,
}

impl Color {
    pub fn new(rgb: [u8; 3]) -> Self {
        let total = rgb.iter().map(|&c| f64::from(c)).sum::<f64>();
        let (norm_r, norm_g, norm_b) = if total == 0.0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                f64::from(rgb[0]) / total,
                f64::from(rgb[1]) / total,
                f64::from(rgb[2]) / total,
            )
        };
        Self {
            raw: rgb,
            norm_r,
            norm_g,
            norm_b,
            total,
        }
    }

    /// The `[r, g, b]` bytes this color was built from.
    pub fn raw(&self) -> [u8; 3] {
        self.raw
    }

    pub fn norm_r(&self) -> f64 {
        self.norm_r
    }

    pub fn norm_g(&self) -> f64 {
        self.norm_g
    }

    pub fn norm_b(&self) -> f64 {
        self.norm_b
    }

    /// Sum of the raw channels.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn intensity(&self) -> f64 {
        self.total / 3.0
    }

    pub fn red(&self) -> f64 {
        self.norm_r * self.total
    }

    pub fn green(&self) -> f64 {
        self.norm_g * self.total
    }

    pub fn blue(&self) -> f64 {
        self.norm_b * self.total
    }

    /// Raw channel values recovered from the normalized ratios.
    pub fn rgb_abs(&self) -> (f64, f64, f64) {
        (self.red(), self.green(), self.blue())
    }

    /// Hue in radians: `atan(sqrt(3) * (g - b) / ((r - g) + (r - b)))` over
    /// normalized channels, `π/2` when the denominator is zero.
    pub fn hue(&self) -> f64 {
        let denominator = (self.norm_r - self.norm_g) + (self.norm_r - self.norm_b);
        if denominator == 0.0 {
            return FRAC_PI_2;
        }
        (3f64.sqrt() * (self.norm_g - self.norm_b) / denominator).atan()
    }

    pub fn hue_degrees(&self) -> f64 {
        self.hue().to_degrees()
    }
}
