use crate::shared::color::Color;

/// The two block classes the detector looks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Skin,
    Hair,
}

impl PixelClass {
    pub fn matches(self, color: &Color) -> bool {
        match self {
            PixelClass::Skin => is_skin(color),
            PixelClass::Hair => is_hair(color),
        }
    }
}

/// Rule-based skin test on the exact channel bytes.
pub fn is_skin(color: &Color) -> bool {
    let [r, g, b] = color.raw().map(i32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95 && g > 40 && b > 20 && max - min > 15 && r - g > 15 && r > g && r > b
}

/// Dark pixels count as hair.
///
/// The channel-difference branches compare normalized ratios against 15,
/// so for any dark pixel they hold and the hue window never decides.
pub fn is_hair(color: &Color) -> bool {
    let hue = color.hue_degrees();
    color.intensity() < 80.0
        && (color.norm_b() - color.norm_g() < 15.0
            || color.norm_b() - color.norm_r() < 15.0
            || (20.0..=40.0).contains(&hue))
}

/// `(min, max)` bounds on normalized green as quadratics of normalized red.
///
/// Not used by [`is_skin`].
pub fn skin_green_limits(color: &Color) -> (f64, f64) {
    let r = color.norm_r();
    (
        -0.776 * r * r + 0.5601 * r + 0.18,
        -1.376 * r * r + 1.0743 * r + 0.2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::typical([200, 120, 90], true)]
    #[case::light([230, 180, 160], true)]
    #[case::red_too_low([90, 50, 30], false)]
    #[case::red_at_limit([95, 41, 26], false)]
    #[case::red_at_limit_blue_29([95, 41, 29], false)]
    #[case::red_just_above_limit([96, 41, 26], true)]
    #[case::green_at_limit([200, 40, 30], false)]
    #[case::blue_at_limit([200, 100, 20], false)]
    #[case::green_too_low([200, 35, 30], false)]
    #[case::blue_too_low([200, 100, 15], false)]
    #[case::red_green_too_close([120, 106, 30], false)]
    #[case::blue_above_red([150, 60, 160], false)]
    #[case::white([255, 255, 255], false)]
    #[case::black([0, 0, 0], false)]
    fn test_is_skin(#[case] rgb: [u8; 3], #[case] expected: bool) {
        assert_eq!(is_skin(&Color::new(rgb)), expected);
    }

    #[rstest]
    #[case::black([0, 0, 0], true)]
    #[case::dark_brown([40, 25, 15], true)]
    #[case::dark_blue([10, 10, 200], true)]
    #[case::mid_gray([80, 80, 80], false)]
    #[case::white([255, 255, 255], false)]
    #[case::skin([200, 120, 90], false)]
    fn test_is_hair(#[case] rgb: [u8; 3], #[case] expected: bool) {
        assert_eq!(is_hair(&Color::new(rgb)), expected);
    }

    #[test]
    fn test_is_hair_depends_only_on_intensity_for_dark_pixels() {
        // intensity just under and at the limit
        assert!(is_hair(&Color::new([79, 80, 80])));
        assert!(!is_hair(&Color::new([80, 80, 80])));
    }

    #[test]
    fn test_pixel_class_dispatch() {
        let skin = Color::new([200, 120, 90]);
        let hair = Color::new([30, 20, 10]);
        assert!(PixelClass::Skin.matches(&skin));
        assert!(!PixelClass::Hair.matches(&skin));
        assert!(PixelClass::Hair.matches(&hair));
        assert!(!PixelClass::Skin.matches(&hair));
    }

    #[test]
    fn test_skin_green_limits_quadratics() {
        let c = Color::new([200, 120, 80]); // norm_r = 0.5
        let (lo, hi) = skin_green_limits(&c);
        assert_relative_eq!(lo, -0.776 * 0.25 + 0.5601 * 0.5 + 0.18, epsilon = 1e-12);
        assert_relative_eq!(hi, -1.376 * 0.25 + 1.0743 * 0.5 + 0.2, epsilon = 1e-12);
        assert!(lo < hi);
    }

    #[test]
    fn test_skin_green_limits_black() {
        let (lo, hi) = skin_green_limits(&Color::new([0, 0, 0]));
        assert_relative_eq!(lo, 0.18);
        assert_relative_eq!(hi, 0.2);
    }
}
