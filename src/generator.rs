// Secondary color and gradient derivation from a monster's base color
use crate::color::{Color, Hsv};
use crate::gradient::GradientType;
use rand::Rng;
use tracing::debug;

/// Probability of a complementary (rather than analogous) hue shift
const COMPLEMENTARY_CHANCE: f64 = 0.6;
/// Complementary shift, in turns (120-180 degrees)
const COMPLEMENTARY_SHIFT: (f64, f64) = (0.33, 0.5);
/// Analogous shift, in turns (30-60 degrees), applied in either direction
const ANALOGOUS_SHIFT: (f64, f64) = (0.08, 0.17);
/// Saturation multiplier range; the result never drops below `MIN_SATURATION`
const SATURATION_FACTOR: (f64, f64) = (0.65, 0.8);
const MIN_SATURATION: f64 = 0.15;
/// Value multiplier range; the result is clamped to `VALUE_BOUNDS`
const VALUE_FACTOR: (f64, f64) = (0.85, 1.1);
const VALUE_BOUNDS: (f64, f64) = (0.3, 0.9);

/// Derived decoration for one asset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub secondary: Color,
    pub gradient: GradientType,
}

/// Draws decorations from a caller-owned random source.
///
/// The source is borrowed rather than owned so a whole batch shares one
/// sequence: the output for a file depends on every draw made before it.
pub struct ColorGenerator<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> ColorGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Secondary color first, then the gradient tag
    pub fn decorate(&mut self, base: Color) -> Decoration {
        let secondary = self.secondary_color(base);
        let gradient = self.gradient();
        Decoration {
            secondary,
            gradient,
        }
    }

    /// Complementary or analogous, desaturated, value kept mid-range
    pub fn secondary_color(&mut self, base: Color) -> Color {
        let hsv = base.to_hsv();
        let shifted = self.shift_hsv(hsv);
        debug!(
            "hsv ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
            hsv.h, hsv.s, hsv.v, shifted.h, shifted.s, shifted.v
        );
        Color::from_hsv(shifted, base.a)
    }

    pub fn shift_hsv(&mut self, hsv: Hsv) -> Hsv {
        let hue_shift = if self.rng.gen::<f64>() < COMPLEMENTARY_CHANCE {
            self.uniform(COMPLEMENTARY_SHIFT)
        } else {
            let shift = self.uniform(ANALOGOUS_SHIFT);
            if self.rng.gen::<f64>() < 0.5 {
                -shift
            } else {
                shift
            }
        };

        let h = (hsv.h + hue_shift).rem_euclid(1.0);
        let s = (hsv.s * self.uniform(SATURATION_FACTOR)).max(MIN_SATURATION);
        let v = (hsv.v * self.uniform(VALUE_FACTOR)).clamp(VALUE_BOUNDS.0, VALUE_BOUNDS.1);

        Hsv { h, s, v }
    }

    pub fn gradient(&mut self) -> GradientType {
        let index = self.rng.gen_range(0..GradientType::ALL.len());
        GradientType::ALL[index]
    }

    fn uniform(&mut self, (lo, hi): (f64, f64)) -> f64 {
        lo + (hi - lo) * self.rng.gen::<f64>()
    }
}
