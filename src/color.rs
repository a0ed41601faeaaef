// Color values as they appear in .tres assets: `Color(r, g, b, a)`
use crate::error::AssetError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Significant digits used when rendering derived r/g/b components
const COMPONENT_PRECISION: usize = 6;

lazy_static! {
    static ref BASE_COLOR_FIELD: Regex =
        Regex::new(r"\bbase_color[ \t]*=[ \t]*([^\r\n]*)").unwrap();
    static ref COLOR_LITERAL: Regex = Regex::new(
        r"^Color\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*\)"
    )
    .unwrap();
}

/// RGBA color, components conventionally in [0, 1] but never validated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Hue/saturation/value, hue measured in turns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert the RGB part to HSV (alpha is dropped)
    pub fn to_hsv(&self) -> Hsv {
        let (r, g, b) = (self.r, self.g, self.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let v = max;

        if min == max {
            return Hsv { h: 0.0, s: 0.0, v };
        }

        let delta = max - min;
        let s = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Hsv {
            h: (h / 6.0).rem_euclid(1.0),
            s,
            v,
        }
    }

    /// Build a color from HSV, carrying the given alpha
    pub fn from_hsv(hsv: Hsv, a: f64) -> Self {
        let Hsv { h, s, v } = hsv;
        if s == 0.0 {
            return Self::new(v, v, v, a);
        }

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::new(r, g, b, a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Alpha passes through as parsed; only r/g/b are rounded
        write!(
            f,
            "Color({}, {}, {}, {})",
            format_general(self.r, COMPONENT_PRECISION),
            format_general(self.g, COMPONENT_PRECISION),
            format_general(self.b, COMPONENT_PRECISION),
            format_shortest(self.a)
        )
    }
}

impl FromStr for Color {
    type Err = AssetError;

    /// Parse a `Color(r, g, b, a)` literal. Trailing text after `)` is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AssetError::MalformedField(s.trim().to_string());
        let caps = COLOR_LITERAL.captures(s.trim_start()).ok_or_else(malformed)?;

        let mut components = [0.0f64; 4];
        for (i, slot) in components.iter_mut().enumerate() {
            *slot = caps[i + 1].parse::<f64>().map_err(|_| malformed())?;
        }

        let [r, g, b, a] = components;
        Ok(Color::new(r, g, b, a))
    }
}

/// Extract the first `base_color` assignment from asset text.
///
/// A missing assignment and an unparseable value are reported as different
/// errors so the caller can tell an unrelated resource from a broken one.
pub fn extract_base_color(text: &str) -> Result<Color, AssetError> {
    let caps = BASE_COLOR_FIELD
        .captures(text)
        .ok_or(AssetError::MissingField)?;
    caps[1].parse()
}

/// Render `value` like printf's `%g` with `precision` significant digits
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    }
}

/// Shortest round-trip rendering that always reads back as a float:
/// `1.0`, `0.35`, and exponent form `1e-05` / `1e+16` outside [1e-4, 1e16)
pub fn format_shortest(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
    }

    let fixed = value.to_string();
    if fixed.contains('.') {
        fixed
    } else {
        format!("{}.0", fixed)
    }
}

fn trim_fraction(number: &str) -> String {
    if number.contains('.') {
        number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_parse_color_literal() {
        let color: Color = "Color(0.8, 0.2, 0.2, 1.0)".parse().unwrap();
        assert_eq!(color, Color::new(0.8, 0.2, 0.2, 1.0));

        let spaced: Color = "Color( 0.1 ,0.5,   0.9 , 1 )".parse().unwrap();
        assert_eq!(spaced, Color::new(0.1, 0.5, 0.9, 1.0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "Color(0.8, 0.2, 0.2)",
            "Color(a, b, c, d)",
            "Color(-0.5, 0.2, 0.2, 1)",
            "Color(1.2.3, 0, 0, 1)",
            "Color8(255, 0, 0, 255)",
            "null",
        ] {
            let result = input.parse::<Color>();
            assert!(
                matches!(result, Err(AssetError::MalformedField(_))),
                "expected malformed for {}",
                input
            );
        }
    }

    #[test]
    fn test_extract_base_color() {
        let text = "[resource]\nname = \"Slime\"\nbase_color = Color(0.2, 0.8, 0.3, 1)\n";
        assert_eq!(
            extract_base_color(text).unwrap(),
            Color::new(0.2, 0.8, 0.3, 1.0)
        );
    }

    #[test]
    fn test_extract_missing_vs_malformed() {
        assert_eq!(
            extract_base_color("[resource]\nname = \"Ghost\"\n"),
            Err(AssetError::MissingField)
        );
        assert_eq!(
            extract_base_color("base_color = Color(red)\n"),
            Err(AssetError::MalformedField("Color(red)".to_string()))
        );
        // Keys that merely end in base_color are not the field
        assert_eq!(
            extract_base_color("alt_base_color = Color(0, 0, 0, 1)\n"),
            Err(AssetError::MissingField)
        );
    }

    #[test]
    fn test_literal_round_trip() {
        for literal in ["0.8", "0.123456", "1", "0.05", "0.333333"] {
            let text = format!("Color({0}, {0}, {0}, 1.0)", literal);
            let color: Color = text.parse().unwrap();
            let rendered = color.to_string();
            let reparsed: Color = rendered.parse().unwrap();
            assert_close(reparsed.r, literal.parse().unwrap());
            assert_close(reparsed.a, 1.0);
        }
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.8, 6), "0.8");
        assert_eq!(format_general(1.0, 6), "1");
        assert_eq!(format_general(0.123456789, 6), "0.123457");
        assert_eq!(format_general(0.0001234567, 6), "0.000123457");
        assert_eq!(format_general(0.00001234567, 6), "1.23457e-05");
        assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
        assert_eq!(format_general(123456.0, 6), "123456");
        assert_eq!(format_general(0.0, 6), "0");
        assert_eq!(format_general(0.9999999, 6), "1");
    }

    #[test]
    fn test_display_keeps_alpha_literal() {
        let color = Color::new(0.123456789, 0.5, 0.0, 1.0);
        assert_eq!(color.to_string(), "Color(0.123457, 0.5, 0, 1.0)");

        let translucent = Color::new(0.1, 0.2, 0.3, 0.123456789);
        assert_eq!(translucent.to_string(), "Color(0.1, 0.2, 0.3, 0.123456789)");
    }

    #[test]
    fn test_format_shortest() {
        assert_eq!(format_shortest(1.0), "1.0");
        assert_eq!(format_shortest(0.35), "0.35");
        assert_eq!(format_shortest(123.0), "123.0");
        assert_eq!(format_shortest(0.0001), "0.0001");
        assert_eq!(format_shortest(0.00001), "1e-05");
        assert_eq!(format_shortest(0.000015), "1.5e-05");
        assert_eq!(format_shortest(1e16), "1e+16");
        assert_eq!(format_shortest(0.0), "0.0");
    }

    #[test]
    fn test_display_small_alpha_uses_two_digit_exponent() {
        let color = Color::new(0.1, 0.2, 0.3, 0.00001);
        assert_eq!(color.to_string(), "Color(0.1, 0.2, 0.3, 1e-05)");
    }

    #[test]
    fn test_hsv_primaries() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0).to_hsv();
        assert_close(red.h, 0.0);
        assert_close(red.s, 1.0);
        assert_close(red.v, 1.0);

        let green = Color::new(0.0, 1.0, 0.0, 1.0).to_hsv();
        assert_close(green.h, 1.0 / 3.0);

        let blue = Color::new(0.0, 0.0, 1.0, 1.0).to_hsv();
        assert_close(blue.h, 2.0 / 3.0);

        let grey = Color::new(0.4, 0.4, 0.4, 1.0).to_hsv();
        assert_eq!(grey, Hsv { h: 0.0, s: 0.0, v: 0.4 });
    }

    #[test]
    fn test_hsv_round_trip() {
        let samples = [
            Color::new(0.8, 0.2, 0.2, 1.0),
            Color::new(0.1, 0.5, 0.9, 0.5),
            Color::new(0.3, 0.7, 0.1, 1.0),
            Color::new(0.9, 0.1, 0.6, 1.0),
            Color::new(0.25, 0.25, 0.25, 1.0),
        ];

        for original in samples {
            let back = Color::from_hsv(original.to_hsv(), original.a);
            assert_close(back.r, original.r);
            assert_close(back.g, original.g);
            assert_close(back.b, original.b);
            assert_eq!(back.a, original.a);
        }
    }
}
