//! Colours and number formatting shared by the plots.

use plotters::style::RGBColor;

/// Categorical palette used for hue levels, cycled when exhausted.
pub const HUE_PALETTE: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

/// Fill colour of single-series plots.
pub const PRIMARY: RGBColor = HUE_PALETTE[0];

/// Line colour of box outlines, whiskers and fliers.
pub const OUTLINE: RGBColor = RGBColor(61, 61, 61);

// coolwarm anchors: cold end, neutral midpoint, warm end
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Colour of the `index`-th hue level.
pub fn hue_color(index: usize) -> RGBColor {
    HUE_PALETTE[index % HUE_PALETTE.len()]
}

/// Diverging blue-grey-red colour for `t` in `[0, 1]`.
///
/// Values outside the interval are clamped; NaN maps to the midpoint.
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let (from, to, local) = if t < 0.5 {
        (COOL, NEUTRAL, t / 0.5)
    } else {
        (NEUTRAL, WARM, (t - 0.5) / 0.5)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * local).round().clamp(0.0, 255.0) as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Position of `value` on a colour scale spanning `vmin..vmax`.
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    if vmax > vmin {
        (value - vmin) / (vmax - vmin)
    } else {
        0.5
    }
}

/// WCAG relative luminance of a colour.
pub fn relative_luminance(color: RGBColor) -> f64 {
    let channel = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(color.0) + 0.7152 * channel(color.1) + 0.0722 * channel(color.2)
}

/// Annotation colour readable on top of `background`.
pub fn text_color_on(background: RGBColor) -> RGBColor {
    if relative_luminance(background) > 0.408 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

/// Format with two significant digits, printf `%.2g` style.
///
/// Trailing zeros are dropped and very small or large magnitudes switch to
/// exponent notation (`1e-05`, `1e+02`).
pub fn format_2g(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }

    let scientific = format!("{:.1e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if !(-4..2).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs());
    }

    let decimals = (1 - exponent).max(0) as usize;
    trim_zeros(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Label of a numeric hue level: integral values print without decimals.
pub fn format_level(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
