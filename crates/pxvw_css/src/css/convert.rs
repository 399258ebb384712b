use std::borrow::Cow;

use pxvw_core::PxToViewportOptions;
use regex::{Captures, Regex};

/// Finds lengths in the unit to convert.
///
/// Quoted strings and `url()` are matched as a whole and kept as is,
/// only the last alternative captures a number (e.g. `12` of `12px`).
pub struct UnitReplacer {
    unit: String,
    regex: Regex,
}

impl UnitReplacer {
    pub fn new(unit: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r#""[^"]+"|'[^']+'|url\([^)]+\)|(-?\d*\.?\d+){}"#,
            regex::escape(unit)
        );

        Ok(Self {
            unit: unit.to_owned(),
            regex: Regex::new(&pattern)?,
        })
    }

    /// Cheap check whether `value` can have anything to replace
    #[inline]
    pub fn has_unit(&self, value: &str) -> bool {
        value.contains(self.unit.as_str())
    }

    /// Rewrites every length in `value`, leaving the rest intact
    pub fn replace<'v>(&self, value: &'v str, options: &PxToViewportOptions) -> Cow<'v, str> {
        if !self.has_unit(value) {
            return Cow::Borrowed(value);
        }

        self.regex.replace_all(value, |captures: &Captures| {
            let Some(number) = captures.get(1) else {
                return captures[0].to_owned();
            };

            number
                .as_str()
                .parse::<f64>()
                .ok()
                .and_then(|pixels| convert_pixels(pixels, options))
                .unwrap_or_else(|| captures[0].to_owned())
        })
    }
}

/// Converts a length in the unit to convert.
/// Returns `None` when the value must stay as it was.
pub fn convert_pixels(pixels: f64, options: &PxToViewportOptions) -> Option<String> {
    if options
        .min_unit_value
        .is_some_and(|min_unit_value| min_unit_value >= pixels)
    {
        return None;
    }

    let converted = to_fixed(pixels / options.viewport_width * 100.0, options.unit_precision);

    // Also catches `-0`
    if converted == 0.0 {
        return Some(String::from("0"));
    }

    Some(match options.unit_width_css_var {
        Some(ref css_var) => format!("calc({converted} * {css_var})"),
        None => format!("{converted}{}", options.convert_to_unit),
    })
}

const MAX_PRECISION: u32 = 17;

/// Rounds half away from zero on the digit after `precision`,
/// ignoring everything past that digit.
/// E.g. `0.9375` with precision 2 becomes `0.94`, and `0.93749` becomes `0.94` too.
/// `f64` has no digits past 17 anyway, so bigger precisions are the same as 17.
pub fn to_fixed(number: f64, precision: u32) -> f64 {
    let precision = precision.min(MAX_PRECISION) as i32;
    let multiplier = 10f64.powi(precision + 1);
    let whole_number = (number.abs() * multiplier).floor();
    let rounded = (whole_number / 10.0).round() * 10.0 / multiplier;

    rounded.copysign(number)
}
