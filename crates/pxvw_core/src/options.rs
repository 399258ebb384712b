use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Options of the px-to-viewport transform.
///
/// Can be constructed directly (use `..Default::default()` for the rest)
/// or resolved from the JSON form with [`PxToViewportOptions::from_json`].
#[derive(Debug, Clone)]
pub struct PxToViewportOptions {
    /// Max number of decimal digits in a converted value. Default: 4
    pub unit_precision: u32,
    /// Unit to look for in declaration values. Default: `px`
    pub unit_to_convert: String,
    /// Unit appended to converted values. Default: `vw`
    pub convert_to_unit: String,
    /// Width the pixel values were designed for. Default: 1280
    pub viewport_width: f64,
    /// Selectors which are never converted
    pub selector_black_list: Vec<SelectorMatcher>,
    /// Values less than or equal to this one are left as is
    pub min_unit_value: Option<f64>,
    /// When set, converted values become `calc(<value> * <unit_width_css_var>)`
    /// instead of using `convert_to_unit`
    pub unit_width_css_var: Option<String>,
    /// Source files which are not transformed at all
    pub exclude: Option<ExcludeOption>,
}

impl Default for PxToViewportOptions {
    fn default() -> Self {
        Self {
            unit_precision: 4,
            unit_to_convert: String::from("px"),
            convert_to_unit: String::from("vw"),
            viewport_width: 1280.0,
            selector_black_list: Vec::new(),
            min_unit_value: None,
            unit_width_css_var: None,
            exclude: None,
        }
    }
}

/// An entry of `selectorBlackList`
#[derive(Debug, Clone)]
pub enum SelectorMatcher {
    /// Matches selectors containing the string
    Literal(String),
    /// Matches selectors matching the pattern
    Pattern(Regex),
}

impl SelectorMatcher {
    pub fn matches(&self, selector: &str) -> bool {
        match self {
            SelectorMatcher::Literal(literal) => selector.contains(literal.as_str()),
            SelectorMatcher::Pattern(pattern) => pattern.is_match(selector),
        }
    }
}

/// The `exclude` option, matched against the stylesheet file name
#[derive(Debug, Clone)]
pub enum ExcludeOption {
    Single(Regex),
    Many(Vec<Regex>),
}

impl ExcludeOption {
    pub fn is_excluded(&self, file: &str) -> bool {
        match self {
            ExcludeOption::Single(pattern) => pattern.is_match(file),
            ExcludeOption::Many(patterns) => patterns.iter().any(|pattern| pattern.is_match(file)),
        }
    }
}

/// Options as they come from the host, e.g.
/// `{ "viewportWidth": 1440, "selectorBlackList": ["ignore", { "pattern": "^body$" }] }`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    unit_precision: Option<u32>,
    unit_to_convert: Option<String>,
    convert_to_unit: Option<String>,
    viewport_width: Option<f64>,
    #[serde(default)]
    selector_black_list: Vec<Value>,
    min_unit_value: Option<f64>,
    unit_width_css_var: Option<String>,
    #[serde(default)]
    exclude: Value,
}

impl PxToViewportOptions {
    /// Resolves the options from their JSON form, applying the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawOptions = serde_json::from_str(json)?;
        resolve(raw)
    }

    /// Same as [`PxToViewportOptions::from_json`], but for an already parsed value
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw: RawOptions = serde_json::from_value(value)?;
        resolve(raw)
    }

    /// Whether a stylesheet from `file` must be left untouched
    pub fn is_excluded(&self, file: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_excluded(file))
    }

    pub fn is_blacklisted(&self, selector: &str) -> bool {
        self.selector_black_list
            .iter()
            .any(|matcher| matcher.matches(selector))
    }
}

fn resolve(raw: RawOptions) -> Result<PxToViewportOptions, ConfigError> {
    let defaults = PxToViewportOptions::default();

    let selector_black_list = raw
        .selector_black_list
        .into_iter()
        .map(resolve_selector_matcher)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PxToViewportOptions {
        unit_precision: raw.unit_precision.unwrap_or(defaults.unit_precision),
        unit_to_convert: raw.unit_to_convert.unwrap_or(defaults.unit_to_convert),
        convert_to_unit: raw.convert_to_unit.unwrap_or(defaults.convert_to_unit),
        viewport_width: raw.viewport_width.unwrap_or(defaults.viewport_width),
        selector_black_list,
        min_unit_value: raw.min_unit_value,
        unit_width_css_var: raw.unit_width_css_var,
        exclude: resolve_exclude(raw.exclude)?,
    })
}

fn resolve_selector_matcher(value: Value) -> Result<SelectorMatcher, ConfigError> {
    match value {
        Value::String(literal) => Ok(SelectorMatcher::Literal(literal)),
        Value::Object(mut object) => match object.remove("pattern") {
            Some(Value::String(pattern)) => compile_pattern(pattern).map(SelectorMatcher::Pattern),
            _ => Err(ConfigError::InvalidBlacklistEntry),
        },
        _ => Err(ConfigError::InvalidBlacklistEntry),
    }
}

fn resolve_exclude(value: Value) -> Result<Option<ExcludeOption>, ConfigError> {
    match value {
        Value::Null => Ok(None),
        Value::String(pattern) => compile_pattern(pattern).map(|p| Some(ExcludeOption::Single(p))),
        Value::Array(items) => {
            let patterns = items
                .into_iter()
                .map(|item| match item {
                    Value::String(pattern) => compile_pattern(pattern),
                    _ => Err(ConfigError::InvalidExcludeEntry),
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(ExcludeOption::Many(patterns)))
        }
        _ => Err(ConfigError::InvalidExclude),
    }
}

fn compile_pattern(pattern: String) -> Result<Regex, ConfigError> {
    Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern { pattern, source })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn it_applies_defaults() {
        let options = PxToViewportOptions::from_json("{}").unwrap();

        assert_eq!(options.unit_precision, 4);
        assert_eq!(options.unit_to_convert, "px");
        assert_eq!(options.convert_to_unit, "vw");
        assert_eq!(options.viewport_width, 1280.0);
        assert!(options.selector_black_list.is_empty());
        assert!(options.min_unit_value.is_none());
        assert!(options.unit_width_css_var.is_none());
        assert!(options.exclude.is_none());
    }

    #[test]
    fn it_merges_over_defaults() {
        let options = PxToViewportOptions::from_json(
            r#"{
                "unitPrecision": 2,
                "unitToConvert": "rem",
                "viewportWidth": 1440,
                "minUnitValue": -2,
                "unitWidthCssVar": "var(--vv, 1vw)",
                "someUnknownOption": true
            }"#,
        )
        .unwrap();

        assert_eq!(options.unit_precision, 2);
        assert_eq!(options.unit_to_convert, "rem");
        assert_eq!(options.convert_to_unit, "vw");
        assert_eq!(options.viewport_width, 1440.0);
        assert_eq!(options.min_unit_value, Some(-2.0));
        assert_eq!(options.unit_width_css_var.as_deref(), Some("var(--vv, 1vw)"));
    }

    #[test]
    fn it_resolves_selector_black_list() {
        let options = PxToViewportOptions::from_json(
            r#"{ "selectorBlackList": ["rule", { "pattern": "^body$" }] }"#,
        )
        .unwrap();

        assert!(options.is_blacklisted(".rule2"));
        assert!(options.is_blacklisted("body"));
        assert!(!options.is_blacklisted(".body"));
        assert!(!options.is_blacklisted(".not"));
    }

    #[test]
    fn it_resolves_exclude() {
        let single = PxToViewportOptions::from_json(r#"{ "exclude": "node_modules" }"#).unwrap();
        assert!(single.is_excluded("node_modules/a.css"));
        assert!(!single.is_excluded("valid-path/a.css"));

        let many =
            PxToViewportOptions::from_json(r#"{ "exclude": ["node_modules", "b\\.css"] }"#).unwrap();
        assert!(many.is_excluded("some-path/b.css"));
        assert!(!many.is_excluded("some-path/c.css"));

        assert!(!PxToViewportOptions::default().is_excluded("node_modules/a.css"));
    }

    #[test]
    fn it_rejects_invalid_exclude() {
        let result = PxToViewportOptions::from_json(r#"{ "exclude": 42 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidExclude)));

        let result = PxToViewportOptions::from_json(r#"{ "exclude": { "pattern": "a" } }"#);
        assert!(matches!(result, Err(ConfigError::InvalidExclude)));

        let result = PxToViewportOptions::from_json(r#"{ "exclude": ["a", 1] }"#);
        assert!(matches!(result, Err(ConfigError::InvalidExcludeEntry)));

        let error = PxToViewportOptions::from_json(r#"{ "exclude": true }"#).unwrap_err();
        assert_eq!(
            error.to_string(),
            "options.exclude should be RegExp or Array of RegExp."
        );
    }

    #[test]
    fn it_rejects_invalid_patterns() {
        let result = PxToViewportOptions::from_json(r#"{ "exclude": "(unclosed" }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPattern { ref pattern, .. }) if pattern == "(unclosed"
        ));

        let result = PxToViewportOptions::from_json(r#"{ "selectorBlackList": [{ "pattern": "[" }] }"#);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));

        let result = PxToViewportOptions::from_json(r#"{ "selectorBlackList": [1] }"#);
        assert!(matches!(result, Err(ConfigError::InvalidBlacklistEntry)));
    }

    #[test]
    fn it_rejects_mistyped_scalars() {
        let result = PxToViewportOptions::from_json(r#"{ "unitPrecision": "four" }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));

        let result = PxToViewportOptions::from_value(serde_json::json!({ "viewportWidth": "wide" }));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
