mod at_rules;
mod codegen;
mod convert;
mod declaration;
mod error;
mod keyframes;
mod parse;
mod rule;
mod transform;

use pxvw_core::Severity;
use swc_core::common::{
    comments::{Comments, SingleThreadedComments},
    Span,
};
use swc_css_parser::parser::ParserConfig;

pub use at_rules::AtRuleKind;
pub use codegen::{stringify, StringifyOptions};
pub use convert::{convert_pixels, to_fixed, UnitReplacer};
pub use declaration::IGNORE_NEXT_COMMENT;
#[cfg(test)]
pub(crate) use declaration::is_ignore_comment;
pub use error::{CssError, CssErrorKind};
pub use parse::parse_stylesheet;
pub use transform::PxToViewportTransformer;

#[derive(Default)]
pub struct TransformCssConfig {
    pub parse: ParserConfig,
    pub stringify: StringifyOptions,
}

/// Transforms raw CSS, appending the viewport-unit copies.
///
/// `file` is where the CSS comes from, it is matched against the `exclude` option.
/// When nothing is appended (or the file is excluded), `content` is returned unchanged.
pub fn transform_css(
    content: &str,
    span: Span,
    file: Option<&str>,
    transformer: &PxToViewportTransformer,
    errors: &mut Vec<CssError>,
    config: TransformCssConfig,
) -> Option<String> {
    // Comments are needed for the ignore comment
    let comments = SingleThreadedComments::default();

    // Parse and collect errors
    let mut parse_errors = Vec::new();
    let parse_result = parse_stylesheet(
        content,
        span,
        config.parse,
        Some(&comments as &dyn Comments),
        &mut parse_errors,
    );
    let is_recoverable = parse_result.is_ok();
    errors.extend(
        parse_errors
            .into_iter()
            .map(|e| CssError::from_parse_error(e, is_recoverable)),
    );

    let mut stylesheet = match parse_result {
        Ok(stylesheet) => stylesheet,
        Err(e) => {
            errors.push(CssError::from_parse_error(e, false));
            return None;
        }
    };

    if errors.iter().any(Severity::is_unrecoverable_error) {
        return None;
    }

    // Untouched stylesheets are returned as is, with their comments and formatting
    if !transformer.transform(&mut stylesheet, file, Some(&comments)) {
        return Some(content.to_owned());
    }

    Some(stringify(&stylesheet, config.stringify))
}

#[cfg(test)]
pub(crate) fn test_span(input: &str) -> Span {
    use swc_core::common::{BytePos, DUMMY_SP};

    Span {
        lo: BytePos(1),
        hi: BytePos(1 + input.len() as u32),
        ..DUMMY_SP
    }
}
