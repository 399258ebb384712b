use swc_core::common::{comments::Comments, input::StringInput, BytePos, Span};
use swc_css_ast::{AtRule, ComponentValue, Declaration, Rule, Stylesheet};
use swc_css_parser::{
    error::Error as ParseError,
    parse_string_input,
    parser::{PResult, ParserConfig},
};

/// Parses the `input` as `Stylesheet`.
/// When `comments` is provided, comments of the input are collected into it.
pub fn parse_stylesheet(
    input: &str,
    span: Span,
    config: ParserConfig,
    comments: Option<&dyn Comments>,
    errors: &mut Vec<ParseError>,
) -> PResult<Stylesheet> {
    let parser_input = StringInput::new(input, span.lo, span.hi);
    parse_string_input(parser_input, comments, config, errors)
}

/// Parses a generated snippet. Any error means the snippet is not usable.
fn parse_snippet(snippet: &str) -> Option<Stylesheet> {
    let parser_input = StringInput::new(snippet, BytePos(1), BytePos(1 + snippet.len() as u32));
    let mut errors = Vec::new();
    let stylesheet: Stylesheet =
        parse_string_input(parser_input, None, ParserConfig::default(), &mut errors).ok()?;

    errors.is_empty().then_some(stylesheet)
}

/// Parses `prop: value` as a `Declaration`. This is needed for rewritten values
pub fn parse_declaration(prop: &str, value: &str) -> Option<Declaration> {
    let stylesheet = parse_snippet(&format!("a{{{prop}:{value}}}"))?;

    match stylesheet.rules.into_iter().next()? {
        Rule::QualifiedRule(rule) => rule.block.value.into_iter().find_map(|value| match value {
            ComponentValue::Declaration(declaration) => Some(*declaration),
            _ => None,
        }),
        _ => None,
    }
}

/// Parses an empty at-rule, e.g. `@media (min-width: 1280px) {}`
pub fn parse_empty_at_rule(name: &str, params: &str) -> Option<AtRule> {
    let stylesheet = parse_snippet(&format!("@{name} {params}{{}}"))?;

    match stylesheet.rules.into_iter().next()? {
        Rule::AtRule(at_rule) => Some(*at_rule),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use swc_core::common::comments::SingleThreadedComments;
    use swc_css_ast::AtRuleName;

    use super::*;
    use crate::css::{declaration::is_ignore_comment, test_span};

    #[test]
    fn it_parses_regular() {
        assert_no_errors(".foo > #bar baz, .foo .bar { background: yellow }");
        assert_no_errors("@media (min-width: 500px) { .foo { margin: 0 12px } }");
    }

    #[test]
    fn it_parses_nested_conditional_blocks() {
        assert_no_errors(
            "
            @supports (display: flex) {
                .c { font-size: 13px; }

                @media (min-width: 1200px) {
                    .d { font-size: 13px; }
                }
            }

            @keyframes slideIn {
                from { transform: translateX(10px); }
                to { transform: translateX(100%); }
            }",
        );
    }

    #[test]
    fn it_collects_comments() {
        let input = ".rule { /* px-to-viewport-ignore-next */ padding: 1px; }";
        let comments = SingleThreadedComments::default();
        let mut errors = Vec::new();
        let parsed = parse_stylesheet(
            input,
            test_span(input),
            ParserConfig::default(),
            Some(&comments as &dyn Comments),
            &mut errors,
        );
        assert!(parsed.is_ok());

        let (leading, trailing) = comments.borrow_all();
        let found = leading
            .values()
            .chain(trailing.values())
            .flatten()
            .any(|comment| is_ignore_comment(&comment.text));
        assert!(found);
    }

    #[test]
    fn it_parses_declaration_snippets() {
        let declaration = parse_declaration("margin", "0.5rem 0.9375vw").unwrap();
        assert!(declaration.important.is_none());

        let declaration = parse_declaration("width", "calc(0.9375 * var(--vv, 1vw))");
        assert!(declaration.is_some());
    }

    #[test]
    fn it_parses_empty_at_rules() {
        let at_rule = parse_empty_at_rule("media", "(min-width: 1280px)").unwrap();

        assert!(matches!(at_rule.name, AtRuleName::Ident(ref ident) if &*ident.value == "media"));
        assert!(at_rule.prelude.is_some());
        assert!(at_rule.block.is_some_and(|block| block.value.is_empty()));
    }

    fn assert_no_errors(input: &str) {
        let (parsed, errors) = test_parse(input);
        assert!(parsed.is_ok());
        assert!(errors.is_empty());
    }

    fn test_parse(input: &str) -> (Result<Stylesheet, ParseError>, Vec<ParseError>) {
        let mut errors = Vec::new();
        let parsed = parse_stylesheet(
            input,
            test_span(input),
            ParserConfig::default(),
            None,
            &mut errors,
        );

        (parsed, errors)
    }
}
