use swc_css_ast::{
    AtRulePrelude, ComplexSelector, Declaration, KeyframeSelector, QualifiedRulePrelude,
    Stylesheet,
};
use swc_css_codegen::{
    writer::basic::{BasicCssWriter, BasicCssWriterConfig},
    CodeGenerator, CodegenConfig, Emit,
};

pub struct StringifyOptions {
    pub minify: bool,
    pub basic_css_writer: BasicCssWriterConfig,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            minify: true,
            basic_css_writer: Default::default(),
        }
    }
}

/// Stringifies the [`Stylesheet`]
pub fn stringify(node: &Stylesheet, options: StringifyOptions) -> String {
    let mut buf = String::new();
    let writer = BasicCssWriter::new(&mut buf, None, options.basic_css_writer);
    let mut codegen = CodeGenerator::new(
        writer,
        CodegenConfig {
            minify: options.minify,
        },
    );
    let _ = codegen.emit(&node);

    buf
}

/// Emits a single node without minification,
/// which is the form selectors, params and values are matched in
macro_rules! emit_unminified {
    ($node: expr) => {{
        let mut buf = String::new();
        {
            let writer = BasicCssWriter::new(&mut buf, None, BasicCssWriterConfig::default());
            let mut codegen = CodeGenerator::new(writer, CodegenConfig { minify: false });
            let _ = codegen.emit($node);
        }
        buf
    }};
}

pub fn stringify_complex_selector(node: &ComplexSelector) -> String {
    emit_unminified!(node)
}

pub fn stringify_qualified_rule_prelude(node: &QualifiedRulePrelude) -> String {
    emit_unminified!(node)
}

pub fn stringify_keyframe_selector(node: &KeyframeSelector) -> String {
    emit_unminified!(node)
}

/// Stringifies at-rule params, e.g. `(min-width: 500px)` of `@media (min-width: 500px)`
pub fn stringify_at_rule_prelude(node: &AtRulePrelude) -> String {
    emit_unminified!(node)
}

/// Splits a declaration into its property name and value.
/// `!important` is not part of the value.
pub fn stringify_declaration(node: &Declaration) -> (String, String) {
    let stripped;
    let node = if node.important.is_some() {
        stripped = Declaration {
            important: None,
            ..node.clone()
        };
        &stripped
    } else {
        node
    };

    let emitted = emit_unminified!(node);
    match emitted.split_once(':') {
        Some((prop, value)) => (prop.trim().to_owned(), value.trim().to_owned()),
        None => (emitted.trim().to_owned(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use swc_css_ast::{ComponentValue, QualifiedRulePrelude, Rule};

    use super::*;
    use crate::css::{parse::parse_stylesheet, test_span};

    fn parse(input: &str) -> Stylesheet {
        let mut errors = Vec::new();
        parse_stylesheet(input, test_span(input), Default::default(), None, &mut errors).unwrap()
    }

    #[test]
    fn it_stringifies_declarations() {
        let stylesheet = parse(".a { margin: 0 12px !important; --foo: 1px }");
        let Some(Rule::QualifiedRule(rule)) = stylesheet.rules.first() else {
            panic!("expected a rule");
        };

        let declarations: Vec<(String, String)> = rule
            .block
            .value
            .iter()
            .filter_map(|value| match value {
                ComponentValue::Declaration(declaration) => {
                    Some(stringify_declaration(declaration))
                }
                _ => None,
            })
            .collect();

        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].0, "margin");
        assert!(declarations[0].1.contains("12px"));
        assert!(!declarations[0].1.contains("important"));
        assert_eq!(declarations[1].0, "--foo");
        assert!(declarations[1].1.contains("1px"));
    }

    #[test]
    fn it_stringifies_selectors_one_by_one() {
        let stylesheet = parse(".rule, .not2 > a { color: red }");
        let Some(Rule::QualifiedRule(rule)) = stylesheet.rules.first() else {
            panic!("expected a rule");
        };
        let QualifiedRulePrelude::SelectorList(ref selector_list) = rule.prelude else {
            panic!("expected a selector list");
        };

        let selectors: Vec<String> = selector_list
            .children
            .iter()
            .map(stringify_complex_selector)
            .collect();

        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].trim(), ".rule");
        assert!(selectors[1].starts_with(".not2"));
    }

    #[test]
    fn it_stringifies_media_params() {
        let stylesheet = parse("@media (max-width: 1200px) { .a { color: red } }");
        let Some(Rule::AtRule(at_rule)) = stylesheet.rules.first() else {
            panic!("expected an at-rule");
        };
        let params = stringify_at_rule_prelude(at_rule.prelude.as_ref().unwrap());

        assert!(params.contains("(max-width:"));
        assert!(params.contains("1200px"));
    }
}
