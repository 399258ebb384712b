use pxvw_core::{ConfigError, PxToViewportOptions};
use swc_core::common::comments::SingleThreadedComments;
use swc_css_ast::{AtRule, ComponentValue, QualifiedRule, Rule, Stylesheet};
use tracing::debug;

use super::{
    at_rules::{
        at_rule_params, build_at_rules_tree, create_at_rule_shell, is_keyframes,
        is_media_min_width_only, is_media_with_max_width, remove_empty_at_rules, AtRuleKind,
    },
    convert::UnitReplacer,
    keyframes::collect_keyframes,
    parse::parse_empty_at_rule,
    rule::convert_qualified_rule,
};

/// What every conversion step needs to know
pub struct ConvertContext<'a> {
    pub options: &'a PxToViewportOptions,
    pub replacer: &'a UnitReplacer,
    /// Comments of the stylesheet, used for the ignore comment
    pub comments: Option<&'a SingleThreadedComments>,
}

/// Appends a `@media (min-width: <viewport width>)` block with viewport-unit copies
/// of everything which has lengths in the unit to convert.
///
/// The transformer keeps no state between stylesheets and can be reused.
pub struct PxToViewportTransformer {
    options: PxToViewportOptions,
    replacer: UnitReplacer,
}

/// Converted copies, in the order they are appended
#[derive(Default)]
struct Collected {
    rules: Vec<QualifiedRule>,
    at_rules: Vec<AtRule>,
}

impl PxToViewportTransformer {
    pub fn new(options: PxToViewportOptions) -> Result<Self, ConfigError> {
        let replacer = UnitReplacer::new(&options.unit_to_convert).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: options.unit_to_convert.to_owned(),
                source,
            }
        })?;

        Ok(Self { options, replacer })
    }

    pub fn options(&self) -> &PxToViewportOptions {
        &self.options
    }

    /// Transforms the `stylesheet` in place.
    /// Returns `true` if the `@media` block was appended.
    ///
    /// `file` is where the stylesheet comes from, it is checked against `exclude`.
    /// `comments` must be the ones collected when parsing the `stylesheet`,
    /// otherwise the ignore comment has no effect.
    pub fn transform(
        &self,
        stylesheet: &mut Stylesheet,
        file: Option<&str>,
        comments: Option<&SingleThreadedComments>,
    ) -> bool {
        if let Some(file) = file {
            if self.options.is_excluded(file) {
                debug!(file, "stylesheet is excluded");
                return false;
            }
        }

        let ctx = ConvertContext {
            options: &self.options,
            replacer: &self.replacer,
            comments,
        };
        let mut collected = Collected::default();

        for rule in stylesheet.rules.iter() {
            match rule {
                Rule::QualifiedRule(qualified_rule) => {
                    if let Some(converted) = convert_qualified_rule(qualified_rule, &ctx) {
                        collected.rules.push(converted);
                    }
                }

                Rule::AtRule(at_rule) => collect_at_rule(at_rule, &ctx, &mut collected),

                Rule::ListOfComponentValues(_) => {}
            }
        }

        if collected.rules.is_empty() && collected.at_rules.is_empty() {
            return false;
        }

        let params = format!(
            "(min-width: {}{})",
            self.options.viewport_width, self.options.unit_to_convert
        );
        let Some(mut root) = parse_empty_at_rule("media", &params) else {
            debug!(%params, "could not create the media block");
            return false;
        };
        root.span = stylesheet.span;

        debug!(
            rules = collected.rules.len(),
            at_rules = collected.at_rules.len(),
            "appending converted rules"
        );

        if let Some(ref mut block) = root.block {
            let rules = collected
                .rules
                .into_iter()
                .map(|rule| ComponentValue::QualifiedRule(Box::new(rule)));
            let at_rules = collected
                .at_rules
                .into_iter()
                .map(|at_rule| ComponentValue::AtRule(Box::new(at_rule)));

            block.value.extend(rules.chain(at_rules));
        }

        stylesheet.rules.push(Rule::AtRule(Box::new(root)));
        true
    }
}

fn collect_at_rule(at_rule: &AtRule, ctx: &ConvertContext, collected: &mut Collected) {
    let Some(kind) = AtRuleKind::of(at_rule) else {
        return;
    };

    let params = at_rule_params(at_rule);
    if is_media_with_max_width(&params) {
        return;
    }

    if let AtRuleKind::Keyframes = kind {
        collected.at_rules.extend(collect_keyframes(at_rule, ctx));
        return;
    }

    if !is_media_min_width_only(&params) {
        collected.at_rules.extend(convert_at_rule(at_rule, ctx));
        return;
    }

    // Already applies to wide screens, so the content goes straight to the root
    let Some(ref block) = at_rule.block else {
        return;
    };

    for child in block.value.iter() {
        match child {
            ComponentValue::QualifiedRule(qualified_rule) => {
                collected
                    .rules
                    .extend(convert_qualified_rule(qualified_rule, ctx));
            }

            ComponentValue::AtRule(child) if is_keyframes(child) => {
                collected.at_rules.extend(collect_keyframes(child, ctx));
            }

            // Mirrored as a whole, even with an upper bound
            ComponentValue::AtRule(child) => {
                collected.at_rules.extend(convert_at_rule(child, ctx));
            }

            _ => {}
        }
    }
}

/// Mirrors `at_rule` with only the converted content, if there is any
fn convert_at_rule(at_rule: &AtRule, ctx: &ConvertContext) -> Option<AtRule> {
    let children = at_rule
        .block
        .as_ref()
        .map_or(&[][..], |block| &block.value[..]);

    let tree = build_at_rules_tree(children, create_at_rule_shell(at_rule), ctx);
    remove_empty_at_rules(tree)
}
