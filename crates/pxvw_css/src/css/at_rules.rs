use std::str::FromStr;

use strum_macros::{EnumString, IntoStaticStr};
use swc_css_ast::{AtRule, AtRuleName, ComponentValue, SimpleBlock};

use super::{
    codegen::stringify_at_rule_prelude, keyframes::collect_keyframes, rule::convert_qualified_rule,
    transform::ConvertContext,
};

/// At-rules which are looked into at the top level of a stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AtRuleKind {
    Media,
    Supports,
    Keyframes,
}

impl AtRuleKind {
    pub fn of(at_rule: &AtRule) -> Option<AtRuleKind> {
        AtRuleKind::from_str(at_rule_name(at_rule)).ok()
    }
}

pub fn at_rule_name(at_rule: &AtRule) -> &str {
    match at_rule.name {
        AtRuleName::Ident(ref ident) => &*ident.value,
        AtRuleName::DashedIdent(ref dashed_ident) => &*dashed_ident.value,
    }
}

/// Everything between the at-rule name and its block, e.g. `(min-width: 500px)`
pub fn at_rule_params(at_rule: &AtRule) -> String {
    at_rule
        .prelude
        .as_deref()
        .map(stringify_at_rule_prelude)
        .unwrap_or_default()
}

#[inline]
pub fn is_keyframes(at_rule: &AtRule) -> bool {
    matches!(AtRuleKind::of(at_rule), Some(AtRuleKind::Keyframes))
}

/// Whether params have an upper width bound, e.g. `(max-width: 1200px)`
#[inline]
pub fn is_media_with_max_width(params: &str) -> bool {
    params.contains("(max-width:")
}

/// Whether params have a lower width bound and no upper one
#[inline]
pub fn is_media_min_width_only(params: &str) -> bool {
    params.contains("min-width") && !params.contains("max-width")
}

/// Same name, params and span, but no children
pub fn create_at_rule_shell(at_rule: &AtRule) -> AtRule {
    AtRule {
        span: at_rule.span,
        name: at_rule.name.clone(),
        prelude: at_rule.prelude.clone(),
        block: at_rule.block.as_ref().map(|block| SimpleBlock {
            span: block.span,
            name: block.name.clone(),
            value: Vec::new(),
        }),
    }
}

pub fn append_child(at_rule: &mut AtRule, child: ComponentValue) {
    if let Some(ref mut block) = at_rule.block {
        block.value.push(child);
    }
}

#[inline]
pub fn has_children(at_rule: &AtRule) -> bool {
    at_rule
        .block
        .as_ref()
        .is_some_and(|block| !block.value.is_empty())
}

/// Mirrors `nodes` into `parent`, keeping only what was converted.
///
/// - At-rules with an upper width bound are skipped altogether;
/// - At-rules with a lower width bound only are flattened into `parent`;
/// - Keyframes are collected as a whole;
/// - Other at-rules get an empty copy in `parent` which is then filled recursively.
pub fn build_at_rules_tree(
    nodes: &[ComponentValue],
    mut parent: AtRule,
    ctx: &ConvertContext,
) -> AtRule {
    for node in nodes {
        match node {
            ComponentValue::AtRule(at_rule) => {
                let params = at_rule_params(at_rule);
                if is_media_with_max_width(&params) {
                    continue;
                }

                let children = at_rule
                    .block
                    .as_ref()
                    .map_or(&[][..], |block| &block.value[..]);

                if is_media_min_width_only(&params) {
                    parent = build_at_rules_tree(children, parent, ctx);
                    continue;
                }

                if is_keyframes(at_rule) {
                    if let Some(keyframes) = collect_keyframes(at_rule, ctx) {
                        append_child(&mut parent, ComponentValue::AtRule(Box::new(keyframes)));
                    }
                    continue;
                }

                let shell = create_at_rule_shell(at_rule);
                let current = build_at_rules_tree(children, shell, ctx);
                append_child(&mut parent, ComponentValue::AtRule(Box::new(current)));
            }

            ComponentValue::QualifiedRule(rule) => {
                if let Some(converted) = convert_qualified_rule(rule, ctx) {
                    append_child(&mut parent, ComponentValue::QualifiedRule(Box::new(converted)));
                }
            }

            _ => {}
        }
    }

    parent
}

/// Removes nested at-rules without children, deepest first.
/// Returns `None` when nothing is left inside `at_rule`.
pub fn remove_empty_at_rules(mut at_rule: AtRule) -> Option<AtRule> {
    remove_empty_at_rules_deep(&mut at_rule);

    has_children(&at_rule).then_some(at_rule)
}

fn remove_empty_at_rules_deep(at_rule: &mut AtRule) {
    let Some(ref mut block) = at_rule.block else {
        return;
    };

    // Reverse order, because children get removed along the way
    for idx in (0..block.value.len()).rev() {
        let ComponentValue::AtRule(ref mut child) = block.value[idx] else {
            continue;
        };

        remove_empty_at_rules_deep(child);

        if !has_children(child) {
            block.value.remove(idx);
        }
    }
}
