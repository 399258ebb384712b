use swc_css_ast::{
    ComponentValue, KeyframeBlock, QualifiedRule, QualifiedRulePrelude, SelectorList, SimpleBlock,
};

use super::{
    codegen::{
        stringify_complex_selector, stringify_keyframe_selector, stringify_qualified_rule_prelude,
    },
    declaration::convert_declaration,
    transform::ConvertContext,
};

/// Builds a rule with the converted declarations of `rule`.
///
/// Blacklisted selectors are dropped, and `None` is returned
/// when no selector survives or when nothing was converted.
pub fn convert_qualified_rule(rule: &QualifiedRule, ctx: &ConvertContext) -> Option<QualifiedRule> {
    let prelude = filter_prelude(&rule.prelude, ctx)?;
    let block = convert_block(&rule.block, ctx)?;

    Some(QualifiedRule {
        span: rule.span,
        prelude,
        block,
    })
}

/// Same as [`convert_qualified_rule`], but for a keyframe (e.g. `from` or `50%`)
pub fn convert_keyframe_block(
    keyframe_block: &KeyframeBlock,
    ctx: &ConvertContext,
) -> Option<KeyframeBlock> {
    let prelude: Vec<_> = keyframe_block
        .prelude
        .iter()
        .filter(|selector| {
            let selector = stringify_keyframe_selector(selector);
            !ctx.options.is_blacklisted(selector.trim())
        })
        .cloned()
        .collect();

    if prelude.is_empty() {
        return None;
    }

    let block = convert_block(&keyframe_block.block, ctx)?;

    Some(KeyframeBlock {
        span: keyframe_block.span,
        prelude,
        block,
    })
}

fn filter_prelude(
    prelude: &QualifiedRulePrelude,
    ctx: &ConvertContext,
) -> Option<QualifiedRulePrelude> {
    let QualifiedRulePrelude::SelectorList(ref selector_list) = prelude else {
        // Anything else is treated as a single selector
        let selector = stringify_qualified_rule_prelude(prelude);
        return (!ctx.options.is_blacklisted(selector.trim())).then(|| prelude.clone());
    };

    let children: Vec<_> = selector_list
        .children
        .iter()
        .filter(|selector| {
            let selector = stringify_complex_selector(selector);
            !ctx.options.is_blacklisted(selector.trim())
        })
        .cloned()
        .collect();

    if children.is_empty() {
        return None;
    }

    Some(QualifiedRulePrelude::SelectorList(SelectorList {
        span: selector_list.span,
        children,
    }))
}

/// Converts direct declarations of `block`. Nested rules are not looked into.
fn convert_block(block: &SimpleBlock, ctx: &ConvertContext) -> Option<SimpleBlock> {
    let value: Vec<ComponentValue> = block
        .value
        .iter()
        .enumerate()
        .filter_map(|(idx, child)| match child {
            ComponentValue::Declaration(declaration) => {
                convert_declaration(block, idx, declaration, ctx)
            }
            _ => None,
        })
        .map(|declaration| ComponentValue::Declaration(Box::new(declaration)))
        .collect();

    if value.is_empty() {
        return None;
    }

    Some(SimpleBlock {
        span: block.span,
        name: block.name.clone(),
        value,
    })
}
