use swc_css_ast::{AtRule, ComponentValue};

use super::{
    at_rules::{append_child, create_at_rule_shell},
    rule::{convert_keyframe_block, convert_qualified_rule},
    transform::ConvertContext,
};

/// Copies `@keyframes` when at least one of its frames was converted.
/// Converted frames replace the original ones, the rest are copied as is,
/// so that the animation is never split between two blocks.
pub fn collect_keyframes(keyframes: &AtRule, ctx: &ConvertContext) -> Option<AtRule> {
    let block = keyframes.block.as_ref()?;
    let mut collected = create_at_rule_shell(keyframes);
    let mut has_changes = false;

    for child in block.value.iter() {
        let converted = match child {
            ComponentValue::KeyframeBlock(keyframe_block) => {
                convert_keyframe_block(keyframe_block, ctx)
                    .map(|it| ComponentValue::KeyframeBlock(Box::new(it)))
            }
            ComponentValue::QualifiedRule(rule) => convert_qualified_rule(rule, ctx)
                .map(|it| ComponentValue::QualifiedRule(Box::new(it))),
            _ => None,
        };

        match converted {
            Some(converted) => {
                has_changes = true;
                append_child(&mut collected, converted);
            }
            None => append_child(&mut collected, child.clone()),
        }
    }

    has_changes.then_some(collected)
}
