use swc_core::common::{
    comments::{SingleThreadedComments, SingleThreadedCommentsMapInner},
    BytePos, Spanned,
};
use swc_css_ast::{ComponentValue, Declaration, SimpleBlock};
use tracing::trace;

use super::{
    codegen::stringify_declaration, parse::parse_declaration, transform::ConvertContext,
};

/// Comment which disables conversion of the declaration right after it
pub const IGNORE_NEXT_COMMENT: &str = "px-to-viewport-ignore-next";

/// Produces a converted copy of `block.value[idx]`, which must be a `Declaration`.
///
/// Returns `None` when:
/// - the value has no unit to convert;
/// - the declaration is preceded by the ignore comment (the comment gets removed);
/// - the parent block already has the same declaration with the converted value.
pub fn convert_declaration(
    block: &SimpleBlock,
    idx: usize,
    declaration: &Declaration,
    ctx: &ConvertContext,
) -> Option<Declaration> {
    let (prop, value) = stringify_declaration(declaration);
    if !ctx.replacer.has_unit(&value) {
        return None;
    }

    if let Some(comments) = ctx.comments {
        if take_ignore_comment(block, idx, declaration, comments) {
            trace!(%prop, "conversion disabled by comment");
            return None;
        }
    }

    let converted_value = ctx.replacer.replace(&value, ctx.options);

    if has_declaration(block, &prop, &converted_value) {
        trace!(%prop, value = %converted_value, "declaration already exists");
        return None;
    }

    let converted = parse_declaration(&prop, &converted_value)?;

    Some(Declaration {
        span: declaration.span,
        important: declaration.important.clone(),
        ..converted
    })
}

/// Checks if any declaration in `block` has this exact `prop` and `value`
fn has_declaration(block: &SimpleBlock, prop: &str, value: &str) -> bool {
    block.value.iter().any(|child| match child {
        ComponentValue::Declaration(declaration) => {
            let (existing_prop, existing_value) = stringify_declaration(declaration);
            existing_prop == prop && existing_value == value
        }
        _ => false,
    })
}

/// Finds the comment right before `block.value[idx]` and removes it
/// if it is the ignore comment.
///
/// Comments are not a part of the tree, thus "right before" means
/// after the previous sibling (or the block start) and before the declaration.
fn take_ignore_comment(
    block: &SimpleBlock,
    idx: usize,
    declaration: &Declaration,
    comments: &SingleThreadedComments,
) -> bool {
    let lo = match idx.checked_sub(1).and_then(|prev_idx| block.value.get(prev_idx)) {
        Some(prev) => prev.span_hi(),
        None => block.span.lo,
    };
    let hi = declaration.span.lo;

    let (mut leading, mut trailing) = comments.borrow_all_mut();

    let in_leading = find_last_comment(&leading, lo, hi);
    let in_trailing = find_last_comment(&trailing, lo, hi);

    // The closest one wins
    let (map, (pos, comment_idx, _)) = match (in_leading, in_trailing) {
        (Some(l), Some(t)) if t.2 > l.2 => (&mut *trailing, t),
        (Some(l), _) => (&mut *leading, l),
        (None, Some(t)) => (&mut *trailing, t),
        (None, None) => return false,
    };

    let Some(list) = map.get_mut(&pos) else {
        return false;
    };

    let is_ignore = list
        .get(comment_idx)
        .is_some_and(|comment| is_ignore_comment(&comment.text));

    if is_ignore {
        list.remove(comment_idx);
        if list.is_empty() {
            map.remove(&pos);
        }
    }

    is_ignore
}

/// Checks the comment text, with or without the `/* */` delimiters
pub(crate) fn is_ignore_comment(text: &str) -> bool {
    let text = text.trim();
    let text = text
        .strip_prefix("/*")
        .and_then(|text| text.strip_suffix("*/"))
        .unwrap_or(text);

    text.trim() == IGNORE_NEXT_COMMENT
}

/// Returns `(key, index in the list, comment start)` of the last comment in `lo..=hi`
fn find_last_comment(
    map: &SingleThreadedCommentsMapInner,
    lo: BytePos,
    hi: BytePos,
) -> Option<(BytePos, usize, BytePos)> {
    map.iter()
        .flat_map(|(pos, list)| {
            list.iter()
                .enumerate()
                .map(move |(comment_idx, comment)| (*pos, comment_idx, comment))
        })
        .filter(|(_, _, comment)| lo <= comment.span.lo && comment.span.hi <= hi)
        .max_by_key(|(_, _, comment)| comment.span.lo)
        .map(|(pos, comment_idx, comment)| (pos, comment_idx, comment.span.lo))
}
