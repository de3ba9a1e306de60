//! Objective-C colon alignment.
//!
//! Three related passes:
//!
//! - **Message colons** — the selector colons of a multi-line message
//!   send `[obj doThing:a withOther:b]` align right (selector fragments
//!   end at the shared colon column).
//! - **Declaration colons** — the same treatment for method declarations.
//! - **Message spec** — consecutive `+/-` method declarations align their
//!   leading scope markers.
//!
//! Selector colon identification happens here: a `:` glued to a word
//! inside a message bracket (or in a method declaration line) is an
//! Objective-C colon, not a label or conditional.

use crate::chunk::{ChunkId, ChunkStore};
use crate::context::Context;
use crate::flags::Lang;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Marks and right-aligns the selector colons of multi-line messages.
pub fn align_oc_msg_colons(ctx: &mut Context, sm: &mut ChunkStore) {
    if !ctx.lang.overlaps(Lang::OC) {
        return;
    }
    let span = ctx.opts.align_oc_msg_colon_span;
    let ids = sm.ids();

    for open in ids {
        if !sm.is(open, TokenKind::SquareOpen) {
            continue;
        }
        let close = sm.closing_match(open);

        if close.is_none() {
            continue;
        }
        // A message bracket holds `receiver selector[:arg ...]`.
        let mut colons: Vec<ChunkId> = Vec::new();
        let mut multiline = false;
        let mut pc = sm.next(open);

        while pc.is_some() && pc != close {
            if sm.is_newline(pc) {
                multiline = true;
            } else if sm.is(pc, TokenKind::Colon)
                && sm.level(pc) == sm.level(open) + 1
                && sm.is(sm.prev(pc), TokenKind::Word)
            {
                sm.set_kind(pc, TokenKind::OcColon);
                sm.set_parent(pc, TokenKind::OcMsg);
                let word = sm.prev(pc);
                sm.set_kind(word, TokenKind::OcMsgName);
                colons.push(pc);
            }
            pc = sm.next(pc);
        }

        if colons.len() < 2 || !multiline {
            continue;
        }
        sm.set_parent(open, TokenKind::OcMsg);
        sm.set_parent(close, TokenKind::OcMsg);

        let mut stack = AlignStack::new();
        stack.start(ctx, span.max(1), 0);
        stack.right_align = true;

        // Feed in stream order so newline gaps count.
        let mut pc = sm.next(open);
        while pc.is_some() && pc != close {
            if sm.is_newline(pc) {
                let count = sm.nl_count(pc);
                stack.new_lines(ctx, sm, count);
            } else if sm.is(pc, TokenKind::OcColon) {
                // The selector fragment moves as one unit; align the
                // fragment start so the colon lands on the shared column.
                let fragment = sm.prev(pc);
                stack.add(sm, fragment);
            }
            pc = sm.next(pc);
        }
        stack.end(ctx, sm);
    }
}

/// Is this chunk on a line that declares a method (`+`/`-` first)?
fn method_decl_line(sm: &ChunkStore, pc: ChunkId) -> bool {
    let start = sm.line_start(pc);
    matches!(sm.kind(start), TokenKind::OcScope)
        || (matches!(sm.kind(start), TokenKind::Plus | TokenKind::Minus | TokenKind::Arith
            | TokenKind::Neg | TokenKind::Pos)
            && matches!(sm.text(start), "+" | "-"))
}

/// Aligns the scope markers of consecutive method declarations.
pub fn align_oc_msg_spec(ctx: &mut Context, sm: &mut ChunkStore, span: usize) {
    if !ctx.lang.overlaps(Lang::OC) {
        return;
    }
    let mut stack = AlignStack::new();
    stack.start(ctx, span, 0);
    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            stack.new_lines(ctx, sm, count);
        } else if sm.is_first_on_line(pc) && method_decl_line(sm, pc) {
            sm.set_kind(pc, TokenKind::OcScope);
            stack.add(sm, pc);
        }
        pc = sm.next(pc);
    }
    stack.end(ctx, sm);
}

/// Aligns the colons of consecutive property/method declarations.
pub fn align_oc_decl_colons(ctx: &mut Context, sm: &mut ChunkStore) {
    if !ctx.lang.overlaps(Lang::OC) {
        return;
    }
    let mut stack = AlignStack::new();
    stack.start(ctx, 1, 0);
    stack.right_align = true;
    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            stack.new_lines(ctx, sm, count);
        } else if sm.is(pc, TokenKind::Colon)
            && method_decl_line(sm, pc)
            && sm.is(sm.prev(pc), TokenKind::Word)
        {
            sm.set_kind(pc, TokenKind::OcColon);
            let fragment = sm.prev(pc);
            stack.add(sm, fragment);
        }
        pc = sm.next(pc);
    }
    stack.end(ctx, sm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indent::indent_text;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    #[test]
    fn message_colons_are_identified() {
        let mut opts = Options::default();
        opts.align_oc_msg_colon_span = 2;
        let mut ctx = Context::new(opts, Lang::OC);
        let mut sm = ChunkStore::new();
        tokenize(
            &mut ctx,
            &mut sm,
            "[obj doThing:a\nwithOther:b];\n",
        );
        crate::levels::assign_levels(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_oc_msg_colons(&mut ctx, &mut sm);

        let colons: Vec<ChunkId> = sm
            .ids()
            .into_iter()
            .filter(|id| sm.is(*id, TokenKind::OcColon))
            .collect();
        assert_eq!(colons.len(), 2);
        // Right-aligned: both colons sit at the same column.
        let c0 = sm.column(colons[0]);
        let c1 = sm.column(colons[1]);
        assert_eq!(c0, c1);
    }
}
