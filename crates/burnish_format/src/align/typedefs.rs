//! Typedef-name alignment.
//!
//! `typedef uint8_t BYTE;` lines align the defined name, with the
//! typedef star/amp styles applied to pointer typedefs.

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns the defined names of consecutive typedefs.
pub fn align_typedefs(ctx: &mut Context, sm: &mut ChunkStore, span: usize) {
    let mut stack = AlignStack::new();
    stack.start(ctx, span, 0);
    stack.gap = ctx.opts.align_typedef_gap;
    stack.star_style = ctx.opts.align_typedef_star_style;
    stack.amp_style = ctx.opts.align_typedef_amp_style;

    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            stack.new_lines(ctx, sm, count);
        } else if sm.is(pc, TokenKind::Typedef) {
            // The defined name is the last word before the semicolon,
            // function-pointer typedefs excluded.
            let semi = sm.next_of_kind(pc, TokenKind::Semicolon, Some(sm.level(pc)));
            let name = sm.prev_ncnnl(semi, Scope::All);

            if matches!(sm.kind(name), TokenKind::Word | TokenKind::Type)
                && sm.orig_line(name) == sm.orig_line(pc)
            {
                stack.add(sm, name);
            }
        }
        pc = sm.next(pc);
    }
    stack.end(ctx, sm);
}
