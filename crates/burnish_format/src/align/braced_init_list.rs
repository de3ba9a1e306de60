//! Braced-initializer-list assignment alignment.
//!
//! Designated initializers align their `=` within each list:
//!
//! ```text
//! struct foo f = {
//!     .id   = 1,
//!     .name = "text",
//! };
//! ```
//!
//! Each nested list aligns independently.

use crate::chunk::ChunkStore;
use crate::context::Context;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns assigns inside every braced initializer list.
pub fn align_braced_init_lists(ctx: &mut Context, sm: &mut ChunkStore) {
    let span = ctx.opts.align_braced_init_list_span.max(1);
    let thresh = ctx.opts.align_braced_init_list_thresh;
    let ids = sm.ids();

    for open in ids {
        if !sm.is(open, TokenKind::BraceOpen) || sm.parent(open) != TokenKind::BracedInit {
            continue;
        }
        let close = sm.closing_match(open);

        if close.is_none() {
            continue;
        }
        let inner_level = sm.level(open) + 1;
        let mut stack = AlignStack::new();
        stack.start(ctx, span, thresh);
        stack.right_align = !ctx.opts.align_on_tabstop;

        let mut pc = sm.next(open);
        while pc.is_some() && pc != close {
            if sm.is_newline(pc) {
                let count = sm.nl_count(pc);
                stack.new_lines(ctx, sm, count);
            } else if sm.is(pc, TokenKind::Assign) && sm.level(pc) == inner_level {
                stack.add(sm, pc);
            }
            pc = sm.next(pc);
        }
        stack.end(ctx, sm);
    }
}
