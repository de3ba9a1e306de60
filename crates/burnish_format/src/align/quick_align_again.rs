//! Re-commit of recorded column groups.
//!
//! Passes that run after the main alignment can shift lines and knock
//! members off their columns. Every committed group leaves a linked list
//! behind (`align.start` / `align.next` with the style fields); this pass
//! walks those lists and re-aligns each group in place.

use crate::chunk::{ChunkId, ChunkStore};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::severity::Severity;

use super::stack::AlignStack;

/// Re-aligns every recorded column group.
pub fn quick_align_again(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for start in ids {
        if !sm.has_flags(start, PcFlags::ALIGN_START) {
            continue;
        }
        let link = match sm.get(start) {
            Some(chunk) => chunk.align,
            None => continue,
        };

        if link.next.is_none() {
            continue;
        }
        let mut stack = AlignStack::new();
        stack.start(ctx, 100, 0);
        stack.gap = link.gap;
        stack.right_align = link.right_align;
        stack.star_style = link.star_style;
        stack.amp_style = link.amp_style;

        let mut members = 0usize;
        let mut pc: ChunkId = start;

        while pc.is_some() {
            stack.add(sm, pc);
            stack.new_lines(ctx, sm, 1);
            members += 1;
            pc = match sm.get(pc) {
                Some(chunk) => chunk.align.next,
                None => ChunkId::NONE,
            };
        }
        stack.end(ctx, sm);
        log_sev!(
            Severity::AlignStack,
            "re-aligned group of {} from line {}",
            members,
            sm.orig_line(start)
        );
    }
}
