//! Trailing-comment alignment.
//!
//! Comments that follow code on their line are flagged as right comments
//! and aligned to a shared column: the widest code end plus the gap, or
//! the fixed `align_right_cmt_at_col` when that is further right. With
//! `align_right_cmt_same_level`, a change of brace level splits the
//! group.

use crate::chunk::{ChunkId, ChunkStore};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::indent::{align_tab_column, align_to_column};
use crate::log_sev;
use crate::severity::Severity;

/// Commits a collected comment group to `col`.
fn commit_group(ctx: &mut Context, sm: &mut ChunkStore, group: &[ChunkId], col: usize) {
    if group.len() < 2 {
        return;
    }
    let col = if ctx.opts.align_on_tabstop {
        align_tab_column(ctx, col)
    } else {
        col
    };
    log_sev!(
        Severity::AlignRightComment,
        "aligning {} trailing comments to column {}",
        group.len(),
        col
    );

    for pc in group {
        align_to_column(ctx, sm, *pc, col);
        sm.add_flags(*pc, PcFlags::WAS_ALIGNED);
    }
}

/// Flags and aligns right comments stream-wide.
pub fn align_trailing_comments(ctx: &mut Context, sm: &mut ChunkStore) {
    let span = ctx.opts.align_right_cmt_span;
    let gap = ctx.opts.align_right_cmt_gap.max(1);
    let at_col = ctx.opts.align_right_cmt_at_col;
    let same_level = ctx.opts.align_right_cmt_same_level;

    let mut group: Vec<ChunkId> = Vec::new();
    let mut group_col = 0usize;
    let mut group_level = 0usize;
    let mut gap_lines = 0usize;
    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            gap_lines += sm.nl_count(pc);

            if gap_lines > span + 1 && !group.is_empty() {
                commit_group(ctx, sm, &group, group_col.max(at_col));
                group.clear();
                group_col = 0;
            }
            pc = sm.next(pc);
            continue;
        }

        if sm.is_comment(pc) && !sm.is_first_on_line(pc) {
            sm.add_flags(pc, PcFlags::RIGHT_COMMENT);
            let level = sm.brace_level(pc);

            if same_level && !group.is_empty() && level != group_level {
                commit_group(ctx, sm, &group, group_col.max(at_col));
                group.clear();
                group_col = 0;
            }
            let prev = sm.prev(pc);
            let code_end = sm.end_column(prev) + gap;
            group_col = group_col.max(code_end);
            group_level = level;
            group.push(pc);
            gap_lines = 0;
        }
        pc = sm.next(pc);
    }
    commit_group(ctx, sm, &group, group_col.max(at_col));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::indent::indent_text;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn aligned(input: &str, opts: Options) -> ChunkStore {
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_trailing_comments(&mut ctx, &mut sm);
        sm
    }

    #[test]
    fn trailing_comments_share_a_column() {
        let mut opts = Options::default();
        opts.align_right_cmt_span = 2;
        let sm = aligned("int a; // one\nlong counter; // two\n", opts);
        let cols: Vec<usize> = sm
            .ids()
            .into_iter()
            .filter(|id| sm.is_comment(*id))
            .map(|id| sm.column(id))
            .collect();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0], cols[1]);
    }

    #[test]
    fn whole_line_comments_are_not_right_comments() {
        let mut opts = Options::default();
        opts.align_right_cmt_span = 2;
        let sm = aligned("// header\nint a; // one\n", opts);
        let header = sm.head();
        assert!(!sm.has_flags(header, PcFlags::RIGHT_COMMENT));
    }
}
