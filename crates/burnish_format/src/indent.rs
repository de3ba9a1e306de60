//! Output column computation.
//!
//! Two primitives move text horizontally: [`align_to_column`] puts one
//! chunk at a column and shifts the rest of its line with it, preserving
//! relative spacing; [`reindent_line`] does the same anchored at a line's
//! first chunk. The pass [`indent_text`] computes the base column of every
//! line from the brace level and the per-construct adjustments.
//!
//! Columns are 1-based and never drop below 1.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::options::Iarf;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Rounds a column up to the next output tab stop.
pub fn align_tab_column(ctx: &Context, col: usize) -> usize {
    let tab = ctx.opts.output_tab_size.max(1);
    let col = col.max(1);

    if (col - 1) % tab == 0 {
        col
    } else {
        ((col - 1) / tab + 1) * tab + 1
    }
}

/// Moves `pc` to `col`, shifting everything after it on the same line by
/// the same amount.
pub fn align_to_column(ctx: &mut Context, sm: &mut ChunkStore, pc: ChunkId, col: usize) {
    let col = col.max(1);
    let cur_col = sm.column(pc);

    if pc.is_none() || cur_col == col {
        return;
    }
    let delta = col as isize - cur_col as isize;
    let mut cur = pc;

    while cur.is_some() && !sm.is_newline(cur) {
        let new_col = (sm.column(cur) as isize + delta).max(1) as usize;
        sm.set_column(cur, new_col);
        cur = sm.next(cur);
    }
    ctx.mark_change();
}

/// Reindents the line holding `pc` so its first chunk lands on `col`.
pub fn reindent_line(ctx: &mut Context, sm: &mut ChunkStore, pc: ChunkId, col: usize) {
    let start = sm.line_start(pc);
    align_to_column(ctx, sm, start, col);
}

/// Continuation amount for split/continued lines.
fn continuation_columns(ctx: &Context) -> usize {
    if ctx.opts.indent_continue != 0 {
        ctx.opts.indent_continue.unsigned_abs() as usize
    } else {
        ctx.opts.indent_columns
    }
}

/// Is this line-start chunk inside an unclosed paren group (a hanging
/// argument list or condition)?
fn inside_open_paren(sm: &ChunkStore, pc: ChunkId) -> bool {
    sm.level(pc) > sm.brace_level(pc)
}

/// A line is a statement continuation when the previous code token left
/// its statement unfinished. This derives from structure alone so split
/// lines keep their indent on a re-run.
fn continues_statement(sm: &ChunkStore, pc: ChunkId) -> bool {
    let prev = sm.prev_ncnnl(pc, Scope::All);

    if prev.is_none() || sm.has_flags(prev, PcFlags::IN_PREPROC) {
        return false;
    }
    !matches!(
        sm.kind(prev),
        TokenKind::Semicolon
            | TokenKind::BraceOpen
            | TokenKind::BraceClose
            | TokenKind::VbraceOpen
            | TokenKind::VbraceClose
            | TokenKind::CaseColon
            | TokenKind::AccessColon
            | TokenKind::LabelColon
            | TokenKind::SparenClose
            | TokenKind::FparenClose
            | TokenKind::Else
            | TokenKind::Do
    )
}

/// The nearest enclosing brace-open of a chunk.
fn enclosing_brace(sm: &ChunkStore, pc: ChunkId) -> ChunkId {
    let brace_level = sm.brace_level(pc);

    if brace_level == 0 {
        return ChunkId::NONE;
    }
    let mut cur = sm.prev(pc);

    while cur.is_some() {
        if sm.kind(cur).is_brace_open() && sm.brace_level(cur) == brace_level - 1 {
            return cur;
        }
        cur = sm.prev(cur);
    }
    ChunkId::NONE
}

/// Computes and applies the base column of every line.
pub fn indent_text(ctx: &mut Context, sm: &mut ChunkStore) {
    let indent = ctx.opts.indent_columns;
    let mut pc = sm.head();

    while pc.is_some() {
        if !sm.is_first_on_line(pc) || sm.is_newline(pc) {
            pc = sm.next(pc);
            continue;
        }

        if sm.has_flags(pc, PcFlags::DONT_INDENT) {
            pc = sm.next(pc);
            continue;
        }

        // Preprocessor lines follow their own policy.
        if sm.has_flags(pc, PcFlags::IN_PREPROC) {
            if ctx.opts.pp_indent != Iarf::Ignore {
                let col = if ctx.opts.pp_indent_at_level {
                    1 + sm.brace_level(pc) * indent
                } else {
                    1
                };
                reindent_line(ctx, sm, pc, col);
            }
            pc = sm.next(pc);
            continue;
        }
        let kind = sm.kind(pc);
        let mut brace_level = sm.brace_level(pc);

        // Namespaces may opt out of one level.
        if !ctx.opts.indent_namespace {
            let mut encl = enclosing_brace(sm, pc);
            let mut namespace_levels = 0usize;
            while encl.is_some() {
                if sm.parent(encl) == TokenKind::Namespace {
                    namespace_levels += 1;
                }
                encl = enclosing_brace(sm, encl);
            }
            brace_level = brace_level.saturating_sub(namespace_levels);
        }
        let base = 1 + brace_level * indent;

        let col = if kind.is_brace_close() || kind.is_brace_open() {
            base
        } else if kind == TokenKind::Case || kind == TokenKind::Default {
            // Cases sit one level shallower than their statements.
            (base as isize - indent as isize).max(1) as usize
        } else if kind == TokenKind::Access {
            (base as isize - indent as isize + ctx.opts.indent_access_spec as isize).max(1) as usize
        } else if kind == TokenKind::Label {
            ctx.opts.indent_label.max(1) as usize
        } else if kind.is_comment() {
            if ctx.opts.indent_col1_comment && sm.orig_col(pc) == 1 {
                1
            } else {
                base
            }
        } else if inside_open_paren(sm, pc) {
            base + continuation_columns(ctx)
        } else if sm.has_flags(pc, PcFlags::CONT_LINE) || continues_statement(sm, pc) {
            base + ctx.opts.indent_continue.unsigned_abs() as usize
        } else {
            base
        };
        reindent_line(ctx, sm, pc, col);
        pc = sm.next(pc);
    }
    log_sev!(Severity::Indent, "indent pass complete");
}
