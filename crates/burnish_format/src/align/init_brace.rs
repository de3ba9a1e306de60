//! Initializer-brace column alignment.
//!
//! A `= { ... }` block spanning several lines is aligned column-by-column:
//! the first line establishes the columns of interest (assigns, inner
//! braces, commas and the cells after them), later lines widen them, and
//! the apply phase moves every matched chunk of every row to its column.
//! A `[x] =` designator prefix is skipped and remembered on the context.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::error::FormatError;
use crate::indent::align_to_column;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

use super::tools::{scan_ib_line, skip_c99_array};

/// Aligns one multi-line initializer block starting at its `{`.
pub fn align_init_brace(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    brace_open: ChunkId,
) -> Result<(), FormatError> {
    let close = sm.closing_match(brace_open);

    if close.is_none() {
        return Ok(());
    }
    ctx.al.clear();
    ctx.al_c99_array = false;

    // Scan phase: build and widen the column table line by line.
    let mut line = first_line_start(sm, brace_open, close);

    while line.is_some() && line != close && sm.level(line) > sm.level(brace_open) {
        let after = scan_ib_line(ctx, sm, line)?;
        line = next_line_start(sm, after, close);
    }

    if ctx.al.is_empty() {
        return Ok(());
    }
    log_sev!(
        Severity::ScanInitBrace,
        "applying {} init-brace columns at line {}",
        ctx.al.len(),
        sm.orig_line(brace_open)
    );

    // Apply phase: move each row's matched chunks onto the table.
    let mut line = first_line_start(sm, brace_open, close);

    while line.is_some() && line != close && sm.level(line) > sm.level(brace_open) {
        let after = apply_ib_line(ctx, sm, line, close);
        line = next_line_start(sm, after, close);
    }
    Ok(())
}

fn first_line_start(sm: &ChunkStore, brace_open: ChunkId, close: ChunkId) -> ChunkId {
    let first = sm.next_nc(brace_open, Scope::All);

    if first == close {
        return close;
    }
    if sm.is_newline(first) {
        let start = sm.next_ncnnl(first, Scope::All);
        if start == close {
            return close;
        }
        return start;
    }
    first
}

fn next_line_start(sm: &ChunkStore, after: ChunkId, close: ChunkId) -> ChunkId {
    let mut cur = after;

    while cur.is_some() && (sm.is_newline(cur) || sm.is_comment(cur)) {
        cur = sm.next(cur);
    }
    if cur.is_none() {
        return ChunkId::NONE;
    }
    if cur == close || sm.is_newline(cur) {
        return cur;
    }
    cur
}

/// Re-walks one row with the same matching rule as the scanner, aligning
/// each matched chunk to its recorded column.
fn apply_ib_line(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    start: ChunkId,
    close: ChunkId,
) -> ChunkId {
    let mut start = start;
    let after_designator = skip_c99_array(sm, start);

    if after_designator.is_some() {
        start = after_designator;
    }
    let mut idx = 0usize;
    let mut pc = start;

    while pc.is_some() && !sm.is_newline(pc) && sm.level(pc) >= sm.level(start) {
        let next = sm.next(pc);
        let interesting = matches!(
            sm.kind(pc),
            TokenKind::Assign | TokenKind::BraceOpen | TokenKind::BraceClose | TokenKind::Comma
        );

        if interesting && next.is_some() && !sm.is_comment(next) && idx < ctx.al.len() {
            if ctx.al[idx].kind == sm.kind(pc) {
                let cell_col = ctx.al[idx].col;
                align_to_column(ctx, sm, pc, cell_col);

                // Right-align a number cell against the following column.
                if ctx.opts.align_number_right {
                    let val = sm.next_nc(pc, Scope::All);
                    if matches!(sm.kind(val), TokenKind::Number | TokenKind::NumberFp)
                        && idx + 1 < ctx.al.len()
                    {
                        let next_col = ctx.al[idx + 1].col;
                        let width = sm.width(val);
                        let target = next_col.saturating_sub(width + 1).max(cell_col + 1);
                        align_to_column(ctx, sm, val, target);
                    }
                }
                idx += 1;
            }
        }
        if pc == close {
            break;
        }
        pc = next;
    }
    pc
}

/// Entry pass: finds `= { ... }` blocks that span lines and aligns each.
pub fn align_struct_initializers(ctx: &mut Context, sm: &mut ChunkStore) -> Result<(), FormatError> {
    let ids = sm.ids();

    for assign in ids {
        if !sm.is(assign, TokenKind::Assign) {
            continue;
        }
        let brace = sm.next_ncnnl(assign, Scope::All);

        if !sm.is(brace, TokenKind::BraceOpen) || sm.parent(brace) != TokenKind::BracedInit {
            continue;
        }
        let close = sm.closing_match(brace);

        // Only multi-line blocks are interesting.
        let mut cur = brace;
        let mut multiline = false;
        while cur.is_some() && cur != close {
            if sm.is_newline(cur) {
                multiline = true;
                break;
            }
            cur = sm.next(cur);
        }

        if multiline {
            align_init_brace(ctx, sm, brace)?;
        }
    }
    Ok(())
}
