//! Shared helpers for the alignment passes.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::{AlCell, Context, AL_SIZE};
use crate::error::FormatError;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Skips a C99 designator prefix: given `[`, returns the chunk after the
/// `=` of `[idx] =`, or the sentinel when the shape does not match.
pub fn skip_c99_array(sm: &ChunkStore, sq_open: ChunkId) -> ChunkId {
    if !sm.is(sq_open, TokenKind::SquareOpen) {
        return ChunkId::NONE;
    }
    let close = sm.closing_match(sq_open);
    let assign = sm.next_nc(close, Scope::All);

    if sm.is(assign, TokenKind::Assign) {
        return sm.next_nc(assign, Scope::All);
    }
    ChunkId::NONE
}

/// Width a cell occupies for column bookkeeping: the token itself plus the
/// space that separated it from the next one.
pub fn space_col_align(sm: &ChunkStore, pc: ChunkId, next: ChunkId) -> usize {
    let sep = match sm.get(next) {
        Some(chunk) if chunk.orig.prev_sp > 0 => 1,
        _ => 0,
    };
    sm.width(pc) + sep
}

/// Scans one line of an initializer-brace block, recording (first line) or
/// matching-and-widening (later lines) the columns of interest in the
/// context's scratch table.
///
/// Returns the first chunk after the line. Fails with `StackCapacity` when
/// the block needs more than [`AL_SIZE`] cells.
pub fn scan_ib_line(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    start: ChunkId,
) -> Result<ChunkId, FormatError> {
    let mut start = start;

    // Skip past C99 `[xx] =` designators.
    let after_designator = skip_c99_array(sm, start);
    if after_designator.is_some() {
        sm.set_parent(start, TokenKind::Tsquare);
        start = after_designator;
        ctx.al_c99_array = true;
    }
    let mut idx = 0usize;
    let mut pc = start;

    while pc.is_some() && !sm.is_newline(pc) && sm.level(pc) >= sm.level(start) {
        let next = sm.next(pc);
        let interesting = matches!(
            sm.kind(pc),
            TokenKind::Assign | TokenKind::BraceOpen | TokenKind::BraceClose | TokenKind::Comma
        );

        if interesting && next.is_some() && !sm.is_comment(next) {
            let token_width = space_col_align(sm, pc, next);

            if idx >= ctx.al.len() {
                if ctx.al.len() >= AL_SIZE {
                    return Err(FormatError::StackCapacity {
                        what: "init-brace scratch table",
                        limit: AL_SIZE,
                        line: sm.orig_line(pc),
                        col: sm.orig_col(pc),
                    });
                }
                ctx.al.push(AlCell {
                    kind: sm.kind(pc),
                    col: sm.column(pc),
                    len: token_width,
                    ref_id: pc,
                });
                idx += 1;
            } else if ctx.al[idx].kind == sm.kind(pc) {
                // Widen monotonically: a row that sits further right grows
                // this column and everything after it.
                if sm.column(pc) > ctx.al[idx].col {
                    ib_shift_out(ctx, idx, sm.column(pc) - ctx.al[idx].col);
                }

                if token_width > ctx.al[idx].len {
                    let grow = token_width - ctx.al[idx].len;
                    ctx.al[idx].len = token_width;
                    ib_shift_out(ctx, idx + 1, grow);
                }
                idx += 1;
            }
        }
        pc = next;
    }
    log_sev!(
        Severity::ScanInitBrace,
        "scanned init-brace line at {} ({} cells)",
        sm.orig_line(start),
        ctx.al.len()
    );
    Ok(pc)
}

/// Shifts every recorded column from `idx` on rightward by `delta`.
pub fn ib_shift_out(ctx: &mut Context, idx: usize, delta: usize) {
    for cell in ctx.al.iter_mut().skip(idx) {
        cell.col += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn prepared(input: &str) -> (ChunkStore, Context) {
        let mut ctx = Context::new(Options::default(), Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        (sm, ctx)
    }

    #[test]
    fn c99_designator_is_skipped() {
        let (sm, _) = prepared("[FRED] = \"fred\",");
        let sq = sm.head();
        let after = skip_c99_array(&sm, sq);
        assert_eq!(sm.text(after), "\"fred\"");
    }

    #[test]
    fn non_designator_returns_sentinel() {
        let (sm, _) = prepared("[1] + 2");
        assert!(skip_c99_array(&sm, sm.head()).is_none());
    }

    #[test]
    fn scan_records_columns_of_interest() {
        let (mut sm, mut ctx) = prepared("{ 1, 22 },");
        let head = sm.head();
        let end = scan_ib_line(&mut ctx, &mut sm, head).unwrap();
        // Recorded: `{`, the inner `,`, `}` (the trailing comma ends the
        // stream and records nothing).
        assert_eq!(ctx.al.len(), 3);
        assert_eq!(ctx.al[0].kind, TokenKind::BraceOpen);
        assert_eq!(ctx.al[1].kind, TokenKind::Comma);
        assert_eq!(ctx.al[2].kind, TokenKind::BraceClose);
        assert!(end.is_none());
    }
}
