//! Nesting levels and block numbering.
//!
//! One forward pass assigns every chunk its `level` (all four pair
//! families) and `brace_level` (braces only). Openers and closers carry the
//! *outer* level, so a matched pair always shares its level and everything
//! between them is one deeper.
//!
//! Angle brackets only participate after the combiner has retagged
//! template `<`/`>`; the session re-runs this pass after combining so the
//! tentative tokenizer view gets corrected.
//!
//! Block numbers distinguish sibling statements across different opener
//! groups: every `{`, function paren and template open takes a fresh
//! number; the matching closer restores the number that was current just
//! before the opener, so the following siblings rejoin their group.

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Assigns `level` and `brace_level` stream-wide.
pub fn assign_levels(ctx: &mut Context, sm: &mut ChunkStore) {
    let mut level: usize = 0;
    let mut brace_level: usize = 0;
    let mut pc = sm.head();

    while pc.is_some() {
        let kind = sm.kind(pc);

        if kind.is_closer() {
            if level == 0 {
                ctx.note_error();
                log_sev!(
                    Severity::Warn,
                    "unmatched closer '{}' at line {}; treated as top level",
                    sm.text(pc),
                    sm.orig_line(pc)
                );
            } else {
                level -= 1;
            }

            if kind.is_brace_close() {
                brace_level = brace_level.saturating_sub(1);
            }
        }

        if let Some(chunk) = sm.get_mut(pc) {
            chunk.level = level;
            chunk.brace_level = brace_level;
        }

        if kind.is_opener() {
            level += 1;

            if kind.is_brace_open() {
                brace_level += 1;
            }
        }
        pc = sm.next(pc);
    }
}

/// True for the opener kinds that take a fresh block number.
fn opens_block(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::BraceOpen | TokenKind::VbraceOpen | TokenKind::FparenOpen | TokenKind::AngleOpen
    )
}

fn closes_block(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::BraceClose
            | TokenKind::VbraceClose
            | TokenKind::FparenClose
            | TokenKind::AngleClose
    )
}

/// Numbers the blocks.
pub fn number_blocks(ctx: &mut Context, sm: &mut ChunkStore) {
    let mut current = ctx.next_block_number();
    let mut pc = sm.head();

    while pc.is_some() {
        let kind = sm.kind(pc);

        if opens_block(kind) {
            current = ctx.next_block_number();
        }

        if let Some(chunk) = sm.get_mut(pc) {
            chunk.block_number = current;
        }

        if closes_block(kind) {
            // Restore the number of the chunk just before the opener.
            let opener = sm.opening_match(pc);
            let before = sm.prev_ncnnl(opener, Scope::All);
            current = match sm.get(before) {
                Some(chunk) => chunk.block_number,
                None => 0,
            };
        }
        pc = sm.next(pc);
    }
    log_sev!(Severity::BlockNumber, "numbered blocks");
}

/// Region flags derivable from pairing alone; the combiner adds the rest.
pub fn flag_paren_regions(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for id in ids {
        let kind = sm.kind(id);

        let flag = match kind {
            TokenKind::SparenOpen => {
                if sm.parent(id) == TokenKind::For {
                    PcFlags::IN_SPAREN | PcFlags::IN_FOR
                } else {
                    PcFlags::IN_SPAREN
                }
            }
            _ => continue,
        };
        let close = sm.closing_match(id);
        let mut cur = id;

        while cur.is_some() {
            sm.add_flags(cur, flag);
            if cur == close {
                break;
            }
            cur = sm.next(cur);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkStore;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn leveled(input: &str) -> (ChunkStore, Context) {
        let mut ctx = Context::new(Options::default(), Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        assign_levels(&mut ctx, &mut sm);
        number_blocks(&mut ctx, &mut sm);
        (sm, ctx)
    }

    fn by_text(sm: &ChunkStore, text: &str) -> Vec<crate::chunk::ChunkId> {
        sm.ids()
            .into_iter()
            .filter(|id| sm.text(*id) == text)
            .collect()
    }

    #[test]
    fn opener_and_closer_share_their_level() {
        let (sm, _) = leveled("void f(void) { int x; }");
        let open = by_text(&sm, "{")[0];
        let close = by_text(&sm, "}")[0];
        assert_eq!(sm.level(open), sm.level(close));
        let x = by_text(&sm, "x")[0];
        assert_eq!(sm.level(x), sm.level(open) + 1);
        assert_eq!(sm.brace_level(x), 1);
    }

    #[test]
    fn unmatched_closer_is_recoverable() {
        let (sm, ctx) = leveled("int a; }");
        assert_eq!(ctx.error_count, 1);
        let close = by_text(&sm, "}")[0];
        assert_eq!(sm.level(close), 0);
    }

    #[test]
    fn block_number_constant_across_siblings() {
        let (sm, _) = leveled("int a; { int b; } int c;");
        let a = by_text(&sm, "a")[0];
        let b = by_text(&sm, "b")[0];
        let c = by_text(&sm, "c")[0];
        assert_eq!(sm.get(a).unwrap().block_number, sm.get(c).unwrap().block_number);
        assert_ne!(sm.get(a).unwrap().block_number, sm.get(b).unwrap().block_number);
    }

    #[test]
    fn nested_blocks_get_fresh_numbers() {
        let (sm, _) = leveled("{ { int a; } { int b; } }");
        let a = by_text(&sm, "a")[0];
        let b = by_text(&sm, "b")[0];
        assert_ne!(sm.get(a).unwrap().block_number, sm.get(b).unwrap().block_number);
    }
}
