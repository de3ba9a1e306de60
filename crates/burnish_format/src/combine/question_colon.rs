//! Ternary `?:` matching.
//!
//! Pairs every `?` with its `:` (nesting respected), retags the colon so it
//! can never be confused with labels or bitfields, and flag-series every
//! chunk between the two so spacing and splitting know they sit inside a
//! conditional.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Matches `?`/`:` pairs stream-wide.
pub fn mark_question_colons(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        if !sm.is(pc, TokenKind::Question) {
            continue;
        }
        let colon = find_cond_colon(sm, pc);

        if colon.is_none() {
            ctx.note_error();
            log_sev!(
                Severity::QuestionColon,
                "'?' without ':' at line {}",
                sm.orig_line(pc)
            );
            continue;
        }
        sm.set_kind(colon, TokenKind::CondColon);
        sm.set_parent(colon, TokenKind::Question);
        sm.set_parent(pc, TokenKind::Question);

        let mut cur = pc;
        loop {
            sm.add_flags(cur, PcFlags::IN_CONDITIONAL);
            if cur == colon {
                break;
            }
            cur = sm.next(cur);
        }
    }
}

/// The `:` belonging to this `?`, skipping nested conditionals and paren
/// groups.
fn find_cond_colon(sm: &ChunkStore, question: ChunkId) -> ChunkId {
    let level = sm.level(question);
    let mut nested: usize = 0;
    let mut cur = sm.next_ncnnl(question, Scope::All);

    while cur.is_some() {
        let kind = sm.kind(cur);

        if sm.level(cur) < level
            || matches!(kind, TokenKind::Semicolon | TokenKind::BraceClose)
        {
            return ChunkId::NONE;
        }

        if sm.level(cur) == level {
            match kind {
                TokenKind::Question => nested += 1,
                TokenKind::Colon | TokenKind::CondColon => {
                    if nested == 0 {
                        return cur;
                    }
                    nested -= 1;
                }
                _ => {}
            }
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    ChunkId::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn marked(input: &str) -> ChunkStore {
        let mut ctx = Context::new(Options::default(), Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        mark_question_colons(&mut ctx, &mut sm);
        sm
    }

    fn colon_kinds(sm: &ChunkStore) -> Vec<TokenKind> {
        sm.ids()
            .into_iter()
            .filter(|id| sm.text(*id) == ":")
            .map(|id| sm.kind(id))
            .collect()
    }

    #[test]
    fn simple_conditional() {
        let sm = marked("x = a ? b : c;");
        assert_eq!(colon_kinds(&sm), vec![TokenKind::CondColon]);
        let b = sm
            .ids()
            .into_iter()
            .find(|id| sm.text(*id) == "b")
            .unwrap();
        assert!(sm.has_flags(b, PcFlags::IN_CONDITIONAL));
    }

    #[test]
    fn nested_conditionals_pair_inside_out() {
        let sm = marked("x = a ? b ? c : d : e;");
        assert_eq!(
            colon_kinds(&sm),
            vec![TokenKind::CondColon, TokenKind::CondColon]
        );
    }

    #[test]
    fn paren_nesting_is_skipped() {
        let sm = marked("x = f(a ? b : c) ? 1 : 2;");
        assert_eq!(
            colon_kinds(&sm),
            vec![TokenKind::CondColon, TokenKind::CondColon]
        );
    }

    #[test]
    fn unmatched_question_is_recoverable() {
        let mut ctx = Context::new(Options::default(), Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, "x = a ? b;");
        crate::levels::assign_levels(&mut ctx, &mut sm);
        mark_question_colons(&mut ctx, &mut sm);
        assert_eq!(ctx.error_count, 1);
    }
}
