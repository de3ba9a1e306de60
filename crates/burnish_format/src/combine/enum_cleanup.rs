//! Enum trailing-comma cleanup.
//!
//! Applies the `mod_enum_last_comma` decision to the token before an enum's
//! closing brace: add one, remove one, or leave the input alone. D input is
//! skipped entirely (a trailing comma is significant after anonymous
//! enums there), as are enums living inside preprocessor bodies.

use crate::chunk::{Chunk, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::{Lang, PcFlags};
use crate::log_sev;
use crate::options::Iarf;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Adds or removes the trailing comma of every enum body.
pub fn cleanup_enum_commas(ctx: &mut Context, sm: &mut ChunkStore) {
    let policy = ctx.opts.mod_enum_last_comma;

    if policy == Iarf::Ignore || ctx.lang.overlaps(Lang::D) {
        return;
    }
    let ids = sm.ids();

    for close in ids {
        if !sm.is(close, TokenKind::BraceClose)
            || !matches!(sm.parent(close), TokenKind::Enum | TokenKind::EnumClass)
            || sm.has_flags(close, PcFlags::IN_PREPROC)
        {
            continue;
        }
        let last = sm.prev_ncnnl(close, Scope::All);

        if sm.is(last, TokenKind::BraceOpen) {
            continue; // empty enum body
        }

        match policy {
            Iarf::Remove if sm.is(last, TokenKind::Comma) => {
                sm.remove(last);
                ctx.mark_change();
                log_sev!(
                    Severity::EnumCleanup,
                    "removed trailing enum comma before line {}",
                    sm.orig_line(close)
                );
            }
            Iarf::Add | Iarf::Force if !sm.is(last, TokenKind::Comma) => {
                let mut comma = Chunk::new(",", TokenKind::Comma);
                comma.parent = TokenKind::Enum;
                comma.flags = sm.flags(last) & PcFlags::COPY_ON_NEWLINE;
                comma.orig = match sm.get(last) {
                    Some(c) => c.orig,
                    None => Default::default(),
                };
                comma.orig.col = comma.orig.col_end;
                comma.column = sm.end_column(last);
                comma.level = sm.level(last);
                comma.brace_level = sm.brace_level(last);
                comma.pp_level = sm.pp_level(last);
                sm.insert_after(last, comma);
                ctx.mark_change();
                log_sev!(
                    Severity::EnumCleanup,
                    "added trailing enum comma before line {}",
                    sm.orig_line(close)
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn cleaned(input: &str, policy: Iarf, lang: Lang) -> ChunkStore {
        let mut opts = Options::default();
        opts.mod_enum_last_comma = policy;
        let mut ctx = Context::new(opts, lang);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        super::super::combine(&mut ctx, &mut sm);
        sm
    }

    #[test]
    fn remove_strips_the_trailing_comma() {
        let sm = cleaned("enum e { A, B, };", Iarf::Remove, Lang::C);
        assert_eq!(sm.token_text(), "enume{A,B};");
    }

    #[test]
    fn add_inserts_one_when_missing() {
        let sm = cleaned("enum e { A, B };", Iarf::Add, Lang::C);
        assert_eq!(sm.token_text(), "enume{A,B,};");
    }

    #[test]
    fn force_leaves_existing_comma_alone() {
        let sm = cleaned("enum e { A, B, };", Iarf::Force, Lang::C);
        assert_eq!(sm.token_text(), "enume{A,B,};");
    }

    #[test]
    fn d_input_is_never_touched() {
        let sm = cleaned("enum e { A, B, };", Iarf::Remove, Lang::D);
        assert_eq!(sm.token_text(), "enume{A,B,};");
    }

    #[test]
    fn empty_enum_is_skipped() {
        let sm = cleaned("enum e { };", Iarf::Add, Lang::C);
        assert_eq!(sm.token_text(), "enume{};");
    }
}
