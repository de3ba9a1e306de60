//! Preprocessor framing.
//!
//! Walks the stream once, turns the first word after a line-leading `#`
//! into the directive kind, flags every chunk of the directive (through
//! its terminating newline, splices included) as in-preprocessor, and
//! tracks the conditional-compilation depth:
//!
//! - `#if` / `#ifdef` / `#ifndef` push,
//! - `#else` / `#elif` sit at the level of their `#if`,
//! - `#endif` pops back to it.
//!
//! Every chunk receives the conditional depth current at its position, so
//! later passes can tell "same `#if` arm" from "other arm" without
//! re-walking.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::log_sev;
use crate::flags::PcFlags;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Directive kind from the word following `#`.
fn directive_kind(word: &str) -> TokenKind {
    match word {
        "define" => TokenKind::PpDefine,
        "include" | "import" | "include_next" => TokenKind::PpInclude,
        "if" | "ifdef" | "ifndef" => TokenKind::PpIf,
        "else" | "elif" | "elifdef" | "elifndef" => TokenKind::PpElse,
        "endif" => TokenKind::PpEndif,
        "pragma" => TokenKind::PpPragma,
        "error" | "warning" => TokenKind::PpError,
        "undef" => TokenKind::PpUndef,
        "region" => TokenKind::PpRegion,
        "endregion" => TokenKind::PpEndregion,
        _ => TokenKind::PpOther,
    }
}

/// Directive bodies that are prose rather than code.
fn body_is_opaque(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::PpInclude
            | TokenKind::PpError
            | TokenKind::PpPragma
            | TokenKind::PpRegion
            | TokenKind::PpEndregion
    )
}

/// Marks directives and assigns `pp_level` stream-wide.
pub fn frame_preprocessor(ctx: &mut Context, sm: &mut ChunkStore) {
    let mut cond_level: usize = 0;
    let mut pc = sm.head();

    while pc.is_some() {
        let starts_directive = sm.is(pc, TokenKind::Pound) && sm.is_first_on_line(pc);

        if !starts_directive {
            if let Some(chunk) = sm.get_mut(pc) {
                chunk.pp_level = cond_level;
            }
            pc = sm.next(pc);
            continue;
        }

        // Classify from the first word after the pound.
        let name = sm.next_ncnnl(pc, Scope::All);
        let dir = if sm.is(name, TokenKind::Word) || sm.is(name, TokenKind::If)
            || sm.is(name, TokenKind::Else)
        {
            directive_kind(sm.text(name))
        } else {
            TokenKind::PpOther
        };

        let directive_level = match dir {
            TokenKind::PpElse => cond_level.saturating_sub(1),
            TokenKind::PpEndif => {
                if cond_level == 0 {
                    ctx.note_error();
                    log_sev!(
                        Severity::Warn,
                        "#endif without matching #if at line {}",
                        sm.orig_line(pc)
                    );
                    0
                } else {
                    cond_level -= 1;
                    cond_level
                }
            }
            _ => cond_level,
        };

        if name.is_some() && !sm.is_newline(name) {
            sm.set_kind(name, dir);
            sm.set_parent(name, TokenKind::Pound);
        }
        sm.set_parent(pc, dir);

        // Flag the whole directive, splices included.
        let mut cur = pc;
        let mut past_name = false;
        while cur.is_some() && !sm.is(cur, TokenKind::Newline) {
            sm.add_flags(cur, PcFlags::IN_PREPROC);
            if let Some(chunk) = sm.get_mut(cur) {
                chunk.pp_level = directive_level;
            }

            if past_name && body_is_opaque(dir) && !sm.is(cur, TokenKind::NlCont) {
                sm.set_kind(cur, TokenKind::PreprocBody);
            }
            if cur == name {
                past_name = true;
            }
            cur = sm.next(cur);
        }

        if dir == TokenKind::PpDefine {
            mark_macro_name(sm, name);
        }
        if dir == TokenKind::PpIf {
            cond_level += 1;
        }
        log_sev!(
            Severity::Preproc,
            "directive {:?} at line {}, pp_level {}",
            dir,
            sm.orig_line(pc),
            directive_level
        );
        pc = cur;
    }
}

/// After `#define`, the next word is the macro name; a paren glued to it
/// makes it function-like.
fn mark_macro_name(sm: &mut ChunkStore, define_word: ChunkId) {
    let name = sm.next_ncnnl(define_word, Scope::Preproc);

    if !sm.is(name, TokenKind::Word) && !sm.is(name, TokenKind::Type) {
        return;
    }
    let after = sm.next(name);
    let glued = sm.is(after, TokenKind::ParenOpen)
        && sm.get(after).map(|c| c.orig.prev_sp) == Some(0);

    if glued {
        sm.set_kind(name, TokenKind::MacroFunc);
    } else {
        sm.set_kind(name, TokenKind::Macro);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkStore;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn framed(input: &str) -> (ChunkStore, Context) {
        let mut ctx = Context::new(Options::default(), Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        frame_preprocessor(&mut ctx, &mut sm);
        (sm, ctx)
    }

    fn find_text(sm: &ChunkStore, text: &str) -> crate::chunk::ChunkId {
        sm.ids()
            .into_iter()
            .find(|id| sm.text(*id) == text)
            .unwrap_or(crate::chunk::ChunkId::NONE)
    }

    #[test]
    fn define_is_classified_and_flagged() {
        let (sm, _) = framed("#define MAX 10\nint x;");
        let def = find_text(&sm, "define");
        assert_eq!(sm.kind(def), TokenKind::PpDefine);
        let name = find_text(&sm, "MAX");
        assert_eq!(sm.kind(name), TokenKind::Macro);
        assert!(sm.has_flags(name, PcFlags::IN_PREPROC));
        // Code after the directive is clean.
        let x = find_text(&sm, "x");
        assert!(!sm.has_flags(x, PcFlags::IN_PREPROC));
    }

    #[test]
    fn function_like_macro_needs_glued_paren() {
        let (sm, _) = framed("#define SQ(x) ((x)*(x))\n#define Y (1)\n");
        assert_eq!(sm.kind(find_text(&sm, "SQ")), TokenKind::MacroFunc);
        assert_eq!(sm.kind(find_text(&sm, "Y")), TokenKind::Macro);
    }

    #[test]
    fn conditional_depth_tracks_if_endif() {
        let (sm, ctx) = framed("#if A\nint a;\n#else\nint b;\n#endif\nint c;");
        assert_eq!(ctx.error_count, 0);
        assert_eq!(sm.pp_level(find_text(&sm, "a")), 1);
        assert_eq!(sm.pp_level(find_text(&sm, "b")), 1);
        assert_eq!(sm.pp_level(find_text(&sm, "c")), 0);
        // The #if line itself sits at the outer depth, as does #endif.
        let if_word = find_text(&sm, "if");
        assert_eq!(sm.pp_level(if_word), 0);
        let endif_word = find_text(&sm, "endif");
        assert_eq!(sm.pp_level(endif_word), 0);
    }

    #[test]
    fn continuation_keeps_directive_flagged() {
        let (sm, _) = framed("#define X 1 \\\n    + 2\nint y;");
        let plus = find_text(&sm, "+");
        assert!(sm.has_flags(plus, PcFlags::IN_PREPROC));
        let y = find_text(&sm, "y");
        assert!(!sm.has_flags(y, PcFlags::IN_PREPROC));
    }

    #[test]
    fn unmatched_endif_is_recoverable() {
        let (_, ctx) = framed("#endif\nint x;");
        assert_eq!(ctx.error_count, 1);
    }

    #[test]
    fn include_body_is_opaque() {
        let (sm, _) = framed("#include <stdio.h>\n");
        let h = find_text(&sm, "stdio");
        assert_eq!(sm.kind(h), TokenKind::PreprocBody);
    }
}
