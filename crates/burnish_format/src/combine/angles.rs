//! Template angle-bracket disambiguation.
//!
//! A `<` opens a template when it follows something that can name a
//! template: the `template` keyword itself, a known type, or an identifier
//! directly preceded by `template`/scope context. Otherwise it stays a
//! comparison. The matching `>` is found by a small push-down scan over
//! nested parens/brackets; a `>>` that lands where a template close is
//! expected splits into two closes.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::{Lang, PcFlags};
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Retags template `<`/`>` pairs; leaves comparisons alone.
pub fn mark_templates(ctx: &mut Context, sm: &mut ChunkStore) {
    if !ctx.lang.overlaps(Lang::CPP.union(Lang::CS).union(Lang::D).union(Lang::JAVA)) {
        return;
    }
    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is(pc, TokenKind::Compare) && sm.text(pc) == "<" && opens_template(sm, pc) {
            if let Some((close, shape)) = find_template_close(sm, pc) {
                commit_template(sm, pc, close, shape);
                log_sev!(
                    Severity::Template,
                    "template angles at line {}",
                    sm.orig_line(pc)
                );
            }
        }
        pc = sm.next(pc);
    }
}

/// How the closing token serves this template.
#[derive(Clone, Copy, PartialEq)]
enum CloseShape {
    /// A lone `>`.
    Single,
    /// A `>>` whose both halves are template closes (nested template).
    ShiftBoth,
    /// A `>>` whose first half closes us; the second stays a comparison.
    ShiftFirst,
}

/// Can the token before this `<` start a template argument list?
fn opens_template(sm: &ChunkStore, lt: ChunkId) -> bool {
    let prev = sm.prev_ncnnl(lt, Scope::All);

    match sm.kind(prev) {
        // `template <...>`, `vector<...>`, `Foo::bar<...>`
        TokenKind::Template | TokenKind::Type => true,
        TokenKind::Word => {
            // An identifier opens a template when scoped (`ns::id<`) or
            // when its angle group closes cleanly over type-ish
            // arguments. `a<b>c` reads as two comparisons: the contents
            // are plain expression words.
            let before = sm.prev_ncnnl(prev, Scope::All);
            matches!(
                sm.kind(before),
                TokenKind::DcMember | TokenKind::Template | TokenKind::Typename
            ) || angle_args_look_typed(sm, lt)
        }
        TokenKind::OperatorVal => false,
        _ => false,
    }
}

/// Does the balanced `<...>` starting here hold template-argument
/// material (a type, qualifier, or nested template) rather than a plain
/// comparison expression?
fn angle_args_look_typed(sm: &ChunkStore, lt: ChunkId) -> bool {
    let Some((close, _)) = find_template_close(sm, lt) else {
        return false;
    };
    let mut cur = sm.next_ncnnl(lt, Scope::All);

    while cur.is_some() && cur != close {
        match sm.kind(cur) {
            TokenKind::Type
            | TokenKind::Qualifier
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Enum
            | TokenKind::Typename
            | TokenKind::AngleOpen
            | TokenKind::AngleClose
            | TokenKind::Ptr
            | TokenKind::ByRef => return true,
            _ => {}
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    false
}

/// Scans forward for the `>` that closes this `<`.
///
/// Parens and squares must balance inside; a semicolon, brace, or
/// end-of-statement token aborts (it was a comparison after all).
fn find_template_close(sm: &ChunkStore, lt: ChunkId) -> Option<(ChunkId, CloseShape)> {
    let mut angle_depth: usize = 0;
    let mut paren_depth: usize = 0;
    let mut cur = sm.next_ncnnl(lt, Scope::All);

    while cur.is_some() {
        let kind = sm.kind(cur);
        let text = sm.text(cur);

        match kind {
            TokenKind::Semicolon | TokenKind::BraceOpen | TokenKind::BraceClose => return None,
            TokenKind::ParenOpen | TokenKind::SparenOpen | TokenKind::FparenOpen
            | TokenKind::SquareOpen => paren_depth += 1,
            TokenKind::ParenClose | TokenKind::SparenClose | TokenKind::FparenClose
            | TokenKind::SquareClose => {
                if paren_depth == 0 {
                    return None;
                }
                paren_depth -= 1;
            }
            TokenKind::Compare if paren_depth == 0 && text == "<" => angle_depth += 1,
            TokenKind::AngleOpen if paren_depth == 0 => angle_depth += 1,
            TokenKind::Compare | TokenKind::AngleClose if paren_depth == 0 && text == ">" => {
                if angle_depth == 0 {
                    return Some((cur, CloseShape::Single));
                }
                angle_depth -= 1;
            }
            TokenKind::Shift if paren_depth == 0 && text == ">>" => {
                // `map<int, vector<int>>` — the shift may be two closes.
                if angle_depth == 0 {
                    return Some((cur, CloseShape::ShiftFirst));
                }
                angle_depth -= 1;
                if angle_depth == 0 {
                    return Some((cur, CloseShape::ShiftBoth));
                }
                angle_depth -= 1;
            }
            _ => {}
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    None
}

/// Retags the pair, splitting a `>>` close into two `>` chunks.
fn commit_template(sm: &mut ChunkStore, lt: ChunkId, close: ChunkId, shape: CloseShape) {
    sm.set_kind(lt, TokenKind::AngleOpen);
    sm.set_parent(lt, TokenKind::Template);

    let real_close = match shape {
        CloseShape::Single => {
            sm.set_kind(close, TokenKind::AngleClose);
            close
        }
        CloseShape::ShiftBoth | CloseShape::ShiftFirst => {
            sm.set_kind(close, TokenKind::AngleClose);
            sm.set_text(close, ">");
            let second = sm.copy_and_add_after(close, close);
            sm.set_text(second, ">");
            if let Some(chunk) = sm.get_mut(second) {
                chunk.orig.col += 1;
                chunk.orig.prev_sp = 0;
                chunk.column += 1;
            }
            if shape == CloseShape::ShiftBoth {
                // Second half closes the outer template: it is ours; the
                // first half gets claimed by the nested open later.
                sm.set_kind(second, TokenKind::AngleClose);
                second
            } else {
                sm.set_kind(second, TokenKind::Compare);
                close
            }
        }
    };
    sm.set_parent(real_close, TokenKind::Template);

    // Flag the span; the inner retag pass sees IN_TEMPLATE.
    let mut cur = lt;
    loop {
        sm.add_flags(cur, PcFlags::IN_TEMPLATE);
        if cur == real_close {
            break;
        }
        cur = sm.next(cur);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn combined(input: &str) -> ChunkStore {
        let mut ctx = Context::new(Options::default(), Lang::CPP);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        mark_templates(&mut ctx, &mut sm);
        sm
    }

    fn kinds_of(sm: &ChunkStore, text: &str) -> Vec<TokenKind> {
        sm.ids()
            .into_iter()
            .filter(|id| sm.text(*id) == text)
            .map(|id| sm.kind(id))
            .collect()
    }

    #[test]
    fn typed_arguments_open_a_template() {
        let sm = combined("vector<int> v;");
        assert_eq!(kinds_of(&sm, "<"), vec![TokenKind::AngleOpen]);
        assert_eq!(kinds_of(&sm, ">"), vec![TokenKind::AngleClose]);
    }

    #[test]
    fn scoped_names_open_a_template() {
        let sm = combined("std::vector<T> v;");
        assert_eq!(kinds_of(&sm, "<"), vec![TokenKind::AngleOpen]);
        assert_eq!(kinds_of(&sm, ">"), vec![TokenKind::AngleClose]);
    }

    #[test]
    fn bare_comparison_stays_comparison() {
        let sm = combined("a<b>c;");
        assert_eq!(kinds_of(&sm, "<"), vec![TokenKind::Compare]);
        assert_eq!(kinds_of(&sm, ">"), vec![TokenKind::Compare]);
    }

    #[test]
    fn template_keyword_always_opens() {
        let sm = combined("template<typename T> struct S;");
        assert_eq!(kinds_of(&sm, "<"), vec![TokenKind::AngleOpen]);
    }

    #[test]
    fn shift_close_splits_into_two() {
        let sm = combined("std::map<int, std::vector<int>> m;");
        let closes = kinds_of(&sm, ">");
        assert_eq!(closes, vec![TokenKind::AngleClose, TokenKind::AngleClose]);
        assert!(kinds_of(&sm, ">>").is_empty());
    }

    #[test]
    fn comparison_with_shift_is_untouched() {
        let sm = combined("x = a >> 2;");
        assert_eq!(kinds_of(&sm, ">>"), vec![TokenKind::Shift]);
    }
}
