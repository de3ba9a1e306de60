//! Star, ampersand and sign disambiguation.
//!
//! The tokenizer emits raw `Star`/`Amp`/`Minus`/`Plus`; this pass decides
//! what each occurrence means from its neighbors. The rule order is fixed;
//! when nothing matches, the answer is the arithmetic/binary reading.
//!
//! `*` resolution, first match wins:
//! 1. next is `)`               → pointer type inside a cast
//! 2. prev is a type/qualifier/pointer/reference → pointer declarator
//! 3. prev and next are identifiers → pointer declarator
//! 4. prev is `)` → multiplication
//! 5. prev is a value (number, string, literal, `]`, postfix `++`) → multiplication
//! 6. prev is an operator, opener, comma, semicolon, `return`, `=` → dereference
//! 7. otherwise → multiplication
//!
//! `&` follows the same shape with address-of in place of dereference, and
//! `&&` flips from boolean-and to an rvalue reference when it touches type
//! context.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::{Lang, PcFlags};
use crate::token::TokenKind;

fn is_value_end(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Number
            | TokenKind::NumberFp
            | TokenKind::String
            | TokenKind::CharLit
            | TokenKind::SquareClose
            | TokenKind::IncdecAfter
    )
}

fn is_operand_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Word
            | TokenKind::Type
            | TokenKind::Number
            | TokenKind::NumberFp
            | TokenKind::String
            | TokenKind::CharLit
    ) || kind.is_paren_open()
}

fn is_prefix_position(kind: TokenKind) -> bool {
    kind.is_paren_open()
        || matches!(
            kind,
            TokenKind::Assign
                | TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::Return
                | TokenKind::Arith
                | TokenKind::Shift
                | TokenKind::Compare
                | TokenKind::Bool
                | TokenKind::Caret
                | TokenKind::Not
                | TokenKind::Inv
                | TokenKind::Question
                | TokenKind::CondColon
                | TokenKind::BraceOpen
                | TokenKind::VbraceOpen
                | TokenKind::SquareOpen
                | TokenKind::Case
                | TokenKind::Colon
                | TokenKind::None
        )
}

fn is_type_context(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Type
            | TokenKind::Qualifier
            | TokenKind::Ptr
            | TokenKind::ByRef
            | TokenKind::AngleClose
            | TokenKind::Typename
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Enum
    )
}

/// Resolves every raw star/amp/sign in the stream.
pub fn resolve_stars_and_amps(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        let prev = sm.prev_ncnnl(pc, Scope::All);
        let next = sm.next_ncnnl(pc, Scope::All);
        let prev_kind = sm.kind(prev);
        let next_kind = sm.kind(next);

        match sm.kind(pc) {
            TokenKind::Star => {
                let kind = if next_kind.is_paren_close() {
                    TokenKind::Ptr
                } else if is_type_context(prev_kind) {
                    TokenKind::Ptr
                } else if prev_kind == TokenKind::Word
                    && matches!(next_kind, TokenKind::Word | TokenKind::Star)
                    && statement_starts_decl(sm, pc)
                {
                    TokenKind::Ptr
                } else if prev_kind.is_paren_close() || is_value_end(prev_kind) {
                    TokenKind::Arith
                } else if is_prefix_position(prev_kind) && is_operand_start(next_kind) {
                    TokenKind::Deref
                } else if prev_kind == TokenKind::Word {
                    TokenKind::Arith
                } else {
                    TokenKind::Arith
                };
                sm.set_kind(pc, kind);
            }
            TokenKind::Amp => {
                let kind = if is_type_context(prev_kind) {
                    TokenKind::ByRef
                } else if next_kind.is_paren_close() {
                    TokenKind::ByRef
                } else if prev_kind == TokenKind::Word
                    && next_kind == TokenKind::Word
                    && statement_starts_decl(sm, pc)
                {
                    TokenKind::ByRef
                } else if prev_kind.is_paren_close() || is_value_end(prev_kind) {
                    TokenKind::Arith
                } else if is_prefix_position(prev_kind) && is_operand_start(next_kind) {
                    TokenKind::Addr
                } else if prev_kind == TokenKind::Word {
                    TokenKind::Arith
                } else {
                    TokenKind::Arith
                };
                sm.set_kind(pc, kind);
            }
            TokenKind::Bool if sm.text(pc) == "&&" && ctx.lang.overlaps(Lang::CPP) => {
                // Rvalue reference when glued to type context or a
                // function signature close.
                if is_type_context(prev_kind) || prev_kind == TokenKind::FparenClose {
                    sm.set_kind(pc, TokenKind::ByRef);
                }
            }
            TokenKind::Minus => {
                let kind = if prev_kind.is_paren_close()
                    || is_value_end(prev_kind)
                    || prev_kind == TokenKind::Word
                {
                    TokenKind::Arith
                } else {
                    TokenKind::Neg
                };
                sm.set_kind(pc, kind);
            }
            TokenKind::Plus => {
                let kind = if prev_kind.is_paren_close()
                    || is_value_end(prev_kind)
                    || prev_kind == TokenKind::Word
                {
                    TokenKind::Arith
                } else {
                    TokenKind::Pos
                };
                sm.set_kind(pc, kind);
            }
            TokenKind::IncdecAfter => {
                let postfix = prev_kind == TokenKind::Word
                    || prev_kind.is_paren_close()
                    || prev_kind == TokenKind::SquareClose;
                if !postfix {
                    sm.set_kind(pc, TokenKind::IncdecBefore);
                }
            }
            _ => {}
        }
    }
}

/// Does the statement this chunk belongs to look like it opens with a
/// declaration (`ident * ident` at statement start)?
fn statement_starts_decl(sm: &ChunkStore, pc: ChunkId) -> bool {
    // Walk back to the statement boundary; only identifier/type material
    // may appear before the star for the declaration reading.
    let mut cur = sm.prev_ncnnl(pc, Scope::All);

    while cur.is_some() {
        if sm.has_flags(cur, PcFlags::IN_PREPROC) {
            return true; // a directive ended the previous statement
        }
        match sm.kind(cur) {
            TokenKind::Word
            | TokenKind::Type
            | TokenKind::Qualifier
            | TokenKind::DcMember
            | TokenKind::Ptr
            | TokenKind::Star => {}
            TokenKind::Semicolon
            | TokenKind::BraceOpen
            | TokenKind::BraceClose
            | TokenKind::VbraceOpen
            | TokenKind::VbraceClose
            | TokenKind::AccessColon
            | TokenKind::CaseColon => return true,
            _ => return false,
        }
        cur = sm.prev_ncnnl(cur, Scope::All);
    }
    true
}
