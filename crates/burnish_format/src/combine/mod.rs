//! Context-sensitive re-tagging.
//!
//! The combiner turns the tokenizer's raw view into roles: which `(` is a
//! function call versus a cast versus a control-statement paren, which `*`
//! is a pointer declarator, where templates open and close, which words
//! define variables. It runs once, after levels are first assigned; the
//! session re-runs the level analyzer afterwards because retagging can
//! introduce openers (template angles, virtual braces) and move chunks
//! (loop canonicalization).
//!
//! Sub-passes, in order:
//!
//! 1. template angles ([`angles`])
//! 2. control-statement parens and virtual braces
//! 3. construct braces (class/struct/union/enum/namespace) and base lists
//! 4. paren classification (def/proto/call/ctor-var/cast/sizeof/...)
//! 5. star/amp resolution ([`ptr_ref`])
//! 6. operators, trailing returns, case/label colons
//! 7. variable-definition marking ([`var_def`])
//! 8. ternary chains ([`question_colon`]), parameter packs
//!    ([`parameter_pack`])
//! 9. cleanups: enum trailing comma, infinite-loop canonicalization
//!
//! A `(` that defies classification keeps its generic kind; downstream
//! passes then skip it (no alignment, default spacing).

pub mod angles;
pub mod enum_cleanup;
pub mod infinite_loops;
pub mod parameter_pack;
pub mod ptr_ref;
pub mod question_colon;
pub mod var_def;

use crate::chunk::{Chunk, ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::levels;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Runs every combiner sub-pass.
pub fn combine(ctx: &mut Context, sm: &mut ChunkStore) {
    angles::mark_templates(ctx, sm);
    mark_control_parens(sm);
    // Do-bodies first: once every do-body is braced (for real or
    // virtually), the tail `while` is identifiable and must not get
    // braces of its own.
    insert_virtual_braces(ctx, sm, &[TokenKind::Do]);
    mark_do_while(sm);
    insert_virtual_braces(
        ctx,
        sm,
        &[
            TokenKind::If,
            TokenKind::For,
            TokenKind::While,
            TokenKind::Switch,
            TokenKind::Else,
        ],
    );
    // Angles and virtual braces changed the nesting; refresh levels before
    // the level-sensitive passes below.
    levels::assign_levels(ctx, sm);
    mark_construct_braces(sm);
    classify_parens(ctx, sm);
    flag_function_regions(sm);
    levels::flag_paren_regions(sm);
    ptr_ref::resolve_stars_and_amps(ctx, sm);
    mark_operator_values(sm);
    mark_trailing_returns(sm);
    mark_colon_roles(sm);
    mark_braced_init_lists(sm);
    var_def::mark_variable_definitions(ctx, sm);
    question_colon::mark_question_colons(ctx, sm);
    parameter_pack::propagate_parameter_packs(ctx, sm);
    enum_cleanup::cleanup_enum_commas(ctx, sm);
    infinite_loops::rewrite_infinite_loops(ctx, sm);
    log_sev!(Severity::ParseCleanup, "combine finished, {} changes", ctx.changes);
}

fn control_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::If
            | TokenKind::For
            | TokenKind::While
            | TokenKind::WhileOfDo
            | TokenKind::Switch
            | TokenKind::Catch
    )
}

/// `(` after a control keyword becomes a statement paren.
fn mark_control_parens(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        let kind = sm.kind(pc);

        if !control_keyword(kind) {
            continue;
        }
        let open = sm.next_ncnnl(pc, Scope::All);

        if !sm.is(open, TokenKind::ParenOpen) {
            continue;
        }
        let close = sm.closing_match(open);
        sm.set_kind(open, TokenKind::SparenOpen);
        sm.set_parent(open, kind);

        if close.is_some() {
            sm.set_kind(close, TokenKind::SparenClose);
            sm.set_parent(close, kind);

            // A braced body belongs to the statement.
            let body = sm.next_ncnnl(close, Scope::All);
            if sm.is(body, TokenKind::BraceOpen) {
                sm.set_parent(body, kind);
                sm.set_parent(sm.closing_match(body), kind);
            }
        }
    }

    // Bodies that follow their keyword directly.
    let ids = sm.ids();
    for pc in ids {
        let kind = sm.kind(pc);

        if !matches!(
            kind,
            TokenKind::Else | TokenKind::Do | TokenKind::Try | TokenKind::Finally
        ) {
            continue;
        }
        let body = sm.next_ncnnl(pc, Scope::All);

        if sm.is(body, TokenKind::BraceOpen) {
            sm.set_parent(body, kind);
            sm.set_parent(sm.closing_match(body), kind);
        }
    }
}

/// Wraps unbraced control bodies in virtual braces.
fn insert_virtual_braces(ctx: &mut Context, sm: &mut ChunkStore, keywords: &[TokenKind]) {
    let ids = sm.ids();

    for pc in ids {
        let kind = sm.kind(pc);

        if !keywords.contains(&kind) {
            continue;
        }
        let anchor = match kind {
            TokenKind::If | TokenKind::For | TokenKind::While | TokenKind::Switch => {
                let open = sm.next_ncnnl(pc, Scope::All);
                if !sm.is(open, TokenKind::SparenOpen) {
                    continue;
                }
                let close = sm.closing_match(open);
                if close.is_none() {
                    continue;
                }
                close
            }
            TokenKind::Else => {
                // `else if` chains share the if's body.
                let next = sm.next_ncnnl(pc, Scope::All);
                if sm.is(next, TokenKind::If) {
                    continue;
                }
                pc
            }
            TokenKind::Do => pc,
            _ => continue,
        };
        let body = sm.next_ncnnl(anchor, Scope::All);

        if body.is_none()
            || sm.kind(body).is_brace_open()
            || sm.is(body, TokenKind::BraceClose)
        {
            continue;
        }
        let end = match statement_end(sm, body) {
            Some(end) => end,
            None => continue,
        };

        let mut vopen = Chunk::new("", TokenKind::VbraceOpen);
        vopen.parent = kind;
        vopen.orig = match sm.get(body) {
            Some(c) => c.orig,
            None => Default::default(),
        };
        vopen.column = sm.column(body);
        sm.insert_before(body, vopen);

        let mut vclose = Chunk::new("", TokenKind::VbraceClose);
        vclose.parent = kind;
        vclose.orig = match sm.get(end) {
            Some(c) => c.orig,
            None => Default::default(),
        };
        vclose.column = sm.end_column(end);
        sm.insert_after(end, vclose);
        ctx.mark_change();
    }
}

/// Finds the chunk that ends the single statement starting at `start`.
fn statement_end(sm: &ChunkStore, start: ChunkId) -> Option<ChunkId> {
    let mut depth: usize = 0;
    let mut cur = start;

    while cur.is_some() {
        let kind = sm.kind(cur);

        if kind.is_opener() {
            depth += 1;
        } else if kind.is_closer() {
            if depth == 0 {
                return None; // ran out of our enclosing scope
            }
            depth -= 1;

            if depth == 0 && kind.is_brace_close() {
                return Some(cur);
            }
        } else if kind == TokenKind::Semicolon && depth == 0 {
            return Some(cur);
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    None
}

/// Retags the `while` that terminates a do-body.
fn mark_do_while(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        if !sm.is(pc, TokenKind::Do) {
            continue;
        }
        let body = sm.next_ncnnl(pc, Scope::All);

        if !sm.kind(body).is_brace_open() {
            continue;
        }
        let close = sm.closing_match(body);
        let tail = sm.next_ncnnl(close, Scope::All);

        if sm.is(tail, TokenKind::While) {
            sm.set_kind(tail, TokenKind::WhileOfDo);
            // The sparen keeps its shape; reparent it to the do-while tail.
            let open = sm.next_ncnnl(tail, Scope::All);
            if sm.is(open, TokenKind::SparenOpen) {
                sm.set_parent(open, TokenKind::WhileOfDo);
                let sclose = sm.closing_match(open);
                sm.set_parent(sclose, TokenKind::WhileOfDo);
            }
            sm.set_parent(body, TokenKind::Do);
            sm.set_parent(close, TokenKind::Do);
        }
    }
}

/// Braces of class/struct/union/enum/namespace get their construct parent;
/// base lists and enum bodies get their region flags.
fn mark_construct_braces(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        let kw = sm.kind(pc);

        if !matches!(
            kw,
            TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Union
                | TokenKind::Enum
                | TokenKind::Namespace
        ) {
            continue;
        }
        let mut construct = kw;
        let mut cur = sm.next_ncnnl(pc, Scope::All);

        // `enum class Name` / `enum struct Name`
        if kw == TokenKind::Enum
            && matches!(sm.kind(cur), TokenKind::Class | TokenKind::Struct)
        {
            construct = TokenKind::EnumClass;
            cur = sm.next_ncnnl(cur, Scope::All);
        }

        // Optional name; a named tag is a type.
        if matches!(sm.kind(cur), TokenKind::Word) {
            sm.set_kind(cur, TokenKind::Type);
            cur = sm.next_ncnnl(cur, Scope::All);
        } else if matches!(sm.kind(cur), TokenKind::Type) {
            cur = sm.next_ncnnl(cur, Scope::All);
        }

        // Base-specifier list or enum underlying type.
        if sm.is(cur, TokenKind::Colon) {
            sm.set_kind(cur, TokenKind::ClassColon);
            sm.set_parent(cur, construct);

            while cur.is_some()
                && !sm.is(cur, TokenKind::BraceOpen)
                && !sm.is(cur, TokenKind::Semicolon)
            {
                sm.add_flags(cur, PcFlags::IN_CLASS_BASE);
                cur = sm.next_ncnnl(cur, Scope::All);
            }
        }

        if !sm.is(cur, TokenKind::BraceOpen) {
            continue; // forward declaration or pointer use
        }
        let close = sm.closing_match(cur);
        let enum_like = matches!(construct, TokenKind::Enum | TokenKind::EnumClass);
        sm.set_parent(cur, construct);
        sm.set_parent(close, construct);

        if enum_like {
            let mut inner = cur;
            while inner.is_some() {
                sm.add_flags(inner, PcFlags::IN_ENUM);
                if inner == close {
                    break;
                }
                inner = sm.next(inner);
            }
        }
    }
}

fn is_decl_context_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Type
            | TokenKind::Qualifier
            | TokenKind::Word
            | TokenKind::Ptr
            | TokenKind::Star
            | TokenKind::ByRef
            | TokenKind::Amp
            | TokenKind::DcMember
            | TokenKind::AngleClose
            | TokenKind::Friend
            | TokenKind::Extern
    )
}

/// Classifies every remaining generic `(`.
fn classify_parens(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for open in ids {
        if !sm.is(open, TokenKind::ParenOpen) {
            continue;
        }
        let prev = sm.prev_ncnnl(open, Scope::All);
        let prev_kind = sm.kind(prev);
        let close = sm.closing_match(open);

        match prev_kind {
            TokenKind::Sizeof => {
                sm.set_parent(open, TokenKind::Sizeof);
                sm.set_parent(close, TokenKind::Sizeof);
            }
            TokenKind::Decltype => {
                sm.set_parent(open, TokenKind::Decltype);
                sm.set_parent(close, TokenKind::Decltype);
            }
            TokenKind::MacroFunc => {
                retag_fparens(sm, open, close, TokenKind::MacroFunc);
            }
            TokenKind::OperatorVal => {
                retag_fparens(sm, open, close, TokenKind::OperatorVal);
            }
            TokenKind::Word | TokenKind::Type | TokenKind::FuncCall => {
                classify_named_paren(ctx, sm, open, close, prev);
            }
            TokenKind::ParenClose | TokenKind::FparenClose | TokenKind::SquareClose => {
                // `(*fp)(a)`, `arr[i](x)` — call through a value.
                retag_fparens(sm, open, close, TokenKind::FuncCall);
            }
            _ => {
                if looks_like_cast(sm, open, close) {
                    sm.set_parent(open, TokenKind::Cast);
                    sm.set_parent(close, TokenKind::Cast);
                    log_sev!(
                        Severity::Casts,
                        "cast parens at line {}",
                        sm.orig_line(open)
                    );
                }
                // otherwise: generic grouping, leave untouched
            }
        }
    }
}

fn retag_fparens(sm: &mut ChunkStore, open: ChunkId, close: ChunkId, role: TokenKind) {
    sm.set_kind(open, TokenKind::FparenOpen);
    sm.set_parent(open, role);

    if close.is_some() {
        sm.set_kind(close, TokenKind::FparenClose);
        sm.set_parent(close, role);
    }
}

/// The `word (` shape: definition, prototype, call, or ctor-style var.
fn classify_named_paren(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    open: ChunkId,
    close: ChunkId,
    word: ChunkId,
) {
    let before = sm.prev_ncnnl(word, Scope::All);
    let class_scope = in_class_body(sm, word);
    let decl_ctx = is_decl_context_kind(sm.kind(before))
        || (class_scope
            && matches!(
                sm.kind(before),
                TokenKind::BraceOpen
                    | TokenKind::Semicolon
                    | TokenKind::AccessColon
                    | TokenKind::Inv
            ));
    let mut after = sm.next_ncnnl(close, Scope::All);

    // Skip trailing cv-qualifiers and ref-qualifiers of a signature.
    while matches!(sm.kind(after), TokenKind::Qualifier | TokenKind::ByRef) {
        after = sm.next_ncnnl(after, Scope::All);
    }
    let after_kind = sm.kind(after);

    let role = if after_kind == TokenKind::BraceOpen || after_kind == TokenKind::Colon {
        // A body or a constructor initializer list follows.
        let mut body = after;

        if after_kind == TokenKind::Colon {
            sm.set_kind(after, TokenKind::ClassColon);
            let mut cur = after;
            while cur.is_some() && !sm.is(cur, TokenKind::BraceOpen) {
                sm.add_flags(cur, PcFlags::IN_CONST_ARGS);
                cur = sm.next_ncnnl(cur, Scope::All);
            }
            body = cur;
        }

        if sm.is(body, TokenKind::BraceOpen) {
            let role = if class_scope {
                TokenKind::FuncClassDef
            } else {
                TokenKind::FuncDef
            };
            sm.set_parent(body, role);
            sm.set_parent(sm.closing_match(body), role);
        }
        TokenKind::FuncDef
    } else if decl_ctx && matches!(after_kind, TokenKind::Semicolon | TokenKind::Comma) {
        if parens_hold_only_values(sm, open, close) && sm.brace_level(word) > 0 {
            TokenKind::FuncCtorVar
        } else {
            TokenKind::FuncProto
        }
    } else if decl_ctx && after_kind == TokenKind::Assign {
        // `= 0`, `= delete`, `= default` on a declaration.
        let rhs = sm.next_ncnnl(after, Scope::All);
        let text = sm.text(rhs);
        if text == "0" || text == "delete" || text == "default" {
            sm.set_kind(after, TokenKind::AssignFuncProto);
            TokenKind::FuncProto
        } else {
            TokenKind::FuncCall
        }
    } else {
        TokenKind::FuncCall
    };

    // Members of a class body carry the class-scoped roles.
    let role = match (role, class_scope) {
        (TokenKind::FuncDef, true) => TokenKind::FuncClassDef,
        (TokenKind::FuncProto, true) => TokenKind::FuncClassProto,
        (other, _) => other,
    };
    retag_fparens(sm, open, close, role);

    match role {
        TokenKind::FuncDef | TokenKind::FuncClassDef => sm.set_kind(word, role),
        TokenKind::FuncProto | TokenKind::FuncClassProto => sm.set_kind(word, role),
        TokenKind::FuncCtorVar => {
            sm.add_flags(word, PcFlags::VAR_DEF | PcFlags::VAR_FIRST);
        }
        _ => {
            if sm.is(word, TokenKind::Word) {
                sm.set_kind(word, TokenKind::FuncCall);
            }
        }
    }
    if role == TokenKind::FuncDef {
        log_sev!(
            Severity::FuncDetect,
            "function definition '{}' at line {}",
            sm.text(word),
            sm.orig_line(word)
        );
    }
    ctx.mark_change();
}

/// Is this chunk directly inside a class/struct/union body?
fn in_class_body(sm: &ChunkStore, pc: ChunkId) -> bool {
    let level = sm.level(pc);

    if level == 0 {
        return false;
    }
    let encl = sm.prev_of_kind(pc, TokenKind::BraceOpen, Some(level - 1));
    matches!(
        sm.parent(encl),
        TokenKind::Class | TokenKind::Struct | TokenKind::Union
    )
}

/// True when the parens carry only value-ish tokens (ctor-var shape).
fn parens_hold_only_values(sm: &ChunkStore, open: ChunkId, close: ChunkId) -> bool {
    let mut cur = sm.next_ncnnl(open, Scope::All);
    let mut any = false;

    while cur.is_some() && cur != close {
        match sm.kind(cur) {
            TokenKind::Number
            | TokenKind::NumberFp
            | TokenKind::String
            | TokenKind::CharLit
            | TokenKind::Word
            | TokenKind::Comma => any = true,
            _ => return false,
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    any
}

/// `(type-tokens) operand` — a C-style cast.
fn looks_like_cast(sm: &ChunkStore, open: ChunkId, close: ChunkId) -> bool {
    if close.is_none() {
        return false;
    }
    let mut cur = sm.next_ncnnl(open, Scope::All);
    let mut saw_type = false;
    let mut any = false;

    while cur.is_some() && cur != close {
        match sm.kind(cur) {
            TokenKind::Type | TokenKind::Qualifier | TokenKind::Struct | TokenKind::Union
            | TokenKind::Enum => saw_type = true,
            TokenKind::Star | TokenKind::Ptr => saw_type = true,
            TokenKind::Word | TokenKind::DcMember | TokenKind::AngleOpen
            | TokenKind::AngleClose | TokenKind::SquareOpen | TokenKind::SquareClose
            | TokenKind::ByRef | TokenKind::Amp => {}
            _ => return false,
        }
        any = true;
        cur = sm.next_ncnnl(cur, Scope::All);
    }

    if !any || !saw_type {
        return false;
    }
    let after = sm.next_ncnnl(close, Scope::All);
    matches!(
        sm.kind(after),
        TokenKind::Word
            | TokenKind::Type
            | TokenKind::Number
            | TokenKind::NumberFp
            | TokenKind::String
            | TokenKind::CharLit
            | TokenKind::ParenOpen
            | TokenKind::Amp
            | TokenKind::Star
            | TokenKind::Not
            | TokenKind::Inv
    )
}

/// Flags the regions between function parens.
fn flag_function_regions(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for open in ids {
        if !sm.is(open, TokenKind::FparenOpen) {
            continue;
        }
        let flag = match sm.parent(open) {
            TokenKind::FuncDef | TokenKind::FuncClassDef | TokenKind::FuncProto
            | TokenKind::FuncClassProto | TokenKind::OperatorVal => PcFlags::IN_FCN_DEF,
            TokenKind::FuncCall | TokenKind::FuncCallUser | TokenKind::FuncCtorVar
            | TokenKind::MacroFunc => PcFlags::IN_FCN_CALL,
            _ => continue,
        };
        let close = sm.closing_match(open);
        let mut cur = open;

        while cur.is_some() {
            sm.add_flags(cur, flag);
            if cur == close {
                break;
            }
            cur = sm.next(cur);
        }
    }
}

/// The token spelled after `operator` is the operator's value.
fn mark_operator_values(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        if !sm.is(pc, TokenKind::Operator) {
            continue;
        }
        let val = sm.next_ncnnl(pc, Scope::All);

        if val.is_none() {
            continue;
        }
        sm.set_kind(val, TokenKind::OperatorVal);
        sm.set_parent(val, TokenKind::Operator);

        // `operator()` spells two tokens.
        let next = sm.next_ncnnl(val, Scope::All);
        if sm.text(val) == "(" && sm.text(next) == ")" {
            sm.set_kind(next, TokenKind::OperatorVal);
            sm.set_parent(next, TokenKind::Operator);
        }
    }
}

/// `) -> type` after a signature is a trailing return, not member access.
fn mark_trailing_returns(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        if !sm.is(pc, TokenKind::Member) || sm.text(pc) != "->" {
            continue;
        }
        let mut prev = sm.prev_ncnnl(pc, Scope::All);

        while matches!(sm.kind(prev), TokenKind::Qualifier | TokenKind::ByRef) {
            prev = sm.prev_ncnnl(prev, Scope::All);
        }

        if sm.is(prev, TokenKind::FparenClose)
            && matches!(
                sm.parent(prev),
                TokenKind::FuncDef | TokenKind::FuncProto | TokenKind::OperatorVal
            )
        {
            sm.set_kind(pc, TokenKind::TrailingReturn);
        }
    }
}

/// Braces after `=` (and braces nested inside such braces) form
/// initializer lists, not scopes.
fn mark_braced_init_lists(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for open in ids {
        if !sm.is(open, TokenKind::BraceOpen) || sm.parent(open) != TokenKind::None {
            continue;
        }
        let prev = sm.prev_ncnnl(open, Scope::All);
        let prev_kind = sm.kind(prev);

        let is_init = match prev_kind {
            TokenKind::Assign => true,
            TokenKind::BraceOpen => sm.parent(prev) == TokenKind::BracedInit,
            TokenKind::Comma => {
                // A row separator inside an init list already marked.
                let level = sm.level(prev);
                let encl =
                    sm.prev_of_kind(prev, TokenKind::BraceOpen, Some(level.saturating_sub(1)));
                level > 0 && sm.parent(encl) == TokenKind::BracedInit
            }
            _ => false,
        };

        if !is_init {
            continue;
        }
        sm.set_parent(open, TokenKind::BracedInit);
        let close = sm.closing_match(open);
        sm.set_parent(close, TokenKind::BracedInit);
    }
}

/// Case colons, access colons, labels, bitfields, range-for colons.
fn mark_colon_roles(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        match sm.kind(pc) {
            TokenKind::Case => {
                let colon = sm.next_of_kind(pc, TokenKind::Colon, Some(sm.level(pc)));
                if colon.is_some() {
                    sm.set_kind(colon, TokenKind::CaseColon);
                    sm.set_parent(colon, TokenKind::Case);
                }
            }
            TokenKind::Default => {
                let colon = sm.next_ncnnl(pc, Scope::All);
                if sm.is(colon, TokenKind::Colon) {
                    sm.set_kind(colon, TokenKind::CaseColon);
                    sm.set_parent(colon, TokenKind::Case);
                }
            }
            TokenKind::Access => {
                let colon = sm.next_ncnnl(pc, Scope::All);
                if sm.is(colon, TokenKind::Colon) {
                    sm.set_kind(colon, TokenKind::AccessColon);
                    sm.set_parent(colon, TokenKind::Access);
                }
            }
            TokenKind::Colon => {
                let prev = sm.prev_ncnnl(pc, Scope::All);
                let next = sm.next_ncnnl(pc, Scope::All);

                if sm.has_flags(pc, PcFlags::IN_FOR) {
                    sm.set_kind(pc, TokenKind::ForColon);
                } else if sm.is(prev, TokenKind::Word)
                    && matches!(sm.kind(next), TokenKind::Number)
                    && matches!(
                        sm.kind(sm.prev_ncnnl(prev, Scope::All)),
                        TokenKind::Type | TokenKind::Qualifier
                    )
                {
                    sm.set_kind(pc, TokenKind::BitColon);
                } else if sm.is(prev, TokenKind::Word)
                    && sm.brace_level(pc) >= 1
                    && matches!(
                        sm.kind(sm.prev_ncnnl(prev, Scope::All)),
                        TokenKind::Semicolon
                            | TokenKind::BraceOpen
                            | TokenKind::BraceClose
                            | TokenKind::VbraceOpen
                            | TokenKind::VbraceClose
                            | TokenKind::None
                    )
                    && sm.is_first_on_line(prev)
                {
                    sm.set_kind(prev, TokenKind::Label);
                    sm.set_kind(pc, TokenKind::LabelColon);
                    sm.set_parent(pc, TokenKind::Label);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn combined(input: &str, lang: Lang) -> (ChunkStore, Context) {
        let mut ctx = Context::new(Options::default(), lang);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        combine(&mut ctx, &mut sm);
        (sm, ctx)
    }

    fn find(sm: &ChunkStore, text: &str) -> ChunkId {
        sm.ids()
            .into_iter()
            .find(|id| sm.text(*id) == text)
            .unwrap_or(ChunkId::NONE)
    }

    fn kinds_of(sm: &ChunkStore, text: &str) -> Vec<TokenKind> {
        sm.ids()
            .into_iter()
            .filter(|id| sm.text(*id) == text)
            .map(|id| sm.kind(id))
            .collect()
    }

    #[test]
    fn control_paren_is_sparen_with_keyword_parent() {
        let (sm, _) = combined("if (x) { y(); }", Lang::C);
        let open = find(&sm, "(");
        assert_eq!(sm.kind(open), TokenKind::SparenOpen);
        assert_eq!(sm.parent(open), TokenKind::If);
    }

    #[test]
    fn unbraced_if_body_gets_virtual_braces() {
        let (sm, _) = combined("if (x) return 0;", Lang::C);
        let k: Vec<TokenKind> = sm.ids().iter().map(|id| sm.kind(*id)).collect();
        assert!(k.contains(&TokenKind::VbraceOpen));
        assert!(k.contains(&TokenKind::VbraceClose));
        // The vbrace close lands after the semicolon.
        let vc = sm
            .ids()
            .into_iter()
            .find(|id| sm.is(*id, TokenKind::VbraceClose))
            .unwrap();
        assert_eq!(sm.kind(sm.prev(vc)), TokenKind::Semicolon);
    }

    #[test]
    fn braced_body_gets_no_virtual_braces() {
        let (sm, _) = combined("if (x) { return 0; }", Lang::C);
        let k: Vec<TokenKind> = sm.ids().iter().map(|id| sm.kind(*id)).collect();
        assert!(!k.contains(&TokenKind::VbraceOpen));
    }

    #[test]
    fn function_definition_and_call() {
        let (sm, _) = combined("void f(int a) { g(a); }", Lang::C);
        assert_eq!(sm.kind(find(&sm, "f")), TokenKind::FuncDef);
        assert_eq!(sm.kind(find(&sm, "g")), TokenKind::FuncCall);
        let opens = kinds_of(&sm, "(");
        assert_eq!(opens, vec![TokenKind::FparenOpen, TokenKind::FparenOpen]);
    }

    #[test]
    fn prototype_versus_call() {
        let (sm, _) = combined("int foo(void);", Lang::C);
        assert_eq!(sm.kind(find(&sm, "foo")), TokenKind::FuncProto);
    }

    #[test]
    fn deleted_function_gets_proto_assign() {
        let (sm, _) = combined("struct S { S(const S &) = delete; };", Lang::CPP);
        assert!(kinds_of(&sm, "=").contains(&TokenKind::AssignFuncProto));
    }

    #[test]
    fn cast_parens_get_cast_parent() {
        let (sm, _) = combined("x = (int *) p;", Lang::C);
        let open = find(&sm, "(");
        assert_eq!(sm.parent(open), TokenKind::Cast);
    }

    #[test]
    fn do_while_tail_is_retagged() {
        let (sm, _) = combined("do { x(); } while (1);", Lang::C);
        assert_eq!(sm.kind(find(&sm, "while")), TokenKind::WhileOfDo);
    }

    #[test]
    fn enum_body_is_flagged() {
        let (sm, _) = combined("enum color { RED = 1, BLUE = 2 };", Lang::C);
        let red = find(&sm, "RED");
        assert!(sm.has_flags(red, PcFlags::IN_ENUM));
        let open = find(&sm, "{");
        assert_eq!(sm.parent(open), TokenKind::Enum);
    }

    #[test]
    fn class_base_list_is_flagged() {
        let (sm, _) = combined("class D : public B { };", Lang::CPP);
        let b = find(&sm, "B");
        assert!(sm.has_flags(b, PcFlags::IN_CLASS_BASE));
        assert_eq!(sm.kind(find(&sm, ":")), TokenKind::ClassColon);
    }

    #[test]
    fn sparen_regions_carry_for_flag() {
        let (sm, _) = combined("for (i = 0; i < 3; i++) x();", Lang::C);
        let i = find(&sm, "i");
        assert!(sm.has_flags(i, PcFlags::IN_FOR));
        assert!(sm.has_flags(i, PcFlags::IN_SPAREN));
    }

    #[test]
    fn fcn_call_region_flagged() {
        let (sm, _) = combined("void f(void) { g(a, b); }", Lang::C);
        let a = find(&sm, "a");
        assert!(sm.has_flags(a, PcFlags::IN_FCN_CALL));
    }

    #[test]
    fn label_and_case_colons() {
        let (sm, _) = combined(
            "void f(int c) {\nagain:\n  switch (c) { case 1: break; default: break; }\n  goto again;\n}",
            Lang::C,
        );
        assert_eq!(sm.kind(find(&sm, "again")), TokenKind::Label);
        assert!(kinds_of(&sm, ":").contains(&TokenKind::LabelColon));
        assert!(kinds_of(&sm, ":").contains(&TokenKind::CaseColon));
    }

    #[test]
    fn scenario_template_versus_comparison() {
        let (sm, _) = combined("a<b>c;", Lang::CPP);
        assert_eq!(kinds_of(&sm, "<"), vec![TokenKind::Compare]);
        assert_eq!(kinds_of(&sm, ">"), vec![TokenKind::Compare]);

        let (sm, _) = combined("vector<int> v;", Lang::CPP);
        assert_eq!(kinds_of(&sm, "<"), vec![TokenKind::AngleOpen]);
        assert_eq!(kinds_of(&sm, ">"), vec![TokenKind::AngleClose]);
        let v = find(&sm, "v");
        assert!(sm.has_flags(v, PcFlags::VAR_DEF));
        assert!(sm.has_flags(v, PcFlags::VAR_FIRST));
    }
}
