//! Variable-definition marking.
//!
//! Scans statement heads for the shape
//! `type-tokens (*|&)* ident ([..])? (= init | : width)? (, more-idents)* ;`
//! and marks the first identifier as the defining occurrence of a group,
//! subsequent comma-shared identifiers as inline members. Parameter names
//! inside function signatures are marked as definitions too.
//!
//! Words standing in type position get retyped to `Type` on the way, so
//! later passes (alignment star-styles, casts) see them correctly.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Kinds that may make up the type part of a declaration.
fn is_type_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Type
            | TokenKind::Qualifier
            | TokenKind::Word
            | TokenKind::DcMember
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Enum
            | TokenKind::Typename
    )
}

fn is_declarator_mod(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ptr | TokenKind::Star | TokenKind::ByRef | TokenKind::Amp
    )
}

/// Statement boundaries where a declaration may start.
fn is_statement_boundary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::None
            | TokenKind::Semicolon
            | TokenKind::BraceOpen
            | TokenKind::BraceClose
            | TokenKind::VbraceOpen
            | TokenKind::VbraceClose
            | TokenKind::AccessColon
            | TokenKind::CaseColon
            | TokenKind::LabelColon
    )
}

/// Marks variable definitions stream-wide.
pub fn mark_variable_definitions(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for pc in ids {
        if sm.has_flags(pc, PcFlags::IN_PREPROC) {
            continue;
        }
        let prev = sm.prev_ncnnl(pc, Scope::All);

        // A directive end is a statement boundary too.
        if !is_statement_boundary(sm.kind(prev)) && !sm.has_flags(prev, PcFlags::IN_PREPROC) {
            continue;
        }

        if is_type_token(sm.kind(pc)) {
            try_mark_declaration(ctx, sm, pc);
        }
    }
    mark_parameter_names(sm);
}

/// Attempts to parse one declaration starting at `start`.
fn try_mark_declaration(ctx: &mut Context, sm: &mut ChunkStore, start: ChunkId) {
    let mut type_tokens: Vec<ChunkId> = Vec::new();
    let mut cur = start;

    // Collect the type part: words, qualifiers, scope chains, one template
    // argument group.
    loop {
        let kind = sm.kind(cur);

        if is_type_token(kind) {
            type_tokens.push(cur);
            cur = sm.next_ncnnl(cur, Scope::All);
        } else if kind == TokenKind::AngleOpen {
            let close = sm.closing_match(cur);
            if close.is_none() {
                return;
            }
            cur = sm.next_ncnnl(close, Scope::All);
        } else {
            break;
        }
    }

    if type_tokens.is_empty() {
        return;
    }

    // Declarator modifiers then the defining identifier.
    let mut decl = cur;
    while is_declarator_mod(sm.kind(decl)) {
        decl = sm.next_ncnnl(decl, Scope::All);
    }

    // The candidate identifier is the last collected word when the
    // modifiers consumed nothing and the chain ended on punctuation.
    let (name, tail) = if decl != cur || !type_tokens.is_empty() {
        if sm.is(decl, TokenKind::Word) {
            (decl, sm.next_ncnnl(decl, Scope::All))
        } else if decl == cur && type_tokens.len() >= 2 {
            // `int x;` walks the name into the type list; pull it back out.
            let name = *type_tokens.last().unwrap();
            if !sm.is(name, TokenKind::Word) {
                return;
            }
            type_tokens.pop();
            (name, cur)
        } else {
            return;
        }
    } else {
        return;
    };

    // What follows decides whether this was a definition at all.
    if !matches!(
        sm.kind(tail),
        TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::Assign
            | TokenKind::SquareOpen
            | TokenKind::Tsquare
            | TokenKind::BitColon
            | TokenKind::BraceOpen
    ) {
        return;
    }

    // Words in type position are types.
    for id in &type_tokens {
        if sm.is(*id, TokenKind::Word) {
            sm.set_kind(*id, TokenKind::Type);
        }
    }
    sm.add_flags(name, PcFlags::VAR_DEF | PcFlags::VAR_FIRST);
    log_sev!(
        Severity::VarDefMark,
        "variable '{}' defined at line {}",
        sm.text(name),
        sm.orig_line(name)
    );
    ctx.mark_change();

    // Walk the rest of the group: `, ident` repeats share the type.
    let mut cur = tail;
    let level = sm.level(name);

    while cur.is_some() {
        let kind = sm.kind(cur);

        if kind == TokenKind::Semicolon && sm.level(cur) == level {
            break;
        }

        if kind == TokenKind::Comma && sm.level(cur) == level {
            let mut next = sm.next_ncnnl(cur, Scope::All);
            while is_declarator_mod(sm.kind(next)) {
                next = sm.next_ncnnl(next, Scope::All);
            }
            if sm.is(next, TokenKind::Word) {
                sm.add_flags(next, PcFlags::VAR_DEF | PcFlags::VAR_INLINE);
            }
        }

        if kind.is_brace_open() && sm.parent(cur) != TokenKind::BracedInit {
            break; // a body starts; not a simple variable group
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
}

/// Parameter names inside definition/prototype parens are definitions.
fn mark_parameter_names(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for open in ids {
        if !sm.is(open, TokenKind::FparenOpen)
            || !matches!(
                sm.parent(open),
                TokenKind::FuncDef
                    | TokenKind::FuncProto
                    | TokenKind::FuncClassDef
                    | TokenKind::FuncClassProto
            )
        {
            continue;
        }
        let close = sm.closing_match(open);
        let inner_level = sm.level(open) + 1;
        let mut cur = sm.next_ncnnl(open, Scope::All);

        while cur.is_some() && cur != close {
            let next = sm.next_ncnnl(cur, Scope::All);

            // A word at paren level directly before `,`, `)` or `=` whose
            // predecessor is type material names a parameter.
            if sm.is(cur, TokenKind::Word) && sm.level(cur) == inner_level {
                let next_kind = sm.kind(next);
                let ends_param = next == close
                    || matches!(next_kind, TokenKind::Comma | TokenKind::Assign)
                    || next_kind == TokenKind::SquareOpen
                    || next_kind == TokenKind::Tsquare;
                let prev = sm.prev_ncnnl(cur, Scope::All);
                let typed = matches!(
                    sm.kind(prev),
                    TokenKind::Type
                        | TokenKind::Qualifier
                        | TokenKind::Ptr
                        | TokenKind::ByRef
                        | TokenKind::AngleClose
                        | TokenKind::Word
                );

                if ends_param && typed {
                    sm.add_flags(cur, PcFlags::VAR_DEF);
                    // A `=` here introduces a default argument.
                    if next_kind == TokenKind::Assign {
                        sm.set_kind(next, TokenKind::AssignDefaultArg);
                    }
                }
            }
            cur = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn marked(input: &str, lang: Lang) -> ChunkStore {
        let mut ctx = Context::new(Options::default(), lang);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        super::super::combine(&mut ctx, &mut sm);
        sm
    }

    fn find(sm: &ChunkStore, text: &str) -> ChunkId {
        sm.ids()
            .into_iter()
            .find(|id| sm.text(*id) == text)
            .unwrap_or(ChunkId::NONE)
    }

    #[test]
    fn single_definition_is_first_of_group() {
        let sm = marked("int x = 5;", Lang::C);
        let x = find(&sm, "x");
        assert!(sm.has_flags(x, PcFlags::VAR_DEF | PcFlags::VAR_FIRST));
        assert!(!sm.has_flags(x, PcFlags::VAR_INLINE));
    }

    #[test]
    fn comma_group_marks_inline_members() {
        let sm = marked("int a, b, c;", Lang::C);
        assert!(sm.has_flags(find(&sm, "a"), PcFlags::VAR_FIRST));
        assert!(sm.has_flags(find(&sm, "b"), PcFlags::VAR_INLINE));
        assert!(sm.has_flags(find(&sm, "c"), PcFlags::VAR_INLINE));
    }

    #[test]
    fn pointer_declarator_is_a_definition() {
        let sm = marked("char *name = \"bob\";", Lang::C);
        let name = find(&sm, "name");
        assert!(sm.has_flags(name, PcFlags::VAR_DEF | PcFlags::VAR_FIRST));
    }

    #[test]
    fn custom_type_words_get_retyped() {
        let sm = marked("foo_t value;", Lang::C);
        assert_eq!(sm.kind(find(&sm, "foo_t")), TokenKind::Type);
        assert!(sm.has_flags(find(&sm, "value"), PcFlags::VAR_DEF));
    }

    #[test]
    fn function_call_is_not_a_definition() {
        let sm = marked("void f(void) { g(x); }", Lang::C);
        let x = find(&sm, "x");
        assert!(!sm.has_flags(x, PcFlags::VAR_DEF));
    }

    #[test]
    fn parameters_are_marked() {
        let sm = marked("void f(int count, char *label);", Lang::C);
        assert!(sm.has_flags(find(&sm, "count"), PcFlags::VAR_DEF));
        assert!(sm.has_flags(find(&sm, "label"), PcFlags::VAR_DEF));
    }

    #[test]
    fn default_argument_assign_is_retagged() {
        let sm = marked("void g(int x = 5);", Lang::CPP);
        assert_eq!(sm.kind(find(&sm, "=")), TokenKind::AssignDefaultArg);
    }

    #[test]
    fn bitfield_width_is_a_definition() {
        let sm = marked("struct s { int id : 5; };", Lang::C);
        assert!(sm.has_flags(find(&sm, "id"), PcFlags::VAR_DEF));
    }
}
