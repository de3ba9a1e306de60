//! Infinite-loop canonicalization.
//!
//! The five-valued `mod_infinite_loop` option names a preferred spelling:
//!
//! | value | spelling |
//! |-------|----------|
//! | 1 | `for (;;)` |
//! | 2 | `while (true)` |
//! | 3 | `do ... while (true)` |
//! | 4 | `while (1)` |
//! | 5 | `do ... while (1)` |
//!
//! A loop is rewritten only when it carries exactly the necessary tokens
//! (keyword, condition, parens, and the do-while semicolon) and is an
//! infinite loop; anything extra, including a comment inside the header,
//! leaves it untouched. Rewriting retypes and respells the keyword, moves
//! the header tokens between the top and bottom of the body as needed, and
//! reparents the braces to the new construct.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::log_sev;
use crate::newlines::newline_add_before;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Applies the configured canonical spelling to every infinite loop.
pub fn rewrite_infinite_loops(ctx: &mut Context, sm: &mut ChunkStore) {
    let (desired, condition): (TokenKind, Option<&str>) = match ctx.opts.mod_infinite_loop {
        1 => (TokenKind::For, None),
        2 => (TokenKind::While, Some("true")),
        3 => (TokenKind::WhileOfDo, Some("true")),
        4 => (TokenKind::While, Some("1")),
        5 => (TokenKind::WhileOfDo, Some("1")),
        _ => return,
    };
    let ids = sm.ids();

    for pc in ids {
        if sm.get(pc).is_none() {
            continue;
        }

        if sm.is(pc, TokenKind::Do) {
            rewrite_do_loop(ctx, sm, pc, desired, condition);
        } else if (sm.is(pc, TokenKind::While) && while_needs_rewrite(sm, pc, desired, condition))
            || (sm.is(pc, TokenKind::For) && for_needs_rewrite(sm, pc, desired))
        {
            rewrite_top_loop(ctx, sm, pc, desired, condition);
        }
    }
}

/// `for` needs the rewrite when `for(;;)` is not the preferred spelling
/// and this one carries no extra tokens.
fn for_needs_rewrite(sm: &ChunkStore, pc: ChunkId, desired: TokenKind) -> bool {
    if desired == TokenKind::For {
        return false;
    }
    let open = sm.next(pc);

    if !sm.is(open, TokenKind::SparenOpen) {
        return false;
    }
    let first = sm.next(open);

    if !sm.is(first, TokenKind::Semicolon) {
        return false;
    }
    let second = sm.next(first);

    if !sm.is(second, TokenKind::Semicolon) {
        return false;
    }
    sm.is(sm.next(second), TokenKind::SparenClose)
}

/// `while` needs the rewrite when it is minimal, infinite, and either the
/// keyword or the condition spelling differs from the preference.
fn while_needs_rewrite(
    sm: &ChunkStore,
    keyword: ChunkId,
    desired: TokenKind,
    desired_condition: Option<&str>,
) -> bool {
    let open = sm.next(keyword);
    let condition = sm.next(open);
    let close = sm.next(condition);

    if !sm.is(open, TokenKind::SparenOpen) {
        return false;
    }
    let cond_text = sm.text(condition);

    if cond_text != "true" && cond_text != "1" {
        return false;
    }

    if !sm.is(close, TokenKind::SparenClose) {
        return false;
    }

    if sm.is(keyword, TokenKind::WhileOfDo) && !sm.is(sm.next(close), TokenKind::Semicolon) {
        return false;
    }

    if sm.kind(keyword) != desired {
        return true;
    }
    let cond_text = sm.text(condition);

    if cond_text == "true" && desired_condition != Some("true") {
        return true;
    }
    if cond_text == "1" && desired_condition != Some("1") {
        return true;
    }
    false
}

fn rewrite_loop_keyword(sm: &mut ChunkStore, keyword: ChunkId, new_kind: TokenKind) {
    sm.set_kind(keyword, new_kind);

    let spelling = match new_kind {
        TokenKind::Do => "do",
        TokenKind::While | TokenKind::WhileOfDo => "while",
        TokenKind::For => "for",
        _ => return,
    };
    sm.set_text(keyword, spelling);
}

/// Moves `source` to sit right after `destination` with no whitespace,
/// advancing both cursors.
fn move_one_token(
    sm: &mut ChunkStore,
    source: &mut ChunkId,
    destination: &mut ChunkId,
    parent: TokenKind,
) {
    let next_source = sm.next(*source);
    sm.move_after(*source, *destination);
    let col = sm.end_column(*destination);
    sm.set_column(*source, col);

    if let Some(chunk) = sm.get_mut(*source) {
        chunk.orig.prev_sp = 0;
        chunk.parent = parent;
    }
    *destination = *source;
    *source = next_source;
}

/// Moves the loop header (parens and condition) from `source` to after
/// `destination`, respelling the condition for the desired construct.
fn rewrite_loop_condition(
    sm: &mut ChunkStore,
    source: &mut ChunkId,
    destination: &mut ChunkId,
    desired: TokenKind,
    desired_condition: Option<&str>,
) {
    // The opening parenthesis.
    move_one_token(sm, source, destination, desired);

    if desired == TokenKind::For {
        // The condition becomes the first of the two semicolons.
        sm.set_kind(*source, TokenKind::Semicolon);
        sm.set_parent(*source, TokenKind::For);
        sm.set_text(*source, ";");
        move_one_token(sm, source, destination, desired);
        *destination = sm.copy_and_add_after(*destination, *destination);
    } else {
        sm.set_kind(*source, TokenKind::Word);
        sm.set_text(*source, desired_condition.unwrap_or("true"));
        move_one_token(sm, source, destination, desired);
    }

    // Converting `for` to `while` leaves a second semicolon behind.
    if sm.is(*source, TokenKind::Semicolon) {
        let next_source = sm.next(*source);
        sm.remove(*source);
        *source = next_source;
    }

    // The closing parenthesis.
    move_one_token(sm, source, destination, desired);
}

fn rewrite_loop_in_place(
    sm: &mut ChunkStore,
    keyword: ChunkId,
    desired: TokenKind,
    desired_condition: Option<&str>,
) {
    let mut source = sm.next(keyword);
    let mut destination = keyword;

    rewrite_loop_keyword(sm, keyword, desired);
    rewrite_loop_condition(sm, &mut source, &mut destination, desired, desired_condition);
}

fn find_start_brace(sm: &ChunkStore, pc: ChunkId) -> ChunkId {
    let mut cur = pc;

    while cur.is_some() && !sm.kind(cur).is_brace_open() {
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    cur
}

/// Rewrites a `do ... while (...)` loop.
fn rewrite_do_loop(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    pc: ChunkId,
    desired: TokenKind,
    condition: Option<&str>,
) {
    let start_brace = find_start_brace(sm, pc);
    let end_brace = sm.closing_match(start_brace);
    let while_keyword = sm.next_ncnnl(end_brace, Scope::All);

    if !sm.is(while_keyword, TokenKind::WhileOfDo)
        || !while_needs_rewrite(sm, while_keyword, desired, condition)
    {
        return;
    }

    if desired == TokenKind::WhileOfDo {
        // Only the condition spelling changes.
        rewrite_loop_in_place(sm, while_keyword, desired, condition);
        sm.set_parent(start_brace, TokenKind::Do);
        sm.set_parent(end_brace, TokenKind::Do);
    } else {
        let mut top = pc;
        let mut bottom = sm.next(while_keyword);

        // The `do` at the top becomes the new loop keyword.
        rewrite_loop_keyword(sm, pc, desired);

        // The `while` at the bottom goes away; its header moves up.
        sm.remove(while_keyword);
        rewrite_loop_condition(sm, &mut bottom, &mut top, desired, condition);

        // The trailing semicolon goes away too.
        sm.remove(bottom);

        sm.set_parent(start_brace, desired);
        sm.set_parent(end_brace, desired);
    }
    ctx.mark_change();
    log_sev!(
        Severity::InfiniteLoop,
        "canonicalized do-loop at line {}",
        sm.orig_line(pc)
    );
}

/// Rewrites a `while`/`for` loop at the top of its body.
fn rewrite_top_loop(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    pc: ChunkId,
    desired: TokenKind,
    condition: Option<&str>,
) {
    let start_brace = find_start_brace(sm, pc);
    let end_brace = sm.closing_match(start_brace);

    if end_brace.is_none() {
        return;
    }

    if desired == TokenKind::WhileOfDo {
        let mut top = pc;
        let mut bottom = end_brace;

        if sm.is(bottom, TokenKind::VbraceClose) {
            newline_add_before(ctx, sm, bottom);
        }
        // A `while` appears at the bottom of the loop.
        bottom = sm.copy_and_add_after(top, bottom);
        rewrite_loop_keyword(sm, bottom, TokenKind::WhileOfDo);

        // The keyword at the top becomes `do`.
        rewrite_loop_keyword(sm, top, TokenKind::Do);
        let mut source = sm.next(top);

        // The header moves from the top to the bottom.
        rewrite_loop_condition(sm, &mut source, &mut bottom, desired, condition);

        // And the do-while needs its final semicolon.
        bottom = sm.copy_and_add_after(bottom, bottom);
        sm.set_kind(bottom, TokenKind::Semicolon);
        sm.set_text(bottom, ";");

        sm.set_parent(start_brace, TokenKind::Do);
        sm.set_parent(end_brace, TokenKind::Do);
    } else {
        rewrite_loop_in_place(sm, pc, desired, condition);
        sm.set_parent(start_brace, desired);
        sm.set_parent(end_brace, desired);
    }
    ctx.mark_change();
    log_sev!(
        Severity::InfiniteLoop,
        "canonicalized loop at line {}",
        sm.orig_line(pc)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn rewritten(input: &str, preference: usize) -> ChunkStore {
        let mut opts = Options::default();
        opts.mod_infinite_loop = preference;
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        sm
    }

    #[test]
    fn while_one_becomes_for_semi_semi() {
        let sm = rewritten("while(1) { body(); }", 1);
        assert_eq!(sm.token_text(), "for(;;){body();}");
        let kw = sm.ids().into_iter().find(|id| sm.text(*id) == "for").unwrap();
        assert_eq!(sm.kind(kw), TokenKind::For);
        // The body braces now belong to the for.
        let brace = sm
            .ids()
            .into_iter()
            .find(|id| sm.is(*id, TokenKind::BraceOpen))
            .unwrap();
        assert_eq!(sm.parent(brace), TokenKind::For);
    }

    #[test]
    fn for_semi_semi_becomes_while_true() {
        let sm = rewritten("for(;;) { body(); }", 2);
        assert_eq!(sm.token_text(), "while(true){body();}");
    }

    #[test]
    fn while_true_to_while_one() {
        let sm = rewritten("while(true) { x(); }", 4);
        assert_eq!(sm.token_text(), "while(1){x();}");
    }

    #[test]
    fn do_while_collapses_to_for() {
        let sm = rewritten("do { x(); } while(1);", 1);
        assert_eq!(sm.token_text(), "for(;;){x();}");
    }

    #[test]
    fn while_becomes_do_while() {
        let sm = rewritten("while(1) { x(); }", 5);
        assert_eq!(sm.token_text(), "do{x();}while(1);");
    }

    #[test]
    fn finite_loops_are_left_alone() {
        let sm = rewritten("while(ready) { x(); }", 1);
        assert_eq!(sm.token_text(), "while(ready){x();}");
    }

    #[test]
    fn already_canonical_is_untouched() {
        let sm = rewritten("for(;;) { x(); }", 1);
        assert_eq!(sm.token_text(), "for(;;){x();}");
    }

    #[test]
    fn extra_tokens_block_the_rewrite() {
        let sm = rewritten("while(1 == 1) { x(); }", 1);
        assert_eq!(sm.token_text(), "while(1==1){x();}");
    }
}
