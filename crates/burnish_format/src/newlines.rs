//! Newline synthesis and brace/blank-line policies.
//!
//! All newline creation funnels through [`newline_add_before`] /
//! [`newline_add_after`], which build the chunk per the synthesis
//! contract: the new chunk copies the predecessor's nesting levels and
//! region flags, and inside a preprocessor body it becomes a
//! backslash-splice instead of a plain newline.
//!
//! One-liners are detected before any policy runs; a construct that fits
//! on one input line is only broken when the option for its construct says
//! so, and [`undo_one_liner`] clears the protection across the whole
//! logical line once a break is forced.

use crate::chunk::{Chunk, ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::error::FormatError;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::options::Iarf;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Fatal pre-check: no blank-line option may demand more than `nl_max`.
pub fn check_nl_max(ctx: &Context) -> Result<(), FormatError> {
    let nl_max = ctx.opts.nl_max;

    if nl_max == 0 {
        return Ok(());
    }
    let checks: [(&'static str, usize); 2] = [
        ("nl_after_func_body", ctx.opts.nl_after_func_body),
        ("nl_end_of_file_min", ctx.opts.nl_end_of_file_min),
    ];

    for (option, value) in checks {
        if value > nl_max {
            return Err(FormatError::OptionOverflow {
                option,
                value,
                nl_max,
            });
        }
    }
    Ok(())
}

/// Builds the chunk a synthesized newline must be, next to `anchor`.
fn setup_newline(sm: &ChunkStore, anchor: ChunkId) -> Chunk {
    let in_pp = sm.has_flags(anchor, PcFlags::IN_PREPROC);
    let mut nl = if in_pp {
        let mut c = Chunk::new("\\\n", TokenKind::NlCont);
        c.nl_count = 1;
        c
    } else {
        Chunk::newline(1)
    };

    if let Some(a) = sm.get(anchor) {
        nl.level = a.level;
        nl.brace_level = a.brace_level;
        nl.pp_level = a.pp_level;
        nl.flags = a.flags & PcFlags::COPY_ON_NEWLINE;
        nl.orig = a.orig;
    }
    nl.column = 1;
    nl
}

/// Ensures a newline directly before `pc`; returns the newline chunk.
pub fn newline_add_before(ctx: &mut Context, sm: &mut ChunkStore, pc: ChunkId) -> ChunkId {
    let prev = sm.prev(pc);

    if sm.is_newline(prev) {
        return prev;
    }
    let nl = setup_newline(sm, prev);
    ctx.mark_change();
    log_sev!(
        Severity::Newline,
        "newline added before '{}' (line {})",
        sm.text(pc),
        sm.orig_line(pc)
    );
    sm.insert_before(pc, nl)
}

/// Ensures a newline directly after `pc`; returns the newline chunk.
pub fn newline_add_after(ctx: &mut Context, sm: &mut ChunkStore, pc: ChunkId) -> ChunkId {
    let next = sm.next(pc);

    if sm.is_newline(next) {
        return next;
    }
    let nl = setup_newline(sm, pc);
    ctx.mark_change();
    sm.insert_after(pc, nl)
}

/// Removes every newline chunk strictly between `a` and `b`.
fn newline_del_between(ctx: &mut Context, sm: &mut ChunkStore, a: ChunkId, b: ChunkId) {
    let mut cur = sm.next(a);

    while cur.is_some() && cur != b {
        let next = sm.next(cur);
        if sm.is_newline(cur) {
            sm.remove(cur);
            ctx.mark_change();
        }
        cur = next;
    }
}

/// Flags every construct whose braces sit on one input line.
pub fn mark_one_liners(sm: &mut ChunkStore) {
    let ids = sm.ids();

    for open in ids {
        if !sm.kind(open).is_brace_open() {
            continue;
        }
        let close = sm.closing_match(open);

        if close.is_none() {
            continue;
        }
        // Any newline inside disqualifies.
        let mut cur = open;
        let mut one_line = true;

        while cur != close {
            if sm.is_newline(cur) {
                one_line = false;
                break;
            }
            cur = sm.next(cur);
        }

        if !one_line {
            continue;
        }
        // Flag from the start of the header line through the closer.
        let mut cur = sm.line_start(open);
        loop {
            sm.add_flags(cur, PcFlags::ONE_LINER);
            if cur == close {
                break;
            }
            cur = sm.next(cur);
        }
    }
}

/// Clears the one-liner protection across the whole logical line.
pub fn undo_one_liner(sm: &mut ChunkStore, pc: ChunkId) {
    if !sm.has_flags(pc, PcFlags::ONE_LINER) {
        return;
    }
    sm.clear_flags(pc, PcFlags::ONE_LINER);
    log_sev!(
        Severity::OneLiner,
        "one-liner broken at line {}",
        sm.orig_line(pc)
    );

    let mut cur = sm.prev(pc);
    while cur.is_some() && sm.has_flags(cur, PcFlags::ONE_LINER) {
        sm.clear_flags(cur, PcFlags::ONE_LINER);
        cur = sm.prev(cur);
    }
    cur = sm.next(pc);
    while cur.is_some() && sm.has_flags(cur, PcFlags::ONE_LINER) {
        sm.clear_flags(cur, PcFlags::ONE_LINER);
        cur = sm.next(cur);
    }
}

/// The brace-placement option for a construct parent.
fn brace_option(ctx: &Context, parent: TokenKind) -> Iarf {
    match parent {
        TokenKind::If => ctx.opts.nl_if_brace,
        TokenKind::Else => ctx.opts.nl_else_brace,
        TokenKind::For => ctx.opts.nl_for_brace,
        TokenKind::While => ctx.opts.nl_while_brace,
        TokenKind::Do => ctx.opts.nl_do_brace,
        TokenKind::Switch => ctx.opts.nl_switch_brace,
        TokenKind::FuncDef | TokenKind::FuncClassDef => ctx.opts.nl_fdef_brace,
        TokenKind::Class => ctx.opts.nl_class_brace,
        TokenKind::Struct => ctx.opts.nl_struct_brace,
        TokenKind::Union => ctx.opts.nl_struct_brace,
        TokenKind::Enum | TokenKind::EnumClass => ctx.opts.nl_enum_brace,
        TokenKind::Namespace => ctx.opts.nl_namespace_brace,
        _ => Iarf::Ignore,
    }
}

/// Does a one-liner of this construct resist being broken?
fn one_liner_protected(ctx: &Context, parent: TokenKind) -> bool {
    match parent {
        TokenKind::If | TokenKind::Else => ctx.opts.nl_if_leave_one_liners,
        TokenKind::FuncDef | TokenKind::FuncClassDef => ctx.opts.nl_func_leave_one_liners,
        TokenKind::Enum | TokenKind::EnumClass => ctx.opts.nl_enum_leave_one_liners,
        _ => false,
    }
}

/// Enforces brace placement per construct and the brace-adjacent keyword
/// rules (`} else`, `} while`).
pub fn cleanup_braces(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for open in ids {
        if sm.get(open).is_none() || !sm.is(open, TokenKind::BraceOpen) {
            continue;
        }
        let parent = sm.parent(open);
        let policy = brace_option(ctx, parent);

        if policy == Iarf::Ignore {
            continue;
        }
        let prev = sm.prev_ncnnl(open, Scope::All);

        if prev.is_none() {
            continue;
        }

        if policy.is_add() {
            if sm.has_flags(open, PcFlags::ONE_LINER) && one_liner_protected(ctx, parent) {
                continue;
            }
            if sm.has_flags(open, PcFlags::ONE_LINER) {
                undo_one_liner(sm, open);
            }
            newline_add_before(ctx, sm, open);
        } else if policy.is_remove() {
            newline_del_between(ctx, sm, prev, open);
        }
    }

    // `} else` / `} while (...)` attachment.
    let ids = sm.ids();
    for kw in ids {
        if sm.get(kw).is_none() {
            continue;
        }
        let policy = match sm.kind(kw) {
            TokenKind::Else => ctx.opts.nl_brace_else,
            TokenKind::WhileOfDo => ctx.opts.nl_brace_while,
            _ => continue,
        };

        if policy == Iarf::Ignore {
            continue;
        }
        let prev = sm.prev_ncnnl(kw, Scope::All);

        if !sm.is(prev, TokenKind::BraceClose) {
            continue;
        }

        if policy.is_add() {
            newline_add_before(ctx, sm, kw);
        } else if policy.is_remove() {
            newline_del_between(ctx, sm, prev, kw);
        }
    }
}

/// Collapses newline runs that exceed `nl_max`.
pub fn cap_blank_lines(ctx: &mut Context, sm: &mut ChunkStore) {
    let nl_max = ctx.opts.nl_max;

    if nl_max == 0 {
        return;
    }
    let ids = sm.ids();

    for pc in ids {
        if sm.is(pc, TokenKind::Newline) && sm.nl_count(pc) > nl_max {
            if let Some(chunk) = sm.get_mut(pc) {
                chunk.nl_count = nl_max;
            }
            ctx.mark_change();
            log_sev!(
                Severity::BlankLines,
                "capped blank run at line {}",
                sm.orig_line(pc)
            );
        }
    }
}

/// Blank lines after each function body.
pub fn blank_lines_after_func_body(ctx: &mut Context, sm: &mut ChunkStore) {
    let want = ctx.opts.nl_after_func_body;

    if want == 0 {
        return;
    }
    let ids = sm.ids();

    for close in ids {
        if !sm.is(close, TokenKind::BraceClose)
            || !matches!(
                sm.parent(close),
                TokenKind::FuncDef | TokenKind::FuncClassDef
            )
        {
            continue;
        }
        let nl = newline_add_after(ctx, sm, close);

        if sm.next(nl).is_none() {
            continue; // end of file policy owns the tail
        }
        if sm.nl_count(nl) < want {
            if let Some(chunk) = sm.get_mut(nl) {
                chunk.nl_count = want;
            }
            ctx.mark_change();
        }
    }
}

/// Squeezes the newline out of `)\n)` sequences.
pub fn squeeze_paren_close(ctx: &mut Context, sm: &mut ChunkStore) {
    if !ctx.opts.nl_squeeze_paren_close {
        return;
    }
    let ids = sm.ids();

    for pc in ids {
        if sm.get(pc).is_none() || !sm.kind(pc).is_paren_close() {
            continue;
        }
        let next = sm.next(pc);

        if sm.is(next, TokenKind::Newline) && sm.kind(sm.next(next)).is_paren_close() {
            sm.remove(next);
            ctx.mark_change();
        }
    }
}

/// Trailing-newline policy at end of file.
pub fn enforce_end_of_file(ctx: &mut Context, sm: &mut ChunkStore) {
    let policy = ctx.opts.nl_end_of_file;

    if policy == Iarf::Ignore || sm.is_empty() {
        return;
    }
    let tail = sm.tail();

    if policy.is_remove() {
        if sm.is(tail, TokenKind::Newline) {
            sm.remove(tail);
            ctx.mark_change();
        }
        return;
    }
    let min = ctx.opts.nl_end_of_file_min.max(1);

    if sm.is(tail, TokenKind::Newline) {
        if sm.nl_count(tail) < min {
            if let Some(chunk) = sm.get_mut(tail) {
                chunk.nl_count = min;
            }
            ctx.mark_change();
        }
    } else {
        let mut nl = Chunk::newline(min);
        nl.orig = match sm.get(tail) {
            Some(c) => c.orig,
            None => Default::default(),
        };
        sm.append(nl);
        ctx.mark_change();
    }
}

/// The whole normalizer, in pass order.
pub fn normalize(ctx: &mut Context, sm: &mut ChunkStore) {
    mark_one_liners(sm);
    cleanup_braces(ctx, sm);
    squeeze_paren_close(ctx, sm);
    cap_blank_lines(ctx, sm);
    blank_lines_after_func_body(ctx, sm);
    enforce_end_of_file(ctx, sm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn prepared(input: &str, opts: Options) -> (ChunkStore, Context) {
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        normalize(&mut ctx, &mut sm);
        (sm, ctx)
    }

    fn has_newline_between(sm: &ChunkStore, a: &str, b: &str) -> bool {
        let ia = sm.ids().into_iter().find(|id| sm.text(*id) == a).unwrap();
        let mut cur = sm.next(ia);
        while cur.is_some() {
            if sm.text(cur) == b {
                return false;
            }
            if sm.is_newline(cur) {
                return true;
            }
            cur = sm.next(cur);
        }
        false
    }

    #[test]
    fn nl_max_overflow_is_fatal() {
        let mut opts = Options::default();
        opts.nl_max = 2;
        opts.nl_after_func_body = 5;
        let ctx = Context::new(opts, Lang::C);
        assert!(matches!(
            check_nl_max(&ctx),
            Err(FormatError::OptionOverflow { .. })
        ));
    }

    #[test]
    fn add_policy_breaks_brace_onto_new_line() {
        let mut opts = Options::default();
        opts.nl_fdef_brace = Iarf::Add;
        let (sm, _) = prepared("void f(void) { g(); }", opts);
        assert!(has_newline_between(&sm, ")", "{"));
    }

    #[test]
    fn remove_policy_attaches_brace() {
        let mut opts = Options::default();
        opts.nl_fdef_brace = Iarf::Remove;
        let (sm, _) = prepared("void f(void)\n{\n  g();\n}", opts);
        assert!(!has_newline_between(&sm, ")", "{"));
    }

    #[test]
    fn one_liner_protection_blocks_the_add() {
        let mut opts = Options::default();
        opts.nl_fdef_brace = Iarf::Add;
        opts.nl_func_leave_one_liners = true;
        let (sm, _) = prepared("void f(void) { g(); }", opts);
        assert!(!has_newline_between(&sm, ")", "{"));
    }

    #[test]
    fn one_liner_flag_covers_construct() {
        let (sm, _) = prepared("if (x) { y(); }", Options::default());
        let ids = sm.ids();
        let open = ids
            .iter()
            .find(|id| sm.is(**id, TokenKind::BraceOpen))
            .copied()
            .unwrap();
        assert!(sm.has_flags(open, PcFlags::ONE_LINER));
        let y = ids
            .iter()
            .find(|id| sm.text(**id) == "y")
            .copied()
            .unwrap();
        assert!(sm.has_flags(y, PcFlags::ONE_LINER));
    }

    #[test]
    fn undo_one_liner_clears_both_directions() {
        let (mut sm, _) = prepared("if (x) { y(); }", Options::default());
        let y = sm
            .ids()
            .into_iter()
            .find(|id| sm.text(*id) == "y")
            .unwrap();
        undo_one_liner(&mut sm, y);
        assert!(sm.ids().iter().all(|id| !sm.has_flags(*id, PcFlags::ONE_LINER)));
    }

    #[test]
    fn blank_runs_are_capped() {
        let mut opts = Options::default();
        opts.nl_max = 2;
        let (sm, _) = prepared("int a;\n\n\n\n\nint b;", opts);
        let nl = sm
            .ids()
            .into_iter()
            .find(|id| sm.is(*id, TokenKind::Newline))
            .unwrap();
        assert_eq!(sm.nl_count(nl), 2);
    }

    #[test]
    fn end_of_file_newline_is_forced() {
        let mut opts = Options::default();
        opts.nl_end_of_file = Iarf::Force;
        opts.nl_end_of_file_min = 1;
        let (sm, _) = prepared("int a;", opts);
        assert!(sm.is(sm.tail(), TokenKind::Newline));
    }

    #[test]
    fn synthesized_newline_copies_region_flags() {
        let mut ctx = Context::new(Options::default(), Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, "#define A 1\n");
        crate::preproc::frame_preprocessor(&mut ctx, &mut sm);
        let one = sm
            .ids()
            .into_iter()
            .find(|id| sm.text(*id) == "1")
            .unwrap();
        let nl = newline_add_before(&mut ctx, &mut sm, one);
        assert_eq!(sm.kind(nl), TokenKind::NlCont);
        assert!(sm.has_flags(nl, PcFlags::IN_PREPROC));
    }
}
