//! Line-width-driven splitting.
//!
//! Runs only on lines whose last chunk passes `code_width`. The best
//! break point is the lowest-priority splittable token found scanning
//! backwards (level acts as a tie-break: shallower wins); for-statement
//! headers, function parameter lists and template argument lists have
//! their own geometry first. A one-liner is never split in place: its
//! protection is undone and the brace normalizer re-runs instead.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::indent::reindent_line;
use crate::log_sev;
use crate::newlines::{cleanup_braces, newline_add_before, undo_one_liner};
use crate::flags::PcFlags;
use crate::severity::Severity;
use crate::token::TokenKind;

struct SplitEntry {
    pc: ChunkId,
    pri: usize,
}

/// Split priority; smaller is a stronger preference, zero means never.
fn get_split_pri(ctx: &Context, kind: TokenKind) -> usize {
    match kind {
        TokenKind::Semicolon => 1,
        TokenKind::Comma => 2,
        TokenKind::Bool => 3,
        TokenKind::Compare => 4,
        TokenKind::Shift => 5,
        TokenKind::Arith => 6,
        TokenKind::Caret => 7,
        TokenKind::Assign => 9,
        TokenKind::String => 10,
        TokenKind::ForColon => 11,
        TokenKind::Question | TokenKind::CondColon => 20,
        // A negative indent_continue asks for long-line splits, so the
        // function paren outranks assignment.
        TokenKind::FparenOpen => {
            if ctx.opts.indent_continue < 0 {
                8
            } else {
                21
            }
        }
        TokenKind::Qualifier
        | TokenKind::Class
        | TokenKind::Struct
        | TokenKind::Type
        | TokenKind::Typename => 25,
        _ => 0,
    }
}

fn is_past_width(ctx: &Context, sm: &ChunkStore, pc: ChunkId) -> bool {
    // The last character may sit exactly on the limit.
    let curr = sm.column(pc) + sm.width(pc).saturating_sub(1);
    curr > ctx.opts.code_width
}

/// Continuation indent for a freshly split line.
fn split_indent(ctx: &Context, sm: &ChunkStore, pc: ChunkId) -> usize {
    sm.brace_level(pc) * ctx.opts.indent_columns
        + ctx.opts.indent_continue.unsigned_abs() as usize
        + 1
}

/// Breaks the line right before `pc`.
fn split_before_chunk(ctx: &mut Context, sm: &mut ChunkStore, pc: ChunkId) {
    let prev = sm.prev(pc);

    if sm.is_newline(pc) || sm.is_newline(prev) {
        return;
    }
    newline_add_before(ctx, sm, pc);
    // Continuation lines keep their extra indent across later passes.
    sm.add_flags(pc, PcFlags::CONT_LINE);

    if sm.kind(prev).is_paren_open()
        || matches!(sm.kind(prev), TokenKind::SquareOpen | TokenKind::AngleOpen)
    {
        sm.add_flags(prev, PcFlags::CONT_LINE);
        let closing = sm.closing_match(prev);

        if closing.is_some() {
            sm.add_flags(closing, PcFlags::CONT_LINE);
        }
    }
    let col = split_indent(ctx, sm, pc);
    reindent_line(ctx, sm, pc, col);
    ctx.mark_change();
}

/// Entry: walks the stream splitting every over-width line.
pub fn do_code_width(ctx: &mut Context, sm: &mut ChunkStore) {
    if ctx.opts.code_width == 0 {
        return;
    }
    let mut pc = sm.head();

    while pc.is_some() {
        if !sm.is_comment_or_newline(pc) && is_past_width(ctx, sm, pc) {
            if sm.is(pc, TokenKind::VbraceClose) && sm.is_last_on_line(pc) {
                pc = sm.next(pc);
                continue;
            }
            let split_ok = split_line(ctx, sm, pc);

            if split_ok {
                log_sev!(
                    Severity::Split,
                    "split line {} at '{}'",
                    sm.orig_line(pc),
                    sm.text(pc)
                );
                pc = sm.next_nl(pc, Scope::All);
            } else {
                log_sev!(Severity::Split, "no split for line {}", sm.orig_line(pc));
                break;
            }
        } else {
            pc = sm.next(pc);
        }
    }
}

/// Checks whether `pc` beats the current candidate.
fn try_split_here(ctx: &Context, sm: &ChunkStore, ent: &mut SplitEntry, pc: ChunkId) {
    let pc_pri = get_split_pri(ctx, sm.kind(pc));

    if pc_pri == 0 {
        return;
    }
    // Can't split after a newline.
    let prev = sm.prev(pc);

    if prev.is_none() || (sm.is_newline(prev) && !sm.is(pc, TokenKind::String)) {
        return;
    }

    // Can't split a call without arguments.
    if sm.is(pc, TokenKind::FparenOpen) && sm.is(sm.next(pc), TokenKind::FparenClose) {
        return;
    }

    // Only concatenated strings split on the string itself.
    if sm.is(pc, TokenKind::String) && !sm.is(sm.next(pc), TokenKind::String) {
        return;
    }

    // Keep common groupings together unless explicitly asked not to.
    if !ctx.opts.ls_code_width && pc_pri >= 22 {
        return;
    }

    // Don't break after the last term of a qualified type.
    if pc_pri == 25 {
        let next = sm.next(pc);

        if !sm.is(next, TokenKind::Word) && get_split_pri(ctx, sm.kind(next)) != 25 {
            return;
        }
    }

    if ent.pc.is_none()
        || pc_pri < ent.pri
        || (pc_pri == ent.pri
            && !sm.is(pc, TokenKind::FparenOpen)
            && sm.level(pc) < sm.level(ent.pc))
    {
        ent.pc = pc;
        ent.pri = pc_pri;
    }
}

fn small_terminator(sm: &ChunkStore, pc: ChunkId) -> bool {
    let next = sm.next(pc);
    let kind = sm.kind(pc);

    kind == TokenKind::Comma
        || kind == TokenKind::Semicolon
        || kind.is_paren_close()
        || kind.is_brace_close()
        || matches!(kind, TokenKind::AngleClose | TokenKind::SquareClose)
        || (kind.is_paren_open() && sm.kind(next).is_paren_close())
        || (kind.is_brace_open() && sm.kind(next).is_brace_close())
        || (kind == TokenKind::SquareOpen && sm.is(next, TokenKind::SquareClose))
        || sm.width(pc) == 0
}

/// Splits the line holding `start`; returns false when the one-liner path
/// handled it instead.
fn split_line(ctx: &mut Context, sm: &mut ChunkStore, start: ChunkId) -> bool {
    // A one-liner gets unpacked by the normalizer, never split in place.
    if sm.has_flags(start, PcFlags::ONE_LINER) {
        undo_one_liner(sm, start);
        cleanup_braces(ctx, sm);
        ctx.mark_change();
        return false;
    }

    if ctx.opts.ls_code_width {
        // fall through to the generic scan
    } else if sm.has_flags(start, PcFlags::IN_FOR) {
        split_for_stmt(ctx, sm, start);

        if !is_past_width(ctx, sm, start) {
            return true;
        }
    } else if sm.has_flags(start, PcFlags::IN_FCN_DEF)
        || sm.has_flags(start, PcFlags::IN_FCN_CALL)
        || sm.parent(start) == TokenKind::FuncProto
    {
        if ctx.opts.ls_func_split_full {
            split_fcn_params_full(ctx, sm, start);

            if !is_past_width(ctx, sm, start) {
                return true;
            }
        }
    } else if sm.has_flags(start, PcFlags::IN_TEMPLATE) {
        split_template(ctx, sm, start);
        return true;
    }

    // Scan backwards for the best candidate.
    let mut ent = SplitEntry {
        pc: ChunkId::NONE,
        pri: 0,
    };
    let mut pc = sm.prev(start);

    while pc.is_some() && !sm.is_newline(pc) {
        try_split_here(ctx, sm, &mut ent, pc);

        if ent.pc.is_some() && ctx.opts.ls_code_width {
            break;
        }
        pc = sm.prev(pc);
    }

    // Break before the token instead of after it per the pos_* rules.
    let mut pc = if ent.pc.is_none() {
        ChunkId::NONE
    } else {
        let kind = sm.kind(ent.pc);
        let lead = match kind {
            TokenKind::Shift => ctx.opts.pos_shift.is_lead(),
            TokenKind::Arith | TokenKind::Caret => ctx.opts.pos_arith.is_lead(),
            TokenKind::Assign => ctx.opts.pos_assign.is_lead(),
            TokenKind::Compare => ctx.opts.pos_compare.is_lead(),
            TokenKind::CondColon | TokenKind::Question => ctx.opts.pos_conditional.is_lead(),
            TokenKind::Bool => ctx.opts.pos_bool.is_lead(),
            _ => false,
        };

        if lead {
            ent.pc
        } else {
            sm.next(ent.pc)
        }
    };
    let mut move_forward = false;

    if pc.is_none() {
        // No candidate: split after the offending chunk itself, skipping
        // the small terminators that read better on the old line.
        pc = start;

        if small_terminator(sm, pc) {
            move_forward = true;
        }
    }
    let prev = sm.prev(pc);

    if prev.is_none() || sm.is_newline(pc) || sm.is_newline(prev) || move_forward {
        pc = sm.next(pc);

        while pc.is_some() && small_terminator(sm, pc) && !sm.kind(pc).is_opener() {
            pc = sm.next(pc);
        }
    }
    let prev = sm.prev(pc);

    if prev.is_some() && !sm.is_newline(pc) && !sm.is_newline(prev) {
        split_before_chunk(ctx, sm, pc);
    }
    true
}

/// Splits a for-statement header: semicolons first, then commas, then
/// assignments, all at paren level.
fn split_for_stmt(ctx: &mut Context, sm: &mut ChunkStore, start: ChunkId) {
    let max_cnt = if ctx.opts.ls_for_split_full { 2 } else { 1 };
    let mut open_paren = ChunkId::NONE;
    let mut nl_cnt = 0usize;

    // Find the open paren for the level, counting newlines passed.
    let mut pc = start;
    loop {
        pc = sm.prev(pc);
        if pc.is_none() {
            break;
        }
        if sm.is(pc, TokenKind::SparenOpen) {
            open_paren = pc;
            break;
        }
        nl_cnt += sm.nl_count(pc);
    }

    if open_paren.is_none() {
        return;
    }
    let mut count = 0usize;
    let mut st: Vec<ChunkId> = Vec::new();

    // Gather the for-header semicolons, backwards then forwards.
    let mut pc = start;
    if sm.is(pc, TokenKind::Semicolon) && sm.parent(pc) == TokenKind::For {
        st.push(pc);
        count += 1;
    }
    while count < max_cnt {
        pc = sm.prev(pc);
        if pc.is_none() || !sm.has_flags(pc, PcFlags::IN_SPAREN) {
            break;
        }
        if sm.is(pc, TokenKind::Semicolon) && sm.parent(pc) == TokenKind::For {
            st.push(pc);
            count += 1;
        }
    }
    pc = start;
    while count < max_cnt {
        pc = sm.next(pc);
        if pc.is_none() || !sm.has_flags(pc, PcFlags::IN_SPAREN) {
            break;
        }
        if sm.is(pc, TokenKind::Semicolon) && sm.parent(pc) == TokenKind::For {
            st.push(pc);
            count += 1;
        }
    }

    for semi in st.iter().rev() {
        let after = sm.next(*semi);
        split_before_chunk(ctx, sm, after);
    }

    if !is_past_width(ctx, sm, start) || nl_cnt > 0 {
        return;
    }
    // Still long: try commas at paren level.
    let mut pc = open_paren;
    loop {
        pc = sm.next(pc);
        if pc.is_none() || pc == start {
            break;
        }
        if sm.is(pc, TokenKind::Comma) && sm.level(pc) == sm.level(open_paren) + 1 {
            let after = sm.next(pc);
            split_before_chunk(ctx, sm, after);

            if !is_past_width(ctx, sm, pc) {
                return;
            }
        }
    }
    // Then assignments at paren level.
    let mut pc = open_paren;
    loop {
        pc = sm.next(pc);
        if pc.is_none() || pc == start {
            break;
        }
        if sm.is(pc, TokenKind::Assign) && sm.level(pc) == sm.level(open_paren) + 1 {
            let after = sm.next(pc);
            split_before_chunk(ctx, sm, after);

            if !is_past_width(ctx, sm, pc) {
                return;
            }
        }
    }
}

/// Splits a function signature or call at every comma at paren level.
fn split_fcn_params_full(ctx: &mut Context, sm: &mut ChunkStore, start: ChunkId) {
    // Find the opening function paren.
    let mut fpo = start;
    loop {
        fpo = sm.prev(fpo);
        if fpo.is_none() {
            return;
        }
        if sm.is(fpo, TokenKind::FparenOpen) && sm.level(fpo) == sm.level(start).saturating_sub(1)
        {
            break;
        }
    }
    // Break after every comma at paren level.
    let mut pc = sm.next_ncnnl(fpo, Scope::All);

    while pc.is_some() {
        if sm.level(pc) <= sm.level(fpo) {
            break;
        }
        if sm.level(pc) == sm.level(fpo) + 1 && sm.is(pc, TokenKind::Comma) {
            let after = sm.next(pc);
            split_before_chunk(ctx, sm, after);
        }
        pc = sm.next_ncnnl(pc, Scope::All);
    }
}

/// Splits a template argument list back at the nearest comma.
fn split_template(ctx: &mut Context, sm: &mut ChunkStore, start: ChunkId) {
    let mut prev = start;
    loop {
        prev = sm.prev(prev);
        if prev.is_none() || sm.is_newline(prev) || sm.is(prev, TokenKind::Comma) {
            break;
        }
    }

    if prev.is_none() || sm.is_newline(prev) {
        return;
    }
    let pc = sm.next(prev);
    newline_add_before(ctx, sm, pc);
    let mut min_col = 1;

    if ctx.opts.indent_continue == 0 {
        min_col += ctx.opts.indent_columns;
    } else {
        min_col += ctx.opts.indent_continue.unsigned_abs() as usize;
    }
    reindent_line(ctx, sm, pc, min_col);
    ctx.mark_change();
}
