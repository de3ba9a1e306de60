//! Variable-definition alignment.
//!
//! Aligns the defining identifiers of consecutive variable definitions
//! inside a brace scope, honoring the configured star/amp styles (the
//! stars of `char *name` can dangle left of the aligned name) and the
//! optional bitfield-colon stack. Struct/union and class bodies read
//! their own span/threshold/gap options. The walker recurses at every
//! nested brace and returns its closing brace, so the outer walk
//! continues correctly.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Entry: aligns variable definitions stream-wide when configured.
pub fn align_variable_definitions(ctx: &mut Context, sm: &mut ChunkStore) {
    if ctx.opts.align_var_def_span == 0
        && ctx.opts.align_var_struct_span == 0
        && ctx.opts.align_var_class_span == 0
    {
        return;
    }
    let head = sm.head();
    let span = ctx.opts.align_var_def_span;
    align_var_def_brace(ctx, sm, head, span);
}

/// Span/threshold/gap for a scope, by the parent of its opening brace.
fn scope_options(ctx: &Context, parent: TokenKind) -> (usize, usize, usize) {
    match parent {
        TokenKind::Class => (
            ctx.opts.align_var_class_span,
            ctx.opts.align_var_class_thresh,
            ctx.opts.align_var_class_gap,
        ),
        TokenKind::Struct | TokenKind::Union => (
            ctx.opts.align_var_struct_span,
            ctx.opts.align_var_struct_thresh,
            ctx.opts.align_var_struct_gap,
        ),
        _ => (
            ctx.opts.align_var_def_span,
            ctx.opts.align_var_def_thresh,
            ctx.opts.align_var_def_gap,
        ),
    }
}

/// Aligns one scope; returns the scope's closing brace (or the sentinel).
fn align_var_def_brace(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    first: ChunkId,
    span: usize,
) -> ChunkId {
    if first.is_none() {
        return ChunkId::NONE;
    }
    let (_, thresh, gap) = scope_options(
        ctx,
        if sm.kind(first).is_brace_open() {
            sm.parent(first)
        } else {
            TokenKind::None
        },
    );
    log_sev!(
        Severity::AlignVarDefBrace,
        "align var defs from line {}, span {}",
        sm.orig_line(first),
        span
    );

    let mut names = AlignStack::new();
    names.start(ctx, span, thresh);
    names.gap = gap;
    names.star_style = ctx.opts.align_var_def_star_style;
    names.amp_style = ctx.opts.align_var_def_amp_style;

    let mut colons = AlignStack::new();
    colons.start(ctx, span, 0);
    colons.gap = ctx.opts.align_var_def_colon_gap;

    let mut pc = if sm.kind(first).is_brace_open() {
        sm.next(first)
    } else {
        first
    };
    let mut did_this_line = false;

    while pc.is_some() {
        let kind = sm.kind(pc);

        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            names.new_lines(ctx, sm, count);
            colons.new_lines(ctx, sm, count);
            did_this_line = false;
            pc = sm.next(pc);
            continue;
        }

        // Skip paren groups wholesale.
        if kind.is_paren_open() || kind == TokenKind::SquareOpen {
            let close = sm.closing_match(pc);
            if close.is_none() {
                break;
            }
            pc = sm.next(close);
            continue;
        }

        // Recurse into nested scopes; braced init lists are not scopes.
        if kind.is_brace_open() {
            if sm.parent(pc) == TokenKind::BracedInit {
                let close = sm.closing_match(pc);
                if close.is_none() {
                    break;
                }
                pc = sm.next(close);
                continue;
            }
            let inner_span = scope_options(ctx, sm.parent(pc)).0;
            let close = align_var_def_brace(ctx, sm, pc, inner_span);

            if close.is_none() {
                break;
            }
            pc = sm.next(close);
            continue;
        }

        if kind.is_brace_close() {
            names.end(ctx, sm);
            colons.end(ctx, sm);
            return pc;
        }

        if !did_this_line
            && sm.has_flags(pc, PcFlags::VAR_DEF | PcFlags::VAR_FIRST)
            && !sm.has_flags(pc, PcFlags::IN_FCN_DEF)
            && !sm.has_flags(pc, PcFlags::IN_FCN_CALL)
            && !sm.has_flags(pc, PcFlags::IN_SPAREN)
            && !sm.has_flags(pc, PcFlags::IN_PREPROC)
        {
            names.add(sm, pc);
            did_this_line = true;

            if ctx.opts.align_var_def_colon {
                let next = sm.next_ncnnl(pc, Scope::All);
                if sm.is(next, TokenKind::BitColon) {
                    colons.add(sm, next);
                }
            }
        }
        pc = sm.next(pc);
    }
    names.end(ctx, sm);
    colons.end(ctx, sm);
    ChunkId::NONE
}
