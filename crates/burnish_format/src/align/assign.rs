//! Assignment-operator alignment.
//!
//! Walks a brace scope aligning the first `=` of each line; recurses into
//! nested braces with that scope's own span/threshold (enum bodies read
//! the enum options), and keeps four groups apart: plain assignments,
//! variable-definition assignments, default-argument assigns (one stack
//! per argument position), and `= delete`-style prototype assigns.
//! Control parens, grouping parens and square groups are skipped
//! wholesale.

use crate::chunk::{ChunkId, ChunkStore};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Entry: aligns assignments stream-wide when configured.
pub fn align_assignments(ctx: &mut Context, sm: &mut ChunkStore) {
    if ctx.opts.align_assign_span == 0 && ctx.opts.align_enum_equ_span == 0 {
        return;
    }
    let span = ctx.opts.align_assign_span;
    let thresh = ctx.opts.align_assign_thresh;
    let mut nl_count = 0usize;
    let head = sm.head();
    align_assign(ctx, sm, head, span, thresh, &mut nl_count);
}

/// Aligns one scope starting at `first`; returns the chunk after the
/// scope's closing brace.
pub fn align_assign(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    first: ChunkId,
    span: usize,
    thresh: usize,
    p_nl_count: &mut usize,
) -> ChunkId {
    if first.is_none() {
        return ChunkId::NONE;
    }
    log_sev!(
        Severity::AlignAssign,
        "align assigns from line {}, span {}, thresh {}",
        sm.orig_line(first),
        span,
        thresh
    );
    let right_align = !ctx.opts.align_on_tabstop;

    let mut asn = AlignStack::new(); // plain assigns
    asn.start(ctx, span, thresh);
    asn.right_align = right_align;

    let mut vdas = AlignStack::new(); // variable-def assigns
    vdas.start(ctx, span, thresh);
    vdas.right_align = right_align;

    let mut fcn_default: Vec<AlignStack> = vec![AlignStack::new()]; // per arg position
    fcn_default[0].start(ctx, span, thresh);
    fcn_default[0].right_align = right_align;

    let mut fcn_proto = AlignStack::new(); // `= delete` and friends
    fcn_proto.start(ctx, span, thresh);
    fcn_proto.right_align = right_align;

    let mut var_def_cnt = 0usize;
    let mut equ_count = 0usize;
    let mut nl_count = 0usize;
    let mut fcn_idx = 0usize;
    let mut pc = first;
    let mut vdas_pc = ChunkId::NONE;

    while pc.is_some() {
        if nl_count != 0 {
            if vdas_pc.is_some() {
                vdas.add(sm, vdas_pc);
                vdas_pc = ChunkId::NONE;
            }
            *p_nl_count += nl_count;
            asn.new_lines(ctx, sm, nl_count);
            vdas.new_lines(ctx, sm, nl_count);
            fcn_proto.new_lines(ctx, sm, nl_count);

            for stack in fcn_default.iter_mut() {
                stack.new_lines(ctx, sm, nl_count);
            }
            fcn_idx = 0;
            nl_count = 0;
            var_def_cnt = 0;
            equ_count = 0;
        }
        let kind = sm.kind(pc);

        // Don't look inside control, grouping or square groups.
        if matches!(
            kind,
            TokenKind::SparenOpen | TokenKind::SquareOpen | TokenKind::ParenOpen
        ) {
            let entry_line = sm.orig_line(pc);
            let close = sm.closing_match(pc);

            if close.is_none() {
                break;
            }
            nl_count += sm.orig_line(close).saturating_sub(entry_line);
            pc = sm.next(close);
            continue;
        }

        // Recurse into a brace scope with its own options.
        if kind.is_brace_open() && sm.parent(pc) != TokenKind::BracedInit {
            let (myspan, mythresh) = if sm.parent(pc) == TokenKind::Enum
                || sm.parent(pc) == TokenKind::EnumClass
            {
                (ctx.opts.align_enum_equ_span, ctx.opts.align_enum_equ_thresh)
            } else {
                (ctx.opts.align_assign_span, ctx.opts.align_assign_thresh)
            };
            let inner = sm.next(pc);
            pc = align_assign(ctx, sm, inner, myspan, mythresh, &mut nl_count);
            continue;
        }

        // Done with this scope?
        if kind.is_brace_close() && sm.parent(pc) != TokenKind::BracedInit {
            pc = sm.next(pc);
            break;
        }

        if sm.is_newline(pc) {
            nl_count = sm.nl_count(pc);
        } else if sm.has_flags(pc, PcFlags::VAR_DEF)
            && !sm.has_flags(pc, PcFlags::IN_CONST_ARGS)
            && !sm.has_flags(pc, PcFlags::IN_FCN_DEF)
            && !sm.has_flags(pc, PcFlags::IN_FCN_CALL)
        {
            var_def_cnt += 1;
        } else if var_def_cnt > 1 && !ctx.opts.align_assign_on_multi_var_defs {
            // Second variable on the line and no alignment requested.
            vdas_pc = ChunkId::NONE;
        } else if equ_count == 0
            && !sm.has_flags(pc, PcFlags::IN_TEMPLATE)
            && matches!(
                kind,
                TokenKind::Assign | TokenKind::AssignDefaultArg | TokenKind::AssignFuncProto
            )
        {
            if kind == TokenKind::Assign {
                equ_count += 1;
            }

            if ctx.opts.align_assign_decl_func == 0
                && matches!(
                    kind,
                    TokenKind::AssignDefaultArg | TokenKind::AssignFuncProto
                )
            {
                fcn_idx += 1;
                if fcn_idx == fcn_default.len() {
                    let mut stack = AlignStack::new();
                    stack.start(ctx, span, thresh);
                    stack.right_align = right_align;
                    fcn_default.push(stack);
                }
                fcn_default[fcn_idx].add(sm, pc);
            } else if ctx.opts.align_assign_decl_func == 1 {
                match kind {
                    TokenKind::AssignDefaultArg => {
                        fcn_idx += 1;
                        if fcn_idx == fcn_default.len() {
                            let mut stack = AlignStack::new();
                            stack.start(ctx, span, thresh);
                            stack.right_align = right_align;
                            fcn_default.push(stack);
                        }
                        fcn_default[fcn_idx].add(sm, pc);
                    }
                    TokenKind::AssignFuncProto => fcn_proto.add(sm, pc),
                    _ => vdas_pc = pc,
                }
            } else if ctx.opts.align_assign_decl_func == 2
                && matches!(
                    kind,
                    TokenKind::AssignDefaultArg | TokenKind::AssignFuncProto
                )
            {
                // Don't align declaration assigns at all.
            } else if var_def_cnt != 0 {
                vdas_pc = pc;
            } else if kind == TokenKind::Assign {
                asn.add(sm, pc);
            }
        }
        pc = sm.next(pc);
    }

    if vdas_pc.is_some() {
        vdas.add(sm, vdas_pc);
    }
    asn.end(ctx, sm);
    vdas.end(ctx, sm);

    for stack in fcn_default.iter_mut() {
        stack.end(ctx, sm);
    }
    fcn_proto.end(ctx, sm);
    pc
}
