//! Function-parameter alignment.
//!
//! Aligns the parameter names of a multi-line signature:
//!
//! ```text
//! void f(int        count,
//!        const char *label);
//! ```
//!
//! One stack runs per paren nesting depth, up to a hard cap of 16 levels;
//! exceeding the cap is a fatal capacity error.

use crate::chunk::{ChunkId, ChunkStore};
use crate::context::{Context, ALIGN_NEST_DEPTH};
use crate::error::FormatError;
use crate::flags::PcFlags;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns parameter names in every multi-line prototype or definition.
pub fn align_func_params(ctx: &mut Context, sm: &mut ChunkStore) -> Result<(), FormatError> {
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
        align_params_of(ctx, sm, open)?;
    }
    Ok(())
}

fn align_params_of(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    open: ChunkId,
) -> Result<(), FormatError> {
    let close = sm.closing_match(open);

    if close.is_none() {
        return Ok(());
    }
    let span = ctx.opts.align_func_params_span.max(1);
    let thresh = ctx.opts.align_func_params_thresh;
    let gap = ctx.opts.align_func_params_gap;
    let base_level = sm.level(open);

    let mut stacks: Vec<AlignStack> = Vec::new();
    let mut pc = sm.next(open);

    while pc.is_some() && pc != close {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            for stack in stacks.iter_mut() {
                stack.new_lines(ctx, sm, count);
            }
            pc = sm.next(pc);
            continue;
        }
        let depth = sm.level(pc).saturating_sub(base_level + 1);

        if depth >= ALIGN_NEST_DEPTH {
            return Err(FormatError::StackCapacity {
                what: "function-parameter nesting",
                limit: ALIGN_NEST_DEPTH,
                line: sm.orig_line(pc),
                col: sm.orig_col(pc),
            });
        }

        if sm.has_flags(pc, PcFlags::VAR_DEF) && sm.is(pc, TokenKind::Word) {
            while stacks.len() <= depth {
                let mut stack = AlignStack::new();
                stack.start(ctx, span, thresh);
                stack.gap = gap;
                stack.star_style = ctx.opts.align_var_def_star_style;
                stack.amp_style = ctx.opts.align_var_def_amp_style;
                stacks.push(stack);
            }
            stacks[depth].add(sm, pc);
        }
        pc = sm.next(pc);
    }

    for stack in stacks.iter_mut() {
        stack.end(ctx, sm);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::indent::indent_text;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    #[test]
    fn parameter_names_align_across_lines() {
        let mut opts = Options::default();
        opts.align_func_params = true;
        opts.align_func_params_span = 2;
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(
            &mut ctx,
            &mut sm,
            "void f(int count,\nconst char *label,\nunsigned flags);\n",
        );
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_func_params(&mut ctx, &mut sm).unwrap();

        let cols: Vec<usize> = ["count", "label", "flags"]
            .iter()
            .map(|t| {
                let id = sm
                    .ids()
                    .into_iter()
                    .find(|id| sm.text(*id) == *t)
                    .unwrap();
                sm.column(id)
            })
            .collect();
        assert_eq!(cols[0], cols[1]);
        assert_eq!(cols[1], cols[2]);
    }
}
