//! Same-function-call parameter alignment.
//!
//! Consecutive calls to the same function line their arguments up by
//! position:
//!
//! ```text
//! set("one",   1);
//! set("three", 3);
//! ```

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::{Context, ALIGN_NEST_DEPTH};
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns argument columns across runs of identical calls.
pub fn align_same_func_call_params(ctx: &mut Context, sm: &mut ChunkStore) {
    let span = if ctx.opts.align_same_func_call_params_span > 0 {
        ctx.opts.align_same_func_call_params_span
    } else {
        3
    };
    let thresh = ctx.opts.align_same_func_call_params_thresh;

    let mut stacks: Vec<AlignStack> = Vec::new();
    let mut run_name = String::new();
    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            for stack in stacks.iter_mut() {
                stack.new_lines(ctx, sm, count);
            }
            pc = sm.next(pc);
            continue;
        }

        if sm.is(pc, TokenKind::FuncCall) && sm.is_first_on_line(pc) {
            let name = sm.text(pc).to_string();

            if name != run_name {
                for stack in stacks.iter_mut() {
                    stack.end(ctx, sm);
                }
                stacks.clear();
                run_name = name;
            }
            add_call_args(ctx, sm, pc, &mut stacks, span, thresh);
        } else if !sm.is_comment(pc) && sm.is_first_on_line(pc) {
            // A different statement breaks the run.
            for stack in stacks.iter_mut() {
                stack.end(ctx, sm);
            }
            stacks.clear();
            run_name.clear();
        }
        pc = sm.next(pc);
    }

    for stack in stacks.iter_mut() {
        stack.end(ctx, sm);
    }
    log_sev!(Severity::AlignSameCall, "same-call alignment done");
}

/// Feeds one call's argument-start chunks into the per-position stacks.
fn add_call_args(
    ctx: &mut Context,
    sm: &mut ChunkStore,
    call: ChunkId,
    stacks: &mut Vec<AlignStack>,
    span: usize,
    thresh: usize,
) {
    let open = sm.next_ncnnl(call, Scope::All);

    if !sm.is(open, TokenKind::FparenOpen) {
        return;
    }
    let close = sm.closing_match(open);
    let arg_level = sm.level(open) + 1;
    let mut idx = 0usize;
    let mut expect_arg = true;
    let mut pc = sm.next_ncnnl(open, Scope::All);

    while pc.is_some() && pc != close && idx < ALIGN_NEST_DEPTH {
        if expect_arg && sm.level(pc) == arg_level {
            while stacks.len() <= idx {
                let mut stack = AlignStack::new();
                stack.start(ctx, span, thresh);
                stacks.push(stack);
            }
            stacks[idx].add(sm, pc);
            expect_arg = false;
        }

        if sm.is(pc, TokenKind::Comma) && sm.level(pc) == arg_level {
            idx += 1;
            expect_arg = true;
        }
        pc = sm.next_ncnnl(pc, Scope::All);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::indent::indent_text;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    #[test]
    fn matching_calls_align_argument_columns() {
        let mut opts = Options::default();
        opts.align_same_func_call_params = true;
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(
            &mut ctx,
            &mut sm,
            "void f(void) {\nset(\"one\", 1);\nset(\"three\", 3);\n}\n",
        );
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_same_func_call_params(&mut ctx, &mut sm);

        let ones: Vec<usize> = sm
            .ids()
            .into_iter()
            .filter(|id| matches!(sm.text(*id), "1" | "3"))
            .map(|id| sm.column(id))
            .collect();
        assert_eq!(ones.len(), 2);
        assert_eq!(ones[0], ones[1]);
    }
}
