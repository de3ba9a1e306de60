//! Function-prototype alignment.
//!
//! Aligns the names of consecutive prototypes so the return types read as
//! a column:
//!
//! ```text
//! int  foo(void);
//! void bar(int x);
//! ```
//!
//! With `align_mix_var_proto`, top-level variable definitions join the
//! same group instead of forming their own.

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns prototype names (and optionally mixed-in variable names).
pub fn align_func_proto(ctx: &mut Context, sm: &mut ChunkStore, span: usize) {
    let mix = ctx.opts.align_mix_var_proto;
    let mut stack = AlignStack::new();
    stack.start(ctx, span, 0);
    stack.gap = ctx.opts.align_func_proto_gap;
    stack.star_style = ctx.opts.align_var_def_star_style;
    stack.amp_style = ctx.opts.align_var_def_amp_style;

    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            stack.new_lines(ctx, sm, count);
        } else if matches!(
            sm.kind(pc),
            TokenKind::FuncProto | TokenKind::FuncClassProto
        ) {
            // Only the name after a leading return type aligns; a
            // prototype continuing another line is left alone.
            let prev = sm.prev_ncnnl(pc, Scope::All);
            if matches!(
                sm.kind(prev),
                TokenKind::Type | TokenKind::Qualifier | TokenKind::Ptr | TokenKind::ByRef
            ) {
                stack.add(sm, pc);
            }
        } else if mix
            && sm.has_flags(pc, PcFlags::VAR_DEF | PcFlags::VAR_FIRST)
            && sm.brace_level(pc) == 0
        {
            stack.add(sm, pc);
        }
        pc = sm.next(pc);
    }
    stack.end(ctx, sm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::indent::indent_text;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    fn aligned(input: &str, opts: Options, span: usize) -> ChunkStore {
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_func_proto(&mut ctx, &mut sm, span);
        sm
    }

    fn col_of(sm: &ChunkStore, text: &str) -> usize {
        let id = sm
            .ids()
            .into_iter()
            .find(|id| sm.text(*id) == text)
            .unwrap();
        sm.column(id)
    }

    #[test]
    fn prototype_names_share_a_column() {
        let sm = aligned(
            "int foo(void);\nvoid barbar(int x);\n",
            Options::default(),
            3,
        );
        assert_eq!(col_of(&sm, "foo"), col_of(&sm, "barbar"));
    }

    #[test]
    fn mixed_variables_join_when_requested() {
        let mut opts = Options::default();
        opts.align_mix_var_proto = true;
        let sm = aligned("int foo(void);\nunsigned counter;\n", opts, 3);
        assert_eq!(col_of(&sm, "foo"), col_of(&sm, "counter"));
    }
}
