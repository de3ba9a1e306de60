//! Preprocessor `#define` value alignment.
//!
//! ```text
//! #define FOO_VAL     15
//! #define MAX_TIMEOUT 60
//! #define FOO(x)      ((x) * 65)
//! ```
//!
//! The aligned chunk is the first body token after the macro name (after
//! the argument list for function-like macros).

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns the value column of consecutive object/function macros.
pub fn align_pp_defines(ctx: &mut Context, sm: &mut ChunkStore) {
    let span = ctx.opts.align_pp_define_span;
    let mut stack = AlignStack::new();
    stack.start(ctx, span, 0);
    stack.gap = ctx.opts.align_pp_define_gap;

    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is(pc, TokenKind::Newline) {
            let count = sm.nl_count(pc);
            stack.new_lines(ctx, sm, count);
        } else if sm.is(pc, TokenKind::Macro) {
            let value = sm.next_in(pc, Scope::Preproc);
            if value.is_some() && !sm.is(value, TokenKind::NlCont) {
                stack.add(sm, value);
            }
        } else if sm.is(pc, TokenKind::MacroFunc) {
            let open = sm.next_in(pc, Scope::Preproc);
            let close = sm.closing_match(open);
            let value = sm.next_in(close, Scope::Preproc);
            if value.is_some() && !sm.is(value, TokenKind::NlCont) {
                stack.add(sm, value);
            }
        }
        pc = sm.next(pc);
    }
    stack.end(ctx, sm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    #[test]
    fn define_values_share_a_column() {
        let mut opts = Options::default();
        opts.align_pp_define_span = 3;
        opts.align_pp_define_gap = 1;
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(
            &mut ctx,
            &mut sm,
            "#define FOO_VAL 15\n#define MAX_TIMEOUT 60\n",
        );
        crate::preproc::frame_preprocessor(&mut ctx, &mut sm);
        crate::levels::assign_levels(&mut ctx, &mut sm);
        align_pp_defines(&mut ctx, &mut sm);

        let cols: Vec<usize> = sm
            .ids()
            .into_iter()
            .filter(|id| matches!(sm.text(*id), "15" | "60"))
            .map(|id| sm.column(id))
            .collect();
        assert_eq!(cols[0], cols[1]);
    }
}
