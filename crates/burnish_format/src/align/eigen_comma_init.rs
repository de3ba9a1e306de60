//! Eigen-style comma-initializer alignment.
//!
//! A matrix filled with `m << 1, 2,\n 3, 4;` lays its continuation rows
//! out under the first value after the `<<`:
//!
//! ```text
//! m << 1, 2,
//!      3, 4;
//! ```

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns the rows of `<<`-then-comma matrix initializers.
pub fn align_eigen_comma_init(ctx: &mut Context, sm: &mut ChunkStore) {
    let mut pc = sm.head();

    while pc.is_some() {
        let next = sm.next(pc);

        if sm.is(pc, TokenKind::Shift) && sm.text(pc) == "<<" && is_comma_chain(sm, pc) {
            let first_value = sm.next_ncnnl(pc, Scope::All);
            let mut stack = AlignStack::new();
            stack.start(ctx, 255, 0);
            stack.add(sm, first_value);

            // Each continuation row's first chunk joins the group.
            let mut cur = first_value;
            while cur.is_some() && !sm.is(cur, TokenKind::Semicolon) {
                if sm.is_newline(cur) {
                    let count = sm.nl_count(cur);
                    stack.new_lines(ctx, sm, count);
                    let row = sm.next_ncnnl(cur, Scope::All);
                    if row.is_some() && !sm.is(row, TokenKind::Semicolon) {
                        stack.add(sm, row);
                    }
                }
                cur = sm.next(cur);
            }
            stack.end(ctx, sm);
        }
        pc = next;
    }
}

/// `<<` followed by a comma-separated value list ending in `;` with no
/// second `<<` is the Eigen fill idiom.
fn is_comma_chain(sm: &ChunkStore, shift: crate::chunk::ChunkId) -> bool {
    let mut cur = sm.next_ncnnl(shift, Scope::All);
    let mut commas = 0usize;

    while cur.is_some() {
        match sm.kind(cur) {
            TokenKind::Semicolon => return commas > 0,
            TokenKind::Shift => return false,
            TokenKind::Comma => commas += 1,
            TokenKind::Number | TokenKind::NumberFp | TokenKind::Word | TokenKind::Minus
            | TokenKind::Neg | TokenKind::Arith => {}
            _ => return false,
        }
        cur = sm.next_ncnnl(cur, Scope::All);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::indent::indent_text;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    #[test]
    fn matrix_rows_align_under_the_first_value() {
        let mut opts = Options::default();
        opts.align_eigen_comma_init = true;
        let mut ctx = Context::new(opts, Lang::CPP);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, "m << 1, 2,\n3, 4;\n");
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_eigen_comma_init(&mut ctx, &mut sm);

        let one = sm.ids().into_iter().find(|id| sm.text(*id) == "1").unwrap();
        let three = sm.ids().into_iter().find(|id| sm.text(*id) == "3").unwrap();
        assert_eq!(sm.column(one), sm.column(three));
    }

    #[test]
    fn stream_output_is_not_a_matrix() {
        let mut ctx = Context::new(Options::default(), Lang::CPP);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, "cout << a << b;\n");
        crate::levels::assign_levels(&mut ctx, &mut sm);
        assert!(!is_comma_chain(&sm, {
            let mut it = sm.ids().into_iter();
            it.find(|id| sm.text(*id) == "<<").unwrap()
        }));
    }
}
