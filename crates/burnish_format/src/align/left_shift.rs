//! Left-shift chain alignment.
//!
//! Stream-insertion chains that continue onto new lines align their `<<`
//! tokens:
//!
//! ```text
//! cout << "a"
//!      << "b";
//! ```

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns `<<` tokens that start continuation lines of one statement.
pub fn align_left_shift(ctx: &mut Context, sm: &mut ChunkStore) {
    let mut stack = AlignStack::new();
    stack.start(ctx, 255, 0);

    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is_newline(pc) {
            let count = sm.nl_count(pc);
            stack.new_lines(ctx, sm, count);
        } else if sm.is(pc, TokenKind::Shift) && sm.text(pc) == "<<" {
            if sm.is_first_on_line(pc) {
                // A continuation line led by `<<` joins the chain.
                stack.add(sm, pc);
            } else {
                let prev = sm.prev_ncnnl(pc, Scope::All);
                // The first `<<` of the statement anchors the chain when
                // the statement continues past this line.
                if !sm.is(prev, TokenKind::Shift) && statement_continues(sm, pc) {
                    stack.add(sm, pc);
                }
            }
        } else if sm.is(pc, TokenKind::Semicolon) && sm.level(pc) == 0 {
            stack.end(ctx, sm);
            stack.start(ctx, 255, 0);
        }
        pc = sm.next(pc);
    }
    stack.end(ctx, sm);
}

/// Does the statement holding `pc` run past the end of this line?
fn statement_continues(sm: &ChunkStore, pc: crate::chunk::ChunkId) -> bool {
    let mut cur = pc;

    while cur.is_some() {
        if sm.is(cur, TokenKind::Semicolon) {
            return false;
        }
        if sm.is_newline(cur) {
            return true;
        }
        cur = sm.next(cur);
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
    fn continuation_shifts_align_with_the_first() {
        let mut opts = Options::default();
        opts.align_left_shift = true;
        let mut ctx = Context::new(opts, Lang::CPP);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, "cout << \"a\"\n<< \"b\"\n<< \"c\";\n");
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_left_shift(&mut ctx, &mut sm);

        let cols: Vec<usize> = sm
            .ids()
            .into_iter()
            .filter(|id| sm.text(*id) == "<<")
            .map(|id| sm.column(id))
            .collect();
        assert_eq!(cols.len(), 3);
        assert!(cols.iter().all(|c| *c == cols[0]));
    }
}
