//! Inline-assembly colon alignment.
//!
//! The output/input/clobber separators of a multi-line `asm(...)` align:
//!
//! ```text
//! asm volatile ("insn"
//!               : "=r"(out)
//!               : "r"(in));
//! ```
//!
//! Behavior on *nested* `asm(...)` constructs is undefined; only the
//! outermost construct's colons are considered.

use crate::chunk::{ChunkStore, Scope};
use crate::context::Context;
use crate::token::TokenKind;

use super::stack::AlignStack;

/// Aligns the section colons of each inline-asm statement.
pub fn align_asm_colons(ctx: &mut Context, sm: &mut ChunkStore) {
    let ids = sm.ids();

    for kw in ids {
        if !sm.is(kw, TokenKind::Asm) {
            continue;
        }
        let mut open = sm.next_ncnnl(kw, Scope::All);

        // `asm volatile (...)`
        while sm.is(open, TokenKind::Qualifier) {
            open = sm.next_ncnnl(open, Scope::All);
        }

        if !sm.kind(open).is_paren_open() {
            continue;
        }
        let close = sm.closing_match(open);
        let colon_level = sm.level(open) + 1;

        let mut stack = AlignStack::new();
        stack.start(ctx, 255, 0);

        let mut pc = sm.next(open);
        while pc.is_some() && pc != close {
            if sm.is_newline(pc) {
                let count = sm.nl_count(pc);
                stack.new_lines(ctx, sm, count);
            } else if matches!(sm.kind(pc), TokenKind::Colon | TokenKind::AsmColon)
                && sm.level(pc) == colon_level
            {
                sm.set_kind(pc, TokenKind::AsmColon);
                sm.set_parent(pc, TokenKind::Asm);
                stack.add(sm, pc);
            }
            pc = sm.next(pc);
        }
        stack.end(ctx, sm);
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
    fn asm_section_colons_align() {
        let mut opts = Options::default();
        opts.align_asm_colon = true;
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(
            &mut ctx,
            &mut sm,
            "asm (\"nop\"\n: \"=r\" (out)\n: \"r\" (in));\n",
        );
        crate::levels::assign_levels(&mut ctx, &mut sm);
        crate::combine::combine(&mut ctx, &mut sm);
        indent_text(&mut ctx, &mut sm);
        align_asm_colons(&mut ctx, &mut sm);

        let cols: Vec<usize> = sm
            .ids()
            .into_iter()
            .filter(|id| sm.is(*id, TokenKind::AsmColon))
            .map(|id| sm.column(id))
            .collect();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0], cols[1]);
    }
}
