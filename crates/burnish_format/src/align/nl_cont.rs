//! Backslash-newline group alignment.
//!
//! The splices of a multi-line macro line up one column past the widest
//! body line:
//!
//! ```text
//! #define M(x) \
//!     f(x);    \
//!     g(x);
//! ```

use crate::chunk::{ChunkId, ChunkStore};
use crate::context::Context;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Aligns every run of continuation backslashes.
pub fn align_nl_cont(ctx: &mut Context, sm: &mut ChunkStore) {
    let mut group: Vec<ChunkId> = Vec::new();
    let mut max_col = 0usize;
    let mut pc = sm.head();

    while pc.is_some() {
        if sm.is(pc, TokenKind::NlCont) {
            let prev = sm.prev(pc);
            let edge = sm.end_column(prev) + 1;
            max_col = max_col.max(edge);
            group.push(pc);
        } else if sm.is(pc, TokenKind::Newline) && !group.is_empty() {
            commit(ctx, sm, &group, max_col);
            group.clear();
            max_col = 0;
        }
        pc = sm.next(pc);
    }
    commit(ctx, sm, &group, max_col);
}

fn commit(ctx: &mut Context, sm: &mut ChunkStore, group: &[ChunkId], col: usize) {
    if group.len() < 2 {
        return;
    }
    log_sev!(
        Severity::AlignNlCont,
        "aligning {} continuations to column {}",
        group.len(),
        col
    );

    for pc in group {
        sm.set_column(*pc, col);
    }
    ctx.mark_change();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Lang;
    use crate::options::Options;
    use crate::tokenize::tokenize;

    #[test]
    fn continuation_backslashes_line_up() {
        let mut opts = Options::default();
        opts.align_nl_cont = true;
        let mut ctx = Context::new(opts, Lang::C);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, "#define M(x) \\\nf(x); \\\ng(x);\n");
        crate::preproc::frame_preprocessor(&mut ctx, &mut sm);
        align_nl_cont(&mut ctx, &mut sm);

        let cols: Vec<usize> = sm
            .ids()
            .into_iter()
            .filter(|id| sm.is(*id, TokenKind::NlCont))
            .map(|id| sm.column(id))
            .collect();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0], cols[1]);
    }
}
