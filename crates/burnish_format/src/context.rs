//! Process-wide state for one formatting invocation.
//!
//! The original design kept this in globals; here it is an explicit value
//! constructed before tokenizing and dropped after rendering. Tests build a
//! fresh [`Context`] per case, and concurrent invocations on different
//! inputs each own their context and chunk store, so the core has no
//! cross-file shared mutable state.

use crate::chunk::ChunkId;
use crate::flags::Lang;
use crate::options::Options;
use crate::token::TokenKind;

/// Capacity of the init-brace scratch table.
pub const AL_SIZE: usize = 8000;

/// Maximum paren nesting tracked by the function-parameter aligner.
pub const ALIGN_NEST_DEPTH: usize = 16;

/// One recorded column of interest on the first line of an init-brace block.
#[derive(Debug, Clone, Copy)]
pub struct AlCell {
    pub kind: TokenKind,
    pub col: usize,
    pub len: usize,
    /// The chunk that established this column.
    pub ref_id: ChunkId,
}

/// State threaded through every pipeline stage.
pub struct Context {
    /// Dialect rules for the current input.
    pub lang: Lang,
    /// Name used in diagnostics only; the core never opens files.
    pub filename: String,
    /// Count of recoverable problems seen so far.
    pub error_count: usize,
    /// Dirty counter bumped on every structural edit.
    pub changes: usize,
    /// Scratch table of the init-brace scanner. Bounded by [`AL_SIZE`].
    pub al: Vec<AlCell>,
    /// Set when the current init-brace block started with `[x] =`.
    pub al_c99_array: bool,
    /// Fragment mode: indent relative to the first line's column.
    pub frag: bool,
    pub frag_cols: usize,
    pub opts: Options,
    block_counter: usize,
    align_stack_counter: usize,
}

impl Context {
    pub fn new(opts: Options, lang: Lang) -> Self {
        Context {
            lang,
            filename: String::new(),
            error_count: 0,
            changes: 0,
            al: Vec::new(),
            al_c99_array: false,
            frag: false,
            frag_cols: 0,
            opts,
            block_counter: 0,
            align_stack_counter: 0,
        }
    }

    /// Hands out the next block number.
    pub fn next_block_number(&mut self) -> usize {
        self.block_counter += 1;
        self.block_counter
    }

    /// Hands out the next alignment-stack id.
    pub fn next_stack_id(&mut self) -> usize {
        self.align_stack_counter += 1;
        self.align_stack_counter
    }

    /// Records a structural edit.
    pub fn mark_change(&mut self) {
        self.changes += 1;
    }

    /// Records a recoverable problem.
    pub fn note_error(&mut self) {
        self.error_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_numbers_are_monotonic() {
        let mut ctx = Context::new(Options::default(), Lang::CPP);
        let a = ctx.next_block_number();
        let b = ctx.next_block_number();
        assert!(b > a);
    }

    #[test]
    fn fresh_context_is_clean() {
        let ctx = Context::new(Options::default(), Lang::C);
        assert_eq!(ctx.error_count, 0);
        assert_eq!(ctx.changes, 0);
        assert!(ctx.al.is_empty());
    }

    #[test]
    fn stack_ids_restart_per_context() {
        let mut a = Context::new(Options::default(), Lang::C);
        let mut b = Context::new(Options::default(), Lang::C);
        assert_eq!(a.next_stack_id(), 1);
        assert_eq!(a.next_stack_id(), 2);
        assert_eq!(b.next_stack_id(), 1);
    }
}
