//! The alignment stack.
//!
//! An `AlignStack` gathers candidate chunks for one column group and
//! commits them to a shared column. Two lists drive it: `aligned` holds
//! the current group, `skipped` holds candidates that violated the column
//! threshold but may re-cluster into their own group later.
//!
//! Lifecycle: [`AlignStack::start`], any number of [`AlignStack::add`] /
//! [`AlignStack::new_lines`], then [`AlignStack::end`]. A newline gap
//! larger than the span flushes the group; a threshold violation demotes
//! the candidate to `skipped`; `flush` commits every member to the group's
//! maximum column and re-adds the skipped ones as a fresh group.
//!
//! Star/amp styles decide where pointer declarators sit relative to the
//! aligned column: `Include` pulls the stars into the aligned block,
//! `Dangle` lets them hang to the left of the aligned identifier.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::PcFlags;
use crate::indent::{align_tab_column, align_to_column};
use crate::log_sev;
use crate::options::StarStyle;
use crate::severity::Severity;
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy)]
struct Member {
    /// The chunk whose column gets aligned.
    chunk: ChunkId,
    /// Width of a dangling star run sitting left of the aligned chunk.
    dangle: usize,
}

/// One column-aligning state machine.
pub struct AlignStack {
    aligned: Vec<Member>,
    skipped: Vec<ChunkId>,
    pub max_col: usize,
    max_right: usize,
    pub min_col: usize,
    pub span: usize,
    pub thresh: usize,
    pub gap: usize,
    pub right_align: bool,
    pub star_style: StarStyle,
    pub amp_style: StarStyle,
    pub skip_first: bool,
    seqnum: usize,
    nl_seqnum: usize,
    stack_id: usize,
    started: bool,
}

impl Default for AlignStack {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignStack {
    pub fn new() -> Self {
        AlignStack {
            aligned: Vec::new(),
            skipped: Vec::new(),
            max_col: 0,
            max_right: 0,
            min_col: usize::MAX,
            span: 0,
            thresh: 0,
            gap: 0,
            right_align: false,
            star_style: StarStyle::Ignore,
            amp_style: StarStyle::Ignore,
            skip_first: false,
            seqnum: 0,
            nl_seqnum: 0,
            stack_id: 0,
            started: false,
        }
    }

    /// Begins a group with the given span and column threshold; the stack
    /// id is drawn from the context.
    pub fn start(&mut self, ctx: &mut Context, span: usize, thresh: usize) {
        self.aligned.clear();
        self.skipped.clear();
        self.max_col = 0;
        self.max_right = 0;
        self.min_col = usize::MAX;
        self.span = span;
        self.thresh = thresh;
        self.seqnum = 0;
        self.nl_seqnum = 0;
        self.stack_id = ctx.next_stack_id();
        self.started = true;
    }

    pub fn len(&self) -> usize {
        self.aligned.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column this candidate wants, adjusted for star/amp style and
    /// the configured gap.
    fn effective(&self, sm: &ChunkStore, pc: ChunkId) -> Member {
        let mut anchor = pc;
        let mut dangle = 0usize;

        // Walk leading pointer/reference tokens on the same line.
        let mut prev = sm.prev_nc(pc, Scope::All);
        loop {
            let style = match sm.kind(prev) {
                TokenKind::Ptr | TokenKind::Star | TokenKind::Deref => self.star_style,
                TokenKind::ByRef | TokenKind::Amp | TokenKind::Addr => self.amp_style,
                _ => break,
            };
            match style {
                StarStyle::Ignore => break,
                StarStyle::Include => {
                    anchor = prev;
                    prev = sm.prev_nc(prev, Scope::All);
                }
                StarStyle::Dangle => {
                    dangle += sm.width(prev);
                    prev = sm.prev_nc(prev, Scope::All);
                }
            }
        }
        Member {
            chunk: if dangle > 0 { pc } else { anchor },
            dangle,
        }
    }

    /// Column the group must reach so this member keeps its gap from the
    /// token before it on the same line.
    fn gap_floor(&self, sm: &ChunkStore, member: &Member) -> usize {
        // The token left of the aligned block (stars included); a line
        // start has no gap requirement.
        let mut left = sm.prev_nc(member.chunk, Scope::All);
        while matches!(
            sm.kind(left),
            TokenKind::Ptr
                | TokenKind::Star
                | TokenKind::Deref
                | TokenKind::ByRef
                | TokenKind::Amp
                | TokenKind::Addr
        ) {
            left = sm.prev_nc(left, Scope::All);
        }
        if left.is_none() || sm.is_newline(left) {
            return 1;
        }
        sm.end_column(left) + self.gap + member.dangle
    }

    /// Adds a candidate chunk.
    pub fn add(&mut self, sm: &mut ChunkStore, pc: ChunkId) {
        if !self.started || pc.is_none() {
            return;
        }
        self.seqnum += 1;
        self.nl_seqnum = 0;

        let member = self.effective(sm, pc);
        let col = sm.column(member.chunk).max(self.gap_floor(sm, &member));

        // Threshold check against the group's current right edge.
        if self.thresh > 0 && !self.aligned.is_empty() {
            let too_far_right = col > self.max_col + self.thresh;
            let too_far_left = col + self.thresh < self.max_col;

            if too_far_right || too_far_left {
                self.skipped.push(pc);
                log_sev!(
                    Severity::AlignStack,
                    "stack {} skipped '{}' at line {} (col {} vs max {})",
                    self.stack_id,
                    sm.text(pc),
                    sm.orig_line(pc),
                    col,
                    self.max_col
                );
                return;
            }
        }
        let width = sm.width(member.chunk);
        self.aligned.push(member);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
        self.max_right = self.max_right.max(col + width);
    }

    /// Notes `count` newlines; a gap wider than the span closes the group.
    pub fn new_lines(&mut self, ctx: &mut Context, sm: &mut ChunkStore, count: usize) {
        if self.aligned.is_empty() && self.skipped.is_empty() {
            return;
        }
        self.nl_seqnum += count;

        if self.nl_seqnum > self.span {
            self.flush(ctx, sm);
        }
    }

    /// Commits the current group, then re-adds the skipped candidates as a
    /// fresh group (they may cluster on their own).
    pub fn flush(&mut self, ctx: &mut Context, sm: &mut ChunkStore) {
        if self.aligned.len() == 1 && self.skip_first {
            // A lone member would only be indented for no visual gain.
            self.aligned.clear();
        }
        let target = if self.aligned.is_empty() {
            0
        } else if ctx.opts.align_on_tabstop {
            align_tab_column(ctx, self.max_col)
        } else {
            self.max_col
        };
        let right_edge = self.max_right;

        if self.aligned.len() > 1 {
            log_sev!(
                Severity::AlignStack,
                "stack {} flush: {} members to column {}",
                self.stack_id,
                self.aligned.len(),
                target
            );
            let members = std::mem::take(&mut self.aligned);
            let start = members[0].chunk;
            let mut prev_member = ChunkId::NONE;

            for member in &members {
                let col = if self.right_align {
                    let width = sm.width(member.chunk);
                    right_edge.saturating_sub(width).max(1)
                } else {
                    target
                };

                if member.dangle > 0 {
                    // The stars hang left of the aligned column: put the
                    // first star at col - dangle, the word lands on col.
                    let mut star = sm.prev_nc(member.chunk, Scope::All);
                    let mut run = vec![member.chunk];
                    while matches!(
                        sm.kind(star),
                        TokenKind::Ptr
                            | TokenKind::Star
                            | TokenKind::Deref
                            | TokenKind::ByRef
                            | TokenKind::Amp
                            | TokenKind::Addr
                    ) {
                        run.push(star);
                        star = sm.prev_nc(star, Scope::All);
                    }
                    let first = *run.last().unwrap();
                    align_to_column(ctx, sm, first, col.saturating_sub(member.dangle).max(1));
                } else {
                    align_to_column(ctx, sm, member.chunk, col);
                }
                sm.add_flags(member.chunk, PcFlags::WAS_ALIGNED);

                // Record the column group for quick-align-again.
                if let Some(chunk) = sm.get_mut(member.chunk) {
                    chunk.align.start = start;
                    chunk.align.next = ChunkId::NONE;
                    chunk.align.star_style = self.star_style;
                    chunk.align.amp_style = self.amp_style;
                    chunk.align.gap = self.gap;
                    chunk.align.right_align = self.right_align;
                }
                if prev_member.is_some() {
                    if let Some(chunk) = sm.get_mut(prev_member) {
                        chunk.align.next = member.chunk;
                    }
                }
                prev_member = member.chunk;
            }
            sm.add_flags(start, PcFlags::ALIGN_START | PcFlags::ANCHOR);
        } else {
            self.aligned.clear();
        }
        self.max_col = 0;
        self.max_right = 0;
        self.min_col = usize::MAX;
        self.nl_seqnum = 0;

        // Skipped members re-enter as their own group.
        let skipped = std::mem::take(&mut self.skipped);
        for pc in skipped {
            self.add(sm, pc);
        }
    }

    /// Discards everything without committing.
    pub fn reset(&mut self) {
        self.aligned.clear();
        self.skipped.clear();
        self.max_col = 0;
        self.max_right = 0;
        self.min_col = usize::MAX;
        self.nl_seqnum = 0;
    }

    /// Final flush and disposal.
    pub fn end(&mut self, ctx: &mut Context, sm: &mut ChunkStore) {
        if !self.started {
            return;
        }
        self.flush(ctx, sm);

        // A skipped-only tail may have re-clustered; commit that too.
        if !self.aligned.is_empty() {
            self.flush(ctx, sm);
        }
        self.started = false;
    }
}
