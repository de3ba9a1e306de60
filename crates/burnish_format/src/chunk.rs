//! The chunk record and the chunk store.
//!
//! A [`Chunk`] is one classified lexical unit plus layout metadata; the
//! [`ChunkStore`] owns every chunk of a formatting session and links them
//! into a doubly-linked sequence over the index arena. All other pipeline
//! stages create, retag, move and delete chunks exclusively through the
//! store.
//!
//! ## The null sentinel
//!
//! Boundary queries return [`ChunkId::NONE`]. Every navigation method is
//! safe to call on the sentinel and returns the sentinel, so neighbor walks
//! never need a null check mid-expression:
//!
//! ```
//! use burnish_format::{Chunk, ChunkStore, TokenKind};
//!
//! let mut sm = ChunkStore::new();
//! let a = sm.append(Chunk::new("a", TokenKind::Word));
//! // Walking past the tail parks on the sentinel instead of failing.
//! let beyond = sm.next(sm.next(a));
//! assert!(beyond.is_none());
//! assert!(sm.next(beyond).is_none());
//! ```
//!
//! ## Scopes
//!
//! Navigation runs in one of two scopes: [`Scope::All`] sees every chunk;
//! [`Scope::Preproc`] confines a walk that starts inside a preprocessor
//! region to that region, and skips preprocessor regions entirely when the
//! walk starts outside one.

use burnish_base::{Arena, Idx, SourcePos};

use crate::flags::PcFlags;
use crate::options::StarStyle;
use crate::token::TokenKind;

/// Handle to a chunk owned by a [`ChunkStore`].
pub type ChunkId = Idx;

/// Weak links and style of a committed alignment group member.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignLink {
    /// First member of the column group.
    pub start: ChunkId,
    /// Next member of the column group.
    pub next: ChunkId,
    pub star_style: StarStyle,
    pub amp_style: StarStyle,
    pub gap: usize,
    pub right_align: bool,
}

/// One classified lexical unit.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    /// Exact source bytes of the token.
    pub text: String,
    pub kind: TokenKind,
    /// What construct this token is part of.
    pub parent: TokenKind,
    pub flags: PcFlags,
    /// Where the token sat in the input.
    pub orig: SourcePos,
    /// 1-based target output column.
    pub column: usize,
    /// Indent column of the line this chunk starts.
    pub column_indent: usize,
    /// For newline chunks, how many terminators collapsed into this one.
    pub nl_count: usize,
    /// Paren + brace + angle + square nesting depth.
    pub level: usize,
    /// Brace-only nesting depth.
    pub brace_level: usize,
    /// Preprocessor conditional nesting depth.
    pub pp_level: usize,
    /// Sibling-distinguishing block id.
    pub block_number: usize,
    pub align: AlignLink,
}

impl Chunk {
    /// Creates a chunk with the given text and kind; everything else zeroed.
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Chunk {
            text: text.into(),
            kind,
            ..Chunk::default()
        }
    }

    /// Creates a newline chunk holding `count` line terminators.
    pub fn newline(count: usize) -> Self {
        let mut c = Chunk::new("\n", TokenKind::Newline);
        c.nl_count = count;
        c
    }

    /// Display width of the token text in columns.
    pub fn width(&self) -> usize {
        if self.kind.is_newline() {
            0
        } else {
            self.text.chars().count()
        }
    }
}

/// Navigation scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Visit every chunk.
    All,
    /// Stay inside (or entirely outside) preprocessor regions.
    Preproc,
}

struct Node {
    chunk: Chunk,
    prev: ChunkId,
    next: ChunkId,
}

/// Owner of every chunk in a formatting session.
#[derive(Default)]
pub struct ChunkStore {
    arena: Arena<Node>,
    head: ChunkId,
    tail: ChunkId,
}

impl ChunkStore {
    pub fn new() -> Self {
        ChunkStore {
            arena: Arena::new(),
            head: ChunkId::NONE,
            tail: ChunkId::NONE,
        }
    }

    /// Number of live chunks.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn head(&self) -> ChunkId {
        self.head
    }

    pub fn tail(&self) -> ChunkId {
        self.tail
    }

    // ------------------------------------------------------------------
    // Structure edits
    // ------------------------------------------------------------------

    /// Appends a chunk at the tail.
    pub fn append(&mut self, chunk: Chunk) -> ChunkId {
        let id = self.arena.alloc(Node {
            chunk,
            prev: self.tail,
            next: ChunkId::NONE,
        });

        if self.tail.is_some() {
            if let Some(tail) = self.arena.get_mut(self.tail) {
                tail.next = id;
            }
        } else {
            self.head = id;
        }
        self.tail = id;
        id
    }

    /// Inserts a chunk immediately after `after`.
    ///
    /// Inserting after the sentinel prepends at the head.
    pub fn insert_after(&mut self, after: ChunkId, chunk: Chunk) -> ChunkId {
        if after.is_none() {
            return self.prepend(chunk);
        }
        let next = self.next(after);
        let id = self.arena.alloc(Node {
            chunk,
            prev: after,
            next,
        });

        if let Some(node) = self.arena.get_mut(after) {
            node.next = id;
        }

        if next.is_some() {
            if let Some(node) = self.arena.get_mut(next) {
                node.prev = id;
            }
        } else {
            self.tail = id;
        }
        id
    }

    /// Inserts a chunk immediately before `before`.
    pub fn insert_before(&mut self, before: ChunkId, chunk: Chunk) -> ChunkId {
        if before.is_none() {
            return self.append(chunk);
        }
        let prev = self.prev(before);
        self.insert_after(prev, chunk)
    }

    fn prepend(&mut self, chunk: Chunk) -> ChunkId {
        let id = self.arena.alloc(Node {
            chunk,
            prev: ChunkId::NONE,
            next: self.head,
        });

        if self.head.is_some() {
            if let Some(node) = self.arena.get_mut(self.head) {
                node.prev = id;
            }
        } else {
            self.tail = id;
        }
        self.head = id;
        id
    }

    /// Unlinks and invalidates a chunk. The id must not be used afterwards.
    pub fn remove(&mut self, id: ChunkId) {
        if id.is_none() {
            return;
        }
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        if prev.is_some() {
            if let Some(node) = self.arena.get_mut(prev) {
                node.next = next;
            }
        } else {
            self.head = next;
        }

        if next.is_some() {
            if let Some(node) = self.arena.get_mut(next) {
                node.prev = prev;
            }
        } else {
            self.tail = prev;
        }
        self.arena.free(id);
    }

    /// Unlinks `src` and relinks it immediately after `dest`.
    pub fn move_after(&mut self, src: ChunkId, dest: ChunkId) {
        if src.is_none() || dest.is_none() || src == dest {
            return;
        }
        let (prev, next) = match self.arena.get(src) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        // unlink
        if prev.is_some() {
            if let Some(node) = self.arena.get_mut(prev) {
                node.next = next;
            }
        } else {
            self.head = next;
        }
        if next.is_some() {
            if let Some(node) = self.arena.get_mut(next) {
                node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        // relink after dest
        let dest_next = self.next(dest);
        if let Some(node) = self.arena.get_mut(src) {
            node.prev = dest;
            node.next = dest_next;
        }
        if let Some(node) = self.arena.get_mut(dest) {
            node.next = src;
        }
        if dest_next.is_some() {
            if let Some(node) = self.arena.get_mut(dest_next) {
                node.prev = src;
            }
        } else {
            self.tail = src;
        }
    }

    /// Clones `src` and inserts the copy immediately after `dest`.
    pub fn copy_and_add_after(&mut self, src: ChunkId, dest: ChunkId) -> ChunkId {
        let copy = match self.get(src) {
            Some(chunk) => chunk.clone(),
            None => return ChunkId::NONE,
        };
        self.insert_after(dest, copy)
    }

    // ------------------------------------------------------------------
    // Field access
    // ------------------------------------------------------------------

    /// Borrow a chunk. `None` for the sentinel or freed ids.
    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.arena.get(id).map(|node| &node.chunk)
    }

    /// Borrow a chunk mutably.
    pub fn get_mut(&mut self, id: ChunkId) -> Option<&mut Chunk> {
        self.arena.get_mut(id).map(|node| &mut node.chunk)
    }

    pub fn kind(&self, id: ChunkId) -> TokenKind {
        self.get(id).map(|c| c.kind).unwrap_or(TokenKind::None)
    }

    pub fn parent(&self, id: ChunkId) -> TokenKind {
        self.get(id).map(|c| c.parent).unwrap_or(TokenKind::None)
    }

    pub fn flags(&self, id: ChunkId) -> PcFlags {
        self.get(id).map(|c| c.flags).unwrap_or_default()
    }

    pub fn text(&self, id: ChunkId) -> &str {
        self.get(id).map(|c| c.text.as_str()).unwrap_or("")
    }

    pub fn level(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.level).unwrap_or(0)
    }

    pub fn brace_level(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.brace_level).unwrap_or(0)
    }

    pub fn pp_level(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.pp_level).unwrap_or(0)
    }

    pub fn column(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.column).unwrap_or(0)
    }

    pub fn orig_line(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.orig.line).unwrap_or(0)
    }

    pub fn orig_col(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.orig.col).unwrap_or(0)
    }

    pub fn nl_count(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.nl_count).unwrap_or(0)
    }

    pub fn width(&self, id: ChunkId) -> usize {
        self.get(id).map(|c| c.width()).unwrap_or(0)
    }

    /// Column one past the last character.
    pub fn end_column(&self, id: ChunkId) -> usize {
        self.column(id) + self.width(id)
    }

    pub fn set_kind(&mut self, id: ChunkId, kind: TokenKind) {
        if let Some(chunk) = self.get_mut(id) {
            chunk.kind = kind;
        }
    }

    pub fn set_parent(&mut self, id: ChunkId, parent: TokenKind) {
        if let Some(chunk) = self.get_mut(id) {
            chunk.parent = parent;
        }
    }

    pub fn set_text(&mut self, id: ChunkId, text: impl Into<String>) {
        if let Some(chunk) = self.get_mut(id) {
            chunk.text = text.into();
        }
    }

    pub fn set_column(&mut self, id: ChunkId, column: usize) {
        if let Some(chunk) = self.get_mut(id) {
            chunk.column = column.max(1);
        }
    }

    pub fn add_flags(&mut self, id: ChunkId, flags: PcFlags) {
        if let Some(chunk) = self.get_mut(id) {
            chunk.flags.insert(flags);
        }
    }

    pub fn clear_flags(&mut self, id: ChunkId, flags: PcFlags) {
        if let Some(chunk) = self.get_mut(id) {
            chunk.flags.remove(flags);
        }
    }

    pub fn has_flags(&self, id: ChunkId, flags: PcFlags) -> bool {
        self.flags(id).contains(flags)
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    pub fn is(&self, id: ChunkId, kind: TokenKind) -> bool {
        self.kind(id) == kind
    }

    pub fn is_newline(&self, id: ChunkId) -> bool {
        self.kind(id).is_newline()
    }

    pub fn is_comment(&self, id: ChunkId) -> bool {
        self.kind(id).is_comment()
    }

    pub fn is_comment_or_newline(&self, id: ChunkId) -> bool {
        let kind = self.kind(id);
        kind.is_comment() || kind.is_newline()
    }

    /// Last non-sentinel chunk before the next newline?
    pub fn is_last_on_line(&self, id: ChunkId) -> bool {
        let next = self.next(id);
        next.is_none() || self.is_newline(next)
    }

    /// First chunk after the preceding newline (or the head)?
    pub fn is_first_on_line(&self, id: ChunkId) -> bool {
        let prev = self.prev(id);
        prev.is_none() || self.is_newline(prev)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Raw successor; sentinel-safe.
    pub fn next(&self, id: ChunkId) -> ChunkId {
        match self.arena.get(id) {
            Some(node) => node.next,
            None => ChunkId::NONE,
        }
    }

    /// Raw predecessor; sentinel-safe.
    pub fn prev(&self, id: ChunkId) -> ChunkId {
        match self.arena.get(id) {
            Some(node) => node.prev,
            None => ChunkId::NONE,
        }
    }

    fn in_preproc(&self, id: ChunkId) -> bool {
        self.has_flags(id, PcFlags::IN_PREPROC)
    }

    fn step(&self, id: ChunkId, fwd: bool, scope: Scope, from_preproc: bool) -> ChunkId {
        let mut cur = if fwd { self.next(id) } else { self.prev(id) };

        if scope == Scope::Preproc {
            if from_preproc {
                // Stay inside the directive.
                if cur.is_some() && !self.in_preproc(cur) {
                    return ChunkId::NONE;
                }
            } else {
                // Skip whole directives.
                while cur.is_some() && self.in_preproc(cur) {
                    cur = if fwd { self.next(cur) } else { self.prev(cur) };
                }
            }
        }
        cur
    }

    fn search(
        &self,
        start: ChunkId,
        fwd: bool,
        scope: Scope,
        mut want: impl FnMut(&Self, ChunkId) -> bool,
    ) -> ChunkId {
        let from_preproc = self.in_preproc(start);
        let mut cur = self.step(start, fwd, scope, from_preproc);

        while cur.is_some() {
            if want(self, cur) {
                return cur;
            }
            cur = self.step(cur, fwd, scope, from_preproc);
        }
        ChunkId::NONE
    }

    /// Next chunk in scope.
    pub fn next_in(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.step(id, true, scope, self.in_preproc(id))
    }

    /// Previous chunk in scope.
    pub fn prev_in(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.step(id, false, scope, self.in_preproc(id))
    }

    /// Next non-comment chunk.
    pub fn next_nc(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.search(id, true, scope, |sm, c| !sm.is_comment(c))
    }

    /// Previous non-comment chunk.
    pub fn prev_nc(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.search(id, false, scope, |sm, c| !sm.is_comment(c))
    }

    /// Next chunk that is neither comment nor newline.
    pub fn next_ncnnl(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.search(id, true, scope, |sm, c| !sm.is_comment_or_newline(c))
    }

    /// Previous chunk that is neither comment nor newline.
    pub fn prev_ncnnl(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.search(id, false, scope, |sm, c| !sm.is_comment_or_newline(c))
    }

    /// Next newline chunk.
    pub fn next_nl(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.search(id, true, scope, |sm, c| sm.is_newline(c))
    }

    /// Previous newline chunk.
    pub fn prev_nl(&self, id: ChunkId, scope: Scope) -> ChunkId {
        self.search(id, false, scope, |sm, c| sm.is_newline(c))
    }

    /// Next chunk of `kind`; when `level` is given, only at that level.
    pub fn next_of_kind(&self, id: ChunkId, kind: TokenKind, level: Option<usize>) -> ChunkId {
        self.search(id, true, Scope::All, |sm, c| {
            sm.kind(c) == kind && level.map_or(true, |l| sm.level(c) == l)
        })
    }

    /// Previous chunk of `kind`; when `level` is given, only at that level.
    pub fn prev_of_kind(&self, id: ChunkId, kind: TokenKind, level: Option<usize>) -> ChunkId {
        self.search(id, false, Scope::All, |sm, c| {
            sm.kind(c) == kind && level.map_or(true, |l| sm.level(c) == l)
        })
    }

    /// First chunk of the physical line containing `id`.
    pub fn line_start(&self, id: ChunkId) -> ChunkId {
        let mut cur = id;
        loop {
            let prev = self.prev(cur);
            if prev.is_none() || self.is_newline(prev) {
                return cur;
            }
            cur = prev;
        }
    }

    /// Pairs an opener with its matching closer in the same family.
    ///
    /// Walks forward counting same-family openers and closers; succeeds when
    /// the depth returns to the opener's. Returns the sentinel when `id` is
    /// not an opener or the stream ends first.
    pub fn closing_match(&self, id: ChunkId) -> ChunkId {
        let kind = self.kind(id);
        let family = match kind.pair_family() {
            Some(f) if kind.is_opener() => f,
            _ => return ChunkId::NONE,
        };
        let mut depth: usize = 0;
        let mut cur = self.next(id);

        while cur.is_some() {
            let k = self.kind(cur);

            if k.pair_family() == Some(family) {
                if k.is_opener() {
                    depth += 1;
                } else if depth == 0 {
                    return cur;
                } else {
                    depth -= 1;
                }
            }
            cur = self.next(cur);
        }
        ChunkId::NONE
    }

    /// Pairs a closer with its matching opener in the same family.
    pub fn opening_match(&self, id: ChunkId) -> ChunkId {
        let kind = self.kind(id);
        let family = match kind.pair_family() {
            Some(f) if kind.is_closer() => f,
            _ => return ChunkId::NONE,
        };
        let mut depth: usize = 0;
        let mut cur = self.prev(id);

        while cur.is_some() {
            let k = self.kind(cur);

            if k.pair_family() == Some(family) {
                if k.is_closer() {
                    depth += 1;
                } else if depth == 0 {
                    return cur;
                } else {
                    depth -= 1;
                }
            }
            cur = self.prev(cur);
        }
        ChunkId::NONE
    }

    /// Snapshot of all live ids in stream order.
    ///
    /// Useful for passes that restructure the stream while walking it.
    pub fn ids(&self) -> Vec<ChunkId> {
        let mut out = Vec::with_capacity(self.len());
        let mut cur = self.head;

        while cur.is_some() {
            out.push(cur);
            cur = self.next(cur);
        }
        out
    }

    /// Concatenation of every non-whitespace chunk's text, in stream order.
    ///
    /// This is the token-preservation observable: formatting may move
    /// chunks but never change this string.
    pub fn token_text(&self) -> String {
        let mut out = String::new();
        let mut cur = self.head;

        while cur.is_some() {
            let kind = self.kind(cur);
            if !kind.is_newline() && !matches!(kind, TokenKind::VbraceOpen | TokenKind::VbraceClose)
            {
                out.push_str(self.text(cur));
            }
            cur = self.next(cur);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(kinds: &[(&str, TokenKind)]) -> (ChunkStore, Vec<ChunkId>) {
        let mut sm = ChunkStore::new();
        let ids = kinds
            .iter()
            .map(|(text, kind)| sm.append(Chunk::new(*text, *kind)))
            .collect();
        (sm, ids)
    }

    #[test]
    fn append_links_in_order() {
        let (sm, ids) = store_of(&[
            ("a", TokenKind::Word),
            ("=", TokenKind::Assign),
            ("1", TokenKind::Number),
        ]);
        assert_eq!(sm.head(), ids[0]);
        assert_eq!(sm.tail(), ids[2]);
        assert_eq!(sm.next(ids[0]), ids[1]);
        assert_eq!(sm.prev(ids[2]), ids[1]);
        assert!(sm.prev(ids[0]).is_none());
    }

    #[test]
    fn sentinel_navigation_returns_sentinel() {
        let (sm, _) = store_of(&[("a", TokenKind::Word)]);
        assert!(sm.next(ChunkId::NONE).is_none());
        assert!(sm.prev(ChunkId::NONE).is_none());
        assert!(sm.next_ncnnl(ChunkId::NONE, Scope::All).is_none());
        assert_eq!(sm.kind(ChunkId::NONE), TokenKind::None);
        assert_eq!(sm.text(ChunkId::NONE), "");
    }

    #[test]
    fn remove_relinks_neighbors() {
        let (mut sm, ids) = store_of(&[
            ("a", TokenKind::Word),
            ("b", TokenKind::Word),
            ("c", TokenKind::Word),
        ]);
        sm.remove(ids[1]);
        assert_eq!(sm.next(ids[0]), ids[2]);
        assert_eq!(sm.prev(ids[2]), ids[0]);
        assert_eq!(sm.len(), 2);
    }

    #[test]
    fn insert_before_head_moves_head() {
        let (mut sm, ids) = store_of(&[("b", TokenKind::Word)]);
        let a = sm.insert_before(ids[0], Chunk::new("a", TokenKind::Word));
        assert_eq!(sm.head(), a);
        assert_eq!(sm.next(a), ids[0]);
    }

    #[test]
    fn ncnnl_skips_comments_and_newlines() {
        let (sm, ids) = store_of(&[
            ("a", TokenKind::Word),
            ("// x", TokenKind::CommentLine),
            ("\n", TokenKind::Newline),
            ("b", TokenKind::Word),
        ]);
        assert_eq!(sm.next_ncnnl(ids[0], Scope::All), ids[3]);
        assert_eq!(sm.prev_ncnnl(ids[3], Scope::All), ids[0]);
    }

    #[test]
    fn preproc_scope_stays_inside_directive() {
        let (mut sm, ids) = store_of(&[
            ("#", TokenKind::Pound),
            ("define", TokenKind::PpDefine),
            ("X", TokenKind::Macro),
            ("\n", TokenKind::Newline),
            ("int", TokenKind::Type),
        ]);
        for id in &ids[0..3] {
            sm.add_flags(*id, PcFlags::IN_PREPROC);
        }
        // From inside the directive, the walk must not escape it.
        assert_eq!(sm.next_in(ids[1], Scope::Preproc), ids[2]);
        assert!(sm.next_in(ids[2], Scope::Preproc).is_none());
        // From outside, directive chunks are skipped wholesale.
        assert!(!sm.in_preproc(ids[3]));
        assert_eq!(sm.next_in(ids[3], Scope::Preproc), ids[4]);
        assert_eq!(sm.prev_in(ids[4], Scope::Preproc), ids[3]);
        assert!(sm.prev_ncnnl(ids[3], Scope::Preproc).is_none());
    }

    #[test]
    fn closing_match_pairs_nested_parens() {
        let (sm, ids) = store_of(&[
            ("(", TokenKind::ParenOpen),
            ("(", TokenKind::FparenOpen),
            (")", TokenKind::FparenClose),
            (")", TokenKind::ParenClose),
        ]);
        assert_eq!(sm.closing_match(ids[0]), ids[3]);
        assert_eq!(sm.closing_match(ids[1]), ids[2]);
        assert_eq!(sm.opening_match(ids[3]), ids[0]);
    }

    #[test]
    fn closing_match_on_non_opener_is_sentinel() {
        let (sm, ids) = store_of(&[("a", TokenKind::Word)]);
        assert!(sm.closing_match(ids[0]).is_none());
    }

    #[test]
    fn token_text_skips_synthetic_chunks() {
        let (mut sm, ids) = store_of(&[
            ("if", TokenKind::If),
            ("", TokenKind::VbraceOpen),
            ("x", TokenKind::Word),
            ("\n", TokenKind::Newline),
            ("", TokenKind::VbraceClose),
        ]);
        let _ = ids;
        assert_eq!(sm.token_text(), "ifx");
        sm.append(Chunk::new(";", TokenKind::Semicolon));
        assert_eq!(sm.token_text(), "ifx;");
    }

    #[test]
    fn move_after_relocates_chunk() {
        let (mut sm, ids) = store_of(&[
            ("a", TokenKind::Word),
            ("b", TokenKind::Word),
            ("c", TokenKind::Word),
        ]);
        sm.move_after(ids[0], ids[2]);
        let order: Vec<&str> = sm.ids().iter().map(|id| sm.text(*id)).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }
}
