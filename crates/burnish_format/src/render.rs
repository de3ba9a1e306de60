//! Minimal renderer for the output contract.
//!
//! The real renderer is an external collaborator; this one exists so the
//! integration tests (and idempotence checks) can observe the finalized
//! stream: `nl_count` newlines per newline chunk, spaces up to each
//! chunk's `column`, then its text. Tab expansion stays outside.

use crate::chunk::ChunkStore;
use crate::token::TokenKind;

/// Renders the finalized stream to text.
pub fn render(sm: &ChunkStore) -> String {
    let mut out = String::new();
    let mut col = 1usize;
    let mut pc = sm.head();

    while pc.is_some() {
        match sm.kind(pc) {
            TokenKind::Newline => {
                for _ in 0..sm.nl_count(pc).max(1) {
                    out.push('\n');
                }
                col = 1;
            }
            TokenKind::NlCont => {
                let target = sm.column(pc).max(col);
                while col < target {
                    out.push(' ');
                    col += 1;
                }
                // Keep the splice readable even at the line edge.
                if out.ends_with(|c: char| c != ' ' && c != '\n') {
                    out.push(' ');
                }
                out.push('\\');
                out.push('\n');
                col = 1;
            }
            TokenKind::VbraceOpen | TokenKind::VbraceClose => {}
            _ => {
                let text = sm.text(pc);

                if text.is_empty() {
                    pc = sm.next(pc);
                    continue;
                }
                let target = sm.column(pc);

                if target > col {
                    for _ in 0..(target - col) {
                        out.push(' ');
                    }
                    col = target;
                } else if col > 1 {
                    // Columns collided; keep original token separation.
                    let had_space = sm.get(pc).map(|c| c.orig.prev_sp > 0).unwrap_or(false);
                    if had_space && !out.ends_with(' ') {
                        out.push(' ');
                        col += 1;
                    }
                }
                out.push_str(text);

                if let Some(last_line) = text.rsplit('\n').next() {
                    if text.contains('\n') {
                        col = last_line.chars().count() + 1;
                    } else {
                        col += text.chars().count();
                    }
                }
            }
        }
        pc = sm.next(pc);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;

    fn chunk_at(text: &str, kind: TokenKind, col: usize) -> Chunk {
        let mut c = Chunk::new(text, kind);
        c.column = col;
        c
    }

    #[test]
    fn columns_become_spaces() {
        let mut sm = ChunkStore::new();
        sm.append(chunk_at("int", TokenKind::Type, 1));
        sm.append(chunk_at("x", TokenKind::Word, 8));
        sm.append(chunk_at(";", TokenKind::Semicolon, 9));
        sm.append(Chunk::newline(1));
        assert_eq!(render(&sm), "int    x;\n");
    }

    #[test]
    fn newline_counts_expand() {
        let mut sm = ChunkStore::new();
        sm.append(chunk_at("a", TokenKind::Word, 1));
        sm.append(Chunk::newline(3));
        sm.append(chunk_at("b", TokenKind::Word, 1));
        assert_eq!(render(&sm), "a\n\n\nb");
    }

    #[test]
    fn virtual_braces_are_invisible() {
        let mut sm = ChunkStore::new();
        sm.append(chunk_at("x", TokenKind::Word, 1));
        sm.append(chunk_at("", TokenKind::VbraceOpen, 2));
        sm.append(chunk_at(";", TokenKind::Semicolon, 2));
        assert_eq!(render(&sm), "x;");
    }

    #[test]
    fn collided_columns_keep_their_separating_space() {
        let mut sm = ChunkStore::new();
        sm.append(chunk_at("return", TokenKind::Return, 1));
        let mut v = chunk_at("value", TokenKind::Word, 3); // stale column
        v.orig.prev_sp = 1;
        sm.append(v);
        assert_eq!(render(&sm), "return value");
    }
}
