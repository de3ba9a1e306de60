//! Byte buffer → initial chunk stream.
//!
//! The tokenizer walks the input once and appends one chunk per token with
//! the raw kind taxonomy; the combiner refines kinds later. Structural
//! concerns handled here:
//!
//! - **Whitespace** is never a chunk. Horizontal whitespace is recorded on
//!   the following chunk (`orig.prev_sp`); line terminators collapse into
//!   `Newline` chunks carrying `nl_count`.
//! - **Line splices**: a backslash immediately before a terminator becomes
//!   a `NlCont` chunk, which keeps a preprocessor directive alive across
//!   physical lines.
//! - **Strings** cover the dialect zoo: plain, wide `L`, `u8`/`u`/`U`,
//!   raw `R"delim(...)delim"` with user-defined-literal suffixes, C#/OC
//!   verbatim `@"..."`, and D's `r"..."`, `` `...` `` and `x"..."` forms.
//!   Escape bytes are preserved exactly.
//! - **Punctuators** use maximum munch over the static tables, so `>>>=`
//!   beats `>>>` beats `>>` where the dialect allows each.
//!
//! An unterminated literal or comment produces a diagnostic at its start
//! line and an implicitly-closed chunk flagged `UNTERMINATED`; tokenizing
//! always reaches end of input so the stream stays well-formed.

pub mod keywords;
pub mod punctuators;

use burnish_base::SourcePos;

use crate::chunk::{Chunk, ChunkStore};
use crate::context::Context;
use crate::flags::{Lang, PcFlags};
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

use keywords::find_keyword;
use punctuators::match_punctuator;

/// Tokenizes `input` into `sm`.
pub fn tokenize(ctx: &mut Context, sm: &mut ChunkStore, input: &str) {
    let mut tk = Tokenizer {
        bytes: input.as_bytes(),
        pos: 0,
        line: 1,
        col: 1,
        prev_sp: 0,
        pending_nl: 0,
        pending_nl_line: 0,
        pending_nl_col: 0,
        at_line_start: true,
        in_pp: false,
    };
    tk.run(ctx, sm);
    log_sev!(
        Severity::Tokenize,
        "tokenized {} chunks from {} bytes",
        sm.len(),
        input.len()
    );
}

struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    prev_sp: usize,
    pending_nl: usize,
    pending_nl_line: usize,
    pending_nl_col: usize,
    at_line_start: bool,
    in_pp: bool,
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

impl<'a> Tokenizer<'a> {
    fn run(&mut self, ctx: &mut Context, sm: &mut ChunkStore) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];

            match b {
                b'\n' | b'\r' => self.take_newline(),
                b' ' => {
                    self.pos += 1;
                    self.col += 1;
                    self.prev_sp += 1;
                }
                b'\t' => {
                    let tab = ctx.opts.input_tab_size.max(1);
                    let next_stop = ((self.col - 1) / tab + 1) * tab + 1;
                    self.prev_sp += next_stop - self.col;
                    self.col = next_stop;
                    self.pos += 1;
                }
                b'\\' if self.peek_is_newline(1) => self.take_nl_cont(sm),
                b'/' if self.peek(1) == Some(b'/') => self.take_line_comment(sm),
                b'/' if self.peek(1) == Some(b'*') => self.take_block_comment(ctx, sm),
                _ => self.take_token(ctx, sm, b),
            }
        }
        self.flush_newlines(sm);
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn peek_is_newline(&self, ahead: usize) -> bool {
        matches!(self.peek(ahead), Some(b'\n') | Some(b'\r'))
    }

    fn take_newline(&mut self) {
        if self.pending_nl == 0 {
            self.pending_nl_line = self.line;
            self.pending_nl_col = self.col;
        }
        // CRLF counts once.
        if self.bytes[self.pos] == b'\r' && self.peek(1) == Some(b'\n') {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
        self.pending_nl += 1;
        self.line += 1;
        self.col = 1;
        self.prev_sp = 0;
        self.at_line_start = true;
        self.in_pp = false;
    }

    fn flush_newlines(&mut self, sm: &mut ChunkStore) {
        if self.pending_nl == 0 {
            return;
        }
        let mut chunk = Chunk::newline(self.pending_nl);
        chunk.orig = SourcePos::new(self.pending_nl_line, self.pending_nl_col, self.pending_nl_col);
        chunk.column = 1;
        sm.append(chunk);
        self.pending_nl = 0;
    }

    fn take_nl_cont(&mut self, sm: &mut ChunkStore) {
        self.flush_newlines(sm);
        let line = self.line;
        let col = self.col;
        self.pos += 1; // backslash
        if self.bytes.get(self.pos) == Some(&b'\r') && self.peek(1) == Some(b'\n') {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
        let mut chunk = Chunk::new("\\\n", TokenKind::NlCont);
        chunk.nl_count = 1;
        chunk.orig = SourcePos::new(line, col, col + 1);
        chunk.orig.prev_sp = self.prev_sp;
        chunk.column = col;
        if self.in_pp {
            chunk.flags.insert(PcFlags::IN_PREPROC);
        }
        sm.append(chunk);
        self.line += 1;
        self.col = 1;
        self.prev_sp = 0;
        // A splice does not end a directive.
    }

    /// Emits the token in `start..self.pos` which began at (`line`, `col`).
    fn emit(
        &mut self,
        sm: &mut ChunkStore,
        start: usize,
        line: usize,
        col: usize,
        kind: TokenKind,
    ) -> crate::chunk::ChunkId {
        let text = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        let mut chunk = Chunk::new(text, kind);
        chunk.orig = SourcePos::new(line, col, self.col);
        chunk.orig.prev_sp = self.prev_sp;
        chunk.column = col;
        self.prev_sp = 0;
        self.at_line_start = false;
        sm.append(chunk)
    }

    /// Advances over one (possibly multi-byte) character.
    fn bump_char(&mut self) {
        let b = self.bytes[self.pos];
        let len = if b < 0x80 {
            1
        } else if b >= 0xF0 {
            4
        } else if b >= 0xE0 {
            3
        } else if b >= 0xC0 {
            2
        } else {
            1
        };
        self.pos = (self.pos + len).min(self.bytes.len());
        self.col += 1;
    }

    fn take_line_comment(&mut self, sm: &mut ChunkStore) {
        self.flush_newlines(sm);
        let (start, line, col) = (self.pos, self.line, self.col);
        let doc = matches!(self.peek(2), Some(b'/') | Some(b'!'))
            && self.peek(3) != Some(b'/'); // `////` dividers are plain comments

        while self.pos < self.bytes.len() && !matches!(self.bytes[self.pos], b'\n' | b'\r') {
            self.bump_char();
        }
        let kind = if doc {
            TokenKind::CommentDoc
        } else {
            TokenKind::CommentLine
        };
        self.emit(sm, start, line, col, kind);
    }

    fn take_block_comment(&mut self, ctx: &mut Context, sm: &mut ChunkStore) {
        self.flush_newlines(sm);
        let (start, line, col) = (self.pos, self.line, self.col);
        let doc = self.peek(2) == Some(b'*') && self.peek(3) != Some(b'/');
        self.pos += 2;
        self.col += 2;
        let mut newlines = 0usize;
        let mut closed = false;

        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'*' if self.peek(1) == Some(b'/') => {
                    self.pos += 2;
                    self.col += 2;
                    closed = true;
                    break;
                }
                b'\n' | b'\r' => {
                    if self.bytes[self.pos] == b'\r' && self.peek(1) == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.pos += 1;
                    newlines += 1;
                    self.line += 1;
                    self.col = 1;
                }
                _ => self.bump_char(),
            }
        }
        let kind = if doc {
            TokenKind::CommentDoc
        } else {
            TokenKind::CommentBlock
        };
        let id = self.emit(sm, start, line, col, kind);

        if let Some(chunk) = sm.get_mut(id) {
            chunk.nl_count = newlines;
            if !closed {
                chunk.flags.insert(PcFlags::UNTERMINATED);
            }
        }
        if !closed {
            ctx.note_error();
            log_sev!(
                Severity::Warn,
                "unterminated comment starting at line {}",
                line
            );
        }
    }

    fn take_token(&mut self, ctx: &mut Context, sm: &mut ChunkStore, b: u8) {
        self.flush_newlines(sm);
        let was_line_start = self.at_line_start;

        if self.try_string(ctx, sm) {
            return;
        }

        if b.is_ascii_digit()
            || (b == b'.' && self.peek(1).is_some_and(|n| n.is_ascii_digit()))
        {
            self.take_number(ctx, sm);
            return;
        }

        if is_word_start(b) || (b == b'@' && self.peek(1).is_some_and(is_word_start)) {
            self.take_word(ctx, sm);
            return;
        }

        let rest = &self.bytes[self.pos..];
        if let Some(hit) = match_punctuator(rest, ctx.lang) {
            let (start, line, col) = (self.pos, self.line, self.col);
            let len_chars = hit.text.chars().count();
            self.pos += hit.text.len();
            self.col += len_chars;
            self.emit(sm, start, line, col, hit.kind);

            if hit.kind == TokenKind::Pound && was_line_start {
                self.in_pp = true;
            }
            return;
        }

        // Nothing matched: one junk byte, keep going.
        let (start, line, col) = (self.pos, self.line, self.col);
        self.bump_char();
        self.emit(sm, start, line, col, TokenKind::Junk);
        ctx.note_error();
        log_sev!(Severity::Warn, "unclassifiable byte at line {}", line);
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    fn try_string(&mut self, ctx: &mut Context, sm: &mut ChunkStore) -> bool {
        let b = self.bytes[self.pos];
        let lang = ctx.lang;

        // Raw strings: R" u8R" uR" UR" LR"
        for prefix in ["u8R", "uR", "UR", "LR", "R"] {
            if lang.overlaps(Lang::CPP) && self.starts_with(prefix.as_bytes(), b'"') {
                self.take_raw_string(ctx, sm, prefix.len());
                return true;
            }
        }

        // D wysiwyg / hex / backquote strings.
        if lang.overlaps(Lang::D) {
            if self.starts_with(b"r", b'"') {
                self.take_quoted(ctx, sm, 1, b'"', false);
                return true;
            }
            if self.starts_with(b"x", b'"') {
                self.take_quoted(ctx, sm, 1, b'"', false);
                return true;
            }
            if b == b'`' {
                self.take_quoted(ctx, sm, 0, b'`', false);
                return true;
            }
        }

        // C#/Objective-C verbatim string.
        if b == b'@'
            && self.peek(1) == Some(b'"')
            && lang.overlaps(Lang::CS.union(Lang::OC))
        {
            self.take_quoted(ctx, sm, 1, b'"', false);
            return true;
        }

        // Encoding-prefixed strings and chars.
        for prefix in ["u8", "u", "U", "L"] {
            if self.starts_with(prefix.as_bytes(), b'"') {
                self.take_quoted(ctx, sm, prefix.len(), b'"', true);
                return true;
            }
            if self.starts_with(prefix.as_bytes(), b'\'') {
                self.take_quoted(ctx, sm, prefix.len(), b'\'', true);
                return true;
            }
        }

        match b {
            b'"' => {
                self.take_quoted(ctx, sm, 0, b'"', true);
                true
            }
            b'\'' => {
                self.take_quoted(ctx, sm, 0, b'\'', true);
                true
            }
            _ => false,
        }
    }

    fn starts_with(&self, prefix: &[u8], quote: u8) -> bool {
        let end = self.pos + prefix.len();
        self.bytes.len() > end
            && &self.bytes[self.pos..end] == prefix
            && self.bytes[end] == quote
    }

    /// Scans a quoted literal with `prefix_len` marker bytes before the
    /// opening quote. Escapes are copied byte-for-byte when `escapes` is on.
    fn take_quoted(
        &mut self,
        ctx: &mut Context,
        sm: &mut ChunkStore,
        prefix_len: usize,
        quote: u8,
        escapes: bool,
    ) {
        let (start, line, col) = (self.pos, self.line, self.col);
        self.pos += prefix_len + 1;
        self.col += prefix_len + 1;
        let mut closed = false;

        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];

            if escapes && c == b'\\' && self.pos + 1 < self.bytes.len() {
                // `\x41`, `\uFFFF`, octal, `\&name;` — all opaque here.
                self.pos += 2;
                self.col += 2;
                continue;
            }

            if c == quote {
                self.pos += 1;
                self.col += 1;
                closed = true;
                break;
            }

            if matches!(c, b'\n' | b'\r') {
                break; // unterminated on this line
            }
            self.bump_char();
        }

        // User-defined-literal or dialect suffix glued to the close quote.
        while self.pos < self.bytes.len() && is_word_byte(self.bytes[self.pos]) {
            self.bump_char();
        }
        let kind = if quote == b'\'' {
            TokenKind::CharLit
        } else {
            TokenKind::String
        };
        let id = self.emit(sm, start, line, col, kind);

        if !closed {
            if let Some(chunk) = sm.get_mut(id) {
                chunk.flags.insert(PcFlags::UNTERMINATED);
            }
            ctx.note_error();
            log_sev!(
                Severity::Warn,
                "unterminated literal starting at line {}",
                line
            );
        }
    }

    fn take_raw_string(&mut self, ctx: &mut Context, sm: &mut ChunkStore, prefix_len: usize) {
        let (start, line, col) = (self.pos, self.line, self.col);
        self.pos += prefix_len + 1; // prefix and the opening quote
        self.col += prefix_len + 1;

        // Collect the delimiter up to the opening paren.
        let delim_start = self.pos;
        while self.pos < self.bytes.len()
            && self.bytes[self.pos] != b'('
            && self.pos - delim_start < 16
        {
            self.pos += 1;
            self.col += 1;
        }
        let delim = self.bytes[delim_start..self.pos].to_vec();

        if self.bytes.get(self.pos) == Some(&b'(') {
            self.pos += 1;
            self.col += 1;
        }

        // Consume everything until `)delim"`.
        let mut closed = false;
        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];

            if c == b')' {
                let tail = self.pos + 1;
                let tail_end = tail + delim.len();
                if self.bytes.len() > tail_end
                    && &self.bytes[tail..tail_end] == delim.as_slice()
                    && self.bytes[tail_end] == b'"'
                {
                    let consumed = 1 + delim.len() + 1;
                    self.pos += consumed;
                    self.col += consumed;
                    closed = true;
                    break;
                }
            }

            if matches!(c, b'\n' | b'\r') {
                if c == b'\r' && self.peek(1) == Some(b'\n') {
                    self.pos += 1;
                }
                self.pos += 1;
                self.line += 1;
                self.col = 1;
            } else {
                self.bump_char();
            }
        }

        // UDL suffix.
        while self.pos < self.bytes.len() && is_word_byte(self.bytes[self.pos]) {
            self.bump_char();
        }
        let id = self.emit(sm, start, line, col, TokenKind::String);

        if !closed {
            if let Some(chunk) = sm.get_mut(id) {
                chunk.flags.insert(PcFlags::UNTERMINATED);
            }
            ctx.note_error();
            log_sev!(
                Severity::Warn,
                "unterminated raw string starting at line {}",
                line
            );
        }
    }

    // ------------------------------------------------------------------
    // Numbers and words
    // ------------------------------------------------------------------

    fn take_number(&mut self, ctx: &mut Context, sm: &mut ChunkStore) {
        let (start, line, col) = (self.pos, self.line, self.col);
        let lang = ctx.lang;
        let sep_quote = lang.overlaps(Lang::CPP);
        let sep_under = lang.overlaps(Lang::D.union(Lang::CS).union(Lang::JAVA).union(Lang::ECMA));
        let mut is_float = false;

        let radix_hex = self.bytes[self.pos] == b'0'
            && matches!(self.peek(1), Some(b'x') | Some(b'X'));
        let radix_bin = self.bytes[self.pos] == b'0'
            && matches!(self.peek(1), Some(b'b') | Some(b'B'));

        if radix_hex || radix_bin {
            self.pos += 2;
            self.col += 2;
        }

        let digit_ok = |b: u8| -> bool {
            if radix_hex {
                b.is_ascii_hexdigit()
            } else if radix_bin {
                matches!(b, b'0' | b'1')
            } else {
                b.is_ascii_digit()
            }
        };

        loop {
            let Some(c) = self.peek(0) else { break };

            if digit_ok(c) {
                self.pos += 1;
                self.col += 1;
            } else if (c == b'\'' && sep_quote || c == b'_' && sep_under)
                && self.peek(1).is_some_and(digit_ok)
            {
                // digit separator
                self.pos += 1;
                self.col += 1;
            } else if c == b'.' && !radix_bin && self.peek(1).is_some_and(|n| digit_ok(n)) {
                is_float = true;
                self.pos += 1;
                self.col += 1;
            } else if (!radix_hex && matches!(c, b'e' | b'E'))
                || (radix_hex && matches!(c, b'p' | b'P'))
            {
                let next = self.peek(1);
                let signed = matches!(next, Some(b'+') | Some(b'-'))
                    && self.peek(2).is_some_and(|n| n.is_ascii_digit());
                if signed || next.is_some_and(|n| n.is_ascii_digit()) {
                    is_float = true;
                    self.pos += if signed { 2 } else { 1 };
                    self.col += if signed { 2 } else { 1 };
                } else {
                    break;
                }
            } else {
                break;
            }
        }

        // Type suffixes and numeric UDLs.
        while self.pos < self.bytes.len() && is_word_byte(self.bytes[self.pos]) {
            if matches!(self.bytes[self.pos], b'f' | b'F') && !radix_hex {
                is_float = true;
            }
            self.bump_char();
        }
        let kind = if is_float {
            TokenKind::NumberFp
        } else {
            TokenKind::Number
        };
        self.emit(sm, start, line, col, kind);
    }

    fn take_word(&mut self, ctx: &mut Context, sm: &mut ChunkStore) {
        let (start, line, col) = (self.pos, self.line, self.col);

        if self.bytes[self.pos] == b'@' {
            self.pos += 1;
            self.col += 1;
        }
        while self.pos < self.bytes.len() && is_word_byte(self.bytes[self.pos]) {
            self.bump_char();
        }
        let text = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        let kind = find_keyword(&text, ctx.lang).unwrap_or(TokenKind::Word);
        self.emit(sm, start, line, col, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn lex(input: &str, lang: Lang) -> (ChunkStore, Context) {
        let mut ctx = Context::new(Options::default(), lang);
        let mut sm = ChunkStore::new();
        tokenize(&mut ctx, &mut sm, input);
        (sm, ctx)
    }

    fn kinds(sm: &ChunkStore) -> Vec<TokenKind> {
        sm.ids().iter().map(|id| sm.kind(*id)).collect()
    }

    fn texts(sm: &ChunkStore) -> Vec<String> {
        sm.ids().iter().map(|id| sm.text(*id).to_string()).collect()
    }

    #[test]
    fn simple_statement() {
        let (sm, ctx) = lex("int x = 5;", Lang::C);
        assert_eq!(
            kinds(&sm),
            vec![
                TokenKind::Type,
                TokenKind::Word,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Semicolon
            ]
        );
        assert_eq!(ctx.error_count, 0);
    }

    #[test]
    fn whitespace_lands_on_the_following_chunk() {
        let (sm, _) = lex("a   b", Lang::C);
        let ids = sm.ids();
        assert_eq!(sm.get(ids[1]).unwrap().orig.prev_sp, 3);
        assert_eq!(sm.get(ids[1]).unwrap().orig.col, 5);
    }

    #[test]
    fn newlines_collapse_with_a_count() {
        let (sm, _) = lex("a\n\n\nb", Lang::C);
        let ids = sm.ids();
        assert_eq!(sm.kind(ids[1]), TokenKind::Newline);
        assert_eq!(sm.nl_count(ids[1]), 3);
        assert_eq!(sm.orig_line(ids[2]), 4);
    }

    #[test]
    fn crlf_counts_as_one_terminator() {
        let (sm, _) = lex("a\r\nb", Lang::C);
        let ids = sm.ids();
        assert_eq!(sm.nl_count(ids[1]), 1);
        assert_eq!(sm.orig_line(ids[2]), 2);
    }

    #[test]
    fn raw_string_consumes_matching_delimiter() {
        let (sm, ctx) = lex(r###"auto s = R"x(a )" b)x";"###, Lang::CPP);
        let ids = sm.ids();
        assert_eq!(sm.kind(ids[3]), TokenKind::String);
        assert_eq!(sm.text(ids[3]), r###"R"x(a )" b)x""###);
        assert_eq!(sm.kind(ids[4]), TokenKind::Semicolon);
        assert_eq!(ctx.error_count, 0);
    }

    #[test]
    fn escape_bytes_are_preserved() {
        let (sm, _) = lex(r#"s = "a\x41\"b";"#, Lang::C);
        let ids = sm.ids();
        assert_eq!(sm.text(ids[2]), r#""a\x41\"b""#);
    }

    #[test]
    fn udl_suffix_sticks_to_the_literal() {
        let (sm, _) = lex(r#"auto d = "km"_unit;"#, Lang::CPP);
        let ids = sm.ids();
        assert_eq!(sm.text(ids[3]), r#""km"_unit"#);
    }

    #[test]
    fn unterminated_string_flags_and_continues() {
        let (sm, ctx) = lex("x = \"abc\ny;", Lang::C);
        assert_eq!(ctx.error_count, 1);
        let ids = sm.ids();
        assert!(sm.has_flags(ids[2], PcFlags::UNTERMINATED));
        // Tokenizing continued to end of input.
        assert_eq!(sm.kind(*ids.last().unwrap()), TokenKind::Semicolon);
    }

    #[test]
    fn cpp_digit_separators() {
        let (sm, _) = lex("x = 1'000'000;", Lang::CPP);
        assert_eq!(texts(&sm)[2], "1'000'000");
        let (sm, _) = lex("x = 0xFF'00;", Lang::CPP);
        assert_eq!(texts(&sm)[2], "0xFF'00");
    }

    #[test]
    fn float_classification() {
        let (sm, _) = lex("a = 1.5e3; b = 10; c = 2.0f;", Lang::C);
        let k = kinds(&sm);
        assert_eq!(k[2], TokenKind::NumberFp);
        assert_eq!(k[6], TokenKind::Number);
        assert_eq!(k[10], TokenKind::NumberFp);
    }

    #[test]
    fn d_operators_tokenize_in_d() {
        let (sm, _) = lex("a !<= b >>>= c;", Lang::D);
        let t = texts(&sm);
        assert!(t.contains(&"!<=".to_string()));
        assert!(t.contains(&">>>=".to_string()));
    }

    #[test]
    fn java_unsigned_shift() {
        let (sm, _) = lex("a >>> b;", Lang::JAVA);
        assert_eq!(texts(&sm)[1], ">>>");
        assert_eq!(kinds(&sm)[1], TokenKind::Arith);
    }

    #[test]
    fn spaceship_tokenizes_in_cpp() {
        let (sm, _) = lex("a <=> b;", Lang::CPP);
        assert_eq!(texts(&sm)[1], "<=>");
    }

    #[test]
    fn digraphs_with_dig_bit() {
        let (sm, _) = lex("int a<:3:>;", Lang::C | Lang::DIG);
        let t = texts(&sm);
        assert!(t.contains(&"<:".to_string()));
        assert!(t.contains(&":>".to_string()));
        let k = kinds(&sm);
        assert!(k.contains(&TokenKind::SquareOpen));
        assert!(k.contains(&TokenKind::SquareClose));
    }

    #[test]
    fn line_splice_in_directive_keeps_it_alive() {
        let (sm, _) = lex("#define X 1 \\\n  + 2\nint y;", Lang::C);
        let k = kinds(&sm);
        assert!(k.contains(&TokenKind::NlCont));
        // The `+ 2` continuation is still tokenized normally.
        let t = texts(&sm);
        assert!(t.contains(&"+".to_string()));
    }

    #[test]
    fn doc_comments_are_distinguished() {
        let (sm, _) = lex("/// doc\n// plain\n/** block doc */\n/* block */", Lang::CPP);
        let k: Vec<TokenKind> = kinds(&sm)
            .into_iter()
            .filter(|k| k.is_comment())
            .collect();
        assert_eq!(
            k,
            vec![
                TokenKind::CommentDoc,
                TokenKind::CommentLine,
                TokenKind::CommentDoc,
                TokenKind::CommentBlock
            ]
        );
    }

    #[test]
    fn verbatim_string_in_cs() {
        let (sm, _) = lex(r#"s = @"c:\dir";"#, Lang::CS);
        let ids = sm.ids();
        assert_eq!(sm.kind(ids[2]), TokenKind::String);
        assert_eq!(sm.text(ids[2]), r#"@"c:\dir""#);
    }

    #[test]
    fn d_backquote_string() {
        let (sm, _) = lex("s = `raw \\ text`;", Lang::D);
        let ids = sm.ids();
        assert_eq!(sm.kind(ids[2]), TokenKind::String);
        assert_eq!(sm.text(ids[2]), "`raw \\ text`");
    }

    #[test]
    fn token_text_round_trips_nonwhitespace() {
        let src = "int main(void) { return 0; } /*done*/";
        let (sm, _) = lex(src, Lang::C);
        let expected: String = src.split_whitespace().collect();
        assert_eq!(sm.token_text(), expected);
    }
}
