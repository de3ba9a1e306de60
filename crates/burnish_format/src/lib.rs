//! # burnish-format
//!
//! Chunk-stream beautifier core for C-family languages (C, C++,
//! Objective-C, C#, Java, D, Vala, Pawn, ECMAScript).
//!
//! The crate reads source text, reconstructs its lexical and shallow
//! syntactic structure as a mutable chunk stream, refines every chunk's
//! role through multi-pass retagging, and applies spacing, newline,
//! alignment and width policies until the stream's columns describe the
//! output layout. Content is never changed: the concatenation of
//! non-whitespace token text is invariant across the whole pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use burnish_format::{format_source, Lang, Options};
//!
//! let mut opts = Options::default();
//! opts.align_assign_span = 2;
//! let out = format_source("a = 5;\nbat = 14;\n", opts, Lang::C).unwrap();
//! assert!(out.contains("a   ="));
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs stage by stage over one [`ChunkStore`]:
//!
//! 1. **Tokenizer** ([`tokenize`]) — bytes to chunks with the raw kind
//!    taxonomy, dialect punctuator tables and the string/number zoo.
//! 2. **Preprocessor framer** ([`preproc`]) — directive roles, the
//!    in-preprocessor flag, conditional depth.
//! 3. **Level analyzer** ([`levels`]) — nesting levels, block numbers.
//! 4. **Combiner** ([`combine`]) — star/amp/angle disambiguation, paren
//!    classification, variable definitions, ternaries, packs, enum and
//!    loop cleanups.
//! 5. **Newline normalizer** ([`newlines`]) — brace placement, blank
//!    lines, one-liner preservation.
//! 6. **Alignment engine** ([`align`]) — the `AlignStack` passes.
//! 7. **Width splitter** ([`width`]) — priority-driven line breaking.
//! 8. **Indenter** ([`indent`]) — final column assignment.
//!
//! A [`Session`] threads one [`Context`] (options, language mask,
//! counters, scratch tables) through every stage; there are no globals,
//! so concurrent invocations on different inputs are independent.

pub mod align;
pub mod chunk;
pub mod combine;
pub mod context;
pub mod error;
pub mod flags;
pub mod indent;
pub mod levels;
pub mod newlines;
pub mod options;
pub mod preproc;
pub mod render;
pub mod session;
pub mod severity;
pub mod token;
pub mod tokenize;
pub mod width;

#[doc(hidden)]
pub use log as __log;

pub use align::stack::AlignStack;
pub use chunk::{AlignLink, Chunk, ChunkId, ChunkStore, Scope};
pub use context::Context;
pub use error::FormatError;
pub use flags::{Lang, PcFlags};
pub use options::{Iarf, LineEnd, OptionValue, Options, StarStyle, TokenPos};
pub use render::render;
pub use session::{format_source, Session};
pub use severity::Severity;
pub use token::TokenKind;
