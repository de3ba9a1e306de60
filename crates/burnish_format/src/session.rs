//! The pipeline driver.
//!
//! A [`Session`] owns one context and one chunk store and runs the stages
//! in order: tokenize, frame the preprocessor, assign levels, combine,
//! re-level (retagging introduces openers and moves chunks), then a short
//! loop of {newline normalization, indentation, alignment}, width
//! splitting, a final indent pass and a re-commit of any disturbed
//! alignment groups.
//!
//! Sessions are single-use and single-threaded; concurrent formatting of
//! different inputs takes one session each.

use crate::align;
use crate::chunk::ChunkStore;
use crate::combine;
use crate::context::Context;
use crate::error::FormatError;
use crate::flags::Lang;
use crate::indent;
use crate::levels;
use crate::log_sev;
use crate::newlines;
use crate::options::Options;
use crate::preproc;
use crate::render;
use crate::severity::Severity;
use crate::tokenize;
use crate::width;

/// Number of {newlines, indent, align} rounds.
const SHAPE_PASSES: usize = 2;

/// One formatting invocation's state.
pub struct Session {
    pub ctx: Context,
    pub sm: ChunkStore,
}

impl Session {
    pub fn new(opts: Options, lang: Lang) -> Self {
        Session {
            ctx: Context::new(opts, lang),
            sm: ChunkStore::new(),
        }
    }

    /// Runs the whole pipeline over `input`, leaving the finalized stream
    /// in `self.sm`.
    pub fn format(&mut self, input: &str) -> Result<(), FormatError> {
        let ctx = &mut self.ctx;
        let sm = &mut self.sm;

        newlines::check_nl_max(ctx)?;

        tokenize::tokenize(ctx, sm, input);
        preproc::frame_preprocessor(ctx, sm);
        levels::assign_levels(ctx, sm);
        levels::number_blocks(ctx, sm);

        combine::combine(ctx, sm);

        // Retagging opened angles, added virtual braces and moved chunks.
        levels::assign_levels(ctx, sm);
        levels::number_blocks(ctx, sm);

        for pass in 0..SHAPE_PASSES {
            log_sev!(Severity::Session, "shape pass {}", pass + 1);
            newlines::normalize(ctx, sm);
            indent::indent_text(ctx, sm);
            align::align_all(ctx, sm)?;
        }

        width::do_code_width(ctx, sm);
        indent::indent_text(ctx, sm);
        align::quick_align_again::quick_align_again(ctx, sm);

        log_sev!(
            Severity::Session,
            "formatted {} chunks, {} changes, {} recoverable errors",
            sm.len(),
            ctx.changes,
            ctx.error_count
        );
        Ok(())
    }

    /// Renders the finalized stream.
    pub fn render(&self) -> String {
        render::render(&self.sm)
    }
}

/// Formats `input` in one call.
///
/// ```
/// use burnish_format::{format_source, Lang, Options};
///
/// let out = format_source("int x=1 ;", Options::default(), Lang::C).unwrap();
/// assert!(out.contains("int"));
/// ```
pub fn format_source(input: &str, opts: Options, lang: Lang) -> Result<String, FormatError> {
    let mut session = Session::new(opts, lang);
    session.format(input)?;
    Ok(session.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_text_is_preserved() {
        let src = "int main(void) {\n    return 0;\n}\n";
        let mut session = Session::new(Options::default(), Lang::C);
        session.format(src).unwrap();
        let expected: String = src.split_whitespace().collect();
        assert_eq!(session.sm.token_text(), expected);
    }

    #[test]
    fn nl_max_overflow_aborts_before_formatting() {
        let mut opts = Options::default();
        opts.nl_max = 1;
        opts.nl_after_func_body = 3;
        let mut session = Session::new(opts, Lang::C);
        let err = session.format("int x;").unwrap_err();
        assert!(matches!(err, FormatError::OptionOverflow { .. }));
        assert!(session.sm.is_empty());
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = Session::new(Options::default(), Lang::C);
        let mut b = Session::new(Options::default(), Lang::CPP);
        a.format("int x;").unwrap();
        b.format("template<typename T> struct S { };").unwrap();
        assert!(a.ctx.error_count == 0 && b.ctx.error_count == 0);
        assert_ne!(a.sm.token_text(), b.sm.token_text());
    }
}
