//! Per-chunk state bits and the language mask.
//!
//! Both sets are closed vocabularies expressed as [`bitflags`] types:
//! [`PcFlags`] records what region of the program a chunk sits in and what
//! roles later passes have assigned to it; [`Lang`] selects the dialect
//! rules the tokenizer and combiner apply.

use bitflags::bitflags;

bitflags! {
    /// Per-chunk state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PcFlags: u32 {
        /// Inside a `#...` directive, continuations included.
        const IN_PREPROC      = 1 << 0;
        /// Between the parens of a function definition signature.
        const IN_FCN_DEF      = 1 << 1;
        /// Between the parens of a function call.
        const IN_FCN_CALL     = 1 << 2;
        /// Between the parens of a control statement.
        const IN_SPAREN       = 1 << 3;
        /// Inside a `for (...)` header.
        const IN_FOR          = 1 << 4;
        /// Between template angle brackets.
        const IN_TEMPLATE     = 1 << 5;
        /// Inside a constructor-style initializer argument list.
        const IN_CONST_ARGS   = 1 << 6;
        /// Inside a class base-specifier list.
        const IN_CLASS_BASE   = 1 << 7;
        /// Inside an enum body.
        const IN_ENUM         = 1 << 8;
        /// Between `?` and the matching `:` of a conditional.
        const IN_CONDITIONAL  = 1 << 9;
        /// The whole construct fit on one physical input line.
        const ONE_LINER       = 1 << 10;
        /// This identifier defines a variable.
        const VAR_DEF         = 1 << 11;
        /// First variable of a definition group.
        const VAR_FIRST       = 1 << 12;
        /// Second or later variable sharing the type tokens.
        const VAR_INLINE      = 1 << 13;
        /// A pass moved this chunk to an alignment column.
        const WAS_ALIGNED     = 1 << 14;
        /// First member of a recorded alignment group.
        const ALIGN_START     = 1 << 15;
        /// A comment that trails code on its line.
        const RIGHT_COMMENT   = 1 << 16;
        /// The line holding this chunk is a continuation of a split line.
        const CONT_LINE       = 1 << 17;
        /// The indenter must leave this chunk's column alone.
        const DONT_INDENT     = 1 << 18;
        /// Alignment anchor; quick-align-again re-commits from here.
        const ANCHOR          = 1 << 19;
        /// The tokenizer could not close this literal before end of input.
        const UNTERMINATED    = 1 << 20;
    }
}

impl PcFlags {
    /// The bits a synthesized newline inherits from its predecessor.
    pub const COPY_ON_NEWLINE: PcFlags = PcFlags::IN_PREPROC
        .union(PcFlags::IN_FCN_DEF)
        .union(PcFlags::IN_FCN_CALL)
        .union(PcFlags::IN_SPAREN)
        .union(PcFlags::IN_FOR)
        .union(PcFlags::IN_TEMPLATE)
        .union(PcFlags::IN_CONST_ARGS)
        .union(PcFlags::IN_CLASS_BASE)
        .union(PcFlags::IN_ENUM)
        .union(PcFlags::IN_CONDITIONAL);
}

bitflags! {
    /// Language selection mask, one bit per supported dialect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Lang: u16 {
        const C    = 1 << 0;
        const CPP  = 1 << 1;
        const D    = 1 << 2;
        const CS   = 1 << 3;
        const JAVA = 1 << 4;
        const OC   = 1 << 5;
        const VALA = 1 << 6;
        const PAWN = 1 << 7;
        const ECMA = 1 << 8;
        /// Digraph/trigraph processing requested.
        const DIG  = 1 << 14;
        /// Token only valid inside preprocessor bodies.
        const PP   = 1 << 15;
    }
}

impl Lang {
    /// Every supported dialect.
    pub const ALL: Lang = Lang::C
        .union(Lang::CPP)
        .union(Lang::D)
        .union(Lang::CS)
        .union(Lang::JAVA)
        .union(Lang::OC)
        .union(Lang::VALA)
        .union(Lang::PAWN)
        .union(Lang::ECMA);

    /// The curly-brace C-like dialects (everything but Pawn).
    pub const ALLC: Lang = Lang::C
        .union(Lang::CPP)
        .union(Lang::D)
        .union(Lang::CS)
        .union(Lang::JAVA)
        .union(Lang::OC)
        .union(Lang::VALA)
        .union(Lang::ECMA);

    /// Returns `true` when any dialect bit overlaps `other`.
    pub fn overlaps(self, other: Lang) -> bool {
        !(self & other & Lang::ALL).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_mask_keeps_region_bits_only() {
        let mask = PcFlags::COPY_ON_NEWLINE;
        assert!(mask.contains(PcFlags::IN_PREPROC));
        assert!(mask.contains(PcFlags::IN_FOR));
        assert!(!mask.contains(PcFlags::ONE_LINER));
        assert!(!mask.contains(PcFlags::VAR_DEF));
    }

    #[test]
    fn lang_overlap_ignores_modifier_bits() {
        let cpp_dig = Lang::CPP | Lang::DIG;
        assert!(cpp_dig.overlaps(Lang::CPP));
        assert!(!cpp_dig.overlaps(Lang::JAVA));
        assert!(!Lang::DIG.overlaps(Lang::DIG));
    }
}
