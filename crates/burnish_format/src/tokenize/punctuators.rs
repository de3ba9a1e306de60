//! Static punctuator tables.
//!
//! Matching is maximum-munch: the tokenizer probes the 6-, 5-, 4-, 3-, 2-
//! and 1-character tables in that order and accepts the longest entry whose
//! language mask intersects the current input's mask. Digraph and trigraph
//! entries additionally require the [`Lang::DIG`] bit.
//!
//! The tables do not need to be sorted.

use crate::flags::Lang;
use crate::token::TokenKind;

/// One punctuator spelling.
pub struct PunctTag {
    pub text: &'static str,
    pub kind: TokenKind,
    pub lang: Lang,
}

const fn tag(text: &'static str, kind: TokenKind, lang: Lang) -> PunctTag {
    PunctTag { text, kind, lang }
}

const C_FAMILY: Lang = Lang::C.union(Lang::CPP).union(Lang::OC);
const C_FAMILY_DIG: Lang = C_FAMILY.union(Lang::DIG);

// 6-char symbols
pub static SYMBOLS6: &[PunctTag] = &[
    tag("??(??)", TokenKind::Tsquare, C_FAMILY_DIG), // trigraph []
    tag("??!??!", TokenKind::Bool, C_FAMILY_DIG),    // trigraph ||
    tag("??=??=", TokenKind::Paste, C_FAMILY_DIG),   // trigraph ##
];

// 5-char symbols
pub static SYMBOLS5: &[PunctTag] = &[
    tag("??!=", TokenKind::Assign, C_FAMILY_DIG), // trigraph |=
    tag("??'=", TokenKind::Assign, C_FAMILY_DIG), // trigraph ^=
    tag("??=@", TokenKind::Pound, C_FAMILY_DIG),  // trigraph #@ MS extension
];

// 4-char symbols
pub static SYMBOLS4: &[PunctTag] = &[
    tag("!<>=", TokenKind::Compare, Lang::D),
    tag(
        ">>>=",
        TokenKind::Assign,
        Lang::D.union(Lang::JAVA).union(Lang::PAWN),
    ),
    tag("<::>", TokenKind::Tsquare, C_FAMILY_DIG), // digraph []
    tag("%:%:", TokenKind::Paste, C_FAMILY_DIG),   // digraph ##
];

// 3-char symbols
pub static SYMBOLS3: &[PunctTag] = &[
    tag("!<=", TokenKind::Compare, Lang::D),
    tag("!<>", TokenKind::Compare, Lang::D),
    tag("!==", TokenKind::Compare, Lang::D.union(Lang::ECMA)),
    tag("!>=", TokenKind::Compare, Lang::D),
    tag("<=>", TokenKind::Compare, Lang::CPP),
    tag("->*", TokenKind::Member, C_FAMILY.union(Lang::D)),
    tag("...", TokenKind::Ellipsis, Lang::ALL),
    tag("<<=", TokenKind::Assign, Lang::ALL),
    tag("<>=", TokenKind::Compare, Lang::D),
    tag("===", TokenKind::Compare, Lang::D.union(Lang::ECMA)),
    tag(">>=", TokenKind::Assign, Lang::ALL),
    tag(
        ">>>",
        TokenKind::Arith,
        Lang::D.union(Lang::JAVA).union(Lang::PAWN).union(Lang::ECMA),
    ),
    tag("%:@", TokenKind::Pound, C_FAMILY_DIG), // digraph #@ MS extension
    tag("??=", TokenKind::Pound, C_FAMILY_DIG), // trigraph #
    tag("??=", TokenKind::Compare, Lang::CS),   // null-coalescing assignment
    tag("??(", TokenKind::SquareOpen, C_FAMILY_DIG), // trigraph [
    tag("??)", TokenKind::SquareClose, C_FAMILY_DIG), // trigraph ]
    tag("??'", TokenKind::Caret, C_FAMILY_DIG), // trigraph ^
    tag("??<", TokenKind::BraceOpen, C_FAMILY_DIG), // trigraph {
    tag("??>", TokenKind::BraceClose, C_FAMILY_DIG), // trigraph }
    tag("??-", TokenKind::Inv, C_FAMILY_DIG),   // trigraph ~
    tag("??!", TokenKind::Arith, C_FAMILY_DIG), // trigraph |
];

// 2-char symbols
pub static SYMBOLS2: &[PunctTag] = &[
    tag("!<", TokenKind::Compare, Lang::D),
    tag("!=", TokenKind::Compare, Lang::ALL),
    tag("!>", TokenKind::Compare, Lang::D),
    tag("!~", TokenKind::Compare, Lang::D),
    tag("##", TokenKind::Paste, C_FAMILY),
    tag("#@", TokenKind::Pound, C_FAMILY), // MS extension
    tag("%=", TokenKind::Assign, Lang::ALL),
    tag("&&", TokenKind::Bool, Lang::ALL),
    tag("&=", TokenKind::Assign, Lang::ALL),
    tag("*=", TokenKind::Assign, Lang::ALL),
    tag("++", TokenKind::IncdecAfter, Lang::ALL),
    tag("+=", TokenKind::Assign, Lang::ALL),
    tag("--", TokenKind::IncdecAfter, Lang::ALL),
    tag("-=", TokenKind::Assign, Lang::ALL),
    tag("->", TokenKind::Member, Lang::ALLC),
    tag(".*", TokenKind::Member, C_FAMILY.union(Lang::D)),
    tag("..", TokenKind::Range, Lang::D),
    tag("?.", TokenKind::NullCond, Lang::CS),
    tag("/=", TokenKind::Assign, Lang::ALL),
    tag("::", TokenKind::DcMember, Lang::ALLC),
    tag("<<", TokenKind::Shift, Lang::ALL),
    tag("<=", TokenKind::Compare, Lang::ALL),
    tag("<>", TokenKind::Compare, Lang::D),
    tag("==", TokenKind::Compare, Lang::ALL),
    tag(">=", TokenKind::Compare, Lang::ALL),
    tag(">>", TokenKind::Shift, Lang::ALL),
    tag("[]", TokenKind::Tsquare, Lang::ALL),
    tag("^=", TokenKind::Assign, Lang::ALL),
    tag("|=", TokenKind::Assign, Lang::ALL),
    tag("||", TokenKind::Bool, Lang::ALL),
    tag("~=", TokenKind::Compare, Lang::D),
    tag("~~", TokenKind::Compare, Lang::D),
    tag("=>", TokenKind::Lambda, Lang::VALA.union(Lang::CS).union(Lang::D)),
    tag("??", TokenKind::Compare, Lang::CS.union(Lang::VALA)),
    tag("<%", TokenKind::BraceOpen, C_FAMILY_DIG), // digraph {
    tag("%>", TokenKind::BraceClose, C_FAMILY_DIG), // digraph }
    tag("<:", TokenKind::SquareOpen, C_FAMILY_DIG), // digraph [
    tag(":>", TokenKind::SquareClose, C_FAMILY_DIG), // digraph ]
    tag("%:", TokenKind::Pound, C_FAMILY_DIG),     // digraph #
];

// 1-char symbols
pub static SYMBOLS1: &[PunctTag] = &[
    tag("!", TokenKind::Not, Lang::ALL),
    tag("#", TokenKind::Pound, Lang::ALL),
    tag("$", TokenKind::Compare, Lang::D),
    tag("%", TokenKind::Arith, Lang::ALL),
    tag("&", TokenKind::Amp, Lang::ALL),
    tag("(", TokenKind::ParenOpen, Lang::ALL),
    tag(")", TokenKind::ParenClose, Lang::ALL),
    tag("*", TokenKind::Star, Lang::ALL),
    tag("+", TokenKind::Plus, Lang::ALL),
    tag(",", TokenKind::Comma, Lang::ALL),
    tag("-", TokenKind::Minus, Lang::ALL),
    tag(".", TokenKind::Member, Lang::ALL),
    tag("/", TokenKind::Arith, Lang::ALL),
    tag(":", TokenKind::Colon, Lang::ALL),
    tag(";", TokenKind::Semicolon, Lang::ALL),
    tag("<", TokenKind::Compare, Lang::ALL),
    tag("=", TokenKind::Assign, Lang::ALL),
    tag(">", TokenKind::Compare, Lang::ALL),
    tag("?", TokenKind::Question, Lang::ALL),
    tag("[", TokenKind::SquareOpen, Lang::ALL),
    tag("]", TokenKind::SquareClose, Lang::ALL),
    tag("^", TokenKind::Caret, Lang::ALL),
    tag("{", TokenKind::BraceOpen, Lang::ALL),
    tag("|", TokenKind::Arith, Lang::ALL),
    tag("}", TokenKind::BraceClose, Lang::ALL),
    tag("~", TokenKind::Inv, Lang::ALL),
];

/// Longest punctuator at the head of `rest`, honoring the language mask.
pub fn match_punctuator(rest: &[u8], lang: Lang) -> Option<&'static PunctTag> {
    let tables: [&[PunctTag]; 6] = [
        SYMBOLS6, SYMBOLS5, SYMBOLS4, SYMBOLS3, SYMBOLS2, SYMBOLS1,
    ];

    for table in tables {
        for entry in table {
            let text = entry.text.as_bytes();

            if rest.len() < text.len() || &rest[..text.len()] != text {
                continue;
            }

            if !entry.lang.overlaps(lang) {
                continue;
            }

            // Digraph/trigraph entries need the digraph bit turned on.
            if entry.lang.contains(Lang::DIG) && !lang.contains(Lang::DIG) {
                continue;
            }
            return Some(entry);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_munch_prefers_longer_entries() {
        let hit = match_punctuator(b">>=1", Lang::CPP).unwrap();
        assert_eq!(hit.text, ">>=");
        assert_eq!(hit.kind, TokenKind::Assign);
    }

    #[test]
    fn spaceship_is_cpp_only() {
        assert_eq!(match_punctuator(b"<=>", Lang::CPP).unwrap().text, "<=>");
        // C falls back to `<=`.
        assert_eq!(match_punctuator(b"<=>", Lang::C).unwrap().text, "<=");
    }

    #[test]
    fn trigraphs_require_the_dig_bit() {
        // Plain C without DIG sees neither the trigraph nor the C# `??`.
        let plain = match_punctuator(b"??<", Lang::C).unwrap();
        assert_eq!(plain.text, "?");
        assert_eq!(plain.kind, TokenKind::Question);

        let with_dig = Lang::C | Lang::DIG;
        let hit = match_punctuator(b"??<", with_dig).unwrap();
        assert_eq!(hit.kind, TokenKind::BraceOpen);
    }

    #[test]
    fn d_operators_do_not_leak_into_c() {
        assert!(matches!(
            match_punctuator(b"!<>=", Lang::D).map(|t| t.text),
            Some("!<>=")
        ));
        let c_hit = match_punctuator(b"!<>=", Lang::C).unwrap();
        assert_eq!(c_hit.text, "!");
    }

    #[test]
    fn unsigned_shift_is_not_cpp() {
        assert_eq!(match_punctuator(b">>>", Lang::JAVA).unwrap().text, ">>>");
        assert_eq!(match_punctuator(b">>>", Lang::CPP).unwrap().text, ">>");
    }
}
