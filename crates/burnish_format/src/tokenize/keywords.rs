//! Static keyword table.
//!
//! Identifiers are looked up here after scanning; a hit replaces the raw
//! `Word` kind with the keyword's role. Entries carry a language mask so
//! dialect keywords never leak across inputs (`template` is not a keyword
//! in C, `foreach` only exists in D/C#/Vala, ...).

use crate::flags::Lang;
use crate::token::TokenKind;

pub struct KeywordTag {
    pub text: &'static str,
    pub kind: TokenKind,
    pub lang: Lang,
}

const fn kw(text: &'static str, kind: TokenKind, lang: Lang) -> KeywordTag {
    KeywordTag { text, kind, lang }
}

const CPP_OC: Lang = Lang::CPP.union(Lang::OC);
const C_FAMILY: Lang = Lang::C.union(Lang::CPP).union(Lang::OC);

static KEYWORDS: &[KeywordTag] = &[
    kw("alignas", TokenKind::Qualifier, Lang::CPP),
    kw("asm", TokenKind::Asm, Lang::ALL),
    kw("auto", TokenKind::Type, C_FAMILY),
    kw("bool", TokenKind::Type, Lang::ALL),
    kw("break", TokenKind::Break, Lang::ALL),
    kw("byte", TokenKind::Type, Lang::CS.union(Lang::D).union(Lang::JAVA)),
    kw("case", TokenKind::Case, Lang::ALL),
    kw("catch", TokenKind::Catch, Lang::ALL),
    kw("char", TokenKind::Type, Lang::ALL),
    kw("class", TokenKind::Class, Lang::ALLC),
    kw("const", TokenKind::Qualifier, Lang::ALL),
    kw("consteval", TokenKind::Qualifier, Lang::CPP),
    kw("constexpr", TokenKind::Qualifier, Lang::CPP),
    kw("constinit", TokenKind::Qualifier, Lang::CPP),
    kw("continue", TokenKind::Continue, Lang::ALL),
    kw("decltype", TokenKind::Decltype, Lang::CPP),
    kw("default", TokenKind::Default, Lang::ALL),
    kw("delete", TokenKind::Delete, Lang::CPP.union(Lang::D).union(Lang::ECMA)),
    kw("do", TokenKind::Do, Lang::ALL),
    kw("double", TokenKind::Type, Lang::ALL),
    kw("else", TokenKind::Else, Lang::ALL),
    kw("enum", TokenKind::Enum, Lang::ALL),
    kw("extern", TokenKind::Extern, Lang::ALL),
    kw("final", TokenKind::Qualifier, Lang::D.union(Lang::ECMA)),
    kw("finally", TokenKind::Finally, Lang::D.union(Lang::CS).union(Lang::JAVA).union(Lang::ECMA)),
    kw("float", TokenKind::Type, Lang::ALL),
    kw("for", TokenKind::For, Lang::ALL),
    kw("foreach", TokenKind::For, Lang::D.union(Lang::CS).union(Lang::VALA)),
    kw("friend", TokenKind::Friend, Lang::CPP),
    kw("goto", TokenKind::Goto, Lang::ALL),
    kw("if", TokenKind::If, Lang::ALL),
    kw("inline", TokenKind::Qualifier, C_FAMILY),
    kw("int", TokenKind::Type, Lang::ALL),
    kw("long", TokenKind::Type, Lang::ALL),
    kw("mutable", TokenKind::Qualifier, Lang::CPP),
    kw("namespace", TokenKind::Namespace, Lang::CPP.union(Lang::CS).union(Lang::VALA)),
    kw("new", TokenKind::New, Lang::ALLC),
    kw("noexcept", TokenKind::Qualifier, Lang::CPP),
    kw("operator", TokenKind::Operator, Lang::CPP.union(Lang::CS)),
    kw("override", TokenKind::Qualifier, Lang::CS.union(Lang::D)),
    kw("private", TokenKind::Access, Lang::ALLC),
    kw("protected", TokenKind::Access, Lang::ALLC),
    kw("public", TokenKind::Access, Lang::ALLC),
    kw("register", TokenKind::Qualifier, C_FAMILY),
    kw("restrict", TokenKind::Qualifier, Lang::C),
    kw("return", TokenKind::Return, Lang::ALL),
    kw("short", TokenKind::Type, Lang::ALL),
    kw("signed", TokenKind::Type, C_FAMILY),
    kw("sizeof", TokenKind::Sizeof, C_FAMILY.union(Lang::CS).union(Lang::D).union(Lang::PAWN)),
    kw("static", TokenKind::Qualifier, Lang::ALL),
    kw("struct", TokenKind::Struct, C_FAMILY.union(Lang::CS).union(Lang::D).union(Lang::VALA)),
    kw("switch", TokenKind::Switch, Lang::ALL),
    kw("template", TokenKind::Template, Lang::CPP.union(Lang::D)),
    kw("throw", TokenKind::Throw, Lang::ALLC),
    kw("try", TokenKind::Try, Lang::ALLC),
    kw("typedef", TokenKind::Typedef, C_FAMILY.union(Lang::D)),
    kw("typename", TokenKind::Typename, Lang::CPP),
    kw("union", TokenKind::Union, C_FAMILY.union(Lang::D)),
    kw("unsigned", TokenKind::Type, C_FAMILY),
    kw("using", TokenKind::Using, Lang::CPP.union(Lang::CS)),
    kw("virtual", TokenKind::Qualifier, Lang::CPP.union(Lang::CS).union(Lang::VALA)),
    kw("void", TokenKind::Type, Lang::ALL),
    kw("volatile", TokenKind::Qualifier, C_FAMILY.union(Lang::CS).union(Lang::JAVA)),
    kw("wchar_t", TokenKind::Type, C_FAMILY),
    kw("while", TokenKind::While, Lang::ALL),
    // Objective-C directives keep their `@` sigil in the text.
    kw("@end", TokenKind::Word, Lang::OC),
    kw("@implementation", TokenKind::Class, Lang::OC),
    kw("@interface", TokenKind::Class, Lang::OC),
    kw("@property", TokenKind::Word, Lang::OC),
    kw("@selector", TokenKind::Word, Lang::OC),
];

/// Looks up `text` as a keyword under `lang`.
pub fn find_keyword(text: &str, lang: Lang) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|entry| entry.text == text && entry.lang.overlaps(lang))
        .map(|entry| entry.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_keywords_stay_in_their_dialect() {
        assert_eq!(find_keyword("template", Lang::CPP), Some(TokenKind::Template));
        assert_eq!(find_keyword("template", Lang::C), None);
        assert_eq!(find_keyword("foreach", Lang::CS), Some(TokenKind::For));
        assert_eq!(find_keyword("foreach", Lang::CPP), None);
    }

    #[test]
    fn type_keywords_tokenize_as_types() {
        assert_eq!(find_keyword("int", Lang::C), Some(TokenKind::Type));
        assert_eq!(find_keyword("unsigned", Lang::C), Some(TokenKind::Type));
        assert_eq!(find_keyword("const", Lang::C), Some(TokenKind::Qualifier));
    }

    #[test]
    fn non_keywords_miss() {
        assert_eq!(find_keyword("banana", Lang::ALL), None);
    }
}
