//! Severity-keyed logging.
//!
//! Every pass logs under its own [`Severity`], so a sink can keep, say, the
//! alignment trace while discarding the tokenizer babble. The enumeration is
//! closed; each value maps to a stable `log` target string and a facade
//! level, and the [`log_sev!`] macro forwards through the [`log`] crate so
//! any subscriber (or none) may be installed by the caller.

/// One log channel. The discriminants are stable and part of the
/// diagnostic surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Severity {
    Sys = 0,
    Err = 1,
    Warn = 2,
    Note = 3,
    Info = 4,
    Data = 5,
    LineEnds = 9,
    Casts = 10,
    AlignBrace = 11,
    AlignTypedef = 12,
    AlignPp = 13,
    AlignProto = 14,
    AlignNlCont = 15,
    AlignTrailingComment = 16,
    AlignAdd = 17,
    AlignAssign = 18,
    VarDefFix = 19,
    Indent = 21,
    IndentDetail = 22,
    Newline = 25,
    Statement = 27,
    Tokenize = 28,
    AlignRightComment = 29,
    CommentIndent = 30,
    IndentLine = 31,
    ScanInitBrace = 32,
    FuncDetect = 35,
    FuncParams = 36,
    ParseCleanup = 37,
    OutputIndent = 39,
    CtorDtor = 44,
    AlignStack = 45,
    PreprocIndent = 46,
    Typedef = 47,
    VarDefMark = 48,
    DefineValues = 49,
    Split = 52,
    FuncType = 53,
    Template = 54,
    BlankLines = 57,
    OneLiner = 62,
    AlignVarDefBrace = 64,
    Space = 66,
    AlignOcColon = 70,
    AlignSameCall = 71,
    AlignAsm = 72,
    AlignEigen = 73,
    AlignBracedInit = 74,
    EnumCleanup = 76,
    InfiniteLoop = 77,
    ParameterPack = 78,
    QuestionColon = 79,
    BlockNumber = 80,
    Levels = 81,
    Preproc = 82,
    Width = 83,
    Render = 84,
    Session = 85,
    Options = 86,
    Change = 90,
    Guru = 99,
}

impl Severity {
    /// Stable target string for sink-side masking.
    pub fn target(self) -> &'static str {
        match self {
            Severity::Sys => "burnish::sys",
            Severity::Err => "burnish::err",
            Severity::Warn => "burnish::warn",
            Severity::Note => "burnish::note",
            Severity::Info => "burnish::info",
            Severity::Data => "burnish::data",
            Severity::LineEnds => "burnish::line_ends",
            Severity::Casts => "burnish::casts",
            Severity::AlignBrace => "burnish::align::brace",
            Severity::AlignTypedef => "burnish::align::typedef",
            Severity::AlignPp => "burnish::align::pp",
            Severity::AlignProto => "burnish::align::proto",
            Severity::AlignNlCont => "burnish::align::nl_cont",
            Severity::AlignTrailingComment => "burnish::align::trailing_comment",
            Severity::AlignAdd => "burnish::align::add",
            Severity::AlignAssign => "burnish::align::assign",
            Severity::VarDefFix => "burnish::var_def_fix",
            Severity::Indent => "burnish::indent",
            Severity::IndentDetail => "burnish::indent::detail",
            Severity::Newline => "burnish::newline",
            Severity::Statement => "burnish::statement",
            Severity::Tokenize => "burnish::tokenize",
            Severity::AlignRightComment => "burnish::align::right_comment",
            Severity::CommentIndent => "burnish::comment_indent",
            Severity::IndentLine => "burnish::indent::line",
            Severity::ScanInitBrace => "burnish::align::scan_ib",
            Severity::FuncDetect => "burnish::func_detect",
            Severity::FuncParams => "burnish::func_params",
            Severity::ParseCleanup => "burnish::parse_cleanup",
            Severity::OutputIndent => "burnish::output_indent",
            Severity::CtorDtor => "burnish::ctor_dtor",
            Severity::AlignStack => "burnish::align::stack",
            Severity::PreprocIndent => "burnish::preproc_indent",
            Severity::Typedef => "burnish::typedef",
            Severity::VarDefMark => "burnish::var_def_mark",
            Severity::DefineValues => "burnish::define_values",
            Severity::Split => "burnish::split",
            Severity::FuncType => "burnish::func_type",
            Severity::Template => "burnish::template",
            Severity::BlankLines => "burnish::blank_lines",
            Severity::OneLiner => "burnish::one_liner",
            Severity::AlignVarDefBrace => "burnish::align::var_def_brace",
            Severity::Space => "burnish::space",
            Severity::AlignOcColon => "burnish::align::oc_colon",
            Severity::AlignSameCall => "burnish::align::same_call",
            Severity::AlignAsm => "burnish::align::asm",
            Severity::AlignEigen => "burnish::align::eigen",
            Severity::AlignBracedInit => "burnish::align::braced_init",
            Severity::EnumCleanup => "burnish::enum_cleanup",
            Severity::InfiniteLoop => "burnish::infinite_loop",
            Severity::ParameterPack => "burnish::parameter_pack",
            Severity::QuestionColon => "burnish::question_colon",
            Severity::BlockNumber => "burnish::block_number",
            Severity::Levels => "burnish::levels",
            Severity::Preproc => "burnish::preproc",
            Severity::Width => "burnish::width",
            Severity::Render => "burnish::render",
            Severity::Session => "burnish::session",
            Severity::Options => "burnish::options",
            Severity::Change => "burnish::change",
            Severity::Guru => "burnish::guru",
        }
    }

    /// The facade level a channel maps to.
    pub fn level(self) -> log::Level {
        match self {
            Severity::Err => log::Level::Error,
            Severity::Warn => log::Level::Warn,
            Severity::Sys | Severity::Note | Severity::Info => log::Level::Info,
            Severity::Data => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}

/// Logs a formatted message on a severity channel.
///
/// ```
/// use burnish_format::{log_sev, Severity};
///
/// log_sev!(Severity::Tokenize, "line {}: {} chunks", 1, 12);
/// ```
#[macro_export]
macro_rules! log_sev {
    ($sev:expr, $($arg:tt)*) => {{
        let sev: $crate::Severity = $sev;
        $crate::__log::log!(target: sev.target(), sev.level(), $($arg)*);
    }};
}
