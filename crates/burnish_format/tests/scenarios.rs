//! End-to-end behavior of the full pipeline.

use burnish_format::{
    format_source, Iarf, Lang, Options, PcFlags, Session, StarStyle, TokenKind,
};

fn session(input: &str, opts: Options, lang: Lang) -> Session {
    let mut s = Session::new(opts, lang);
    s.format(input).unwrap();
    s
}

fn col_of(s: &Session, text: &str) -> usize {
    let id = s
        .sm
        .ids()
        .into_iter()
        .find(|id| s.sm.text(*id) == text)
        .unwrap();
    s.sm.column(id)
}

#[test]
fn variable_block_alignment_with_dangling_star() {
    let mut opts = Options::default();
    opts.align_var_def_span = 2;
    opts.align_assign_span = 2;
    opts.align_var_def_star_style = StarStyle::Dangle;

    let s = session(
        "int x=5;\ndouble yy=3.14;\nchar *name=\"bob\";\n",
        opts,
        Lang::C,
    );

    // The defined names share a column.
    let x = col_of(&s, "x");
    assert_eq!(x, col_of(&s, "yy"));
    assert_eq!(x, col_of(&s, "name"));

    // The star dangles directly left of the aligned name.
    assert_eq!(col_of(&s, "*"), x - 1);

    // The assignment operators share a column too.
    let assigns: Vec<usize> = s
        .sm
        .ids()
        .into_iter()
        .filter(|id| s.sm.is(*id, TokenKind::Assign))
        .map(|id| s.sm.column(id))
        .collect();
    assert_eq!(assigns.len(), 3);
    assert!(assigns.iter().all(|c| *c == assigns[0]));
}

#[test]
fn infinite_loop_canonicalization() {
    let mut opts = Options::default();
    opts.mod_infinite_loop = 1;

    let s = session("while(1) { body(); }\n", opts, Lang::C);
    assert_eq!(s.sm.token_text(), "for(;;){body();}");

    // The block's parent construct switched to the for.
    let brace = s
        .sm
        .ids()
        .into_iter()
        .find(|id| s.sm.is(*id, TokenKind::BraceOpen))
        .unwrap();
    assert_eq!(s.sm.parent(brace), TokenKind::For);
    assert!(s.render().contains("for"));
}

#[test]
fn template_versus_comparison() {
    let s = session("a<b>c;\n", Options::default(), Lang::CPP);
    let kinds: Vec<TokenKind> = s
        .sm
        .ids()
        .into_iter()
        .filter(|id| matches!(s.sm.text(*id), "<" | ">"))
        .map(|id| s.sm.kind(id))
        .collect();
    assert_eq!(kinds, vec![TokenKind::Compare, TokenKind::Compare]);

    let s = session("vector<int> v;\n", Options::default(), Lang::CPP);
    let kinds: Vec<TokenKind> = s
        .sm
        .ids()
        .into_iter()
        .filter(|id| matches!(s.sm.text(*id), "<" | ">"))
        .map(|id| s.sm.kind(id))
        .collect();
    assert_eq!(kinds, vec![TokenKind::AngleOpen, TokenKind::AngleClose]);

    let v = s
        .sm
        .ids()
        .into_iter()
        .find(|id| s.sm.text(*id) == "v")
        .unwrap();
    assert!(s
        .sm
        .has_flags(v, PcFlags::VAR_DEF | PcFlags::VAR_FIRST));
}

#[test]
fn init_brace_columns_align_across_rows() {
    let mut opts = Options::default();
    opts.align_struct_init_span = 1;

    let s = session(
        "struct e colors[] = {\n{ \"red\", 255 },\n{ \"blue\", 0 },\n{ \"green\", 128 },\n};\n",
        opts,
        Lang::C,
    );

    // Row braces land on one column, row-internal commas on another.
    let row_opens: Vec<usize> = s
        .sm
        .ids()
        .into_iter()
        .filter(|id| {
            s.sm.is(*id, TokenKind::BraceOpen) && s.sm.level(*id) == 1
        })
        .map(|id| s.sm.column(id))
        .collect();
    assert_eq!(row_opens.len(), 3);
    assert!(row_opens.iter().all(|c| *c == row_opens[0]));

    let row_closes: Vec<usize> = s
        .sm
        .ids()
        .into_iter()
        .filter(|id| {
            s.sm.is(*id, TokenKind::BraceClose) && s.sm.level(*id) == 1
        })
        .map(|id| s.sm.column(id))
        .collect();
    assert!(row_closes.iter().all(|c| *c == row_closes[0]));
}

#[test]
fn width_splitting_picks_the_weakest_operator() {
    let mut opts = Options::default();
    opts.code_width = 40;

    let out = format_source(
        "result = alpha_value + beta_value && gamma_value + delta_value;\n",
        opts,
        Lang::C,
    )
    .unwrap();

    // The break lands at the boolean operator, not the arithmetic ones.
    let first_line = out.lines().next().unwrap();
    assert!(first_line.trim_end().ends_with("&&"), "got: {first_line:?}");
}

#[test]
fn one_liner_is_preserved_under_brace_policy() {
    let mut opts = Options::default();
    opts.nl_if_brace = Iarf::Remove;

    let out = format_source("if (x) return 0;\n", opts, Lang::C).unwrap();
    assert_eq!(out.trim_end().lines().count(), 1);
}

#[test]
fn over_width_one_liner_is_unpacked_not_split() {
    let mut opts = Options::default();
    opts.code_width = 24;

    let s = session(
        "if (flag) { handle_the_flag(flag); }\n",
        opts,
        Lang::C,
    );
    assert!(s
        .sm
        .ids()
        .iter()
        .all(|id| !s.sm.has_flags(*id, PcFlags::ONE_LINER)));
}

#[test]
fn enum_trailing_comma_policy() {
    let mut opts = Options::default();
    opts.mod_enum_last_comma = Iarf::Add;
    let s = session("enum e { A, B };\n", opts, Lang::C);
    assert_eq!(s.sm.token_text(), "enume{A,B,};");
}

#[test]
fn pp_define_values_align() {
    let mut opts = Options::default();
    opts.align_pp_define_span = 3;
    opts.align_pp_define_gap = 4;

    let s = session(
        "#define FOO_VAL 15\n#define MAX_TIMEOUT 60\n",
        opts,
        Lang::C,
    );
    assert_eq!(col_of(&s, "15"), col_of(&s, "60"));
}

#[test]
fn trailing_comments_align() {
    let mut opts = Options::default();
    opts.align_right_cmt_span = 2;

    let s = session("int a; // one\nlong counter; // second\n", opts, Lang::C);
    let cols: Vec<usize> = s
        .sm
        .ids()
        .into_iter()
        .filter(|id| s.sm.is_comment(*id))
        .map(|id| s.sm.column(id))
        .collect();
    assert_eq!(cols[0], cols[1]);
}
