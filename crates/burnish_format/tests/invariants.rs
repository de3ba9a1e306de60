//! Universal pipeline invariants.

use burnish_format::{format_source, Lang, Options, PcFlags, Session, TokenKind};

const SAMPLES: &[&str] = &[
    "int main(void) {\n    return 0;\n}\n",
    "struct point { int x; int y; };\n",
    "void f(int a, char *b) { g(a, *b); }\n",
    "#define MAX 10\n#if MAX > 5\nint big;\n#else\nint small;\n#endif\n",
    "enum color { RED = 1, GREEN, BLUE };\n",
    "for (i = 0; i < 10; i++) { work(i); }\n",
    "x = cond ? left : right;\n",
    "do { step(); } while (keep_going);\n",
];

fn expected_tokens(src: &str) -> String {
    src.split_whitespace().collect()
}

#[test]
fn token_preservation_across_the_pipeline() {
    for src in SAMPLES {
        let mut s = Session::new(Options::default(), Lang::C);
        s.format(src).unwrap();
        assert_eq!(
            s.sm.token_text(),
            expected_tokens(src),
            "token text drifted for {src:?}"
        );
    }
}

#[test]
fn brace_balance_holds_for_every_opener() {
    for src in SAMPLES {
        let mut s = Session::new(Options::default(), Lang::C);
        s.format(src).unwrap();

        for id in s.sm.ids() {
            if !s.sm.kind(id).is_opener() {
                continue;
            }
            let close = s.sm.closing_match(id);
            assert!(close.is_some(), "unmatched opener in {src:?}");
            assert_eq!(
                s.sm.level(id),
                s.sm.level(close),
                "opener/closer level mismatch in {src:?}"
            );
        }
    }
}

#[test]
fn output_columns_are_at_least_one() {
    for src in SAMPLES {
        let mut s = Session::new(Options::default(), Lang::C);
        s.format(src).unwrap();

        for id in s.sm.ids() {
            assert!(s.sm.column(id) >= 1);
        }
    }
}

#[test]
fn formatting_is_idempotent() {
    let mut opts = Options::default();
    opts.align_assign_span = 2;
    opts.align_var_def_span = 2;

    for src in SAMPLES {
        let once = format_source(src, opts.clone(), Lang::C).unwrap();
        let twice = format_source(&once, opts.clone(), Lang::C).unwrap();
        assert_eq!(once, twice, "second run changed output for {src:?}");
    }
}

#[test]
fn block_numbers_are_constant_within_sibling_ranges() {
    let mut s = Session::new(Options::default(), Lang::C);
    s.format("int a; { int b; int c; } int d;\n").unwrap();

    let number_of = |text: &str| {
        let id = s
            .sm
            .ids()
            .into_iter()
            .find(|id| s.sm.text(*id) == text)
            .unwrap();
        s.sm.get(id).unwrap().block_number
    };
    assert_eq!(number_of("a"), number_of("d"));
    assert_eq!(number_of("b"), number_of("c"));
    assert_ne!(number_of("a"), number_of("b"));
}

#[test]
fn preprocessor_regions_are_isolated() {
    let mut s = Session::new(Options::default(), Lang::C);
    s.format("#define A 1\nint x;\n#define B 2 \\\n  + 3\nint y;\n")
        .unwrap();

    for id in s.sm.ids() {
        if !s.sm.is(id, TokenKind::Newline) {
            continue;
        }
        // The chunk after a plain newline never keeps the directive flag
        // unless a splice bridged it (splices are NlCont, not Newline).
        let next = s.sm.next(id);
        if next.is_some() && s.sm.has_flags(next, PcFlags::IN_PREPROC) {
            panic!("preprocessor leaked past a newline");
        }
    }
}

#[test]
fn width_bound_is_met_when_splittable() {
    let mut opts = Options::default();
    opts.code_width = 40;

    let out = format_source(
        "accumulated = first_long_name + second_long_name + third_long_name + fourth_long_name;\n",
        opts,
        Lang::C,
    )
    .unwrap();

    for line in out.lines() {
        assert!(
            line.chars().count() <= 40,
            "line exceeds width: {line:?}"
        );
    }
}

#[test]
fn recoverable_errors_do_not_poison_the_stream() {
    let mut s = Session::new(Options::default(), Lang::C);
    s.format("int a; }\nchar *s = \"open\nint b;\n").unwrap();
    assert!(s.ctx.error_count >= 2);
    // The stream still reaches the last token.
    assert!(s.sm.token_text().ends_with("intb;"));
}
