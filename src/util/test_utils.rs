use crate::{lexer, parser, util::tree};

/// Runs the full pipeline on `src`, rendering the parsed program as an
/// indented tree, or the first failure as its display message.
pub fn run_pipeline(src: &str) -> Result<String, String> {
    let tokens = lexer::tokenize(src).map_err(|e| e.to_string())?;
    let program = parser::parse(&tokens).map_err(|e| e.to_string())?;
    Ok(tree::print_program_string(&program))
}

#[track_caller]
pub fn assert_tree_ok(src: &str, expected: &str) {
    match run_pipeline(src) {
        Ok(tree) => ::pretty_assertions::assert_eq!(tree.trim(), expected.trim()),
        Err(error) => panic!("expected a tree, got an error: {error}"),
    }
}

#[track_caller]
pub fn assert_error(src: &str, expected: &str) {
    match run_pipeline(src) {
        Ok(tree) => panic!("expected an error, got a tree:\n{tree}"),
        Err(error) => ::pretty_assertions::assert_eq!(error, expected),
    }
}

macro_rules! tree_tests {
    (
        $(
            fn $test_name:ident() {
                let program = $source:expr;
                let $assertion:ident = $expected:expr;
            }
        )*
    ) => {
        $(
            #[test]
            fn $test_name() {
                tree_tests!(@@assert, $assertion, $source, $expected);
            }
        )*
    };

    (@@assert, tree_ok, $source:expr, $expected:expr) => {
        crate::util::test_utils::assert_tree_ok($source, ::indoc::indoc! { $expected });
    };
    (@@assert, error, $source:expr, $expected:expr) => {
        crate::util::test_utils::assert_error($source, $expected);
    };
}
pub(crate) use tree_tests;
