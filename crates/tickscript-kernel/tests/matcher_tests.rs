//! Matcher tests using rstest for parameterization.
//!
//! Lines are written as they would appear in a script; a small test-local
//! splitter stands in for the external tokenizer.

use rstest::rstest;
use tickscript_kernel::{match_invocation, MatchError, ToolMatch, ToolRegistry};
use tickscript_types::{Span, Token};

/// Split a script line into tokens the way the tokenizer would: whitespace
/// separated, numbers (with or without unit suffix) vs. words, with real
/// column spans.
fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut col = 0u32;
    for part in line.split_whitespace() {
        let start = line[col as usize..].find(part).unwrap() as u32 + col;
        let span = Span::new(0, start, start + part.len() as u32);
        let numeric = part
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.');
        tokens.push(if numeric {
            Token::number(part, span)
        } else {
            Token::word(part, span)
        });
        col = start + part.len() as u32;
    }
    tokens
}

fn run(line: &str) -> Result<ToolMatch, MatchError> {
    let registry = ToolRegistry::with_builtin_tools();
    let tokens = tokenize(line);
    match_invocation(&registry, &tokens[0], &tokens[1..])
}

/// Short discriminant name for asserting error kinds.
fn kind(err: &MatchError) -> &'static str {
    match err {
        MatchError::UnknownTool { .. } => "UnknownTool",
        MatchError::MissingArguments { .. } => "MissingArguments",
        MatchError::TrailingArguments { .. } => "TrailingArguments",
        MatchError::ArgumentMismatch { .. } => "ArgumentMismatch",
        MatchError::TypeMismatch { .. } => "TypeMismatch",
        MatchError::UnitMismatch { .. } => "UnitMismatch",
        MatchError::OffMustBeAlone { .. } => "OffMustBeAlone",
        MatchError::UnknownArgument { .. } => "UnknownArgument",
        MatchError::DuplicateArgument { .. } => "DuplicateArgument",
    }
}

#[rstest]
#[case::check_pos("check pos 100 250 312.7")]
#[case::check_everything("check pos 1 2 3 ang 0 90 posepsilon 1 angepsilon 0.5")]
#[case::cmd_arbitrary("cmd say hello world!")]
#[case::stop("stop")]
#[case::use_bare("use")]
#[case::use_spam("use spam")]
#[case::duck_bare("duck")]
#[case::duck_on("duck on")]
#[case::duck_duration("duck 20")]
#[case::zoom_in("zoom in")]
#[case::zoom_toggle("zoom toggle")]
#[case::shoot_blue_spam("shoot blue spam")]
#[case::setang_minimal("setang 0 0")]
#[case::setang_timed("setang 0 0 20")]
#[case::setang_eased("setang 0 0 20 sin")]
#[case::autoaim_entity("autoaim ent door1")]
#[case::autoaim_entity_index("autoaim ent 3")]
#[case::autoaim_positional("autoaim 0 0 0 20")]
#[case::look_degrees("look 10deg 173deg 10")]
#[case::look_words("look up left")]
#[case::look_stop("look stop")]
#[case::autojump_on("autojump on")]
#[case::absmov_plain("absmov 90 0.5")]
#[case::absmov_unit("absmov 90deg")]
#[case::move_words("move forward left")]
#[case::move_degrees("move 90deg 0.5")]
#[case::move_stop("move stop")]
#[case::strafe_bare("strafe")]
#[case::strafe_full("strafe 299.999ups left veccam")]
#[case::decel_plain("decel 100")]
#[case::decel_unit("decel 100ups")]
fn test_valid_invocations(#[case] line: &str) {
    let result = run(line);
    assert!(result.is_ok(), "{line}: {:?}", result.unwrap_err());
    assert!(!result.unwrap().is_off);
}

#[rstest]
#[case::duck("duck off")]
#[case::shoot("shoot off")]
#[case::autoaim("autoaim off")]
#[case::look("look off")]
#[case::autojump("autojump off")]
#[case::absmov("absmov off")]
#[case::move_tool("move off")]
#[case::strafe("strafe off")]
#[case::decel("decel off")]
fn test_off_matches(#[case] line: &str) {
    let matched = run(line).unwrap();
    assert!(matched.is_off);
    assert!(matched.args.is_empty());
}

#[rstest]
#[case::unknown_tool("dcuk 20", "UnknownTool")]
#[case::off_with_extra("duck off spam", "OffMustBeAlone")]
#[case::extra_with_off("strafe vec off", "OffMustBeAlone")]
#[case::duplicate_flag("strafe vec vec", "DuplicateArgument")]
#[case::duplicate_speed("strafe 100ups 200ups", "DuplicateArgument")]
#[case::unknown_flag("strafe sideways", "UnknownArgument")]
#[case::bare_number_needs_unit("strafe 300", "UnknownArgument")]
#[case::unordered_unknown("stop everything", "UnknownArgument")]
#[case::missing_required("setang 0", "MissingArguments")]
#[case::missing_all("setang", "MissingArguments")]
#[case::word_for_number("setang x 0", "TypeMismatch")]
#[case::unit_on_plain_number("setang 10deg 0", "TypeMismatch")]
#[case::trailing("zoom in frob", "TrailingArguments")]
#[case::committed_keyword("autoaim ent 0 0 0", "TrailingArguments")]
fn test_invalid_invocations(#[case] line: &str, #[case] expected: &str) {
    let err = run(line).unwrap_err();
    assert_eq!(kind(&err), expected, "{line}: {err:?}");
}

#[test]
fn test_error_span_points_at_offending_token() {
    let err = run("strafe vec sideways").unwrap_err();
    // "sideways" starts at column 11
    assert_eq!(err.span(), Span::new(0, 11, 19));
}

#[test]
fn test_keywords_are_case_insensitive() {
    let matched = run("strafe VEC VecCam").unwrap();
    assert!(matched.keyword_params("vec").is_some());
    assert!(matched.keyword_params("veccam").is_some());
}

#[test]
fn test_strafe_permutations_bind_identically() {
    let a = run("strafe 299.999ups left veccam").unwrap();
    let b = run("strafe veccam 299.999ups left").unwrap();
    let c = run("strafe left veccam 299.999ups").unwrap();
    assert_eq!(a.args, b.args);
    assert_eq!(b.args, c.args);
}

#[test]
fn test_check_is_fixed_order() {
    // pos after ang cannot match: ang's slot is consumed first and pos's
    // slot was already passed over.
    let err = run("check ang 0 90 pos 1 2 3").unwrap_err();
    assert_eq!(kind(&err), "TrailingArguments");
}

#[test]
fn test_zero_argument_rules() {
    // expects_arguments = false: bare invocation fine
    assert!(run("stop").is_ok());
    // expects_arguments = true but all slots optional: bare invocation fine
    assert!(run("check").is_ok());
    assert!(run("strafe").is_ok());
    // required slots present: bare invocation fails
    assert_eq!(kind(&run("setang").unwrap_err()), "MissingArguments");
}

#[test]
fn test_match_span_covers_invocation() {
    let matched = run("duck 20").unwrap();
    assert_eq!(matched.span, Span::new(0, 0, 7));
}
