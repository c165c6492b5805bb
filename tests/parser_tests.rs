use alang_fsa::{parse, ParseErrorKind};

#[test]
fn round_trips_through_to_string() {
    let expr = parse("a? (b | c)+").unwrap();
    assert_eq!(expr.to_string(), "a?(b|c)+");

    let reparsed = parse(&expr.to_string()).unwrap();
    assert_eq!(reparsed, expr);
}

#[test]
fn error_taxonomy_seed_cases() {
    assert_eq!(parse("|a").unwrap_err().kind, ParseErrorKind::UnexpectedOperator);
    assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::EmptyInput);

    let trailing_op = parse("a|").unwrap_err();
    assert_eq!(trailing_op.kind, ParseErrorKind::MissingRightOperand);
    assert_eq!(trailing_op.offset, 2);

    let unclosed = parse("(a").unwrap_err();
    assert_eq!(unclosed.kind, ParseErrorKind::MissingClosingParen);
    assert_eq!(unclosed.offset, 2);

    let trailing_paren = parse("a)").unwrap_err();
    assert_eq!(trailing_paren.kind, ParseErrorKind::UnexpectedClosingParen);
    assert_eq!(trailing_paren.offset, 1);
}

#[test]
fn empty_parens_parse_as_empty_language() {
    let expr = parse("()").unwrap();
    assert_eq!(expr.to_string(), "()");
}
