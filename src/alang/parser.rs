//! Precedence-climbing recursive-descent parser over [`Cursor`].

use crate::alang::ast::Expr;
use crate::alang::cursor::{Cursor, OPERATOR_CHARS};
use crate::errors::{ParseError, ParseErrorKind};

/// Parses `input` into an [`Expr`], or the first [`ParseError`] encountered.
/// Parsing stops at the first error; no partial tree is returned.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let cursor = Cursor::new(input);
    if cursor.at_eoi() {
        return Err(ParseError::new(0, ParseErrorKind::EmptyInput));
    }
    let mut parser = Parser { cursor };
    let expr = parser.parse_union()?;
    if !parser.cursor.at_eoi() {
        return Err(ParseError::new(
            parser.cursor.offset(),
            ParseErrorKind::UnexpectedClosingParen,
        ));
    }
    Ok(expr)
}

/// Whether the character under the cursor could begin a `Primary`.
fn can_start_primary(c: Option<char>) -> bool {
    match c {
        Some('(') | Some('.') => true,
        Some(c) => !c.is_whitespace() && !OPERATOR_CHARS.contains(&c),
        None => false,
    }
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// `Union ::= Difference ('|' Difference)*`, right-recursive.
    fn parse_union(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_difference()?;
        if self.cursor.peek() == Some('|') {
            self.cursor.bump();
            self.expect_right_operand()?;
            let right = self.parse_union()?;
            Ok(Expr::union(left, right))
        } else {
            Ok(left)
        }
    }

    /// `Difference ::= Intersection ('-' Intersection)*`, right-recursive.
    fn parse_difference(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_intersection()?;
        if self.cursor.peek() == Some('-') {
            self.cursor.bump();
            self.expect_right_operand()?;
            let right = self.parse_difference()?;
            Ok(Expr::difference(left, right))
        } else {
            Ok(left)
        }
    }

    /// `Intersection ::= Concatenation ('&' Concatenation)*`, right-recursive.
    fn parse_intersection(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_concatenation()?;
        if self.cursor.peek() == Some('&') {
            self.cursor.bump();
            self.expect_right_operand()?;
            let right = self.parse_intersection()?;
            Ok(Expr::intersection(left, right))
        } else {
            Ok(left)
        }
    }

    /// `Concatenation ::= Unary Unary*`, right-recursive on juxtaposition.
    fn parse_concatenation(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_unary()?;
        if can_start_primary(self.cursor.peek()) {
            let right = self.parse_concatenation()?;
            Ok(Expr::concatenation(left, right))
        } else {
            Ok(left)
        }
    }

    /// `Unary ::= Primary PostfixOp*`, left-to-right.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_primary()?;
        loop {
            node = match self.cursor.peek() {
                Some('?') => {
                    self.cursor.bump();
                    Expr::option(node)
                }
                Some('*') => {
                    self.cursor.bump();
                    Expr::kleene_star(node)
                }
                Some('+') => {
                    self.cursor.bump();
                    Expr::kleene_plus(node)
                }
                Some('~') => {
                    self.cursor.bump();
                    Expr::complement(node)
                }
                _ => return Ok(node),
            };
        }
    }

    /// `Primary ::= '(' Union? ')' | '.' | Symbol`.
    ///
    /// Only ever called where [`can_start_primary`] already held for the
    /// cursor's current character, except for the mandatory first operand of
    /// each precedence level — there `)` and the remaining operator
    /// characters are live possibilities and produce their own diagnostics.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.peek() {
            Some('(') => self.parse_paren(),
            Some('.') => {
                self.cursor.bump();
                Ok(Expr::Wildcard)
            }
            Some(')') => Err(self.error_here(ParseErrorKind::UnexpectedClosingParen)),
            Some(c) if OPERATOR_CHARS.contains(&c) => {
                Err(self.error_here(ParseErrorKind::UnexpectedOperator))
            }
            Some(_) => Ok(Expr::Symbol(self.cursor.bump_symbol().to_string())),
            None => unreachable!("callers only reach parse_primary when a primary can start"),
        }
    }

    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        self.cursor.bump();
        if self.cursor.peek() == Some(')') {
            self.cursor.bump();
            return Ok(Expr::EmptyLang);
        }
        if self.cursor.at_eoi() {
            return Err(self.error_here(ParseErrorKind::MissingClosingParen));
        }
        let inner = self.parse_union()?;
        if self.cursor.peek() == Some(')') {
            self.cursor.bump();
            Ok(inner)
        } else {
            Err(self.error_here(ParseErrorKind::MissingClosingParen))
        }
    }

    /// Checks that a binary operator just consumed is followed by a valid
    /// right-operand start, without consuming anything.
    fn expect_right_operand(&self) -> Result<(), ParseError> {
        if can_start_primary(self.cursor.peek()) {
            Ok(())
        } else {
            Err(self.error_here(ParseErrorKind::MissingRightOperand))
        }
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.cursor.offset(), kind)
    }
}
