//! The Alang expression tree and its round-trippable string form.

use std::fmt::{self, Display, Formatter};

use crate::alang::cursor::OPERATOR_CHARS;

/// An Alang expression.
///
/// Each variant carries the precedence used only for string round-tripping
/// (§6): a child is parenthesized by [`Expr`]'s `Display` impl iff its own
/// precedence is strictly lower than its parent's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single interned symbol, e.g. `a`.
    Symbol(String),
    /// `.`: matches any symbol in the alphabet fixed at compile time.
    Wildcard,
    /// `()`: the language that accepts nothing, not even the empty string.
    EmptyLang,
    /// `l | r`.
    Union(Box<Expr>, Box<Expr>),
    /// `l - r`.
    Difference(Box<Expr>, Box<Expr>),
    /// `l & r`.
    Intersection(Box<Expr>, Box<Expr>),
    /// `l r` (juxtaposition).
    Concatenation(Box<Expr>, Box<Expr>),
    /// `x?`.
    Option(Box<Expr>),
    /// `x*`.
    KleeneStar(Box<Expr>),
    /// `x+`.
    KleenePlus(Box<Expr>),
    /// `x~`.
    Complement(Box<Expr>),
}

impl Expr {
    /// Creates a union node.
    #[must_use]
    pub fn union(l: Expr, r: Expr) -> Expr {
        Expr::Union(Box::new(l), Box::new(r))
    }

    /// Creates a difference node.
    #[must_use]
    pub fn difference(l: Expr, r: Expr) -> Expr {
        Expr::Difference(Box::new(l), Box::new(r))
    }

    /// Creates an intersection node.
    #[must_use]
    pub fn intersection(l: Expr, r: Expr) -> Expr {
        Expr::Intersection(Box::new(l), Box::new(r))
    }

    /// Creates a concatenation node.
    #[must_use]
    pub fn concatenation(l: Expr, r: Expr) -> Expr {
        Expr::Concatenation(Box::new(l), Box::new(r))
    }

    /// Creates an option node.
    #[must_use]
    pub fn option(x: Expr) -> Expr {
        Expr::Option(Box::new(x))
    }

    /// Creates a Kleene star node.
    #[must_use]
    pub fn kleene_star(x: Expr) -> Expr {
        Expr::KleeneStar(Box::new(x))
    }

    /// Creates a Kleene plus node.
    #[must_use]
    pub fn kleene_plus(x: Expr) -> Expr {
        Expr::KleenePlus(Box::new(x))
    }

    /// Creates a complement node.
    #[must_use]
    pub fn complement(x: Expr) -> Expr {
        Expr::Complement(Box::new(x))
    }

    /// Precedence used for round-trip parenthesization: 1 lowest, 7 highest.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Union(..) => 1,
            Expr::Difference(..) => 2,
            Expr::Intersection(..) => 3,
            Expr::Concatenation(..) => 4,
            Expr::Option(..) | Expr::KleeneStar(..) | Expr::KleenePlus(..) | Expr::Complement(..) => 5,
            Expr::Symbol(_) | Expr::Wildcard | Expr::EmptyLang => 7,
        }
    }
}

fn fuses_with(last: Option<char>, first: Option<char>) -> bool {
    match (last, first) {
        (Some(a), Some(b)) => !a.is_whitespace()
            && !OPERATOR_CHARS.contains(&a)
            && !b.is_whitespace()
            && !OPERATOR_CHARS.contains(&b),
        _ => false,
    }
}

fn write_child(f: &mut Formatter<'_>, parent_precedence: u8, child: &Expr) -> fmt::Result {
    if child.precedence() < parent_precedence {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(s) => write!(f, "{s}"),
            Expr::Wildcard => write!(f, "."),
            Expr::EmptyLang => write!(f, "()"),
            Expr::Union(l, r) => {
                write_child(f, self.precedence(), l)?;
                write!(f, "|")?;
                write_child(f, self.precedence(), r)
            }
            Expr::Difference(l, r) => {
                write_child(f, self.precedence(), l)?;
                write!(f, "-")?;
                write_child(f, self.precedence(), r)
            }
            Expr::Intersection(l, r) => {
                write_child(f, self.precedence(), l)?;
                write!(f, "&")?;
                write_child(f, self.precedence(), r)
            }
            Expr::Concatenation(l, r) => {
                let left = render_child(self.precedence(), l);
                let right = render_child(self.precedence(), r);
                write!(f, "{left}")?;
                if fuses_with(left.chars().last(), right.chars().next()) {
                    write!(f, " ")?;
                }
                write!(f, "{right}")
            }
            Expr::Option(x) => {
                write_child(f, self.precedence(), x)?;
                write!(f, "?")
            }
            Expr::KleeneStar(x) => {
                write_child(f, self.precedence(), x)?;
                write!(f, "*")
            }
            Expr::KleenePlus(x) => {
                write_child(f, self.precedence(), x)?;
                write!(f, "+")
            }
            Expr::Complement(x) => {
                write_child(f, self.precedence(), x)?;
                write!(f, "~")
            }
        }
    }
}

fn render_child(parent_precedence: u8, child: &Expr) -> String {
    if child.precedence() < parent_precedence {
        format!("({child})")
    } else {
        child.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_and_wildcard_round_trip() {
        assert_eq!(Expr::Symbol("ab".into()).to_string(), "ab");
        assert_eq!(Expr::Wildcard.to_string(), ".");
        assert_eq!(Expr::EmptyLang.to_string(), "()");
    }

    #[test]
    fn lower_precedence_child_is_parenthesized() {
        let union = Expr::union(Expr::Symbol("a".into()), Expr::Symbol("b".into()));
        let plus = Expr::kleene_plus(union);
        assert_eq!(plus.to_string(), "(a|b)+");
    }

    #[test]
    fn concatenation_inserts_space_to_avoid_symbol_fusion() {
        let concat = Expr::concatenation(Expr::Symbol("a".into()), Expr::Symbol("b".into()));
        assert_eq!(concat.to_string(), "a b");
    }

    #[test]
    fn concatenation_omits_space_when_no_fusion_risk() {
        let concat = Expr::concatenation(
            Expr::Symbol("a".into()),
            Expr::kleene_star(Expr::Symbol("b".into())),
        );
        assert_eq!(concat.to_string(), "ab*");
    }

    #[test]
    fn seed_scenario_one() {
        let expr = Expr::concatenation(
            Expr::option(Expr::Symbol("a".into())),
            Expr::kleene_plus(Expr::union(Expr::Symbol("b".into()), Expr::Symbol("c".into()))),
        );
        assert_eq!(expr.to_string(), "a?(b|c)+");
    }
}
