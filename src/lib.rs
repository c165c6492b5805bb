//! A finite-state automata library: compiles the Alang regular-expression
//! surface syntax into automata and provides the closure operations needed
//! to manipulate them, plus determinization, minimization, and a canonical
//! minimal form that is unique per accepted language.

pub mod alang;
pub mod alphabet;
pub mod compiler;
pub mod dfa;
pub mod errors;
pub mod mfa;
pub mod nfa;
pub mod ops;
pub mod presets;
pub mod sentinel;
pub mod store;
pub mod transition;

pub use alang::{parse, Expr};
pub use alphabet::{AlphabetView, CanonicalAlphabet, MutableAlphabet};
pub use compiler::compile;
pub use dfa::Dfa;
pub use errors::{AlphabetError, ContractViolation, ParseError, ParseErrorKind};
pub use mfa::Mfa;
pub use nfa::Nfa;
pub use sentinel::{StateId, SymbolId, INVALID_STATE, INVALID_SYMBOL};
pub use transition::{EpsilonTransition, Transition};
