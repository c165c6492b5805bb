//! Automata algorithms: subset construction, minimization, trim, product,
//! complement, and the NFA-shaped regular combinators.
//!
//! Everything here operates on the mutable [`crate::nfa::Nfa`] /
//! [`crate::dfa::Dfa`] builders; [`crate::compiler`] is the only caller that
//! threads results back out to the immutable [`crate::mfa::Mfa`].

pub mod combinators;
pub mod complement;
pub mod core;
pub mod product;

pub use combinators::{concatenation, kleene_plus, kleene_star, option, union};
pub use complement::complement;
pub use core::{determinize, minimize, reverse, trim};
pub use product::intersect;
