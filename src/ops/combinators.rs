//! NFA-shaped combinators: union, concatenation, option, Kleene star/plus.
//!
//! Each combinator embeds one or two [`Mfa`] operands into a fresh [`Nfa`]
//! over the compiler's shared alphabet (renumbering states to avoid
//! collisions), wires the operation's epsilon structure, then determinizes
//! and minimizes back down to a canonical [`Mfa`].

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::alphabet::MutableAlphabet;
use crate::mfa::Mfa;
use crate::nfa::Nfa;
use crate::ops::core::{determinize, minimize};
use crate::sentinel::StateId;
use crate::transition::{EpsilonTransition, Transition};

/// Allocates a fresh block of states in `nfa` for `mfa`'s states (at least
/// one, even for the empty-language MFA, so every operand gets a disjoint,
/// unreachable placeholder that correctly contributes nothing), copies its
/// transitions in, and returns `(embedded initial, embedded finals)`.
fn embed(nfa: &mut Nfa, mfa: &Mfa, alphabet: &Rc<RefCell<MutableAlphabet>>) -> (StateId, BTreeSet<StateId>) {
    let count = mfa.state_count().max(1);
    let offset = nfa.new_state();
    for _ in 1..count {
        nfa.new_state();
    }
    if mfa.state_count() == 0 {
        return (offset, BTreeSet::new());
    }
    for t in mfa.transitions() {
        let symbol_str = mfa
            .alphabet()
            .symbol_at(t.symbol)
            .expect("mfa transition symbol is within its own alphabet");
        let new_symbol = alphabet.borrow_mut().get_or_add(symbol_str);
        nfa.add_transition_unchecked(Transition::new(offset + t.from, new_symbol, offset + t.to));
    }
    let finals = mfa.final_states().iter().map(|&s| offset + s).collect();
    (offset + mfa.initial_state(), finals)
}

fn canonicalize(nfa: &Nfa, alphabet: &Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let minimal = minimize(&determinize(nfa));
    Mfa::from_minimized_dfa(&minimal, &*alphabet.borrow())
}

/// `l | r`: a fresh initial state epsilon-branches to both operands'
/// initial states; the finals are the union of both operands' finals.
#[must_use]
pub fn union(l: &Mfa, r: &Mfa, alphabet: Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let mut nfa = Nfa::new(Rc::clone(&alphabet));
    let (init_l, finals_l) = embed(&mut nfa, l, &alphabet);
    let (init_r, finals_r) = embed(&mut nfa, r, &alphabet);

    let start = nfa.new_state();
    nfa.set_initial_unchecked(start, true);
    nfa.add_epsilon_unchecked(EpsilonTransition::new(start, init_l));
    nfa.add_epsilon_unchecked(EpsilonTransition::new(start, init_r));
    for f in finals_l.into_iter().chain(finals_r) {
        nfa.set_final_unchecked(f, true);
    }

    canonicalize(&nfa, &alphabet)
}

/// `l r`: epsilon-transitions from every final of `l` to `r`'s initial
/// state. `l`'s finals stop being final; `r`'s finals remain final.
#[must_use]
pub fn concatenation(l: &Mfa, r: &Mfa, alphabet: Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let mut nfa = Nfa::new(Rc::clone(&alphabet));
    let (init_l, finals_l) = embed(&mut nfa, l, &alphabet);
    let (init_r, finals_r) = embed(&mut nfa, r, &alphabet);

    nfa.set_initial_unchecked(init_l, true);
    for f in &finals_l {
        nfa.add_epsilon_unchecked(EpsilonTransition::new(*f, init_r));
    }
    for f in finals_r {
        nfa.set_final_unchecked(f, true);
    }

    canonicalize(&nfa, &alphabet)
}

/// `x?`: marks `x`'s initial state final, in addition to its existing finals.
#[must_use]
pub fn option(x: &Mfa, alphabet: Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let mut nfa = Nfa::new(Rc::clone(&alphabet));
    let (init, finals) = embed(&mut nfa, x, &alphabet);

    nfa.set_initial_unchecked(init, true);
    for f in finals {
        nfa.set_final_unchecked(f, true);
    }
    nfa.set_final_unchecked(init, true);

    canonicalize(&nfa, &alphabet)
}

/// `x*`: epsilon-transitions from every final back to the initial state,
/// then the initial state is also marked final (accepts the empty string).
#[must_use]
pub fn kleene_star(x: &Mfa, alphabet: Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let mut nfa = Nfa::new(Rc::clone(&alphabet));
    let (init, finals) = embed(&mut nfa, x, &alphabet);

    nfa.set_initial_unchecked(init, true);
    for f in &finals {
        nfa.add_epsilon_unchecked(EpsilonTransition::new(*f, init));
        nfa.set_final_unchecked(*f, true);
    }
    nfa.set_final_unchecked(init, true);

    canonicalize(&nfa, &alphabet)
}

/// `x+`: as [`kleene_star`] but without marking the initial state final, so
/// at least one repetition of `x` is required.
#[must_use]
pub fn kleene_plus(x: &Mfa, alphabet: Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let mut nfa = Nfa::new(Rc::clone(&alphabet));
    let (init, finals) = embed(&mut nfa, x, &alphabet);

    nfa.set_initial_unchecked(init, true);
    for f in &finals {
        nfa.add_epsilon_unchecked(EpsilonTransition::new(*f, init));
        nfa.set_final_unchecked(*f, true);
    }

    canonicalize(&nfa, &alphabet)
}
