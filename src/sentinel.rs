//! Sentinel values and index types shared across the automaton representations.

/// Identifier of a state in any automaton representation.
///
/// Valid states are non-negative; [`INVALID_STATE`] signals absence.
pub type StateId = i32;

/// Identifier of a symbol within an [`crate::alphabet::AlphabetView`].
///
/// Valid indices are non-negative; [`INVALID_SYMBOL`] signals absence.
pub type SymbolId = i32;

/// Sentinel returned when a state lookup fails to find a state.
pub const INVALID_STATE: StateId = -1;

/// Sentinel returned when a symbol lookup fails to find a symbol.
pub const INVALID_SYMBOL: SymbolId = -1;
