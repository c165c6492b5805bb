//! Named sample Alang patterns with accept/reject cases, used by the demo
//! binary and by the integration tests.

/// One accept/reject case for a [`Preset`]: a sequence of symbols fed to
/// [`crate::mfa::Mfa::accepts`], and whether it should be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// The symbol sequence to feed in.
    pub input: &'static [&'static str],
    /// Whether `input` should be accepted.
    pub expected: bool,
}

/// A named Alang pattern paired with its accept/reject cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Human-readable name.
    pub name: &'static str,
    /// The Alang surface-syntax pattern.
    pub pattern: &'static str,
    /// Accept/reject cases exercising the pattern.
    pub samples: &'static [Sample],
}

/// A small curated set of Alang patterns exercising union, intersection,
/// difference, Kleene closure, and the wildcard's compile-time-closed
/// alphabet (§9).
#[must_use]
pub fn presets() -> &'static [Preset] {
    const PRESETS: &[Preset] = &[
        Preset {
            name: "Balanced A Runs",
            pattern: "a (b|c)* a",
            samples: &[
                Sample {
                    input: &["a", "b", "a"],
                    expected: true,
                },
                Sample {
                    input: &["a", "c", "c", "c", "a"],
                    expected: true,
                },
                Sample {
                    input: &["a", "a"],
                    expected: true,
                },
                Sample {
                    input: &["a", "b"],
                    expected: false,
                },
            ],
        },
        Preset {
            name: "Optional A Then At Least One B Or C",
            pattern: "a? (b|c)+",
            samples: &[
                Sample {
                    input: &["b"],
                    expected: true,
                },
                Sample {
                    input: &["a", "b", "b", "c", "b"],
                    expected: true,
                },
                Sample {
                    input: &["a", "b", "a", "a", "b"],
                    expected: false,
                },
                Sample {
                    input: &[],
                    expected: false,
                },
            ],
        },
        Preset {
            name: "Zero Or More AB Pairs Or Exactly C",
            pattern: "(a b)*|c",
            samples: &[
                Sample {
                    input: &[],
                    expected: true,
                },
                Sample {
                    input: &["a", "b"],
                    expected: true,
                },
                Sample {
                    input: &["a", "b", "a", "b"],
                    expected: true,
                },
                Sample {
                    input: &["c"],
                    expected: true,
                },
                Sample {
                    input: &["a", "c"],
                    expected: false,
                },
            ],
        },
        Preset {
            name: "Any Repetition Of A Except Exactly One",
            pattern: "a* - a",
            samples: &[
                Sample {
                    input: &[],
                    expected: true,
                },
                Sample {
                    input: &["a"],
                    expected: false,
                },
                Sample {
                    input: &["a", "a"],
                    expected: true,
                },
            ],
        },
        Preset {
            name: "Everything Except A",
            pattern: "a~",
            samples: &[
                Sample {
                    input: &[],
                    expected: true,
                },
                Sample {
                    input: &["a"],
                    expected: false,
                },
                Sample {
                    input: &["a", "a"],
                    expected: true,
                },
            ],
        },
        Preset {
            name: "Empty Language",
            pattern: "()",
            samples: &[
                Sample {
                    input: &[],
                    expected: false,
                },
                Sample {
                    input: &["a"],
                    expected: false,
                },
            ],
        },
        Preset {
            name: "Wildcard Closed Over Compile-Time Alphabet",
            pattern: "a . a | a b a",
            samples: &[
                Sample {
                    input: &["a", "a", "a"],
                    expected: true,
                },
                Sample {
                    input: &["a", "b", "a"],
                    expected: true,
                },
                Sample {
                    input: &["a", "c", "a"],
                    expected: false,
                },
            ],
        },
    ];
    PRESETS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alang::parse;
    use crate::alphabet::MutableAlphabet;
    use crate::compiler::compile;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn every_preset_sample_matches_its_expectation() {
        for preset in presets() {
            let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
            let expr = parse(preset.pattern).unwrap_or_else(|e| {
                panic!("preset {:?} failed to parse: {e}", preset.name)
            });
            let mfa = compile(&expr, alphabet);
            for sample in preset.samples {
                assert_eq!(
                    mfa.accepts(sample.input.iter().copied()),
                    sample.expected,
                    "preset {:?} sample {:?}",
                    preset.name,
                    sample.input
                );
            }
        }
    }
}
