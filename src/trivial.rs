//! ## Trivial Clause Detection
//! This module contains the implementation of a trivial clause detection algorithm based on
//! ["E – A Brainiac Theorem Prover"](https://wwwlehre.dhbw-stuttgart.de/~sschulz/PAPERS/Schulz-AICOM-2002.pdf)

use log::info;

use crate::clause::Clause;

/// Check whether `clause` is a syntactic tautology, derived clauses for which this holds carry no
/// information and may be dropped by the caller.
pub fn is_trivial(clause: &Clause) -> bool {
    // Rule TD1, a positive reflexive equation s = s
    let reflexive = clause.literals().iter().any(|lit| {
        lit.is_positive()
            && lit
                .get_atom()
                .equation_sides()
                .is_some_and(|(lhs, rhs)| lhs == rhs)
    });
    if reflexive {
        info!("TD1 killed: {}", clause);
        return true;
    }

    // Rule TD2, a literal together with its complement
    let complementary = clause
        .iter()
        .any(|(id, l1)| clause.iter_after(id).any(|(_, l2)| l1.is_negation_of(l2)));
    if complementary {
        info!("TD2 killed: {}", clause);
    }
    complementary
}
