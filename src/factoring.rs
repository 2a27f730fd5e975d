//! ## Positive Factoring
//! ```text
//!   C ∨ A₁ ∨ A₂
//! ───────────────   σ = mgu(A₁, A₂)
//!    σ(C ∨ A₁)
//! ```
//! where `A₁` and `A₂` are positive literals.

use log::{debug, info};

use crate::{
    clause::{Clause, InferenceRule, Literal},
    error::{InferenceError, Result},
};

/// Apply the positive factoring rule to `literal_one` and `literal_two` with the remaining
/// literals `clause`. The result has no provenance attached.
pub fn factoring(clause: &Clause, literal_one: &Literal, literal_two: &Literal) -> Result<Clause> {
    if literal_one.is_negated() || literal_two.is_negated() {
        return Err(InferenceError::InvalidRuleApplication(format!(
            "factoring is not possible for {literal_one} and {literal_two}"
        )));
    }
    let unifier = literal_one.get_atom().unify(literal_two.get_atom())?;
    let mut new_literals = clause.literals().to_vec();
    new_literals.push(literal_one.clone());
    Ok(unifier.apply(Clause::new(new_literals)))
}

/// Compute all factors of `given_clause`, one attempt per pair of positive literals. Every
/// result cites `given_clause` as its only parent. Structurally equal results are not merged.
pub fn all_possible_factors(given_clause: &Clause) -> Result<Vec<Clause>> {
    info!("Fact working clause: {}", given_clause);
    let mut factors = Vec::new();
    for (lit1_id, lit1) in given_clause.iter() {
        // Condition: both literals must be positive
        if lit1.is_negated() {
            continue;
        }
        for (lit2_id, lit2) in given_clause.iter_after(lit1_id) {
            if lit2.is_negated() {
                continue;
            }
            let rest = Clause::new(given_clause.literals_without(&[lit1_id, lit2_id]));
            match factoring(&rest, lit1, lit2) {
                Ok(factor) => {
                    let factor = Clause::derived(
                        factor.into_literals(),
                        InferenceRule::Factoring,
                        vec![given_clause.label().cloned()],
                    );
                    info!("Fact derived clause: {}", factor);
                    factors.push(factor);
                }
                Err(err) if err.is_unproductive() => {
                    debug!("Fact skipped {} and {}: {}", lit1, lit2, err)
                }
                Err(err) => return Err(err),
            }
        }
    }
    Ok(factors)
}
