//! ## First Order Unification
//! This module implements Robinson's 1965 unification algorithm in its "first disagreement"
//! formulation: repeatedly find the leftmost position where two of the propositions differ, bind
//! the variable found there and rewrite all propositions until only one of them is left.
//! The key function is [most_general_unifier].

use log::debug;

use crate::{
    error::{InferenceError, Result},
    subst::{Substitutable, Substitution, Unifier},
    term_bank::{Predicate, Proposition, Term},
};

enum Disagreement<'a> {
    /// The first pair of differing sub-terms.
    Terms(&'a Term, &'a Term),
    /// The propositions already differ above the term level (predicate symbol or arity, or a
    /// term compared with an atom).
    Atoms,
}

fn term_disagreement<'a>(one: &'a Term, two: &'a Term) -> Option<(&'a Term, &'a Term)> {
    match (one, two) {
        (Term::Var(x), Term::Var(y)) => (x != y).then_some((one, two)),
        (Term::App { id: f, args: f_args }, Term::App { id: g, args: g_args })
            if f == g && f_args.len() == g_args.len() =>
        {
            f_args
                .iter()
                .zip(g_args)
                .find_map(|(s, t)| term_disagreement(s, t))
        }
        _ => Some((one, two)),
    }
}

fn atom_disagreement<'a>(one: &'a Predicate, two: &'a Predicate) -> Option<Disagreement<'a>> {
    if one.id != two.id || one.args.len() != two.args.len() {
        return Some(Disagreement::Atoms);
    }
    one.args
        .iter()
        .zip(&two.args)
        .find_map(|(s, t)| term_disagreement(s, t))
        .map(|(s, t)| Disagreement::Terms(s, t))
}

fn disagreement<'a>(one: &'a Proposition, two: &'a Proposition) -> Option<Disagreement<'a>> {
    match (one, two) {
        (Proposition::Term(s), Proposition::Term(t)) => {
            term_disagreement(s, t).map(|(s, t)| Disagreement::Terms(s, t))
        }
        (Proposition::Atom(p), Proposition::Atom(q)) => atom_disagreement(p, q),
        _ => Some(Disagreement::Atoms),
    }
}

fn push_unique(acc: &mut Vec<Proposition>, proposition: Proposition) {
    if !acc.contains(&proposition) {
        acc.push(proposition);
    }
}

struct UnificationProblem {
    propositions: Vec<Proposition>,
    unifier: Unifier,
}

enum UnificationState {
    Success,
    Failure(InferenceError),
    Next,
}

impl UnificationProblem {
    fn new(propositions: &[Proposition]) -> Self {
        let mut unique = Vec::with_capacity(propositions.len());
        propositions
            .iter()
            .for_each(|p| push_unique(&mut unique, p.clone()));
        Self {
            propositions: unique,
            unifier: Unifier::new(),
        }
    }

    fn conflict(&self) -> InferenceError {
        InferenceError::NonUnifiable(
            Box::new(self.propositions[0].clone()),
            Box::new(self.propositions[1].clone()),
        )
    }

    /// Turn the disagreement into a binding `x |-> t`. If both sides are variables the first one
    /// is bound to the second.
    fn propose_binding(&self, disagreement: Disagreement<'_>) -> Option<Substitution> {
        let (var_id, term) = match disagreement {
            Disagreement::Terms(Term::Var(x), t) => (*x, t),
            Disagreement::Terms(s, Term::Var(y)) => (*y, s),
            _ => return None,
        };
        // x = t, E => bot if x in var(t)
        if var_id.occurs_in(term) {
            debug!("Occurs check failed for X{} in {}", var_id.index(), term);
            return None;
        }
        Some(Substitution::new(var_id, term.clone()))
    }

    fn step(&mut self) -> UnificationState {
        if self.propositions.len() < 2 {
            return UnificationState::Success;
        }
        let binding = match disagreement(&self.propositions[0], &self.propositions[1]) {
            Some(disagreement) => self.propose_binding(disagreement),
            None => {
                // Only reachable through duplicates, which were removed on construction.
                self.propositions.remove(1);
                return UnificationState::Next;
            }
        };
        match binding {
            Some(binding) => {
                let mut rewritten = Vec::with_capacity(self.propositions.len());
                for proposition in std::mem::take(&mut self.propositions) {
                    push_unique(&mut rewritten, proposition.subst_with(&binding));
                }
                self.propositions = rewritten;
                self.unifier.push(binding);
                UnificationState::Next
            }
            None => UnificationState::Failure(self.conflict()),
        }
    }

    fn run(mut self) -> Result<Unifier> {
        loop {
            match self.step() {
                UnificationState::Success => return Ok(self.unifier),
                UnificationState::Failure(err) => return Err(err),
                UnificationState::Next => continue,
            }
        }
    }
}

/// Compute a most general unifier of all `propositions`. Applying the returned bindings in order
/// to any of the propositions yields the same proposition. Every successful step eliminates one
/// variable, so this terminates on finite input.
pub fn most_general_unifier(propositions: &[Proposition]) -> Result<Unifier> {
    let res = UnificationProblem::new(propositions).run();
    match &res {
        Ok(unifier) => debug!("Unification success with {} binding(s)", unifier.len()),
        Err(err) => debug!("Unification failure: {err}"),
    }
    res
}

impl Term {
    /// Try to unify `self` and `other`.
    pub fn unify(&self, other: &Self) -> Result<Unifier> {
        debug!("Unifying, {} with {}", self, other);
        most_general_unifier(&[self.clone().into(), other.clone().into()])
    }
}

impl Predicate {
    /// Try to unify the atoms `self` and `other`.
    pub fn unify(&self, other: &Self) -> Result<Unifier> {
        debug!("Unifying, {} with {}", self, other);
        most_general_unifier(&[self.clone().into(), other.clone().into()])
    }
}
