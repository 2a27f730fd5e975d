//! ## Clauses
//! This module provides an implementation of literals and CNF clauses. The key exported data
//! structures are:
//! - [Literal] for representing signed atoms
//! - [Clause] for representing disjunctions of literals together with their provenance
//! - [InferenceRule] and [ClauseLabel] which make up that provenance

use std::fmt::{self, Display};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    subst::{Substitutable, Substitution},
    term_bank::{Predicate, Term, TermBank, VariableIdentifier, VariableInformation},
};

/// A literal is an atom that is possibly negated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    negated: bool,
    atom: Predicate,
}

impl Literal {
    pub fn new(negated: bool, atom: Predicate) -> Self {
        Self { negated, atom }
    }

    /// Create the positive literal `atom`.
    pub fn mk_pos(atom: Predicate) -> Self {
        Self::new(false, atom)
    }

    /// Create the negative literal `¬atom`.
    pub fn mk_neg(atom: Predicate) -> Self {
        Self::new(true, atom)
    }

    pub fn get_atom(&self) -> &Predicate {
        &self.atom
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_positive(&self) -> bool {
        !self.negated
    }

    /// Check whether the literal is a positive literal over the equality symbol, regardless of
    /// its arity.
    pub fn is_positive_equality(&self) -> bool {
        self.is_positive() && self.atom.is_equality()
    }

    /// Check whether `other` is the negation of `self`.
    pub fn is_negation_of(&self, other: &Self) -> bool {
        self.negated != other.negated && self.atom == other.atom
    }

    /// Iterator over both orientations of a binary equation, empty for anything else.
    pub fn symm_term_iter(&self) -> SymmLitIterator<'_> {
        let idx = if self.atom.equation_sides().is_some() {
            0
        } else {
            2
        };
        SymmLitIterator { lit: self, idx }
    }
}

impl Substitutable for Literal {
    fn subst_with(self, subst: &Substitution) -> Self {
        Self {
            negated: self.negated,
            atom: self.atom.subst_with(subst),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~{}", self.atom)
        } else {
            write!(f, "{}", self.atom)
        }
    }
}

/// Iterator over both symmetries of an equation literal.
pub struct SymmLitIterator<'a> {
    lit: &'a Literal,
    idx: u8,
}

impl<'a> Iterator for SymmLitIterator<'a> {
    type Item = (&'a Term, &'a Term);

    fn next(&mut self) -> Option<Self::Item> {
        let (lhs, rhs) = self.lit.atom.equation_sides()?;
        match self.idx {
            0 => {
                self.idx += 1;
                Some((lhs, rhs))
            }
            1 => {
                self.idx += 1;
                Some((rhs, lhs))
            }
            _ => None,
        }
    }
}

/// A unique identifier for a literal within a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LiteralId(usize);

/// The name a clause is cited by in proofs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseLabel(String);

impl ClauseLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClauseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The inference rule a clause was derived by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceRule {
    Factoring,
    Paramodulation,
}

impl InferenceRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceRule::Factoring => "factoring",
            InferenceRule::Paramodulation => "paramodulation",
        }
    }
}

impl Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [Literal] together with the information needed to cite it in a proof. Clauses are
/// never modified, operations on them build new clauses.
#[derive(Debug, Clone)]
pub struct Clause {
    literals: Vec<Literal>,
    label: Option<ClauseLabel>,
    inference_parents: Vec<Option<ClauseLabel>>,
    inference_rule: Option<InferenceRule>,
}

fn dedup_literals(literals: impl IntoIterator<Item = Literal>) -> Vec<Literal> {
    let mut seen = FxHashSet::default();
    literals
        .into_iter()
        .filter(|lit| seen.insert(lit.clone()))
        .collect()
}

impl Clause {
    /// Create a new clause without provenance containing the literals from `vec`, only the first
    /// occurrence of duplicate literals is kept.
    pub fn new(vec: Vec<Literal>) -> Self {
        Self {
            literals: dedup_literals(vec),
            label: None,
            inference_parents: Vec::new(),
            inference_rule: None,
        }
    }

    /// Create an input clause named `label`.
    pub fn labelled(label: ClauseLabel, vec: Vec<Literal>) -> Self {
        Self {
            label: Some(label),
            ..Self::new(vec)
        }
    }

    /// Create a clause derived by `rule` from the clauses labelled `parents`.
    pub fn derived(
        vec: Vec<Literal>,
        rule: InferenceRule,
        parents: Vec<Option<ClauseLabel>>,
    ) -> Self {
        Self {
            inference_parents: parents,
            inference_rule: Some(rule),
            ..Self::new(vec)
        }
    }

    /// Get how many literals are in the clause, this operation is `O(1)`.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check if the clause is empty, this operation is `O(1)`.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if the clause is unit, this operation is `O(1)`.
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Obtain a literal from the clause by index.
    pub fn get_literal(&self, literal_id: LiteralId) -> &Literal {
        &self.literals[literal_id.0]
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn into_literals(self) -> Vec<Literal> {
        self.literals
    }

    pub fn label(&self) -> Option<&ClauseLabel> {
        self.label.as_ref()
    }

    pub fn inference_parents(&self) -> &[Option<ClauseLabel>] {
        &self.inference_parents
    }

    pub fn inference_rule(&self) -> Option<InferenceRule> {
        self.inference_rule
    }

    /// Obtain an iterator over the literals in the clause.
    pub fn iter(&self) -> impl Iterator<Item = (LiteralId, &Literal)> {
        self.literals
            .iter()
            .enumerate()
            .map(|(idx, lit)| (LiteralId(idx), lit))
    }

    /// Obtain an iterator over the literals after `id` in the clause.
    pub fn iter_after(&self, id: LiteralId) -> impl Iterator<Item = (LiteralId, &Literal)> {
        self.iter().skip(id.0 + 1)
    }

    /// The literals of the clause except the ones at `ids`, in their original order.
    pub fn literals_without(&self, ids: &[LiteralId]) -> Vec<Literal> {
        self.iter()
            .filter(|(id, _)| !ids.contains(id))
            .map(|(_, lit)| lit.clone())
            .collect()
    }

    /// Check whether `other` contains exactly the same literals, in any order.
    pub fn same_literals(&self, other: &Self) -> bool {
        self.len() == other.len() && self.literals.iter().all(|lit| other.literals.contains(lit))
    }

    /// All variables of the clause in order of their first occurrence.
    pub fn variables(&self) -> Vec<VariableIdentifier> {
        let mut acc = Vec::new();
        self.literals
            .iter()
            .for_each(|lit| lit.atom.collect_vars_into(&mut acc));
        let mut seen = FxHashSet::default();
        acc.retain(|var| seen.insert(*var));
        acc
    }

    /// Clone the clause and substitute all of its variables with fresh ones from `term_bank` to
    /// obtain a clause that shares no variables with any clause built before. The provenance is
    /// kept.
    pub fn fresh_variable_clone(&self, term_bank: &mut TermBank) -> Clause {
        let vars = self.variables();
        if vars.is_empty() {
            return self.clone();
        }
        let mut renaming = FxHashMap::default();
        for old_var in vars {
            let name = term_bank
                .get_variable_info(old_var)
                .map(|info| info.name.clone())
                .unwrap_or_else(|| format!("X{}", old_var.index()));
            let fresh = term_bank.add_variable(VariableInformation { name });
            renaming.insert(old_var, fresh);
        }
        let literals = self
            .literals
            .iter()
            .map(|lit| Literal {
                negated: lit.negated,
                atom: Predicate::new(
                    lit.atom.id,
                    lit.atom
                        .args
                        .iter()
                        .map(|arg| rename(arg, &renaming))
                        .collect(),
                ),
            })
            .collect();
        Clause {
            literals,
            label: self.label.clone(),
            inference_parents: self.inference_parents.clone(),
            inference_rule: self.inference_rule,
        }
    }
}

// Simultaneous renaming, a fresh id may coincide with an old one of another variable.
fn rename(term: &Term, renaming: &FxHashMap<VariableIdentifier, VariableIdentifier>) -> Term {
    match term {
        Term::Var(id) => Term::Var(renaming.get(id).copied().unwrap_or(*id)),
        Term::App { id, args } => Term::App {
            id: *id,
            args: args.iter().map(|arg| rename(arg, renaming)).collect(),
        },
    }
}

impl PartialEq for Clause {
    /// Clauses are compared as sets of literals, provenance is not taken into account.
    fn eq(&self, other: &Self) -> bool {
        self.same_literals(other)
    }
}

impl Eq for Clause {}

impl Substitutable for Clause {
    /// Apply `subst` to every literal, keeping the provenance. Literals that become equal are
    /// merged.
    fn subst_with(self, subst: &Substitution) -> Self {
        let literals = self
            .literals
            .into_iter()
            .map(|lit| lit.subst_with(subst));
        Self {
            literals: dedup_literals(literals),
            label: self.label,
            inference_parents: self.inference_parents,
            inference_rule: self.inference_rule,
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("$false");
        }
        for (idx, lit) in self.literals.iter().enumerate() {
            if idx > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{lit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        clause::{Clause, ClauseLabel, InferenceRule, LiteralId},
        subst::{Substitutable, Substitution},
        term_bank::{
            FunctionInformation, Predicate, PredicateInformation, TermBank, VariableInformation,
        },
    };

    use super::Literal;

    #[test]
    fn basic_literal_test() {
        let mut term_bank = TermBank::new();
        let x_id = term_bank.add_variable(VariableInformation {
            name: "x".to_string(),
        });
        let y_id = term_bank.add_variable(VariableInformation {
            name: "y".to_string(),
        });
        let x = term_bank.mk_variable(x_id);
        let y = term_bank.mk_variable(y_id);

        let l1 = Literal::mk_pos(Predicate::mk_eq(x.clone(), y.clone()));
        let l2 = Literal::mk_neg(Predicate::mk_eq(x.clone(), y.clone()));

        assert!(l1.is_positive());
        assert!(l1.is_positive_equality());
        assert!(l2.is_negated());
        assert!(!l2.is_positive_equality());
        assert!(l1.is_negation_of(&l2));
        assert_ne!(l1, l2);

        let sides: Vec<_> = l1.symm_term_iter().collect();
        assert_eq!(sides, vec![(&x, &y), (&y, &x)]);

        let c1_id = term_bank.add_function(FunctionInformation {
            name: "c1".to_string(),
            arity: 0,
        });
        let c1 = term_bank.mk_const(c1_id);
        let subst = Substitution::new(x_id, c1.clone());
        assert_eq!(
            l1.subst_with(&subst),
            Literal::mk_pos(Predicate::mk_eq(c1, y))
        );
    }

    #[test]
    fn basic_clause_test() {
        let mut term_bank = TermBank::new();
        let p = term_bank.add_predicate(PredicateInformation {
            name: "p".to_string(),
            arity: 1,
        });
        let x = term_bank.mk_fresh_variable(VariableInformation {
            name: "x".to_string(),
        });
        let y = term_bank.mk_fresh_variable(VariableInformation {
            name: "y".to_string(),
        });

        let clause = Clause::new(vec![]);
        assert_eq!(clause.len(), 0);
        assert!(clause.is_empty());
        assert!(!clause.is_unit());

        let lit1 = Literal::mk_pos(term_bank.mk_atom(p, vec![x.clone()]));
        let lit2 = Literal::mk_neg(term_bank.mk_atom(p, vec![y.clone()]));
        let clause = Clause::new(vec![lit1.clone(), lit2.clone(), lit1.clone()]);
        assert_eq!(clause.len(), 2);
        assert_eq!(clause.get_literal(LiteralId(0)), &lit1);
        assert_eq!(clause.literals_without(&[LiteralId(0)]), vec![lit2.clone()]);
        assert_eq!(clause, Clause::new(vec![lit2.clone(), lit1.clone()]));
        assert_eq!(clause.iter_after(LiteralId(0)).count(), 1);

        // instantiating can merge literals
        let py = Literal::mk_pos(term_bank.mk_atom(p, vec![y.clone()]));
        let merged = Clause::new(vec![lit1.clone(), py])
            .subst_with(&Substitution::new(y.variable_id().unwrap(), x.clone()));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn provenance_survives_substitution() {
        let mut term_bank = TermBank::new();
        let p = term_bank.add_predicate(PredicateInformation {
            name: "p".to_string(),
            arity: 1,
        });
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let a = term_bank.mk_const(a);
        let x_id = term_bank.add_variable(VariableInformation {
            name: "x".to_string(),
        });
        let x = term_bank.mk_variable(x_id);
        let parents = vec![Some(ClauseLabel::new("one"))];
        let clause = Clause::derived(
            vec![Literal::mk_pos(term_bank.mk_atom(p, vec![x]))],
            InferenceRule::Factoring,
            parents.clone(),
        );
        let clause = clause.subst_with(&Substitution::new(x_id, a));
        assert_eq!(clause.inference_rule(), Some(InferenceRule::Factoring));
        assert_eq!(clause.inference_parents(), parents.as_slice());
        assert_eq!(clause.label(), None);
    }

    #[test]
    fn fresh_variables() {
        let mut term_bank = TermBank::new();
        let p = term_bank.add_predicate(PredicateInformation {
            name: "p".to_string(),
            arity: 2,
        });
        let x = term_bank.mk_fresh_variable(VariableInformation {
            name: "x".to_string(),
        });
        let y = term_bank.mk_fresh_variable(VariableInformation {
            name: "y".to_string(),
        });
        let clause = Clause::labelled(
            ClauseLabel::new("c"),
            vec![Literal::mk_pos(term_bank.mk_atom(p, vec![x.clone(), y.clone()]))],
        );
        let renamed = clause.fresh_variable_clone(&mut term_bank);
        assert_eq!(clause.variables().len(), 2);
        assert_eq!(renamed.variables().len(), 2);
        assert!(
            renamed
                .variables()
                .iter()
                .all(|var| !clause.variables().contains(var))
        );
        assert_eq!(renamed.label(), clause.label());
    }
}
