//! ## Substitutions
//! This module contains an implementation of substitutions on first order constructs, the key
//! things exposed are:
//! - [Substitution] which is a single binding of a variable to a term.
//! - [Unifier] which is an ordered sequence of bindings as produced by unification.
//! - [Substitutable] which may be implemented for types that have some notion of substitution.

use crate::term_bank::{Predicate, Proposition, Term, VariableIdentifier};

/// The binding `{ variable |-> term }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Substitution {
    variable: VariableIdentifier,
    term: Term,
}

impl Substitution {
    /// Bind `variable` to `term`. The binding is not checked against `variable` occurring in
    /// `term`, callers producing bindings from unification problems have to do that.
    pub fn new(variable: VariableIdentifier, term: Term) -> Self {
        debug_assert!(!variable.occurs_in(&term));
        Self { variable, term }
    }

    pub fn variable(&self) -> VariableIdentifier {
        self.variable
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

/// A type that has a substitution operation on itself.
pub trait Substitutable {
    /// Replace every occurrence of the variable bound in `subst`.
    fn subst_with(self, subst: &Substitution) -> Self;
}

impl Substitutable for Term {
    /// Subtrees without the bound variable are moved into the result unchanged, so this is
    /// `O(size(term))` without any allocation for ground parts.
    fn subst_with(self, subst: &Substitution) -> Self {
        match self {
            Term::Var(id) if id == subst.variable => subst.term.clone(),
            Term::Var(_) => self,
            Term::App { id, args } => Term::App {
                id,
                args: args.subst_with(subst),
            },
        }
    }
}

impl Substitutable for Predicate {
    fn subst_with(self, subst: &Substitution) -> Self {
        Predicate {
            id: self.id,
            args: self.args.subst_with(subst),
        }
    }
}

impl Substitutable for Proposition {
    fn subst_with(self, subst: &Substitution) -> Self {
        match self {
            Proposition::Term(term) => Proposition::Term(term.subst_with(subst)),
            Proposition::Atom(atom) => Proposition::Atom(atom.subst_with(subst)),
        }
    }
}

impl<T: Substitutable> Substitutable for Vec<T> {
    fn subst_with(self, subst: &Substitution) -> Self {
        self.into_iter().map(|t| t.subst_with(subst)).collect()
    }
}

/// An ordered sequence of bindings. Applying it means applying every binding in turn, a binding
/// never reintroduces a variable that an earlier one eliminated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unifier {
    bindings: Vec<Substitution>,
}

impl Unifier {
    /// Create the empty (identity) unifier.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn push(&mut self, binding: Substitution) {
        self.bindings.push(binding);
    }

    /// Return `true` if the unifier is the identity.
    pub fn is_nop(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Substitution> {
        self.bindings.iter()
    }

    /// Apply all bindings to `t`, in order.
    pub fn apply<T: Substitutable>(&self, t: T) -> T {
        self.bindings
            .iter()
            .fold(t, |acc, binding| acc.subst_with(binding))
    }
}

impl<'a> IntoIterator for &'a Unifier {
    type Item = &'a Substitution;
    type IntoIter = std::slice::Iter<'a, Substitution>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        subst::Substitutable,
        term_bank::{FunctionInformation, TermBank, VariableInformation},
    };

    use super::{Substitution, Unifier};

    #[test]
    fn basic_test() {
        let mut term_bank = TermBank::new();
        let f = term_bank.add_function(FunctionInformation {
            name: "f".to_string(),
            arity: 2,
        });
        let g = term_bank.add_function(FunctionInformation {
            name: "g".to_string(),
            arity: 1,
        });
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let x_ident = term_bank.add_variable(VariableInformation {
            name: "x".to_string(),
        });
        let y_ident = term_bank.add_variable(VariableInformation {
            name: "y".to_string(),
        });
        let x = term_bank.mk_variable(x_ident);
        let y = term_bank.mk_variable(y_ident);

        let t1 = term_bank.mk_app(f, vec![x.clone(), term_bank.mk_app(g, vec![y.clone()])]);
        let t2 = term_bank.mk_const(a);
        let t3 = term_bank.mk_app(f, vec![t2.clone(), term_bank.mk_app(g, vec![y.clone()])]);
        let sigma = Substitution::new(x_ident, t2.clone());
        assert_eq!(t1.clone().subst_with(&sigma), t3);

        // the binding for y is not affected
        let tau = Substitution::new(x_ident, y.clone());
        assert_eq!(
            t1.subst_with(&tau),
            term_bank.mk_app(f, vec![y.clone(), term_bank.mk_app(g, vec![y.clone()])])
        );
    }

    #[test]
    fn unifier_applies_in_order() {
        let mut term_bank = TermBank::new();
        let f = term_bank.add_function(FunctionInformation {
            name: "f".to_string(),
            arity: 1,
        });
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let a = term_bank.mk_const(a);
        let x_ident = term_bank.add_variable(VariableInformation {
            name: "x".to_string(),
        });
        let y_ident = term_bank.add_variable(VariableInformation {
            name: "y".to_string(),
        });
        let x = term_bank.mk_variable(x_ident);
        let y = term_bank.mk_variable(y_ident);

        let mut unifier = Unifier::new();
        assert!(unifier.is_nop());
        unifier.push(Substitution::new(x_ident, term_bank.mk_app(f, vec![y.clone()])));
        unifier.push(Substitution::new(y_ident, a.clone()));
        assert_eq!(unifier.len(), 2);

        let fa = term_bank.mk_app(f, vec![a.clone()]);
        assert_eq!(unifier.apply(x.clone()), fa);
        assert_eq!(unifier.apply(vec![x, y]), vec![fa, a]);
    }
}
