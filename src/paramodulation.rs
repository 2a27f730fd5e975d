//! ## Binary Paramodulation
//! ```text
//!   C₁ ∨ s ≈ t     C₂ ∨ L[r]
//! ───────────────────────────   σ = mgu(s, r)
//!     σ(L[t] ∨ C₁ ∨ C₂)
//! ```
//! where `C₁ ∨ s ≈ t` and `C₂ ∨ L[r]` share no variables and only the one occurrence of `r` at
//! the chosen position of `L` is rewritten. No term ordering restricts the rule.

use log::{debug, info};

use crate::{
    clause::{Clause, InferenceRule, Literal},
    error::{InferenceError, Result},
    position::Positioned,
    term_bank::Term,
    unify::most_general_unifier,
};

/// Apply binary paramodulation, rewriting the sub-term at `position` of `literal_two`'s atom
/// with the equation `lhs ≈ rhs` taken from `clause_one`.
pub fn paramodulation(
    clause_one: &Clause,
    (lhs, rhs): (&Term, &Term),
    clause_two: &Clause,
    literal_two: &Literal,
    position: usize,
) -> Result<Clause> {
    let atom = literal_two.get_atom();
    let target = atom.subterm_at(position)?;
    let unifier = most_general_unifier(&[lhs.clone().into(), target.clone().into()])?;
    let new_atom = atom.replace_at(position, rhs.clone())?;
    let mut new_literals = Vec::with_capacity(1 + clause_one.len() + clause_two.len());
    new_literals.push(Literal::new(literal_two.is_negated(), new_atom));
    new_literals.extend_from_slice(clause_one.literals());
    new_literals.extend_from_slice(clause_two.literals());
    Ok(unifier.apply(Clause::new(new_literals)))
}

/// Paramodulate into every position of `literal_two` except the root of the atom, using both
/// orientations of the equation `equality_literal`.
pub fn all_paramodulants_from_clause(
    clause_one: &Clause,
    equality_literal: &Literal,
    clause_two: &Clause,
    literal_two: &Literal,
) -> Result<Vec<Clause>> {
    let sides = match equality_literal.get_atom().equation_sides() {
        Some(sides) if equality_literal.is_positive() => sides,
        _ => {
            return Err(InferenceError::InvalidRuleApplication(format!(
                "expected equality, but got {equality_literal}"
            )));
        }
    };
    // s ≈ s rewrites nothing
    if sides.0 == sides.1 {
        return Ok(Vec::new());
    }

    let mut paramodulants = Vec::new();
    for position in 1..literal_two.get_atom().size() {
        for equation in equality_literal.symm_term_iter() {
            match paramodulation(clause_one, equation, clause_two, literal_two, position) {
                Ok(paramodulant) => paramodulants.push(paramodulant),
                Err(err) if err.is_unproductive() => {
                    debug!("Para skipped position {} of {}: {}", position, literal_two, err)
                }
                Err(err) => return Err(err),
            }
        }
    }
    Ok(paramodulants)
}

fn new_paramodulants(
    clause_one: &Clause,
    literal_one: &Literal,
    given_clause: &Clause,
    acc: &mut Vec<Clause>,
) -> Result<()> {
    for (lit2_id, literal_two) in given_clause.iter() {
        let clause_two = Clause::new(given_clause.literals_without(&[lit2_id]));
        // Part 1: the processed clause rewrites the given clause
        if literal_one.is_positive_equality() {
            acc.extend(all_paramodulants_from_clause(
                clause_one,
                literal_one,
                &clause_two,
                literal_two,
            )?);
        }
        // Part 2: the given clause rewrites the processed clause
        if literal_two.is_positive_equality() {
            acc.extend(all_paramodulants_from_clause(
                &clause_two,
                literal_two,
                clause_one,
                literal_one,
            )?);
        }
    }
    Ok(())
}

/// Compute all paramodulants between `given_clause` and each of the `processed` clauses, in both
/// directions. Every result cites the processed clause and the given clause as parents.
pub fn all_paramodulants_from_list(
    processed: &[Clause],
    given_clause: &Clause,
) -> Result<Vec<Clause>> {
    info!("Para working clause: {}", given_clause);
    let mut paramodulants = Vec::new();
    for other_clause in processed {
        for (lit1_id, literal_one) in other_clause.iter() {
            let clause_one = Clause::new(other_clause.literals_without(&[lit1_id]));
            let mut acc = Vec::new();
            new_paramodulants(&clause_one, literal_one, given_clause, &mut acc)?;
            for paramodulant in acc {
                let paramodulant = Clause::derived(
                    paramodulant.into_literals(),
                    InferenceRule::Paramodulation,
                    vec![
                        other_clause.label().cloned(),
                        given_clause.label().cloned(),
                    ],
                );
                info!("Para derived clause: {}", paramodulant);
                paramodulants.push(paramodulant);
            }
        }
    }
    Ok(paramodulants)
}

#[cfg(test)]
mod test {
    use crate::{
        clause::{Clause, ClauseLabel, InferenceRule, Literal},
        error::InferenceError,
        term_bank::{
            FunctionInformation, Predicate, PredicateIdentifier, PredicateInformation, Term,
            TermBank, VariableInformation,
        },
    };

    use super::{all_paramodulants_from_clause, all_paramodulants_from_list, paramodulation};

    #[test]
    fn rewrite_single_position() {
        let mut term_bank = TermBank::new();
        let p = term_bank.add_predicate(PredicateInformation {
            name: "p".to_string(),
            arity: 1,
        });
        let q = term_bank.add_predicate(PredicateInformation {
            name: "q".to_string(),
            arity: 1,
        });
        let r = term_bank.add_predicate(PredicateInformation {
            name: "r".to_string(),
            arity: 1,
        });
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let b = term_bank.add_function(FunctionInformation {
            name: "b".to_string(),
            arity: 0,
        });
        let a = term_bank.mk_const(a);
        let b = term_bank.mk_const(b);
        let x = term_bank.mk_fresh_variable(VariableInformation {
            name: "x".to_string(),
        });

        // p(X) with X = b rewriting ~r(a) in q(X)
        let clause_one = Clause::new(vec![Literal::mk_pos(term_bank.mk_atom(p, vec![x.clone()]))]);
        let clause_two = Clause::new(vec![Literal::mk_pos(term_bank.mk_atom(q, vec![x.clone()]))]);
        let literal_two = Literal::mk_neg(term_bank.mk_atom(r, vec![a.clone()]));
        let result = paramodulation(&clause_one, (&x, &b), &clause_two, &literal_two, 1).unwrap();
        assert_eq!(
            result,
            Clause::new(vec![
                Literal::mk_pos(term_bank.mk_atom(p, vec![a.clone()])),
                Literal::mk_pos(term_bank.mk_atom(q, vec![a.clone()])),
                Literal::mk_neg(term_bank.mk_atom(r, vec![b.clone()])),
            ])
        );

        assert!(matches!(
            paramodulation(&clause_one, (&b, &x), &clause_two, &literal_two, 1),
            Err(InferenceError::NonUnifiable(..))
        ));
        assert!(matches!(
            paramodulation(&clause_one, (&a, &a), &clause_two, &literal_two, 1),
            Err(InferenceError::DegenerateReplacement(1))
        ));
        assert!(matches!(
            paramodulation(&clause_one, (&x, &b), &clause_two, &literal_two, 2),
            Err(InferenceError::IndexOutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn equality_precondition() {
        let mut term_bank = TermBank::new();
        let p = term_bank.add_predicate(PredicateInformation {
            name: "p".to_string(),
            arity: 1,
        });
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let b = term_bank.add_function(FunctionInformation {
            name: "b".to_string(),
            arity: 0,
        });
        let a = term_bank.mk_const(a);
        let b = term_bank.mk_const(b);
        let empty = Clause::new(vec![]);
        let target = Literal::mk_pos(term_bank.mk_atom(p, vec![a.clone()]));

        let negated = Literal::mk_neg(Predicate::mk_eq(a.clone(), b.clone()));
        let not_equality = Literal::mk_pos(term_bank.mk_atom(p, vec![b.clone()]));
        let unary = Predicate::new(PredicateIdentifier::EQUALITY, vec![a.clone()]);
        let unary = Literal::mk_pos(unary);
        for bad in [negated, not_equality, unary] {
            assert!(matches!(
                all_paramodulants_from_clause(&empty, &bad, &empty, &target),
                Err(InferenceError::InvalidRuleApplication(_))
            ));
        }

        let reflexive = Literal::mk_pos(Predicate::mk_eq(a.clone(), a.clone()));
        assert_eq!(
            all_paramodulants_from_clause(&empty, &reflexive, &empty, &target),
            Ok(vec![])
        );

        let a_eq_b = Literal::mk_pos(Predicate::mk_eq(a.clone(), b.clone()));
        let res = all_paramodulants_from_clause(&empty, &a_eq_b, &empty, &target).unwrap();
        assert_eq!(
            res,
            vec![Clause::new(vec![Literal::mk_pos(term_bank.mk_atom(p, vec![b.clone()]))])]
        );
    }

    #[test]
    fn six_paramodulants() {
        // one: a = b | X = X, two: b = c
        let mut term_bank = TermBank::new();
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let b = term_bank.add_function(FunctionInformation {
            name: "b".to_string(),
            arity: 0,
        });
        let c = term_bank.add_function(FunctionInformation {
            name: "c".to_string(),
            arity: 0,
        });
        let a = term_bank.mk_const(a);
        let b = term_bank.mk_const(b);
        let c = term_bank.mk_const(c);
        let x = term_bank.mk_fresh_variable(VariableInformation {
            name: "X".to_string(),
        });
        let eq = |s: &Term, t: &Term| Literal::mk_pos(Predicate::mk_eq(s.clone(), t.clone()));

        let one = Clause::labelled(ClauseLabel::new("one"), vec![eq(&a, &b), eq(&x, &x)]);
        let two = Clause::labelled(ClauseLabel::new("two"), vec![eq(&b, &c)]);
        let res = all_paramodulants_from_list(&[one], &two).unwrap();
        assert_eq!(res.len(), 6);
        for clause in res.iter() {
            assert_eq!(clause.inference_rule(), Some(InferenceRule::Paramodulation));
            assert_eq!(
                clause.inference_parents(),
                &[Some(ClauseLabel::new("one")), Some(ClauseLabel::new("two"))]
            );
        }

        let a_eq_c = Clause::new(vec![eq(&a, &c), eq(&x, &x)]);
        assert_eq!(res.iter().filter(|clause| **clause == a_eq_c).count(), 2);
        let c_eq_b = Clause::new(vec![eq(&c, &b), eq(&a, &b)]);
        assert_eq!(res.iter().filter(|clause| **clause == c_eq_b).count(), 2);
        let b_eq_c = Clause::new(vec![eq(&b, &c), eq(&a, &b)]);
        assert_eq!(res.iter().filter(|clause| **clause == b_eq_c).count(), 2);
    }

    #[test]
    fn malformed_equality_propagates() {
        let mut term_bank = TermBank::new();
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let q = term_bank.add_predicate(PredicateInformation {
            name: "q".to_string(),
            arity: 0,
        });
        let a = term_bank.mk_const(a);
        let unary = Predicate::new(PredicateIdentifier::EQUALITY, vec![a.clone()]);
        let one = Clause::labelled(ClauseLabel::new("one"), vec![Literal::mk_pos(unary)]);
        let two = Clause::labelled(
            ClauseLabel::new("two"),
            vec![Literal::mk_neg(term_bank.mk_atom(q, vec![]))],
        );
        assert!(matches!(
            all_paramodulants_from_list(&[one], &two),
            Err(InferenceError::InvalidRuleApplication(_))
        ));
    }

    #[test]
    fn determinism() {
        let mut term_bank = TermBank::new();
        let f = term_bank.add_function(FunctionInformation {
            name: "f".to_string(),
            arity: 1,
        });
        let a = term_bank.add_function(FunctionInformation {
            name: "a".to_string(),
            arity: 0,
        });
        let p = term_bank.add_predicate(PredicateInformation {
            name: "p".to_string(),
            arity: 1,
        });
        let a = term_bank.mk_const(a);
        let x = term_bank.mk_fresh_variable(VariableInformation {
            name: "x".to_string(),
        });
        let y = term_bank.mk_fresh_variable(VariableInformation {
            name: "y".to_string(),
        });
        let fx = term_bank.mk_app(f, vec![x.clone()]);
        let ffy = term_bank.mk_app(f, vec![term_bank.mk_app(f, vec![y.clone()])]);

        let processed = vec![Clause::labelled(
            ClauseLabel::new("ax"),
            vec![Literal::mk_pos(Predicate::mk_eq(fx.clone(), x.clone()))],
        )];
        let given = Clause::labelled(
            ClauseLabel::new("goal"),
            vec![
                Literal::mk_neg(term_bank.mk_atom(p, vec![ffy.clone()])),
                Literal::mk_pos(Predicate::mk_eq(y.clone(), a.clone())),
            ],
        );
        let first = all_paramodulants_from_list(&processed, &given).unwrap();
        let second = all_paramodulants_from_list(&processed, &given).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
