//! ## Pretty Printing
//! This module contains the [BankPrettyPrint] trait which can be implemented for types that may
//! be pretty printed given some information from a term bank. Output follows TPTP CNF syntax so
//! derived clauses can be fed back into TPTP tools. Variables are printed as `<name>_<index>`, two
//! distinct variables never share a printed name.

use crate::{
    clause::{Clause, Literal},
    term_bank::{Predicate, Term, TermBank},
};

/// Types that can be pretty printed using information from a [TermBank]
pub trait BankPrettyPrint {
    /// Print the representation of `self` into `acc` using information from `term_bank`.
    fn print_into(&self, term_bank: &TermBank, acc: &mut String);
}

/// Pretty print some value that implements [BankPrettyPrint] to a string using information from
/// `term_bank`.
pub fn pretty_print<T: BankPrettyPrint>(t: &T, term_bank: &TermBank) -> String {
    let mut acc = String::new();
    t.print_into(term_bank, &mut acc);
    acc
}

fn print_args_into(args: &[Term], term_bank: &TermBank, acc: &mut String) {
    if let Some((last, init)) = args.split_last() {
        acc.push('(');
        for arg in init {
            arg.print_into(term_bank, acc);
            acc.push_str(", ");
        }
        last.print_into(term_bank, acc);
        acc.push(')');
    }
}

impl BankPrettyPrint for Term {
    fn print_into(&self, term_bank: &TermBank, acc: &mut String) {
        match self {
            // Names are only unique within the clause they were read from.
            Term::Var(id) => match term_bank.get_variable_info(*id) {
                Some(info) => acc.push_str(&format!("{}_{}", info.name, id.index())),
                None => acc.push_str(&format!("X{}", id.index())),
            },
            Term::App { id, args } => {
                match term_bank.get_function_info(*id) {
                    Some(info) => acc.push_str(&info.name),
                    None => acc.push_str(&format!("f{}", id.index())),
                }
                print_args_into(args, term_bank, acc);
            }
        }
    }
}

impl BankPrettyPrint for Predicate {
    fn print_into(&self, term_bank: &TermBank, acc: &mut String) {
        if let Some((lhs, rhs)) = self.equation_sides() {
            lhs.print_into(term_bank, acc);
            acc.push_str(" = ");
            rhs.print_into(term_bank, acc);
        } else {
            match term_bank.get_predicate_info(self.id) {
                Some(info) => acc.push_str(&info.name),
                None => acc.push_str(&format!("p{}", self.id.index())),
            }
            print_args_into(&self.args, term_bank, acc);
        }
    }
}

impl BankPrettyPrint for Literal {
    fn print_into(&self, term_bank: &TermBank, acc: &mut String) {
        if self.is_negated() {
            acc.push('~');
            // ~ binds tighter than the infix =
            if self.get_atom().equation_sides().is_some() {
                acc.push('(');
                self.get_atom().print_into(term_bank, acc);
                acc.push(')');
                return;
            }
        }
        self.get_atom().print_into(term_bank, acc);
    }
}

impl BankPrettyPrint for Clause {
    fn print_into(&self, term_bank: &TermBank, acc: &mut String) {
        if self.is_empty() {
            acc.push_str("$false");
        } else {
            for (idx, lit) in self.literals().iter().enumerate() {
                if idx > 0 {
                    acc.push_str(" | ");
                }
                lit.print_into(term_bank, acc);
            }
        }
    }
}

/// Print `clause` as a TPTP `cnf` annotated formula. Input clauses are printed as axioms,
/// derived clauses as lemmas carrying an `inference(rule, [], [parents])` annotation. Clauses
/// without a label are named `derived_<idx>`.
pub fn print_cnf(clause: &Clause, idx: usize, term_bank: &TermBank) -> String {
    let name = clause
        .label()
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("derived_{idx}"));
    let body = pretty_print(clause, term_bank);
    match clause.inference_rule() {
        Some(rule) => {
            let parents = clause
                .inference_parents()
                .iter()
                .map(|parent| match parent {
                    Some(label) => label.to_string(),
                    None => "unknown".to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("cnf({name}, lemma, {body}, inference({rule}, [], [{parents}])).")
        }
        None => format!("cnf({name}, axiom, {body})."),
    }
}
