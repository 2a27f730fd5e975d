//! ## TPTP CNF Input
//! This module reads TPTP problems consisting of `cnf` annotated formulae into [Clause]s. Every
//! clause is labelled with the name of its formula and gets its own set of variables, so clauses
//! read by this module never share variables.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tptp::TPTPIterator;
use tptp::cnf;
use tptp::fof;
use tptp::top::{AnnotatedFormula, FormulaSelection, TPTPInput};

use crate::{
    clause::{Clause, ClauseLabel, Literal},
    error::ParseError,
    term_bank::{Predicate, Term, TermBank, VariableIdentifier, VariableInformation},
};

type Result<T> = std::result::Result<T, ParseError>;

/// Translates the formula of one `cnf` annotated formula, the variable scope is the clause.
struct ClauseBuilder<'b> {
    term_bank: &'b mut TermBank,
    variables: FxHashMap<String, VariableIdentifier>,
}

impl<'b> ClauseBuilder<'b> {
    fn new(term_bank: &'b mut TermBank) -> Self {
        Self {
            term_bank,
            variables: FxHashMap::default(),
        }
    }

    fn variable(&mut self, name: String) -> Term {
        let term_bank = &mut *self.term_bank;
        let id = *self
            .variables
            .entry(name)
            .or_insert_with_key(|name| {
                term_bank.add_variable(VariableInformation { name: name.clone() })
            });
        Term::Var(id)
    }

    fn term(&mut self, t: fof::Term) -> Result<Term> {
        match t {
            fof::Term::Variable(v) => Ok(self.variable(v.to_string())),
            fof::Term::Function(f) => self.function_term(*f),
        }
    }

    fn function_term(&mut self, t: fof::FunctionTerm) -> Result<Term> {
        match t {
            fof::FunctionTerm::Plain(p) => self.plain_term(p),
            // Numbers and distinct objects are read as uninterpreted constants.
            fof::FunctionTerm::Defined(fof::DefinedTerm::Defined(d)) => {
                let id = self.term_bank.intern_function(&d.to_string(), 0);
                Ok(Term::App { id, args: vec![] })
            }
            other => Err(ParseError::Unsupported(format!("term {other}"))),
        }
    }

    fn plain_term(&mut self, t: fof::PlainTerm) -> Result<Term> {
        match t {
            fof::PlainTerm::Constant(c) => {
                let id = self.term_bank.intern_function(&c.to_string(), 0);
                Ok(Term::App { id, args: vec![] })
            }
            fof::PlainTerm::Function(f, args) => {
                let args = args
                    .0
                    .into_iter()
                    .map(|arg| self.term(arg))
                    .collect::<Result<Vec<_>>>()?;
                let id = self.term_bank.intern_function(&f.to_string(), args.len());
                Ok(Term::App { id, args })
            }
        }
    }

    fn atom(&mut self, f: fof::AtomicFormula) -> Result<Predicate> {
        match f {
            fof::AtomicFormula::Plain(p) => match p.0 {
                fof::PlainTerm::Constant(c) => {
                    let id = self.term_bank.intern_predicate(&c.to_string(), 0);
                    Ok(Predicate::new(id, vec![]))
                }
                fof::PlainTerm::Function(f, args) => {
                    let args = args
                        .0
                        .into_iter()
                        .map(|arg| self.term(arg))
                        .collect::<Result<Vec<_>>>()?;
                    let id = self.term_bank.intern_predicate(&f.to_string(), args.len());
                    Ok(Predicate::new(id, args))
                }
            },
            fof::AtomicFormula::Defined(fof::DefinedAtomicFormula::Infix(i)) => {
                let lhs = self.term(*i.left)?;
                let rhs = self.term(*i.right)?;
                Ok(Predicate::mk_eq(lhs, rhs))
            }
            other => Err(ParseError::Unsupported(format!("atom {other}"))),
        }
    }

    fn literal(&mut self, l: cnf::Literal) -> Result<Literal> {
        match l {
            cnf::Literal::Atomic(a) => Ok(Literal::mk_pos(self.atom(a)?)),
            cnf::Literal::NegatedAtomic(a) => Ok(Literal::mk_neg(self.atom(a)?)),
            // s != t
            cnf::Literal::Infix(i) => {
                let lhs = self.term(*i.left)?;
                let rhs = self.term(*i.right)?;
                Ok(Literal::mk_neg(Predicate::mk_eq(lhs, rhs)))
            }
        }
    }

    fn clause(mut self, label: ClauseLabel, formula: cnf::Formula) -> Result<Clause> {
        let disjunction = match formula {
            cnf::Formula::Disjunction(d) => d,
            cnf::Formula::Parenthesised(d) => d,
        };
        let literals = disjunction
            .0
            .into_iter()
            .map(|lit| self.literal(lit))
            .collect::<Result<Vec<_>>>()?;
        Ok(Clause::labelled(label, literals))
    }
}

fn parse_bytes(input: &[u8], dir: &Path, term_bank: &mut TermBank) -> Result<Vec<Clause>> {
    let mut parser = TPTPIterator::<()>::new(input);
    let mut clauses = Vec::new();
    while let Some(result) = parser.next() {
        let tptp_input =
            result.map_err(|_| ParseError::Syntax(input.len() - parser.remaining.len()))?;
        match tptp_input {
            TPTPInput::Include(include) => {
                if let FormulaSelection(Some(selection)) = include.selection {
                    return Err(ParseError::IncludeSelection(selection.to_string()));
                }
                // The path is single quoted.
                let include_path = dir.join(include.file_name.0.to_string().replace('\'', ""));
                log::info!("Include {:?}", include_path);
                clauses.append(&mut parse_file(&include_path, term_bank)?);
            }
            TPTPInput::Annotated(annotated_formula) => match *annotated_formula {
                AnnotatedFormula::Cnf(cnf_formula) => {
                    let annotated = (*cnf_formula).0;
                    let label = ClauseLabel::new(annotated.name.to_string());
                    log::info!("Parse CNF {}: {}", label, annotated.formula);
                    let clause = ClauseBuilder::new(term_bank).clause(label, *annotated.formula)?;
                    clauses.push(clause);
                }
                other => {
                    return Err(ParseError::Unsupported(format!(
                        "only cnf formulae are supported, got {other}"
                    )));
                }
            },
        }
    }
    if !parser.remaining.is_empty() {
        return Err(ParseError::Syntax(input.len() - parser.remaining.len()));
    }
    Ok(clauses)
}

/// Read all clauses of the TPTP problem `input`. Includes are resolved relative to the current
/// directory.
pub fn parse_str(input: &str, term_bank: &mut TermBank) -> Result<Vec<Clause>> {
    parse_bytes(input.as_bytes(), &PathBuf::from("."), term_bank)
}

/// Read all clauses of the TPTP problem in `file`, including the clauses of included files.
pub fn parse_file(file: &Path, term_bank: &mut TermBank) -> Result<Vec<Clause>> {
    log::info!("Opening {:?}", file);
    let bytes = fs::read(file)?;
    let dir = file.parent().unwrap_or_else(|| Path::new("."));
    parse_bytes(&bytes, dir, term_bank)
}
