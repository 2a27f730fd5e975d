//! ## Terms and Atoms
//! This module contains the first order term model all inference rules operate on:
//! - [Term] for variables and function applications (constants being nullary applications)
//! - [Predicate] for atomic formulae, equality being the reserved [PredicateIdentifier::EQUALITY]
//! - [Proposition] for "a term or an atom", the unit of unification and sub-term addressing
//! - [TermBank] which keeps the names and arities behind the numeric identifiers
//!
//! All of these are immutable values with structural equality, every operation on them produces
//! new values.

use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionInformation {
    pub name: String,
    pub arity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableInformation {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateInformation {
    pub name: String,
    pub arity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionIdentifier(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableIdentifier(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PredicateIdentifier(u32);

impl FunctionIdentifier {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl VariableIdentifier {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl PredicateIdentifier {
    /// The equality symbol, registered in every [TermBank] with arity 2.
    pub const EQUALITY: PredicateIdentifier = PredicateIdentifier(0);

    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

/// A first order term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Var(VariableIdentifier),
    App {
        id: FunctionIdentifier,
        args: Vec<Term>,
    },
}

impl Term {
    pub fn variable_id(&self) -> Option<VariableIdentifier> {
        match self {
            Term::Var(id) => Some(*id),
            Term::App { .. } => None,
        }
    }

    pub fn function_args(&self) -> Option<&[Term]> {
        match self {
            Term::Var(_) => None,
            Term::App { args, .. } => Some(args),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::App { args, .. } => args.iter().all(Term::is_ground),
        }
    }

    /// Push every variable occurrence of the term into `acc`, left to right and with repetitions.
    pub fn collect_vars_into(&self, acc: &mut Vec<VariableIdentifier>) {
        match self {
            Term::Var(id) => acc.push(*id),
            Term::App { args, .. } => args.iter().for_each(|arg| arg.collect_vars_into(acc)),
        }
    }
}

/// An atomic formula `p(t_1, ..., t_n)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Predicate {
    pub id: PredicateIdentifier,
    pub args: Vec<Term>,
}

impl Predicate {
    pub fn new(id: PredicateIdentifier, args: Vec<Term>) -> Self {
        Self { id, args }
    }

    /// Create the equation `lhs = rhs`.
    pub fn mk_eq(lhs: Term, rhs: Term) -> Self {
        Self::new(PredicateIdentifier::EQUALITY, vec![lhs, rhs])
    }

    pub fn is_equality(&self) -> bool {
        self.id == PredicateIdentifier::EQUALITY
    }

    /// The two sides if this is a well formed (binary) equation.
    pub fn equation_sides(&self) -> Option<(&Term, &Term)> {
        match self.args.as_slice() {
            [lhs, rhs] if self.is_equality() => Some((lhs, rhs)),
            _ => None,
        }
    }

    pub fn collect_vars_into(&self, acc: &mut Vec<VariableIdentifier>) {
        self.args.iter().for_each(|arg| arg.collect_vars_into(acc));
    }
}

/// Either a term or an atom, unification and sub-term addressing work uniformly on both.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Proposition {
    Term(Term),
    Atom(Predicate),
}

impl From<Term> for Proposition {
    fn from(term: Term) -> Self {
        Proposition::Term(term)
    }
}

impl From<Predicate> for Proposition {
    fn from(atom: Predicate) -> Self {
        Proposition::Atom(atom)
    }
}

fn fmt_args(args: &[Term], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !args.is_empty() {
        f.write_str("(")?;
        for (idx, arg) in args.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")?;
    }
    Ok(())
}

// Bank-less rendering used in logs and error messages, see [crate::pretty_print] for names.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(id) => write!(f, "X{}", id.0),
            Term::App { id, args } => {
                write!(f, "f{}", id.0)?;
                fmt_args(args, f)
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.equation_sides() {
            Some((lhs, rhs)) => write!(f, "{lhs} = {rhs}"),
            None => {
                write!(f, "p{}", self.id.0)?;
                fmt_args(&self.args, f)
            }
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Term(term) => write!(f, "{term}"),
            Proposition::Atom(atom) => write!(f, "{atom}"),
        }
    }
}

/// Symbol information for the identifiers used in terms and atoms.
#[derive(Debug, Clone)]
pub struct TermBank {
    variable_bank: Vec<VariableInformation>,
    function_bank: Vec<FunctionInformation>,
    predicate_bank: Vec<PredicateInformation>,
    function_lookup: FxHashMap<(String, usize), FunctionIdentifier>,
    predicate_lookup: FxHashMap<(String, usize), PredicateIdentifier>,
}

impl TermBank {
    pub fn new() -> Self {
        let mut bank = Self {
            variable_bank: Vec::new(),
            function_bank: Vec::new(),
            predicate_bank: Vec::new(),
            function_lookup: FxHashMap::default(),
            predicate_lookup: FxHashMap::default(),
        };
        let eq = bank.add_predicate(PredicateInformation {
            name: "=".to_string(),
            arity: 2,
        });
        debug_assert_eq!(eq, PredicateIdentifier::EQUALITY);
        bank
    }

    fn next_id(len: usize) -> u32 {
        u32::try_from(len).unwrap_or_else(|_| panic!("symbol bank overflow at {len} entries"))
    }

    pub fn add_variable(&mut self, info: VariableInformation) -> VariableIdentifier {
        let id = VariableIdentifier(Self::next_id(self.variable_bank.len()));
        self.variable_bank.push(info);
        id
    }

    pub fn add_function(&mut self, info: FunctionInformation) -> FunctionIdentifier {
        let id = FunctionIdentifier(Self::next_id(self.function_bank.len()));
        self.function_lookup
            .entry((info.name.clone(), info.arity))
            .or_insert(id);
        self.function_bank.push(info);
        id
    }

    pub fn add_predicate(&mut self, info: PredicateInformation) -> PredicateIdentifier {
        let id = PredicateIdentifier(Self::next_id(self.predicate_bank.len()));
        self.predicate_lookup
            .entry((info.name.clone(), info.arity))
            .or_insert(id);
        self.predicate_bank.push(info);
        id
    }

    /// Look up the function symbol `name/arity`, registering it if it is new.
    pub fn intern_function(&mut self, name: &str, arity: usize) -> FunctionIdentifier {
        match self.function_lookup.get(&(name.to_string(), arity)) {
            Some(id) => *id,
            None => self.add_function(FunctionInformation {
                name: name.to_string(),
                arity,
            }),
        }
    }

    /// Look up the predicate symbol `name/arity`, registering it if it is new.
    pub fn intern_predicate(&mut self, name: &str, arity: usize) -> PredicateIdentifier {
        match self.predicate_lookup.get(&(name.to_string(), arity)) {
            Some(id) => *id,
            None => self.add_predicate(PredicateInformation {
                name: name.to_string(),
                arity,
            }),
        }
    }

    pub fn get_variable_info(&self, id: VariableIdentifier) -> Option<&VariableInformation> {
        self.variable_bank.get(id.0 as usize)
    }

    pub fn get_function_info(&self, id: FunctionIdentifier) -> Option<&FunctionInformation> {
        self.function_bank.get(id.0 as usize)
    }

    pub fn get_predicate_info(&self, id: PredicateIdentifier) -> Option<&PredicateInformation> {
        self.predicate_bank.get(id.0 as usize)
    }

    pub fn mk_variable(&self, id: VariableIdentifier) -> Term {
        Term::Var(id)
    }

    pub fn mk_fresh_variable(&mut self, info: VariableInformation) -> Term {
        let id = self.add_variable(info);
        self.mk_variable(id)
    }

    pub fn mk_app(&self, id: FunctionIdentifier, args: Vec<Term>) -> Term {
        debug_assert_eq!(
            self.get_function_info(id).map(|info| info.arity),
            Some(args.len())
        );
        Term::App { id, args }
    }

    pub fn mk_const(&self, id: FunctionIdentifier) -> Term {
        self.mk_app(id, vec![])
    }

    pub fn mk_atom(&self, id: PredicateIdentifier, args: Vec<Term>) -> Predicate {
        debug_assert_eq!(
            self.get_predicate_info(id).map(|info| info.arity),
            Some(args.len())
        );
        Predicate::new(id, args)
    }
}

impl Default for TermBank {
    fn default() -> Self {
        Self::new()
    }
}
