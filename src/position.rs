//! ## Sub-term Positions
//! Sub-terms of a term or an atom are addressed by their index in a pre-order (depth first, left
//! to right) traversal of the tree, `0` being the proposition itself. For `p(f(X), b)` the
//! positions are `0 ↦ p(f(X), b)`, `1 ↦ f(X)`, `2 ↦ X` and `3 ↦ b`.
//!
//! The key things exposed are the [Positioned] trait and [VariableIdentifier::occurs_in].

use crate::{
    error::{InferenceError, Result},
    term_bank::{Predicate, Proposition, Term, VariableIdentifier},
};

impl VariableIdentifier {
    /// Check whether the variable occurs anywhere in `term`.
    pub fn occurs_in(&self, term: &Term) -> bool {
        match term {
            Term::Var(id) => id == self,
            Term::App { args, .. } => args.iter().any(|arg| self.occurs_in(arg)),
        }
    }

    pub fn occurs_in_atom(&self, atom: &Predicate) -> bool {
        atom.args.iter().any(|arg| self.occurs_in(arg))
    }
}

/// Things whose sub-terms can be addressed by pre-order position.
pub trait Positioned: Sized {
    /// The number of nodes in the tree, i.e. one more than the largest valid position.
    fn size(&self) -> usize;

    /// The sub-term at `index`.
    fn subterm_at(&self, index: usize) -> Result<&Term>;

    /// A copy of `self` where only the sub-term at `index` is replaced by `replacement`. Fails
    /// with [InferenceError::DegenerateReplacement] if that would not change anything.
    fn replace_at(&self, index: usize, replacement: Term) -> Result<Self>;
}

fn args_size(args: &[Term]) -> usize {
    args.iter().map(Positioned::size).sum()
}

// `index` is relative to the parent, whose own position is 0.
fn subterm_in_args(args: &[Term], index: usize) -> Option<&Term> {
    let mut offset = 1;
    for arg in args {
        let size = arg.size();
        if index < offset + size {
            return subterm_in(arg, index - offset);
        }
        offset += size;
    }
    None
}

fn subterm_in(term: &Term, index: usize) -> Option<&Term> {
    if index == 0 {
        Some(term)
    } else {
        match term {
            Term::Var(_) => None,
            Term::App { args, .. } => subterm_in_args(args, index),
        }
    }
}

fn replace_in_args(args: &[Term], index: usize, replacement: Term) -> Result<Vec<Term>> {
    let mut new_args = args.to_vec();
    let mut offset = 1;
    for (arg_idx, arg) in args.iter().enumerate() {
        let size = arg.size();
        if index < offset + size {
            new_args[arg_idx] = replace_in(arg, index - offset, replacement)?;
            return Ok(new_args);
        }
        offset += size;
    }
    Err(InferenceError::IndexOutOfRange {
        index,
        size: offset,
    })
}

fn replace_in(term: &Term, index: usize, replacement: Term) -> Result<Term> {
    if index == 0 {
        if *term == replacement {
            Err(InferenceError::DegenerateReplacement(index))
        } else {
            Ok(replacement)
        }
    } else {
        match term {
            Term::Var(_) => Err(InferenceError::IndexOutOfRange { index, size: 1 }),
            Term::App { id, args } => Ok(Term::App {
                id: *id,
                args: replace_in_args(args, index, replacement)?,
            }),
        }
    }
}

impl Positioned for Term {
    fn size(&self) -> usize {
        match self {
            Term::Var(_) => 1,
            Term::App { args, .. } => 1 + args_size(args),
        }
    }

    fn subterm_at(&self, index: usize) -> Result<&Term> {
        subterm_in(self, index).ok_or(InferenceError::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    fn replace_at(&self, index: usize, replacement: Term) -> Result<Self> {
        let size = self.size();
        if index >= size {
            return Err(InferenceError::IndexOutOfRange { index, size });
        }
        replace_in(self, index, replacement).map_err(|err| relocate(err, index))
    }
}

impl Positioned for Predicate {
    fn size(&self) -> usize {
        1 + args_size(&self.args)
    }

    fn subterm_at(&self, index: usize) -> Result<&Term> {
        if index == 0 {
            return Err(InferenceError::InvalidPosition(index));
        }
        subterm_in_args(&self.args, index).ok_or(InferenceError::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    fn replace_at(&self, index: usize, replacement: Term) -> Result<Self> {
        if index == 0 {
            return Err(InferenceError::InvalidPosition(index));
        }
        let size = self.size();
        if index >= size {
            return Err(InferenceError::IndexOutOfRange { index, size });
        }
        let args = replace_in_args(&self.args, index, replacement)
            .map_err(|err| relocate(err, index))?;
        Ok(Predicate::new(self.id, args))
    }
}

impl Positioned for Proposition {
    fn size(&self) -> usize {
        match self {
            Proposition::Term(term) => term.size(),
            Proposition::Atom(atom) => atom.size(),
        }
    }

    fn subterm_at(&self, index: usize) -> Result<&Term> {
        match self {
            Proposition::Term(term) => term.subterm_at(index),
            Proposition::Atom(atom) => atom.subterm_at(index),
        }
    }

    fn replace_at(&self, index: usize, replacement: Term) -> Result<Self> {
        match self {
            Proposition::Term(term) => term.replace_at(index, replacement).map(Proposition::Term),
            Proposition::Atom(atom) => atom.replace_at(index, replacement).map(Proposition::Atom),
        }
    }
}

// The recursive helpers report positions relative to the sub-tree they work on, callers want
// to see the position they asked for.
fn relocate(err: InferenceError, index: usize) -> InferenceError {
    match err {
        InferenceError::DegenerateReplacement(_) => InferenceError::DegenerateReplacement(index),
        other => other,
    }
}
