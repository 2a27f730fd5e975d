//! # Para
//! This library contains the inference core of a given clause resolution prover: Robinson
//! unification, positive factoring and unrestricted binary paramodulation, together with the
//! term addressing and substitution primitives they are built on. The saturation loop itself is
//! not part of the library, [factoring::all_possible_factors] and
//! [paramodulation::all_paramodulants_from_list] are the entry points it calls once per given
//! clause. Additionally [tptp_parser] is able to read TPTP CNF problems into our clause format.

pub mod clause;
pub mod error;
pub mod factoring;
pub mod paramodulation;
pub mod position;
pub mod pretty_print;
pub mod subst;
pub mod term_bank;
pub mod tptp_parser;
pub mod trivial;
pub mod unify;
