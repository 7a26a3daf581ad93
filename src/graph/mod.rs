//! Keyword similarity graphs
//!
//! [`builder::PhraseGraph`] is the mutable construction form;
//! [`csr::CsrGraph`] is the frozen, deterministically ordered form that
//! PageRank runs on.

pub mod builder;
pub mod csr;
