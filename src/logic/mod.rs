//! 一阶逻辑定子句与可回放的反向链接

mod bc;
mod kb;
mod parse;
mod table;
mod term;
mod unify;

pub use bc::{DEFAULT_MAX_DEPTH, Proof, ProofNode, fol_bc_ask, record_fol_bc_ask};
pub use kb::{CRIME_KB, Clause, FolKb};
pub use parse::{is_variable_name, parse_atom, parse_clause};
pub use table::{Cell, ProofTable};
pub use term::{Substitution, Term};
pub use unify::unify;
