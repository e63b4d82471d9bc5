pub mod error;
pub mod game;
pub mod logic;
pub mod replay;
pub mod scenario;
pub mod search;
pub mod trace;
pub mod viz;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
