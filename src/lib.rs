pub mod automaton;
pub mod config;
pub mod solver;
pub mod validation;
