pub mod agenda;
pub mod pending;
