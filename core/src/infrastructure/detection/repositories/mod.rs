pub mod pantry_repository;
pub mod substitution_repository;

pub use pantry_repository::*;
pub use substitution_repository::*;
