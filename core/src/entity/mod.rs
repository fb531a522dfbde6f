pub mod pantry;
pub mod substitutions;
