pub mod assign;
pub mod import;
pub mod roster;
