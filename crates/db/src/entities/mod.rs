//! `SeaORM` entity definitions.

pub mod expenses;
pub mod groups;
pub mod members;
