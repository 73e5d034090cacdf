//! Domain and collaborator wire types shared by the tour crates.

pub mod domain;
pub mod protocol;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
