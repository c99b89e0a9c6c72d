//! Command implementations.

pub mod evaluate;
pub mod extract;

pub use self::evaluate::execute_evaluate;
pub use self::extract::execute_extract;
