//! SQL AST, its conversion to parameterized SQL text, and helpers for building it.

pub mod ast;
pub mod convert;
pub mod helpers;
pub mod string;
