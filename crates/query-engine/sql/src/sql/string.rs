//! Type definitions of a low-level SQL string representation.

use std::fmt;

/// SQL text together with the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
    /// The number of the last placeholder emitted. `$1` is the first.
    pub param_index: u64,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A literal string
    String(String),
    /// A literal number
    Number(serde_json::Number),
    /// A literal boolean
    Bool(bool),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::String(s) => write!(f, "{s:?}"),
            Param::Number(n) => write!(f, "{n}"),
            Param::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
            param_index: 0,
        }
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Emit the next placeholder and bind `param` to it.
    pub fn append_param(&mut self, param: Param) {
        self.param_index += 1;
        self.sql.push_str(format!("${}", self.param_index).as_str());
        self.params.push(param);
    }

    /// Emit user-written SQL verbatim and bind its values in order.
    /// The text must number its own placeholders, starting after the ones already emitted.
    pub fn append_raw(&mut self, sql: &str, params: &[Param]) {
        self.sql.push_str(sql);
        for param in params {
            self.param_index += 1;
            self.params.push(param.clone());
        }
    }
}
