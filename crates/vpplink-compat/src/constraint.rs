use std::fmt;
use std::str::FromStr;

use crate::error::{CompatError, Result};
use crate::version::Version;

/// Comparison operator of a constraint clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Lt => "<",
            Op::Le => "<=",
        }
    }

    fn holds(self, found: &Version, wanted: &Version) -> bool {
        match self {
            Op::Eq => found == wanted,
            Op::Ne => found != wanted,
            Op::Gt => found > wanted,
            Op::Ge => found >= wanted,
            Op::Lt => found < wanted,
            Op::Le => found <= wanted,
        }
    }
}

/// One `op version` term, e.g. `>= 2.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub op: Op,
    pub version: Version,
}

impl Clause {
    pub fn matches(&self, found: &Version) -> bool {
        self.op.holds(found, &self.version)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// A conjunction of clauses separated by commas: `>=3.1.0, <4.0.0`.
///
/// A clause without an operator means equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    clauses: Vec<Clause>,
}

impl Constraint {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: String| CompatError::InvalidConstraint {
            input: input.to_string(),
            reason,
        };

        let mut clauses = Vec::new();
        for raw in input.split(',') {
            let term = raw.trim();
            if term.is_empty() {
                return Err(invalid("empty clause".to_string()));
            }

            let (op, rest) = split_op(term);
            let version = Version::parse(rest).map_err(|err| invalid(err.to_string()))?;
            clauses.push(Clause { op, version });
        }

        Ok(Self { clauses })
    }

    /// True when `found` satisfies every clause.
    pub fn matches(&self, found: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.matches(found))
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

fn split_op(term: &str) -> (Op, &str) {
    // Two-character operators first so `>=` is not read as `>`.
    const OPS: [(&str, Op); 7] = [
        (">=", Op::Ge),
        ("<=", Op::Le),
        ("==", Op::Eq),
        ("!=", Op::Ne),
        (">", Op::Gt),
        ("<", Op::Lt),
        ("=", Op::Eq),
    ];

    for (token, op) in OPS {
        if let Some(rest) = term.strip_prefix(token) {
            return (op, rest);
        }
    }
    (Op::Eq, term)
}

impl FromStr for Constraint {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
