use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

/// The label alphabet of a boolean circuit.
///
/// Every gate has a one-token textual form: `""` (copy), `"~"`, `"&"`, `"|"`, `"^"`, `"0"` and
/// `"1"`. Any other token names a free variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gate {
    /// Fan-out: every child receives the single incoming value.
    #[default]
    Copy,
    Not,
    And,
    Or,
    Xor,
    Const(bool),
    /// A named, not yet valued, variable. Only legal on port nodes.
    Free(String),
}

impl Gate {
    /// True for the variadic gates `&`, `|` and `^`.
    pub fn is_binary(&self) -> bool {
        matches!(self, Gate::And | Gate::Or | Gate::Xor)
    }

    pub fn as_const(&self) -> Option<bool> {
        match self {
            Gate::Const(b) => Some(*b),
            _ => None,
        }
    }

    /// The value of the gate applied to no arguments.
    pub fn neutral(&self) -> Option<bool> {
        match self {
            Gate::And => Some(true),
            Gate::Or | Gate::Xor => Some(false),
            _ => None,
        }
    }

    /// The argument value that fixes the result regardless of the other arguments.
    pub fn absorbing(&self) -> Option<bool> {
        match self {
            Gate::And => Some(false),
            Gate::Or => Some(true),
            _ => None,
        }
    }

    /// Parse a token. Never fails: unknown tokens are free variables.
    pub fn parse(token: &str) -> Gate {
        match token {
            "" => Gate::Copy,
            "~" => Gate::Not,
            "&" => Gate::And,
            "|" => Gate::Or,
            "^" => Gate::Xor,
            "0" => Gate::Const(false),
            "1" => Gate::Const(true),
            name => Gate::Free(name.to_string()),
        }
    }
}

impl FromStr for Gate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Gate::parse(s))
    }
}

impl From<&str> for Gate {
    fn from(s: &str) -> Self {
        Gate::parse(s)
    }
}

impl From<bool> for Gate {
    fn from(b: bool) -> Self {
        Gate::Const(b)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Copy => Ok(()),
            Gate::Not => f.write_str("~"),
            Gate::And => f.write_str("&"),
            Gate::Or => f.write_str("|"),
            Gate::Xor => f.write_str("^"),
            Gate::Const(false) => f.write_str("0"),
            Gate::Const(true) => f.write_str("1"),
            Gate::Free(name) => f.write_str(name),
        }
    }
}
