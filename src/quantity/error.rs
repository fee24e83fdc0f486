/// Errors that can occur while parsing a unit expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The expression was empty
    #[error("Empty unit expression")]
    Empty,

    /// A unit symbol that is neither a known unit nor a prefixed known unit
    #[error("Unknown unit symbol: {0}")]
    UnknownSymbol(String),

    /// A character that cannot appear at this position
    #[error("Unexpected character '{found}' at position {position} in unit expression")]
    Unexpected {
        /// The offending character
        found: char,
        /// Character offset in the expression
        position: usize,
    },

    /// The expression ended where a unit or exponent was expected
    #[error("Unit expression ended unexpectedly")]
    UnexpectedEnd,

    /// An exponent that is not a small integer
    #[error("Invalid exponent in unit expression: {0}")]
    InvalidExponent(String),

    /// A combined exponent that does not fit the dimension representation
    #[error("Unit exponent out of range")]
    ExponentOverflow,
}
