use thiserror::Error;

/// Error type for the tally crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Nothing but whitespace in the input
    #[error("nothing to evaluate: the expression is empty")]
    EmptyInput,
    /// A character outside of digits, separator, operators and parentheses
    #[error("invalid character in expression: '{0}'")]
    InvalidCharacter(char),
    /// The expression starts with a symbol that can not start it
    #[error("expression can not start with '{0}'")]
    InvalidStart(char),
    /// The expression ends with a symbol that can not end it
    #[error("expression can not end with '{0}'")]
    InvalidEnd(char),
    /// Opening and closing parentheses do not match
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// Two symbols that can not follow one another
    #[error("'{0}' can not be followed by '{1}'")]
    InvalidOperatorSequence(char, char),
    /// A literal with two separators, or one that is not a number at all
    #[error("malformed number: '{0}'")]
    MalformedNumber(String),
    /// The right operand of `/` is zero
    #[error("division by zero")]
    DivisionByZero,
    /// A character the lexer does not know how to classify
    #[error("unrecognized symbol: '{0}'")]
    UnrecognizedSymbol(char),
    /// A decimal separator other than `.` or `,`
    #[error("unsupported decimal separator: '{0}'")]
    UnsupportedSeparator(char),
    /// The RPN sequence does not reduce to a single value
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn messages() {
        assert_eq!(
            Error::InvalidOperatorSequence('*', '/').to_string(),
            "'*' can not be followed by '/'"
        );
        assert_eq!(
            Error::MalformedNumber("1.2.3".into()).to_string(),
            "malformed number: '1.2.3'"
        );
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
    }
}
