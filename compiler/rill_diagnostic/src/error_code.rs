use std::fmt;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Syntax errors
/// - E2xxx: Type and scoping errors
/// - E6xxx: Runtime errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated or empty character literal
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated block comment
    E0006,

    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Invalid function definition
    E1006,
    /// Keyword not valid here (`else` without `if`, `case` outside `switch`)
    E1007,
    /// `break`/`continue` outside an enclosing loop or switch
    E1008,
    /// Declaration not allowed in this scope (`extern`/`global` below top level)
    E1009,
    /// Malformed switch (duplicate label, several `default`s)
    E1010,

    // Type and Scoping Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type
    E2002,
    /// Unknown identifier
    E2003,
    /// Argument count mismatch
    E2004,
    /// `const` initializer is not a literal
    E2005,
    /// Duplicate declaration
    E2006,
    /// Assignment to a constant
    E2007,
    /// Operator not supported for these operand types
    E2008,
    /// Invalid `return` for the enclosing return type
    E2009,
    /// Literal out of range for its target type
    E2010,
    /// Expression is not assignable
    E2011,

    // Runtime Errors (E6xxx)
    /// Division or remainder by zero
    E6001,
    /// Value has the wrong type for the operation
    E6010,
    /// Operator cannot be applied at runtime
    E6011,
    /// Host operator failed
    E6012,
    /// Undefined variable
    E6020,
    /// Undefined function
    E6021,
    /// Redeclaration of a visible name
    E6022,
    /// Extern value missing
    E6023,
    /// Index out of bounds
    E6025,
    /// Wrong number of arguments
    E6030,
    /// Recursion limit exceeded
    E6031,
    /// Execution cancelled
    E6040,
    /// Control-flow signal escaped its construct
    E6041,
    /// Function ended without returning a value
    E6042,
    /// Uncategorised runtime error
    E6099,

    // Internal Errors (E9xxx)
    /// Internal engine error
    E9001,
}

impl ErrorCode {
    /// Check if this is a syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a runtime error (E6xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            // Syntax
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            // Types and scoping
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6020 => "E6020",
            ErrorCode::E6021 => "E6021",
            ErrorCode::E6022 => "E6022",
            ErrorCode::E6023 => "E6023",
            ErrorCode::E6025 => "E6025",
            ErrorCode::E6030 => "E6030",
            ErrorCode::E6031 => "E6031",
            ErrorCode::E6040 => "E6040",
            ErrorCode::E6041 => "E6041",
            ErrorCode::E6042 => "E6042",
            ErrorCode::E6099 => "E6099",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E2006.as_str(), "E2006");
    }

    #[test]
    fn test_phase_ranges() {
        assert!(ErrorCode::E1008.is_parser_error());
        assert!(!ErrorCode::E2001.is_parser_error());
        assert!(ErrorCode::E6022.is_runtime_error());
        assert!(!ErrorCode::E0001.is_runtime_error());
    }
}
