use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("the start symbol '{0}' is not a variable")]
    StartNotVariable(String),
    #[error("'{0}' has productions but is not a variable")]
    LeftNotVariable(String),
    #[error("'{symbol}' appears in a production of '{left}' but is not a declared symbol")]
    UndeclaredSymbol { left: String, symbol: String },
    #[error("'{0}' is declared as both a variable and a terminal symbol")]
    TerminalVariable(String),
    #[error("'{0}' is reserved for the bottom of the stack")]
    ReservedSymbol(String),
    #[error("'{0}' appears twice in the variables")]
    DuplicateVariable(String),
    #[error("'{0}' appears twice in the terminals")]
    DuplicateTerminal(String),
    #[error("Line {0}: too many \"->\"")]
    TooManyArrows(usize),
    #[error("Line {0}: left side contains whitespace")]
    LeftContainsWhitespace(usize),
    #[error("Line {0}: empty left side")]
    EmptyLeft(usize),
    #[error("Line {0}: cannot find left side")]
    MissingLeft(usize),
    #[error("the grammar has no productions")]
    Empty,
}
