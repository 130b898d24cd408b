use crate::tc::UnificationError;

use thiserror::Error as ThisError;

#[derive(ThisError)]
pub enum Error {
    #[error("Error reading from input file")]
    IOError(#[from] std::io::Error),

    #[error("Token patterns could not be compiled")]
    PatternError(#[from] regex::Error),

    /// An error during lexing that will not be recovered.
    #[error("Error during lexing at line {line}, column {column}")]
    LexerError {
        kind: LexerErrorKind,
        line: usize,
        column: usize,
    },

    /// An error during parsing.
    #[error("Error during parsing")]
    ParserError(String),

    #[error("Remaining input could not be parsed")]
    RemainingInput(String),

    // Two type expressions could not be made equal.
    #[error("Error during unification")]
    UnificationError(#[from] UnificationError),

    #[error("Logger could not be initialized")]
    LoggerError(#[from] log::SetLoggerError),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "IO \n\n {:?}", &e),
            Error::PatternError(e) => write!(f, "Token patterns \n\n {}", &e),
            Error::LexerError { kind, line, column } => {
                write!(f, "Lexing (line {}, column {}) \n\n {}", line, column, kind)
            }
            Error::ParserError(e) => write!(f, "Parsing \n\n {}", &e),
            Error::RemainingInput(e) => write!(f, "Remaining input \n\n {}", &e),
            Error::UnificationError(e) => write!(f, "Unification \n\n {}", &e),
            Error::LoggerError(e) => write!(f, "Logger \n\n {}", &e),
        }
    }
}

#[derive(ThisError, Clone, Debug, Eq, PartialEq)]
pub enum LexerErrorKind {
    #[error("Illegal token '{0}'")]
    IllegalToken(String),

    #[error("Multi-line comment is never closed")]
    UnclosedMultiLineComment,

    #[error("Integer literal '{0}' is malformed")]
    MalformedInteger(String),
}
