use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// MySQL `ER_UNKNOWN_ERROR`.
pub const ER_UNKNOWN_ERROR: u16 = 1105;
/// MySQL `ER_SP_DOES_NOT_EXIST`, shared by unknown and unimplemented functions.
pub const ER_SP_DOES_NOT_EXIST: u16 = 1305;
/// MySQL `ER_WRONG_PARAMCOUNT_TO_NATIVE_FCT`.
pub const ER_WRONG_PARAMCOUNT_TO_NATIVE_FCT: u16 = 1582;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Function not found: {0}")]
    UnknownFunction(String),

    #[error("Incorrect parameter count in the call to native function '{function}': expected {expected}, got {actual}")]
    ArityMismatch {
        function: String,

        expected: String,

        actual: usize,
    },

    #[error("FUNCTION {name} does not exist")]
    FunctionNotImplemented { name: String },

    #[error("No session context available for {function}")]
    ContextUnavailable { function: String },

    #[error("Function {0} is already registered")]
    DuplicateFunction(String),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Cannot coerce {from_type} to {to_type}: {reason}")]
    TypeCoercionError {
        from_type: String,

        to_type: String,

        reason: String,
    },

    #[error("Numeric overflow: {0}")]
    Overflow(String),

    #[error("Column index {index} out of range for row of width {width}")]
    ColumnIndexOutOfRange { index: usize, width: usize },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Fieldless discriminant of [`Error`], for callers that branch on the kind
/// of failure without caring about its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownFunction,
    ArityMismatch,
    FunctionNotImplemented,
    ContextUnavailable,
    DuplicateFunction,
    TypeMismatch,
    TypeCoercion,
    Overflow,
    ColumnIndexOutOfRange,
    Internal,
    Other,
}

impl Error {
    pub fn unknown_function(name: impl fmt::Display) -> Self {
        Error::UnknownFunction(name.to_string())
    }

    pub fn arity_mismatch(
        function: impl fmt::Display,
        expected: impl fmt::Display,
        actual: usize,
    ) -> Self {
        Error::ArityMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual,
        }
    }

    pub fn not_implemented(name: impl fmt::Display) -> Self {
        Error::FunctionNotImplemented {
            name: name.to_string(),
        }
    }

    pub fn context_unavailable(function: impl fmt::Display) -> Self {
        Error::ContextUnavailable {
            function: function.to_string(),
        }
    }

    pub fn type_mismatch(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn type_coercion_error(
        from_type: impl fmt::Display,
        to_type: impl fmt::Display,
        reason: impl fmt::Display,
    ) -> Self {
        Error::TypeCoercionError {
            from_type: from_type.to_string(),
            to_type: to_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn overflow(msg: impl fmt::Display) -> Self {
        Error::Overflow(msg.to_string())
    }

    pub fn internal(msg: impl fmt::Display) -> Self {
        Error::InternalError(msg.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownFunction(_) => ErrorKind::UnknownFunction,
            Error::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Error::FunctionNotImplemented { .. } => ErrorKind::FunctionNotImplemented,
            Error::ContextUnavailable { .. } => ErrorKind::ContextUnavailable,
            Error::DuplicateFunction(_) => ErrorKind::DuplicateFunction,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::TypeCoercionError { .. } => ErrorKind::TypeCoercion,
            Error::Overflow(_) => ErrorKind::Overflow,
            Error::ColumnIndexOutOfRange { .. } => ErrorKind::ColumnIndexOutOfRange,
            Error::InternalError(_) => ErrorKind::Internal,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Errors raised while building a plan rather than while evaluating a row.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnknownFunction | ErrorKind::ArityMismatch | ErrorKind::DuplicateFunction
        )
    }

    pub fn is_not_implemented(&self) -> bool {
        self.kind() == ErrorKind::FunctionNotImplemented
    }

    pub fn mysql_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::UnknownFunction | ErrorKind::FunctionNotImplemented => {
                ER_SP_DOES_NOT_EXIST
            }
            ErrorKind::ArityMismatch => ER_WRONG_PARAMCOUNT_TO_NATIVE_FCT,
            _ => ER_UNKNOWN_ERROR,
        }
    }
}
