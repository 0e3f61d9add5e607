use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

/// Coarse classification shared by every error the crate returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A field breaks its character or length rules
    InputFormat,
    /// Invalid calendar date, future date, or day outside the encodable ranges
    OutOfRange,
    /// Unknown place name or place code
    Lookup,
    /// The control character does not match the recomputed one
    ChecksumMismatch,
    /// Wrong code length, or a letter/digit where the other is required
    Structural,
}

/// The personal data field an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Surname,
    GivenName,
    Sex,
    BirthDate,
    Birthplace,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Invalid {field}: {reason}")]
    InvalidFormat { field: Field, reason: &'static str },

    #[error("Invalid {field}: {reason}")]
    OutOfRange { field: Field, reason: String },

    #[error("Unknown birthplace {name:?}: it must be an existing municipality or foreign country")]
    UnknownPlace { name: String },
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::InvalidFormat { .. } => ErrorKind::InputFormat,
            GenerateError::OutOfRange { .. } => ErrorKind::OutOfRange,
            GenerateError::UnknownPlace { .. } => ErrorKind::Lookup,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            GenerateError::InvalidFormat { field, .. } | GenerateError::OutOfRange { field, .. } => {
                *field
            }
            GenerateError::UnknownPlace { .. } => Field::Birthplace,
        }
    }
}

/// The validation step of a 16 character code that rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Length,
    Surname,
    GivenName,
    Year,
    Month,
    Day,
    PlaceCode,
    Checksum,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid fiscal code: it must be 16 characters long (got {actual})")]
    Length { actual: usize },

    #[error("Invalid fiscal code: positions 1-3 must be letters (surname)")]
    SurnameFormat,

    #[error("Invalid fiscal code: positions 4-6 must be letters (given name)")]
    NameFormat,

    #[error("Invalid fiscal code: positions 7-8 must be digits (year)")]
    YearFormat,

    #[error("Invalid fiscal code: position 9 must be a month letter (one of ABCDEHLMPRST)")]
    MonthFormat,

    #[error("Invalid fiscal code: positions 10-11 must be a day between 01-31 or 41-71 (got {value})")]
    DayRange { value: String },

    #[error("Invalid fiscal code: positions 12-15 must be a known place code (got {code})")]
    PlaceCode { code: String },

    #[error("Invalid fiscal code: the control character does not match (expected {expected}, found {found})")]
    ChecksumMismatch { expected: char, found: char },

    #[error("Invalid fiscal code: unexpected character {character:?} at position {position}")]
    InvalidCharacter { position: usize, character: char },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Length { .. }
            | ValidationError::SurnameFormat
            | ValidationError::NameFormat
            | ValidationError::YearFormat
            | ValidationError::MonthFormat
            | ValidationError::InvalidCharacter { .. } => ErrorKind::Structural,
            ValidationError::DayRange { .. } => ErrorKind::OutOfRange,
            ValidationError::PlaceCode { .. } => ErrorKind::Lookup,
            ValidationError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ValidationError::Length { .. } => Stage::Length,
            ValidationError::SurnameFormat => Stage::Surname,
            ValidationError::NameFormat => Stage::GivenName,
            ValidationError::YearFormat => Stage::Year,
            ValidationError::MonthFormat => Stage::Month,
            ValidationError::DayRange { .. } => Stage::Day,
            ValidationError::PlaceCode { .. } => Stage::PlaceCode,
            ValidationError::ChecksumMismatch { .. } | ValidationError::InvalidCharacter { .. } => {
                Stage::Checksum
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum PlaceTableError {
    #[error("Unable to read the place table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed place table: {message}")]
    Csv { message: String },

    #[error("The place table has no {column:?} column")]
    MissingColumn { column: String },

    #[error("Unsupported place table encoding {label:?}")]
    UnknownEncoding { label: String },

    #[error("The place table delimiter must be an ASCII character (got {delimiter:?})")]
    InvalidDelimiter { delimiter: char },
}

impl From<csv::Error> for PlaceTableError {
    fn from(err: csv::Error) -> Self {
        PlaceTableError::Csv {
            message: err.to_string(),
        }
    }
}
