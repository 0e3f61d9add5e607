use crate::error::{Field, GenerateError};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;

const APOSTROPHE: char = '\'';

/// Removes every space, strips diacritical marks and upper-cases the result.
///
/// Diacritics are removed by decomposing to NFD and dropping the combining marks, so
/// `"Caffè"` becomes `"CAFFE"`. Applying it twice yields the same string.
pub fn normalize(input: &str) -> String {
    input
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !c.is_whitespace())
        .collect()
}

/// Checks a surname or given name and returns its normalized form.
///
/// The raw value must be 2 to 50 characters long and only contain letters (from any
/// alphabet), apostrophes and spaces.
pub fn validate_name_field(field: Field, input: &str) -> Result<String, GenerateError> {
    let length = input.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(GenerateError::InvalidFormat {
            field,
            reason: "it must be between 2 and 50 characters long",
        });
    }

    if !input
        .chars()
        .all(|c| c.is_alphabetic() || c == APOSTROPHE || c == ' ')
    {
        return Err(GenerateError::InvalidFormat {
            field,
            reason: "it may only contain letters, apostrophes and spaces",
        });
    }

    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(GenerateError::InvalidFormat {
            field,
            reason: "it must not be blank",
        });
    }
    Ok(normalized)
}
