use crate::error::ValidationError;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub const FISCAL_CODE_LENGTH: usize = 16;
const CHECKSUM_MODULO: u32 = 26;

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, candidate: &str) -> bool;
}

lazy_static! {
    /// Character to (value at an even position, value at an odd position).
    static ref CHARACTER_VALUES: HashMap<char, (u32, u32)> = HashMap::from([
        ('0', (0, 1)),
        ('1', (1, 0)),
        ('2', (2, 5)),
        ('3', (3, 7)),
        ('4', (4, 9)),
        ('5', (5, 13)),
        ('6', (6, 15)),
        ('7', (7, 17)),
        ('8', (8, 19)),
        ('9', (9, 21)),
        ('A', (0, 1)),
        ('B', (1, 0)),
        ('C', (2, 5)),
        ('D', (3, 7)),
        ('E', (4, 9)),
        ('F', (5, 13)),
        ('G', (6, 15)),
        ('H', (7, 17)),
        ('I', (8, 19)),
        ('J', (9, 21)),
        ('K', (10, 2)),
        ('L', (11, 4)),
        ('M', (12, 18)),
        ('N', (13, 20)),
        ('O', (14, 11)),
        ('P', (15, 3)),
        ('Q', (16, 6)),
        ('R', (17, 8)),
        ('S', (18, 12)),
        ('T', (19, 14)),
        ('U', (20, 16)),
        ('V', (21, 10)),
        ('W', (22, 22)),
        ('X', (23, 25)),
        ('Y', (24, 24)),
        ('Z', (25, 23)),
    ]);
}

fn control_char(sum: u32) -> char {
    (b'A' + (sum % CHECKSUM_MODULO) as u8) as char
}

/// Computes the control character of the first 15 characters of a fiscal code.
///
/// Positions are 1-indexed: odd positions (1, 3, ..., 15) and even positions
/// (2, 4, ..., 14) are mapped through different columns of the conversion table.
pub fn checksum(code: &str) -> Result<char, ValidationError> {
    let mut sum = 0;
    for (idx, c) in code.chars().enumerate() {
        let position = idx + 1;
        let &(even_value, odd_value) =
            CHARACTER_VALUES
                .get(&c)
                .ok_or(ValidationError::InvalidCharacter {
                    position,
                    character: c,
                })?;
        sum += if position % 2 == 1 {
            odd_value
        } else {
            even_value
        };
    }
    Ok(control_char(sum))
}

/// Checks the 16th character of a complete fiscal code.
pub fn verify(code: &str) -> Result<(), ValidationError> {
    let actual = code.chars().count();
    if actual != FISCAL_CODE_LENGTH {
        return Err(ValidationError::Length { actual });
    }
    let split = code
        .char_indices()
        .nth(FISCAL_CODE_LENGTH - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(code.len());
    let (body, control) = code.split_at(split);

    let expected = checksum(body)?;
    let found = control.chars().next().unwrap_or_default();
    if expected != found {
        return Err(ValidationError::ChecksumMismatch { expected, found });
    }
    Ok(())
}

/// Checksum test for fiscal codes found in free text, where separators such as
/// spaces, dashes or slashes may split the code.
pub struct FiscalCodeChecksum;

impl Validator for FiscalCodeChecksum {
    fn is_valid_match(&self, candidate: &str) -> bool {
        let code: String = candidate
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        verify(&code).is_ok()
    }
}
