use crate::birth_code::{self, BirthBlock, Sex};
use crate::checksum::{self, FISCAL_CODE_LENGTH};
use crate::error::ValidationError;
use crate::place_codes::PlaceLookup;
use crate::stats::ValidatorMetrics;
use serde::Serialize;
use std::sync::Arc;

/// The fields carried by a structurally valid fiscal code.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DecodedFiscalCode {
    pub surname_code: String,
    pub given_name_code: String,
    /// Last two digits of the birth year; the century is not encoded
    pub birth_year: u32,
    pub birth_month: u32,
    pub birth_day: u32,
    pub sex: Sex,
    pub place_code: String,
    pub place_name: String,
    pub control_char: char,
}

/// Checks the internal consistency of fiscal codes.
///
/// A valid code is well formed, refers to a known place and carries the right control
/// character. Whether it belongs to a given person is out of reach: many names share
/// the same 3 letter codes.
pub struct CodeValidator {
    places: Arc<dyn PlaceLookup>,
    metrics: ValidatorMetrics,
}

impl CodeValidator {
    pub fn new(places: Arc<dyn PlaceLookup>) -> Self {
        Self {
            places,
            metrics: ValidatorMetrics::new(),
        }
    }

    pub fn validate(&self, code: &str) -> Result<(), ValidationError> {
        self.decode(code).map(|_| ())
    }

    pub fn decode(&self, code: &str) -> Result<DecodedFiscalCode, ValidationError> {
        self.metrics.validations.increment(1);
        let result = self.run_stages(code);
        if let Err(err) = &result {
            self.metrics.record_error(err);
        }
        result
    }

    fn run_stages(&self, code: &str) -> Result<DecodedFiscalCode, ValidationError> {
        let code = code.to_ascii_uppercase();
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != FISCAL_CODE_LENGTH {
            return Err(ValidationError::Length {
                actual: chars.len(),
            });
        }

        if !chars[0..3].iter().all(char::is_ascii_uppercase) {
            return Err(ValidationError::SurnameFormat);
        }
        if !chars[3..6].iter().all(char::is_ascii_uppercase) {
            return Err(ValidationError::NameFormat);
        }

        let birth_block: [char; 5] = [chars[6], chars[7], chars[8], chars[9], chars[10]];
        let BirthBlock {
            year,
            month,
            day,
            sex,
        } = birth_code::decode(birth_block)?;

        let place_code: String = chars[11..15].iter().collect();
        let place_name = self
            .places
            .name_for(&place_code)
            .ok_or_else(|| ValidationError::PlaceCode {
                code: place_code.clone(),
            })?
            .to_owned();

        // all characters are ASCII from here on, so byte and char offsets agree
        checksum::verify(&code)?;

        Ok(DecodedFiscalCode {
            surname_code: chars[0..3].iter().collect(),
            given_name_code: chars[3..6].iter().collect(),
            birth_year: year,
            birth_month: month,
            birth_day: day,
            sex,
            place_code,
            place_name,
            control_char: chars[15],
        })
    }
}
