use crate::error::{Field, GenerateError, ValidationError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Month number (1-based index) to the letter used in position 9.
/// F, G, I, N, O and Q are never used.
pub const MONTH_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

pub const FEMALE_DAY_OFFSET: u32 = 40;

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub fn parse(input: &str) -> Result<Self, GenerateError> {
        input.parse().map_err(|_| GenerateError::InvalidFormat {
            field: Field::Sex,
            reason: "it must be 'M' or 'F'",
        })
    }
}

pub fn month_letter(month: u32) -> Option<char> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_LETTERS.get(index).copied()
}

pub fn month_from_letter(letter: char) -> Option<u32> {
    MONTH_LETTERS
        .iter()
        .position(|c| *c == letter)
        .map(|index| index as u32 + 1)
}

/// The 5 character year, month and day block.
///
/// `2000-01-01` is `00A01` for a man and `00A41` for a woman.
pub fn encode(date: NaiveDate, sex: Sex) -> String {
    let day = match sex {
        Sex::M => date.day(),
        Sex::F => date.day() + FEMALE_DAY_OFFSET,
    };
    // chrono months are always 1..=12
    let month = month_letter(date.month()).unwrap_or(MONTH_LETTERS[0]);
    format!("{:02}{}{:02}", date.year().rem_euclid(100), month, day)
}

/// The decoded content of a year, month and day block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthBlock {
    /// Last two digits of the birth year
    pub year: u32,
    pub month: u32,
    /// Day of month with the female offset removed
    pub day: u32,
    pub sex: Sex,
}

pub fn decode(block: [char; 5]) -> Result<BirthBlock, ValidationError> {
    let year = match (block[0].to_digit(10), block[1].to_digit(10)) {
        (Some(tens), Some(units)) => tens * 10 + units,
        _ => return Err(ValidationError::YearFormat),
    };

    let month = month_from_letter(block[2]).ok_or(ValidationError::MonthFormat)?;

    let day_range_error = || ValidationError::DayRange {
        value: block[3..].iter().collect(),
    };
    let day_value = match (block[3].to_digit(10), block[4].to_digit(10)) {
        (Some(tens), Some(units)) => tens * 10 + units,
        _ => return Err(day_range_error()),
    };

    let (day, sex) = match day_value {
        1..=31 => (day_value, Sex::M),
        41..=71 => (day_value - FEMALE_DAY_OFFSET, Sex::F),
        _ => return Err(day_range_error()),
    };

    Ok(BirthBlock {
        year,
        month,
        day,
        sex,
    })
}

/// Parses a `DD/MM/YYYY` birth date and checks it against `today`.
///
/// Day and month may omit the leading zero (`1/1/1985`); the year always has 4 digits.
pub fn parse_birth_date(input: &str, today: NaiveDate) -> Result<NaiveDate, GenerateError> {
    let format_error = GenerateError::InvalidFormat {
        field: Field::BirthDate,
        reason: "the format must be DD/MM/YYYY",
    };

    let parts: Vec<&str> = input.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(format_error);
    };
    let well_formed = [(day, 1..=2), (month, 1..=2), (year, 4..=4)]
        .iter()
        .all(|(part, len)| {
            len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        });
    if !well_formed {
        return Err(format_error);
    }

    // all parts are short digit strings at this point
    let (Ok(day), Ok(month), Ok(year)) = (
        day.parse::<u32>(),
        month.parse::<u32>(),
        year.parse::<i32>(),
    ) else {
        return Err(format_error);
    };
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(GenerateError::OutOfRange {
        field: Field::BirthDate,
        reason: format!("{input} is not a valid calendar date"),
    })?;

    validate_birth_date(date, today)?;
    Ok(date)
}

pub fn validate_birth_date(date: NaiveDate, today: NaiveDate) -> Result<(), GenerateError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(GenerateError::OutOfRange {
            field: Field::BirthDate,
            reason: format!("the year must have 4 digits (got {})", date.year()),
        });
    }
    if date > today {
        return Err(GenerateError::OutOfRange {
            field: Field::BirthDate,
            reason: format!("{date} is in the future"),
        });
    }
    Ok(())
}
