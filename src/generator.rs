use crate::birth_code::{self, Sex};
use crate::checksum;
use crate::error::{Field, GenerateError};
use crate::name_code;
use crate::normalization::validate_name_field;
use crate::place_codes::{is_valid_code, PlaceLookup};
use crate::stats::GeneratorMetrics;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PersonalData {
    pub surname: String,
    pub given_name: String,
    pub sex: Sex,
    pub birth_date: NaiveDate,
    pub birthplace: String,
}

impl PersonalData {
    /// Builds personal data from raw user input. The birth date must be `DD/MM/YYYY`.
    ///
    /// Only the sex and the date shape are checked here; everything else is checked
    /// by [`CodeGenerator::generate`].
    pub fn parse(
        surname: &str,
        given_name: &str,
        sex: &str,
        birth_date: &str,
        birthplace: &str,
    ) -> Result<Self, GenerateError> {
        Self::parse_with_reference_date(
            surname,
            given_name,
            sex,
            birth_date,
            birthplace,
            Local::now().date_naive(),
        )
    }

    fn parse_with_reference_date(
        surname: &str,
        given_name: &str,
        sex: &str,
        birth_date: &str,
        birthplace: &str,
        today: NaiveDate,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            surname: surname.to_owned(),
            given_name: given_name.to_owned(),
            sex: Sex::parse(sex)?,
            birth_date: birth_code::parse_birth_date(birth_date, today)?,
            birthplace: birthplace.to_owned(),
        })
    }
}

/// Builds fiscal codes from personal data.
pub struct CodeGenerator {
    places: Arc<dyn PlaceLookup>,
    reference_date: Option<NaiveDate>,
    metrics: GeneratorMetrics,
}

impl CodeGenerator {
    pub fn new(places: Arc<dyn PlaceLookup>) -> Self {
        Self {
            places,
            reference_date: None,
            metrics: GeneratorMetrics::new(),
        }
    }

    /// Uses `date` instead of the current local date when rejecting future birth dates.
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn generate(&self, person: &PersonalData) -> Result<String, GenerateError> {
        let result = self.build_code(person);
        match &result {
            Ok(_) => self.metrics.generated.increment(1),
            Err(err) => self.metrics.record_error(err),
        }
        result
    }

    /// Same as [`CodeGenerator::generate`], starting from raw strings.
    pub fn generate_from_parts(
        &self,
        surname: &str,
        given_name: &str,
        sex: &str,
        birth_date: &str,
        birthplace: &str,
    ) -> Result<String, GenerateError> {
        let parsed = PersonalData::parse_with_reference_date(
            surname,
            given_name,
            sex,
            birth_date,
            birthplace,
            self.today(),
        );
        match parsed {
            Ok(person) => self.generate(&person),
            Err(err) => {
                self.metrics.record_error(&err);
                Err(err)
            }
        }
    }

    fn build_code(&self, person: &PersonalData) -> Result<String, GenerateError> {
        let surname = validate_name_field(Field::Surname, &person.surname)?;
        let given_name = validate_name_field(Field::GivenName, &person.given_name)?;
        birth_code::validate_birth_date(person.birth_date, self.today())?;
        let unknown_place = || GenerateError::UnknownPlace {
            name: person.birthplace.clone(),
        };
        let place_code = self
            .places
            .code_for(&person.birthplace)
            .filter(|code| is_valid_code(code))
            .ok_or_else(unknown_place)?;

        let mut code = String::with_capacity(checksum::FISCAL_CODE_LENGTH);
        code.push_str(&name_code::encode_surname(&surname));
        code.push_str(&name_code::encode_given_name(&given_name));
        code.push_str(&birth_code::encode(person.birth_date, person.sex));
        code.push_str(place_code);

        // every other segment is built from A-Z and 0-9 only
        let control = checksum::checksum(&code).map_err(|_| unknown_place())?;
        code.push(control);
        Ok(code)
    }
}
