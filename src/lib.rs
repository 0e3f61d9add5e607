// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod birth_code;
mod checksum;
mod error;
mod generator;
mod name_code;
mod normalization;
mod place_codes;
mod stats;
mod validator;

// This is the public API of the fiscal code library
pub use birth_code::{
    decode as decode_birth_block, encode as encode_birth_block, parse_birth_date, BirthBlock, Sex,
};
pub use checksum::{checksum, verify, FiscalCodeChecksum, Validator, FISCAL_CODE_LENGTH};
pub use error::{ErrorKind, Field, GenerateError, PlaceTableError, Stage, ValidationError};
pub use generator::{CodeGenerator, PersonalData};
pub use name_code::{encode_given_name, encode_surname};
pub use normalization::{normalize, validate_name_field};
pub use place_codes::{DuplicatePolicy, PlaceCodeTable, PlaceLookup, PlaceTableConfig};
pub use validator::{CodeValidator, DecodedFiscalCode};
