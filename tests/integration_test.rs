use chrono::NaiveDate;
use fiscal_code::{
    CodeGenerator, CodeValidator, DuplicatePolicy, ErrorKind, GenerateError, PersonalData,
    PlaceCodeTable, PlaceLookup, PlaceTableConfig, Sex, ValidationError,
};
use std::io::Write;
use std::sync::Arc;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/tabella_comuni.csv");

fn load_places() -> Arc<PlaceCodeTable> {
    Arc::new(PlaceCodeTable::from_path(FIXTURE, &PlaceTableConfig::default()).unwrap())
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn loads_the_latin1_place_table() {
    let places = load_places();
    assert_eq!(places.len(), 11);
    assert_eq!(places.code_for("Forlì"), Some("D704"));
    assert_eq!(places.code_for("stati uniti d'america"), Some("Z404"));
    assert_eq!(places.name_for("Z116"), Some("IRLANDA"));
    assert_eq!(places.code_for("Comune soppresso"), None);
    assert_eq!(places.name_for("Z999"), None);
}

#[test]
fn generated_codes_validate() {
    let places = load_places();
    let generator = CodeGenerator::new(places.clone()).reference_date(reference_date());
    let validator = CodeValidator::new(places);

    let people = [
        ("Rossi", "Mario", "M", "01/01/1985", "Roma"),
        ("Sanchi", "Claudia", "F", "15/04/1969", "Rimini"),
        ("D'Angelo", "José", "m", "29/02/2020", "Forlì"),
        ("O'Connor", "Ai", "f", "31/12/1999", "Irlanda"),
        ("Müller", "Anna Maria", "F", "05/08/1950", "Bolzano"),
        ("Wu", "Li", "M", "15/06/2024", "Stati Uniti d'America"),
    ];
    for (surname, given_name, sex, birth_date, birthplace) in people {
        let code = generator
            .generate_from_parts(surname, given_name, sex, birth_date, birthplace)
            .unwrap();
        assert_eq!(code.len(), 16);
        assert_eq!(validator.validate(&code), Ok(()), "{code}");
    }
}

#[test]
fn end_to_end_reference_code() {
    let places = load_places();
    let generator = CodeGenerator::new(places.clone()).reference_date(reference_date());
    let code = generator
        .generate_from_parts("Rossi", "Mario", "M", "01/01/1985", "Roma")
        .unwrap();
    assert_eq!(code, "RSSMRA85A01H501Z");

    let decoded = CodeValidator::new(places).decode(&code).unwrap();
    assert_eq!(decoded.sex, Sex::M);
    assert_eq!(decoded.birth_year, 85);
    assert_eq!(decoded.place_name, "ROMA");
}

#[test]
fn female_codes_carry_the_day_offset() {
    let places = load_places();
    let generator = CodeGenerator::new(places.clone()).reference_date(reference_date());
    let person = PersonalData {
        surname: "Sanchi".to_string(),
        given_name: "Claudia".to_string(),
        sex: Sex::F,
        birth_date: NaiveDate::from_ymd_opt(1969, 4, 15).unwrap(),
        birthplace: "Rimini".to_string(),
    };
    let code = generator.generate(&person).unwrap();
    assert_eq!(&code[9..11], "55");

    let decoded = CodeValidator::new(places).decode(&code).unwrap();
    assert_eq!(decoded.sex, Sex::F);
    assert_eq!(decoded.birth_day, 15);
}

#[test]
fn validation_errors_identify_the_segment() {
    let validator = CodeValidator::new(load_places());
    assert_eq!(
        validator.validate("RSSMRA85A01H501"),
        Err(ValidationError::Length { actual: 15 })
    );
    assert_eq!(
        validator.validate("RSSMRA85A99H501Z").unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
    assert_eq!(
        validator.validate("RSSMRA85A01Z998Z").unwrap_err().kind(),
        ErrorKind::Lookup
    );
    assert_eq!(
        validator.validate("RSSMRA85A01H501A").unwrap_err().kind(),
        ErrorKind::ChecksumMismatch
    );
}

#[test]
fn unknown_birthplace_is_a_lookup_error() {
    let generator = CodeGenerator::new(load_places()).reference_date(reference_date());
    let err = generator
        .generate_from_parts("Rossi", "Mario", "M", "01/01/1985", "Atlantide")
        .unwrap_err();
    assert_eq!(
        err,
        GenerateError::UnknownPlace {
            name: "Atlantide".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn loads_a_custom_source_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "place,code").unwrap();
    writeln!(file, "Roma,H501").unwrap();
    writeln!(file, "Roma,H502").unwrap();
    file.flush().unwrap();

    let config = PlaceTableConfig::new()
        .delimiter(',')
        .name_column("place")
        .code_column("code")
        .encoding("utf-8");
    let first = PlaceCodeTable::from_path(file.path(), &config).unwrap();
    assert_eq!(first.code_for("Roma"), Some("H501"));

    let last = PlaceCodeTable::from_path(
        file.path(),
        &config.duplicate_policy(DuplicatePolicy::LastWins),
    )
    .unwrap();
    assert_eq!(last.code_for("Roma"), Some("H502"));
}

#[test]
fn generator_and_validator_are_shared_between_threads() {
    let places = load_places();
    let generator = Arc::new(CodeGenerator::new(places.clone()).reference_date(reference_date()));
    let validator = Arc::new(CodeValidator::new(places));

    std::thread::scope(|scope| {
        for place in ["Roma", "Milano", "Napoli", "Torino"] {
            let generator = generator.clone();
            let validator = validator.clone();
            scope.spawn(move || {
                let code = generator
                    .generate_from_parts("Verdi", "Giuseppe", "M", "10/10/1913", place)
                    .unwrap();
                assert!(validator.validate(&code).is_ok());
            });
        }
    });
}
