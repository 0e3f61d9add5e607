use afl::fuzz;
use chrono::NaiveDate;
use fiscal_code::{
    CodeGenerator, CodeValidator, FiscalCodeChecksum, PersonalData, PlaceCodeTable, Sex,
    Validator,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

const PLACES: &[(&str, &str)] = &[
    ("Roma", "H501"),
    ("Milano", "F205"),
    ("Forlì", "D704"),
    ("Bolzano", "A952"),
    ("Irlanda", "Z116"),
    ("Stati Uniti d'America", "Z404"),
];

const LETTERS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'à', 'è', 'é', 'ì', 'ò', 'ù', 'ü', '\'', ' ',
];

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (code, rand_seed) = split_bytes_once(bytes)?;
    let code_str = std::str::from_utf8(code).ok()?;

    let mut rng_seed: u64 = 0;
    for i in 0..8 {
        if rand_seed.len() > i {
            rng_seed <<= 8;
            rng_seed += rand_seed[i] as u64;
        }
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    run_fuzz(code_str, rng);

    Some(())
}

fn gen_name(rng: &mut StdRng) -> String {
    let len = rng.gen_range(2..12);
    let mut name: String = (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())])
        .collect();
    // at least one non-space character, otherwise the name is rejected
    name.push('a');
    name
}

fn gen_person(rng: &mut StdRng) -> PersonalData {
    let birth_date = NaiveDate::from_ymd_opt(rng.gen_range(1900..2024), 1, 1)
        .and_then(|date| date.checked_add_days(chrono::Days::new(rng.gen_range(0..365))))
        .unwrap();
    PersonalData {
        surname: gen_name(rng),
        given_name: gen_name(rng),
        sex: if rng.gen_bool(0.5) { Sex::M } else { Sex::F },
        birth_date,
        birthplace: PLACES[rng.gen_range(0..PLACES.len())].0.to_string(),
    }
}

fn run_fuzz(code: &str, mut rng: StdRng) {
    let places = Arc::new(PlaceCodeTable::from_records(PLACES.iter().copied()));
    let generator = CodeGenerator::new(places.clone());
    let validator = CodeValidator::new(places);

    #[cfg(feature = "manual_test")]
    {
        println!("Code: {:?}", code);
        println!("Validation: {:?}", validator.validate(code));
    }

    // arbitrary input must never panic, and a valid code always passes the lenient check
    if validator.validate(code).is_ok() {
        assert!(FiscalCodeChecksum.is_valid_match(code));
    }

    let person = gen_person(&mut rng);
    let generated = generator.generate(&person);
    #[cfg(feature = "manual_test")]
    {
        println!("Person: {:?}", person);
        println!("Generated: {:?}", generated);
    }
    if let Ok(generated) = generated {
        assert_eq!(generated.len(), 16);
        assert_eq!(validator.validate(&generated), Ok(()));
    }
}
