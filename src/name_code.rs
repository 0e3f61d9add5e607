const CODE_LENGTH: usize = 3;
const FILLER: char = 'X';
const VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U'];

/// Given names with at least this many consonants use consonants 1, 3 and 4.
const GIVEN_NAME_SKIP_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Surname,
    GivenName,
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_uppercase() && !is_vowel(c)
}

/// Encodes a normalized surname into its 3 letter code.
///
/// Takes the first three consonants, then vowels in order, then pads with `X`.
/// Characters outside `A-Z` (apostrophes, other scripts) are ignored.
pub fn encode_surname(normalized: &str) -> String {
    encode(normalized, NameKind::Surname)
}

/// Same as [`encode_surname`], except that names with 4 or more consonants use the
/// 1st, 3rd and 4th consonant.
pub fn encode_given_name(normalized: &str) -> String {
    encode(normalized, NameKind::GivenName)
}

pub fn encode(normalized: &str, kind: NameKind) -> String {
    let consonants: Vec<char> = normalized.chars().filter(|c| is_consonant(*c)).collect();

    let mut code: String =
        if kind == NameKind::GivenName && consonants.len() >= GIVEN_NAME_SKIP_THRESHOLD {
            [consonants[0], consonants[2], consonants[3]].iter().collect()
        } else {
            consonants
                .iter()
                .copied()
                .chain(normalized.chars().filter(|c| is_vowel(*c)))
                .take(CODE_LENGTH)
                .collect()
        };

    while code.len() < CODE_LENGTH {
        code.push(FILLER);
    }
    code
}
