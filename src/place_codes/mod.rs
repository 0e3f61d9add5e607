mod config;
mod loader;

pub use config::{DuplicatePolicy, PlaceTableConfig};

use crate::stats;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

const PLACE_CODE_LENGTH: usize = 4;

/// Resolves birthplaces to their 4 character national code and back.
///
/// Lookups ignore case and surrounding whitespace.
pub trait PlaceLookup: Send + Sync {
    fn code_for(&self, name: &str) -> Option<&str>;
    fn name_for(&self, code: &str) -> Option<&str>;
}

/// Immutable mapping between Italian place names and national codes.
///
/// The `code -> name` index is built together with the `name -> code` one, so both
/// directions are a single hash lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceCodeTable {
    codes_by_name: HashMap<String, String>,
    names_by_code: HashMap<String, String>,
}

impl PlaceCodeTable {
    /// Builds a table from `(name, code)` pairs, keeping the first occurrence of
    /// duplicated names and codes.
    pub fn from_records<I, N, C>(records: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        Self::from_records_with_policy(records, DuplicatePolicy::default())
    }

    pub fn from_records_with_policy<I, N, C>(records: I, policy: DuplicatePolicy) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut builder = TableBuilder::new(policy);
        for (name, code) in records {
            builder.add(name.as_ref(), code.as_ref());
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.codes_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes_by_name.is_empty()
    }

    /// Iterates over `(NAME, CODE)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes_by_name
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }
}

impl PlaceLookup for PlaceCodeTable {
    fn code_for(&self, name: &str) -> Option<&str> {
        self.codes_by_name
            .get(&normalize_name(name))
            .map(String::as_str)
    }

    fn name_for(&self, code: &str) -> Option<&str> {
        self.names_by_code
            .get(&code.trim().to_ascii_uppercase())
            .map(String::as_str)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// National codes are 4 characters long, made of digits and uppercase ASCII letters.
pub(crate) fn is_valid_code(code: &str) -> bool {
    code.len() == PLACE_CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

/// Accumulates records while counting the ones that were dropped.
struct TableBuilder {
    table: PlaceCodeTable,
    policy: DuplicatePolicy,
    skipped: u64,
}

impl TableBuilder {
    fn new(policy: DuplicatePolicy) -> Self {
        Self {
            table: PlaceCodeTable::default(),
            policy,
            skipped: 0,
        }
    }

    fn add(&mut self, name: &str, code: &str) {
        let name = normalize_name(name);
        let code = code.trim().to_ascii_uppercase();

        // incomplete rows are expected in the source and are silently dropped
        if name.is_empty() || code.is_empty() {
            self.skipped += 1;
            return;
        }
        if !is_valid_code(&code) {
            tracing::warn!(
                place = %name,
                code = %code,
                "Skipping place with a malformed national code"
            );
            self.skipped += 1;
            return;
        }

        let policy = self.policy;
        match self.table.codes_by_name.entry(name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(code.clone());
            }
            Entry::Occupied(mut entry) => {
                if entry.get() != &code {
                    tracing::warn!(
                        place = %name,
                        kept = ?policy,
                        first_code = %entry.get(),
                        other_code = %code,
                        "Place name listed with different national codes"
                    );
                }
                if policy == DuplicatePolicy::LastWins {
                    entry.insert(code.clone());
                }
            }
        }

        match self.table.names_by_code.entry(code) {
            Entry::Vacant(entry) => {
                entry.insert(name);
            }
            Entry::Occupied(mut entry) => {
                tracing::debug!(
                    code = %entry.key(),
                    first_place = %entry.get(),
                    other_place = %name,
                    "National code shared by several places"
                );
                if policy == DuplicatePolicy::LastWins {
                    entry.insert(name);
                }
            }
        }
    }

    fn finish(self) -> PlaceCodeTable {
        tracing::debug!(
            places = self.table.codes_by_name.len(),
            codes = self.table.names_by_code.len(),
            skipped = self.skipped,
            "Loaded place code table"
        );
        stats::record_place_table_load(self.table.len(), self.skipped);
        self.table
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fixture() -> PlaceCodeTable {
        PlaceCodeTable::from_records([
            ("Roma", "H501"),
            ("Milano", "F205"),
            ("Forlì", "D704"),
            ("Irlanda", "Z116"),
        ])
    }

    #[test]
    fn looks_up_both_directions() {
        let table = fixture();
        assert_eq!(table.len(), 4);
        assert_eq!(table.code_for("ROMA"), Some("H501"));
        assert_eq!(table.code_for(" roma "), Some("H501"));
        assert_eq!(table.code_for("forlì"), Some("D704"));
        assert_eq!(table.code_for("Atlantide"), None);
        assert_eq!(table.name_for("f205"), Some("MILANO"));
        assert_eq!(table.name_for("X501"), None);
    }

    #[test]
    fn skips_incomplete_and_malformed_records() {
        let table = PlaceCodeTable::from_records([
            ("Roma", "H501"),
            ("", "A001"),
            ("Nowhere", ""),
            ("Broken", "H50"),
            ("Broken too", "H5-1"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.name_for("A001"), None);
        assert_eq!(table.code_for("Broken"), None);
    }

    #[test]
    fn first_occurrence_wins_by_default() {
        let records = [
            ("Montecorvino", "F480"),
            ("Montecorvino", "F481"),
            ("Merged A", "M999"),
            ("Merged B", "M999"),
        ];
        let table = PlaceCodeTable::from_records(records);
        assert_eq!(table.code_for("Montecorvino"), Some("F480"));
        assert_eq!(table.name_for("M999"), Some("MERGED A"));
        // both names still resolve to the shared code
        assert_eq!(table.code_for("Merged B"), Some("M999"));

        let table = PlaceCodeTable::from_records_with_policy(records, DuplicatePolicy::LastWins);
        assert_eq!(table.code_for("Montecorvino"), Some("F481"));
        assert_eq!(table.name_for("M999"), Some("MERGED B"));
    }

    #[test]
    fn table_is_shareable_across_threads() {
        let table = std::sync::Arc::new(fixture());
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let table = table.clone();
                scope.spawn(move || {
                    assert_eq!(table.code_for("Roma"), Some("H501"));
                });
            }
        });
    }
}
