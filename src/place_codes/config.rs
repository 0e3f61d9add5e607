use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME_COLUMN: &str = "Denominazione Italiana";
pub const DEFAULT_CODE_COLUMN: &str = "Codice Nazionale";
pub const DEFAULT_ENCODING: &str = "latin1";
pub const DEFAULT_DELIMITER: char = ';';

/// Which record is kept when a place name, or a place code, appears more than once.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    FirstWins,
    LastWins,
}

/// Describes how to read a place record source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlaceTableConfig {
    pub delimiter: char,
    pub name_column: String,
    pub code_column: String,
    /// Any WHATWG encoding label, e.g. `latin1`, `windows-1252` or `utf-8`
    pub encoding: String,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for PlaceTableConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            name_column: DEFAULT_NAME_COLUMN.to_owned(),
            code_column: DEFAULT_CODE_COLUMN.to_owned(),
            encoding: DEFAULT_ENCODING.to_owned(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl PlaceTableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(&self, delimiter: char) -> Self {
        self.mutate_clone(|x| x.delimiter = delimiter)
    }

    pub fn name_column(&self, name_column: &str) -> Self {
        self.mutate_clone(|x| x.name_column = name_column.to_owned())
    }

    pub fn code_column(&self, code_column: &str) -> Self {
        self.mutate_clone(|x| x.code_column = code_column.to_owned())
    }

    pub fn encoding(&self, encoding: &str) -> Self {
        self.mutate_clone(|x| x.encoding = encoding.to_owned())
    }

    pub fn duplicate_policy(&self, duplicate_policy: DuplicatePolicy) -> Self {
        self.mutate_clone(|x| x.duplicate_policy = duplicate_policy)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}
