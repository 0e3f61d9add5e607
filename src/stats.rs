use crate::error::{GenerateError, ValidationError};
use metrics::{counter, gauge, Counter};

const FIELD: &str = "field";
const STAGE: &str = "stage";

pub struct GeneratorMetrics {
    pub generated: Counter,
}

impl GeneratorMetrics {
    pub fn new() -> Self {
        GeneratorMetrics {
            generated: counter!("fiscal_code.generated"),
        }
    }

    pub fn record_error(&self, err: &GenerateError) {
        let field: &'static str = err.field().into();
        counter!("fiscal_code.generation_errors", FIELD => field).increment(1);
    }
}

impl Default for GeneratorMetrics {
    fn default() -> Self {
        GeneratorMetrics::new()
    }
}

pub struct ValidatorMetrics {
    pub validations: Counter,
}

impl ValidatorMetrics {
    pub fn new() -> Self {
        ValidatorMetrics {
            validations: counter!("fiscal_code.validations"),
        }
    }

    pub fn record_error(&self, err: &ValidationError) {
        let stage: &'static str = err.stage().into();
        counter!("fiscal_code.validation_errors", STAGE => stage).increment(1);
    }
}

impl Default for ValidatorMetrics {
    fn default() -> Self {
        ValidatorMetrics::new()
    }
}

/// Reports the outcome of loading a place table.
pub fn record_place_table_load(entries: usize, skipped_rows: u64) {
    gauge!("place_table.entries").set(entries as f64);
    counter!("place_table.skipped_rows").increment(skipped_rows);
}
