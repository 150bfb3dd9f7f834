use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named set of numeric values that rule conditions can refer to.
pub trait DataSource {
    /// Returns the value bound to `name`, or `None` if the source has no such field.
    fn lookup(&self, name: &str) -> Option<f64>;
}

/// The applicant record entered for a simulated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationInput {
    pub credit_score: i64,
    pub annual_income: i64,
    pub debt_to_income: f64,
    pub employment_years: i64,
}

impl ValidationInput {
    /// Names of the fields a condition may reference, in display order.
    pub const FIELDS: [&'static str; 4] = [
        "credit_score",
        "annual_income",
        "debt_to_income",
        "employment_years",
    ];
}

impl Default for ValidationInput {
    fn default() -> Self {
        Self {
            credit_score: 650,
            annual_income: 50_000,
            debt_to_income: 0.35,
            employment_years: 2,
        }
    }
}

impl DataSource for ValidationInput {
    fn lookup(&self, name: &str) -> Option<f64> {
        match name {
            "credit_score" => Some(self.credit_score as f64),
            "annual_income" => Some(self.annual_income as f64),
            "debt_to_income" => Some(self.debt_to_income),
            "employment_years" => Some(self.employment_years as f64),
            _ => None,
        }
    }
}

impl DataSource for AHashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl DataSource for HashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}
