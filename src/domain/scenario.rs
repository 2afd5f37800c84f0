use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier handed out when a scenario is added. Never reused within a
/// session, so results stay attached to the scenario that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub u64);

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One investment candidate.
///
/// `vacancy_rate` and `appreciation_rate` are stored as fractions and shown as
/// percentages. `annual_rate` is both stored and shown as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyScenario {
    pub purchase_price: f64,
    pub down_payment: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub monthly_rent: f64,
    pub monthly_admin_cost: f64,
    pub vacancy_rate: f64,
    pub appreciation_rate: f64,
}

impl Default for PropertyScenario {
    fn default() -> Self {
        Self {
            purchase_price: 100_000.0,
            down_payment: 20_000.0,
            annual_rate: 5.0,
            term_years: 25,
            monthly_rent: 500.0,
            monthly_admin_cost: 50.0,
            vacancy_rate: 0.02,
            appreciation_rate: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioField {
    PurchasePrice,
    DownPayment,
    AnnualRate,
    TermYears,
    MonthlyRent,
    MonthlyAdminCost,
    VacancyRate,
    AppreciationRate,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 8] = [
        ScenarioField::PurchasePrice,
        ScenarioField::DownPayment,
        ScenarioField::AnnualRate,
        ScenarioField::TermYears,
        ScenarioField::MonthlyRent,
        ScenarioField::MonthlyAdminCost,
        ScenarioField::VacancyRate,
        ScenarioField::AppreciationRate,
    ];

    /// Fields edited and shown as a percentage but stored as a fraction.
    pub fn is_percentage_displayed(self) -> bool {
        matches!(self, ScenarioField::VacancyRate | ScenarioField::AppreciationRate)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScenarioField::PurchasePrice => "Purchase price",
            ScenarioField::DownPayment => "Down payment",
            ScenarioField::AnnualRate => "Annual rate (%)",
            ScenarioField::TermYears => "Term (years)",
            ScenarioField::MonthlyRent => "Monthly rent",
            ScenarioField::MonthlyAdminCost => "Monthly admin cost",
            ScenarioField::VacancyRate => "Vacancy rate (%)",
            ScenarioField::AppreciationRate => "Appreciation rate (%)",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum FieldParseError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is not a finite number")]
    NotFinite(String),
    #[error("'{0}' is not a positive whole number of years")]
    NotWholeYears(String),
}

/// A typed edit of a single scenario field. Percentage-displayed fields carry
/// the already converted fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEdit {
    PurchasePrice(f64),
    DownPayment(f64),
    AnnualRate(f64),
    TermYears(u32),
    MonthlyRent(f64),
    MonthlyAdminCost(f64),
    VacancyRate(f64),
    AppreciationRate(f64),
}

impl FieldEdit {
    /// Parses the displayed representation of `field` into the stored value.
    pub fn parse(field: ScenarioField, raw: &str) -> Result<Self, FieldParseError> {
        let value = parse_displayed_number(raw)?;
        let edit = match field {
            ScenarioField::PurchasePrice => FieldEdit::PurchasePrice(value),
            ScenarioField::DownPayment => FieldEdit::DownPayment(value),
            ScenarioField::AnnualRate => FieldEdit::AnnualRate(value),
            ScenarioField::TermYears => {
                if value < 1.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
                    return Err(FieldParseError::NotWholeYears(raw.to_string()));
                }
                FieldEdit::TermYears(value as u32)
            }
            ScenarioField::MonthlyRent => FieldEdit::MonthlyRent(value),
            ScenarioField::MonthlyAdminCost => FieldEdit::MonthlyAdminCost(value),
            ScenarioField::VacancyRate => FieldEdit::VacancyRate(percent_to_fraction(value)),
            ScenarioField::AppreciationRate => {
                FieldEdit::AppreciationRate(percent_to_fraction(value))
            }
        };
        Ok(edit)
    }
}

impl PropertyScenario {
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::PurchasePrice(value) => self.purchase_price = value,
            FieldEdit::DownPayment(value) => self.down_payment = value,
            FieldEdit::AnnualRate(value) => self.annual_rate = value,
            FieldEdit::TermYears(value) => self.term_years = value,
            FieldEdit::MonthlyRent(value) => self.monthly_rent = value,
            FieldEdit::MonthlyAdminCost(value) => self.monthly_admin_cost = value,
            FieldEdit::VacancyRate(value) => self.vacancy_rate = value,
            FieldEdit::AppreciationRate(value) => self.appreciation_rate = value,
        }
    }

    /// The value as a user sees it; fractions are scaled back to percentages.
    pub fn display_value(&self, field: ScenarioField) -> f64 {
        match field {
            ScenarioField::PurchasePrice => self.purchase_price,
            ScenarioField::DownPayment => self.down_payment,
            ScenarioField::AnnualRate => self.annual_rate,
            ScenarioField::TermYears => f64::from(self.term_years),
            ScenarioField::MonthlyRent => self.monthly_rent,
            ScenarioField::MonthlyAdminCost => self.monthly_admin_cost,
            ScenarioField::VacancyRate => fraction_to_percent(self.vacancy_rate),
            ScenarioField::AppreciationRate => fraction_to_percent(self.appreciation_rate),
        }
    }
}

pub fn percent_to_fraction(displayed: f64) -> f64 {
    displayed / 100.0
}

pub fn fraction_to_percent(stored: f64) -> f64 {
    stored * 100.0
}

fn parse_displayed_number(raw: &str) -> Result<f64, FieldParseError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| FieldParseError::NotANumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(FieldParseError::NotFinite(raw.to_string()));
    }
    Ok(value)
}
