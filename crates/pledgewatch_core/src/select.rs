use thiserror::Error;

use crate::record::parse_amount;
use crate::RewardRecord;

const MENU_DESCRIPTION_WIDTH: usize = 70;

/// How the tiers to track are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionCriteria {
    Ids(Vec<String>),
    Amounts(Vec<f64>),
    Interactive,
}

impl SelectionCriteria {
    /// Ids win over amounts; with neither the operator is asked.
    pub fn from_args(ids: Vec<String>, amounts: Vec<f64>) -> Self {
        if !ids.is_empty() {
            SelectionCriteria::Ids(ids)
        } else if !amounts.is_empty() {
            SelectionCriteria::Amounts(amounts)
        } else {
            SelectionCriteria::Interactive
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Chosen(Vec<RewardRecord>),
    /// The operator has to pick from a menu.
    Prompt,
}

pub fn apply_criteria(records: &[RewardRecord], criteria: &SelectionCriteria) -> Selection {
    match criteria {
        SelectionCriteria::Ids(ids) => Selection::Chosen(
            records
                .iter()
                .filter(|record| ids.iter().any(|id| *id == record.id))
                .cloned()
                .collect(),
        ),
        SelectionCriteria::Amounts(amounts) => Selection::Chosen(
            records
                .iter()
                .filter(|record| amounts.iter().any(|amount| *amount == record.value))
                .cloned()
                .collect(),
        ),
        SelectionCriteria::Interactive if records.len() == 1 => {
            Selection::Chosen(records.to_vec())
        }
        SelectionCriteria::Interactive => Selection::Prompt,
    }
}

/// Parses a pledge amount given on the command line (`75`, `$75.00`).
pub fn parse_amount_arg(raw: &str) -> Result<f64, MenuError> {
    parse_amount(raw).ok_or_else(|| MenuError::InvalidAmount(raw.to_string()))
}

/// Numbered menu lines, one per tier, starting at 1.
pub fn menu_lines(records: &[RewardRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let description: String = record
                .description
                .chars()
                .take(MENU_DESCRIPTION_WIDTH)
                .collect();
            format!("{}. ${} {}", idx + 1, format_value(record.value), description)
        })
        .collect()
}

/// Parses whitespace-separated 1-based menu numbers into 0-based indexes.
pub fn parse_menu_choice(input: &str, count: usize) -> Result<Vec<usize>, MenuError> {
    let mut picks = Vec::new();
    for part in input.split_whitespace() {
        let number: usize = part
            .parse()
            .map_err(|_| MenuError::NotANumber(part.to_string()))?;
        if number == 0 || number > count {
            return Err(MenuError::OutOfRange { number, count });
        }
        picks.push(number - 1);
    }
    if picks.is_empty() {
        return Err(MenuError::Empty);
    }
    Ok(picks)
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("no pledge levels entered")]
    Empty,
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("{number} is not between 1 and {count}")]
    OutOfRange { number: usize, count: usize },
    #[error("{0:?} is not a pledge amount")]
    InvalidAmount(String),
}
