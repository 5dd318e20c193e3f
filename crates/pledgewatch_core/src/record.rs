use std::collections::BTreeSet;
use std::fmt;

/// Class tokens of a tier's list item, used as its availability fingerprint.
///
/// Token order in the source markup is irrelevant: two statuses compare equal
/// when they hold the same set of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusTokens(BTreeSet<String>);

impl StatusTokens {
    /// Splits a `class` attribute value on whitespace.
    pub fn from_class(class: &str) -> Self {
        Self(class.split_whitespace().map(ToOwned::to_owned).collect())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `token` is the one and only token.
    pub fn is_only(&self, token: &str) -> bool {
        self.0.len() == 1 && self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for StatusTokens {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(ToOwned::to_owned).collect())
    }
}

impl fmt::Display for StatusTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}

/// One limited reward tier as scraped from a single snapshot of the pledge page.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardRecord {
    pub value: f64,
    pub status: StatusTokens,
    pub remaining: String,
    pub id: String,
    pub description: String,
}

/// Strips everything except ASCII digits and `.` and parses the rest.
///
/// `"$1,250.00"` becomes `1250.0`. Returns `None` when nothing numeric is left
/// or the remainder is not a valid number (e.g. `"1.2.3"`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Collapses whitespace runs into single spaces and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
