// Filter domain model - date range and borough selection
use chrono::NaiveDate;
use std::fmt;

/// Wire/display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label the borough dropdown uses for "no borough filter".
pub const ALL_BOROUGHS_LABEL: &str = "All Boroughs";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BoroughFilter {
    #[default]
    All,
    Named(String),
}

impl BoroughFilter {
    /// Parse user input. Blank input, "all" and the dropdown's "All Boroughs"
    /// entry all mean no borough filter.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case(ALL_BOROUGHS_LABEL)
        {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    /// Value sent as the `borough` query parameter, if any.
    pub fn as_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for BoroughFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_BOROUGHS_LABEL),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Snapshot of the user's filter selection.
///
/// This is a plain value: every change produces a new `FilterState`, and
/// anything keyed on filters (the page cache, in-flight request tags) holds
/// its own copy rather than a reference to the live selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub borough: BoroughFilter,
}

impl FilterState {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, borough: BoroughFilter) -> Self {
        Self {
            start_date,
            end_date,
            borough,
        }
    }

    pub fn with_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            borough: self.borough.clone(),
        }
    }

    pub fn with_start_date(&self, start_date: NaiveDate) -> Self {
        self.with_date_range(start_date, self.end_date)
    }

    pub fn with_end_date(&self, end_date: NaiveDate) -> Self {
        self.with_date_range(self.start_date, end_date)
    }

    pub fn with_borough(&self, borough: BoroughFilter) -> Self {
        Self {
            borough,
            ..self.clone()
        }
    }

    /// Query parameters shared by every filtered endpoint.
    pub fn query_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("start_date", Some(self.start_date.format(DATE_FORMAT).to_string())),
            ("end_date", Some(self.end_date.format(DATE_FORMAT).to_string())),
            ("borough", self.borough.as_param().map(str::to_string)),
        ]
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({})",
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT),
            self.borough
        )
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}
