/// Symbolic time window for the commit average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Half,
    Year,
}

impl Period {
    /// Parses a period name. Anything unrecognized (including absent)
    /// falls back to `Month`.
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some("quarter") => Period::Quarter,
            Some("half") => Period::Half,
            Some("year") => Period::Year,
            _ => Period::Month,
        }
    }

    /// Number of days the window nominally covers.
    pub fn days(self) -> u32 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
            Period::Half => 182,
            Period::Year => 365,
        }
    }

    /// Canonical name, used in cache keys and badge labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Half => "half",
            Period::Year => "year",
        }
    }
}
