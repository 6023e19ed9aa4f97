//! Command-line flags shared by the listing commands.

use clap::Args;
use gogoeat_core::{BudgetBracket, Coordinate, FilterCriteria, MAX_RATING};

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    /// Budget bracket: under100, 100-300, 300-500, over500
    #[arg(long)]
    pub budget: Option<BudgetBracket>,
    /// Minimum rating (0-5)
    #[arg(long, value_parser = parse_rating)]
    pub min_rating: Option<f64>,
    /// Only restaurants open now
    #[arg(long)]
    pub open_now: bool,
    /// Only restaurants with parking (catalog entries only)
    #[arg(long)]
    pub parking: bool,
    /// Match name or category text
    #[arg(long)]
    pub text: Option<String>,
    /// Pick one random restaurant from the filtered list
    #[arg(long)]
    pub random: bool,
}

impl FilterArgs {
    pub(crate) fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        if let Some(bracket) = self.budget {
            criteria.select_budget(bracket);
        }
        if let Some(rating) = self.min_rating {
            criteria.select_min_rating(rating);
        }
        if self.open_now {
            criteria.toggle_open_now();
        }
        if self.parking {
            criteria.toggle_parking();
        }
        if let Some(text) = &self.text {
            criteria.set_search_text(text);
        }
        criteria
    }
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct LocationArgs {
    /// Latitude of your position; defaults to GOGOEAT_DEFAULT_LAT
    #[arg(
        long,
        requires = "lng",
        allow_negative_numbers = true,
        value_parser = parse_latitude
    )]
    pub lat: Option<f64>,
    /// Longitude of your position; defaults to GOGOEAT_DEFAULT_LNG
    #[arg(
        long,
        requires = "lat",
        allow_negative_numbers = true,
        value_parser = parse_longitude
    )]
    pub lng: Option<f64>,
}

impl LocationArgs {
    pub(crate) fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lng?))
    }
}

fn parse_bounded(raw: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside {min}..={max}"))
    }
}

fn parse_rating(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, 0.0, MAX_RATING)
}

fn parse_latitude(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, -90.0, 90.0)
}

fn parse_longitude(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, -180.0, 180.0)
}
