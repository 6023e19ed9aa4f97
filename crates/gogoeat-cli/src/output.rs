use gogoeat_core::{distance_km, format_distance, Coordinate, RestaurantCandidate};
use gogoeat_search::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Table,
    Json,
}

impl Format {
    pub(crate) fn from_json_flag(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Table
        }
    }
}

pub(crate) fn print_candidates(
    candidates: &[RestaurantCandidate],
    origin: Coordinate,
    format: Format,
) -> anyhow::Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
        return Ok(());
    }

    let header = format!(
        "{:<24}{:<8}{:<7}{:<6}{:<9}ADDRESS",
        "NAME", "RATING", "PRICE", "OPEN", "DIST"
    );
    println!("{header}");
    for c in candidates {
        println!(
            "{:<24}{:<8}{:<7}{:<6}{:<9}{}",
            truncate(&c.name, 22),
            fmt_rating(c.rating),
            fmt_price(c.price_level),
            if c.is_open_now { "yes" } else { "no" },
            format_distance(distance_km(origin, c.location)),
            truncate(&c.address, 40),
        );
    }
    println!("{} restaurant(s)", candidates.len());
    Ok(())
}

pub(crate) fn print_selection(
    selection: &Selection,
    origin: Coordinate,
    format: Format,
) -> anyhow::Result<()> {
    let c = &selection.candidate;
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(c)?);
        return Ok(());
    }

    println!();
    println!("Today's pick: {}", c.name);
    println!(
        "  {} \u{b7} {} \u{b7} {} away",
        fmt_rating(c.rating),
        fmt_price(c.price_level),
        format_distance(distance_km(origin, c.location))
    );
    if !c.address.is_empty() {
        println!("  {}", c.address);
    }
    if let Some(details) = &selection.details {
        if let Some(phone) = &details.formatted_phone_number {
            println!("  phone: {phone}");
        }
        if let Some(website) = &details.website {
            println!("  web:   {website}");
        }
        if let Some(hours) = &details.opening_hours {
            for line in &hours.weekday_text {
                println!("  {line}");
            }
        }
        for review in details.reviews.iter().take(3) {
            println!(
                "  \u{201c}{}\u{201d} \u{2014} {}",
                truncate(&review.text, 60),
                review.author_name
            );
        }
    }
    Ok(())
}

fn fmt_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{rating:.1}")
    } else {
        "-".to_string()
    }
}

fn fmt_price(level: u8) -> String {
    if level == 0 {
        "-".to_string()
    } else {
        "$".repeat(usize::from(level))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}
