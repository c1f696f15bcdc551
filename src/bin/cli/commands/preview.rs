use anyhow::Result;

use vocab_srs::vocabulary::algorithm::format_interval;
use vocab_srs::ReviewRating;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entry = app.find_word(word)?;
    let intervals = app.store.preview(&entry);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = ReviewRating::ALL
                .iter()
                .zip(intervals)
                .map(|(rating, days)| {
                    serde_json::json!({
                        "rating": rating,
                        "quality": rating.quality(),
                        "interval": days,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&entry.word, Color::BOLD, use_color));
            for (rating, days) in ReviewRating::ALL.iter().zip(intervals) {
                println!("  {:<6} {}", rating.label(), format_interval(days));
            }
        }
    }

    Ok(())
}
