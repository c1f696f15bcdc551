use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    word: &str,
    definition: &str,
    context: &str,
    suggested_by: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let added = app
        .store
        .add_word(word, definition, context, suggested_by)
        .context("Failed to save vocabulary")?;

    match format {
        OutputFormat::Json => {
            let entry = if added { app.store.find_word(word) } else { None };
            let output = serde_json::json!({
                "added": added,
                "entry": entry,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if added {
                println!("{} \"{}\"", paint("Added", Color::GREEN, use_color), word.trim());
            } else if word.trim().is_empty() {
                println!("{} word is empty", paint("Skipped:", Color::YELLOW, use_color));
            } else {
                println!(
                    "{} \"{}\" is already in the bank",
                    paint("Skipped:", Color::YELLOW, use_color),
                    word.trim()
                );
            }
        }
    }

    Ok(())
}
