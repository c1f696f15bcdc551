use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use vocab_srs::vocabulary::algorithm::format_interval;
use vocab_srs::{ReviewRating, ReviewSession};

use crate::app::App;
use crate::render::terminal::{paint, render_card_back, Color};
use crate::OutputFormat;

/// Submit one review without an interactive session
pub fn run_rate(
    app: &App,
    id: &str,
    rating: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let rating: ReviewRating = rating.parse()?;
    let Some(entry) = app
        .store
        .rate(id, rating)
        .context("Failed to save review")?
    else {
        bail!("No entry with id '{}'", id);
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} \"{}\" as {}: next review in {} ({})",
                paint("Rated", Color::GREEN, use_color),
                entry.word,
                rating,
                format_interval(entry.interval),
                entry.next_review_date().format("%Y-%m-%d"),
            );
        }
    }

    Ok(())
}

/// Walk through today's due words, reading ratings from stdin
pub fn run_session(app: &App, use_color: bool) -> Result<()> {
    let mut session = ReviewSession::start(&app.store);
    if session.is_empty() {
        println!("All caught up! No words due for review today.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    while let Some(entry) = session.current().cloned() {
        println!();
        println!(
            "{} {}",
            paint(&format!("[{}/{}]", session.position() + 1, session.len()), Color::DIM, use_color),
            paint(&entry.word, Color::BOLD, use_color)
        );
        print!("Press Enter to flip (q to quit) ");
        stdout.flush()?;
        match lines.next().transpose()? {
            None => break,
            Some(line) if line.trim().eq_ignore_ascii_case("q") => break,
            Some(_) => {}
        }

        println!("{}", render_card_back(&entry, use_color));
        let intervals = app.store.preview(&entry);
        let choices: Vec<String> = ReviewRating::ALL
            .iter()
            .zip(intervals)
            .enumerate()
            .map(|(i, (rating, days))| format!("{}) {} {}", i + 1, rating, format_interval(days)))
            .collect();

        let rating = loop {
            print!("{}  > ", choices.join("  "));
            stdout.flush()?;
            let Some(line) = lines.next().transpose()? else {
                return finish(&session, use_color);
            };
            if line.trim().eq_ignore_ascii_case("s") {
                break None;
            }
            match line.parse::<ReviewRating>() {
                Ok(rating) => break Some(rating),
                Err(e) => println!("{}", paint(&e.to_string(), Color::RED, use_color)),
            }
        };

        match rating {
            Some(rating) => {
                session
                    .rate(&app.store, rating)
                    .context("Failed to save review")?;
            }
            None => session.skip(),
        }
    }

    finish(&session, use_color)
}

fn finish(session: &ReviewSession, use_color: bool) -> Result<()> {
    println!();
    if session.is_complete() {
        println!("{}", paint("Session complete!", Color::BLUE, use_color));
    }
    println!(
        "You've reviewed {} words today ({} recalled).",
        session.reviewed(),
        session.correct()
    );
    Ok(())
}
