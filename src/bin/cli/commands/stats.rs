use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.store.review_stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            let due = stats.due.to_string();
            println!("Due:     {}", paint(&due, Color::BOLD, use_color));
            println!("Total:   {}", stats.total);
            println!("Learned: {}", stats.learned);
            if let Ok(dir) = app.config.resolved_data_dir() {
                println!("{}", paint(&format!("Stored in {}", dir.display()), Color::DIM, use_color));
            }

            if stats.total > 0 && stats.due == 0 {
                println!("\nAll caught up! Great memory.");
            }
        }
    }

    Ok(())
}
