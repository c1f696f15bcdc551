use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_entry_line;
use crate::OutputFormat;

pub fn run(app: &App, due_only: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entries = if due_only {
        app.store.list_due_words()
    } else {
        app.store.list_words()
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                if due_only {
                    println!("All caught up! No words due for review today.");
                } else {
                    println!("No words in the bank yet.");
                }
                return Ok(());
            }

            let width = entries.iter().map(|e| e.word.chars().count()).max().unwrap_or(4).max(4);
            for entry in &entries {
                println!("{}", render_entry_line(entry, width, use_color));
            }

            let noun = if due_only { "due" } else { "total" };
            println!("\n{} words {}", entries.len(), noun);
        }
    }

    Ok(())
}
