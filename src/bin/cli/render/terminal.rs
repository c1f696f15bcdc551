use vocab_srs::vocabulary::algorithm::format_interval;
use vocab_srs::VocabularyEntry;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const ITALIC: &'static str = "\x1b[3m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Wrap `text` in a color code when color output is on
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// One-line summary of an entry for list output
pub fn render_entry_line(entry: &VocabularyEntry, word_width: usize, use_color: bool) -> String {
    let padded = format!("{:<width$}", entry.word, width = word_width);
    let schedule = format!(
        "reps {:<2} every {:<4} ef {:.2}  next {}",
        entry.reps,
        format_interval(entry.interval),
        entry.ease_factor,
        entry.next_review_date().format("%Y-%m-%d"),
    );

    format!(
        "{} {}  {}",
        paint(&padded, Color::BOLD, use_color),
        paint(&schedule, Color::DIM, use_color),
        entry.definition,
    )
}

/// Front and back of a review card
pub fn render_card_back(entry: &VocabularyEntry, use_color: bool) -> String {
    let mut lines = Vec::new();

    let meaning = if entry.definition.is_empty() {
        &entry.word
    } else {
        &entry.definition
    };
    lines.push(format!("{} {}", paint("Meaning:", Color::CYAN, use_color), meaning));

    if !entry.context.is_empty() {
        let quoted = format!("\"{}\"", entry.context);
        lines.push(format!(
            "{} {}",
            paint("Context:", Color::CYAN, use_color),
            paint(&quoted, Color::ITALIC, use_color)
        ));
    }

    lines.join("\n")
}
