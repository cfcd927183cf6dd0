//! Terminal colorization for table summaries
//!
//! Applies ANSI escape codes to summary output using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize a boxed table summary
///
/// - Box-drawing characters: Cyan
/// - `PK` markers: Yellow
/// - `FK` markers: Magenta
/// - Cardinality arrows (`1──N`): Green
/// - Names and types: Default (terminal color)
pub fn colorize_summary(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        let words: Vec<String> = line.split(' ').map(colorize_word).collect();
        result.push_str(&words.join(" "));
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

fn colorize_word(word: &str) -> String {
    match word {
        "PK" => format!("{}", word.with(Color::Yellow)),
        "FK" => format!("{}", word.with(Color::Magenta)),
        "1──1" | "1──N" | "N──N" => format!("{}", word.with(Color::Green)),
        _ => word
            .chars()
            .map(|c| match c {
                '┌' | '┐' | '└' | '┘' | '├' | '┤' | '─' | '│' => {
                    format!("{}", c.to_string().with(Color::Cyan))
                }
                _ => c.to_string(),
            })
            .collect(),
    }
}
