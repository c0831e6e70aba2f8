//! Terminal rendering for cards and messages.
//!
//! Functions build strings so they can be tested; the handlers print them.

use chrono::{DateTime, Utc};
use colored::Colorize;
use shelf::card::BookCard;
use shelf::commands::{CmdMessage, MessageLevel};
use shelf::config::ShelfConfig;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 72;
const READ_MARKER: &str = "✓";
const PLACEHOLDER: &str = "░░ no cover";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// The card grid, one block per book.
pub fn render_cards(cards: &[BookCard], query: &str) -> String {
    if cards.is_empty() {
        return if query.is_empty() {
            "No books yet. Add one with `shelf add`.\n".to_string()
        } else {
            format!("No books match \"{}\".\n", query)
        };
    }

    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_card(card));
    }
    out
}

pub fn render_card(card: &BookCard) -> String {
    let book = &card.book;
    let marker = if book.read { READ_MARKER } else { " " };
    let id = format!("#{}", book.id);

    let available = LINE_WIDTH.saturating_sub(id.width() + marker.width() + 3);
    let title = truncate_to_width(&book.title, available);
    let padding = available.saturating_sub(title.width());

    let mut out = format!(
        "{} {}{} {}\n",
        marker.green(),
        title.bold(),
        " ".repeat(padding),
        id.dimmed()
    );

    out.push_str(&format!("    Author:  {}\n", book.author));
    out.push_str(&format!("    Year:    {}\n", card.year_label()));
    out.push_str(&format!("    Pages:   {}\n", card.pages_label()));
    let cover = match &card.cover_path {
        Some(path) => path.display().to_string(),
        None => PLACEHOLDER.dimmed().to_string(),
    };
    out.push_str(&format!("    Cover:   {}\n", cover));
    if let Some(added) = card.added_at {
        out.push_str(&format!("    Added:   {}\n", format_time_ago(added).dimmed()));
    }
    out.push_str(&format!(
        "    [edit {id}]  [toggle {id}: mark {}]  [delete {id}]\n",
        card.toggle_label().to_lowercase(),
        id = book.id
    ));
    out
}

pub fn render_config(config: &ShelfConfig) -> String {
    ShelfConfig::KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|v| format!("{} = {}\n", key, v)))
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf::model::{Book, BookId};
    use std::path::PathBuf;

    fn card(title: &str, read: bool) -> BookCard {
        BookCard::new(
            Book {
                id: BookId(1_700_000_000_000),
                title: title.into(),
                author: "Herbert".into(),
                year: 1965,
                pages: None,
                cover: None,
                read,
            },
            None,
        )
    }

    #[test]
    fn card_shows_fields_and_placeholders() {
        let out = render_card(&card("Dune", false));
        assert!(out.contains("Dune"));
        assert!(out.contains("#1700000000000"));
        assert!(out.contains("Herbert"));
        assert!(out.contains("1965"));
        assert!(out.contains("N/A"));
        assert!(out.contains("no cover"));
        assert!(out.contains("[toggle 1700000000000: mark read]"));
    }

    #[test]
    fn read_card_offers_unread() {
        let out = render_card(&card("Dune", true));
        assert!(out.contains(READ_MARKER));
        assert!(out.contains("[toggle 1700000000000: mark unread]"));
    }

    #[test]
    fn card_shows_cover_path() {
        let mut c = card("Dune", false);
        c.cover_path = Some(PathBuf::from("covers/cover-1.png"));
        assert!(render_card(&c).contains("covers/cover-1.png"));
    }

    #[test]
    fn empty_grid_messages() {
        assert!(render_cards(&[], "").contains("No books yet"));
        assert!(render_cards(&[], "dune").contains("No books match \"dune\""));
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(200);
        let out = render_card(&card(&long, false));
        assert!(out.contains('…'));
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&ShelfConfig::default());
        assert!(out.contains("storage-key = livros"));
        assert!(out.contains("confirm-delete = true"));
    }
}
