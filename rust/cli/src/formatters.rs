//! Terminal formatting for cards and equity numbers.
//!
//! Suits print as glyphs where the terminal is likely to render them and as
//! `s/h/d/c` elsewhere. Percentages carry one decimal, money two.
//!
//! ```rust
//! use pokerlab_engine::cards::Card;
//! use pokerlab_cli::formatters::{format_board, format_card, format_percent};
//!
//! let ace: Card = "As".parse().unwrap();
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert_eq!(format_board(&[]), "[]");
//! assert_eq!(format_percent(81.26), "81.3%");
//! ```

use pokerlab_engine::cards::{Card, Suit};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Elsewhere assumes support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.glyph().to_string()
    } else {
        suit.letter().to_string()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.to_char(), format_suit(&card.suit))
}

/// Formatted board string like "[A♠ K♥ Q♦]" or "[]" if empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted_cards.join(" "))
}

/// One decimal place with a percent sign.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Signed amount with two decimals, e.g. `+12.50` or `-3.00`.
pub fn format_signed(value: f64) -> String {
    format!("{:+.2}", value)
}
