//! Card, hole-card, and board string parsing (e.g., "KhQsJs" -> Board).
//!
//! This is the only fallible surface around the evaluator; errors are
//! returned as strings naming the offending token and never reach the
//! hot path.

use crate::cards::{card_bit, make_card, Board, Card, Combo};

/// Parse a single card from rank and suit characters.
///
/// Ranks: 2-9, T, J, Q, K, A; suits: c, d, h, s. Both case-insensitive.
pub fn parse_card(rank_char: char, suit_char: char) -> Result<Card, String> {
    let rank = match rank_char {
        '2' => 0,
        '3' => 1,
        '4' => 2,
        '5' => 3,
        '6' => 4,
        '7' => 5,
        '8' => 6,
        '9' => 7,
        'T' | 't' => 8,
        'J' | 'j' => 9,
        'Q' | 'q' => 10,
        'K' | 'k' => 11,
        'A' | 'a' => 12,
        _ => return Err(format!("Invalid rank: {}", rank_char)),
    };

    let suit = match suit_char {
        'c' | 'C' => 0,
        'd' | 'D' => 1,
        'h' | 'H' => 2,
        's' | 'S' => 3,
        _ => return Err(format!("Invalid suit: {}", suit_char)),
    };

    Ok(make_card(rank, suit))
}

/// Parse a string of cards into a vector.
///
/// Cards may be concatenated ("KhQsJs") or separated by whitespace,
/// commas, or semicolons. Duplicates are rejected.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    let chars: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != ';')
        .collect();
    if chars.len() % 2 != 0 {
        return Err(format!("Invalid card string: {}", s.trim()));
    }

    let mut cards = Vec::with_capacity(chars.len() / 2);
    let mut seen = 0u64;
    for chunk in chars.chunks(2) {
        let card = parse_card(chunk[0], chunk[1])?;
        if seen & card_bit(card) != 0 {
            return Err(format!("Duplicate card: {}{}", chunk[0], chunk[1]));
        }
        seen |= card_bit(card);
        cards.push(card);
    }

    Ok(cards)
}

/// Parse exactly two concatenated cards as a hole-card combo (e.g., "AsKh").
pub fn parse_hole_cards(s: &str) -> Result<Combo, String> {
    let cards = parse_cards(s)?;
    if cards.len() != 2 {
        return Err(format!("Hole cards must be exactly two cards: {}", s.trim()));
    }
    Ok(Combo::new(cards[0], cards[1]))
}

/// Parse a board string like "KhQsJs" or "Kh Qs Js 2c 3d".
///
/// A board holds 0 (preflop), 3 (flop), 4 (turn), or 5 (river) cards;
/// an empty string is the preflop board.
pub fn parse_board(s: &str) -> Result<Board, String> {
    let cards = parse_cards(s)?;
    if !matches!(cards.len(), 0 | 3 | 4 | 5) {
        return Err(format!(
            "Board must have 0, 3, 4, or 5 cards, got {}",
            cards.len()
        ));
    }
    Ok(Board::new(&cards))
}

impl Board {
    /// Parse a board from a string like "KhQsJs".
    pub fn parse(s: &str) -> Result<Self, String> {
        parse_board(s)
    }

    /// Format the board as a string.
    pub fn to_string(&self) -> String {
        use crate::cards::card_to_string;
        self.cards.iter().map(|&c| card_to_string(c)).collect()
    }
}
