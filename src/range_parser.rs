//! Range string parsing.
//!
//! Supports formats like:
//! - "AA KK QQ" - all combos of these hands
//! - "AKs,AQs" - suited hands only
//! - "AKo" - offsuit hands only
//! - "AK" - both suited and offsuit (16 combos)
//! - "AsKs" - a specific combo
//! - "JJ+" - open subrange: JJ through AA
//! - "A5s+" - open subrange: A5s through AKs
//! - "KTs-K7s" - bound subrange, inclusive
//!
//! Terms are separated by whitespace or commas.

use crate::board_parser::parse_hole_cards;
use crate::cards::make_card;
use crate::range::Range;

/// Hand shape classes on the 13x13 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandClass {
    Pair,
    Suited,
    Offsuit,
    /// Suited and offsuit together.
    Any,
}

/// A parsed hand shape: ranks plus suitedness, before combo expansion.
#[derive(Debug, Clone, Copy)]
struct HandShape {
    hi: u8,
    lo: u8,
    class: HandClass,
}

/// Parse a range string.
///
/// # Examples
/// ```ignore
/// let range = parse_range("JJ+ AKs KQs-K9s 76s")?;
/// ```
pub fn parse_range(s: &str) -> Result<Range, String> {
    let mut range = Range::new();

    for term in s.split(|c: char| c.is_whitespace() || c == ',') {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        add_term_to_range(&mut range, term)?;
    }

    Ok(range)
}

/// Add a single range term (hand, specific combo, or subrange).
fn add_term_to_range(range: &mut Range, term: &str) -> Result<(), String> {
    if let Some((a, b)) = term.split_once('-') {
        return add_bound_subrange(range, term, a, b);
    }
    if let Some(base) = term.strip_suffix('+') {
        return add_open_subrange(range, base);
    }
    if term.len() == 4 {
        // Specific combo: "AsKs".
        let combo = parse_hole_cards(term)?;
        range.insert(combo);
        return Ok(());
    }

    let shape = parse_shape(term)?;
    add_shape(range, shape);
    Ok(())
}

/// Parse a rank character (2-9, T, J, Q, K, A) to rank index (0-12).
fn parse_rank_char(c: char) -> Result<u8, String> {
    match c {
        '2' => Ok(0),
        '3' => Ok(1),
        '4' => Ok(2),
        '5' => Ok(3),
        '6' => Ok(4),
        '7' => Ok(5),
        '8' => Ok(6),
        '9' => Ok(7),
        'T' | 't' => Ok(8),
        'J' | 'j' => Ok(9),
        'Q' | 'q' => Ok(10),
        'K' | 'k' => Ok(11),
        'A' | 'a' => Ok(12),
        _ => Err(format!("Invalid rank: {}", c)),
    }
}

/// Parse a shape term: "AA", "AK", "AKs", or "AKo".
fn parse_shape(term: &str) -> Result<HandShape, String> {
    let chars: Vec<char> = term.chars().collect();

    match chars.len() {
        2 => {
            let r1 = parse_rank_char(chars[0])?;
            let r2 = parse_rank_char(chars[1])?;
            if r1 == r2 {
                Ok(HandShape {
                    hi: r1,
                    lo: r1,
                    class: HandClass::Pair,
                })
            } else {
                Ok(HandShape {
                    hi: r1.max(r2),
                    lo: r1.min(r2),
                    class: HandClass::Any,
                })
            }
        }
        3 => {
            let r1 = parse_rank_char(chars[0])?;
            let r2 = parse_rank_char(chars[1])?;
            if r1 == r2 {
                return Err(format!("Pairs cannot be suited or offsuit: {}", term));
            }
            let class = match chars[2] {
                's' | 'S' => HandClass::Suited,
                'o' | 'O' => HandClass::Offsuit,
                _ => return Err(format!("Invalid hand suffix: {}", chars[2])),
            };
            Ok(HandShape {
                hi: r1.max(r2),
                lo: r1.min(r2),
                class,
            })
        }
        _ => Err(format!("Invalid hand format: {}", term)),
    }
}

/// Expand a shape into its combos.
fn add_shape(range: &mut Range, shape: HandShape) {
    match shape.class {
        HandClass::Pair => add_pair_combos(range, shape.hi),
        HandClass::Suited => add_suited_combos(range, shape.hi, shape.lo),
        HandClass::Offsuit => add_offsuit_combos(range, shape.hi, shape.lo),
        HandClass::Any => {
            add_suited_combos(range, shape.hi, shape.lo);
            add_offsuit_combos(range, shape.hi, shape.lo);
        }
    }
}

/// Add an open subrange: "JJ+" walks pairs up to aces, "A5s+" walks the
/// low card up to just below the high card.
fn add_open_subrange(range: &mut Range, base: &str) -> Result<(), String> {
    let shape = parse_shape(base)?;
    match shape.class {
        HandClass::Pair => {
            for r in shape.hi..=12 {
                add_pair_combos(range, r);
            }
        }
        _ => {
            if shape.lo + 1 == shape.hi {
                // Connectors like "JTs+" walk both ranks up.
                let gap = shape.hi - shape.lo;
                for lo in shape.lo..=(12 - gap) {
                    add_shape(
                        range,
                        HandShape {
                            hi: lo + gap,
                            lo,
                            class: shape.class,
                        },
                    );
                }
            } else {
                for lo in shape.lo..shape.hi {
                    add_shape(
                        range,
                        HandShape {
                            hi: shape.hi,
                            lo,
                            class: shape.class,
                        },
                    );
                }
            }
        }
    }
    Ok(())
}

/// Add a bound subrange: both ends must share a shape class (and, for
/// non-pairs, the high card); the low end is inclusive.
fn add_bound_subrange(range: &mut Range, term: &str, a: &str, b: &str) -> Result<(), String> {
    let first = parse_shape(a)?;
    let second = parse_shape(b)?;

    if first.class != second.class {
        return Err(format!("Subrange ends have different shapes: {}", term));
    }
    match first.class {
        HandClass::Pair => {
            let (low, high) = (first.hi.min(second.hi), first.hi.max(second.hi));
            for r in low..=high {
                add_pair_combos(range, r);
            }
        }
        _ => {
            if first.hi != second.hi {
                return Err(format!("Subrange ends have different high cards: {}", term));
            }
            let (low, high) = (first.lo.min(second.lo), first.lo.max(second.lo));
            for lo in low..=high {
                add_shape(
                    range,
                    HandShape {
                        hi: first.hi,
                        lo,
                        class: first.class,
                    },
                );
            }
        }
    }
    Ok(())
}

/// Add all 6 pair combos to the range.
fn add_pair_combos(range: &mut Range, rank: u8) {
    for s1 in 0..4u8 {
        for s2 in (s1 + 1)..4u8 {
            range.insert(crate::cards::Combo::new(
                make_card(rank, s1),
                make_card(rank, s2),
            ));
        }
    }
}

/// Add all 4 suited combos to the range.
fn add_suited_combos(range: &mut Range, rank1: u8, rank2: u8) {
    for suit in 0..4u8 {
        range.insert(crate::cards::Combo::new(
            make_card(rank1, suit),
            make_card(rank2, suit),
        ));
    }
}

/// Add all 12 offsuit combos to the range.
fn add_offsuit_combos(range: &mut Range, rank1: u8, rank2: u8) {
    for s1 in 0..4u8 {
        for s2 in 0..4u8 {
            if s1 != s2 {
                range.insert(crate::cards::Combo::new(
                    make_card(rank1, s1),
                    make_card(rank2, s2),
                ));
            }
        }
    }
}

impl Range {
    /// Parse a range from a string.
    pub fn parse(s: &str) -> Result<Self, String> {
        parse_range(s)
    }
}

impl std::str::FromStr for Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s)
    }
}
