//! Concrete suit assignments for parsed range descriptors.

use crate::cards::{Card, CardMask, Suit};
use crate::range::ParsedHand;

/// One concrete two-card hand.
pub type Combo = [Card; 2];

/// Every suit assignment for `hand`: 6 for a pair, 4 suited, 12 offsuit.
pub fn expand_hand(hand: &ParsedHand) -> Vec<Combo> {
    let mut out = Vec::with_capacity(hand.combo_count());
    if hand.is_pair() {
        for (i, &s1) in Suit::ALL.iter().enumerate() {
            for &s2 in &Suit::ALL[i + 1..] {
                out.push([Card::new(hand.rank1, s1), Card::new(hand.rank2, s2)]);
            }
        }
    } else if hand.suited {
        for &s in &Suit::ALL {
            out.push([Card::new(hand.rank1, s), Card::new(hand.rank2, s)]);
        }
    } else {
        for &s1 in &Suit::ALL {
            for &s2 in Suit::ALL.iter().filter(|&&s2| s2 != s1) {
                out.push([Card::new(hand.rank1, s1), Card::new(hand.rank2, s2)]);
            }
        }
    }
    out
}

pub fn expand_range(hands: &[ParsedHand]) -> Vec<Combo> {
    hands.iter().flat_map(expand_hand).collect()
}

pub fn combo_mask(combo: &Combo) -> CardMask {
    CardMask::empty().with(combo[0]).with(combo[1])
}

/// Drops every combo sharing a card with `dead`.
pub fn filter_conflicts(combos: &[Combo], dead: CardMask) -> Vec<Combo> {
    combos
        .iter()
        .filter(|c| !combo_mask(c).intersects(dead))
        .copied()
        .collect()
}
