use rand::Rng;

use crate::cards::{Card, CardMask, FULL_DECK};
use crate::errors::EquityError;

/// Undealt remainder of the deck. Cards are drawn uniformly without
/// replacement by a partial Fisher-Yates pass.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; 52],
    len: usize,
    position: usize,
}

impl Deck {
    pub fn full() -> Self {
        Self::excluding(CardMask::empty())
    }

    /// Every card of the canonical deck not in `dead`, in canonical order.
    pub fn excluding(dead: CardMask) -> Self {
        let mut cards = FULL_DECK;
        let mut len = 0;
        for c in FULL_DECK {
            if !dead.contains(c) {
                cards[len] = c;
                len += 1;
            }
        }
        Self {
            cards,
            len,
            position: 0,
        }
    }

    pub fn deal_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.position >= self.len {
            return None;
        }
        let j = rng.random_range(self.position..self.len);
        self.cards.swap(self.position, j);
        let c = self.cards[self.position];
        self.position += 1;
        Some(c)
    }

    pub fn remaining(&self) -> usize {
        self.len - self.position
    }
}

/// Fills `board` up to five cards with cards absent from `dead` and `board`.
pub fn complete_board<R: Rng + ?Sized>(
    board: &[Card],
    dead: CardMask,
    rng: &mut R,
) -> Result<[Card; 5], EquityError> {
    if board.len() > 5 {
        return Err(EquityError::Validation(
            "Board cannot have more than 5 cards".into(),
        ));
    }
    let mut deck = Deck::excluding(dead.union(CardMask::of(board)));
    let mut out = [FULL_DECK[0]; 5];
    out[..board.len()].copy_from_slice(board);
    for slot in out.iter_mut().skip(board.len()) {
        *slot = deck.deal_card(rng).ok_or_else(|| {
            EquityError::Computation("Not enough cards left to complete the board".into())
        })?;
    }
    Ok(out)
}
