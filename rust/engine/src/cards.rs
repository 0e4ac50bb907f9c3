use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CardParseError;

/// Represents one of the four suits in a standard 52-card deck.
///
/// Text input may use either the glyph (`♠`) or the ASCII letter (`s`);
/// both collapse to the same variant in [`Suit::from_char`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            '♠' | 's' => Some(Suit::Spades),
            '♥' | 'h' => Some(Suit::Hearts),
            '♦' | 'd' => Some(Suit::Diamonds),
            '♣' | 'c' => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    /// Ascending order, Two first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn from_u8(v: u8) -> Option<Rank> {
        match v {
            2..=14 => Some(Rank::ALL[(v - 2) as usize]),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Represents a single playing card with a suit and rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index in `0..52`, suit-major.
    pub fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank.value() as usize - 2)
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.glyph())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardParseError::BadLength(s.to_string()));
        };
        let rank = Rank::from_char(r).ok_or(CardParseError::BadRank(r))?;
        let suit = Suit::from_char(su).ok_or(CardParseError::BadSuit(su))?;
        Ok(Card { rank, suit })
    }
}

/// Parses a list of card tokens such as `["A♠", "Kh"]`.
pub fn parse_cards<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Card>, CardParseError> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}

/// Parses a run of concatenated cards such as `"AsKh"` or `"A♠ K♥ Q♦"`.
pub fn parse_card_run(s: &str) -> Result<Vec<Card>, CardParseError> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    if chars.len() % 2 != 0 {
        return Err(CardParseError::BadLength(s.to_string()));
    }
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse())
        .collect()
}

const fn build_deck() -> [Card; 52] {
    let mut deck = [Card::new(Rank::Two, Suit::Spades); 52];
    let mut s = 0;
    while s < 4 {
        let mut r = 0;
        while r < 13 {
            deck[s * 13 + r] = Card::new(Rank::ALL[r], Suit::ALL[s]);
            r += 1;
        }
        s += 1;
    }
    deck
}

/// The canonical 52-card deck. `FULL_DECK[c.index()] == c` for every card.
pub const FULL_DECK: [Card; 52] = build_deck();

pub fn full_deck() -> Vec<Card> {
    FULL_DECK.to_vec()
}

/// Set of cards packed into the low 52 bits of a `u64`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CardMask(u64);

impl CardMask {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn of(cards: &[Card]) -> Self {
        cards.iter().fold(Self::empty(), |m, &c| m.with(c))
    }

    pub fn with(self, card: Card) -> Self {
        Self(self.0 | card.bit())
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= card.bit();
    }

    pub fn contains(self, card: Card) -> bool {
        self.0 & card.bit() != 0
    }

    pub fn intersects(self, other: CardMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: CardMask) -> Self {
        Self(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Returns the first card appearing twice in `cards`, if any.
pub fn find_duplicate(cards: &[Card]) -> Option<Card> {
    let mut seen = CardMask::empty();
    for &c in cards {
        if seen.contains(c) {
            return Some(c);
        }
        seen.insert(c);
    }
    None
}
