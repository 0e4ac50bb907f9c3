use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{find_duplicate, Card, Rank};
use crate::errors::HandError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    /// Spacing between category bases in [`HandEvaluation::value`].
    pub const BASE: u32 = 1_000_000;

    pub fn base(self) -> u32 {
        self as u32 * Self::BASE
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Best five-card reading of a hand.
///
/// `value` is a total-order key: `category.base()` plus the deciding ranks
/// packed as base-16 digits, most significant first. Five digits of at most
/// 14 stay below 1,000,000, so categories never overlap and two hands compare
/// equal exactly when category and deciding ranks match, whatever the suits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: Category,
    pub value: u32,
    // kickers: ordered high -> low for tiebreaks, zero padded
    pub kickers: [u8; 5],
}

impl HandEvaluation {
    fn new(category: Category, kickers: [u8; 5]) -> Self {
        let packed = kickers.iter().fold(0u32, |acc, &k| acc * 16 + k as u32);
        Self {
            category,
            value: category.base() + packed,
            kickers,
        }
    }

    pub fn description(&self) -> String {
        let name = |v: u8| Rank::from_u8(v).map(Rank::to_char).unwrap_or('?');
        let k = &self.kickers;
        match self.category {
            Category::RoyalFlush => "Royal Flush".to_string(),
            Category::StraightFlush => format!("Straight Flush, {} high", name(k[0])),
            Category::FourOfAKind => format!("Four {}s", name(k[0])),
            Category::FullHouse => format!("Full House, {}s over {}s", name(k[0]), name(k[1])),
            Category::Flush => format!("Flush, {} high", name(k[0])),
            Category::Straight => format!("Straight, {} high", name(k[0])),
            Category::ThreeOfAKind => format!("Three {}s", name(k[0])),
            Category::TwoPair => format!("Two Pair, {}s and {}s", name(k[0]), name(k[1])),
            Category::OnePair => format!("Pair of {}s", name(k[0])),
            Category::HighCard => format!("{} high", name(k[0])),
        }
    }
}

impl Ord for HandEvaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for HandEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Evaluates 5, 6 or 7 distinct cards.
pub fn evaluate_hand(cards: &[Card]) -> Result<HandEvaluation, HandError> {
    if let Some(dup) = find_duplicate(cards) {
        return Err(HandError::DuplicateCard(dup));
    }
    match cards.len() {
        5 => Ok(evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]])),
        6 => Ok(best_of(cards, &SUBSETS_6)),
        7 => Ok(best_of(cards, &SUBSETS_7)),
        n => Err(HandError::CardCount(n)),
    }
}

/// Hot-path variant for hole cards plus a full board.
pub fn evaluate_seven(cards: &[Card; 7]) -> HandEvaluation {
    best_of(cards, &SUBSETS_7)
}

pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    a.value.cmp(&b.value)
}

/// Indices of every hand sharing the maximum value.
pub fn determine_winners(hands: &[HandEvaluation]) -> Vec<usize> {
    let Some(best) = hands.iter().map(|h| h.value).max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, h)| h.value == best)
        .map(|(i, _)| i)
        .collect()
}

/// True when `a` strictly beats `b`.
pub fn hand_beats(a: &[Card], b: &[Card]) -> Result<bool, HandError> {
    Ok(compare_hands(&evaluate_hand(a)?, &evaluate_hand(b)?).is_gt())
}

const fn subsets<const N: usize, const K: usize>() -> [[usize; 5]; K] {
    let mut out = [[0usize; 5]; K];
    let mut idx = [0usize, 1, 2, 3, 4];
    let mut k = 0;
    while k < K {
        out[k] = idx;
        k += 1;
        // advance to the next lexicographic 5-subset of 0..N
        let mut i = 5;
        while i > 0 {
            i -= 1;
            if idx[i] < N - 5 + i {
                idx[i] += 1;
                let mut j = i + 1;
                while j < 5 {
                    idx[j] = idx[j - 1] + 1;
                    j += 1;
                }
                break;
            }
        }
    }
    out
}

const SUBSETS_6: [[usize; 5]; 6] = subsets::<6, 6>();
const SUBSETS_7: [[usize; 5]; 21] = subsets::<7, 21>();

fn best_of(cards: &[Card], table: &[[usize; 5]]) -> HandEvaluation {
    let pick = |idx: &[usize; 5]| {
        evaluate_five(&[
            cards[idx[0]],
            cards[idx[1]],
            cards[idx[2]],
            cards[idx[3]],
            cards[idx[4]],
        ])
    };
    let mut best = pick(&table[0]);
    for idx in &table[1..] {
        let eval = pick(idx);
        if eval.value > best.value {
            best = eval;
        }
    }
    best
}

pub fn evaluate_five(cards: &[Card; 5]) -> HandEvaluation {
    let mut ranks = [0u8; 5];
    for (slot, c) in ranks.iter_mut().zip(cards) {
        *slot = c.rank.value();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&ranks);

    // (count, rank) groups, largest group first, then highest rank
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for &r in &ranks {
        if n > 0 && groups[n - 1].1 == r {
            groups[n - 1].0 += 1;
        } else {
            groups[n] = (1, r);
            n += 1;
        }
    }
    groups[..n].sort_unstable_by(|a, b| b.cmp(a));

    match (flush, straight) {
        (true, Some(14)) => return HandEvaluation::new(Category::RoyalFlush, [14, 0, 0, 0, 0]),
        (true, Some(high)) => {
            return HandEvaluation::new(Category::StraightFlush, [high, 0, 0, 0, 0])
        }
        _ => {}
    }

    match (groups[0].0, groups[1].0) {
        (4, _) => HandEvaluation::new(
            Category::FourOfAKind,
            [groups[0].1, groups[1].1, 0, 0, 0],
        ),
        (3, 2) => HandEvaluation::new(Category::FullHouse, [groups[0].1, groups[1].1, 0, 0, 0]),
        _ if flush => HandEvaluation::new(Category::Flush, ranks),
        _ if straight.is_some() => {
            HandEvaluation::new(Category::Straight, [straight.unwrap_or(0), 0, 0, 0, 0])
        }
        (3, _) => HandEvaluation::new(
            Category::ThreeOfAKind,
            [groups[0].1, groups[1].1, groups[2].1, 0, 0],
        ),
        (2, 2) => HandEvaluation::new(
            Category::TwoPair,
            [groups[0].1, groups[1].1, groups[2].1, 0, 0],
        ),
        (2, _) => HandEvaluation::new(
            Category::OnePair,
            [groups[0].1, groups[1].1, groups[2].1, groups[3].1, 0],
        ),
        _ => HandEvaluation::new(Category::HighCard, ranks),
    }
}

/// High card of a five-rank straight; the wheel (A-2-3-4-5) plays as five high.
fn straight_high(desc: &[u8; 5]) -> Option<u8> {
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if desc[0] - desc[4] == 4 {
        return Some(desc[0]);
    }
    if *desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}
