use pokerlab_engine::cards::{Card, Rank as R, Suit as S, parse_card_run};
use pokerlab_engine::hand::{Category, compare_hands, determine_winners, evaluate_hand, hand_beats};

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

fn eval(s: &str) -> pokerlab_engine::hand::HandEvaluation {
    evaluate_hand(&parse_card_run(s).unwrap()).unwrap()
}

#[test]
fn detects_royal_flush() {
    let cards = [
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::King),
        c(S::Hearts, R::Ace),
        c(S::Clubs, R::Two),
        c(S::Diamonds, R::Three),
    ];
    let hs = evaluate_hand(&cards).unwrap();
    assert_eq!(hs.category, Category::RoyalFlush);
    assert_eq!(hs.value, 10_000_000 + 14 * 16u32.pow(4));
}

#[test]
fn category_ordering_is_correct() {
    // Four of a kind vs full house
    let quads = [
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::Ace),
        c(S::Hearts, R::Ace),
        c(S::Spades, R::Ace),
        c(S::Clubs, R::King),
        c(S::Diamonds, R::Queen),
        c(S::Hearts, R::Two),
    ];
    let full_house = [
        c(S::Clubs, R::King),
        c(S::Diamonds, R::King),
        c(S::Hearts, R::King),
        c(S::Clubs, R::Queen),
        c(S::Diamonds, R::Queen),
        c(S::Hearts, R::Two),
        c(S::Spades, R::Three),
    ];
    let a = evaluate_hand(&quads).unwrap();
    let b = evaluate_hand(&full_house).unwrap();
    assert_eq!(a.category, Category::FourOfAKind);
    assert_eq!(b.category, Category::FullHouse);
    assert!(compare_hands(&a, &b).is_gt());
}

#[test]
fn every_category_beats_the_one_below() {
    let ladder = [
        "AsKdQc9h7s", // high card
        "2s2dQc9h7s", // pair
        "2s2d3c3h7s", // two pair
        "2s2d2c9h7s", // trips
        "Ah2d3c4h5s", // wheel
        "2h7h9hJhKh", // flush
        "2s2d2c3h3s", // full house
        "2s2d2c2h3s", // quads
        "9h8h7h6h5h", // straight flush
        "AhKhQhJhTh", // royal
    ];
    let evals: Vec<_> = ladder.iter().map(|s| eval(s)).collect();
    for (i, e) in evals.iter().enumerate() {
        assert_eq!(e.category as u32, i as u32 + 1, "{}", ladder[i]);
        assert_eq!(e.value / 1_000_000, i as u32 + 1);
    }
    for w in evals.windows(2) {
        assert!(compare_hands(&w[1], &w[0]).is_gt());
    }
}

#[test]
fn kickers_decide_within_a_category() {
    assert!(hand_beats(
        &parse_card_run("AsAdKc9h7s").unwrap(),
        &parse_card_run("AhAcQc9d7d").unwrap()
    )
    .unwrap());
    // two pair: higher second pair wins over better kicker
    assert!(eval("KsKdQcQh2s") > eval("KhKcJcJhAs"));
    // full house ranks trips before pair
    assert!(eval("3s3d3c2h2s") > eval("2s2d2cAhAs"));
    // flush compares all five
    assert!(eval("AhKh9h6h3h") > eval("AcKc9c6c2c"));
}

#[test]
fn suits_never_break_ties() {
    let a = eval("AsKdQc9h7s");
    let b = eval("AhKcQd9s7c");
    assert_eq!(a.value, b.value);
    assert!(compare_hands(&a, &b).is_eq());
    assert!(!hand_beats(
        &parse_card_run("AsKdQc9h7s").unwrap(),
        &parse_card_run("AhKcQd9s7c").unwrap()
    )
    .unwrap());
}

#[test]
fn six_and_seven_cards_pick_best_five() {
    let six = eval("9h8h7h6h5hAs");
    assert_eq!(six.category, Category::StraightFlush);
    assert_eq!(six.kickers[0], 9);

    // board pair plus hole pair makes two pair, best kicker kept
    let seven = eval("KsKd7c7h2sAd3c");
    assert_eq!(seven.category, Category::TwoPair);
    assert_eq!(seven.kickers, [13, 7, 14, 0, 0]);

    // seven-card straight picks the highest run
    let run = eval("4s5d6c7h8s9dTc");
    assert_eq!(run.category, Category::Straight);
    assert_eq!(run.kickers[0], 10);
}

#[test]
fn winners_include_every_tied_hand() {
    let board = "AsKdQcJhTs";
    let hands: Vec<_> = ["2c3c", "4d5d", "AhAd"]
        .iter()
        .map(|h| eval(&format!("{}{}", h, board)))
        .collect();
    // Broadway on board: trip aces still only make a straight
    assert_eq!(determine_winners(&hands), vec![0, 1, 2]);

    let hands = [eval("AsAdKc9h7s"), eval("AhAcQc9d7d"), eval("AsAdKc9h7s")];
    assert_eq!(determine_winners(&hands), vec![0, 2]);
    assert!(determine_winners(&[]).is_empty());
}

#[test]
fn bad_inputs_are_rejected() {
    assert!(evaluate_hand(&parse_card_run("AsKs").unwrap()).is_err());
    assert!(evaluate_hand(&parse_card_run("AsKsQsJsTs9s8s7s").unwrap()).is_err());
    assert!(evaluate_hand(&parse_card_run("AsAsQsJsTs").unwrap()).is_err());
}

#[test]
fn description_reads_naturally() {
    assert_eq!(eval("AhKhQhJhTh").description(), "Royal Flush");
    assert_eq!(eval("KsKdKc2h2s").description(), "Full House, Ks over 2s");
    assert_eq!(eval("Ah2d3c4h5s").description(), "Straight, 5 high");
    assert_eq!(eval("AsKdQc9h7s").description(), "A high");
}
