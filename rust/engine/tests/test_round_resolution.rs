use bjtrainer_engine::cards::parse_cards;
use bjtrainer_engine::dealer::{DealerPolicy, DealerState};
use bjtrainer_engine::hand::{classify, evaluate, Hand, HandClass};
use bjtrainer_engine::resolver::{resolve, resolve_hands, Outcome};

fn outcome(player: &str, dealer: &str) -> Outcome {
    resolve(&parse_cards(player).unwrap(), &parse_cards(dealer).unwrap(), 10).outcome
}

#[test]
fn resolution_order_is_respected() {
    // player bust loses even when the dealer also busts
    assert_eq!(outcome("10,6,9", "10,6,8"), Outcome::Lose);
    assert_eq!(outcome("10,6", "10,6,8"), Outcome::Win);
    assert_eq!(outcome("A,Q", "A,J"), Outcome::Push);
    assert_eq!(outcome("A,Q", "10,10"), Outcome::Blackjack);
    assert_eq!(outcome("10,5,6", "A,10"), Outcome::Lose);
    assert_eq!(outcome("10,8", "10,7"), Outcome::Win);
    assert_eq!(outcome("10,7", "10,8"), Outcome::Lose);
    assert_eq!(outcome("10,7", "9,8"), Outcome::Push);
}

#[test]
fn payouts_include_stake() {
    let r = resolve(&parse_cards("A,K").unwrap(), &parse_cards("9,9").unwrap(), 40);
    assert_eq!(r.payout(), 100.0);
    assert_eq!(r.net(), 60.0);
    let r = resolve(&parse_cards("9,9").unwrap(), &parse_cards("9,9").unwrap(), 40);
    assert_eq!(r.payout(), 40.0);
    assert_eq!(r.net(), 0.0);
}

#[test]
fn doubled_hand_settles_at_doubled_wager() {
    let mut hand = Hand::with_cards(10, &parse_cards("6,5").unwrap());
    hand.double_down(parse_cards("K").unwrap()[0]).unwrap();
    let s = resolve_hands(&[hand], &parse_cards("10,8").unwrap());
    assert_eq!(s.outcomes[0].wager, 20);
    assert_eq!(s.net, 20.0);
}

#[test]
fn dealer_walks_states_to_standing() {
    let policy = DealerPolicy::default();
    let mut cards = parse_cards("A,6").unwrap();
    let draws = parse_cards("A,9").unwrap();
    let mut draws = draws.into_iter();
    let mut state = DealerState::AwaitingDecision;
    loop {
        state = policy.next_state(state, &cards);
        match state {
            DealerState::Drawing => cards.push(draws.next().unwrap()),
            DealerState::Standing => break,
            DealerState::AwaitingDecision => {}
        }
    }
    // soft 17 -> soft 18 stands
    assert_eq!(cards.len(), 3);
    let v = evaluate(&cards);
    assert_eq!(v.total, 18);
    assert!(v.is_soft);
}

#[test]
fn classification_feeds_strategy_shapes() {
    assert_eq!(classify(&parse_cards("A,A").unwrap()), HandClass::Pair(11));
    assert_eq!(classify(&parse_cards("A,2,3").unwrap()), HandClass::Soft(16));
    assert_eq!(classify(&parse_cards("A,6,10").unwrap()), HandClass::Hard(17));
}
