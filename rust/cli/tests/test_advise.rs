mod helpers;

use helpers::cli_runner::CliRunner;

fn advise(args: &[&str]) -> serde_json::Value {
    let cli = CliRunner::new().expect("cli runner");
    let mut full = vec!["advise"];
    full.extend_from_slice(args);
    let res = cli.run(&full);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    res.json()
}

#[test]
fn sixteen_against_ten_flips_at_zero() {
    let cold = advise(&["--hand", "10,6", "--dealer", "10", "--tc", "-1"]);
    assert_eq!(cold["basic_strategy"], "hit");
    assert_eq!(cold["recommended"], "hit");
    assert_eq!(cold["deviation"], false);

    let neutral = advise(&["--hand", "10,6", "--dealer", "10", "--tc", "0"]);
    assert_eq!(neutral["recommended"], "stand");
    assert_eq!(neutral["deviation"], true);
}

#[test]
fn soft_hand_is_classified() {
    let v = advise(&["--hand", "A,7", "--dealer", "9"]);
    assert_eq!(v["total"], 18);
    assert_eq!(v["soft"], true);
    assert_eq!(v["class"], "soft 18");
    assert_eq!(v["hand"], "A,7");
}

#[test]
fn insurance_and_bet_follow_the_count() {
    let v = advise(&[
        "--hand", "10,7", "--dealer", "A", "--tc", "4", "--bankroll", "1000",
    ]);
    assert_eq!(v["insurance"], true);
    assert_eq!(v["optimal_bet"], 40);
    assert_eq!(v["bet"], 40);
    assert_eq!(v["heat"], 2);
}

#[test]
fn big_bet_at_low_count_draws_heat() {
    let v = advise(&["--hand", "9,7", "--dealer", "6", "--tc", "0", "--bet", "100"]);
    assert_eq!(v["optimal_bet"], 10);
    assert_eq!(v["heat"], 15);
}

#[test]
fn bad_cards_are_rejected() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["advise", "--hand", "10,Z", "--dealer", "5"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Z"));

    let res = cli.run(&["advise", "--hand", "10,6", "--dealer", "5,6"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("single card"));

    let res = cli.run(&["advise", "--hand", "10", "--dealer", "5"]);
    assert_eq!(res.exit_code, 2);
}
