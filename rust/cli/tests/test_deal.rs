mod helpers;

use helpers::cli_runner::CliRunner;

#[test]
fn deal_is_reproducible_from_seed() {
    let cli = CliRunner::new().expect("cli runner");
    let a = cli.run(&["deal", "--seed", "99"]);
    let b = cli.run(&["deal", "--seed", "99"]);
    assert_eq!(a.exit_code, 0);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Seed: 99 (6 decks, hi-lo)"));
}

#[test]
fn deal_hides_the_hole_card() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["deal", "--seed", "1"]);
    assert_eq!(res.exit_code, 0);
    let dealer = res
        .stdout
        .lines()
        .find(|l| l.starts_with("Dealer: "))
        .expect("dealer line");
    assert!(dealer.ends_with(" ??"));
}

#[test]
fn deal_shows_advice_or_blackjack() {
    let cli = CliRunner::new().expect("cli runner");
    for seed in 0..10u64 {
        let s = seed.to_string();
        let res = cli.run(&["deal", "--seed", &s, "--decks", "2"]);
        assert_eq!(res.exit_code, 0);
        assert!(
            res.stdout.contains("Recommended: ") || res.stdout.contains("Blackjack!"),
            "seed {}: {}",
            seed,
            res.stdout
        );
    }
}

#[test]
fn seed_from_environment_is_used() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(&["deal"], &[("BJTRAINER_SEED", "1234")]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("Seed: 1234 "));
}

#[test]
fn system_from_environment_is_reported() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(&["deal", "--seed", "8"], &[("BJTRAINER_SYSTEM", "ko")]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains(", ko)"));
}
