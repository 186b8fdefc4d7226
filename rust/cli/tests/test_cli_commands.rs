mod helpers;

use helpers::cli_runner::CliRunner;

const COMMANDS: &[&str] = &["deal", "sim", "drill", "advise", "stats", "cfg"];

#[test]
fn help_lists_every_command() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["--help"]);
    assert_eq!(res.exit_code, 0);
    for c in COMMANDS {
        assert!(res.stdout.contains(c), "help should mention {c}: {}", res.stdout);
    }
}

#[test]
fn version_exits_zero() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("bjtrainer"));
}

#[test]
fn missing_command_prints_usage() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&[]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Usage: bjtrainer <command> [options]"));
    assert!(res.stdout.is_empty());
}

#[test]
fn out_of_range_decks_is_a_parse_error() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["deal", "--decks", "9"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("--decks"));
}

#[test]
fn library_entry_point_matches_binary() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = bjtrainer_cli::run(["bjtrainer", "deal", "--seed", "5"], &mut out, &mut err);
    assert_eq!(code, bjtrainer_cli::EXIT_SUCCESS);

    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["deal", "--seed", "5"]);
    assert_eq!(res.exit_code, 0);
    assert_eq!(res.stdout, String::from_utf8(out).unwrap());
}

#[test]
fn diagnostics_stay_off_stdout() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(
        &["sim", "--rounds", "20", "--seed", "3"],
        &[("BJTRAINER_LOG", "debug")],
    );
    assert_eq!(res.exit_code, 0);
    // stdout stays parseable JSON while debug events go to stderr
    let json = res.json();
    assert_eq!(json["rounds"], 20);
    assert!(res.stderr.contains("round settled"));
}
