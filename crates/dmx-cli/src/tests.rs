use clap::Parser;

use super::*;

#[test]
fn parses_category_with_defaults() {
    let cli = Cli::try_parse_from(["dmx-cli", "lego"]).expect("expected valid cli args");

    assert_eq!(cli.category, "lego");
    assert_eq!(cli.out, std::path::PathBuf::from("result.csv"));
    assert_eq!(cli.regions, ["RU-MOW", "RU-SPE"]);
}

#[test]
fn category_is_required() {
    let result = Cli::try_parse_from(["dmx-cli"]);
    assert!(result.is_err(), "expected missing category to be rejected");
}

#[test]
fn parses_out_override() {
    let cli = Cli::try_parse_from(["dmx-cli", "lego", "--out", "toys.csv"])
        .expect("expected valid cli args");
    assert_eq!(cli.out, std::path::PathBuf::from("toys.csv"));
}

#[test]
fn region_flags_replace_defaults() {
    let cli = Cli::try_parse_from(["dmx-cli", "lego", "--region", "RU-NSK"])
        .expect("expected valid cli args");
    assert_eq!(cli.regions, ["RU-NSK"]);
}

#[test]
fn region_flag_is_repeatable() {
    let cli = Cli::try_parse_from([
        "dmx-cli", "lego", "--region", "RU-MOW", "--region", "RU-NSK",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.regions, ["RU-MOW", "RU-NSK"]);
}
