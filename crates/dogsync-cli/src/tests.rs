use std::io::Write as _;

use super::*;

#[test]
fn parses_sync_command_with_file() {
    let cli = Cli::try_parse_from(["dogsync-cli", "sync", "--file", "entry.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Sync { ref file, dry_run: false } if file == Path::new("entry.json")
    ));
}

#[test]
fn parses_sync_dry_run_flag() {
    let cli = Cli::try_parse_from(["dogsync-cli", "sync", "--file", "entry.json", "--dry-run"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Sync { dry_run: true, .. }));
}

#[test]
fn sync_requires_file() {
    assert!(Cli::try_parse_from(["dogsync-cli", "sync"]).is_err());
}

#[test]
fn parses_check_env_command() {
    let cli = Cli::try_parse_from(["dogsync-cli", "check-env"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::CheckEnv));
}

#[test]
fn dry_run_report_shows_handle_and_payload() {
    let raw = serde_json::json!({"Id": "24-108", "DogName": "Maple"});
    let prepared = prepare(&raw, &TracingObserver).expect("valid payload");
    let report = serde_json::to_value(dry_run_report(&prepared)).unwrap();

    assert_eq!(report["handle"], "dog-24-108");
    assert_eq!(report["record"]["entryId"], "24-108");
    assert_eq!(report["product"]["title"], "Maple");
    assert_eq!(report["product"]["handle"], "dog-24-108");
}

#[test]
fn read_payload_rejects_invalid_json() {
    let path = std::env::temp_dir().join(format!("dogsync-cli-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"{nope").unwrap();

    let err = read_payload(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("not valid JSON"), "got: {err}");
}
