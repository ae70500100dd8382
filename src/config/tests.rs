use super::*;

fn environment(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect(),
    )
}

#[test]
fn defaults_apply_without_overrides() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert!(settings.template.is_none());
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert!(settings.artifact.directory.is_none());
    assert_eq!(
        settings.viewer.cleanup_delay,
        Duration::from_millis(DEFAULT_CLEANUP_DELAY_MS)
    );
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.template = Some(PathBuf::from("from-env.html"));
    raw.logging.level = Some("info".to_string());

    let cli = CliArgs::parse_from([
        "mdp",
        "--pipe",
        "-t",
        "from-flag.html",
        "--log-level",
        "debug",
    ]);

    raw.apply_cli_overrides(&cli);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.template, Some(PathBuf::from("from-flag.html")));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn environment_template_applies_without_flag() {
    let cli = CliArgs::parse_from(["mdp", "--pipe"]);
    let settings = load_with_environment(&cli, environment(&[("MDP_TEMPLATE", "site.html")]))
        .expect("valid settings");

    assert_eq!(settings.template, Some(PathBuf::from("site.html")));
}

#[test]
fn template_flag_beats_environment() {
    let cli = CliArgs::parse_from(["mdp", "--pipe", "-t", "mine.html"]);
    let settings = load_with_environment(&cli, environment(&[("MDP_TEMPLATE", "site.html")]))
        .expect("valid settings");

    assert_eq!(settings.template, Some(PathBuf::from("mine.html")));
}

#[test]
fn empty_environment_template_counts_as_unset() {
    let cli = CliArgs::parse_from(["mdp", "--pipe"]);
    let settings = load_with_environment(&cli, environment(&[("MDP_TEMPLATE", "")]))
        .expect("valid settings");

    assert!(settings.template.is_none());
}

#[test]
fn nested_environment_keys_are_read() {
    let cli = CliArgs::parse_from(["mdp", "--pipe"]);
    let settings = load_with_environment(
        &cli,
        environment(&[
            ("MDP_VIEWER__CLEANUP_DELAY_MS", "250"),
            ("MDP_LOGGING__JSON", "true"),
        ]),
    )
    .expect("valid settings");

    assert_eq!(settings.viewer.cleanup_delay, Duration::from_millis(250));
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn single_underscore_prefix_reaches_artifact_directory() {
    let cli = CliArgs::parse_from(["mdp", "--pipe"]);
    let settings = load_with_environment(
        &cli,
        environment(&[
            ("MDP_ARTIFACT__DIRECTORY", "/var/tmp/mdp"),
            ("MDP__TEMPLATE", "double.html"),
        ]),
    )
    .expect("valid settings");

    assert_eq!(
        settings.artifact.directory,
        Some(PathBuf::from("/var/tmp/mdp"))
    );
    assert!(settings.template.is_none());
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let cli = CliArgs::parse_from(["mdp", "--pipe", "--log-json", "true"]);

    raw.apply_cli_overrides(&cli);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn parse_file_arguments() {
    let args = CliArgs::parse_from(["mdp", "--file", "docs/readme.md", "-s"]);

    assert_eq!(args.file, Some(PathBuf::from("docs/readme.md")));
    assert!(!args.pipe);
    assert!(args.skip_preview);
    assert!(args.template.is_none());
}

#[test]
fn parse_pipe_with_display_name() {
    let args = CliArgs::parse_from(["mdp", "--pipe", "--file", "notes.md"]);

    assert!(args.pipe);
    assert_eq!(args.file, Some(PathBuf::from("notes.md")));
}

#[test]
fn missing_input_is_a_usage_error() {
    let err = CliArgs::try_parse_from(["mdp", "-s"]).unwrap_err();
    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}
