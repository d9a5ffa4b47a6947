use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.admin.owner = Some("from-file".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        admin_owner: Some("from-cli".to_string()),
        logging: LoggingOverrides {
            log_level: Some("debug".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.admin.owner, "from-cli");
}

#[test]
fn defaults_are_usable() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
    assert_eq!(settings.database.max_connections.get(), DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(settings.admin.owner, DEFAULT_OWNER);
    assert!(settings.admin.csrf_secret.is_none());
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn invalid_values_name_the_key() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    match Settings::from_raw(raw) {
        Err(LoadError::Invalid { key, .. }) => assert_eq!(key, "logging.level"),
        other => panic!("unexpected result: {other:?}"),
    }

    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);
    match Settings::from_raw(raw) {
        Err(LoadError::Invalid { key, .. }) => assert_eq!(key, "database.max_connections"),
        other => panic!("unexpected result: {other:?}"),
    }

    let mut raw = RawSettings::default();
    raw.admin.csrf_secret = Some("short".to_string());
    match Settings::from_raw(raw) {
        Err(LoadError::Invalid { key, .. }) => assert_eq!(key, "admin.csrf_secret"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn blank_owner_is_rejected() {
    let mut raw = RawSettings::default();
    raw.admin.owner = Some("   ".to_string());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "admin.owner",
            ..
        })
    ));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        logging: LoggingOverrides {
            log_json: Some(true),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["lectern"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));

    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_reorder_arguments() {
    let args = CliArgs::parse_from([
        "lectern",
        "reorder",
        "--endpoint",
        "/modules/order",
        "--base-url",
        "http://127.0.0.1:3001/",
        "--labels",
        "c",
        "a",
        "b",
    ]);

    match args.command.expect("reorder command") {
        Command::Reorder(reorder) => {
            assert_eq!(reorder.endpoint, "/modules/order");
            assert_eq!(
                reorder.base_url.as_ref().map(Url::as_str),
                Some("http://127.0.0.1:3001/")
            );
            assert!(reorder.labels);
            assert_eq!(reorder.ids, ["c", "a", "b"]);
        }
        other => panic!("wrong command parsed: {other:?}"),
    }
}

#[test]
fn reorder_requires_identifiers() {
    let result = CliArgs::try_parse_from(["lectern", "reorder", "--endpoint", "/content/order"]);
    assert!(result.is_err());
}
