use std::ffi::OsString;
use std::fs;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use stencil_config::{CliOverrides, ConfigError, ConfigRequest, load_settings};
use stencil_messages::{MessageCatalog, codes};

fn workspace() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let base = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("utf-8 temp dir");
    (temp_dir, base)
}

#[test]
fn malformed_file_stops_before_validation() {
    let (_guard, base) = workspace();
    let path = base.join("broken.yaml");
    fs::write(&path, "log:\n  level: [debug\n").expect("write malformed config");

    let request = ConfigRequest {
        base_dir: base.clone(),
        overrides: CliOverrides {
            config: Some(path.to_string()),
            log_max_size: Some("0".to_owned()),
            ..CliOverrides::default()
        },
        environment: Vec::new(),
    };

    let error = load_settings(&request).expect_err("loading must fail");
    match &error {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(error.message().code(), codes::ERR_PARSE_CONFIG_FILE);
}

#[test]
fn config_path_from_environment_is_honoured() {
    let (_guard, base) = workspace();
    let missing = base.join("absent.yaml");

    let request = ConfigRequest {
        base_dir: base,
        overrides: CliOverrides::default(),
        environment: vec![(
            OsString::from(stencil_config::CONFIG_PATH_ENV_VAR),
            OsString::from(missing.as_str()),
        )],
    };

    let error = load_settings(&request).expect_err("missing file must fail");
    assert!(
        matches!(error, ConfigError::Read { ref path, .. } if path == &missing),
        "unexpected error: {error:?}"
    );
}

#[test]
fn aggregated_validation_renders_one_line_per_field() {
    let (_guard, base) = workspace();
    let path = base.join("stencil.yaml");
    fs::write(
        &path,
        "daemon: perhaps\nlog:\n  maxDays: 400\n  maxBackups: 0\nserver:\n  readTimeout: slow\n",
    )
    .expect("write config");

    let request = ConfigRequest {
        base_dir: base,
        overrides: CliOverrides {
            config: Some(path.to_string()),
            ..CliOverrides::default()
        },
        environment: Vec::new(),
    };

    let error = load_settings(&request).expect_err("validation must fail");
    let catalog = MessageCatalog::standard();
    let headline = catalog.render(&error.message());
    assert_eq!(
        headline,
        "stencil-400006: validate config failed. 4 invalid value(s):"
    );

    let lines: Vec<String> = error
        .details()
        .iter()
        .map(|message| catalog.render(message))
        .collect();
    assert_eq!(
        lines,
        vec![
            "stencil-401001: daemon must be either true or false, perhaps is not valid.",
            "stencil-401007: log max days must be between 1 and 365, 400 is not valid.",
            "stencil-401008: log max backups must be between 1 and 1000, 0 is not valid.",
            "stencil-401016: server.readTimeout must be an integer, slow is not valid.",
        ]
    );
}

#[test]
fn wrong_shaped_values_are_reported_by_validation() {
    let (_guard, base) = workspace();
    let path = base.join("stencil.yaml");
    fs::write(
        &path,
        "log:\n  level: loud\n  maxSize: 1.5\nserver:\n  addr: [a]\n",
    )
    .expect("write config");

    let request = ConfigRequest {
        base_dir: base,
        overrides: CliOverrides {
            config: Some(path.to_string()),
            ..CliOverrides::default()
        },
        environment: Vec::new(),
    };

    let error = load_settings(&request).expect_err("validation must fail");
    assert_eq!(error.message().code(), codes::ERR_VALIDATE_CONFIG);

    let catalog = MessageCatalog::standard();
    let lines: Vec<String> = error
        .details()
        .iter()
        .map(|message| catalog.render(message))
        .collect();
    assert_eq!(
        lines,
        vec![
            "stencil-401004: log level must be one of [debug, info, warn, error, fatal], loud is not valid.",
            "stencil-401016: log.maxSize must be an integer, 1.5 is not valid.",
            "stencil-401011: server addr must be formatted as host:port, [a] is not a valid address.",
        ]
    );
}
