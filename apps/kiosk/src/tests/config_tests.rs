use std::fs;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn config_file_overlays_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tour.toml");
    fs::write(
        &path,
        r#"
catalog = "showroom.toml"

[tour]
waiting_delay_ms = 3000
manual_close_policy = "hold"
showcase_features = true
"#,
    )
    .expect("write config");

    let config = load_config(Some(&path)).expect("config loads");
    assert_eq!(config.catalog_path, Some(PathBuf::from("showroom.toml")));
    assert_eq!(config.settings.waiting_delay_ms, 3000);
    assert_eq!(config.settings.manual_close_policy, ManualClosePolicy::Hold);
    assert!(config.settings.showcase_features);
    assert_eq!(
        config.settings.slideshow_frame_ms,
        TourSettings::default().slideshow_frame_ms
    );
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    let err = load_config(Some(&missing)).expect_err("missing config is an error");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tour.toml");
    fs::write(&path, "[tour]\nwaiting_delay_ms = \"soon\"\n").expect("write config");
    assert!(load_config(Some(&path)).is_err());
}

#[test]
fn env_overrides_win_over_the_file() {
    let mut config = KioskConfig::default();
    apply_env_overrides(
        &mut config,
        vars(&[
            ("TOUR__WAITING_DELAY_MS", "1500"),
            ("TOUR__MANUAL_CLOSE_POLICY", "HOLD"),
            ("TOUR__SHOWCASE_FEATURES", "true"),
            ("TOUR__LANDING_URL", "http://kiosk.local/"),
            ("TOUR__CATALOG", "/srv/catalog.json"),
            ("PATH", "/usr/bin"),
        ]),
    );

    assert_eq!(config.settings.waiting_delay_ms, 1500);
    assert_eq!(config.settings.manual_close_policy, ManualClosePolicy::Hold);
    assert!(config.settings.showcase_features);
    assert_eq!(config.settings.landing_url, "http://kiosk.local/");
    assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
}

#[test]
fn bad_env_values_keep_the_previous_setting() {
    let mut config = KioskConfig::default();
    apply_env_overrides(
        &mut config,
        vars(&[
            ("TOUR__SLIDESHOW_FRAME_MS", "fast"),
            ("TOUR__SHOWCASE_FEATURES", "maybe"),
            ("TOUR__NOT_A_SETTING", "1"),
        ]),
    );
    assert_eq!(config, KioskConfig::default());
}

#[test]
fn time_scale_is_bounded() {
    assert_eq!(parse_time_scale("0.1"), Ok(0.1));
    assert_eq!(parse_time_scale(" 2 "), Ok(2.0));
    assert!(parse_time_scale("1e20").is_err());
    assert!(parse_time_scale("0").is_err());
    assert!(parse_time_scale("-1").is_err());
    assert!(parse_time_scale("NaN").is_err());
    assert!(parse_time_scale("fast").is_err());
}
