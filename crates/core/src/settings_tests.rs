// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

fn store() -> (TempDir, FileSettings) {
    let dir = TempDir::new().unwrap();
    let settings = FileSettings::new(dir.path().join("nested/settings.toml"));
    (dir, settings)
}

fn parse(text: &str) -> Configuration {
    from_table(&text.parse::<Table>().unwrap())
}

#[test]
fn missing_file_loads_defaults() {
    let (_dir, settings) = store();
    assert_eq!(settings.load(), Configuration::default());
}

#[test]
fn malformed_file_loads_defaults() {
    let (dir, settings) = store();
    std::fs::create_dir_all(dir.path().join("nested")).unwrap();
    std::fs::write(settings.path(), "[paths\ninput_dir = ").unwrap();
    assert_eq!(settings.load(), Configuration::default());
}

#[test]
fn save_then_load_reproduces_every_field() {
    let (_dir, settings) = store();
    let config = Configuration::default()
        .input_dir("/videos/in")
        .output_dir("/videos/out")
        .ffmpeg_dir("/opt/ffmpeg")
        .compression(Compression::Size)
        .encoder(Encoder::Custom("av1_qsv".into()))
        .mode(RunMode::Restart)
        .quick(true)
        .timeout_secs(0)
        .debug(true)
        .show_log(false);

    settings.save(&config).unwrap();
    assert_eq!(settings.load(), config);
}

#[test]
fn paths_keep_surrounding_whitespace() {
    let (_dir, settings) = store();
    let config = Configuration::default()
        .input_dir("/tmp/in ")
        .output_dir(" /tmp/out")
        .ffmpeg_dir(" /opt/ffmpeg ");
    assert!(config.validate().is_ok());

    settings.save(&config).unwrap();
    assert_eq!(settings.load(), config);
}

#[test]
fn custom_name_is_only_written_for_custom_encoder() {
    let config = Configuration::default().input_dir("/in").output_dir("/out");
    let text = to_toml(&config.clone().encoder(Encoder::Cpu)).unwrap();
    assert!(!text.contains("custom_encoder"));
    assert!(text.contains("encoder = \"cpu\""));

    let text = to_toml(&config.encoder(Encoder::Custom("libaom-av1".into()))).unwrap();
    assert!(text.contains("encoder = \"custom\""));
    assert!(text.contains("custom_encoder = \"libaom-av1\""));
}

#[test]
fn document_uses_flat_sections() {
    let text = to_toml(&Configuration::default().input_dir("/in").output_dir("/out")).unwrap();
    assert!(text.contains("[paths]"));
    assert!(text.contains("[options]"));
    assert!(text.contains("[view]"));
    assert!(text.contains("timeout = 7200"));
    assert!(!text.contains("ffmpeg_dir"));
}

#[test]
fn custom_name_ignored_for_other_encoders() {
    let config = parse(
        r#"
        [options]
        encoder = "nvenc"
        custom_encoder = "leftover"
        "#,
    );
    assert_eq!(config.encoder, Encoder::Nvenc);
}

#[yare::parameterized(
    native_true  = { "true",    true },
    native_false = { "false",   false },
    string_true  = { "\"true\"", true },
    string_false = { "\"False\"", false },
    string_one   = { "\"1\"",   true },
    string_zero  = { "\"0\"",   false },
    int_one      = { "1",       true },
    int_zero     = { "0",       false },
)]
fn lenient_booleans(raw: &str, expected: bool) {
    let config = parse(&format!("[options]\nquick = {raw}\n[view]\nshow_log = {raw}\n"));
    assert_eq!(config.quick, expected);
    assert_eq!(config.show_log, expected);
}

#[yare::parameterized(
    garbage_string = { "\"yes\"" },
    other_integer  = { "2" },
    float          = { "1.0" },
)]
fn unparseable_boolean_falls_back(raw: &str) {
    let config = parse(&format!("[view]\nshow_log = {raw}\n"));
    assert!(config.show_log);
}

#[yare::parameterized(
    negative  = { "-5" },
    too_large = { "86401" },
    text      = { "\"soon\"" },
)]
fn bad_timeout_falls_back_to_default(raw: &str) {
    let config = parse(&format!("[options]\ntimeout = {raw}\n"));
    assert_eq!(config.timeout_secs, 7200);
}

#[test]
fn string_timeout_is_accepted() {
    assert_eq!(parse("[options]\ntimeout = \"600\"\n").timeout_secs, 600);
}

#[test]
fn unknown_keywords_keep_defaults_for_that_field_only() {
    let config = parse(
        r#"
        [paths]
        input_dir = "/in"
        [options]
        compression = "extreme"
        mode = "RESTART"
        "#,
    );
    assert_eq!(config.compression, Compression::Standard);
    assert_eq!(config.mode, RunMode::Restart);
    assert_eq!(config.input_dir, PathBuf::from("/in"));
}

#[test]
fn blank_ffmpeg_dir_loads_as_none() {
    assert_eq!(parse("[paths]\nffmpeg_dir = \"  \"\n").ffmpeg_dir, None);
}

#[test]
fn memory_settings_round_trip() {
    let settings = MemorySettings::new();
    assert_eq!(settings.load(), Configuration::default());
    let config = Configuration::default().debug(true);
    settings.save(&config).unwrap();
    assert_eq!(settings.load(), config);
}
