use std::collections::HashMap;

use protoget_cli::tracing_config::{LOG_ENV, LOG_FORMAT_ENV, LogConfig, LogFormat};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn logging_is_off_without_a_filter() {
    assert_eq!(LogConfig::from_lookup(lookup(&[])), None);
    assert_eq!(LogConfig::from_lookup(lookup(&[(LOG_FORMAT_ENV, "json")])), None);
}

#[test]
fn protoget_log_wins_over_rust_log() {
    let config = LogConfig::from_lookup(lookup(&[
        ("RUST_LOG", "warn"),
        (LOG_ENV, "protoget_types=trace"),
    ]))
    .expect("filter set");
    assert_eq!(config.directives, "protoget_types=trace");
    assert_eq!(config.format, LogFormat::Text);

    let fallback = LogConfig::from_lookup(lookup(&[("RUST_LOG", "debug")])).expect("filter set");
    assert_eq!(fallback.directives, "debug");
}

#[test]
fn format_names_are_case_insensitive() {
    assert_eq!(LogFormat::parse(" Tree "), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse("xml"), LogFormat::Text);

    let config = LogConfig::from_lookup(lookup(&[(LOG_ENV, "info"), (LOG_FORMAT_ENV, "tree")]))
        .expect("filter set");
    assert_eq!(config.format, LogFormat::Tree);
}
