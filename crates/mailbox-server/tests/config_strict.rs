#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use mailbox_server::config;

const MINIMAL: &str = r#"
version: 1
backend:
  url: "https://project.supabase.co"
  anon_key: "anon"
"#;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
backend:
  url: "https://project.supabase.co"
  anon_key: "anon"
  mail_tabel: "mail" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str(MINIMAL).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.backend.session_cookie, "sb-access-token");
    assert_eq!(cfg.backend.mail_table, "mail");
}

#[test]
fn wrong_version_is_unsupported() {
    let err = config::load_from_str("version: 2\nbackend: { url: 'https://x.io', anon_key: k }")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn backend_credentials_are_required() {
    let err = config::load_from_str("version: 1").expect_err("no url");
    assert!(err.to_string().contains("backend.url"));

    let err = config::load_from_str("version: 1\nbackend: { url: 'https://x.io' }").expect_err("no key");
    assert!(err.to_string().contains("backend.anon_key"));
}

#[test]
fn env_overrides_fill_backend() {
    let env: HashMap<&str, &str> = [
        ("PUBLIC_SUPABASE_URL", "http://127.0.0.1:54321"),
        ("PUBLIC_SUPABASE_ANON_KEY", "from-env"),
    ]
    .into_iter()
    .collect();

    let cfg = config::load_from_str_with("version: 1", |k| env.get(k).map(|v| v.to_string()))
        .expect("env supplies backend");
    assert_eq!(cfg.backend.url, "http://127.0.0.1:54321");
    assert_eq!(cfg.backend.anon_key, "from-env");

    let cfg = config::load_from_str_with(MINIMAL, |_| None).unwrap();
    assert_eq!(cfg.backend.anon_key, "anon");
}

#[test]
fn rejects_non_http_url() {
    let err = config::load_from_str("version: 1\nbackend: { url: 'ftp://x.io', anon_key: k }")
        .expect_err("must fail");
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn rejects_bad_cookie_and_table_names() {
    let bad_cookie = format!("{MINIMAL}  session_cookie: \"sb token\"\n");
    assert!(config::load_from_str(&bad_cookie).is_err());

    let bad_table = format!("{MINIMAL}  mail_table: \"mail;drop\"\n");
    assert!(config::load_from_str(&bad_table).is_err());

    let custom = format!("{MINIMAL}  session_cookie: \"my-token\"\n  mail_table: \"inbox_v2\"\n");
    let cfg = config::load_from_str(&custom).unwrap();
    assert_eq!(cfg.backend.session_cookie, "my-token");
    assert_eq!(cfg.backend.mail_table, "inbox_v2");
}

#[test]
fn rejects_bad_listen() {
    let bad = format!("{MINIMAL}server:\n  listen: \"localhost\"\n");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert!(err.to_string().contains("server.listen"));
}
