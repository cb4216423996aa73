//! Page data wire shape tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use mailbox_core::error::MailboxError;
use mailbox_core::model::{PageData, QueryError, SessionToken, UserIdentity};

#[test]
fn loaded_page_has_no_error_key() {
    let page = PageData::loaded(vec![json!({"id": 1, "subject": "hi"})]);
    let v = serde_json::to_value(&page).unwrap();
    assert_eq!(v, json!({"mail": [{"id": 1, "subject": "hi"}]}));
    assert!(v.get("error").is_none());
}

#[test]
fn failed_page_is_empty_with_error() {
    let v = serde_json::to_value(PageData::not_logged_in()).unwrap();
    assert_eq!(v, json!({"mail": [], "error": "Not logged in"}));

    let v = serde_json::to_value(PageData::invalid_session()).unwrap();
    assert_eq!(v, json!({"mail": [], "error": "Invalid session"}));
}

#[test]
fn rows_pass_through_unchanged() {
    let row = json!({"nested": {"a": [1, 2, null]}, "flag": true, "body": "x\ny"});
    let page = PageData::loaded(vec![row.clone()]);
    let back: PageData = serde_json::from_str(&serde_json::to_string(&page).unwrap()).unwrap();
    assert_eq!(back.mail, vec![row]);
    assert!(!back.is_error());
}

#[test]
fn empty_token_is_no_session() {
    assert!(SessionToken::new("").is_none());
    let t = SessionToken::new("eyJhbGciOi").unwrap();
    assert_eq!(t.as_str(), "eyJhbGciOi");
    assert!(!format!("{t:?}").contains("eyJ"));
}

#[test]
fn identity_keeps_unknown_fields() {
    let user: UserIdentity = serde_json::from_value(json!({
        "id": "8d0f",
        "aud": "authenticated",
        "email": "a@example.com"
    }))
    .unwrap();
    assert_eq!(user.log_id(), "8d0f");
    assert_eq!(user.attrs["email"], "a@example.com");

    let anon: UserIdentity = serde_json::from_value(json!({"role": "x"})).unwrap();
    assert_eq!(anon.log_id(), "-");
}

#[test]
fn query_error_reads_postgrest_body() {
    let err: QueryError = serde_json::from_str(
        r#"{"code":"42P01","details":null,"hint":null,"message":"relation \"public.mail\" does not exist"}"#,
    )
    .unwrap();
    assert_eq!(err.code.as_deref(), Some("42P01"));
    assert_eq!(err.to_string(), "relation \"public.mail\" does not exist");
}

#[test]
fn client_codes_are_stable() {
    assert_eq!(MailboxError::BadRequest("x".into()).client_code().as_str(), "BAD_REQUEST");
    assert_eq!(MailboxError::UnsupportedVersion.client_code().as_str(), "UNSUPPORTED_VERSION");
    assert_eq!(MailboxError::Backend("x".into()).client_code().as_str(), "BACKEND_UNAVAILABLE");
}
