//! Table parser behavior on decrypted plaintext: classification, per-field
//! decoding and recovery from malformed blocks.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

use spass_rs::errors::NoDataError;
use spass_rs::{parse, Value};

fn b64(text: &str) -> String {
    BASE64.encode(text)
}

const LOGINS_HEADER: &str =
    "_id;origin_url;action_url;username_value;password_value;title;credential_memo";

fn login_row(origin: &str, user: &str, pass: &str, title: &str) -> String {
    format!(
        "{};{};{};{};{};{};{}",
        b64("1"),
        b64(origin),
        b64("https://example.com/submit"),
        b64(user),
        b64(pass),
        b64(title),
        ""
    )
}

#[test]
fn parses_login_block() {
    let plaintext = format!(
        "{}\n{}",
        LOGINS_HEADER,
        login_row("https://example.com", "user", "hunter2", "Example")
    );
    let document = parse(&plaintext).unwrap();

    let logins = document.table("logins").unwrap();
    assert_eq!(logins.records().len(), 1);
    let record = &logins.records()[0];
    assert_eq!(record.get("title"), Some(&Value::Text("Example".into())));
    assert_eq!(
        record.get("username_value"),
        Some(&Value::Text("user".into()))
    );
    assert_eq!(
        record.get("password_value"),
        Some(&Value::Text("hunter2".into()))
    );
    // not on the allow-list
    assert_eq!(record.get("_id"), None);
    // empty cell is omitted entirely
    assert_eq!(record.get("credential_memo"), None);
}

#[test]
fn drops_login_rows_without_title() {
    let plaintext = format!(
        "{}\n{}\n{}",
        LOGINS_HEADER,
        login_row("https://a.example.com", "user-a", "pw-a", ""),
        login_row("https://b.example.com", "user-b", "pw-b", "Kept")
    );
    let document = parse(&plaintext).unwrap();

    let logins = document.table("logins").unwrap();
    assert_eq!(logins.records().len(), 1);
    assert_eq!(
        logins.records()[0].get("title"),
        Some(&Value::Text("Kept".into()))
    );
}

#[test]
fn null_sentinel_title_drops_the_row() {
    let row = format!(
        "{};{};{};{};{};JiYmTlVMTCYmJg==;{}",
        b64("1"),
        b64("https://example.com"),
        b64("https://example.com/submit"),
        b64("user"),
        b64("hunter2"),
        ""
    );
    let plaintext = format!("{}\n{}", LOGINS_HEADER, row);
    assert!(matches!(
        parse(&plaintext),
        Err(NoDataError::NoUsableRecords)
    ));
}

#[test]
fn null_sentinel_decodes_to_empty_in_any_field() {
    let plaintext = format!(
        "note_title;note_content\n{};JiYmTlVMTCYmJg==",
        b64("Router")
    );
    let document = parse(&plaintext).unwrap();
    let record = &document.table("notes").unwrap().records()[0];
    assert_eq!(record.get("note_title"), Some(&Value::Text("Router".into())));
    assert_eq!(record.get("note_content"), None);
}

#[test]
fn android_origin_url_is_rewritten_to_package() {
    let plaintext = format!(
        "{}\n{}",
        LOGINS_HEADER,
        login_row("android://AAA==@com.example.app", "user", "pw", "App")
    );
    let document = parse(&plaintext).unwrap();
    assert_eq!(
        document.table("logins").unwrap().records()[0].get("origin_url"),
        Some(&Value::Text("com.example.app".into()))
    );
}

#[test]
fn parses_identity_block_with_list_and_detail_fields() {
    // "0123" / "4567" with position markers after #
    let phones = b64(&format!("{}#p0&&&{}#p1", b64("0123"), b64("4567")));
    let detail = b64(r#"{"company":"Acme"}"#);
    let plaintext = format!(
        "full_name;email_address;birth_date;phone_numbers;identity_detail\n\
         {};{};{};{};{}",
        b64("Grace Hopper"),
        b64("grace@example.com"),
        b64("1906-12-09"),
        phones,
        detail
    );
    let document = parse(&plaintext).unwrap();

    let record = &document.table("identities").unwrap().records()[0];
    assert_eq!(
        record.get("full_name"),
        Some(&Value::Text("Grace Hopper".into()))
    );
    assert_eq!(
        record.get("phone_numbers"),
        Some(&Value::List(vec!["0123".into(), "4567".into()]))
    );
    assert_eq!(
        record.get("identity_detail"),
        Some(&Value::Structured(json!({"company": "Acme"})))
    );
}

#[test]
fn unrecognized_tables_get_sequential_names() {
    let plaintext = format!(
        "one;two;three\n{};{};{}\nnext_table\nfoo;bar;baz\n{};{};{}",
        b64("a"),
        b64("b"),
        b64("c"),
        b64("x"),
        b64("y"),
        b64("z")
    );
    let document = parse(&plaintext).unwrap();

    let first = document.table("unknown_data_1").unwrap();
    assert_eq!(
        first.records()[0].get("two"),
        Some(&Value::Text("b".into()))
    );
    let second = document.table("unknown_data_2").unwrap();
    assert_eq!(
        second.records()[0].get("baz"),
        Some(&Value::Text("z".into()))
    );
}

#[test]
fn row_count_marker_block_is_skipped() {
    let plaintext = format!(
        "rowcount\n1;1;1\nnext_table\nnote_title;note_content\n{};{}",
        b64("Wifi"),
        b64("on the router")
    );
    let document = parse(&plaintext).unwrap();

    assert!(document.warnings().is_empty());
    assert_eq!(document.tables().len(), 1);
    assert!(document.table("notes").is_some());
}

#[test]
fn malformed_block_is_skipped_with_warning() {
    let plaintext = format!(
        "{}\n{}\nnext_table\nalpha;beta;gamma\n1;2;3;4;5\nnext_table\nnote_title;note_content\n{};{}",
        LOGINS_HEADER,
        login_row("https://example.com", "user", "pw", "Example"),
        b64("Wifi"),
        b64("on the router")
    );
    let document = parse(&plaintext).unwrap();

    assert!(document.table("logins").is_some());
    assert!(document.table("notes").is_some());
    assert_eq!(document.warnings().len(), 1);
    assert_eq!(document.warnings()[0].block_index, 1);
}

#[test]
fn repeated_table_kinds_accumulate() {
    let plaintext = format!(
        "{header}\n{row_a}\nnext_table\n{header}\n{row_b}",
        header = LOGINS_HEADER,
        row_a = login_row("https://a.example.com", "user-a", "pw-a", "First"),
        row_b = login_row("https://b.example.com", "user-b", "pw-b", "Second")
    );
    let document = parse(&plaintext).unwrap();

    let logins = document.table("logins").unwrap();
    assert_eq!(logins.records().len(), 2);
    assert_eq!(
        logins.records()[1].get("title"),
        Some(&Value::Text("Second".into()))
    );
}

#[test]
fn nothing_usable_is_an_error() {
    for plaintext in [
        "",
        "next_table",
        "too small",
        "a;b\nnext_table\nc;d",
        "rowcount\n1;1;1",
    ] {
        assert!(matches!(
            parse(plaintext),
            Err(NoDataError::NoUsableRecords)
        ));
    }
}
