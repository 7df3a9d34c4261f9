use feed_engine::{decode_feed, FeedPhoto};
use pretty_assertions::assert_eq;

#[test]
fn missing_or_null_items_is_an_empty_batch() {
    assert_eq!(decode_feed(br#"{"title": "x"}"#).unwrap(), Vec::new());
    assert_eq!(decode_feed(br#"{"items": null}"#).unwrap(), Vec::new());
}

#[test]
fn items_without_media_url_are_skipped() {
    let body = br#"{"items": [
        {"title": "no media"},
        {"title": "empty", "media": {"m": "  "}},
        {"title": "ok", "media": {"m": "https://img/ok.jpg"}},
        {"media": {"m": "https://img/untitled.jpg"}}
    ]}"#;

    assert_eq!(
        decode_feed(body).unwrap(),
        vec![
            FeedPhoto {
                title: "ok".to_string(),
                media_url: "https://img/ok.jpg".to_string(),
            },
            FeedPhoto {
                title: String::new(),
                media_url: "https://img/untitled.jpg".to_string(),
            },
        ]
    );
}

#[test]
fn invalid_utf8_is_an_error() {
    assert!(decode_feed(&[0xff, 0xfe, b'{', b'}']).is_err());
}
