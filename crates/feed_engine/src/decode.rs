use std::borrow::Cow;

use feed_logging::feed_debug;
use serde::Deserialize;

use crate::FeedPhoto;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("feed body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("feed body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct WireFeed {
    #[serde(default)]
    items: Option<Vec<WireItem>>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    media: Option<WireMedia>,
}

#[derive(Debug, Deserialize)]
struct WireMedia {
    #[serde(default)]
    m: Option<String>,
}

/// Decode a public photo feed body into photos, in feed order.
///
/// Accepts plain JSON as well as the JSONP form (`jsonFlickrFeed({...})`).
/// A missing or null `items` list is an empty batch; entries without a media
/// URL are skipped.
pub fn decode_feed(bytes: &[u8]) -> Result<Vec<FeedPhoto>, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let json = repair_escapes(strip_jsonp(text));
    let feed: WireFeed = serde_json::from_str(&json)?;

    let items = feed.items.unwrap_or_default();
    let total = items.len();
    let photos: Vec<FeedPhoto> = items
        .into_iter()
        .filter_map(|item| {
            let media_url = item.media.and_then(|media| media.m)?;
            if media_url.trim().is_empty() {
                return None;
            }
            Some(FeedPhoto {
                title: item.title.unwrap_or_default(),
                media_url,
            })
        })
        .collect();

    if photos.len() != total {
        feed_debug!(
            "decode_feed skipped {} of {} items without media url",
            total - photos.len(),
            total
        );
    }
    Ok(photos)
}

fn strip_jsonp(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }
    let body = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    match (body.find('('), body.strip_suffix(')')) {
        (Some(open), Some(without_close)) if open < without_close.len() => {
            without_close[open + 1..].trim()
        }
        _ => trimmed,
    }
}

// The feed escapes apostrophes as `\'`, which JSON does not allow.
fn repair_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains("\\'") {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\'') => out.push('\''),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
