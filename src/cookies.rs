//! Cookie-backed key/value store.
//!
//! A store is built from the `Cookie` header of an incoming request. Writes
//! and deletions are remembered and emitted back as `Set-Cookie` headers, so a
//! handler can treat the browser's cookie jar as a small map with expiry.

use std::collections::BTreeMap;

use axum::http::{header, HeaderMap, HeaderValue};
use time::{macros::format_description, Duration, OffsetDateTime};
use tracing::debug;

/// A single cookie as this store knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    /// `None` for cookies read from a request, which carry no expiry.
    pub expires: Option<OffsetDateTime>,
    pub path: String,
}

impl CookieRecord {
    fn is_live(&self, now: OffsetDateTime) -> bool {
        self.expires.map_or(true, |exp| exp > now)
    }

    /// Renders the record as a `Set-Cookie` header value.
    pub fn to_set_cookie(&self) -> String {
        let mut out = format!("{}={}", self.name, encode_value(&self.value));
        if let Some(exp) = self.expires {
            out.push_str("; Expires=");
            out.push_str(&http_date(exp));
        }
        out.push_str("; Path=");
        out.push_str(&self.path);
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    records: BTreeMap<String, CookieRecord>,
    changed: Vec<String>,
}

impl CookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `Cookie` request header (`a=1; b=2`). Malformed pairs are skipped.
    pub fn from_header(raw: &str) -> Self {
        let mut store = Self::new();
        for pair in raw.split(';') {
            let pair = pair.trim_start_matches(' ');
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            store.records.insert(
                name.to_string(),
                CookieRecord {
                    name: name.to_string(),
                    value: decode_value(value.trim_end()),
                    expires: None,
                    path: "/".into(),
                },
            );
        }
        store
    }

    /// Collects every `Cookie` header of a request into one store.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let joined = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        Self::from_header(&joined)
    }

    /// Writes `name` with an absolute expiry of now + `ttl_days`.
    pub fn set(&mut self, name: &str, value: &str, ttl_days: i64) {
        let expires = OffsetDateTime::now_utc() + Duration::days(ttl_days);
        debug!(cookie = name, %expires, "set cookie");
        self.put(CookieRecord {
            name: name.to_string(),
            value: value.to_string(),
            expires: Some(expires),
            path: "/".into(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let now = OffsetDateTime::now_utc();
        self.records
            .get(name)
            .filter(|r| r.is_live(now))
            .map(|r| r.value.as_str())
    }

    /// Overwrites `name` with an already-expired record so the client drops it.
    pub fn delete(&mut self, name: &str) {
        debug!(cookie = name, "delete cookie");
        self.put(CookieRecord {
            name: name.to_string(),
            value: String::new(),
            expires: Some(OffsetDateTime::UNIX_EPOCH),
            path: "/".into(),
        });
    }

    fn put(&mut self, record: CookieRecord) {
        if !self.changed.contains(&record.name) {
            self.changed.push(record.name.clone());
        }
        self.records.insert(record.name.clone(), record);
    }

    /// `Set-Cookie` values for every record written since the store was built.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.changed
            .iter()
            .filter_map(|name| self.records.get(name))
            .map(CookieRecord::to_set_cookie)
            .collect()
    }

    /// Appends the pending `Set-Cookie` headers to a response header map.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        for line in self.set_cookie_headers() {
            if let Ok(v) = HeaderValue::from_str(&line) {
                headers.append(header::SET_COOKIE, v);
            }
        }
    }
}

fn http_date(at: OffsetDateTime) -> String {
    let fmt = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    at.to_offset(time::UtcOffset::UTC)
        .format(fmt)
        .unwrap_or_else(|_| "Thu, 01 Jan 1970 00:00:00 GMT".into())
}

// RFC 6265 cookie-octet, minus '%' which introduces an escape.
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x24 | 0x26..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

fn encode_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if is_cookie_octet(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

fn decode_value(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(b) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
