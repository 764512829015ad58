use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{StayframeError, StayframeResult};

/// A parsed `data:` URL borrowing from its source string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type, `text/plain` when omitted.
    pub mime: &'a str,
    /// Whether the payload is base64.
    pub base64: bool,
    /// Raw payload after the comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a `data:` URL into header parts and payload.
    pub fn parse(url: &'a str) -> StayframeResult<Self> {
        let rest = url
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &url[5..])
            .ok_or_else(|| StayframeError::load("not a data: URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| StayframeError::load("malformed data URL: missing ','"))?;

        let mut mime = "text/plain";
        let mut base64 = false;
        for (idx, seg) in header.split(';').enumerate() {
            let seg = seg.trim();
            if seg.eq_ignore_ascii_case("base64") {
                base64 = true;
            } else if idx == 0 && seg.contains('/') {
                mime = seg;
            }
        }

        Ok(Self {
            mime,
            base64,
            payload,
        })
    }

    /// Decode the payload bytes.
    pub fn decode(&self) -> StayframeResult<Vec<u8>> {
        if self.base64 {
            let compact: String = self
                .payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            STANDARD
                .decode(compact.as_bytes())
                .map_err(|e| StayframeError::load(format!("invalid base64 in data URL: {e}")))
        } else {
            percent_decode(self.payload)
        }
    }
}

/// Parse and decode a `data:` URL in one step, returning `(mime, bytes)`.
pub fn decode_data_url(url: &str) -> StayframeResult<(String, Vec<u8>)> {
    let parsed = DataUrl::parse(url)?;
    Ok((parsed.mime.to_ascii_lowercase(), parsed.decode()?))
}

/// Encode bytes as a base64 `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn percent_decode(input: &str) -> StayframeResult<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| StayframeError::load("invalid percent-escape in data URL"))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/data_url.rs"]
mod tests;
