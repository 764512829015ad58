use std::collections::HashMap;
use std::sync::Arc;

/// Scheme prefix of locally addressable object URLs.
pub const OBJECT_URL_PREFIX: &str = "blob:stayframe/";

/// Bytes kept alive behind an object URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
}

/// In-process registry standing in for browser object URLs.
///
/// Entries live until revoked.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    next: u64,
    entries: HashMap<String, Blob>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return a fresh `blob:stayframe/<n>` URL.
    pub fn create(&mut self, mime: impl Into<String>, bytes: Vec<u8>) -> String {
        self.next += 1;
        let url = format!("{OBJECT_URL_PREFIX}{}", self.next);
        self.entries.insert(
            url.clone(),
            Blob {
                mime: mime.into(),
                bytes: Arc::new(bytes),
            },
        );
        url
    }

    pub fn get(&self, url: &str) -> Option<&Blob> {
        self.entries.get(url)
    }

    /// Drop the bytes behind `url`. Returns `false` for unknown URLs.
    pub fn revoke(&mut self, url: &str) -> bool {
        self.entries.remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `url` looks like one of our object URLs.
pub fn is_object_url(url: &str) -> bool {
    url.starts_with(OBJECT_URL_PREFIX)
}
