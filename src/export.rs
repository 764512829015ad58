pub(crate) mod clipboard;
pub(crate) mod download;
pub(crate) mod urls;
