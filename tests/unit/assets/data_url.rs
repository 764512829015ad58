use super::*;

#[test]
fn parses_header_fields() {
    let d = DataUrl::parse("data:image/png;base64,AAEC").unwrap();
    assert_eq!(d.mime, "image/png");
    assert!(d.base64);
    assert_eq!(d.payload, "AAEC");
    assert_eq!(d.decode().unwrap(), vec![0, 1, 2]);

    let d = DataUrl::parse("data:,hi%20there").unwrap();
    assert_eq!(d.mime, "text/plain");
    assert!(!d.base64);
    assert_eq!(d.decode().unwrap(), b"hi there");
}

#[test]
fn encode_then_decode_keeps_bytes() {
    let url = encode_data_url("image/gif", b"GIF89a");
    assert!(url.starts_with("data:image/gif;base64,"));
    let (mime, bytes) = decode_data_url(&url).unwrap();
    assert_eq!(mime, "image/gif");
    assert_eq!(bytes, b"GIF89a");
}

#[test]
fn rejects_malformed_input() {
    assert!(DataUrl::parse("http://x").is_err());
    assert!(DataUrl::parse("data:image/png;base64").is_err());
    assert!(DataUrl::parse("dat").is_err());
    assert!(decode_data_url("data:;base64,@@@").is_err());
    assert!(decode_data_url("data:,bad%zz").is_err());
    assert!(decode_data_url("data:,cut%4").is_err());
}
