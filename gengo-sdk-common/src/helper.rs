use crate::Error;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sha1::Sha1;
use std::collections::HashMap;
use time::OffsetDateTime;

/// 当前Unix时间戳，单位为秒
pub fn unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

pub fn into_header_map(map: &HashMap<String, String>) -> Result<HeaderMap, Error> {
    let mut header_map = HeaderMap::with_capacity(map.len());
    for (k, v) in map {
        let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: k.to_owned(),
            message: e.to_string(),
        })?;
        let value = HeaderValue::from_str(v).map_err(|e| Error::InvalidHeader {
            name: k.to_owned(),
            message: e.to_string(),
        })?;
        header_map.insert(name, value);
    }
    Ok(header_map)
}

/// key按字节处理，不要求是合法的UTF-8
pub fn sign_hmac_sha1(secret: &[u8], str_to_sign: &str) -> Result<Vec<u8>, Error> {
    type HmacSha1 = Hmac<Sha1>;
    let mut mac = HmacSha1::new_from_slice(secret)
        .map_err(|e| Error::Common(format!("invalid hmac key: {}", e)))?;
    mac.update(str_to_sign.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// 输出小写十六进制字符串
pub fn sign_hmac_sha1_hex(secret: &[u8], str_to_sign: &str) -> Result<String, Error> {
    sign_hmac_sha1(secret, str_to_sign).map(hex::encode)
}

#[test]
fn sign_hmac_sha1_hex_test() {
    // RFC 2202 test case 2
    let s = sign_hmac_sha1_hex(b"Jefe", "what do ya want for nothing?").unwrap();
    assert_eq!(s, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
}

#[test]
fn sign_with_empty_key_test() {
    let s = sign_hmac_sha1_hex(b"", "").unwrap();
    assert_eq!(s, "fbdb1d1b18aa6c08324b7d64b71fb76370690e1d");
}

#[test]
fn into_header_map_test() {
    let mut map = HashMap::new();
    map.insert("Accept".to_owned(), "application/json".to_owned());
    let header_map = into_header_map(&map).unwrap();
    assert_eq!(header_map.get("accept").unwrap(), "application/json");

    map.insert("bad header".to_owned(), "x".to_owned());
    assert!(matches!(
        into_header_map(&map),
        Err(Error::InvalidHeader { .. })
    ));
}
