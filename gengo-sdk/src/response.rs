use crate::Error;
use gengo_sdk_common::query::value_to_text;
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// 解析响应内容，`opstat`不为`ok`时返回对应的错误
pub(crate) fn parse_envelope(status: StatusCode, text: &str, debug: bool) -> Result<Value, Error> {
    let v: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            let message = if debug {
                format!("Invalid JSON response: '{text}' ({e}), status: {status}")
            } else {
                "Internal Server Error".to_owned()
            };
            return Err(Error::ServerError(message));
        }
    };
    check_envelope(v)
}

pub(crate) fn check_envelope(v: Value) -> Result<Value, Error> {
    match v.get("opstat") {
        None => return Ok(v),
        Some(Value::String(s)) if s == "ok" => return Ok(v),
        _ => {}
    }

    let err = match v.get("err") {
        Some(Value::Object(m)) => into_remote_error(m),
        Some(Value::String(s)) => Error::remote(s.clone(), None),
        _ => Error::remote("unknown error", None),
    };
    Err(err)
}

fn into_remote_error(err: &Map<String, Value>) -> Error {
    if err.contains_key("msg") || err.contains_key("code") || err.is_empty() {
        let message = err.get("msg").map(value_to_text).unwrap_or_default();
        return Error::remote(message, err.get("code").and_then(parse_code));
    }

    // 多个job出错时，err的key为job id，值为该job的错误列表
    let mut message = String::new();
    let mut code = None;
    for (job_key, errors) in err {
        let first = errors.as_array().and_then(|list| list.first());
        let msg = first
            .and_then(|e| e.get("msg"))
            .map(value_to_text)
            .unwrap_or_default();
        message.push_str(&format!("<{job_key}: {msg}> "));
        if code.is_none() {
            code = first.and_then(|e| e.get("code")).and_then(parse_code);
        }
    }
    Error::remote(message, code)
}

fn parse_code(v: &Value) -> Option<i64> {
    v.as_i64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}
