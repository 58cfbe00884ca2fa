/// 远程返回此code时表示认证失败
pub const AUTH_ERROR_CODE: i64 = 1000;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("unsupported api version: {0}, only version 2 is supported")]
    UnsupportedApiVersion(u32),
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),
    #[error("server error: {0}")]
    ServerError(String),
    #[error("remote error: {message}{}", code_suffix(.code))]
    Remote { message: String, code: Option<i64> },
    #[error("authentication failed: {message}")]
    Auth { message: String },
    #[error("error: {0}")]
    Common(String),
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 根据code构造远程错误，认证失败的code会得到[`Error::Auth`]
    pub fn remote(message: impl Into<String>, code: Option<i64>) -> Self {
        let message = message.into();
        match code {
            Some(AUTH_ERROR_CODE) => Error::Auth { message },
            _ => Error::Remote { message, code },
        }
    }

    /// 远程返回的错误码
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Remote { code, .. } => *code,
            Error::Auth { .. } => Some(AUTH_ERROR_CODE),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(", code: {c}")).unwrap_or_default()
}

impl From<gengo_sdk_common::Error> for Error {
    fn from(e: gengo_sdk_common::Error) -> Self {
        Error::Common(e.to_string())
    }
}

#[test]
fn remote_factory_test() {
    let e = Error::remote("bad", Some(1000));
    assert!(e.is_auth());
    assert_eq!(e.code(), Some(1000));
    assert_eq!(e.to_string(), "authentication failed: bad");

    let e = Error::remote("not found", Some(2150));
    assert!(matches!(&e, Error::Remote { message, code: Some(2150) } if message == "not found"));
    assert!(!e.is_auth());
    assert_eq!(e.to_string(), "remote error: not found, code: 2150");

    let e = Error::remote("no code", None);
    assert_eq!(e.code(), None);
    assert_eq!(e.to_string(), "remote error: no code");
}
