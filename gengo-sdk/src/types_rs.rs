use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// region    --- attachment
/// 放在job或comment的`url_attachments`中的附件，由服务端去下载
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[builder(on(String, into))]
pub struct UrlAttachment {
    pub url: String,
    pub filename: String,
    pub mime_type: Option<String>,
}

/// 本地文件，以multipart的形式上传
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct FileAttachment {
    #[builder(into)]
    pub path: PathBuf,
    #[builder(into)]
    pub mime_type: Option<String>,
}

impl FileAttachment {
    /// 优先使用指定的类型，其次根据后缀名推测，都没有则为`application/octet-stream`
    pub fn resolved_mime_type(&self) -> String {
        if let Some(s) = &self.mime_type {
            return s.clone();
        }
        mime_guess::from_path(&self.path)
            .first_raw()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_owned()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
// endregion --- attachment

// region    --- response
/// 响应的外层结构
///
/// 成功：`{"opstat": "ok", "response": ...}`
///
/// 失败：`{"opstat": "error", "err": {"msg": ..., "code": ...}}`
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub opstat: String,
    pub response: Option<T>,
}
// endregion --- response

#[test]
fn resolved_mime_type_test() {
    let f = FileAttachment::builder().path("a/b/doc.txt").build();
    assert_eq!(f.resolved_mime_type(), "text/plain");
    assert_eq!(f.file_name(), "doc.txt");

    let f = FileAttachment::builder()
        .path("doc.txt")
        .mime_type("application/x-custom")
        .build();
    assert_eq!(f.resolved_mime_type(), "application/x-custom");

    let f = FileAttachment::builder().path("no_extension").build();
    assert_eq!(f.resolved_mime_type(), DEFAULT_MIME_TYPE);
}

#[test]
fn url_attachment_serialize_test() {
    let a = UrlAttachment::builder()
        .url("https://example.com/logo.png")
        .filename("logo.png")
        .build();
    let v = serde_json::to_value(&a).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"url": "https://example.com/logo.png", "filename": "logo.png"})
    );
}
