//! 所有api共用的请求流程
//!
//! 1. 复制参数，取出body相关字段
//! 2. 用参数替换url中的`{name}`
//! 3. 剩余参数和`api_key`、`ts`组成query
//! 4. 整理附件
//! 5. 签名并发送请求
//! 6. 解析响应

use crate::endpoint::{self, EndpointSpec};
use crate::payload::{CanonicalBody, Payload, StagedFile};
use crate::response::parse_envelope;
use crate::types_rs::Envelope;
use crate::{Client, Error};
use gengo_sdk_common::helper::{sign_hmac_sha1_hex, unix_timestamp};
use gengo_sdk_common::query::{encode_query, to_query_map, value_to_text};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tokio_util::io::ReaderStream;

/// url中的参数没有对应的值时使用，方便从请求日志中发现问题
pub const MISSING_ARGUMENT: &str = "no_argument_specified";

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 签名前的请求内容
#[derive(Debug, Clone)]
pub struct PreparedCall {
    pub endpoint: &'static EndpointSpec,
    /// 不带query的完整url
    pub url: String,
    /// 包含`api_key`(如果有)和`ts`，不包含`data`和`api_sig`
    pub query: BTreeMap<String, String>,
    pub timestamp: i64,
    pub body: Option<CanonicalBody>,
    /// multipart中除签名字段外的文本字段
    pub multipart_fields: Vec<(String, String)>,
    pub files: Vec<StagedFile>,
}

impl Client {
    /// 只构建请求，不发送
    pub fn prepare(&self, operation: &str, args: &Value) -> Result<PreparedCall, Error> {
        let endpoint = endpoint::lookup(operation)?;

        let mut args = match args {
            Value::Object(m) => m.clone(),
            Value::Null => Map::new(),
            other => {
                return Err(Error::Common(format!(
                    "arguments must be a JSON object, got: {other}"
                )));
            }
        };

        let mut payload = Payload::extract(&mut args)?;

        let path = render_url_template(endpoint.url_template, &mut args);
        let url = format!("{}{}", self.api_url, path);

        let mut query = to_query_map(args);
        if let Some(key) = &self.public_key {
            query.insert("api_key".to_owned(), key.clone());
        }
        let timestamp = unix_timestamp();
        query.insert("ts".to_owned(), timestamp.to_string());

        payload.normalize_url_attachments()?;
        let mut files = if endpoint.upload {
            payload.stage_uploads()
        } else {
            Vec::new()
        };
        let mut multipart_fields = Vec::new();
        let (comment_body, comment_files) = payload.stage_comment_attachments()?;
        if let Some(body) = comment_body {
            multipart_fields.push(("body".to_owned(), body));
        }
        files.extend(comment_files);

        Ok(PreparedCall {
            endpoint,
            url,
            query,
            timestamp,
            body: payload.canonical(),
            multipart_fields,
            files,
        })
    }

    /// 调用api，成功时原样返回解析后的响应(包含`opstat`和`response`)
    ///
    /// ```no_run
    /// # async fn run(client: &gengo_sdk::Client) -> Result<(), gengo_sdk::Error> {
    /// let job = client
    ///     .invoke("getTranslationJob", &serde_json::json!({"id": 123}))
    ///     .await?;
    /// println!("{}", job["response"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn invoke(&self, operation: &str, args: &Value) -> Result<Value, Error> {
        let call = self.prepare(operation, args)?;
        let resp = self.send(call).await?;
        let status = resp.status();
        let text = resp.text().await?;
        parse_envelope(status, &text, self.debug)
    }

    /// 同[`Client::invoke`]，把`response`字段反序列化为`T`
    pub async fn invoke_as<T: DeserializeOwned>(
        &self,
        operation: &str,
        args: &Value,
    ) -> Result<T, Error> {
        let v = self.invoke(operation, args).await?;
        let envelope: Envelope<T> = serde_json::from_value(v)?;
        envelope.response.ok_or_else(|| {
            Error::ServerError(format!(
                "missing response field, opstat: {}",
                envelope.opstat
            ))
        })
    }

    /// 签名只使用时间戳，不包含body和其它参数
    pub(crate) fn sign(&self, timestamp: i64) -> Result<String, Error> {
        let key = self.private_key.as_deref().unwrap_or_default();
        let sig = sign_hmac_sha1_hex(key.as_bytes(), &timestamp.to_string())?;
        Ok(sig)
    }

    async fn send(&self, call: PreparedCall) -> Result<reqwest::Response, Error> {
        let PreparedCall {
            endpoint,
            url,
            mut query,
            timestamp,
            body,
            multipart_fields,
            files,
        } = call;

        if endpoint.signs_query_only() {
            if self.private_key.is_some() {
                query.insert("api_sig".to_owned(), self.sign(timestamp)?);
            }
            if !files.is_empty() {
                tracing::warn!(
                    operation = endpoint.name,
                    "files are only uploaded with POST/PUT, ignored"
                );
            }
            let query_str = encode_query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            let url = format!("{url}?{query_str}");
            if self.debug {
                tracing::debug!(method = %endpoint.method, %url, "gengo request");
            }
            let resp = self
                .http_client
                .request(endpoint.method.into(), url)
                .send()
                .await?;
            return Ok(resp);
        }

        if let Some(body) = &body {
            query.insert("data".to_owned(), body.to_data()?);
        }
        query.insert("api_sig".to_owned(), self.sign(timestamp)?);
        if self.debug {
            tracing::debug!(method = %endpoint.method, %url, fields = ?query, "gengo request");
        }

        let req = self.http_client.request(endpoint.method.into(), url);
        let req = if files.is_empty() {
            req.form(&query)
        } else {
            req.multipart(into_multipart(query, multipart_fields, files).await?)
        };
        // 打开的文件属于请求body，请求结束(包括失败)后随body一起释放
        let resp = req.send().await?;
        Ok(resp)
    }
}

/// 替换url模板中的`{name}`，使用过的参数会从args中删除
pub(crate) fn render_url_template(template: &str, args: &mut Map<String, Value>) -> String {
    let mut res = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        res.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let name = after.find('}').map(|end| &after[..end]).filter(|name| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
        });
        let Some(name) = name else {
            res.push('{');
            rest = after;
            continue;
        };

        match args.remove(name) {
            Some(v) => {
                let text = value_to_text(&v);
                res.extend(utf8_percent_encode(&text, PATH_SEGMENT));
            }
            None => {
                tracing::warn!(argument = name, "url argument not specified");
                res.push_str(MISSING_ARGUMENT);
            }
        }
        rest = &after[name.len() + 1..];
    }
    res.push_str(rest);
    res
}

async fn into_multipart(
    fields: BTreeMap<String, String>,
    extra_fields: Vec<(String, String)>,
    files: Vec<StagedFile>,
) -> Result<Form, Error> {
    let mut form = Form::new();
    for (k, v) in fields.into_iter().chain(extra_fields) {
        form = form.text(k, v);
    }
    for staged in files {
        let attachment = staged.attachment;
        let file = tokio::fs::File::open(&attachment.path).await?;
        let len = file.metadata().await?.len();
        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), len)
            .file_name(attachment.file_name())
            .mime_str(&attachment.resolved_mime_type())?;
        form = form.part(staged.field_name, part);
    }
    Ok(form)
}
