//! api表
//!
//! 每个api对应一个[`EndpointSpec`]，url中需要替换的参数使用`{name}`表示，
//! 调用时会使用同名参数的值进行替换

use crate::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub url_template: &'static str,
    /// 为true时，jobs中`type`为`file`且带有`file_path`的job会以multipart的形式上传文件
    pub upload: bool,
}

impl EndpointSpec {
    const fn new(name: &'static str, method: HttpMethod, url_template: &'static str) -> Self {
        Self {
            name,
            method,
            url_template,
            upload: false,
        }
    }

    const fn with_upload(mut self) -> Self {
        self.upload = true;
        self
    }

    /// GET和DELETE只对query签名
    pub fn signs_query_only(&self) -> bool {
        matches!(self.method, HttpMethod::Get | HttpMethod::Delete)
    }

    /// POST和PUT需要发送`data`等表单字段
    pub fn carries_body(&self) -> bool {
        !self.signs_query_only()
    }

    /// url模板中的所有参数名，按出现顺序
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut res = Vec::new();
        let mut rest = self.url_template;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            res.push(&after[..end]);
            rest = &after[end + 1..];
        }
        res
    }
}

use HttpMethod::*;

pub static ENDPOINTS: &[EndpointSpec] = &[
    // region    --- account
    EndpointSpec::new("getAccountStats", Get, "/account/stats"),
    EndpointSpec::new("getAccountBalance", Get, "/account/balance"),
    EndpointSpec::new("getAccountMe", Get, "/account/me"),
    EndpointSpec::new(
        "getPreferredTranslators",
        Get,
        "/account/preferred_translators",
    ),
    // endregion --- account

    // region    --- jobs
    EndpointSpec::new("postTranslationJobs", Post, "/translate/jobs"),
    EndpointSpec::new("updateTranslationJob", Put, "/translate/job/{id}"),
    EndpointSpec::new("updateTranslationJobs", Put, "/translate/jobs"),
    EndpointSpec::new("getTranslationJob", Get, "/translate/job/{id}"),
    EndpointSpec::new("getTranslationJobs", Get, "/translate/jobs"),
    EndpointSpec::new("getTranslationJobBatch", Get, "/translate/jobs/{id}"),
    EndpointSpec::new("determineTranslationCost", Post, "/translate/service/quote")
        .with_upload(),
    EndpointSpec::new(
        "postTranslationJobComment",
        Post,
        "/translate/job/{id}/comment",
    ),
    EndpointSpec::new(
        "getTranslationJobComments",
        Get,
        "/translate/job/{id}/comments",
    ),
    EndpointSpec::new(
        "getTranslationJobFeedback",
        Get,
        "/translate/job/{id}/feedback",
    ),
    EndpointSpec::new(
        "getTranslationJobRevisions",
        Get,
        "/translate/job/{id}/revisions",
    ),
    EndpointSpec::new(
        "getTranslationJobRevision",
        Get,
        "/translate/job/{id}/revision/{revision_id}",
    ),
    EndpointSpec::new("deleteTranslationJob", Delete, "/translate/job/{id}"),
    // endregion --- jobs

    // region    --- language service
    EndpointSpec::new(
        "getServiceLanguagePairs",
        Get,
        "/translate/service/language_pairs",
    ),
    EndpointSpec::new("getServiceLanguages", Get, "/translate/service/languages"),
    EndpointSpec::new(
        "getServiceLanguageMatrix",
        Get,
        "/translate/service/language_matrix",
    ),
    // endregion --- language service

    // region    --- glossary
    EndpointSpec::new("getGlossaryList", Get, "/translate/glossary"),
    EndpointSpec::new("getGlossary", Get, "/translate/glossary/{id}"),
    // endregion --- glossary

    // region    --- order
    EndpointSpec::new("getTranslationOrderJobs", Get, "/translate/order/{id}"),
    EndpointSpec::new("deleteTranslationOrder", Delete, "/translate/order/{id}"),
    EndpointSpec::new("postOrderComment", Post, "/translate/order/{id}/comment"),
    EndpointSpec::new("getOrderComments", Get, "/translate/order/{id}/comments"),
    // endregion --- order
];

pub fn lookup(name: &str) -> Result<&'static EndpointSpec, Error> {
    ENDPOINTS
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| Error::UnknownOperation(name.to_owned()))
}
