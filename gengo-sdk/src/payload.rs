//! 请求body的整理
//!
//! 调用参数中的`job`、`jobs`、`comment`、`action`、`job_ids`、`file_attachments`
//! 不会出现在query中，而是取出后整理为服务端要求的结构，最终序列化为表单中的`data`字段

use crate::Error;
use crate::types_rs::FileAttachment;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// 需要放到batch外层的字段
const HOISTED_BATCH_KEYS: [&str; 3] = ["as_group", "comment", "url_attachments"];

/// 规范化后的请求body，一次请求只会发送其中一种
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalBody {
    /// `{"job": {...}}`
    Job(Map<String, Value>),
    /// `{"jobs": {...}, "as_group": ..., "comment": ..., "attachments": [...]}`
    JobBatch(Map<String, Value>),
    Comment(Value),
    Action(Value),
}

impl CanonicalBody {
    /// 紧凑格式的JSON文本，作为`data`字段的值
    pub fn to_data(&self) -> Result<String, serde_json::Error> {
        match self {
            CanonicalBody::Job(m) | CanonicalBody::JobBatch(m) => serde_json::to_string(m),
            CanonicalBody::Comment(v) | CanonicalBody::Action(v) => serde_json::to_string(v),
        }
    }
}

/// 需要以multipart上传的文件
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub field_name: String,
    pub attachment: FileAttachment,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Payload {
    pub(crate) job: Option<Map<String, Value>>,
    pub(crate) jobs: Option<Map<String, Value>>,
    pub(crate) comment: Option<Value>,
    pub(crate) action: Option<Value>,
    pub(crate) file_attachments: Vec<PathBuf>,
}

impl Payload {
    /// 从参数中取出body相关的字段，剩下的参数用于url和query
    pub(crate) fn extract(args: &mut Map<String, Value>) -> Result<Self, Error> {
        let mut payload = Payload::default();

        if let Some(job) = args.remove("job") {
            let mut wrapper = Map::new();
            wrapper.insert("job".to_owned(), job);
            payload.job = Some(wrapper);
        }

        if let Some(jobs) = args.remove("jobs") {
            payload.jobs = Some(into_job_batch(jobs));
        }

        payload.comment = args.remove("comment");
        payload.action = args.remove("action");

        if let Some(job_ids) = args.remove("job_ids") {
            match payload.action.as_mut() {
                Some(Value::Object(action)) if !action.contains_key("job_ids") => {
                    action.insert("job_ids".to_owned(), job_ids);
                }
                _ => tracing::warn!("`job_ids` is only sent inside an action, ignored"),
            }
        }

        if let Some(files) = args.remove("file_attachments") {
            payload.file_attachments = parse_file_attachments(files)?;
        }

        Ok(payload)
    }

    /// 把job、job列表中的每个job、comment中的`url_attachments`改名为`attachments`
    pub(crate) fn normalize_url_attachments(&mut self) -> Result<(), Error> {
        if let Some(Value::Object(job)) = self.job.as_mut().and_then(|w| w.get_mut("job")) {
            rename_url_attachments(job)?;
        }

        if let Some(batch) = self.jobs.as_mut() {
            rename_url_attachments(batch)?;
            for job in batch_members_mut(batch) {
                if let Value::Object(job) = job {
                    rename_url_attachments(job)?;
                }
            }
        }

        if let Some(Value::Object(comment)) = self.comment.as_mut() {
            rename_url_attachments(comment)?;
        }

        Ok(())
    }

    /// 找出`type`为`file`且带有`file_path`的job
    ///
    /// 每个文件使用`file_<job key>`作为multipart字段名，job中的`file_path`会被删除，
    /// 同时添加`file_key`以便服务端对应job和文件
    pub(crate) fn stage_uploads(&mut self) -> Vec<StagedFile> {
        let mut staged = Vec::new();
        let Some(Value::Object(jobs)) = self.jobs.as_mut().and_then(|b| b.get_mut("jobs")) else {
            return staged;
        };

        for (key, job) in jobs.iter_mut() {
            if let Value::Object(job) = job {
                if let Some(file) = take_file_job(job, key) {
                    staged.push(file);
                }
            }
        }
        staged
    }

    /// comment的附件，需要和comment的`body`一起以multipart发送
    pub(crate) fn stage_comment_attachments(
        &self,
    ) -> Result<(Option<String>, Vec<StagedFile>), Error> {
        if self.file_attachments.is_empty() {
            return Ok((None, Vec::new()));
        }
        let body = self
            .comment
            .as_ref()
            .and_then(|c| c.get("body"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::InvalidAttachment(
                    "file_attachments requires a comment with a text body".to_owned(),
                )
            })?;

        let files = self
            .file_attachments
            .iter()
            .map(|path| StagedFile {
                field_name: "file_attachments".to_owned(),
                attachment: FileAttachment {
                    path: path.clone(),
                    mime_type: None,
                },
            })
            .collect();
        Ok((Some(body.to_owned()), files))
    }

    /// 按`job` > `jobs` > `comment` > `action`的顺序选出需要发送的body
    pub(crate) fn canonical(&self) -> Option<CanonicalBody> {
        if let Some(job) = &self.job {
            Some(CanonicalBody::Job(job.clone()))
        } else if let Some(jobs) = &self.jobs {
            Some(CanonicalBody::JobBatch(jobs.clone()))
        } else if let Some(comment) = &self.comment {
            Some(CanonicalBody::Comment(comment.clone()))
        } else {
            self.action.clone().map(CanonicalBody::Action)
        }
    }
}

// 有两种传法，都只提取HOISTED_BATCH_KEYS中的字段，其它字段会被丢弃：
// 1. `{"jobs": {"job_1": {...}}, "as_group": 1, ...}`
// 2. `{"job_1": {...}, "as_group": 1}`
fn into_job_batch(jobs: Value) -> Map<String, Value> {
    let mut batch = Map::new();
    let Value::Object(mut m) = jobs else {
        batch.insert("jobs".to_owned(), jobs);
        return batch;
    };

    let hoisted = HOISTED_BATCH_KEYS
        .iter()
        .filter_map(|k| m.remove(*k).map(|v| ((*k).to_owned(), v)))
        .collect::<Vec<_>>();
    let list = match m.remove("jobs") {
        Some(inner) => {
            if !m.is_empty() {
                let dropped = m.keys().cloned().collect::<Vec<_>>();
                tracing::warn!(?dropped, "unknown batch fields, ignored");
            }
            inner
        }
        None => Value::Object(m),
    };
    batch.insert("jobs".to_owned(), list);
    batch.extend(hoisted);
    batch
}

fn batch_members_mut(batch: &mut Map<String, Value>) -> Box<dyn Iterator<Item = &mut Value> + '_> {
    match batch.get_mut("jobs") {
        Some(Value::Object(m)) => Box::new(m.values_mut()),
        Some(Value::Array(list)) => Box::new(list.iter_mut()),
        _ => Box::new(std::iter::empty()),
    }
}

fn rename_url_attachments(obj: &mut Map<String, Value>) -> Result<(), Error> {
    if let Some(v) = obj.remove("url_attachments") {
        if !v.is_array() {
            return Err(Error::InvalidAttachment(
                "url_attachments must be a list".to_owned(),
            ));
        }
        obj.insert("attachments".to_owned(), v);
    }
    Ok(())
}

fn take_file_job(job: &mut Map<String, Value>, key: &str) -> Option<StagedFile> {
    if job.get("type").and_then(Value::as_str) != Some("file") {
        return None;
    }
    let path = job.get("file_path").and_then(Value::as_str)?.to_owned();
    let mime_type = job
        .get("mimetype")
        .or_else(|| job.get("mime_type"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    let field_name = format!("file_{key}");
    job.remove("file_path");
    job.insert("file_key".to_owned(), Value::String(field_name.clone()));

    Some(StagedFile {
        field_name,
        attachment: FileAttachment {
            path: PathBuf::from(path),
            mime_type,
        },
    })
}

fn parse_file_attachments(files: Value) -> Result<Vec<PathBuf>, Error> {
    let Value::Array(list) = files else {
        return Err(Error::InvalidAttachment(
            "file_attachments must be a list of file paths".to_owned(),
        ));
    };
    list.into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(PathBuf::from(s)),
            other => Err(Error::InvalidAttachment(format!(
                "file attachment path must be a string, got: {other}"
            ))),
        })
        .collect()
}
