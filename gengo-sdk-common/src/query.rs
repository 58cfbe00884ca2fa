use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::form_urlencoded;

/// 把参数值转换为query中使用的文本
///
/// - 字符串原样输出，不带引号
/// - 数字、布尔值使用其字面量
/// - null输出空字符串
/// - 数组和对象输出紧凑的JSON文本
pub fn value_to_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => v.to_string(),
    }
}

/// 参数转为排序好的query map，key相同时以后出现的为准
pub fn to_query_map(args: Map<String, Value>) -> BTreeMap<String, String> {
    args.into_iter()
        .map(|(k, v)| {
            let text = value_to_text(&v);
            (k, text)
        })
        .collect()
}

/// 按key的顺序进行urlencode，每个值只编码一次(UTF-8)
pub fn encode_query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}
