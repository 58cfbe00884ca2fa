use crate::Error;
use bon::bon;
use gengo_sdk_common::helper::into_header_map;
use reqwest::header::{ACCEPT, HeaderValue};
use std::collections::HashMap;

/// `{version}`会在创建client时替换为`v2`这样的形式
pub const API_URL: &str = "https://api.gengo.com/{version}";
pub const SANDBOX_API_URL: &str = "http://api.sandbox.gengo.com/{version}";
pub const SUPPORTED_API_VERSIONS: [u32; 1] = [2];

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_owned(),
        format!(
            "Gengo Rust Library; Version {}; http://gengo.com/",
            env!("CARGO_PKG_VERSION")
        ),
    );
    headers
}

pub struct Client {
    pub(crate) public_key: Option<String>,
    pub(crate) private_key: Option<String>,
    pub(crate) api_url: String,
    pub(crate) debug: bool,
    pub(crate) http_client: reqwest::Client,
}

#[bon]
impl Client {
    /// - `public_key`/`private_key`：不传时请求中不会带上`api_key`/`api_sig`，由服务端返回认证错误
    /// - `sandbox`：使用沙箱环境
    /// - `api_url`：覆盖默认的地址，可以包含`{version}`，也可以直接写死如`https://xx/v2`
    /// - `headers`：替换默认的请求头，`Accept: application/json`总是会被加上
    /// - `debug`：输出请求信息到tracing，JSON解析失败时的错误信息包含原始响应
    /// - `danger_accept_invalid_certs`：不校验TLS证书，只应在测试环境中使用
    #[builder]
    pub fn new(
        #[builder(into)] public_key: Option<String>,
        #[builder(into)] private_key: Option<String>,
        #[builder(default)] sandbox: bool,
        #[builder(into)] api_url: Option<String>,
        #[builder(default = 2)] api_version: u32,
        headers: Option<HashMap<String, String>>,
        #[builder(default)] debug: bool,
        #[builder(default)] danger_accept_invalid_certs: bool,
    ) -> Result<Self, Error> {
        if !SUPPORTED_API_VERSIONS.contains(&api_version) {
            return Err(Error::UnsupportedApiVersion(api_version));
        }

        let api_url = api_url
            .unwrap_or_else(|| {
                if sandbox {
                    SANDBOX_API_URL.to_owned()
                } else {
                    API_URL.to_owned()
                }
            })
            .replace("{version}", &format!("v{api_version}"))
            .trim_end_matches('/')
            .to_owned();

        let headers = headers.unwrap_or_else(default_headers);
        let mut header_map = into_header_map(&headers)?;
        header_map.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(header_map)
            .danger_accept_invalid_certs(danger_accept_invalid_certs)
            .build()?;

        Ok(Self {
            public_key,
            private_key,
            api_url,
            debug,
            http_client,
        })
    }

    /// 已经替换了`{version}`的api地址
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}
