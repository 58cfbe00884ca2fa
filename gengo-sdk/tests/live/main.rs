//! 使用sandbox账户的测试，需要在`tests/live/config.toml`中配置:
//!
//! ```toml
//! public_key = "..."
//! private_key = "..."
//! ```

use gengo_sdk::*;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, Debug)]
pub struct GengoConfig {
    pub public_key: String,
    pub private_key: String,
}

impl GengoConfig {
    pub fn get_conf() -> Self {
        let file_str = std::fs::read_to_string("tests/live/config.toml").unwrap();
        toml::from_str(&file_str).unwrap()
    }
}

fn get_client() -> Client {
    let conf = GengoConfig::get_conf();
    Client::builder()
        .public_key(conf.public_key)
        .private_key(conf.private_key)
        .sandbox(true)
        .debug(true)
        .build()
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn get_account_balance_test() {
    let client = get_client();
    let res = client.get_account_balance(&Value::Null).await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn get_service_language_pairs_test() {
    let client = get_client();
    let res = client
        .get_service_language_pairs(&json!({"lc_src": "en"}))
        .await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn determine_translation_cost_test() {
    let client = get_client();
    let res = client
        .determine_translation_cost(&json!({
            "jobs": {
                "jobs": {
                    "job_1": {
                        "type": "text",
                        "body_src": "Testing Gengo API library calls.",
                        "lc_src": "en",
                        "lc_tgt": "ja",
                        "tier": "standard",
                    }
                }
            }
        }))
        .await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn post_and_get_translation_jobs_test() {
    let client = get_client();
    let res = client
        .post_translation_jobs(&json!({
            "jobs": {
                "jobs": {
                    "job_1": {
                        "type": "text",
                        "slug": "Single :: English to Japanese",
                        "body_src": "Testing Gengo API library calls.",
                        "lc_src": "en",
                        "lc_tgt": "ja",
                        "tier": "standard",
                        "auto_approve": 0,
                    }
                },
                "as_group": 0,
            }
        }))
        .await;
    let order = match res {
        Ok(s) => {
            println!("[success] res:\n{:#?}", s);
            s
        }
        Err(e) => {
            println!("[error] {:#?}", e);
            return;
        }
    };

    let order_id = &order["response"]["order_id"];
    let res = client
        .get_translation_order_jobs(&json!({"id": order_id}))
        .await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn get_translation_jobs_test() {
    let client = get_client();
    let res = client
        .get_translation_jobs(&json!({"status": "available", "count": 5}))
        .await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn invalid_key_test() {
    let client = Client::builder()
        .public_key("")
        .private_key("")
        .sandbox(true)
        .build()
        .unwrap();
    let res = client.get_account_stats(&Value::Null).await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] auth: {}, {:#?}", e.is_auth(), e),
    }
}
