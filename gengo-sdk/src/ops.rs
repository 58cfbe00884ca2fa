//! 每个api对应的方法，参数和返回值同[`Client::invoke`]

use crate::{Client, Error};
use serde_json::Value;

macro_rules! operations {
    ($($(#[$doc:meta])* $fn_name:ident => $operation:literal;)*) => {
        impl Client {
            $(
                $(#[$doc])*
                pub async fn $fn_name(&self, args: &Value) -> Result<Value, Error> {
                    self.invoke($operation, args).await
                }
            )*
        }

        /// 所有方法对应的api名称
        pub const OPERATION_NAMES: &[&str] = &[$($operation),*];
    };
}

operations! {
    // region    --- account
    /// 账户统计信息
    get_account_stats => "getAccountStats";
    /// 账户余额
    get_account_balance => "getAccountBalance";
    /// 当前认证用户的信息
    get_account_me => "getAccountMe";
    get_preferred_translators => "getPreferredTranslators";
    // endregion --- account

    // region    --- jobs
    /// 提交多个job，参数`jobs`
    post_translation_jobs => "postTranslationJobs";
    /// 参数：`id`，`action`
    update_translation_job => "updateTranslationJob";
    /// 参数`action`，其中包含`job_ids`
    update_translation_jobs => "updateTranslationJobs";
    /// 参数：`id`
    get_translation_job => "getTranslationJob";
    get_translation_jobs => "getTranslationJobs";
    get_translation_job_batch => "getTranslationJobBatch";
    /// 报价，`type`为`file`的job可以通过`file_path`上传本地文件
    determine_translation_cost => "determineTranslationCost";
    /// 参数：`id`，`comment`，可选`file_attachments`
    post_translation_job_comment => "postTranslationJobComment";
    get_translation_job_comments => "getTranslationJobComments";
    get_translation_job_feedback => "getTranslationJobFeedback";
    get_translation_job_revisions => "getTranslationJobRevisions";
    /// 参数：`id`，`revision_id`
    get_translation_job_revision => "getTranslationJobRevision";
    delete_translation_job => "deleteTranslationJob";
    // endregion --- jobs

    // region    --- language service
    get_service_language_pairs => "getServiceLanguagePairs";
    get_service_languages => "getServiceLanguages";
    get_service_language_matrix => "getServiceLanguageMatrix";
    // endregion --- language service

    // region    --- glossary
    get_glossary_list => "getGlossaryList";
    get_glossary => "getGlossary";
    // endregion --- glossary

    // region    --- order
    get_translation_order_jobs => "getTranslationOrderJobs";
    delete_translation_order => "deleteTranslationOrder";
    post_order_comment => "postOrderComment";
    get_order_comments => "getOrderComments";
    // endregion --- order
}

#[test]
fn every_endpoint_has_a_method() {
    use crate::endpoint::{ENDPOINTS, lookup};

    assert_eq!(OPERATION_NAMES.len(), ENDPOINTS.len());
    for name in OPERATION_NAMES {
        assert!(lookup(name).is_ok(), "{name} is not registered");
    }
}
