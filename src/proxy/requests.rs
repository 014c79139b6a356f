use serde::{Deserialize, Serialize};

/// Operation type stamped onto rewritten admin requests.
pub const OP_MODIFY: &str = "op_modify";

/// Master API method used for authorize-control updates.
pub const SET_AUTH_CONTROL: &str = "set_auth_control";

/// Principal recorded on proxy-initiated admin operations.
pub const ADMIN_USER: &str = "admin";

/// One topic to be created on a set of brokers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTopicTask {
    pub topic_name: String,

    #[serde(default)]
    pub broker_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAddTopicRequest {
    pub cluster_id: i64,
    pub add_topic_tasks: Vec<AddTopicTask>,

    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneTopicRequest {
    pub cluster_id: i64,
    pub source_broker_id: i64,
    pub target_broker_ids: Vec<i64>,

    #[serde(default)]
    pub topic_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyTopicRequest {
    pub cluster_id: i64,
    pub topic_name: String,

    #[serde(default)]
    pub broker_ids: Vec<i64>,

    #[serde(default)]
    pub unflush_threshold: Option<i64>,

    #[serde(default)]
    pub unflush_interval: Option<i64>,

    #[serde(default)]
    pub accept_publish: Option<bool>,

    #[serde(default)]
    pub accept_subscribe: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTopicRequest {
    pub cluster_id: i64,
    pub topic_name: String,

    #[serde(default)]
    pub broker_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCanWriteRequest {
    #[serde(default)]
    pub cluster_id: Option<i64>,

    #[serde(default)]
    pub topic_name: Option<String>,
}

impl QueryCanWriteRequest {
    /// A writability query needs both a topic and a cluster to be answerable.
    pub fn is_legal(&self) -> bool {
        self.cluster_id.is_some()
            && self
                .topic_name
                .as_deref()
                .is_some_and(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAuthControlRequest {
    pub cluster_id: i64,
    pub topic_name: String,
    pub auth_control_status: bool,

    #[serde(default)]
    pub method: Option<String>,

    #[serde(default, rename = "type")]
    pub op_type: Option<String>,

    #[serde(default)]
    pub create_user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPublishRequest {
    pub cluster_id: i64,
    pub topic_name: String,
    pub accept_publish: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSubscribeRequest {
    pub cluster_id: i64,
    pub topic_name: String,
    pub accept_subscribe: bool,
}
