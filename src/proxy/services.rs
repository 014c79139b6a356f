use crate::proxy::requests::{
    BatchAddTopicRequest, CloneTopicRequest, DeleteTopicRequest, ModifyTopicRequest,
    SetAuthControlRequest, SetPublishRequest, SetSubscribeRequest,
};
use crate::proxy::result::BrokerResult;

/// A typed request forwarded verbatim to the cluster master.
#[derive(Debug, Clone)]
pub enum MasterRequest {
    AddTopics(BatchAddTopicRequest),
    ModifyTopic(ModifyTopicRequest),
    DeleteTopic(DeleteTopicRequest),
    AuthControl(SetAuthControlRequest),
    Publish(SetPublishRequest),
    Subscribe(SetSubscribeRequest),
}

/// Gateway to the message-queue cluster master. Implementations live with
/// the cluster integration, outside this crate.
pub trait MasterService {
    fn forward_to_master(&self, request: MasterRequest) -> BrokerResult;
}

/// Broker-node orchestration operations.
pub trait NodeService {
    fn clone_topic_to_brokers(&self, request: CloneTopicRequest) -> BrokerResult;
}

/// Topic metadata queries.
pub trait TopicService {
    fn query_can_write(&self, topic_name: &str, cluster_id: i64) -> BrokerResult;
}
