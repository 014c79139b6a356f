use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::proxy::method::TopicCommand;
use crate::proxy::requests::{
    BatchAddTopicRequest, CloneTopicRequest, DeleteTopicRequest, ModifyTopicRequest,
    QueryCanWriteRequest, SetAuthControlRequest, SetPublishRequest, SetSubscribeRequest,
    ADMIN_USER, OP_MODIFY, SET_AUTH_CONTROL,
};
use crate::proxy::result::{BrokerResult, MSG_INVALID_JSON, MSG_INVALID_METHOD, MSG_PARAM_ILLEGAL};
use crate::proxy::services::{MasterRequest, MasterService, NodeService, TopicService};

/// Command proxy over the backing cluster services.
///
/// Both `delete` and `remove` map to the delete request; `authControl` is
/// rewritten with the fixed admin operation fields before forwarding.
pub struct TopicProxy<'a> {
    pub master: &'a dyn MasterService,
    pub nodes: &'a dyn NodeService,
    pub topics: &'a dyn TopicService,
}

impl TopicProxy<'_> {
    /// Validate the command name and JSON body, then dispatch.
    pub fn dispatch(&self, method: &str, body: &str) -> BrokerResult {
        info!("Received proxy command: {}", method);

        let Ok(command) = method.parse::<TopicCommand>() else {
            warn!("Invalid command value received: {}", method);
            return BrokerResult::error(MSG_INVALID_METHOD);
        };

        if serde_json::from_str::<serde_json::Value>(body).is_err() {
            warn!("Malformed JSON body for command: {}", command);
            return BrokerResult::error(MSG_INVALID_JSON);
        }

        match command {
            TopicCommand::Add => self.parse_then(body, |request: BatchAddTopicRequest| {
                self.master.forward_to_master(MasterRequest::AddTopics(request))
            }),
            TopicCommand::Clone => self.parse_then(body, |request: CloneTopicRequest| {
                self.nodes.clone_topic_to_brokers(request)
            }),
            TopicCommand::AuthControl => self.parse_then(body, |request: SetAuthControlRequest| {
                self.set_auth_control(request)
            }),
            TopicCommand::Modify => self.parse_then(body, |request: ModifyTopicRequest| {
                self.master.forward_to_master(MasterRequest::ModifyTopic(request))
            }),
            TopicCommand::Delete | TopicCommand::Remove => {
                self.parse_then(body, |request: DeleteTopicRequest| {
                    self.master.forward_to_master(MasterRequest::DeleteTopic(request))
                })
            }
            TopicCommand::QueryCanWrite => self.parse_then(body, |request: QueryCanWriteRequest| {
                self.query_can_write(request)
            }),
            TopicCommand::Publish => self.parse_then(body, |request: SetPublishRequest| {
                self.master.forward_to_master(MasterRequest::Publish(request))
            }),
            TopicCommand::Subscribe => self.parse_then(body, |request: SetSubscribeRequest| {
                self.master.forward_to_master(MasterRequest::Subscribe(request))
            }),
        }
    }

    fn parse_then<T, F>(&self, body: &str, handle: F) -> BrokerResult
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> BrokerResult,
    {
        match serde_json::from_str::<T>(body) {
            Ok(request) => handle(request),
            Err(e) => {
                warn!("Request body does not match command shape: {}", e);
                BrokerResult::error(format!("{} {}", MSG_INVALID_JSON, e))
            }
        }
    }

    fn set_auth_control(&self, mut request: SetAuthControlRequest) -> BrokerResult {
        request.method = Some(SET_AUTH_CONTROL.to_string());
        request.op_type = Some(OP_MODIFY.to_string());
        request.create_user = Some(ADMIN_USER.to_string());
        self.master.forward_to_master(MasterRequest::AuthControl(request))
    }

    fn query_can_write(&self, request: QueryCanWriteRequest) -> BrokerResult {
        if !request.is_legal() {
            return BrokerResult::error(MSG_PARAM_ILLEGAL);
        }
        // is_legal guarantees both fields are present
        let topic_name = request.topic_name.unwrap_or_default();
        let cluster_id = request.cluster_id.unwrap_or_default();
        self.topics.query_can_write(&topic_name, cluster_id)
    }
}
