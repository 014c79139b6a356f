use std::cell::RefCell;

use sinkddl::proxy::requests::CloneTopicRequest;
use sinkddl::proxy::result::{MSG_INVALID_JSON, MSG_INVALID_METHOD};
use sinkddl::proxy::{BrokerResult, MasterRequest, MasterService, NodeService, TopicCommand, TopicProxy, TopicService};

#[derive(Default)]
struct StubMaster {
    forwarded: RefCell<usize>,
}

impl MasterService for StubMaster {
    fn forward_to_master(&self, _request: MasterRequest) -> BrokerResult {
        *self.forwarded.borrow_mut() += 1;
        BrokerResult::ok()
    }
}

#[derive(Default)]
struct StubNodes;

impl NodeService for StubNodes {
    fn clone_topic_to_brokers(&self, _request: CloneTopicRequest) -> BrokerResult {
        BrokerResult::ok()
    }
}

#[derive(Default)]
struct StubTopics;

impl TopicService for StubTopics {
    fn query_can_write(&self, _topic_name: &str, _cluster_id: i64) -> BrokerResult {
        BrokerResult::ok_with_data(serde_json::json!({"canWrite": false}))
    }
}

#[test]
fn every_command_in_the_closed_set_dispatches() {
    let master = StubMaster::default();
    let nodes = StubNodes;
    let topics = StubTopics;
    let proxy = TopicProxy {
        master: &master,
        nodes: &nodes,
        topics: &topics,
    };

    let bodies = [
        ("add", r#"{"clusterId":1,"addTopicTasks":[{"topicName":"t"}]}"#),
        ("clone", r#"{"clusterId":1,"sourceBrokerId":1,"targetBrokerIds":[2]}"#),
        (
            "authControl",
            r#"{"clusterId":1,"topicName":"t","authControlStatus":true}"#,
        ),
        ("modify", r#"{"clusterId":1,"topicName":"t"}"#),
        ("delete", r#"{"clusterId":1,"topicName":"t"}"#),
        ("remove", r#"{"clusterId":1,"topicName":"t"}"#),
        ("queryCanWrite", r#"{"clusterId":1,"topicName":"t"}"#),
        ("publish", r#"{"clusterId":1,"topicName":"t","acceptPublish":true}"#),
        (
            "subscribe",
            r#"{"clusterId":1,"topicName":"t","acceptSubscribe":true}"#,
        ),
    ];

    assert_eq!(bodies.len(), TopicCommand::ALL.len());
    for (method, body) in bodies {
        let result = proxy.dispatch(method, body);
        assert!(result.is_success(), "{} failed: {}", method, result.err_msg);
    }

    // add, authControl, modify, delete, remove, publish, subscribe
    assert_eq!(*master.forwarded.borrow(), 7);
}

#[test]
fn rejections_happen_before_any_service_call() {
    let master = StubMaster::default();
    let nodes = StubNodes;
    let topics = StubTopics;
    let proxy = TopicProxy {
        master: &master,
        nodes: &nodes,
        topics: &topics,
    };

    let unknown = proxy.dispatch("truncate", r#"{"clusterId":1}"#);
    assert_eq!(unknown.err_msg, MSG_INVALID_METHOD);

    let malformed = proxy.dispatch("add", "{broken");
    assert_eq!(malformed.err_msg, MSG_INVALID_JSON);

    assert_eq!(*master.forwarded.borrow(), 0);
}

#[test]
fn downstream_result_passes_through_unchanged() {
    let master = StubMaster::default();
    let nodes = StubNodes;
    let topics = StubTopics;
    let proxy = TopicProxy {
        master: &master,
        nodes: &nodes,
        topics: &topics,
    };

    let result = proxy.dispatch("queryCanWrite", r#"{"clusterId":1,"topicName":"t"}"#);
    assert!(result.is_success());
    assert_eq!(result.data.unwrap()["canWrite"], false);
}
