//! Topic-command proxy.
//!
//! Validates a command name against a closed set plus a JSON request body,
//! then dispatches to the backing cluster services. The HTTP layer mounting
//! this, and the services themselves, are external collaborators; everything
//! here returns a structured result rather than a transport failure.

pub mod dispatch;
pub mod method;
pub mod requests;
pub mod result;
pub mod services;

pub use dispatch::TopicProxy;
pub use method::TopicCommand;
pub use result::BrokerResult;
pub use services::{MasterRequest, MasterService, NodeService, TopicService};
