use std::fmt;
use std::str::FromStr;

/// The closed set of proxied topic commands. Anything outside this set is
/// rejected before a request body is even parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicCommand {
    Add,
    Clone,
    AuthControl,
    Modify,
    Delete,
    Remove,
    QueryCanWrite,
    Publish,
    Subscribe,
}

impl TopicCommand {
    pub const ALL: [TopicCommand; 9] = [
        TopicCommand::Add,
        TopicCommand::Clone,
        TopicCommand::AuthControl,
        TopicCommand::Modify,
        TopicCommand::Delete,
        TopicCommand::Remove,
        TopicCommand::QueryCanWrite,
        TopicCommand::Publish,
        TopicCommand::Subscribe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCommand::Add => "add",
            TopicCommand::Clone => "clone",
            TopicCommand::AuthControl => "authControl",
            TopicCommand::Modify => "modify",
            TopicCommand::Delete => "delete",
            TopicCommand::Remove => "remove",
            TopicCommand::QueryCanWrite => "queryCanWrite",
            TopicCommand::Publish => "publish",
            TopicCommand::Subscribe => "subscribe",
        }
    }
}

impl fmt::Display for TopicCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown topic command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for TopicCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|command| command.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
