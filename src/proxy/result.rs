use serde::{Deserialize, Serialize};

pub const SUCCESS_CODE: i32 = 0;
pub const ERROR_CODE: i32 = -1;

pub const MSG_SUCCESS: &str = "success";
pub const MSG_INVALID_METHOD: &str = "Invalid method value.";
pub const MSG_INVALID_JSON: &str = "Invalid JSON format.";
pub const MSG_PARAM_ILLEGAL: &str = "illegal parameter value";

/// Structured outcome of a proxied command. Every failure mode maps to a
/// result value; callers never see a raw error from this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerResult {
    pub err_code: i32,
    pub err_msg: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl BrokerResult {
    pub fn ok() -> Self {
        Self {
            err_code: SUCCESS_CODE,
            err_msg: MSG_SUCCESS.to_string(),
            data: None,
        }
    }

    pub fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            err_code: SUCCESS_CODE,
            err_msg: MSG_SUCCESS.to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            err_code: ERROR_CODE,
            err_msg: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.err_code == SUCCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_without_empty_data() {
        let json = serde_json::to_string(&BrokerResult::ok()).unwrap();
        assert_eq!(json, r#"{"errCode":0,"errMsg":"success"}"#);
    }

    #[test]
    fn error_results_carry_the_message() {
        let result = BrokerResult::error(MSG_INVALID_METHOD);
        assert!(!result.is_success());
        assert_eq!(result.err_msg, "Invalid method value.");
    }
}
