use serde::Serialize;

pub mod contact;

/// Outcome of a request, as seen by the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRelayResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Machine readable reason for rejected input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl ApiRelayResult {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
            code: None,
        }
    }

    pub fn failure(error: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            code: None,
        }
    }

    pub fn rejected(error: &'static str, code: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            code: Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serialize() {
        for (result, expected) in [
            (ApiRelayResult::success(), json!({"success": true})),
            (
                ApiRelayResult::failure("Could not send message"),
                json!({"success": false, "error": "Could not send message"}),
            ),
            (
                ApiRelayResult::rejected("Invalid contact submission", "invalid_submission"),
                json!({
                    "success": false,
                    "error": "Invalid contact submission",
                    "code": "invalid_submission",
                }),
            ),
        ] {
            assert_eq!(serde_json::to_value(result).unwrap(), expected);
        }
    }
}
