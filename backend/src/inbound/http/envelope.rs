//! Success body: `{status:true, msg, ...payload}`.

use actix_web::HttpResponse;
use serde::Serialize;

/// Success envelope with the payload's fields flattened beside `msg`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    status: bool,
    msg: &'static str,
    #[serde(flatten)]
    payload: T,
}

/// Payload for responses that carry only a message.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

impl<T: Serialize> Envelope<T> {
    pub fn new(msg: &'static str, payload: T) -> Self {
        Self {
            status: true,
            msg,
            payload,
        }
    }

    /// Render as `200 OK`.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

impl Envelope<Empty> {
    pub fn message(msg: &'static str) -> Self {
        Self::new(msg, Empty {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Token {
        token: &'static str,
    }

    #[test]
    fn payload_fields_sit_beside_msg() {
        let value = serde_json::to_value(Envelope::new("Login successful..", Token { token: "t" }))
            .expect("serialise");
        assert_eq!(
            value,
            json!({"status": true, "msg": "Login successful..", "token": "t"})
        );
    }

    #[test]
    fn message_only_envelope() {
        let value = serde_json::to_value(Envelope::message("Task deleted successfully.."))
            .expect("serialise");
        assert_eq!(
            value,
            json!({"status": true, "msg": "Task deleted successfully.."})
        );
    }
}
