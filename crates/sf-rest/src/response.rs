//! Turning raw transport responses into results.

use forcelink_client::Response;
use serde_json::Value;
use tracing::info;

use crate::error::{Error, ErrorKind, Result};
use crate::json::JsonExt;

/// Raise the response as an error when it is one.
///
/// 1. A status above 299 becomes [`ErrorKind::Api`], decoded from the first
///    element of the error array. A body that is not such an array becomes
///    `HTTP_<status>` with the raw body as the message.
/// 2. A transport failure is re-raised unchanged as [`ErrorKind::Transport`].
/// 3. Anything else is returned as is.
pub(crate) fn check_api_error(mut response: Response) -> Result<Response> {
    let status = response.status();
    if status > 299 {
        let kind = decode_api_error(response.body()).unwrap_or_else(|| ErrorKind::Api {
            code: format!("HTTP_{status}"),
            message: response.body().to_string(),
            fields: None,
        });
        info!(status, error = %kind, "Request failed");
        return Err(Error::new(kind));
    }

    if let Some(err) = response.take_transport_error() {
        info!(error = %err, "Request did not complete");
        return Err(err.into());
    }

    Ok(response)
}

fn decode_api_error(body: &str) -> Option<ErrorKind> {
    let value: Value = serde_json::from_str(body).ok()?;
    let first = value.first_element().ok()?;
    let code = first.str_field("errorCode").ok()?.to_string();
    let message = first.str_field("message").ok()?.to_string();
    let fields = first
        .array_field("fields")
        .map(|fields| fields.iter().map(JsonExt::to_text).collect());

    Some(ErrorKind::Api {
        code,
        message,
        fields,
    })
}
