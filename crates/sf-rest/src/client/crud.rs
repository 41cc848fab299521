use forcelink_client::{HttpMethod, Transport};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::require;
use crate::error::Result;
use crate::json::JsonExt;
use crate::record::RecordCodec;

/// Salesforce answers a successful PATCH or DELETE with 204 No Content.
const NO_CONTENT: u16 = 204;

impl<T: Transport> super::SalesforceRestClient<T> {
    /// Create a new record.
    ///
    /// Returns the ID of the created record. `record` is sent exactly as it
    /// serializes; use [`RecordCodec::for_create`] to drop read-only fields
    /// first.
    #[instrument(skip(self, record))]
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        object_name: &str,
        record: &B,
    ) -> Result<String> {
        require("object_name", object_name)?;
        let body = RecordCodec::encode(record)?;

        let base_url = self.base_url()?;
        let path = format!("sobjects/{object_name}");
        let response = self
            .request(&base_url, &path, Some(body), HttpMethod::Post)
            .await?;

        let created: Value = RecordCodec::decode(response.body())?;
        Ok(created.str_field("id")?.to_string())
    }

    /// Update an existing record.
    ///
    /// Returns `true` when the server answered 204, `false` for any other
    /// success status.
    #[instrument(skip(self, record))]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        object_name: &str,
        record_id: &str,
        record: &B,
    ) -> Result<bool> {
        require("object_name", object_name)?;
        require("record_id", record_id)?;
        let body = RecordCodec::encode(record)?;

        let base_url = self.base_url()?;
        let path = format!("sobjects/{object_name}/{record_id}");
        let response = self
            .request(&base_url, &path, Some(body), HttpMethod::Patch)
            .await?;

        Ok(response.status() == NO_CONTENT)
    }

    /// Delete a record.
    ///
    /// Returns `true` when the server answered 204, `false` for any other
    /// success status.
    #[instrument(skip(self))]
    pub async fn delete(&self, object_name: &str, record_id: &str) -> Result<bool> {
        require("object_name", object_name)?;
        require("record_id", record_id)?;

        let base_url = self.base_url()?;
        let path = format!("sobjects/{object_name}/{record_id}");
        let response = self
            .request(&base_url, &path, None, HttpMethod::Delete)
            .await?;

        Ok(response.status() == NO_CONTENT)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::record::{FieldSpec, Record, RecordCodec};
    use crate::testing::FakeTransport;
    use crate::SalesforceRestClient;
    use forcelink_auth::OAuthTokenFlow;
    use forcelink_client::{HttpMethod, Response};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Account {
        #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(rename = "Name")]
        name: String,
    }

    impl Record for Account {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::wire("id", "Id").read_only(),
            FieldSpec::wire("name", "Name"),
        ];
    }

    async fn authenticated(transport: FakeTransport) -> SalesforceRestClient<FakeTransport> {
        let mut client = SalesforceRestClient::with_transport(transport);
        client
            .authenticate(&OAuthTokenFlow::new("tok", "https://x"))
            .await
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let transport = FakeTransport::new().respond(Response::new(
            201,
            r#"{"id":"001xx","success":true,"errors":[]}"#,
        ));
        let client = authenticated(transport).await;

        let id = client
            .create("Account", &json!({"Name": "Acme"}))
            .await
            .unwrap();
        assert_eq!(id, "001xx");

        let request = &client.transport().requests()[0];
        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(
            request.url(),
            "https://x/services/data/v28.0/sobjects/Account"
        );
        assert_eq!(request.body(), Some(&json!({"Name": "Acme"})));
    }

    #[tokio::test]
    async fn test_create_with_filtered_record() {
        let transport = FakeTransport::new().respond(Response::new(201, r#"{"id":"001xx"}"#));
        let client = authenticated(transport).await;

        let account = Account {
            id: Some("ignored".to_string()),
            name: "Acme".to_string(),
        };
        let body = RecordCodec::for_create(&account).unwrap();
        client.create("Account", &body).await.unwrap();

        assert_eq!(
            client.transport().requests()[0].body(),
            Some(&json!({"Name": "Acme"}))
        );
    }

    #[tokio::test]
    async fn test_create_missing_id_is_decode_error() {
        let transport = FakeTransport::new().respond(Response::new(201, r#"{"success":true}"#));
        let client = authenticated(transport).await;

        let err = client
            .create("Account", &json!({"Name": "Acme"}))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_api_error() {
        let transport = FakeTransport::new().respond(Response::new(
            400,
            r#"[{"errorCode":"REQUIRED_FIELD_MISSING","message":"Required fields are missing: [Name]","fields":["Name"]}]"#,
        ));
        let client = authenticated(transport).await;

        let err = client.create("Account", &json!({})).await.unwrap_err();
        assert_eq!(err.api_error_code(), Some("REQUIRED_FIELD_MISSING"));
        assert_eq!(err.api_error_fields(), Some(&["Name".to_string()][..]));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_arguments() {
        let client = authenticated(FakeTransport::new()).await;

        let err = client.create("", &json!({"Name": "Acme"})).await.unwrap_err();
        assert!(err.is_invalid_argument());

        let err = client
            .create("Account", &Option::<Account>::None)
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());

        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_returns_true_on_no_content() {
        let transport = FakeTransport::new().respond(Response::new(204, ""));
        let client = authenticated(transport).await;

        let updated = client
            .update("Account", "001xx", &json!({"Name": "Renamed"}))
            .await
            .unwrap();
        assert!(updated);

        let request = &client.transport().requests()[0];
        assert_eq!(request.method(), HttpMethod::Patch);
        assert_eq!(
            request.url(),
            "https://x/services/data/v28.0/sobjects/Account/001xx"
        );
    }

    #[tokio::test]
    async fn test_update_returns_false_on_other_success() {
        let transport = FakeTransport::new().respond(Response::new(200, "{}"));
        let client = authenticated(transport).await;

        let updated = client
            .update("Account", "001xx", &json!({"Name": "Renamed"}))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_arguments() {
        let client = authenticated(FakeTransport::new()).await;

        assert!(client
            .update("", "001xx", &json!({}))
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(client
            .update("Account", "", &json!({}))
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let transport = FakeTransport::new()
            .respond(Response::new(204, ""))
            .respond(Response::new(200, ""));
        let client = authenticated(transport).await;

        assert!(client.delete("Account", "001xx").await.unwrap());
        assert!(!client.delete("Account", "001xx").await.unwrap());

        let request = &client.transport().requests()[0];
        assert_eq!(request.method(), HttpMethod::Delete);
        assert!(request.body().is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let transport = FakeTransport::new().respond(Response::new(
            404,
            r#"[{"errorCode":"NOT_FOUND","message":"The requested resource does not exist"}]"#,
        ));
        let client = authenticated(transport).await;

        let err = client.delete("Account", "001xx").await.unwrap_err();
        assert_eq!(err.api_error_code(), Some("NOT_FOUND"));
        assert_eq!(err.api_error_fields(), None);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_unchanged() {
        let failure = forcelink_client::Error::new(forcelink_client::ErrorKind::Timeout);
        let transport = FakeTransport::new().respond(Response::failed(failure));
        let client = authenticated(transport).await;

        let err = client.delete("Account", "001xx").await.unwrap_err();
        match err.kind {
            ErrorKind::Transport(inner) => assert!(inner.is_timeout()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_every_operation_requires_authentication() {
        let client = SalesforceRestClient::with_transport(FakeTransport::new());
        let record = json!({"Name": "Acme"});

        assert!(client
            .create("Account", &record)
            .await
            .unwrap_err()
            .is_not_authenticated());
        assert!(client
            .update("Account", "001xx", &record)
            .await
            .unwrap_err()
            .is_not_authenticated());
        assert!(client
            .delete("Account", "001xx")
            .await
            .unwrap_err()
            .is_not_authenticated());
        assert!(client
            .query::<serde_json::Value>("SELECT Id FROM Account")
            .await
            .unwrap_err()
            .is_not_authenticated());
        assert!(client
            .query_all::<serde_json::Value>("SELECT Id FROM Account")
            .await
            .unwrap_err()
            .is_not_authenticated());
        assert!(client
            .query_more::<serde_json::Value>("/services/data/v28.0/query/01gxx-2000")
            .await
            .unwrap_err()
            .is_not_authenticated());

        assert!(client.transport().requests().is_empty());
    }
}
