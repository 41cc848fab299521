//! REST API integration tests against a live org.

use super::common::{authenticated_client, unique_name};
use forcelink::rest::soql;
use forcelink::{FieldSpec, Record, RecordCodec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Account {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description")]
    description: Option<String>,
}

impl Record for Account {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::wire("id", "Id").read_only(),
        FieldSpec::wire("name", "Name"),
        FieldSpec::wire("description", "Description"),
    ];
}

// ============================================================================
// REST API - CRUD round trip
// ============================================================================

#[tokio::test]
#[ignore = "requires a Salesforce org"]
async fn test_rest_crud_round_trip() {
    let client = authenticated_client().await;

    let mut account = Account {
        id: None,
        name: unique_name("forcelink CRUD"),
        description: Some("created by integration test".to_string()),
    };

    let id = client
        .create(
            "Account",
            &RecordCodec::for_create(&account).expect("create body"),
        )
        .await
        .expect("create should succeed");
    assert!(!id.is_empty());

    let fetched: Account = client
        .find_by_id("Account", &id)
        .await
        .expect("find_by_id should succeed")
        .expect("created account should be found");
    assert_eq!(fetched.name, account.name);

    account.name = unique_name("forcelink CRUD updated");
    let updated = client
        .update(
            "Account",
            &id,
            &RecordCodec::for_update(&account).expect("update body"),
        )
        .await
        .expect("update should succeed");
    assert!(updated);

    let deleted = client
        .delete("Account", &id)
        .await
        .expect("delete should succeed");
    assert!(deleted);

    let gone: Option<Account> = client
        .find_by_id("Account", &id)
        .await
        .expect("find_by_id should succeed");
    assert!(gone.is_none(), "deleted account should not be queryable");
}

// ============================================================================
// REST API - Query
// ============================================================================

#[tokio::test]
#[ignore = "requires a Salesforce org"]
async fn test_rest_query_with_escaped_value() {
    let client = authenticated_client().await;

    let name = "O'Brien & Co. (no such account)";
    let query = format!(
        "SELECT Id, Name FROM Account WHERE Name = '{}'",
        soql::escape_string(name)
    );
    let accounts: Vec<serde_json::Value> = client.query(&query).await.expect("query should succeed");
    assert!(accounts.is_empty());
}

#[tokio::test]
#[ignore = "requires a Salesforce org"]
async fn test_rest_query_all() {
    let client = authenticated_client().await;

    let users: Vec<serde_json::Value> = client
        .query_all("SELECT Id FROM User LIMIT 5")
        .await
        .expect("query_all should succeed");
    assert!(!users.is_empty(), "every org has at least one user");
}

// ============================================================================
// REST API - Errors
// ============================================================================

#[tokio::test]
#[ignore = "requires a Salesforce org"]
async fn test_rest_required_field_missing() {
    let client = authenticated_client().await;

    let err = client
        .create("Account", &serde_json::json!({"Description": "no name"}))
        .await
        .unwrap_err();
    assert_eq!(err.api_error_code(), Some("REQUIRED_FIELD_MISSING"));
}

#[tokio::test]
#[ignore = "requires a Salesforce org"]
async fn test_rest_delete_unknown_record() {
    let client = authenticated_client().await;

    let err = client.delete("Account", "001000000000000AAA").await.unwrap_err();
    assert!(err.is_api_error());
}
