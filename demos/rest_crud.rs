//! REST API CRUD operations example
//!
//! This example demonstrates TWO approaches to working with Salesforce data:
//! 1. Typed records with a field table (recommended for production)
//! 2. Dynamic serde_json::Value (useful for exploration/prototyping)
//!
//! Credentials come from the environment: either SF_INSTANCE_URL and
//! SF_ACCESS_TOKEN, or SF_CLIENT_ID, SF_USERNAME, SF_PASSWORD (plus optional
//! SF_CLIENT_SECRET, SF_SECURITY_TOKEN, SF_LOGIN_URL).
//!
//! Run with: RUST_LOG=forcelink_rest=debug cargo run --example rest_crud

use forcelink::rest::soql;
use forcelink::{
    FieldSpec, OAuthTokenFlow, Record, RecordCodec, SalesforceRestClient, UsernamePasswordFlow,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Account record with proper type safety
#[derive(Debug, Serialize, Deserialize)]
struct Account {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Industry")]
    industry: Option<String>,
    #[serde(rename = "Phone")]
    phone: Option<String>,
    #[serde(rename = "Website")]
    website: Option<String>,
}

impl Record for Account {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::wire("id", "Id").read_only(),
        FieldSpec::wire("name", "Name"),
        FieldSpec::wire("industry", "Industry"),
        FieldSpec::wire("phone", "Phone"),
        FieldSpec::wire("website", "Website"),
    ];
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Salesforce REST API CRUD Examples ===\n");

    let mut client = SalesforceRestClient::new()?;
    authenticate(&mut client).await?;
    println!(
        "✓ Authenticated against {}\n",
        client.instance_url().unwrap_or_default()
    );

    println!("--- Typed Record Pattern ---\n");
    let account_id = example_create_typed(&client).await?;
    example_read_typed(&client, &account_id).await?;
    example_update_typed(&client, &account_id).await?;

    println!("\n--- Dynamic JSON Pattern ---\n");
    let dynamic_id = example_create_dynamic(&client).await?;
    example_query_dynamic(&client).await?;

    // Clean up
    example_delete(&client, &account_id).await?;
    example_delete(&client, &dynamic_id).await?;

    println!("\n✓ All CRUD examples completed successfully!");

    Ok(())
}

async fn authenticate(client: &mut SalesforceRestClient) -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("SF_ACCESS_TOKEN").is_ok() {
        client.authenticate(&OAuthTokenFlow::from_env()?).await?;
    } else {
        client
            .authenticate(&UsernamePasswordFlow::from_env()?)
            .await?;
    }
    Ok(())
}

/// Example 1a: Create with a typed record (read-only fields dropped)
async fn example_create_typed(
    client: &SalesforceRestClient,
) -> Result<String, Box<dyn std::error::Error>> {
    println!("Example 1a: Create with Typed Record");
    println!("------------------------------------");

    let account = Account {
        id: None,
        name: "Acme Corporation".to_string(),
        industry: Some("Technology".to_string()),
        phone: Some("+1-555-0100".to_string()),
        website: Some("https://acme.example.com".to_string()),
    };

    let id = client
        .create("Account", &RecordCodec::for_create(&account)?)
        .await?;
    println!("✓ Created account with ID: {}", id);
    println!();

    Ok(id)
}

/// Example 1b: Create with dynamic JSON
async fn example_create_dynamic(
    client: &SalesforceRestClient,
) -> Result<String, Box<dyn std::error::Error>> {
    println!("Example 1b: Create with Dynamic JSON");
    println!("--------------------------------------");

    let account = serde_json::json!({
        "Name": "Dynamic Industries",
        "Industry": "Technology",
        "Phone": "+1-555-0200"
    });

    let id = client.create("Account", &account).await?;
    println!("✓ Created account with ID: {}", id);
    println!();

    Ok(id)
}

/// Example 2a: Read by id, projecting the record's field table
async fn example_read_typed(
    client: &SalesforceRestClient,
    account_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 2a: Find by Id");
    println!("----------------------");

    match client.find_by_id::<Account>("Account", account_id).await? {
        Some(account) => {
            println!("✓ Retrieved account:");
            println!("  ID: {:?}", account.id);
            println!("  Name: {}", account.name);
            println!("  Industry: {:?}", account.industry);
            println!("  Phone: {:?}", account.phone);
            println!("  Website: {:?}", account.website);
        }
        None => println!("✗ Account {} not found", account_id),
    }
    println!();

    Ok(())
}

/// Example 2b: Query with dynamic JSON and an escaped value
async fn example_query_dynamic(
    client: &SalesforceRestClient,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 2b: Query with Dynamic JSON");
    println!("------------------------------------");

    let query = format!(
        "SELECT Id, Name, Industry FROM Account WHERE Name LIKE '{}%'",
        soql::escape_like("Dynamic")
    );
    let accounts: Vec<serde_json::Value> = client.query_all(&query).await?;

    println!("✓ Found {} account(s)", accounts.len());
    for account in accounts.iter().take(5) {
        println!("  {} {}", account["Id"], account["Name"]);
    }
    println!();

    Ok(())
}

/// Example 3: Update with the typed record's update body
async fn example_update_typed(
    client: &SalesforceRestClient,
    account_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 3: Update Record");
    println!("------------------------");

    let account = Account {
        id: Some(account_id.to_string()),
        name: "Acme Corporation (Updated)".to_string(),
        industry: Some("Technology".to_string()),
        phone: Some("+1-555-0101".to_string()),
        website: None,
    };

    let updated = client
        .update("Account", account_id, &RecordCodec::for_update(&account)?)
        .await?;
    println!("✓ Updated account {} (no content: {})", account_id, updated);
    println!();

    Ok(())
}

/// Example 4: Delete
async fn example_delete(
    client: &SalesforceRestClient,
    account_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 4: Delete Record");
    println!("------------------------");

    match client.delete("Account", account_id).await {
        Ok(_) => println!("✓ Deleted account {}", account_id),
        Err(e) if e.api_error_code() == Some("ENTITY_IS_DELETED") => {
            println!("✓ Account {} was already deleted", account_id)
        }
        Err(e) => return Err(e.into()),
    }
    println!();

    Ok(())
}
