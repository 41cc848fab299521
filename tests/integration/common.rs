use forcelink::{OAuthTokenFlow, SalesforceRestClient, UsernamePasswordFlow};

/// Get an authenticated client for integration tests.
///
/// Uses `SF_INSTANCE_URL` + `SF_ACCESS_TOKEN` when set, otherwise the
/// username-password variables. Panics with a helpful message instead of
/// skipping when neither is configured.
pub async fn authenticated_client() -> SalesforceRestClient {
    let mut client = SalesforceRestClient::new().expect("Failed to create REST client");

    let result = if std::env::var("SF_ACCESS_TOKEN").is_ok_and(|v| !v.is_empty()) {
        let flow = OAuthTokenFlow::from_env().unwrap_or_else(|e| config_error(&e));
        client.authenticate(&flow).await
    } else {
        let flow = UsernamePasswordFlow::from_env().unwrap_or_else(|e| config_error(&e));
        client.authenticate(&flow).await
    };

    if let Err(e) = result {
        panic!(
            "\n\n\
            INTEGRATION TEST AUTHENTICATION FAILED\n\
            \n\
            Error: {e}\n\
            \n\
            This usually means the credentials are expired or the org no longer exists.\n\n"
        );
    }

    client
}

fn config_error(e: &dyn std::fmt::Display) -> ! {
    panic!(
        "\n\n\
        INTEGRATION TEST CONFIGURATION ERROR\n\
        \n\
        {e}\n\
        \n\
        Set SF_INSTANCE_URL and SF_ACCESS_TOKEN (e.g. from `sf org display`),\n\
        or SF_CLIENT_ID, SF_USERNAME and SF_PASSWORD for the username-password flow.\n\n"
    );
}

/// A name that will not collide with earlier runs.
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, chrono::Utc::now().timestamp_millis())
}
