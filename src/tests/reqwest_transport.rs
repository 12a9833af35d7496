// Runs the provider on top of reqwest against a local mock token endpoint.

#[cfg(test)]
mod test {

    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;

    use crate::config::credentials::Credentials;
    use crate::error::AuthError;
    use crate::provider::TokenProvider;
    use crate::sources::fetch::TokenTransport;
    use crate::utils::constants::BEARER_HEADER;

    fn build_reqwest_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("reqwest client")
    }

    #[tokio::test]
    async fn reqwest_client_posts_json_and_returns_status_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/echo")
                    .header("content-type", "application/json")
                    .json_body(json!({"k": "v"}));
                then.status(202).body("accepted");
            })
            .await;

        let client = build_reqwest_client();
        // inherent Client::post would shadow the trait method
        let response = TokenTransport::post(&client, &server.url("/echo"), "application/json", br#"{"k":"v"}"#.to_vec())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 202);
        assert_eq!(response.body, b"accepted".to_vec());
    }

    #[tokio::test]
    async fn provider_over_reqwest_fetches_once_and_decorates_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token").json_body(json!({
                    "grant_type": "client_credentials",
                    "audience": "https://dispatch.example.test",
                    "client_id": "client-123",
                    "client_secret": "s3cr3t"
                }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "access_token": "eyJ.mock.token",
                        "scope": "read:dispatch",
                        "expires_in": 86400,
                        "token_type": "Bearer"
                    }));
            })
            .await;

        let client = build_reqwest_client();
        let credentials = Credentials::new(
            "https://dispatch.example.test",
            "client-123",
            "s3cr3t",
            server.url("/oauth/token"),
        );
        let provider = TokenProvider::with_credentials(client.clone(), credentials);

        for _ in 0..3 {
            let request = client.get(server.url("/orders")).build().unwrap();
            let request = provider.attach_token(request).await.unwrap();
            assert_eq!(request.headers().get(BEARER_HEADER).unwrap(), "eyJ.mock.token");
        }

        // exactly one hit on the token endpoint
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_endpoint_surfaces_auth_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(401).json_body(json!({"error": "access_denied"}));
            })
            .await;

        let credentials = Credentials::new("aud", "client", "wrong", server.url("/oauth/token"));
        let provider = TokenProvider::with_credentials(build_reqwest_client(), credentials);

        let err = provider.token().await.unwrap_err();
        assert!(matches!(err, AuthError::AuthServer { status: 401 }));
        assert!(provider.cached_token().await.is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        // nothing listens on port 1
        let credentials = Credentials::new("aud", "client", "secret", "http://127.0.0.1:1/oauth/token");
        let provider = TokenProvider::with_credentials(build_reqwest_client(), credentials);

        let request = build_reqwest_client().get("http://127.0.0.1:1/orders").build().unwrap();
        let err = provider.attach_token(request).await.unwrap_err();

        assert!(matches!(err.error, AuthError::Network(_)));
        assert!(err.request.is_some());
    }
}
