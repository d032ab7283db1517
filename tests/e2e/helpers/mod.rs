use oauth_exchange_backend::{
    controllers::oauth::OAuthController,
    domain::oauth::{OAuthExchangeService, ProviderConfig, SystemClock},
    infrastructure::{
        config::{Config, Environment, LogFormat},
        http::create_router,
        oauth::ReqwestTransport,
    },
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use wiremock::MockServer;


use api_client::TestClient;

/// Vendor whose provider exposes an introspection endpoint
pub const FITBIT: &str = "fitbit";
/// Vendor without introspection, grants carry no scopes
pub const BASIC: &str = "basic";

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const INTROSPECT_PATH: &str = "/1.1/oauth2/introspect";

pub const CLIENT_ID: &str = "test_client_id";
pub const CLIENT_SECRET: &str = "test_client_secret";
/// base64("test_client_id:test_client_secret")
pub const BASIC_AUTH_HEADER: &str = "Basic dGVzdF9jbGllbnRfaWQ6dGVzdF9jbGllbnRfc2VjcmV0";
pub const CALLBACK_URL: &str = "http://localhost:8080/oauth/callback";

pub struct TestContext {
    pub client: TestClient,
    pub provider: MockServer,
    #[allow(dead_code)]
    pub config: Config,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            // Fake OAuth provider shared by every configured vendor
            let provider = MockServer::start().await;

            let fitbit = ProviderConfig {
                client_id: CLIENT_ID.to_string(),
                client_secret: CLIENT_SECRET.to_string(),
                endpoint: format!("{}{}", provider.uri(), TOKEN_PATH),
                introspect_endpoint: Some(format!("{}{}", provider.uri(), INTROSPECT_PATH)),
                callback_url: CALLBACK_URL.to_string(),
            };
            let basic = ProviderConfig {
                introspect_endpoint: None,
                ..fitbit.clone()
            };

            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                oauth_providers: HashMap::from([
                    (FITBIT.to_string(), fitbit),
                    (BASIC.to_string(), basic),
                ]),
            };

            let shared_config = Arc::new(config.clone());
            let oauth_service = Arc::new(OAuthExchangeService::new(
                Arc::new(ReqwestTransport::new()),
                Arc::new(SystemClock),
            ));
            let oauth_controller =
                Arc::new(OAuthController::new(oauth_service, shared_config.clone()));
            let app = create_router(shared_config, oauth_controller);

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                provider,
                config,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // MockServer verifies its expectations when dropped
        }
    }
}

pub fn token_response() -> Value {
    json!({
        "access_token": "eyJhbGciOiJIUzI1NiJ9.access",
        "refresh_token": "c643a63c072f0f05478e9d18b991db80ef6061e4f8e6c822d83fed53e5fafdd7",
        "user_id": "26FWFL",
        "expires_in": 28800,
        "token_type": "Bearer",
        "scope": "sleep heartrate activity"
    })
}

pub fn introspect_response() -> Value {
    json!({
        "active": true,
        "scope": "{SLEEP=READ, HEARTRATE=READ, ACTIVITY=READWRITE}",
        "client_id": CLIENT_ID,
        "user_id": "26FWFL",
        "token_type": "access_token"
    })
}

pub fn provider_errors(entries: &[(&str, &str)]) -> Value {
    let errors: Vec<Value> = entries
        .iter()
        .map(|(error_type, message)| json!({ "errorType": error_type, "message": message }))
        .collect();
    json!({ "errors": errors, "success": false })
}
