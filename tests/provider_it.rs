// self
use oauth2_kangaroo::{
	_preludet::*,
	client::ProviderClient,
	error::ConfigError,
	provider::{self, ProviderConfig, ProviderOptions, RequiredOption},
	serde_json::{self, json},
};

#[test]
fn config_deserializes_through_validation() {
	let config: ProviderConfig = serde_json::from_value(json!({
		"authorizeUrl": "https://staging.example.com/oauth/authorize",
		"tokenUrl": "https://staging.example.com/oauth/token",
		"resourceOwnerDetailsUrl": "https://staging.example.com/me",
		"defaultScopes": ["manage-all"],
		"requiredOptions": ["businessId"]
	}))
	.expect("Complete config should deserialize.");

	assert!(config.requires(RequiredOption::BusinessId));
	assert_eq!(config.scope_separator, ProviderConfig::DEFAULT_SCOPE_SEPARATOR);
	assert_eq!(config.endpoints.token.path(), "/oauth/token");

	let err = serde_json::from_value::<ProviderConfig>(json!({
		"authorizeUrl": "http://staging.example.com/oauth/authorize",
		"tokenUrl": "https://staging.example.com/oauth/token",
		"resourceOwnerDetailsUrl": "https://staging.example.com/me"
	}))
	.expect_err("Plain HTTP endpoints on public hosts must be rejected.");

	assert!(err.to_string().contains("authorize"));
}

#[test]
fn custom_hosts_keep_their_path_prefix() {
	let host = Url::parse("https://staging.example.com/api/").expect("Host fixture should parse.");
	let config = provider::kangaroo_with_host(&host).expect("Custom host preset should build.");

	assert_eq!(
		config.endpoints.authorize.as_str(),
		"https://staging.example.com/api/oauth/authorize"
	);
	assert_eq!(config.endpoints.token.as_str(), "https://staging.example.com/api/oauth/token");
	assert_eq!(
		config.endpoints.resource_owner_details.as_str(),
		"https://staging.example.com/api/me"
	);

	let insecure = Url::parse("http://staging.example.com").expect("Host fixture should parse.");
	let err = provider::kangaroo_with_host(&insecure)
		.expect_err("Plain HTTP hosts must be rejected.");

	assert!(matches!(err, ConfigError::InsecureEndpoint { endpoint: "authorize", .. }));
}

#[test]
fn business_id_is_required_and_coerced() {
	let config = provider::kangaroo().expect("Production preset should build.");
	let err = ProviderClient::new(config.clone(), ProviderOptions::new("mock_client_id"))
		.expect_err("Missing business ids must fail.");

	assert_eq!(err.to_string(), "Required option not defined: businessId.");

	let options: ProviderOptions = serde_json::from_value(json!({
		"clientId": "mock_client_id",
		"clientSecret": "mock_secret",
		"businessId": "42"
	}))
	.expect("Options should deserialize.");
	let client = ProviderClient::new(config.clone(), options).expect("Client should build.");

	assert_eq!(client.business_id(), Some(42));

	let client = ProviderClient::new(
		config,
		ProviderOptions::new("mock_client_id").with_business_id("mock_store_name"),
	)
	.expect("Text without a leading integer still builds a client.");

	assert_eq!(client.business_id(), Some(0));
}

#[test]
fn options_debug_output_hides_the_secret() {
	let options = ProviderOptions::new("mock_client_id").with_client_secret("mock_secret");
	let rendered = format!("{options:?}");

	assert!(rendered.contains("mock_client_id"));
	assert!(!rendered.contains("mock_secret"));
}
