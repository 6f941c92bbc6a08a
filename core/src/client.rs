//! Stateless HTTP request builder and response parser for the arena API.
//!
//! # Design
//! `ArenaClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation has a `build_*` method producing an `ApiCall<T>`:
//! the `HttpRequest` to execute plus the response type `T` it declares.
//! `ApiCall::parse` consumes the matching `HttpResponse`. The caller (or
//! `ArenaApi`) executes the round-trip in between, keeping this layer
//! deterministic and free of I/O.
//!
//! Response handling is uniform across every endpoint:
//! - non-2xx: message from the body's `detail`, then `message`, then
//!   `"HTTP error! status: <code>"`;
//! - 2xx without a JSON content type: `ApiError::NonJson`;
//! - 2xx JSON: decoded into `T`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, QueryParams};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{
    AccountOverview, AiDecision, AiDecisionFilters, AiDecisionStats, ArenaAccount,
    ArenaAccountCreate, ArenaAccountUpdate, CryptoPrice, LlmTestRequest, LlmTestResult,
    LoginRequest, MarketStatus, MessageResponse, PopularCrypto, RequiredConfigStatus,
    TradingAccount, TradingAccountCreate, TradingAccountUpdate, User, UserAuthResponse,
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Synchronous, stateless client for the arena API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct ArenaClient {
    base_url: String,
}

impl ArenaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `endpoint` against the base URL and attach the default
    /// `Content-Type: application/json` header. Caller headers with the same
    /// name replace the default.
    pub fn build(&self, endpoint: Endpoint) -> HttpRequest {
        HttpRequest {
            method: endpoint.method,
            url: format!("{}{}", self.base_url, endpoint.path),
            headers: merge_headers(endpoint.headers),
            body: endpoint.body.map(|body| body.to_string()),
        }
    }

    /// Build `endpoint` and declare its response type.
    pub fn call<T>(&self, endpoint: Endpoint) -> ApiCall<T> {
        ApiCall::new(self.build(endpoint))
    }

    // -- config ------------------------------------------------------------

    pub fn build_check_required_configs(&self) -> ApiCall<RequiredConfigStatus> {
        self.call(Endpoint::get("/config/check-required"))
    }

    // -- market data -------------------------------------------------------

    pub fn build_get_crypto_symbols(&self) -> ApiCall<Vec<String>> {
        self.call(Endpoint::get("/crypto/symbols"))
    }

    /// `symbol` is a bare ticker such as `BTC`; it goes into the path as is,
    /// so a pair like `BTC/USD` from `build_get_crypto_symbols` would hit a
    /// different route.
    pub fn build_get_crypto_price(&self, symbol: &str) -> ApiCall<CryptoPrice> {
        self.call(Endpoint::get(format!("/crypto/price/{symbol}")))
    }

    /// `symbol` is a bare ticker, interpolated verbatim like in
    /// `build_get_crypto_price`.
    pub fn build_get_market_status(&self, symbol: &str) -> ApiCall<MarketStatus> {
        self.call(Endpoint::get(format!("/crypto/status/{symbol}")))
    }

    pub fn build_get_popular_cryptos(&self) -> ApiCall<Vec<PopularCrypto>> {
        self.call(Endpoint::get("/crypto/popular"))
    }

    // -- AI decisions ------------------------------------------------------

    pub fn build_get_ai_decisions(
        &self,
        account_id: i64,
        filters: &AiDecisionFilters,
    ) -> ApiCall<Vec<AiDecision>> {
        let path = decision_query(filters).append_to(&format!("/accounts/{account_id}/ai-decisions"));
        self.call(Endpoint::get(path))
    }

    pub fn build_get_ai_decision(&self, account_id: i64, decision_id: i64) -> ApiCall<AiDecision> {
        self.call(Endpoint::get(format!(
            "/accounts/{account_id}/ai-decisions/{decision_id}"
        )))
    }

    pub fn build_get_ai_decision_stats(&self, account_id: i64, days: u32) -> ApiCall<AiDecisionStats> {
        let path = QueryParams::new()
            .push("days", days)
            .append_to(&format!("/accounts/{account_id}/ai-decisions/stats"));
        self.call(Endpoint::get(path))
    }

    // -- users -------------------------------------------------------------

    pub fn build_login(&self, credentials: &LoginRequest) -> Result<ApiCall<UserAuthResponse>, ApiError> {
        Ok(self.call(Endpoint::post("/users/login").with_json(credentials)?))
    }

    pub fn build_get_user_profile(&self, session_token: &str) -> ApiCall<User> {
        self.call(Endpoint::get(with_session("/users/profile", session_token)))
    }

    // -- trading accounts (session token travels in the query string) ------

    pub fn build_list_trading_accounts(&self, session_token: &str) -> ApiCall<Vec<TradingAccount>> {
        self.call(Endpoint::get(with_session("/accounts/", session_token)))
    }

    pub fn build_get_trading_account(&self, session_token: &str, account_id: i64) -> ApiCall<TradingAccount> {
        self.call(Endpoint::get(with_session(
            &format!("/accounts/{account_id}"),
            session_token,
        )))
    }

    pub fn build_create_trading_account(
        &self,
        session_token: &str,
        input: &TradingAccountCreate,
    ) -> Result<ApiCall<TradingAccount>, ApiError> {
        let endpoint = Endpoint::post(with_session("/accounts/", session_token)).with_json(input)?;
        Ok(self.call(endpoint))
    }

    pub fn build_update_trading_account(
        &self,
        session_token: &str,
        account_id: i64,
        input: &TradingAccountUpdate,
    ) -> Result<ApiCall<TradingAccount>, ApiError> {
        let path = with_session(&format!("/accounts/{account_id}"), session_token);
        Ok(self.call(Endpoint::put(path).with_json(input)?))
    }

    pub fn build_delete_trading_account(&self, session_token: &str, account_id: i64) -> ApiCall<MessageResponse> {
        self.call(Endpoint::delete(with_session(
            &format!("/accounts/{account_id}"),
            session_token,
        )))
    }

    // -- paper-trading accounts (single fixed user, no token) ---------------

    pub fn build_get_accounts(&self) -> ApiCall<Vec<ArenaAccount>> {
        self.call(Endpoint::get("/account/list"))
    }

    pub fn build_get_overview(&self) -> ApiCall<AccountOverview> {
        self.call(Endpoint::get("/account/overview"))
    }

    pub fn build_create_account(&self, input: &ArenaAccountCreate) -> Result<ApiCall<ArenaAccount>, ApiError> {
        Ok(self.call(Endpoint::post("/account/").with_json(input)?))
    }

    pub fn build_update_account(
        &self,
        account_id: i64,
        input: &ArenaAccountUpdate,
    ) -> Result<ApiCall<ArenaAccount>, ApiError> {
        Ok(self.call(Endpoint::put(format!("/account/{account_id}")).with_json(input)?))
    }

    pub fn build_test_llm_connection(&self, input: &LlmTestRequest) -> Result<ApiCall<LlmTestResult>, ApiError> {
        Ok(self.call(Endpoint::post("/account/test-llm").with_json(input)?))
    }
}

/// A built request together with the response type it declares.
pub struct ApiCall<T> {
    request: HttpRequest,
    response: PhantomData<fn() -> T>,
}

impl<T> ApiCall<T> {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            response: PhantomData,
        }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn into_request(self) -> HttpRequest {
        self.request
    }
}

impl<T: DeserializeOwned> ApiCall<T> {
    /// Normalize `response` and decode it as `T`.
    pub fn parse(&self, response: HttpResponse) -> Result<T, ApiError> {
        parse_json(response)
    }
}

impl<T> Clone for ApiCall<T> {
    fn clone(&self) -> Self {
        Self::new(self.request.clone())
    }
}

impl<T> fmt::Debug for ApiCall<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCall")
            .field("request", &self.request)
            .field("response", &std::any::type_name::<T>())
            .finish()
    }
}

/// Apply the uniform success/failure rules and decode the body as `T`.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_response(&response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}

/// `Ok` only for a 2xx response that declares a JSON content type.
pub fn check_response(response: &HttpResponse) -> Result<(), ApiError> {
    if !response.is_success() {
        return Err(error_from_response(response));
    }
    match response.content_type() {
        Some(content_type) if is_json_content_type(content_type) => Ok(()),
        other => Err(ApiError::NonJson {
            status: response.status,
            content_type: other.map(str::to_string),
        }),
    }
}

/// Normalize a non-2xx response into a single `ApiError::Status`.
///
/// A body that is absent or not JSON falls back to the generic status
/// message; its parse error is discarded.
pub fn error_from_response(response: &HttpResponse) -> ApiError {
    let message = extract_message(&response.body)
        .unwrap_or_else(|| ApiError::status_message(response.status));
    ApiError::Status {
        status: response.status,
        message,
    }
}

fn extract_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    usable_field(&payload, "detail").or_else(|| usable_field(&payload, "message"))
}

/// Null and empty-string fields carry nothing. Non-string values (e.g. a
/// list of validation errors) are rendered as compact JSON.
fn usable_field(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Media types are case-insensitive, so `Application/JSON` matches too.
fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(JSON_CONTENT_TYPE)
}

fn merge_headers(overrides: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())];
    for (name, value) in overrides {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }
    headers
}

fn with_session(path: &str, session_token: &str) -> String {
    QueryParams::new()
        .push("session_token", session_token)
        .append_to(path)
}

fn decision_query(filters: &AiDecisionFilters) -> QueryParams {
    QueryParams::new()
        .push_opt("operation", filters.operation)
        .push_opt("symbol", filters.symbol.as_deref())
        .push_opt("executed", filters.executed)
        .push_opt("start_date", filters.start_date.as_deref())
        .push_opt("end_date", filters.end_date.as_deref())
        .push_opt("limit", filters.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::types::DecisionOperation;
    use rstest::rstest;

    fn client() -> ArenaClient {
        ArenaClient::new("http://localhost:5611/api")
    }

    fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: content_type
                .map(|value| vec![("content-type".to_string(), value.to_string())])
                .unwrap_or_default(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_attaches_default_content_type() {
        let req = client().build(Endpoint::get("/crypto/symbols"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5611/api/crypto/symbols");
        assert_eq!(
            req.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn caller_headers_override_defaults_case_insensitively() {
        let endpoint = Endpoint::post("/account/")
            .with_header("content-type", "application/vnd.arena+json")
            .with_header("X-Request-Id", "42");
        let req = client().build(endpoint);
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.header("Content-Type"), Some("application/vnd.arena+json"));
        assert_eq!(req.header("x-request-id"), Some("42"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ArenaClient::new("http://localhost:5611/api/");
        let req = client.build_get_popular_cryptos();
        assert_eq!(req.request().url, "http://localhost:5611/api/crypto/popular");
    }

    #[test]
    fn build_get_crypto_price_interpolates_symbol() {
        let call = client().build_get_crypto_price("BTC");
        assert_eq!(call.request().url, "http://localhost:5611/api/crypto/price/BTC");
        assert_eq!(call.request().method, HttpMethod::Get);
    }

    #[test]
    fn symbol_paths_are_not_escaped() {
        let price = client().build_get_crypto_price("BTC/USD");
        assert_eq!(price.request().url, "http://localhost:5611/api/crypto/price/BTC/USD");
        let status = client().build_get_market_status("eth");
        assert_eq!(status.request().url, "http://localhost:5611/api/crypto/status/eth");
    }

    #[test]
    fn decision_filters_with_only_symbol_produce_single_key() {
        let call = client().build_get_ai_decisions(1, &AiDecisionFilters::symbol("BTC"));
        let url = &call.request().url;
        let (_, query) = url.split_once('?').unwrap();
        assert_eq!(query, "symbol=BTC");
    }

    #[test]
    fn decision_filters_without_values_leave_no_query() {
        let call = client().build_get_ai_decisions(3, &AiDecisionFilters::default());
        assert_eq!(call.request().url, "http://localhost:5611/api/accounts/3/ai-decisions");
    }

    #[test]
    fn decision_filters_keep_fixed_key_order() {
        let filters = AiDecisionFilters {
            operation: Some(DecisionOperation::Buy),
            symbol: Some("ETH".to_string()),
            executed: Some(true),
            start_date: Some("2026-10-01".to_string()),
            end_date: Some("2026-10-17".to_string()),
            limit: Some(20),
        };
        let call = client().build_get_ai_decisions(1, &filters);
        assert!(call.request().url.ends_with(
            "/accounts/1/ai-decisions?operation=buy&symbol=ETH&executed=true\
             &start_date=2026-10-01&end_date=2026-10-17&limit=20"
        ));
    }

    #[test]
    fn build_get_ai_decision_and_stats_paths() {
        let c = client();
        assert!(c
            .build_get_ai_decision(1, 9)
            .request()
            .url
            .ends_with("/accounts/1/ai-decisions/9"));
        assert!(c
            .build_get_ai_decision_stats(1, 7)
            .request()
            .url
            .ends_with("/accounts/1/ai-decisions/stats?days=7"));
    }

    #[test]
    fn build_login_posts_credentials_in_body() {
        let credentials = LoginRequest {
            username: "default".to_string(),
            password: "secret".to_string(),
        };
        let call = client().build_login(&credentials).unwrap();
        let req = call.request();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.url.ends_with("/users/login"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "default");
        assert_eq!(body["password"], "secret");
    }

    #[test]
    fn session_token_travels_in_query_never_in_authorization_header() {
        let c = client();
        let update = TradingAccountUpdate::default();
        let requests = vec![
            c.build_get_user_profile("tok-1").into_request(),
            c.build_list_trading_accounts("tok-1").into_request(),
            c.build_get_trading_account("tok-1", 5).into_request(),
            c.build_create_trading_account("tok-1", &TradingAccountCreate::new("A", "k"))
                .unwrap()
                .into_request(),
            c.build_update_trading_account("tok-1", 5, &update)
                .unwrap()
                .into_request(),
            c.build_delete_trading_account("tok-1", 5).into_request(),
        ];
        for req in requests {
            assert!(req.url.ends_with("?session_token=tok-1"), "{}", req.url);
            assert!(req.header("authorization").is_none());
        }
    }

    #[test]
    fn trading_account_methods_and_paths() {
        let c = client();
        assert_eq!(
            c.build_list_trading_accounts("t").request().url,
            "http://localhost:5611/api/accounts/?session_token=t"
        );
        let delete = c.build_delete_trading_account("t", 4).into_request();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "http://localhost:5611/api/accounts/4?session_token=t");
        let update = c
            .build_update_trading_account("t", 4, &TradingAccountUpdate::default())
            .unwrap()
            .into_request();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.body.as_deref(), Some("{}"));
    }

    #[test]
    fn paper_account_paths_carry_no_token() {
        let c = client();
        assert_eq!(c.build_get_accounts().request().url, "http://localhost:5611/api/account/list");
        assert_eq!(c.build_get_overview().request().url, "http://localhost:5611/api/account/overview");
        let create = c
            .build_create_account(&ArenaAccountCreate {
                name: "Manual".to_string(),
                ..ArenaAccountCreate::default()
            })
            .unwrap()
            .into_request();
        assert_eq!(create.method, HttpMethod::Post);
        assert_eq!(create.url, "http://localhost:5611/api/account/");
        assert_eq!(create.body.as_deref(), Some(r#"{"name":"Manual"}"#));
        let update = c
            .build_update_account(2, &ArenaAccountUpdate::default())
            .unwrap()
            .into_request();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.url, "http://localhost:5611/api/account/2");
        let llm = c
            .build_test_llm_connection(&LlmTestRequest {
                model: "gpt-4o".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: "sk".to_string(),
            })
            .unwrap()
            .into_request();
        assert_eq!(llm.method, HttpMethod::Post);
        assert!(llm.url.ends_with("/account/test-llm"));
    }

    #[rstest]
    #[case::detail_wins(404, r#"{"detail":"symbol not found","message":"ignored"}"#, "symbol not found")]
    #[case::message_fallback(400, r#"{"message":"bad input"}"#, "bad input")]
    #[case::null_detail_skipped(409, r#"{"detail":null,"message":"conflict"}"#, "conflict")]
    #[case::empty_detail_skipped(409, r#"{"detail":"","message":"conflict"}"#, "conflict")]
    #[case::structured_detail(422, r#"{"detail":[{"loc":["body","name"]}]}"#, r#"[{"loc":["body","name"]}]"#)]
    #[case::no_known_fields(500, r#"{"error":"boom"}"#, "HTTP error! status: 500")]
    #[case::json_array_body(500, "[1,2]", "HTTP error! status: 500")]
    #[case::plain_text_body(502, "Bad Gateway", "HTTP error! status: 502")]
    #[case::empty_body(503, "", "HTTP error! status: 503")]
    fn failure_message_is_normalized(#[case] status: u16, #[case] body: &str, #[case] expected: &str) {
        let err = client()
            .build_get_crypto_price("BTC")
            .parse(response(status, Some("application/json"), body))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: s, .. } if s == status));
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::html(Some("text/html; charset=utf-8"))]
    #[case::plain(Some("text/plain"))]
    fn success_without_json_content_type_is_rejected(#[case] content_type: Option<&str>) {
        let err = client()
            .build_get_crypto_symbols()
            .parse(response(200, content_type, r#"["BTC/USD"]"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NonJson { status: 200, .. }));
        assert_eq!(err.to_string(), "Response is not JSON");
    }

    #[rstest]
    #[case("application/json")]
    #[case("application/json; charset=utf-8")]
    #[case("Application/JSON")]
    #[case("APPLICATION/JSON; Charset=UTF-8")]
    fn success_with_json_content_type_is_parsed(#[case] content_type: &str) {
        let symbols = client()
            .build_get_crypto_symbols()
            .parse(response(200, Some(content_type), r#"["BTC/USD","ETH/USD"]"#))
            .unwrap();
        assert_eq!(symbols, vec!["BTC/USD".to_string(), "ETH/USD".to_string()]);
    }

    #[test]
    fn parse_crypto_price_success() {
        let price = client()
            .build_get_crypto_price("BTC")
            .parse(response(
                200,
                Some("application/json"),
                r#"{"symbol":"BTC","price":65000.5,"market":"CRYPTO"}"#,
            ))
            .unwrap();
        assert_eq!(price.symbol, "BTC");
        assert_eq!(price.market, "CRYPTO");
    }

    #[test]
    fn parse_wrong_shape_is_decode_error() {
        let err = client()
            .build_get_crypto_price("BTC")
            .parse(response(200, Some("application/json"), r#"{"symbol":"BTC"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn error_body_is_read_regardless_of_content_type() {
        let err = client()
            .build_get_overview()
            .parse(response(404, None, r#"{"detail":"No active account found"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "No active account found");
        assert!(err.is_not_found());
    }
}
