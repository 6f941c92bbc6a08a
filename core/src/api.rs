//! Async API surface: the request primitive and typed wrappers.
//!
//! `ArenaApi` pairs the stateless `ArenaClient` with a `Transport`. Every
//! method is one independent round-trip: build, execute once, normalize.
//! There is no retry, timeout, cache or shared mutable state here, so
//! concurrent calls may complete in any order and never interfere.

use serde::de::DeserializeOwned;

use crate::client::{parse_json, ApiCall, ArenaClient};
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    AccountOverview, AiDecision, AiDecisionFilters, AiDecisionStats, ArenaAccount,
    ArenaAccountCreate, ArenaAccountUpdate, CryptoPrice, LlmTestRequest, LlmTestResult,
    LoginRequest, MarketStatus, MessageResponse, PopularCrypto, RequiredConfigStatus,
    TradingAccount, TradingAccountCreate, TradingAccountUpdate, User, UserAuthResponse,
};

/// Async client for the arena backend.
#[derive(Debug, Clone)]
pub struct ArenaApi<T = ReqwestTransport> {
    client: ArenaClient,
    transport: T,
}

impl ArenaApi<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Client configured from `ARENA_API_BASE_URL`.
    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env())
    }
}

impl<T: Transport> ArenaApi<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: ArenaClient::from_config(config),
            transport,
        }
    }

    pub fn client(&self) -> &ArenaClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The request primitive: resolve `endpoint`, issue it once, and decode
    /// the JSON body as `R`. Fails with a single normalized `ApiError`.
    pub async fn request<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R, ApiError> {
        self.execute(self.client.call(endpoint)).await
    }

    /// Run a prebuilt call through the transport.
    pub async fn execute<R: DeserializeOwned>(&self, call: ApiCall<R>) -> Result<R, ApiError> {
        let response = self.transport.execute(call.into_request()).await?;
        parse_json(response)
    }

    pub async fn check_required_configs(&self) -> Result<RequiredConfigStatus, ApiError> {
        self.execute(self.client.build_check_required_configs()).await
    }

    pub async fn get_crypto_symbols(&self) -> Result<Vec<String>, ApiError> {
        self.execute(self.client.build_get_crypto_symbols()).await
    }

    pub async fn get_crypto_price(&self, symbol: &str) -> Result<CryptoPrice, ApiError> {
        self.execute(self.client.build_get_crypto_price(symbol)).await
    }

    pub async fn get_market_status(&self, symbol: &str) -> Result<MarketStatus, ApiError> {
        self.execute(self.client.build_get_market_status(symbol)).await
    }

    pub async fn get_popular_cryptos(&self) -> Result<Vec<PopularCrypto>, ApiError> {
        self.execute(self.client.build_get_popular_cryptos()).await
    }

    pub async fn get_ai_decisions(
        &self,
        account_id: i64,
        filters: &AiDecisionFilters,
    ) -> Result<Vec<AiDecision>, ApiError> {
        self.execute(self.client.build_get_ai_decisions(account_id, filters))
            .await
    }

    pub async fn get_ai_decision(&self, account_id: i64, decision_id: i64) -> Result<AiDecision, ApiError> {
        self.execute(self.client.build_get_ai_decision(account_id, decision_id))
            .await
    }

    pub async fn get_ai_decision_stats(&self, account_id: i64, days: u32) -> Result<AiDecisionStats, ApiError> {
        self.execute(self.client.build_get_ai_decision_stats(account_id, days))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserAuthResponse, ApiError> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.execute(self.client.build_login(&credentials)?).await
    }

    pub async fn get_user_profile(&self, session_token: &str) -> Result<User, ApiError> {
        self.execute(self.client.build_get_user_profile(session_token))
            .await
    }

    pub async fn list_trading_accounts(&self, session_token: &str) -> Result<Vec<TradingAccount>, ApiError> {
        self.execute(self.client.build_list_trading_accounts(session_token))
            .await
    }

    pub async fn get_trading_account(&self, session_token: &str, account_id: i64) -> Result<TradingAccount, ApiError> {
        self.execute(self.client.build_get_trading_account(session_token, account_id))
            .await
    }

    pub async fn create_trading_account(
        &self,
        session_token: &str,
        input: &TradingAccountCreate,
    ) -> Result<TradingAccount, ApiError> {
        self.execute(self.client.build_create_trading_account(session_token, input)?)
            .await
    }

    pub async fn update_trading_account(
        &self,
        session_token: &str,
        account_id: i64,
        input: &TradingAccountUpdate,
    ) -> Result<TradingAccount, ApiError> {
        self.execute(
            self.client
                .build_update_trading_account(session_token, account_id, input)?,
        )
        .await
    }

    pub async fn delete_trading_account(
        &self,
        session_token: &str,
        account_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        self.execute(self.client.build_delete_trading_account(session_token, account_id))
            .await
    }

    pub async fn get_accounts(&self) -> Result<Vec<ArenaAccount>, ApiError> {
        self.execute(self.client.build_get_accounts()).await
    }

    pub async fn get_overview(&self) -> Result<AccountOverview, ApiError> {
        self.execute(self.client.build_get_overview()).await
    }

    pub async fn create_account(&self, input: &ArenaAccountCreate) -> Result<ArenaAccount, ApiError> {
        self.execute(self.client.build_create_account(input)?).await
    }

    pub async fn update_account(&self, account_id: i64, input: &ArenaAccountUpdate) -> Result<ArenaAccount, ApiError> {
        self.execute(self.client.build_update_account(account_id, input)?)
            .await
    }

    pub async fn test_llm_connection(&self, input: &LlmTestRequest) -> Result<LlmTestResult, ApiError> {
        self.execute(self.client.build_test_llm_connection(input)?)
            .await
    }
}
