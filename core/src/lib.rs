//! API client for the paper-trading arena backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and layers an async
//! `ArenaApi` on top that runs each call once through a `Transport`.
//!
//! # Design
//! - `ArenaClient` is stateless; it holds only the configured base URL.
//! - Every operation is a `build_*` producing an `ApiCall<T>` whose `parse`
//!   applies one error-normalization rule set for all endpoints.
//! - `ArenaApi` adds I/O via the `Transport` trait (`ReqwestTransport` by
//!   default). No retries, no timeouts, no caching.
//! - Account-management calls forward the session token in the query string.
//! - The retired AI-account wrappers live on `LegacyAiAccounts` as inert
//!   no-ops.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod legacy;
pub mod transport;
pub mod types;

pub use api::ArenaApi;
pub use client::{ApiCall, ArenaClient};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, QueryParams};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use legacy::{LegacyAiAccountPayload, LegacyAiAccounts, LegacyPlaceholder};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AccountOverview, AiDecision, AiDecisionFilters, AiDecisionStats, ArenaAccount,
    ArenaAccountCreate, ArenaAccountUpdate, CryptoPrice, DecisionOperation, LlmTestRequest,
    LlmTestResult, LoginRequest, MarketStatus, MessageResponse, OverviewAccount, PopularCrypto,
    Portfolio, RequiredConfigStatus, TradingAccount, TradingAccountCreate, TradingAccountUpdate,
    User, UserAuthResponse,
};
