//! In-memory store behind the mock backend.
//!
//! A single `Store` guarded by one `RwLock`. Handlers take the read lock for
//! lookups and the write lock for mutations; nothing is persisted.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::{
    AccountCreateBody, AccountOut, AccountUpdateBody, ArenaAccountBody, ArenaAccountOut,
    DecisionOut, DecisionQuery, StatsOut, UserOut,
};
use crate::error::AppError;

pub type AppState = Arc<RwLock<Store>>;

pub const DEFAULT_USERNAME: &str = "default";
pub const MARKET: &str = "CRYPTO";
pub const POPULAR_SYMBOLS: [&str; 6] = ["BTC", "ETH", "SOL", "DOGE", "BNB", "XRP"];

const SESSION_TTL_HOURS: i64 = 24;
const DEFAULT_DECISION_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub is_active: bool,
}

impl UserRecord {
    pub fn to_out(&self) -> UserOut {
        UserOut {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub account_type: String,
    pub model: Option<String>,
    pub base_url: String,
    pub api_key: String,
    pub initial_capital: f64,
    pub current_cash: f64,
    pub frozen_cash: f64,
    pub is_active: bool,
}

impl AccountRecord {
    pub fn to_masked(&self) -> AccountOut {
        AccountOut {
            id: self.id,
            user_id: self.user_id,
            name: self.name.clone(),
            model: self.model.clone().unwrap_or_default(),
            base_url: self.base_url.clone(),
            api_key: mask_api_key(&self.api_key),
            initial_capital: self.initial_capital,
            current_cash: self.current_cash,
            frozen_cash: self.frozen_cash,
            account_type: self.account_type.clone(),
            is_active: self.is_active,
        }
    }
}

/// A decision to be logged; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewDecision {
    pub account_id: i64,
    pub decision_time: DateTime<Utc>,
    pub reason: String,
    pub operation: String,
    pub symbol: Option<String>,
    pub prev_portion: f64,
    pub target_portion: f64,
    pub total_balance: f64,
    pub executed: bool,
    pub order_id: Option<i64>,
}

#[derive(Debug, Default)]
pub struct Store {
    users: Vec<UserRecord>,
    sessions: HashMap<String, Session>,
    accounts: BTreeMap<i64, AccountRecord>,
    decisions: Vec<DecisionOut>,
    prices: BTreeMap<String, f64>,
    next_account_id: i64,
    next_decision_id: i64,
}

impl Store {
    /// Default user and price table only.
    pub fn empty() -> Self {
        let prices = [
            ("BTC", 65_000.0),
            ("ETH", 3_200.0),
            ("SOL", 150.0),
            ("DOGE", 0.12),
            ("BNB", 580.0),
            ("XRP", 0.52),
        ]
        .into_iter()
        .map(|(symbol, price)| (symbol.to_string(), price))
        .collect();

        Self {
            users: vec![UserRecord {
                id: 1,
                username: DEFAULT_USERNAME.to_string(),
                email: Some("default@arena.local".to_string()),
                is_active: true,
            }],
            prices,
            next_account_id: 1,
            next_decision_id: 1,
            ..Self::default()
        }
    }

    /// `empty()` plus one AI account and a few logged decisions.
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        let account = store.insert_account(AccountRecord {
            id: 0,
            user_id: 1,
            name: "GPT Trader".to_string(),
            account_type: "AI".to_string(),
            model: Some("gpt-4-turbo".to_string()),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "sk-seeded-demo-key".to_string(),
            initial_capital: 10_000.0,
            current_cash: 10_000.0,
            frozen_cash: 0.0,
            is_active: true,
        });

        let now = Utc::now();
        let seed = [
            (Duration::hours(1), "buy", Some("BTC"), 0.0, 0.2, true, Some(1)),
            (Duration::days(2), "sell", Some("ETH"), 0.1, 0.0, true, Some(2)),
            (Duration::days(3), "hold", None, 0.0, 0.0, false, None),
            (Duration::days(40), "buy", Some("SOL"), 0.0, 0.1, false, None),
        ];
        for (age, operation, symbol, prev_portion, target_portion, executed, order_id) in seed {
            store.insert_decision(NewDecision {
                account_id: account,
                decision_time: now - age,
                reason: format!("seeded {operation} decision"),
                operation: operation.to_string(),
                symbol: symbol.map(str::to_string),
                prev_portion,
                target_portion,
                total_balance: 10_000.0,
                executed,
                order_id,
            });
        }
        store
    }

    pub fn into_shared(self) -> AppState {
        Arc::new(RwLock::new(self))
    }

    // -- market data ---------------------------------------------------------

    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(&symbol.to_ascii_uppercase()).copied()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.prices.keys().map(|symbol| format!("{symbol}/USD")).collect()
    }

    // -- users and sessions --------------------------------------------------

    pub fn user(&self, user_id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == user_id)
    }

    /// Password is not checked; the user only has to exist.
    pub fn login(&mut self, username: &str) -> Result<(UserRecord, String, DateTime<Utc>), AppError> {
        let user = self
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        self.sessions.insert(
            token.clone(),
            Session {
                user_id: user.id,
                expires_at,
            },
        );
        Ok((user, token, expires_at))
    }

    pub fn authenticate(&self, session_token: &str) -> Result<i64, AppError> {
        self.sessions
            .get(session_token)
            .filter(|session| session.expires_at > Utc::now())
            .map(|session| session.user_id)
            .ok_or_else(AppError::invalid_session)
    }

    // -- accounts ------------------------------------------------------------

    pub fn insert_account(&mut self, mut account: AccountRecord) -> i64 {
        account.id = self.next_account_id;
        self.next_account_id += 1;
        let id = account.id;
        self.accounts.insert(id, account);
        id
    }

    pub fn active_accounts(&self) -> impl Iterator<Item = &AccountRecord> {
        self.accounts.values().filter(|account| account.is_active)
    }

    pub fn accounts_of(&self, user_id: i64) -> Vec<AccountOut> {
        self.active_accounts()
            .filter(|account| account.user_id == user_id)
            .map(AccountRecord::to_masked)
            .collect()
    }

    /// The account if it exists and belongs to `user_id`.
    pub fn owned_account(&self, user_id: i64, account_id: i64) -> Result<&AccountRecord, AppError> {
        let account = self
            .accounts
            .get(&account_id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        if account.user_id != user_id {
            return Err(AppError::access_denied());
        }
        Ok(account)
    }

    fn name_taken(&self, user_id: i64, name: &str, except: Option<i64>) -> bool {
        self.active_accounts()
            .any(|account| account.user_id == user_id && account.name == name && Some(account.id) != except)
    }

    pub fn create_account(&mut self, user_id: i64, input: AccountCreateBody) -> Result<AccountOut, AppError> {
        if self.name_taken(user_id, &input.name, None) {
            return Err(AppError::bad_request("Account name already exists"));
        }
        let id = self.insert_account(AccountRecord {
            id: 0,
            user_id,
            name: input.name,
            account_type: input.account_type,
            model: Some(input.model),
            base_url: input.base_url,
            api_key: input.api_key,
            initial_capital: input.initial_capital,
            current_cash: input.initial_capital,
            frozen_cash: 0.0,
            is_active: true,
        });
        Ok(self.accounts[&id].to_masked())
    }

    pub fn update_account(
        &mut self,
        user_id: i64,
        account_id: i64,
        input: AccountUpdateBody,
    ) -> Result<AccountOut, AppError> {
        self.owned_account(user_id, account_id)?;
        if let Some(name) = input.name.as_deref().filter(|name| !name.is_empty()) {
            if self.name_taken(user_id, name, Some(account_id)) {
                return Err(AppError::bad_request("Account name already exists"));
            }
        }
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        if let Some(name) = input.name.filter(|name| !name.is_empty()) {
            account.name = name;
        }
        if let Some(model) = input.model {
            account.model = Some(model);
        }
        if let Some(base_url) = input.base_url {
            account.base_url = base_url;
        }
        if let Some(api_key) = input.api_key {
            account.api_key = api_key;
        }
        Ok(account.to_masked())
    }

    /// Soft delete. Returns the account name.
    pub fn deactivate_account(&mut self, user_id: i64, account_id: i64) -> Result<String, AppError> {
        self.owned_account(user_id, account_id)?;
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        account.is_active = false;
        Ok(account.name.clone())
    }

    // -- paper-trading accounts ----------------------------------------------

    pub fn arena_account(&self, account: &AccountRecord) -> ArenaAccountOut {
        ArenaAccountOut {
            id: account.id,
            user_id: account.user_id,
            username: self
                .user(account.user_id)
                .map(|user| user.username.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            name: account.name.clone(),
            account_type: account.account_type.clone(),
            initial_capital: account.initial_capital,
            current_cash: account.current_cash,
            frozen_cash: account.frozen_cash,
            model: account.model.clone(),
            base_url: account.base_url.clone(),
            api_key: account.api_key.clone(),
            is_active: account.is_active,
        }
    }

    fn default_user_id(&self) -> Result<i64, AppError> {
        self.users
            .iter()
            .find(|user| user.username == DEFAULT_USERNAME)
            .or_else(|| self.users.first())
            .map(|user| user.id)
            .ok_or_else(|| AppError::not_found("No user found"))
    }

    pub fn create_arena_account(&mut self, input: ArenaAccountBody) -> Result<ArenaAccountOut, AppError> {
        let user_id = self.default_user_id()?;
        let name = input
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::bad_request("Account name is required"))?;
        let initial_capital = input.initial_capital.unwrap_or(10_000.0);
        let id = self.insert_account(AccountRecord {
            id: 0,
            user_id,
            name,
            account_type: input.account_type.unwrap_or_else(|| "AI".to_string()),
            model: Some(input.model.unwrap_or_else(|| "gpt-4-turbo".to_string())),
            base_url: input
                .base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            api_key: input.api_key.unwrap_or_default(),
            initial_capital,
            current_cash: initial_capital,
            frozen_cash: 0.0,
            is_active: true,
        });
        Ok(self.arena_account(&self.accounts[&id]))
    }

    pub fn update_arena_account(
        &mut self,
        account_id: i64,
        input: AccountUpdateBody,
    ) -> Result<ArenaAccountOut, AppError> {
        let account = self
            .accounts
            .get_mut(&account_id)
            .filter(|account| account.is_active)
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        if let Some(name) = input.name {
            if name.is_empty() {
                return Err(AppError::bad_request("Account name cannot be empty"));
            }
            account.name = name;
        }
        if let Some(model) = input.model {
            account.model = Some(model).filter(|model| !model.is_empty());
        }
        if let Some(base_url) = input.base_url {
            account.base_url = base_url;
        }
        if let Some(api_key) = input.api_key {
            account.api_key = api_key;
        }
        let account = account.clone();
        Ok(self.arena_account(&account))
    }

    // -- AI decisions --------------------------------------------------------

    pub fn insert_decision(&mut self, decision: NewDecision) -> i64 {
        let id = self.next_decision_id;
        self.next_decision_id += 1;
        self.decisions.push(DecisionOut {
            id,
            account_id: decision.account_id,
            decision_time: decision.decision_time,
            reason: decision.reason,
            operation: decision.operation,
            symbol: decision.symbol,
            prev_portion: decision.prev_portion,
            target_portion: decision.target_portion,
            total_balance: decision.total_balance,
            executed: decision.executed,
            order_id: decision.order_id,
        });
        id
    }

    fn require_account(&self, account_id: i64) -> Result<(), AppError> {
        if self.accounts.contains_key(&account_id) {
            Ok(())
        } else {
            Err(AppError::not_found("Account not found"))
        }
    }

    /// Newest first, filtered, at most `limit` entries.
    pub fn decisions(&self, account_id: i64, query: &DecisionQuery) -> Result<Vec<DecisionOut>, AppError> {
        self.require_account(account_id)?;
        let mut matching: Vec<DecisionOut> = self
            .decisions
            .iter()
            .filter(|decision| decision.account_id == account_id)
            .filter(|decision| {
                query
                    .operation
                    .as_deref()
                    .is_none_or(|operation| decision.operation.eq_ignore_ascii_case(operation))
            })
            .filter(|decision| {
                query
                    .symbol
                    .as_deref()
                    .is_none_or(|symbol| decision.symbol.as_deref() == Some(symbol))
            })
            .filter(|decision| query.executed.is_none_or(|executed| decision.executed == executed))
            .filter(|decision| {
                let day = decision.decision_time.date_naive();
                query.start_date.is_none_or(|start| day >= start)
                    && query.end_date.is_none_or(|end| day <= end)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.decision_time.cmp(&a.decision_time));
        matching.truncate(query.limit.unwrap_or(DEFAULT_DECISION_LIMIT));
        Ok(matching)
    }

    pub fn decision(&self, account_id: i64, decision_id: i64) -> Result<DecisionOut, AppError> {
        self.require_account(account_id)?;
        self.decisions
            .iter()
            .find(|decision| decision.account_id == account_id && decision.id == decision_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Decision not found"))
    }

    pub fn decision_stats(&self, account_id: i64, days: u32) -> Result<StatsOut, AppError> {
        self.require_account(account_id)?;
        // A window reaching past chrono's range has no lower bound.
        let since = Utc::now()
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let window: Vec<&DecisionOut> = self
            .decisions
            .iter()
            .filter(|decision| decision.account_id == account_id && decision.decision_time >= since)
            .collect();
        let count = |operation: &str| window.iter().filter(|d| d.operation == operation).count() as u64;
        let total = window.len() as u64;
        let executed = window.iter().filter(|d| d.executed).count() as u64;
        Ok(StatsOut {
            period_days: days,
            total_decisions: total,
            executed_decisions: executed,
            buy_decisions: count("buy"),
            sell_decisions: count("sell"),
            hold_decisions: count("hold"),
            execution_rate: if total == 0 {
                0.0
            } else {
                executed as f64 / total as f64
            },
        })
    }
}

/// `****` plus the last four characters; empty keys stay empty.
pub fn mask_api_key(api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }
    let tail: String = api_key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}
