//! In-process stand-in for the hosted backend
//!
//! Stores wire records exactly as the real tables would, so every call goes
//! through the same mapping layer. Failures can be injected per operation.

use super::records::{
    MenuItemRecord, NewOrderRecord, OrderItemRecord, OrderRecord, OrderWithItemsRecord,
    UserRecord,
};
use super::{MenuQuery, RemoteService};
use crate::core::error::Error;
use crate::core::types::{IdentityId, OrderId, OrderStatus};
use crate::models::{Identity, MenuItem, NewOrder, Order, OrderDetails, OrderLine, UserProfile};
use crate::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Failure key matching every operation
const ANY_OPERATION: &str = "*";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    identity: Identity,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<String, Account>,
    current: Option<Identity>,
    users: Vec<UserRecord>,
    menu_items: Vec<MenuItemRecord>,
    orders: Vec<OrderRecord>,
    order_items: Vec<OrderItemRecord>,
    next_order_id: OrderId,
    next_line_id: i64,
}

impl Tables {
    fn joined(&self, order: &OrderRecord) -> OrderWithItemsRecord {
        let order_items = self
            .order_items
            .iter()
            .filter(|line| line.order_id == order.id)
            .map(|line| {
                let mut line = line.clone();
                line.menu_items = self
                    .menu_items
                    .iter()
                    .find(|item| item.id == line.menu_item_id)
                    .cloned();
                line
            })
            .collect();

        OrderWithItemsRecord {
            order: order.clone(),
            order_items,
        }
    }
}

/// In-memory [`RemoteService`] with failure injection
#[derive(Debug, Default)]
pub struct MemoryRemote {
    tables: Mutex<Tables>,
    failures: std::sync::Mutex<HashMap<String, String>>,
    latency: Option<Duration>,
    calls: AtomicU64,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the `menu_items` table
    pub fn with_menu(mut self, items: Vec<MenuItem>) -> Self {
        self.tables.get_mut().menu_items = items.iter().map(MenuItemRecord::from).collect();
        self
    }

    /// Registers an account that can sign in with `password`
    pub fn with_account(mut self, identity: Identity, password: impl Into<String>) -> Self {
        let account = Account {
            password: password.into(),
            identity: identity.clone(),
        };
        self.tables
            .get_mut()
            .accounts
            .insert(identity.email.clone(), account);
        self
    }

    /// Delays every call, so concurrent saves interleave
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes `operation` (a [`RemoteService`] method name) fail with `message`
    pub fn fail_operation(&self, operation: &str, message: impl Into<String>) {
        self.failures_guard()
            .insert(operation.to_string(), message.into());
    }

    /// Makes every operation fail with `message`
    pub fn fail_all(&self, message: impl Into<String>) {
        self.fail_operation(ANY_OPERATION, message);
    }

    pub fn clear_failures(&self) {
        self.failures_guard().clear();
    }

    /// Number of calls made through the [`RemoteService`] interface
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Every stored order, in insertion order
    pub async fn orders(&self) -> Result<Vec<Order>> {
        let tables = self.tables.lock().await;
        tables.orders.iter().cloned().map(Order::try_from).collect()
    }

    /// Stored lines of one order
    pub async fn order_lines(&self, order_id: OrderId) -> Vec<OrderLine> {
        let tables = self.tables.lock().await;
        tables
            .order_items
            .iter()
            .filter(|line| line.order_id == order_id)
            .map(|line| OrderLine {
                order_id: line.order_id,
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: line.total_price,
            })
            .collect()
    }

    /// Total number of `order_items` rows
    pub async fn line_count(&self) -> usize {
        self.tables.lock().await.order_items.len()
    }

    /// Stored `users` profiles
    pub async fn profiles(&self) -> Vec<UserProfile> {
        let tables = self.tables.lock().await;
        tables
            .users
            .iter()
            .map(|user| UserProfile {
                id: user.id,
                email: user.email.clone(),
                full_name: user.full_name.clone(),
            })
            .collect()
    }

    fn failures_guard(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn enter(&self, operation: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failures = self.failures_guard();
        let failure = failures
            .get(operation)
            .or_else(|| failures.get(ANY_OPERATION))
            .cloned();
        match failure {
            Some(message) => Err(Error::Remote(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteService for MemoryRemote {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        self.enter("current_identity").await?;
        Ok(self.tables.lock().await.current.clone())
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Identity> {
        self.enter("sign_up").await?;
        let mut tables = self.tables.lock().await;

        if tables.accounts.contains_key(email) {
            return Err(Error::Authentication("User already registered".into()));
        }
        if password.len() < 6 {
            return Err(Error::Authentication(
                "Password should be at least 6 characters".into(),
            ));
        }

        let identity = Identity::new(Uuid::new_v4(), email).with_full_name(full_name);
        tables.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        self.enter("sign_in").await?;
        let mut tables = self.tables.lock().await;

        let identity = match tables.accounts.get(email) {
            Some(account) if account.password == password => account.identity.clone(),
            _ => return Err(Error::Authentication("Invalid login credentials".into())),
        };
        tables.current = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.enter("sign_out").await?;
        self.tables.lock().await.current = None;
        Ok(())
    }

    async fn insert_profile(&self, profile: UserProfile) -> Result<()> {
        self.enter("insert_profile").await?;
        let mut tables = self.tables.lock().await;

        if tables.users.iter().any(|user| user.id == profile.id) {
            return Err(Error::Remote(
                "duplicate key value violates unique constraint \"users_pkey\"".into(),
            ));
        }
        tables.users.push(UserRecord::from(profile));
        Ok(())
    }

    async fn list_menu_items(&self, query: &MenuQuery) -> Result<Vec<MenuItem>> {
        self.enter("list_menu_items").await?;
        let tables = self.tables.lock().await;

        let mut items: Vec<MenuItem> = tables
            .menu_items
            .iter()
            .cloned()
            .map(MenuItem::from)
            .filter(|item| query.matches(item))
            .collect();
        items.sort_by(|a, b| query.compare(a, b));
        Ok(items)
    }

    async fn find_order(
        &self,
        owner: IdentityId,
        status: OrderStatus,
    ) -> Result<Option<OrderDetails>> {
        self.enter("find_order").await?;
        let tables = self.tables.lock().await;

        let mut matches = tables
            .orders
            .iter()
            .filter(|order| order.user_id == Some(owner) && order.status == status.as_str());

        let found = matches.next();
        if matches.next().is_some() {
            return Err(Error::Remote(
                "JSON object requested, multiple rows returned".into(),
            ));
        }

        found
            .map(|order| OrderDetails::try_from(tables.joined(order)))
            .transpose()
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderDetails>> {
        self.enter("get_order").await?;
        let tables = self.tables.lock().await;

        tables
            .orders
            .iter()
            .find(|order| order.id == order_id)
            .map(|order| OrderDetails::try_from(tables.joined(order)))
            .transpose()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        self.enter("insert_order").await?;
        let mut tables = self.tables.lock().await;

        tables.next_order_id += 1;
        let record = NewOrderRecord::from(order).into_record(tables.next_order_id, Utc::now());
        tables.orders.push(record.clone());
        Order::try_from(record)
    }

    async fn delete_order_lines(&self, order_id: OrderId) -> Result<()> {
        self.enter("delete_order_lines").await?;
        self.tables
            .lock()
            .await
            .order_items
            .retain(|line| line.order_id != order_id);
        Ok(())
    }

    async fn insert_order_lines(&self, lines: Vec<OrderLine>) -> Result<()> {
        self.enter("insert_order_lines").await?;
        let mut tables = self.tables.lock().await;

        // all-or-nothing, like a single multi-row insert
        for line in &lines {
            if !tables.orders.iter().any(|order| order.id == line.order_id) {
                return Err(Error::Remote(format!(
                    "insert or update on table \"order_items\" violates foreign key constraint (order {})",
                    line.order_id
                )));
            }
            if line.quantity == 0 {
                return Err(Error::Remote(
                    "new row for relation \"order_items\" violates check constraint \"quantity_positive\""
                        .into(),
                ));
            }
        }

        for line in &lines {
            tables.next_line_id += 1;
            let mut record = OrderItemRecord::from(line);
            record.id = Some(tables.next_line_id);
            tables.order_items.push(record);
        }
        Ok(())
    }
}
