//! In-memory repository implementations for tests.
//!
//! These fakes honour the same contracts as the Diesel adapters: id and
//! timestamp assignment on insert, `updated_at` refresh on update, unique
//! email enforcement, foreign-key enforcement for order owners, and cascade
//! delete of a user's orders under a single lock so the cascade is atomic.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    OrderPersistenceError, OrderRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{NewOrder, NewUser, Order, OrderPatch, OrderWithOwner, User, UserPatch};

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    orders: Vec<Order>,
    next_user_id: i32,
    next_order_id: i32,
}

/// Shared in-memory store backing both repository fakes.
///
/// Both repositories must observe the same state so cascade deletes and
/// owner lookups behave like the relational store.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(StoreState {
                users: Vec::new(),
                orders: Vec::new(),
                next_user_id: 1,
                next_order_id: 1,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store lock poisoned")
    }
}

/// In-memory [`UserRepository`] implementation.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    /// Create a repository over the shared store.
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

/// In-memory [`OrderRepository`] implementation.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryOrderRepository {
    /// Create a repository over the shared store.
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

fn newest_first<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> (chrono::DateTime<Utc>, i32),
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.store.lock();
        Ok(newest_first(state.users.clone(), |user| {
            (user.created_at, user.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserPersistenceError> {
        let state = self.store.lock();
        Ok(state.users.iter().find(|user| user.id == id).cloned())
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<i32>,
    ) -> Result<bool, UserPersistenceError> {
        let state = self.store.lock();
        Ok(state
            .users
            .iter()
            .any(|user| user.email == email && Some(user.id) != exclude))
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.store.lock();
        if state.users.iter().any(|user| user.email == new_user.email) {
            return Err(UserPersistenceError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: state.next_user_id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            age: new_user.age,
            created_at: now,
            updated_at: now,
        };
        state.next_user_id += 1;
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.store.lock();
        if let Some(email) = &patch.email {
            if state
                .users
                .iter()
                .any(|user| user.email == *email && user.id != id)
            {
                return Err(UserPersistenceError::DuplicateEmail);
            }
        }

        let Some(user) = state.users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(age) = patch.age {
            user.age = age;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, UserPersistenceError> {
        let mut state = self.store.lock();
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        if state.users.len() == before {
            return Ok(false);
        }
        // Cascade under the same lock, mirroring the transactional delete.
        state.orders.retain(|order| order.user_id != id);
        Ok(true)
    }
}

fn join_owner(state: &StoreState, order: &Order) -> Option<OrderWithOwner> {
    state
        .users
        .iter()
        .find(|user| user.id == order.user_id)
        .map(|owner| OrderWithOwner {
            order: order.clone(),
            owner: owner.clone(),
        })
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list(&self) -> Result<Vec<OrderWithOwner>, OrderPersistenceError> {
        let state = self.store.lock();
        let joined = state
            .orders
            .iter()
            .filter_map(|order| join_owner(&state, order))
            .collect();
        Ok(newest_first(joined, |entry| {
            (entry.order.created_at, entry.order.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithOwner>, OrderPersistenceError> {
        let state = self.store.lock();
        Ok(state
            .orders
            .iter()
            .find(|order| order.id == id)
            .and_then(|order| join_owner(&state, order)))
    }

    async fn insert(&self, new_order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let mut state = self.store.lock();
        if !state.users.iter().any(|user| user.id == new_order.user_id) {
            return Err(OrderPersistenceError::OwnerMissing);
        }

        let now = Utc::now();
        let order = Order {
            id: state.next_order_id,
            title: new_order.title.clone(),
            description: new_order.description.clone(),
            user_id: new_order.user_id,
            created_at: now,
            updated_at: now,
        };
        state.next_order_id += 1;
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn update(
        &self,
        id: i32,
        patch: &OrderPatch,
    ) -> Result<Option<Order>, OrderPersistenceError> {
        let mut state = self.store.lock();
        if let Some(user_id) = patch.user_id {
            if !state.users.iter().any(|user| user.id == user_id) {
                return Err(OrderPersistenceError::OwnerMissing);
            }
        }

        let Some(order) = state.orders.iter_mut().find(|order| order.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            order.title = title.clone();
        }
        if let Some(description) = &patch.description {
            order.description = description.clone();
        }
        if let Some(user_id) = patch.user_id {
            order.user_id = user_id;
        }
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, OrderPersistenceError> {
        let mut state = self.store.lock();
        let before = state.orders.len();
        state.orders.retain(|order| order.id != id);
        Ok(state.orders.len() != before)
    }

    async fn list_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<OrderWithOwner>, OrderPersistenceError> {
        let state = self.store.lock();
        let joined = state
            .orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .filter_map(|order| join_owner(&state, order))
            .collect();
        Ok(newest_first(joined, |entry| {
            (entry.order.created_at, entry.order.id)
        }))
    }
}
