//! Order operations: owner resolution, validation, repository access.

use std::sync::Arc;

use crate::domain::order::{USER_REF_MISSING, USER_REF_REQUIRED, check_description, check_title};
use crate::domain::ports::{OrderPersistenceError, OrderRepository, UserRepository};
use crate::domain::{
    Error, FieldErrors, NewOrder, OrderDraft, OrderPatch, OrderWithOwner, User, storage_error,
};

const ORDER_NOT_FOUND: &str = "order not found";
const USER_NOT_FOUND: &str = "user not found";

/// Use-case layer for the order resource.
///
/// Create resolves the referenced owner before validation and reports a
/// missing user as its own condition; update folds the same failure into the
/// field breakdown. The foreign key in the store backs both checks up
/// against concurrent user deletion.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderService {
    /// Create a service over the order and user repositories.
    #[must_use]
    pub fn new(orders: Arc<dyn OrderRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { orders, users }
    }

    /// Resolve a raw user reference to a live user.
    ///
    /// The single existence-check collaborator shared by order writes and
    /// the per-user order listing. Ids outside the store's id range resolve
    /// to `None` rather than erroring.
    pub async fn resolve_user_ref(&self, user_ref: i64) -> Result<Option<User>, Error> {
        let Ok(id) = i32::try_from(user_ref) else {
            return Ok(None);
        };
        self.users.find_by_id(id).await.map_err(storage_error)
    }

    /// All orders with owner snapshots, newest first.
    pub async fn list(&self) -> Result<Vec<OrderWithOwner>, Error> {
        self.orders.list().await.map_err(storage_error)
    }

    /// Fetch one order with its owner snapshot.
    pub async fn get(&self, id: i32) -> Result<OrderWithOwner, Error> {
        self.orders
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found(ORDER_NOT_FOUND))
    }

    /// Validate and persist a new order for an existing user.
    pub async fn create(&self, draft: OrderDraft) -> Result<OrderWithOwner, Error> {
        let Some(user_ref) = draft.user else {
            return Err(Error::bad_request(USER_REF_REQUIRED));
        };
        let Some(owner) = self.resolve_user_ref(user_ref).await? else {
            return Err(Error::bad_request(USER_REF_MISSING));
        };

        let mut errors = FieldErrors::new();
        let title = errors.collect("title", check_title(draft.title.as_deref()));
        let description = errors.collect(
            "description",
            check_description(draft.description.as_deref()),
        );
        let (Some(title), Some(description)) = (title, description) else {
            return Err(Error::validation(errors));
        };

        let new_order = NewOrder {
            title,
            description,
            user_id: owner.id,
        };
        match self.orders.insert(&new_order).await {
            Ok(order) => Ok(OrderWithOwner { order, owner }),
            Err(OrderPersistenceError::OwnerMissing) => Err(Error::bad_request(USER_REF_MISSING)),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Validate and apply a partial update; absent fields stay unchanged.
    pub async fn update(&self, id: i32, draft: OrderDraft) -> Result<OrderWithOwner, Error> {
        let Some(existing) = self.orders.find_by_id(id).await.map_err(storage_error)? else {
            return Err(Error::not_found(ORDER_NOT_FOUND));
        };

        let mut owner = existing.owner;
        let mut patch = OrderPatch::default();
        let mut errors = FieldErrors::new();
        // Unlike create, the owner failure joins the field breakdown so a
        // request with a bad owner and a bad title reports both.
        if let Some(user_ref) = draft.user {
            match self.resolve_user_ref(user_ref).await? {
                Some(resolved) => {
                    patch.user_id = Some(resolved.id);
                    owner = resolved;
                }
                None => errors.push("user", USER_REF_MISSING),
            }
        }

        if draft.title.is_some() {
            patch.title = errors.collect("title", check_title(draft.title.as_deref()));
        }
        if draft.description.is_some() {
            patch.description = errors.collect(
                "description",
                check_description(draft.description.as_deref()),
            );
        }
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        match self.orders.update(id, &patch).await {
            Ok(Some(order)) => Ok(OrderWithOwner { order, owner }),
            Ok(None) => Err(Error::not_found(ORDER_NOT_FOUND)),
            Err(OrderPersistenceError::OwnerMissing) => Err(Error::bad_request(USER_REF_MISSING)),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Delete an order.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.orders.delete(id).await.map_err(storage_error)? {
            Ok(())
        } else {
            Err(Error::not_found(ORDER_NOT_FOUND))
        }
    }

    /// All orders owned by an existing user, newest first.
    ///
    /// A user without orders yields an empty list; an unknown user is a
    /// not-found condition, distinct from the empty case.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderWithOwner>, Error> {
        if self
            .users
            .find_by_id(user_id)
            .await
            .map_err(storage_error)?
            .is_none()
        {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        self.orders
            .list_for_user(user_id)
            .await
            .map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    //! Service semantics over the in-memory repositories.
    use super::*;
    use crate::domain::{ErrorCode, UserDraft, UserService};
    use crate::test_support::{InMemoryOrderRepository, InMemoryStore, InMemoryUserRepository};

    struct Fixture {
        users: UserService,
        orders: OrderService,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let user_repo = Arc::new(InMemoryUserRepository::new(Arc::clone(&store)));
        let order_repo = Arc::new(InMemoryOrderRepository::new(store));
        Fixture {
            users: UserService::new(user_repo.clone()),
            orders: OrderService::new(order_repo, user_repo),
        }
    }

    async fn seeded_user(fixture: &Fixture, email: &str) -> User {
        fixture
            .users
            .create(UserDraft {
                name: Some("Ada".to_owned()),
                email: Some(email.to_owned()),
                age: Some(36),
            })
            .await
            .expect("seed user")
    }

    fn order_draft(user: Option<i64>) -> OrderDraft {
        OrderDraft {
            title: Some("Build a web app".to_owned()),
            description: Some("A web application with persistence".to_owned()),
            user,
        }
    }

    #[tokio::test]
    async fn create_requires_a_user_reference() {
        let fixture = fixture();
        let err = fixture
            .orders
            .create(order_draft(None))
            .await
            .expect_err("no user supplied");

        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(err.message(), "user id is required");
        assert!(err.field_errors().is_none());
    }

    #[tokio::test]
    async fn create_rejects_a_nonexistent_user_before_writing() {
        let fixture = fixture();
        let err = fixture
            .orders
            .create(order_draft(Some(99_999)))
            .await
            .expect_err("unknown user");

        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(err.message(), "user with the given id does not exist");
        assert!(fixture.orders.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn create_embeds_the_owner_snapshot() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;

        let created = fixture
            .orders
            .create(order_draft(Some(owner.id.into())))
            .await
            .expect("create order");

        assert_eq!(created.order.user_id, owner.id);
        assert_eq!(created.owner, owner);
    }

    #[tokio::test]
    async fn create_round_trips_through_get() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;
        let created = fixture
            .orders
            .create(order_draft(Some(owner.id.into())))
            .await
            .expect("create order");

        let fetched = fixture
            .orders
            .get(created.order.id)
            .await
            .expect("fetch order");
        assert_eq!(fetched.order.title, created.order.title);
        assert_eq!(fetched.order.description, created.order.description);
        assert_eq!(fetched.order.user_id, owner.id);
        assert_eq!(fetched.owner.email, owner.email);
    }

    #[tokio::test]
    async fn create_aggregates_title_and_description_errors() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;

        let err = fixture
            .orders
            .create(OrderDraft {
                title: Some("ab".to_owned()),
                description: Some("short".to_owned()),
                user: Some(owner.id.into()),
            })
            .await
            .expect_err("both fields fail");

        let errors = err.field_errors().expect("field errors present");
        assert!(errors.messages("title").is_some());
        assert!(errors.messages("description").is_some());
    }

    #[tokio::test]
    async fn update_can_move_an_order_to_another_user() {
        let fixture = fixture();
        let first = seeded_user(&fixture, "first@example.com").await;
        let second = seeded_user(&fixture, "second@example.com").await;
        let created = fixture
            .orders
            .create(order_draft(Some(first.id.into())))
            .await
            .expect("create order");

        let updated = fixture
            .orders
            .update(
                created.order.id,
                OrderDraft {
                    user: Some(second.id.into()),
                    ..OrderDraft::default()
                },
            )
            .await
            .expect("reassign order");

        assert_eq!(updated.order.user_id, second.id);
        assert_eq!(updated.owner.id, second.id);
        assert_eq!(updated.order.title, created.order.title);
    }

    #[tokio::test]
    async fn update_rejects_an_unknown_user_reference() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;
        let created = fixture
            .orders
            .create(order_draft(Some(owner.id.into())))
            .await
            .expect("create order");

        let err = fixture
            .orders
            .update(
                created.order.id,
                OrderDraft {
                    user: Some(99_999),
                    ..OrderDraft::default()
                },
            )
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Validation);
        let errors = err.field_errors().expect("field errors present");
        assert_eq!(
            errors.messages("user"),
            Some(&["user with the given id does not exist".to_owned()][..])
        );
    }

    #[tokio::test]
    async fn update_reports_a_bad_owner_alongside_other_field_errors() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;
        let created = fixture
            .orders
            .create(order_draft(Some(owner.id.into())))
            .await
            .expect("create order");

        let err = fixture
            .orders
            .update(
                created.order.id,
                OrderDraft {
                    title: Some("ab".to_owned()),
                    description: None,
                    user: Some(99_999),
                },
            )
            .await
            .expect_err("owner and title both fail");

        let errors = err.field_errors().expect("field errors present");
        assert!(errors.messages("user").is_some());
        assert!(errors.messages("title").is_some());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_its_orders() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;
        let first = fixture
            .orders
            .create(order_draft(Some(owner.id.into())))
            .await
            .expect("first order");
        let second = fixture
            .orders
            .create(order_draft(Some(owner.id.into())))
            .await
            .expect("second order");

        fixture.users.delete(owner.id).await.expect("delete user");

        for order_id in [first.order.id, second.order.id] {
            let err = fixture
                .orders
                .get(order_id)
                .await
                .expect_err("cascaded order is gone");
            assert_eq!(err.code(), ErrorCode::NotFound);
        }
    }

    #[tokio::test]
    async fn list_for_user_distinguishes_empty_from_missing() {
        let fixture = fixture();
        let owner = seeded_user(&fixture, "ada@example.com").await;

        let orders = fixture
            .orders
            .list_for_user(owner.id)
            .await
            .expect("existing user with no orders");
        assert!(orders.is_empty());

        let err = fixture
            .orders
            .list_for_user(99_999)
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_missing_order_is_not_found() {
        let fixture = fixture();
        let err = fixture.orders.delete(42).await.expect_err("unknown order");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
