//! Cenários completos contra um Postgres real.
//!
//! Rodar com `DATABASE_URL=... cargo test -- --ignored`. O `#[sqlx::test]`
//! cria um banco descartável por teste e aplica as migrações.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::{collections::BTreeSet, path::PathBuf};
use uuid::Uuid;

use jamuku::{
    common::error::{AppError, Resource},
    config::{AppState, Config},
    models::{
        approval::ApprovalTarget,
        auth::{Claims, Role, User, UserStatus},
        inventory::{InventoryDraft, InventoryItem, ItemStatus},
        transaction::{NewTransaction, TransactionKind, TransactionStatus},
    },
};

fn state(pool: PgPool) -> AppState {
    let config = Config {
        database_url: String::new(),
        jwt_secret: "db-test-secret".into(),
        bind_addr: "127.0.0.1:0".into(),
        db_max_connections: 5,
        jwt_expiry_hours: 8,
        fonts_dir: PathBuf::from("./fonts"),
        seed_manager: None,
    };
    AppState::new(config, pool).unwrap()
}

fn claims_of(user: &User) -> Claims {
    Claims {
        user_id: user.id,
        user_name: user.username.clone(),
        user_role: user.role,
        exp: usize::MAX,
        iat: 0,
    }
}

async fn manager(state: &AppState) -> User {
    state
        .auth_service
        .ensure_manager("boss", "boss-pw")
        .await
        .unwrap()
        .unwrap()
}

fn draft(name: &str, quantity: i64, location_id: Option<Uuid>) -> InventoryDraft {
    InventoryDraft {
        name: name.into(),
        category: "Sembako".into(),
        quantity: Decimal::new(quantity, 0),
        unit: "kg".into(),
        status: ItemStatus::Active,
        location_id,
    }
}

async fn item_with_location(state: &AppState) -> InventoryItem {
    let location = state
        .location_service
        .create_location(&state.db_pool, "Gudang Utama", "Jl. Merdeka 1")
        .await
        .unwrap();
    state
        .inventory_service
        .create_item(&state.db_pool, draft("Gula Pasir", 50, Some(location.id)))
        .await
        .unwrap()
}

fn movement(item: &InventoryItem, author: &User, kind: TransactionKind, qty: i64) -> NewTransaction {
    NewTransaction {
        inventory_id: item.id,
        quantity: Decimal::new(qty, 0),
        kind,
        date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        note: None,
        created_by: author.id,
    }
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn registration_requires_manager_approval(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;

    let alice = state
        .auth_service
        .register_user("alice", "pw123", "pw123")
        .await
        .unwrap();
    assert_eq!(alice.role, Role::Staz);
    assert_eq!(alice.status, UserStatus::Pending);
    assert_ne!(alice.password_hash, "pw123");

    let err = state.auth_service.login_user("alice", "pw123").await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotActive(UserStatus::Pending)));

    let outcome = state
        .approval_service
        .decide(&state.db_pool, ApprovalTarget::User, alice.id, "approve", &claims_of(&boss))
        .await
        .unwrap();
    assert_eq!(outcome.status, "active");
    assert_eq!(outcome.approved_by, Some(boss.id));
    assert!(outcome.approved_at.is_some());

    let auth = state.auth_service.login_user("alice", "pw123").await.unwrap();
    assert_eq!(auth.role, Role::Staz);
    let claims = state.auth_service.validate_token(&auth.token).unwrap();
    assert_eq!(claims.user_id, alice.id);

    let err = state.auth_service.login_user("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn duplicate_username_is_a_conflict(pool: PgPool) {
    let state = state(pool);
    state.auth_service.register_user("alice", "a", "a").await.unwrap();

    let err = state
        .auth_service
        .register_user("alice", "b", "b")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UsernameAlreadyExists));
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn rejected_users_stay_rejected(pool: PgPool) {
    let state = state(pool);
    let boss = claims_of(&manager(&state).await);
    let bob = state.auth_service.register_user("bob", "pw", "pw").await.unwrap();

    let outcome = state
        .approval_service
        .decide(&state.db_pool, ApprovalTarget::User, bob.id, "reject", &boss)
        .await
        .unwrap();
    assert_eq!(outcome.status, "rejected");

    // Segunda decisão sobre o mesmo pedido
    let err = state
        .approval_service
        .decide(&state.db_pool, ApprovalTarget::User, bob.id, "approve", &boss)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrAlreadyProcessed));

    let err = state.auth_service.login_user("bob", "pw").await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotActive(UserStatus::Rejected)));
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn concurrent_approvals_only_one_wins(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;
    let item = item_with_location(&state).await;
    let created = state
        .transaction_service
        .create_transaction(&state.db_pool, movement(&item, &boss, TransactionKind::In, 10))
        .await
        .unwrap();

    let actor = claims_of(&boss);
    let (first, second) = tokio::join!(
        state.approval_service.decide(
            &state.db_pool,
            ApprovalTarget::Transaction,
            created.id,
            "approve",
            &actor
        ),
        state.approval_service.decide(
            &state.db_pool,
            ApprovalTarget::Transaction,
            created.id,
            "reject",
            &actor
        ),
    );

    let results = [first, second];
    let wins = results.iter().filter(|r| r.is_ok()).count();
    let losses = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::NotFoundOrAlreadyProcessed)))
        .count();
    assert_eq!((wins, losses), (1, 1));
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn approving_a_transaction_does_not_touch_stock(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;
    let item = item_with_location(&state).await;

    let created = state
        .transaction_service
        .create_transaction(&state.db_pool, movement(&item, &boss, TransactionKind::Out, 20))
        .await
        .unwrap();
    assert_eq!(created.status, TransactionStatus::Pending);

    state
        .approval_service
        .decide(
            &state.db_pool,
            ApprovalTarget::Transaction,
            created.id,
            "approve",
            &claims_of(&boss),
        )
        .await
        .unwrap();

    let after = state.inventory_service.get_item(item.id).await.unwrap();
    assert_eq!(after.quantity, Decimal::new(50, 0));

    let view = state.transaction_service.get_transaction(created.id).await.unwrap();
    assert_eq!(view.status, TransactionStatus::Approved);
    assert_eq!(view.approved_by_name.as_deref(), Some("boss"));
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn transaction_for_unknown_item_is_refused(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;
    let ghost = InventoryItem {
        id: Uuid::new_v4(),
        name: String::new(),
        category: String::new(),
        quantity: Decimal::ZERO,
        unit: String::new(),
        status: ItemStatus::Active,
        location_id: None,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    let err = state
        .transaction_service
        .create_transaction(&state.db_pool, movement(&ghost, &boss, TransactionKind::In, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MissingReference(Resource::InventoryItem)));
    assert!(state.transaction_service.list_transactions().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn location_in_use_cannot_be_deleted(pool: PgPool) {
    let state = state(pool);
    let item = item_with_location(&state).await;
    let location_id = item.location_id.unwrap();

    let err = state
        .location_service
        .delete_location(&state.db_pool, location_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialError(Resource::Location)));
    assert!(state.location_service.get_location(location_id).await.is_ok());

    // Sem itens apontando, a exclusão passa
    state.inventory_service.delete_item(&state.db_pool, item.id).await.unwrap();
    state
        .location_service
        .delete_location(&state.db_pool, location_id)
        .await
        .unwrap();
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn item_with_unknown_location_writes_nothing(pool: PgPool) {
    let state = state(pool);

    let err = state
        .inventory_service
        .create_item(&state.db_pool, draft("Minyak", 3, Some(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MissingReference(Resource::Location)));
    assert!(state.inventory_service.list_items().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn dashboard_reflects_pending_work(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;
    let item = item_with_location(&state).await;
    state.auth_service.register_user("carla", "pw", "pw").await.unwrap();
    state
        .transaction_service
        .create_transaction(&state.db_pool, movement(&item, &boss, TransactionKind::In, 5))
        .await
        .unwrap();

    let summary = state.dashboard_service.get_summary().await.unwrap();
    assert_eq!(summary.total_items, 1);
    assert_eq!(summary.active_items, 1);
    assert_eq!(summary.total_quantity, Decimal::new(50, 0));
    assert_eq!(summary.total_locations, 1);
    assert_eq!(summary.pending_transactions, 1);
    assert_eq!(summary.pending_users, 1);

    // Pendentes não entram nos rankings de movimentação
    assert!(state.dashboard_service.get_top_moved().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn unknown_username_is_not_found(pool: PgPool) {
    let state = state(pool);

    let err = state.auth_service.login_user("ghost", "pw").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::User)));
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn staff_only_see_active_users(pool: PgPool) {
    let state = state(pool);
    let boss = claims_of(&manager(&state).await);
    let dewi = state.auth_service.register_user("dewi", "pw", "pw").await.unwrap();
    let eko = state.auth_service.register_user("eko", "pw", "pw").await.unwrap();
    state.auth_service.register_user("fajar", "pw", "pw").await.unwrap();

    state
        .approval_service
        .decide(&state.db_pool, ApprovalTarget::User, dewi.id, "approve", &boss)
        .await
        .unwrap();
    state
        .approval_service
        .decide(&state.db_pool, ApprovalTarget::User, eko.id, "reject", &boss)
        .await
        .unwrap();

    let names = |users: Vec<User>| users.into_iter().map(|u| u.username).collect::<BTreeSet<_>>();

    let seen_by_staff = state
        .user_service
        .list_visible(&claims_of(&dewi))
        .await
        .unwrap();
    assert_eq!(names(seen_by_staff), BTreeSet::from(["boss", "dewi"].map(String::from)));

    let seen_by_manager = state.user_service.list_visible(&boss).await.unwrap();
    assert_eq!(
        names(seen_by_manager),
        BTreeSet::from(["boss", "dewi", "eko", "fajar"].map(String::from))
    );
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn quantities_the_column_cannot_hold_are_validation_errors(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;
    let item = item_with_location(&state).await;

    // 0.0001 vira 0.000 na coluna e cai no CHECK (quantity > 0)
    let mut tiny = movement(&item, &boss, TransactionKind::In, 1);
    tiny.quantity = Decimal::new(1, 4);
    let err = state
        .transaction_service
        .create_transaction(&state.db_pool, tiny)
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::ValidationError(e) if e.field_errors().contains_key("quantity")));

    let mut huge = draft("Beras", 0, None);
    huge.quantity = Decimal::new(1_000_000_000_000, 0);
    let err = state
        .inventory_service
        .create_item(&state.db_pool, huge)
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::ValidationError(e) if e.field_errors().contains_key("quantity")));

    assert!(state.transaction_service.list_transactions().await.unwrap().is_empty());
    assert_eq!(state.inventory_service.list_items().await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn transaction_by_deleted_author_is_an_invalid_token(pool: PgPool) {
    let state = state(pool);
    let boss = manager(&state).await;
    let item = item_with_location(&state).await;

    // Token ainda válido, mas o usuário já não existe
    let mut new_tx = movement(&item, &boss, TransactionKind::Out, 2);
    new_tx.created_by = Uuid::new_v4();
    let err = state
        .transaction_service
        .create_transaction(&state.db_pool, new_tx)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));
    assert!(state.transaction_service.list_transactions().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "precisa de DATABASE_URL apontando para um Postgres"]
async fn deletes_report_the_rows_removed(pool: PgPool) {
    let state = state(pool);
    let item = item_with_location(&state).await;
    let location_id = item.location_id.unwrap();

    let affected = state.inventory_service.delete_item(&state.db_pool, item.id).await.unwrap();
    assert_eq!(affected, 1);
    let affected = state
        .location_service
        .delete_location(&state.db_pool, location_id)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let err = state
        .location_service
        .delete_location(&state.db_pool, location_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Location)));
}
