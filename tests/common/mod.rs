//! Shared setup for integration tests: an in-memory SQLite database with all
//! migrations applied and the full service graph wired the same way `main`
//! does it.
#![allow(dead_code)]

use catalog_api::{
    auth::{AuthConfig, AuthService},
    config::AppConfig,
    db,
    entities::user,
    events::{self, EventSender},
    handlers::AppServices,
    services::{
        catalog::{CreateBaseCategoryInput, CreateCategoryInput},
        products::CreateProductInput,
    },
    AppState,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

const TEST_JWT_SECRET: &str =
    "integration_test_secret_key_that_is_at_least_64_characters_long_0000";

pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
    pub event_sender: EventSender,
}

pub async fn setup() -> TestApp {
    let pool = db::establish_connection("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    let db = Arc::new(pool);

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(events::process_events(rx));
    let event_sender = EventSender::new(tx);

    let auth = Arc::new(AuthService::new(
        AuthConfig::new(
            TEST_JWT_SECRET.to_string(),
            "catalog-auth".to_string(),
            "catalog-api".to_string(),
            Duration::from_secs(3600),
            Duration::from_secs(86_400),
        ),
        db.clone(),
    ));

    TestApp {
        services: AppServices::new(db.clone(), Arc::new(event_sender.clone()), auth),
        event_sender,
        db,
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration: 3600,
        refresh_token_expiration: 86_400,
        auth_issuer: "catalog-auth".to_string(),
        auth_audience: "catalog-api".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "development".to_string(),
        log_level: "info".to_string(),
        log_json: false,
        auto_migrate: false,
        cors_allowed_origins: None,
        cors_allow_any_origin: false,
        db_max_connections: 5,
        db_min_connections: 1,
        db_connect_timeout_secs: 5,
        db_idle_timeout_secs: 60,
        db_acquire_timeout_secs: 5,
        event_channel_capacity: 64,
        api_default_page_size: 20,
        api_max_page_size: 100,
    }
}

impl TestApp {
    /// The HTTP surface wired exactly the way `main` builds it: v1 routes,
    /// health probes, and the auth middleware's service extension.
    pub fn router(&self) -> axum::Router {
        let auth_service = self.services.auth.clone();
        let state = AppState {
            db: self.db.clone(),
            config: test_config(),
            event_sender: self.event_sender.clone(),
            services: self.services.clone(),
        };

        axum::Router::new()
            .nest("/health", catalog_api::health::health_routes())
            .nest("/api/v1", catalog_api::api_v1_routes())
            .layer(axum::middleware::from_fn_with_state(
                auth_service,
                |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
                 mut req: axum::http::Request<axum::body::Body>,
                 next: axum::middleware::Next| async move {
                    req.extensions_mut().insert(auth);
                    next.run(req).await
                },
            ))
            .with_state(state)
    }

    /// Insert a user row directly; account provisioning is out of scope for
    /// the catalog service itself.
    pub async fn create_user(&self, username: &str, is_staff: bool) -> user::Model {
        user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            is_staff: Set(is_staff),
            created_at: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await
        .expect("user insert")
    }

    pub async fn create_base_category(&self, name: &str) -> Uuid {
        self.services
            .catalog
            .create_base_category(CreateBaseCategoryInput {
                name: name.to_string(),
                en_name: format!("{name}-en"),
                description: String::new(),
                image_url: None,
            })
            .await
            .expect("base category")
            .id
    }

    pub async fn create_category(
        &self,
        base_category_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> Uuid {
        self.services
            .catalog
            .create_category(CreateCategoryInput {
                base_category_id,
                parent_id,
                name: name.to_string(),
                en_name: format!("{name}-en"),
                description: String::new(),
                image_url: None,
            })
            .await
            .expect("category")
            .id
    }

    pub async fn create_product(&self, name: &str, category_ids: Vec<Uuid>) -> Uuid {
        self.services
            .products
            .create_product(CreateProductInput {
                name: name.to_string(),
                description: String::new(),
                is_active: true,
                image_url: None,
                category_ids,
            })
            .await
            .expect("product")
            .id
    }
}
