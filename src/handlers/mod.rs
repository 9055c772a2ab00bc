use crate::{
    auth::AuthService,
    events::EventSender,
    services::{
        catalog::CatalogService, comments::CommentService, hierarchy::HierarchyService,
        packages::PackageService, products::ProductService,
    },
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod attributes;
pub mod base_categories;
pub mod brands;
pub mod categories;
pub mod colors;
pub mod comments;
pub mod common;
pub mod gallery;
pub mod packages;
pub mod products;
pub mod sizes;

/// Domain services shared by every HTTP handler.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService,
    pub hierarchy: HierarchyService,
    pub products: ProductService,
    pub packages: PackageService,
    pub comments: CommentService,
    pub auth: Arc<AuthService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        auth: Arc<AuthService>,
    ) -> Self {
        let hierarchy = HierarchyService::new(db.clone(), event_sender.clone());
        Self {
            catalog: CatalogService::new(db.clone(), event_sender.clone(), hierarchy.clone()),
            products: ProductService::new(db.clone(), event_sender.clone()),
            packages: PackageService::new(db.clone(), event_sender.clone()),
            comments: CommentService::new(db, event_sender),
            hierarchy,
            auth,
        }
    }
}
