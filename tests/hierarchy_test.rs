//! Category tree traversal and attribute inheritance.

mod common;

use assert_matches::assert_matches;
use catalog_api::{
    entities::category,
    errors::ServiceError,
    services::catalog::CreateCategoryAttributeInput,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

#[tokio::test]
async fn ancestry_path_walks_to_the_root() {
    let app = common::setup().await;
    let base = app.create_base_category("clothing").await;

    // A five-level chain: level0 is the root
    let mut ids = Vec::new();
    let mut parent = None;
    for level in 0..5 {
        let id = app
            .create_category(base, parent, &format!("level{level}"))
            .await;
        ids.push(id);
        parent = Some(id);
    }

    let path = app
        .services
        .hierarchy
        .ancestry_path(ids[4])
        .await
        .unwrap();

    assert_eq!(path.len(), 5);
    assert_eq!(path[0].id, ids[4]);
    assert_eq!(path[4].id, ids[0]);
    assert_eq!(path[4].parent_id, None, "the walk ends at the root");
}

#[tokio::test]
async fn ancestry_path_of_a_root_is_itself() {
    let app = common::setup().await;
    let base = app.create_base_category("clothing").await;
    let root = app.create_category(base, None, "root").await;

    let path = app.services.hierarchy.ancestry_path(root).await.unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].id, root);
}

#[tokio::test]
async fn cyclic_chains_fail_instead_of_hanging() {
    let app = common::setup().await;
    let base = app.create_base_category("clothing").await;
    let a = app.create_category(base, None, "a").await;
    let b = app.create_category(base, Some(a), "b").await;
    let c = app.create_category(base, Some(b), "c").await;

    // The service refuses to create cycles, so corrupt the tree directly the
    // way a bad migration or manual write could.
    let root = category::Entity::find_by_id(a)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    let mut root: category::ActiveModel = root.into();
    root.parent_id = Set(Some(c));
    root.update(app.db.as_ref()).await.unwrap();

    let walk = app.services.hierarchy.ancestry_path(c).await;
    assert_matches!(walk, Err(ServiceError::CycleDetected(_)));

    let subtree = app.services.hierarchy.subtree_ids(a).await;
    assert_matches!(subtree, Err(ServiceError::CycleDetected(_)));
}

#[tokio::test]
async fn effective_attributes_keep_same_named_definitions_distinct() {
    let app = common::setup().await;
    let base = app.create_base_category("furniture").await;
    let chairs = app.create_category(base, None, "chairs").await;
    let outdoor = app.create_category(base, None, "outdoor").await;

    for (category_id, value) in [(chairs, "matte"), (outdoor, "weatherproof")] {
        app.services
            .catalog
            .create_category_attribute(CreateCategoryAttributeInput {
                category_id,
                name: "color-finish".to_string(),
                title: None,
                value: value.to_string(),
            })
            .await
            .unwrap();
    }

    let product = app.create_product("garden-chair", vec![chairs, outdoor]).await;

    let attributes = app
        .services
        .hierarchy
        .effective_attributes(product)
        .await
        .unwrap();

    assert_eq!(attributes.len(), 2, "one entry per defining category");
    assert!(attributes.iter().all(|a| a.name == "color-finish"));
    let mut values: Vec<&str> = attributes.iter().map(|a| a.value.as_str()).collect();
    values.sort();
    assert_eq!(values, ["matte", "weatherproof"]);
}

#[tokio::test]
async fn attribute_title_defaults_when_omitted() {
    let app = common::setup().await;
    let base = app.create_base_category("furniture").await;
    let chairs = app.create_category(base, None, "chairs").await;

    let attribute = app
        .services
        .catalog
        .create_category_attribute(CreateCategoryAttributeInput {
            category_id: chairs,
            name: "material".to_string(),
            title: None,
            value: "oak".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(attribute.title, "untitled attribute");
}

#[tokio::test]
async fn category_assignment_is_idempotent() {
    let app = common::setup().await;
    let base = app.create_base_category("furniture").await;
    let chairs = app.create_category(base, None, "chairs").await;
    let product = app.create_product("stool", vec![]).await;

    app.services
        .hierarchy
        .assign_category(product, chairs)
        .await
        .unwrap();
    // Second assignment is a no-op, not an error
    app.services
        .hierarchy
        .assign_category(product, chairs)
        .await
        .unwrap();

    let categories = app
        .services
        .hierarchy
        .category_ids_of(product)
        .await
        .unwrap();
    assert_eq!(categories, vec![chairs]);

    app.services
        .hierarchy
        .remove_category(product, chairs)
        .await
        .unwrap();
    // Removing a link that is already gone is also a no-op
    app.services
        .hierarchy
        .remove_category(product, chairs)
        .await
        .unwrap();

    let categories = app
        .services
        .hierarchy
        .category_ids_of(product)
        .await
        .unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn assigning_unknown_references_fails() {
    let app = common::setup().await;
    let base = app.create_base_category("furniture").await;
    let chairs = app.create_category(base, None, "chairs").await;
    let product = app.create_product("stool", vec![]).await;

    let ghost_category = app
        .services
        .hierarchy
        .assign_category(product, Uuid::new_v4())
        .await;
    assert_matches!(ghost_category, Err(ServiceError::NotFound(_)));

    let ghost_product = app
        .services
        .hierarchy
        .assign_category(Uuid::new_v4(), chairs)
        .await;
    assert_matches!(ghost_product, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn subtree_ids_cover_the_whole_branch() {
    let app = common::setup().await;
    let base = app.create_base_category("clothing").await;
    let root = app.create_category(base, None, "root").await;
    let left = app.create_category(base, Some(root), "left").await;
    let right = app.create_category(base, Some(root), "right").await;
    let leaf = app.create_category(base, Some(left), "leaf").await;
    let stranger = app.create_category(base, None, "stranger").await;

    let mut subtree = app.services.hierarchy.subtree_ids(root).await.unwrap();
    subtree.sort();
    let mut expected = vec![root, left, right, leaf];
    expected.sort();
    assert_eq!(subtree, expected);
    assert!(!subtree.contains(&stranger));
}
