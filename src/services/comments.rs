use crate::{
    entities::{comment, Comment, CommentModel, Product, User},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Product comments with reply threading and moderation.
///
/// The author is always an explicit argument threaded in from the
/// authenticated caller; nothing in here reads ambient request state.
#[derive(Clone)]
pub struct CommentService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl CommentService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a comment authored by `author_id`. A reply's parent must be a
    /// comment on the same product. New comments await moderation.
    #[instrument(skip(self))]
    pub async fn create_comment(
        &self,
        input: CreateCommentInput,
        author_id: Uuid,
    ) -> Result<CommentModel, ServiceError> {
        validate_rating(input.rating)?;

        if Product::find_by_id(input.product_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Product {} not found",
                input.product_id
            )));
        }
        if User::find_by_id(author_id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "User {} not found",
                author_id
            )));
        }

        if let Some(parent_id) = input.parent_id {
            let parent = Comment::find_by_id(parent_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Comment {} not found", parent_id))
                })?;
            if parent.product_id != input.product_id {
                return Err(ServiceError::ValidationError(format!(
                    "parent comment {} belongs to a different product",
                    parent_id
                )));
            }
        }

        let comment_id = Uuid::new_v4();
        let model = comment::ActiveModel {
            id: Set(comment_id),
            product_id: Set(input.product_id),
            user_id: Set(author_id),
            parent_id: Set(input.parent_id),
            body: Set(input.body),
            rating: Set(input.rating),
            is_approved: Set(false),
            created_at: Set(Utc::now()),
        };
        let model = model.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CommentCreated {
                product_id: model.product_id,
                comment_id,
            })
            .await;

        info!("Created comment {} on product {}", comment_id, model.product_id);
        Ok(model)
    }

    /// Approve a comment for public display.
    #[instrument(skip(self))]
    pub async fn approve_comment(&self, comment_id: Uuid) -> Result<CommentModel, ServiceError> {
        let model = self.get_comment(comment_id).await?;

        let mut active: comment::ActiveModel = model.into();
        active.is_approved = Set(true);
        let model = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CommentApproved(comment_id))
            .await;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_comment(&self, comment_id: Uuid) -> Result<CommentModel, ServiceError> {
        Comment::find_by_id(comment_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Comment {} not found", comment_id)))
    }

    /// List comments, newest first, optionally filtered by product and
    /// approval state.
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        query: CommentQuery,
    ) -> Result<Vec<CommentModel>, ServiceError> {
        let mut db_query = Comment::find();
        if let Some(product_id) = query.product_id {
            db_query = db_query.filter(comment::Column::ProductId.eq(product_id));
        }
        if let Some(is_approved) = query.is_approved {
            db_query = db_query.filter(comment::Column::IsApproved.eq(is_approved));
        }
        db_query
            .order_by_desc(comment::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// All comments written by one user, newest first.
    #[instrument(skip(self))]
    pub async fn comments_by_user(&self, user_id: Uuid) -> Result<Vec<CommentModel>, ServiceError> {
        Comment::find()
            .filter(comment::Column::UserId.eq(user_id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Update a comment's body/rating. Only the author may edit.
    #[instrument(skip(self))]
    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        input: UpdateCommentInput,
        requester_id: Uuid,
    ) -> Result<CommentModel, ServiceError> {
        let model = self.get_comment(comment_id).await?;
        if model.user_id != requester_id {
            return Err(ServiceError::Forbidden(
                "only the author may edit a comment".to_string(),
            ));
        }

        if let Some(rating) = input.rating {
            validate_rating(rating)?;
        }

        let mut active: comment::ActiveModel = model.into();
        if let Some(body) = input.body {
            active.body = Set(body);
        }
        if let Some(rating) = input.rating {
            active.rating = Set(rating);
        }
        active.update(&*self.db).await.map_err(Into::into)
    }

    /// Delete a comment. Allowed for the author or a moderator; replies to
    /// the comment go with it.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Uuid,
        requester_id: Uuid,
        is_moderator: bool,
    ) -> Result<(), ServiceError> {
        let model = self.get_comment(comment_id).await?;
        if model.user_id != requester_id && !is_moderator {
            return Err(ServiceError::Forbidden(
                "only the author or a moderator may delete a comment".to_string(),
            ));
        }

        Comment::delete_many()
            .filter(comment::Column::ParentId.eq(comment_id))
            .exec(&*self.db)
            .await?;

        let active: comment::ActiveModel = model.into();
        active.delete(&*self.db).await?;
        Ok(())
    }
}

/// Comment ratings are whole stars in `[1, 5]`.
fn validate_rating(rating: i16) -> Result<(), ServiceError> {
    if !(1..=5).contains(&rating) {
        return Err(ServiceError::ValidationError(format!(
            "comment rating must be within 1..=5, got {rating}"
        )));
    }
    Ok(())
}

/// Input for creating a comment
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCommentInput {
    pub product_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub body: String,
    pub rating: i16,
}

/// Input for editing a comment
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateCommentInput {
    pub body: Option<String>,
    pub rating: Option<i16>,
}

/// Comment listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentQuery {
    pub product_id: Option<Uuid>,
    pub is_approved: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_one_to_five() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
    }
}
