use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Resize targets for uploaded images. Persisting an entity with a new image
/// emits `Event::ImageAttached`; the resize pipeline consumes it downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageTarget {
    CategoryThumb,
    BrandLogo,
    ColorSwatch,
    ProductImage,
    GalleryImage,
}

impl ImageTarget {
    /// Target dimensions in pixels (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::CategoryThumb | Self::BrandLogo | Self::ColorSwatch => (300, 300),
            Self::ProductImage | Self::GalleryImage => (800, 800),
        }
    }
}

// The events the catalog can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Catalog structure events
    BaseCategoryCreated(Uuid),
    BaseCategoryDeleted(Uuid),
    CategoryCreated(Uuid),
    CategoryUpdated(Uuid),
    CategoryDeleted {
        category_id: Uuid,
        subtree_size: usize,
    },
    BrandCreated(Uuid),
    BrandDeleted(Uuid),

    // Product events
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),
    ProductCategoryAssigned {
        product_id: Uuid,
        category_id: Uuid,
    },
    ProductCategoryRemoved {
        product_id: Uuid,
        category_id: Uuid,
    },

    // Package (variant) events
    PackageCreated {
        product_id: Uuid,
        package_id: Uuid,
    },
    PackageUpdated {
        product_id: Uuid,
        package_id: Uuid,
    },
    PackageDeleted {
        product_id: Uuid,
        package_id: Uuid,
    },

    // Comment events
    CommentCreated {
        product_id: Uuid,
        comment_id: Uuid,
    },
    CommentApproved(Uuid),

    // Side-effecting post-save hook for the image pipeline
    ImageAttached {
        url: String,
        target: ImageTarget,
    },

    // Generic event for custom messages
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
        metadata: serde_json::Value,
    },
}

impl Event {
    /// Create a generic event with string data
    pub fn with_data(data: String) -> Self {
        Event::Generic {
            message: data,
            timestamp: Utc::now(),
            metadata: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is gone.
    /// Event delivery is best-effort; domain writes never roll back over it.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Event dropped: {}", e);
        }
    }
}

// Handlers implementing this trait process events asynchronously.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle_event(&self, event: Event) -> Result<(), String>;
}

/// Process incoming events. Image attachments are handed to the (external)
/// resize pipeline; everything else is logged for integrations to tail.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::ImageAttached { url, target } => {
                let (w, h) = target.dimensions();
                if let Err(e) = dispatch_image_resize(&url, w, h).await {
                    error!("Failed to dispatch image resize: url={}, error={}", url, e);
                }
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}

async fn dispatch_image_resize(url: &str, width: u32, height: u32) -> Result<(), String> {
    // The resize pipeline lives outside this service; this is the hand-off
    // point it subscribes to.
    info!(url, width, height, "image queued for resize");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_targets_are_300_square() {
        assert_eq!(ImageTarget::CategoryThumb.dimensions(), (300, 300));
        assert_eq!(ImageTarget::BrandLogo.dimensions(), (300, 300));
        assert_eq!(ImageTarget::ColorSwatch.dimensions(), (300, 300));
    }

    #[test]
    fn product_targets_are_800_square() {
        assert_eq!(ImageTarget::ProductImage.dimensions(), (800, 800));
        assert_eq!(ImageTarget::GalleryImage.dimensions(), (800, 800));
    }

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        // Must not panic or error out.
        sender.send_or_log(Event::ProductCreated(Uuid::new_v4())).await;
    }
}
