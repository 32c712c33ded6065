//! Notification panel updaters.

use huddle_cache::CacheStore;
use huddle_core::{ConnectionField, Entity, EntityIdType, Notification, NotificationId, UserId};

/// Upsert notifications into the viewer's panel.
pub fn add_notifications(
    notifications: &[Notification],
    cache: &mut CacheStore,
    viewer_id: &UserId,
) {
    for notification in notifications {
        cache.put(Entity::Notification(notification.clone()));
        cache.append_edge(
            viewer_id.as_str(),
            ConnectionField::Notifications,
            notification.id.as_str(),
        );
    }
}

/// Remove notifications from the viewer's panel, then delete the records.
pub fn remove_notifications(
    notification_ids: &[NotificationId],
    cache: &mut CacheStore,
    viewer_id: &UserId,
) {
    for notification_id in notification_ids {
        cache.remove_edge(
            viewer_id.as_str(),
            ConnectionField::Notifications,
            notification_id.as_str(),
        );
        cache.delete(notification_id.as_str());
    }
}
