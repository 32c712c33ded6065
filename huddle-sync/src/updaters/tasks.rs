//! Task updaters.

use huddle_cache::CacheStore;
use huddle_core::{ConnectionField, Entity, EntityIdType, Task, TaskId, UserId};
use tracing::trace;

/// Upsert tasks onto their team board and keep the viewer's personal task
/// list in step with ownership: a task the viewer owns gains an edge there,
/// a task reassigned away from the viewer loses it.
pub fn upsert_tasks(tasks: &[Task], cache: &mut CacheStore, viewer_id: &UserId) {
    for task in tasks {
        cache.put(Entity::Task(task.clone()));
        cache.append_edge(
            task.team_id.as_str(),
            ConnectionField::TeamTasks,
            task.id.as_str(),
        );
        if task.user_id.as_ref() == Some(viewer_id) {
            cache.append_edge(viewer_id.as_str(), ConnectionField::Tasks, task.id.as_str());
        } else {
            cache.remove_edge(viewer_id.as_str(), ConnectionField::Tasks, task.id.as_str());
        }
    }
}

/// Remove tasks from their team board and the viewer's personal list, then
/// delete the records.
pub fn remove_tasks(task_ids: &[TaskId], cache: &mut CacheStore, viewer_id: &UserId) {
    for task_id in task_ids {
        if let Some(Entity::Task(task)) = cache.get(task_id.as_str()) {
            let team_id = task.team_id.clone();
            cache.remove_edge(team_id.as_str(), ConnectionField::TeamTasks, task_id.as_str());
        } else {
            trace!(task_id = %task_id, "remove_tasks: task absent, already satisfied");
        }
        cache.remove_edge(viewer_id.as_str(), ConnectionField::Tasks, task_id.as_str());
        cache.delete(task_id.as_str());
    }
}
