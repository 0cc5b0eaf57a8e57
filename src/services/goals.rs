//! Goal validation and state transitions over a caller-owned collection.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::models::goal::{CreateGoalRequest, Goal, GoalProgress, UpdateGoalRequest};

pub struct GoalStore<'a> {
    goals: &'a mut Vec<Goal>,
}

impl<'a> GoalStore<'a> {
    pub fn new(goals: &'a mut Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn create(
        &mut self,
        user_id: Uuid,
        input: CreateGoalRequest,
        now: DateTime<Utc>,
    ) -> DomainResult<Goal> {
        input.validate()?;
        let title = required_title(&input.title)?;

        let goal = Goal {
            id: Uuid::new_v4(),
            user_id,
            title,
            description: non_blank(input.description),
            target_value: non_blank(input.target_value),
            category: input.category.unwrap_or_default(),
            is_completed: false,
            created_at: now,
        };
        self.goals.push(goal.clone());
        Ok(goal)
    }

    pub fn update(&mut self, id: Uuid, patch: UpdateGoalRequest) -> DomainResult<Goal> {
        patch.validate()?;
        let title = patch.title.as_deref().map(required_title).transpose()?;

        let goal = self.get_mut(id)?;
        if let Some(title) = title {
            goal.title = title;
        }
        if let Some(description) = patch.description {
            goal.description = non_blank(Some(description));
        }
        if let Some(target_value) = patch.target_value {
            goal.target_value = non_blank(Some(target_value));
        }
        if let Some(category) = patch.category {
            goal.category = category;
        }
        if let Some(is_completed) = patch.is_completed {
            goal.is_completed = is_completed;
        }
        Ok(goal.clone())
    }

    pub fn toggle_complete(&mut self, id: Uuid) -> DomainResult<Goal> {
        let goal = self.get_mut(id)?;
        goal.is_completed = !goal.is_completed;
        Ok(goal.clone())
    }

    /// Idempotent. Returns whether a goal was actually removed.
    pub fn delete(&mut self, id: Uuid) -> DomainResult<bool> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        Ok(self.goals.len() != before)
    }

    fn get_mut(&mut self, id: Uuid) -> DomainResult<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| DomainError::not_found("Goal", id))
    }
}

/// A goal owned by someone else reads as not found.
pub fn find_owned(goals: &[Goal], user_id: Uuid, id: Uuid) -> DomainResult<&Goal> {
    goals
        .iter()
        .find(|g| g.id == id && g.user_id == user_id)
        .ok_or_else(|| DomainError::not_found("Goal", id))
}

/// Most recently created first. Later inserts win ties.
pub fn list_for_user(goals: &[Goal], user_id: Uuid) -> Vec<Goal> {
    let mut owned: Vec<Goal> = goals
        .iter()
        .rev()
        .filter(|g| g.user_id == user_id)
        .cloned()
        .collect();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    owned
}

pub fn progress(goals: &[Goal], user_id: Uuid) -> GoalProgress {
    goals
        .iter()
        .filter(|g| g.user_id == user_id)
        .fold(GoalProgress::default(), |mut p, g| {
            p.total += 1;
            if g.is_completed {
                p.completed += 1;
            }
            p
        })
}

fn required_title(raw: &str) -> DomainResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::validation("title", "Goal title is required"));
    }
    Ok(title.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::goal::GoalCategory;
    use chrono::Duration;

    fn request(title: &str) -> CreateGoalRequest {
        CreateGoalRequest {
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_requires_title() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);

        let err = store.create(Uuid::nil(), request(""), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "title"));

        let err = store.create(Uuid::nil(), request("   "), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(goals.is_empty());
    }

    #[test]
    fn test_create_defaults() {
        let mut goals = Vec::new();
        let user = Uuid::new_v4();
        let goal = GoalStore::new(&mut goals)
            .create(user, request("  Run 5k "), Utc::now())
            .unwrap();
        assert_eq!(goal.title, "Run 5k");
        assert!(!goal.is_completed);
        assert_eq!(goal.category, GoalCategory::Other);
        assert_eq!(goal.user_id, user);
        assert_eq!(goals.len(), 1);
    }

    #[test]
    fn test_create_rejects_overlong_title() {
        let mut goals = Vec::new();
        let err = GoalStore::new(&mut goals)
            .create(Uuid::nil(), request(&"x".repeat(201)), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let a = store.create(Uuid::nil(), request("a"), Utc::now()).unwrap();
        let b = store.create(Uuid::nil(), request("b"), Utc::now()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_is_partial() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let created = store
            .create(
                Uuid::nil(),
                CreateGoalRequest {
                    title: "Bench 100kg".into(),
                    description: Some("by summer".into()),
                    target_value: Some("100kg".into()),
                    category: Some(GoalCategory::Strength),
                },
                Utc::now(),
            )
            .unwrap();

        let updated = store
            .update(
                created.id,
                UpdateGoalRequest {
                    target_value: Some("110kg".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Bench 100kg");
        assert_eq!(updated.description.as_deref(), Some("by summer"));
        assert_eq!(updated.target_value.as_deref(), Some("110kg"));
        assert_eq!(updated.category, GoalCategory::Strength);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let created = store.create(Uuid::nil(), request("Swim"), Utc::now()).unwrap();
        let err = store
            .update(
                created.id,
                UpdateGoalRequest {
                    title: Some(" ".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(find_owned(&goals, Uuid::nil(), created.id).unwrap().title, "Swim");
    }

    #[test]
    fn test_find_owned_hides_other_users() {
        let mut goals = Vec::new();
        let owner = Uuid::new_v4();
        let goal = GoalStore::new(&mut goals)
            .create(owner, request("Climb"), Utc::now())
            .unwrap();
        assert_eq!(find_owned(&goals, owner, goal.id).unwrap().id, goal.id);
        assert!(matches!(
            find_owned(&goals, Uuid::new_v4(), goal.id),
            Err(DomainError::NotFound { entity: "Goal", .. })
        ));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut goals = Vec::new();
        let err = GoalStore::new(&mut goals)
            .update(Uuid::new_v4(), UpdateGoalRequest::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Goal", .. }));
    }

    #[test]
    fn test_toggle_flips_back_and_forth() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let goal = store.create(Uuid::nil(), request("Yoga"), Utc::now()).unwrap();
        assert!(store.toggle_complete(goal.id).unwrap().is_completed);
        assert!(!store.toggle_complete(goal.id).unwrap().is_completed);
        assert!(store.toggle_complete(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let goal = store.create(Uuid::nil(), request("Row"), Utc::now()).unwrap();
        assert!(store.delete(goal.id).unwrap());
        assert!(!store.delete(goal.id).unwrap());
        assert!(goals.is_empty());
    }

    #[test]
    fn test_list_most_recent_first_and_scoped() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let t0 = Utc::now();

        store.create(me, request("old"), t0 - Duration::days(2)).unwrap();
        store.create(other, request("theirs"), t0).unwrap();
        store.create(me, request("tie-first"), t0).unwrap();
        store.create(me, request("tie-second"), t0).unwrap();

        let titles: Vec<_> = list_for_user(&goals, me)
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["tie-second", "tie-first", "old"]);
    }

    #[test]
    fn test_progress_counts_completed() {
        let mut goals = Vec::new();
        let mut store = GoalStore::new(&mut goals);
        let me = Uuid::new_v4();
        let a = store.create(me, request("a"), Utc::now()).unwrap();
        store.create(me, request("b"), Utc::now()).unwrap();
        store.create(Uuid::new_v4(), request("c"), Utc::now()).unwrap();
        store.toggle_complete(a.id).unwrap();

        assert_eq!(
            progress(&goals, me),
            GoalProgress {
                completed: 1,
                total: 2
            }
        );
    }
}
