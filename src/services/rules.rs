//! Pure derivations over in-memory snapshots of the record collections:
//! progress, ratings, grades and the login-streak state machine. Nothing in
//! this module touches the store.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::core::time::calendar_days_between;
use crate::domain::models::{Assignment, Badge, Review, Submission};

pub(crate) const THREE_DAY_BADGE_ID: &str = "badge-1";
pub(crate) const SEVEN_DAY_BADGE_ID: &str = "badge-2";

/// The static badge catalog, paired with the login streak each entry
/// requires. Badges are copied by value into user records.
pub(crate) fn badge_catalog() -> Vec<(u32, Badge)> {
    vec![
        (
            3,
            Badge {
                id: THREE_DAY_BADGE_ID.to_string(),
                name: "Consistent Learner".to_string(),
                description: "Logged in for 3 consecutive days.".to_string(),
                icon: "\u{1F949}".to_string(),
            },
        ),
        (
            7,
            Badge {
                id: SEVEN_DAY_BADGE_ID.to_string(),
                name: "Dedicated Student".to_string(),
                description: "Logged in for 7 consecutive days.".to_string(),
                icon: "\u{1F3C6}".to_string(),
            },
        ),
    ]
}

/// Percentage of a course's assignments the student has submitted, rounded
/// to the nearest integer. A course with no assignments counts as complete.
pub(crate) fn compute_progress(assignments: &[Assignment], submissions: &[Submission]) -> u8 {
    if assignments.is_empty() {
        return 100;
    }

    let assignment_ids: HashSet<&str> =
        assignments.iter().map(|assignment| assignment.id.as_str()).collect();
    let submitted: HashSet<&str> = submissions
        .iter()
        .map(|submission| submission.assignment_id.as_str())
        .filter(|id| assignment_ids.contains(id))
        .collect();

    ((submitted.len() as f64 / assignments.len() as f64) * 100.0).round() as u8
}

/// Mean rating to one decimal place. `None` when no reviews exist; callers
/// must not conflate the empty set with a rating of zero.
pub(crate) fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// `round((internal + external) / 2)`. Range validation happens before the
/// call; this is arithmetic only.
pub(crate) fn final_grade(internal: u8, external: u8) -> u8 {
    ((f64::from(internal) + f64::from(external)) / 2.0).round() as u8
}

#[derive(Debug)]
pub(crate) struct StreakUpdate {
    pub(crate) login_streak: u32,
    pub(crate) newly_earned: Vec<Badge>,
}

/// Advances the login streak for a login happening at `now`, comparing
/// calendar days in UTC. Badges are additive: an entry is earned once the
/// streak reaches its threshold and is never revoked on reset.
pub(crate) fn advance_login_streak(
    last_login: Option<OffsetDateTime>,
    login_streak: u32,
    held_badges: &[Badge],
    now: OffsetDateTime,
) -> StreakUpdate {
    let login_streak = match last_login {
        None => 1,
        Some(last) => match calendar_days_between(last, now) {
            0 => login_streak,
            1 => login_streak + 1,
            days if days > 1 => 1,
            // Clock went backwards; leave the streak untouched.
            _ => login_streak,
        },
    };

    let newly_earned = badge_catalog()
        .into_iter()
        .filter(|(threshold, badge)| {
            login_streak >= *threshold && !held_badges.iter().any(|held| held.id == badge.id)
        })
        .map(|(_, badge)| badge)
        .collect();

    StreakUpdate { login_streak, newly_earned }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn assignment(id: &str) -> Assignment {
        Assignment {
            id: id.to_string(),
            course_id: "course-1".to_string(),
            title: format!("Assignment {id}"),
            description: String::new(),
            deadline: None,
        }
    }

    fn submission(assignment_id: &str) -> Submission {
        Submission {
            id: format!("sub-{assignment_id}"),
            assignment_id: assignment_id.to_string(),
            student_id: "student-1".to_string(),
            content: Some("answer".to_string()),
            file_name: None,
            grade: None,
            letter_grade: None,
            review: None,
        }
    }

    fn review(rating: u8) -> Review {
        Review {
            id: format!("rev-{rating}"),
            course_id: "course-1".to_string(),
            student_id: "student-1".to_string(),
            student_name: "Student".to_string(),
            rating,
            comment: String::new(),
            created_at: datetime!(2026-01-01 00:00 UTC),
        }
    }

    #[test]
    fn progress_is_complete_without_assignments() {
        assert_eq!(compute_progress(&[], &[]), 100);
    }

    #[test]
    fn progress_rounds_submitted_ratio() {
        let assignments = vec![assignment("a1"), assignment("a2"), assignment("a3")];
        assert_eq!(compute_progress(&assignments, &[]), 0);
        assert_eq!(compute_progress(&assignments, &[submission("a1")]), 33);
        assert_eq!(compute_progress(&assignments, &[submission("a1"), submission("a2")]), 67);
        assert_eq!(
            compute_progress(
                &assignments,
                &[submission("a1"), submission("a2"), submission("a3")]
            ),
            100
        );
    }

    #[test]
    fn progress_counts_distinct_assignments_and_ignores_foreign_submissions() {
        let assignments = vec![assignment("a1"), assignment("a2")];
        let submissions = vec![submission("a1"), submission("a1"), submission("other")];
        assert_eq!(compute_progress(&assignments, &submissions), 50);
    }

    #[test]
    fn average_rating_is_absent_without_reviews() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[review(5), review(4)]), Some(4.5));
        assert_eq!(average_rating(&[review(5), review(4), review(4)]), Some(4.3));
    }

    #[test]
    fn final_grade_rounds_mean_of_marks() {
        assert_eq!(final_grade(90, 94), 92);
        assert_eq!(final_grade(86, 90), 88);
        assert_eq!(final_grade(0, 0), 0);
        assert_eq!(final_grade(100, 100), 100);
        // half rounds up
        assert_eq!(final_grade(90, 93), 92);
    }

    #[test]
    fn first_login_starts_a_streak() {
        let update = advance_login_streak(None, 0, &[], datetime!(2026-03-10 09:00 UTC));
        assert_eq!(update.login_streak, 1);
        assert!(update.newly_earned.is_empty());
    }

    #[test]
    fn consecutive_day_increments_and_awards_badge() {
        let update = advance_login_streak(
            Some(datetime!(2026-03-09 22:00 UTC)),
            2,
            &[],
            datetime!(2026-03-10 07:00 UTC),
        );
        assert_eq!(update.login_streak, 3);
        assert_eq!(update.newly_earned.len(), 1);
        assert_eq!(update.newly_earned[0].id, THREE_DAY_BADGE_ID);
    }

    #[test]
    fn same_day_login_leaves_streak_unchanged() {
        let update = advance_login_streak(
            Some(datetime!(2026-03-10 01:00 UTC)),
            4,
            &[],
            datetime!(2026-03-10 23:59 UTC),
        );
        assert_eq!(update.login_streak, 4);
    }

    #[test]
    fn skipped_day_resets_streak_without_revoking_badges() {
        let held = badge_catalog().into_iter().map(|(_, badge)| badge).collect::<Vec<_>>();
        let update = advance_login_streak(
            Some(datetime!(2026-03-07 12:00 UTC)),
            7,
            &held,
            datetime!(2026-03-10 12:00 UTC),
        );
        assert_eq!(update.login_streak, 1);
        assert!(update.newly_earned.is_empty());
    }

    #[test]
    fn seven_day_streak_earns_the_second_badge() {
        let held = vec![badge_catalog().remove(0).1];
        let update = advance_login_streak(
            Some(datetime!(2026-03-09 12:00 UTC)),
            6,
            &held,
            datetime!(2026-03-10 12:00 UTC),
        );
        assert_eq!(update.login_streak, 7);
        assert_eq!(update.newly_earned.len(), 1);
        assert_eq!(update.newly_earned[0].id, SEVEN_DAY_BADGE_ID);
    }
}
