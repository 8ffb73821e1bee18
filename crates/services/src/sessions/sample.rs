use chrono::{DateTime, TimeZone};
use practice_core::model::{
    JudgeResult, Platform, Problem, ProblemId, Session, SessionPatch, SessionStatus,
    UnderstandingAnswers, UnderstandingLevel, Verdict,
};
use practice_core::time::start_of_local_day;

use super::service::SessionService;
use crate::error::SessionError;

const SAMPLE_ANSWERS: [(&str, &str); 3] = [
    (
        "q1",
        "Store each number with its index in a hash table and check whether target minus the current number is already there.",
    ),
    (
        "q2",
        "O(n) time and O(n) space: one pass over the array with constant-time lookups.",
    ),
    (
        "q3",
        "Duplicates are fine because the latest index wins; arrays shorter than two are ruled out by the constraints.",
    ),
];

fn sample_problem() -> Result<Problem, SessionError> {
    Ok(Problem::new(
        ProblemId::new("dev-test-problem-1"),
        "Two Sum",
        Platform::LeetCode,
        "medium",
        vec!["Array".into(), "Hash Table".into()],
        Some("https://leetcode.com/problems/two-sum/".into()),
    )?)
}

impl SessionService {
    /// Create a ready-made session due for review on `reference`'s day.
    ///
    /// The session has understanding answers, a `PARTIAL` level, a passing
    /// judge result and `review_at` at local midnight, so it shows up in
    /// today's reviews straight away.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the session cannot be stored.
    pub async fn create_sample_review<Tz: TimeZone>(
        &self,
        reference: &DateTime<Tz>,
    ) -> Result<Session, SessionError> {
        let review_at = start_of_local_day(reference);
        let session = self.create_session(sample_problem()?).await?;

        let answers: UnderstandingAnswers = SAMPLE_ANSWERS
            .iter()
            .map(|(key, answer)| ((*key).to_string(), (*answer).to_string()))
            .collect();
        let judge = JudgeResult::new(
            Verdict::Pass,
            4.0,
            vec!["All test cases passed".into()],
            self.clock().now(),
        );
        let patch = SessionPatch::new()
            .with_understanding(answers, UnderstandingLevel::Partial)
            .with_review_at(review_at)
            .with_status(SessionStatus::Scheduled)
            .with_judge(judge);

        self.update_session(session.id(), patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Clock;
    use chrono::{Duration, FixedOffset};
    use practice_core::time::fixed_now;
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn sample_review_is_due_today() {
        let service = SessionService::new(
            Clock::fixed(fixed_now()),
            Arc::new(InMemoryRepository::new()),
        );
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let reference = fixed_now().with_timezone(&seoul);

        let session = service.create_sample_review(&reference).await.unwrap();
        assert_eq!(session.problem().title(), "Two Sum");
        assert_eq!(session.status(), SessionStatus::Scheduled);
        assert_eq!(
            session.progress().understanding_level,
            Some(UnderstandingLevel::Partial)
        );
        assert_eq!(
            session.progress().understanding_answers.as_ref().map(|a| a.len()),
            Some(3)
        );
        assert_eq!(session.judge().map(|j| j.verdict), Some(Verdict::Pass));

        let due = service.due_reviews(&reference).await.unwrap();
        assert_eq!(due.len(), 1);
        assert!(
            service
                .due_reviews(&(reference + Duration::days(1)))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
