use std::sync::Arc;

use log::{debug, info, warn};

use lms_core::Clock;
use lms_core::model::{
    CompletionKey, CompletionSet, CourseId, CourseNavigator, Effect, QuizError, QuizGrade,
    QuizOutcome, QuizResultRecord, QuizSubmission, Session, Transition,
};
use storage::repository::QuizResultRepository;

use crate::api::LmsApi;
use crate::error::{ApiError, LoadError};
use crate::wire::{
    ProgressUpdateRequest, SubmitAnswersRequest, completion_set_from_progress, normalize_course,
};

/// Loads a course into a navigator and carries out the side effects of its transitions.
///
/// Effects are best-effort: failures are logged and never roll back the
/// navigator state the user already sees.
#[derive(Clone)]
pub struct CourseViewerService {
    api: Arc<dyn LmsApi>,
    quiz_results: Arc<dyn QuizResultRepository>,
    clock: Clock,
    session: Option<Session>,
}

impl CourseViewerService {
    #[must_use]
    pub fn new(
        api: Arc<dyn LmsApi>,
        quiz_results: Arc<dyn QuizResultRepository>,
        clock: Clock,
        session: Option<Session>,
    ) -> Self {
        Self {
            api,
            quiz_results,
            clock,
            session,
        }
    }

    /// Fetches the course and the user's progress, positioned on the first sublesson.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` for a missing id or login, an unknown course, a course
    /// without any sublesson, or a failed course request. A failed progress
    /// request is logged and treated as no progress.
    pub async fn open(&self, course_id: Option<&str>) -> Result<CourseNavigator, LoadError> {
        let course_id = course_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(CourseId::new)
            .ok_or(LoadError::MissingCourseId)?;
        if !self.session.as_ref().is_some_and(Session::is_authenticated) {
            return Err(LoadError::CourseLoginRequired);
        }

        let dto = match self.api.get_course(&course_id).await {
            Ok(Some(dto)) => dto,
            Ok(None) | Err(ApiError::NotFound) => return Err(LoadError::CourseNotFound),
            Err(err) => return Err(err.into()),
        };
        let course = normalize_course(dto, &course_id);
        let navigator = CourseNavigator::new(Arc::new(course));
        if navigator.cursor().is_none() {
            return Err(LoadError::NoContent);
        }

        let completed = self.load_progress(&course_id).await;
        info!(
            "opened course {course_id} with {} of {} sublessons completed",
            completed.len(),
            navigator.course().total_sublessons()
        );
        Ok(navigator.with_completed(&completed))
    }

    /// Server-side completion snapshot; empty when unavailable.
    pub async fn load_progress(&self, course_id: &CourseId) -> CompletionSet {
        let Some(session) = self.session.as_ref() else {
            return CompletionSet::new();
        };
        match self
            .api
            .get_course_progress(session.user_id(), course_id)
            .await
        {
            Ok(progress) => completion_set_from_progress(&progress),
            Err(err) => {
                warn!("failed to load progress for course {course_id}: {err}");
                CompletionSet::new()
            }
        }
    }

    /// Marks the current sublesson completed and persists it.
    pub async fn mark_completed(&self, navigator: &CourseNavigator) -> CourseNavigator {
        self.apply(navigator.mark_completed()).await
    }

    /// Grades the quiz, then submits answers, caches the result and, on a
    /// perfect score, persists completion.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the quiz cannot be submitted; nothing is sent then.
    pub async fn submit_quiz(
        &self,
        navigator: &CourseNavigator,
    ) -> Result<(CourseNavigator, QuizGrade), QuizError> {
        let (transition, grade) = navigator.submit()?;
        Ok((self.apply(transition).await, grade))
    }

    /// Runs the transition's effects and returns its state.
    pub async fn apply(&self, transition: Transition) -> CourseNavigator {
        let Transition { state, effects } = transition;
        self.run_effects(state.course().id(), &effects).await;
        state
    }

    /// Runs effects in order; each failure is logged and the rest still run.
    pub async fn run_effects(&self, course_id: &CourseId, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::PersistCompletion(key) => self.persist_completion(course_id, *key).await,
                Effect::SubmitQuizAnswers(submission) => self.submit_answers(submission).await,
                Effect::CacheQuizResult(outcome) => self.cache_result(outcome).await,
            }
        }
    }

    async fn persist_completion(&self, course_id: &CourseId, key: CompletionKey) {
        let Some(session) = self.session.as_ref() else {
            warn!("not logged in; completion {key} of course {course_id} kept locally");
            return;
        };
        let update = ProgressUpdateRequest::from(key);
        match self
            .api
            .record_course_progress(session.user_id(), course_id, &update)
            .await
        {
            Ok(()) => debug!("recorded completion {key} of course {course_id}"),
            Err(err) => warn!("failed to record completion {key} of course {course_id}: {err}"),
        }
    }

    async fn submit_answers(&self, submission: &QuizSubmission) {
        let request = SubmitAnswersRequest {
            answers: submission.answers.clone(),
            sublesson_title: submission.sublesson_title.clone(),
        };
        if let Err(err) = self
            .api
            .submit_answers(&submission.course_id, submission.sublesson_index, &request)
            .await
        {
            warn!(
                "failed to submit answers for {:?} of course {}: {err}",
                submission.sublesson_title, submission.course_id
            );
        }
    }

    async fn cache_result(&self, outcome: &QuizOutcome) {
        let record = QuizResultRecord::from_outcome(outcome, self.clock.now());
        if let Err(err) = self.quiz_results.append_result(&record).await {
            warn!("failed to cache quiz result for {:?}: {err}", outcome.sublesson_title);
        }
    }
}
