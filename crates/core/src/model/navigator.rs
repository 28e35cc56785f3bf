use std::sync::Arc;

use crate::model::completion::{CompletionKey, CompletionSet, Cursor, progress_percent};
use crate::model::course::{Course, RenderKind, Sublesson};
use crate::model::ids::CourseId;
use crate::model::quiz::{GradedAnswer, QuizAttempt, QuizError, QuizGrade};

//
// ─── EFFECTS ───────────────────────────────────────────────────────────────────
//

/// Per-question results of a submitted quiz, addressed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub course_id: CourseId,
    pub sublesson_index: usize,
    pub sublesson_title: String,
    pub answers: Vec<GradedAnswer>,
}

/// Summary of a submitted quiz for the local results cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub course_id: CourseId,
    pub course_title: String,
    pub sublesson_title: String,
    pub marks: usize,
    pub total_marks: usize,
}

/// Best-effort side effects requested by a transition.
///
/// The caller executes them; a failure never rolls back the new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistCompletion(CompletionKey),
    SubmitQuizAnswers(QuizSubmission),
    CacheQuizResult(QuizOutcome),
}

/// New navigator snapshot plus the effects the transition asked for.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: CourseNavigator,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: CourseNavigator) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

//
// ─── NAVIGATOR ─────────────────────────────────────────────────────────────────
//

/// Position, completion and quiz state of one course viewer.
///
/// Cheap to clone: the course tree is shared.
#[derive(Debug, Clone)]
pub struct CourseNavigator {
    course: Arc<Course>,
    cursor: Option<Cursor>,
    completed: CompletionSet,
    quiz: QuizAttempt,
}

impl PartialEq for CourseNavigator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.course, &other.course)
            && self.cursor == other.cursor
            && self.completed == other.completed
            && self.quiz == other.quiz
    }
}

impl CourseNavigator {
    /// Opens the course at its first sublesson, when lesson 0 has one.
    #[must_use]
    pub fn new(course: Arc<Course>) -> Self {
        let start = CompletionKey::new(0, 0);
        let cursor = course.contains(start).then_some(start);
        Self {
            course,
            cursor,
            completed: CompletionSet::new(),
            quiz: QuizAttempt::new(),
        }
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    #[must_use]
    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizAttempt {
        &self.quiz
    }

    #[must_use]
    pub fn current_sublesson(&self) -> Option<&Sublesson> {
        self.cursor.and_then(|cursor| self.course.sublesson(cursor))
    }

    #[must_use]
    pub fn render_kind(&self) -> Option<RenderKind> {
        self.current_sublesson().map(Sublesson::render_kind)
    }

    #[must_use]
    pub fn is_completed(&self, key: CompletionKey) -> bool {
        self.completed.contains(key)
    }

    /// Every sublesson of the lesson is complete. Empty lessons count as complete.
    #[must_use]
    pub fn is_lesson_completed(&self, lesson_index: usize) -> bool {
        self.course.lesson(lesson_index).is_some_and(|lesson| {
            (0..lesson.sublessons().len())
                .all(|s| self.completed.contains(CompletionKey::new(lesson_index, s)))
        })
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        progress_percent(self.completed.len(), self.course.total_sublessons())
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.cursor.is_none() || self.previous_position().is_none()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor.is_none() || self.next_position().is_none()
    }

    /// Merges a server progress snapshot into the local set.
    #[must_use]
    pub fn with_completed(&self, snapshot: &CompletionSet) -> Self {
        let mut next = self.clone();
        next.completed = self.completed.merged(snapshot);
        next
    }

    /// Moves the cursor and resets the quiz attempt.
    ///
    /// Positions outside the loaded tree leave the snapshot unchanged.
    #[must_use]
    pub fn select_content(&self, lesson_index: usize, sublesson_index: usize) -> Self {
        let target = CompletionKey::new(lesson_index, sublesson_index);
        if !self.course.contains(target) {
            return self.clone();
        }
        let mut next = self.clone();
        next.cursor = Some(target);
        next.quiz = QuizAttempt::new();
        next
    }

    #[must_use]
    pub fn advance(&self) -> Self {
        match self.next_position() {
            Some(key) => self.select_content(key.lesson_index, key.sublesson_index),
            None => self.clone(),
        }
    }

    #[must_use]
    pub fn retreat(&self) -> Self {
        match self.previous_position() {
            Some(key) => self.select_content(key.lesson_index, key.sublesson_index),
            None => self.clone(),
        }
    }

    fn next_position(&self) -> Option<CompletionKey> {
        let cursor = self.cursor?;
        let lesson = self.course.lesson(cursor.lesson_index)?;
        if cursor.sublesson_index + 1 < lesson.sublessons().len() {
            return Some(CompletionKey::new(
                cursor.lesson_index,
                cursor.sublesson_index + 1,
            ));
        }
        self.course
            .lessons()
            .iter()
            .enumerate()
            .skip(cursor.lesson_index + 1)
            .find(|(_, lesson)| !lesson.sublessons().is_empty())
            .map(|(index, _)| CompletionKey::new(index, 0))
    }

    fn previous_position(&self) -> Option<CompletionKey> {
        let cursor = self.cursor?;
        if cursor.sublesson_index > 0 {
            return Some(CompletionKey::new(
                cursor.lesson_index,
                cursor.sublesson_index - 1,
            ));
        }
        self.course
            .lessons()
            .iter()
            .enumerate()
            .take(cursor.lesson_index)
            .rev()
            .find(|(_, lesson)| !lesson.sublessons().is_empty())
            .map(|(index, lesson)| CompletionKey::new(index, lesson.sublessons().len() - 1))
    }

    /// Marks the current sublesson complete locally and asks for a durable write.
    #[must_use]
    pub fn mark_completed(&self) -> Transition {
        let Some(cursor) = self.cursor else {
            return Transition::quiet(self.clone());
        };
        let mut next = self.clone();
        next.completed.insert(cursor);
        Transition {
            state: next,
            effects: vec![Effect::PersistCompletion(cursor)],
        }
    }

    /// # Errors
    ///
    /// Returns `QuizError` when no quiz is selected or the attempt rejects the answer.
    pub fn select_answer(
        &self,
        question_index: usize,
        option: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let sublesson = self.current_sublesson().ok_or(QuizError::Empty)?;
        let quiz = self.quiz.select_answer(sublesson.quiz(), question_index, option)?;
        let mut next = self.clone();
        next.quiz = quiz;
        Ok(next)
    }

    #[must_use]
    pub fn next_question(&self) -> Self {
        let Some(sublesson) = self.current_sublesson() else {
            return self.clone();
        };
        let mut next = self.clone();
        next.quiz = self.quiz.next_question(sublesson.quiz());
        next
    }

    #[must_use]
    pub fn previous_question(&self) -> Self {
        let mut next = self.clone();
        next.quiz = self.quiz.previous_question();
        next
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.current_sublesson()
            .is_some_and(|sublesson| self.quiz.can_submit(sublesson.quiz()))
    }

    /// Grades the current quiz.
    ///
    /// Always requests the answer submission and the local result cache write;
    /// a perfect score also completes the sublesson.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when there is no quiz, it is incomplete or already submitted.
    pub fn submit(&self) -> Result<(Transition, QuizGrade), QuizError> {
        let cursor = self.cursor.ok_or(QuizError::Empty)?;
        let sublesson = self.current_sublesson().ok_or(QuizError::Empty)?;
        let (quiz, grade) = self.quiz.submit(sublesson.quiz())?;

        let mut effects = vec![
            Effect::SubmitQuizAnswers(QuizSubmission {
                course_id: self.course.id().clone(),
                sublesson_index: cursor.sublesson_index,
                sublesson_title: sublesson.title().to_owned(),
                answers: grade.answers.clone(),
            }),
            Effect::CacheQuizResult(QuizOutcome {
                course_id: self.course.id().clone(),
                course_title: self.course.title().to_owned(),
                sublesson_title: sublesson.title().to_owned(),
                marks: grade.score,
                total_marks: grade.total,
            }),
        ];

        let mut submitted = self.clone();
        submitted.quiz = quiz;
        let state = if grade.is_perfect() {
            let completion = submitted.mark_completed();
            effects.extend(completion.effects);
            completion.state
        } else {
            submitted
        };

        Ok((Transition { state, effects }, grade))
    }

    #[must_use]
    pub fn retry(&self) -> Self {
        let mut next = self.clone();
        next.quiz = self.quiz.retry();
        next
    }
}
