use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::course::Quiz;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no test questions available")]
    Empty,

    #[error("the quiz has already been submitted")]
    AlreadySubmitted,

    #[error("question {index} is out of range (quiz has {total})")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("{option:?} is not an option of question {index}")]
    UnknownOption { index: usize, option: String },

    #[error("answer every question before submitting ({answered}/{total} answered)")]
    Incomplete { answered: usize, total: usize },
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Answering,
    Submitted,
}

/// One graded question, in the shape sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question: String,
    pub selected: String,
    pub correct: String,
}

impl GradedAnswer {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected == self.correct
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizGrade {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<GradedAnswer>,
}

impl QuizGrade {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

/// Transient answering state for the quiz of the selected sublesson.
///
/// Every transition returns a new value; the previous snapshot is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizAttempt {
    answers: BTreeMap<usize, String>,
    phase: QuizPhase,
    score: usize,
    current_question: usize,
}

impl QuizAttempt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == QuizPhase::Submitted
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Records an answer and moves to the next question unless `index` is the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` after submission, `QuestionOutOfRange`
    /// for a bad index and `UnknownOption` when the option is not offered.
    pub fn select_answer(
        &self,
        quiz: &Quiz,
        index: usize,
        option: impl Into<String>,
    ) -> Result<Self, QuizError> {
        if self.is_submitted() {
            return Err(QuizError::AlreadySubmitted);
        }
        let question = quiz.question(index).ok_or(QuizError::QuestionOutOfRange {
            index,
            total: quiz.len(),
        })?;
        let option = option.into();
        if !question.options().iter().any(|candidate| *candidate == option) {
            return Err(QuizError::UnknownOption { index, option });
        }

        let mut next = self.clone();
        next.answers.insert(index, option);
        if !quiz.is_last(index) {
            next.current_question = (self.current_question + 1).min(quiz.len() - 1);
        }
        Ok(next)
    }

    #[must_use]
    pub fn next_question(&self, quiz: &Quiz) -> Self {
        let mut next = self.clone();
        if !quiz.is_last(self.current_question) {
            next.current_question += 1;
        }
        next
    }

    #[must_use]
    pub fn previous_question(&self) -> Self {
        let mut next = self.clone();
        next.current_question = self.current_question.saturating_sub(1);
        next
    }

    /// True when every question in `[0, total)` has an answer.
    #[must_use]
    pub fn can_submit(&self, quiz: &Quiz) -> bool {
        !self.is_submitted()
            && !quiz.is_empty()
            && (0..quiz.len()).all(|index| self.answers.contains_key(&index))
    }

    /// Grades the attempt by exact match and moves to `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for a quiz without questions, `AlreadySubmitted`
    /// when called twice and `Incomplete` while any question is unanswered.
    pub fn submit(&self, quiz: &Quiz) -> Result<(Self, QuizGrade), QuizError> {
        if quiz.is_empty() {
            return Err(QuizError::Empty);
        }
        if self.is_submitted() {
            return Err(QuizError::AlreadySubmitted);
        }
        if !self.can_submit(quiz) {
            let answered = (0..quiz.len())
                .filter(|index| self.answers.contains_key(index))
                .count();
            return Err(QuizError::Incomplete {
                answered,
                total: quiz.len(),
            });
        }

        let answers: Vec<GradedAnswer> = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| GradedAnswer {
                question: question.prompt().to_owned(),
                selected: self.answers.get(&index).cloned().unwrap_or_default(),
                correct: question.answer().to_owned(),
            })
            .collect();
        let score = answers.iter().filter(|answer| answer.is_correct()).count();

        let mut next = self.clone();
        next.phase = QuizPhase::Submitted;
        next.score = score;
        Ok((
            next,
            QuizGrade {
                score,
                total: quiz.len(),
                answers,
            },
        ))
    }

    /// Back to `Answering` with no answers, first question, zero score.
    #[must_use]
    pub fn retry(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::course::Question;

    fn quiz(n: usize) -> Quiz {
        Quiz::new(
            (0..n)
                .map(|i| {
                    Question::new(
                        format!("Q{i}"),
                        vec!["right".into(), "wrong".into()],
                        "right",
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn answering_auto_advances_except_on_last() {
        let quiz = quiz(3);
        let attempt = QuizAttempt::new();
        let attempt = attempt.select_answer(&quiz, 0, "right").unwrap();
        assert_eq!(attempt.current_question(), 1);
        let attempt = attempt.select_answer(&quiz, 1, "wrong").unwrap();
        assert_eq!(attempt.current_question(), 2);
        let attempt = attempt.select_answer(&quiz, 2, "right").unwrap();
        assert_eq!(attempt.current_question(), 2);
        assert!(attempt.can_submit(&quiz));
    }

    #[test]
    fn question_cursor_is_bounded() {
        let quiz = quiz(2);
        let attempt = QuizAttempt::new().previous_question();
        assert_eq!(attempt.current_question(), 0);
        let attempt = attempt.next_question(&quiz).next_question(&quiz);
        assert_eq!(attempt.current_question(), 1);
    }

    #[test]
    fn partial_answers_cannot_submit() {
        let quiz = quiz(3);
        let attempt = QuizAttempt::new()
            .select_answer(&quiz, 0, "right")
            .unwrap()
            .select_answer(&quiz, 2, "right")
            .unwrap();
        assert!(!attempt.can_submit(&quiz));
        assert_eq!(
            attempt.submit(&quiz).unwrap_err(),
            QuizError::Incomplete {
                answered: 2,
                total: 3
            }
        );
    }

    #[test]
    fn submit_scores_exact_matches() {
        let quiz = quiz(3);
        let attempt = QuizAttempt::new()
            .select_answer(&quiz, 0, "right")
            .unwrap()
            .select_answer(&quiz, 1, "wrong")
            .unwrap()
            .select_answer(&quiz, 2, "right")
            .unwrap();
        let (submitted, grade) = attempt.submit(&quiz).unwrap();
        assert!(submitted.is_submitted());
        assert_eq!(submitted.score(), 2);
        assert_eq!(grade.score, 2);
        assert!(!grade.is_perfect());
        assert_eq!(grade.answers[1].selected, "wrong");
        assert_eq!(grade.answers[1].correct, "right");
    }

    #[test]
    fn submitted_attempt_is_frozen_until_retry() {
        let quiz = quiz(1);
        let attempt = QuizAttempt::new().select_answer(&quiz, 0, "right").unwrap();
        let (submitted, grade) = attempt.submit(&quiz).unwrap();
        assert!(grade.is_perfect());
        assert_eq!(
            submitted.select_answer(&quiz, 0, "wrong").unwrap_err(),
            QuizError::AlreadySubmitted
        );
        assert_eq!(submitted.submit(&quiz).unwrap_err(), QuizError::AlreadySubmitted);

        let retried = submitted.retry();
        assert_eq!(retried.phase(), QuizPhase::Answering);
        assert_eq!(retried.answered_count(), 0);
        assert_eq!(retried.score(), 0);
        assert_eq!(retried.current_question(), 0);
    }

    #[test]
    fn empty_quiz_cannot_be_submitted() {
        let quiz = quiz(0);
        assert_eq!(QuizAttempt::new().submit(&quiz).unwrap_err(), QuizError::Empty);
    }

    #[test]
    fn unknown_options_are_rejected() {
        let quiz = quiz(1);
        let err = QuizAttempt::new().select_answer(&quiz, 0, "maybe").unwrap_err();
        assert!(matches!(err, QuizError::UnknownOption { index: 0, .. }));
        let err = QuizAttempt::new().select_answer(&quiz, 4, "right").unwrap_err();
        assert!(matches!(err, QuizError::QuestionOutOfRange { index: 4, total: 1 }));
    }
}
