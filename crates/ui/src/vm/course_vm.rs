use lms_core::model::{CompletionKey, CourseNavigator, RenderKind, Sublesson};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SublessonLinkVm {
    pub lesson_index: usize,
    pub sublesson_index: usize,
    pub title: String,
    pub completed: bool,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub index: usize,
    pub title: String,
    pub completed: bool,
    pub sublessons: Vec<SublessonLinkVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Pdf,
}

impl MediaKind {
    #[must_use]
    pub fn unavailable_text(&self) -> &'static str {
        match self {
            Self::Video => "Video content unavailable",
            Self::Audio => "Audio content unavailable",
            Self::Pdf => "PDF content unavailable",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
    /// Set after submission for the chosen option only.
    pub verdict: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub question_index: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub is_first_question: bool,
    pub is_last_question: bool,
    pub can_submit: bool,
    pub submitted: bool,
    pub score: usize,
}

impl QuizVm {
    #[must_use]
    pub fn heading(&self) -> String {
        format!(
            "Question {} of {}: {}",
            self.question_index + 1,
            self.total,
            self.prompt
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBodyVm {
    Media { kind: MediaKind, url: String },
    Unavailable(MediaKind),
    Quiz(QuizVm),
    Unsupported(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentContentVm {
    pub title: String,
    pub ordinal: String,
    pub completed: bool,
    pub body: ContentBodyVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseVm {
    pub title: String,
    pub thumbnail: String,
    pub progress: u8,
    pub lessons: Vec<LessonVm>,
    pub current: Option<CurrentContentVm>,
    pub is_first: bool,
    pub is_last: bool,
}

#[must_use]
pub fn map_course(navigator: &CourseNavigator) -> CourseVm {
    let course = navigator.course();
    let cursor = navigator.cursor();
    let lessons = course
        .lessons()
        .iter()
        .enumerate()
        .map(|(lesson_index, lesson)| LessonVm {
            index: lesson_index,
            title: lesson.title().to_owned(),
            completed: navigator.is_lesson_completed(lesson_index),
            sublessons: lesson
                .sublessons()
                .iter()
                .enumerate()
                .map(|(sublesson_index, sublesson)| {
                    let key = CompletionKey::new(lesson_index, sublesson_index);
                    SublessonLinkVm {
                        lesson_index,
                        sublesson_index,
                        title: sublesson.title().to_owned(),
                        completed: navigator.is_completed(key),
                        selected: cursor == Some(key),
                    }
                })
                .collect(),
        })
        .collect();

    let current = cursor.and_then(|key| {
        let sublesson = navigator.current_sublesson()?;
        Some(CurrentContentVm {
            title: sublesson.title().to_owned(),
            ordinal: key.ordinal_label(),
            completed: navigator.is_completed(key),
            body: map_body(navigator, sublesson),
        })
    });

    CourseVm {
        title: course.title().to_owned(),
        thumbnail: course.thumbnail().to_owned(),
        progress: navigator.progress(),
        lessons,
        current,
        is_first: navigator.is_first(),
        is_last: navigator.is_last(),
    }
}

fn map_body(navigator: &CourseNavigator, sublesson: &Sublesson) -> ContentBodyVm {
    let media = |kind: MediaKind| match sublesson.content().filter(|content| content.has_url()) {
        Some(content) => ContentBodyVm::Media {
            kind,
            url: content.url().to_owned(),
        },
        None => ContentBodyVm::Unavailable(kind),
    };
    match sublesson.render_kind() {
        RenderKind::Quiz => ContentBodyVm::Quiz(map_quiz(navigator, sublesson)),
        RenderKind::Video => media(MediaKind::Video),
        RenderKind::Audio => media(MediaKind::Audio),
        RenderKind::Pdf => media(MediaKind::Pdf),
        RenderKind::Unsupported(raw) => ContentBodyVm::Unsupported(raw),
        RenderKind::Unknown => ContentBodyVm::Unsupported("unknown".to_owned()),
    }
}

fn map_quiz(navigator: &CourseNavigator, sublesson: &Sublesson) -> QuizVm {
    let quiz = sublesson.quiz();
    let attempt = navigator.quiz();
    let index = attempt.current_question();
    let question = quiz.question(index);
    let chosen = attempt.answer(index);
    let submitted = attempt.is_submitted();
    let options = question
        .map(|question| {
            question
                .options()
                .iter()
                .map(|option| {
                    let selected = chosen == Some(option.as_str());
                    OptionVm {
                        label: option.clone(),
                        selected,
                        verdict: (submitted && selected).then(|| question.is_correct(option)),
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    QuizVm {
        question_index: index,
        total: quiz.len(),
        prompt: question.map(|q| q.prompt().to_owned()).unwrap_or_default(),
        options,
        is_first_question: index == 0,
        is_last_question: quiz.is_last(index),
        can_submit: navigator.can_submit(),
        submitted,
        score: attempt.score(),
    }
}
