use crate::model::completion::CompletionKey;
use crate::model::ids::CourseId;

pub const DEFAULT_COURSE_TITLE: &str = "Untitled Course";
pub const DEFAULT_LESSON_TITLE: &str = "Untitled Lesson";
pub const DEFAULT_SUBLESSON_TITLE: &str = "Untitled Sublesson";

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// Media kind of a sublesson's content, derived from the declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Video,
    Audio,
    Pdf,
    /// Any other declared type, kept verbatim for the "unsupported" message.
    Unsupported(String),
}

impl ContentKind {
    /// Classifies a declared type by substring: pdf, then video, then audio.
    #[must_use]
    pub fn from_declared_type(raw: &str) -> Self {
        if raw.contains("pdf") {
            Self::Pdf
        } else if raw.contains("video") {
            Self::Video
        } else if raw.contains("audio") {
            Self::Audio
        } else {
            Self::Unsupported(raw.to_owned())
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Unsupported(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    url: String,
    kind: ContentKind,
}

impl Content {
    #[must_use]
    pub fn new(url: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn kind(&self) -> &ContentKind {
        &self.kind
    }

    /// Media without a URL renders as "content unavailable".
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: Vec<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The designated correct option.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Exact-match comparison against the correct option.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.questions.len()
    }
}

//
// ─── TREE ──────────────────────────────────────────────────────────────────────
//

/// How the viewer should present a sublesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderKind {
    Quiz,
    Video,
    Audio,
    Pdf,
    Unsupported(String),
    /// Neither content nor quiz questions.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sublesson {
    title: String,
    content: Option<Content>,
    quiz: Quiz,
}

impl Sublesson {
    #[must_use]
    pub fn new(title: impl Into<String>, content: Option<Content>, quiz: Quiz) -> Self {
        Self {
            title: title.into(),
            content,
            quiz,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.quiz.is_empty()
    }

    /// `Quiz` if there is at least one question, else the content kind, else `Unknown`.
    #[must_use]
    pub fn render_kind(&self) -> RenderKind {
        if self.has_quiz() {
            return RenderKind::Quiz;
        }
        match self.content.as_ref().map(Content::kind) {
            Some(ContentKind::Video) => RenderKind::Video,
            Some(ContentKind::Audio) => RenderKind::Audio,
            Some(ContentKind::Pdf) => RenderKind::Pdf,
            Some(ContentKind::Unsupported(raw)) => RenderKind::Unsupported(raw.clone()),
            None => RenderKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    title: String,
    sublessons: Vec<Sublesson>,
}

impl Lesson {
    #[must_use]
    pub fn new(title: impl Into<String>, sublessons: Vec<Sublesson>) -> Self {
        Self {
            title: title.into(),
            sublessons,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn sublessons(&self) -> &[Sublesson] {
        &self.sublessons
    }
}

/// A course tree loaded once per screen and treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    thumbnail: String,
    description: String,
    lessons: Vec<Lesson>,
}

impl Course {
    #[must_use]
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
        description: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            thumbnail: thumbnail.into(),
            description: description.into(),
            lessons,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    #[must_use]
    pub fn sublesson(&self, key: CompletionKey) -> Option<&Sublesson> {
        self.lessons
            .get(key.lesson_index)
            .and_then(|lesson| lesson.sublessons.get(key.sublesson_index))
    }

    #[must_use]
    pub fn contains(&self, key: CompletionKey) -> bool {
        self.sublesson(key).is_some()
    }

    /// Total number of sublessons across every lesson.
    #[must_use]
    pub fn total_sublessons(&self) -> usize {
        self.lessons.iter().map(|lesson| lesson.sublessons.len()).sum()
    }

    /// Every sublesson position in document order.
    pub fn positions(&self) -> impl Iterator<Item = CompletionKey> + '_ {
        self.lessons.iter().enumerate().flat_map(|(lesson_index, lesson)| {
            (0..lesson.sublessons.len()).map(move |sublesson_index| {
                CompletionKey::new(lesson_index, sublesson_index)
            })
        })
    }

    #[must_use]
    pub fn first_position(&self) -> Option<CompletionKey> {
        self.positions().next()
    }

    #[must_use]
    pub fn last_position(&self) -> Option<CompletionKey> {
        self.positions().last()
    }
}
