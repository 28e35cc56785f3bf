use dioxus::prelude::*;
use log::{debug, warn};

use lms_core::model::{CourseNavigator, Transition};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ContentBodyVm, CourseVm, CurrentContentVm, LessonVm, MediaKind, QuizVm, map_course,
};

fn step(
    mut navigator: Signal<Option<CourseNavigator>>,
    update: impl FnOnce(&CourseNavigator) -> CourseNavigator,
) {
    let next = navigator.read().as_ref().map(update);
    if next.is_some() {
        navigator.set(next);
    }
}

#[component]
pub fn CourseContentView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.course_viewer();
    let mut navigator = use_signal(|| None::<CourseNavigator>);

    let mut resource = {
        let service = service.clone();
        use_resource(move || {
            let service = service.clone();
            let course_id = course_id.clone();
            async move {
                let opened = service.open(Some(course_id.as_str())).await?;
                navigator.set(Some(opened));
                Ok::<_, ViewError>(())
            }
        })
    };

    // State moves first; the backend writes follow in the background.
    let apply = use_callback(move |transition: Transition| {
        let Transition { state, effects } = transition;
        let course_id = state.course().id().clone();
        navigator.set(Some(state));
        if effects.is_empty() {
            return;
        }
        let service = service.clone();
        spawn(async move {
            service.run_effects(&course_id, &effects).await;
        });
    });

    let on_complete = use_callback(move |()| {
        let transition = navigator.read().as_ref().map(CourseNavigator::mark_completed);
        if let Some(transition) = transition {
            apply.call(transition);
        }
    });

    let on_submit = use_callback(move |()| {
        let submitted = navigator.read().as_ref().map(CourseNavigator::submit);
        match submitted {
            Some(Ok((transition, grade))) => {
                debug!("quiz graded {}/{}", grade.score, grade.total);
                apply.call(transition);
            }
            Some(Err(err)) => warn!("quiz not submitted: {err}"),
            None => {}
        }
    });

    let on_answer = use_callback(move |(question, option): (usize, String)| {
        let answered = navigator
            .read()
            .as_ref()
            .map(|nav| nav.select_answer(question, option));
        match answered {
            Some(Ok(next)) => navigator.set(Some(next)),
            Some(Err(err)) => debug!("answer ignored: {err}"),
            None => {}
        }
    });

    let state = view_state_from_resource(&resource);
    let course = navigator.read().as_ref().map(map_course);

    rsx! {
        div { class: "page course-content",
            match (state, course) {
                (ViewState::Error(err), _) => rsx! {
                    div { class: "load-error",
                        p { class: "error", "Error: {err.message()}" }
                        button {
                            r#type: "button",
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    }
                },
                (ViewState::Ready(()), Some(course)) => rsx! {
                    CourseLayout {
                        course,
                        navigator,
                        on_complete,
                        on_submit,
                        on_answer,
                    }
                },
                (ViewState::Ready(()), None) => rsx! {
                    p { "No course data available" }
                },
                (ViewState::Idle | ViewState::Loading, _) => rsx! {
                    p { "Loading course content..." }
                },
            }
        }
    }
}

#[component]
fn CourseLayout(
    course: CourseVm,
    navigator: Signal<Option<CourseNavigator>>,
    on_complete: Callback<()>,
    on_submit: Callback<()>,
    on_answer: Callback<(usize, String)>,
) -> Element {
    let heading = course
        .current
        .as_ref()
        .map_or_else(|| course.title.clone(), |current| current.title.clone());
    let ordinal = course.current.as_ref().map(|current| current.ordinal.clone());

    rsx! {
        aside { class: "course-sidebar",
            if !course.thumbnail.is_empty() {
                img { class: "course-thumbnail", src: "{course.thumbnail}", alt: "{course.title}" }
            }
            h2 { "{course.title}" }
            div { class: "course-progress",
                p { "{course.progress}% Completed" }
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {course.progress}%" }
                }
            }
            h3 { "Contents" }
            for lesson in course.lessons {
                LessonEntry { key: "{lesson.index}", lesson, navigator }
            }
        }

        section { class: "course-main",
            header { class: "course-main-header",
                h2 {
                    "{heading}"
                    if let Some(ordinal) = ordinal {
                        span { class: "muted", " {ordinal}" }
                    }
                }
                div { class: "course-nav",
                    button {
                        r#type: "button",
                        disabled: course.is_first,
                        onclick: move |_| step(navigator, CourseNavigator::retreat),
                        "‹ Previous"
                    }
                    button {
                        r#type: "button",
                        disabled: course.is_last,
                        onclick: move |_| step(navigator, CourseNavigator::advance),
                        "Next ›"
                    }
                }
            }
            div { class: "course-body",
                match course.current {
                    Some(current) => rsx! {
                        ContentBody {
                            current,
                            thumbnail: course.thumbnail.clone(),
                            navigator,
                            on_complete,
                            on_submit,
                            on_answer,
                        }
                    },
                    None => rsx! {
                        p { class: "placeholder", "Select a lesson to begin" }
                    },
                }
            }
        }
    }
}

#[component]
fn LessonEntry(lesson: LessonVm, navigator: Signal<Option<CourseNavigator>>) -> Element {
    let lesson_class = if lesson.completed {
        "lesson lesson-completed"
    } else {
        "lesson"
    };

    rsx! {
        div { class: lesson_class,
            h4 { "{lesson.title}" }
            ul {
                for link in lesson.sublessons {
                    li { key: "{link.sublesson_index}",
                        button {
                            r#type: "button",
                            class: match (link.selected, link.completed) {
                                (true, _) => "sublesson selected",
                                (false, true) => "sublesson completed",
                                (false, false) => "sublesson",
                            },
                            onclick: move |_| {
                                step(navigator, |nav| {
                                    nav.select_content(link.lesson_index, link.sublesson_index)
                                });
                            },
                            if link.completed { "✓ " }
                            "{link.title}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ContentBody(
    current: CurrentContentVm,
    thumbnail: String,
    navigator: Signal<Option<CourseNavigator>>,
    on_complete: Callback<()>,
    on_submit: Callback<()>,
    on_answer: Callback<(usize, String)>,
) -> Element {
    match current.body {
        ContentBodyVm::Quiz(quiz) => rsx! {
            QuizPanel { title: current.title, quiz, navigator, on_submit, on_answer }
        },
        ContentBodyVm::Unavailable(kind) => rsx! {
            p { class: "placeholder", "{kind.unavailable_text()}" }
        },
        ContentBodyVm::Unsupported(kind) => rsx! {
            p { class: "placeholder", "Unsupported content type: {kind}" }
        },
        ContentBodyVm::Media { kind: MediaKind::Video, url } => rsx! {
            video {
                class: "media-video",
                controls: true,
                onended: move |_| on_complete.call(()),
                source { src: "{url}", r#type: "video/mp4" }
                "Your browser doesn't support videos"
            }
        },
        ContentBodyVm::Media { kind: MediaKind::Audio, url } => rsx! {
            div { class: "media-audio",
                if !thumbnail.is_empty() {
                    img { src: "{thumbnail}", alt: "{current.title}" }
                }
                audio {
                    controls: true,
                    onended: move |_| on_complete.call(()),
                    source { src: "{url}", r#type: "audio/mpeg" }
                    "Your browser doesn't support audio"
                }
            }
        },
        ContentBodyVm::Media { kind: MediaKind::Pdf, url } => rsx! {
            div { class: "media-pdf",
                div { class: "pdf-toolbar",
                    button {
                        r#type: "button",
                        class: "primary",
                        disabled: current.completed,
                        onclick: move |_| on_complete.call(()),
                        if current.completed { "Completed" } else { "Mark as Complete" }
                    }
                }
                iframe { src: "{url}#toolbar=0", title: "PDF Viewer" }
            }
        },
    }
}

#[component]
fn QuizPanel(
    title: String,
    quiz: QuizVm,
    navigator: Signal<Option<CourseNavigator>>,
    on_submit: Callback<()>,
    on_answer: Callback<(usize, String)>,
) -> Element {
    if quiz.total == 0 {
        return rsx! {
            p { class: "placeholder", "No test questions available" }
        };
    }
    let question_index = quiz.question_index;

    rsx! {
        div { class: "quiz",
            h2 { "{title}" }
            div { class: "quiz-question",
                h3 { "{quiz.heading()}" }
                ul {
                    for (option_index, option) in quiz.options.iter().cloned().enumerate() {
                        li { key: "{option_index}",
                            input {
                                id: "q{question_index}-opt{option_index}",
                                r#type: "radio",
                                name: "question-{question_index}",
                                checked: option.selected,
                                disabled: quiz.submitted,
                                onchange: {
                                    let label = option.label.clone();
                                    move |_| on_answer.call((question_index, label.clone()))
                                },
                            }
                            label {
                                r#for: "q{question_index}-opt{option_index}",
                                class: match option.verdict {
                                    Some(true) => "option correct",
                                    Some(false) => "option incorrect",
                                    None => "option",
                                },
                                "{option.label}"
                            }
                            match option.verdict {
                                Some(true) => rsx! { span { class: "verdict correct", "✓ Correct" } },
                                Some(false) => rsx! { span { class: "verdict incorrect", "✗ Incorrect" } },
                                None => rsx! {},
                            }
                        }
                    }
                }
            }
            div { class: "quiz-actions",
                if !quiz.is_first_question && !quiz.submitted {
                    button {
                        r#type: "button",
                        onclick: move |_| step(navigator, CourseNavigator::previous_question),
                        "Previous"
                    }
                }
                if !quiz.is_last_question && !quiz.submitted {
                    button {
                        r#type: "button",
                        onclick: move |_| step(navigator, CourseNavigator::next_question),
                        "Next"
                    }
                }
                if quiz.is_last_question && !quiz.submitted {
                    button {
                        r#type: "button",
                        class: "primary",
                        disabled: !quiz.can_submit,
                        onclick: move |_| on_submit.call(()),
                        "Submit Test"
                    }
                }
                if quiz.submitted {
                    p { class: "quiz-score", "Marks: {quiz.score} / {quiz.total}" }
                    button {
                        r#type: "button",
                        onclick: move |_| step(navigator, CourseNavigator::retry),
                        "Try Again"
                    }
                }
            }
        }
    }
}
