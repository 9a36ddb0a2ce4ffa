use dioxus::prelude::*;

use quiz_core::model::BankError;
use services::{QuizDriver, QuizError};
use storage::StorageError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AnswerInputVm, OptionVm, QuestionViewModel, QuizIntent, ResponseDraft, notice_for,
    render_question,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

fn view_error(err: &QuizError) -> ViewError {
    match err {
        QuizError::Storage(StorageError::Bank(BankError::Empty))
        | QuizError::Bank(BankError::Empty) => ViewError::EmptyBank,
        _ => ViewError::Unknown,
    }
}

/// Apply one intent to the driver and the draft. Returns the notice to show, if any.
fn apply_intent(
    driver: &mut QuizDriver,
    draft: &mut ResponseDraft,
    intent: QuizIntent,
) -> Option<&'static str> {
    draft.sync(driver.session().instance());
    let result = match intent {
        QuizIntent::Previous => driver.go_to_previous(),
        QuizIntent::Next => driver.go_to_next(),
        QuizIntent::Submit => {
            let response = draft.to_response(driver.session().current_question());
            driver.submit(&response).map(|_| ())
        }
        QuizIntent::ToggleOption(id) => {
            draft.toggle(id);
            Ok(())
        }
        QuizIntent::SetNumeric(raw) => {
            draft.set_numeric(raw);
            Ok(())
        }
        QuizIntent::RevealExplanation => {
            driver.reveal_explanation();
            Ok(())
        }
    };
    draft.sync(driver.session().instance());
    result.err().map(|err| {
        if !err.is_user_error() {
            tracing::error!(error = %err, "quiz action failed");
        }
        notice_for(&err)
    })
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let driver = use_signal(|| None::<QuizDriver>);
    let draft = use_signal(ResponseDraft::default);
    let notice = use_signal(|| None::<&'static str>);

    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut driver = driver;
        let mut draft = draft;
        let mut notice = notice;

        async move {
            let (started, mut ticks) = quiz_loop.start_driver().await.map_err(|err| {
                tracing::error!(error = %err, "failed to start quiz");
                view_error(&err)
            })?;
            draft.set(ResponseDraft::for_instance(started.session().instance()));
            notice.set(None);
            driver.set(Some(started));

            // Ends once the driver (and with it the ticker) is dropped.
            spawn(async move {
                while let Some(tick) = ticks.recv().await {
                    if let Some(driver) = driver.write().as_mut() {
                        driver.apply_tick(tick);
                    }
                }
            });
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut driver = driver;
        let mut draft = draft;
        let mut notice = notice;

        tracing::debug!(?intent, "quiz intent");
        let mut driver_guard = driver.write();
        let Some(active) = driver_guard.as_mut() else {
            return;
        };
        let clears_notice = !matches!(
            intent,
            QuizIntent::ToggleOption(_) | QuizIntent::SetNumeric(_)
        );
        let message = apply_intent(active, &mut draft.write(), intent);
        drop(driver_guard);

        if message.is_some() || clears_notice {
            notice.set(message);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, driver);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| match evt.data.key() {
        Key::ArrowLeft => {
            evt.prevent_default();
            dispatch_intent.call(QuizIntent::Previous);
        }
        Key::ArrowRight => {
            evt.prevent_default();
            dispatch_intent.call(QuizIntent::Next);
        }
        Key::Enter => {
            evt.prevent_default();
            dispatch_intent.call(QuizIntent::Submit);
        }
        _ => {}
    });

    let view = driver
        .read()
        .as_ref()
        .map(|active| render_question(active.session(), &draft.read()));
    let notice_text = *notice.read();

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "quiz-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    // Keyed by instance: a new instance never reuses the old inputs.
                    for (instance, view) in view.map(|view| (view.instance, view)) {
                        QuestionCard {
                            key: "{instance}",
                            view,
                            notice: notice_text,
                            on_intent: dispatch_intent,
                        }
                    }
                },
            }
        }
    }
}

/// Enter on a focused button activates that button only.
fn keep_enter_on_button(evt: KeyboardEvent) {
    if evt.data.key() == Key::Enter {
        evt.stop_propagation();
    }
}

#[component]
fn QuestionCard(
    view: QuestionViewModel,
    notice: Option<&'static str>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        article { class: "quiz-card", "data-instance": "{view.instance}",
            header { class: "quiz-card__header",
                h2 { class: "quiz-card__title", "{view.title}" }
                span { class: "quiz-card__progress", "{view.progress_label}" }
            }
            div { class: "quiz-card__body", dangerous_inner_html: "{view.body_html}" }

            match view.input {
                AnswerInputVm::Options(options) => rsx! {
                    div { class: "quiz-options",
                        for option in options {
                            OptionRow { option, on_intent }
                        }
                    }
                },
                AnswerInputVm::Numeric { value } => rsx! {
                    input {
                        class: "quiz-numeric",
                        id: "quiz-numeric",
                        r#type: "number",
                        step: "any",
                        placeholder: "Enter your answer",
                        value: "{value}",
                        oninput: move |evt| on_intent.call(QuizIntent::SetNumeric(evt.value())),
                        // Arrow keys move the caret here, not the quiz.
                        onkeydown: move |evt: KeyboardEvent| {
                            if matches!(evt.data.key(), Key::ArrowLeft | Key::ArrowRight) {
                                evt.stop_propagation();
                            }
                        },
                    }
                },
            }

            p { class: "quiz-timer", id: "quiz-timer", "{view.time_label}" }

            if let Some(message) = notice {
                p { class: "quiz-notice", role: "alert", "{message}" }
            }

            if let Some(feedback) = view.feedback {
                p { class: "{feedback.class()}", "{feedback.label()}" }
            }
            if let Some(label) = view.time_taken_label {
                p { class: "quiz-time-taken", "{label}" }
            }
            if let Some(answer) = view.revealed_answer {
                p { class: "quiz-reveal", "{answer}" }
            }

            div { class: "quiz-actions",
                button {
                    class: "btn btn-secondary",
                    id: "quiz-previous",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    onkeydown: keep_enter_on_button,
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    id: "quiz-submit",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Submit),
                    onkeydown: keep_enter_on_button,
                    "Submit"
                }
                button {
                    class: "btn btn-secondary",
                    id: "quiz-next",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    onkeydown: keep_enter_on_button,
                    "Next"
                }
                button {
                    class: "btn btn-ghost",
                    id: "quiz-explanation",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::RevealExplanation),
                    onkeydown: keep_enter_on_button,
                    "Show Explanation"
                }
            }

            if let Some(explanation) = view.explanation_html {
                section { class: "quiz-explanation",
                    h3 { "Explanation" }
                    div { dangerous_inner_html: "{explanation}" }
                }
            }
        }
    }
}

#[component]
fn OptionRow(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let id = option.id.clone();
    rsx! {
        label { class: "{option.class()}", r#for: "{option.dom_id}",
            input {
                r#type: "checkbox",
                id: "{option.dom_id}",
                checked: option.checked,
                onchange: move |_| on_intent.call(QuizIntent::ToggleOption(id.clone())),
            }
            span { dangerous_inner_html: "{option.label_html}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    driver: Rc<RefCell<Option<Signal<Option<QuizDriver>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        driver: Signal<Option<QuizDriver>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.driver.borrow_mut() = Some(driver);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn driver(&self) -> Signal<Option<QuizDriver>> {
        (*self.driver.borrow()).expect("quiz driver registered")
    }
}
