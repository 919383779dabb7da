use dioxus::prelude::*;

use services::{DisplayState, MediaEvent, QuizCommand};

use crate::context::AppContext;
use crate::player::{PLAYER_ELEMENT_ID, player_bridge_script, youtube_listen_script};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizVm, map_quiz_vm};

/// Everything the quiz view can send to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizInput {
    Command(QuizCommand),
    Media(MediaEvent),
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let catalog_label = ctx.catalog_label().to_string();
    let vm = use_signal(|| None::<QuizVm>);

    // The host may run this twice on startup; `initialize` only acts once.
    let quiz_for_resource = quiz.clone();
    let resource = use_resource(move || {
        let quiz = quiz_for_resource.clone();
        let mut vm = vm;
        async move {
            let mut guard = quiz.lock().await;
            let outcome = guard.initialize().await;
            log::debug!("quiz ready: {outcome:?}");
            vm.set(Some(map_quiz_vm(&guard)));
            Ok::<_, ViewError>(())
        }
    });

    let dispatch = {
        let quiz = quiz.clone();
        use_callback(move |input: QuizInput| {
            let quiz = quiz.clone();
            let mut vm = vm;
            spawn(async move {
                let mut guard = quiz.lock().await;
                match input {
                    QuizInput::Command(command) => {
                        guard.dispatch(command).await;
                    }
                    QuizInput::Media(event) => guard.handle_media_event(event),
                }
                vm.set(Some(map_quiz_vm(&guard)));
            });
        })
    };

    // YouTube reports state through window messages rather than element events.
    use_future(move || async move {
        let mut bridge = document::eval(player_bridge_script());
        while let Ok(raw) = bridge.recv::<String>().await {
            if let Some(event) = MediaEvent::from_player_message(&raw) {
                dispatch.call(QuizInput::Media(event));
            }
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let Some(current) = vm.read().clone() else {
            return;
        };
        let key = evt.data.key();
        if key == Key::Character(" ".to_string()) && current.can_reveal() {
            evt.prevent_default();
            dispatch.call(QuizInput::Command(QuizCommand::Reveal));
            return;
        }
        if matches!(key, Key::Enter | Key::ArrowRight) && current.can_advance() {
            evt.prevent_default();
            dispatch.call(QuizInput::Command(QuizCommand::Advance));
        }
    });

    let state = view_state_from_resource(&resource);
    let current = vm.read().clone();
    let progress_label = current
        .as_ref()
        .map(|vm| vm.progress_label.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "page quiz-page",
            tabindex: "0",
            onkeydown: move |evt| on_key.call(evt),
            header { class: "view-header",
                h2 { class: "view-title", "Song Quiz" }
                if !progress_label.is_empty() {
                    p { class: "view-subtitle", "{progress_label}" }
                }
            }
            div { class: "view-divider" }
            match (state, current) {
                (ViewState::Error(err), _) => rsx! {
                    p { "{err.message()}" }
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
                (ViewState::Ready(()), Some(vm)) => rsx! {
                    QuizCard { vm, dispatch }
                },
                _ => rsx! {
                    p { class: "quiz-loading", "Loading..." }
                },
            }
            footer { class: "quiz-footer", "Catalog: {catalog_label}" }
        }
    }
}

#[component]
fn QuizCard(vm: QuizVm, dispatch: Callback<QuizInput>) -> Element {
    let command = move |command: QuizCommand| dispatch.call(QuizInput::Command(command));
    let media = move |event: MediaEvent| dispatch.call(QuizInput::Media(event));

    match vm.display.clone() {
        DisplayState::Loading => rsx! {
            p { class: "quiz-loading", "Loading..." }
        },
        DisplayState::CatalogUnavailable(reason) => rsx! {
            div { class: "quiz-empty quiz-unavailable",
                p { "The song catalog could not be loaded." }
                p { class: "quiz-error-detail", "{reason}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| command(QuizCommand::RetryLoad),
                    "Retry"
                }
            }
        },
        DisplayState::NoMoreCards => rsx! {
            div { class: "quiz-empty",
                p { "No more cards." }
                if vm.can_start_new {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| command(QuizCommand::StartNewSession),
                        "New session"
                    }
                }
            }
        },
        DisplayState::PlayingCard => {
            let playing = vm.playing;
            let can_reveal = vm.can_reveal();
            let can_advance = vm.can_advance();
            let finished = vm.is_last && vm.revealed.is_some();
            rsx! {
                div { class: "quiz-card",
                    div { class: "quiz-player",
                        if let Some(player) = vm.player.clone() {
                            if player.embedded {
                                iframe {
                                    id: PLAYER_ELEMENT_ID,
                                    src: "{player.src}",
                                    "allow": "autoplay; encrypted-media",
                                    onload: move |_| {
                                        let _ = document::eval(&youtube_listen_script());
                                        media(MediaEvent::Ready);
                                    },
                                }
                            } else {
                                video {
                                    id: PLAYER_ELEMENT_ID,
                                    src: "{player.src}",
                                    preload: "auto",
                                    onwaiting: move |_| media(MediaEvent::Buffering),
                                    oncanplay: move |_| media(MediaEvent::Ready),
                                    onplay: move |_| media(MediaEvent::Playing),
                                    onpause: move |_| media(MediaEvent::Paused),
                                    onended: move |_| media(MediaEvent::Ended),
                                    onerror: move |_| media(MediaEvent::Error("media element error".to_string())),
                                }
                            }
                        } else {
                            p { class: "quiz-player-missing", "This card has no playable media." }
                        }
                        if vm.loading {
                            p { class: "quiz-player-loading", "Loading media..." }
                        }
                    }
                    div { class: "quiz-controls",
                        button {
                            id: "quiz-play",
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| command(QuizCommand::SetPlaying(!playing)),
                            if playing { "Pause" } else { "Play" }
                        }
                        label { class: "quiz-volume",
                            "Volume"
                            input {
                                r#type: "range",
                                min: "0",
                                max: "1",
                                step: "0.05",
                                value: "{vm.volume}",
                                oninput: move |evt: FormEvent| {
                                    if let Ok(volume) = evt.value().parse::<f32>() {
                                        command(QuizCommand::SetVolume(volume));
                                    }
                                },
                            }
                        }
                    }
                    if let Some(meta) = vm.revealed.clone() {
                        div { class: "quiz-meta",
                            p { class: "quiz-meta-title", "{meta.title}" }
                            p { class: "quiz-meta-artist", "{meta.artist}" }
                            if !meta.year.is_empty() {
                                p { class: "quiz-meta-year", "{meta.year}" }
                            }
                        }
                    } else {
                        div { class: "quiz-meta quiz-meta--hidden", "? ? ?" }
                    }
                    div { class: "quiz-actions",
                        if can_reveal {
                            button {
                                id: "quiz-reveal",
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| command(QuizCommand::Reveal),
                                "Reveal"
                            }
                        }
                        if can_advance {
                            button {
                                id: "quiz-next",
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| command(QuizCommand::Advance),
                                "Next"
                            }
                        }
                        if finished {
                            p { class: "quiz-finished", "That was the last card." }
                        }
                        button {
                            id: "quiz-new-session",
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| command(QuizCommand::StartNewSession),
                            "New session"
                        }
                    }
                }
            }
        }
    }
}
