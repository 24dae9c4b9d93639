use crate::controller::WidgetController;
use crate::coordinator::SendState;
use crate::render::MessageLog;
use crate::theme::{prefers_dark_scheme, theme_definition};
use crate::types::ThemeMode;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

const WIDGET_CSS: Asset = asset!("/assets/widget.css");

const SCROLL_TO_NEWEST: &str = r#"
const box = document.getElementById("chat-box");
if (box) { box.scrollTop = box.scrollHeight; }
"#;

#[component]
pub fn App() -> Element {
    let controller =
        use_context_provider(|| Rc::new(WidgetController::setup(crate::config::active())));
    let theme = use_signal(|| controller.theme.init(prefers_dark_scheme()));
    let messages = use_signal(MessageLog::new);
    let status = use_signal(|| SendState::Idle);
    let definition = theme_definition(theme());

    rsx! {
        ThemeStyles { theme }
        div { class: "{definition.root_class}",
            div { class: "chat-container",
                ChatHeader { theme }
                ChatBox { messages, status }
                Composer { messages, status }
            }
        }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: WIDGET_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn ChatHeader(theme: Signal<ThemeMode>) -> Element {
    rsx! {
        div { class: "chat-header",
            h1 { "Chatbot" }
            ThemeToggle { theme }
        }
    }
}

#[component]
fn ThemeToggle(theme: Signal<ThemeMode>) -> Element {
    let controller = use_context::<Rc<WidgetController>>();
    let mut theme = theme;
    rsx! {
        div { class: "theme-switch-wrapper",
            label { class: "theme-switch", r#for: "checkbox",
                input {
                    id: "checkbox",
                    r#type: "checkbox",
                    checked: theme().is_dark(),
                    onchange: move |ev| {
                        let mode = controller.theme.set_theme(ev.checked());
                        theme.set(mode);
                    },
                }
                div { class: "slider round" }
            }
        }
    }
}

#[component]
fn ChatBox(messages: Signal<MessageLog>, status: Signal<SendState>) -> Element {
    let controller = use_context::<Rc<WidgetController>>();

    use_effect(move || {
        if !messages.read().is_empty() {
            let _ = document::eval(SCROLL_TO_NEWEST);
        }
    });

    let log = messages();
    rsx! {
        div {
            id: "chat-box",
            class: "chat-box",
            aria_busy: (status() == SendState::Sending).to_string(),
            for (i, message) in log.iter().enumerate() {
                div { key: "{i}", class: format_args!("message {}", message.sender.css_class()),
                    div { class: "message-text", dangerous_inner_html: controller.render(message) }
                }
            }
        }
    }
}

#[component]
fn Composer(messages: Signal<MessageLog>, status: Signal<SendState>) -> Element {
    let controller = use_context::<Rc<WidgetController>>();
    let mut input = use_signal(String::new);

    let send_message = use_callback(move |raw: String| {
        let mut messages = messages;
        let mut status = status;
        let Some(text) = messages.with_mut(|log| controller.sender.begin(&raw, log)) else {
            return;
        };
        input.set(String::new());
        status.set(SendState::Sending);

        let controller = Rc::clone(&controller);
        spawn(async move {
            let outcome = controller.sender.exchange(text).await;
            messages.with_mut(|log| log.push(outcome.reply));
            // Other sends may still be outstanding.
            status.set(controller.sender.state());
        });
    });

    rsx! {
        div { class: "input-area",
            input {
                id: "user-input",
                r#type: "text",
                placeholder: "Type your message...",
                autocomplete: "off",
                value: "{input}",
                oninput: move |ev| input.set(ev.value()),
                onkeydown: move |ev| {
                    if ev.key() == Key::Enter {
                        ev.prevent_default();
                        send_message.call(input());
                    }
                },
            }
            button {
                id: "send-btn",
                r#type: "button",
                onclick: move |_| send_message.call(input()),
                "Send"
            }
        }
    }
}
