use dioxus::prelude::*;
use practice_core::model::{LogDifficulty, LogResult, QuickLogDefaults};

use crate::vm::result_label;

/// Post-solve form for felt difficulty and outcome.
#[component]
pub fn QuickLogForm(
    defaults: QuickLogDefaults,
    on_save: EventHandler<(LogDifficulty, LogResult)>,
    on_close: EventHandler<()>,
) -> Element {
    let mut difficulty = use_signal(|| defaults.difficulty);
    let mut result = use_signal(|| defaults.result);
    let options: Vec<LogDifficulty> = (LogDifficulty::MIN..=LogDifficulty::MAX)
        .filter_map(|value| LogDifficulty::new(value).ok())
        .collect();
    let current = difficulty();

    rsx! {
        div { class: "card quick-log",
            h3 { "Quick log" }
            label { r#for: "log-difficulty", "How hard did it feel?" }
            select {
                id: "log-difficulty",
                value: "{current.value()}",
                onchange: move |evt| {
                    if let Some(parsed) = evt
                        .value()
                        .parse::<u8>()
                        .ok()
                        .and_then(|value| LogDifficulty::new(value).ok())
                    {
                        difficulty.set(parsed);
                    }
                },
                for level in options {
                    option {
                        value: "{level.value()}",
                        selected: level == current,
                        "{level.label()} ({level.value()}/5)"
                    }
                }
            }
            div { class: "result-toggle",
                for choice in [LogResult::Success, LogResult::Failure] {
                    button {
                        class: if result() == choice { "btn active" } else { "btn" },
                        onclick: move |_| result.set(choice),
                        "{result_label(choice)}"
                    }
                }
            }
            div { class: "actions",
                button { class: "btn", onclick: move |_| on_close.call(()), "Cancel" }
                button {
                    class: "btn primary",
                    onclick: move |_| on_save.call((difficulty(), result())),
                    "Save log"
                }
            }
        }
    }
}
