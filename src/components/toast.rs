use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::commands::NoticeLevel;

const TOAST_MS: i32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// App-wide toast queue. Backend notices and local confirmations both land here.
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(vec![]),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|t| {
            t.push(Toast {
                id,
                level,
                message: message.into(),
            })
        });

        // Auto-dismiss
        let ctx = *self;
        let callback = wasm_bindgen::closure::Closure::once(move || ctx.dismiss(id));
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                TOAST_MS,
            );
        }
        callback.forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|t| t.retain(|toast| toast.id != id));
    }
}

pub fn use_toasts() -> ToastContext {
    expect_context::<ToastContext>()
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_toasts();

    view! {
        <div class="toast-host">
            {move || ctx.toasts.get().into_iter().map(|toast| {
                let class = match toast.level {
                    NoticeLevel::Error => "toast toast-error",
                    NoticeLevel::Warning => "toast toast-warning",
                    NoticeLevel::Info => "toast toast-info",
                };
                let id = toast.id;
                view! {
                    <div class=class role="status">
                        <span class="toast-message">{toast.message}</span>
                        <button class="toast-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                    </div>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
