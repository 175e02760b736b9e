use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::game::Notice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: &'static str,
}

/// The page's notification channel. Provided as context and rendered by [`Toaster`].
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    /// Shows `notice` and schedules its removal once its duration has passed.
    pub fn notify(&self, notice: Notice) {
        let id = self.push(notice);
        let toasts = *self;
        spawn_local(async move {
            TimeoutFuture::new(notice.duration_ms()).await;
            toasts.dismiss(id);
        });
    }

    fn push(&self, notice: Notice) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Toast {
                id,
                message: notice.message(),
            })
        });
        id
    }

    fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.items.get()
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts: Toasts = expect_context();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.visible()
                key=|toast| toast.id
                children=move |toast| view! { <div class="toast">{toast.message}</div> }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let owner = Owner::new();
        owner.with(|| {
            let toasts = Toasts::new();
            let first = toasts.push(Notice::InvalidGroup);
            let second = toasts.push(Notice::GameOver);
            assert_ne!(first, second);

            let messages: Vec<&str> = toasts.visible().iter().map(|t| t.message).collect();
            assert_eq!(messages, vec!["Invalid group", "Game Over"]);

            toasts.dismiss(first);
            let messages: Vec<&str> = toasts.visible().iter().map(|t| t.message).collect();
            assert_eq!(messages, vec!["Game Over"]);
        });
    }
}
