use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use rand::rng;

use crate::dataset::{Dataset, DatasetError};
use crate::game::{Guess, Session, STARTING_LIVES};
use crate::model::PuzzleRecord;
use crate::selector::{
    history_update, select, HistoryUpdate, Request, RequestSource, RouterRequestSource,
};
use crate::toast::{Toaster, Toasts};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/connections.css" />

        <Title text="Connections" />

        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=Home />
                </Routes>
            </main>
        </Router>
    }
}

/// The dataset the server loaded at startup, or the bundled one when there is none in context
/// (the hydrating client).
pub(crate) fn load_dataset() -> Result<Dataset, DatasetError> {
    match use_context::<Dataset>() {
        Some(dataset) => Ok(dataset),
        None => Dataset::embedded(),
    }
}

/// Hands the puzzle data and the notification channel to everything below.
#[component]
fn Home() -> impl IntoView {
    match load_dataset() {
        Ok(dataset) => {
            provide_context(dataset);
            provide_context(Toasts::new());
            view! { <Puzzles /> }.into_any()
        }
        Err(e) => {
            error!("Failed to load puzzles: {e}");
            view! { <p class="error">"Could not load puzzles: " {e.to_string()}</p> }.into_any()
        }
    }
}

/// Chooses the active puzzle from the location and offers the ways to switch it.
#[component]
fn Puzzles() -> impl IntoView {
    let dataset: Dataset = expect_context();
    let source = RouterRequestSource::new();

    let request = Memo::new(move |_| source.current_request());

    let puzzle = {
        let dataset = dataset.clone();
        Memo::new(move |prev: Option<&PuzzleRecord>| match request.get() {
            // Rewritten to a concrete date by the client-side effect below.
            Request::Random => prev.cloned().unwrap_or_else(|| dataset.latest().clone()),
            other => {
                let picked = select(&dataset, &other, prev, &mut rng());
                if let Request::Date(date) = &other {
                    if picked.date != *date {
                        warn!("No puzzle for {date}, keeping {}", picked.date);
                    }
                }
                picked.clone()
            }
        })
    };

    {
        let dataset = dataset.clone();
        Effect::new(move || {
            if request.get() == Request::Random {
                let date = dataset.choose(&mut rng()).date.clone();
                log!("Random puzzle: {date}");
                source.show_date(&date, true);
            }
        });
    }

    // Keeps the address bar on the active puzzle's date.
    Effect::new(move || {
        let date = puzzle.with(|p| p.date.clone());
        if let Some(update) = history_update(&request.get_untracked(), &date) {
            source.show_date(&date, update == HistoryUpdate::Replace);
        }
    });

    let picked_date = RwSignal::new(puzzle.with_untracked(|p| p.date.clone()));
    Effect::new(move || picked_date.set(puzzle.with(|p| p.date.clone())));

    let todays_game = {
        let dataset = dataset.clone();
        move |_: MouseEvent| source.show_date(&dataset.latest().date, false)
    };

    let random_game = {
        let dataset = dataset.clone();
        move |_: MouseEvent| source.show_date(&dataset.choose(&mut rng()).date, false)
    };

    let dated_game = {
        let dataset = dataset.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let date = picked_date.get();
            if dataset.find(&date).is_some() {
                source.show_date(&date, false);
            } else {
                warn!("No puzzle for {date}");
            }
        }
    };

    let earliest = dataset.earliest().date.clone();
    let latest = dataset.latest().date.clone();
    let picker_label = format!("Pick your date (After {earliest})");

    view! {
        <Game puzzle />
        <div class="button-group">
            <button on:click=todays_game>"Today's Game"</button>
            <button on:click=random_game>"Random Game"</button>
        </div>
        <form method="get" on:submit=dated_game>
            <label>
                {picker_label}
                <input
                    type="date"
                    name="date"
                    min=earliest
                    max=latest
                    prop:value=move || picked_date.get()
                    on:change=move |ev| picked_date.set(event_target_value(&ev))
                />
            </label>
            <button type="submit">"Go"</button>
        </form>
        <Toaster />
    }
}

/// Plays one puzzle. The session restarts whenever `puzzle` changes.
#[component]
fn Game(puzzle: Memo<PuzzleRecord>) -> impl IntoView {
    let toasts: Toasts = expect_context();
    let session = RwSignal::new(None::<Session>);

    // Effects only run in the browser; the server renders the loading placeholder.
    Effect::new(move || {
        let puzzle = puzzle.get();
        log!("Starting puzzle {}", puzzle.date);
        session.set(Some(Session::new(puzzle)));
    });

    let submit = move |_: MouseEvent| {
        let mut outcome = None;
        session.update(|s| {
            if let Some(s) = s {
                outcome = Some(s.submit());
            }
        });
        let Some(guess) = outcome else {
            return;
        };

        match &guess {
            Guess::Correct(group) => log!("Solved {} (level {})", group.group, group.level),
            Guess::Wrong { lives } => log!("Wrong guess, {lives} lives left"),
            Guess::GameOver => log!("Game over on {}", puzzle.with_untracked(|p| p.date.clone())),
            Guess::Incomplete { .. } => {}
        }
        for notice in guess.notices() {
            toasts.notify(*notice);
        }
    };

    let board = move || {
        session.with(|s| {
            let Some(s) = s else {
                return view! { <p>"Loading..."</p> }.into_any();
            };

            let groups = s
                .solved()
                .iter()
                .map(|group| {
                    view! {
                        <div class=format!("group group-{}", group.level)>
                            <p>{group.group.clone()}</p>
                            <p class="list">
                                {group
                                    .members
                                    .iter()
                                    .map(|m| view! { <span class="option">{m.clone()}</span> })
                                    .collect_view()}
                            </p>
                        </div>
                    }
                })
                .collect_view();

            let options = s
                .options()
                .iter()
                .map(|option| {
                    let word = option.word.clone();
                    let class = if option.selected { "option selected" } else { "option" };
                    view! {
                        <div
                            class=class
                            on:click=move |_| {
                                session
                                    .update(|s| {
                                        if let Some(s) = s {
                                            s.toggle(&word);
                                        }
                                    })
                            }
                        >
                            {option.word.clone()}
                        </div>
                    }
                })
                .collect_view();

            view! { <div class="option-grid">{groups} {options}</div> }.into_any()
        })
    };

    let lives = move || session.with(|s| s.as_ref().map_or(STARTING_LIVES, Session::lives));
    let finished = move || session.with(|s| s.as_ref().map_or(true, Session::is_over));

    view! {
        <h1>{move || puzzle.with(PuzzleRecord::display_date)}</h1>
        {board}
        <p>"Lives Remaining: " {lives}</p>
        <div class="button-group">
            <button
                disabled=finished
                on:click=move |_| {
                    session
                        .update(|s| {
                            if let Some(s) = s {
                                s.shuffle_options();
                            }
                        })
                }
            >
                "Shuffle"
            </button>
            <button
                disabled=finished
                on:click=move |_| {
                    session
                        .update(|s| {
                            if let Some(s) = s {
                                s.deselect_all();
                            }
                        })
                }
            >
                "Deselect All"
            </button>
            <button disabled=finished on:click=submit>
                "Submit"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::fruit_puzzle;

    #[test]
    fn test_load_dataset_prefers_context() {
        let owner = Owner::new();
        owner.with(|| {
            let provided = Dataset::new(vec![fruit_puzzle()]).unwrap();
            provide_context(provided.clone());

            let loaded = load_dataset().unwrap();
            assert_eq!(loaded, provided);
            assert_ne!(loaded, Dataset::embedded().unwrap());
        });
    }

    #[test]
    fn test_load_dataset_falls_back_to_embedded() {
        let owner = Owner::new();
        owner.with(|| {
            assert_eq!(load_dataset().unwrap(), Dataset::embedded().unwrap());
        });
    }
}
