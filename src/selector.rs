use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::params::ParamsMap;
use leptos_router::NavigateOptions;
use rand::Rng;

use crate::dataset::Dataset;
use crate::model::PuzzleRecord;

/// Which puzzle the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Today,
    Random,
    Date(String),
}

impl Request {
    /// Reads a request from the `date` and `random` query parameters. `date` wins when both are
    /// present; `random` counts when it has any value other than empty, `0` or `false`.
    pub fn from_params(date: Option<&str>, random: Option<&str>) -> Self {
        if let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) {
            return Request::Date(date.to_string());
        }

        match random.map(str::trim) {
            Some(flag) if !matches!(flag, "" | "0" | "false") => Request::Random,
            _ => Request::Today,
        }
    }

    pub fn from_query(query: &ParamsMap) -> Self {
        Self::from_params(
            query.get("date").as_deref(),
            query.get("random").as_deref(),
        )
    }

    /// The puzzle this request names, or `None` for a date with no puzzle.
    pub fn resolve<'a, R: Rng + ?Sized>(
        &self,
        dataset: &'a Dataset,
        rng: &mut R,
    ) -> Option<&'a PuzzleRecord> {
        match self {
            Request::Today => Some(dataset.latest()),
            Request::Random => Some(dataset.choose(rng)),
            Request::Date(date) => dataset.find(date),
        }
    }
}

/// Picks the active puzzle for `request`. A date with no puzzle keeps `current`, or today's
/// puzzle when nothing is active yet.
pub fn select<'a, R: Rng + ?Sized>(
    dataset: &'a Dataset,
    request: &Request,
    current: Option<&'a PuzzleRecord>,
    rng: &mut R,
) -> &'a PuzzleRecord {
    request
        .resolve(dataset, rng)
        .or(current)
        .unwrap_or_else(|| dataset.latest())
}

/// How the location changes to show the puzzle dated `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryUpdate {
    /// Add a history entry for the new date.
    Push,
    /// Rewrite the current entry in place, leaving forward history intact.
    Replace,
}

/// What the location needs to show the puzzle dated `date`, or `None` when it already does. A
/// bare location (today's puzzle) is normalised in place. A random request is about to be
/// rewritten to a concrete date, so it's left alone.
pub fn history_update(request: &Request, date: &str) -> Option<HistoryUpdate> {
    match request {
        Request::Date(shown) if shown == date => None,
        Request::Date(_) => Some(HistoryUpdate::Push),
        Request::Today => Some(HistoryUpdate::Replace),
        Request::Random => None,
    }
}

pub fn date_query(date: &str) -> String {
    format!("?date={date}")
}

/// Where puzzle requests come from and where the active puzzle is reflected back.
pub trait RequestSource {
    /// The request encoded in the current location. Reading it inside a reactive scope subscribes
    /// that scope to later changes, back/forward navigation included.
    fn current_request(&self) -> Request;

    /// Puts `date` in the visible location without reloading the page. With `replace` the
    /// current history entry is overwritten instead of adding a new one.
    fn show_date(&self, date: &str, replace: bool);
}

/// [`RequestSource`] backed by the router's location. Must be created under a `<Router>`.
#[derive(Clone, Copy)]
pub struct RouterRequestSource {
    query: Memo<ParamsMap>,
    pathname: Memo<String>,
    navigate: StoredValue<Box<dyn Fn(&str, NavigateOptions)>, LocalStorage>,
}

impl RouterRequestSource {
    pub fn new() -> Self {
        let location = use_location();
        let navigate: Box<dyn Fn(&str, NavigateOptions)> = Box::new(use_navigate());
        Self {
            query: location.query,
            pathname: location.pathname,
            navigate: StoredValue::new_local(navigate),
        }
    }
}

impl RequestSource for RouterRequestSource {
    fn current_request(&self) -> Request {
        self.query.with(Request::from_query)
    }

    fn show_date(&self, date: &str, replace: bool) {
        let url = format!("{}{}", self.pathname.get_untracked(), date_query(date));
        let options = NavigateOptions {
            replace,
            scroll: false,
            ..Default::default()
        };
        self.navigate.with_value(|navigate| navigate(&url, options));
    }
}
