//! Dependent club dropdown.
//!
//! Choosing a local government loads the clubs registered there into the club
//! selector. Each change takes a ticket from a shared generation counter; a
//! response whose ticket is no longer the latest is dropped, so the selector
//! always reflects the most recent selection no matter how responses are
//! ordered on the wire.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use url::Url;

use crate::config::ClubsConfig;
use crate::dom::{Document, Element, SelectOption};
use crate::error::{Result, UiError};

/// Source of club names for a local government.
#[async_trait(?Send)]
pub trait ClubSource: std::fmt::Debug {
    async fn clubs(&self, local_government: &str) -> Result<Vec<String>>;
}

/// Fetches clubs from `GET {endpoint}{local_government}`.
#[derive(Debug, Clone)]
pub struct HttpClubSource {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpClubSource {
    /// # Arguments
    ///
    /// * `origin` - Absolute base URL of the site (e.g. the page's origin)
    /// * `endpoint` - Path prefix the selected value is appended to
    pub fn new(origin: impl AsRef<str>, endpoint: &str) -> Result<Self> {
        Self::with_client(origin, endpoint, reqwest::Client::new())
    }

    pub fn with_client(
        origin: impl AsRef<str>,
        endpoint: &str,
        http: reqwest::Client,
    ) -> Result<Self> {
        let endpoint = Url::parse(origin.as_ref())?.join(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(UiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self { endpoint, http })
    }

    /// URL for one local government; the value becomes a single encoded path
    /// segment.
    pub fn url_for(&self, local_government: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(local_government);
        }
        url
    }
}

#[async_trait(?Send)]
impl ClubSource for HttpClubSource {
    async fn clubs(&self, local_government: &str) -> Result<Vec<String>> {
        let url = self.url_for(local_government);
        tracing::debug!(name: "ui.clubs.request", url = %url, "Requesting clubs");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UiError::Status {
                status: status.as_u16(),
            });
        }
        // `null` means no clubs.
        let clubs: Option<Vec<String>> = response.json().await?;
        Ok(clubs.unwrap_or_default())
    }
}

/// What the club selector currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownState {
    /// No local government chosen.
    Prompt,
    Loading,
    Loaded(Vec<String>),
    Empty,
    Failed,
}

/// Result of one change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied(DropdownState),
    /// A newer change was dispatched while this one was in flight.
    Superseded,
}

/// Local government selector driving the club selector.
#[derive(Debug, Clone)]
pub struct ClubDropdown<E> {
    primary: E,
    dependent: E,
    source: Rc<dyn ClubSource>,
    config: ClubsConfig,
    generation: Rc<Cell<u64>>,
}

impl<E: Element> ClubDropdown<E> {
    /// Wire up the pair; the club selector starts disabled.
    pub fn new(
        primary: E,
        dependent: E,
        source: Rc<dyn ClubSource>,
        config: ClubsConfig,
    ) -> Self {
        dependent.set_disabled(true);
        Self {
            primary,
            dependent,
            source,
            config,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Locate both selectors; `None` unless the page has both.
    pub fn find<D>(doc: &D, config: &ClubsConfig, source: Rc<dyn ClubSource>) -> Option<Self>
    where
        D: Document<Element = E>,
    {
        let primary = doc.element_by_id(&config.primary_id)?;
        let dependent = doc.element_by_id(&config.dependent_id)?;
        Some(Self::new(primary, dependent, source, config.clone()))
    }

    pub fn primary(&self) -> &E {
        &self.primary
    }

    /// Handle a change of the local government selector.
    pub async fn on_change(&self) -> ChangeOutcome {
        let selected = self.primary.value();
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);

        self.render(&DropdownState::Loading);

        if selected.is_empty() {
            self.render(&DropdownState::Prompt);
            return ChangeOutcome::Applied(DropdownState::Prompt);
        }

        let result = self.source.clubs(&selected).await;

        if self.generation.get() != ticket {
            tracing::debug!(
                name: "ui.clubs.superseded",
                local_government = %selected,
                ticket,
                latest = self.generation.get(),
                "Dropping stale club response"
            );
            return ChangeOutcome::Superseded;
        }

        let state = match result {
            Ok(clubs) if clubs.is_empty() => DropdownState::Empty,
            Ok(clubs) => DropdownState::Loaded(clubs),
            Err(e) => {
                tracing::warn!(
                    name: "ui.clubs.failed",
                    local_government = %selected,
                    error = %e,
                    "Failed to load clubs"
                );
                DropdownState::Failed
            }
        };

        self.render(&state);
        ChangeOutcome::Applied(state)
    }

    fn render(&self, state: &DropdownState) {
        let placeholder = |label: &str| vec![SelectOption::placeholder(label)];

        let (options, enabled) = match state {
            DropdownState::Prompt => (placeholder(&self.config.prompt_label), false),
            DropdownState::Loading => (placeholder(&self.config.loading_label), false),
            DropdownState::Empty => (placeholder(&self.config.empty_label), false),
            DropdownState::Failed => (placeholder(&self.config.error_label), false),
            DropdownState::Loaded(clubs) => {
                let mut options = placeholder(&self.config.placeholder_label);
                options.extend(clubs.iter().map(|club| SelectOption::new(club, club)));
                (options, true)
            }
        };

        self.dependent.replace_options(&options);
        self.dependent.set_disabled(!enabled);
    }
}
