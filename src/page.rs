//! Page initialization.
//!
//! [`Page::init`] looks up every element the handlers care about and builds
//! one handler per element. Nothing is attached to events here: the browser
//! build wires the handlers to DOM events (`crate::web`), and tests call them
//! directly.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use tamaula_ui::config::UiConfig;
//! use tamaula_ui::dom::MemoryDocument;
//! use tamaula_ui::page::{Page, Services};
//! use tamaula_ui::services::{RecordingDialogs, SystemClock, TokioTimer};
//! use tamaula_ui::Submission;
//! # use tamaula_ui::clubs::HttpClubSource;
//! # use tamaula_ui::dom::MemoryElement;
//! # use tamaula_ui::services::FileLoader;
//! # #[derive(Debug)] struct NoFiles;
//! # #[async_trait::async_trait(?Send)]
//! # impl FileLoader<MemoryElement> for NoFiles {
//! #     async fn read_data_url(&self, _: &MemoryElement) -> tamaula_ui::Result<Option<String>> { Ok(None) }
//! # }
//!
//! let doc = MemoryDocument::new();
//! let form = doc.body().append("form", &[("id", "login")]);
//! form.append("input", &[("name", "email"), ("required", "")]);
//!
//! let dialogs = Rc::new(RecordingDialogs::new());
//! let services = Services {
//!     dialogs: Rc::<RecordingDialogs>::clone(&dialogs),
//!     clock: Rc::new(SystemClock),
//!     timer: Rc::new(TokioTimer),
//!     files: Rc::new(NoFiles),
//!     clubs: Rc::new(HttpClubSource::new("http://localhost:5000", "/get_clubs/")?),
//! };
//! let page = Page::init(&doc, &UiConfig::default(), services);
//!
//! assert_eq!(page.submit(&form), Submission::Cancel);
//! assert_eq!(dialogs.alerts().len(), 1);
//! # Ok::<(), tamaula_ui::UiError>(())
//! ```

use std::rc::Rc;

use crate::Submission;
use crate::clubs::{ClubDropdown, ClubSource};
use crate::competition::CompetitionForm;
use crate::config::{CONFIG_ELEMENT_ID, UiConfig};
use crate::dom::{Document, Element};
use crate::flash::FlashDismissal;
use crate::navigation::NavToggle;
use crate::preview::ImagePreview;
use crate::required::RequiredFields;
use crate::services::{Clock, Dialogs, FileLoader, Timer};

/// Everything the handlers need besides the document.
pub struct Services<E> {
    pub dialogs: Rc<dyn Dialogs>,
    pub clock: Rc<dyn Clock>,
    pub timer: Rc<dyn Timer>,
    pub files: Rc<dyn FileLoader<E>>,
    pub clubs: Rc<dyn ClubSource>,
}

impl<E> std::fmt::Debug for Services<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("clubs", &self.clubs)
            .finish_non_exhaustive()
    }
}

/// Read the page's configuration, layering the embedded JSON overrides (if
/// any) over the defaults.
pub fn load_config<D: Document>(doc: &D) -> Result<UiConfig, config::ConfigError> {
    let overrides = doc
        .element_by_id(CONFIG_ELEMENT_ID)
        .map(|el| el.text_content());
    UiConfig::load(overrides.as_deref())
}

/// All handlers for one page.
pub struct Page<D: Document> {
    pub competition: Option<CompetitionForm<D::Element>>,
    pub navigation: NavToggle<D::Element>,
    pub clubs: Option<ClubDropdown<D::Element>>,
    pub required_forms: Vec<RequiredFields<D::Element>>,
    pub previews: Vec<ImagePreview<D>>,
    pub flash_messages: Vec<FlashDismissal<D::Element>>,
    dialogs: Rc<dyn Dialogs>,
    clock: Rc<dyn Clock>,
}

impl<D: Document> std::fmt::Debug for Page<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("competition", &self.competition.is_some())
            .field("clubs", &self.clubs.is_some())
            .field("required_forms", &self.required_forms.len())
            .field("previews", &self.previews.len())
            .field("flash_messages", &self.flash_messages.len())
            .finish_non_exhaustive()
    }
}

impl<D> Page<D>
where
    D: Document + Clone,
{
    pub fn init(doc: &D, config: &UiConfig, services: Services<D::Element>) -> Self {
        let page = Self {
            competition: CompetitionForm::find(doc, &config.competition),
            navigation: NavToggle::find(doc, &config.navigation),
            clubs: ClubDropdown::find(doc, &config.clubs, services.clubs),
            required_forms: RequiredFields::find_all(doc, &config.required),
            previews: ImagePreview::find_all(doc, &config.preview, &services.files),
            flash_messages: FlashDismissal::find_all(doc, &config.flash, &services.timer),
            dialogs: services.dialogs,
            clock: services.clock,
        };

        tracing::info!(
            name: "ui.page.initialized",
            competition = page.competition.is_some(),
            clubs = page.clubs.is_some(),
            forms = page.required_forms.len(),
            previews = page.previews.len(),
            flash_messages = page.flash_messages.len(),
            "TAMAULA script loaded"
        );
        page
    }

    /// Run every submit check registered for `form`.
    ///
    /// Required fields are checked first; the competition date checks only
    /// run once they pass, so a submission never raises two dialogs.
    pub fn submit(&self, form: &D::Element) -> Submission {
        let required = self.required_forms.iter().find(|r| r.form() == form);
        if let Some(required) = required {
            if required.submit(self.dialogs.as_ref()) == Submission::Cancel {
                return Submission::Cancel;
            }
        }

        match &self.competition {
            Some(competition) if competition.form() == form => {
                competition.submit(self.dialogs.as_ref(), self.clock.as_ref())
            }
            _ => Submission::Proceed,
        }
    }

    /// Hand over the pending flash dismissals, to be run as tasks.
    pub fn take_flash_messages(&mut self) -> Vec<FlashDismissal<D::Element>> {
        std::mem::take(&mut self.flash_messages)
    }
}
