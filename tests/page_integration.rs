use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tamaula_ui::clubs::ClubSource;
use tamaula_ui::config::UiConfig;
use tamaula_ui::dom::{Document, Element, MemoryDocument, MemoryElement};
use tamaula_ui::flash::FlashOutcome;
use tamaula_ui::page::{Page, Services, load_config};
use tamaula_ui::preview::PreviewOutcome;
use tamaula_ui::services::{FileLoader, FixedClock, RecordingDialogs, TokioTimer};
use tamaula_ui::{Result, Submission, UiError, telemetry};

#[derive(Debug, Default)]
struct StaticClubs(HashMap<&'static str, Vec<&'static str>>);

#[async_trait(?Send)]
impl ClubSource for StaticClubs {
    async fn clubs(&self, local_government: &str) -> Result<Vec<String>> {
        match self.0.get(local_government) {
            Some(clubs) => Ok(clubs.iter().map(|c| (*c).to_string()).collect()),
            None => Err(UiError::Status { status: 500 }),
        }
    }
}

#[derive(Debug)]
struct PngFiles;

#[async_trait(?Send)]
impl FileLoader<MemoryElement> for PngFiles {
    async fn read_data_url(&self, input: &MemoryElement) -> Result<Option<String>> {
        Ok(input
            .attribute("data-file")
            .map(|body| format!("data:image/png;base64,{body}")))
    }
}

struct Fixture {
    doc: MemoryDocument,
    dialogs: Rc<RecordingDialogs>,
}

impl Fixture {
    /// A page carrying one of everything the layer handles.
    fn new() -> Self {
        telemetry::init("tamaula_ui=debug");

        let doc = MemoryDocument::new();
        let body = doc.body();

        let header = body.append("header", &[]);
        header.append("button", &[("class", "hamburger")]);
        let menu = header.append("ul", &[("class", "nav-menu")]);
        menu.append("a", &[("class", "nav-link"), ("href", "/")]);
        menu.append("a", &[("class", "nav-link"), ("href", "/competitions")]);

        body.append("div", &[("class", "flash-message success")]);

        let competition = body.append("form", &[("id", "competitionForm")]);
        competition.append("input", &[("name", "name"), ("required", "")]);
        competition.append("input", &[("name", "start_date"), ("type", "date")]);
        competition.append("input", &[("name", "end_date"), ("type", "date")]);
        competition.append("input", &[("name", "registration_deadline"), ("type", "date")]);

        let register = body.append("form", &[("id", "registerPlayer")]);
        let lg = register.append(
            "select",
            &[("id", "local_government"), ("name", "local_government")],
        );
        lg.append("option", &[("value", "")]);
        register.append("select", &[("id", "club"), ("name", "club"), ("required", "")]);
        register.append(
            "input",
            &[("type", "file"), ("name", "photo"), ("data-preview", "photoPreview")],
        );
        register.append("img", &[("id", "photoPreview"), ("style", "display:none")]);

        let events = body.append("form", &[("id", "AddEventForm")]);
        events.append("input", &[("name", "minute"), ("required", "")]);

        Self {
            doc,
            dialogs: Rc::new(RecordingDialogs::new()),
        }
    }

    fn page(&self) -> Page<MemoryDocument> {
        let clubs = StaticClubs(HashMap::from([
            ("LG1", vec!["ClubA", "ClubB"]),
            ("LG2", vec![]),
        ]));
        let services = Services {
            dialogs: Rc::<RecordingDialogs>::clone(&self.dialogs),
            clock: Rc::new(FixedClock(
                NaiveDate::from_ymd_opt(2026, 3, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            )),
            timer: Rc::new(TokioTimer),
            files: Rc::new(PngFiles),
            clubs: Rc::new(clubs),
        };
        Page::init(&self.doc, &UiConfig::default(), services)
    }

    fn by_id(&self, id: &str) -> MemoryElement {
        self.doc.element_by_id(id).unwrap()
    }

    fn by_name(&self, form: &str, name: &str) -> MemoryElement {
        self.by_id(form).field(name).unwrap()
    }
}

#[test]
fn test_init_discovers_handlers() {
    let fixture = Fixture::new();
    let page = fixture.page();

    assert!(page.competition.is_some());
    assert!(page.clubs.is_some());
    // AddEventForm is excluded.
    assert_eq!(page.required_forms.len(), 2);
    assert_eq!(page.previews.len(), 1);
    assert_eq!(page.flash_messages.len(), 1);
    assert_eq!(page.navigation.links().len(), 2);
    assert!(fixture.by_id("club").is_disabled());
}

#[test]
fn test_competition_required_fields_come_first() {
    let fixture = Fixture::new();
    let page = fixture.page();
    let form = fixture.by_id("competitionForm");
    fixture.by_name("competitionForm", "start_date").set_value("2026-04-12");
    fixture.by_name("competitionForm", "end_date").set_value("2026-04-10");

    // Name is blank: one alert, from the required check only.
    assert_eq!(page.submit(&form), Submission::Cancel);
    assert_eq!(fixture.dialogs.alerts(), vec!["Please fill in all required fields."]);

    fixture.by_name("competitionForm", "name").set_value("Lagos Cup");
    assert_eq!(page.submit(&form), Submission::Cancel);
    assert_eq!(
        fixture.dialogs.alerts().last().map(String::as_str),
        Some("End date must be after start date.")
    );
}

#[test]
fn test_competition_past_deadline_confirmation() {
    let fixture = Fixture::new();
    let page = fixture.page();
    let form = fixture.by_id("competitionForm");
    fixture.by_name("competitionForm", "name").set_value("Lagos Cup");
    fixture.by_name("competitionForm", "start_date").set_value("2026-04-10");
    fixture.by_name("competitionForm", "end_date").set_value("2026-04-12");
    fixture
        .by_name("competitionForm", "registration_deadline")
        .set_value("2026-02-01");

    assert_eq!(page.submit(&form), Submission::Cancel);

    fixture.dialogs.answer_next(true);
    assert_eq!(page.submit(&form), Submission::Proceed);

    assert_eq!(fixture.dialogs.confirms().len(), 2);
    assert!(fixture.dialogs.alerts().is_empty());
}

#[test]
fn test_excluded_form_always_proceeds() {
    let fixture = Fixture::new();
    let page = fixture.page();

    assert_eq!(page.submit(&fixture.by_id("AddEventForm")), Submission::Proceed);
    assert!(fixture.dialogs.alerts().is_empty());
}

#[test]
fn test_navigation_toggle() {
    let fixture = Fixture::new();
    let page = fixture.page();

    page.navigation.toggle();
    assert!(page.navigation.is_open());
    page.navigation.close();
    assert!(!page.navigation.is_open());
}

#[tokio::test]
async fn test_club_dropdown_then_register() {
    let fixture = Fixture::new();
    let page = fixture.page();
    let dropdown = page.clubs.as_ref().unwrap();
    let lg = fixture.by_id("local_government");
    let club = fixture.by_id("club");

    lg.set_value("LG1");
    dropdown.on_change().await;
    let labels: Vec<_> = club.options().into_iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["Select Club", "ClubA", "ClubB"]);
    assert!(!club.is_disabled());

    // Placeholder selected: the required club field blocks submission.
    let form = fixture.by_id("registerPlayer");
    assert_eq!(page.submit(&form), Submission::Cancel);
    assert_eq!(club.style("border-color").as_deref(), Some("#ef4444"));

    club.set_value("ClubB");
    assert_eq!(page.submit(&form), Submission::Proceed);
    assert!(club.style("border-color").is_none());

    lg.set_value("LG9");
    dropdown.on_change().await;
    assert_eq!(club.options()[0].label, "Error loading clubs");
    assert!(club.is_disabled());
}

#[tokio::test]
async fn test_image_preview() {
    let fixture = Fixture::new();
    let page = fixture.page();
    let input = page.previews[0].input().clone();
    input.set_attribute("data-file", "iVBORw0KGgo=");

    assert_eq!(page.previews[0].on_change().await, PreviewOutcome::Shown);
    let img = fixture.by_id("photoPreview");
    assert_eq!(img.attribute("src").as_deref(), Some("data:image/png;base64,iVBORw0KGgo="));
    assert_eq!(img.style("display").as_deref(), Some("block"));
}

#[tokio::test(start_paused = true)]
async fn test_flash_messages_removed_on_schedule() {
    let fixture = Fixture::new();
    let mut page = fixture.page();
    let start = tokio::time::Instant::now();

    let outcomes =
        futures::future::join_all(page.take_flash_messages().into_iter().map(|d| d.run())).await;

    assert_eq!(outcomes, vec![FlashOutcome::Removed]);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(5000));
    assert!(elapsed <= Duration::from_millis(5500));
    assert!(fixture.doc.query_selector(".flash-message").is_none());
    assert!(page.flash_messages.is_empty());
}

#[test]
fn test_page_config_overrides() {
    let fixture = Fixture::new();
    let script = fixture.doc.body().append(
        "script",
        &[("id", "tamaula-config"), ("type", "application/json")],
    );
    script.set_text(r#"{ "required": { "excluded_form_id": "registerPlayer" } }"#);

    let config = load_config(&fixture.doc).unwrap();
    assert_eq!(config.required.excluded_form_id, "registerPlayer");
    assert_eq!(config.flash.fade_delay_ms, 5000);

    script.set_text("{ broken");
    assert!(load_config(&fixture.doc).is_err());
}
