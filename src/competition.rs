//! Competition date validation.
//!
//! The competition-creation form carries a start date, an end date and a
//! registration deadline. Submission is blocked when the dates contradict
//! each other and needs explicit confirmation when the deadline has already
//! passed.
//!
//! Checks always run in this order, and the first one that fires decides:
//!
//! 1. start on or after end: rejected
//! 2. deadline after start: rejected
//! 3. deadline already passed: confirmation required

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::Submission;
use crate::config::CompetitionConfig;
use crate::dom::{Document, Element};
use crate::services::{Clock, Dialogs};

/// A hard rule the dates broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    EndNotAfterStart,
    DeadlineAfterStart,
}

/// Outcome of [`check_dates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateVerdict {
    Accept,
    Reject(DateRule),
    /// Dates are consistent but the deadline is already in the past.
    ConfirmPastDeadline,
}

/// The three dates of a competition, `None` where a field is missing or
/// unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompetitionDates {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDateTime>,
}

impl CompetitionDates {
    pub fn parse(start: &str, end: &str, deadline: &str) -> Self {
        Self {
            start: parse_date_input(start),
            end: parse_date_input(end),
            deadline: parse_date_input(deadline),
        }
    }
}

/// Parse the value of a `date` or `datetime-local` input.
///
/// A bare date means midnight.
pub fn parse_date_input(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Check the dates against each other and against `now`.
///
/// A missing date makes every comparison it takes part in false. A date-only
/// deadline means midnight, so a deadline of today has already passed.
pub fn check_dates(dates: &CompetitionDates, now: NaiveDateTime) -> DateVerdict {
    if let (Some(start), Some(end)) = (dates.start, dates.end) {
        if start >= end {
            return DateVerdict::Reject(DateRule::EndNotAfterStart);
        }
    }

    if let (Some(deadline), Some(start)) = (dates.deadline, dates.start) {
        if deadline > start {
            return DateVerdict::Reject(DateRule::DeadlineAfterStart);
        }
    }

    match dates.deadline {
        Some(deadline) if deadline < now => DateVerdict::ConfirmPastDeadline,
        _ => DateVerdict::Accept,
    }
}

/// Submit handler for the competition-creation form.
#[derive(Debug, Clone)]
pub struct CompetitionForm<E> {
    form: E,
    config: CompetitionConfig,
}

impl<E: Element> CompetitionForm<E> {
    pub fn new(form: E, config: CompetitionConfig) -> Self {
        Self { form, config }
    }

    /// Locate the form, if this page has one.
    pub fn find<D>(doc: &D, config: &CompetitionConfig) -> Option<Self>
    where
        D: Document<Element = E>,
    {
        doc.element_by_id(&config.form_id)
            .map(|form| Self::new(form, config.clone()))
    }

    pub fn form(&self) -> &E {
        &self.form
    }

    /// Read the three date fields.
    pub fn dates(&self) -> CompetitionDates {
        let read = |name: &str| self.form.field(name).map(|f| f.value()).unwrap_or_default();
        CompetitionDates::parse(
            &read(&self.config.start_field),
            &read(&self.config.end_field),
            &read(&self.config.deadline_field),
        )
    }

    /// Validate on submit, alerting or asking for confirmation as needed.
    pub fn submit(&self, dialogs: &dyn Dialogs, clock: &dyn Clock) -> Submission {
        let verdict = check_dates(&self.dates(), clock.now());
        tracing::debug!(
            name: "ui.competition.checked",
            verdict = ?verdict,
            "Competition dates checked"
        );

        match verdict {
            DateVerdict::Accept => Submission::Proceed,
            DateVerdict::Reject(DateRule::EndNotAfterStart) => {
                dialogs.alert(&self.config.end_before_start_message);
                Submission::Cancel
            }
            DateVerdict::Reject(DateRule::DeadlineAfterStart) => {
                dialogs.alert(&self.config.deadline_after_start_message);
                Submission::Cancel
            }
            DateVerdict::ConfirmPastDeadline => {
                if dialogs.confirm(&self.config.deadline_in_past_message) {
                    Submission::Proceed
                } else {
                    Submission::Cancel
                }
            }
        }
    }
}
