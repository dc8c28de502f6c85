//! UI configuration.
//!
//! Every element id, selector, label and delay the page layer relies on lives
//! here. The defaults match the server-rendered templates; a page can override
//! any subset of keys by embedding a JSON object (see [`UiConfig::load`]).

use std::time::Duration;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Id of the `<script type="application/json">` element carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "tamaula-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// `tracing` filter directives, e.g. `info` or `tamaula_ui=debug`.
    pub log_filter: String,
    pub competition: CompetitionConfig,
    pub navigation: NavigationConfig,
    pub clubs: ClubsConfig,
    pub required: RequiredConfig,
    pub preview: PreviewConfig,
    pub flash: FlashConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionConfig {
    pub form_id: String,
    pub start_field: String,
    pub end_field: String,
    pub deadline_field: String,
    pub end_before_start_message: String,
    pub deadline_after_start_message: String,
    pub deadline_in_past_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    pub trigger_selector: String,
    pub menu_selector: String,
    pub link_selector: String,
    pub active_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubsConfig {
    pub primary_id: String,
    pub dependent_id: String,
    /// Path prefix; the selected value is appended as one encoded segment.
    pub endpoint: String,
    pub loading_label: String,
    pub placeholder_label: String,
    pub empty_label: String,
    pub error_label: String,
    pub prompt_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredConfig {
    pub form_selector: String,
    pub field_selector: String,
    /// Form id that opts out of required-field validation.
    pub excluded_form_id: String,
    pub invalid_border_color: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub input_selector: String,
    pub target_attribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashConfig {
    pub selector: String,
    pub fade_delay_ms: u64,
    pub removal_delay_ms: u64,
}

impl FlashConfig {
    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            competition: CompetitionConfig {
                form_id: "competitionForm".into(),
                start_field: "start_date".into(),
                end_field: "end_date".into(),
                deadline_field: "registration_deadline".into(),
                end_before_start_message: "End date must be after start date.".into(),
                deadline_after_start_message: "Registration deadline must be before start date."
                    .into(),
                deadline_in_past_message: "Registration deadline is in the past. Continue anyway?"
                    .into(),
            },
            navigation: NavigationConfig {
                trigger_selector: ".hamburger".into(),
                menu_selector: ".nav-menu".into(),
                link_selector: ".nav-link".into(),
                active_class: "active".into(),
            },
            clubs: ClubsConfig {
                primary_id: "local_government".into(),
                dependent_id: "club".into(),
                endpoint: "/get_clubs/".into(),
                loading_label: "Loading clubs...".into(),
                placeholder_label: "Select Club".into(),
                empty_label: "No clubs found in this area".into(),
                error_label: "Error loading clubs".into(),
                prompt_label: "Select Local Government first".into(),
            },
            required: RequiredConfig {
                form_selector: "form".into(),
                field_selector: "[required]".into(),
                excluded_form_id: "AddEventForm".into(),
                invalid_border_color: "#ef4444".into(),
                message: "Please fill in all required fields.".into(),
            },
            preview: PreviewConfig {
                input_selector: "input[type=\"file\"]".into(),
                target_attribute: "data-preview".into(),
            },
            flash: FlashConfig {
                selector: ".flash-message".into(),
                fade_delay_ms: 5000,
                removal_delay_ms: 500,
            },
        }
    }
}

impl UiConfig {
    /// Build the configuration from the defaults, layering `overrides` (a
    /// partial JSON object) on top when given.
    pub fn load(overrides: Option<&str>) -> Result<Self, config::ConfigError> {
        // 1. Defaults
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        // 2. Page-provided overrides
        if let Some(json) = overrides.filter(|s| !s.trim().is_empty()) {
            builder = builder.add_source(File::from_str(json, FileFormat::Json));
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_overrides_is_default() {
        let config = UiConfig::load(None).unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = UiConfig::load(Some("  \n")).unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "flash": { "fade_delay_ms": 2000 }, "clubs": { "endpoint": "/api/clubs/" } }"#;
        let config = UiConfig::load(Some(json)).unwrap();

        assert_eq!(config.flash.fade_delay(), Duration::from_secs(2));
        assert_eq!(config.flash.removal_delay(), Duration::from_millis(500));
        assert_eq!(config.clubs.endpoint, "/api/clubs/");
        assert_eq!(config.clubs.primary_id, "local_government");
        assert_eq!(config.required, UiConfig::default().required);
    }

    #[test]
    fn test_malformed_overrides_fail() {
        assert!(UiConfig::load(Some("{ not json")).is_err());
    }
}
