//! Named weekly time templates.
//!
//! A template bundles a list of merged ranges with an IANA timezone and a
//! category, so access rules can refer to "business hours" instead of
//! repeating the same ranges. The system ships a fixed set of built-in
//! templates, one per non-custom category.

use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::{TimeOfDay, Weekday};
use crate::error::{Result, WeektimeError};
use crate::range::MergedRange;
use crate::split::normalize_time_ranges;

/// Timezone used when a template does not name one.
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// What a template is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Work,
    Duty,
    Maintenance,
    Emergency,
    Always,
    Custom,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 6] = [
        TemplateCategory::Work,
        TemplateCategory::Duty,
        TemplateCategory::Maintenance,
        TemplateCategory::Emergency,
        TemplateCategory::Always,
        TemplateCategory::Custom,
    ];

    /// Wire name, e.g. `"maintenance"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateCategory::Work => "work",
            TemplateCategory::Duty => "duty",
            TemplateCategory::Maintenance => "maintenance",
            TemplateCategory::Emergency => "emergency",
            TemplateCategory::Always => "always",
            TemplateCategory::Custom => "custom",
        }
    }

    /// Display name shown next to the category.
    pub fn label(self) -> &'static str {
        match self {
            TemplateCategory::Work => "Work Time",
            TemplateCategory::Duty => "Duty Time",
            TemplateCategory::Maintenance => "Maintenance Time",
            TemplateCategory::Emergency => "Emergency Response",
            TemplateCategory::Always => "All Time",
            TemplateCategory::Custom => "Other",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateCategory {
    type Err = WeektimeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| WeektimeError::InvalidTemplate(format!("unknown category '{s}'")))
    }
}

/// A named, reusable set of weekly access windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    pub time_ranges: Vec<MergedRange>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl TimeTemplate {
    /// A template in the default timezone.
    pub fn new(
        name: impl Into<String>,
        category: TemplateCategory,
        time_ranges: Vec<MergedRange>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            time_ranges,
            timezone: default_timezone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Check that the template can be stored and applied.
    ///
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidTemplate`] for a blank name or an empty
    /// range list, and [`WeektimeError::InvalidTimezone`] if `timezone` is not
    /// an IANA timezone name.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WeektimeError::InvalidTemplate(
                "name must not be empty".to_string(),
            ));
        }
        if self.time_ranges.is_empty() {
            return Err(WeektimeError::InvalidTemplate(format!(
                "'{}' has no time ranges",
                self.name
            )));
        }
        self.tz().map(|_| ())
    }

    /// The parsed timezone.
    ///
    /// # Errors
    ///
    /// Returns [`WeektimeError::InvalidTimezone`] if `timezone` is not an IANA name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| WeektimeError::InvalidTimezone(format!("'{}'", self.timezone)))
    }

    /// A copy whose ranges are in canonical merged form.
    pub fn normalized(&self) -> Self {
        Self {
            time_ranges: normalize_time_ranges(&self.time_ranges),
            ..self.clone()
        }
    }
}

// ── Built-in templates ──────────────────────────────────────────────────────

/// The templates shipped with the system, one per non-custom category.
pub fn builtin_templates() -> Vec<TimeTemplate> {
    const WEEKDAYS: &[Weekday] = &[
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];
    const WEEKEND: &[Weekday] = &[Weekday::Saturday, Weekday::Sunday];

    vec![
        builtin(
            "Business Hours",
            "Standard business hours: Monday to Friday 9:00-18:00",
            TemplateCategory::Work,
            builtin_range(
                WEEKDAYS,
                const { TimeOfDay::at_hour(9) },
                const { TimeOfDay::at_hour(18) },
            ),
        ),
        builtin(
            "Weekend Duty",
            "Weekend duty hours: Saturday and Sunday 10:00-16:00",
            TemplateCategory::Duty,
            builtin_range(
                WEEKEND,
                const { TimeOfDay::at_hour(10) },
                const { TimeOfDay::at_hour(16) },
            ),
        ),
        builtin(
            "Maintenance Window",
            "System maintenance window: Sunday 2:00-6:00",
            TemplateCategory::Maintenance,
            builtin_range(
                &[Weekday::Sunday],
                const { TimeOfDay::at_hour(2) },
                const { TimeOfDay::at_hour(6) },
            ),
        ),
        builtin(
            "24x7 Access",
            "24x7 around the clock access",
            TemplateCategory::Always,
            MergedRange {
                weekdays: Weekday::ALL.to_vec(),
                start_time: TimeOfDay::MIDNIGHT,
                end_time: TimeOfDay::DAY_END,
            },
        ),
        builtin(
            "Emergency Response",
            "Emergency response hours: weekdays 18:00-22:00",
            TemplateCategory::Emergency,
            builtin_range(
                WEEKDAYS,
                const { TimeOfDay::at_hour(18) },
                const { TimeOfDay::at_hour(22) },
            ),
        ),
    ]
}

/// The built-in template of a category, if there is one.
pub fn builtin_template(category: TemplateCategory) -> Option<TimeTemplate> {
    builtin_templates()
        .into_iter()
        .find(|t| t.category == category)
}

fn builtin(
    name: &str,
    description: &str,
    category: TemplateCategory,
    range: MergedRange,
) -> TimeTemplate {
    TimeTemplate::new(name, category, vec![range]).with_description(description)
}

fn builtin_range(
    weekdays: &[Weekday],
    start_time: TimeOfDay,
    end_time: TimeOfDay,
) -> MergedRange {
    MergedRange {
        weekdays: weekdays.to_vec(),
        start_time,
        end_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_cover_every_fixed_category() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 5);
        for category in TemplateCategory::ALL {
            let found = builtin_template(category);
            assert_eq!(found.is_some(), category != TemplateCategory::Custom);
        }
    }

    #[test]
    fn test_builtins_validate() {
        for template in builtin_templates() {
            template.validate().unwrap();
            assert_eq!(template.timezone, DEFAULT_TIMEZONE);
        }
    }

    #[test]
    fn test_builtins_are_already_normalized() {
        for template in builtin_templates() {
            assert_eq!(template.normalized(), template, "{}", template.name);
        }
    }

    #[test]
    fn test_business_hours_shape() {
        let work = builtin_template(TemplateCategory::Work).unwrap();
        let json = serde_json::to_value(&work.time_ranges).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"weekdays": [1, 2, 3, 4, 5], "start_time": "09:00", "end_time": "18:00"}
            ])
        );
    }

    #[test]
    fn test_builtin_windows() {
        let windows: Vec<(TemplateCategory, String)> = builtin_templates()
            .iter()
            .map(|t| {
                let r = &t.time_ranges[0];
                (t.category, format!("{} {}~{}", r.weekday_key(), r.start_time, r.end_time))
            })
            .collect();
        assert_eq!(
            windows,
            [
                (TemplateCategory::Work, "1,2,3,4,5 09:00~18:00".to_string()),
                (TemplateCategory::Duty, "6,7 10:00~16:00".to_string()),
                (TemplateCategory::Maintenance, "7 02:00~06:00".to_string()),
                (TemplateCategory::Always, "1,2,3,4,5,6,7 00:00~23:59".to_string()),
                (TemplateCategory::Emergency, "1,2,3,4,5 18:00~22:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_always_template_ends_at_day_end() {
        let always = builtin_template(TemplateCategory::Always).unwrap();
        assert_eq!(always.time_ranges[0].end_time.to_string(), "23:59");
        assert_eq!(always.time_ranges[0].weekdays.len(), 7);
    }

    #[test]
    fn test_validate_rejects_unknown_timezone() {
        let template = builtin_template(TemplateCategory::Duty)
            .unwrap()
            .with_timezone("Mars/Olympus_Mons");
        let err = template.validate().unwrap_err().to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_blank_name_and_no_ranges() {
        let blank = TimeTemplate::new("  ", TemplateCategory::Custom, vec![]);
        assert!(blank.validate().is_err());

        let empty = TimeTemplate::new("On call", TemplateCategory::Custom, vec![]);
        let err = empty.validate().unwrap_err().to_string();
        assert!(err.contains("no time ranges"), "got: {err}");
    }

    #[test]
    fn test_category_parse_and_labels() {
        assert_eq!(
            "Maintenance".parse::<TemplateCategory>().unwrap(),
            TemplateCategory::Maintenance
        );
        assert!("holiday".parse::<TemplateCategory>().is_err());
        assert_eq!(TemplateCategory::Always.label(), "All Time");
        assert_eq!(TemplateCategory::Custom.label(), "Other");
    }

    #[test]
    fn test_deserialize_defaults_timezone() {
        let template: TimeTemplate = serde_json::from_str(
            r#"{
                "name": "Night shift",
                "category": "custom",
                "time_ranges": [
                    {"weekdays": [1], "start_time": "22:00", "end_time": "23:59"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(template.timezone, DEFAULT_TIMEZONE);
        assert_eq!(template.description, "");
        template.validate().unwrap();
    }

    #[test]
    fn test_normalized_merges_fragmented_ranges() {
        let ranges: Vec<MergedRange> = serde_json::from_str(
            r#"[
                {"weekdays": [6], "start_time": "10:00", "end_time": "12:00"},
                {"weekdays": [6], "start_time": "12:00", "end_time": "16:00"}
            ]"#,
        )
        .unwrap();
        let template = TimeTemplate::new("Saturday", TemplateCategory::Duty, ranges).normalized();
        assert_eq!(template.time_ranges.len(), 1);
        assert_eq!(template.time_ranges[0].start_time.to_string(), "10:00");
        assert_eq!(template.time_ranges[0].end_time.to_string(), "16:00");
    }
}
