use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DraftError, UnknownCategory};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(ResolutionId);

pub const MAX_PROGRESS: u8 = 100;

/// Clamps raw slider/CLI input into the `0..=100` progress range.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_PROGRESS)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Health,
    Wealth,
    Tech,
    Growth,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Health,
        Category::Wealth,
        Category::Tech,
        Category::Growth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Wealth => "Wealth",
            Category::Tech => "Tech",
            Category::Growth => "Growth",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: ResolutionId,
    pub title: String,
    pub category: Category,
    pub progress: u8,
    pub why: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resolution {
    pub fn draft(&self) -> ResolutionDraft {
        ResolutionDraft {
            title: self.title.clone(),
            category: self.category,
            progress: self.progress,
            why: self.why.clone(),
        }
    }
}

/// User-editable fields of a resolution; the store owns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDraft {
    pub title: String,
    pub category: Category,
    pub progress: u8,
    pub why: String,
}

impl ResolutionDraft {
    pub fn new(
        title: impl Into<String>,
        category: Category,
        progress: u8,
        why: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            progress: progress.min(MAX_PROGRESS),
            why: why.into(),
        }
    }

    /// Required-field presence only; lengths and content are not checked.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.why.trim().is_empty() {
            return Err(DraftError::MissingWhy);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub total: usize,
    pub average_progress: u8,
}

impl BoardStats {
    pub fn from_resolutions(resolutions: &[Resolution]) -> Self {
        let total = resolutions.len();
        if total == 0 {
            return Self::default();
        }

        let sum: u64 = resolutions.iter().map(|r| u64::from(r.progress)).sum();
        let count = total as u64;
        // Halves round up, matching round(sum / count) for non-negative input.
        let average = (2 * sum + count) / (2 * count);

        Self {
            total,
            average_progress: average.min(u64::from(MAX_PROGRESS)) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution_with_progress(id: &str, progress: u8) -> Resolution {
        let now = Utc::now();
        Resolution {
            id: ResolutionId::from(id),
            title: format!("goal {id}"),
            category: Category::Tech,
            progress,
            why: "because".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stats_for_empty_snapshot_are_zero() {
        let stats = BoardStats::from_resolutions(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_progress, 0);
    }

    #[test]
    fn stats_average_rounds_to_nearest_integer() {
        let snapshot = vec![
            resolution_with_progress("a", 10),
            resolution_with_progress("b", 20),
            resolution_with_progress("c", 25),
        ];
        // 55 / 3 = 18.33
        assert_eq!(BoardStats::from_resolutions(&snapshot).average_progress, 18);

        let snapshot = vec![
            resolution_with_progress("a", 0),
            resolution_with_progress("b", 1),
        ];
        // 0.5 rounds up
        let stats = BoardStats::from_resolutions(&snapshot);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_progress, 1);

        let snapshot = vec![
            resolution_with_progress("a", 33),
            resolution_with_progress("b", 34),
            resolution_with_progress("c", 34),
        ];
        // 101 / 3 = 33.67
        assert_eq!(BoardStats::from_resolutions(&snapshot).average_progress, 34);
    }

    #[test]
    fn category_round_trips_through_wire_names() {
        let json = serde_json::to_string(&Category::Wealth).expect("serialize");
        assert_eq!(json, "\"Wealth\"");
        let parsed: Category = serde_json::from_str("\"Growth\"").expect("deserialize");
        assert_eq!(parsed, Category::Growth);
        assert!(serde_json::from_str::<Category>("\"growth\"").is_err());
    }

    #[test]
    fn category_parses_case_insensitively_from_text() {
        assert_eq!("tech".parse::<Category>().expect("tech"), Category::Tech);
        assert_eq!(" HEALTH ".parse::<Category>().expect("health"), Category::Health);
        let err = "hobby".parse::<Category>().expect_err("unknown");
        assert_eq!(err, UnknownCategory("hobby".to_string()));
    }

    #[test]
    fn draft_validation_checks_required_fields_only() {
        let draft = ResolutionDraft::new("Run a marathon", Category::Health, 0, "stay fit");
        assert!(draft.validate().is_ok());

        let missing_title = ResolutionDraft::new("   ", Category::Health, 0, "stay fit");
        assert_eq!(missing_title.validate(), Err(DraftError::MissingTitle));

        let missing_why = ResolutionDraft::new("Read more", Category::Growth, 5, "");
        assert_eq!(missing_why.validate(), Err(DraftError::MissingWhy));
    }

    #[test]
    fn clamp_progress_bounds_input() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(42), 42);
        assert_eq!(clamp_progress(250), 100);
    }

    #[test]
    fn resolution_decodes_store_row() {
        let row = serde_json::json!({
            "id": "8b5c7f3e-1d2a-4e8b-9a61-0f2d3c4b5a69",
            "title": "Ship side project",
            "category": "Tech",
            "progress": 35,
            "why": "finish what I start",
            "created_at": "2026-01-02T09:30:00.123456+00:00",
            "updated_at": "2026-01-05T18:00:00+00:00"
        });
        let resolution: Resolution = serde_json::from_value(row).expect("decode row");
        assert_eq!(resolution.id.0, "8b5c7f3e-1d2a-4e8b-9a61-0f2d3c4b5a69");
        assert_eq!(resolution.category, Category::Tech);
        assert_eq!(resolution.progress, 35);
        assert!(resolution.updated_at > resolution.created_at);
    }
}
