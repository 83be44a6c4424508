use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tracked applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle status recorded against an application.
///
/// `NoOffer` is a synthetic terminal label used by funnel reporting; the
/// persistence layer refuses to store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Applied,
    Screen,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
    Ghosted,
    NoOffer,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Applied,
            Self::Screen,
            Self::Interview,
            Self::Offer,
            Self::Rejected,
            Self::Withdrawn,
            Self::Ghosted,
            Self::NoOffer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::Screen => "SCREEN",
            Self::Interview => "INTERVIEW",
            Self::Offer => "OFFER",
            Self::Rejected => "REJECTED",
            Self::Withdrawn => "WITHDRAWN",
            Self::Ghosted => "GHOSTED",
            Self::NoOffer => "NOOFFER",
        }
    }

    /// Employer engaged with the application in some way.
    pub const fn is_response_signal(self) -> bool {
        matches!(self, Self::Rejected | Self::Screen | Self::Interview)
    }

    pub const fn is_interview_signal(self) -> bool {
        matches!(self, Self::Screen | Self::Interview)
    }

    /// Whether the status may be stored on a real application.
    pub const fn is_persistable(self) -> bool {
        !matches!(self, Self::NoOffer)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dated status change. Histories may hold duplicates and carry no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub occur_date: NaiveDate,
    pub status: ApplicationStatus,
}

impl StatusEvent {
    pub fn new(occur_date: NaiveDate, status: ApplicationStatus) -> Self {
        Self { occur_date, status }
    }
}

/// Free-form dated note kept alongside an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNote {
    pub occur_date: NaiveDate,
    pub description: String,
}

/// Stored job application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: ApplicationId,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub top_job: bool,
    #[serde(rename = "status", default)]
    pub status_history: Vec<StatusEvent>,
    #[serde(default)]
    pub source_page: String,
    #[serde(default)]
    pub review_page: String,
    #[serde(default)]
    pub login_hints: String,
    #[serde(default)]
    pub recruiter_name: String,
    #[serde(default)]
    pub recruiter_company: String,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub notes: Vec<ApplicationNote>,
}

impl JobApplication {
    pub fn has_status(&self, status: ApplicationStatus) -> bool {
        self.status_history.iter().any(|event| event.status == status)
    }

    /// Most recent status by event date, if any events were recorded.
    pub fn latest_status(&self) -> Option<ApplicationStatus> {
        self.status_history
            .iter()
            .max_by_key(|event| (event.occur_date, event.status))
            .map(|event| event.status)
    }
}

/// Payload accepted when creating an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub top_job: bool,
    #[serde(rename = "status", default)]
    pub status_history: Vec<StatusEvent>,
    #[serde(default)]
    pub source_page: String,
    #[serde(default)]
    pub review_page: String,
    #[serde(default)]
    pub login_hints: String,
    #[serde(default)]
    pub recruiter_name: String,
    #[serde(default)]
    pub recruiter_company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Vec<ApplicationNote>,
}

impl ApplicationDraft {
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, occur_date: NaiveDate, status: ApplicationStatus) -> Self {
        self.status_history.push(StatusEvent::new(occur_date, status));
        self
    }

    /// Builds the stored record. An empty history is seeded with a single
    /// `APPLIED` event on the applied date.
    pub fn into_application(self, id: ApplicationId, today: NaiveDate) -> JobApplication {
        let applied_date = self.applied_date.unwrap_or(today);
        let status_history = if self.status_history.is_empty() {
            vec![StatusEvent::new(applied_date, ApplicationStatus::Applied)]
        } else {
            self.status_history
        };

        JobApplication {
            id,
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
            description: self.description,
            salary: self.salary,
            top_job: self.top_job,
            status_history,
            source_page: self.source_page,
            review_page: self.review_page,
            login_hints: self.login_hints,
            recruiter_name: self.recruiter_name,
            recruiter_company: self.recruiter_company,
            applied_date,
            notes: self.notes,
        }
    }
}

/// Partial update; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_job: Option<bool>,
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub status_history: Option<Vec<StatusEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_hints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<ApplicationNote>>,
}

impl ApplicationPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(self, application: &mut JobApplication) {
        if let Some(company) = self.company {
            application.company = company.trim().to_string();
        }
        if let Some(role) = self.role {
            application.role = role.trim().to_string();
        }
        if let Some(description) = self.description {
            application.description = description;
        }
        if let Some(salary) = self.salary {
            application.salary = salary;
        }
        if let Some(top_job) = self.top_job {
            application.top_job = top_job;
        }
        if let Some(history) = self.status_history {
            application.status_history = history;
        }
        if let Some(source_page) = self.source_page {
            application.source_page = source_page;
        }
        if let Some(review_page) = self.review_page {
            application.review_page = review_page;
        }
        if let Some(login_hints) = self.login_hints {
            application.login_hints = login_hints;
        }
        if let Some(recruiter_name) = self.recruiter_name {
            application.recruiter_name = recruiter_name;
        }
        if let Some(recruiter_company) = self.recruiter_company {
            application.recruiter_company = recruiter_company;
        }
        if let Some(notes) = self.notes {
            application.notes = notes;
        }
    }
}
