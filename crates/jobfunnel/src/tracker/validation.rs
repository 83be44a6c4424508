use super::domain::{ApplicationDraft, ApplicationNote, ApplicationPatch, ApplicationStatus, StatusEvent};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_SALARY_LENGTH: usize = 100;

/// Reasons the persistence layer refuses a create or update payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("{field} exceeds {max} characters (found {found})")]
    TooLong {
        field: &'static str,
        max: usize,
        found: usize,
    },
    #[error("note descriptions must not be blank")]
    BlankNote,
    #[error("status {0} cannot be stored on an application")]
    SyntheticStatus(ApplicationStatus),
    #[error("rejected by server: {0}")]
    Rejected(String),
}

pub fn validate_draft(draft: &ApplicationDraft) -> Result<(), ValidationError> {
    check_name("company", &draft.company)?;
    check_name("role", &draft.role)?;
    check_salary(&draft.salary)?;
    check_history(&draft.status_history)?;
    check_notes(&draft.notes)
}

pub fn validate_patch(patch: &ApplicationPatch) -> Result<(), ValidationError> {
    if let Some(company) = &patch.company {
        check_name("company", company)?;
    }
    if let Some(role) = &patch.role {
        check_name("role", role)?;
    }
    if let Some(salary) = &patch.salary {
        check_salary(salary)?;
    }
    if let Some(history) = &patch.status_history {
        check_history(history)?;
    }
    if let Some(notes) = &patch.notes {
        check_notes(notes)?;
    }
    Ok(())
}

fn check_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }

    let found = trimmed.chars().count();
    if found > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
            found,
        });
    }
    Ok(())
}

fn check_salary(value: &str) -> Result<(), ValidationError> {
    let found = value.trim().chars().count();
    if found > MAX_SALARY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "salary",
            max: MAX_SALARY_LENGTH,
            found,
        });
    }
    Ok(())
}

fn check_history(history: &[StatusEvent]) -> Result<(), ValidationError> {
    match history.iter().find(|event| !event.status.is_persistable()) {
        Some(event) => Err(ValidationError::SyntheticStatus(event.status)),
        None => Ok(()),
    }
}

fn check_notes(notes: &[ApplicationNote]) -> Result<(), ValidationError> {
    if notes.iter().any(|note| note.description.trim().is_empty()) {
        return Err(ValidationError::BlankNote);
    }
    Ok(())
}
