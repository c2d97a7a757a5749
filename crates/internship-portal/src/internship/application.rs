use serde::{Deserialize, Serialize};

/// In-progress application form. Field names follow the page's camelCase form model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
}

/// One editable input of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    Position,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Position,
    ];

    /// Label printed beside the input on the page.
    pub fn label(self) -> &'static str {
        match self {
            DraftField::FirstName => "Name",
            DraftField::LastName => "Surname",
            DraftField::Email => "Gmail",
            DraftField::Position => "Position",
        }
    }

    /// Column name in the applications table.
    pub fn column(self) -> &'static str {
        match self {
            DraftField::FirstName => "first_name",
            DraftField::LastName => "last_name",
            DraftField::Email => "email",
            DraftField::Position => "position",
        }
    }
}

impl ApplicationDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Position => &self.position,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::FirstName => self.first_name = value,
            DraftField::LastName => self.last_name = value,
            DraftField::Email => self.email = value,
            DraftField::Position => self.position = value,
        }
    }

    /// Required inputs that are still empty. Whitespace counts as a value.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        DraftField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot sent to the applications table. Values are sent as typed.
    pub fn to_row(&self) -> ApplicationRow {
        ApplicationRow {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
        }
    }
}

/// Row inserted into the applications table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
}

/// Result of pressing the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The row was inserted; the confirmation dialog is open and the form cleared.
    Submitted,
    /// The insert failed; an error notification was raised and the form kept.
    Failed,
    /// A submission is already in flight; nothing was sent.
    Busy,
    /// Required inputs are blank; nothing was sent.
    Incomplete(Vec<DraftField>),
}
