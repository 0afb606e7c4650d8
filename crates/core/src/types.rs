use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Selections ─────────────────────────────────────────────────────────────

/// Values a user has already submitted for a multi-step form, keyed by
/// field name. Blank values count as not chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState(HashMap<String, String>);

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests.
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: &str) {
        self.0.insert(field.to_string(), value.to_string());
    }

    /// The submitted value for `field`, or `None` when absent or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }
}

impl FromIterator<(String, String)> for SelectionState {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single form request from the action hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRequest {
    /// Correlation id attached to every log event for this request.
    pub webhook_id: String,
    #[serde(default)]
    pub form_params: SelectionState,
    /// Where the hub wants the user sent back after the OAuth hop.
    #[serde(default)]
    pub state_url: Option<String>,
}

impl FormRequest {
    pub fn new(form_params: SelectionState) -> Self {
        Self {
            webhook_id: Uuid::new_v4().to_string(),
            form_params,
            state_url: None,
        }
    }

    pub fn with_webhook_id(mut self, webhook_id: impl Into<String>) -> Self {
        self.webhook_id = webhook_id.into();
        self
    }

    pub fn with_state_url(mut self, state_url: impl Into<String>) -> Self {
        self.state_url = Some(state_url.into());
        self
    }
}

// ─── Remote Entities ────────────────────────────────────────────────────────

/// An `{id, name}` pair returned by the ad platform, used for both ad
/// accounts and custom audiences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntity {
    pub id: String,
    pub name: String,
}

impl RemoteEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ─── Form Schema ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Select,
    String,
    OauthLink,
}

/// One selectable option: `name` is the machine value, `label` is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOption {
    pub name: String,
    pub label: String,
}

impl FormOption {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub interactive: bool,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Vec<FormOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_url: Option<String>,
}

impl FormField {
    /// A required single-select field.
    pub fn select(name: &str, label: impl Into<String>, options: Vec<FormOption>) -> Self {
        Self {
            name: name.to_string(),
            label: label.into(),
            description: None,
            required: true,
            interactive: false,
            field_type: FieldType::Select,
            options,
            default: None,
            oauth_url: None,
        }
    }

    /// A required free-text field.
    pub fn text(name: &str, label: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::String,
            ..Self::select(name, label, Vec::new())
        }
    }

    pub fn oauth_link(name: &str, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            required: false,
            field_type: FieldType::OauthLink,
            oauth_url: Some(url.into()),
            ..Self::select(name, label, Vec::new())
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn default_to(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }
}

/// Opaque state handed back to the hub alongside a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub data: String,
}

impl FormState {
    pub fn reset() -> Self {
        Self {
            data: "reset".to_string(),
        }
    }
}

/// A generated form, serializable to the action hub's form schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionForm {
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<FormState>,
}

impl ActionForm {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

// ─── OAuth State ────────────────────────────────────────────────────────────

/// Plaintext carried inside the encrypted OAuth `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    #[serde(rename = "stateUrl")]
    pub state_url: String,
}
