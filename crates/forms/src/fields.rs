//! Field names, option values, and the fixed field definitions of the
//! custom audiences destination form.

use audience_core::types::{FormField, FormOption};
use serde::{Deserialize, Serialize};

pub const CHOOSE_AD_ACCOUNT: &str = "choose_ad_account";
pub const CHOOSE_CREATE_UPDATE_REPLACE: &str = "choose_create_update_replace";
pub const CREATE_AUDIENCE_NAME: &str = "create_audience_name";
pub const CREATE_AUDIENCE_DESCRIPTION: &str = "create_audience_description";
pub const CHOOSE_CUSTOM_AUDIENCE: &str = "choose_custom_audience";
pub const SHOULD_HASH: &str = "should_hash";
pub const LOGIN: &str = "login";

const MODE_DESCRIPTION: &str =
    "Updating appends users. Replacing first deletes all users from the audience then appends users.";
const REPLACE_WARNING: &str =
    "Replacing first deletes all users from the audience then appends users.";
const NO_AUDIENCES: &str = "You have no custom audiences for this ad account. \
     You can create one by selecting \"Create new audience\" above.";
const HASHING_DESCRIPTION: &str = "Yes is appropriate for most users. \
     Only select No if you know your data has already been hashed.";

// ─── Audience Action ────────────────────────────────────────────────────────

/// What to do with the audience: the stage-1 answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudienceAction {
    #[serde(rename = "create_audience")]
    Create,
    #[serde(rename = "update_audience")]
    Update,
    #[serde(rename = "replace_audience")]
    Replace,
}

impl AudienceAction {
    pub const ALL: [AudienceAction; 3] = [
        AudienceAction::Create,
        AudienceAction::Update,
        AudienceAction::Replace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceAction::Create => "create_audience",
            AudienceAction::Update => "update_audience",
            AudienceAction::Replace => "replace_audience",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AudienceAction::Create => "Create new audience",
            AudienceAction::Update => "Update existing audience",
            AudienceAction::Replace => "Replace existing audience",
        }
    }

    /// Verb used in the audience picker label.
    pub fn verb(&self) -> &'static str {
        match self {
            AudienceAction::Create => "create",
            AudienceAction::Update => "update",
            AudienceAction::Replace => "replace",
        }
    }
}

impl std::fmt::Display for AudienceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Hashing Choice ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashingChoice {
    #[serde(rename = "do_hashing")]
    Hash,
    #[serde(rename = "do_no_hashing")]
    AlreadyHashed,
}

impl HashingChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashingChoice::Hash => "do_hashing",
            HashingChoice::AlreadyHashed => "do_no_hashing",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "do_hashing" => Some(HashingChoice::Hash),
            "do_no_hashing" => Some(HashingChoice::AlreadyHashed),
            _ => None,
        }
    }

    pub fn should_hash(&self) -> bool {
        matches!(self, HashingChoice::Hash)
    }
}

// ─── Field Definitions ──────────────────────────────────────────────────────

pub fn ad_account_field(options: Vec<FormOption>) -> FormField {
    FormField::select(CHOOSE_AD_ACCOUNT, "Choose a Facebook ad account", options).interactive()
}

pub fn action_field() -> FormField {
    let options = AudienceAction::ALL
        .iter()
        .map(|action| FormOption::new(action.as_str(), action.label()))
        .collect();

    FormField::select(
        CHOOSE_CREATE_UPDATE_REPLACE,
        "Would you like to create a new audience, update existing, or replace existing?",
        options,
    )
    .describe(MODE_DESCRIPTION)
    .interactive()
    .default_to(AudienceAction::Create.as_str())
}

pub fn create_audience_fields() -> [FormField; 2] {
    [
        FormField::text(CREATE_AUDIENCE_NAME, "New audience name"),
        FormField::text(CREATE_AUDIENCE_DESCRIPTION, "New audience description"),
    ]
}

/// Audience picker for the update and replace flows. An empty option list
/// swaps the description for guidance towards the create flow.
///
/// An update picker with audiences to choose from carries no description at
/// all: the `description` member is omitted from the serialized field rather
/// than sent as an empty string.
pub fn custom_audience_field(action: AudienceAction, options: Vec<FormOption>) -> FormField {
    let description = if options.is_empty() {
        Some(NO_AUDIENCES)
    } else if action == AudienceAction::Replace {
        Some(REPLACE_WARNING)
    } else {
        None
    };

    let field = FormField::select(
        CHOOSE_CUSTOM_AUDIENCE,
        format!("Choose an audience to {}", action.verb()),
        options,
    );
    match description {
        Some(text) => field.describe(text),
        None => field,
    }
}

pub fn hashing_field() -> FormField {
    FormField::select(
        SHOULD_HASH,
        "Should the data be hashed first?",
        vec![
            FormOption::new(HashingChoice::Hash.as_str(), "Yes"),
            FormOption::new(HashingChoice::AlreadyHashed.as_str(), "No"),
        ],
    )
    .describe(HASHING_DESCRIPTION)
    .default_to(HashingChoice::Hash.as_str())
}
