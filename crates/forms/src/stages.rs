//! Progressive disclosure for the destination form: Account → Mode → Details.
//!
//! `plan` is a pure function of the submitted selections. It decides how far
//! the form has progressed. The builder lists ad accounts before calling it
//! and lists audiences afterwards, on entry to the update/replace branch.

use audience_core::types::SelectionState;
use audience_core::{AudienceError, AudienceResult};

use crate::fields::{AudienceAction, CHOOSE_AD_ACCOUNT, CHOOSE_CREATE_UPDATE_REPLACE};

/// Last stage the next form reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// No ad account yet: only the account picker.
    Account,
    /// Account chosen, but the mode answer is not one we know.
    Mode { ad_account_id: String },
    /// Account and mode resolved; details for the chosen branch follow.
    Details {
        ad_account_id: String,
        branch: Branch,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// New audience name and description.
    Create,
    /// Pick one of the account's existing audiences.
    Existing(AudienceAction),
}

impl Stage {
    pub fn shows_mode(&self) -> bool {
        !matches!(self, Stage::Account)
    }
}

/// Decide the stage for the given selections.
///
/// A missing mode answer with an account chosen counts as create, since
/// create is the mode field's default. Update or replace without an account
/// is a caller error.
pub fn plan(selection: &SelectionState) -> AudienceResult<Stage> {
    let account = selection.get(CHOOSE_AD_ACCOUNT);
    let action = selection
        .get(CHOOSE_CREATE_UPDATE_REPLACE)
        .map(|value| AudienceAction::from_param(value).ok_or(value));

    let Some(ad_account_id) = account else {
        return match action {
            Some(Ok(AudienceAction::Update | AudienceAction::Replace)) => {
                Err(AudienceError::MissingAdAccount)
            }
            _ => Ok(Stage::Account),
        };
    };
    let ad_account_id = ad_account_id.to_string();

    let stage = match action {
        None | Some(Ok(AudienceAction::Create)) => Stage::Details {
            ad_account_id,
            branch: Branch::Create,
        },
        Some(Ok(existing)) => Stage::Details {
            ad_account_id,
            branch: Branch::Existing(existing),
        },
        Some(Err(_unknown)) => Stage::Mode { ad_account_id },
    };
    Ok(stage)
}
