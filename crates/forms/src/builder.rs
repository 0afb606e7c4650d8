//! Destination form builder. Generates the next step of the custom
//! audiences configuration form from the selections made so far.

use std::sync::Arc;

use audience_core::types::{ActionForm, FormRequest};
use audience_core::{AudienceError, AudienceResult, HubConfig};
use audience_crypto::PayloadCipher;
use tracing::{debug, error, warn};

use crate::api::{AdAccountLister, AudienceLister};
use crate::fields::{
    action_field, ad_account_field, create_audience_fields, custom_audience_field, hashing_field,
};
use crate::options::project;
use crate::stages::{plan, Branch, Stage};

/// Builds the destination and login forms for one action hub deployment.
/// Holds no per-request state; one instance serves concurrent requests.
pub struct AudienceFormBuilder {
    pub(crate) config: HubConfig,
    pub(crate) cipher: Arc<dyn PayloadCipher>,
}

impl AudienceFormBuilder {
    pub fn new(config: HubConfig, cipher: Arc<dyn PayloadCipher>) -> Self {
        Self { config, cipher }
    }

    /// Generate the destination form for the request's current selections.
    ///
    /// Always lists ad accounts first, so an account lookup failure wins over
    /// invalid selections. Lists custom audiences only when the user asked to
    /// update or replace an existing one.
    pub async fn action_form<A, L>(
        &self,
        request: &FormRequest,
        accounts: &A,
        audiences: &L,
    ) -> AudienceResult<ActionForm>
    where
        A: AdAccountLister + ?Sized,
        L: AudienceLister + ?Sized,
    {
        let ad_accounts = accounts.ad_accounts().await.map_err(|e| {
            warn!(webhook_id = %request.webhook_id, error = %e, "Ad account lookup failed");
            AudienceError::Upstream(e)
        })?;

        let stage = match plan(&request.form_params) {
            Ok(stage) => stage,
            Err(e) => {
                error!(webhook_id = %request.webhook_id, error = %e, "Invalid form selections");
                return Err(e);
            }
        };
        debug!(webhook_id = %request.webhook_id, ?stage, "Generating destination form");

        let mut form = ActionForm::default();
        form.fields.push(ad_account_field(project(&ad_accounts)));

        if stage.shows_mode() {
            form.fields.push(action_field());
        }

        match &stage {
            Stage::Details {
                branch: Branch::Create,
                ..
            } => {
                form.fields.extend(create_audience_fields());
                form.fields.push(hashing_field());
            }
            Stage::Details {
                ad_account_id,
                branch: Branch::Existing(action),
            } => {
                let custom_audiences = audiences
                    .custom_audiences(ad_account_id)
                    .await
                    .map_err(|e| {
                        warn!(
                            webhook_id = %request.webhook_id,
                            ad_account_id = %ad_account_id,
                            error = %e,
                            "Custom audience lookup failed"
                        );
                        AudienceError::Upstream(e)
                    })?;

                form.fields
                    .push(custom_audience_field(*action, project(&custom_audiences)));
                form.fields.push(hashing_field());
            }
            Stage::Account | Stage::Mode { .. } => {}
        }

        Ok(form)
    }
}
