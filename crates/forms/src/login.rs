//! OAuth login form. The first step of the OAuth flow: the user clicks the
//! link, the hub redirects to the provider, and the provider eventually
//! hands the encrypted `state` back to the hub's callback.

use audience_core::types::{ActionForm, FormField, FormRequest, FormState, StatePayload};
use audience_core::{AudienceError, AudienceResult};
use tracing::{debug, error};
use url::Url;

use crate::builder::AudienceFormBuilder;
use crate::fields::LOGIN;

/// Hub route that starts the provider redirect.
pub const OAUTH_CALLBACK_PATH: &str = "/actions/facebook_custom_audiences/oauth";

const LOGIN_DESCRIPTION: &str = "In order to use Facebook Custom Audiences as a destination, \
     you will need to log in once to your Facebook account.";

impl AudienceFormBuilder {
    /// Generate the single-field login form for the request's `state_url`.
    ///
    /// Fails closed: if the state cannot be encrypted no form is produced.
    pub async fn login_form(&self, request: &FormRequest) -> AudienceResult<ActionForm> {
        let Some(state_url) = request.state_url.as_deref() else {
            error!(webhook_id = %request.webhook_id, "Login form requested without state_url");
            return Err(AudienceError::MissingStateUrl);
        };

        let payload = serde_json::to_string(&StatePayload {
            state_url: state_url.to_string(),
        })?;

        let token = match self.cipher.encrypt(&payload).await {
            Ok(token) => token,
            Err(e) => {
                error!(webhook_id = %request.webhook_id, error = %e, "Payload encryption error");
                return Err(e);
            }
        };

        let start_auth_url = self.oauth_start_url(&token)?;
        debug!(
            webhook_id = %request.webhook_id,
            start_auth_url = %start_auth_url,
            "Login form generated"
        );

        Ok(ActionForm {
            fields: vec![
                FormField::oauth_link(LOGIN, "Log in to Facebook", start_auth_url.as_str())
                    .describe(LOGIN_DESCRIPTION),
            ],
            state: Some(FormState::reset()),
        })
    }

    /// Hub URL that begins the OAuth hop, carrying `token` as `state`.
    pub fn oauth_start_url(&self, token: &str) -> AudienceResult<Url> {
        let mut url = Url::parse(&format!(
            "{}{}",
            self.config.base_url(),
            OAUTH_CALLBACK_PATH
        ))?;
        url.query_pairs_mut().append_pair("state", token);
        Ok(url)
    }

    /// Recover the login state from the `state` token the provider returned.
    pub async fn open_login_state(&self, token: &str) -> AudienceResult<StatePayload> {
        let plaintext = self.cipher.decrypt(token).await?;
        Ok(serde_json::from_str(&plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audience_core::types::SelectionState;
    use audience_core::HubConfig;
    use audience_crypto::{AesGcmCipher, CipherKey};
    use std::sync::Arc;

    fn builder(base_url: &str) -> AudienceFormBuilder {
        let config = HubConfig {
            base_url: base_url.into(),
            cipher_master: None,
        };
        AudienceFormBuilder::new(config, Arc::new(AesGcmCipher::new(&CipherKey::generate())))
    }

    #[test]
    fn test_start_url_shape() {
        let url = builder("https://hub.example.com/")
            .oauth_start_url("abc-_123")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://hub.example.com/actions/facebook_custom_audiences/oauth?state=abc-_123"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = builder("not a url").oauth_start_url("abc");
        assert!(matches!(result, Err(AudienceError::Url(_))));
    }

    #[tokio::test]
    async fn test_login_state_roundtrip() {
        let builder = builder("https://hub.example.com");
        let request = FormRequest::new(SelectionState::new())
            .with_state_url("https://looker.example.com/action_hub_state/xyz");

        let form = builder.login_form(&request).await.unwrap();
        let url = Url::parse(form.fields[0].oauth_url.as_deref().unwrap()).unwrap();
        let (_, token) = url.query_pairs().find(|(k, _)| k == "state").unwrap();

        let state = builder.open_login_state(&token).await.unwrap();
        assert_eq!(state.state_url, "https://looker.example.com/action_hub_state/xyz");
    }

    #[tokio::test]
    async fn test_login_requires_state_url() {
        let request = FormRequest::new(SelectionState::new());
        let result = builder("https://hub.example.com").login_form(&request).await;
        assert!(matches!(result, Err(AudienceError::MissingStateUrl)));
    }

    #[tokio::test]
    async fn test_foreign_token_rejected() {
        let issuer = builder("https://hub.example.com");
        let other = builder("https://hub.example.com");
        let request = FormRequest::new(SelectionState::new()).with_state_url("https://x/y");

        let form = issuer.login_form(&request).await.unwrap();
        let url = Url::parse(form.fields[0].oauth_url.as_deref().unwrap()).unwrap();
        let (_, token) = url.query_pairs().find(|(k, _)| k == "state").unwrap();

        assert!(matches!(
            other.open_login_state(&token).await,
            Err(AudienceError::Decryption(_))
        ));
    }
}
