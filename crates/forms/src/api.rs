//! Ad platform lookups the form builder depends on.

use async_trait::async_trait;
use audience_core::types::RemoteEntity;

/// Lists the ad accounts visible to the logged-in user.
#[async_trait]
pub trait AdAccountLister: Send + Sync {
    async fn ad_accounts(&self) -> anyhow::Result<Vec<RemoteEntity>>;
}

/// Lists the custom audiences held by one ad account.
#[async_trait]
pub trait AudienceLister: Send + Sync {
    async fn custom_audiences(&self, ad_account_id: &str) -> anyhow::Result<Vec<RemoteEntity>>;
}
