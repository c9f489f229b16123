use async_trait::async_trait;

use crate::prelude::*;

/// Source of auxiliary prices that has sensible defaults when unreachable.
#[async_trait]
pub trait Provider: Sync {
    type Output: Default + Send;

    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Self::Output>;

    #[instrument(skip_all)]
    async fn fetch_or_default(&self) -> Self::Output {
        match self.fetch().await {
            Ok(output) => output,
            Err(error) => {
                warn!(provider = self.name(), "using the defaults: {error:#}");
                Self::Output::default()
            }
        }
    }
}
