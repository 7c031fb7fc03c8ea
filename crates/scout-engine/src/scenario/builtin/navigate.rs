use crate::pipeline::{Step, StepContext, StepError, StepReport};
use async_trait::async_trait;
use scout_common::record::{ActionKind, StepPayload};

/// Opens the scenario's base URL.
pub struct Navigate;

#[async_trait]
impl Step for Navigate {
    fn action(&self) -> ActionKind {
        ActionKind::Navigate
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let url = ctx.params.base_url.clone();
        let nav = ctx.driver.navigate(&url).await?;
        Ok(StepReport::succeeded().with_payload(StepPayload::Navigation {
            url: nav.url,
            title: nav.title,
        }))
    }
}
