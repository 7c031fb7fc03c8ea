//! Steps of the booking flow, from picking a hotel to the payment page.

use super::selectors;
use crate::pipeline::{Step, StepContext, StepError, StepReport};
use crate::resolution::WaitPolicy;
use async_trait::async_trait;
use scout_common::protocol::Scope;
use scout_common::record::{ActionKind, StepPayload};

pub struct SelectHotel;

#[async_trait]
impl Step for SelectHotel {
    fn action(&self) -> ActionKind {
        ActionKind::SelectHotel
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let wait = ctx.element_wait();
        let card = ctx
            .resolver(wait)
            .click_first(&selectors::hotel_cards(), &Scope::Document)
            .await;
        if let Err(not_found) = card.into_match() {
            return Ok(StepReport::not_found("hotel card", &not_found)
                .with_payload(StepPayload::Selection { selected: false }));
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::Selection { selected: true }))
    }
}

/// Clicks the first room-selection control that accepts the click.
pub struct SelectRoom;

#[async_trait]
impl Step for SelectRoom {
    fn action(&self) -> ActionKind {
        ActionKind::SelectRoom
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let wait = ctx.element_wait();
        let control = ctx
            .resolver(wait)
            .click_first(&selectors::room_controls(), &Scope::Document)
            .await;
        if let Err(not_found) = control.into_match() {
            return Ok(StepReport::not_found("room selection control", &not_found)
                .with_payload(StepPayload::Selection { selected: false }));
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::Selection { selected: true }))
    }
}

/// Types the guest name into the first form field and the email into the second.
pub struct FillGuestInfo;

#[async_trait]
impl Step for FillGuestInfo {
    fn action(&self) -> ActionKind {
        ActionKind::FillGuestInfo
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let params = ctx.params;
        let wait = ctx.element_wait();
        let fields = ctx
            .resolver(wait)
            .first_all(&selectors::guest_form_fields(), &Scope::Document)
            .await;
        let fields = match fields.into_match() {
            Ok(found) => found.value,
            Err(not_found) => {
                return Ok(StepReport::not_found("guest form", &not_found)
                    .with_payload(StepPayload::GuestForm { fields_filled: 0 }));
            }
        };

        let values = [params.guest_name.as_str(), params.guest_email.as_str()];
        let mut fields_filled = 0;
        for (field, value) in fields.into_iter().zip(values) {
            ctx.driver.send_keys(field, value).await?;
            fields_filled += 1;
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::GuestForm { fields_filled }))
    }
}

/// Counts payment methods and payment buttons on the checkout page.
pub struct AnalyzePaymentProcess;

#[async_trait]
impl Step for AnalyzePaymentProcess {
    fn action(&self) -> ActionKind {
        ActionKind::AnalyzePaymentProcess
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let mut resolver = ctx.resolver(WaitPolicy::immediate());
        let payment_methods_count = resolver
            .count(&selectors::payment_methods(), &Scope::Document)
            .await;
        let payment_buttons_count = resolver
            .count(&selectors::payment_buttons(), &Scope::Document)
            .await;

        Ok(StepReport::succeeded().with_payload(StepPayload::PaymentAnalysis {
            payment_methods_count,
            payment_buttons_count,
            payment_available: payment_buttons_count > 0,
        }))
    }
}
