//! Billing service
//!
//! Checkout and portal sessions, and the webhook that moves accounts between
//! plans. Webhook events are applied at most once, keyed by event id.

use radar_core::{Account, DomainError, Plan};
use radar_integrations::{BillingEvent, CheckoutRequest, WebhookEvent};
use tracing::{debug, info, instrument, warn};

use crate::dto::{StatusResponse, UrlResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Billing service
pub struct BillingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BillingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a subscription checkout for a paid plan
    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub async fn checkout(&self, account: &Account, plan: &str) -> ServiceResult<UrlResponse> {
        let plan: Plan = plan.parse()?;
        let settings = self.ctx.settings();
        let price_id = settings
            .price_id(plan)
            .ok_or_else(|| DomainError::InvalidPlan(plan.to_string()))?
            .to_string();

        let customer_id = self.ensure_customer(account).await?;

        let url = self
            .ctx
            .billing_gateway()
            .create_checkout_session(&CheckoutRequest {
                account_id: account.id,
                customer_id,
                plan,
                price_id,
                trial_days: settings.trial_days,
                success_url: settings.dashboard_url(Some("payment=success")),
                cancel_url: settings.dashboard_url(Some("payment=cancelled")),
            })
            .await?;

        info!(plan = %plan, "Checkout session created");
        Ok(UrlResponse { url })
    }

    /// Open the self-service billing portal
    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub async fn portal(&self, account: &Account) -> ServiceResult<UrlResponse> {
        let customer_id = account
            .stripe_customer_id
            .as_deref()
            .ok_or(DomainError::NoBillingCustomer)?;

        let return_url = self.ctx.settings().dashboard_url(None);
        let url = self
            .ctx
            .billing_gateway()
            .create_portal_session(customer_id, &return_url)
            .await?;

        Ok(UrlResponse { url })
    }

    /// Verify and apply a webhook delivery
    #[instrument(skip_all)]
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> ServiceResult<StatusResponse> {
        let event = self
            .ctx
            .webhook_verifier()
            .construct_event(payload, signature)?;

        if self.ctx.billing_event_repo().is_processed(&event.id).await? {
            debug!(event_id = %event.id, "Webhook event already processed");
            return Ok(StatusResponse::ok());
        }

        self.apply(&event).await?;

        self.ctx
            .billing_event_repo()
            .record(&event.id, &event.kind)
            .await?;

        Ok(StatusResponse::ok())
    }

    async fn apply(&self, event: &WebhookEvent) -> ServiceResult<()> {
        match &event.event {
            BillingEvent::CheckoutCompleted {
                account_id,
                plan,
                customer_id,
                subscription_id,
            } => {
                let Some(mut account) = self.ctx.account_repo().find_by_id(*account_id).await?
                else {
                    warn!(event_id = %event.id, account_id = %account_id, "Checkout for unknown account");
                    return Ok(());
                };

                account.activate_subscription(*plan, customer_id.clone(), subscription_id.clone());
                self.save_subscription(&account).await?;
                info!(account_id = %account.id, plan = %plan, "Subscription activated");
            }
            BillingEvent::SubscriptionDeleted { customer_id } => {
                let Some(mut account) = self.find_customer(customer_id, &event.id).await? else {
                    return Ok(());
                };

                account.cancel_subscription();
                self.save_subscription(&account).await?;
                info!(account_id = %account.id, "Subscription cancelled");
            }
            BillingEvent::SubscriptionUpdated {
                customer_id,
                status,
            } => {
                if BillingEvent::is_active_status(status) {
                    debug!(status = %status, "Subscription still active");
                    return Ok(());
                }

                let Some(mut account) = self.find_customer(customer_id, &event.id).await? else {
                    return Ok(());
                };

                account.suspend_subscription();
                self.save_subscription(&account).await?;
                info!(account_id = %account.id, status = %status, "Subscription suspended");
            }
            BillingEvent::Ignored => {
                debug!(kind = %event.kind, "Webhook event ignored");
            }
        }

        Ok(())
    }

    async fn find_customer(
        &self,
        customer_id: &str,
        event_id: &str,
    ) -> ServiceResult<Option<Account>> {
        let account = self.ctx.account_repo().find_by_customer_id(customer_id).await?;
        if account.is_none() {
            warn!(event_id, customer_id, "Webhook for unknown customer");
        }
        Ok(account)
    }

    async fn save_subscription(&self, account: &Account) -> ServiceResult<()> {
        self.ctx
            .account_repo()
            .update_subscription(
                account.id,
                account.plan,
                account.stripe_customer_id.as_deref(),
                account.stripe_subscription_id.as_deref(),
            )
            .await?;
        Ok(())
    }

    /// Billing customer of the account, created on first checkout
    async fn ensure_customer(&self, account: &Account) -> ServiceResult<String> {
        if let Some(id) = &account.stripe_customer_id {
            return Ok(id.clone());
        }

        let customer_id = self
            .ctx
            .billing_gateway()
            .create_customer(account.id, &account.email, &account.business_name)
            .await?;

        if self
            .ctx
            .account_repo()
            .set_customer_id(account.id, &customer_id)
            .await?
        {
            info!(customer_id = %customer_id, "Billing customer created");
            return Ok(customer_id);
        }

        // Another request attached a customer first
        let stored = self
            .ctx
            .account_repo()
            .find_by_id(account.id)
            .await?
            .and_then(|a| a.stripe_customer_id)
            .ok_or(DomainError::AccountNotFound(account.id))?;

        warn!(unused = %customer_id, customer_id = %stored, "Billing customer already attached");
        Ok(stored)
    }
}
