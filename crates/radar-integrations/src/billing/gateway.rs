//! Stripe checkout, customer and portal sessions

use std::collections::HashMap;

use async_trait::async_trait;
use radar_core::{AccountId, Plan};
use stripe::{
    BillingPortalSession, CheckoutSession, CheckoutSessionMode, Client, CreateBillingPortalSession,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionPaymentMethodTypes, CreateCheckoutSessionSubscriptionData,
    CreateCustomer, Customer, CustomerId,
};
use tracing::instrument;

use crate::error::{IntegrationError, IntegrationResult};

/// Everything needed to open a hosted subscription checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub account_id: AccountId,
    pub customer_id: String,
    pub plan: Plan,
    pub price_id: String,
    pub trial_days: u32,
    pub success_url: String,
    pub cancel_url: String,
}

/// Payment provider operations used by the billing service
#[async_trait]
pub trait BillingGateway: Send + Sync {
    /// Create a customer record, returning its id
    async fn create_customer(
        &self,
        account_id: AccountId,
        email: &str,
        name: &str,
    ) -> IntegrationResult<String>;

    /// Create a subscription checkout session, returning its URL
    async fn create_checkout_session(&self, request: &CheckoutRequest)
        -> IntegrationResult<String>;

    /// Create a self-service billing portal session, returning its URL
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> IntegrationResult<String>;
}

/// Stripe client wrapper
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }
}

fn parse_customer_id(customer_id: &str) -> IntegrationResult<CustomerId> {
    customer_id
        .parse::<CustomerId>()
        .map_err(|e| IntegrationError::Stripe(format!("invalid customer id: {e}")))
}

#[async_trait]
impl BillingGateway for StripeGateway {
    #[instrument(skip(self, email, name))]
    async fn create_customer(
        &self,
        account_id: AccountId,
        email: &str,
        name: &str,
    ) -> IntegrationResult<String> {
        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), account_id.to_string());

        let mut params = CreateCustomer::new();
        params.email = Some(email);
        params.name = Some(name);
        params.metadata = Some(metadata);

        let customer = Customer::create(&self.client, params)
            .await
            .map_err(|e| IntegrationError::Stripe(e.to_string()))?;

        tracing::info!(customer_id = %customer.id, "Created Stripe customer");
        Ok(customer.id.to_string())
    }

    #[instrument(skip(self, request), fields(account_id = %request.account_id, plan = %request.plan.as_str()))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> IntegrationResult<String> {
        let account_id = request.account_id.to_string();

        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), account_id.clone());
        metadata.insert("plan".to_string(), request.plan.as_str().to_string());

        let mut params = CreateCheckoutSession::new();
        params.customer = Some(parse_customer_id(&request.customer_id)?);
        params.client_reference_id = Some(&account_id);
        params.payment_method_types = Some(vec![
            CreateCheckoutSessionPaymentMethodTypes::Card,
            CreateCheckoutSessionPaymentMethodTypes::Ideal,
        ]);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(request.price_id.clone()),
            quantity: Some(1),
            ..Default::default()
        }]);
        params.mode = Some(CheckoutSessionMode::Subscription);
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);
        params.metadata = Some(metadata);
        params.allow_promotion_codes = Some(true);
        params.subscription_data = Some(CreateCheckoutSessionSubscriptionData {
            trial_period_days: Some(request.trial_days),
            ..Default::default()
        });

        let session = CheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| IntegrationError::Stripe(e.to_string()))?;

        session
            .url
            .ok_or_else(|| IntegrationError::Stripe("No checkout URL returned".into()))
    }

    #[instrument(skip(self, customer_id))]
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> IntegrationResult<String> {
        let mut params = CreateBillingPortalSession::new(parse_customer_id(customer_id)?);
        params.return_url = Some(return_url);

        let session = BillingPortalSession::create(&self.client, params)
            .await
            .map_err(|e| IntegrationError::Stripe(e.to_string()))?;

        Ok(session.url)
    }
}
