//! Account entity - a registered business using the service

use chrono::{DateTime, Utc};

use crate::value_objects::{AccountId, Plan};

/// Business account with its subscription state
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub business_name: String,
    pub plan: Plan,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether new-review alerts and digests should be sent
    #[inline]
    pub fn wants_notifications(&self) -> bool {
        self.email_notifications
    }

    #[inline]
    pub fn has_billing_customer(&self) -> bool {
        self.stripe_customer_id.is_some()
    }

    /// Apply a completed checkout
    pub fn activate_subscription(
        &mut self,
        plan: Plan,
        customer_id: Option<String>,
        subscription_id: Option<String>,
    ) {
        self.plan = plan;
        if customer_id.is_some() {
            self.stripe_customer_id = customer_id;
        }
        self.stripe_subscription_id = subscription_id;
    }

    /// Subscription was deleted: back to free, subscription reference dropped
    pub fn cancel_subscription(&mut self) {
        self.plan = Plan::Free;
        self.stripe_subscription_id = None;
    }

    /// Subscription lapsed but still exists upstream
    pub fn suspend_subscription(&mut self) {
        self.plan = Plan::Free;
    }
}

/// Data required to register an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub business_name: String,
}
