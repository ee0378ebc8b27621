//! Account entity <-> model mapper

use radar_core::{Account, AccountId, DomainError, Plan};

use crate::models::AccountModel;

impl TryFrom<AccountModel> for Account {
    type Error = DomainError;

    fn try_from(model: AccountModel) -> Result<Self, Self::Error> {
        let plan = model
            .plan
            .parse::<Plan>()
            .map_err(|_| super::corrupt("plan", &model.plan))?;

        Ok(Account {
            id: AccountId::new(model.id),
            email: model.email,
            business_name: model.business_name,
            plan,
            stripe_customer_id: model.stripe_customer_id,
            stripe_subscription_id: model.stripe_subscription_id,
            email_notifications: model.email_notifications,
            created_at: model.created_at,
        })
    }
}
