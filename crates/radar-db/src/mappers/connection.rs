//! Platform connection entity <-> model mapper

use radar_core::{AccountId, ConnectionId, DomainError, Platform, PlatformConnection};

use crate::models::ConnectionModel;

impl TryFrom<ConnectionModel> for PlatformConnection {
    type Error = DomainError;

    fn try_from(model: ConnectionModel) -> Result<Self, Self::Error> {
        let platform = model
            .platform
            .parse::<Platform>()
            .map_err(|_| super::corrupt("platform", &model.platform))?;

        Ok(PlatformConnection {
            id: ConnectionId::new(model.id),
            account_id: AccountId::new(model.account_id),
            platform,
            access_token: model.access_token,
            refresh_token: model.refresh_token,
            account_ref: model.account_ref,
            location_ref: model.location_ref,
            account_name: model.account_name,
            connected_at: model.connected_at,
        })
    }
}
