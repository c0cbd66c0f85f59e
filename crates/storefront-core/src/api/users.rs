//! Profile and address calls for the signed-in user.

use tracing::debug;

use crate::models::{Address, AddressRequest, AddressUpdate, UserData, UserUpdate};

use super::{ApiError, AuthenticatedHttpClient};

const CURRENT_USER_PATH: &str = "/user/getUser";
const PROFILE_PATH: &str = "/users/profile";
const ADDRESS_CREATE_PATH: &str = "/users/address/";

#[derive(Clone)]
pub struct UserService {
    client: AuthenticatedHttpClient,
}

impl UserService {
    pub fn new(client: AuthenticatedHttpClient) -> Self {
        Self { client }
    }

    /// Fetch the signed-in user's profile including addresses
    pub async fn get_user_data(&self) -> Result<UserData, ApiError> {
        self.client.get(CURRENT_USER_PATH).await
    }

    /// Fetch only the signed-in user's addresses
    pub async fn get_address_data(&self) -> Result<Vec<Address>, ApiError> {
        let user = self.get_user_data().await?;
        debug!(count = user.address.len(), "Addresses loaded");
        Ok(user.address)
    }

    pub async fn update_user_data(&self, user_id: &str, update: &UserUpdate) -> Result<UserData, ApiError> {
        let path = format!("{}/{}", PROFILE_PATH, user_id);
        self.client.put(&path, update).await
    }

    pub async fn update_address_data(
        &self,
        user_id: &str,
        address_id: &str,
        update: &AddressUpdate,
    ) -> Result<Address, ApiError> {
        let path = format!("{}/{}/{}", PROFILE_PATH, user_id, address_id);
        self.client.put(&path, update).await
    }

    pub async fn create_address(&self, address: &AddressRequest) -> Result<Address, ApiError> {
        self.client.post(ADDRESS_CREATE_PATH, address).await
    }
}
