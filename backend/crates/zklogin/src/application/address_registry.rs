//! Address Registry
//!
//! Get-or-create mapping from normalized email to address and key material.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entity::address_record::{AddressIdentity, AddressRecord};
use crate::domain::repository::AddressRepository;
use crate::domain::value_object::{email::Email, sui_address::SuiAddress};
use crate::error::{ZkLoginError, ZkLoginResult};

pub struct AddressRegistry<R>
where
    R: AddressRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for AddressRegistry<R>
where
    R: AddressRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> AddressRegistry<R>
where
    R: AddressRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Look up the mapping for an email, registering it on first sight.
    ///
    /// Absent or blank email yields an anonymous identity that is not stored.
    /// A registration that loses a race re-reads the winner's record once.
    pub async fn get_or_create(&self, email: Option<&str>) -> ZkLoginResult<AddressIdentity> {
        let Some(email) = Email::from_optional(email)? else {
            let identity = AddressIdentity::anonymous();
            tracing::debug!(address = %identity.address, "Issued anonymous identity");
            return Ok(identity);
        };

        let now = self.clock.now();
        if let Some(record) = self.repo.touch_by_email(&email, now).await? {
            return Ok(record.identity());
        }

        let record = AddressRecord::new(email, now);
        match self.repo.insert(&record).await {
            Ok(()) => {
                tracing::info!(address = %record.address, "Registered new address");
                Ok(record.identity())
            }
            Err(ZkLoginError::Conflict) => {
                tracing::debug!(address = %record.address, "Lost registration race, re-reading");
                self.repo
                    .touch_by_email(&record.email, now)
                    .await?
                    .map(|winner| winner.identity())
                    .ok_or(ZkLoginError::Conflict)
            }
            Err(e) => Err(e),
        }
    }

    /// Reverse lookup; does not touch `last_used_at`
    pub async fn find_by_address(
        &self,
        address: &SuiAddress,
    ) -> ZkLoginResult<Option<AddressRecord>> {
        self.repo.find_by_address(address).await
    }

    /// Lookup by raw email (normalized first); does not touch `last_used_at`
    pub async fn find_by_email(&self, email: &str) -> ZkLoginResult<Option<AddressRecord>> {
        match Email::from_optional(Some(email))? {
            Some(email) => self.repo.find_by_email(&email).await,
            None => Ok(None),
        }
    }
}
