use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use super::new_id;
use crate::domain::profiles::{Education, Experience, Profile, ProfileFields};
use crate::errors::domain::DomainError;
use crate::repos::profiles::ProfileStore;

/// Profiles in creation order.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, user_id: &str, f: F) -> Option<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let mut profiles = self.profiles.write();
        let profile = profiles.iter_mut().find(|p| p.user == user_id)?;
        f(profile);
        Some(profile.clone())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .iter()
            .find(|p| p.user == user_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        Ok(self.profiles.read().clone())
    }

    async fn upsert(&self, user_id: &str, fields: ProfileFields) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write();

        if let Some(existing) = profiles.iter_mut().find(|p| p.user == user_id) {
            existing.fields = fields;
            return Ok(existing.clone());
        }

        let profile = Profile {
            id: new_id(),
            user: user_id.to_string(),
            fields,
            experience: Vec::new(),
            education: Vec::new(),
            date: OffsetDateTime::now_utc(),
        };
        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn remove_by_user(&self, user_id: &str) -> Result<bool, DomainError> {
        let mut profiles = self.profiles.write();
        let before = profiles.len();
        profiles.retain(|p| p.user != user_id);
        Ok(profiles.len() != before)
    }

    async fn add_experience(
        &self,
        user_id: &str,
        entry: Experience,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self.update(user_id, |p| p.experience.insert(0, entry)))
    }

    async fn remove_experience(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self.update(user_id, |p| p.experience.retain(|e| e.id != entry_id)))
    }

    async fn add_education(
        &self,
        user_id: &str,
        entry: Education,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self.update(user_id, |p| p.education.insert(0, entry)))
    }

    async fn remove_education(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self.update(user_id, |p| p.education.retain(|e| e.id != entry_id)))
    }
}
