//! Shared in-memory test doubles.
//!
//! `TestStore` implements all three repository traits over plain
//! vectors so service behavior can be tested without a database.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use trailhead::domain::{
    AdminApplicationView, Application, ApplicationFilter, ApplicationPatch, ApplicationStatus,
    ApplicationWithEvent, Event, EventSummary, NewApplication, User, UserSummary,
};
use trailhead::infra::{ApplicationRepository, EventRepository, UserRepository};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    events: Vec<Event>,
    applications: Vec<Application>,
}

/// In-memory store implementing the repository traits.
#[derive(Clone, Default)]
pub struct TestStore {
    inner: Arc<Mutex<Inner>>,
}

impl TestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) -> User {
        self.inner.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_event(&self, event: Event) -> Event {
        self.inner.lock().unwrap().events.push(event.clone());
        event
    }

    pub fn add_application(&self, application: Application) -> Application {
        self.inner
            .lock()
            .unwrap()
            .applications
            .push(application.clone());
        application
    }

    /// Look up a stored application by id
    pub fn application(&self, id: Uuid) -> Option<Application> {
        self.inner
            .lock()
            .unwrap()
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn application_count(&self) -> usize {
        self.inner.lock().unwrap().applications.len()
    }

    /// Look up a stored user by email
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Count of stored users with the given email
    pub fn user_count_by_email(&self, email: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .filter(|u| u.email == email)
            .count()
    }

    /// Count of active events in the store
    pub fn active_event_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.is_active)
            .count()
    }

    fn admin_view(inner: &Inner, application: &Application) -> AdminApplicationView {
        let owner = inner
            .users
            .iter()
            .find(|u| u.id == application.user_id)
            .expect("application owner must exist in test store");
        let event = inner
            .events
            .iter()
            .find(|e| e.id == application.event_id)
            .expect("application event must exist in test store")
            .clone();
        let reviewer = application
            .reviewed_by
            .and_then(|id| inner.users.iter().find(|u| u.id == id))
            .cloned()
            .map(UserSummary::from);

        AdminApplicationView {
            application: application.clone(),
            user: UserSummary::from(owner.clone()),
            event,
            reviewer,
        }
    }
}

#[async_trait]
impl UserRepository for TestStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: String, name: Option<String>) -> Result<User, DbErr> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            name,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn create_admin(&self, email: String, name: Option<String>) -> Result<User, DbErr> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            name,
            is_admin: true,
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().unwrap().users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl EventRepository for TestStore {
    async fn list_active(&self) -> Result<Vec<EventSummary>, DbErr> {
        let inner = self.inner.lock().unwrap();
        let mut active: Vec<_> = inner.events.iter().filter(|e| e.is_active).collect();
        active.sort_by_key(|e| e.start_date);

        Ok(active
            .into_iter()
            .map(|event| EventSummary {
                event: event.clone(),
                application_count: inner
                    .applications
                    .iter()
                    .filter(|a| a.event_id == event.id)
                    .count() as u64,
            })
            .collect())
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<EventSummary>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.iter().find(|e| e.id == id).map(|event| EventSummary {
            event: event.clone(),
            application_count: inner
                .applications
                .iter()
                .filter(|a| a.event_id == event.id)
                .count() as u64,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.iter().find(|e| e.id == id).cloned())
    }

    async fn insert(&self, event: Event) -> Result<Event, DbErr> {
        self.inner.lock().unwrap().events.push(event.clone());
        Ok(event)
    }
}

#[async_trait]
impl ApplicationRepository for TestStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithEvent>, DbErr> {
        let inner = self.inner.lock().unwrap();
        let mut own: Vec<_> = inner
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(own
            .into_iter()
            .map(|application| {
                let event = inner
                    .events
                    .iter()
                    .find(|e| e.id == application.event_id)
                    .expect("application event must exist in test store")
                    .clone();
                ApplicationWithEvent { application, event }
            })
            .collect())
    }

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApplicationWithEvent>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .applications
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .map(|application| {
                let event = inner
                    .events
                    .iter()
                    .find(|e| e.id == application.event_id)
                    .expect("application event must exist in test store")
                    .clone();
                ApplicationWithEvent {
                    application: application.clone(),
                    event,
                }
            }))
    }

    async fn find_for_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<Application>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .applications
            .iter()
            .find(|a| a.user_id == user_id && a.event_id == event_id)
            .cloned())
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<u64, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .applications
            .iter()
            .filter(|a| a.event_id == event_id)
            .count() as u64)
    }

    async fn insert(&self, user_id: Uuid, data: NewApplication) -> Result<Application, DbErr> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .applications
            .iter()
            .any(|a| a.user_id == user_id && a.event_id == data.event_id)
        {
            return Err(DbErr::Custom(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }

        let application = Application {
            id: Uuid::new_v4(),
            user_id,
            event_id: data.event_id,
            applicant_name: data.applicant_name,
            phone_number: data.phone_number,
            emergency_contact_name: data.emergency_contact_name,
            emergency_contact_phone: data.emergency_contact_phone,
            dietary_restrictions: data.dietary_restrictions,
            medical_conditions: data.medical_conditions,
            special_requirements: data.special_requirements,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
            admin_notes: None,
            reviewed_by: None,
            reviewed_at: None,
        };
        inner.applications.push(application.clone());
        Ok(application)
    }

    async fn update_details(
        &self,
        id: Uuid,
        patch: ApplicationPatch,
    ) -> Result<Application, DbErr> {
        let mut inner = self.inner.lock().unwrap();
        let application = inner
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DbErr::RecordNotFound(format!("application {}", id)))?;

        if let Some(name) = patch.applicant_name {
            application.applicant_name = name;
        }
        if let Some(value) = patch.phone_number {
            application.phone_number = value;
        }
        if let Some(value) = patch.emergency_contact_name {
            application.emergency_contact_name = value;
        }
        if let Some(value) = patch.emergency_contact_phone {
            application.emergency_contact_phone = value;
        }
        if let Some(value) = patch.dietary_restrictions {
            application.dietary_restrictions = value;
        }
        if let Some(value) = patch.medical_conditions {
            application.medical_conditions = value;
        }
        if let Some(value) = patch.special_requirements {
            application.special_requirements = value;
        }

        Ok(application.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.applications.len();
        inner.applications.retain(|a| a.id != id);
        if inner.applications.len() == before {
            return Err(DbErr::RecordNotFound(format!("application {}", id)));
        }
        Ok(())
    }

    async fn list_admin(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<AdminApplicationView>, DbErr> {
        let inner = self.inner.lock().unwrap();
        let mut matching: Vec<_> = inner
            .applications
            .iter()
            .filter(|a| {
                if let Some(event_id) = filter.event_id {
                    if a.event_id != event_id {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if a.status != status {
                        return false;
                    }
                }
                if let Some(ref search) = filter.search {
                    let needle = search.to_lowercase();
                    let owner_email = inner
                        .users
                        .iter()
                        .find(|u| u.id == a.user_id)
                        .map(|u| u.email.to_lowercase())
                        .unwrap_or_default();
                    if !a.applicant_name.to_lowercase().contains(&needle)
                        && !owner_email.contains(&needle)
                    {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(matching
            .iter()
            .map(|a| TestStore::admin_view(&inner, a))
            .collect())
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<AdminApplicationView>, DbErr> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .applications
            .iter()
            .find(|a| a.id == id)
            .map(|a| TestStore::admin_view(&inner, a)))
    }

    async fn update_review(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Option<AdminApplicationView>, DbErr> {
        let mut inner = self.inner.lock().unwrap();
        let Some(application) = inner.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        application.status = status;
        application.admin_notes = admin_notes;
        application.reviewed_by = Some(reviewed_by);
        application.reviewed_at = Some(reviewed_at);
        let updated = application.clone();

        Ok(Some(TestStore::admin_view(&inner, &updated)))
    }

    async fn status_counts(&self) -> Result<HashMap<String, u64>, DbErr> {
        let inner = self.inner.lock().unwrap();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for application in &inner.applications {
            *counts
                .entry(application.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AdminApplicationView>, DbErr> {
        let inner = self.inner.lock().unwrap();
        let mut all: Vec<_> = inner.applications.clone();
        all.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(all
            .iter()
            .take(limit as usize)
            .map(|a| TestStore::admin_view(&inner, a))
            .collect())
    }
}

// =============================================================================
// Fixture builders
// =============================================================================

pub fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: None,
        is_admin: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin(email: &str) -> User {
    User {
        is_admin: true,
        ..test_user(email)
    }
}

pub fn test_event(name: &str) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        start_date: now + Duration::days(30),
        end_date: Some(now + Duration::days(33)),
        location: Some("Test Forest".to_string()),
        application_deadline: Some(now + Duration::days(14)),
        max_participants: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_application(user: &User, event: &Event) -> Application {
    Application {
        id: Uuid::new_v4(),
        user_id: user.id,
        event_id: event.id,
        applicant_name: "Test Applicant".to_string(),
        phone_number: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        dietary_restrictions: None,
        medical_conditions: None,
        special_requirements: None,
        status: ApplicationStatus::Pending,
        submitted_at: Utc::now(),
        admin_notes: None,
        reviewed_by: None,
        reviewed_at: None,
    }
}

pub fn new_application(event_id: Uuid, applicant_name: &str) -> NewApplication {
    NewApplication {
        event_id,
        applicant_name: applicant_name.to_string(),
        phone_number: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        dietary_restrictions: None,
        medical_conditions: None,
        special_requirements: None,
    }
}
