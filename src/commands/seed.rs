//! Seed command - Loads the admin account and sample camping events.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::Event;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, EventRepository, EventStore, UserRepository, UserStore};

/// Email address of the seeded administrator account.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Display name of the seeded administrator account.
pub const ADMIN_NAME: &str = "Site Admin";

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let users = UserStore::new(db.get_connection());
    let events = EventStore::new(db.get_connection());

    run(&users, &events).await
}

/// Seed the admin account and sample events through the repositories.
pub async fn run(users: &dyn UserRepository, events: &dyn EventRepository) -> AppResult<()> {
    tracing::info!("Seeding database...");

    match users.find_by_email(ADMIN_EMAIL).await.map_err(AppError::Fetch)? {
        Some(_) => tracing::info!("Admin account already present: {}", ADMIN_EMAIL),
        None => {
            users
                .create_admin(ADMIN_EMAIL.to_string(), Some(ADMIN_NAME.to_string()))
                .await
                .map_err(AppError::Create)?;
            tracing::info!("Created admin account: {}", ADMIN_EMAIL);
        }
    }

    for event in sample_events()? {
        let name = event.name.clone();
        events.insert(event).await.map_err(AppError::Create)?;
        tracing::info!("Created event: {}", name);
    }

    tracing::info!("Seeding completed successfully");
    Ok(())
}

fn day(year: i32, month: u32, day: u32) -> AppResult<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| AppError::internal(format!("Invalid date {}-{}-{}", year, month, day)))
}

fn sample_events() -> AppResult<Vec<Event>> {
    let now = Utc::now();

    let build = |name: &str,
                 description: &str,
                 start: DateTime<Utc>,
                 end: DateTime<Utc>,
                 location: &str,
                 deadline: DateTime<Utc>,
                 max_participants: i32| Event {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(description.to_string()),
        start_date: start,
        end_date: Some(end),
        location: Some(location.to_string()),
        application_deadline: Some(deadline),
        max_participants: Some(max_participants),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    Ok(vec![
        build(
            "Summer Camp 2026",
            "Join us for an amazing summer camping experience! Enjoy hiking, swimming, \
             campfire stories, and making new friends. Perfect for families and nature \
             enthusiasts.",
            day(2026, 7, 15)?,
            day(2026, 7, 20)?,
            "Yosemite National Park, California",
            day(2026, 6, 1)?,
            50,
        ),
        build(
            "Fall Wilderness Retreat",
            "Experience the beautiful fall colors in the mountains. This retreat includes \
             guided nature walks, outdoor cooking workshops, and wildlife observation.",
            day(2026, 10, 10)?,
            day(2026, 10, 13)?,
            "Great Smoky Mountains, Tennessee",
            day(2026, 9, 15)?,
            30,
        ),
        build(
            "Winter Camping Adventure",
            "For experienced campers who want to challenge themselves! Learn winter survival \
             skills, snowshoeing, and cold-weather camping techniques.",
            day(2027, 1, 20)?,
            day(2027, 1, 23)?,
            "Rocky Mountain National Park, Colorado",
            day(2026, 12, 20)?,
            20,
        ),
        build(
            "Spring Break Beach Camp",
            "Enjoy the sun, sand, and surf at our beach camping event. Activities include \
             kayaking, beach volleyball, tide pool exploration, and bonfire nights.",
            day(2026, 3, 25)?,
            day(2026, 3, 29)?,
            "Big Sur, California",
            day(2026, 3, 1)?,
            40,
        ),
    ])
}
