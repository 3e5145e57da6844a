//! Factory functions for in-memory models.
//!
//! Tests adjust the returned models with struct update syntax:
//!
//! ```ignore
//! let admin = entity::civic_user::Model {
//!     role: "admin".to_string(),
//!     ..factory::user("u1")
//! };
//! ```

use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::json;

use crate::constant::TEST_CITY;

/// Active citizen in [`TEST_CITY`] with default preferences and no device token.
pub fn user(uid: &str) -> entity::civic_user::Model {
    let now = Utc::now().naive_utc();
    entity::civic_user::Model {
        uid: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        display_name: format!("User {uid}"),
        photo_url: String::new(),
        role: "citizen".to_string(),
        is_active: true,
        city: Some(TEST_CITY.to_string()),
        language: "en".to_string(),
        theme: "system".to_string(),
        push_enabled: true,
        email_enabled: true,
        whatsapp_enabled: false,
        alerts_enabled: true,
        fcm_token: None,
        token_updated_at: None,
        last_known_latitude: None,
        last_known_longitude: None,
        last_active_at: None,
        total_reports: 0,
        resolved_reports: 0,
        feedback_given: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Active user holding device token `token-{uid}`.
pub fn recipient(uid: &str, role: &str) -> entity::civic_user::Model {
    entity::civic_user::Model {
        role: role.to_string(),
        fcm_token: Some(format!("token-{uid}")),
        token_updated_at: Some(Utc::now().naive_utc()),
        ..user(uid)
    }
}

/// Submitted issue in [`TEST_CITY`], created one hour ago.
pub fn issue(reporter_id: &str) -> entity::issue::Model {
    let created_at = Utc::now().naive_utc() - Duration::hours(1);
    entity::issue::Model {
        id: 0,
        title: "Pothole on Main Street".to_string(),
        city: TEST_CITY.to_string(),
        category: "roads".to_string(),
        priority: "medium".to_string(),
        status: "submitted".to_string(),
        reporter_id: reporter_id.to_string(),
        reporter_name: format!("User {reporter_id}"),
        reporter_email: format!("{reporter_id}@example.com"),
        assigned_department: None,
        feedback_rating: None,
        feedback_comment: None,
        created_at,
        updated_at: created_at,
        resolved_at: None,
    }
}

/// Issue resolved `hours` after it was created.
pub fn resolved_issue(reporter_id: &str, created_at: NaiveDateTime, hours: i64) -> entity::issue::Model {
    let resolved_at = created_at + Duration::hours(hours);
    entity::issue::Model {
        status: "resolved".to_string(),
        created_at,
        updated_at: resolved_at,
        resolved_at: Some(resolved_at),
        ..issue(reporter_id)
    }
}

/// Active alert in [`TEST_CITY`] expiring `expires_in` from now.
pub fn alert(expires_in: Duration) -> entity::alert::Model {
    let now = Utc::now().naive_utc();
    entity::alert::Model {
        id: 0,
        title: "Flooding".to_string(),
        message: "Avoid the riverside".to_string(),
        alert_type: "emergency".to_string(),
        priority: "high".to_string(),
        city: TEST_CITY.to_string(),
        latitude: None,
        longitude: None,
        radius_km: 10.0,
        is_active: true,
        created_by: "admin".to_string(),
        created_at: now,
        expires_at: now + expires_in,
    }
}

/// Bulk notification log written at `created_at`.
pub fn notification_log(created_at: NaiveDateTime) -> entity::notification_log::Model {
    entity::notification_log::Model {
        id: 0,
        kind: "bulk".to_string(),
        title: "Town hall".to_string(),
        audience: "all".to_string(),
        city: Some(TEST_CITY.to_string()),
        targeted: 1,
        sent_count: 1,
        created_at,
    }
}

/// Snapshot for `city` on the day starting at `date`.
pub fn daily_analytics(city: &str, date: NaiveDateTime) -> entity::daily_analytics::Model {
    entity::daily_analytics::Model {
        id: format!("{city}_{}", date.format("%Y-%m-%d")),
        city: city.to_string(),
        date,
        total_issues: 3,
        resolved_issues: 1,
        emergency_issues: 0,
        category_breakdown: json!({ "roads": 2, "lighting": 1 }),
        priority_breakdown: json!({ "medium": 3 }),
        generated_at: Utc::now().naive_utc(),
    }
}
