//! Push notification dispatch.
//!
//! Resolves an audience to device tokens, sends them to the push provider in batches and
//! removes tokens the provider reports as permanently invalid. A failed batch is logged and
//! the remaining batches still go out; nothing about delivery is reported back as an error.

pub mod dispatch;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::notification::{
        BulkNotificationDto, BulkNotificationRequest, EmergencyAlertDto, EmergencyAlertRequest,
    },
    server::{
        data::{
            alert::{AlertRepository, NewAlert},
            civic_user::{CivicUserRepository, RecipientFilter},
            notification_log::{NewNotificationLog, NotificationLogRepository},
        },
        error::{request::RequestError, Error},
        model::{
            auth::{authorize, Caller, Permission},
            db::UserModel,
            notification::{Audience, NotificationKind},
        },
        provider::{AndroidConfig, ApnsConfig, PushMessage, PushProvider},
        util::{
            geo::{haversine_km, Coordinates},
            validate::required,
        },
    },
};

pub use dispatch::{DispatchOutcome, PUSH_BATCH_LIMIT};

/// Radius used when an alert does not specify one.
pub const DEFAULT_ALERT_RADIUS_KM: f64 = 10.0;

/// Priority recorded on alerts that do not specify one.
pub const DEFAULT_ALERT_PRIORITY: &str = "high";

/// How long an alert stays active before the janitor deactivates it.
pub fn alert_lifetime() -> Duration {
    Duration::hours(24)
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    push: &'a dyn PushProvider,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(db: &'a DatabaseConnection, push: &'a dyn PushProvider) -> Self {
        Self { db, push }
    }

    /// Sends a notification to every opted-in user of an audience.
    ///
    /// # Arguments
    /// - `caller` - Must hold [`Permission::SendBulkNotification`]
    /// - `request` - Title and body (required), audience, optional city scope and data
    ///
    /// # Returns
    /// - `Ok(BulkNotificationDto)` - Dispatch finished; `sentCount` counts successful deliveries
    /// - `Err(Error::AuthError)` - Caller is not an admin
    /// - `Err(Error::RequestError)` - Title or body missing
    /// - `Err(Error::DbErr)` - Recipients could not be loaded
    pub async fn send_bulk_notification(
        &self,
        caller: &Caller,
        request: BulkNotificationRequest,
        now: DateTime<Utc>,
    ) -> Result<BulkNotificationDto, Error> {
        authorize(caller, Permission::SendBulkNotification)?;
        let missing = "Title and body are required";
        let title = required(request.title, missing)?;
        let body = required(request.body, missing)?;
        let audience = Audience::parse(request.target_audience.as_deref());
        let city = request.city.filter(|c| !c.trim().is_empty());

        let recipients = CivicUserRepository::new(self.db)
            .find_recipients(&RecipientFilter {
                role: audience.role(),
                city: city.as_deref(),
                push_enabled: true,
                alerts_enabled: false,
            })
            .await?;

        let tokens = device_tokens(recipients);
        if tokens.is_empty() {
            return Ok(BulkNotificationDto {
                success: true,
                message: "No users to notify".to_string(),
                sent_count: 0,
                total_targeted: 0,
            });
        }

        let mut message = PushMessage::new(title.clone(), body);
        message.data = request.data.unwrap_or_default();

        let outcome = self.dispatch(&tokens, &message).await;
        self.record(NewNotificationLog {
            kind: NotificationKind::Bulk,
            title: &title,
            audience: audience.as_str(),
            city: city.as_deref(),
            targeted: tokens.len(),
            sent_count: outcome.sent,
            created_at: now.naive_utc(),
        })
        .await;

        tracing::info!(
            audience = audience.as_str(),
            sent = outcome.sent,
            targeted = tokens.len(),
            "Sent bulk notification"
        );

        Ok(BulkNotificationDto {
            success: true,
            message: "Bulk notification sent successfully".to_string(),
            sent_count: outcome.sent as u64,
            total_targeted: tokens.len() as u64,
        })
    }

    /// Persists an emergency alert and pushes it to opted-in users near its location.
    ///
    /// Recipients without a known location always receive the alert; with both locations
    /// known, recipients farther than the radius are skipped.
    ///
    /// # Returns
    /// - `Ok(EmergencyAlertDto)` - Alert stored and dispatched
    /// - `Err(Error::AuthError)` - Caller is not an authority or admin
    /// - `Err(Error::RequestError)` - Title, message or city missing, or a negative radius
    /// - `Err(Error::DbErr)` - The alert could not be stored or recipients loaded
    pub async fn send_emergency_alert(
        &self,
        caller: &Caller,
        request: EmergencyAlertRequest,
        now: DateTime<Utc>,
    ) -> Result<EmergencyAlertDto, Error> {
        authorize(caller, Permission::SendEmergencyAlert)?;
        let missing = "Title, message, and city are required";
        let title = required(request.title, missing)?;
        let body = required(request.message, missing)?;
        let city = required(request.city, missing)?;
        let radius_km = alert_radius(request.radius_km)?;
        let priority = request
            .priority
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALERT_PRIORITY.to_string());

        let created_at = now.naive_utc();
        let alert = AlertRepository::new(self.db)
            .create(NewAlert {
                title: title.clone(),
                message: body.clone(),
                priority,
                city: city.clone(),
                location: request.location.map(|l| (l.latitude, l.longitude)),
                radius_km,
                created_by: caller.uid.clone(),
                created_at,
                expires_at: created_at + alert_lifetime(),
            })
            .await?;

        let recipients = CivicUserRepository::new(self.db)
            .find_recipients(&RecipientFilter {
                city: Some(&city),
                alerts_enabled: true,
                ..Default::default()
            })
            .await?;

        let center = request
            .location
            .map(|l| Coordinates::new(l.latitude, l.longitude));
        let tokens = device_tokens(
            recipients
                .into_iter()
                .filter(|user| within_radius(center, user, radius_km))
                .collect(),
        );

        let mut sent = 0;
        if !tokens.is_empty() {
            let message = emergency_message(alert.id, &title, &body);
            sent = self.dispatch(&tokens, &message).await.sent;
            self.record(NewNotificationLog {
                kind: NotificationKind::Emergency,
                title: &title,
                audience: Audience::All.as_str(),
                city: Some(&city),
                targeted: tokens.len(),
                sent_count: sent,
                created_at,
            })
            .await;
        }

        tracing::info!(
            alert_id = alert.id,
            city = %city,
            sent,
            targeted = tokens.len(),
            "Sent emergency alert"
        );

        Ok(EmergencyAlertDto {
            success: true,
            message: "Emergency alert sent successfully".to_string(),
            alert_id: alert.id,
            sent_count: sent as u64,
            total_targeted: tokens.len() as u64,
        })
    }

    /// Writes the dispatch log row; a failure is logged since delivery already happened.
    async fn record(&self, log: NewNotificationLog<'_>) {
        if let Err(e) = NotificationLogRepository::new(self.db).create(log).await {
            tracing::error!(error = %e, "Failed to write notification log");
        }
    }
}

fn device_tokens(recipients: Vec<UserModel>) -> Vec<String> {
    recipients
        .into_iter()
        .filter_map(|user| user.fcm_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Missing or zero radius falls back to [`DEFAULT_ALERT_RADIUS_KM`].
fn alert_radius(radius_km: Option<f64>) -> Result<f64, RequestError> {
    match radius_km {
        None => Ok(DEFAULT_ALERT_RADIUS_KM),
        Some(radius) if !radius.is_finite() || radius < 0.0 => {
            Err(RequestError::invalid("radiusKm must be a non-negative number"))
        }
        Some(radius) if radius == 0.0 => Ok(DEFAULT_ALERT_RADIUS_KM),
        Some(radius) => Ok(radius),
    }
}

/// Whether a recipient is inside the alert radius. Unknown locations on either side count as inside.
fn within_radius(center: Option<Coordinates>, user: &UserModel, radius_km: f64) -> bool {
    let (Some(center), Some(latitude), Some(longitude)) =
        (center, user.last_known_latitude, user.last_known_longitude)
    else {
        return true;
    };

    haversine_km(center, Coordinates::new(latitude, longitude)) <= radius_km
}

fn emergency_message(alert_id: i32, title: &str, body: &str) -> PushMessage {
    let mut message = PushMessage::new(format!("🚨 EMERGENCY: {title}"), body);
    message.data.insert("type".to_string(), "emergency_alert".to_string());
    message.data.insert("alertId".to_string(), alert_id.to_string());
    message.data.insert("priority".to_string(), "high".to_string());
    message.android = Some(AndroidConfig {
        high_priority: true,
        sound: Some("default".to_string()),
        default_vibrate: true,
    });
    message.apns = Some(ApnsConfig {
        sound: "default".to_string(),
        badge: 1,
    });
    message
}
