//! Batched multicast with invalid-token cleanup.

use crate::server::{
    data::civic_user::CivicUserRepository,
    provider::{MulticastMessage, PushMessage},
    service::notification::NotificationService,
};

/// Most tokens the push provider accepts in one multicast call.
pub const PUSH_BATCH_LIMIT: usize = 500;

/// Totals over every batch of a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Provider calls made, one per batch
    pub batches: usize,
    /// Tokens the provider accepted
    pub sent: usize,
    /// Batches the provider rejected outright
    pub failed_batches: usize,
    /// Profiles whose unregistered token was cleared
    pub pruned: u64,
}

impl NotificationService<'_> {
    /// Sends `message` to `tokens` in batches of [`PUSH_BATCH_LIMIT`].
    ///
    /// Every batch is attempted even when an earlier one fails. Tokens the provider reports
    /// as unregistered are cleared from their profiles after each batch.
    pub async fn dispatch(&self, tokens: &[String], message: &PushMessage) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for (index, batch) in tokens.chunks(PUSH_BATCH_LIMIT).enumerate() {
            outcome.batches += 1;

            let response = match self
                .push
                .send_multicast(MulticastMessage {
                    tokens: batch,
                    message,
                })
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    outcome.failed_batches += 1;
                    tracing::error!(batch = index, size = batch.len(), error = %e, "Failed to send notification batch");
                    continue;
                }
            };

            outcome.sent += response.success_count().min(batch.len());

            let unregistered = response.unregistered(batch);
            if unregistered.is_empty() {
                continue;
            }

            match CivicUserRepository::new(self.db)
                .clear_fcm_tokens(&unregistered)
                .await
            {
                Ok(cleared) => outcome.pruned += cleared,
                Err(e) => {
                    tracing::warn!(batch = index, tokens = unregistered.len(), error = %e, "Failed to clear unregistered tokens");
                }
            }
        }

        outcome
    }
}
