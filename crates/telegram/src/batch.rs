//! Per-chat batching of upload results
//!
//! Users often drop several .torrent files at once. Instead of one reply per
//! file, results are collected per chat and a single summary is sent once no
//! new upload has arrived for the batch window.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use teloxide::prelude::*;
use tokio::task::JoinHandle;

use crate::{keyboards, messages};

/// Outcome of one upload, as shown in the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub file_name: String,
    pub size: u64,
    pub saved: bool,
}

#[derive(Default)]
struct PendingBatch {
    generation: u64,
    entries: Vec<BatchEntry>,
}

#[derive(Default)]
struct Batches {
    next_generation: u64,
    pending: HashMap<ChatId, PendingBatch>,
}

/// Thread-safe collector of upload results keyed by chat
#[derive(Clone, Default)]
pub struct UploadBatcher {
    inner: Arc<Mutex<Batches>>,
}

impl UploadBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the chat's batch and return the batch generation
    ///
    /// Only the holder of the latest generation may drain the batch.
    pub fn push(&self, chat_id: ChatId, entry: BatchEntry) -> u64 {
        let mut batches = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        batches.next_generation += 1;
        let generation = batches.next_generation;

        let batch = batches.pending.entry(chat_id).or_default();
        batch.generation = generation;
        batch.entries.push(entry);
        generation
    }

    /// Drain the chat's batch if `generation` is still the latest one
    pub fn take_if_current(&self, chat_id: ChatId, generation: u64) -> Option<Vec<BatchEntry>> {
        let mut batches = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let current = batches.pending.get(&chat_id).map(|b| b.generation) == Some(generation);
        if !current {
            return None;
        }
        batches.pending.remove(&chat_id).map(|batch| batch.entries)
    }

    /// Number of chats with results waiting to be summarized
    #[cfg(test)]
    fn pending_chats(&self) -> usize {
        let batches = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        batches.pending.len()
    }

    /// Sleep for `window`, then drain the batch if no newer upload arrived
    pub async fn wait_for_batch(
        &self,
        chat_id: ChatId,
        generation: u64,
        window: Duration,
    ) -> Option<Vec<BatchEntry>> {
        tokio::time::sleep(window).await;
        self.take_if_current(chat_id, generation)
    }

    /// Record an entry and start its wait; the handle resolves to the whole
    /// batch for the last upload of a burst and to `None` for the others
    pub fn schedule(
        &self,
        chat_id: ChatId,
        entry: BatchEntry,
        window: Duration,
    ) -> JoinHandle<Option<Vec<BatchEntry>>> {
        let generation = self.push(chat_id, entry);
        let batcher = self.clone();
        tokio::spawn(async move { batcher.wait_for_batch(chat_id, generation, window).await })
    }

    /// Record an upload result and send the summary once the burst is over
    pub fn submit(
        &self,
        bot: Bot,
        chat_id: ChatId,
        user_name: String,
        entry: BatchEntry,
        window: Duration,
    ) {
        let pending = self.schedule(chat_id, entry, window);

        tokio::spawn(async move {
            let entries = match pending.await {
                Ok(Some(entries)) => entries,
                Ok(None) => return,
                Err(err) => {
                    tracing::error!(chat_id = chat_id.0, "Upload batch task failed: {}", err);
                    return;
                }
            };

            let all_failed = entries.iter().all(|e| !e.saved);
            let text = messages::upload_summary_text(&entries, &user_name);
            if let Err(err) = bot
                .send_message(chat_id, text)
                .reply_markup(keyboards::summary_keyboard(all_failed))
                .await
            {
                tracing::error!(chat_id = chat_id.0, "Failed to send upload summary: {}", err);
            }
        });
    }
}
