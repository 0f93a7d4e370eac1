//! Weekly report export: a channel's post log as a pretty JSON document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cbot_core::{Bot, Document};
use channel_state::ChannelStore;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument};

use crate::error::ReportError;

pub const REPORT_CAPTION: &str = "Your weekly report. You can send this file to the bot's creator for content analysis and recommendations.";

/// `weekly_report_<channel_id>_<YYYYMMDD>.json`
pub fn report_filename(channel_id: i64, date: NaiveDate) -> String {
    format!("weekly_report_{}_{}.json", channel_id, date.format("%Y%m%d"))
}

/// Serialized report for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub record_count: usize,
}

#[derive(Clone)]
pub struct ReportExporter {
    store: ChannelStore,
    report_dir: PathBuf,
    bot: Arc<dyn Bot>,
}

impl ReportExporter {
    pub fn new(store: ChannelStore, report_dir: impl AsRef<Path>, bot: Arc<dyn Bot>) -> Self {
        Self {
            store,
            report_dir: report_dir.as_ref().to_path_buf(),
            bot,
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Builds the report for `channel_id`, records in insertion order. `None` when the channel has no records.
    pub async fn build(
        &self,
        channel_id: i64,
        date: NaiveDate,
    ) -> Result<Option<ReportArtifact>, ReportError> {
        let records = self.store.posts_for(channel_id).await;
        if records.is_empty() {
            return Ok(None);
        }
        let bytes = serde_json::to_vec_pretty(&records)?;
        Ok(Some(ReportArtifact {
            filename: report_filename(channel_id, date),
            bytes,
            record_count: records.len(),
        }))
    }

    /// Builds today's report, writes it into the report directory (replacing a same-day file) and
    /// sends it to `chat_id` as a document. Does nothing when there are no records.
    #[instrument(skip(self), fields(report_dir = %self.report_dir.display()))]
    pub async fn export_channel(&self, chat_id: i64) -> Result<Option<ReportArtifact>, ReportError> {
        let Some(artifact) = self.build(chat_id, Utc::now().date_naive()).await? else {
            debug!(chat_id, "No records, report skipped");
            return Ok(None);
        };

        tokio::fs::create_dir_all(&self.report_dir).await?;
        let path = self.report_dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes).await?;
        info!(
            chat_id,
            path = %path.display(),
            records = artifact.record_count,
            "Report written"
        );

        let document = Document::new(artifact.filename.clone(), artifact.bytes.clone());
        self.bot
            .send_document(chat_id, document, Some(REPORT_CAPTION))
            .await?;
        info!(chat_id, "Report sent");
        Ok(Some(artifact))
    }
}
