use crate::core::ocs::OcsEnvelope;
use crate::domain::model::ProbeOutcome;
use crate::domain::ports::Probe;
use crate::utils::error::Result;
use std::io::Write;
use std::time::Instant;

pub struct ProbeRunner<P: Probe> {
    probe: P,
    summary: bool,
}

impl<P: Probe> ProbeRunner<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            summary: false,
        }
    }

    /// 在原始輸出後附加一行 OCS 摘要
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// 執行一次探測並把結果寫到 `out`。只有寫入 `out` 失敗才會回傳錯誤
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ProbeOutcome> {
        let target = self.probe.target();
        writeln!(out, "Connecting to {}...", target)?;
        out.flush()?;

        let started = Instant::now();
        let outcome = self.probe.run().await;
        let elapsed = started.elapsed();

        match &outcome {
            ProbeOutcome::Success { status, body } => tracing::info!(
                "✅ {} answered {} ({} bytes) in {:?}",
                target,
                status,
                body.len(),
                elapsed
            ),
            ProbeOutcome::HttpError { status, .. } => {
                tracing::warn!("⚠️ {} answered {} in {:?}", target, status, elapsed)
            }
            ProbeOutcome::BodyError { status, message } => tracing::warn!(
                "⚠️ {} answered {} but the body could not be read: {}",
                target,
                status,
                message
            ),
            ProbeOutcome::Failure { message } => {
                tracing::warn!("❌ {} unreachable after {:?}: {}", target, elapsed, message)
            }
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(outcome_json) = serde_json::to_string(&outcome) {
                tracing::debug!(
                    outcome = %outcome_json,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "probe finished"
                );
            }
        }

        writeln!(out, "{}", outcome.render())?;

        if self.summary {
            if let Some(line) = summarize(&outcome) {
                writeln!(out, "Summary: {}", line)?;
            }
        }

        out.flush()?;
        Ok(outcome)
    }
}

fn summarize(outcome: &ProbeOutcome) -> Option<String> {
    let body = outcome.body()?;
    match OcsEnvelope::parse(body) {
        Some(envelope) => Some(envelope.describe()),
        None => {
            tracing::debug!("Response body is not an OCS envelope, no summary");
            None
        }
    }
}
