use std::path::Path;

use ek_arena::{Announcement, CastRecord, KillEvent};
use ek_core::{Millis, UnitId};
use ek_script::Phase;

use crate::error::SimResult;
use crate::observer::EncounterObserver;
use crate::runner::{EncounterResult, RunReport};

// ── Rows ──────────────────────────────────────────────────────────────────────

/// One timeline event, flattened for CSV output.
///
/// `target` is [`UnitId::INVALID`]'s inner value when the event has no
/// second party. `value` is kind-specific: the line id for `announce`,
/// the spell id for `cast`, the phase name for `phase`, empty otherwise.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TranscriptRow {
    pub at:     Millis,
    pub kind:   &'static str,
    pub unit:   u32,
    pub target: u32,
    pub value:  String,
}

/// An ordered event timeline collected over one attempt.
#[derive(Default)]
pub struct Transcript {
    rows: Vec<TranscriptRow>,
}

impl Transcript {
    pub fn rows(&self) -> &[TranscriptRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the timeline to `path` as CSV, one row per event, with a
    /// header derived from the row fields.
    pub fn write_csv(&self, path: &Path) -> SimResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn push(&mut self, row: TranscriptRow) {
        self.rows.push(row);
    }
}

// ── Recording observer ────────────────────────────────────────────────────────

/// Observer that records every event into a [`Transcript`].
#[derive(Default)]
pub struct RecordingObserver {
    transcript: Transcript,
    result:     Option<(EncounterResult, Millis)>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The resolution seen in `on_run_end`, if the run finished.
    pub fn result(&self) -> Option<(EncounterResult, Millis)> {
        self.result
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }
}

impl EncounterObserver for RecordingObserver {
    fn on_announcement(&mut self, announcement: &Announcement) {
        self.transcript.push(TranscriptRow {
            at:     announcement.at,
            kind:   "announce",
            unit:   announcement.unit.0,
            target: UnitId::INVALID.0,
            value:  announcement.line.0.to_string(),
        });
    }

    fn on_cast(&mut self, cast: &CastRecord) {
        self.transcript.push(TranscriptRow {
            at:     cast.at,
            kind:   "cast",
            unit:   cast.caster.0,
            target: cast.target.0,
            value:  cast.spell.0.to_string(),
        });
    }

    fn on_kill(&mut self, kill: &KillEvent) {
        self.transcript.push(TranscriptRow {
            at:     kill.at,
            kind:   "kill",
            unit:   kill.killer.0,
            target: kill.victim.0,
            value:  String::new(),
        });
    }

    fn on_summon(&mut self, unit: UnitId, at: Millis) {
        self.transcript.push(TranscriptRow {
            at,
            kind:   "summon",
            unit:   unit.0,
            target: UnitId::INVALID.0,
            value:  String::new(),
        });
    }

    fn on_phase_change(&mut self, at: Millis, _from: Phase, to: Phase) {
        self.transcript.push(TranscriptRow {
            at,
            kind:   "phase",
            unit:   UnitId::INVALID.0,
            target: UnitId::INVALID.0,
            value:  to.as_str().to_string(),
        });
    }

    fn on_run_end(&mut self, result: EncounterResult, elapsed: Millis) {
        self.result = Some((result, elapsed));
    }
}

// ── Batch report writer ───────────────────────────────────────────────────────

/// Writes one CSV line per [`RunReport`], with a header row.
pub fn write_batch_report(path: &Path, reports: &[RunReport]) -> SimResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "seed",
        "result",
        "elapsed_ms",
        "ticks",
        "final_phase",
        "announcements",
        "casts",
        "summons",
        "kills",
    ])?;
    for report in reports {
        writer.write_record(&[
            report.seed.to_string(),
            report.result.as_str().to_string(),
            report.elapsed.0.to_string(),
            report.ticks.to_string(),
            report.final_phase.as_str().to_string(),
            report.announcements.to_string(),
            report.casts.to_string(),
            report.summons.to_string(),
            report.kills.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
