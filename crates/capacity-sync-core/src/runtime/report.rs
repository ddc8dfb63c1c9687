// crates/capacity-sync-core/src/runtime/report.rs
// ============================================================================
// Module: Sweep Reporters
// Description: Reporter implementations backed by tracing or discarding events.
// Purpose: Route sweep events to the operator-facing log stream.
// Dependencies: crate::interfaces, tracing
// ============================================================================

//! ## Overview
//! [`TracingReporter`] emits each event at the level chosen by
//! [`SweepEvent::level`], with the stable event name as a structured field.
//! Subscriber setup (format, filter) belongs to the binary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::interfaces::ReportLevel;
use crate::interfaces::SweepEvent;
use crate::interfaces::SweepReporter;

// ============================================================================
// SECTION: Reporters
// ============================================================================

/// Reporter that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SweepReporter for TracingReporter {
    fn report(&self, event: &SweepEvent) {
        let name = event.name();
        match event.level() {
            ReportLevel::Silent => {}
            ReportLevel::Info => tracing::info!(event = name, "{event}"),
            ReportLevel::Warn => tracing::warn!(event = name, "{event}"),
            ReportLevel::Error => tracing::error!(event = name, "{event}"),
        }
    }
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl SweepReporter for NoopReporter {
    fn report(&self, _event: &SweepEvent) {}
}
