//! Crop cycle domain events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BlocId, CropCycleId, Timestamp};

use super::CycleType;

/// Events recorded by the crop cycle aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CropCycleEvent {
    /// A new cycle was opened on a bloc.
    Created {
        cycle_id: CropCycleId,
        bloc_id: BlocId,
        cycle_type: CycleType,
        cycle_number: u32,
        created_at: Timestamp,
    },

    /// A cycle was closed after harvest.
    Closed {
        cycle_id: CropCycleId,
        bloc_id: BlocId,
        actual_harvest_date: NaiveDate,
        closed_at: Timestamp,
    },
}

impl CropCycleEvent {
    /// Dotted event name used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            CropCycleEvent::Created { .. } => "crop_cycle.created",
            CropCycleEvent::Closed { .. } => "crop_cycle.closed",
        }
    }
}
