use crate::model::{
    seed_call_volume, seed_sentiment, slot_label, SentimentSlice, TimeSeriesPoint,
    DEFAULT_SLOT_INDEX,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("index {index} is outside the series (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("series is empty")]
    Empty,
}

/// Call-volume series plus the one slot the edit workflow may overwrite.
///
/// Renderers read `points()` every frame and key any caches on `revision()`,
/// which advances on every successful edit.
#[derive(Debug, Clone)]
pub struct ChartSurface {
    points: Vec<TimeSeriesPoint>,
    sentiment: Vec<SentimentSlice>,
    slot_index: usize,
    revision: u64,
}

impl ChartSurface {
    pub fn new(points: Vec<TimeSeriesPoint>, slot_index: usize) -> Result<Self, SurfaceError> {
        if points.is_empty() {
            return Err(SurfaceError::Empty);
        }
        if slot_index >= points.len() {
            return Err(SurfaceError::IndexOutOfRange {
                index: slot_index,
                len: points.len(),
            });
        }
        Ok(Self {
            points,
            sentiment: seed_sentiment(),
            slot_index,
            revision: 0,
        })
    }

    pub fn seeded() -> Self {
        Self {
            points: seed_call_volume(),
            sentiment: seed_sentiment(),
            slot_index: DEFAULT_SLOT_INDEX,
            revision: 0,
        }
    }

    pub fn with_slot_index(mut self, slot_index: usize) -> Result<Self, SurfaceError> {
        self.set_slot_index(slot_index)?;
        Ok(self)
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn sentiment(&self) -> &[SentimentSlice] {
        &self.sentiment
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn set_slot_index(&mut self, slot_index: usize) -> Result<(), SurfaceError> {
        if slot_index >= self.points.len() {
            return Err(SurfaceError::IndexOutOfRange {
                index: slot_index,
                len: self.points.len(),
            });
        }
        self.slot_index = slot_index;
        Ok(())
    }

    pub fn slot(&self) -> &TimeSeriesPoint {
        &self.points[self.slot_index]
    }

    pub fn slot_label(&self) -> String {
        slot_label(self.slot())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the value at `index`; the label and every other point stay as they are.
    pub fn apply_edit(&mut self, index: usize, new_value: f64) -> Result<(), SurfaceError> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(SurfaceError::IndexOutOfRange { index, len })?;
        point.value = new_value;
        self.revision += 1;
        Ok(())
    }

    /// Applies a completed edit to the slot.
    pub fn report_edit(&mut self, email: &str, new_value: f64) -> Result<(), SurfaceError> {
        self.apply_edit(self.slot_index, new_value)?;
        log::info!("Updated by {email}: {new_value}");
        Ok(())
    }

    /// Smallest and largest value in the series.
    pub fn value_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
                (min.min(point.value), max.max(point.value))
            })
    }
}

impl Default for ChartSurface {
    fn default() -> Self {
        Self::seeded()
    }
}
