use crate::geometry::Coordinate;
use crate::prelude::{CoreError, CoreResult};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Column layout expected by [`EventCloud::from_rows`]: x, y, altitude, quality.
pub const MIN_COLUMNS: usize = 4;

/// Located seismic event with its data-quality score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub location: Coordinate,
    pub quality: f64,
}

impl Event {
    pub fn new(location: Coordinate, quality: f64) -> Self {
        Self { location, quality }
    }
}

/// Ordered, immutable set of events. An event's index is its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventCloud {
    events: Vec<Event>,
}

impl EventCloud {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Builds a cloud from a matrix with one event per row.
    ///
    /// Columns beyond the first four are ignored.
    pub fn from_rows(rows: ArrayView2<'_, f64>) -> CoreResult<Self> {
        if rows.nrows() > 0 && rows.ncols() < MIN_COLUMNS {
            return Err(CoreError::MalformedCloud(format!(
                "expected at least {MIN_COLUMNS} columns (x, y, altitude, quality), got {}",
                rows.ncols()
            )));
        }
        let events = rows
            .rows()
            .into_iter()
            .map(|row| Event::new(Coordinate::new(row[0], row[1], row[2]), row[3]))
            .collect();
        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl FromIterator<Event> for EventCloud {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn from_rows_reads_location_and_quality() {
        let rows = array![[0.0, 1.0, 2.0, 3.0, 4.0], [4.0, 7.0, 5.0, 3.0, 4.0]];
        let cloud = EventCloud::from_rows(rows.view()).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(
            cloud.get(1),
            Some(&Event::new(Coordinate::new(4.0, 7.0, 5.0), 3.0))
        );
    }

    #[test]
    fn from_rows_rejects_narrow_matrix() {
        let rows = array![[0.0, 1.0, 2.0]];
        assert!(matches!(
            EventCloud::from_rows(rows.view()),
            Err(CoreError::MalformedCloud(_))
        ));
    }

    #[test]
    fn from_rows_accepts_empty_matrix() {
        let rows = Array2::<f64>::zeros((0, 0));
        let cloud = EventCloud::from_rows(rows.view()).unwrap();
        assert!(cloud.is_empty());
    }
}
