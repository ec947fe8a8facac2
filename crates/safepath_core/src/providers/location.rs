use anyhow::Result;
use std::collections::VecDeque;

use crate::formats::TrackPoint;
use crate::geo::GeoPoint;
use crate::providers::LocationSource;

/// A location set by hand (the "place the person on the map" simulation).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<GeoPoint>);

impl FixedLocation {
    pub fn new(point: GeoPoint) -> Self {
        Self(Some(point))
    }
}

impl LocationSource for FixedLocation {
    fn current(&mut self) -> Result<Option<GeoPoint>> {
        Ok(self.0)
    }
}

/// Replays a recorded track one point per call, like successive device
/// geolocation updates. Returns `None` once the track is exhausted.
#[derive(Debug, Clone, Default)]
pub struct TrackReplay {
    pending: VecDeque<TrackPoint>,
    last: Option<TrackPoint>,
}

impl TrackReplay {
    pub fn new(track: Vec<TrackPoint>) -> Self {
        Self {
            pending: track.into(),
            last: None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// The sample returned by the last successful [`LocationSource::current`] call.
    pub fn last(&self) -> Option<&TrackPoint> {
        self.last.as_ref()
    }
}

impl LocationSource for TrackReplay {
    fn current(&mut self) -> Result<Option<GeoPoint>> {
        let next = self.pending.pop_front();
        let point = next.as_ref().map(|tp| tp.point);
        if next.is_some() {
            self.last = next;
        }
        Ok(point)
    }
}
