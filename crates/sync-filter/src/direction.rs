//! Direction pre-filtering of sync records

use crate::{Error, Result, StateFilter, StateFilterExt};
use sync_model::{Direction, Directions, SyncRecord};

/// Restricts records to a set of directions, optionally requiring the local
/// side to pass an extra predicate.
///
/// In-sync records never pass, whatever the set.
pub struct DirectionFilter {
    directions: Directions,
    local_guard: Option<Box<dyn StateFilter>>,
}

impl DirectionFilter {
    pub fn new(directions: Directions) -> Self {
        Self {
            directions,
            local_guard: None,
        }
    }

    pub fn incoming() -> Self {
        Self::new(Directions::INCOMING)
    }

    pub fn outgoing() -> Self {
        Self::new(Directions::OUTGOING)
    }

    pub fn conflicting() -> Self {
        Self::new(Directions::CONFLICTING)
    }

    pub fn all() -> Self {
        Self::new(Directions::all())
    }

    /// Additionally require the local side to pass `filter`.
    pub fn require_local(mut self, filter: impl StateFilter + 'static) -> Self {
        self.local_guard = Some(match self.local_guard.take() {
            Some(existing) => existing.and(filter).boxed(),
            None => filter.boxed(),
        });
        self
    }

    /// Reject records whose local side passes `filter`.
    pub fn reject_local(self, filter: impl StateFilter + 'static) -> Self {
        self.require_local(filter.not())
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    pub fn select(&self, record: &SyncRecord) -> bool {
        self.directions.includes(record.direction())
            && self
                .local_guard
                .as_ref()
                .is_none_or(|guard| guard.accept(record.local().view()))
    }

    /// Parse a comma separated list such as `incoming,conflicting`.
    pub fn parse_directions(list: &str) -> Result<Directions> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Directions::empty(), |acc, name| {
                let direction = match name {
                    "all" => return Ok(acc | Directions::all()),
                    other => other.parse::<Direction>().map_err(|_| Error::UnknownDirection {
                        name: other.to_string(),
                    })?,
                };
                match direction {
                    Direction::InSync => Err(Error::UnknownDirection {
                        name: name.to_string(),
                    }),
                    other => Ok(acc | Directions::from(other)),
                }
            })
    }
}

impl std::fmt::Debug for DirectionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionFilter")
            .field("directions", &self.directions)
            .field("guarded", &self.local_guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StandardFilter;
    use sync_model::{LocalResource, LocalState, Resource};

    fn outgoing(state: LocalState) -> SyncRecord {
        SyncRecord::calculate(LocalResource::new(Resource::file("a.txt"), state), None)
    }

    #[test]
    fn in_sync_never_passes() {
        let record = outgoing(LocalState::Normal);
        assert!(!DirectionFilter::all().select(&record));
    }

    #[test]
    fn local_guard_rejects_obstructed() {
        let filter = DirectionFilter::outgoing().reject_local(StandardFilter::Obstructed);
        assert!(filter.select(&outgoing(LocalState::Modified)));
        assert!(!filter.select(&outgoing(LocalState::Obstructed)));
    }

    #[test]
    fn parses_direction_lists() {
        assert_eq!(
            DirectionFilter::parse_directions("incoming, conflicting").unwrap(),
            Directions::INCOMING | Directions::CONFLICTING
        );
        assert_eq!(DirectionFilter::parse_directions("all").unwrap(), Directions::all());
        assert!(DirectionFilter::parse_directions("in_sync").is_err());
        assert!(DirectionFilter::parse_directions("sideways").is_err());
    }
}
