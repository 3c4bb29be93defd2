use crate::state::messages::NetworkRequest;
use knockout_api::{Match, Team, Tournament};
use std::collections::HashMap;

/// Logical resource tags, mirroring the REST resources one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Teams,
    Tournaments,
    Tournament(i64),
    Matches(i64),
}

/// One cached query. Previously fetched data survives a refetch so pages
/// keep rendering while fresh data is on the wire.
#[derive(Debug)]
pub struct Query<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    in_flight: bool,
    stale: bool,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self { data: None, error: None, in_flight: false, stale: true }
    }
}

impl<T> Query<T> {
    /// Mark the query in-flight if it actually needs a fetch. Returns false
    /// while a request is already outstanding, so concurrent readers of the
    /// same key share one request.
    fn begin(&mut self) -> bool {
        // A failed fetch leaves the entry non-stale: errors are terminal for
        // the triggering operation, only an invalidation retries.
        if self.in_flight || !self.stale {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn resolve(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.in_flight = false;
        self.stale = false;
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.in_flight = false;
        self.stale = false;
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
        self.error = None;
    }

    /// True while the first fetch for this key is outstanding.
    pub fn is_pending(&self) -> bool {
        self.in_flight && self.data.is_none()
    }
}

/// Tag-keyed query cache: the single shared resource of the UI loop.
/// Reads go through `ensure`, writes happen only in response handlers.
#[derive(Debug, Default)]
pub struct QueryCache {
    pub teams: Query<Vec<Team>>,
    pub tournaments: Query<Vec<Tournament>>,
    pub tournament: HashMap<i64, Query<Tournament>>,
    pub matches: HashMap<i64, Query<Vec<Match>>>,
}

impl QueryCache {
    /// Request a fetch for `key` if its entry is missing or stale.
    /// Pending entries dedupe: at most one request per key is in flight.
    pub fn ensure(&mut self, key: CacheKey) -> Option<NetworkRequest> {
        let begun = match key {
            CacheKey::Teams => self.teams.begin(),
            CacheKey::Tournaments => self.tournaments.begin(),
            CacheKey::Tournament(id) => self.tournament.entry(id).or_default().begin(),
            CacheKey::Matches(id) => self.matches.entry(id).or_default().begin(),
        };
        begun.then(|| match key {
            CacheKey::Teams => NetworkRequest::LoadTeams,
            CacheKey::Tournaments => NetworkRequest::LoadTournaments,
            CacheKey::Tournament(id) => NetworkRequest::LoadTournament { id },
            CacheKey::Matches(id) => NetworkRequest::LoadMatches { tournament_id: id },
        })
    }

    pub fn invalidate(&mut self, key: CacheKey) {
        match key {
            CacheKey::Teams => self.teams.invalidate(),
            CacheKey::Tournaments => self.tournaments.invalidate(),
            CacheKey::Tournament(id) => {
                if let Some(entry) = self.tournament.get_mut(&id) {
                    entry.invalidate();
                }
            }
            CacheKey::Matches(id) => {
                if let Some(entry) = self.matches.get_mut(&id) {
                    entry.invalidate();
                }
            }
        }
    }

    pub fn fail(&mut self, key: CacheKey, message: String) {
        match key {
            CacheKey::Teams => self.teams.fail(message),
            CacheKey::Tournaments => self.tournaments.fail(message),
            CacheKey::Tournament(id) => self.tournament.entry(id).or_default().fail(message),
            CacheKey::Matches(id) => self.matches.entry(id).or_default().fail(message),
        }
    }

    pub fn tournament_entry(&self, id: i64) -> Option<&Query<Tournament>> {
        self.tournament.get(&id)
    }

    pub fn matches_entry(&self, id: i64) -> Option<&Query<Vec<Match>>> {
        self.matches.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str) -> Team {
        Team { id, name: name.into(), ..Team::default() }
    }

    #[test]
    fn concurrent_readers_share_one_in_flight_request() {
        let mut cache = QueryCache::default();
        assert!(matches!(cache.ensure(CacheKey::Teams), Some(NetworkRequest::LoadTeams)));
        // Second subscriber while the fetch is outstanding: no duplicate.
        assert!(cache.ensure(CacheKey::Teams).is_none());
        assert!(cache.teams.is_pending());
    }

    #[test]
    fn resolved_entry_is_not_refetched_until_invalidated() {
        let mut cache = QueryCache::default();
        cache.ensure(CacheKey::Teams);
        cache.teams.resolve(vec![team(1, "FC Milano")]);
        assert!(cache.ensure(CacheKey::Teams).is_none());

        cache.invalidate(CacheKey::Teams);
        assert!(cache.ensure(CacheKey::Teams).is_some());
        // Stale data stays readable during the refetch.
        assert!(cache.teams.data.is_some());
        assert!(!cache.teams.is_pending());
    }

    #[test]
    fn score_mutation_invalidation_refetches_all_three_keys() {
        let mut cache = QueryCache::default();
        for key in [CacheKey::Matches(7), CacheKey::Tournaments, CacheKey::Tournament(7)] {
            cache.ensure(key);
        }
        cache.matches.get_mut(&7).unwrap().resolve(vec![]);
        cache.tournaments.resolve(vec![]);
        cache.tournament.get_mut(&7).unwrap().resolve(Tournament::default());

        // What the app does after a successful score submit for tournament 7.
        for key in [CacheKey::Matches(7), CacheKey::Tournaments, CacheKey::Tournament(7)] {
            cache.invalidate(key);
        }

        let refetches: Vec<_> = [CacheKey::Matches(7), CacheKey::Tournaments, CacheKey::Tournament(7)]
            .into_iter()
            .filter_map(|k| cache.ensure(k))
            .collect();
        assert_eq!(refetches.len(), 3, "all three keys must refetch");
    }

    #[test]
    fn unrelated_keys_survive_invalidation() {
        let mut cache = QueryCache::default();
        cache.ensure(CacheKey::Matches(7));
        cache.ensure(CacheKey::Matches(9));
        cache.matches.get_mut(&7).unwrap().resolve(vec![]);
        cache.matches.get_mut(&9).unwrap().resolve(vec![]);

        cache.invalidate(CacheKey::Matches(7));
        assert!(cache.ensure(CacheKey::Matches(9)).is_none());
        assert!(cache.ensure(CacheKey::Matches(7)).is_some());
    }

    #[test]
    fn failed_fetch_is_terminal_until_invalidated() {
        let mut cache = QueryCache::default();
        cache.ensure(CacheKey::Tournaments);
        cache.fail(CacheKey::Tournaments, "connection refused".into());
        assert_eq!(cache.tournaments.error.as_deref(), Some("connection refused"));
        // No automatic retry.
        assert!(cache.ensure(CacheKey::Tournaments).is_none());
        // Invalidation clears the error and allows a fresh attempt.
        cache.invalidate(CacheKey::Tournaments);
        assert!(cache.ensure(CacheKey::Tournaments).is_some());
    }
}
