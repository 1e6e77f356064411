//! Nearest-peak matching.
//!
//! Every query fetches a fresh snapshot from the catalog, measures the
//! great-circle distance from the query point to each peak, and applies the
//! threshold and ranking policy:
//!
//! - `max_distance_m` is inclusive: a peak exactly on the threshold matches.
//! - Equal distances keep catalog order. [`PeakMatcher::find_nearest`] returns
//!   the first of several equidistant peaks; [`PeakMatcher::find_nearest_n`]
//!   uses a stable sort.
//! - An empty catalog, or nothing within range, is an empty result.
//! - Catalog entries with an out-of-range or non-finite position are skipped.

use crate::catalog::PeakCatalog;
use crate::error::MatchError;
use crate::model::{Peak, PeakMatch};
use summit_geo::{validate_distance, within_radius, Coordinate};
use tracing::{debug, warn};

/// Radius for single-best lookups when the caller has no better value.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 5000.0;

/// Result count for ranked lookups when the caller has no better value.
pub const DEFAULT_LIMIT: usize = 5;

/// Result alias for matcher operations over catalog `C`.
pub type MatchResult<T, C> = Result<T, MatchError<<C as PeakCatalog>::Error>>;

/// Ranks catalog peaks by distance from a point.
#[derive(Debug, Clone)]
pub struct PeakMatcher<C> {
    catalog: C,
}

impl<C: PeakCatalog> PeakMatcher<C> {
    /// Creates a matcher over the given catalog.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The closest peak to `point`, if any lies within `max_distance_m`.
    ///
    /// Without a threshold the closest peak in the whole catalog is returned.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidInput`] for an out-of-range point or a negative or
    /// non-finite threshold; [`MatchError::Catalog`] when the catalog fails.
    pub fn find_nearest(
        &self,
        point: Coordinate,
        max_distance_m: Option<f64>,
    ) -> MatchResult<Option<PeakMatch>, C> {
        validate_query::<C::Error>(point, max_distance_m)?;
        let candidates = self.candidates(point, max_distance_m)?;

        let nearest = candidates.into_iter().fold(None::<PeakMatch>, |best, candidate| match best {
            Some(best) if best.distance <= candidate.distance => Some(best),
            _ => Some(candidate),
        });

        debug!(
            %point,
            max_distance_m,
            matched = nearest.as_ref().map(|m| m.peak.name.as_str()),
            distance_m = nearest.as_ref().map(|m| m.distance),
            "Nearest peak lookup"
        );

        Ok(nearest)
    }

    /// Up to `limit` peaks within `max_distance_m`, closest first.
    ///
    /// A `limit` of zero yields an empty list without touching the catalog.
    ///
    /// # Errors
    ///
    /// Same as [`PeakMatcher::find_nearest`].
    pub fn find_nearest_n(
        &self,
        point: Coordinate,
        max_distance_m: Option<f64>,
        limit: usize,
    ) -> MatchResult<Vec<PeakMatch>, C> {
        validate_query::<C::Error>(point, max_distance_m)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut candidates = self.candidates(point, max_distance_m)?;
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        candidates.truncate(limit);

        debug!(
            %point,
            max_distance_m,
            limit,
            returned = candidates.len(),
            "Ranked peak lookup"
        );

        Ok(candidates)
    }

    /// Peaks within range, paired with their distance, in catalog order.
    ///
    /// Expects an already validated query.
    fn candidates(&self, point: Coordinate, max_distance_m: Option<f64>) -> MatchResult<Vec<PeakMatch>, C> {
        let mut peaks = self.catalog.get_all_peaks().map_err(MatchError::Catalog)?;
        peaks.retain(|peak| match peak.coordinate().validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(peak_id = peak.id, name = %peak.name, error = %e, "Skipping catalog peak");
                false
            }
        });
        if peaks.is_empty() {
            return Ok(Vec::new());
        }

        let locations: Vec<Coordinate> = peaks.iter().map(Peak::coordinate).collect();
        let hits = within_radius(&point, &locations, max_distance_m.unwrap_or(f64::INFINITY));

        let mut peaks: Vec<Option<Peak>> = peaks.into_iter().map(Some).collect();
        Ok(hits
            .into_iter()
            .filter_map(|(index, distance)| {
                peaks[index].take().map(|peak| PeakMatch { peak, distance })
            })
            .collect())
    }
}

fn validate_query<E: std::error::Error + 'static>(
    point: Coordinate,
    max_distance_m: Option<f64>,
) -> Result<(), MatchError<E>> {
    point.validate()?;
    if let Some(max) = max_distance_m {
        validate_distance(max)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::seed::polish_peaks;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::fmt;

    const NEAR_RYSY: Coordinate = Coordinate::new(49.1794, 20.0880);
    const NEAR_SNIEZKA: Coordinate = Coordinate::new(50.7360, 15.7401);
    const WARSAW: Coordinate = Coordinate::new(52.2297, 21.0122);

    fn rysy() -> Peak {
        Peak::new(1, "Rysy", 2499, 49.1795, 20.0881, "Tatry")
    }

    fn giewont() -> Peak {
        Peak::new(2, "Giewont", 1894, 49.2522, 19.9344, "Tatry")
    }

    fn babia_gora() -> Peak {
        Peak::new(3, "Babia Góra", 1725, 49.5731, 19.5292, "Beskidy")
    }

    fn matcher(peaks: Vec<Peak>) -> PeakMatcher<InMemoryCatalog> {
        PeakMatcher::new(InMemoryCatalog::new(peaks))
    }

    /// Catalog double that counts fetches and can be told to fail.
    struct CountingCatalog {
        peaks: Vec<Peak>,
        fail: bool,
        calls: Cell<usize>,
    }

    #[derive(Debug, PartialEq)]
    struct StoreDown;

    impl fmt::Display for StoreDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("peak store unreachable")
        }
    }

    impl std::error::Error for StoreDown {}

    impl PeakCatalog for CountingCatalog {
        type Error = StoreDown;

        fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            if self.fail { Err(StoreDown) } else { Ok(self.peaks.clone()) }
        }
    }

    #[test]
    fn test_find_nearest_close_to_rysy() {
        let matcher = matcher(vec![rysy(), giewont()]);
        let found = matcher.find_nearest(NEAR_RYSY, Some(5000.0)).unwrap().unwrap();

        assert_eq!(found.peak.name, "Rysy");
        assert_eq!(found.peak_id(), 1);
        assert!(found.distance < 20.0, "distance {}", found.distance);
    }

    #[test]
    fn test_find_nearest_too_far() {
        let matcher = matcher(vec![rysy()]);
        assert!(matcher.find_nearest(WARSAW, Some(5000.0)).unwrap().is_none());
    }

    #[test]
    fn test_find_nearest_without_threshold_returns_closest() {
        let matcher = matcher(vec![rysy(), babia_gora()]);
        let found = matcher.find_nearest(WARSAW, None).unwrap().unwrap();
        assert_eq!(found.peak.name, "Babia Góra");
        assert!(found.distance > 5000.0);
    }

    #[test]
    fn test_find_nearest_from_seed_catalog() {
        let matcher = matcher(polish_peaks());
        let found = matcher.find_nearest(NEAR_SNIEZKA, Some(1000.0)).unwrap().unwrap();
        assert_eq!(found.peak.name, "Śnieżka");
        assert!(found.distance < 100.0);
    }

    #[test]
    fn test_empty_catalog_is_not_an_error() {
        let matcher = matcher(Vec::new());
        assert!(matcher.find_nearest(NEAR_RYSY, Some(5000.0)).unwrap().is_none());
        assert!(matcher.find_nearest(NEAR_RYSY, None).unwrap().is_none());
        assert!(matcher.find_nearest_n(NEAR_RYSY, None, 5).unwrap().is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let peak = rysy();
        let exact = summit_geo::haversine_distance_meters(&NEAR_RYSY, &peak.coordinate());
        let matcher = matcher(vec![peak]);

        assert!(matcher.find_nearest(NEAR_RYSY, Some(exact)).unwrap().is_some());
        assert_eq!(matcher.find_nearest_n(NEAR_RYSY, Some(exact), 5).unwrap().len(), 1);
        assert!(matcher.find_nearest(NEAR_RYSY, Some(exact - 1e-6)).unwrap().is_none());
    }

    #[test]
    fn test_find_nearest_tie_keeps_catalog_order() {
        let first = Peak::new(10, "Twin A", 1000, 49.0, 20.0, "Test");
        let second = Peak::new(11, "Twin B", 1000, 49.0, 20.0, "Test");
        let point = Coordinate::new(49.01, 20.0);

        let found = matcher(vec![first.clone(), second.clone()]).find_nearest(point, None).unwrap().unwrap();
        assert_eq!(found.peak.id, 10);

        let found = matcher(vec![second, first]).find_nearest(point, None).unwrap().unwrap();
        assert_eq!(found.peak.id, 11);
    }

    #[test]
    fn test_find_nearest_n_limit_two() {
        let matcher = matcher(vec![babia_gora(), giewont(), rysy()]);
        let found = matcher.find_nearest_n(NEAR_RYSY, None, 2).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].peak.name, "Rysy");
        assert_eq!(found[1].peak.name, "Giewont");
        assert!(found[0].distance < found[1].distance);
    }

    #[test]
    fn test_find_nearest_n_filters_by_threshold() {
        let matcher = matcher(vec![rysy(), giewont(), babia_gora()]);
        let found = matcher.find_nearest_n(NEAR_RYSY, Some(15_000.0), 5).unwrap();

        // Giewont is ~13 km away, Babia Góra ~60 km
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.distance <= 15_000.0));
    }

    #[test]
    fn test_find_nearest_n_stable_for_ties() {
        let peaks: Vec<Peak> = (0..4)
            .map(|i| Peak::new(i, format!("Twin {i}"), 1000, 49.0, 20.0, "Test"))
            .collect();
        let found = matcher(peaks).find_nearest_n(Coordinate::new(49.1, 20.0), None, 3).unwrap();

        let ids: Vec<_> = found.iter().map(|m| m.peak.id).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn test_limit_zero_returns_empty_without_fetch() {
        let catalog = CountingCatalog { peaks: vec![rysy()], fail: false, calls: Cell::new(0) };
        let matcher = PeakMatcher::new(&catalog);

        assert!(matcher.find_nearest_n(NEAR_RYSY, None, 0).unwrap().is_empty());
        assert_eq!(catalog.calls.get(), 0);
    }

    #[test]
    fn test_catalog_fetched_once_per_query() {
        let catalog = CountingCatalog { peaks: vec![rysy(), giewont()], fail: false, calls: Cell::new(0) };
        let matcher = PeakMatcher::new(&catalog);

        matcher.find_nearest(NEAR_RYSY, None).unwrap();
        matcher.find_nearest_n(NEAR_RYSY, None, 5).unwrap();
        assert_eq!(catalog.calls.get(), 2);
    }

    #[test]
    fn test_catalog_error_propagates_unchanged() {
        let catalog = CountingCatalog { peaks: Vec::new(), fail: true, calls: Cell::new(0) };
        let matcher = PeakMatcher::new(catalog);

        let err = matcher.find_nearest(NEAR_RYSY, Some(5000.0)).unwrap_err();
        assert_eq!(err.catalog_error(), Some(&StoreDown));
        assert_eq!(err.to_string(), "peak store unreachable");
        assert!(!err.is_invalid_input());

        let err = matcher.find_nearest_n(NEAR_RYSY, None, 5).unwrap_err();
        assert!(matches!(err, MatchError::Catalog(StoreDown)));
    }

    #[test]
    fn test_invalid_point_rejected_before_fetch() {
        let catalog = CountingCatalog { peaks: vec![rysy()], fail: false, calls: Cell::new(0) };
        let matcher = PeakMatcher::new(&catalog);

        let err = matcher.find_nearest(Coordinate::new(f64::NAN, 20.0), None).unwrap_err();
        assert!(err.is_invalid_input());

        let err = matcher.find_nearest_n(Coordinate::new(49.0, 200.0), None, 5).unwrap_err();
        assert!(err.is_invalid_input());

        let err = matcher.find_nearest(NEAR_RYSY, Some(-1.0)).unwrap_err();
        assert!(err.is_invalid_input());

        assert_eq!(catalog.calls.get(), 0);
    }

    #[test]
    fn test_catalog_peak_with_bad_position_is_skipped() {
        let broken = Peak::new(9, "Broken", 1000, f64::NAN, 20.0, "Test");
        let far_off = Peak::new(8, "Far Off", 1000, 49.18, 200.0, "Test");
        let matcher = matcher(vec![rysy(), broken, far_off]);

        let nearest = matcher.find_nearest(NEAR_RYSY, None).unwrap().unwrap();
        let ranked = matcher.find_nearest_n(NEAR_RYSY, None, 5).unwrap();

        assert_eq!(nearest.peak.name, "Rysy");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0], nearest);
        assert!(nearest.distance >= 0.0 && nearest.distance < 20.0);
    }

    fn scattered_peaks() -> impl Strategy<Value = Vec<Peak>> {
        prop::collection::vec((48.0f64..51.0, 14.0f64..24.0), 0..40).prop_map(|locations| {
            locations
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| Peak::new(i as i64, format!("P{i}"), 1000, lat, lon, "Test"))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_ranked_results_hold_invariants(
            peaks in scattered_peaks(),
            lat in 48.0f64..51.0,
            lon in 14.0f64..24.0,
            max in prop::option::of(0.0f64..300_000.0),
            limit in 0usize..10,
        ) {
            let total = peaks.len();
            let matcher = matcher(peaks);
            let point = Coordinate::new(lat, lon);
            let found = matcher.find_nearest_n(point, max, limit).unwrap();

            prop_assert!(found.len() <= limit);
            prop_assert!(found.len() <= total);
            prop_assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
            prop_assert!(found.iter().all(|m| m.distance >= 0.0));
            if let Some(max) = max {
                prop_assert!(found.iter().all(|m| m.distance <= max));
            }

            let nearest = matcher.find_nearest(point, max).unwrap();
            match (found.first(), nearest) {
                (Some(first), Some(nearest)) => prop_assert_eq!(first, &nearest),
                (None, None) => {}
                (None, Some(_)) => prop_assert_eq!(limit, 0),
                (Some(_), None) => prop_assert!(false, "ranked result without a nearest match"),
            }
        }
    }
}
