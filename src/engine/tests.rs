use super::*;
use crate::cache::{MemoryCache, MockPersistentCache};
use crate::constants::test_constants::*;
use crate::geo::Coordinates;
use crate::location::{ScriptedLocation, ScriptedOutcome};
use chrono::{Duration, NaiveDate, Timelike};
use chrono_tz::America::New_York;
use std::time::Instant;

fn nyc() -> Coordinates {
    Coordinates::new(TEST_NYC_LATITUDE, TEST_NYC_LONGITUDE).unwrap()
}

fn london() -> Coordinates {
    Coordinates::new(TEST_LONDON_LATITUDE, TEST_LONDON_LONGITUDE).unwrap()
}

fn test_policy() -> EnginePolicy {
    EnginePolicy {
        location_timeout: std::time::Duration::from_millis(TEST_SHORT_TIMEOUT_MS),
        ..EnginePolicy::default()
    }
}

fn engine(
    cache: &Arc<MemoryCache>,
    source: &Arc<ScriptedLocation>,
) -> ThemeEngine<Arc<MemoryCache>> {
    let location: Arc<dyn LocationSource> = source.clone();
    ThemeEngine::new(Arc::clone(cache), location, test_policy())
}

fn seed(cache: &MemoryCache, fix: &GeoFix) {
    cache
        .set(DEFAULT_CACHE_KEY, &encode_fix(fix).unwrap())
        .unwrap();
}

fn stored(cache: &MemoryCache, now: DateTime<Utc>) -> Option<GeoFix> {
    cache
        .get(DEFAULT_CACHE_KEY)
        .unwrap()
        .map(|raw| decode_fix(&raw, now).unwrap())
}

fn new_york(h: u32, m: u32) -> DateTime<chrono_tz::Tz> {
    New_York.with_ymd_and_hms(2024, 6, 21, h, m, 0).unwrap()
}

/// Reports the same raw events for every date and position.
struct FixedEvents {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
}

impl SolarCalculator for FixedEvents {
    fn solar_events(
        &self,
        _latitude: f64,
        _longitude: f64,
        _date: NaiveDate,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.sunrise, self.sunset)
    }
}

fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap()
}

#[test]
fn test_fresh_cache_never_queries_provider() {
    let now = new_york(12, 0);
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(nyc(), now.with_timezone(&Utc) - Duration::hours(1)));
    let source = Arc::new(ScriptedLocation::returning(london()));
    let engine = engine(&cache, &source);

    for _ in 0..3 {
        let decision = engine.should_use_dark_theme(&now);
        assert_eq!(decision.origin, FixOrigin::Cached);
        assert_eq!(decision.fix.map(|f| f.coordinates()), Some(nyc()));
    }

    assert_eq!(source.permission_requests(), 0);
    assert_eq!(source.fix_requests(), 0);
}

#[test]
fn test_stale_cache_refreshes_once_and_overwrites() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(london(), now_utc - Duration::hours(25)));
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let engine = engine(&cache, &source);

    let decision = engine.should_use_dark_theme(&now);

    assert_eq!(decision.origin, FixOrigin::Refreshed);
    assert_eq!(source.fix_requests(), 1);
    let expected = GeoFix::new(nyc(), now_utc);
    assert_eq!(decision.fix, Some(expected));
    assert_eq!(stored(&cache, now_utc), Some(expected));

    // The refreshed entry is fresh for the next call
    let again = engine.should_use_dark_theme(&now);
    assert_eq!(again.origin, FixOrigin::Cached);
    assert_eq!(source.fix_requests(), 1);
}

#[test]
fn test_freshness_window_is_exclusive() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(nyc(), now_utc - Duration::hours(24)));
    let source = Arc::new(ScriptedLocation::returning(nyc()));

    let decision = engine(&cache, &source).should_use_dark_theme(&now);

    assert_eq!(decision.origin, FixOrigin::Refreshed);
    assert_eq!(source.fix_requests(), 1);
}

#[test]
fn test_refresh_failure_falls_back_to_stale_fix() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let stale = GeoFix::new(nyc(), now_utc - Duration::days(3));
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &stale);
    let before = cache.get(DEFAULT_CACHE_KEY).unwrap();
    let source = Arc::new(ScriptedLocation::failing(LocationError::Unavailable(
        "no signal".to_string(),
    )));

    let decision = engine(&cache, &source).should_use_dark_theme(&now);

    assert_eq!(decision.origin, FixOrigin::Stale);
    assert_eq!(decision.fix, Some(stale));
    assert!(decision.no_data.is_none());
    assert!(!decision.is_dark());
    assert_eq!(cache.get(DEFAULT_CACHE_KEY).unwrap(), before);
}

#[test]
fn test_cold_start_failure_reports_no_data() {
    let now = new_york(23, 0);
    let cache = Arc::new(MemoryCache::new());
    let cause = LocationError::Unavailable("service missing".to_string());
    let source = Arc::new(ScriptedLocation::failing(cause.clone()));

    let decision = engine(&cache, &source).should_use_dark_theme(&now);

    assert!(!decision.is_dark());
    assert_eq!(decision.origin, FixOrigin::Unavailable);
    assert_eq!(decision.no_data, Some(NoDataAvailable { cause }));
    assert!(decision.fix.is_none());
    assert!(decision.window.is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cold_start_success_persists_fix() {
    let now = new_york(23, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::returning(nyc()));

    let decision = engine(&cache, &source).should_use_dark_theme(&now);

    assert!(decision.is_dark());
    assert_eq!(decision.origin, FixOrigin::Refreshed);
    assert_eq!(stored(&cache, now_utc), Some(GeoFix::new(nyc(), now_utc)));
}

#[test]
fn test_permission_denied_skips_fix_query() {
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::denying());

    let decision = engine(&cache, &source).should_use_dark_theme(&new_york(12, 0));

    assert_eq!(
        decision.no_data.map(|n| n.cause),
        Some(LocationError::PermissionDenied)
    );
    assert_eq!(source.permission_requests(), 1);
    assert_eq!(source.fix_requests(), 0);
}

#[test]
fn test_hanging_provider_is_bounded_by_timeout() {
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::hanging());
    let started = Instant::now();

    let decision = engine(&cache, &source).should_use_dark_theme(&new_york(12, 0));

    assert!(matches!(
        decision.no_data.map(|n| n.cause),
        Some(LocationError::Timeout(_))
    ));
    assert!(started.elapsed() < std::time::Duration::from_secs(2));
}

#[test]
fn test_cancelled_decision_reports_timeout() {
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::hanging());
    let location: Arc<dyn LocationSource> = source.clone();
    let policy = EnginePolicy {
        location_timeout: std::time::Duration::from_secs(60),
        ..EnginePolicy::default()
    };
    let engine = ThemeEngine::new(Arc::clone(&cache), location, policy);
    let cancel = CancelToken::new();
    cancel.cancel();
    let started = Instant::now();

    let decision = engine.decide(&new_york(12, 0), &cancel);

    assert!(matches!(
        decision.no_data.map(|n| n.cause),
        Some(LocationError::Timeout(_))
    ));
    assert!(started.elapsed() < std::time::Duration::from_secs(2));
}

/// New York on the summer solstice with a fresh fix.
#[test]
fn test_new_york_solstice_decisions() {
    let cache = Arc::new(MemoryCache::new());
    let observed = New_York
        .with_ymd_and_hms(2024, 6, 21, 0, 30, 0)
        .unwrap()
        .with_timezone(&Utc);
    seed(&cache, &GeoFix::new(nyc(), observed));
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let engine = engine(&cache, &source);

    let noon = engine.should_use_dark_theme(&new_york(12, 0));
    assert!(!noon.is_dark());
    assert_eq!(noon.theme_name(), "light");

    let late = engine.should_use_dark_theme(&new_york(23, 0));
    assert!(late.is_dark());
    assert_eq!(late.theme_name(), "dark");

    let early = engine.should_use_dark_theme(&new_york(5, 0));
    assert!(early.is_dark());

    let window = noon.window.unwrap();
    assert_eq!(window.sunrise_in(&New_York).hour(), 5);
    assert_eq!(window.sunset_in(&New_York).hour(), 20);
    assert_eq!(source.fix_requests(), 0);
}

#[test]
fn test_decision_ignores_the_zone_of_now() {
    let tokyo = Coordinates::new(35.6762, 139.6503).unwrap();
    // 07:00 in Tokyo, a few hours after sunrise
    let instant = Utc.with_ymd_and_hms(2024, 6, 20, 22, 0, 0).unwrap();
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(tokyo, instant - Duration::hours(1)));
    let source = Arc::new(ScriptedLocation::returning(tokyo));
    let engine = engine(&cache, &source);

    let as_utc = engine.should_use_dark_theme(&instant);
    let as_tokyo = engine.should_use_dark_theme(&instant.with_timezone(&chrono_tz::Asia::Tokyo));
    let as_new_york = engine.should_use_dark_theme(&instant.with_timezone(&New_York));

    assert!(!as_tokyo.is_dark());
    assert_eq!(as_utc.is_dark(), as_tokyo.is_dark());
    assert_eq!(as_new_york.is_dark(), as_tokyo.is_dark());
    assert_eq!(as_utc.window, as_tokyo.window);
}

#[test]
fn test_window_boundaries_are_half_open() {
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(nyc(), utc(0, 0, 0)));
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let engine = engine(&cache, &source).with_solar_calculator(FixedEvents {
        sunrise: utc(6, 0, 0),
        sunset: utc(18, 0, 0),
    });

    assert!(engine.should_use_dark_theme(&utc(5, 59, 59)).is_dark());
    assert!(!engine.should_use_dark_theme(&utc(6, 0, 0)).is_dark());
    assert!(!engine.should_use_dark_theme(&utc(17, 59, 59)).is_dark());
    assert!(engine.should_use_dark_theme(&utc(18, 0, 0)).is_dark());
}

#[test]
fn test_inverted_window_is_corrected() {
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(nyc(), utc(0, 0, 0)));
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let engine = engine(&cache, &source).with_solar_calculator(FixedEvents {
        sunrise: utc(18, 0, 0),
        sunset: utc(6, 0, 0),
    });

    // Daylight becomes [06:00 the day before, 06:00)
    let morning = engine.should_use_dark_theme(&utc(3, 0, 0));
    let window = morning.window.unwrap();
    assert!(window.was_corrected());
    assert_eq!(window.sunrise(), utc(6, 0, 0) - Duration::days(1));
    assert!(!morning.is_dark());

    assert!(engine.should_use_dark_theme(&utc(12, 0, 0)).is_dark());
}

#[test]
fn test_cache_write_failure_is_not_fatal() {
    let mut cache = MockPersistentCache::new();
    cache.expect_get().returning(|_| Ok(None));
    cache.expect_set().times(2).returning(|_, _| {
        Err(CacheError::Io(std::io::Error::other("disk full")))
    });
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let location: Arc<dyn LocationSource> = source.clone();
    let engine = ThemeEngine::new(cache, location, test_policy());

    let first = engine.should_use_dark_theme(&new_york(12, 0));
    assert_eq!(first.origin, FixOrigin::Refreshed);
    assert!(!first.is_dark());

    // Nothing was stored, so the next call refreshes again
    let second = engine.should_use_dark_theme(&new_york(12, 5));
    assert_eq!(second.origin, FixOrigin::Refreshed);
    assert_eq!(source.fix_requests(), 2);
}

#[test]
fn test_cache_read_failure_counts_as_cold() {
    let mut cache = MockPersistentCache::new();
    cache.expect_get().returning(|_| Err(CacheError::Lock));
    cache.expect_set().times(1).returning(|_, _| Ok(()));
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let location: Arc<dyn LocationSource> = source.clone();
    let engine = ThemeEngine::new(cache, location, test_policy());

    let decision = engine.should_use_dark_theme(&new_york(12, 0));

    assert_eq!(decision.origin, FixOrigin::Refreshed);
    assert_eq!(source.fix_requests(), 1);
}

#[test]
fn test_unreadable_entry_counts_as_cold() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new().with_entry(DEFAULT_CACHE_KEY, "{\"latitude\":"));
    let source = Arc::new(ScriptedLocation::returning(nyc()));

    let decision = engine(&cache, &source).should_use_dark_theme(&now);

    assert_eq!(decision.origin, FixOrigin::Refreshed);
    assert_eq!(stored(&cache, now_utc), Some(GeoFix::new(nyc(), now_utc)));
}

#[test]
fn test_future_dated_entry_counts_as_cold() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    seed(&cache, &GeoFix::new(london(), now_utc + Duration::hours(2)));
    let source = Arc::new(ScriptedLocation::failing(LocationError::PermissionDenied));

    let decision = engine(&cache, &source).should_use_dark_theme(&now);

    assert_eq!(decision.origin, FixOrigin::Unavailable);
    assert!(decision.no_data.is_some());
}

#[test]
fn test_refresh_outcomes_play_in_order() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(
        ScriptedLocation::returning(nyc())
            .then(ScriptedOutcome::Fail(LocationError::Unavailable("first".to_string()))),
    );
    let engine = engine(&cache, &source);

    assert_eq!(engine.should_use_dark_theme(&now).origin, FixOrigin::Unavailable);
    assert_eq!(engine.should_use_dark_theme(&now).origin, FixOrigin::Refreshed);
    assert_eq!(stored(&cache, now_utc).map(|f| f.coordinates()), Some(nyc()));
}

#[test]
fn test_decide_from_cache_never_refreshes() {
    let now = new_york(12, 0);
    let now_utc = now.with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::returning(london()));
    let engine = engine(&cache, &source);

    assert!(engine.decide_from_cache(&now).no_data.is_some());

    seed(&cache, &GeoFix::new(nyc(), now_utc - Duration::days(2)));
    let decision = engine.decide_from_cache(&now);
    assert_eq!(decision.origin, FixOrigin::Stale);
    assert_eq!(decision.fix.map(|f| f.coordinates()), Some(nyc()));

    assert_eq!(source.permission_requests(), 0);
    assert_eq!(source.fix_requests(), 0);
}

#[test]
fn test_forced_refresh_and_forget() {
    let now_utc = new_york(12, 0).with_timezone(&Utc);
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::returning(london()));
    let engine = engine(&cache, &source);

    let fix = engine.refresh(now_utc, &CancelToken::new()).unwrap();
    assert_eq!(engine.cached_fix(now_utc), Some(fix));

    engine.forget().unwrap();
    assert_eq!(engine.cached_fix(now_utc), None);
    engine.forget().unwrap();
}

#[test]
fn test_custom_cache_key() {
    let now = new_york(12, 0);
    let cache = Arc::new(MemoryCache::new());
    let source = Arc::new(ScriptedLocation::returning(nyc()));
    let location: Arc<dyn LocationSource> = source.clone();
    let policy = EnginePolicy {
        cache_key: "device-42".to_string(),
        ..test_policy()
    };
    let engine = ThemeEngine::new(Arc::clone(&cache), location, policy);

    engine.should_use_dark_theme(&now);

    assert!(cache.get("device-42").unwrap().is_some());
    assert!(cache.get(DEFAULT_CACHE_KEY).unwrap().is_none());
}

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThemeEngine<Arc<MemoryCache>>>();
    assert_send_sync::<ThemeEngine<crate::cache::FileCache>>();
}
