//! Overnight-stay filter
//!
//! Drops cabins where one cannot stay the night, like emergency shelters.

use crate::core::record::CabinRecord;

/// Service levels without beds for overnight guests
pub const EXCLUDED_SERVICE_LEVELS: [&str; 4] = [
    "emergency shelter",
    "food service",
    "no-service (no beds)",
    "closed",
];

/// Whether a cabin with this service level offers an overnight stay
pub fn is_overnight_service_level(service_level: &str) -> bool {
    !EXCLUDED_SERVICE_LEVELS.contains(&service_level)
}

/// Keeps overnight cabins, preserving order
pub fn retain_overnight(records: Vec<CabinRecord>) -> Vec<CabinRecord> {
    records
        .into_iter()
        .filter(|record| is_overnight_service_level(&record.service_level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, service_level: &str) -> CabinRecord {
        CabinRecord {
            index,
            id: format!("id-{index}"),
            name: format!("Hytte {index}"),
            service_level: service_level.to_string(),
            dnt_cabin: true,
            owner_name: String::new(),
            latitude: 60.0,
            longitude: 8.0,
            height: 1000.0,
            area_name: String::new(),
            dnt_key: String::new(),
            beds_staffed: 0,
            beds_no_service: 0,
            beds_self_service: 0,
        }
    }

    #[test]
    fn test_excluded_levels_dropped() {
        for level in EXCLUDED_SERVICE_LEVELS {
            assert!(!is_overnight_service_level(level), "{level} should be excluded");
        }
        assert!(!is_overnight_service_level("closed"));
    }

    #[test]
    fn test_overnight_levels_kept() {
        for level in ["staffed", "self-service", "no-service", "unstaffed", ""] {
            assert!(is_overnight_service_level(level), "{level} should be kept");
        }
    }

    #[test]
    fn test_retain_preserves_order() {
        let records = vec![
            record(0, "staffed"),
            record(1, "closed"),
            record(2, "self-service"),
            record(3, "emergency shelter"),
            record(4, "no-service"),
        ];
        let kept: Vec<usize> = retain_overnight(records).iter().map(|r| r.index).collect();
        assert_eq!(kept, vec![0, 2, 4]);
    }

    #[test]
    fn test_retain_is_idempotent() {
        let records = vec![
            record(0, "food service"),
            record(1, "self-service"),
            record(2, "no-service (no beds)"),
            record(3, "staffed"),
        ];
        let once = retain_overnight(records);
        let twice = retain_overnight(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }
}
