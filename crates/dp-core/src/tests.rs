//! Unit tests for dp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LocationId, NodeId, OrderId};

    #[test]
    fn node_index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(LocationId::new("depot").to_string(), "DEPOT");
    }

    #[test]
    fn location_names_are_case_insensitive() {
        assert_eq!(LocationId::new("depot"), LocationId::new("DEPOT"));
        assert_eq!(LocationId::new("  c "), LocationId::new("C"));
    }

    #[test]
    fn order_ids_are_verbatim() {
        assert_ne!(OrderId::from("ord-1"), OrderId::from("ORD-1"));
        assert!(OrderId::from("a") < OrderId::from("b"));
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn advance_and_offset() {
        let mut t = SimTime::ZERO;
        t.advance(30);
        assert_eq!(t, SimTime(30));
        assert_eq!(t.offset(12), SimTime(42));
        assert_eq!(t + 5, SimTime(35));
    }

    #[test]
    fn arithmetic_never_wraps() {
        let near_end = SimTime(u64::MAX - 5);
        assert_eq!(near_end.checked_offset(5), Some(SimTime(u64::MAX)));
        assert_eq!(near_end.checked_offset(6), None);
        assert_eq!(near_end.offset(100), SimTime(u64::MAX));
        assert_eq!(near_end + 100, SimTime(u64::MAX));

        let mut t = near_end;
        t.advance(u64::MAX);
        assert_eq!(t, SimTime(u64::MAX));
    }

    #[test]
    fn until_goes_negative_after_deadline() {
        assert_eq!(SimTime(10).until(25), 15);
        assert_eq!(SimTime(25).until(25), 0);
        assert_eq!(SimTime(40).until(25), -15);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(90).to_string(), "T+90min");
    }
}

#[cfg(test)]
mod config {
    use crate::config::{IMPORTANCE_WEIGHT, URGENCY_WEIGHT};
    use crate::{DpError, PriorityWeights, RunConfig};

    #[test]
    fn default_weights_match_constants() {
        let w = PriorityWeights::default();
        assert_eq!(w.urgency_weight, URGENCY_WEIGHT);
        assert_eq!(w.importance_weight, IMPORTANCE_WEIGHT);
        assert_eq!(w.urgency_scale, 100.0);
        assert_eq!(w.overdue_urgency, 1000.0);
    }

    #[test]
    fn run_config_normalizes_start() {
        let run = RunConfig::new("depot", 0.5);
        assert_eq!(run.start_location.as_str(), "DEPOT");
        assert!(run.validate().is_ok());
    }

    #[test]
    fn negative_congestion_rejected() {
        let run = RunConfig::new("DEPOT", -0.1);
        assert_eq!(run.validate(), Err(DpError::InvalidCongestion(-0.1)));
    }

    #[test]
    fn non_finite_congestion_rejected() {
        assert!(RunConfig::new("DEPOT", f64::NAN).validate().is_err());
        assert!(RunConfig::new("DEPOT", f64::INFINITY).validate().is_err());
    }

    #[test]
    fn blank_start_rejected() {
        assert_eq!(RunConfig::new("   ", 0.0).validate(), Err(DpError::EmptyLocation));
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn validity_range() {
        assert!(GeoPoint::new(40.7306, -73.9866).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }
}
