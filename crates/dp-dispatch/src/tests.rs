//! Unit tests for dp-dispatch.

#[cfg(test)]
mod helpers {
    use dp_spatial::{LocationGraph, LocationGraphBuilder};

    pub fn graph() -> LocationGraph {
        let mut b = LocationGraphBuilder::new();
        b.add_road("DEPOT", "A", 10.0).unwrap();
        b.add_road("A", "B", 5.0).unwrap();
        b.add_location("C").unwrap();
        b.build()
    }
}

// ── Priority score ────────────────────────────────────────────────────────────

#[cfg(test)]
mod priority {
    use dp_core::{PriorityWeights, SimTime};

    use crate::{compute_dps, urgency, Order};

    fn w() -> PriorityWeights {
        PriorityWeights::default()
    }

    #[test]
    fn reference_formula() {
        // 100 / 50 = 2 → 5*2 + 10*3 + 0 = 40
        let order = Order::new("o1", "A", 50, 3);
        assert_eq!(compute_dps(&order, SimTime::ZERO, &w()), 40.0);
    }

    #[test]
    fn clock_shrinks_time_remaining() {
        // At T+30: 100 / 20 = 5 → 25 + 0
        let order = Order::new("o1", "A", 50, 0);
        assert_eq!(compute_dps(&order, SimTime(30), &w()), 25.0);
    }

    #[test]
    fn deadline_reached_hits_ceiling() {
        let order = Order::new("o1", "A", 50, 0);
        assert_eq!(compute_dps(&order, SimTime(50), &w()), 5.0 * 1000.0);
        assert_eq!(compute_dps(&order, SimTime(400), &w()), 5.0 * 1000.0);
        // One minute before: 100 / 1
        assert_eq!(compute_dps(&order, SimTime(49), &w()), 500.0);
    }

    #[test]
    fn non_positive_deadline_is_overdue_from_the_start() {
        let order = Order::new("late", "A", -5, 0);
        assert_eq!(urgency(-5, &w()), 1000.0);
        assert_eq!(order.dps(SimTime::ZERO, &w()), 5000.0);
    }

    #[test]
    fn delay_adds_one_to_one() {
        let mut order = Order::new("o1", "A", 100, 1);
        let before = order.dps(SimTime::ZERO, &w());
        order.add_delay(17);
        assert_eq!(order.dps(SimTime::ZERO, &w()) - before, 17.0);
    }

    #[test]
    fn custom_weights() {
        let weights = PriorityWeights { urgency_weight: 0.0, importance_weight: 1.0, ..w() };
        let order = Order::new("o1", "A", 10, 7);
        assert_eq!(order.dps(SimTime::ZERO, &weights), 7.0);
    }
}

#[cfg(test)]
mod priority_properties {
    use proptest::prelude::*;

    use dp_core::{PriorityWeights, SimTime};

    use crate::{compute_dps, Order};

    proptest! {
        #[test]
        fn non_decreasing_in_delay(
            deadline in -100i64..2_000,
            importance in 0u32..10,
            clock in 0u64..2_000,
            delay in 0u64..1_000,
            extra in 0u64..1_000,
        ) {
            let w = PriorityWeights::default();
            let mut order = Order::new("o", "A", deadline, importance);
            order.add_delay(delay);
            let before = compute_dps(&order, SimTime(clock), &w);
            order.add_delay(extra);
            prop_assert!(compute_dps(&order, SimTime(clock), &w) >= before);
        }

        #[test]
        fn non_decreasing_in_importance(
            deadline in -100i64..2_000,
            importance in 0u32..10,
            bump in 0u32..10,
            clock in 0u64..2_000,
        ) {
            let w = PriorityWeights::default();
            let low = Order::new("o", "A", deadline, importance);
            let high = Order::new("o", "A", deadline, importance + bump);
            prop_assert!(compute_dps(&high, SimTime(clock), &w) >= compute_dps(&low, SimTime(clock), &w));
        }

        #[test]
        fn overdue_is_at_least_any_pending_urgency(
            deadline in 1i64..2_000,
            importance in 0u32..10,
        ) {
            let w = PriorityWeights::default();
            let order = Order::new("o", "A", deadline, importance);
            let overdue = compute_dps(&order, SimTime(deadline as u64), &w);
            for clock in 0..deadline as u64 {
                prop_assert!(overdue >= compute_dps(&order, SimTime(clock), &w));
            }
        }
    }
}

// ── Queue ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use dp_core::{LocationId, OrderId, PriorityWeights, SimTime};

    use crate::{DispatchError, DispatchQueue, Order};

    fn w() -> PriorityWeights {
        PriorityWeights::default()
    }

    #[test]
    fn submit_normalizes_and_accepts_known_destination() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("o1", "a", 100, 1), &graph).unwrap();
        assert_eq!(q.len(), 1);
        assert_eq!(q.get("o1").unwrap().destination, LocationId::new("A"));
    }

    #[test]
    fn submit_unknown_destination_names_it() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        let err = q.submit(Order::new("o1", "zzz", 100, 1), &graph).unwrap_err();
        assert_eq!(err, DispatchError::UnknownDestination(LocationId::new("ZZZ")));
        assert!(err.to_string().contains("ZZZ"));
        assert!(q.is_empty());
    }

    #[test]
    fn duplicate_id_rejected() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("o1", "A", 100, 1), &graph).unwrap();
        let err = q.submit(Order::new("o1", "B", 50, 9), &graph).unwrap_err();
        assert_eq!(err, DispatchError::DuplicateOrder(OrderId::from("o1")));
        assert_eq!(q.get("o1").unwrap().deadline_minutes, 100);
    }

    #[test]
    fn empty_queue_is_state_error() {
        let mut q = DispatchQueue::new();
        let err = q.dispatch_next(SimTime::ZERO, &w()).unwrap_err();
        assert_eq!(err, DispatchError::EmptyQueue);
        assert_eq!(err.to_string(), "Order queue is empty.");
    }

    #[test]
    fn highest_score_wins_and_is_removed() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("low", "A", 1_000, 0), &graph).unwrap();
        q.submit(Order::new("high", "B", 1_000, 5), &graph).unwrap();

        let d = q.dispatch_next(SimTime::ZERO, &w()).unwrap();
        assert_eq!(d.order.id.as_str(), "high");
        assert_eq!(d.dps, 5.0 * 0.1 + 50.0);
        assert_eq!(q.len(), 1);
        assert!(q.get("high").is_none());
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("o2", "A", 100, 1), &graph).unwrap();
        q.submit(Order::new("o3", "A", 100, 1), &graph).unwrap();
        q.submit(Order::new("o1", "B", 100, 1), &graph).unwrap();
        let order: Vec<_> = (0..3)
            .map(|_| q.dispatch_next(SimTime::ZERO, &w()).unwrap().order.id.to_string())
            .collect();
        assert_eq!(order, ["o1", "o2", "o3"]);
    }

    #[test]
    fn clock_changes_the_winner() {
        // "urgent" has a near deadline but no importance; "vip" is important
        // but relaxed.
        //   T+0:  urgent = 5*100/60 ≈ 8.3      vip = 5*100/1000 + 10 = 10.5
        //   T+55: urgent = 5*100/5  = 100      vip ≈ 10.53
        let graph = super::helpers::graph();
        let make = || {
            let mut q = DispatchQueue::new();
            q.submit(Order::new("urgent", "A", 60, 0), &graph).unwrap();
            q.submit(Order::new("vip", "B", 1_000, 1), &graph).unwrap();
            q
        };
        assert_eq!(make().dispatch_next(SimTime(0), &w()).unwrap().order.id.as_str(), "vip");
        assert_eq!(make().dispatch_next(SimTime(55), &w()).unwrap().order.id.as_str(), "urgent");
    }

    #[test]
    fn delay_can_change_the_winner() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("a", "A", 1_000, 2), &graph).unwrap();
        q.submit(Order::new("b", "B", 1_000, 1), &graph).unwrap();
        assert_eq!(q.ranking(SimTime::ZERO, &w())[0].0.as_str(), "a");

        // Give only "b" a large delay.
        let mut only_b = DispatchQueue::new();
        let mut b = q.get("b").unwrap().clone();
        b.add_delay(30);
        only_b.submit(b, &graph).unwrap();
        only_b.submit(q.get("a").unwrap().clone(), &graph).unwrap();
        assert_eq!(only_b.dispatch_next(SimTime::ZERO, &w()).unwrap().order.id.as_str(), "b");
    }

    #[test]
    fn propagate_delay_touches_every_pending_order() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("a", "A", 100, 0), &graph).unwrap();
        q.submit(Order::new("b", "B", 100, 0), &graph).unwrap();
        q.propagate_delay(12);
        q.propagate_delay(3);
        assert!(q.iter().all(|o| o.delay_minutes == 15));
    }

    #[test]
    fn ranking_is_descending_and_read_only() {
        let graph = super::helpers::graph();
        let mut q = DispatchQueue::new();
        q.submit(Order::new("a", "A", 1_000, 1), &graph).unwrap();
        q.submit(Order::new("b", "B", 1_000, 3), &graph).unwrap();
        q.submit(Order::new("c", "C", 1_000, 2), &graph).unwrap();
        let ids: Vec<_> = q.ranking(SimTime::ZERO, &w()).into_iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn take_all_and_restore() {
        let graph = super::helpers::graph();
        let mut shared = DispatchQueue::new();
        shared.submit(Order::new("a", "A", 100, 0), &graph).unwrap();
        shared.submit(Order::new("b", "B", 100, 0), &graph).unwrap();

        let snapshot = shared.take_all();
        assert!(shared.is_empty());
        assert_eq!(snapshot.len(), 2);

        // "b" re-submitted meanwhile with a new deadline; it must survive.
        shared.submit(Order::new("b", "B", 7, 0), &graph).unwrap();
        assert_eq!(shared.restore(snapshot), 1);
        assert_eq!(shared.len(), 2);
        assert_eq!(shared.get("b").unwrap().deadline_minutes, 7);
    }
}

#[cfg(test)]
mod requests {
    use dp_core::LocationId;

    use crate::OrderRequest;

    #[test]
    fn request_normalizes_destination() {
        let req = OrderRequest {
            order_id:                 "ord-7".into(),
            destination:              " c ".into(),
            initial_deadline_minutes: 90,
            importance_level:         2,
        };
        let order = req.into_order();
        assert_eq!(order.id.as_str(), "ord-7");
        assert_eq!(order.destination, LocationId::new("C"));
        assert_eq!(order.delay_minutes, 0);
    }
}
