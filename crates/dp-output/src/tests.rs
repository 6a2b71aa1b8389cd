//! Integration tests for dp-output.

#[cfg(test)]
mod row_tests {
    use dp_core::{GeoPoint, LocationId, OrderId, SimTime};
    use dp_sim::{RouteResult, SkippedOrder};

    use crate::row::{RouteResultRow, SkippedOrderRow};

    #[test]
    fn route_row_flattens_result() {
        let result = RouteResult {
            order_id:    OrderId::from("o1"),
            route:       vec![LocationId::new("depot"), LocationId::new("a"), LocationId::new("c")],
            gps_route:   vec![GeoPoint::new(40.7306, -73.9866)],
            travel_time: 30,
            start_time:  SimTime(12),
            dps:         10.5,
        };
        let row = RouteResultRow::from(&result);
        assert_eq!(row.order_id, "o1");
        assert_eq!(row.route, "DEPOT>A>C");
        assert_eq!(row.start_time, 12);
        assert_eq!(row.arrival_time, 42);
        assert_eq!(row.gps_points, 1);
    }

    #[test]
    fn skipped_row_flattens_record() {
        let skip = SkippedOrder {
            order_id:    OrderId::from("o9"),
            destination: LocationId::new("E"),
            from:        LocationId::new("DEPOT"),
            at:          SimTime(7),
        };
        let row = SkippedOrderRow::from(&skip);
        assert_eq!(
            row,
            SkippedOrderRow {
                order_id:    "o9".into(),
                destination: "E".into(),
                from:        "DEPOT".into(),
                at:          7,
            }
        );
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, ROUTE_RESULTS_FILE, SKIPPED_ORDERS_FILE};
    use crate::row::{RouteResultRow, SkippedOrderRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn result_row(id: &str, start: u64) -> RouteResultRow {
        RouteResultRow {
            order_id:     id.to_owned(),
            start_time:   start,
            travel_time:  10,
            arrival_time: start + 10,
            dps:          20.5,
            route:        "DEPOT>A".to_owned(),
            gps_points:   2,
        }
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(ROUTE_RESULTS_FILE).exists());
        assert!(dir.path().join(SKIPPED_ORDERS_FILE).exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("001");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join(ROUTE_RESULTS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, ROUTE_RESULTS_FILE),
            ["order_id", "start_time", "travel_time", "arrival_time", "dps", "route", "gps_points"]
        );
        assert_eq!(headers(&dir, SKIPPED_ORDERS_FILE), ["order_id", "destination", "from", "at"]);
    }

    #[test]
    fn csv_route_results_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_route_result(&result_row("o1", 0)).unwrap();
        w.write_route_result(&result_row("o2", 10)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(ROUTE_RESULTS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "o1");
        assert_eq!(&rows[1][0], "o2");
        assert_eq!(&rows[1][3], "20"); // arrival_time
        assert_eq!(&rows[1][4], "20.5"); // dps
        assert_eq!(&rows[1][5], "DEPOT>A");
    }

    #[test]
    fn csv_skipped_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_skipped(&SkippedOrderRow {
            order_id:    "o3".into(),
            destination: "E".into(),
            from:        "A".into(),
            at:          15,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SKIPPED_ORDERS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["o3", "E", "A", "15"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use dp_core::RunConfig;
    use dp_dispatch::Order;
    use dp_sim::{DispatchEngine, DispatchService};
    use dp_spatial::{DijkstraRouter, LocationGraphBuilder};

    use crate::csv::{CsvWriter, ROUTE_RESULTS_FILE, SKIPPED_ORDERS_FILE};
    use crate::observer::DispatchOutputObserver;
    use crate::row::{RouteResultRow, SkippedOrderRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn service() -> DispatchService<DijkstraRouter> {
        let mut b = LocationGraphBuilder::new();
        b.add_road("DEPOT", "A", 10.0).unwrap();
        b.add_road("A", "C", 20.0).unwrap();
        b.add_location("E").unwrap();
        DispatchService::new(DispatchEngine::new(Arc::new(b.build()), DijkstraRouter))
    }

    /// Writer whose every call fails.
    struct Broken {
        finished: usize,
    }

    impl OutputWriter for Broken {
        fn write_route_result(&mut self, _row: &RouteResultRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn write_skipped(&mut self, _row: &SkippedOrderRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("second failure")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn integration_csv() {
        let svc = service();
        svc.submit_order(Order::new("far", "C", 1_000, 1)).unwrap();
        svc.submit_order(Order::new("cut-off", "E", 1_000, 5)).unwrap();

        let dir = tempfile::tempdir().expect("create temp dir");
        let mut obs = DispatchOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let outcome = svc.simulate_with(&RunConfig::new("DEPOT", 0.0), None, &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(obs.rows_written(), 2);
        assert_eq!(outcome.results.len(), 1);

        let mut rdr = csv::Reader::from_path(dir.path().join(ROUTE_RESULTS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "far");
        assert_eq!(&rows[0][2], "30");
        assert_eq!(&rows[0][5], "DEPOT>A>C");

        let mut rdr = csv::Reader::from_path(dir.path().join(SKIPPED_ORDERS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "cut-off");
    }

    #[test]
    fn first_error_kept_and_run_unaffected() {
        let svc = service();
        svc.submit_order(Order::new("o1", "A", 100, 0)).unwrap();
        svc.submit_order(Order::new("o2", "E", 100, 9)).unwrap();

        let mut obs = DispatchOutputObserver::new(Broken { finished: 0 });
        let outcome = svc.simulate_with(&RunConfig::new("DEPOT", 0.0), None, &mut obs).unwrap();
        assert_eq!(outcome.results.len(), 1);

        // o2 is skipped first (higher score), so its error is the one kept.
        let err = obs.take_error().expect("stored error");
        assert!(err.to_string().contains("second failure"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 0);
        assert_eq!(obs.into_writer().finished, 1);
    }
}
