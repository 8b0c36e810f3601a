//! Integration tests for ptrack-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentKind, AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(kind: AgentKind, agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            kind,
            agent_id,
            tick,
            x:        agent_id as f64,
            y:        -1.5,
            theta:    0.25,
            speed:    2.0,
            steering: 0.0,
        }
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_in_missing_dir() {
        let dir = tmp();
        let out = dir.path().join("nested").join("run");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join("agent_snapshots.csv").exists());
        assert!(out.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join("agent_snapshots.csv")),
            ["kind", "agent_id", "tick", "x", "y", "theta", "speed", "steering"]
        );
        assert_eq!(
            headers(&dir.path().join("tick_summaries.csv")),
            ["tick", "time_secs", "observed_targets"]
        );
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![
            snap_row(AgentKind::Robot, 0, 5),
            snap_row(AgentKind::Robot, 1, 5),
            snap_row(AgentKind::Target, 0, 5),
        ];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "robot");
        assert_eq!(&read_rows[1][1], "1"); // agent_id
        assert_eq!(&read_rows[2][0], "target");
        assert_eq!(&read_rows[2][2], "5"); // tick
        assert_eq!(read_rows[1][3].parse::<f64>().unwrap(), 1.0); // x
        assert_eq!(read_rows[1][4].parse::<f64>().unwrap(), -1.5); // y
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 3, time_secs: 1.5, observed_targets: 4 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");
        assert_eq!(read_rows[0][1].parse::<f64>().unwrap(), 1.5);
        assert_eq!(&read_rows[0][2], "4");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use ptrack_core::SimConfig;
    use ptrack_sim::SimBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn config() -> SimConfig {
        SimConfig {
            robot_count:           2,
            target_count:          3,
            duration_secs:         3.0,
            dt_secs:               0.5,
            output_interval_ticks: 2,
            ..SimConfig::default()
        }
    }

    #[test]
    fn integration_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = config();
        let mut sim = SimBuilder::new(config.clone()).build().unwrap();

        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        let report = sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        // 6 ticks, one summary per tick.
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
        assert_eq!(summaries[5][1].parse::<f64>().unwrap(), 2.5);
        let observed: u64 = summaries.iter().map(|r| r[2].parse::<u64>().unwrap()).sum();
        assert_eq!(observed, report.observed_ticks);

        // Snapshots at ticks 0, 2, 4; five agents each.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let snapshots: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(snapshots.len(), 15);
        assert_eq!(snapshots.iter().filter(|r| &r[0] == "robot").count(), 6);
        assert_eq!(&snapshots[14][2], "4");
    }

    #[test]
    fn steering_column_records_applied_turns() {
        use std::f64::consts::FRAC_PI_2;

        use ptrack_agent::Pose;
        use ptrack_behavior::{Robot, RobotSpec, Target, TargetSpec};
        use ptrack_core::{RobotId, TargetId};

        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig {
            robot_count:           1,
            target_count:          1,
            duration_secs:         5.0,
            dt_secs:               1.0,
            target_turn_chance:    0.0,
            output_interval_ticks: 1,
            ..SimConfig::default()
        };
        let robot = Robot::new(RobotId(0), Pose::new(0.0, 0.0, 0.0), RobotSpec::from_config(&config)).unwrap();
        let target = Target::new(TargetId(0), Pose::new(0.0, 10.0, 0.0), 0.0, &TargetSpec::from_config(&config));
        let mut sim = SimBuilder::new(config.clone())
            .robots(vec![robot])
            .targets(vec![target])
            .build()
            .unwrap();

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let robot_rows: Vec<(f64, f64)> = rdr
            .records()
            .map(|r| r.unwrap())
            .filter(|r| &r[0] == "robot")
            .map(|r| (r[5].parse().unwrap(), r[7].parse().unwrap()))
            .collect();
        assert_eq!(robot_rows.len(), 5);

        // First tick turns the robot a quarter turn toward the target.
        assert!((robot_rows[0].1 - FRAC_PI_2).abs() < 1e-9);

        // Headings are the running sum of the recorded steering.
        let mut heading = 0.0;
        for &(theta, steering) in &robot_rows {
            heading += steering;
            assert!((theta - heading).abs() < 1e-9, "theta {theta} vs {heading}");
        }
    }

    /// Fails every write so the observer's error capture can be checked.
    struct FailingWriter {
        calls: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("snapshot {}", self.calls))))
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("summary {}", self.calls))))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let config = config();
        let mut sim = SimBuilder::new(config.clone()).build().unwrap();
        let mut obs = SimOutputObserver::new(FailingWriter { calls: 0 }, &config);
        sim.run(&mut obs);

        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: summary 1");
        assert!(obs.take_error().is_none());
        assert!(obs.into_writer().calls > 1);
    }
}
