use crate::core::models::assignment::PlacementResult;
use crate::core::models::experiment::build_queue;
use crate::core::models::grid::PlateGrid;
use crate::core::models::group::{Group, GroupQueue};
use crate::engine::config::DesignConfig;
use crate::engine::error::{EngineError, UnplaceableGroup};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scheduler;
use tracing::{info, instrument, warn};

/// One filled plate: the grid with assignments applied and the scheduler output
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateOutcome {
    pub plate_number: usize,
    pub grid: PlateGrid,
    pub result: PlacementResult,
}

/// Lays out `initial_groups` over as many plates as needed.
///
/// `plate_factory` is called with the 1-based plate number and must return a
/// fresh grid for each plate. Groups left over on one plate are carried to the
/// next in their leftover order. Samples fill from `start_column` (clamped to
/// the first non-calibration column).
///
/// # Errors
///
/// Propagates factory errors, and returns [`EngineError::Starvation`] when a
/// fresh plate receives no samples at all, which means every remaining group
/// is wider than any row.
#[instrument(skip_all, name = "overflow_workflow")]
pub fn run<F>(
    initial_groups: GroupQueue,
    start_column: usize,
    mut plate_factory: F,
    reporter: &ProgressReporter,
) -> Result<Vec<PlateOutcome>, EngineError>
where
    F: FnMut(usize) -> Result<PlateGrid, EngineError>,
{
    let mut plates = Vec::new();
    let mut pending = initial_groups;

    while !pending.is_empty() {
        let plate_number = plates.len() + 1;
        reporter.report(Progress::PlateStart {
            plate: plate_number,
            pending_groups: pending.len(),
        });
        info!(
            plate = plate_number,
            pending_groups = pending.len(),
            "Laying out plate."
        );

        let mut grid = plate_factory(plate_number)?;
        let slots = grid.available_slots(start_column);
        let row_capacity = grid.row_capacity(start_column);

        let result = scheduler::assign(&slots, pending);

        if result.assignments.is_empty() {
            let groups: Vec<UnplaceableGroup> = result
                .leftovers
                .iter()
                .map(|g| UnplaceableGroup {
                    first_member: g.members()[0].to_string(),
                    members: g.len(),
                    replicate_count: g.replicate_count(),
                    row_capacity,
                })
                .collect();
            warn!(
                plate = plate_number,
                groups = groups.len(),
                "No samples could be placed on a fresh plate."
            );
            return Err(EngineError::Starvation {
                plate: plate_number,
                groups,
            });
        }

        grid.apply(&result)?;
        pending = GroupQueue::from(result.leftovers.clone());

        reporter.report(Progress::PlateFinish {
            plate: plate_number,
            wells_filled: result.assignments.len(),
            leftover_groups: pending.len(),
        });
        info!(
            plate = plate_number,
            wells_filled = result.assignments.len(),
            leftover_groups = pending.len(),
            "Plate complete."
        );

        plates.push(PlateOutcome {
            plate_number,
            grid,
            result,
        });
    }

    info!(plates = plates.len(), "All samples placed.");
    Ok(plates)
}

/// Runs the overflow workflow for a complete design: experiments are expanded
/// into the placement queue and every plate uses the configured geometry and
/// standards.
pub fn run_with_config(
    config: &DesignConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PlateOutcome>, EngineError> {
    let queue = build_queue(&config.experiments)?;
    reporter.report(Progress::Message(format!(
        "{} experiment(s) expanded into {} group(s) needing {} well(s)",
        config.experiments.len(),
        queue.len(),
        queue.iter().map(Group::footprint).sum::<usize>()
    )));
    let plate = &config.plate;
    // Validate the geometry once before any plate is attempted.
    plate.build_grid()?;

    run(
        queue,
        plate.start_column(),
        |_| plate.build_grid().map_err(EngineError::from),
        reporter,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::experiment::Experiment;
    use crate::core::models::grid::{LayoutError, WellContent};
    use crate::core::models::group::SampleId;
    use crate::core::models::well::RowLabel;
    use crate::core::models::well::Well;
    use crate::engine::config::{DEFAULT_STANDARDS, PlateConfig};
    use std::sync::{Arc, Mutex};

    fn subject(name: &str, timepoints: usize, reps: usize) -> Group {
        let ids: Vec<String> = (0..timepoints).map(|t| format!("{}_t{}", name, t)).collect();
        Group::new(ids, reps).unwrap()
    }

    fn standard_factory(_: usize) -> Result<PlateGrid, EngineError> {
        Ok(PlateGrid::build(8, 12, 1, &DEFAULT_STANDARDS)?)
    }

    fn all_samples(plates: &[PlateOutcome]) -> Vec<SampleId> {
        let mut ids: Vec<SampleId> = plates
            .iter()
            .flat_map(|p| p.result.placed_samples())
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn single_plate_when_everything_fits() {
        let queue: GroupQueue = (1..=9).map(|i| subject(&format!("S{}", i), 3, 2)).collect();
        let plates = run(queue, 2, standard_factory, &ProgressReporter::new()).unwrap();

        assert_eq!(plates.len(), 1);
        assert!(plates[0].result.is_complete());
        assert_eq!(plates[0].plate_number, 1);
    }

    #[test]
    fn overflow_chains_leftovers_onto_new_plates() {
        let queue: GroupQueue = (1..=20).map(|i| subject(&format!("S{}", i), 3, 2)).collect();
        let mut expected: Vec<SampleId> = queue.sample_ids().cloned().collect();
        expected.sort();

        let plates = run(queue, 2, standard_factory, &ProgressReporter::new()).unwrap();

        assert_eq!(plates.len(), 2);
        assert_eq!(plates[0].result.assignments.len(), 80);
        assert_eq!(plates[1].result.assignments.len(), 40);
        assert!(plates[1].result.is_complete());
        assert_eq!(all_samples(&plates), expected);
    }

    #[test]
    fn each_plate_gets_fresh_calibration_and_applied_samples() {
        let queue: GroupQueue = (1..=20).map(|i| subject(&format!("S{}", i), 3, 2)).collect();
        let plates = run(queue, 2, standard_factory, &ProgressReporter::new()).unwrap();

        for plate in &plates {
            let a1: Well = "A1".parse().unwrap();
            assert_eq!(
                plate.grid.get(a1),
                Some(&WellContent::Standard { concentration: 6.4 })
            );
            assert_eq!(
                plate.grid.occupied_count(),
                8 + plate.result.assignments.len()
            );
        }
        // The remainder of the split subject opens the second plate.
        let first = &plates[1].result.assignments[0];
        assert_eq!(first.well.to_string(), "A2");
    }

    #[test]
    fn factory_receives_consecutive_plate_numbers() {
        let queue: GroupQueue = (1..=30).map(|i| subject(&format!("S{}", i), 3, 2)).collect();
        let mut seen = Vec::new();
        let plates = run(
            queue,
            2,
            |n| {
                seen.push(n);
                standard_factory(n)
            },
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(plates.len(), 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn empty_queue_produces_no_plates() {
        let plates = run(GroupQueue::new(), 2, standard_factory, &ProgressReporter::new()).unwrap();
        assert!(plates.is_empty());
    }

    #[test]
    fn unplaceable_group_triggers_starvation_instead_of_endless_plates() {
        let queue: GroupQueue = vec![subject("ok", 2, 2), subject("wide", 2, 12)].into();
        let mut calls = 0;
        let err = run(
            queue,
            2,
            |n| {
                calls += 1;
                standard_factory(n)
            },
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert_eq!(calls, 2);
        match err {
            EngineError::Starvation { plate, groups } => {
                assert_eq!(plate, 2);
                assert_eq!(
                    groups,
                    vec![UnplaceableGroup {
                        first_member: "wide_t0".to_string(),
                        members: 2,
                        replicate_count: 12,
                        row_capacity: 11,
                    }]
                );
            }
            other => panic!("expected starvation, got {other:?}"),
        }
    }

    #[test]
    fn factory_errors_are_propagated() {
        let queue: GroupQueue = vec![subject("a", 1, 1)].into();
        let err = run(
            queue,
            2,
            |_| Ok(PlateGrid::build(8, 12, 1, &[1.0])?),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Configuration {
                source: LayoutError::StandardsMismatch { .. }
            }
        ));
    }

    #[test]
    fn progress_events_are_reported_per_plate() {
        let events = Arc::new(Mutex::new(Vec::<Progress>::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p: Progress| {
            sink.lock().unwrap().push(p);
        }));

        let queue: GroupQueue = (1..=20).map(|i| subject(&format!("S{}", i), 3, 2)).collect();
        run(queue, 2, standard_factory, &reporter).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[1],
            Progress::PlateFinish {
                plate: 1,
                wells_filled: 80,
                leftover_groups: 7
            }
        ));
        assert!(matches!(
            events[3],
            Progress::PlateFinish {
                plate: 2,
                leftover_groups: 0,
                ..
            }
        ));
    }

    #[test]
    fn run_with_config_expands_experiments() {
        let config = DesignConfig {
            plate: PlateConfig::default(),
            experiments: vec![Experiment {
                subjects: (1..=9).map(|i| format!("M{}", i)).collect(),
                timepoints: 3,
                replicates: 2,
            }],
        };
        let plates = run_with_config(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(plates.len(), 1);
        let b2: Well = "B2".parse().unwrap();
        assert_eq!(
            plates[0].grid.get(b2),
            Some(&WellContent::Sample {
                sample_id: SampleId::new("M2_t0"),
                replicate: 1
            })
        );
    }

    #[test]
    fn run_with_config_fills_rows_and_announces_the_expansion() {
        let messages = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p: Progress| {
            if let Progress::Message(msg) = p {
                sink.lock().unwrap().push(msg);
            }
        }));
        let config = DesignConfig {
            plate: PlateConfig::default(),
            experiments: vec![Experiment {
                subjects: (1..=9).map(|i| format!("M{}", i)).collect(),
                timepoints: 3,
                replicates: 2,
            }],
        };

        let plates = run_with_config(&config, &reporter).unwrap();

        let per_row: Vec<usize> = plates[0]
            .grid
            .row_labels()
            .map(|row| plates[0].grid.samples_in_row(row))
            .collect();
        assert_eq!(per_row, vec![10, 10, 10, 10, 10, 4, 0, 0]);
        assert_eq!(
            plates[0].grid.samples_in_row(RowLabel::from_index(0).unwrap()),
            plates[0].result.wells_in_row(RowLabel::from_index(0).unwrap())
        );
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["1 experiment(s) expanded into 9 group(s) needing 54 well(s)".to_string()]
        );
    }

    #[test]
    fn run_with_config_rejects_bad_geometry_up_front() {
        let config = DesignConfig {
            plate: PlateConfig {
                standards: vec![0.0, 1.0],
                ..PlateConfig::default()
            },
            experiments: vec![Experiment {
                subjects: vec!["M1".into()],
                timepoints: 1,
                replicates: 2,
            }],
        };
        let err = run_with_config(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
    }

    #[test]
    fn run_with_config_rejects_zero_replicates() {
        let config = DesignConfig {
            plate: PlateConfig::default(),
            experiments: vec![Experiment {
                subjects: vec!["M1".into()],
                timepoints: 1,
                replicates: 0,
            }],
        };
        let err = run_with_config(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidGroup { .. }));
    }
}
