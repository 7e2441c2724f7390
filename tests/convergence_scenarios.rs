use annuity_fixpoint::comparison::{compare, ComparisonChart, Viewport};
use annuity_fixpoint::table::TraceTable;
use annuity_fixpoint::{
    iterate, AnnuityRecurrence, IterationError, IterationOptions, IterationTrace, Recurrence,
    RecurrenceParameters,
};
use approx::assert_relative_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn assert_well_formed(trace: &IterationTrace, initial: f64, tolerance: f64) {
    let records = trace.records();
    assert_eq!(records[0].iteration, 0);
    assert_eq!(records[0].old_value, initial);
    assert_eq!(records[0].new_value, initial);

    for (k, record) in records.iter().enumerate() {
        assert_eq!(record.iteration, k);
    }
    for pair in records.windows(2) {
        assert_eq!(pair[1].old_value, pair[0].new_value);
    }
    for record in &records[1..records.len() - 1] {
        assert!(record.gap() > tolerance);
    }
    assert!(trace.last().gap() <= tolerance);
}

fn is_monotone(trace: &IterationTrace) -> bool {
    let values: Vec<f64> = trace.iter().map(|r| r.new_value).collect();
    let increasing = values.windows(2).all(|w| w[1] > w[0]);
    let decreasing = values.windows(2).all(|w| w[1] < w[0]);
    increasing || decreasing
}

/// Starting below the fixed point, the annuity map climbs towards it in a handful of steps.
#[test]
fn low_guess_converges_monotonically() {
    let recurrence = AnnuityRecurrence::default();
    let options = IterationOptions::default();
    let trace = iterate(&recurrence, 0.08, &options).unwrap();

    assert_well_formed(&trace, 0.08, options.tolerance);
    assert!(trace.len() < 30, "took {} records", trace.len());
    assert!(is_monotone(&trace));
    assert!(trace.final_value() > 0.08);

    let fixed = trace.final_value();
    assert!((recurrence.apply(fixed) - fixed).abs() <= options.tolerance);
}

/// Starting above the fixed point, the map descends to the same root.
#[test]
fn both_reference_guesses_share_a_fixed_point() {
    let recurrence = AnnuityRecurrence::default();
    let options = IterationOptions::default();
    let (low, high) = compare(&recurrence, 0.08, 0.22, &options).unwrap();

    assert_well_formed(&high, 0.22, options.tolerance);
    assert!(is_monotone(&high));
    assert!(high.final_value() < 0.22);
    assert!((low.final_value() - high.final_value()).abs() < 1e-4);
    assert!(low.final_value() > 0.15 && low.final_value() < 0.17);
}

#[test]
fn identical_inputs_produce_identical_traces() {
    let recurrence = AnnuityRecurrence::default();
    let options = IterationOptions::default().with_tolerance(1e-9);
    let first = iterate(&recurrence, 0.13, &options).unwrap();
    let second = iterate(&recurrence, 0.13, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn tighter_tolerance_never_shortens_the_trace() {
    let recurrence = AnnuityRecurrence::default();
    let loose = iterate(&recurrence, 0.08, &IterationOptions::default()).unwrap();
    let tight = iterate(
        &recurrence,
        0.08,
        &IterationOptions::default().with_tolerance(1e-12),
    )
    .unwrap();

    assert!(tight.len() >= loose.len());
    assert_eq!(&tight.records()[..loose.len()], loose.records());
    assert_relative_eq!(tight.final_value(), loose.final_value(), epsilon = 1e-4);
}

/// Sampled guesses inside the basin of attraction all satisfy the trace invariants.
#[test]
fn sampled_guesses_satisfy_trace_invariants() {
    let recurrence = AnnuityRecurrence::default();
    let options = IterationOptions::default();
    let mut rng = SmallRng::seed_from_u64(2024);

    let reference = iterate(&recurrence, 0.08, &options).unwrap().final_value();
    for _ in 0..200 {
        let initial: f64 = rng.gen_range(0.01..3.0);
        let trace = iterate(&recurrence, initial, &options).unwrap();
        assert_well_formed(&trace, initial, options.tolerance);
        assert!((trace.final_value() - reference).abs() < 1e-4);
    }
}

#[test]
fn invalid_rates_raise_numeric_divergence() {
    let recurrence = AnnuityRecurrence::default();
    let options = IterationOptions::default();
    for initial in [-1.0, -1.5, -40.0] {
        let result = iterate(&recurrence, initial, &options);
        assert!(
            matches!(&result, Err(IterationError::NumericDivergence { iteration: 1, .. })),
            "initial {initial}: {result:?}"
        );
    }
}

/// A rate above -1 can still map below -1 on its first step and fail on the next.
#[test]
fn rate_pushed_out_of_domain_fails_on_second_step() {
    let recurrence = AnnuityRecurrence::default();
    let result = iterate(&recurrence, -0.5, &IterationOptions::default());
    match result {
        Err(IterationError::NumericDivergence { iteration, input }) => {
            assert_eq!(iteration, 2);
            assert!(input <= -1.0);
            assert_relative_eq!(input, recurrence.apply(-0.5));
        }
        other => panic!("expected numeric divergence, got {other:?}"),
    }
}

/// Rates so large that `(1 + r)^n` overflows still map to `A / P` and converge.
#[test]
fn huge_guess_converges_to_the_reference_fixed_point() {
    let recurrence = AnnuityRecurrence::default();
    let options = IterationOptions::default();
    let reference = iterate(&recurrence, 0.08, &options).unwrap().final_value();

    let trace = iterate(&recurrence, 1e30, &options).unwrap();
    assert_well_formed(&trace, 1e30, options.tolerance);
    assert_eq!(trace.records()[1].new_value, recurrence.payment_ratio());
    assert!((trace.final_value() - reference).abs() < 1e-4);
}

#[test]
fn oscillating_recurrence_is_capped() {
    let options = IterationOptions::default();
    let result = iterate(&|x: f64| 1.0 - x, 0.0, &options);

    match result {
        Err(IterationError::NonConvergence {
            iterations, trace, ..
        }) => {
            assert_eq!(iterations, options.max_iterations);
            assert_eq!(trace.steps(), options.max_iterations);
        }
        other => panic!("expected non-convergence, got {other:?}"),
    }
}

#[test]
fn custom_parameters_shift_the_fixed_point() {
    let params = RecurrenceParameters::new(60_000.0, 273_400.0, 14.0);
    let recurrence = AnnuityRecurrence::new(params).unwrap();
    let options = IterationOptions::default();

    let shifted = iterate(&recurrence, 0.08, &options).unwrap().final_value();
    let reference = iterate(&AnnuityRecurrence::default(), 0.08, &options)
        .unwrap()
        .final_value();
    assert!(shifted > reference);
}

#[test]
fn chart_and_table_cover_every_record() {
    let recurrence = AnnuityRecurrence::default();
    let (low, high) = compare(&recurrence, 0.08, 0.22, &IterationOptions::default()).unwrap();
    let chart = ComparisonChart::new(&low, &high, Viewport::default());

    let series = chart.series();
    assert_eq!(series[0].points.len(), low.len());
    assert_eq!(series[1].points.len(), high.len());
    assert_eq!(
        chart.domain().max_iteration,
        low.steps().max(high.steps())
    );
    assert_eq!(chart.domain().max_value, 0.22);

    // The 0.22 seed is the tallest point, so it touches the top margin.
    assert_relative_eq!(series[1].points[0].y, 20.0);
    assert_relative_eq!(series[0].points[0].x, 50.0);

    let table = TraceTable::new(&high);
    assert_eq!(table.rows().len(), high.len());
    assert_eq!(table.rows()[0][2], "0.22000");
}

#[test]
fn trace_survives_json_round_trip() {
    let trace = iterate(
        &AnnuityRecurrence::default(),
        0.22,
        &IterationOptions::default(),
    )
    .unwrap();
    let json = serde_json::to_string(&trace).unwrap();
    let restored: IterationTrace = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, trace);
}
