//! Normalizer/transformer for validated genomics metadata.
//!
//! Applied independently per table:
//!
//! - **records**: trimming, missing-token nulling, enum uppercasing and type
//!   coercion into curated records
//! - **dedup**: keep-last deduplication by primary key (`run_id` for QC)
//!
//! The transform never re-validates and performs no I/O. Its output is a
//! fixed point: rendering curated tables back to raw text and transforming
//! again yields the same tables.

pub mod dedup;
pub mod records;

use tracing::{debug, warn};

use genometa_model::{Conventions, CuratedTables, EntityKind, QcMetric, RawTables, Run, Sample};

pub use dedup::keep_last;
pub use records::{curate_qc_metric, curate_run, curate_sample};

/// Curate every row of `rows`, then deduplicate by `key`.
fn curate_table<R, T, C, K>(
    entity: EntityKind,
    rows: Vec<R>,
    conventions: &Conventions,
    curate: C,
    key: K,
) -> Vec<T>
where
    C: Fn(R, &Conventions) -> Option<T>,
    K: Fn(&T) -> &str,
{
    let total = rows.len();
    let curated: Vec<T> = rows
        .into_iter()
        .filter_map(|row| curate(row, conventions))
        .collect();
    let dropped = total - curated.len();
    if dropped > 0 {
        warn!(entity = %entity, dropped, "dropped rows without a key");
    }

    let (kept, duplicates) = keep_last(curated, key);
    if duplicates > 0 {
        debug!(entity = %entity, duplicates, "removed duplicate keys");
    }
    kept
}

/// Transform validated raw tables into curated tables.
pub fn transform(tables: RawTables, conventions: &Conventions) -> CuratedTables {
    let RawTables {
        samples,
        runs,
        qc_metrics,
    } = tables;

    let curated = CuratedTables {
        samples: curate_table(
            EntityKind::Sample,
            samples,
            conventions,
            curate_sample,
            |sample: &Sample| sample.sample_id.as_str(),
        ),
        runs: curate_table(EntityKind::Run, runs, conventions, curate_run, |run: &Run| {
            run.run_id.as_str()
        }),
        qc_metrics: curate_table(
            EntityKind::QcMetric,
            qc_metrics,
            conventions,
            curate_qc_metric,
            |qc: &QcMetric| qc.run_id.as_str(),
        ),
    };
    debug!(rows = curated.total_rows(), "transform complete");
    curated
}
