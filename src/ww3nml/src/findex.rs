// ww3nml/src/findex.rs

//! Index Transformer for multi-instance blocks.
//!
//! Instances of a collection render into a single block. Each instance's
//! paths start with the bare block prefix (`MODEL%NAME`); this module
//! rewrites them to the explicit ordinal form (`MODEL(2)%NAME`) and checks
//! the invariants that only make sense across instances.

use crate::composition::Finding;
use crate::namelist::{Assignment, Collection, Segment};
use std::collections::BTreeMap;

/// Tolerance on the sum of resource fractions.
pub const FRACTION_TOLERANCE: f64 = 1e-6;

/// Rewrite the leading `prefix` segment of every instance's paths to
/// `prefix(i)`, 1-based in instance order. Paths that do not start with the
/// prefix get it prepended.
pub fn index_instances(prefix: &str, instances: Vec<Vec<Assignment>>) -> Vec<Assignment> {
    let mut out = Vec::new();
    for (i, assignments) in instances.into_iter().enumerate() {
        let index = i + 1;
        for mut assignment in assignments {
            let segments = assignment.path.segments_mut();
            match segments.first_mut() {
                Some(first) if first.index.is_none() && first.name.eq_ignore_ascii_case(prefix) => {
                    first.index = Some(index);
                }
                _ => segments.insert(0, Segment::indexed(prefix, index)),
            }
            out.push(assignment);
        }
    }
    out
}

/// Resource-fraction partition and rank uniqueness across the instances
/// of `collection`, reported under `role`.
pub fn check_collection(role: &str, collection: &Collection) -> Vec<Finding> {
    let mut findings = Vec::new();
    let schema = collection.schema();
    if let Some(path) = schema.fraction {
        findings.extend(check_fractions(role, collection, path));
    }
    if let Some(path) = schema.rank {
        findings.extend(check_ranks(role, collection, path));
    }
    findings
}

/// At most one finding: shares must each lie in (0, 1] and sum to 1.0.
/// A collection where no instance declares a share is not checked.
fn check_fractions(role: &str, collection: &Collection, path: &str) -> Option<Finding> {
    let prefix = collection.schema().prefix();
    let shares: Vec<(usize, Option<f64>)> = collection
        .instances()
        .iter()
        .enumerate()
        .map(|(i, entity)| (i + 1, entity.get_real(path)))
        .collect();

    if shares.iter().all(|(_, share)| share.is_none()) {
        return None;
    }

    let mut problems = Vec::new();
    let missing: Vec<String> = shares
        .iter()
        .filter(|(_, share)| share.is_none())
        .map(|(i, _)| format!("{}({})", prefix, i))
        .collect();
    if !missing.is_empty() {
        problems.push(format!("not declared by {}", missing.join(", ")));
    }

    for (i, share) in &shares {
        if let Some(share) = share {
            if *share <= 0.0 || *share > 1.0 {
                problems.push(format!("{}({}) share {} is outside (0, 1]", prefix, i, share));
            }
        }
    }

    let total: f64 = shares.iter().filter_map(|(_, share)| *share).sum();
    if missing.is_empty() && (total - 1.0).abs() > FRACTION_TOLERANCE {
        problems.push(format!("shares sum to {}, expected 1.0", total));
    }

    if problems.is_empty() {
        None
    } else {
        Some(Finding::new(
            "resource_fraction",
            format!("{}: {}%{} {}", role, prefix, path, problems.join("; ")),
        ))
    }
}

/// One finding per rank value claimed by more than one instance.
fn check_ranks(role: &str, collection: &Collection, path: &str) -> Vec<Finding> {
    let prefix = collection.schema().prefix();
    let mut claims: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, entity) in collection.instances().iter().enumerate() {
        if let Some(rank) = entity.get_integer(path) {
            claims.entry(rank).or_default().push(i + 1);
        }
    }
    claims
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(|(rank, owners)| {
            let owners: Vec<String> = owners
                .iter()
                .map(|i| format!("{}({})", prefix, i))
                .collect();
            Finding::new(
                "duplicate_rank",
                format!(
                    "{}: {} = {} is claimed by {}",
                    role,
                    path,
                    rank,
                    owners.join(", ")
                ),
            )
        })
        .collect()
}
