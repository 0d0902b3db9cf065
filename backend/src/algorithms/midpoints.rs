//! Midpoint marks adapted to the diagnosed pattern.
//!
//! Well-formed patterns get plain transition markers. Clustered patterns get
//! one mark per cluster instead. Patterns with too many or non-alternating
//! extrema are re-detected with the strict strategy first.

use log::{debug, warn};
use serde::Serialize;

use super::classifier::{PatternCategory, PatternDiagnosis, CLUSTER_DISTANCE};
use super::detector::{detect, DetectionStrategy, StrictParams};
use super::transitions::{compute_transitions, TransitionMarker};
use crate::error::AnalysisResult;
use crate::models::{arc_mean, forward_gap, ExtremaSet, Extremum, ExtremumKind};

/// Representative mark for a group of extrema lying close together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMark {
    /// Mean month position of the group, in `[0, 12)`.
    pub month: f64,
    /// Mean value of the grouped extrema.
    pub value: f64,
    /// Peak only when peaks outnumber valleys in the group.
    pub dominant_kind: ExtremumKind,
    pub point_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MidpointMark {
    Transition(TransitionMarker),
    Cluster(ClusterMark),
}

/// Choose midpoint marks for `extrema` according to `diagnosis`.
///
/// # Errors
///
/// Only a malformed `values` series can fail, when the strict strategy has to
/// re-detect.
pub fn optimize_midpoint_marks(
    diagnosis: &PatternDiagnosis,
    values: &[f64],
    extrema: &ExtremaSet,
) -> AnalysisResult<Vec<MidpointMark>> {
    let marks = match diagnosis.category {
        PatternCategory::Normal => transitions_or_empty(extrema),
        PatternCategory::ClusteredPoints => cluster_marks(extrema)
            .into_iter()
            .map(MidpointMark::Cluster)
            .collect(),
        PatternCategory::NonAlternating | PatternCategory::TooManyPoints => {
            debug!(
                "re-detecting with strict strategy for {} pattern",
                diagnosis.category.key()
            );
            let strict = detect(values, &DetectionStrategy::Strict(StrictParams::default()))?;
            transitions_or_empty(&strict)
        }
        PatternCategory::InsufficientPoints => {
            if diagnosis.is_alternating {
                transitions_or_empty(extrema)
            } else {
                Vec::new()
            }
        }
    };
    Ok(marks)
}

fn transitions_or_empty(extrema: &ExtremaSet) -> Vec<MidpointMark> {
    match compute_transitions(extrema) {
        Ok(markers) => markers.into_iter().map(MidpointMark::Transition).collect(),
        Err(err) => {
            warn!("skipping transition marks: {}", err);
            Vec::new()
        }
    }
}

/// Group chronologically adjacent extrema within the cluster distance,
/// wrapping December into January, and summarise each group of two or more.
pub fn cluster_marks(extrema: &ExtremaSet) -> Vec<ClusterMark> {
    let points = extrema.chronological();
    let mut groups: Vec<Vec<Extremum>> = Vec::new();
    for point in points {
        let joins = groups
            .last()
            .and_then(|group| group.last())
            .is_some_and(|prev| forward_gap(prev.month, point.month) <= CLUSTER_DISTANCE);
        match groups.last_mut() {
            Some(group) if joins => group.push(point),
            _ => groups.push(vec![point]),
        }
    }

    if groups.len() > 1 {
        let wraps = match (groups.last().and_then(|g| g.last()), groups[0].first()) {
            (Some(tail), Some(head)) => forward_gap(tail.month, head.month) <= CLUSTER_DISTANCE,
            _ => false,
        };
        if wraps {
            if let Some(mut tail) = groups.pop() {
                tail.append(&mut groups[0]);
                groups[0] = tail;
            }
        }
    }

    groups
        .into_iter()
        .filter(|group| group.len() > 1)
        .filter_map(|group| {
            let months: Vec<usize> = group.iter().map(|p| p.month).collect();
            let month = arc_mean(&months)?;
            let value = group.iter().map(|p| p.value).sum::<f64>() / group.len() as f64;
            let peaks = group.iter().filter(|p| p.kind == ExtremumKind::Peak).count();
            let dominant_kind = if peaks > group.len() - peaks {
                ExtremumKind::Peak
            } else {
                ExtremumKind::Valley
            };
            Some(ClusterMark {
                month,
                value,
                dominant_kind,
                point_count: group.len(),
            })
        })
        .collect()
}
