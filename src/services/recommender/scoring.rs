use crate::models::{RouteCandidate, ScaledProperties, ScaledRouteCandidate};

/// Min-max normalize the four criteria across one batch and attach the
/// total score to each candidate. Distance, time, and fare are
/// lower-is-better; the place score is higher-is-better. Candidate order is
/// unchanged — ranking is a separate stage.
pub fn scale_scores(candidates: Vec<RouteCandidate>) -> Vec<ScaledRouteCandidate> {
    let distances: Vec<f64> = candidates
        .iter()
        .map(|c| c.properties.total_distance)
        .collect();
    let times: Vec<f64> = candidates.iter().map(|c| c.properties.total_time).collect();
    let fares: Vec<f64> = candidates.iter().map(|c| c.properties.total_fare).collect();
    let place_scores: Vec<f64> = candidates
        .iter()
        .map(|c| c.properties.place_score)
        .collect();

    let scaled_distances = scale(&distances, false);
    let scaled_times = scale(&times, false);
    let scaled_fares = scale(&fares, false);
    let scaled_place_scores = scale(&place_scores, true);

    candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| {
            let scaled_properties = ScaledProperties {
                scaled_distance: round2(scaled_distances[i]),
                scaled_time: round2(scaled_times[i]),
                scaled_fare: round2(scaled_fares[i]),
                scaled_place_score: round3(scaled_place_scores[i]),
            };
            let total_route_score = round2(
                scaled_properties.scaled_distance
                    + scaled_properties.scaled_time
                    + scaled_properties.scaled_fare
                    + scaled_properties.scaled_place_score,
            );

            ScaledRouteCandidate {
                properties: candidate.properties,
                scaled_properties,
                total_route_score,
                points: candidate.points,
                paths: candidate.paths,
                line_coordinates: candidate.line_coordinates,
            }
        })
        .collect()
}

/// Min-max normalization to [0, 1], flipped for lower-is-better criteria.
/// A degenerate criterion (max == min, e.g. a single-candidate batch)
/// scores 1.0 for everyone: equal values are equally good, and the division
/// by zero never happens.
fn scale(values: &[f64], higher_is_better: bool) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![1.0; values.len()];
    }

    values
        .iter()
        .map(|&value| {
            let norm = (value - min) / (max - min);
            if higher_is_better {
                norm
            } else {
                1.0 - norm
            }
        })
        .collect()
}

/// Stable-sort descending by total score and keep the first `k`.
/// Equal scores keep their generation order; `k == 0` yields nothing and
/// `k > N` returns all N.
pub fn rank_top_k(
    mut candidates: Vec<ScaledRouteCandidate>,
    k: usize,
) -> Vec<ScaledRouteCandidate> {
    candidates.sort_by(|a, b| {
        b.total_route_score
            .partial_cmp(&a.total_route_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(k);
    candidates
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
