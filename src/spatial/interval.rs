use crate::spatial::cover::{Cover1D, Span};

/// Clusters scalars along one axis.
///
/// Values closer than `merge_distance` to their sorted neighbour share a
/// run; runs much wider than `merge_distance` are cut into
/// `floor(width / merge_distance)` equal slices so a single indicator never
/// stands for an arbitrarily long stretch of the edge.
pub fn solve(scalars: &[f64], merge_distance: f64) -> Vec<Cover1D> {
    let mut sorted: Vec<usize> = (0..scalars.len()).collect();
    sorted.sort_by(|&a, &b| scalars[a].total_cmp(&scalars[b]));

    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for (pos, &index) in sorted.iter().enumerate() {
        current.push(index);
        let stays = sorted
            .get(pos + 1)
            .map_or(false, |&next| scalars[next] - scalars[index] < merge_distance);
        if !stays {
            runs.push(std::mem::take(&mut current));
        }
    }

    let mut covers = Vec::new();
    for run in runs {
        for group in split_run(scalars, run, merge_distance) {
            let span = Span::from_range(scalars[group[0]], scalars[group[group.len() - 1]]);
            covers.push(Cover1D {
                indexes: group,
                span,
            });
        }
    }

    log::trace!(
        "1d clustering: {} scalars into {} groups",
        scalars.len(),
        covers.len()
    );
    covers
}

/// `run` is sorted by value and non-empty
fn split_run(scalars: &[f64], run: Vec<usize>, merge_distance: f64) -> Vec<Vec<usize>> {
    let low = scalars[run[0]];
    let width = scalars[run[run.len() - 1]] - low;
    let count = if merge_distance > 0.0 && width.is_finite() {
        ((width / merge_distance).floor() as usize).max(1)
    } else {
        1
    };
    if count == 1 {
        return vec![run];
    }

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); count];
    for index in run {
        let value = scalars[index];
        let slot = (1..count)
            .find(|&k| value < low + width * (k as f64 / count as f64))
            .map_or(count - 1, |k| k - 1);
        groups[slot].push(index);
    }
    groups.retain(|g| !g.is_empty());
    groups
}
