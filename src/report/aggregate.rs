use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::RunResult;

const NANOS_PER_MILLI: u128 = 1_000_000;
const HALF_MILLI_NANOS: u128 = 500_000;

/// Summary of every response observed for one request position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    pub index: usize,
    pub name: String,
    pub total: usize,
    pub failed: usize,
    pub fastest: Duration,
    pub slowest: Duration,
    pub average: Duration,
    /// Count per observed status; responses without a status are left out.
    pub status_codes: BTreeMap<u16, usize>,
}

#[derive(Default)]
struct Group {
    name: String,
    total: usize,
    failed: usize,
    durations: Vec<Duration>,
    status_codes: BTreeMap<u16, usize>,
}

/// Groups responses by request index, ordered by index.
///
/// Durations are rounded to whole milliseconds.
#[must_use]
pub fn aggregate(result: &RunResult) -> Vec<Metrics> {
    let mut groups: BTreeMap<usize, Group> = BTreeMap::new();
    for response in result
        .executions
        .iter()
        .flat_map(|execution| execution.responses.iter())
    {
        let group = groups.entry(response.index).or_insert_with(|| Group {
            name: response.name.clone(),
            ..Group::default()
        });
        group.total = group.total.saturating_add(1);
        group.durations.push(response.duration);
        if response.status > 0 {
            let count = group.status_codes.entry(response.status).or_insert(0);
            *count = count.saturating_add(1);
        }
        if response.is_failure() {
            group.failed = group.failed.saturating_add(1);
        }
    }

    groups
        .into_iter()
        .map(|(index, group)| Metrics {
            index,
            fastest: group
                .durations
                .iter()
                .min()
                .copied()
                .map_or(Duration::ZERO, round_to_millis),
            slowest: group
                .durations
                .iter()
                .max()
                .copied()
                .map_or(Duration::ZERO, round_to_millis),
            average: round_to_millis(mean(&group.durations)),
            name: group.name,
            total: group.total,
            failed: group.failed,
            status_codes: group.status_codes,
        })
        .collect()
}

/// Rounds to the nearest millisecond, halves rounding up.
#[must_use]
pub fn round_to_millis(duration: Duration) -> Duration {
    let millis = duration
        .as_nanos()
        .saturating_add(HALF_MILLI_NANOS)
        .checked_div(NANOS_PER_MILLI)
        .unwrap_or(0);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

fn mean(durations: &[Duration]) -> Duration {
    let count = u128::try_from(durations.len()).unwrap_or(u128::MAX);
    let total = durations
        .iter()
        .fold(0u128, |sum, duration| sum.saturating_add(duration.as_nanos()));
    let nanos = total.checked_div(count).unwrap_or(0);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
