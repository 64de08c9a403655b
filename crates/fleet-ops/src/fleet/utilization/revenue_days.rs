use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::window::{start_of_day, Window};
use crate::fleet::domain::{Load, TruckId};

/// Per-truck sets of UTC calendar days covered by at least one load inside a window.
#[derive(Debug, Clone, Default)]
pub struct RevenueDays {
    trucks: Vec<TruckId>,
    day_sets: HashMap<TruckId, BTreeSet<NaiveDate>>,
    stats: TallyStats,
}

/// Bookkeeping about loads that were looked at but contributed nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyStats {
    pub counted_loads: usize,
    pub undated_loads: usize,
    pub untracked_loads: usize,
}

impl RevenueDays {
    /// Expand every load's pickup-to-delivery span into days and keep the ones inside `window`.
    ///
    /// Every tracked truck starts at zero so idle units still report. Loads pointing at a
    /// truck outside `trucks` are skipped, as are loads with neither date.
    pub fn tally<'a, I>(window: &Window, trucks: I, loads: &[Load]) -> Self
    where
        I: IntoIterator<Item = &'a TruckId>,
    {
        let mut tally = Self::default();
        for truck in trucks {
            if !tally.day_sets.contains_key(truck) {
                tally.day_sets.insert(truck.clone(), BTreeSet::new());
                tally.trucks.push(truck.clone());
            }
        }

        for load in loads.iter().filter(|load| load.is_countable()) {
            let Some(truck_id) = load.truck_id.as_ref() else {
                continue;
            };
            let Some(days) = tally.day_sets.get_mut(truck_id) else {
                tally.stats.untracked_loads += 1;
                continue;
            };
            let Some((first, last)) = load_span(load) else {
                tally.stats.undated_loads += 1;
                continue;
            };

            tally.stats.counted_loads += 1;
            for day in DayWalk::new(first, last) {
                if window.contains(start_of_day(day)) {
                    days.insert(day);
                }
            }
        }

        tally
    }

    pub fn count(&self, truck: &TruckId) -> u32 {
        self.day_sets
            .get(truck)
            .map(|days| days.len() as u32)
            .unwrap_or(0)
    }

    /// Revenue-day counts in the order trucks were supplied.
    pub fn counts(&self) -> Vec<u32> {
        self.trucks.iter().map(|truck| self.count(truck)).collect()
    }

    pub fn by_truck(&self) -> impl Iterator<Item = (&TruckId, u32)> + '_ {
        self.trucks.iter().map(|truck| (truck, self.count(truck)))
    }

    pub fn total(&self) -> u32 {
        self.day_sets.values().map(|days| days.len() as u32).sum()
    }

    pub fn truck_count(&self) -> usize {
        self.trucks.len()
    }

    pub fn stats(&self) -> TallyStats {
        self.stats
    }
}

/// Pickup falls back to delivery and vice versa; no dates means no span.
fn load_span(load: &Load) -> Option<(NaiveDate, NaiveDate)> {
    let first = load.pickup_date.or(load.delivery_date)?;
    let last = load.delivery_date.or(load.pickup_date)?;
    Some((first.date_naive(), last.date_naive()))
}

/// Inclusive day-by-day walk that runs backward when the span is reversed.
struct DayWalk {
    next: Option<NaiveDate>,
    last: NaiveDate,
    forward: bool,
}

impl DayWalk {
    fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            next: Some(first),
            last,
            forward: first <= last,
        }
    }
}

impl Iterator for DayWalk {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current == self.last {
            None
        } else if self.forward {
            current.succ_opt()
        } else {
            current.pred_opt()
        };
        Some(current)
    }
}
