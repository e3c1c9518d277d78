//! Lane assignment for concurrently scheduled entries.
//!
//! Entries are swept in start order and given the lowest free lane. A
//! cluster is a maximal run of transitively overlapping entries; every
//! member of a cluster shares the same lane count so they render at equal
//! widths. Lanes are not stable identities across renders.

use serde::Serialize;

use crate::position::Placement;
use crate::record::CalendarEntry;

/// Lane of one entry and the number of lanes in its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub lane: u32,
    pub lane_count: u32,
}

/// A timed entry with its grid position and lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEntry {
    pub entry: CalendarEntry,
    pub start_slot: u32,
    pub end_slot: u32,
    pub lane: u32,
    pub lane_count: u32,
    pub clipped_start: bool,
    pub clipped_end: bool,
}

impl PositionedEntry {
    pub fn placement(&self) -> Placement {
        Placement {
            start_slot: self.start_slot,
            end_slot: self.end_slot,
            clipped_start: self.clipped_start,
            clipped_end: self.clipped_end,
        }
    }
}

/// Order in which entries are swept: start ascending, longer first on ties,
/// input order after that.
fn sweep_order(placements: &[Placement]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..placements.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (&placements[a], &placements[b]);
        pa.start_slot
            .cmp(&pb.start_slot)
            .then_with(|| pb.duration().cmp(&pa.duration()))
    });
    order
}

/// Assign a lane to every placement. The result is indexed like the input.
pub fn assign_lanes(placements: &[Placement]) -> Vec<Lane> {
    let mut lanes = vec![Lane::default(); placements.len()];

    // End slot of the latest occupant of each lane in the open cluster
    let mut lane_ends: Vec<u32> = Vec::new();
    let mut cluster: Vec<usize> = Vec::new();
    let mut cluster_end = 0;

    for idx in sweep_order(placements) {
        let p = &placements[idx];

        if !cluster.is_empty() && p.start_slot >= cluster_end {
            close_cluster(&mut lanes, &cluster, lane_ends.len());
            cluster.clear();
            lane_ends.clear();
        }

        let lane = match lane_ends.iter().position(|&end| end <= p.start_slot) {
            Some(free) => {
                lane_ends[free] = p.end_slot;
                free
            }
            None => {
                lane_ends.push(p.end_slot);
                lane_ends.len() - 1
            }
        };

        cluster_end = if cluster.is_empty() {
            p.end_slot
        } else {
            cluster_end.max(p.end_slot)
        };
        lanes[idx].lane = lane as u32;
        cluster.push(idx);
    }

    close_cluster(&mut lanes, &cluster, lane_ends.len());
    lanes
}

fn close_cluster(lanes: &mut [Lane], members: &[usize], lane_count: usize) {
    for &idx in members {
        lanes[idx].lane_count = lane_count as u32;
    }
}

/// Assign lanes and build positioned entries, returned in sweep order.
pub fn resolve_overlaps(placed: Vec<(CalendarEntry, Placement)>) -> Vec<PositionedEntry> {
    let placements: Vec<Placement> = placed.iter().map(|(_, p)| *p).collect();
    let lanes = assign_lanes(&placements);
    let order = sweep_order(&placements);

    let mut slots: Vec<Option<(CalendarEntry, Placement)>> = placed.into_iter().map(Some).collect();

    order
        .into_iter()
        .filter_map(|idx| {
            let (entry, p) = slots[idx].take()?;
            let lane = lanes[idx];
            Some(PositionedEntry {
                entry,
                start_slot: p.start_slot,
                end_slot: p.end_slot,
                lane: lane.lane,
                lane_count: lane.lane_count,
                clipped_start: p.clipped_start,
                clipped_end: p.clipped_end,
            })
        })
        .collect()
}
