//! Building footprints along the outer edge of the road network.
//!
//! A wider corridor is buffered around every road segment and unioned; the
//! resulting outline ("guides") runs parallel to the roads at a distance
//! that leaves room for a sidewalk gap plus one building depth. Long
//! enough guides are chopped into evenly stretched slots, each slot becomes
//! a rectangular footprint, and footprints that crowd an earlier one are
//! dropped.

use crate::algorithms::union::union;
use crate::config::WorldParams;
use crate::error::GenerateError;
use crate::geometry::limits::MAX_BUILDING_SLOTS;
use crate::geometry::tolerance::EPS_OVERLAP;
use crate::items::Building;
use crate::model::Segment;
use crate::primitives::envelope::Envelope;
use crate::primitives::polygon::Polygon;

/// Outline segments that can host buildings, shortest ones removed.
pub fn building_guides(skeleton: &[Segment], params: &WorldParams) -> Vec<Segment> {
    let mut polys: Vec<Polygon> = skeleton
        .iter()
        .map(|s| Envelope::new(*s, params.building_guide_width(), params.road_roundness).poly)
        .collect();
    let mut guides = union(&mut polys);
    guides.retain(|g| g.length() >= params.building_min_length);
    guides
}

/// Splits `guide` into the largest number of slots at least `min_length`
/// long separated by `spacing`, stretching slots to fill the guide.
pub fn slot_supports(guide: &Segment, min_length: f64, spacing: f64) -> Result<Vec<Segment>, GenerateError> {
    let len = guide.length() + spacing;
    let count = (len / (min_length + spacing)).floor();
    if !(count >= 1.0) {
        return Err(GenerateError::EmptyBuildingSlot { length: guide.length() });
    }
    if count > MAX_BUILDING_SLOTS as f64 {
        return Err(GenerateError::TooManyBuildingSlots {
            length: guide.length(),
            count,
            max: MAX_BUILDING_SLOTS,
        });
    }
    let building_length = len / count - spacing;
    let dir = guide.direction_vector();

    let mut supports = Vec::with_capacity(count as usize);
    let mut q1 = guide.p1;
    let mut q2 = q1 + dir * building_length;
    supports.push(Segment::new(q1, q2));
    for _ in 1..count as usize {
        q1 = q2 + dir * spacing;
        q2 = q1 + dir * building_length;
        supports.push(Segment::new(q1, q2));
    }
    Ok(supports)
}

/// Drops every footprint that overlaps, or comes closer than `spacing` to,
/// a footprint kept before it.
pub fn prune_crowded(mut bases: Vec<Polygon>, spacing: f64) -> Vec<Polygon> {
    let mut i = 0;
    while i + 1 < bases.len() {
        let mut j = i + 1;
        while j < bases.len() {
            let crowded = bases[i].intersects_poly(&bases[j])
                || bases[i].distance_to_poly(&bases[j]) < spacing - EPS_OVERLAP;
            if crowded {
                bases.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
    bases
}

pub fn generate_buildings(skeleton: &[Segment], params: &WorldParams) -> Result<Vec<Building>, GenerateError> {
    let mut supports = Vec::new();
    for guide in building_guides(skeleton, params) {
        supports.extend(slot_supports(&guide, params.building_min_length, params.spacing)?);
    }
    let bases = supports
        .into_iter()
        .map(|s| Envelope::new(s, params.building_width, 1).poly)
        .collect();
    let kept = prune_crowded(bases, params.spacing);
    log::trace!("buildings: {} footprints kept", kept.len());
    Ok(kept.into_iter().map(Building::new).collect())
}
