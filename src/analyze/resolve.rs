use log::debug;

use crate::model::{MatchRecord, RingClassifiedMatch, RingInfo};

/// Drop ring-sharing matches that are structurally contained in a larger
/// match.
///
/// A candidate is discarded when some already-accepted match (a) contains
/// every ring atom of the candidate and (b) touches at least one of the
/// same rings. Matches with no ring atoms are never discarded. Candidates
/// are considered largest-first, so the most specific pattern on a shared
/// ring survives; ties keep the earlier record, which catalog order makes
/// deterministic.
///
/// Without ring info there is nothing to classify against, so every record
/// passes through.
pub fn resolve_ring_overlaps(
    records: Vec<MatchRecord>,
    ring_info: Option<&RingInfo>,
) -> Vec<MatchRecord> {
    let Some(rings) = ring_info else {
        debug!("no ring info available; skipping ring overlap resolution");
        return sorted_by_group(records);
    };

    let mut ring_matches = Vec::new();
    let mut non_ring = Vec::new();
    for record in records {
        let classified = RingClassifiedMatch::classify(record, rings);
        if classified.involves_ring() {
            ring_matches.push(classified);
        } else {
            non_ring.push(classified.record);
        }
    }

    // Largest atom tuple first; the stable sort preserves catalog order
    // among equal sizes.
    ring_matches.sort_by(|a, b| b.record.atoms.len().cmp(&a.record.atoms.len()));

    let mut accepted: Vec<RingClassifiedMatch> = Vec::new();
    'candidates: for candidate in ring_matches {
        for kept in &accepted {
            let contained = candidate
                .ring_atoms
                .iter()
                .all(|a| kept.ring_atoms.contains(a));
            if contained
                && !rings
                    .rings_touching(&candidate.record.atoms)
                    .is_disjoint(&rings.rings_touching(&kept.record.atoms))
            {
                debug!(
                    "dropping '{}': ring atoms contained in '{}'",
                    candidate.record.group, kept.record.group
                );
                continue 'candidates;
            }
        }
        accepted.push(candidate);
    }

    let mut result = non_ring;
    result.extend(accepted.into_iter().map(|c| c.record));
    sorted_by_group(result)
}

fn sorted_by_group(mut records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    records.sort_by(|a, b| a.group.cmp(&b.group));
    records
}
