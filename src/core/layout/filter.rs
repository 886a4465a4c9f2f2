//! Centroid filter for the base text stream.

use crate::core::geometry::BBox;
use crate::core::layout::Fragment;

/// Keep fragments whose centroid lies outside every region.
///
/// Only centroid containment counts; a glyph that merely touches or
/// overlaps a region's edge stays. Fragments without geometry are
/// kept, except that a line emptied by the filter does not leave its
/// line break behind: the stream reads as if the removed line had
/// never been laid out.
pub fn filter_fragments(fragments: &[Fragment], regions: &[BBox]) -> Vec<Fragment> {
    let mut kept: Vec<Fragment> = Vec::with_capacity(fragments.len());
    let mut removed_since_kept = false;

    for fragment in fragments {
        if let Some(bbox) = &fragment.bbox {
            if regions.iter().any(|r| r.contains_centroid_of(bbox)) {
                removed_since_kept = true;
                continue;
            }
        }

        if fragment.is_sentinel() && removed_since_kept {
            let after_break = kept.last().map_or(true, Fragment::is_sentinel);
            if after_break {
                continue;
            }
        }

        removed_since_kept = false;
        kept.push(fragment.clone());
    }

    // A removed last line leaves a dangling break
    if removed_since_kept && kept.last().is_some_and(Fragment::is_sentinel) {
        kept.pop();
    }

    kept
}
