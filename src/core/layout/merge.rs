//! Geometric merge of non-text regions into the text stream.
//!
//! Elements are taken in vertical order (stable by top edge). The
//! merge is three deterministic steps over one top-origin coordinate
//! system:
//!
//! - **head**: every element whose bottom edge lies above the top of
//!   the first positioned fragment is placed before all text, in
//!   element order
//! - **gap**: walking the sequence, each run of line-break sentinels
//!   between two fragments that carry geometry defines a vertical gap
//!   `(prev.bottom, next.top)`. Only the first pending element is
//!   tested; it is placed before the run when its box lies strictly
//!   inside the gap
//! - **tail**: anything still pending is appended in order
//!
//! An element straddling a gap boundary is not placed in that gap and
//! so falls through toward the tail. No element is placed twice.

use std::collections::VecDeque;

use crate::core::error::Result;
use crate::core::layout::{Fragment, PageElement};

pub fn merge_elements(fragments: Vec<Fragment>, mut elements: Vec<PageElement>) -> Result<Vec<Fragment>> {
    for element in &elements {
        element
            .bbox
            .validate(&format!("{:?} element", element.kind))?;
    }
    for fragment in &fragments {
        if let Some(bbox) = &fragment.bbox {
            bbox.validate("text fragment")?;
        }
    }

    if elements.is_empty() {
        return Ok(fragments);
    }
    elements.sort_by(|a, b| a.bbox.top.total_cmp(&b.bbox.top));
    if fragments.is_empty() {
        return Ok(elements_only(elements));
    }

    let Some(anchor_top) = fragments.iter().find_map(|f| f.bbox.map(|b| b.top)) else {
        tracing::debug!("No positioned text on page; appending {} element(s)", elements.len());
        return Ok(append_tail(fragments, elements.into()));
    };

    // Head pass
    let mut sequence = Vec::with_capacity(fragments.len() + elements.len() * 2);
    let mut pending = VecDeque::with_capacity(elements.len());
    for element in elements {
        if element.bbox.bottom < anchor_top {
            tracing::debug!("Placing {:?} at head (bottom {})", element.kind, element.bbox.bottom);
            sequence.push(Fragment {
                text: Some(element.content),
                bbox: Some(element.bbox),
            });
            sequence.push(Fragment::sentinel());
        } else {
            pending.push_back(element);
        }
    }
    sequence.extend(fragments);

    if pending.is_empty() {
        return Ok(sequence);
    }

    // Gap pass
    let mut merged = Vec::with_capacity(sequence.len() + pending.len());
    for (i, fragment) in sequence.iter().enumerate() {
        let starts_run = fragment.is_sentinel() && i > 0 && !sequence[i - 1].is_sentinel();
        if starts_run {
            let next = sequence[i..].iter().find(|f| !f.is_sentinel());
            let gap = sequence[i - 1]
                .bbox
                .zip(next.and_then(|next| next.bbox))
                .map(|(prev, next)| (prev.bottom, next.top));

            let fits = match (gap, pending.front()) {
                (Some((gap_top, gap_bottom)), Some(element)) => {
                    element.bbox.top > gap_top && element.bbox.bottom < gap_bottom
                }
                _ => false,
            };
            if fits {
                if let Some(element) = pending.pop_front() {
                    tracing::debug!("Placing {:?} in gap before fragment {}", element.kind, i);
                    merged.push(Fragment::text(format!("\n{}\n", element.content)));
                }
            }
        }
        merged.push(fragment.clone());
    }

    Ok(append_tail(merged, pending))
}

fn append_tail(mut sequence: Vec<Fragment>, pending: VecDeque<PageElement>) -> Vec<Fragment> {
    for element in pending {
        tracing::debug!("Appending {:?} at tail", element.kind);
        sequence.push(Fragment::text(format!("\n{}", element.content)));
    }
    sequence
}

fn elements_only(elements: Vec<PageElement>) -> Vec<Fragment> {
    let mut sequence = Vec::with_capacity(elements.len() * 2);
    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            sequence.push(Fragment::sentinel());
        }
        sequence.push(Fragment {
            text: Some(element.content),
            bbox: Some(element.bbox),
        });
    }
    sequence
}
