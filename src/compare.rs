//! The comparison preamble shared by every policy.
//!
//! Equal tags mean the same concrete type stored with the same handler, so
//! the handler's same-type operation applies. Different tags go to the left
//! operand's cross-type rule and fall back to "not equal" and tag order
//! respectively. Cross-type rules are expected to agree in both directions.

use core::cmp::Ordering;

use crate::AnyFace;

pub(crate) fn equals<I: ?Sized + 'static, P: 'static>(
    lhs: &AnyFace<I, P>,
    rhs: &AnyFace<I, P>,
) -> bool {
    match (lhs.parts(), rhs.parts()) {
        (None, None) => true,
        (None, Some(_)) | (Some(_), None) => false,
        (Some((lhs_tag, lhs_raw)), Some((rhs_tag, rhs_raw))) => {
            if lhs_tag == rhs_tag {
                // SAFETY: Equal tags within one family name the same concrete type and
                // handler
                unsafe { lhs_raw.equals_same_type(rhs_raw) }
            } else {
                lhs_raw.equals_foreign(rhs_raw).unwrap_or(false)
            }
        }
    }
}

pub(crate) fn less<I: ?Sized + 'static, P: 'static>(
    lhs: &AnyFace<I, P>,
    rhs: &AnyFace<I, P>,
) -> bool {
    match (lhs.parts(), rhs.parts()) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some((lhs_tag, lhs_raw)), Some((rhs_tag, rhs_raw))) => {
            if lhs_tag == rhs_tag {
                // SAFETY: Equal tags within one family name the same concrete type and
                // handler
                unsafe { lhs_raw.less_same_type(rhs_raw) }
            } else if let Some(answer) = lhs_raw.less_foreign(rhs_raw) {
                answer
            } else {
                tracing::trace!(
                    lhs = lhs_raw.value_type_name(),
                    rhs = rhs_raw.value_type_name(),
                    "no ordering rule between types, ordering by type tag"
                );
                lhs_tag < rhs_tag
            }
        }
    }
}

pub(crate) fn ordering<I: ?Sized + 'static, P: 'static>(
    lhs: &AnyFace<I, P>,
    rhs: &AnyFace<I, P>,
) -> Ordering {
    let lhs_first = less(lhs, rhs);
    let rhs_first = less(rhs, lhs);
    debug_assert!(
        !(lhs_first && rhs_first),
        "cross-type ordering rules disagree: each of `{}` and `{}` orders before the other",
        lhs.inner_type_name().unwrap_or("<empty>"),
        rhs.inner_type_name().unwrap_or("<empty>"),
    );

    match (lhs_first, rhs_first) {
        (true, _) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
