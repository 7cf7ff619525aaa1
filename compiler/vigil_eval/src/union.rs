//! Group join: which operand results may combine across a binary operator.

use crate::{Computations, GroupResult, Value};
use vigil_tsdb::TagSet;

/// A matched pair of operand values ready for an operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Union {
    pub a: Value,
    pub b: Value,
    pub group: TagSet,
    pub computations: Computations,
}

/// Pair every result of `a` with every result of `b` whose groups are
/// compatible, in `a`-major order.
///
/// Two groups are compatible when they are equal, when either is empty,
/// or when one is a subset of the other. Incompatible pairs are dropped
/// silently. The pair takes the more specific group: the non-empty side,
/// or the superset.
pub fn union(a: &[GroupResult], b: &[GroupResult]) -> Vec<Union> {
    let mut unions = Vec::new();
    for ra in a {
        for rb in b {
            let Some(group) = resolve_group(&ra.group, &rb.group) else {
                continue;
            };
            let mut computations = Vec::with_capacity(ra.computations.len() + rb.computations.len());
            computations.extend_from_slice(&ra.computations);
            computations.extend_from_slice(&rb.computations);
            unions.push(Union {
                a: ra.value.clone(),
                b: rb.value.clone(),
                group: group.clone(),
                computations,
            });
        }
    }
    unions
}

/// `union` over owned operands. A one-to-one join moves both results
/// instead of cloning them, so long operator chains do not recopy their
/// growing computation traces at every level.
pub(crate) fn union_owned(a: Vec<GroupResult>, b: Vec<GroupResult>) -> Vec<Union> {
    if a.len() != 1 || b.len() != 1 {
        return union(&a, &b);
    }
    let (Some(ra), Some(rb)) = (a.into_iter().next(), b.into_iter().next()) else {
        return Vec::new();
    };
    let Some(group) = resolve_group(&ra.group, &rb.group).cloned() else {
        return Vec::new();
    };
    let mut computations = ra.computations;
    computations.extend(rb.computations);
    vec![Union {
        a: ra.value,
        b: rb.value,
        group,
        computations,
    }]
}

/// The group a combined pair inherits, or `None` if the groups are
/// incompatible. Equal groups resolve to `a`.
pub fn resolve_group<'g>(a: &'g TagSet, b: &'g TagSet) -> Option<&'g TagSet> {
    if a.equal(b) || b.is_empty() {
        Some(a)
    } else if a.is_empty() || a.subset(b) {
        Some(b)
    } else if b.subset(a) {
        Some(a)
    } else {
        None
    }
}
