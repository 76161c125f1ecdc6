//! The copy engine: single-record adaptation under an override policy, the
//! freshness check, and order-preserving bulk wrappers.
//!
//! Matching is by exact field name and exact declared-type tag; there is no
//! coercion, no case folding, and no structural matching. All bulk operations
//! are per-element compositions of [`adapt`] — there is no separate bulk
//! algorithm.

use crate::{
    traits::{FieldSpec, Record},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// OverridePolicy
///
/// Rule governing when an already-populated target field may be overwritten.
/// Evaluated once per call, except the per-field null checks of the two
/// value-gated policies.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum OverridePolicy {
    /// Overwrite every eligible field that currently holds a non-null value.
    ///
    /// A field whose current value is null is deliberately left untouched;
    /// use [`OverridePolicy::IfTargetValueIsNull`] to fill empty fields.
    AllTargetValues,

    /// Copy only when the whole target is still in its default-constructed
    /// state; a target mutated in any field makes the call a no-op.
    #[default]
    IfTargetIsNew,

    /// Per field: write only when the target's current value is null.
    IfTargetValueIsNull,
}

///
/// WriteGate
///
/// Per-field write condition after the entry-level policy has been resolved.
///

#[derive(Clone, Copy)]
enum WriteGate {
    Always,
    TargetIsNull,
    TargetIsNotNull,
}

/// Find the first target field eligible to receive `source`'s value.
///
/// Scans in declaration order. The first name match that is read-only aborts
/// the scan for this source field even when a later settable field shares
/// the name; a name match with a different declared type keeps scanning.
/// First eligible match wins.
fn match_target<'a>(source: &FieldSpec, targets: &'a [FieldSpec]) -> Option<&'a FieldSpec> {
    let source_ty = source.type_id();

    for target in targets {
        if target.name != source.name {
            continue;
        }
        if !target.settable {
            return None;
        }
        if target.type_id() == source_ty {
            return Some(target);
        }
    }

    None
}

/// Core loop shared by every copy variant. Returns whether any field was
/// actually written.
fn copy_fields<S, T>(source: &S, target: &mut T, gate: WriteGate) -> bool
where
    S: Record,
    T: Record,
{
    let mut changed = false;

    for field in S::FIELDS {
        let Some(slot) = match_target(field, T::FIELDS) else {
            continue;
        };

        match gate {
            WriteGate::Always => {}
            WriteGate::TargetIsNull | WriteGate::TargetIsNotNull => {
                let Some(current) = target.get_value(slot.name) else {
                    continue;
                };
                let wants_null = matches!(gate, WriteGate::TargetIsNull);
                if current.is_null() != wants_null {
                    continue;
                }
            }
        }

        if let Some(value) = source.get_value(field.name) {
            changed |= target.set_value(slot.name, &value);
        }
    }

    changed
}

/// Returns true iff every field of `target` still holds the value it would
/// have immediately after default construction.
///
/// Allocates one throwaway default instance for the comparison; fields are
/// compared by name only, with no type check.
#[must_use]
pub fn is_fresh<T>(target: &T) -> bool
where
    T: Record + Default,
{
    let baseline = T::default();

    T::FIELDS
        .iter()
        .all(|field| target.get_value(field.name) == baseline.get_value(field.name))
}

/// Copy every eligible field of `source` into a freshly constructed target.
#[must_use]
pub fn adapt<S, T>(source: &S) -> T
where
    S: Record,
    T: Record + Default,
{
    adapt_reporting(source).0
}

/// [`adapt`], additionally reporting whether any field was written.
#[must_use]
pub fn adapt_reporting<S, T>(source: &S) -> (T, bool)
where
    S: Record,
    T: Record + Default,
{
    let mut target = T::default();
    let changed = copy_fields(source, &mut target, WriteGate::Always);

    (target, changed)
}

/// Copy eligible fields of `source` into `target` under `policy`; a `None`
/// target is replaced with a fresh default instance first.
#[must_use]
pub fn adapt_into<S, T>(source: &S, target: Option<T>, policy: OverridePolicy) -> T
where
    S: Record,
    T: Record + Default,
{
    adapt_into_reporting(source, target, policy).0
}

/// [`adapt_into`], additionally reporting whether any field was written.
#[must_use]
pub fn adapt_into_reporting<S, T>(
    source: &S,
    target: Option<T>,
    policy: OverridePolicy,
) -> (T, bool)
where
    S: Record,
    T: Record + Default,
{
    let mut target = target.unwrap_or_default();

    let changed = match policy {
        OverridePolicy::IfTargetIsNew => {
            // entry-level gate: a non-fresh target makes the whole call a
            // no-op before any field is inspected
            if is_fresh(&target) {
                copy_fields(source, &mut target, WriteGate::Always)
            } else {
                false
            }
        }
        OverridePolicy::IfTargetValueIsNull => {
            copy_fields(source, &mut target, WriteGate::TargetIsNull)
        }
        OverridePolicy::AllTargetValues => {
            copy_fields(source, &mut target, WriteGate::TargetIsNotNull)
        }
    };

    (target, changed)
}

/// Adapt a borrowed sequence element-wise, preserving order.
#[must_use]
pub fn adapt_all<S, T>(sources: &[S]) -> Vec<T>
where
    S: Record,
    T: Record + Default,
{
    sources.iter().map(adapt).collect()
}

/// Adapt an owned sequence element-wise, preserving order.
#[must_use]
pub fn adapt_vec<S, T>(sources: Vec<S>) -> Vec<T>
where
    S: Record,
    T: Record + Default,
{
    sources.iter().map(adapt).collect()
}

/// Adapt any ordered stream element-wise, preserving order.
#[must_use]
pub fn adapt_iter<S, T, I>(sources: I) -> Vec<T>
where
    S: Record,
    T: Record + Default,
    I: IntoIterator<Item = S>,
{
    sources.into_iter().map(|source| adapt(&source)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FieldValue, type_tag};

    //
    // Hand-written records exercise matcher edge cases a struct cannot
    // express: duplicate field names in the metadata table.
    //

    #[derive(Debug, Default)]
    struct SpeedSource {
        speed: i64,
    }

    impl Record for SpeedSource {
        const FIELDS: &'static [FieldSpec] = &[FieldSpec {
            name: "speed",
            ty: type_tag::<i64>,
            settable: true,
        }];

        fn get_value(&self, field: &str) -> Option<Value> {
            match field {
                "speed" => Some(self.speed.to_value()),
                _ => None,
            }
        }

        fn set_value(&mut self, field: &str, value: &Value) -> bool {
            match field {
                "speed" => match i64::from_value(value) {
                    Some(v) => {
                        self.speed = v;
                        true
                    }
                    None => false,
                },
                _ => false,
            }
        }
    }

    /// Metadata lists "speed" twice; the read-only entry comes first.
    #[derive(Debug, Default)]
    struct LockedGauge {
        speed: i64,
    }

    impl Record for LockedGauge {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec {
                name: "speed",
                ty: type_tag::<i64>,
                settable: false,
            },
            FieldSpec {
                name: "speed",
                ty: type_tag::<i64>,
                settable: true,
            },
        ];

        fn get_value(&self, field: &str) -> Option<Value> {
            match field {
                "speed" => Some(self.speed.to_value()),
                _ => None,
            }
        }

        fn set_value(&mut self, field: &str, value: &Value) -> bool {
            match field {
                "speed" => match i64::from_value(value) {
                    Some(v) => {
                        self.speed = v;
                        true
                    }
                    None => false,
                },
                _ => false,
            }
        }
    }

    /// Metadata lists "speed" twice; a type-mismatched settable entry comes
    /// first, the eligible one second.
    #[derive(Debug, Default)]
    struct WideGauge {
        speed: i64,
    }

    impl Record for WideGauge {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec {
                name: "speed",
                ty: type_tag::<i32>,
                settable: true,
            },
            FieldSpec {
                name: "speed",
                ty: type_tag::<i64>,
                settable: true,
            },
        ];

        fn get_value(&self, field: &str) -> Option<Value> {
            match field {
                "speed" => Some(self.speed.to_value()),
                _ => None,
            }
        }

        fn set_value(&mut self, field: &str, value: &Value) -> bool {
            match field {
                "speed" => match i64::from_value(value) {
                    Some(v) => {
                        self.speed = v;
                        true
                    }
                    None => false,
                },
                _ => false,
            }
        }
    }

    #[test]
    fn first_read_only_name_match_aborts_the_scan() {
        let source = SpeedSource { speed: 88 };
        let (target, changed): (LockedGauge, bool) = adapt_reporting(&source);

        assert_eq!(target.speed, 0);
        assert!(!changed);
    }

    #[test]
    fn type_mismatch_keeps_scanning_to_a_later_eligible_match() {
        let source = SpeedSource { speed: 88 };
        let (target, changed): (WideGauge, bool) = adapt_reporting(&source);

        assert_eq!(target.speed, 88);
        assert!(changed);
    }

    #[test]
    fn match_target_is_a_pure_query() {
        let spec = FieldSpec {
            name: "speed",
            ty: type_tag::<i64>,
            settable: true,
        };

        assert!(match_target(&spec, LockedGauge::FIELDS).is_none());
        assert!(match_target(&spec, WideGauge::FIELDS).is_some());
        assert!(match_target(&spec, &[]).is_none());
    }

    #[test]
    fn freshness_tracks_default_state() {
        assert!(is_fresh(&SpeedSource::default()));
        assert!(!is_fresh(&SpeedSource { speed: 1 }));
    }
}
