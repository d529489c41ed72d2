//! Layout reconciliation.
//!
//! Makes sure every live instance has an entry at every breakpoint, and
//! that no entry outlives its instance. Existing entries are never moved.
//! New entries are stacked below the lowest occupied row at `x = 0`, in
//! instance-list order; gaps left by removed widgets are not backfilled.

use std::collections::HashSet;

use crate::instance::{InstanceId, WidgetInstance};
use crate::registry::{GridSize, WidgetRegistry};

use super::{Breakpoint, LayoutEntry, Layouts};

/// Size used when an instance's type is missing from the registry.
pub const FALLBACK_SIZE: GridSize = GridSize::new(6, 4);

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entries created for instances that had none.
    pub placed: usize,
    /// Entries dropped because their instance no longer exists.
    pub pruned: usize,
}

impl ReconcileReport {
    /// Returns `true` if the pass modified the layout map.
    pub fn changed(&self) -> bool {
        self.placed > 0 || self.pruned > 0
    }
}

/// Reconciles `layouts` against `instances` at every breakpoint.
///
/// After this call every breakpoint key is present in `layouts`, each live
/// instance has exactly the entries it had before plus one for any
/// breakpoint where it was missing, and orphaned entries are gone.
pub fn reconcile(
    registry: &WidgetRegistry,
    instances: &[WidgetInstance],
    layouts: &mut Layouts,
) -> ReconcileReport {
    let live: HashSet<&InstanceId> = instances.iter().map(|w| &w.id).collect();
    let mut report = ReconcileReport::default();

    for breakpoint in Breakpoint::ALL {
        let entries = layouts.entries_mut(breakpoint);

        let before = entries.len();
        entries.retain(|e| live.contains(&e.i));
        report.pruned += before - entries.len();

        for instance in instances {
            if entries.iter().any(|e| e.i == instance.id) {
                continue;
            }
            let entry = place(registry, instance, breakpoint, entries);
            entries.push(entry);
            report.placed += 1;
        }
    }

    if report.changed() {
        tracing::debug!(
            placed = report.placed,
            pruned = report.pruned,
            "Reconciled layouts"
        );
    }
    report
}

/// Builds the entry for an unplaced instance below everything in `existing`.
fn place(
    registry: &WidgetRegistry,
    instance: &WidgetInstance,
    breakpoint: Breakpoint,
    existing: &[LayoutEntry],
) -> LayoutEntry {
    let columns = breakpoint.columns();
    let y = existing.iter().map(LayoutEntry::bottom).max().unwrap_or(0);

    let Some(descriptor) = registry.get_type(&instance.widget_type) else {
        tracing::debug!(
            "No registry entry for {} ({}), using fallback size",
            instance.id,
            instance.widget_type
        );
        return LayoutEntry::new(
            instance.id.clone(),
            0,
            y,
            FALLBACK_SIZE.width.min(columns),
            FALLBACK_SIZE.height,
        );
    };

    let size = descriptor.default_size;
    let bounds = descriptor.size_bounds;
    LayoutEntry {
        i: instance.id.clone(),
        x: 0,
        y,
        w: size.width.min(columns),
        h: size.height,
        min_w: bounds.min_width.map(|m| m.min(columns)),
        min_h: bounds.min_height,
        max_w: bounds.max_width,
        max_h: bounds.max_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{SizeBounds, WidgetCategory, WidgetTypeDescriptor};

    fn registry() -> WidgetRegistry {
        WidgetRegistry::builder()
            .register(WidgetTypeDescriptor::new(
                "Chat",
                "Chat",
                WidgetCategory::AiAgents,
                GridSize::new(6, 9),
            ))
            .and_then(|b| {
                b.register(
                    WidgetTypeDescriptor::new(
                        "Kanban",
                        "Kanban",
                        WidgetCategory::ProjectManagement,
                        GridSize::new(12, 12),
                    )
                    .with_bounds(SizeBounds {
                        min_width: Some(8),
                        min_height: Some(8),
                        ..SizeBounds::default()
                    }),
                )
            })
            .expect("valid test registry")
            .build()
    }

    fn instance(id: &str, widget_type: &str) -> WidgetInstance {
        WidgetInstance::with_id(InstanceId::from(id), widget_type)
    }

    fn ids_and_ys(layouts: &Layouts, bp: Breakpoint) -> Vec<(String, u32)> {
        layouts
            .get(bp)
            .iter()
            .map(|e| (e.i.to_string(), e.y))
            .collect()
    }

    #[test]
    fn two_chats_stack_vertically_on_lg() {
        let reg = registry();
        let instances = vec![instance("c1", "Chat"), instance("c2", "Chat")];
        let mut layouts = Layouts::new();
        let report = reconcile(&reg, &instances, &mut layouts);

        assert_eq!(
            layouts.get(Breakpoint::Lg),
            &[
                LayoutEntry::new("c1", 0, 0, 6, 9),
                LayoutEntry::new("c2", 0, 9, 6, 9)
            ]
        );
        assert_eq!(report.placed, 2 * Breakpoint::ALL.len());
        assert_eq!(report.pruned, 0);
    }

    #[test]
    fn placement_is_monotonic_for_n_widgets() {
        let reg = registry();
        let instances: Vec<_> = (0..5).map(|n| instance(&format!("c{n}"), "Chat")).collect();
        let mut layouts = Layouts::new();
        reconcile(&reg, &instances, &mut layouts);

        let ys: Vec<_> = layouts.get(Breakpoint::Lg).iter().map(|e| e.y).collect();
        assert_eq!(ys, vec![0, 9, 18, 27, 36]);
        assert!(layouts.get(Breakpoint::Lg).iter().all(|e| e.x == 0));
    }

    #[test]
    fn width_clamps_to_breakpoint_columns() {
        let reg = registry();
        let instances = vec![instance("k", "Kanban")];
        let mut layouts = Layouts::new();
        reconcile(&reg, &instances, &mut layouts);

        for bp in Breakpoint::ALL {
            let entry = &layouts.get(bp)[0];
            assert_eq!(entry.w, bp.columns().min(12), "width at {bp}");
            assert_eq!(entry.h, 12, "height is never clamped at {bp}");
            assert!(entry.min_w.unwrap_or(0) <= bp.columns());
        }
        assert_eq!(layouts.get(Breakpoint::Xs)[0].w, 4);
        assert_eq!(layouts.get(Breakpoint::Xs)[0].min_w, Some(4));
        assert_eq!(layouts.get(Breakpoint::Lg)[0].min_w, Some(8));
        assert_eq!(layouts.get(Breakpoint::Lg)[0].min_h, Some(8));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let reg = registry();
        let instances = vec![instance("c1", "Chat"), instance("k", "Kanban")];
        let mut layouts = Layouts::new();
        reconcile(&reg, &instances, &mut layouts);
        let snapshot = layouts.clone();

        let report = reconcile(&reg, &instances, &mut layouts);
        assert!(!report.changed());
        assert_eq!(layouts, snapshot);
    }

    #[test]
    fn orphans_are_pruned_everywhere() {
        let reg = registry();
        let mut instances = vec![instance("c1", "Chat"), instance("c2", "Chat")];
        let mut layouts = Layouts::new();
        reconcile(&reg, &instances, &mut layouts);

        instances.remove(0);
        let report = reconcile(&reg, &instances, &mut layouts);
        assert_eq!(report.pruned, Breakpoint::ALL.len());
        assert_eq!(report.placed, 0);
        for bp in Breakpoint::ALL {
            assert!(layouts.find(bp, &InstanceId::from("c1")).is_none());
        }
    }

    #[test]
    fn existing_entries_are_not_moved_and_gaps_are_not_backfilled() {
        let reg = registry();
        let mut layouts = Layouts::new();
        // User dragged c1 far down, leaving rows 0..20 empty.
        layouts.set(Breakpoint::Lg, vec![LayoutEntry::new("c1", 3, 20, 4, 5)]);
        let instances = vec![instance("c1", "Chat"), instance("c2", "Chat")];
        reconcile(&reg, &instances, &mut layouts);

        assert_eq!(
            layouts.find(Breakpoint::Lg, &InstanceId::from("c1")),
            Some(&LayoutEntry::new("c1", 3, 20, 4, 5))
        );
        assert_eq!(
            layouts.find(Breakpoint::Lg, &InstanceId::from("c2")).map(|e| (e.x, e.y)),
            Some((0, 25))
        );
    }

    #[test]
    fn placement_follows_instance_order() {
        let reg = registry();
        let instances = vec![instance("k", "Kanban"), instance("c", "Chat")];
        let mut layouts = Layouts::new();
        reconcile(&reg, &instances, &mut layouts);
        assert_eq!(
            ids_and_ys(&layouts, Breakpoint::Lg),
            vec![("k".to_string(), 0), ("c".to_string(), 12)]
        );

        let reversed = vec![instance("c", "Chat"), instance("k", "Kanban")];
        let mut layouts = Layouts::new();
        reconcile(&reg, &reversed, &mut layouts);
        assert_eq!(
            ids_and_ys(&layouts, Breakpoint::Lg),
            vec![("c".to_string(), 0), ("k".to_string(), 9)]
        );
    }

    #[test]
    fn unknown_type_uses_fallback_size() {
        let reg = registry();
        let instances = vec![instance("ghost", "RetiredWidget")];
        let mut layouts = Layouts::new();
        reconcile(&reg, &instances, &mut layouts);

        assert_eq!(
            layouts.get(Breakpoint::Lg),
            &[LayoutEntry::new("ghost", 0, 0, 6, 4)]
        );
        assert_eq!(layouts.get(Breakpoint::Xxs)[0].w, 2);
    }

    #[test]
    fn every_breakpoint_key_exists_afterwards() {
        let reg = registry();
        let mut layouts = Layouts::new();
        reconcile(&reg, &[], &mut layouts);
        assert_eq!(layouts.iter().count(), Breakpoint::ALL.len());
        assert!(layouts.is_empty());
    }

    #[test]
    fn breakpoints_are_reconciled_independently() {
        let reg = registry();
        let mut layouts = Layouts::new();
        layouts.set(Breakpoint::Md, vec![LayoutEntry::new("c1", 0, 0, 6, 9)]);
        let instances = vec![instance("c1", "Chat")];
        let report = reconcile(&reg, &instances, &mut layouts);
        assert_eq!(report.placed, Breakpoint::ALL.len() - 1);
        assert_eq!(layouts.get(Breakpoint::Md).len(), 1);
    }
}
