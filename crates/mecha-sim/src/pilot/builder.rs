//! The default pilot brain.

use mecha_behavior::builder::{action, parallel, scored, sequence, utility_selector};
use mecha_behavior::{
    Aggregation, BehaviorTree, Blackboard, Consideration, ParallelPolicy, ResponseCurve,
};
use mecha_core::constants::DEFAULT_DESIRED_RANGE;

use crate::battlefield::Battlefield;
use crate::pilot::approach::MoveToTarget;
use crate::pilot::attack::Attack;
use crate::pilot::evade::EvadeDash;
use crate::pilot::evade_toggle::EvadeToggle;
use crate::pilot::idle::idle;
use crate::pilot::keys;
use crate::pilot::profile::PilotProfile;
use crate::pilot::strafe::MaintainRangeStrafe;
use crate::pilot::target::UpdateTarget;

/// ```text
/// Sequence
/// ├── UpdateTarget
/// └── UtilitySelector
///     ├── engage:   Parallel(RequireOne)[Strafe, EvadeToggle, EvadeDash, Attack]
///     ├── approach: MoveToTarget
///     └── idle:     Idle
/// ```
pub fn default_tree(profile: &PilotProfile) -> BehaviorTree<Battlefield> {
    let engage = parallel(
        ParallelPolicy::RequireOne,
        vec![
            action(MaintainRangeStrafe::new(profile)),
            action(EvadeToggle::new(profile)),
            action(EvadeDash::new(profile.evade_dash_tti)),
            action(Attack::new(profile.attack_range)),
        ],
    );

    let options = vec![
        scored(
            "engage",
            vec![
                has_target(),
                // Distance over engage range: near 1 inside range, falling
                // off quickly beyond it.
                Consideration::new("in reach", |field: &Battlefield, bb: &Blackboard| {
                    reach_ratio(field, bb).unwrap_or(f64::INFINITY)
                })
                .with_range(0.0, 2.0)
                .with_curve(ResponseCurve::Logistic {
                    steepness: -12.0,
                    midpoint: 0.6,
                }),
            ],
            engage,
        )
        .with_aggregation(Aggregation::Min),
        scored(
            "approach",
            vec![
                has_target(),
                Consideration::new("energy", |field: &Battlefield, _: &Blackboard| {
                    field.with_focus(|a| a.energy().ratio()).unwrap_or(0.0)
                })
                .with_curve(ResponseCurve::Linear {
                    slope: 0.3,
                    offset: 0.4,
                }),
            ],
            action(MoveToTarget::new(profile.stop_distance)),
        )
        .with_aggregation(Aggregation::Min),
        scored("idle", vec![Consideration::constant(0.1)], idle()),
    ];

    BehaviorTree::new(sequence(vec![
        action(UpdateTarget::new(profile.target_hysteresis)),
        utility_selector(options),
    ]))
}

fn has_target() -> Consideration<Battlefield> {
    Consideration::new("has target", |field: &Battlefield, bb: &Blackboard| {
        let alive = keys::target(bb)
            .ok()
            .flatten()
            .and_then(|id| field.actors.alive(id))
            .is_some();
        if alive {
            1.0
        } else {
            0.0
        }
    })
}

/// Distance to the target divided by the longest weapon range.
fn reach_ratio(field: &Battlefield, bb: &Blackboard) -> Option<f64> {
    let target = field.actors.alive(keys::target(bb).ok().flatten()?)?;
    let me = field.focus_entry()?;
    let range = field
        .with_focus(|a| a.longest_range())
        .flatten()
        .unwrap_or(DEFAULT_DESIRED_RANGE);
    Some(me.position.distance(target.position) / range.max(0.1))
}
