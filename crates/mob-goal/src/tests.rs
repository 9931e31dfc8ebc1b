//! Unit and property tests for mob-goal.

use crate::{Flag, FlagSet, Goal, GoalSelector};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Start(usize),
    Stop(usize),
}

/// Scripted context: per-probe eligibility plus lifecycle counters.
struct World {
    eligible:   Vec<bool>,
    continuing: Vec<bool>,
    starts:     Vec<u32>,
    stops:      Vec<u32>,
    ticks:      Vec<u32>,
    events:     Vec<Event>,
}

impl World {
    /// `n` probes, all eligible.
    fn new(n: usize) -> Self {
        Self {
            eligible:   vec![true; n],
            continuing: vec![true; n],
            starts:     vec![0; n],
            stops:      vec![0; n],
            ticks:      vec![0; n],
            events:     Vec::new(),
        }
    }

    /// Set both activation and continuation for probe `idx`.
    fn set(&mut self, idx: usize, usable: bool) {
        self.eligible[idx] = usable;
        self.continuing[idx] = usable;
    }
}

struct Probe {
    idx:           usize,
    flags:         FlagSet,
    interruptable: bool,
    every_tick:    bool,
}

impl Probe {
    fn new(idx: usize, flags: impl Into<FlagSet>) -> Self {
        Self { idx, flags: flags.into(), interruptable: true, every_tick: false }
    }

    fn uninterruptable(mut self) -> Self {
        self.interruptable = false;
        self
    }

    fn every_tick(mut self) -> Self {
        self.every_tick = true;
        self
    }
}

impl Goal<World> for Probe {
    fn flags(&self) -> FlagSet {
        self.flags
    }

    fn can_use(&mut self, w: &World) -> bool {
        w.eligible[self.idx]
    }

    fn can_continue_to_use(&mut self, w: &World) -> bool {
        w.continuing[self.idx]
    }

    fn is_interruptable(&self) -> bool {
        self.interruptable
    }

    fn requires_update_every_tick(&self) -> bool {
        self.every_tick
    }

    fn start(&mut self, w: &mut World) {
        w.starts[self.idx] += 1;
        w.events.push(Event::Start(self.idx));
    }

    fn stop(&mut self, w: &mut World) {
        w.stops[self.idx] += 1;
        w.events.push(Event::Stop(self.idx));
    }

    fn tick(&mut self, w: &mut World) {
        w.ticks[self.idx] += 1;
    }
}

fn running(selector: &GoalSelector<World>) -> Vec<u32> {
    selector.running_goals().map(|g| g.id().0).collect()
}

// ── Flags ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod flag_tests {
    use super::*;

    #[test]
    fn set_operations() {
        let mut set = Flag::Move | Flag::Look;
        assert!(set.contains(Flag::Move));
        assert!(!set.contains(Flag::Jump));
        assert_eq!(set.len(), 2);

        set |= Flag::Jump;
        set.remove(Flag::Move);
        assert_eq!(set, FlagSet::of(&[Flag::Look, Flag::Jump]));
        assert!(set.intersects(Flag::Jump.into()));
        assert!(!set.intersects(Flag::Target | Flag::Move));
    }

    #[test]
    fn iterates_in_bit_order() {
        let set: FlagSet = [Flag::Target, Flag::Move, Flag::Jump].into_iter().collect();
        let flags: Vec<Flag> = set.iter().collect();
        assert_eq!(flags, vec![Flag::Move, Flag::Jump, Flag::Target]);
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn all_contains_every_flag() {
        assert_eq!(FlagSet::ALL.len(), Flag::COUNT);
        for flag in Flag::ALL {
            assert!(FlagSet::ALL.contains(flag));
        }
    }

    #[test]
    fn empty_becomes_unknown() {
        assert_eq!(FlagSet::EMPTY.or_unknown(), FlagSet::from(Flag::Unknown));
        let moving = FlagSet::from(Flag::Move);
        assert_eq!(moving.or_unknown(), moving);
    }

    #[test]
    fn display() {
        assert_eq!((Flag::Move | Flag::Look).to_string(), "move|look");
        assert_eq!(FlagSet::EMPTY.to_string(), "none");
    }
}

// ── Goal defaults ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod goal_tests {
    use super::*;
    use crate::reduced_tick_delay;

    struct Minimal;

    impl Goal<()> for Minimal {
        fn can_use(&mut self, _ctx: &()) -> bool {
            true
        }
    }

    #[test]
    fn defaults() {
        let mut goal = Minimal;
        assert!(goal.flags().is_empty());
        assert!(goal.can_continue_to_use(&()));
        assert!(goal.is_interruptable());
        assert!(!goal.requires_update_every_tick());
        assert!(goal.name().ends_with("Minimal"));
    }

    #[test]
    fn reduced_delay_rounds_up() {
        assert_eq!(reduced_tick_delay(0), 0);
        assert_eq!(reduced_tick_delay(1), 1);
        assert_eq!(reduced_tick_delay(10), 5);
        assert_eq!(reduced_tick_delay(11), 6);
    }

    #[test]
    fn adjusted_delay_follows_cadence() {
        assert_eq!(Minimal.adjusted_tick_delay(10), 5);
        let fast = Probe::new(0, Flag::Move).every_tick();
        assert_eq!(fast.adjusted_tick_delay(10), 10);
    }

    #[test]
    fn goal_is_object_safe() {
        let mut goal: Box<dyn Goal<()>> = Box::new(Minimal);
        assert!(goal.can_use(&()));
    }
}

// ── Scheduled goal wrapper ────────────────────────────────────────────────────

#[cfg(test)]
mod wrapped_tests {
    use mob_core::GoalId;

    use super::*;
    use crate::WrappedGoal;

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut w = World::new(1);
        let mut goal = WrappedGoal::<World>::new(GoalId(0), 1, Box::new(Probe::new(0, Flag::Move)));
        goal.start(&mut w);
        goal.start(&mut w);
        assert!(goal.is_running());
        assert_eq!(w.starts[0], 1);

        goal.stop(&mut w);
        goal.stop(&mut w);
        assert!(!goal.is_running());
        assert_eq!(w.stops[0], 1);
    }

    #[test]
    fn stop_before_start_is_noop() {
        let mut w = World::new(1);
        let mut goal = WrappedGoal::<World>::new(GoalId(0), 1, Box::new(Probe::new(0, Flag::Move)));
        goal.stop(&mut w);
        assert_eq!(w.stops[0], 0);
    }

    #[test]
    fn replacement_rule() {
        let high = WrappedGoal::<World>::new(GoalId(0), 0, Box::new(Probe::new(0, Flag::Move)));
        let low = WrappedGoal::<World>::new(GoalId(1), 5, Box::new(Probe::new(1, Flag::Move)));
        let peer = WrappedGoal::<World>::new(GoalId(2), 5, Box::new(Probe::new(2, Flag::Move)));
        let stubborn = WrappedGoal::<World>::new(
            GoalId(3), 5, Box::new(Probe::new(3, Flag::Move).uninterruptable()),
        );

        assert!(low.can_be_replaced_by(&high));
        assert!(!high.can_be_replaced_by(&low));
        assert!(!low.can_be_replaced_by(&peer), "equal priority never preempts");
        assert!(!stubborn.can_be_replaced_by(&high));
    }

    #[test]
    fn sentinel_yields_to_every_priority() {
        let sentinel = WrappedGoal::<World>::no_goal();
        let lowest = WrappedGoal::<World>::new(GoalId(0), i32::MAX, Box::new(Probe::new(0, Flag::Move)));
        assert!(!sentinel.is_running());
        assert!(sentinel.can_be_replaced_by(&lowest));
    }

    #[test]
    fn empty_flags_become_unknown() {
        let goal = WrappedGoal::<World>::new(GoalId(0), 0, Box::new(Probe::new(0, FlagSet::EMPTY)));
        assert_eq!(goal.flags(), FlagSet::from(Flag::Unknown));
    }

    #[test]
    fn equality_is_identity() {
        let a = WrappedGoal::<World>::new(GoalId(4), 0, Box::new(Probe::new(0, Flag::Move)));
        let b = WrappedGoal::<World>::new(GoalId(4), 9, Box::new(Probe::new(1, Flag::Look)));
        let c = WrappedGoal::<World>::new(GoalId(5), 0, Box::new(Probe::new(0, Flag::Move)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

// ── Selector scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod selector_tests {
    use mob_core::GoalId;

    use super::*;
    use crate::{GoalError, SelectorConfig};

    #[test]
    fn empty_pool_is_noop() {
        let mut w = World::new(0);
        let mut selector = GoalSelector::<World>::new();
        selector.tick(&mut w);
        assert!(!selector.has_any_running());
        assert!(selector.is_empty());
        assert!(w.events.is_empty());
    }

    #[test]
    fn higher_precedence_wins_contested_flag() {
        let mut w = World::new(2);
        let mut selector = GoalSelector::new();
        let first = selector.add_goal(1, Probe::new(0, Flag::Move));
        let second = selector.add_goal(2, Probe::new(1, Flag::Move));

        selector.tick(&mut w);

        assert_eq!(selector.holder_of(Flag::Move), Some(first));
        assert!(selector.get(first).unwrap().is_running());
        assert!(!selector.get(second).unwrap().is_running());
    }

    #[test]
    fn lower_precedence_registered_first_is_preempted_in_same_pass() {
        let mut w = World::new(2);
        let mut selector = GoalSelector::new();
        let low = selector.add_goal(2, Probe::new(0, Flag::Move));
        let high = selector.add_goal(1, Probe::new(1, Flag::Move));

        selector.tick(&mut w);

        assert_eq!(selector.holder_of(Flag::Move), Some(high));
        assert!(!selector.get(low).unwrap().is_running());
        assert_eq!(w.events, vec![Event::Start(0), Event::Stop(0), Event::Start(1)]);
    }

    #[test]
    fn new_higher_precedence_goal_preempts_holder() {
        let mut w = World::new(2);
        w.set(1, false);
        let mut selector = GoalSelector::new();
        let holder = selector.add_goal(1, Probe::new(0, Flag::Move));
        let challenger = selector.add_goal(0, Probe::new(1, Flag::Move));

        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Move), Some(holder));

        w.set(1, true);
        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Move), Some(challenger));
        assert!(!selector.get(holder).unwrap().is_running());
        assert_eq!(w.stops[0], 1);
    }

    #[test]
    fn uninterruptable_holder_keeps_flag() {
        let mut w = World::new(2);
        w.set(1, false);
        let mut selector = GoalSelector::new();
        let holder = selector.add_goal(1, Probe::new(0, Flag::Move).uninterruptable());
        let challenger = selector.add_goal(0, Probe::new(1, Flag::Move));

        selector.tick(&mut w);
        w.set(1, true);
        selector.tick(&mut w);

        assert_eq!(selector.holder_of(Flag::Move), Some(holder));
        assert!(!selector.get(challenger).unwrap().is_running());
        assert_eq!(w.stops[0], 0);
    }

    #[test]
    fn equal_priority_never_preempts() {
        let mut w = World::new(2);
        w.set(1, false);
        let mut selector = GoalSelector::new();
        let holder = selector.add_goal(3, Probe::new(0, Flag::Move));
        selector.add_goal(3, Probe::new(1, Flag::Move));

        selector.tick(&mut w);
        w.set(1, true);
        selector.tick(&mut w);

        assert_eq!(selector.holder_of(Flag::Move), Some(holder));
        assert_eq!(w.starts[1], 0);
    }

    #[test]
    fn expired_goal_frees_flag_for_same_tick_selection() {
        let mut w = World::new(2);
        let mut selector = GoalSelector::new();
        let first = selector.add_goal(1, Probe::new(0, Flag::Move));
        let second = selector.add_goal(2, Probe::new(1, Flag::Move));

        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Move), Some(first));

        w.set(0, false);
        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Move), Some(second));
        assert!(!selector.get(first).unwrap().is_running());
        assert_eq!(w.ticks[1], 1, "newly selected goal is ticked in the same step");
    }

    #[test]
    fn continuation_can_differ_from_activation() {
        let mut w = World::new(1);
        let mut selector = GoalSelector::new();
        let goal = selector.add_goal(1, Probe::new(0, Flag::Move));

        selector.tick(&mut w);
        w.eligible[0] = false;
        selector.tick(&mut w);

        assert!(selector.get(goal).unwrap().is_running());
        assert_eq!(w.ticks[0], 2);
    }

    #[test]
    fn disabled_flag_stops_holder_until_reenabled() {
        let mut w = World::new(2);
        let mut selector = GoalSelector::new();
        let mover = selector.add_goal(1, Probe::new(0, Flag::Move));
        let backup = selector.add_goal(2, Probe::new(1, Flag::Move | Flag::Look));

        selector.tick(&mut w);
        selector.set_control_flag(Flag::Move, false);
        selector.tick(&mut w);

        assert!(!selector.has_any_running());
        assert_eq!(selector.holder_of(Flag::Move), None);
        assert_eq!(w.starts[1], 0);

        selector.set_control_flag(Flag::Move, true);
        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Move), Some(mover));
        assert!(!selector.get(backup).unwrap().is_running());
    }

    #[test]
    fn multi_flag_acquisition_is_atomic() {
        let mut w = World::new(3);
        w.set(2, false);
        let mut selector = GoalSelector::new();
        let looker = selector.add_goal(0, Probe::new(0, Flag::Look).uninterruptable());
        let mover = selector.add_goal(5, Probe::new(1, Flag::Move));
        let both = selector.add_goal(1, Probe::new(2, Flag::Move | Flag::Look));

        selector.tick(&mut w);
        w.set(2, true);
        selector.tick(&mut w);

        // LOOK is not replaceable, so MOVE must not be taken either.
        assert!(!selector.get(both).unwrap().is_running());
        assert_eq!(selector.holder_of(Flag::Move), Some(mover));
        assert_eq!(selector.holder_of(Flag::Look), Some(looker));
        assert_eq!(w.stops[1], 0);
    }

    #[test]
    fn multi_flag_goal_evicts_every_holder() {
        let mut w = World::new(3);
        w.set(2, false);
        let mut selector = GoalSelector::new();
        selector.add_goal(4, Probe::new(0, Flag::Look));
        selector.add_goal(5, Probe::new(1, Flag::Move));
        let both = selector.add_goal(1, Probe::new(2, Flag::Move | Flag::Look));

        selector.tick(&mut w);
        assert_eq!(running(&selector), vec![0, 1]);

        w.set(2, true);
        selector.tick(&mut w);
        assert_eq!(running(&selector), vec![2]);
        assert_eq!(selector.holder_of(Flag::Move), Some(both));
        assert_eq!(selector.holder_of(Flag::Look), Some(both));
    }

    #[test]
    fn disjoint_flags_run_concurrently() {
        let mut w = World::new(3);
        let mut selector = GoalSelector::new();
        selector.add_goal(1, Probe::new(0, Flag::Move));
        selector.add_goal(1, Probe::new(1, Flag::Look));
        selector.add_goal(1, Probe::new(2, Flag::Jump));

        selector.tick(&mut w);
        assert_eq!(running(&selector), vec![0, 1, 2]);
    }

    #[test]
    fn flagless_goals_contend_for_unknown() {
        let mut w = World::new(2);
        let mut selector = GoalSelector::new();
        let a = selector.add_goal(1, Probe::new(0, FlagSet::EMPTY));
        selector.add_goal(2, Probe::new(1, FlagSet::EMPTY));

        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Unknown), Some(a));
        assert_eq!(running(&selector), vec![0]);
    }

    #[test]
    fn preempted_goal_is_not_reselected_in_same_pass() {
        let mut w = World::new(2);
        w.set(0, false);
        let mut selector = GoalSelector::new();
        let high = selector.add_goal(0, Probe::new(0, Flag::Move));
        let low = selector.add_goal(1, Probe::new(1, Flag::Move | Flag::Jump));

        selector.tick(&mut w);
        w.set(0, true);
        selector.tick(&mut w);

        assert_eq!(selector.holder_of(Flag::Move), Some(high));
        assert_eq!(selector.holder_of(Flag::Jump), None);
        assert!(!selector.get(low).unwrap().is_running());
        assert_eq!(w.starts[1], 1);
    }

    #[test]
    fn reduced_cadence_ticks_only_every_tick_goals() {
        let mut w = World::new(2);
        let mut selector = GoalSelector::new();
        selector.add_goal(1, Probe::new(0, Flag::Move));
        selector.add_goal(1, Probe::new(1, Flag::Look).every_tick());

        selector.tick(&mut w);
        assert_eq!(w.ticks, vec![1, 1]);

        selector.tick_running_goals(false, &mut w);
        assert_eq!(w.ticks, vec![1, 2]);

        selector.tick_running_goals(true, &mut w);
        assert_eq!(w.ticks, vec![2, 3]);
    }

    #[test]
    fn remove_goal_stops_and_releases_lock() {
        let mut w = World::new(3);
        let mut selector = GoalSelector::new();
        let looker = selector.add_goal(1, Probe::new(0, Flag::Look));
        let mover = selector.add_goal(1, Probe::new(1, Flag::Move));
        let spare = selector.add_goal(2, Probe::new(2, Flag::Move));

        selector.tick(&mut w);
        let removed = selector.remove_goal(mover, &mut w);

        assert!(removed.is_some());
        assert_eq!(w.stops[1], 1);
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.holder_of(Flag::Move), None);
        assert_eq!(selector.holder_of(Flag::Look), Some(looker));

        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Move), Some(spare));
        assert_eq!(selector.holder_of(Flag::Look), Some(looker));
    }

    #[test]
    fn remove_unknown_goal_returns_none() {
        let mut w = World::new(0);
        let mut selector = GoalSelector::<World>::new();
        assert!(selector.remove_goal(GoalId(9), &mut w).is_none());
    }

    #[test]
    fn remove_all_goals_by_predicate() {
        let mut w = World::new(4);
        let mut selector = GoalSelector::new();
        selector.add_goal(1, Probe::new(0, Flag::Look));
        let mover = selector.add_goal(1, Probe::new(1, Flag::Move));
        selector.add_goal(2, Probe::new(2, Flag::Look | Flag::Jump));
        let jumper = selector.add_goal(1, Probe::new(3, Flag::Jump));

        selector.tick(&mut w);
        let removed = selector.remove_all_goals(|g| g.flags().contains(Flag::Look), &mut w);

        assert_eq!(removed, 2);
        assert_eq!(w.stops[0], 1);
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.holder_of(Flag::Look), None);
        assert_eq!(selector.holder_of(Flag::Move), Some(mover));
        assert_eq!(selector.holder_of(Flag::Jump), Some(jumper));
    }

    #[test]
    fn remove_all_goals_matches_locked_flags() {
        let mut w = World::new(3);
        let mut selector = GoalSelector::new();
        let retargeted = selector.add_goal(1, Probe::new(0, Flag::Move));
        selector.add_goal(2, Probe::new(1, Flag::Move));
        let flagless = selector.add_goal(3, Probe::new(2, FlagSet::EMPTY));
        selector.set_flags(retargeted, Flag::Look.into()).unwrap();

        let removed = selector.remove_all_goals(|g| g.flags().contains(Flag::Look), &mut w);
        assert_eq!(removed, 1);
        assert!(selector.get(retargeted).is_none());

        selector.tick(&mut w);
        assert_eq!(selector.holder_of(Flag::Unknown), Some(flagless));

        let removed = selector.remove_all_goals(|g| g.flags().contains(Flag::Unknown), &mut w);
        assert_eq!(removed, 1);
        assert_eq!(w.stops[2], 1);
        assert_eq!(selector.holder_of(Flag::Unknown), None);
        assert_eq!(selector.len(), 1);
    }

    #[test]
    fn set_flags_refused_while_running() {
        let mut w = World::new(2);
        w.set(1, false);
        let mut selector = GoalSelector::new();
        let active = selector.add_goal(1, Probe::new(0, Flag::Move));
        let idle = selector.add_goal(1, Probe::new(1, Flag::Move));

        selector.tick(&mut w);
        assert!(matches!(
            selector.set_flags(active, Flag::Look.into()),
            Err(GoalError::FlagsLockedWhileRunning(id)) if id == active
        ));

        selector.set_flags(idle, FlagSet::EMPTY).unwrap();
        assert_eq!(selector.get(idle).unwrap().flags(), FlagSet::from(Flag::Unknown));

        assert!(matches!(
            selector.set_flags(GoalId(42), Flag::Move.into()),
            Err(GoalError::UnknownGoal(_))
        ));
    }

    #[test]
    fn retargeted_flags_take_effect_next_tick() {
        let mut w = World::new(2);
        w.set(1, false);
        let mut selector = GoalSelector::new();
        selector.add_goal(1, Probe::new(0, Flag::Move));
        let other = selector.add_goal(2, Probe::new(1, Flag::Move));

        selector.tick(&mut w);
        selector.set_flags(other, Flag::Look.into()).unwrap();
        w.set(1, true);
        selector.tick(&mut w);

        assert_eq!(selector.holder_of(Flag::Look), Some(other));
    }

    #[test]
    fn inactive_tick_fires_every_rate_calls() {
        let mut selector = GoalSelector::<World>::new();
        assert_eq!(selector.new_goal_rate(), 3);
        let fired: Vec<bool> = (0..6).map(|_| selector.inactive_tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true]);

        selector.set_new_goal_rate(1).unwrap();
        assert!(selector.inactive_tick());
    }

    #[test]
    fn zero_goal_rate_rejected() {
        let mut selector = GoalSelector::<World>::new();
        assert!(matches!(selector.set_new_goal_rate(0), Err(GoalError::InvalidGoalRate)));
        assert!(GoalSelector::<World>::with_config(&SelectorConfig { new_goal_rate: 0 }).is_err());

        let configured = GoalSelector::<World>::with_config(&SelectorConfig { new_goal_rate: 7 }).unwrap();
        assert_eq!(configured.new_goal_rate(), 7);
    }

    #[test]
    fn goal_ids_are_sequential() {
        let mut selector = GoalSelector::<World>::new();
        let a = selector.add_goal(0, Probe::new(0, Flag::Move));
        let b = selector.add_goal(0, Probe::new(1, Flag::Move));
        assert_eq!((a, b), (GoalId(0), GoalId(1)));
        assert_eq!(selector.available_goals().len(), 2);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    const REAL_FLAGS: [Flag; 4] = [Flag::Move, Flag::Look, Flag::Jump, Flag::Target];

    #[derive(Debug, Clone)]
    struct GoalPlan {
        flags:         FlagSet,
        priority:      i32,
        interruptable: bool,
        every_tick:    bool,
    }

    #[derive(Debug, Clone)]
    struct Step {
        eligible:   Vec<bool>,
        continuing: Vec<bool>,
        disabled:   FlagSet,
    }

    fn flags_from_bits(bits: u8) -> FlagSet {
        REAL_FLAGS
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, f)| *f)
            .collect()
    }

    fn arb_goal_plan() -> impl Strategy<Value = GoalPlan> {
        (0u8..16, 0i32..4, any::<bool>(), any::<bool>()).prop_map(
            |(bits, priority, interruptable, every_tick)| GoalPlan {
                flags: flags_from_bits(bits),
                priority,
                interruptable,
                every_tick,
            },
        )
    }

    fn arb_step(n: usize) -> impl Strategy<Value = Step> {
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(any::<bool>(), n),
            // Mostly nothing disabled.
            prop_oneof![3 => Just(0u8), 1 => 0u8..16],
        )
            .prop_map(|(eligible, continuing, bits)| Step {
                eligible,
                continuing,
                disabled: flags_from_bits(bits),
            })
    }

    fn arb_scenario() -> impl Strategy<Value = (Vec<GoalPlan>, Vec<Step>)> {
        prop::collection::vec(arb_goal_plan(), 1..7).prop_flat_map(|plans| {
            let n = plans.len();
            (Just(plans), prop::collection::vec(arb_step(n), 1..25))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn arbitration_invariants_hold((plans, steps) in arb_scenario()) {
            let n = plans.len();
            let mut w = World::new(n);
            let mut selector = GoalSelector::new();
            for (idx, plan) in plans.iter().enumerate() {
                let mut probe = Probe::new(idx, plan.flags);
                probe.interruptable = plan.interruptable;
                probe.every_tick = plan.every_tick;
                selector.add_goal(plan.priority, probe);
            }
            let declared: Vec<FlagSet> = plans.iter().map(|s| s.flags.or_unknown()).collect();

            let mut was_running = vec![false; n];
            for step in &steps {
                w.eligible.clone_from(&step.eligible);
                w.continuing.clone_from(&step.continuing);
                w.events.clear();
                for flag in REAL_FLAGS {
                    selector.set_control_flag(flag, !step.disabled.contains(flag));
                }

                selector.tick(&mut w);

                let is_running: Vec<bool> =
                    selector.available_goals().iter().map(|g| g.is_running()).collect();
                let started: Vec<usize> = w.events.iter().filter_map(|e| match e {
                    Event::Start(i) => Some(*i),
                    Event::Stop(_) => None,
                }).collect();

                // Exclusivity.
                for flag in Flag::ALL {
                    let holders = (0..n).filter(|&i| is_running[i] && declared[i].contains(flag)).count();
                    prop_assert!(holders <= 1, "flag {flag} held by {holders} goals");
                }

                for i in 0..n {
                    // Atomic acquisition: a running goal holds every flag it declares.
                    if is_running[i] {
                        for flag in declared[i] {
                            prop_assert_eq!(selector.holder_of(flag), Some(mob_core::GoalId(i as u32)));
                        }
                    }

                    // Disabled-flag suppression.
                    prop_assert!(!(is_running[i] && declared[i].intersects(step.disabled)));

                    // Idempotent lifecycle.
                    let balance = w.starts[i] - w.stops[i];
                    prop_assert_eq!(balance, u32::from(is_running[i]));

                    // Cleanup before selection: an expired goal only runs again
                    // if it was re-selected this tick.
                    if was_running[i] && !step.continuing[i] && is_running[i] {
                        prop_assert!(started.contains(&i));
                    }

                    // Priority monotonicity and holder immunity: a goal that
                    // wanted to continue and was not disabled only stops when
                    // a strictly higher-precedence goal took one of its flags.
                    if was_running[i]
                        && step.continuing[i]
                        && !declared[i].intersects(step.disabled)
                        && !is_running[i]
                    {
                        let justified = started.iter().any(|&j| {
                            declared[j].intersects(declared[i])
                                && plans[i].interruptable
                                && plans[j].priority < plans[i].priority
                        });
                        prop_assert!(justified, "goal {i} stopped without a valid preemption");
                    }
                }

                was_running = is_running;
            }
        }

        #[test]
        fn inactive_tick_fires_exactly_every_rate(rate in 1u32..10, calls in 1usize..100) {
            let mut selector = GoalSelector::<World>::new();
            selector.set_new_goal_rate(rate).unwrap();
            let fired = (0..calls).filter(|_| selector.inactive_tick()).count();
            prop_assert_eq!(fired, calls / rate as usize);
        }
    }
}
