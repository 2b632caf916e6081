//! Reactive signal graph
//!
//! Fine-grained reactivity for a single UI thread:
//!
//! - [`Signal`]: a writable value
//! - [`Derived`]: a cached value computed from signals and other derived values
//! - [`Effect`]: a side effect re-run whenever something it read changes
//!
//! Dependencies are tracked automatically: every `get`/`get_derived` made while
//! a derived value or an effect is evaluating is recorded as a dependency of
//! that node. Setting a signal recomputes dependent derived values (in creation
//! order, so a derived value always sees fresh inputs) and then runs dependent
//! effects. Updates inside [`ReactiveGraph::batch`] are coalesced.
//!
//! The graph is deliberately `!Send`; it lives on the thread that owns the
//! component and is only touched from that thread's event handlers.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
    /// Unique identifier for a derived value
    pub struct DerivedId;
    /// Unique identifier for an effect
    pub struct EffectId;
}

/// A node that can be read (and therefore depended upon)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Source {
    Signal(SignalId),
    Derived(DerivedId),
}

type Sources = SmallVec<[Source; 4]>;
type ComputeFn = Box<dyn Fn(&ReactiveGraph) -> Box<dyn Any>>;
type EffectFn = Box<dyn FnMut(&ReactiveGraph)>;

/// Typed handle to a signal
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Signal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&self.id).finish()
    }
}

/// Typed handle to a derived value
pub struct Derived<T> {
    id: DerivedId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Derived<T> {
    pub fn id(&self) -> DerivedId {
        self.id
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Derived<T> {}

impl<T> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Derived").field(&self.id).finish()
    }
}

/// Handle to a registered effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn id(&self) -> EffectId {
        self.id
    }
}

struct DerivedNode {
    compute: Option<ComputeFn>,
    value: Box<dyn Any>,
    sources: Sources,
}

struct EffectNode {
    run: Option<EffectFn>,
    sources: Sources,
}

/// The reactive graph owning all signals, derived values and effects
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, Box<dyn Any>>,
    derived: SlotMap<DerivedId, DerivedNode>,
    derived_order: Vec<DerivedId>,
    effects: SlotMap<EffectId, EffectNode>,
    effect_order: Vec<EffectId>,
    tracking: RefCell<Option<Sources>>,
    batch_depth: u32,
    pending: FxHashSet<Source>,
}

impl ReactiveGraph {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            derived: SlotMap::with_key(),
            derived_order: Vec::new(),
            effects: SlotMap::with_key(),
            effect_order: Vec::new(),
            tracking: RefCell::new(None),
            batch_depth: 0,
            pending: FxHashSet::default(),
        }
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Create a signal holding `initial`
    pub fn create_signal<T: 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(Box::new(initial));
        Signal {
            id,
            _marker: PhantomData,
        }
    }

    /// Read a signal (recorded as a dependency when called from a derived value or effect)
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.with(signal, T::clone)
    }

    /// Borrow a signal's value without cloning it
    pub fn with<T: 'static, R>(&self, signal: Signal<T>, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.track(Source::Signal(signal.id));
        self.signals
            .get(signal.id)
            .and_then(|value| value.downcast_ref::<T>())
            .map(f)
    }

    /// Replace a signal's value and propagate
    pub fn set<T: 'static>(&mut self, signal: Signal<T>, value: T) {
        let Some(slot) = self.signals.get_mut(signal.id) else {
            return;
        };
        *slot = Box::new(value);
        self.changed(Source::Signal(signal.id));
    }

    /// Replace a signal's value only if it differs; returns whether it changed
    pub fn set_if_changed<T: PartialEq + 'static>(&mut self, signal: Signal<T>, value: T) -> bool {
        let Some(current) = self
            .signals
            .get(signal.id)
            .and_then(|v| v.downcast_ref::<T>())
        else {
            return false;
        };
        if *current == value {
            return false;
        }
        self.set(signal, value);
        true
    }

    /// Mutate a signal in place and propagate
    pub fn update<T: 'static>(&mut self, signal: Signal<T>, f: impl FnOnce(&mut T)) {
        let Some(value) = self
            .signals
            .get_mut(signal.id)
            .and_then(|v| v.downcast_mut::<T>())
        else {
            return;
        };
        f(value);
        self.changed(Source::Signal(signal.id));
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Create a derived value; it is computed immediately
    pub fn create_derived<T, F>(&mut self, compute: F) -> Derived<T>
    where
        T: 'static,
        F: Fn(&ReactiveGraph) -> T + 'static,
    {
        let boxed: ComputeFn =
            Box::new(move |g: &ReactiveGraph| Box::new(compute(g)) as Box<dyn Any>);
        let (value, sources) = self.tracked(|g| boxed(g));
        let id = self.derived.insert(DerivedNode {
            compute: Some(boxed),
            value,
            sources,
        });
        self.derived_order.push(id);
        Derived {
            id,
            _marker: PhantomData,
        }
    }

    /// Read a derived value
    pub fn get_derived<T: Clone + 'static>(&self, derived: Derived<T>) -> Option<T> {
        self.with_derived(derived, T::clone)
    }

    /// Borrow a derived value without cloning it
    pub fn with_derived<T: 'static, R>(
        &self,
        derived: Derived<T>,
        f: impl FnOnce(&T) -> R,
    ) -> Option<R> {
        self.track(Source::Derived(derived.id));
        self.derived
            .get(derived.id)
            .and_then(|node| node.value.downcast_ref::<T>())
            .map(f)
    }

    // =========================================================================
    // Effects
    // =========================================================================

    /// Register an effect; it runs once immediately and then on every change
    /// to something it read during its previous run
    pub fn create_effect<F>(&mut self, run: F) -> Effect
    where
        F: FnMut(&ReactiveGraph) + 'static,
    {
        let mut boxed: EffectFn = Box::new(run);
        let ((), sources) = self.tracked(|g| boxed(g));
        let id = self.effects.insert(EffectNode {
            run: Some(boxed),
            sources,
        });
        self.effect_order.push(id);
        Effect { id }
    }

    /// Remove an effect; it will not run again
    pub fn dispose_effect(&mut self, effect: Effect) {
        self.effects.remove(effect.id);
        self.effect_order.retain(|id| *id != effect.id);
    }

    // =========================================================================
    // Batching
    // =========================================================================

    /// Apply several updates, propagating once at the end
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let result = f(self);
        self.batch_depth -= 1;

        if self.batch_depth == 0 && !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.propagate(pending);
        }
        result
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn track(&self, source: Source) {
        if let Some(sources) = self.tracking.borrow_mut().as_mut() {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
    }

    fn tracked<R>(&self, f: impl FnOnce(&Self) -> R) -> (R, Sources) {
        let outer = self.tracking.replace(Some(Sources::new()));
        let result = f(self);
        let sources = self.tracking.replace(outer).unwrap_or_default();
        (result, sources)
    }

    fn changed(&mut self, source: Source) {
        if self.batch_depth > 0 {
            self.pending.insert(source);
            return;
        }
        let mut dirty = FxHashSet::default();
        dirty.insert(source);
        self.propagate(dirty);
    }

    fn propagate(&mut self, mut dirty: FxHashSet<Source>) {
        for id in self.derived_order.clone() {
            let stale = self
                .derived
                .get(id)
                .is_some_and(|node| node.sources.iter().any(|s| dirty.contains(s)));
            if stale {
                self.recompute(id);
                dirty.insert(Source::Derived(id));
            }
        }

        let to_run: Vec<EffectId> = self
            .effect_order
            .iter()
            .copied()
            .filter(|id| {
                self.effects
                    .get(*id)
                    .is_some_and(|node| node.sources.iter().any(|s| dirty.contains(s)))
            })
            .collect();

        for id in to_run {
            self.run_effect(id);
        }
    }

    fn recompute(&mut self, id: DerivedId) {
        let Some(compute) = self.derived.get_mut(id).and_then(|n| n.compute.take()) else {
            return;
        };
        let (value, sources) = self.tracked(|g| compute(g));
        if let Some(node) = self.derived.get_mut(id) {
            node.compute = Some(compute);
            node.value = value;
            node.sources = sources;
        }
    }

    fn run_effect(&mut self, id: EffectId) {
        let Some(mut run) = self.effects.get_mut(id).and_then(|n| n.run.take()) else {
            return;
        };
        let ((), sources) = self.tracked(|g| run(g));
        if let Some(node) = self.effects.get_mut(id) {
            node.run = Some(run);
            node.sources = sources;
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}
