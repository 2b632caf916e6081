//! Reactive host binding
//!
//! [`NavigationHost`] mounts an [`ElasticNavigation`] onto a [`BarRenderer`].
//! Inputs live in signals of a [`ReactiveGraph`]; the bar layout is a derived
//! value over them and a single effect hands every changed layout to the
//! renderer together with the transitions that start on that frame.
//!
//! Input arrives as [`Event`]s on an [`EventQueue`]. For a scroll sample the
//! refresh controller is settled before the layout is recomputed, and
//! safe-area reads after a rotation are deferred until the queue has drained.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

use elastic_animation::{
    AnimationScheduler, PropertyTransition, TransitionId, TransitionPreset, TransitionProperties,
};
use elastic_core::events::event_types;
use elastic_core::{
    Derived, EdgeInsets, Event, EventData, EventDispatcher, EventQueue, InterfaceOrientation,
    ReactiveGraph, Signal, Size,
};
use elastic_platform::{
    DeviceOrientation, EnvironmentHub, HapticSink, InsetsProvider, NoopHaptics,
    OrientationDetector, SafeAreaInsetsDetector, SharedInsets, Subscription,
};
use serde::Serialize;
use smallvec::SmallVec;

use crate::config::Config;
use crate::content::{BarContent, TitleDisplayMode};
use crate::engine::{BarLayout, LayoutInputs, ScrollGeometryEngine};
use crate::measure::{SizeFeedbackChannel, SizeReporter};
use crate::refresh::{RefreshController, RefreshPhase, RefreshState, StopSignal};
use crate::view::{BarStyle, ElasticNavigation};

/// A visual layer that can carry a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    SmallTitle,
    ProgressIndicator,
    /// The whole bar, used for the collapse after a refresh
    Bar,
}

/// A transition starting on a layer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerTransition {
    pub layer: Layer,
    pub transition: PropertyTransition,
}

/// Everything a renderer needs to paint one frame
pub struct BarFrame<'a, P> {
    pub layout: &'a BarLayout,
    pub content: &'a BarContent<P>,
    pub style: BarStyle,
    pub orientation: InterfaceOrientation,
    /// Transitions starting with this frame
    pub transitions: &'a [LayerTransition],
    /// Where to report the measured large title size after layout
    pub reporter: &'a SizeReporter,
}

/// Paints bar frames
pub trait BarRenderer<P> {
    fn render(&mut self, frame: &BarFrame<'_, P>);
}

/// Orientation and safe-area insets, as one input
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Environment {
    pub orientation: InterfaceOrientation,
    pub insets: EdgeInsets,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct TitleState {
    title: Option<String>,
    display_mode: TitleDisplayMode,
}

/// Platform collaborators for a host
pub struct HostEnvironment {
    orientation: DeviceOrientation,
    safe_area: SafeAreaInsetsDetector,
    haptics: Rc<dyn HapticSink>,
    hub: Option<EnvironmentHub>,
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self {
            orientation: DeviceOrientation::Portrait,
            safe_area: SafeAreaInsetsDetector::new(SharedInsets::default()),
            haptics: Rc::new(NoopHaptics),
            hub: None,
        }
    }
}

impl HostEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orientation(mut self, orientation: DeviceOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_insets(mut self, provider: impl InsetsProvider + 'static) -> Self {
        self.safe_area = SafeAreaInsetsDetector::new(provider);
        self
    }

    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Rc::new(haptics);
        self
    }

    /// Receive orientation notifications from a hub for the host's lifetime
    pub fn with_hub(mut self, hub: &EnvironmentHub) -> Self {
        self.hub = Some(hub.clone());
        self
    }
}

/// Presentation side shared with the render effect
struct Presenter<P, R> {
    renderer: R,
    bar: BarContent<P>,
    style: BarStyle,
    reporter: SizeReporter,
    scheduler: AnimationScheduler,
    active: SmallVec<[(Layer, TransitionId); 3]>,
    pending: SmallVec<[LayerTransition; 2]>,
    previous: Option<BarLayout>,
    content_changed: bool,
    frames: u64,
}

impl<P, R: BarRenderer<P>> Presenter<P, R> {
    fn present(&mut self, layout: BarLayout, orientation: InterfaceOrientation) {
        let mut started: SmallVec<[LayerTransition; 3]> = SmallVec::new();

        if let Some(previous) = self.previous {
            if layout == previous && self.pending.is_empty() && !self.content_changed {
                return;
            }
            if previous.small_title_opacity < layout.small_title_opacity {
                started.push(LayerTransition {
                    layer: Layer::SmallTitle,
                    transition: TransitionPreset::title_fade_in(),
                });
            } else if previous.small_title_opacity > layout.small_title_opacity {
                started.push(LayerTransition {
                    layer: Layer::SmallTitle,
                    transition: TransitionPreset::title_fade_out(),
                });
            }
            if previous.progress_visible && !layout.progress_visible {
                started.push(LayerTransition {
                    layer: Layer::ProgressIndicator,
                    transition: TransitionPreset::spinner_removal(),
                });
            } else if !previous.progress_visible && layout.progress_visible {
                started.push(LayerTransition {
                    layer: Layer::ProgressIndicator,
                    transition: TransitionPreset::spinner_insertion(),
                });
            }
        }
        started.extend(self.pending.drain(..));

        for layer_transition in &started {
            self.play(layer_transition);
        }

        let frame = BarFrame {
            layout: &layout,
            content: &self.bar,
            style: self.style,
            orientation,
            transitions: &started,
            reporter: &self.reporter,
        };
        self.renderer.render(&frame);

        self.previous = Some(layout);
        self.content_changed = false;
        self.frames += 1;
    }

    fn play(&mut self, layer_transition: &LayerTransition) {
        if let Some(index) = self
            .active
            .iter()
            .position(|(layer, _)| *layer == layer_transition.layer)
        {
            let (_, id) = self.active.swap_remove(index);
            self.scheduler.remove(id);
        }
        let id = self.scheduler.play(layer_transition.transition.clone());
        self.active.push((layer_transition.layer, id));
    }
}

struct HostSignals {
    offset: Signal<f32>,
    environment: Signal<Environment>,
    measured: Signal<Size>,
    refresh: Signal<RefreshState>,
    title: Signal<TitleState>,
}

type Inbox = Arc<Mutex<VecDeque<DeviceOrientation>>>;

/// A mounted navigation bar
pub struct NavigationHost<P: 'static, R: BarRenderer<P> + 'static> {
    graph: ReactiveGraph,
    signals: HostSignals,
    layout: Derived<BarLayout>,
    presenter: Rc<RefCell<Presenter<P, R>>>,
    content: P,
    config: Config,
    refresh: RefreshController,
    stop: Option<StopSignal>,
    last_stop: bool,
    queue: EventQueue,
    dispatcher: EventDispatcher,
    sizes: SizeFeedbackChannel,
    orientation: OrientationDetector,
    safe_area: SafeAreaInsetsDetector,
    inbox: Inbox,
    _subscription: Option<Subscription>,
}

impl<P: 'static, R: BarRenderer<P> + 'static> NavigationHost<P, R> {
    /// Mount a component; the renderer receives the first frame right away
    pub fn new(component: ElasticNavigation<P>, renderer: R, environment: HostEnvironment) -> Self {
        let (content, bar, config, style, binding) = component.into_parts();
        let HostEnvironment {
            orientation: device_orientation,
            safe_area,
            haptics,
            hub,
        } = environment;

        let refreshable = binding.is_some();
        let (stop, on_refresh) = match binding {
            Some(binding) => (Some(binding.stop), Some(binding.on_refresh)),
            None => (None, None),
        };
        let refresh = RefreshController::new(on_refresh, haptics);

        let inbox: Inbox = Arc::default();
        let subscription = hub.map(|hub| {
            let inbox = inbox.clone();
            hub.subscribe(move |orientation| {
                inbox
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_back(orientation);
            })
        });

        let sizes = SizeFeedbackChannel::new();
        let mut graph = ReactiveGraph::new();
        let signals = HostSignals {
            offset: graph.create_signal(0.0f32),
            environment: graph.create_signal(Environment {
                orientation: device_orientation.interface(),
                insets: safe_area.insets(),
            }),
            measured: graph.create_signal(Size::ZERO),
            refresh: graph.create_signal(refresh.state()),
            title: graph.create_signal(TitleState {
                title: bar.title.clone(),
                display_mode: bar.display_mode,
            }),
        };

        let layout = {
            let HostSignals {
                offset,
                environment,
                measured,
                refresh: refresh_state,
                title,
            } = signals;
            graph.create_derived(move |g| {
                let environment = g.get(environment).unwrap_or_default();
                let (has_title, display_mode) = g
                    .with(title, |t| (t.title.is_some(), t.display_mode))
                    .unwrap_or_default();
                ScrollGeometryEngine::compute(&LayoutInputs {
                    config: &config,
                    offset_y: g.get(offset).unwrap_or(0.0),
                    orientation: environment.orientation,
                    safe_area: environment.insets,
                    display_mode,
                    has_title,
                    refreshable,
                    refresh: g.get(refresh_state).unwrap_or_default(),
                    measured_large_title: g.get(measured).unwrap_or_default(),
                })
            })
        };

        let presenter = Rc::new(RefCell::new(Presenter {
            renderer,
            bar,
            style,
            reporter: sizes.reporter(),
            scheduler: AnimationScheduler::new(),
            active: SmallVec::new(),
            pending: SmallVec::new(),
            previous: None,
            content_changed: false,
            frames: 0,
        }));

        {
            let presenter = presenter.clone();
            let environment = signals.environment;
            let title = signals.title;
            graph.create_effect(move |g| {
                // read title so text-only changes re-render
                let _ = g.with(title, |_| ());
                let orientation = g
                    .with(environment, |e| e.orientation)
                    .unwrap_or_default();
                if let Some(layout) = g.get_derived(layout) {
                    presenter.borrow_mut().present(layout, orientation);
                }
            });
        }

        let mut host = Self {
            graph,
            signals,
            layout,
            presenter,
            content,
            config,
            refresh,
            stop,
            last_stop: false,
            queue: EventQueue::new(),
            dispatcher: EventDispatcher::new(),
            sizes,
            orientation: OrientationDetector::interface(device_orientation),
            safe_area,
            inbox,
            _subscription: subscription,
        };
        host.sync_measured();
        tracing::debug!(refreshable, "navigation host mounted");
        host
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Queue an event; call [`process`](Self::process) to handle it
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    /// Queue a raw scroll sample and process everything pending
    pub fn scroll(&mut self, x: f32, y: f32) -> BarLayout {
        self.push(Event::scroll(x, y));
        self.process();
        self.layout()
    }

    /// Feed a raw orientation notification as if it came from the hub
    pub fn notify_orientation(&mut self, orientation: DeviceOrientation) {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(orientation);
    }

    /// Handle queued events, pending environment notifications and stop
    /// signal changes; returns how many events were handled
    pub fn process(&mut self) -> usize {
        self.drain_inbox();
        self.poll_stop_signal();

        let mut handled = 0;
        while let Some(event) = self.queue.pop() {
            self.handle(&event);
            self.sync_measured();
            handled += 1;
        }
        handled
    }

    /// Change the title; `None` removes it
    pub fn set_title(&mut self, title: Option<String>) {
        self.presenter.borrow_mut().bar.title = title.clone();
        self.update_title(|state| state.title = title);
    }

    pub fn set_display_mode(&mut self, mode: TitleDisplayMode) {
        self.presenter.borrow_mut().bar.display_mode = mode;
        self.update_title(|state| state.display_mode = mode);
    }

    /// Register a handler for outbound notifications
    /// (`REFRESH_STARTED`, `REFRESH_STOPPED`)
    pub fn on<F>(&mut self, event_type: elastic_core::EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.dispatcher.register(event_type, handler);
    }

    /// Advance running transitions
    pub fn tick(&mut self, dt_ms: f32) {
        let mut presenter = self.presenter.borrow_mut();
        presenter.scheduler.tick_by(dt_ms);
        presenter.scheduler.prune_finished();
        let Presenter {
            active, scheduler, ..
        } = &mut *presenter;
        active.retain(|(_, id)| scheduler.get(*id).is_some());
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn layout(&self) -> BarLayout {
        self.graph
            .get_derived(self.layout)
            .unwrap_or_else(|| self.compute_fallback())
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh.state()
    }

    pub fn environment(&self) -> Environment {
        self.graph
            .get(self.signals.environment)
            .unwrap_or_default()
    }

    pub fn measured_size(&self) -> Size {
        self.sizes.current()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn content(&self) -> &P {
        &self.content
    }

    /// Current values of a layer's running transition
    pub fn layer_properties(&self, layer: Layer) -> Option<TransitionProperties> {
        let presenter = self.presenter.borrow();
        let (_, id) = presenter.active.iter().find(|(l, _)| *l == layer)?;
        presenter.scheduler.get(*id).map(PropertyTransition::value)
    }

    pub fn has_active_transitions(&self) -> bool {
        self.presenter.borrow().scheduler.has_active_animations()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.presenter.borrow().frames
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        Ref::map(self.presenter.borrow(), |p| &p.renderer)
    }

    pub fn renderer_mut(&mut self) -> RefMut<'_, R> {
        RefMut::map(self.presenter.borrow_mut(), |p| &mut p.renderer)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn handle(&mut self, event: &Event) {
        match (event.event_type, &event.data) {
            (event_types::SCROLL, _) => {
                if let Some(point) = event.scroll_offset() {
                    self.on_scroll(point.y);
                }
            }
            (event_types::ORIENTATION_CHANGED, EventData::Orientation(orientation)) => {
                let orientation = *orientation;
                self.update_environment(|env| env.orientation = orientation);
            }
            (event_types::SAFE_AREA_REFRESH, _) => {
                if let Some(insets) = self.safe_area.refresh() {
                    self.update_environment(|env| env.insets = insets);
                }
            }
            (event_types::SAFE_AREA_CHANGED, EventData::Insets(insets)) => {
                let insets = *insets;
                self.update_environment(|env| env.insets = insets);
            }
            (event_types::LAYOUT_MEASURED, EventData::Size(size)) => {
                self.presenter.borrow().reporter.report(*size);
            }
            (event_types::STOP_REFRESH, EventData::Flag(stop)) => self.on_stop(*stop),
            (event_type, data) => {
                tracing::trace!(event_type, ?data, "ignored event");
            }
        }
    }

    fn on_scroll(&mut self, offset_y: f32) {
        let orientation = self.environment().orientation;
        let progress = self.config.progress(orientation);
        let changed = self.refresh.on_scroll(offset_y, &progress);
        let state = self.refresh.state();

        let signals = &self.signals;
        self.graph.batch(|g| {
            g.set_if_changed(signals.refresh, state);
            g.set_if_changed(signals.offset, offset_y);
        });

        if changed == Some(RefreshPhase::Refreshing) {
            self.dispatcher.dispatch(&Event::new(
                event_types::REFRESH_STARTED,
                EventData::Flag(true),
            ));
        }
    }

    fn on_stop(&mut self, stop: bool) {
        let Some(collapse) = self.refresh.on_stop_signal(stop) else {
            return;
        };
        self.presenter.borrow_mut().pending.push(LayerTransition {
            layer: Layer::Bar,
            transition: collapse,
        });
        let state = self.refresh.state();
        self.graph.set_if_changed(self.signals.refresh, state);
        self.dispatcher.dispatch(&Event::new(
            event_types::REFRESH_STOPPED,
            EventData::Flag(false),
        ));
    }

    fn drain_inbox(&mut self) {
        let raw: Vec<DeviceOrientation> = self
            .inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        for orientation in raw {
            if let Some(accepted) = self.orientation.observe(orientation) {
                self.queue.push(Event::orientation(accepted.interface()));
                self.safe_area.schedule(accepted, &mut self.queue);
            }
        }
    }

    fn poll_stop_signal(&mut self) {
        let Some(stop) = self.stop.as_ref().map(StopSignal::get) else {
            return;
        };
        if stop != self.last_stop {
            self.last_stop = stop;
            self.queue.push(Event::stop_refresh(stop));
        }
    }

    fn sync_measured(&mut self) {
        if let Some(size) = self.sizes.take_changed() {
            self.graph.set_if_changed(self.signals.measured, size);
        }
    }

    fn update_environment(&mut self, f: impl FnOnce(&mut Environment)) {
        let mut environment = self.environment();
        f(&mut environment);
        if self.graph.set_if_changed(self.signals.environment, environment) {
            tracing::debug!(
                orientation = ?environment.orientation,
                inset_top = environment.insets.top,
                "environment changed"
            );
        }
    }

    fn update_title(&mut self, f: impl FnOnce(&mut TitleState)) {
        let mut state = self.graph.get(self.signals.title).unwrap_or_default();
        f(&mut state);
        self.presenter.borrow_mut().content_changed = true;
        self.graph.set_if_changed(self.signals.title, state);
        self.sync_measured();
    }

    fn compute_fallback(&self) -> BarLayout {
        let environment = self.environment();
        let title = self.graph.get(self.signals.title).unwrap_or_default();
        ScrollGeometryEngine::compute(&LayoutInputs {
            config: &self.config,
            offset_y: self.graph.get(self.signals.offset).unwrap_or(0.0),
            orientation: environment.orientation,
            safe_area: environment.insets,
            display_mode: title.display_mode,
            has_title: title.title.is_some(),
            refreshable: self.refresh.is_refreshable(),
            refresh: self.refresh.state(),
            measured_large_title: self.sizes.current(),
        })
    }
}
