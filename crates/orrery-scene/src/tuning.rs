//! Keyboard rate tuning.
//!
//! Rates are shown and stepped in tuning units, where one unit equals
//! `units_per_second` rad/s. Keys:
//! - `1`..`9` select the n-th tunable body, `0` clears the selection, `Tab` cycles
//! - `Up`/`Down` step the selected body's spin rate
//! - `Right`/`Left` step its orbit rate
//!
//! Only the arrows act on OS key-repeats while held.

use anyhow::{Result, ensure};
use orrery_engine::input::{InputFrame, Key};

use crate::body::BodyId;
use crate::world::World;

/// What a key press changed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TuneEvent {
    Selected(Option<BodyId>),
    SpinRate { id: BodyId, units: f32 },
    OrbitRate { id: BodyId, units: f32 },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum RateKind {
    Spin,
    Orbit,
}

#[derive(Debug, Clone)]
pub struct RateTuner {
    pub step: f32,
    pub min: f32,
    pub max: f32,
    units_per_second: f32,
    selected: Option<BodyId>,
}

impl RateTuner {
    /// Tuner over `[0, 0.1]` units in steps of `0.001`.
    ///
    /// `units_per_second` must be finite and positive.
    pub fn new(units_per_second: f32) -> Result<Self> {
        ensure!(
            units_per_second.is_finite() && units_per_second > 0.0,
            "units per second must be positive, got {units_per_second}"
        );
        Ok(Self {
            step: 0.001,
            min: 0.0,
            max: 0.1,
            units_per_second,
            selected: None,
        })
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn to_units(&self, rate: f32) -> f32 {
        rate / self.units_per_second
    }

    pub fn from_units(&self, units: f32) -> f32 {
        units * self.units_per_second
    }

    /// Selects the `n`-th tunable body (1-based); `0` clears the selection.
    ///
    /// Out-of-range numbers leave the selection unchanged and return `None`.
    pub fn select(&mut self, world: &World, n: usize) -> Option<Option<BodyId>> {
        if n == 0 {
            self.selected = None;
            return Some(None);
        }
        let id = *world.tunable_ids().get(n - 1)?;
        self.selected = Some(id);
        Some(Some(id))
    }

    /// Moves the selection to the next tunable body, wrapping around.
    pub fn cycle(&mut self, world: &World) -> Option<BodyId> {
        let ids = world.tunable_ids();
        let next = match self.selected.and_then(|s| ids.iter().position(|&id| id == s)) {
            Some(pos) => ids.get((pos + 1) % ids.len()).copied(),
            None => ids.first().copied(),
        };
        self.selected = next;
        next
    }

    /// Steps the selected body's spin rate; returns the new value in tuning units.
    pub fn nudge_spin(&self, world: &mut World, steps: i32) -> Option<f32> {
        self.nudge(world, RateKind::Spin, steps)
    }

    /// Steps the selected body's orbit rate; returns the new value in tuning units.
    pub fn nudge_orbit(&self, world: &mut World, steps: i32) -> Option<f32> {
        self.nudge(world, RateKind::Orbit, steps)
    }

    fn nudge(&self, world: &mut World, kind: RateKind, steps: i32) -> Option<f32> {
        let body = world.get_mut(self.selected?)?;
        if !body.tunable {
            return None;
        }

        let rate = match kind {
            RateKind::Spin => &mut body.spin_rate,
            RateKind::Orbit => &mut body.orbit_rate,
        };

        let units = (self.to_units(*rate) + steps as f32 * self.step).clamp(self.min, self.max);
        *rate = self.from_units(units);
        Some(units)
    }

    /// Applies this frame's key presses in arrival order.
    pub fn handle(&mut self, world: &mut World, input: &InputFrame) -> Vec<TuneEvent> {
        let mut events = Vec::new();

        for (key, repeat) in input.presses_in_order() {
            if repeat && !key.is_arrow() {
                continue;
            }

            let event = match key {
                Key::Tab => Some(TuneEvent::Selected(self.cycle(world))),
                Key::ArrowUp | Key::ArrowDown => {
                    let steps = if key == Key::ArrowUp { 1 } else { -1 };
                    self.selected
                        .zip(self.nudge_spin(world, steps))
                        .map(|(id, units)| TuneEvent::SpinRate { id, units })
                }
                Key::ArrowRight | Key::ArrowLeft => {
                    let steps = if key == Key::ArrowRight { 1 } else { -1 };
                    self.selected
                        .zip(self.nudge_orbit(world, steps))
                        .map(|(id, units)| TuneEvent::OrbitRate { id, units })
                }
                other => other
                    .digit()
                    .and_then(|d| self.select(world, d as usize))
                    .map(TuneEvent::Selected),
            };

            if let Some(ev) = event {
                self.log_event(world, ev);
                events.push(ev);
            }
        }

        events
    }

    fn log_event(&self, world: &World, ev: TuneEvent) {
        let name = |id: BodyId| world.get(id).map(|b| b.name.as_str()).unwrap_or("?");
        match ev {
            TuneEvent::Selected(Some(id)) => log::info!("tuning {}", name(id)),
            TuneEvent::Selected(None) => log::info!("tuning cleared"),
            TuneEvent::SpinRate { id, units } => log::info!("{} spin rate = {units:.3}", name(id)),
            TuneEvent::OrbitRate { id, units } => log::info!("{} orbit rate = {units:.3}", name(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Body, Material};
    use orrery_engine::input::{InputEvent, InputState, KeyState};
    use orrery_engine::paint::Color;
    use orrery_engine::render::MeshId;

    fn world() -> World {
        let mut w = World::new();
        let mesh = MeshId::from_raw(0);
        w.add_body(Body::new("sun", mesh, Material::Flat(Color::YELLOW)).with_spin(0.06))
            .unwrap();
        w.add_body(
            Body::new("mercury", mesh, Material::Flat(Color::RED))
                .with_orbit(20.0, 1.2)
                .with_spin(1.2)
                .with_tunable(true),
        )
        .unwrap();
        w.add_body(
            Body::new("venus", mesh, Material::Flat(Color::RED))
                .with_orbit(35.0, 0.9)
                .with_spin(0.9)
                .with_tunable(true),
        )
        .unwrap();
        w
    }

    fn press(keys: &[Key]) -> InputFrame {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for &key in keys {
            state.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
            state.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Released, repeat: false });
        }
        frame
    }

    #[test]
    fn digits_select_tunable_bodies_only() {
        let w = world();
        let mut t = RateTuner::new(60.0).unwrap();

        assert_eq!(t.select(&w, 1), Some(w.find("mercury")));
        assert_eq!(t.select(&w, 2), Some(w.find("venus")));
        assert_eq!(t.select(&w, 3), None);
        assert_eq!(t.selected(), w.find("venus"));
        assert_eq!(t.select(&w, 0), Some(None));
    }

    #[test]
    fn nudge_writes_rate_back_into_body() {
        let mut w = world();
        let mut t = RateTuner::new(60.0).unwrap();
        t.select(&w, 1);

        let units = t.nudge_spin(&mut w, 5).unwrap();
        assert!((units - 0.025).abs() < 1e-6);

        let id = w.find("mercury").unwrap();
        assert!((w.get(id).unwrap().spin_rate - 1.5).abs() < 1e-4);
    }

    #[test]
    fn rates_clamp_to_range() {
        let mut w = world();
        let mut t = RateTuner::new(60.0).unwrap();
        t.select(&w, 2);

        assert_eq!(t.nudge_orbit(&mut w, -100), Some(0.0));
        let top = t.nudge_orbit(&mut w, 1000).unwrap();
        assert!((top - 0.1).abs() < 1e-6);
    }

    #[test]
    fn nothing_changes_without_selection() {
        let mut w = world();
        let t = RateTuner::new(60.0).unwrap();
        assert_eq!(t.nudge_spin(&mut w, 1), None);
    }

    #[test]
    fn cycle_wraps_around() {
        let w = world();
        let mut t = RateTuner::new(60.0).unwrap();
        let first = t.cycle(&w);
        let second = t.cycle(&w);
        let third = t.cycle(&w);
        assert_eq!(first, w.find("mercury"));
        assert_eq!(second, w.find("venus"));
        assert_eq!(third, first);
    }

    #[test]
    fn handle_applies_keys_in_order() {
        let mut w = world();
        let mut t = RateTuner::new(60.0).unwrap();

        let events = t.handle(&mut w, &press(&[Key::Digit2, Key::ArrowRight, Key::ArrowUp]));

        let venus = w.find("venus").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], TuneEvent::Selected(Some(venus)));
        assert!(matches!(events[1], TuneEvent::OrbitRate { id, .. } if id == venus));
        assert!(matches!(events[2], TuneEvent::SpinRate { id, .. } if id == venus));

        let b = w.get(venus).unwrap();
        assert!((b.orbit_rate - 0.96).abs() < 1e-4);
    }

    fn key_event(key: Key, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat }
    }

    #[test]
    fn held_arrow_keeps_stepping_on_repeat() {
        let mut w = world();
        let mut t = RateTuner::new(60.0).unwrap();
        t.select(&w, 1);

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key_event(Key::ArrowRight, false));
        state.apply_event(&mut frame, key_event(Key::ArrowRight, true));
        state.apply_event(&mut frame, key_event(Key::ArrowRight, true));

        let events = t.handle(&mut w, &frame);
        assert_eq!(events.len(), 3);
        let mercury = w.get(w.find("mercury").unwrap()).unwrap();
        assert!((mercury.orbit_rate - 1.38).abs() < 1e-4);
    }

    #[test]
    fn held_tab_cycles_once() {
        let mut w = world();
        let mut t = RateTuner::new(60.0).unwrap();

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key_event(Key::Tab, false));
        state.apply_event(&mut frame, key_event(Key::Tab, true));
        state.apply_event(&mut frame, key_event(Key::Tab, true));

        let events = t.handle(&mut w, &frame);
        assert_eq!(events, vec![TuneEvent::Selected(w.find("mercury"))]);
        assert_eq!(t.selected(), w.find("mercury"));
    }

    #[test]
    fn non_positive_unit_scale_is_rejected() {
        assert!(RateTuner::new(0.0).is_err());
        assert!(RateTuner::new(-60.0).is_err());
        assert!(RateTuner::new(f32::NAN).is_err());
    }

    #[test]
    fn unit_conversion_round_trips_through_rad_per_second() {
        let t = RateTuner::new(60.0).unwrap();
        assert!((t.from_units(0.02) - 1.2).abs() < 1e-6);
        assert!((t.to_units(1.2) - 0.02).abs() < 1e-6);
    }
}
