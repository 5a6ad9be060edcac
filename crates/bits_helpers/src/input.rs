use bevy::input::touch::Touch;
use bevy::prelude::*;

/// What the primary pointer (left mouse button or first touch) did this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub just_pressed: bool,
    pub pressed: bool,
    pub just_released: bool,
    /// Screen position in logical pixels, origin at the top-left corner of the window.
    pub position: Option<Vec2>,
}

impl PointerSample {
    /// Samples the mouse first and falls back to touches, mirroring how the bits accept both.
    pub fn read(
        button_input: &ButtonInput<MouseButton>,
        touch_input: &Touches,
        cursor_position: Option<Vec2>,
    ) -> Self {
        let mouse_active = button_input.pressed(MouseButton::Left)
            || button_input.just_pressed(MouseButton::Left)
            || button_input.just_released(MouseButton::Left);

        if mouse_active {
            return Self {
                just_pressed: button_input.just_pressed(MouseButton::Left),
                pressed: button_input.pressed(MouseButton::Left),
                just_released: button_input.just_released(MouseButton::Left),
                position: cursor_position,
            };
        }

        let held = touch_input.iter().next();
        let started = touch_input.iter_just_pressed().next();
        let ended = touch_input
            .iter_just_released()
            .next()
            .or_else(|| touch_input.iter_just_canceled().next());

        // A tap can start and end within one frame, both transitions are reported.
        if held.is_some() || started.is_some() || ended.is_some() {
            return Self {
                just_pressed: started.is_some(),
                pressed: held.is_some(),
                just_released: ended.is_some(),
                position: held.or(ended).or(started).map(Touch::position),
            };
        }

        Self {
            position: cursor_position,
            ..default()
        }
    }

    /// Samples the pointer against the primary window.
    pub fn from_window(
        button_input: &Res<ButtonInput<MouseButton>>,
        touch_input: &Res<Touches>,
        window: &Window,
    ) -> Self {
        Self::read(button_input, touch_input, window.cursor_position())
    }
}

/// Whether a screen position lies inside a surface of `size` logical pixels.
pub fn surface_contains(size: Vec2, position: Vec2) -> bool {
    position.x >= 0.0 && position.y >= 0.0 && position.x <= size.x && position.y <= size.y
}

#[cfg(test)]
mod tests {
    use bevy::input::touch::{TouchInput, TouchPhase, touch_screen_input_system};

    use super::*;

    fn touch_app() -> App {
        let mut app = App::new();
        app.add_event::<TouchInput>()
            .init_resource::<Touches>()
            .add_systems(PreUpdate, touch_screen_input_system);
        app
    }

    fn send_touch(app: &mut App, phase: TouchPhase, position: Vec2) {
        app.world_mut().send_event(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id: 0,
        });
    }

    fn touch_sample(app: &App) -> PointerSample {
        let buttons = ButtonInput::<MouseButton>::default();
        PointerSample::read(&buttons, app.world().resource::<Touches>(), None)
    }

    #[test]
    fn mouse_press_is_sampled_with_cursor() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        let touches = Touches::default();

        let sample = PointerSample::read(&buttons, &touches, Some(Vec2::new(10.0, 20.0)));

        assert!(sample.just_pressed, "left click should register as a press");
        assert!(sample.pressed, "left click should be held");
        assert!(!sample.just_released, "nothing was released");
        assert_eq!(sample.position, Some(Vec2::new(10.0, 20.0)), "cursor is forwarded");
    }

    #[test]
    fn mouse_release_is_sampled() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        buttons.clear();
        buttons.release(MouseButton::Left);
        let touches = Touches::default();

        let sample = PointerSample::read(&buttons, &touches, Some(Vec2::ONE));

        assert!(sample.just_released, "release should be reported");
        assert!(!sample.pressed, "button is no longer held");
    }

    #[test]
    fn idle_pointer_keeps_hover_position() {
        let buttons = ButtonInput::<MouseButton>::default();
        let touches = Touches::default();

        let sample = PointerSample::read(&buttons, &touches, Some(Vec2::new(3.0, 4.0)));

        assert_eq!(
            sample,
            PointerSample {
                position: Some(Vec2::new(3.0, 4.0)),
                ..default()
            },
            "hovering should not register any button transition"
        );
    }

    #[test]
    fn surface_bounds_are_inclusive() {
        let size = Vec2::new(360.0, 640.0);
        assert!(surface_contains(size, Vec2::ZERO), "top-left corner is inside");
        assert!(surface_contains(size, size), "bottom-right corner is inside");
        assert!(!surface_contains(size, Vec2::new(-1.0, 5.0)), "left of the window");
        assert!(!surface_contains(size, Vec2::new(5.0, 641.0)), "below the window");
    }

    #[test]
    fn touch_press_hold_and_release() {
        let mut app = touch_app();

        send_touch(&mut app, TouchPhase::Started, Vec2::new(5.0, 6.0));
        app.update();
        let pressed = touch_sample(&app);
        assert!(pressed.just_pressed && pressed.pressed, "touch start is a press");
        assert!(!pressed.just_released, "nothing released yet");
        assert_eq!(pressed.position, Some(Vec2::new(5.0, 6.0)), "touch position is used");

        send_touch(&mut app, TouchPhase::Moved, Vec2::new(7.0, 8.0));
        app.update();
        let held = touch_sample(&app);
        assert!(held.pressed && !held.just_pressed, "a moving finger is held");
        assert_eq!(held.position, Some(Vec2::new(7.0, 8.0)), "position follows the finger");

        app.update();
        assert!(touch_sample(&app).pressed, "a resting finger is still held");

        send_touch(&mut app, TouchPhase::Ended, Vec2::new(7.0, 8.0));
        app.update();
        let released = touch_sample(&app);
        assert!(released.just_released, "lifting the finger releases");
        assert!(!released.pressed, "no longer held");
        assert_eq!(released.position, Some(Vec2::new(7.0, 8.0)), "release keeps the last position");
    }

    #[test]
    fn touch_tap_within_one_frame_reports_both_transitions() {
        let mut app = touch_app();

        send_touch(&mut app, TouchPhase::Started, Vec2::new(10.0, 10.0));
        send_touch(&mut app, TouchPhase::Ended, Vec2::new(10.0, 10.0));
        app.update();

        let sample = touch_sample(&app);
        assert!(sample.just_pressed, "the tap started this frame");
        assert!(sample.just_released, "and ended this frame");
        assert!(!sample.pressed, "nothing is held afterwards");
        assert_eq!(sample.position, Some(Vec2::new(10.0, 10.0)), "tap position is reported");
    }

    #[test]
    fn canceled_touch_counts_as_release() {
        let mut app = touch_app();
        send_touch(&mut app, TouchPhase::Started, Vec2::ONE);
        app.update();

        send_touch(&mut app, TouchPhase::Canceled, Vec2::ONE);
        app.update();

        let sample = touch_sample(&app);
        assert!(sample.just_released, "a canceled touch ends the gesture");
        assert!(!sample.pressed, "no longer held");
    }

    #[test]
    fn mouse_click_within_one_frame_reports_both_transitions() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);

        let sample = PointerSample::read(&buttons, &Touches::default(), Some(Vec2::ONE));

        assert!(sample.just_pressed && sample.just_released, "both edges reported");
        assert!(!sample.pressed, "button is up at the end of the frame");
    }
}
