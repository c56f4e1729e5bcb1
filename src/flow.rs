// Stage sequencing: user actions in, stage transitions out.
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::config::FlowConfig;
use crate::stages::{BoothNumber, Stage, Variant, WelcomeReveal};

pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        // Picked up from the environment unless the app was given one.
        let config = app
            .world()
            .get_resource::<FlowConfig>()
            .cloned()
            .unwrap_or_else(FlowConfig::from_env);
        info!(
            "running the {} flow, starting at {}",
            config.variant,
            config.variant.initial_stage()
        );

        app.insert_state(config.variant.initial_stage())
            .insert_resource(config)
            .init_resource::<BoothNumber>()
            .init_resource::<WelcomeReveal>()
            .add_message::<FlowAction>()
            .configure_sets(
                Update,
                (FlowSystems::Input, FlowSystems::Apply, FlowSystems::Present).chain(),
            )
            .add_systems(Update, read_booth_keys.in_set(FlowSystems::Input))
            .add_systems(Update, apply_actions.in_set(FlowSystems::Apply));
    }
}

/// Frame ordering for the flow: raw input and timers produce actions, actions
/// update flow state, and screens redraw from that state in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlowSystems {
    Input,
    Apply,
    Present,
}

/// Everything a user can do to the flow.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    /// The welcome call-to-action.
    AdvanceFromWelcome,
    /// Text typed into the booth field.
    Type(String),
    /// Delete the last character of the booth field.
    Erase,
    /// Continue button or Enter in the booth field.
    SubmitBooth,
    GoBack,
}

/// Stage that hosts the booth field in `variant`.
pub fn booth_stage(variant: Variant) -> Stage {
    if variant.booth_on_welcome() {
        Stage::Welcome
    } else {
        Stage::BoothEntry
    }
}

/// Whether the booth field is on screen and takes typing.
pub fn booth_field_open(variant: Variant, stage: Stage, form_open: bool) -> bool {
    stage == booth_stage(variant) && (!variant.booth_on_welcome() || form_open)
}

/// Stage to move to when `action` happens on `stage`, if any.
pub fn next_stage(
    variant: Variant,
    stage: Stage,
    form_open: bool,
    booth: &BoothNumber,
    action: &FlowAction,
) -> Option<Stage> {
    match action {
        FlowAction::AdvanceFromWelcome => {
            if stage == Stage::Welcome && !variant.booth_on_welcome() {
                variant.successor(stage)
            } else {
                None
            }
        }
        FlowAction::SubmitBooth => {
            if booth_field_open(variant, stage, form_open) && booth.can_submit() {
                Some(Stage::Options)
            } else {
                None
            }
        }
        FlowAction::GoBack => variant.predecessor(stage),
        FlowAction::Type(_) | FlowAction::Erase => None,
    }
}

/// Booth field editing for a pressed key.
pub fn key_action(key: &Key) -> Option<FlowAction> {
    match key {
        Key::Enter => Some(FlowAction::SubmitBooth),
        Key::Backspace => Some(FlowAction::Erase),
        Key::Space => Some(FlowAction::Type(" ".to_string())),
        Key::Character(text) if !text.chars().any(char::is_control) => {
            Some(FlowAction::Type(text.to_string()))
        }
        _ => None,
    }
}

const SHORTCUT_MODIFIERS: [KeyCode; 6] = [
    KeyCode::ControlLeft,
    KeyCode::ControlRight,
    KeyCode::SuperLeft,
    KeyCode::SuperRight,
    KeyCode::AltLeft,
    KeyCode::AltRight,
];

/// True while a key combination is a shortcut rather than typing.
pub fn shortcut_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_pressed(SHORTCUT_MODIFIERS)
}

fn read_booth_keys(
    mut keys: MessageReader<KeyboardInput>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut actions: MessageWriter<FlowAction>,
) {
    let shortcut = shortcut_held(&keyboard);
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        match key_action(&key.logical_key) {
            Some(FlowAction::Type(_)) if shortcut => {}
            Some(action) => {
                actions.write(action);
            }
            None => {}
        }
    }
}

fn apply_actions(
    mut actions: MessageReader<FlowAction>,
    config: Res<FlowConfig>,
    state: Res<State<Stage>>,
    mut next_state: ResMut<NextState<Stage>>,
    mut booth: ResMut<BoothNumber>,
    mut reveal: ResMut<WelcomeReveal>,
) {
    let variant = config.variant;
    // Several actions can arrive in one frame; later ones see earlier transitions.
    let mut stage = *state.get();

    for action in actions.read() {
        match action {
            FlowAction::Type(text) if booth_field_open(variant, stage, reveal.form_open) => {
                booth.0.push_str(text);
                continue;
            }
            FlowAction::Erase if booth_field_open(variant, stage, reveal.form_open) => {
                booth.0.pop();
                continue;
            }
            FlowAction::AdvanceFromWelcome
                if stage == Stage::Welcome && variant.booth_on_welcome() =>
            {
                if !reveal.form_open {
                    debug!("booth form revealed on {stage}");
                    reveal.form_open = true;
                }
                continue;
            }
            _ => {}
        }

        match next_stage(variant, stage, reveal.form_open, &booth, action) {
            Some(next) => {
                if *action == FlowAction::SubmitBooth {
                    info!("booth {:?} submitted", booth.0);
                }
                info!("stage {stage} -> {next}");
                next_state.set(next);
                stage = next;
            }
            None => debug!("{action:?} ignored on {stage}"),
        }
    }
}
