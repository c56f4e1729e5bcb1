// Booth entry screen and the booth form it shares with the merged welcome screen.

use bevy::prelude::*;

use crate::flow::{FlowAction, FlowSystems};
use crate::stages::{BoothNumber, Stage};
use crate::widgets::{
    BORDER, ButtonPalette, FAINT, INK, LogoImage, MUTED, TEAL, panel, spawn_button, spawn_logo,
    spawn_text,
};

pub struct BoothPlugin;

impl Plugin for BoothPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Stage::BoothEntry), spawn_booth_entry)
            .add_systems(Update, booth_buttons.in_set(FlowSystems::Input))
            .add_systems(
                Update,
                (refresh_booth_form, blink_caret).in_set(FlowSystems::Present),
            );
    }
}

const PLACEHOLDER: &str = "e.g., A-123, B-456";
const CARET_PERIOD: f32 = 1.06;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoothButton {
    Continue,
    Back,
}

/// Text inside the booth field: the typed booth or the placeholder.
#[derive(Component)]
pub struct BoothFieldText;

#[derive(Component)]
struct BoothCaret;

/// What the field shows for `booth`, and whether it is the placeholder.
pub fn field_text(booth: &BoothNumber) -> (&str, bool) {
    if booth.0.is_empty() {
        (PLACEHOLDER, true)
    } else {
        (&booth.0, false)
    }
}

pub fn continue_palette(booth: &BoothNumber) -> ButtonPalette {
    if booth.can_submit() {
        ButtonPalette::PRIMARY
    } else {
        ButtonPalette::DISABLED
    }
}

fn spawn_booth_entry(mut commands: Commands, booth: Res<BoothNumber>, logo: Option<Res<LogoImage>>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            DespawnOnExit(Stage::BoothEntry),
        ))
        .with_children(|parent| {
            parent
                .spawn(panel(Node {
                    width: Val::Px(448.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Stretch,
                    padding: UiRect::all(Val::Px(32.0)),
                    row_gap: Val::Px(16.0),
                    ..default()
                }))
                .with_children(|card| {
                    card.spawn(Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(8.0),
                        margin: UiRect::bottom(Val::Px(16.0)),
                        ..default()
                    })
                    .with_children(|header| {
                        spawn_logo(header, logo.as_deref(), 64.0);
                        spawn_text(header, "Welcome Back", 30.0, INK);
                        spawn_text(header, "Enter your booth number to continue", 16.0, TEAL);
                    });

                    spawn_booth_form(card, &booth);

                    spawn_button(
                        card,
                        "\u{2190} Back to Welcome",
                        BoothButton::Back,
                        ButtonPalette::SECONDARY,
                        Val::Percent(100.0),
                    );
                });
        });
}

/// Label, text field and continue button.
pub fn spawn_booth_form(parent: &mut ChildSpawnerCommands, booth: &BoothNumber) {
    let (shown, placeholder) = field_text(booth);
    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(12.0),
            ..default()
        })
        .with_children(|form| {
            spawn_text(form, "Booth Number", 14.0, MUTED);

            form.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(52.0),
                    align_items: AlignItems::Center,
                    padding: UiRect::horizontal(Val::Px(16.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BorderColor::all(BORDER),
                BackgroundColor(Color::WHITE),
            ))
            .with_children(|field| {
                field.spawn((
                    BoothFieldText,
                    Text::new(shown),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(if placeholder { FAINT } else { INK }),
                ));
                field.spawn((
                    BoothCaret,
                    Text::new("|"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(TEAL),
                ));
            });

            spawn_button(
                form,
                "Continue  \u{2192}",
                BoothButton::Continue,
                continue_palette(booth),
                Val::Percent(100.0),
            );
        });
}

fn booth_buttons(
    query: Query<(&Interaction, &BoothButton), Changed<Interaction>>,
    booth: Res<BoothNumber>,
    mut actions: MessageWriter<FlowAction>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            // A disabled continue button does nothing.
            BoothButton::Continue if booth.can_submit() => {
                actions.write(FlowAction::SubmitBooth);
            }
            BoothButton::Continue => {}
            BoothButton::Back => {
                actions.write(FlowAction::GoBack);
            }
        }
    }
}

fn refresh_booth_form(
    booth: Res<BoothNumber>,
    mut fields: Query<(&mut Text, &mut TextColor), With<BoothFieldText>>,
    mut buttons: Query<(&BoothButton, &mut ButtonPalette)>,
) {
    let (shown, placeholder) = field_text(&booth);
    for (mut text, mut color) in &mut fields {
        if text.0 != shown {
            text.0 = shown.to_string();
            color.0 = if placeholder { FAINT } else { INK };
        }
    }

    let palette = continue_palette(&booth);
    for (button, mut current) in &mut buttons {
        if *button == BoothButton::Continue && *current != palette {
            *current = palette;
        }
    }
}

fn blink_caret(time: Res<Time>, mut carets: Query<&mut Visibility, With<BoothCaret>>) {
    let on = time.elapsed_secs() % CARET_PERIOD < CARET_PERIOD / 2.0;
    let visibility = if on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut caret in &mut carets {
        caret.set_if_neq(visibility);
    }
}
