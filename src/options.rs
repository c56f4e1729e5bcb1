// Options screen: what to do for the chosen booth.
//
// The Orders and Checklist cards respond to hover only; nothing is wired behind them yet.
use bevy::prelude::*;

use crate::flow::{FlowAction, FlowSystems};
use crate::stages::{BoothNumber, Stage};
use crate::widgets::{
    BORDER, ButtonPalette, INK, LogoImage, MUTED, TEAL, TEAL_LIGHT, panel, spawn_button,
    spawn_logo, spawn_text,
};

pub struct OptionsPlugin;

impl Plugin for OptionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Stage::Options), spawn_options)
            .add_systems(
                Update,
                (options_buttons.in_set(FlowSystems::Input), card_borders)
                    .run_if(in_state(Stage::Options)),
            );
    }
}

#[derive(Component)]
pub struct BoothHeader;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCard {
    Orders,
    Checklist,
}

impl OptionCard {
    fn labels(self) -> (&'static str, &'static str, &'static str) {
        match self {
            OptionCard::Orders => (
                "Orders",
                "Track your exhibition orders in real-time",
                "View Orders",
            ),
            OptionCard::Checklist => (
                "Checklist",
                "Monitor your booth setup progress",
                "View Progress",
            ),
        }
    }
}

#[derive(Component)]
enum OptionsButton {
    ChangeBooth,
}

pub fn booth_heading(booth: &BoothNumber) -> String {
    format!("Booth {}", booth.0)
}

fn spawn_options(mut commands: Commands, booth: Res<BoothNumber>, logo: Option<Res<LogoImage>>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(32.0),
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            DespawnOnExit(Stage::Options),
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(12.0),
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                })
                .with_children(|header| {
                    spawn_logo(header, logo.as_deref(), 64.0);
                    header.spawn((
                        BoothHeader,
                        Text::new(booth_heading(&booth)),
                        TextFont {
                            font_size: 40.0,
                            ..default()
                        },
                        TextColor(INK),
                    ));
                    spawn_text(header, "Choose your action", 20.0, TEAL);
                });

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(32.0),
                    ..default()
                })
                .with_children(|grid| {
                    spawn_card(grid, OptionCard::Orders);
                    spawn_card(grid, OptionCard::Checklist);
                });

            spawn_button(
                parent,
                "\u{2190} Change Booth Number",
                OptionsButton::ChangeBooth,
                ButtonPalette::SECONDARY,
                Val::Auto,
            );
        });
}

fn spawn_card(parent: &mut ChildSpawnerCommands, card: OptionCard) {
    let (title, blurb, call) = card.labels();
    parent
        .spawn((
            card,
            Button,
            ButtonPalette::CARD,
            panel(Node {
                width: Val::Px(360.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(32.0)),
                row_gap: Val::Px(16.0),
                ..default()
            }),
        ))
        .with_children(|body| {
            body.spawn((
                Node {
                    width: Val::Px(80.0),
                    height: Val::Px(80.0),
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(TEAL),
            ));
            spawn_text(body, title, 28.0, INK);
            spawn_text(body, blurb, 16.0, MUTED);
            spawn_text(body, format!("{call}  \u{2192}"), 16.0, TEAL);
        });
}

fn options_buttons(
    query: Query<(&Interaction, &OptionsButton), Changed<Interaction>>,
    mut actions: MessageWriter<FlowAction>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            OptionsButton::ChangeBooth => {
                actions.write(FlowAction::GoBack);
            }
        }
    }
}

fn card_borders(
    mut cards: Query<(&Interaction, &mut BorderColor), (Changed<Interaction>, With<OptionCard>)>,
) {
    for (interaction, mut border) in &mut cards {
        *border = match interaction {
            Interaction::None => BorderColor::all(BORDER),
            Interaction::Hovered | Interaction::Pressed => BorderColor::all(TEAL_LIGHT),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::tests::{act, booth, stage, test_app};
    use crate::stages::Variant;

    fn options_app(variant: Variant) -> App {
        let mut app = test_app(variant);
        app.add_plugins(OptionsPlugin);
        app.update();
        app.world_mut().resource_mut::<BoothNumber>().0 = "A-123".to_string();
        app.world_mut()
            .resource_mut::<NextState<Stage>>()
            .set(Stage::Options);
        app.update();
        app
    }

    fn press<T: Component>(app: &mut App, matches: impl Fn(&T) -> bool) {
        let entity = app
            .world_mut()
            .query::<(Entity, &T)>()
            .iter(app.world())
            .find(|(_, marker)| matches(*marker))
            .map(|(entity, _)| entity)
            .expect("on screen");
        app.world_mut().entity_mut(entity).insert(Interaction::Pressed);
        app.update();
        app.update();
    }

    #[test]
    fn heading_keeps_text_verbatim() {
        assert_eq!(booth_heading(&BoothNumber("A-123".to_string())), "Booth A-123");
        assert_eq!(booth_heading(&BoothNumber(" 7 ".to_string())), "Booth  7 ");
    }

    #[test]
    fn header_names_the_booth() {
        let mut app = options_app(Variant::Intro);
        let header = app
            .world_mut()
            .query_filtered::<&Text, With<BoothHeader>>()
            .single(app.world())
            .map(|text| text.0.clone())
            .expect("header spawned");
        assert_eq!(header, "Booth A-123");
    }

    #[test]
    fn cards_are_inert() {
        let mut app = options_app(Variant::Intro);
        press::<OptionCard>(&mut app, |card| *card == OptionCard::Orders);
        press::<OptionCard>(&mut app, |card| *card == OptionCard::Checklist);
        assert_eq!(stage(&app), Stage::Options);
        assert_eq!(booth(&app), "A-123");
    }

    #[test]
    fn change_booth_goes_back_per_variant() {
        let mut app = options_app(Variant::Intro);
        press::<OptionsButton>(&mut app, |_| true);
        assert_eq!(stage(&app), Stage::BoothEntry);
        assert_eq!(booth(&app), "A-123");

        let mut app = options_app(Variant::Merged);
        press::<OptionsButton>(&mut app, |_| true);
        assert_eq!(stage(&app), Stage::Welcome);
        assert_eq!(booth(&app), "A-123");
    }

    #[test]
    fn back_action_matches_button() {
        let mut app = options_app(Variant::Classic);
        act(&mut app, FlowAction::GoBack);
        assert_eq!(stage(&app), Stage::BoothEntry);
    }
}
