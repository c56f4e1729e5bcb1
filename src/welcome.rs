// Welcome screen: product pitch and the way in.

use std::time::Duration;

use bevy::prelude::*;

use crate::booth::spawn_booth_form;
use crate::config::FlowConfig;
use crate::delay::{self, DelayAction, DelayElapsed};
use crate::flow::{FlowAction, FlowSystems};
use crate::stages::{BoothNumber, Stage, WelcomeReveal};
use crate::tween::{FadeFill, Look, Tween};
use crate::widgets::{
    ButtonPalette, FAINT, INK, LogoImage, MUTED, ONLINE, TEAL, panel, spawn_button,
    spawn_logo, spawn_text,
};

pub struct WelcomePlugin;

impl Plugin for WelcomePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(Stage::Welcome),
            (schedule_settle, spawn_welcome, toggle_inline_form).chain(),
        )
            .add_systems(
                Update,
                (
                    welcome_buttons.in_set(FlowSystems::Input),
                    settle_welcome.in_set(FlowSystems::Apply),
                    (reveal_sections, toggle_inline_form)
                        .run_if(resource_changed::<WelcomeReveal>)
                        .in_set(FlowSystems::Present),
                )
                    .run_if(in_state(Stage::Welcome)),
            );
    }
}

const SECTION_STAGGER: Duration = Duration::from_millis(300);
const SECTION_FADE: Duration = Duration::from_millis(1000);
const SECTION_DROP: f32 = 40.0;

/// Staggered block of the welcome screen; the index orders the entrance.
#[derive(Component)]
pub struct WelcomeSection(pub u32);

#[derive(Component)]
pub enum WelcomeButton {
    Access,
}

/// Booth form hosted on the welcome screen by the merged revision.
#[derive(Component)]
pub struct InlineBoothForm;

pub fn section_look(animating: bool) -> Look {
    if animating {
        Look::hidden(SECTION_DROP)
    } else {
        Look::SHOWN
    }
}

fn schedule_settle(mut commands: Commands, config: Res<FlowConfig>, reveal: Res<WelcomeReveal>) {
    if reveal.animating {
        delay::schedule(
            &mut commands,
            Stage::Welcome,
            config.welcome_settle,
            DelayAction::SettleWelcome,
        );
    }
}

fn settle_welcome(mut elapsed: MessageReader<DelayElapsed>, mut reveal: ResMut<WelcomeReveal>) {
    for DelayElapsed(action) in elapsed.read() {
        if *action == DelayAction::SettleWelcome && reveal.animating {
            debug!("welcome entrance settled");
            reveal.animating = false;
        }
    }
}

fn reveal_sections(reveal: Res<WelcomeReveal>, mut sections: Query<(&WelcomeSection, &mut Tween)>) {
    for (section, mut tween) in &mut sections {
        let delay = if reveal.animating {
            Duration::ZERO
        } else {
            SECTION_STAGGER * section.0
        };
        tween.retarget(section_look(reveal.animating), delay);
    }
}

fn toggle_inline_form(
    reveal: Res<WelcomeReveal>,
    mut forms: Query<&mut Node, With<InlineBoothForm>>,
    mut buttons: Query<&mut Node, (With<WelcomeButton>, Without<InlineBoothForm>)>,
) {
    let (form, button) = if reveal.form_open {
        (Display::Flex, Display::None)
    } else {
        (Display::None, Display::Flex)
    };
    for mut node in &mut forms {
        node.display = form;
    }
    // Merged revision only.
    if !forms.is_empty() {
        for mut node in &mut buttons {
            node.display = button;
        }
    }
}

fn welcome_buttons(
    query: Query<(&Interaction, &WelcomeButton), Changed<Interaction>>,
    mut actions: MessageWriter<FlowAction>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            WelcomeButton::Access => {
                actions.write(FlowAction::AdvanceFromWelcome);
            }
        }
    }
}

fn spawn_welcome(
    mut commands: Commands,
    config: Res<FlowConfig>,
    reveal: Res<WelcomeReveal>,
    booth: Res<BoothNumber>,
    logo: Option<Res<LogoImage>>,
) {
    let look = section_look(reveal.animating);
    let section = |index: u32| {
        (
            WelcomeSection(index),
            Tween::at(look, SECTION_FADE),
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
        )
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(40.0),
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            DespawnOnExit(Stage::Welcome),
        ))
        .with_children(|parent| {
            parent
                .spawn(section(0))
                .with_children(|s| spawn_logo(s, logo.as_deref(), 64.0));

            parent.spawn(section(1)).with_children(|s| {
                spawn_text(s, "ExpoFlow", 72.0, INK);
                spawn_text(s, "Order Tracking System", 26.0, TEAL);
                spawn_text(s, "Expo Convention Contractors", 18.0, MUTED);
            });

            parent
                .spawn(section(2))
                .insert(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(24.0),
                    ..default()
                })
                .with_children(|s| {
                    spawn_feature(s, "Smart Orders", "Real-time order tracking and management");
                    spawn_feature(s, "Digital Checklists", "Track booth setup progress instantly");
                });

            parent.spawn(section(3)).with_children(|s| {
                spawn_button(
                    s,
                    "Access Your Orders  \u{2192}",
                    WelcomeButton::Access,
                    ButtonPalette::PRIMARY,
                    Val::Auto,
                );
                if config.variant.booth_on_welcome() {
                    s.spawn((
                        InlineBoothForm,
                        Node {
                            display: if reveal.form_open {
                                Display::Flex
                            } else {
                                Display::None
                            },
                            width: Val::Px(420.0),
                            ..default()
                        },
                    ))
                    .with_children(|form| spawn_booth_form(form, &booth));
                }
            });

            parent.spawn(section(4)).with_children(|s| {
                s.spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Node {
                            width: Val::Px(10.0),
                            height: Val::Px(10.0),
                            ..default()
                        },
                        BackgroundColor(ONLINE),
                        FadeFill(1.0),
                    ));
                    spawn_text(
                        row,
                        "System Online \u{2022} Professional Exhibition Management",
                        14.0,
                        FAINT,
                    );
                });
            });
        });
}

fn spawn_feature(parent: &mut ChildSpawnerCommands, title: &str, blurb: &str) {
    parent
        .spawn(panel(Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexStart,
            width: Val::Px(300.0),
            padding: UiRect::all(Val::Px(24.0)),
            row_gap: Val::Px(8.0),
            ..default()
        }))
        .with_children(|card| {
            spawn_text(card, title, 20.0, INK);
            spawn_text(card, blurb, 14.0, MUTED);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::tests::{act, stage, test_app};
    use crate::stages::Variant;
    use crate::{booth::BoothPlugin, delay::DelayPlugin, tween::TweenPlugin};
    use bevy::time::TimeUpdateStrategy;

    const STEP: Duration = Duration::from_millis(100);

    fn welcome_app(variant: Variant) -> App {
        let mut app = test_app(variant);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
            .add_plugins((DelayPlugin, TweenPlugin, WelcomePlugin, BoothPlugin));
        app.update();
        app
    }

    fn run_for(app: &mut App, duration: Duration) {
        for _ in 0..(duration.as_millis() / STEP.as_millis()) {
            app.update();
        }
    }

    fn animating(app: &App) -> bool {
        app.world().resource::<WelcomeReveal>().animating
    }

    fn section_targets(app: &mut App) -> Vec<Look> {
        app.world_mut()
            .query::<(&WelcomeSection, &Tween)>()
            .iter(app.world())
            .map(|(_, tween)| tween.target())
            .collect()
    }

    fn press<T: Component>(app: &mut App) {
        let button = app
            .world_mut()
            .query_filtered::<Entity, With<T>>()
            .iter(app.world())
            .next()
            .expect("button on screen");
        app.world_mut().entity_mut(button).insert(Interaction::Pressed);
        app.update();
        app.update();
    }

    #[test]
    fn sections_hold_back_until_settled() {
        let mut app = welcome_app(Variant::Classic);
        assert_eq!(stage(&app), Stage::Welcome);
        assert!(animating(&app));
        assert_eq!(section_targets(&mut app).len(), 5);
        assert!(section_targets(&mut app).iter().all(|look| look.opacity == 0.0));

        run_for(&mut app, Duration::from_millis(1500));
        assert!(animating(&app));

        run_for(&mut app, Duration::from_millis(700));
        assert!(!animating(&app));
        assert!(section_targets(&mut app).iter().all(|look| *look == Look::SHOWN));
    }

    #[test]
    fn return_visit_shows_content_at_once() {
        let mut app = welcome_app(Variant::Classic);
        run_for(&mut app, Duration::from_millis(2500));
        assert!(!animating(&app));

        act(&mut app, FlowAction::AdvanceFromWelcome);
        assert_eq!(stage(&app), Stage::BoothEntry);
        act(&mut app, FlowAction::GoBack);
        assert_eq!(stage(&app), Stage::Welcome);

        assert!(!animating(&app));
        assert!(section_targets(&mut app).iter().all(|look| *look == Look::SHOWN));
        let pending = app
            .world_mut()
            .query::<&crate::delay::Delay>()
            .iter(app.world())
            .count();
        assert_eq!(pending, 0);
    }

    #[test]
    fn leaving_early_keeps_animating_flag() {
        let mut app = welcome_app(Variant::Classic);
        act(&mut app, FlowAction::AdvanceFromWelcome);
        run_for(&mut app, Duration::from_millis(3000));
        assert!(animating(&app));
    }

    #[test]
    fn access_button_opens_booth_entry() {
        let mut app = welcome_app(Variant::Classic);
        press::<WelcomeButton>(&mut app);
        assert_eq!(stage(&app), Stage::BoothEntry);
    }

    #[test]
    fn merged_access_button_reveals_inline_form() {
        let mut app = welcome_app(Variant::Merged);
        app.world_mut()
            .resource_mut::<NextState<Stage>>()
            .set(Stage::Welcome);
        app.update();

        let form_display = |app: &mut App| {
            app.world_mut()
                .query_filtered::<&Node, With<InlineBoothForm>>()
                .single(app.world())
                .map(|node| node.display)
                .expect("inline form spawned")
        };
        assert_eq!(form_display(&mut app), Display::None);

        press::<WelcomeButton>(&mut app);
        assert_eq!(stage(&app), Stage::Welcome);
        assert_eq!(form_display(&mut app), Display::Flex);
    }

    fn access_display(app: &mut App) -> Display {
        app.world_mut()
            .query_filtered::<&Node, With<WelcomeButton>>()
            .single(app.world())
            .map(|node| node.display)
            .expect("access button spawned")
    }

    #[test]
    fn merged_return_keeps_access_button_hidden() {
        let mut app = welcome_app(Variant::Merged);
        app.world_mut()
            .resource_mut::<NextState<Stage>>()
            .set(Stage::Welcome);
        app.update();
        run_for(&mut app, Duration::from_millis(2500));
        assert!(!animating(&app));
        assert_eq!(access_display(&mut app), Display::Flex);

        press::<WelcomeButton>(&mut app);
        assert_eq!(access_display(&mut app), Display::None);
        act(&mut app, FlowAction::Type("A-123".to_string()));
        act(&mut app, FlowAction::SubmitBooth);
        assert_eq!(stage(&app), Stage::Options);

        act(&mut app, FlowAction::GoBack);
        assert_eq!(stage(&app), Stage::Welcome);
        assert_eq!(access_display(&mut app), Display::None);
        run_for(&mut app, Duration::from_millis(500));
        assert_eq!(access_display(&mut app), Display::None);
    }
}
