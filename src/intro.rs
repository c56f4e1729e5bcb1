// Intro: "Welcome" spelled out over four timed phases, then the welcome screen.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::FlowConfig;
use crate::delay::{self, DelayAction, DelayElapsed};
use crate::flow::FlowSystems;
use crate::stages::Stage;
use crate::tween::{Look, Tween};

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IntroPhase>()
            .add_systems(OnEnter(Stage::Intro), (schedule_intro, spawn_intro))
            .add_systems(
                Update,
                (
                    run_intro.in_set(FlowSystems::Apply),
                    style_intro
                        .run_if(resource_changed::<IntroPhase>)
                        .in_set(FlowSystems::Present),
                )
                    .run_if(in_state(Stage::Intro)),
            );
    }
}

const WORD: &str = "Welcome";
const LETTER_STAGGER: Duration = Duration::from_millis(120);
const CONTAINER_FADE: Duration = Duration::from_millis(1000);
const LETTER_FADE: Duration = Duration::from_millis(700);

/// Last intro phase reached, 0 before the first fires.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntroPhase(pub u8);

#[derive(Component)]
struct IntroWord;

#[derive(Component)]
struct IntroLetter(usize);

/// Look of the whole word for a phase.
pub fn word_look(phase: u8) -> Look {
    if phase >= 4 {
        Look {
            opacity: 0.0,
            offset: 32.0,
            scale: 0.95,
        }
    } else if phase >= 1 {
        Look::SHOWN
    } else {
        Look::hidden(0.0)
    }
}

/// Look of letter `index` for a phase, with its reveal delay.
pub fn letter_look(phase: u8, index: usize) -> (Look, Duration) {
    let revealed = (2..4).contains(&phase);
    let look = Look {
        opacity: if revealed { 1.0 } else { 0.0 },
        offset: if phase < 2 { 48.0 } else { 0.0 },
        scale: 1.0,
    };
    let delay = if revealed {
        LETTER_STAGGER * index as u32
    } else {
        Duration::ZERO
    };
    (look, delay)
}

fn schedule_intro(mut commands: Commands, config: Res<FlowConfig>, mut phase: ResMut<IntroPhase>) {
    *phase = IntroPhase(0);
    debug!("intro runs for {:?}", config.intro_duration());
    for (n, after) in (1..).zip(config.intro_phases) {
        delay::schedule(&mut commands, Stage::Intro, after, DelayAction::IntroPhase(n));
    }
}

fn run_intro(
    mut commands: Commands,
    mut elapsed: MessageReader<DelayElapsed>,
    config: Res<FlowConfig>,
    mut phase: ResMut<IntroPhase>,
    mut next_stage: ResMut<NextState<Stage>>,
) {
    for DelayElapsed(action) in elapsed.read() {
        match *action {
            DelayAction::IntroPhase(n) => {
                debug!("intro phase {n}");
                phase.0 = n;
                if n == 4 {
                    delay::schedule(
                        &mut commands,
                        Stage::Intro,
                        config.intro_exit,
                        DelayAction::EnterStage(Stage::Welcome),
                    );
                }
            }
            DelayAction::EnterStage(stage) => {
                info!("intro finished, stage {} -> {stage}", Stage::Intro);
                next_stage.set(stage);
            }
            DelayAction::SettleWelcome => {}
        }
    }
}

fn spawn_intro(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::WHITE),
            DespawnOnExit(Stage::Intro),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    IntroWord,
                    Node {
                        flex_direction: FlexDirection::Row,
                        ..default()
                    },
                    Tween::at(word_look(0), CONTAINER_FADE),
                ))
                .with_children(|word| {
                    for (index, letter) in WORD.chars().enumerate() {
                        let (look, _) = letter_look(0, index);
                        word.spawn((
                            IntroLetter(index),
                            Text::new(letter.to_string()),
                            TextFont {
                                font_size: 112.0,
                                ..default()
                            },
                            TextColor(Color::BLACK.with_alpha(0.0)),
                            Tween::at(look, LETTER_FADE),
                        ));
                    }
                });
        });
}

fn style_intro(
    phase: Res<IntroPhase>,
    mut word: Query<&mut Tween, (With<IntroWord>, Without<IntroLetter>)>,
    mut letters: Query<(&IntroLetter, &mut Tween), Without<IntroWord>>,
) {
    if let Ok(mut tween) = word.single_mut() {
        tween.retarget(word_look(phase.0), Duration::ZERO);
    }
    for (letter, mut tween) in &mut letters {
        let (look, delay) = letter_look(phase.0, letter.0);
        tween.retarget(look, delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::{Delay, DelayPlugin};
    use crate::flow::FlowAction;
    use crate::flow::tests::{act, stage, test_app};
    use crate::stages::Variant;
    use crate::tween::TweenPlugin;
    use bevy::time::TimeUpdateStrategy;

    const STEP: Duration = Duration::from_millis(100);

    fn intro_app(variant: Variant) -> App {
        let mut app = test_app(variant);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
            .add_plugins((DelayPlugin, IntroPlugin, TweenPlugin));
        app.update();
        app
    }

    fn run_for(app: &mut App, duration: Duration) {
        for _ in 0..(duration.as_millis() / STEP.as_millis()) {
            app.update();
        }
    }

    fn phase(app: &App) -> u8 {
        app.world().resource::<IntroPhase>().0
    }

    fn pending_delays(app: &mut App) -> usize {
        app.world_mut().query::<&Delay>().iter(app.world()).count()
    }

    #[test]
    fn word_fades_in_then_drops_out() {
        assert_eq!(word_look(0).opacity, 0.0);
        assert_eq!(word_look(1), Look::SHOWN);
        assert_eq!(word_look(3), Look::SHOWN);
        let gone = word_look(4);
        assert_eq!(gone.opacity, 0.0);
        assert_eq!(gone.offset, 32.0);
        assert_eq!(gone.scale, 0.95);
    }

    #[test]
    fn letters_show_between_phases_two_and_four() {
        for phase in 0..=4 {
            let (look, _) = letter_look(phase, 0);
            let visible = look.opacity > 0.0;
            assert_eq!(visible, phase == 2 || phase == 3, "phase {phase}");
        }
        assert_eq!(letter_look(1, 3).0.offset, 48.0);
        assert_eq!(letter_look(4, 3).0.offset, 0.0);
    }

    #[test]
    fn letters_stagger_only_while_revealed() {
        assert_eq!(letter_look(2, 0).1, Duration::ZERO);
        assert_eq!(letter_look(2, 6).1, Duration::from_millis(720));
        assert_eq!(letter_look(4, 6).1, Duration::ZERO);
        assert_eq!(letter_look(1, 6).1, Duration::ZERO);
    }

    #[test]
    fn phases_fire_in_order() {
        let mut app = intro_app(Variant::Intro);
        // Intro entered on the first frame, time starts moving on the next.
        app.update();
        assert_eq!(stage(&app), Stage::Intro);
        assert_eq!(pending_delays(&mut app), 4);

        run_for(&mut app, Duration::from_millis(400));
        assert_eq!(phase(&app), 1);
        run_for(&mut app, Duration::from_millis(900));
        assert_eq!(phase(&app), 2);
        run_for(&mut app, Duration::from_millis(1000));
        assert_eq!(phase(&app), 3);
        run_for(&mut app, Duration::from_millis(1300));
        assert_eq!(phase(&app), 4);
        assert_eq!(stage(&app), Stage::Intro);
    }

    #[test]
    fn welcome_follows_after_intro_not_before() {
        let mut app = intro_app(Variant::Intro);
        app.update();

        run_for(&mut app, Duration::from_millis(4400));
        assert_eq!(stage(&app), Stage::Intro);

        run_for(&mut app, Duration::from_millis(400));
        assert_eq!(stage(&app), Stage::Welcome);
        assert_eq!(pending_delays(&mut app), 0);
    }

    #[test]
    fn merged_variant_also_plays_intro() {
        let mut app = intro_app(Variant::Merged);
        app.update();
        run_for(&mut app, Duration::from_millis(5000));
        assert_eq!(stage(&app), Stage::Welcome);
    }

    #[test]
    fn classic_variant_has_no_intro() {
        let mut app = intro_app(Variant::Classic);
        app.update();
        assert_eq!(stage(&app), Stage::Welcome);
        assert_eq!(pending_delays(&mut app), 0);
        run_for(&mut app, Duration::from_millis(5000));
        assert_eq!(phase(&app), 0);
    }

    #[test]
    fn leaving_intro_cancels_pending_phases() {
        let mut app = intro_app(Variant::Intro);
        app.update();
        run_for(&mut app, Duration::from_millis(1500));
        assert_eq!(phase(&app), 2);

        app.world_mut()
            .resource_mut::<NextState<Stage>>()
            .set(Stage::BoothEntry);
        app.update();
        assert_eq!(pending_delays(&mut app), 0);

        run_for(&mut app, Duration::from_millis(5000));
        assert_eq!(phase(&app), 2);
        assert_eq!(stage(&app), Stage::BoothEntry);
    }

    #[test]
    fn input_during_intro_is_ignored() {
        let mut app = intro_app(Variant::Intro);
        app.update();
        act(&mut app, FlowAction::Type("A-1".to_string()));
        act(&mut app, FlowAction::SubmitBooth);
        act(&mut app, FlowAction::GoBack);
        assert_eq!(stage(&app), Stage::Intro);
    }

    #[test]
    fn dropping_app_mid_intro_is_clean() {
        let mut app = intro_app(Variant::Intro);
        app.update();
        run_for(&mut app, Duration::from_millis(500));
        drop(app);
    }
}
