// One-shot delays owned by a stage.
//
// A delay is an entity holding a timer. It is despawned when its stage is left,
// which is how pending delays get cancelled.
use std::time::Duration;

use bevy::prelude::*;

use crate::flow::FlowSystems;
use crate::stages::Stage;

pub struct DelayPlugin;

impl Plugin for DelayPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DelayElapsed>()
            .add_systems(Update, tick_delays.in_set(FlowSystems::Input));
    }
}

/// What a delay does when it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayAction {
    IntroPhase(u8),
    EnterStage(Stage),
    SettleWelcome,
}

#[derive(Component, Debug)]
pub struct Delay {
    timer: Timer,
    action: DelayAction,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayElapsed(pub DelayAction);

/// Schedule `action` to fire `after` from now, for as long as `owner` stays active.
pub fn schedule(commands: &mut Commands, owner: Stage, after: Duration, action: DelayAction) {
    debug!("scheduling {action:?} in {after:?} on {owner}");
    commands.spawn((
        Delay {
            timer: Timer::new(after, TimerMode::Once),
            action,
        },
        DespawnOnExit(owner),
    ));
}

pub fn tick_delays(
    mut commands: Commands,
    time: Res<Time>,
    mut delays: Query<(Entity, &mut Delay)>,
    mut elapsed: MessageWriter<DelayElapsed>,
) {
    for (entity, mut delay) in &mut delays {
        delay.timer.tick(time.delta());
        if delay.timer.just_finished() {
            elapsed.write(DelayElapsed(delay.action));
            commands.entity(entity).despawn();
        }
    }
}
