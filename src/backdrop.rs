// Soft drifting blobs behind the flow screens.
use bevy::prelude::*;
use fast_poisson::Poisson2D;
use noiz::prelude::{common_noise::*, *};
use rand::Rng;

use crate::config::FlowConfig;
use crate::stages::Stage;
use crate::widgets::PAGE;

pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DriftNoise>()
            .init_resource::<BlobPoints>()
            .add_systems(
                OnEnter(Stage::Welcome),
                |commands: Commands, points: Res<BlobPoints>, config: Res<FlowConfig>| {
                    spawn_backdrop(commands, &points, &config, Stage::Welcome)
                },
            )
            .add_systems(
                OnEnter(Stage::BoothEntry),
                |commands: Commands, points: Res<BlobPoints>, config: Res<FlowConfig>| {
                    spawn_backdrop(commands, &points, &config, Stage::BoothEntry)
                },
            )
            .add_systems(
                OnEnter(Stage::Options),
                |commands: Commands, points: Res<BlobPoints>, config: Res<FlowConfig>| {
                    spawn_backdrop(commands, &points, &config, Stage::Options)
                },
            )
            .add_systems(Update, drift_blobs);
    }
}

/// Drift amplitude, in percent of the screen.
const DRIFT: f32 = 4.0;
const DRIFT_SPEED: f32 = 0.05;
const BLOB_SIZE: std::ops::RangeInclusive<f32> = 192.0..=320.0;

const BLOB_COLOURS: [Color; 3] = [
    Color::srgba(0.800, 0.984, 0.945, 0.4),
    Color::srgba(0.953, 0.957, 0.965, 0.6),
    Color::srgba(0.941, 0.992, 0.980, 0.6),
];

#[derive(Resource)]
pub struct DriftNoise(pub Noise<Fbm<Perlin>>);

impl Default for DriftNoise {
    fn default() -> DriftNoise {
        let mut noise: Noise<Fbm<Perlin>> = Noise::<Fbm<Perlin>>::default();
        noise.set_seed(7);
        noise.set_frequency(1.0);
        DriftNoise(noise)
    }
}

/// Blue noise positions in the unit square, reused by every screen.
#[derive(Resource)]
pub struct BlobPoints(Vec<[f32; 2]>);

impl Default for BlobPoints {
    fn default() -> Self {
        let points: Vec<[f32; 2]> = Poisson2D::new()
            .with_dimensions([1.0, 1.0], 0.3)
            .with_seed(11)
            .generate();
        BlobPoints(points)
    }
}

#[derive(Component)]
struct Blob {
    /// Resting position in percent of the screen.
    anchor: Vec2,
    /// Where this blob samples the drift field.
    seed: Vec2,
}

/// Number of blobs behind `stage`; the welcome screen gets the most.
pub fn blob_count(config: &FlowConfig, stage: Stage) -> usize {
    match stage {
        Stage::Intro => 0,
        Stage::Welcome => config.backdrop_particles,
        Stage::BoothEntry | Stage::Options => config.backdrop_particles.saturating_sub(1),
    }
}

fn spawn_backdrop(mut commands: Commands, points: &BlobPoints, config: &FlowConfig, stage: Stage) {
    let count = blob_count(config, stage);
    let mut rng = rand::rng();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(PAGE),
            GlobalZIndex(-1),
            DespawnOnExit(stage),
        ))
        .with_children(|parent| {
            for (i, point) in points.0.iter().cycle().take(count).enumerate() {
                let anchor = Vec2::new(10.0 + point[0] * 70.0, 10.0 + point[1] * 70.0);
                let size = rng.random_range(BLOB_SIZE);
                parent.spawn((
                    Blob {
                        anchor,
                        seed: Vec2::new(i as f32 * 13.7, point[1] * 31.0),
                    },
                    Node {
                        width: Val::Px(size),
                        height: Val::Px(size),
                        position_type: PositionType::Absolute,
                        left: Val::Percent(anchor.x),
                        top: Val::Percent(anchor.y),
                        ..default()
                    },
                    BackgroundColor(BLOB_COLOURS[i % BLOB_COLOURS.len()]),
                ));
            }
        });
}

fn drift_blobs(time: Res<Time>, noise: Res<DriftNoise>, mut blobs: Query<(&Blob, &mut Node)>) {
    let t = time.elapsed_secs() * DRIFT_SPEED;
    for (blob, mut node) in &mut blobs {
        let dx = noise.0.sample_for::<f32>(Vec3::new(blob.seed.x, blob.seed.y, t));
        let dy = noise
            .0
            .sample_for::<f32>(Vec3::new(blob.seed.y + 17.0, blob.seed.x, t));
        node.left = Val::Percent(blob.anchor.x + dx * DRIFT);
        node.top = Val::Percent(blob.anchor.y + dy * DRIFT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowAction;
    use crate::flow::tests::{act, test_app};
    use crate::stages::Variant;

    fn blobs(app: &mut App) -> usize {
        app.world_mut().query::<&Blob>().iter(app.world()).count()
    }

    #[test]
    fn welcome_gets_one_more_blob() {
        let config = FlowConfig::default();
        assert_eq!(blob_count(&config, Stage::Intro), 0);
        assert_eq!(blob_count(&config, Stage::Welcome), 3);
        assert_eq!(blob_count(&config, Stage::BoothEntry), 2);
        assert_eq!(blob_count(&config, Stage::Options), 2);

        let bare = FlowConfig {
            backdrop_particles: 0,
            ..default()
        };
        assert_eq!(blob_count(&bare, Stage::Options), 0);
    }

    #[test]
    fn blobs_follow_the_screen() {
        let mut app = test_app(Variant::Classic);
        app.add_plugins(BackdropPlugin);
        app.update();
        assert_eq!(blobs(&mut app), 3);

        act(&mut app, FlowAction::AdvanceFromWelcome);
        assert_eq!(blobs(&mut app), 2);
    }
}
