// Main
mod backdrop;
mod booth;
mod config;
mod delay;
mod flow;
mod intro;
mod options;
mod stages;
mod tween;
mod welcome;
mod widgets;

use bevy::prelude::*;
use backdrop::BackdropPlugin;
use booth::BoothPlugin;
use delay::DelayPlugin;
use flow::FlowPlugin;
use intro::IntroPlugin;
use options::OptionsPlugin;
use tween::TweenPlugin;
use welcome::WelcomePlugin;
use widgets::WidgetsPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "ExpoFlow".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::WHITE))
        .add_plugins((
            FlowPlugin,
            DelayPlugin,
            TweenPlugin,
            WidgetsPlugin,
            BackdropPlugin,
            IntroPlugin,
            WelcomePlugin,
            BoothPlugin,
            OptionsPlugin,
        ))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
