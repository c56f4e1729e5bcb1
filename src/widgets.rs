// Shared palette, logo, text and button helpers for the flow screens.

use bevy::prelude::*;

use crate::config::{FlowConfig, LOGO_URL};
use crate::tween::FadeFill;

pub struct WidgetsPlugin;

impl Plugin for WidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, button_visuals);
    }

    // The first screen spawns before any startup system runs, so the logo is
    // requested as soon as the asset server is ready.
    fn finish(&self, app: &mut App) {
        let Some(asset_server) = app.world().get_resource::<AssetServer>().cloned() else {
            return;
        };
        let url = app
            .world()
            .get_resource::<FlowConfig>()
            .map(|config| config.logo_url.clone())
            .unwrap_or_else(|| LOGO_URL.to_string());
        info!("loading logo from {url}");
        app.insert_resource(LogoImage(asset_server.load(url)));
    }
}

pub const TEAL: Color = Color::srgb(0.051, 0.580, 0.533);
pub const TEAL_DARK: Color = Color::srgb(0.059, 0.463, 0.431);
pub const TEAL_LIGHT: Color = Color::srgb(0.078, 0.722, 0.651);
pub const INK: Color = Color::srgb(0.067, 0.094, 0.153);
pub const MUTED: Color = Color::srgb(0.294, 0.333, 0.388);
pub const FAINT: Color = Color::srgb(0.420, 0.447, 0.502);
pub const DISABLED: Color = Color::srgb(0.612, 0.639, 0.686);
pub const BORDER: Color = Color::srgb(0.898, 0.906, 0.922);
pub const PAGE: Color = Color::srgb(0.976, 0.980, 0.984);
pub const ONLINE: Color = Color::srgb(0.133, 0.773, 0.369);

/// Handle to the remote logo. Missing when no asset server is running.
#[derive(Resource)]
pub struct LogoImage(pub Handle<Image>);

/// Colours a button cycles through as the pointer interacts with it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ButtonPalette {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
}

impl ButtonPalette {
    pub const PRIMARY: ButtonPalette = ButtonPalette {
        normal: TEAL,
        hovered: TEAL_LIGHT,
        pressed: TEAL_DARK,
    };

    pub const SECONDARY: ButtonPalette = ButtonPalette {
        normal: Color::WHITE,
        hovered: PAGE,
        pressed: BORDER,
    };

    pub const DISABLED: ButtonPalette = ButtonPalette {
        normal: DISABLED,
        hovered: DISABLED,
        pressed: DISABLED,
    };

    pub const CARD: ButtonPalette = ButtonPalette {
        normal: Color::srgba(1.0, 1.0, 1.0, 0.9),
        hovered: Color::WHITE,
        pressed: Color::WHITE,
    };

    pub fn color(&self, interaction: Interaction) -> Color {
        match interaction {
            Interaction::Pressed => self.pressed,
            Interaction::Hovered => self.hovered,
            Interaction::None => self.normal,
        }
    }
}

/// Logo image `height` pixels tall. Nothing is drawn if the logo never loads.
pub fn spawn_logo(parent: &mut ChildSpawnerCommands, logo: Option<&LogoImage>, height: f32) {
    let Some(logo) = logo else {
        return;
    };
    parent.spawn((
        ImageNode::new(logo.0.clone()),
        Node {
            height: Val::Px(height),
            ..default()
        },
    ));
}

pub fn spawn_text(
    parent: &mut ChildSpawnerCommands,
    content: impl Into<String>,
    font_size: f32,
    color: Color,
) {
    parent.spawn((
        Text::new(content),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    ));
}

/// White translucent panel with a light border around `node`.
pub fn panel(node: Node) -> impl Bundle {
    (
        Node {
            border: UiRect::all(Val::Px(1.0)),
            ..node
        },
        BorderColor::all(BORDER),
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.9)),
        FadeFill(0.9),
    )
}

pub fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    label: &str,
    marker: impl Component,
    palette: ButtonPalette,
    width: Val,
) {
    let text_color = if palette == ButtonPalette::SECONDARY {
        MUTED
    } else {
        Color::WHITE
    };
    parent
        .spawn((
            marker,
            Button,
            palette,
            Node {
                width,
                min_width: Val::Px(200.0),
                height: Val::Px(56.0),
                padding: UiRect::horizontal(Val::Px(32.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor::all(BORDER),
            BackgroundColor(palette.normal),
            FadeFill(1.0),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(text_color),
            ));
        });
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &ButtonPalette, &mut BackgroundColor),
        Or<(Changed<Interaction>, Changed<ButtonPalette>)>,
    >,
) {
    for (interaction, palette, mut background) in &mut query {
        *background = palette.color(*interaction).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_interaction() {
        let palette = ButtonPalette::PRIMARY;
        assert_eq!(palette.color(Interaction::None), TEAL);
        assert_eq!(palette.color(Interaction::Hovered), TEAL_LIGHT);
        assert_eq!(palette.color(Interaction::Pressed), TEAL_DARK);
        assert_eq!(ButtonPalette::DISABLED.color(Interaction::Pressed), DISABLED);
    }
}
