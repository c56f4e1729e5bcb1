// Eased opacity/offset/scale transitions for UI nodes.
use std::iter;
use std::time::Duration;

use bevy::prelude::*;

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, (advance_tweens, fade_tweened).chain());
    }
}

/// How a node looks at rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Look {
    pub opacity: f32,
    /// Downward shift in pixels.
    pub offset: f32,
    pub scale: f32,
}

impl Look {
    pub const SHOWN: Look = Look {
        opacity: 1.0,
        offset: 0.0,
        scale: 1.0,
    };

    /// Transparent and pushed down by `offset` pixels.
    pub const fn hidden(offset: f32) -> Look {
        Look {
            opacity: 0.0,
            offset,
            scale: 1.0,
        }
    }

    fn lerp(self, to: Look, t: f32) -> Look {
        Look {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            offset: self.offset + (to.offset - self.offset) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// Background whose alpha follows the tweened opacity, scaled by this base alpha.
#[derive(Component, Debug, Clone, Copy)]
pub struct FadeFill(pub f32);

#[derive(Component, Debug, Clone)]
pub struct Tween {
    from: Look,
    to: Look,
    duration: f32,
    delay: f32,
    elapsed: f32,
}

impl Tween {
    /// A tween resting at `look` that takes `duration` for each later change.
    pub fn at(look: Look, duration: Duration) -> Self {
        Self {
            from: look,
            to: look,
            duration: duration.as_secs_f32(),
            delay: 0.0,
            elapsed: 0.0,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> Look {
        self.to
    }

    /// Start moving towards `to` after `delay`, from wherever the tween is now.
    pub fn retarget(&mut self, to: Look, delay: Duration) {
        if self.to == to {
            return;
        }
        self.from = self.current();
        self.to = to;
        self.delay = delay.as_secs_f32();
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, delta: Duration) {
        if !self.is_settled() {
            self.elapsed += delta.as_secs_f32();
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_settled(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn current(&self) -> Look {
        self.from.lerp(self.to, ease_out(self.progress()))
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn advance_tweens(
    time: Res<Time>,
    mut tweens: Query<(&mut Tween, &mut Node, Option<&mut UiTransform>)>,
) {
    for (mut tween, mut node, transform) in &mut tweens {
        tween.advance(time.delta());
        let look = tween.current();
        node.top = Val::Px(look.offset);
        if let Some(mut transform) = transform {
            transform.scale = Vec2::splat(look.scale);
        }
    }
}

/// Product of the opacities of every tween on `entity` and its ancestors, if any.
fn inherited_opacity(
    entity: Entity,
    tweens: &Query<&Tween>,
    parents: &Query<&ChildOf>,
) -> Option<f32> {
    iter::once(entity)
        .chain(parents.iter_ancestors(entity))
        .filter_map(|e| tweens.get(e).ok())
        .map(|tween| tween.current().opacity)
        .reduce(|a, b| a * b)
}

fn fade_tweened(
    tweens: Query<&Tween>,
    parents: Query<&ChildOf>,
    mut texts: Query<(Entity, &mut TextColor)>,
    mut fills: Query<(Entity, &FadeFill, &mut BackgroundColor)>,
    mut images: Query<(Entity, &mut ImageNode)>,
) {
    for (entity, mut color) in &mut texts {
        if let Some(opacity) = inherited_opacity(entity, &tweens, &parents) {
            color.0.set_alpha(opacity);
        }
    }
    for (entity, fill, mut background) in &mut fills {
        if let Some(opacity) = inherited_opacity(entity, &tweens, &parents) {
            background.0.set_alpha(fill.0 * opacity);
        }
    }
    for (entity, mut image) in &mut images {
        if let Some(opacity) = inherited_opacity(entity, &tweens, &parents) {
            image.color.set_alpha(opacity);
        }
    }
}
