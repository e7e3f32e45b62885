//! Scene boundary between the simulation and whatever draws it
//!
//! The simulation never touches renderer internals. It asks the scene to
//! clone a template into a live visual, tints it through [`Tintable`], and
//! releases it through [`Disposable`]. Position, scale, opacity and
//! visibility live on the simulation entities and are read back by the
//! renderer each frame.

pub mod headless;

pub use headless::HeadlessScene;

use serde::{Deserialize, Serialize};

use crate::sim::{EnemyKind, PowerUpKind};

/// Opaque reference to a renderable owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);
    pub const RED: Rgb = Rgb(0xff0000);
    pub const ORANGE: Rgb = Rgb(0xffaa00);
    pub const DARK_GREY: Rgb = Rgb(0x444444);
    pub const CYAN: Rgb = Rgb(0x00ffff);
}

/// Visual templates the scene knows how to clone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    /// Loaded model templates (may arrive asynchronously)
    Player,
    Enemy(EnemyKind),
    PowerUp(PowerUpKind),
    Coin,
    /// Procedural templates (always available)
    PowerUpFallback(PowerUpKind),
    Projectile,
    Tracer,
    Particle,
    Trail,
    Wave,
}

impl Template {
    /// Procedural templates are built in code and never wait on loading
    pub fn is_procedural(&self) -> bool {
        matches!(
            self,
            Template::PowerUpFallback(_)
                | Template::Projectile
                | Template::Tracer
                | Template::Particle
                | Template::Trail
                | Template::Wave
        )
    }
}

/// Color mutation on a live visual
pub trait Tintable {
    /// Base color of every mesh in the visual
    fn set_color(&mut self, handle: VisualHandle, color: Rgb);
    /// Emissive glow (`None` clears it)
    fn set_emissive(&mut self, handle: VisualHandle, color: Option<Rgb>);
}

/// Teardown of a live visual. Both calls must tolerate unknown handles.
pub trait Disposable {
    fn remove_from_scene(&mut self, handle: VisualHandle);
    fn dispose_visual(&mut self, handle: VisualHandle);
}

/// Everything the simulation needs from the renderer and asset provider
pub trait Scene: Tintable + Disposable {
    /// Whether the template has finished loading
    fn template_ready(&self, template: Template) -> bool;
    /// Clone a ready template and add the clone to the scene
    fn add_to_scene(&mut self, template: Template) -> VisualHandle;
}

/// A visual slot owned by exactly one entity
///
/// The handle is taken on release, so a second release is a no-op.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Visual {
    handle: Option<VisualHandle>,
}

impl Visual {
    /// Instantiate `template` if it is ready; otherwise `None` (skip the spawn)
    pub fn spawn(scene: &mut dyn Scene, template: Template) -> Option<Self> {
        if !scene.template_ready(template) {
            return None;
        }
        Some(Self {
            handle: Some(scene.add_to_scene(template)),
        })
    }

    /// Empty slot (nothing to render, nothing to release)
    pub fn none() -> Self {
        Self { handle: None }
    }

    pub fn handle(&self) -> Option<VisualHandle> {
        self.handle
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    pub fn set_color(&self, scene: &mut dyn Scene, color: Rgb) {
        if let Some(handle) = self.handle {
            scene.set_color(handle, color);
        }
    }

    pub fn set_emissive(&self, scene: &mut dyn Scene, color: Option<Rgb>) {
        if let Some(handle) = self.handle {
            scene.set_emissive(handle, color);
        }
    }

    /// Remove from the scene and dispose. Safe to call more than once.
    pub fn release(&mut self, scene: &mut dyn Scene) {
        if let Some(handle) = self.handle.take() {
            scene.remove_from_scene(handle);
            scene.dispose_visual(handle);
        }
    }
}
