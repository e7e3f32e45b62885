//! Headless scene
//!
//! Keeps a ledger of every visual the simulation creates and releases.
//! Used by the native binary and by tests that check disposal counts.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{Disposable, Rgb, Scene, Template, Tintable, VisualHandle};

/// Book-keeping for one live visual
#[derive(Debug, Clone)]
pub struct HeadlessVisual {
    pub template: Template,
    pub color: Option<Rgb>,
    pub emissive: Option<Rgb>,
}

/// Scene implementation that renders nothing
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u32,
    live: BTreeMap<VisualHandle, HeadlessVisual>,
    /// Templates still "loading"
    unready: HashSet<Template>,
    /// Dispose calls per handle
    disposals: HashMap<VisualHandle, u32>,
    added: usize,
    removed: usize,
}

impl HeadlessScene {
    /// Scene with every template loaded
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Default::default()
        }
    }

    /// Mark a loaded template ready or not. Procedural templates are always ready.
    pub fn set_ready(&mut self, template: Template, ready: bool) {
        if ready {
            self.unready.remove(&template);
        } else {
            self.unready.insert(template);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn added_count(&self) -> usize {
        self.added
    }

    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// Total dispose calls, including repeats
    pub fn disposed_count(&self) -> usize {
        self.disposals.values().map(|&n| n as usize).sum()
    }

    /// Dispose calls for one handle
    pub fn disposals_of(&self, handle: VisualHandle) -> u32 {
        self.disposals.get(&handle).copied().unwrap_or(0)
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&HeadlessVisual> {
        self.live.get(&handle)
    }

    /// Handles currently in the scene
    pub fn live_handles(&self) -> Vec<VisualHandle> {
        self.live.keys().copied().collect()
    }

    /// Live visuals created from `template`
    pub fn count_of(&self, template: Template) -> usize {
        self.live.values().filter(|v| v.template == template).count()
    }
}

impl Tintable for HeadlessScene {
    fn set_color(&mut self, handle: VisualHandle, color: Rgb) {
        if let Some(visual) = self.live.get_mut(&handle) {
            visual.color = Some(color);
        }
    }

    fn set_emissive(&mut self, handle: VisualHandle, color: Option<Rgb>) {
        if let Some(visual) = self.live.get_mut(&handle) {
            visual.emissive = color;
        }
    }
}

impl Disposable for HeadlessScene {
    fn remove_from_scene(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.removed += 1;
        }
    }

    fn dispose_visual(&mut self, handle: VisualHandle) {
        *self.disposals.entry(handle).or_insert(0) += 1;
    }
}

impl Scene for HeadlessScene {
    fn template_ready(&self, template: Template) -> bool {
        template.is_procedural() || !self.unready.contains(&template)
    }

    fn add_to_scene(&mut self, template: Template) -> VisualHandle {
        let handle = VisualHandle(self.next_handle.max(1));
        self.next_handle = handle.0 + 1;
        self.live.insert(
            handle,
            HeadlessVisual {
                template,
                color: None,
                emissive: None,
            },
        );
        self.added += 1;
        log::trace!("add {:?} as {:?}", template, handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut scene = HeadlessScene::new();
        let a = scene.add_to_scene(Template::Trail);
        let b = scene.add_to_scene(Template::Trail);
        assert_ne!(a, b);
        assert_eq!(scene.count_of(Template::Trail), 2);
    }

    #[test]
    fn test_procedural_ignores_unready() {
        let mut scene = HeadlessScene::new();
        scene.set_ready(Template::Wave, false);
        assert!(scene.template_ready(Template::Wave));
        scene.set_ready(Template::Player, false);
        assert!(!scene.template_ready(Template::Player));
        scene.set_ready(Template::Player, true);
        assert!(scene.template_ready(Template::Player));
    }

    #[test]
    fn test_unknown_handle_is_tolerated() {
        let mut scene = HeadlessScene::new();
        scene.remove_from_scene(VisualHandle(42));
        scene.set_emissive(VisualHandle(42), Some(Rgb::CYAN));
        assert_eq!(scene.removed_count(), 0);
    }

    #[test]
    fn test_tint_recorded() {
        let mut scene = HeadlessScene::new();
        let h = scene.add_to_scene(Template::Projectile);
        scene.set_color(h, Rgb::RED);
        scene.set_emissive(h, Some(Rgb::RED));
        let visual = scene.visual(h).unwrap();
        assert_eq!(visual.color, Some(Rgb::RED));
        assert_eq!(visual.emissive, Some(Rgb::RED));
    }
}
