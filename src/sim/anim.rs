//! Shared animation tables
//!
//! Frame data is immutable and shared by `Arc` between a prototype and all of
//! its clones. Each entity only owns which animation is active and how long it
//! has been playing; frame selection and drawing belong to the renderer.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("no animation named `{0}`")]
    Unknown(String),
}

/// A single named animation: texture keys played at a fixed frame duration
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frames: Vec<String>,
    pub frame_duration: f32,
}

impl Animation {
    /// One-frame animation from a single texture
    pub fn still(texture: impl Into<String>) -> Self {
        Self {
            frames: vec![texture.into()],
            frame_duration: 1.0,
        }
    }

    /// Frame key shown after `elapsed` seconds (looping)
    pub fn key_frame(&self, elapsed: f32) -> Option<&str> {
        if self.frames.is_empty() {
            return None;
        }
        let index = if self.frame_duration > 0.0 {
            (elapsed / self.frame_duration) as usize % self.frames.len()
        } else {
            0
        };
        self.frames.get(index).map(String::as_str)
    }
}

/// Immutable set of named animations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationSet {
    animations: BTreeMap<String, Animation>,
    /// Insertion order, used for the default animation and random picks
    order: Vec<String>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; re-inserting a name replaces its frames
    pub fn with(mut self, name: impl Into<String>, animation: Animation) -> Self {
        let name = name.into();
        if !self.animations.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.animations.insert(name, animation);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Per-entity playback state over a shared `AnimationSet`
#[derive(Debug, Clone)]
pub struct Animator {
    set: Arc<AnimationSet>,
    active: Option<String>,
    elapsed: f32,
}

impl Animator {
    /// Start on the first stored animation (if any)
    pub fn new(set: Arc<AnimationSet>) -> Self {
        let active = set.names().first().cloned();
        Self {
            set,
            active,
            elapsed: 0.0,
        }
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), AnimationError> {
        if self.set.get(name).is_none() {
            return Err(AnimationError::Unknown(name.to_string()));
        }
        self.active = Some(name.to_string());
        self.elapsed = 0.0;
        Ok(())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Texture key the renderer should draw this frame
    pub fn current_frame(&self) -> Option<&str> {
        let name = self.active.as_deref()?;
        self.set.get(name)?.key_frame(self.elapsed)
    }

    pub fn set(&self) -> &Arc<AnimationSet> {
        &self.set
    }

    /// Clone for a new instance: same shared set and active animation, clock reset
    pub fn restarted(&self) -> Self {
        Self {
            set: Arc::clone(&self.set),
            active: self.active.clone(),
            elapsed: 0.0,
        }
    }
}
