use std::{collections::HashSet, ops::Index};

use world::World;

use crate::{Config, Effect, Error, Result, Slot, Timers};

/// Eligibility predicate for an effect.
pub type Condition = fn(&World, &Timers) -> bool;

/// How an effect's callbacks get run over its lifetime.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Shape {
    /// Activate once, no deactivation.
    Flash,
    /// Activate once, then activate again to undo it on retirement.
    Toggle,
    /// Activate once, separate deactivate on retirement.
    Latch,
    /// Activate every frame while running.
    Continuous { restores: bool },
}

impl Shape {
    pub fn is_continuous(self) -> bool {
        matches!(self, Shape::Continuous { .. })
    }

    pub fn has_deactivate(self) -> bool {
        matches!(
            self,
            Shape::Toggle | Shape::Latch | Shape::Continuous { restores: true }
        )
    }
}

/// Static description of a chaos effect.
#[derive(Clone, Debug)]
pub struct Descriptor {
    pub name: String,
    pub shape: Shape,
    /// Longest random duration, zero for instantaneous effects.
    pub max_secs: u32,
    pub condition: Option<Condition>,
    /// Can the manual control cut the effect short.
    pub interruptible: bool,
    /// Never picked at random.
    pub reserved: bool,
}

impl Descriptor {
    fn new(name: &str, shape: Shape, max_secs: u32) -> Self {
        Descriptor {
            name: name.into(),
            shape,
            max_secs,
            condition: None,
            interruptible: true,
            reserved: false,
        }
    }

    pub fn flash(name: &str) -> Self {
        Descriptor::new(name, Shape::Flash, 0)
    }

    pub fn toggle(name: &str, max_secs: u32) -> Self {
        Descriptor::new(name, Shape::Toggle, max_secs)
    }

    pub fn latch(name: &str, max_secs: u32) -> Self {
        Descriptor::new(name, Shape::Latch, max_secs)
    }

    pub fn continuous(name: &str, max_secs: u32) -> Self {
        Descriptor::new(name, Shape::Continuous { restores: false }, max_secs)
    }

    /// Continuous effect that undoes itself on retirement.
    pub fn restoring(mut self) -> Self {
        if let Shape::Continuous { restores } = &mut self.shape {
            *restores = true;
        }
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn uninterruptible(mut self) -> Self {
        self.interruptible = false;
        self
    }

    pub fn reserved(mut self) -> Self {
        self.reserved = true;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.max_secs == 0
    }

    fn validate(&self, config: &Config) -> Result<()> {
        if (self.shape == Shape::Flash) != self.is_instant() {
            return Err(Error::ShapeMismatch {
                name: self.name.clone(),
            });
        }
        if !self.is_instant() && self.max_secs <= config.min_effect_secs {
            return Err(Error::DegenerateDuration {
                name: self.name.clone(),
                max_secs: self.max_secs,
                min_secs: config.min_effect_secs,
            });
        }
        if !config.fits_in_ticks(self.max_secs) {
            return Err(Error::InvalidConfig {
                reason: format!("effect {:?} is too long", self.name),
            });
        }
        Ok(())
    }
}

/// Fixed ordered table of effect descriptors.
#[derive(Clone, Debug)]
pub struct Registry {
    entries: Vec<Descriptor>,
    selectable: Vec<usize>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Descriptor> {
        self.entries.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.entries.iter()
    }

    /// Indices open to random selection.
    pub fn selectable(&self) -> &[usize] {
        &self.selectable
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|d| d.name == name)
    }
}

impl Index<usize> for Registry {
    type Output = Descriptor;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.entries[idx]
    }
}

/// Collects effects for a scheduler.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(Descriptor, Box<dyn Effect>)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(
        mut self,
        desc: Descriptor,
        effect: impl Effect + 'static,
    ) -> Self {
        self.entries.push((desc, Box::new(effect)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn build(
        mut self,
        config: &Config,
        meta: Option<(Descriptor, Box<dyn Effect>)>,
    ) -> Result<(Registry, Vec<Slot>)> {
        if let Some(meta) = meta {
            self.entries.insert(0, meta);
        }

        let mut names = HashSet::new();
        for (desc, _) in &self.entries {
            desc.validate(config)?;
            if !names.insert(desc.name.as_str()) {
                return Err(Error::DuplicateName {
                    name: desc.name.clone(),
                });
            }
        }

        let selectable: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, (d, _))| (!d.reserved).then_some(i))
            .collect();
        if selectable.is_empty() {
            return Err(Error::NoSelectableEffects);
        }

        let (entries, slots): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .map(|(desc, effect)| (desc, Slot::new(effect)))
            .unzip();

        Ok((
            Registry {
                entries,
                selectable,
            },
            slots,
        ))
    }
}
