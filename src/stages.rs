// Flow stages, revisions of the flow, and shared view state.
use bevy::prelude::*;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    #[default]
    Intro,
    Welcome,
    BoothEntry,
    Options,
}

/// The three revisions of the flow. They share views but differ in which
/// stages exist and where the booth form lives.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Variant {
    /// No intro; welcome, booth entry and options each get their own screen.
    Classic,
    /// Intro, then a welcome screen that reveals the booth form in place.
    Merged,
    /// Intro followed by all three screens.
    #[default]
    Intro,
}

impl Variant {
    /// Whether `stage` takes part in this revision.
    pub fn has_stage(self, stage: Stage) -> bool {
        match stage {
            Stage::Intro => self != Variant::Classic,
            Stage::BoothEntry => self != Variant::Merged,
            Stage::Welcome | Stage::Options => true,
        }
    }

    /// Stages in traversal order.
    pub fn stages(self) -> impl Iterator<Item = Stage> {
        Stage::iter().filter(move |stage| self.has_stage(*stage))
    }

    pub fn initial_stage(self) -> Stage {
        self.stages().next().unwrap_or(Stage::Welcome)
    }

    /// True when the booth form is hosted by the welcome screen.
    pub fn booth_on_welcome(self) -> bool {
        !self.has_stage(Stage::BoothEntry)
    }

    pub fn predecessor(self, stage: Stage) -> Option<Stage> {
        let mut previous = None;
        for candidate in self.stages() {
            if candidate == stage {
                return previous;
            }
            previous = Some(candidate);
        }
        None
    }

    pub fn successor(self, stage: Stage) -> Option<Stage> {
        self.stages().skip_while(|s| *s != stage).nth(1)
    }
}

/// Booth identifier as typed. Kept verbatim; only the submit check trims.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct BoothNumber(pub String);

impl BoothNumber {
    pub fn can_submit(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

/// Welcome screen entrance state. Starts animating and settles once per session.
#[derive(Resource, Debug)]
pub struct WelcomeReveal {
    pub animating: bool,
    /// Merged revision only: the booth form has been revealed on the welcome screen.
    pub form_open: bool,
}

impl Default for WelcomeReveal {
    fn default() -> Self {
        Self {
            animating: true,
            form_open: false,
        }
    }
}
