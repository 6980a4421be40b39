use std::sync::Arc;

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use wish_tree::prelude::{Theme, TreeState};

/// Input driving the scene: a wish, a toggle, or an explicit target formation.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum WishTreeInput {
    /// Derive a new theme from the wish and rebuild every formation.
    Wish(String),
    /// Flip between scattered and tree.
    Toggle,
    /// Set the target formation.
    Set(TreeState),
}

/// Channel for feeding [`WishTreeInput`] from outside the ECS (UI toolkits, stdin readers,
/// other threads). Drained into Bevy messages once per frame.
#[derive(Resource)]
pub struct WishBus {
    tx: Sender<WishTreeInput>,
    rx: Receiver<WishTreeInput>,
}

impl Default for WishBus {
    fn default() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }
}

impl WishBus {
    /// Sender that may be cloned and moved to other threads.
    pub fn sender(&self) -> &Sender<WishTreeInput> {
        &self.tx
    }

    pub(crate) fn receiver(&self) -> &Receiver<WishTreeInput> {
        &self.rx
    }
}

/// Global [`Event`] triggered after a new theme and its formations were swapped in.
#[derive(Event, Debug, Clone)]
pub struct ThemeApplied {
    pub theme: Arc<Theme>,
}

pub(crate) fn drain_wish_bus(bus: Res<WishBus>, mut messages: ResMut<Messages<WishTreeInput>>) {
    while let Ok(input) = bus.receiver().try_recv() {
        messages.write(input);
    }
}
