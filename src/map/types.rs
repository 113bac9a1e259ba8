use serde::{Deserialize, Serialize};

use crate::element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Battle,
    Treasure,
    Shop,
    Boss,
}

/// A committed event on one step of an area.
///
/// Battle and boss slots carry the element the enemy will have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UpcomingEvent {
    Battle {
        #[serde(rename = "enemyElement")]
        enemy_element: Element,
    },
    Treasure,
    Shop,
    Boss {
        #[serde(rename = "enemyElement")]
        enemy_element: Element,
    },
}

impl UpcomingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UpcomingEvent::Battle { .. } => EventKind::Battle,
            UpcomingEvent::Treasure => EventKind::Treasure,
            UpcomingEvent::Shop => EventKind::Shop,
            UpcomingEvent::Boss { .. } => EventKind::Boss,
        }
    }

    pub fn enemy_element(&self) -> Option<Element> {
        match self {
            UpcomingEvent::Battle { enemy_element } | UpcomingEvent::Boss { enemy_element } => {
                Some(*enemy_element)
            }
            UpcomingEvent::Treasure | UpcomingEvent::Shop => None,
        }
    }
}
