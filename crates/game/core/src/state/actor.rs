//! Characters shared by the player and monsters.
//!
//! Both wrappers embed the same [`Character`] data; combat and movement are
//! free functions over `Character`, so neither wrapper carries behaviour the
//! other lacks.
use std::collections::BTreeMap;

use crate::config::{self, ConfigError, PlayerConfig};

use super::Position;

/// Stats and placement common to every actor on the grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub position: Position,
    pub name: String,
    pub glyph: char,
    /// Hit points. Zero or below means dead.
    pub hp: i32,
    /// Damage dealt per attack.
    pub strength: i32,
    /// Action points accrued per turn.
    pub speed: f64,
    /// Accumulated action points; one is spent per step or attack.
    pub ap: f64,
    /// Line-of-sight radius in tiles.
    pub sight_range: i32,
}

impl Character {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// The controllable character. Exactly one exists per world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub character: Character,
}

impl Player {
    pub fn new(config: &PlayerConfig, position: Position) -> Self {
        Self {
            character: Character {
                position,
                name: config.name.clone(),
                glyph: config.glyph,
                hp: config.hp,
                strength: config.strength,
                speed: config.speed,
                ap: 0.0,
                sight_range: config.sight_range,
            },
        }
    }

    pub fn position(&self) -> Position {
        self.character.position
    }
}

/// A hostile character living on one level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub character: Character,
}

impl Monster {
    pub fn from_template(template: &MonsterTemplate, position: Position) -> Self {
        Self {
            character: Character {
                position,
                name: template.name.clone(),
                glyph: template.glyph,
                hp: template.hp,
                strength: template.strength,
                speed: template.speed,
                ap: 0.0,
                sight_range: template.sight_range,
            },
        }
    }

    pub fn position(&self) -> Position {
        self.character.position
    }
}

/// Blueprint for monsters spawned from a map glyph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    pub glyph: char,
    pub hp: i32,
    pub strength: i32,
    pub speed: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sight_range: i32,
}

impl MonsterTemplate {
    pub fn rat() -> Self {
        Self {
            name: "Rat".to_string(),
            glyph: 'R',
            hp: 50,
            strength: 5,
            speed: 2.0,
            sight_range: 0,
        }
    }

    pub fn spider() -> Self {
        Self {
            name: "Spider".to_string(),
            glyph: 'S',
            hp: 100,
            strength: 10,
            speed: 1.0,
            sight_range: 0,
        }
    }
}

/// Glyph-indexed set of monster templates known to the map parser.
#[derive(Clone, Debug, PartialEq)]
pub struct MonsterCatalog {
    templates: BTreeMap<char, MonsterTemplate>,
}

impl MonsterCatalog {
    /// Glyphs with a fixed meaning in map files.
    pub const RESERVED_GLYPHS: [char; 8] = [' ', '\t', '#', '.', '|', '/', 'u', 'd'];

    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Builds a catalog, rejecting templates that shadow map vocabulary,
    /// cannot act or see too far.
    pub fn from_templates(
        templates: impl IntoIterator<Item = MonsterTemplate>,
    ) -> Result<Self, ConfigError> {
        let mut catalog = Self::empty();
        for template in templates {
            catalog.insert(template)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, template: MonsterTemplate) -> Result<(), ConfigError> {
        if Self::RESERVED_GLYPHS.contains(&template.glyph) || template.glyph == '@' {
            return Err(ConfigError::ReservedGlyph {
                name: template.name,
                glyph: template.glyph,
            });
        }
        if !(template.speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed {
                name: template.name,
                speed: template.speed,
            });
        }
        config::validate_sight_range(&template.name, template.sight_range)?;
        self.templates.insert(template.glyph, template);
        Ok(())
    }

    pub fn get(&self, glyph: char) -> Option<&MonsterTemplate> {
        self.templates.get(&glyph)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for MonsterCatalog {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        for template in [MonsterTemplate::rat(), MonsterTemplate::spider()] {
            templates.insert(template.glyph, template);
        }
        Self { templates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_knows_rat_and_spider() {
        let catalog = MonsterCatalog::default();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get('R').map(|t| t.hp), Some(50));
        assert_eq!(catalog.get('S').map(|t| t.strength), Some(10));
        assert!(catalog.get('Z').is_none());
    }

    #[test]
    fn rejects_reserved_glyph() {
        let template = MonsterTemplate {
            glyph: '#',
            ..MonsterTemplate::rat()
        };
        let err = MonsterCatalog::from_templates([template]).unwrap_err();
        assert!(matches!(err, ConfigError::ReservedGlyph { glyph: '#', .. }));
    }

    #[test]
    fn rejects_unbounded_sight_range() {
        let template = MonsterTemplate {
            sight_range: i32::MAX,
            ..MonsterTemplate::rat()
        };
        let err = MonsterCatalog::from_templates([template]).unwrap_err();
        assert!(matches!(err, ConfigError::SightRangeTooLarge { .. }));
    }

    #[test]
    fn monster_starts_with_no_action_points() {
        let monster = Monster::from_template(&MonsterTemplate::rat(), Position::new(4, 2));
        assert_eq!(monster.position(), Position::new(4, 2));
        assert_eq!(monster.character.ap, 0.0);
        assert!(monster.character.is_alive());
    }
}
