//! Monster catalog loader.

use std::path::Path;

use game_core::{MonsterCatalog, MonsterTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loader for monster templates from RON files.
///
/// The file holds a list of templates:
///
/// ```ron
/// [
///     (name: "Rat", glyph: 'R', hp: 50, strength: 5, speed: 2.0),
/// ]
/// ```
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid monster catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let templates: Vec<MonsterTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monsters RON: {}", e))?;
        let catalog = MonsterCatalog::from_templates(templates)?;
        tracing::debug!(
            target: "content::monsters",
            count = catalog.len(),
            "monster catalog parsed"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_templates_with_default_sight() {
        let catalog = MonsterLoader::parse(
            r#"[
                (name: "Rat", glyph: 'R', hp: 50, strength: 5, speed: 2.0),
                (name: "Bat", glyph: 'B', hp: 8, strength: 2, speed: 3.0, sight_range: 4),
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get('R').unwrap().sight_range, 0);
        assert_eq!(catalog.get('B').unwrap().sight_range, 4);
        assert!(catalog.get('S').is_none());
    }

    #[test]
    fn rejects_glyphs_that_collide_with_terrain() {
        let err = MonsterLoader::parse(
            r#"[(name: "Door Mimic", glyph: '|', hp: 1, strength: 1, speed: 1.0)]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("reserved glyph"), "{err}");
    }
}
