//! In-Memory-Karte mit Layern, auf denen statische Tiles vor dynamischen Entities liegen.

use super::entity::{EntityIndex, EntityModel, EntityType};
use super::geometry::Rect;
use super::map_query::MapQuery;
use anyhow::{bail, Context};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geschichtete Karte.
///
/// Pro Layer liegt ein geordneter Vektor: erst alle statischen Tiles, dann alle
/// dynamischen Entities. Der Index einer Entity ist `(layer, Position im Vektor)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TileMapFile", into = "TileMapFile")]
pub struct TileMap {
    min_layer: i32,
    max_layer: i32,
    layers: BTreeMap<i32, Vec<EntityModel>>,
}

/// Serialisierte Form: Layer-Bereich plus flache Entity-Liste.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileMapFile {
    min_layer: i32,
    max_layer: i32,
    #[serde(default)]
    entities: Vec<EntityModel>,
}

impl TryFrom<TileMapFile> for TileMap {
    type Error = anyhow::Error;

    fn try_from(file: TileMapFile) -> anyhow::Result<Self> {
        if file.min_layer > file.max_layer {
            bail!(
                "Ungültiger Layer-Bereich {}..={}",
                file.min_layer,
                file.max_layer
            );
        }
        let mut map = TileMap::new(file.min_layer, file.max_layer);
        for entity in file.entities {
            map.add_entity(entity)?;
        }
        Ok(map)
    }
}

impl From<TileMap> for TileMapFile {
    fn from(map: TileMap) -> Self {
        Self {
            min_layer: map.min_layer,
            max_layer: map.max_layer,
            entities: map.layers.into_values().flatten().collect(),
        }
    }
}

impl TileMap {
    /// Erstellt eine leere Karte mit den Layern `min_layer..=max_layer`.
    pub fn new(min_layer: i32, max_layer: i32) -> Self {
        let layers = (min_layer..=max_layer).map(|l| (l, Vec::new())).collect();
        Self {
            min_layer,
            max_layer,
            layers,
        }
    }

    /// Gesamtzahl aller Entities.
    pub fn entity_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Alle Entities in Index-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (EntityIndex, &EntityModel)> {
        self.layers.iter().flat_map(|(layer, entities)| {
            entities
                .iter()
                .enumerate()
                .map(move |(i, entity)| (EntityIndex::new(*layer, i as i32), entity))
        })
    }

    /// Mutable Referenz auf eine Entity.
    pub fn entity_mut(&mut self, index: EntityIndex) -> Option<&mut EntityModel> {
        let position = usize::try_from(index.position).ok()?;
        self.layers.get_mut(&index.layer)?.get_mut(position)
    }

    /// Hängt eine Entity am Ende ihres Abschnitts auf ihrem Layer an.
    pub fn add_entity(&mut self, entity: EntityModel) -> anyhow::Result<EntityIndex> {
        let layer = entity.layer;
        let position = self.section_end(layer, entity.is_dynamic())?;
        let index = EntityIndex::new(layer, position);
        self.insert_entity(entity, index)?;
        Ok(index)
    }

    /// Fügt eine Entity exakt an `index` ein.
    ///
    /// Schlägt fehl, wenn der Layer ungültig ist, die Position hinter dem Ende
    /// liegt oder die Entity in den falschen Abschnitt (statisch/dynamisch) fiele.
    pub fn insert_entity(&mut self, mut entity: EntityModel, index: EntityIndex) -> anyhow::Result<()> {
        let num_tiles = self.num_tiles(index.layer);
        let entities = self
            .layers
            .get_mut(&index.layer)
            .with_context(|| format!("Layer {} existiert nicht", index.layer))?;

        let position = usize::try_from(index.position)
            .with_context(|| format!("Ungültiger Index {index:?}"))?;
        if position > entities.len() {
            bail!(
                "Index {index:?} liegt hinter dem Ende von Layer {} ({} Entities)",
                index.layer,
                entities.len()
            );
        }
        let in_section = if entity.is_dynamic() {
            index.position >= num_tiles
        } else {
            index.position <= num_tiles
        };
        if !in_section {
            bail!("Index {index:?} verletzt die Reihenfolge statisch vor dynamisch");
        }

        entity.layer = index.layer;
        entities.insert(position, entity);
        Ok(())
    }

    /// Entfernt mehrere Entities und gibt sie in aufsteigender Index-Reihenfolge zurück.
    pub fn remove_entities(
        &mut self,
        indexes: &[EntityIndex],
    ) -> anyhow::Result<Vec<(EntityIndex, EntityModel)>> {
        let mut sorted = indexes.to_vec();
        sorted.sort();
        sorted.dedup();

        for index in &sorted {
            if !self.entity_exists(*index) {
                bail!("Entity {index:?} existiert nicht");
            }
        }

        let mut removed = Vec::with_capacity(sorted.len());
        for index in sorted.iter().rev() {
            let entities = self
                .layers
                .get_mut(&index.layer)
                .with_context(|| format!("Layer {} existiert nicht", index.layer))?;
            removed.push((*index, entities.remove(index.position as usize)));
        }
        removed.reverse();
        Ok(removed)
    }

    /// Verschiebt Entities auf neue Layer (jeweils ans Ende ihres Abschnitts).
    ///
    /// Gibt die neuen Indizes in der Reihenfolge der Eingabe zurück.
    pub fn set_entities_layer(
        &mut self,
        moves: &[(EntityIndex, i32)],
    ) -> anyhow::Result<Vec<EntityIndex>> {
        for (_, layer) in moves {
            if !self.is_valid_layer(*layer) {
                bail!("Layer {layer} existiert nicht");
            }
        }
        let indexes: Vec<EntityIndex> = moves.iter().map(|(index, _)| *index).collect();
        let removed = self.remove_entities(&indexes)?;

        let mut old_indexes = Vec::with_capacity(removed.len());
        let mut placed = Vec::with_capacity(removed.len());
        for (old_index, mut entity) in removed {
            let target = moves
                .iter()
                .find(|(index, _)| *index == old_index)
                .map(|(_, layer)| *layer)
                .unwrap_or(old_index.layer);
            entity.layer = target;
            let position = self.section_end(target, entity.is_dynamic())?;
            self.insert_tracked(entity, EntityIndex::new(target, position), &mut placed)?;
            old_indexes.push(old_index);
        }

        let new_indexes: BTreeMap<EntityIndex, EntityIndex> =
            old_indexes.into_iter().zip(placed).collect();
        Ok(indexes
            .iter()
            .filter_map(|index| new_indexes.get(index).copied())
            .collect())
    }

    /// Setzt Entities an das Ende (`to_front`) oder den Anfang ihres Abschnitts.
    pub fn reorder_entities(
        &mut self,
        indexes: &[EntityIndex],
        to_front: bool,
    ) -> anyhow::Result<Vec<EntityIndex>> {
        let removed = self.remove_entities(indexes)?;
        let mut new_indexes = Vec::with_capacity(removed.len());
        // Pro (Layer, dynamisch) zählen, wie viele bereits nach vorne gesetzt wurden.
        let mut inserted_at_back: BTreeMap<(i32, bool), i32> = BTreeMap::new();

        for (_, entity) in removed {
            let layer = entity.layer;
            let dynamic = entity.is_dynamic();
            let position = if to_front {
                self.section_end(layer, dynamic)?
            } else {
                let offset = inserted_at_back.entry((layer, dynamic)).or_insert(0);
                let start = if dynamic { self.num_tiles(layer) } else { 0 };
                let position = start + *offset;
                *offset += 1;
                position
            };
            self.insert_tracked(entity, EntityIndex::new(layer, position), &mut new_indexes)?;
        }
        Ok(new_indexes)
    }

    /// Wandelt statische Tiles in dynamische um und umgekehrt.
    pub fn convert_tiles(&mut self, indexes: &[EntityIndex]) -> anyhow::Result<Vec<EntityIndex>> {
        for index in indexes {
            match self.entity(*index) {
                Some(entity) if entity.is_tile() => {}
                Some(_) => bail!("Entity {index:?} ist kein Tile"),
                None => bail!("Entity {index:?} existiert nicht"),
            }
        }
        let removed = self.remove_entities(indexes)?;
        let mut new_indexes = Vec::with_capacity(removed.len());
        for (_, mut entity) in removed {
            entity.entity_type = match entity.entity_type {
                EntityType::Tile => EntityType::DynamicTile,
                _ => EntityType::Tile,
            };
            let position = self.section_end(entity.layer, entity.is_dynamic())?;
            let index = EntityIndex::new(entity.layer, position);
            self.insert_tracked(entity, index, &mut new_indexes)?;
        }
        Ok(new_indexes)
    }

    /// Oberste Entity, deren Bounding-Box den Punkt enthält.
    pub fn entity_at(&self, point: IVec2) -> Option<EntityIndex> {
        self.layers.iter().rev().find_map(|(layer, entities)| {
            entities
                .iter()
                .rposition(|entity| entity.bounding_box().contains_point(point))
                .map(|i| EntityIndex::new(*layer, i as i32))
        })
    }

    /// Höchster Layer mit einer Entity, die das Rechteck berührt; sonst `min_layer`.
    pub fn layer_in_rectangle(&self, area: Rect) -> i32 {
        self.layers
            .iter()
            .rev()
            .find(|(_, entities)| {
                entities
                    .iter()
                    .any(|entity| entity.bounding_box().intersects(&area))
            })
            .map(|(layer, _)| *layer)
            .unwrap_or(self.min_layer)
    }

    /// Alle Entities, deren Bounding-Box vollständig im Rechteck liegt.
    pub fn entities_in_rectangle(&self, area: Rect) -> Vec<EntityIndex> {
        self.iter()
            .filter(|(_, entity)| area.contains_rect(&entity.bounding_box()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Fügt ein und hält die bereits vergebenen Indizes in `placed` aktuell.
    ///
    /// Ein Einfügen verschiebt alle Entities dahinter auf demselben Layer um eins.
    fn insert_tracked(
        &mut self,
        entity: EntityModel,
        index: EntityIndex,
        placed: &mut Vec<EntityIndex>,
    ) -> anyhow::Result<()> {
        self.insert_entity(entity, index)?;
        for earlier in placed
            .iter_mut()
            .filter(|earlier| earlier.layer == index.layer && earlier.position >= index.position)
        {
            earlier.position += 1;
        }
        placed.push(index);
        Ok(())
    }

    /// Position hinter dem letzten Element des Abschnitts (statisch oder dynamisch).
    fn section_end(&self, layer: i32, dynamic: bool) -> anyhow::Result<i32> {
        let entities = self
            .layers
            .get(&layer)
            .with_context(|| format!("Layer {layer} existiert nicht"))?;
        Ok(if dynamic {
            entities.len() as i32
        } else {
            self.num_tiles(layer)
        })
    }
}

impl MapQuery for TileMap {
    fn entity(&self, index: EntityIndex) -> Option<&EntityModel> {
        let position = usize::try_from(index.position).ok()?;
        self.layers.get(&index.layer)?.get(position)
    }

    fn min_layer(&self) -> i32 {
        self.min_layer
    }

    fn max_layer(&self) -> i32 {
        self.max_layer
    }

    fn num_tiles(&self, layer: i32) -> i32 {
        self.layers
            .get(&layer)
            .map(|entities| entities.iter().filter(|e| !e.is_dynamic()).count() as i32)
            .unwrap_or(0)
    }

    fn num_dynamic_entities(&self, layer: i32) -> i32 {
        self.layers
            .get(&layer)
            .map(|entities| entities.iter().filter(|e| e.is_dynamic()).count() as i32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: i32, y: i32, layer: i32) -> EntityModel {
        EntityModel::tile("grass", Rect::new(x, y, 16, 16), layer)
    }

    fn object(x: i32, y: i32, layer: i32) -> EntityModel {
        EntityModel::new(EntityType::Object, Rect::new(x, y, 16, 16), layer)
    }

    #[test]
    fn add_entity_keeps_static_tiles_before_dynamic_entities() {
        let mut map = TileMap::new(0, 2);
        map.add_entity(object(0, 0, 0)).expect("Objekt einfügbar");
        let tile_index = map.add_entity(tile(16, 0, 0)).expect("Tile einfügbar");

        assert_eq!(tile_index, EntityIndex::new(0, 0));
        assert_eq!(map.num_tiles(0), 1);
        assert_eq!(map.num_dynamic_entities(0), 1);
        assert!(map
            .entity(EntityIndex::new(0, 1))
            .expect("Objekt vorhanden")
            .is_dynamic());
    }

    #[test]
    fn insert_entity_rejects_wrong_section_and_unknown_layer() {
        let mut map = TileMap::new(0, 1);
        map.add_entity(object(0, 0, 0)).expect("Objekt einfügbar");

        assert!(map
            .insert_entity(tile(0, 0, 0), EntityIndex::new(0, 1))
            .is_err());
        assert!(map
            .insert_entity(tile(0, 0, 5), EntityIndex::new(5, 0))
            .is_err());
        assert!(map
            .insert_entity(tile(0, 0, 0), EntityIndex::new(0, 0))
            .is_ok());
    }

    #[test]
    fn entity_at_returns_topmost_entity() {
        let mut map = TileMap::new(0, 2);
        map.add_entity(tile(0, 0, 0)).expect("Tile einfügbar");
        map.add_entity(tile(8, 8, 0)).expect("Tile einfügbar");
        map.add_entity(tile(8, 8, 1)).expect("Tile einfügbar");

        assert_eq!(
            map.entity_at(IVec2::new(10, 10)),
            Some(EntityIndex::new(1, 0))
        );
        assert_eq!(
            map.entity_at(IVec2::new(2, 2)),
            Some(EntityIndex::new(0, 0))
        );
        assert_eq!(map.entity_at(IVec2::new(100, 100)), None);
    }

    #[test]
    fn layer_in_rectangle_defaults_to_min_layer() {
        let mut map = TileMap::new(0, 2);
        map.add_entity(tile(0, 0, 2)).expect("Tile einfügbar");

        assert_eq!(map.layer_in_rectangle(Rect::new(8, 8, 16, 16)), 2);
        assert_eq!(map.layer_in_rectangle(Rect::new(64, 64, 16, 16)), 0);
    }

    #[test]
    fn set_entities_layer_returns_new_indexes() {
        let mut map = TileMap::new(0, 2);
        map.add_entity(tile(0, 0, 0)).expect("Tile einfügbar");
        map.add_entity(tile(16, 0, 0)).expect("Tile einfügbar");
        map.add_entity(tile(32, 0, 1)).expect("Tile einfügbar");

        let new_indexes = map
            .set_entities_layer(&[(EntityIndex::new(0, 0), 1)])
            .expect("Layerwechsel möglich");

        assert_eq!(new_indexes, vec![EntityIndex::new(1, 1)]);
        assert_eq!(map.num_tiles(0), 1);
        assert_eq!(map.num_tiles(1), 2);
    }

    #[test]
    fn set_entities_layer_tracks_indexes_shifted_by_later_tiles() {
        let mut map = TileMap::new(0, 2);
        let object_index = map.add_entity(object(0, 0, 0)).expect("Objekt einfügbar");
        let tile_index = map.add_entity(tile(16, 0, 1)).expect("Tile einfügbar");

        let new_indexes = map
            .set_entities_layer(&[(object_index, 2), (tile_index, 2)])
            .expect("Layerwechsel möglich");

        // Das Tile wird vor das bereits verschobene Objekt eingefügt.
        assert_eq!(
            new_indexes,
            vec![EntityIndex::new(2, 1), EntityIndex::new(2, 0)]
        );
        assert_eq!(
            map.entity(new_indexes[0]).map(|e| e.entity_type),
            Some(EntityType::Object)
        );
        assert_eq!(
            map.entity(new_indexes[1]).map(|e| e.entity_type),
            Some(EntityType::Tile)
        );
    }

    #[test]
    fn convert_tiles_tracks_indexes_of_mixed_batch() {
        let mut map = TileMap::new(0, 0);
        map.add_entity(tile(0, 0, 0)).expect("Tile einfügbar");
        map.add_entity(EntityModel::new(
            EntityType::DynamicTile,
            Rect::new(16, 0, 16, 16),
            0,
        ))
        .expect("Dynamisches Tile einfügbar");

        let converted = map
            .convert_tiles(&[EntityIndex::new(0, 0), EntityIndex::new(0, 1)])
            .expect("Konvertierung möglich");

        assert_eq!(
            converted,
            vec![EntityIndex::new(0, 1), EntityIndex::new(0, 0)]
        );
        assert_eq!(
            map.entity(converted[0]).map(|e| (e.top_left, e.entity_type)),
            Some((IVec2::new(0, 0), EntityType::DynamicTile))
        );
        assert_eq!(
            map.entity(converted[1]).map(|e| (e.top_left, e.entity_type)),
            Some((IVec2::new(16, 0), EntityType::Tile))
        );
    }

    #[test]
    fn reorder_to_back_keeps_returned_indexes_valid() {
        let mut map = TileMap::new(0, 0);
        map.add_entity(tile(0, 0, 0)).expect("Tile einfügbar");
        map.add_entity(tile(16, 0, 0)).expect("Tile einfügbar");
        map.add_entity(object(0, 16, 0)).expect("Objekt einfügbar");
        map.add_entity(object(16, 16, 0)).expect("Objekt einfügbar");

        let back = map
            .reorder_entities(&[EntityIndex::new(0, 1), EntityIndex::new(0, 3)], false)
            .expect("Reorder möglich");

        assert_eq!(back, vec![EntityIndex::new(0, 0), EntityIndex::new(0, 2)]);
        assert_eq!(
            map.entity(back[1]).map(|e| e.top_left),
            Some(IVec2::new(16, 16))
        );
    }

    #[test]
    fn reorder_entities_moves_inside_section() {
        let mut map = TileMap::new(0, 0);
        map.add_entity(tile(0, 0, 0)).expect("Tile einfügbar");
        map.add_entity(tile(16, 0, 0)).expect("Tile einfügbar");
        map.add_entity(object(0, 16, 0)).expect("Objekt einfügbar");

        let front = map
            .reorder_entities(&[EntityIndex::new(0, 0)], true)
            .expect("Reorder möglich");
        assert_eq!(front, vec![EntityIndex::new(0, 1)]);
        assert_eq!(
            map.entity(EntityIndex::new(0, 1)).map(|e| e.top_left),
            Some(IVec2::new(0, 0))
        );

        let back = map
            .reorder_entities(&[EntityIndex::new(0, 2)], false)
            .expect("Reorder möglich");
        assert_eq!(back, vec![EntityIndex::new(0, 2)]);
    }

    #[test]
    fn convert_tiles_flips_between_static_and_dynamic() {
        let mut map = TileMap::new(0, 0);
        map.add_entity(tile(0, 0, 0)).expect("Tile einfügbar");
        map.add_entity(tile(16, 0, 0)).expect("Tile einfügbar");

        let converted = map
            .convert_tiles(&[EntityIndex::new(0, 0)])
            .expect("Konvertierung möglich");

        assert_eq!(converted, vec![EntityIndex::new(0, 1)]);
        assert_eq!(map.num_tiles(0), 1);
        assert_eq!(map.num_dynamic_entities(0), 1);
        assert!(map.convert_tiles(&[EntityIndex::new(0, 7)]).is_err());
    }

    #[test]
    fn serde_roundtrip_preserves_section_order() {
        let mut map = TileMap::new(0, 1);
        map.add_entity(object(0, 0, 1)).expect("Objekt einfügbar");
        map.add_entity(tile(0, 0, 1)).expect("Tile einfügbar");

        let json = serde_json::to_string(&map).expect("serialisierbar");
        let restored: TileMap = serde_json::from_str(&json).expect("deserialisierbar");

        assert_eq!(restored, map);
    }
}
