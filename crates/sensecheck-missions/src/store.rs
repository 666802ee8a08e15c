//! Volatile mission storage

use crate::error::MissionError;
use sensecheck_domain::traits::MissionStore;
use sensecheck_domain::{ChapterId, Mission, MissionId};
use std::sync::{PoisonError, RwLock};

/// Process-local [`MissionStore`] backed by a vector
///
/// Missions are kept in creation order. Reads hand out clones, so callers
/// write changes back with [`MissionStore::update_mission`].
#[derive(Default)]
pub struct InMemoryMissionStore {
    missions: RwLock<Vec<Mission>>,
}

impl InMemoryMissionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored missions
    pub fn len(&self) -> usize {
        self.missions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no missions are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn mission_not_found(id: MissionId) -> MissionError {
    MissionError::NotFound(format!("Mission {}", id))
}

impl MissionStore for InMemoryMissionStore {
    type Error = MissionError;

    fn create_mission(&self, mission: Mission) -> Result<MissionId, Self::Error> {
        let mut missions = self.missions.write().unwrap_or_else(PoisonError::into_inner);
        if missions.iter().any(|m| m.id == mission.id) {
            return Err(MissionError::Store(format!(
                "Mission {} already exists",
                mission.id
            )));
        }
        let id = mission.id;
        missions.push(mission);
        Ok(id)
    }

    fn add_chapter(
        &self,
        mission_id: MissionId,
        name: &str,
        json_content: &str,
    ) -> Result<ChapterId, Self::Error> {
        let mut missions = self.missions.write().unwrap_or_else(PoisonError::into_inner);
        let mission = missions
            .iter_mut()
            .find(|m| m.id == mission_id)
            .ok_or_else(|| mission_not_found(mission_id))?;
        Ok(mission.add_chapter(name, json_content))
    }

    fn get_mission(&self, id: MissionId) -> Result<Option<Mission>, Self::Error> {
        let missions = self.missions.read().unwrap_or_else(PoisonError::into_inner);
        Ok(missions.iter().find(|m| m.id == id).cloned())
    }

    fn update_mission(&self, mission: Mission) -> Result<(), Self::Error> {
        let mut missions = self.missions.write().unwrap_or_else(PoisonError::into_inner);
        let slot = missions
            .iter_mut()
            .find(|m| m.id == mission.id)
            .ok_or_else(|| mission_not_found(mission.id))?;
        *slot = mission;
        Ok(())
    }

    fn list_missions(&self) -> Result<Vec<Mission>, Self::Error> {
        Ok(self
            .missions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensecheck_domain::ChapterStatus;

    #[test]
    fn test_create_and_get() {
        let store = InMemoryMissionStore::new();
        let id = store.create_mission(Mission::new("Q3 memo", "")).unwrap();

        let mission = store.get_mission(id).unwrap().unwrap();
        assert_eq!(mission.name, "Q3 memo");
        assert!(store.get_mission(MissionId::new()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = InMemoryMissionStore::new();
        let mission = Mission::new("a", "");
        store.create_mission(mission.clone()).unwrap();
        assert!(matches!(
            store.create_mission(mission),
            Err(MissionError::Store(_))
        ));
    }

    #[test]
    fn test_add_chapter_appends_pending() {
        let store = InMemoryMissionStore::new();
        let id = store.create_mission(Mission::new("a", "")).unwrap();
        let first = store.add_chapter(id, "One", "{}").unwrap();
        let second = store.add_chapter(id, "Two", "[]").unwrap();

        let mission = store.get_mission(id).unwrap().unwrap();
        let chapters = mission.chapters();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].id, first);
        assert_eq!(chapters[1].id, second);
        assert_eq!(chapters[1].order, 2);
        assert_eq!(chapters[1].status, ChapterStatus::Pending);
    }

    #[test]
    fn test_unknown_mission() {
        let store = InMemoryMissionStore::new();
        assert!(matches!(
            store.add_chapter(MissionId::new(), "x", "{}"),
            Err(MissionError::NotFound(_))
        ));
        assert!(matches!(
            store.update_mission(Mission::new("ghost", "")),
            Err(MissionError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_keeps_creation_order() {
        let store = InMemoryMissionStore::new();
        store.create_mission(Mission::new("first", "")).unwrap();
        store.create_mission(Mission::new("second", "")).unwrap();

        let names: Vec<_> = store
            .list_missions()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(store.len(), 2);
    }
}
