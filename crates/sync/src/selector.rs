use super::errors::SyncError;
use super::models::SelectionCriteria;
use panelsync_config::SyncSettings;
use panelsync_events::{AppEvent, EventBus};
use panelsync_models::ServerRecord;
use panelsync_panel::PanelApi;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SyncError>;

/// Stops a misbehaving panel from paginating forever
const MAX_PAGES: u32 = 1000;

impl SelectionCriteria {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            accepted_eggs: settings.accepted_egg_set(),
            accepted_images: settings.accepted_image_set(),
            exclude_name_patterns: settings.exclude_name_patterns.clone(),
        }
    }

    /// Why `server` is not a target, or `None` when it is
    pub fn skip_reason(&self, server: &ServerRecord) -> Option<String> {
        if let Some(pattern) = self
            .exclude_name_patterns
            .iter()
            .find(|p| !p.is_empty() && server.name.contains(p.as_str()))
        {
            return Some(format!("name matches exclusion '{}'", pattern));
        }

        let egg_matches = [server.egg.as_deref(), server.egg_uuid.as_deref()]
            .into_iter()
            .flatten()
            .any(|egg| self.accepted_eggs.contains(egg));
        let image_matches = server
            .docker_image
            .as_deref()
            .map_or(false, |image| self.accepted_images.contains(image));

        if egg_matches || image_matches {
            None
        } else {
            Some(format!(
                "egg {} / image {} not accepted",
                server.egg.as_deref().unwrap_or("<none>"),
                server.docker_image.as_deref().unwrap_or("<none>")
            ))
        }
    }

    pub fn matches(&self, server: &ServerRecord) -> bool {
        self.skip_reason(server).is_none()
    }
}

/// Fetches every page of the server list and keeps the accepted servers.
///
/// Any panel error aborts selection; an empty selection is an error too.
pub async fn select_servers(
    api: &dyn PanelApi,
    criteria: &SelectionCriteria,
    events: &Arc<EventBus>,
) -> Result<Vec<ServerRecord>> {
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let result = api.list_servers(page).await?;
        tracing::debug!(
            "Fetched server page {}/{} ({} servers)",
            result.current_page,
            result.total_pages,
            result.servers.len()
        );

        let last = result.is_last() || result.servers.is_empty();
        all.extend(result.servers);

        if last {
            break;
        }
        if page >= MAX_PAGES {
            tracing::warn!("Stopped paginating after {} pages", MAX_PAGES);
            break;
        }
        page += 1;
    }

    events.emit(AppEvent::ServersFetched {
        total: all.len(),
        pages: page,
    });

    let total = all.len();
    let selected: Vec<ServerRecord> = all
        .into_iter()
        .filter(|server| match criteria.skip_reason(server) {
            Some(reason) => {
                events.emit(AppEvent::ServerSkipped {
                    name: server.name.clone(),
                    reason,
                });
                false
            }
            None => true,
        })
        .collect();

    if selected.is_empty() {
        return Err(SyncError::NoServersSelected { total });
    }

    events.emit(AppEvent::ServersSelected {
        names: selected.iter().map(|s| s.name.clone()).collect(),
    });

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{server, MockPanel};

    fn criteria() -> SelectionCriteria {
        SelectionCriteria {
            accepted_eggs: ["Counter-Strike 2".to_string()].into_iter().collect(),
            accepted_images: ["docker.io/example/cs2:latest".to_string()].into_iter().collect(),
            exclude_name_patterns: vec!["1v1".to_string()],
        }
    }

    #[test]
    fn matches_by_egg_name_uuid_or_image() {
        let criteria = criteria();

        assert!(criteria.matches(&server("a", "Retakes", Some("Counter-Strike 2"), None)));
        assert!(criteria.matches(&server("b", "Surf", None, Some("docker.io/example/cs2:latest"))));
        assert!(!criteria.matches(&server("c", "Minecraft", Some("Paper"), Some("ghcr.io/paper"))));
        assert!(!criteria.matches(&server("d", "Bare", None, None)));

        let mut by_uuid = criteria.clone();
        by_uuid.accepted_eggs = ["paper-egg-uuid".to_string()].into_iter().collect();
        assert!(by_uuid.matches(&server("e", "Minecraft", Some("Paper"), None)));
    }

    #[test]
    fn exclusion_patterns_win() {
        let criteria = criteria();
        let excluded = server("a", "Arena 1v1 #2", Some("Counter-Strike 2"), None);
        assert!(criteria.skip_reason(&excluded).unwrap().contains("1v1"));
    }

    #[tokio::test]
    async fn follows_pagination_to_completion() {
        let mut mock = MockPanel::default();
        mock.pages = vec![
            vec![server("a", "One", Some("Counter-Strike 2"), None)],
            vec![server("b", "Two", Some("Paper"), None)],
            vec![server("c", "Three", Some("Counter-Strike 2"), None)],
        ];

        let events = EventBus::new(true);
        let selected = select_servers(&mock, &criteria(), &events).await.unwrap();

        assert_eq!(*mock.list_calls.lock(), vec![1, 2, 3]);
        let ids: Vec<&str> = selected.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn empty_selection_fails_loudly() {
        let mock = MockPanel::with_servers(vec![server("a", "Minecraft", Some("Paper"), None)]);
        let events = EventBus::new(true);

        let result = select_servers(&mock, &criteria(), &events).await;
        assert!(matches!(result, Err(SyncError::NoServersSelected { total: 1 })));
    }

    #[tokio::test]
    async fn list_failure_aborts_selection() {
        let mut mock = MockPanel::with_servers(vec![server("a", "One", Some("Counter-Strike 2"), None)]);
        mock.list_error = Some(401);
        let events = EventBus::new(true);

        let result = select_servers(&mock, &criteria(), &events).await;
        match result {
            Err(SyncError::PanelError(e)) => assert_eq!(e.status(), Some(401)),
            other => panic!("expected panel error, got {:?}", other.map(|s| s.len())),
        }
    }
}
